//! Endpoint path construction for the TPI REST API.
//!
//! Every endpoint lives under the `owner` namespace:
//!
//! ```text
//! owner/{owner_name}/{resource_type}[/{resource_name}][/{suffix}...]
//! ```
//!
//! Segments are joined with `/` as given. They are not percent-encoded, so
//! callers must supply path-safe identifiers.
//!
//! # Example
//!
//! ```rust
//! use tpi_connector::clients::rest::ResourceLocator;
//!
//! let db1 = ResourceLocator::resource("acme", "vm", "db1");
//! assert_eq!(db1.path(), "owner/acme/vm/db1");
//! assert_eq!(db1.path_with(&["log", "T1"]), "owner/acme/vm/db1/log/T1");
//!
//! let vms = ResourceLocator::collection("acme", "vm");
//! assert_eq!(vms.path(), "owner/acme/vm");
//! ```

/// Root segment of every resource endpoint.
pub const OWNER_SEGMENT: &str = "owner";

/// Suffix of the per-resource log endpoint.
pub const LOG_SEGMENT: &str = "log";

/// Suffix of the per-resource transaction endpoint.
pub const TRANSACTION_SEGMENT: &str = "transaction";

/// Suffix of the per-resource handler endpoint.
pub const HANDLER_SEGMENT: &str = "handler";

/// Owner whose `user` resources are readable without a tenant context.
const PUBLIC_OWNER: &str = "public";

/// Resource type of user records under the public owner.
const USER_TYPE: &str = "user";

/// Identifies a resource collection or a single resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceLocator<'a> {
    owner_name: &'a str,
    resource_type: &'a str,
    resource_name: Option<&'a str>,
}

impl<'a> ResourceLocator<'a> {
    /// Locates every resource of `resource_type` owned by `owner_name`.
    #[must_use]
    pub const fn collection(owner_name: &'a str, resource_type: &'a str) -> Self {
        Self {
            owner_name,
            resource_type,
            resource_name: None,
        }
    }

    /// Locates a single named resource.
    #[must_use]
    pub const fn resource(
        owner_name: &'a str,
        resource_type: &'a str,
        resource_name: &'a str,
    ) -> Self {
        Self {
            owner_name,
            resource_type,
            resource_name: Some(resource_name),
        }
    }

    /// Locates the public user record probed for connectivity.
    #[must_use]
    pub const fn public_user(user_name: &'a str) -> Self {
        Self::resource(PUBLIC_OWNER, USER_TYPE, user_name)
    }

    /// Returns the owner name.
    #[must_use]
    pub const fn owner_name(&self) -> &'a str {
        self.owner_name
    }

    /// Returns the resource type.
    #[must_use]
    pub const fn resource_type(&self) -> &'a str {
        self.resource_type
    }

    /// Returns the resource name, if this locator names a single resource.
    #[must_use]
    pub const fn resource_name(&self) -> Option<&'a str> {
        self.resource_name
    }

    /// Returns the endpoint path of the located collection or resource.
    #[must_use]
    pub fn path(&self) -> String {
        self.path_with(&[])
    }

    /// Returns the endpoint path with `suffix` segments appended.
    #[must_use]
    pub fn path_with(&self, suffix: &[&str]) -> String {
        let mut segments = vec![OWNER_SEGMENT, self.owner_name, self.resource_type];
        segments.extend(self.resource_name);
        segments.extend_from_slice(suffix);
        segments.join("/")
    }

    /// Returns the path of the `log` or `transaction` endpoint, narrowed to
    /// one transaction when a non-empty id is given.
    #[must_use]
    pub fn history_path(&self, segment: &str, transaction_id: Option<&str>) -> String {
        match transaction_id.filter(|id| !id.is_empty()) {
            Some(id) => self.path_with(&[segment, id]),
            None => self.path_with(&[segment]),
        }
    }

    /// Returns the path of the handler endpoint, or of one handler action.
    #[must_use]
    pub fn handler_path(&self, action: Option<&str>) -> String {
        match action {
            Some(action) => self.path_with(&[HANDLER_SEGMENT, action]),
            None => self.path_with(&[HANDLER_SEGMENT]),
        }
    }
}
