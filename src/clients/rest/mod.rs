//! REST API client for TPI applications.
//!
//! This module provides [`RestClient`], the typed surface of the TPI
//! owner/resource API, together with the endpoint and task-status types it
//! uses.
//!
//! # Operations
//!
//! | Method | HTTP | Path |
//! |---|---|---|
//! | [`RestClient::probe`] | GET | `owner/public/user/{user}` |
//! | [`RestClient::list`] | GET | `owner/{o}/{t}` |
//! | [`RestClient::read`] | GET (with body) | `owner/{o}/{t}/{n}` |
//! | [`RestClient::create`] | POST | `owner/{o}/{t}/{n}` |
//! | [`RestClient::remove`] | DELETE | `owner/{o}/{t}/{n}` |
//! | [`RestClient::update`] | PATCH | `owner/{o}/{t}/{n}` |
//! | [`RestClient::read_log`] | GET | `owner/{o}/{t}/{n}/log[/{txn}]` |
//! | [`RestClient::read_transaction`] | GET | `owner/{o}/{t}/{n}/transaction[/{txn}]` |
//! | [`RestClient::attach`] | POST | `owner/{o}/{t}/{n}/handler` |
//! | [`RestClient::detach`] | DELETE | `owner/{o}/{t}/{n}/handler` |
//! | [`RestClient::migrate`] | PUT | `owner/{o}/{t}/{n}/handler` |
//! | [`RestClient::invoke_action`] | POST | `owner/{o}/{t}/{n}/handler/{action}` |
//! | [`RestClient::unlock_task`] | DELETE | `owner/{o}/{t}/{n}/handler/{action}` |
//! | [`RestClient::invoke_long_running`] | POST | `owner/{o}/{t}/{n}/handler/{action}` |

mod client;
mod path;
mod task;

pub use client::RestClient;
pub use path::{
    ResourceLocator, HANDLER_SEGMENT, LOG_SEGMENT, OWNER_SEGMENT, TRANSACTION_SEGMENT,
};
pub use task::{TaskReport, TaskStatus};
