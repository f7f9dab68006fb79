//! Integration tests for the REST client operations.
//!
//! These tests run every operation against a mock TPI application and
//! verify endpoint construction, headers, request bodies and response
//! normalization.

use serde_json::json;
use tpi_connector::{ApiKey, ApiResult, BaseUrl, ClientConfig, RestClient, Timeouts};
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server.
fn create_test_client(server: &MockServer) -> RestClient {
    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .api_key(ApiKey::new("test-api-key").unwrap())
        .timeouts(Timeouts::default())
        .build()
        .unwrap();
    RestClient::new(config).unwrap()
}

/// Mounts a mock answering `verb` on `route` once with a JSON body.
async fn mount_ok(server: &MockServer, verb: &str, route: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .and(header("tpi_api_key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(server)
        .await;
}

fn ok_body() -> ApiResult {
    ApiResult::Json(json!({"ok": true}))
}

// ============================================================================
// Endpoint Construction Tests
// ============================================================================

#[tokio::test]
async fn test_list_gets_collection() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/owner/acme/vm").await;
    let client = create_test_client(&server);

    let result = client.list("acme", "vm", None).await.unwrap();

    assert_eq!(result, ok_body());
    server.verify().await;
}

#[tokio::test]
async fn test_read_sends_json_body_on_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/owner/acme/vm/db1"))
        .and(body_json(json!({"fields": ["state"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "up"})))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let result = client
        .read("acme", "vm", "db1", &json!({"fields": ["state"]}), None)
        .await
        .unwrap();

    assert_eq!(result, ApiResult::Json(json!({"state": "up"})));
    server.verify().await;
}

#[tokio::test]
async fn test_create_posts_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/owner/acme/vm/db1"))
        .and(body_json(json!({"cpu": 2})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"name": "db1"})))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let result = client
        .create("acme", "vm", "db1", &json!({"cpu": 2}), None)
        .await
        .unwrap();

    assert_eq!(result, ApiResult::Json(json!({"name": "db1"})));
    server.verify().await;
}

#[tokio::test]
async fn test_remove_deletes_resource() {
    let server = MockServer::start().await;
    mount_ok(&server, "DELETE", "/owner/acme/vm/db1").await;
    let client = create_test_client(&server);

    let result = client.remove("acme", "vm", "db1", None).await.unwrap();

    assert_eq!(result, ok_body());
    server.verify().await;
}

#[tokio::test]
async fn test_update_patches_resource() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/owner/acme/vm/db1"))
        .and(body_json(json!({"cpu": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let result = client
        .update("acme", "vm", "db1", &json!({"cpu": 4}), None)
        .await
        .unwrap();

    assert_eq!(result, ok_body());
    server.verify().await;
}

#[tokio::test]
async fn test_read_log_without_transaction_id() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/owner/acme/vm/db1/log").await;
    let client = create_test_client(&server);

    let result = client.read_log("acme", "vm", "db1", None).await.unwrap();

    assert_eq!(result, ok_body());
    server.verify().await;
}

#[tokio::test]
async fn test_read_log_with_empty_transaction_id() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/owner/acme/vm/db1/log").await;
    let client = create_test_client(&server);

    let result = client.read_log("acme", "vm", "db1", Some("")).await.unwrap();

    assert_eq!(result, ok_body());
    server.verify().await;
}

#[tokio::test]
async fn test_read_log_with_transaction_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/owner/acme/vm/db1/log/T1"))
        .and(header("tpi_transaction_id", "T1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("step 1 done\nstep 2 done\n"))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let result = client.read_log("acme", "vm", "db1", Some("T1")).await.unwrap();

    assert_eq!(result.as_raw(), Some(&b"step 1 done\nstep 2 done\n"[..]));
    server.verify().await;
}

#[tokio::test]
async fn test_read_transaction_paths() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/owner/acme/vm/db1/transaction").await;
    mount_ok(&server, "GET", "/owner/acme/vm/db1/transaction/T1").await;
    let client = create_test_client(&server);

    assert_eq!(
        client.read_transaction("acme", "vm", "db1", None).await.unwrap(),
        ok_body()
    );
    assert_eq!(
        client
            .read_transaction("acme", "vm", "db1", Some("T1"))
            .await
            .unwrap(),
        ok_body()
    );
    server.verify().await;
}

#[tokio::test]
async fn test_handler_lifecycle_endpoints() {
    let server = MockServer::start().await;
    mount_ok(&server, "POST", "/owner/acme/vm/db1/handler").await;
    mount_ok(&server, "PUT", "/owner/acme/vm/db1/handler").await;
    mount_ok(&server, "DELETE", "/owner/acme/vm/db1/handler").await;
    let client = create_test_client(&server);
    let payload = json!({"handler": "kvm"});

    assert_eq!(
        client.attach("acme", "vm", "db1", &payload, None).await.unwrap(),
        ok_body()
    );
    assert_eq!(
        client.migrate("acme", "vm", "db1", &payload, None).await.unwrap(),
        ok_body()
    );
    assert_eq!(
        client.detach("acme", "vm", "db1", None).await.unwrap(),
        ok_body()
    );
    server.verify().await;
}

#[tokio::test]
async fn test_invoke_action_posts_to_action_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/owner/acme/vm/db1/handler/backup"))
        .and(header("tpi_transaction_id", "T7"))
        .and(body_json(json!({"target": "s3"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let result = client
        .invoke_action("acme", "vm", "db1", "backup", &json!({"target": "s3"}), Some("T7"))
        .await
        .unwrap();

    assert_eq!(result, ok_body());
    server.verify().await;
}

#[tokio::test]
async fn test_unlock_task_deletes_action_endpoint() {
    let server = MockServer::start().await;
    mount_ok(&server, "DELETE", "/owner/acme/vm/db1/handler/backup").await;
    let client = create_test_client(&server);

    let result = client
        .unlock_task("acme", "vm", "db1", "backup", None)
        .await
        .unwrap();

    assert_eq!(result, ok_body());
    server.verify().await;
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    mount_ok(&server, "GET", "/api/v1/owner/acme/vm").await;
    let config = ClientConfig::new(format!("{}/api/v1/", server.uri()), "test-api-key").unwrap();
    let client = RestClient::new(config).unwrap();

    assert_eq!(client.list("acme", "vm", None).await.unwrap(), ok_body());
    server.verify().await;
}

// ============================================================================
// Response Normalization Tests
// ============================================================================

#[tokio::test]
async fn test_error_statuses_are_empty_for_every_operation() {
    for status in [300, 404, 409, 500] {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"error": "boom"})))
            .mount(&server)
            .await;
        let client = create_test_client(&server);
        let payload = json!({});

        let results = vec![
            client.list("o", "t", None).await.unwrap(),
            client.read("o", "t", "n", &payload, None).await.unwrap(),
            client.create("o", "t", "n", &payload, None).await.unwrap(),
            client.remove("o", "t", "n", None).await.unwrap(),
            client.update("o", "t", "n", &payload, None).await.unwrap(),
            client.read_log("o", "t", "n", Some("T")).await.unwrap(),
            client.read_transaction("o", "t", "n", None).await.unwrap(),
            client.attach("o", "t", "n", &payload, None).await.unwrap(),
            client.detach("o", "t", "n", None).await.unwrap(),
            client.migrate("o", "t", "n", &payload, None).await.unwrap(),
            client
                .invoke_action("o", "t", "n", "a", &payload, None)
                .await
                .unwrap(),
            client.unlock_task("o", "t", "n", "a", None).await.unwrap(),
        ];

        for result in results {
            assert_eq!(result, ApiResult::Empty, "status {status}");
        }
    }
}

#[tokio::test]
async fn test_non_json_body_is_returned_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0x01]))
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let result = client.list("acme", "vm", None).await.unwrap();

    assert_eq!(result, ApiResult::Raw(vec![0xff, 0xfe, 0x01]));
}

#[tokio::test]
async fn test_empty_success_body_is_returned_raw() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let result = client.remove("acme", "vm", "db1", None).await.unwrap();

    assert_eq!(result, ApiResult::Raw(Vec::new()));
}

// ============================================================================
// Payload Tests
// ============================================================================

#[tokio::test]
async fn test_payload_mutation_after_call_does_not_change_sent_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let mut payload = json!({"cpu": 2, "tags": ["db"]});
    client
        .create("acme", "vm", "db1", &payload, None)
        .await
        .unwrap();
    payload["cpu"] = json!(16);
    payload["tags"] = json!([]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent, json!({"cpu": 2, "tags": ["db"]}));
}

#[tokio::test]
async fn test_typed_payload_is_serialized() {
    #[derive(serde::Serialize)]
    struct VmSettings {
        cpu: u32,
        image: &'static str,
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(json!({"cpu": 2, "image": "debian-12"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    let client = create_test_client(&server);

    let settings = VmSettings {
        cpu: 2,
        image: "debian-12",
    };
    let result = client.create("acme", "vm", "db1", &settings, None).await.unwrap();

    assert_eq!(result, ok_body());
    server.verify().await;
}

// ============================================================================
// Transport Error Tests
// ============================================================================

#[tokio::test]
async fn test_connection_refused_propagates() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(format!("http://{addr}"), "test-api-key").unwrap();
    let client = RestClient::new(config).unwrap();

    let error = client.list("acme", "vm", None).await.unwrap_err();
    assert!(error.is_connect());
}

#[tokio::test]
async fn test_timeout_propagates_for_ordinary_operations() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
        .mount(&server)
        .await;
    let config = ClientConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .api_key(ApiKey::new("test-api-key").unwrap())
        .timeouts(Timeouts::default().with_standard(std::time::Duration::from_millis(100)))
        .build()
        .unwrap();
    let client = RestClient::new(config).unwrap();

    let error = client.list("acme", "vm", None).await.unwrap_err();
    assert!(error.is_timeout());
}

#[tokio::test]
async fn test_connection_dropped_before_response_propagates() {
    use tokio::io::AsyncReadExt;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Reads the request, then hangs up without answering.
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0_u8; 1024];
        let _ = socket.read(&mut buf).await;
    });

    let config = ClientConfig::new(format!("http://{addr}"), "test-api-key").unwrap();
    let client = RestClient::new(config).unwrap();

    let error = client.list("acme", "vm", None).await.unwrap_err();
    assert!(error.is_connect());
    assert!(!error.is_timeout());
}
