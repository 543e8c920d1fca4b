//! Gateway Integration Tests
//!
//! End-to-end tests driving the signaling relay over real WebSocket
//! connections. The gateway runs in-process on an ephemeral port, so no
//! external services are required.
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use integration_tests::TestGateway;
use std::time::Duration;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let gateway = TestGateway::start().await.expect("Failed to start gateway");

    let response = reqwest::get(format!("{}/health", gateway.http_url()))
        .await
        .expect("Request failed");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_acknowledged() {
    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let mut client = gateway.connect().await.expect("Failed to connect");

    let ack = client.register("+15551234567").await.unwrap();

    assert_eq!(ack["identifier"], "+15551234567");
    assert!(!ack["connection_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_re_register_displaces_old_connection() {
    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let mut old = gateway.connect().await.unwrap();
    let mut new = gateway.connect().await.unwrap();
    let mut caller = gateway.connect().await.unwrap();

    old.register("bob").await.unwrap();
    new.register("bob").await.unwrap();
    caller.register("alice").await.unwrap();

    caller.initiate_call("alice", "bob", "alice_1").await.unwrap();

    let invite = new.expect_event("INCOMING_CALL").await.unwrap();
    assert_eq!(invite["from"], "alice");

    old.expect_silence(Duration::from_millis(200)).await.unwrap();
}

// ============================================================================
// Call Flow Tests
// ============================================================================

#[tokio::test]
async fn test_call_accept_flow() {
    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let mut alice = gateway.connect().await.unwrap();
    let mut bob = gateway.connect().await.unwrap();
    let mut carol = gateway.connect().await.unwrap();

    alice.register("alice").await.unwrap();
    bob.register("bob").await.unwrap();
    carol.register("carol").await.unwrap();

    alice
        .initiate_call("alice", "bob", "alice_1700000000")
        .await
        .unwrap();

    let invite = bob.expect_event("INCOMING_CALL").await.unwrap();
    assert_eq!(invite["from"], "alice");
    assert_eq!(invite["session_name"], "alice_1700000000");

    bob.accept_call("alice", "alice_1700000000").await.unwrap();

    let caller_side = alice.expect_event("CALL_ACCEPTED").await.unwrap();
    let callee_side = bob.expect_event("CALL_ACCEPTED").await.unwrap();

    assert_eq!(caller_side, callee_side);
    assert_eq!(caller_side["session_name"], "alice_1700000000");
    assert!(!caller_side["credential"].as_str().unwrap().is_empty());

    // Bystanders never see call traffic
    carol.expect_silence(Duration::from_millis(200)).await.unwrap();
}

#[tokio::test]
async fn test_call_reject_flow() {
    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let mut alice = gateway.connect().await.unwrap();
    let mut bob = gateway.connect().await.unwrap();

    alice.register("alice").await.unwrap();
    bob.register("bob").await.unwrap();

    alice
        .initiate_call("alice", "bob", "alice_1700000000")
        .await
        .unwrap();
    bob.expect_event("INCOMING_CALL").await.unwrap();

    bob.reject_call("alice", "alice_1700000000").await.unwrap();

    let rejected = alice.expect_event("CALL_REJECTED").await.unwrap();
    assert_eq!(rejected["session_name"], "alice_1700000000");

    bob.expect_silence(Duration::from_millis(200)).await.unwrap();
}

#[tokio::test]
async fn test_call_end_flow() {
    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let mut alice = gateway.connect().await.unwrap();
    let mut bob = gateway.connect().await.unwrap();

    alice.register("alice").await.unwrap();
    bob.register("bob").await.unwrap();

    alice
        .initiate_call("alice", "bob", "alice_1700000000")
        .await
        .unwrap();
    bob.expect_event("INCOMING_CALL").await.unwrap();
    bob.accept_call("alice", "alice_1700000000").await.unwrap();
    alice.expect_event("CALL_ACCEPTED").await.unwrap();
    bob.expect_event("CALL_ACCEPTED").await.unwrap();

    alice.end_call("alice", "bob").await.unwrap();

    let ended = bob.expect_event("CALL_ENDED").await.unwrap();
    assert_eq!(ended["from"], "alice");
}

#[tokio::test]
async fn test_target_unavailable() {
    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let mut alice = gateway.connect().await.unwrap();

    alice.register("alice").await.unwrap();
    alice
        .initiate_call("alice", "nobody", "alice_1700000000")
        .await
        .unwrap();

    let unavailable = alice.expect_event("TARGET_UNAVAILABLE").await.unwrap();
    assert!(unavailable["message"]
        .as_str()
        .unwrap()
        .contains("nobody"));
}

// ============================================================================
// Disconnect Tests
// ============================================================================

#[tokio::test]
async fn test_disconnect_removes_registration() {
    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let mut alice = gateway.connect().await.unwrap();
    let mut bob = gateway.connect().await.unwrap();

    alice.register("alice").await.unwrap();
    bob.register("bob").await.unwrap();

    bob.close().await.unwrap();

    // Give the gateway a moment to run disconnect cleanup
    tokio::time::sleep(Duration::from_millis(200)).await;

    alice
        .initiate_call("alice", "bob", "alice_1700000000")
        .await
        .unwrap();

    alice.expect_event("TARGET_UNAVAILABLE").await.unwrap();
}

// ============================================================================
// Protocol Error Tests
// ============================================================================

#[tokio::test]
async fn test_malformed_frame_closes_connection() {
    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let mut client = gateway.connect().await.unwrap();

    client.send_text("not json").await.unwrap();

    client.expect_close().await.unwrap();
}

#[tokio::test]
async fn test_server_op_from_client_closes_connection() {
    let gateway = TestGateway::start().await.expect("Failed to start gateway");
    let mut client = gateway.connect().await.unwrap();

    client
        .send_json(&serde_json::json!({"op": 0, "t": "REGISTERED", "d": {}}))
        .await
        .unwrap();

    client.expect_close().await.unwrap();
}
