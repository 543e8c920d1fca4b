//! Test helpers for integration tests
//!
//! Provides utilities for spawning a gateway on an ephemeral port and
//! driving it with real WebSocket clients.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use bridge_common::{AppConfig, AppSettings, Environment, ServerConfig, VoiceTokenConfig};
use bridge_gateway::server::{create_app, create_gateway_state};
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// How long to wait for an expected event before failing
const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Test gateway instance that manages lifecycle
pub struct TestGateway {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl TestGateway {
    /// Start a new test gateway on an ephemeral port
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test gateway with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_gateway_state(config);
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// Get the WebSocket URL for the gateway endpoint
    pub fn ws_url(&self) -> String {
        format!("ws://{}/gateway", self.addr)
    }

    /// Get the base HTTP URL
    pub fn http_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Open a new WebSocket client against this gateway
    pub async fn connect(&self) -> Result<WsClient> {
        WsClient::connect(&self.ws_url()).await
    }
}

/// A dispatch event received from the gateway
#[derive(Debug)]
pub struct ReceivedEvent {
    pub op: u64,
    pub t: Option<String>,
    pub d: Value,
}

/// A WebSocket client speaking the relay protocol
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Connect to a gateway WebSocket URL
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _response) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Send a raw JSON frame
    pub async fn send_json(&mut self, value: &Value) -> Result<()> {
        self.stream.send(Message::Text(value.to_string())).await?;
        Ok(())
    }

    /// Send a raw text frame (for malformed-input tests)
    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Register an identifier and wait for the acknowledgement
    pub async fn register(&mut self, identifier: &str) -> Result<Value> {
        self.send_json(&json!({"op": 1, "d": {"identifier": identifier}}))
            .await?;
        self.expect_event("REGISTERED").await
    }

    /// Send an InitiateCall frame
    pub async fn initiate_call(&mut self, from: &str, to: &str, session_name: &str) -> Result<()> {
        self.send_json(&json!({
            "op": 2,
            "d": {"from": from, "to": to, "session_name": session_name}
        }))
        .await
    }

    /// Send an AcceptCall frame
    pub async fn accept_call(&mut self, original_caller: &str, session_name: &str) -> Result<()> {
        self.send_json(&json!({
            "op": 3,
            "d": {"original_caller": original_caller, "session_name": session_name}
        }))
        .await
    }

    /// Send a RejectCall frame
    pub async fn reject_call(&mut self, original_caller: &str, session_name: &str) -> Result<()> {
        self.send_json(&json!({
            "op": 4,
            "d": {"original_caller": original_caller, "session_name": session_name}
        }))
        .await
    }

    /// Send an EndCall frame
    pub async fn end_call(&mut self, from: &str, to: &str) -> Result<()> {
        self.send_json(&json!({"op": 5, "d": {"from": from, "to": to}}))
            .await
    }

    /// Receive the next dispatch event, skipping transport frames
    pub async fn recv_event(&mut self) -> Result<ReceivedEvent> {
        loop {
            let msg = tokio::time::timeout(EVENT_TIMEOUT, self.stream.next())
                .await
                .map_err(|_| anyhow!("Timed out waiting for event"))?
                .ok_or_else(|| anyhow!("Connection closed"))??;

            match msg {
                Message::Text(text) => {
                    let value: Value = serde_json::from_str(&text)?;
                    return Ok(ReceivedEvent {
                        op: value["op"].as_u64().unwrap_or(u64::MAX),
                        t: value["t"].as_str().map(ToString::to_string),
                        d: value["d"].clone(),
                    });
                }
                Message::Ping(_) | Message::Pong(_) => {}
                Message::Close(frame) => bail!("Connection closed: {frame:?}"),
                other => bail!("Unexpected message: {other:?}"),
            }
        }
    }

    /// Receive the next event and assert its type, returning the payload
    pub async fn expect_event(&mut self, event_type: &str) -> Result<Value> {
        let event = self.recv_event().await?;

        if event.op != 0 {
            bail!("Expected dispatch op 0, got {}", event.op);
        }
        if event.t.as_deref() != Some(event_type) {
            bail!("Expected event {event_type}, got {:?}", event.t);
        }

        Ok(event.d)
    }

    /// Assert that no frame arrives within the window
    pub async fn expect_silence(&mut self, window: Duration) -> Result<()> {
        match tokio::time::timeout(window, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Text(text)))) => bail!("Unexpected frame: {text}"),
            Ok(Some(Ok(_)) | None) => Ok(()),
            Ok(Some(Err(e))) => Err(e.into()),
        }
    }

    /// Wait for the server to close the connection
    pub async fn expect_close(&mut self) -> Result<()> {
        loop {
            match tokio::time::timeout(EVENT_TIMEOUT, self.stream.next())
                .await
                .map_err(|_| anyhow!("Timed out waiting for close"))?
            {
                None | Some(Ok(Message::Close(_))) => return Ok(()),
                Some(Ok(_)) => {}
                Some(Err(_)) => return Ok(()),
            }
        }
    }

    /// Close the connection from the client side
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Create a test configuration
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "signbridge-test".to_string(),
            env: Environment::Development,
        },
        gateway: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        voice_token: VoiceTokenConfig {
            app_id: "test-app".to_string(),
            app_certificate: "test-certificate-that-is-long-enough".to_string(),
            expiry_secs: 3600,
        },
    }
}
