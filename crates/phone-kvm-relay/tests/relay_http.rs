//! Serves the relay on a real socket and talks to it with an HTTP client.

use std::net::SocketAddr;
use std::sync::Arc;

use phone_kvm_relay::application::ContentStore;
use phone_kvm_relay::infrastructure::serve;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct Relay {
    url: String,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

async fn start() -> Relay {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        serve(listener, Arc::new(ContentStore::new()), async {
            let _ = stopped.await;
        })
        .await
        .unwrap();
    });
    Relay {
        url: format!("http://{addr}/content"),
        stop,
        task,
    }
}

#[tokio::test]
async fn test_post_then_get_returns_latest_payload() {
    // Arrange
    let relay = start().await;
    let client = reqwest::Client::new();

    // Act
    let posted: Value = client
        .post(&relay.url)
        .json(&json!({"content": "weixin://", "launch_app": true}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let fetched: Value = client.get(&relay.url).send().await.unwrap().json().await.unwrap();

    // Assert
    let expected = json!({"success": true, "content": "weixin://", "launch_app": true});
    assert_eq!(posted, expected);
    assert_eq!(fetched, expected);

    relay.stop.send(()).unwrap();
    relay.task.await.unwrap();
}

#[tokio::test]
async fn test_text_payload_omits_launch_app_field() {
    let relay = start().await;
    let client = reqwest::Client::new();

    client
        .post(&relay.url)
        .json(&json!({"content": "hello", "launch_app": false}))
        .send()
        .await
        .unwrap();
    let fetched: Value = client.get(&relay.url).send().await.unwrap().json().await.unwrap();

    assert_eq!(fetched, json!({"success": true, "content": "hello"}));
    let _ = relay.stop.send(());
}

#[tokio::test]
async fn test_incomplete_payload_is_rejected_and_store_unchanged() {
    // Arrange
    let relay = start().await;
    let client = reqwest::Client::new();

    // Act: launch_app is required
    let status = client
        .post(&relay.url)
        .json(&json!({"content": "oops"}))
        .send()
        .await
        .unwrap()
        .status();
    let fetched: Value = client.get(&relay.url).send().await.unwrap().json().await.unwrap();

    // Assert
    assert!(status.is_client_error());
    assert_eq!(fetched, json!({"success": true, "content": ""}));
    let _ = relay.stop.send(());
}
