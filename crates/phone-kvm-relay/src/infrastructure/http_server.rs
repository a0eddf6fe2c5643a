//! Axum routes for `/content`.
//!
//! ```text
//! POST /content {"content": "...", "launch_app": bool}
//!      -> {"success": true, "content": "...", "launch_app": true?}
//! GET  /content
//!      -> {"success": true, "content": "...", "launch_app": true?}
//! ```
//!
//! `launch_app` is only present in responses when it is `true`.  A POST body
//! missing either field is rejected by the JSON extractor before it reaches
//! the store.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use phone_kvm_core::{protocol::CONTENT_PATH, ContentPayload, ContentResponse};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::application::ContentStore;
use crate::domain::RelayConfig;

#[derive(Debug, Error)]
pub enum RelayServerError {
    #[error("could not bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("relay server failed: {0}")]
    Serve(#[source] std::io::Error),
}

/// Routes backed by `store`.
pub fn router(store: Arc<ContentStore>) -> Router {
    Router::new()
        .route(CONTENT_PATH, get(get_content).post(set_content))
        .with_state(store)
}

async fn set_content(
    State(store): State<Arc<ContentStore>>,
    Json(payload): Json<ContentPayload>,
) -> Json<ContentResponse> {
    info!(
        launch_app = payload.launch_app,
        len = payload.content.len(),
        "content received"
    );
    let stored = store.set(payload).await;
    Json(ContentResponse::from(&stored))
}

async fn get_content(State(store): State<Arc<ContentStore>>) -> Json<ContentResponse> {
    let latest = store.get().await;
    debug!(launch_app = latest.launch_app, "content fetched");
    Json(ContentResponse::from(&latest))
}

/// Serves on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`RelayServerError::Serve`] if the accept loop fails.
pub async fn serve<F>(
    listener: TcpListener,
    store: Arc<ContentStore>,
    shutdown: F,
) -> Result<(), RelayServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(store))
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("shutting down gracefully");
        })
        .await
        .map_err(RelayServerError::Serve)
}

/// Binds `config.bind_addr` and serves until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`RelayServerError::Bind`] if the address is unavailable, or
/// [`RelayServerError::Serve`] if the accept loop fails.
pub async fn run_server<F>(
    config: RelayConfig,
    store: Arc<ContentStore>,
    shutdown: F,
) -> Result<(), RelayServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| RelayServerError::Bind {
            addr: config.bind_addr,
            source,
        })?;
    info!(addr = %config.bind_addr, "clipboard relay listening");
    serve(listener, store, shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_before_any_post_returns_empty_text() {
        // Act
        let Json(response) = get_content(State(Arc::new(ContentStore::new()))).await;

        // Assert
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({"success": true, "content": ""})
        );
    }

    #[tokio::test]
    async fn test_post_echoes_launch_payload() {
        // Arrange
        let store = Arc::new(ContentStore::new());

        // Act
        let Json(response) = set_content(
            State(Arc::clone(&store)),
            Json(ContentPayload::launch("weixin://")),
        )
        .await;

        // Assert
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({"success": true, "content": "weixin://", "launch_app": true})
        );
        assert_eq!(store.get().await, ContentPayload::launch("weixin://"));
    }

    #[tokio::test]
    async fn test_text_post_then_get_omits_launch_app() {
        let store = Arc::new(ContentStore::new());

        set_content(State(Arc::clone(&store)), Json(ContentPayload::launch("x://"))).await;
        set_content(State(Arc::clone(&store)), Json(ContentPayload::text("hello"))).await;
        let Json(response) = get_content(State(store)).await;

        assert_eq!(
            response,
            ContentResponse {
                success: true,
                content: "hello".into(),
                launch_app: None
            }
        );
    }

    #[tokio::test]
    async fn test_run_server_reports_bind_failure() {
        // Arrange: occupy a port first
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = RelayConfig {
            bind_addr: taken.local_addr().unwrap(),
        };

        // Act
        let result = run_server(config, Arc::new(ContentStore::new()), async {}).await;

        // Assert
        assert!(matches!(result, Err(RelayServerError::Bind { .. })));
    }
}
