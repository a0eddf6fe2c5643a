//! A fake PiKVM bridge, a self-signed HTTPS bridge and a real relay, all on
//! `127.0.0.1:0`.

#![allow(dead_code)]

use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use image::{ImageFormat, Rgb, RgbImage};
use phone_kvm_agent::infrastructure::storage::BridgeConfig;
use phone_kvm_core::PacingConfig;
use phone_kvm_relay::application::ContentStore;
use rcgen::{Certificate, CertificateParams, SanType};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::{
    rustls::{
        pki_types::{CertificateDer, PrivateKeyDer},
        ServerConfig,
    },
    TlsAcceptor,
};

/// One request as the bridge saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path_and_query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Clone)]
struct BridgeState {
    seen: Arc<Mutex<Vec<Seen>>>,
    snapshot: Option<Arc<Vec<u8>>>,
}

/// Answers every path with `200 {"ok": true}` except:
///
/// - `/streamer/snapshot`: the configured frame, or 503 without one
/// - `/fail...`: 500
/// - `/slow`: 200 after five seconds
pub struct FakeBridge {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl FakeBridge {
    pub async fn start(snapshot: Option<Vec<u8>>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = BridgeState {
            seen: Arc::clone(&seen),
            snapshot: snapshot.map(Arc::new),
        };
        let app = Router::new().fallback(record).with_state(state);
        let addr = spawn(app).await;
        Self {
            base_url: format!("http://{addr}"),
            seen,
        }
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.seen().into_iter().map(|s| s.path_and_query).collect()
    }

    pub fn config(&self) -> BridgeConfig {
        BridgeConfig {
            base_url: self.base_url.clone(),
            username: "admin".into(),
            password: "secret".into(),
            verify_tls: false,
            timeout_secs: 5.0,
        }
    }
}

async fn record(
    State(state): State<BridgeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    state.seen.lock().unwrap().push(Seen {
        method: method.to_string(),
        path_and_query: uri
            .path_and_query()
            .map(|p| p.as_str().to_string())
            .unwrap_or_default(),
        authorization: header_str(header::AUTHORIZATION),
        content_type: header_str(header::CONTENT_TYPE),
        body: body.to_vec(),
    });

    match uri.path() {
        "/streamer/snapshot" => match state.snapshot {
            Some(frame) => frame.as_ref().clone().into_response(),
            None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        },
        "/slow" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK.into_response()
        }
        path if path.starts_with("/fail") => {
            (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
        }
        _ => Json(json!({"ok": true, "result": {}})).into_response(),
    }
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// HTTPS bridge with a freshly generated self-signed certificate.  Every
/// request gets `200 {"ok": true}`; connections whose handshake fails are
/// dropped.
pub struct TlsBridge {
    pub base_url: String,
}

impl TlsBridge {
    pub async fn start() -> Self {
        let acceptor = TlsAcceptor::from(self_signed_server_config());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let acceptor = acceptor.clone();
                tokio::spawn(async move {
                    let Ok(mut tls) = acceptor.accept(stream).await else {
                        return;
                    };
                    let mut request = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                        match tls.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => request.extend_from_slice(&buf[..n]),
                        }
                    }
                    let body = r#"{"ok":true}"#;
                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = tls.write_all(response.as_bytes()).await;
                    let _ = tls.shutdown().await;
                });
            }
        });
        Self {
            base_url: format!("https://{addr}"),
        }
    }

    pub fn config(&self, verify_tls: bool) -> BridgeConfig {
        BridgeConfig {
            base_url: self.base_url.clone(),
            username: "admin".into(),
            password: "secret".into(),
            verify_tls,
            timeout_secs: 5.0,
        }
    }
}

fn self_signed_server_config() -> Arc<ServerConfig> {
    let mut params = CertificateParams::new(vec!["pikvm.local".to_string()]);
    params.subject_alt_names = vec![
        SanType::DnsName("pikvm.local".to_string()),
        SanType::IpAddress("127.0.0.1".parse().unwrap()),
    ];
    let cert = Certificate::from_params(params).unwrap();
    let der = cert.serialize_der().unwrap();
    let key = cert.serialize_private_key_der();
    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(
            vec![CertificateDer::from(der)],
            PrivateKeyDer::Pkcs8(key.into()),
        )
        .unwrap();
    Arc::new(config)
}

/// Starts the real relay server; returns its base URL.
pub async fn start_relay() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        phone_kvm_relay::infrastructure::serve(
            listener,
            Arc::new(ContentStore::new()),
            std::future::pending(),
        )
        .await
        .unwrap();
    });
    format!("http://{addr}")
}

/// Millisecond-scale pacing so real-clock tests stay quick.
pub fn fast_pacing() -> PacingConfig {
    PacingConfig {
        settle_ms: 5,
        double_tap_gap_ms: 5,
        swipe_edge_ms: 5,
        after_gesture_ms: 5,
        launch_copy_gap_ms: 5,
        launch_paste_wait_ms: 5,
        text_step_ms: 5,
        ..PacingConfig::default()
    }
}

/// A landscape capture with a portrait "phone" in the middle.
pub fn letterboxed_jpeg() -> Vec<u8> {
    let img = RgbImage::from_fn(64, 32, |x, _| {
        if (24..40).contains(&x) {
            Rgb([180, 180, 180])
        } else {
            Rgb([0, 0, 0])
        }
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg).unwrap();
    out.into_inner()
}

pub fn black_jpeg() -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::new(64, 32)
        .write_to(&mut out, ImageFormat::Jpeg)
        .unwrap();
    out.into_inner()
}
