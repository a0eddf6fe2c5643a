//! `HttpsClient`: the production [`HidTransport`] for PiKVM-style bridges.
//!
//! Wraps one `reqwest::Client` (and therefore one connection pool) per bridge.
//! Every request carries HTTP Basic credentials; there is no session cookie
//! or token negotiation.
//!
//! # Self-signed certificates
//!
//! KVM appliances ship with self-signed certificates, so `verify_tls` defaults
//! to `false` in the configuration.  That disables both certificate-chain and
//! hostname validation, the equivalent of `curl -k`.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tracing::{debug, error};

use crate::application::transport::{
    HidTransport, HttpsResponse, RequestBody, RequestOptions, TransportError,
};
use crate::infrastructure::storage::config::BridgeConfig;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Authenticated HTTPS client for one bridge.
#[derive(Debug, Clone)]
pub struct HttpsClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderValue,
    timeout: Duration,
}

impl HttpsClient {
    /// Builds the client.  No request is made.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Client`] if the timeout is not a finite,
    /// non-negative number of seconds or the TLS backend fails to initialise.
    pub fn new(config: &BridgeConfig) -> Result<Self, TransportError> {
        let timeout = Duration::try_from_secs_f64(config.timeout_secs).map_err(|e| {
            TransportError::Client(format!("invalid timeout {}s: {e}", config.timeout_secs))
        })?;

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        let mut auth_header =
            HeaderValue::from_str(&basic_auth_header(&config.username, &config.password))
                .map_err(|_| TransportError::InvalidHeader(AUTHORIZATION.as_str().to_string()))?;
        auth_header.set_sensitive(true);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header,
            timeout,
        })
    }

    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpsResponse, TransportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| TransportError::InvalidHeader(name.as_str().to_string()))?;
            headers.insert(name, value);
        }
        // Credentials always win over a caller-supplied Authorization header.
        headers.insert(AUTHORIZATION, self.auth_header.clone());

        let body = match options.body {
            Some(RequestBody::Json(value)) => {
                if !headers.contains_key(CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                }
                Some(serde_json::to_vec(&value)?)
            }
            Some(RequestBody::Raw(bytes)) => Some(bytes),
            None if [Method::POST, Method::PUT, Method::PATCH].contains(&method) => {
                Some(Vec::new())
            }
            None => None,
        };

        let mut request = self
            .client
            .request(method.clone(), url)
            .headers(headers)
            .timeout(options.timeout.unwrap_or(self.timeout));
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify(&method, url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| classify(&method, url, e))?;

        Ok(HttpsResponse {
            url: url.to_string(),
            status: status.as_u16(),
            headers,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl HidTransport for HttpsClient {
    async fn request(
        &self,
        endpoint: &str,
        method: &str,
        options: RequestOptions,
    ) -> Result<HttpsResponse, TransportError> {
        let url = join_url(&self.base_url, endpoint);
        let result = match parse_method(method) {
            Ok(method) => {
                debug!(%method, %url, "bridge request");
                self.send(method, &url, options).await
            }
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            error!(method = method.trim(), %url, error = %e, "HTTPS request failed");
        }
        result
    }
}

/// Joins `base_url` and `endpoint` with exactly one `/`.
///
/// An empty endpoint yields the base URL itself.
pub fn join_url(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if endpoint.is_empty() {
        return base.to_string();
    }
    format!("{base}/{}", endpoint.trim_start_matches('/'))
}

/// `Basic base64(username:password)`.
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Upper-cases a method name; empty means `GET`.
fn parse_method(raw: &str) -> Result<Method, TransportError> {
    let normalized = raw.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(normalized.as_bytes())
        .map_err(|_| TransportError::InvalidMethod(raw.to_string()))
}

fn classify(method: &Method, url: &str, e: reqwest::Error) -> TransportError {
    let method = method.to_string();
    let url = url.to_string();
    if e.is_timeout() {
        TransportError::Timeout { method, url }
    } else if e.is_connect() {
        TransportError::Connect {
            method,
            url,
            message: e.to_string(),
        }
    } else {
        TransportError::Request {
            method,
            url,
            message: e.to_string(),
        }
    }
}
