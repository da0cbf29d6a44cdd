use crate::config::Config;
use crate::error::{ClientError, TransportError};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;

/// What the gate hands to a transport: a fully resolved call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub bearer_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Sends one request and reports the raw outcome. Status interpretation and body
/// decoding are left to the caller; an `Err` means nothing usable came back.
pub trait Transport {
    fn send(&mut self, request: &TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Blocking transport over an async `reqwest` client driven by a private runtime.
pub struct ReqwestTransport {
    client: Client,
    runtime: tokio::runtime::Runtime,
}

impl ReqwestTransport {
    pub fn new(cfg: &Config) -> Result<Self, ClientError> {
        let client =
            build_client(cfg).map_err(|e| ClientError::TransportSetup(e.to_string()))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::TransportSetup(e.to_string()))?;
        Ok(Self { client, runtime })
    }
}

impl Transport for ReqwestTransport {
    fn send(&mut self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        let auth = auth_header(&request.bearer_token)
            .map_err(|e| TransportError::Send(e.to_string()))?;
        debug!("{} {} query={:?}", request.method, request.url, request.query);
        self.runtime.block_on(async {
            let res = self
                .client
                .request(request.method.clone(), &request.url)
                .header(AUTHORIZATION, auth)
                .header(ACCEPT, HeaderValue::from_static("application/json"))
                .query(&request.query)
                .send()
                .await?;
            let status = res.status();
            let body = res.text().await?;
            Ok::<_, TransportError>(TransportResponse { status, body })
        })
    }
}

pub fn build_client(cfg: &Config) -> Result<Client, ClientError> {
    let mut default_headers = HeaderMap::new();
    let ua = HeaderValue::from_str(&cfg.user_agent)
        .map_err(|e| ClientError::TransportSetup(format!("invalid user agent: {}", e)))?;
    default_headers.insert(USER_AGENT, ua);
    // Authorization header is injected per request from the client's token.
    Client::builder()
        .default_headers(default_headers)
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .use_rustls_tls()
        .build()
        .map_err(|e| ClientError::TransportSetup(e.to_string()))
}

pub fn auth_header(token: &str) -> Result<HeaderValue, ClientError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ClientError::InvalidArgument("token is not a valid header value".into()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Short label for a non-success status, used in logs and errors.
pub fn classify_status(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "bad_request",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "not_found",
        StatusCode::TOO_MANY_REQUESTS => "rate_limited",
        s if s.is_server_error() => "upstream_error",
        s if s.is_redirection() => "unexpected_redirect",
        _ => "client_error",
    }
}

pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// `base + path`, plus `/<id>` when an id is given and non-empty.
pub fn join_url(base: &str, path: &str, resource_id: Option<&str>) -> String {
    let mut url = format!("{}{}", base, path);
    if let Some(id) = resource_id.filter(|id| !id.is_empty()) {
        url.push('/');
        url.push_str(&encode_path_segment(id));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_appends_id_segment() {
        let base = "https://api.clever.com/v3.0";
        assert_eq!(
            join_url(base, "/users", Some("abc")),
            "https://api.clever.com/v3.0/users/abc"
        );
        assert_eq!(join_url(base, "/users", None), "https://api.clever.com/v3.0/users");
        assert_eq!(join_url(base, "/users", Some("")), "https://api.clever.com/v3.0/users");
    }

    #[test]
    fn path_segment_encoding() {
        assert_eq!(encode_path_segment("58da8a43cc70ab00017a1a87"), "58da8a43cc70ab00017a1a87");
        assert_eq!(encode_path_segment("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn status_labels() {
        assert_eq!(classify_status(StatusCode::UNAUTHORIZED), "unauthorized");
        assert_eq!(classify_status(StatusCode::NOT_FOUND), "not_found");
        assert_eq!(classify_status(StatusCode::TOO_MANY_REQUESTS), "rate_limited");
        assert_eq!(classify_status(StatusCode::BAD_GATEWAY), "upstream_error");
        assert_eq!(classify_status(StatusCode::IM_A_TEAPOT), "client_error");
    }

    #[test]
    fn auth_header_is_bearer_and_sensitive() {
        let h = auth_header("tok").unwrap();
        assert_eq!(h.to_str().unwrap(), "Bearer tok");
        assert!(h.is_sensitive());
        assert!(auth_header("bad\ntoken").is_err());
    }
}
