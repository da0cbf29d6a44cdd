use crate::config::Config;
use crate::error::{ClientError, TransportError};
use crate::http::{self, ReqwestTransport, Transport, TransportRequest};
use crate::rate::{Clock, RateGate, RateWindow, SystemClock};
use crate::resources::{Resource, ResourceKind};
use crate::types::RequestSpec;
use log::{debug, error};
use serde_json::Value;

/// Blocking, rate-limited Clever API client. One request in flight at a time;
/// each instance tracks its own rate window.
pub struct CleverClient<T: Transport = ReqwestTransport, C: Clock = SystemClock> {
    base_url: String,
    token: String,
    transport: T,
    gate: RateGate<C>,
}

impl CleverClient {
    /// Client against the public API root using the given bearer token.
    pub fn new(token: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_config(&Config::with_token(token))
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ClientError> {
        if cfg.token.is_empty() {
            return Err(ClientError::MissingToken);
        }
        http::auth_header(&cfg.token)?;
        let transport = ReqwestTransport::new(cfg)?;
        Ok(Self::with_parts(
            cfg.api_url.clone(),
            cfg.token.clone(),
            transport,
            SystemClock,
        ))
    }
}

impl<T: Transport, C: Clock> CleverClient<T, C> {
    pub fn with_parts(
        base_url: impl Into<String>,
        token: impl Into<String>,
        transport: T,
        clock: C,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            transport,
            gate: RateGate::with_clock(clock),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn rate_window(&self) -> &RateWindow {
        self.gate.window()
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub fn resource(&mut self, kind: ResourceKind) -> Resource<'_, T, C> {
        Resource::new(self, kind)
    }

    /// Rate-limited call; transport failures are logged and come back as `None`.
    pub fn execute(&mut self, spec: &RequestSpec) -> Option<Value> {
        match self.try_execute(spec) {
            Ok(v) => Some(v),
            Err(e) => {
                error!("API request failed: {}", e);
                None
            }
        }
    }

    /// Rate-limited call that reports why it failed. No retries.
    pub fn try_execute(&mut self, spec: &RequestSpec) -> Result<Value, TransportError> {
        self.gate.acquire();

        let request = TransportRequest {
            method: spec.method.clone(),
            url: http::join_url(&self.base_url, &spec.path, spec.resource_id.as_deref()),
            query: spec.query_pairs(),
            bearer_token: self.token.clone(),
        };
        let response = self.transport.send(&request)?;

        if !response.status.is_success() {
            return Err(TransportError::Status {
                status: response.status,
                kind: http::classify_status(response.status),
                body: response.body,
            });
        }
        // Quota is consumed once the upstream accepts the call, even if the body is bad.
        self.gate.record_success();
        debug!(
            "{} {} -> {} (window count {})",
            request.method,
            request.url,
            response.status,
            self.gate.window().request_count
        );
        Ok(serde_json::from_str(&response.body)?)
    }
}
