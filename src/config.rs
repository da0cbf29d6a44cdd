use crate::error::ClientError;
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.clever.com/v3.0";
pub const DEFAULT_OUTPUT_DIR: &str = "output_data";

/// Runtime configuration for the Clever API client.
/// Values are sourced from environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub api_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub output_dir: String,
}

impl Config {
    /// Load configuration from environment.
    ///
    /// Env vars:
    /// - CLEVER_API_TOKEN [required]
    /// - CLEVER_API_URL (default: https://api.clever.com/v3.0)
    /// - CLEVER_HTTP_TIMEOUT_SECS (default: 30)
    /// - CLEVER_USER_AGENT (default: clever-api/<version>)
    /// - CLEVER_OUTPUT_DIR (default: output_data)
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("CLEVER_API_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ClientError::MissingToken)?;

        let api_url = lookup("CLEVER_API_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim_end_matches('/').to_string();
        url::Url::parse(&api_url).map_err(|source| ClientError::InvalidBaseUrl {
            url: api_url.clone(),
            source,
        })?;

        let timeout_secs = lookup("CLEVER_HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);
        let user_agent = lookup("CLEVER_USER_AGENT")
            .unwrap_or_else(|| format!("clever-api/{}", env!("CARGO_PKG_VERSION")));
        let output_dir =
            lookup("CLEVER_OUTPUT_DIR").unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        Ok(Self {
            token,
            api_url,
            user_agent,
            timeout_secs,
            output_dir,
        })
    }

    /// Defaults with only the token filled in.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("clever-api/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_only_token_set() {
        let cfg = Config::from_lookup(lookup_from(&[("CLEVER_API_TOKEN", "t")])).unwrap();
        assert_eq!(cfg.token, "t");
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.output_dir, "output_data");
        assert!(cfg.user_agent.starts_with("clever-api/"));
    }

    #[test]
    fn missing_or_blank_token_is_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[])),
            Err(ClientError::MissingToken)
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("CLEVER_API_TOKEN", "  ")])),
            Err(ClientError::MissingToken)
        ));
    }

    #[test]
    fn api_url_trailing_slash_trimmed_and_validated() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("CLEVER_API_TOKEN", "t"),
            ("CLEVER_API_URL", "http://localhost:8080/v3.0/"),
            ("CLEVER_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_url, "http://localhost:8080/v3.0");
        assert_eq!(cfg.timeout_secs, 5);

        let bad = Config::from_lookup(lookup_from(&[
            ("CLEVER_API_TOKEN", "t"),
            ("CLEVER_API_URL", "not a url"),
        ]));
        assert!(matches!(bad, Err(ClientError::InvalidBaseUrl { .. })));
    }
}
