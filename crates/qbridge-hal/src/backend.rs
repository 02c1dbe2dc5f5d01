//! Simulator configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};
use crate::simulator::QuantumSimulator;

/// Configuration for a simulator instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Endpoint URL, for simulators that run out of process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Authentication token.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Additional configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: None,
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer from `extra`.
    ///
    /// Missing keys and `null` give `Ok(None)`; any other non-integer value
    /// is a configuration error.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        match self.extra.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => value.as_u64().map(Some).ok_or_else(|| {
                HalError::Configuration(format!(
                    "'{key}' must be a non-negative integer, got {value}"
                ))
            }),
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> HalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for creating simulators from configuration.
pub trait BackendFactory: QuantumSimulator + Sized {
    /// Create a simulator from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config() {
        let config = BackendConfig::new("test")
            .with_endpoint("https://api.example.com")
            .with_token("secret-token")
            .with_extra("max_qubits", serde_json::json!(12));

        assert_eq!(config.name, "test");
        assert_eq!(config.endpoint, Some("https://api.example.com".to_string()));
        assert_eq!(config.token, Some("secret-token".to_string()));
        assert_eq!(config.extra_u64("max_qubits").unwrap(), Some(12));
        assert_eq!(config.extra_u64("seed").unwrap(), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = BackendConfig::new("test").with_token("secret-token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_extra_u64_rejects_wrong_type() {
        let config = BackendConfig::new("test").with_extra("seed", serde_json::json!("abc"));
        assert!(matches!(
            config.extra_u64("seed"),
            Err(HalError::Configuration(_))
        ));
        let negative = BackendConfig::new("test").with_extra("seed", serde_json::json!(-1));
        assert!(negative.extra_u64("seed").is_err());
    }

    #[test]
    fn test_from_json_flattens_extra() {
        let config =
            BackendConfig::from_json(r#"{"name": "sv", "max_qubits": 8, "seed": 7}"#).unwrap();
        assert_eq!(config.name, "sv");
        assert_eq!(config.extra_u64("max_qubits").unwrap(), Some(8));
        assert_eq!(config.extra_u64("seed").unwrap(), Some(7));

        let serialized = serde_json::to_string(&config.clone().with_token("t")).unwrap();
        assert!(!serialized.contains("\"token\""));
        assert!(BackendConfig::from_json("{not json").is_err());
    }
}
