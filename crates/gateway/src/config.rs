use std::env;

use common::env_or;
pub use common::Environment;

/// Default upload limit, comfortably above a full-resolution radiograph.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub environment: Environment,
    pub addr: String,
    pub body_limit_bytes: usize,
    pub otel_endpoint: Option<String>,
}

impl GatewayConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            addr: env_or("GATEWAY_ADDR", "0.0.0.0:5000".to_string()),
            body_limit_bytes: env_or("GATEWAY_BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES),
            otel_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .ok()
                .filter(|endpoint| !endpoint.trim().is_empty()),
        }
    }

    /// Create default configuration for testing
    pub fn test_default() -> Self {
        Self {
            environment: Environment::Development,
            addr: "127.0.0.1:0".to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            otel_endpoint: None,
        }
    }
}
