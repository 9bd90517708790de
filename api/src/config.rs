//! API configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,

    /// Interface to bind to.
    pub host: String,

    /// Enable Cross-Origin Resource Sharing (CORS).
    pub enable_cors: bool,

    /// Allowed origins for CORS requests. `["*"]` allows all origins.
    pub cors_origins: Vec<String>,

    /// Upper bound on request bodies, uploads included. This is the
    /// documented delegated size limit for image intake; the pipeline
    /// itself accepts any size and type.
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}
