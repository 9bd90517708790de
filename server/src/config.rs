//! Configuration system for the LabSafe server.
//!
//! Priority: CLI arguments > environment variables > TOML config file >
//! defaults. The inference API key is the exception: it is read only from
//! the environment (or `--api-key`), never from the config file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use labsafe_api::ApiConfig;
use serde::{Deserialize, Serialize};

/// Command-line arguments for the LabSafe server.
#[derive(Parser, Debug, Clone)]
#[command(name = "labsafe-server")]
#[command(about = "LabSafe Server - PPE compliance verification over HTTP")]
#[command(version)]
pub struct CliArgs {
    /// HTTP port for the API server
    #[arg(long, short = 'p', default_value = "5000", env = "LABSAFE_PORT")]
    pub port: u16,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0", env = "LABSAFE_HOST")]
    pub host: String,

    /// Configuration file path
    #[arg(long, short = 'c', default_value = "labsafe.toml", env = "LABSAFE_CONFIG")]
    pub config: PathBuf,

    /// Upload area for incoming images
    #[arg(long, default_value = "uploads", env = "LABSAFE_UPLOAD_DIR")]
    pub upload_dir: PathBuf,

    /// Vision model used for inspections
    #[arg(long, default_value = "gemini-2.5-flash", env = "LABSAFE_MODEL")]
    pub model: String,

    /// Inference API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Bound on one inference round trip, in seconds
    #[arg(long, default_value = "30", env = "LABSAFE_INFERENCE_TIMEOUT")]
    pub inference_timeout_secs: u64,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,
}

/// Full server configuration (merged from all sources).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API settings
    pub http: HttpConfig,

    /// Upload area settings
    pub uploads: UploadConfig,

    /// Inference settings
    pub inference: InferenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub model: String,
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from CLI args and optional config file.
    pub fn load(args: &CliArgs) -> Result<Self> {
        // Start with defaults, replaced wholesale by the file if present.
        let mut config = if args.config.exists() {
            Self::from_file(&args.config)
                .with_context(|| format!("Failed to load config from {:?}", args.config))?
        } else {
            Self::default()
        };

        // Override with CLI args (highest priority)
        config.http.port = args.port;
        config.http.host = args.host.clone();
        config.uploads.dir = args.upload_dir.clone();
        config.inference.model = args.model.clone();
        config.inference.timeout_secs = args.inference_timeout_secs;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    fn from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;

        let config: ServerConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path:?}"))?;

        Ok(config)
    }

    /// The API-layer view of this configuration.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            port: self.http.port,
            host: self.http.host.clone(),
            enable_cors: true,
            cors_origins: self.http.cors_origins.clone(),
            max_body_size: self.http.max_body_size,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                port: 5000,
                host: "0.0.0.0".to_string(),
                cors_origins: vec!["*".to_string()],
                max_body_size: 10 * 1024 * 1024, // 10MB
            },
            uploads: UploadConfig {
                dir: PathBuf::from("uploads"),
            },
            inference: InferenceConfig {
                model: "gemini-2.5-flash".to_string(),
                timeout_secs: 30,
            },
        }
    }
}
