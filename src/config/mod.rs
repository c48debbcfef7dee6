// Configuration module entry point
// Layers defaults, an optional config file, environment and CLI arguments

mod cli;
mod state;
mod types;

use std::net::SocketAddr;

use crate::error::StartupError;

// Re-export public types
pub use cli::CliArgs;
pub use state::AppState;
pub use types::{Config, LoggingConfig, ServerConfig, StorageConfig};

/// Environment variable naming the config file (without extension)
pub const CONFIG_PATH_ENV: &str = "FILESERVER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "fileserver";

/// Upper bound for `concurrency`, which also sets the worker thread count
pub const MAX_CONCURRENCY: usize = 4096;

impl Config {
    /// Load configuration, using `FILESERVER_CONFIG` or "fileserver.toml" as the file
    pub fn load(args: &CliArgs) -> Result<Self, StartupError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::load_from(&path, args)
    }

    /// Load configuration from specified file path (without extension).
    ///
    /// The file is optional. Command line arguments always win.
    pub fn load_from(config_path: &str, args: &CliArgs) -> Result<Self, StartupError> {
        let concurrency =
            i64::try_from(args.concurrency).map_err(|e| StartupError::InvalidArgument {
                name: "concurrency",
                value: args.concurrency.to_string(),
                reason: e.to_string(),
            })?;

        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.base_path", "/")?
            .set_default("server.keep_alive", true)?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("FILESERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override("server.port", i64::from(args.port))?
            .set_override("server.concurrency", concurrency)?
            .set_override("storage.root", args.root.to_string_lossy().into_owned())?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build a configuration from explicit values with every other setting defaulted
    pub fn with_defaults(args: &CliArgs) -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: args.port,
                concurrency: args.concurrency,
                base_path: "/".to_string(),
                keep_alive: true,
            },
            storage: StorageConfig {
                root: args.root.clone(),
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), StartupError> {
        if self.server.port == 0 {
            return Err(StartupError::InvalidArgument {
                name: "port",
                value: "0".to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.server.concurrency == 0 {
            return Err(StartupError::InvalidArgument {
                name: "concurrency",
                value: "0".to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.server.concurrency > MAX_CONCURRENCY {
            return Err(StartupError::InvalidArgument {
                name: "concurrency",
                value: self.server.concurrency.to_string(),
                reason: format!("must not exceed {MAX_CONCURRENCY}"),
            });
        }
        if !self.server.base_path.starts_with('/') {
            return Err(StartupError::InvalidArgument {
                name: "base_path",
                value: self.server.base_path.clone(),
                reason: "must start with '/'".to_string(),
            });
        }
        Ok(())
    }

    /// Base context without a trailing slash, "/" for the root context
    pub fn base_path(&self) -> String {
        let trimmed = self.server.base_path.trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, StartupError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| StartupError::InvalidArgument {
                name: "host",
                value: self.server.host.clone(),
                reason: e.to_string(),
            })
    }
}
