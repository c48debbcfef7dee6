//! Error types shared across the server

use hyper::StatusCode;
use thiserror::Error;

/// Reasons a request path cannot be mapped onto a file under the root
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("relative paths are unsupported: {0}")]
    Traversal(String),

    #[error("resolved path escapes the root directory: {0}")]
    Escape(String),

    #[error("request path is not valid UTF-8 after decoding: {0}")]
    InvalidEncoding(String),

    #[error("request path {path} is outside context {base}")]
    OutsideContext { path: String, base: String },

    #[error("failed to resolve {path}: {reason}")]
    Unresolvable { path: String, reason: String },
}

impl ResolveError {
    /// Status code sent back to the client for this failure
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Traversal(_) | Self::Escape(_) | Self::InvalidEncoding(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::OutsideContext { .. } => StatusCode::NOT_FOUND,
            Self::Unresolvable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failures that stop the server before it begins serving
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("usage: fileserver port directory concurrency")]
    Usage,

    #[error("invalid {name} '{value}': {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
