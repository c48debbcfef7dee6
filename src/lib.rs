//! Minimal HTTP file server.
//!
//! Exposes a directory over HTTP/1.1: `GET` streams a file out, `PUT`
//! streams a request body into a file. Every other method is answered with
//! `400 Bad Request`. At most `concurrency` requests are processed at once.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::{AppState, CliArgs, Config};
pub use error::{ResolveError, StartupError};
