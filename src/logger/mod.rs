//! Logger module
//!
//! Provides logging utilities for the file server including:
//! - Server lifecycle logging
//! - One line per handled request (method and resolved file)
//! - Access logging with multiple formats
//! - Error and warning logging, optionally to files

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use chrono::Local;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Write to info log
fn write_info(message: &str) {
    let line = format!("{} {message}", timestamp());
    match writer::get() {
        Some(w) => w.write_info(&line),
        None => println!("{line}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    let line = format!("{} {message}", timestamp());
    match writer::get() {
        Some(w) => w.write_error(&line),
        None => eprintln!("{line}"),
    }
}

/// Write to access log specifically, the entry carries its own time
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(root: &Path, port: u16, config: &Config) {
    write_info(&format!(
        "[INFO] Serving {} at http://localhost:{port}/",
        root.display()
    ));
    write_info(&format!(
        "[CONFIG] Concurrency: {} (worker threads, backlog, in-flight requests)",
        config.server.concurrency
    ));
    if config.base_path() != "/" {
        write_info(&format!("[CONFIG] Base path: {}", config.base_path()));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("[CONFIG] Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("[CONFIG] Error log: {path}"));
    }
}

/// One line per handled GET or PUT
pub fn log_request(method: &str, file: &Path) {
    write_info(&format!("[INFO] {method} {}", file.display()));
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown() {
    write_info("[INFO] Shutdown requested, no longer accepting connections");
}
