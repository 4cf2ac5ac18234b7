//! Logger module
//!
//! Provides logging utilities for the WebDAV server including:
//! - Startup banner and shutdown notice
//! - Access logging with multiple formats
//! - Upload, error and warning lines

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{AppState, Config};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Startup banner, including the credentials in cleartext
pub fn log_server_start(addr: &SocketAddr, state: &AppState) {
    let cfg = &state.config;
    write_info(&format!("WebDAV Server starting on port {}", addr.port()));
    write_info(&format!("Upload directory: {}", cfg.storage.root));
    write_info(&format!("Username: {}", state.credentials.username()));
    write_info(&format!("Password: {}", state.credentials.password()));
    write_info(&format!("WebDAV URL: http://localhost:{}/", addr.port()));
    if let Some(workers) = cfg.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = cfg.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = cfg.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("Press Ctrl+C to stop the server");
}

pub fn log_shutdown() {
    write_info("\nShutting down server...");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_upload(location: &str, bytes: usize) {
    write_info(&upload_line(location, bytes));
}

fn upload_line(location: &str, bytes: usize) -> String {
    format!("Uploaded: {location} ({bytes} bytes)")
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
