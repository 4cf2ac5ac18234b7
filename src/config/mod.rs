// Configuration module entry point
// Loads the immutable server configuration and builds the shared state

mod state;
mod types;

use hyper::header::HeaderValue;
use std::net::{IpAddr, SocketAddr};

// Re-export public types
pub use state::AppState;
pub use types::{AuthConfig, Config};

/// Default config file, looked up without extension
pub const DEFAULT_CONFIG_PATH: &str = "davdrop";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources are layered: built-in defaults, then the optional file, then
    /// `DAVDROP_` environment variables (`DAVDROP_SERVER__PORT=9100`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 9000)?
            .set_default("storage.root", "webdav_uploads")?
            .set_default("auth.username", "wedding")?
            .set_default("auth.password", "photo123")?
            .set_default("auth.realm", "WebDAV")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "simple")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 0)?
            .set_default("http.server_name", "davdrop/0.1")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 1_073_741_824)? // 1GB
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DAVDROP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would only fail later, per request
    fn validate(&self) -> Result<(), config::ConfigError> {
        let challenge = format!("Basic realm=\"{}\"", self.auth.realm);
        if HeaderValue::from_str(&challenge).is_err() {
            return Err(config::ConfigError::Message(format!(
                "auth.realm {:?} is not a valid header value",
                self.auth.realm
            )));
        }
        Ok(())
    }

    /// Listen address; `host` must be an IPv4 or IPv6 literal
    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|e| format!("Invalid address {}: {e}", self.server.host))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
