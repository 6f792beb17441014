use std::path::PathBuf;

use friendtrip_core::uploads::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`, uploads can be large).
    pub request_timeout_secs: u64,
    /// Raw `DATABASE_URL`, if set. See [`ServerConfig::database_url`].
    pub database_url: Option<String>,
    /// Directory holding the SQLite fallback database (default: `instance`).
    pub data_dir: PathBuf,
    /// Directory photo files are written to (default: `static/uploads`).
    pub upload_dir: PathBuf,
    /// Maximum request body size for uploads, in bytes (default: 100 MiB).
    pub max_upload_bytes: usize,
    /// Re-encode uploads to cap their width and JPEG quality (default: `false`).
    pub compress_uploads: bool,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                      |
    /// | `DATABASE_URL`         | unset (SQLite fallback)    |
    /// | `DATA_DIR`             | `instance`                 |
    /// | `UPLOAD_DIR`           | `static/uploads`           |
    /// | `MAX_UPLOAD_BYTES`     | `104857600`                |
    /// | `COMPRESS_UPLOADS`     | `false`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let database_url = std::env::var("DATABASE_URL").ok();

        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "instance".into()));

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "static/uploads".into()));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let compress_uploads = std::env::var("COMPRESS_UPLOADS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            data_dir,
            upload_dir,
            max_upload_bytes,
            compress_uploads,
            jwt,
        }
    }

    /// The connection URL to use, after the `postgres://` rewrite or the
    /// SQLite fallback inside [`ServerConfig::data_dir`].
    pub fn database_url(&self) -> String {
        friendtrip_db::resolve_database_url(self.database_url.as_deref(), &self.data_dir)
    }
}

/// Interpret `1`, `true`, `yes` and `on` (any case) as enabled.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
