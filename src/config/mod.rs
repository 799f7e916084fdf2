// ==========================================
// IWS BDE Plattform - runtime configuration
// ==========================================
// Settings come from the environment; the database location falls back to
// the per-user data directory so development runs never touch a production
// file by accident.
// ==========================================

use std::path::PathBuf;

/// Environment variable overriding the database path
pub const ENV_DB_PATH: &str = "IWS_BDE_DB_PATH";

/// Environment variable overriding the HTTP listen address
pub const ENV_LISTEN_ADDR: &str = "IWS_BDE_LISTEN_ADDR";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Application settings resolved at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file path
    pub db_path: String,
    /// HTTP bind address, e.g. "127.0.0.1:8000"
    pub listen_addr: String,
}

impl AppConfig {
    /// Resolve configuration from the environment
    pub fn from_env() -> Self {
        Self {
            db_path: default_db_path(),
            listen_addr: std::env::var(ENV_LISTEN_ADDR)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
        }
    }
}

/// Resolve the default database path
///
/// Priority:
/// 1. IWS_BDE_DB_PATH environment variable (debugging / tests / CI)
/// 2. user data directory (`<data_dir>/iws-bde/bde.db`)
/// 3. ./bde.db next to the working directory
pub fn default_db_path() -> String {
    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./bde.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("iws-bde");
        // best-effort: a failed create falls back to the relative path
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("bde.db");
        }
    }

    path.to_string_lossy().to_string()
}
