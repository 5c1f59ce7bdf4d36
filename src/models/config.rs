use serde::Deserialize;

/// Configuration options for the news server.
///
/// Loaded from `config/default.yaml`, an optional `config/local.yaml` and
/// `APP_`-prefixed environment variables, in that order.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_url: String,
    /// Glob passed to Tera when loading templates.
    pub templates_dir: String,
    /// Directory served under `/assets`.
    pub assets_dir: String,
    /// Key used to sign flash message cookies.
    #[serde(default)]
    pub secret_key: String,
}
