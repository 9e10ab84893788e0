use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Runtime settings, loaded from the environment (with `.env` support).
///
/// Every field can be overridden with an `AUDIOSHELF_`-prefixed variable,
/// e.g. `AUDIOSHELF_BASE_URL`, `AUDIOSHELF_PER_PAGE`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the catalog API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Page size for listing endpoints. The server clamps this to 1..=50.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Per-request timeout in seconds; retries stay server-side.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many random picks the featured section asks for.
    #[serde(default = "default_featured")]
    pub featured: u32,
    /// Credentials for commands that need a session. The session cookie lives
    /// only for the duration of one process, so authenticated commands log in
    /// up front using these.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}

fn default_per_page() -> u32 {
    12
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_featured() -> u32 {
    5
}

impl Settings {
    /// Load settings from `.env` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Config::builder()
            .add_source(Environment::with_prefix("AUDIOSHELF"))
            .build()?
            .try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
            featured: default_featured(),
            email: None,
            password: None,
        }
    }
}
