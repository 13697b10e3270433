use secrecy::Secret;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use shared_kernel::configuration::config;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    pub storage: StorageSettings,
    pub catalog: CatalogSettings,
    pub rate_limit: RateLimitSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub cookie_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Redis,
    Memory,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize)]
pub struct CatalogSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateLimitSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub per_second: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub burst_size: u32,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Self> {
        config::<Settings>()
    }
}
