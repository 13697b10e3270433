use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use shared_kernel::configuration::config;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Deserialize)]
struct Settings {
    database: DatabaseSettings,
}

pub type DbName = String;

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
    username: String,
    password: Secret<String>,
    database_name: DbName,
    require_ssl: bool,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl DatabaseSettings {
    pub fn parse() -> anyhow::Result<Self> {
        Ok(config::<Settings>()?.database)
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn without_db(&self) -> (PgConnectOptions, DbName) {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        (
            PgConnectOptions::new()
                .host(&self.host)
                .username(&self.username)
                .password(self.password.expose_secret())
                .port(self.port)
                .ssl_mode(ssl_mode),
            self.database_name.clone(),
        )
    }

    pub fn with_db(&self) -> PgConnectOptions {
        let (options, database_name) = self.without_db();
        options.database(&database_name)
    }
}
