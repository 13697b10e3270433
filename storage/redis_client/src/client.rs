use anyhow::Context;
use async_once::AsyncOnce;
use lazy_static::lazy_static;
use redis::aio::MultiplexedConnection;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use shared_kernel::configuration::config;

#[derive(Deserialize)]
struct Settings {
    redis: RedisConfig,
}

#[derive(Deserialize)]
struct RedisConfig {
    /// Connection url, may carry credentials.
    host: Secret<String>,
}

lazy_static! {
    pub static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
        Client::new()
            .await
            .expect("Expected redis client to be initialized")
    });
}

#[derive(Clone)]
pub struct Client {
    pub(crate) conn: MultiplexedConnection,
}

impl Client {
    pub async fn new() -> anyhow::Result<Self> {
        let settings = config::<Settings>()?.redis;
        Self::connect(settings.host.expose_secret()).await
    }

    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let conn = redis::Client::open(url)
            .context("Invalid redis url")?
            .get_multiplexed_tokio_connection()
            .await
            .context("Failed to connect to redis")?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> MultiplexedConnection {
        self.conn.clone()
    }
}
