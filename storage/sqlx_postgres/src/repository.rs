use crate::configuration::DatabaseSettings;
use anyhow::Context;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;

#[derive(Clone)]
pub struct Repository {
    pg_pool: Arc<PgPool>,
}

impl Repository {
    pub fn pool(&self) -> &PgPool {
        self.pg_pool.as_ref()
    }

    pub async fn new() -> anyhow::Result<Self> {
        let settings = DatabaseSettings::parse()?;
        let pg_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections())
            .connect_with(settings.with_db())
            .await
            .context("Failed to connect to DB")
            .map(Arc::new)?;

        Ok(Self { pg_pool })
    }

    /// Creates a throwaway database with every migration applied.
    #[cfg(any(test, feature = "testing"))]
    pub async fn new_test_repo() -> Self {
        use sqlx::{Connection, Executor, PgConnection};
        use uuid::Uuid;

        let settings = DatabaseSettings::parse().expect("database settings to be defined");
        let (connection_options, _) = settings.without_db();

        let mut connection = PgConnection::connect_with(&connection_options)
            .await
            .expect("Failed to connect to Postgres");

        let db_name = Uuid::new_v4();
        connection
            .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_name))
            .await
            .expect("Failed to create database.");

        let connection_pool = PgPool::connect_with(connection_options.database(&db_name.to_string()))
            .await
            .expect("Failed to connect to Postgres.");
        sqlx::migrate!()
            .run(&connection_pool)
            .await
            .expect("Failed to migrate the database");

        Self {
            pg_pool: Arc::new(connection_pool),
        }
    }
}
