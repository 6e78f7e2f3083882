use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use std::time::Duration;

use super::app::Environment;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    /// `DATABASE_URL` wins. Otherwise the URL is assembled from `DB_*`
    /// (production) or `DEV_DB_*` (development) variables.
    pub fn from_env(environment: Environment) -> Result<Self> {
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => url_from_parts(environment)?,
        };

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .unwrap_or(1);

        let connect_timeout_secs = env::var("DB_CONNECT_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT")
            .unwrap_or_else(|_| "600".to_string())
            .parse()
            .unwrap_or(600);

        Ok(DatabaseConfig {
            database_url,
            max_connections,
            min_connections,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            idle_timeout: Duration::from_secs(idle_timeout_secs),
        })
    }

    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.connect_timeout)
            .idle_timeout(Some(self.idle_timeout))
            .test_before_acquire(true)
    }

    pub async fn create_pool(&self) -> Result<PgPool> {
        let pool = self
            .pool_options()
            .connect(&self.database_url)
            .await
            .context("Failed to connect to the database")?;

        Ok(pool)
    }

    /// Pool that opens connections on first use.
    pub fn create_lazy_pool(&self) -> Result<PgPool> {
        let pool = self
            .pool_options()
            .min_connections(0)
            .connect_lazy(&self.database_url)
            .context("Invalid database URL")?;

        Ok(pool)
    }
}

fn url_from_parts(environment: Environment) -> Result<String> {
    let prefix = match environment {
        Environment::Development => "DEV_",
        Environment::Production => "",
    };
    let var = |name: &str| {
        let key = format!("{}{}", prefix, name);
        env::var(&key).with_context(|| format!("{} is not set", key))
    };

    Ok(compose_database_url(
        &var("DB_USER")?,
        &var("DB_PASS")?,
        &var("DB_HOST")?,
        &var("DB_PORT").unwrap_or_else(|_| "5432".to_string()),
        &var("DB_NAME")?,
    ))
}

pub fn compose_database_url(user: &str, password: &str, host: &str, port: &str, name: &str) -> String {
    format!("postgresql://{}:{}@{}:{}/{}", user, password, host, port, name)
}

/// Creates every table the application needs.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(())
}
