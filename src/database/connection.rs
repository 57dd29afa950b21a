//! Connection to the seed store
//!
//! Opens the SQLite pool and makes sure the schema exists.

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::database::DatabaseConfig;
use crate::database::schema;

pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🗄️  Connecting to {}", mask_database_url(&config.url));

        if let Some(dir) = database_dir(&config.url) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("could not create database directory {}", dir.display()))?;
        }

        let pool = config
            .create_pool()
            .await
            .with_context(|| format!("could not open database {}", mask_database_url(&config.url)))?;

        schema::create_schema(&pool)
            .await
            .context("could not create the fleet schema")?;

        Ok(Self { pool })
    }

    pub async fn new_default() -> Result<Self> {
        Self::new(&DatabaseConfig::from_env()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Parent directory of a file-backed SQLite URL
fn database_dir(url: &str) -> Option<&Path> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

/// Hides credentials if the URL carries any
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        let protocol = &url[..url.find("://").map(|p| p + 3).unwrap_or(0)];
        let host = &url[at_pos + 1..];
        format!("{}***:***@{}", protocol, host)
    } else {
        url.to_string()
    }
}
