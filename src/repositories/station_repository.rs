use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::StationId;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct StationRow {
    pub station_id: StationId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub max_capacity: i64,
}

#[derive(Clone)]
pub struct StationRepository {
    pool: SqlitePool,
}

impl StationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &StationRow) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO stations (station_id, name, lat, lon, max_capacity) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(row.station_id)
        .bind(&row.name)
        .bind(row.lat)
        .bind(row.lon)
        .bind(row.max_capacity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_all(&self) -> AppResult<Vec<StationRow>> {
        let rows = sqlx::query_as::<_, StationRow>(
            "SELECT station_id, name, lat, lon, max_capacity FROM stations ORDER BY station_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
