use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::StationId;
use crate::utils::errors::AppResult;

/// Vehicle as stored; `vehicle_type` and `status` are the raw text tags
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct VehicleRow {
    pub vehicle_id: String,
    pub station_id: Option<StationId>,
    pub vehicle_type: String,
    pub status: String,
    pub rides_since_last_treated: i64,
    pub last_treated_date: Option<String>,
    pub battery_level: Option<i64>,
}

const SELECT_VEHICLE: &str = r#"
    SELECT
        vehicle_id,
        station_id,
        vehicle_type,
        status,
        rides_since_last_treated,
        last_treated_date,
        battery_level
    FROM vehicles
"#;

#[derive(Clone)]
pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, row: &VehicleRow) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (
                vehicle_id, station_id, vehicle_type, status,
                rides_since_last_treated, last_treated_date, battery_level
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.vehicle_id)
        .bind(row.station_id)
        .bind(&row.vehicle_type)
        .bind(&row.status)
        .bind(row.rides_since_last_treated)
        .bind(&row.last_treated_date)
        .bind(row.battery_level)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_all(&self) -> AppResult<Vec<VehicleRow>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!("{} ORDER BY vehicle_id", SELECT_VEHICLE))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::database::DatabaseConfig;
    use crate::database::schema::create_schema;
    use crate::repositories::station_repository::{StationRepository, StationRow};

    async fn repositories() -> (StationRepository, VehicleRepository) {
        let pool = DatabaseConfig::in_memory().create_pool().await.unwrap();
        create_schema(&pool).await.unwrap();
        (StationRepository::new(pool.clone()), VehicleRepository::new(pool))
    }

    fn vehicle(vehicle_id: &str, station_id: StationId) -> VehicleRow {
        VehicleRow {
            vehicle_id: vehicle_id.to_string(),
            station_id: Some(station_id),
            vehicle_type: "bicycle".to_string(),
            status: "available".to_string(),
            rides_since_last_treated: 0,
            last_treated_date: None,
            battery_level: None,
        }
    }

    #[tokio::test]
    async fn test_list_all_orders_by_id() {
        let (stations, vehicles) = repositories().await;
        for station_id in [1, 2] {
            stations
                .insert(&StationRow {
                    station_id,
                    name: format!("S{}", station_id),
                    lat: 0.0,
                    lon: 0.0,
                    max_capacity: 5,
                })
                .await
                .unwrap();
        }
        vehicles.insert(&vehicle("V2", 1)).await.unwrap();
        vehicles.insert(&vehicle("V1", 1)).await.unwrap();
        vehicles.insert(&vehicle("V3", 2)).await.unwrap();

        let rows = vehicles.list_all().await.unwrap();
        let ids: Vec<_> = rows.iter().map(|v| v.vehicle_id.as_str()).collect();
        assert_eq!(ids, vec!["V1", "V2", "V3"]);
        assert_eq!(rows[2].station_id, Some(2));
    }

    #[tokio::test]
    async fn test_unknown_station_is_rejected() {
        let (_, vehicles) = repositories().await;
        assert!(vehicles.insert(&vehicle("V1", 42)).await.is_err());
    }
}
