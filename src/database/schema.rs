//! Schema of the seed store

use sqlx::SqlitePool;

pub const CREATE_STATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS stations (
    station_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    lat REAL NOT NULL,
    lon REAL NOT NULL,
    max_capacity INTEGER NOT NULL CHECK (max_capacity > 0)
)
"#;

pub const CREATE_VEHICLES: &str = r#"
CREATE TABLE IF NOT EXISTS vehicles (
    vehicle_id TEXT PRIMARY KEY,
    station_id INTEGER,
    vehicle_type TEXT NOT NULL,
    status TEXT NOT NULL,
    rides_since_last_treated INTEGER NOT NULL DEFAULT 0,
    last_treated_date TEXT,
    battery_level INTEGER,
    FOREIGN KEY (station_id) REFERENCES stations (station_id)
)
"#;

pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in [CREATE_STATIONS, CREATE_VEHICLES] {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
