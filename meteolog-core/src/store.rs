use anyhow::{Context, Result};
use tokio_postgres::{NoTls, Row};

use crate::{config::DbConfig, model::WeatherRecord};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS weather_data (\
     id serial PRIMARY KEY, \
     temperature REAL, \
     wind_direction varchar(20), \
     wind_speed REAL, \
     pressure REAL, \
     precipitation_type varchar(20), \
     precipitation_strength varchar(25))";

const INSERT: &str = "INSERT INTO weather_data (temperature, wind_direction, wind_speed, \
     pressure, precipitation_type, precipitation_strength) \
     VALUES ($1, $2, $3, $4, $5, $6)";

const LAST_N: &str = "SELECT temperature, wind_direction, wind_speed, pressure, \
     precipitation_type, precipitation_strength \
     FROM weather_data ORDER BY id DESC LIMIT $1";

/// Owns the single database connection used by the whole program.
///
/// Rows are append-only; there is no reconnect and no pool. A connection
/// failure is fatal to the caller.
pub struct WeatherStore {
    client: tokio_postgres::Client,
}

impl WeatherStore {
    /// Connect once; the connection driver runs on its own task.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(&config.connection_string(), NoTls)
            .await
            .context(
                "Failed to connect to the database. Check the DB_* env vars in the .env file",
            )?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("database connection error: {e}");
            }
        });

        log::debug!("connected to database {}", config.name);
        Ok(Self { client })
    }

    /// Idempotent; safe to call on every run.
    pub async fn ensure_table(&self) -> Result<()> {
        self.client
            .execute(CREATE_TABLE, &[])
            .await
            .context("Failed to create the weather_data table")?;
        Ok(())
    }

    /// Append one record, fields in fixed column order.
    pub async fn insert(&self, record: &WeatherRecord) -> Result<()> {
        // REAL columns, so the numeric fields cross the wire as f32.
        self.client
            .execute(
                INSERT,
                &[
                    &(record.temperature as f32),
                    &record.wind_direction,
                    &(record.wind_speed as f32),
                    &(record.pressure as f32),
                    &record.precipitation_type,
                    &record.precipitation_strength,
                ],
            )
            .await
            .context("Failed to insert a weather record")?;
        Ok(())
    }

    /// Exact number of stored records.
    pub async fn count(&self) -> Result<i64> {
        let row = self
            .client
            .query_one("SELECT count(*) FROM weather_data", &[])
            .await
            .context("Failed to count weather records")?;
        Ok(row.get(0))
    }

    /// The `n` most recent records, newest first. Returns an empty Vec when
    /// fewer than `n` exist: the export path is all-or-nothing.
    pub async fn last_n(&self, n: i64) -> Result<Vec<WeatherRecord>> {
        if self.count().await? < n {
            return Ok(Vec::new());
        }

        let rows = self
            .client
            .query(LAST_N, &[&n])
            .await
            .context("Failed to fetch the most recent weather records")?;
        from_rows(rows)
    }
}

fn from_rows(rows: Vec<Row>) -> Result<Vec<WeatherRecord>> {
    rows.iter()
        .map(|row| WeatherRecord::try_from(row).map_err(Into::into))
        .collect()
}

impl TryFrom<&Row> for WeatherRecord {
    type Error = tokio_postgres::Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(WeatherRecord {
            temperature: f64::from(row.try_get::<_, f32>("temperature")?),
            wind_direction: row.try_get("wind_direction")?,
            wind_speed: f64::from(row.try_get::<_, f32>("wind_speed")?),
            pressure: f64::from(row.try_get::<_, f32>("pressure")?),
            precipitation_type: row.try_get("precipitation_type")?,
            precipitation_strength: row.try_get("precipitation_strength")?,
        })
    }
}
