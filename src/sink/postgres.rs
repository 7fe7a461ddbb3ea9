use sqlx::{PgPool, postgres::PgPoolOptions, types::Json};
use tracing::info;

use crate::{
    point::Point,
    sink::{Sink, SinkError},
};

/// Stores each point as a row of `sensor_points`, tags and fields as JSONB.
pub struct PostgresSink {
    pool: PgPool,
}

impl PostgresSink {
    /// Opens a single-connection pool and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, SinkError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        sqlx::migrate!().run(&pool).await?;

        info!("opened database pool");

        Ok(Self { pool })
    }
}

impl Sink for PostgresSink {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn write(&mut self, point: &Point) -> Result<(), SinkError> {
        sqlx::query(
            r#"
            INSERT INTO sensor_points (measurement, tags, fields, recorded_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&point.measurement)
        .bind(Json(&point.tags))
        .bind(Json(&point.fields))
        .bind(point.recorded_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn close(self) {
        self.pool.close().await;
        info!("closed database pool");
    }
}
