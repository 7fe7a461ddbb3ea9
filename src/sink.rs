//! Destinations for generated points.
//!
//! A sink is opened once at startup, receives every point one at a time and
//! is consumed by [`Sink::close`], so it can only be released once.

mod influxdb;
mod postgres;

use std::future::Future;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub use influxdb::*;
pub use postgres::*;

use crate::point::Point;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned error: {status} - {body}")]
    Server { status: u16, body: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to apply migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub trait Sink {
    /// Human-readable name used in log lines.
    fn name(&self) -> &'static str;

    /// Writes one point and waits until the destination has accepted it.
    fn write(&mut self, point: &Point) -> impl Future<Output = Result<(), SinkError>>;

    /// Releases the underlying connection.
    fn close(self) -> impl Future<Output = ()>;
}

/// Waits for `connect` unless `cancel` fires first, in which case no sink is
/// opened and `None` is returned.
pub async fn connect_unless_cancelled<S, F>(
    cancel: &CancellationToken,
    connect: F,
) -> Result<Option<S>, SinkError>
where
    F: Future<Output = Result<S, SinkError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Ok(None),
        sink = connect => sink.map(Some),
    }
}
