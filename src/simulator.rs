//! The generate → publish → sleep loop.

use std::{fmt, time::Duration};

use anyhow::{Context as _, Result};
use chrono::{DateTime, FixedOffset};
use rand::rngs::StdRng;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    clock::Clock,
    generator::{EnvironmentReading, PowerReading, WaterReading},
    location::Location,
    point::Point,
    sink::Sink,
};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Generating,
    Publishing,
    Sleeping,
    Stopped,
}

/// Everything generated in one cycle, computed once and used both for the
/// written points and the status line.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub recorded_at: DateTime<FixedOffset>,

    pub environment: Vec<EnvironmentReading>,

    pub power: PowerReading,

    pub water: WaterReading,
}

impl Cycle {
    /// Points in publishing order: every location, then power, then water.
    pub fn points(&self) -> Vec<Point> {
        let mut points: Vec<Point> = self
            .environment
            .iter()
            .map(|r| r.to_point(self.recorded_at))
            .collect();
        points.push(self.power.to_point(self.recorded_at));
        points.push(self.water.to_point(self.recorded_at));
        points
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.recorded_at.format("%Y-%m-%d %H:%M:%S %:z"))?;
        for r in &self.environment {
            write!(
                f,
                " {}: {}°C {}% {}ppm {}lx;",
                r.location, r.temperature_celsius, r.humidity_percent, r.co2_ppm, r.light_lux
            )?;
        }
        write!(
            f,
            " power: {}W {}V {}A; water: {}L",
            self.power.power_w, self.power.voltage_v, self.power.current_a, self.water.usage_liters
        )
    }
}

/// Outcome of a finished [`Simulator::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,

    pub records: u64,

    /// State the loop was in when cancellation was observed.
    pub stopped_in: CycleState,
}

pub struct Simulator<S, C> {
    sink: S,
    clock: C,
    rng: StdRng,
    locations: Vec<Location>,
    interval: Duration,
    state: CycleState,
    cycles: u64,
    records: u64,
}

impl<S: Sink, C: Clock> Simulator<S, C> {
    pub fn new(sink: S, clock: C, rng: StdRng) -> Self {
        Self {
            sink,
            clock,
            rng,
            locations: Location::ALL.to_vec(),
            interval: DEFAULT_INTERVAL,
            state: CycleState::Idle,
            cycles: 0,
            records: 0,
        }
    }

    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Draws one round of readings for `recorded_at`.
    pub fn generate(&mut self, recorded_at: DateTime<FixedOffset>) -> Cycle {
        let environment = self
            .locations
            .iter()
            .map(|location| EnvironmentReading::generate(&mut self.rng, *location, &recorded_at))
            .collect();
        let power = PowerReading::generate(&mut self.rng, &recorded_at);
        let water = WaterReading::generate(&mut self.rng, &recorded_at);

        Cycle {
            recorded_at,
            environment,
            power,
            water,
        }
    }

    /// Writes the points one after another, stopping at the first failure.
    pub async fn publish(&mut self, points: &[Point]) -> Result<()> {
        for point in points {
            self.sink
                .write(point)
                .await
                .with_context(|| format!("failed to write {} point", point.measurement))?;
            self.records += 1;
        }

        Ok(())
    }

    /// Runs cycles until `cancel` fires or a write fails, then closes the
    /// sink.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<RunSummary> {
        info!(
            sink = self.sink.name(),
            locations = self.locations.len(),
            interval = ?self.interval,
            "starting sensor simulation"
        );

        let result = self.run_until_cancelled(&cancel).await;

        let stopped_in = self.state;
        self.transition(CycleState::Stopped);

        let Self {
            sink,
            cycles,
            records,
            ..
        } = self;
        sink.close().await;

        match &result {
            Ok(()) => info!(cycles, records, ?stopped_in, "sensor simulation stopped"),
            Err(err) => warn!(cycles, records, ?stopped_in, "sensor simulation aborted: {err:#}"),
        }

        result.map(|()| RunSummary {
            cycles,
            records,
            stopped_in,
        })
    }

    async fn run_until_cancelled(&mut self, cancel: &CancellationToken) -> Result<()> {
        loop {
            if cancel.is_cancelled() {
                return Ok(());
            }

            self.transition(CycleState::Generating);
            let cycle = self.generate(self.clock.now());
            let points = cycle.points();

            self.transition(CycleState::Publishing);
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(()),
                result = self.publish(&points) => result.context("failed to publish cycle")?,
            }
            self.cycles += 1;
            println!("{cycle}");

            self.transition(CycleState::Sleeping);
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Ok(()),
                () = sleep(self.interval) => {}
            }
        }
    }

    fn transition(&mut self, next: CycleState) {
        debug!(from = ?self.state, to = ?next, "cycle state");
        self.state = next;
    }
}
