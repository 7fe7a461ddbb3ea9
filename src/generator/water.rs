use chrono::{DateTime, FixedOffset, Timelike};
use rand::Rng;

use crate::{generator::round, point::Point};

pub const WATER_MEASUREMENT: &str = "water";

/// What kind of draw produced a water reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterEvent {
    /// Morning shower or toilet flush.
    Morning,
    /// Evening dishwashing.
    Dishes,
    /// A tap opened at any hour.
    Incidental,
    /// Nothing running, only the baseline leak.
    Leak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaterReading {
    pub event: WaterEvent,

    pub usage_liters: f64,
}

impl WaterReading {
    /// Branches are tried in order and each probability is only drawn when
    /// its branch is reached.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, at: &impl Timelike) -> Self {
        let hour = at.hour();

        let (event, usage_liters) = if (6..=9).contains(&hour) && rng.random_bool(0.3) {
            (WaterEvent::Morning, round(rng.random_range(5.0..=15.0), 2))
        } else if (18..=22).contains(&hour) && rng.random_bool(0.25) {
            (WaterEvent::Dishes, round(rng.random_range(1.0..=8.0), 2))
        } else if rng.random_bool(0.05) {
            (WaterEvent::Incidental, round(rng.random_range(0.5..=5.0), 2))
        } else {
            (WaterEvent::Leak, round(rng.random_range(0.0..=0.05), 3))
        };

        Self {
            event,
            usage_liters,
        }
    }

    pub fn to_point(&self, recorded_at: DateTime<FixedOffset>) -> Point {
        Point::new(WATER_MEASUREMENT, recorded_at).field("usage", self.usage_liters)
    }
}
