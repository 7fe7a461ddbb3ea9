use chrono::{DateTime, FixedOffset, Timelike};
use rand::Rng;

use crate::{generator::round, point::Point};

pub const POWER_MEASUREMENT: &str = "power";

const BASE_LOAD_W: f64 = 100.0;
const REFRIGERATOR_LOAD_W: f64 = 150.0;
const SPIKE_PROBABILITY: f64 = 0.1;
const NOMINAL_VOLTAGE_V: f64 = 120.0;

/// Whole-premises electricity draw at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerReading {
    pub power_w: f64,

    pub voltage_v: f64,

    pub current_a: f64,
}

impl PowerReading {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, at: &impl Timelike) -> Self {
        // Compressor duty cycle swings between 80% and 120% of rated load.
        let refrigerator_w = REFRIGERATOR_LOAD_W * (0.8 + 0.4 * rng.random::<f64>());
        let factor = time_factor(at.hour());
        let spike_w = if rng.random_bool(SPIKE_PROBABILITY) {
            rng.random_range(0.0..=500.0)
        } else {
            0.0
        };

        let power_w = round(
            BASE_LOAD_W + refrigerator_w + rng.random_range(200.0..=800.0) * factor + spike_w,
            2,
        );
        let voltage_v = round(NOMINAL_VOLTAGE_V + rng.random_range(-2.0..=2.0), 2);
        let current_a = round(power_w / voltage_v, 2);

        Self {
            power_w,
            voltage_v,
            current_a,
        }
    }

    pub fn to_point(&self, recorded_at: DateTime<FixedOffset>) -> Point {
        Point::new(POWER_MEASUREMENT, recorded_at)
            .field("power", self.power_w)
            .field("voltage", self.voltage_v)
            .field("current", self.current_a)
    }
}

/// Household activity multiplier for the variable appliance load.
pub fn time_factor(hour: u32) -> f64 {
    match hour {
        6..=9 => 2.5,
        17..=21 => 3.0,
        h if h >= 22 || h <= 5 => 0.6,
        _ => 1.0,
    }
}
