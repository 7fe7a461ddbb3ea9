//! Synthetic sensor readings with a day/night rhythm.
//!
//! Every generator takes the random source explicitly so a seeded
//! [`rand::rngs::StdRng`] reproduces the same readings for the same instant.

mod day_cycle;
mod environment;
mod power;
mod water;

pub use day_cycle::*;
pub use environment::*;
pub use power::*;
pub use water::*;

/// Rounds half away from zero to `decimals` places.
pub(crate) fn round(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
