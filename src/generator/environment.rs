use chrono::{DateTime, FixedOffset, Timelike};
use rand::Rng;

use crate::{
    generator::{day_phase, is_night, is_occupied, round},
    location::Location,
    point::Point,
};

pub const ENVIRONMENT_MEASUREMENT: &str = "environment";

const TEMPERATURE_AMPLITUDE: f64 = 2.0;
const HUMIDITY_AMPLITUDE: f64 = 5.0;
const CO2_OUTDOOR_PPM: f64 = 400.0;
const CO2_OCCUPANCY_PPM: f64 = 100.0;
const DAYLIGHT_LUX: f64 = 500.0;

/// Room climate for one location at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentReading {
    pub location: Location,

    pub temperature_celsius: f64,

    pub humidity_percent: f64,

    pub co2_ppm: f64,

    pub light_lux: f64,
}

impl EnvironmentReading {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, location: Location, at: &impl Timelike) -> Self {
        let hour = at.hour();
        let phase = day_phase(hour);
        let baseline = location.baseline();

        let temperature_celsius = round(
            baseline.temperature_celsius
                + phase * TEMPERATURE_AMPLITUDE
                + rng.random_range(-0.5..=0.5),
            2,
        );
        let humidity_percent = round(
            baseline.humidity_percent - phase * HUMIDITY_AMPLITUDE
                + rng.random_range(-2.0..=2.0),
            2,
        );

        let occupancy = if is_occupied(hour) {
            CO2_OCCUPANCY_PPM
        } else {
            0.0
        };
        let co2_ppm = round(CO2_OUTDOOR_PPM + rng.random_range(0.0..=50.0) + occupancy, 1);

        let light_lux = if is_night(hour) {
            round(rng.random_range(0.0..=10.0), 1)
        } else {
            round(
                (DAYLIGHT_LUX * (phase + 1.0) + rng.random_range(-50.0..=50.0)).max(0.0),
                1,
            )
        };

        Self {
            location,
            temperature_celsius,
            humidity_percent,
            co2_ppm,
            light_lux,
        }
    }

    pub fn to_point(&self, recorded_at: DateTime<FixedOffset>) -> Point {
        Point::new(ENVIRONMENT_MEASUREMENT, recorded_at)
            .tag("location", self.location.as_str())
            .field("temperature", self.temperature_celsius)
            .field("humidity", self.humidity_percent)
            .field("co2", self.co2_ppm)
            .field("light", self.light_lux)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use rand::{SeedableRng as _, rngs::StdRng};

    use super::*;

    fn at_hour(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn should_keep_temperature_and_humidity_near_baseline() {
        let mut rng = StdRng::seed_from_u64(7);
        for location in Location::ALL {
            let baseline = location.baseline();
            for hour in 0..24 {
                for _ in 0..50 {
                    let r = EnvironmentReading::generate(&mut rng, location, &at_hour(hour));
                    assert!(
                        (r.temperature_celsius - baseline.temperature_celsius).abs() <= 2.5 + 1e-9,
                        "{location} at {hour}: {}",
                        r.temperature_celsius
                    );
                    assert!(
                        (r.humidity_percent - baseline.humidity_percent).abs() <= 7.0 + 1e-9,
                        "{location} at {hour}: {}",
                        r.humidity_percent
                    );
                }
            }
        }
    }

    #[test]
    fn should_dim_lights_at_night() {
        let mut rng = StdRng::seed_from_u64(11);
        for hour in [22, 23, 0, 1, 2, 3, 4, 5, 6] {
            for _ in 0..100 {
                let r = EnvironmentReading::generate(&mut rng, Location::Bedroom, &at_hour(hour));
                assert!((0.0..=10.0).contains(&r.light_lux), "{hour}: {}", r.light_lux);
            }
        }
    }

    #[test]
    fn should_follow_phase_during_day() {
        let mut rng = StdRng::seed_from_u64(13);
        for hour in 7..22 {
            let expected = DAYLIGHT_LUX * (day_phase(hour) + 1.0);
            for _ in 0..100 {
                let r = EnvironmentReading::generate(&mut rng, Location::LivingRoom, &at_hour(hour));
                assert!((0.0..=1050.0).contains(&r.light_lux), "{hour}: {}", r.light_lux);
                assert!(
                    r.light_lux >= (expected - 50.05).max(0.0) && r.light_lux <= expected + 50.05,
                    "{hour}: {} vs {expected}",
                    r.light_lux
                );
            }
        }
    }

    #[test]
    fn should_raise_co2_while_occupied() {
        let mut rng = StdRng::seed_from_u64(17);
        for hour in 0..24 {
            for _ in 0..50 {
                let r = EnvironmentReading::generate(&mut rng, Location::Garage, &at_hour(hour));
                let band = if (8..=22).contains(&hour) {
                    500.0..=550.0
                } else {
                    400.0..=450.0
                };
                assert!(band.contains(&r.co2_ppm), "{hour}: {}", r.co2_ppm);
            }
        }
    }

    #[test]
    fn should_match_kitchen_at_noon() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let r = EnvironmentReading::generate(&mut rng, Location::Kitchen, &at_hour(12));
            assert!((r.temperature_celsius - 23.0).abs() <= 0.5 + 1e-9);
            assert!((r.humidity_percent - 55.0).abs() <= 2.0 + 1e-9);
            assert!((500.0..=550.0).contains(&r.co2_ppm));
            assert!((r.light_lux - 500.0).abs() <= 50.0 + 1e-9);
        }
    }

    #[test]
    fn should_be_reproducible_with_same_seed() {
        let at = at_hour(9);
        let a = EnvironmentReading::generate(&mut StdRng::seed_from_u64(3), Location::Bathroom, &at);
        let b = EnvironmentReading::generate(&mut StdRng::seed_from_u64(3), Location::Bathroom, &at);
        assert_eq!(a, b);
    }

    #[test]
    fn should_round_values() {
        let mut rng = StdRng::seed_from_u64(5);
        let r = EnvironmentReading::generate(&mut rng, Location::Kitchen, &at_hour(15));
        assert_eq!(r.temperature_celsius, round(r.temperature_celsius, 2));
        assert_eq!(r.humidity_percent, round(r.humidity_percent, 2));
        assert_eq!(r.co2_ppm, round(r.co2_ppm, 1));
        assert_eq!(r.light_lux, round(r.light_lux, 1));
    }

    #[test]
    fn should_tag_point_with_location() {
        let recorded_at = DateTime::parse_from_rfc3339("2024-01-01T12:00:00Z").unwrap();
        let reading = EnvironmentReading {
            location: Location::Kitchen,
            temperature_celsius: 23.1,
            humidity_percent: 54.2,
            co2_ppm: 521.3,
            light_lux: 498.7,
        };

        let point = reading.to_point(recorded_at);

        assert_eq!(point.measurement, "environment");
        assert_eq!(point.tags["location"], "kitchen");
        assert_eq!(
            point.fields.keys().collect::<Vec<_>>(),
            vec!["temperature", "humidity", "co2", "light"]
        );
        assert_eq!(point.fields["light"], 498.7);
        assert_eq!(point.recorded_at, recorded_at);
    }
}
