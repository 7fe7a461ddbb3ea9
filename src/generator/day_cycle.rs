use std::f64::consts::TAU;

/// Diurnal phase in [-1, 1]: `sin(hour / 24 * 2π)`.
pub fn day_phase(hour: u32) -> f64 {
    (f64::from(hour) / 24.0 * TAU).sin()
}

/// Hours where lights are off, 22:00 through 06:59.
pub fn is_night(hour: u32) -> bool {
    hour >= 22 || hour <= 6
}

/// Hours where the premises are occupied, 08:00 through 22:59.
pub fn is_occupied(hour: u32) -> bool {
    (8..=22).contains(&hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_peak_at_six_and_trough_at_eighteen() {
        assert!((day_phase(6) - 1.0).abs() < 1e-12);
        assert!((day_phase(18) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn should_be_near_zero_at_midnight_and_noon() {
        assert!(day_phase(0).abs() < 1e-12);
        assert!(day_phase(12).abs() < 1e-12);
    }

    #[test]
    fn should_stay_within_unit_range() {
        for hour in 0..24 {
            let phase = day_phase(hour);
            assert!((-1.0..=1.0).contains(&phase), "hour {hour}: {phase}");
        }
    }

    #[test]
    fn should_classify_night_hours() {
        let night: Vec<u32> = (0..24).filter(|h| is_night(*h)).collect();
        assert_eq!(night, vec![0, 1, 2, 3, 4, 5, 6, 22, 23]);
    }

    #[test]
    fn should_classify_occupied_hours() {
        assert!(!is_occupied(7));
        assert!(is_occupied(8));
        assert!(is_occupied(22));
        assert!(!is_occupied(23));
    }
}
