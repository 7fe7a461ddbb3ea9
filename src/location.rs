use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    Garage,
}

/// Resting climate of a room before the day cycle and noise are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub temperature_celsius: f64,

    pub humidity_percent: f64,
}

// Indexed by `Location as usize`.
const BASELINES: [Baseline; 5] = [
    Baseline {
        temperature_celsius: 22.0,
        humidity_percent: 45.0,
    },
    Baseline {
        temperature_celsius: 20.0,
        humidity_percent: 50.0,
    },
    Baseline {
        temperature_celsius: 23.0,
        humidity_percent: 55.0,
    },
    Baseline {
        temperature_celsius: 24.0,
        humidity_percent: 65.0,
    },
    Baseline {
        temperature_celsius: 15.0,
        humidity_percent: 40.0,
    },
];

impl Location {
    pub const ALL: [Location; 5] = [
        Location::LivingRoom,
        Location::Bedroom,
        Location::Kitchen,
        Location::Bathroom,
        Location::Garage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::LivingRoom => "living_room",
            Location::Bedroom => "bedroom",
            Location::Kitchen => "kitchen",
            Location::Bathroom => "bathroom",
            Location::Garage => "garage",
        }
    }

    pub fn baseline(&self) -> Baseline {
        BASELINES[*self as usize]
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
