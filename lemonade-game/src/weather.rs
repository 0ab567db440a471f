//! Daily weather.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CLOUDY_BELOW, SUNNY_BELOW};
use crate::rng::RandomSource;

/// Weather conditions that drive the day's foot traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Cloudy,
    Sunny,
    Hot,
}

impl Weather {
    pub const ALL: [Self; 3] = [Self::Cloudy, Self::Sunny, Self::Hot];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cloudy => "Cloudy",
            Self::Sunny => "Sunny",
            Self::Hot => "Hot and dry",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a unit draw. The thresholds belong to the warmer side:
/// `0.33` is Sunny and `0.66` is Hot.
#[must_use]
pub fn classify_weather(roll: f64) -> Weather {
    if roll < CLOUDY_BELOW {
        Weather::Cloudy
    } else if roll < SUNNY_BELOW {
        Weather::Sunny
    } else {
        Weather::Hot
    }
}

/// Draw today's weather.
pub fn generate_weather<R>(rng: &mut R) -> Weather
where
    R: RandomSource + ?Sized,
{
    let roll = rng.next_unit();
    let weather = classify_weather(roll);
    log::debug!("weather roll {roll:.4} -> {weather:?}");
    weather
}
