use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Dry,
    Intermediate,
    Wet,
}

impl WeatherCondition {
    pub fn from_rain_probability(p: f32) -> Self {
        if p < 0.33 {
            WeatherCondition::Dry
        } else if p < 0.66 {
            WeatherCondition::Intermediate
        } else {
            WeatherCondition::Wet
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Dry => "DRY",
            WeatherCondition::Intermediate => "INTERMEDIATE",
            WeatherCondition::Wet => "WET",
        }
    }
}

/// Weather at the current tick, as carried on `RaceState`. Re-expressed as a
/// discrete condition rather than the donor's continuous-timeline model; the
/// donor's interpolation technique lives on in `engine::weather_drift`'s
/// bounded random walk instead.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Weather {
    pub condition: WeatherCondition,
    pub rain_probability: f32,
    pub track_temp: f32,
    pub wind: f32,
}

impl Weather {
    pub fn dry(track_temp: f32) -> Self {
        Weather {
            condition: WeatherCondition::Dry,
            rain_probability: 0.0,
            track_temp,
            wind: 0.0,
        }
    }
}
