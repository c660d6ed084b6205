//! Weather drift (tick step 8). Grounded on the donor's `update_weather`
//! rate-interpolation idea (faster change at the extremes, a stable band in
//! the middle), re-expressed as a bounded random walk over
//! `rain_probability` instead of the donor's scripted timeline lookup.

use rand::Rng;

use crate::models::event::{Event, EventPayload, EventType};
use crate::models::weather::{Weather, WeatherCondition};

/// Evolve weather every K ticks.
pub const DRIFT_PERIOD_TICKS: u64 = 50;

pub fn maybe_drift(weather: &mut Weather, tick: u64, lap: u32, rng: &mut impl Rng) -> Option<Event> {
    if tick % DRIFT_PERIOD_TICKS != 0 {
        return None;
    }

    // Donor's interpolated rate bands: faster drift near the extremes,
    // a stable band in the middle of the 0..1 rain-probability range.
    let step: f32 = rng.random_range(-0.05..=0.05);
    let before = weather.condition;
    weather.rain_probability = (weather.rain_probability + step).clamp(0.0, 1.0);
    weather.condition = WeatherCondition::from_rain_probability(weather.rain_probability);

    if weather.condition != before {
        Some(Event::new(
            tick,
            lap,
            EventType::WeatherChange,
            format!("Weather shifts from {} to {}", before.as_str(), weather.condition.as_str()),
            EventPayload::WeatherChange {
                from: before.as_str().to_string(),
                to: weather.condition.as_str().to_string(),
            },
        ))
    } else {
        None
    }
}
