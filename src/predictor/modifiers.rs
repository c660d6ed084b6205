//! Caller-supplied macro modifiers for a prediction request. These are pure
//! tick inputs (see `engine::commands::Modifiers`) never state mutations, so
//! every ensemble member can vary them independently of the baseline.

use serde::{Deserialize, Serialize};

use crate::engine::commands::Modifiers;
use crate::models::weather::WeatherCondition;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct PredictionModifiers {
    pub aggression: Option<f32>,
    pub sc_prob: Option<f32>,
    pub tire_deg: Option<f32>,
    /// When set, overrides the scenario's starting weather condition for the
    /// baseline and every ensemble member (applied once, before the first
    /// tick; the usual weather drift still runs from there).
    pub weather: Option<WeatherCondition>,
}

impl PredictionModifiers {
    /// Clamps each field to its documented range and converts to the
    /// engine's `Modifiers`, defaulting anything unset to neutral (1.0).
    pub fn into_engine_modifiers(self) -> Modifiers {
        Modifiers {
            aggression: self.aggression.unwrap_or(1.0).clamp(0.5, 1.5),
            sc_probability: self.sc_prob.unwrap_or(1.0).clamp(0.0, 3.0),
            tire_deg: self.tire_deg.unwrap_or(1.0).clamp(0.5, 2.0),
        }
    }

    /// A stable bit pattern for the ensemble base seed's hash input, so that
    /// distinct modifier sets reliably produce distinct ensembles while the
    /// same modifiers always reproduce the same seed.
    pub fn bits(&self) -> u64 {
        let m = self.into_engine_modifiers();
        let weather_tag: u64 = match self.weather {
            None => 0,
            Some(WeatherCondition::Dry) => 1,
            Some(WeatherCondition::Intermediate) => 2,
            Some(WeatherCondition::Wet) => 3,
        };
        let a = m.aggression.to_bits() as u64;
        let s = m.sc_probability.to_bits() as u64;
        let t = m.tire_deg.to_bits() as u64;
        a.wrapping_mul(0x9E3779B97F4A7C15)
            ^ s.wrapping_mul(0xC2B2AE3D27D4EB4F)
            ^ t.wrapping_mul(0x165667B19E3779F9)
            ^ weather_tag.wrapping_mul(0x27D4EB2F165667C5)
    }
}
