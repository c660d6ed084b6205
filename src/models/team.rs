use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Team {
    pub number: u32,
    pub name: String,
    pub color: String,
    /// Baseline pit stop duration in ticks for this team's crew, before any
    /// per-stop jitter from engine::pit is applied.
    pub pit_efficiency: f32,
}
