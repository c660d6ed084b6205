use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct TrackPoint {
    pub x: f32,
    pub y: f32,
    pub curvature: f32,
}

/// A single sector of the lap, with its own base pace characteristics.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Sector {
    pub length_km: f32,
    pub base_pace_kph: f32,
    pub has_drs_zone: bool,
}

/// Read-only catalog record for a track. Embedded as a static fixture; no
/// file or database ingestion (both named non-goals).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub laps: u32,
    pub lap_length_km: f32,
    pub sectors: Vec<Sector>,
    pub sampled_track: Vec<TrackPoint>,
    /// Seconds lost to a pit stop beyond normal lap time.
    pub pit_loss: f32,
    /// Baseline per-tick incident probability before driver/tire modifiers.
    pub base_incident: f32,
    /// How hard it is to complete an overtake here, scales down attacker's edge.
    pub overtake_difficulty: f32,
    /// How aggressively this surface wears tires, multiplies compound wear curve.
    pub abrasion: f32,
    /// Downforce level, affects wet-weather pace multiplier.
    pub downforce: f32,
}

impl Track {
    pub fn get_track_point_at_distance(&self, lap_ratio: f32) -> TrackPoint {
        if self.sampled_track.is_empty() {
            return TrackPoint { x: 0.0, y: 0.0, curvature: 0.0 };
        }
        let index = (lap_ratio * self.sampled_track.len() as f32).round() as usize;
        self.sampled_track[index % self.sampled_track.len()]
    }

    pub fn sector_for_progress(&self, lap_progress: f32) -> usize {
        let mut acc = 0.0f32;
        for (i, sector) in self.sectors.iter().enumerate() {
            acc += sector.length_km / self.lap_length_km;
            if lap_progress < acc {
                return i;
            }
        }
        self.sectors.len().saturating_sub(1)
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub laps: u32,
    pub lap_length_km: f32,
}

impl From<&Track> for TrackSummary {
    fn from(t: &Track) -> Self {
        TrackSummary {
            id: t.id.clone(),
            name: t.name.clone(),
            laps: t.laps,
            lap_length_km: t.lap_length_km,
        }
    }
}
