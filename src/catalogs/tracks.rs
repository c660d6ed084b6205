use crate::models::track::{Sector, Track, TrackPoint};

/// Static fixture set spanning a street circuit, a desert GP circuit, a
/// high-speed road course, a low-downforce temple of speed, and a
/// high-speed former airfield — monaco and bahrain carry the donor's
/// seed-data ids and lap counts directly, the rest are new since the donor
/// only shipped those two plus an Ardennes-less grid; sector/incident/
/// abrasion figures are new across all five since the donor had no
/// per-sector or incident model.
pub fn list_tracks() -> Vec<Track> {
    vec![monaco(), bahrain(), spa(), monza(), silverstone()]
}

pub fn get_track(id: &str) -> Option<Track> {
    list_tracks().into_iter().find(|t| t.id == id)
}

fn sampled_oval(points: usize, radius: f32) -> Vec<TrackPoint> {
    (0..points)
        .map(|i| {
            let theta = (i as f32 / points as f32) * std::f32::consts::TAU;
            TrackPoint {
                x: radius * theta.cos(),
                y: radius * theta.sin(),
                curvature: 1.0 / radius,
            }
        })
        .collect()
}

fn monaco() -> Track {
    Track {
        id: "monaco".to_string(),
        name: "Monaco Grand Prix".to_string(),
        laps: 78,
        lap_length_km: 3.34,
        sectors: vec![
            Sector { length_km: 1.1, base_pace_kph: 145.0, has_drs_zone: false },
            Sector { length_km: 1.2, base_pace_kph: 130.0, has_drs_zone: false },
            Sector { length_km: 1.04, base_pace_kph: 160.0, has_drs_zone: true },
        ],
        sampled_track: sampled_oval(64, 0.53),
        pit_loss: 21.0,
        base_incident: 0.0009,
        overtake_difficulty: 0.92,
        abrasion: 0.7,
        downforce: 0.95,
    }
}

fn bahrain() -> Track {
    Track {
        id: "bahrain".to_string(),
        name: "Bahrain International Circuit".to_string(),
        laps: 57,
        lap_length_km: 5.41,
        sectors: vec![
            Sector { length_km: 2.1, base_pace_kph: 220.0, has_drs_zone: true },
            Sector { length_km: 1.7, base_pace_kph: 195.0, has_drs_zone: false },
            Sector { length_km: 1.61, base_pace_kph: 210.0, has_drs_zone: true },
        ],
        sampled_track: sampled_oval(64, 0.86),
        pit_loss: 23.5,
        base_incident: 0.0005,
        overtake_difficulty: 0.45,
        abrasion: 0.85,
        downforce: 0.6,
    }
}

fn monza() -> Track {
    Track {
        id: "monza".to_string(),
        name: "Autodromo Nazionale Monza".to_string(),
        laps: 53,
        lap_length_km: 5.79,
        sectors: vec![
            Sector { length_km: 2.3, base_pace_kph: 265.0, has_drs_zone: true },
            Sector { length_km: 1.8, base_pace_kph: 230.0, has_drs_zone: false },
            Sector { length_km: 1.69, base_pace_kph: 250.0, has_drs_zone: true },
        ],
        sampled_track: sampled_oval(64, 1.08),
        pit_loss: 20.0,
        base_incident: 0.0004,
        overtake_difficulty: 0.35,
        abrasion: 0.45,
        downforce: 0.3,
    }
}

fn silverstone() -> Track {
    Track {
        id: "silverstone".to_string(),
        name: "Silverstone Circuit".to_string(),
        laps: 52,
        lap_length_km: 5.89,
        sectors: vec![
            Sector { length_km: 2.0, base_pace_kph: 240.0, has_drs_zone: true },
            Sector { length_km: 2.2, base_pace_kph: 215.0, has_drs_zone: false },
            Sector { length_km: 1.69, base_pace_kph: 225.0, has_drs_zone: false },
        ],
        sampled_track: sampled_oval(80, 1.1),
        pit_loss: 22.5,
        base_incident: 0.0008,
        overtake_difficulty: 0.55,
        abrasion: 0.75,
        downforce: 0.75,
    }
}

fn spa() -> Track {
    Track {
        id: "spa".to_string(),
        name: "Circuit de Spa-Francorchamps".to_string(),
        laps: 44,
        lap_length_km: 7.004,
        sectors: vec![
            Sector { length_km: 2.6, base_pace_kph: 255.0, has_drs_zone: true },
            Sector { length_km: 2.3, base_pace_kph: 205.0, has_drs_zone: false },
            Sector { length_km: 2.104, base_pace_kph: 230.0, has_drs_zone: true },
        ],
        sampled_track: sampled_oval(96, 1.11),
        pit_loss: 22.0,
        base_incident: 0.0007,
        overtake_difficulty: 0.4,
        abrasion: 0.55,
        downforce: 0.55,
    }
}
