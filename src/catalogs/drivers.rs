use crate::models::driver::Driver;

/// Static fixture grid: ten drivers across five teams, numeric ids matching
/// the donor seed data's car numbers (team_number * 10 + car_slot).
pub fn list_drivers() -> Vec<Driver> {
    vec![
        driver(11, "Max Verstappen", 0.95, 0.92, 0.90, 0.88, 0.93, 0.90, 0.88, 0.0),
        driver(12, "Sergio Perez", 0.88, 0.85, 0.82, 0.90, 0.85, 0.75, 0.80, 0.0),
        driver(21, "Charles Leclerc", 0.93, 0.88, 0.85, 0.86, 0.84, 0.88, 0.82, 0.0),
        driver(22, "Carlos Sainz", 0.90, 0.87, 0.88, 0.89, 0.86, 0.78, 0.84, 0.0),
        driver(31, "Lewis Hamilton", 0.94, 0.90, 0.92, 0.95, 0.91, 0.82, 0.90, 0.0),
        driver(32, "George Russell", 0.89, 0.87, 0.84, 0.82, 0.85, 0.80, 0.83, 0.0),
        driver(41, "Lando Norris", 0.90, 0.88, 0.85, 0.84, 0.87, 0.83, 0.85, 0.0),
        driver(42, "Oscar Piastri", 0.85, 0.84, 0.80, 0.75, 0.82, 0.86, 0.76, 0.0),
        driver(51, "Pierre Gasly", 0.86, 0.85, 0.83, 0.84, 0.82, 0.79, 0.81, 0.0),
        driver(52, "Esteban Ocon", 0.84, 0.83, 0.81, 0.83, 0.80, 0.76, 0.79, 0.0),
    ]
}

pub fn get_driver(id: u32) -> Option<Driver> {
    list_drivers().into_iter().find(|d| d.id == id)
}

/// Three-letter driver code used as a Car's `identity.driver_code`, the
/// compact identifier the engine and transport layer key events on.
pub fn driver_code(id: u32) -> &'static str {
    match id {
        11 => "VER",
        12 => "PER",
        21 => "LEC",
        22 => "SAI",
        31 => "HAM",
        32 => "RUS",
        41 => "NOR",
        42 => "PIA",
        51 => "GAS",
        52 => "OCO",
        _ => "UNK",
    }
}

#[allow(clippy::too_many_arguments)]
fn driver(
    id: u32,
    name: &str,
    skill_level: f32,
    stamina: f32,
    weather_tolerance: f32,
    experience: f32,
    consistency: f32,
    aggression: f32,
    tire_management: f32,
    track_affinity: f32,
) -> Driver {
    Driver {
        id,
        name: name.to_string(),
        skill_level,
        stamina,
        weather_tolerance,
        experience,
        consistency,
        focus: (stamina + consistency) / 2.0,
        stress_level: 0.0,
        aggression,
        tire_management,
        wet_multiplier: weather_tolerance,
        track_affinity,
    }
}
