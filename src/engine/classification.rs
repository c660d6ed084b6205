//! Classification (tick step 9). Grounded on the donor's `compare_cars` and
//! `update_race_finished`, generalized from a `finished_time` tick-stamp
//! comparison to DNF-excluded position assignment plus gap computation.

use crate::models::car::{Car, CarStatus};

use std::cmp::Ordering;

fn compare_cars(a: &Car, b: &Car) -> Ordering {
    match (a.timing.status, b.timing.status) {
        (CarStatus::Dnf, CarStatus::Dnf) => Ordering::Equal,
        (CarStatus::Dnf, _) => Ordering::Greater,
        (_, CarStatus::Dnf) => Ordering::Less,
        _ => {
            if a.timing.lap != b.timing.lap {
                b.timing.lap.cmp(&a.timing.lap)
            } else {
                b.telemetry
                    .lap_progress
                    .partial_cmp(&a.telemetry.lap_progress)
                    .unwrap_or(Ordering::Equal)
            }
        }
    }
}

/// An estimate of time per unit of lap_progress, used to convert positional
/// gaps into millisecond gaps for `gap_to_leader_ms` / `interval_to_ahead_ms`.
fn ms_per_lap(car: &Car, lap_length_km: f32) -> f32 {
    if car.telemetry.speed_kph <= 1.0 {
        0.0
    } else {
        (lap_length_km / car.telemetry.speed_kph) * 3_600_000.0
    }
}

/// Re-sorts cars by classification order, reassigns `position`, and recomputes
/// gaps. Returns `true` if the leader has completed the race.
pub fn classify(cars: &mut [Car], laps_total: u32, lap_length_km: f32) -> bool {
    cars.sort_by(compare_cars);

    for (idx, car) in cars.iter_mut().enumerate() {
        car.timing.position = (idx + 1) as u32;
    }

    if let Some(leader) = cars.first() {
        let leader_lap = leader.timing.lap;
        let leader_progress = leader.telemetry.lap_progress;
        let leader_ms_per_lap = ms_per_lap(leader, lap_length_km);

        let snapshot: Vec<(u32, f32)> = cars.iter().map(|c| (c.timing.lap, c.telemetry.lap_progress)).collect();

        for (idx, car) in cars.iter_mut().enumerate() {
            if car.is_dnf() {
                car.timing.gap_to_leader_ms = 0;
                car.timing.interval_to_ahead_ms = 0;
                continue;
            }
            let laps_behind = leader_lap.saturating_sub(car.timing.lap) as f32;
            let progress_behind = (leader_progress - car.telemetry.lap_progress) + laps_behind;
            car.timing.gap_to_leader_ms = (progress_behind * leader_ms_per_lap).max(0.0) as u32;

            if idx == 0 {
                car.timing.interval_to_ahead_ms = 0;
            } else {
                let (ahead_lap, ahead_progress) = snapshot[idx - 1];
                let laps_diff = ahead_lap.saturating_sub(car.timing.lap) as f32;
                let progress_diff = (ahead_progress - car.telemetry.lap_progress) + laps_diff;
                car.timing.interval_to_ahead_ms = (progress_diff * leader_ms_per_lap).max(0.0) as u32;
            }
        }
    }

    cars.first()
        .map(|leader| !leader.is_dnf() && leader.timing.lap >= laps_total)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::car::{ActiveCommand, DrivingMode, Identity, Strategy, Systems, Telemetry, Timing};
    use crate::models::tire::{Compound, TireState};

    fn car(code: &str, lap: u32, lap_progress: f32, status: CarStatus) -> Car {
        Car {
            identity: Identity {
                driver_code: code.to_string(),
                team: "Test".to_string(),
                base_skill: 0.9,
                aggression: 1.0,
                tire_management: 1.0,
                wet_multiplier: 1.0,
                track_affinity: 0.0,
            },
            telemetry: Telemetry { speed_kph: 200.0, fuel_kg: 50.0, lap_progress, tire: TireState::fresh(Compound::Medium) },
            systems: Systems { drs_active: false, ers_battery: 4.0, ers_deployed: false },
            strategy: Strategy { driving_mode: DrivingMode::Balanced, active_command: ActiveCommand::None },
            timing: Timing {
                position: 0,
                lap,
                sector: 0,
                last_lap_time_ms: 0,
                best_lap_time_ms: 0,
                pit_stops: 0,
                status,
                gap_to_leader_ms: 0,
                interval_to_ahead_ms: 0,
                in_pit_lane: false,
                pit_ticks_remaining: 0,
            },
        }
    }

    #[test]
    fn positions_are_dense_and_dnf_cars_sort_last() {
        let mut cars = vec![
            car("A", 3, 0.2, CarStatus::Racing),
            car("B", 5, 0.9, CarStatus::Dnf),
            car("C", 4, 0.1, CarStatus::Racing),
        ];
        classify(&mut cars, 10, 5.0);
        let positions: Vec<(&str, u32)> = cars.iter().map(|c| (c.identity.driver_code.as_str(), c.timing.position)).collect();
        assert_eq!(positions, vec![("C", 1), ("A", 2), ("B", 3)]);
    }

    #[test]
    fn race_finishes_once_leader_completes_laps_total() {
        let mut cars = vec![car("A", 10, 0.0, CarStatus::Racing)];
        assert!(classify(&mut cars, 10, 5.0));
        let mut not_yet = vec![car("A", 9, 0.5, CarStatus::Racing)];
        assert!(!classify(&mut not_yet, 10, 5.0));
    }
}
