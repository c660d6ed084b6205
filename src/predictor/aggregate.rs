//! Aggregation of ensemble member outcomes into driver-level probabilities
//! and an overall confidence score. Grounded on the donor's
//! `simulate`/`display_prediction_results` position-counting pass in
//! `other_examples`'s prediction module, generalized from win/podium/points
//! counters into a per-position finish distribution plus an explicit
//! confidence formula.

use std::collections::HashMap;

use serde::Serialize;

/// One ensemble member's final classification: driver_code -> finishing
/// position (1-based). DNF'd cars are omitted.
pub type MemberOutcome = HashMap<String, u32>;

#[derive(Serialize, Debug, Clone)]
pub struct DriverPrediction {
    pub driver_code: String,
    pub win_prob: f64,
    pub podium_prob: f64,
    pub points_prob: f64,
    /// position (1-based) -> probability of finishing there, including DNF
    /// as position 0.
    pub finish_distribution: HashMap<u32, f64>,
}

#[derive(Serialize, Debug, Clone)]
pub struct Predictions {
    pub members: u32,
    pub predicted_order: Vec<String>,
    pub drivers: Vec<DriverPrediction>,
    pub confidence: f64,
}

const DNF_POSITION: u32 = 0;

/// Aggregates a full set of ensemble outcomes into `Predictions`.
/// `driver_codes` fixes the output ordering's universe (the full grid),
/// since a member that DNF's every car still needs every driver represented.
pub fn aggregate(driver_codes: &[String], outcomes: &[MemberOutcome]) -> Predictions {
    let n = outcomes.len().max(1) as f64;

    let mut win_counts: HashMap<&str, u32> = HashMap::new();
    let mut podium_counts: HashMap<&str, u32> = HashMap::new();
    let mut points_counts: HashMap<&str, u32> = HashMap::new();
    let mut position_counts: HashMap<&str, HashMap<u32, u32>> = HashMap::new();
    let mut position_sum: HashMap<&str, f64> = HashMap::new();

    for code in driver_codes {
        position_counts.insert(code.as_str(), HashMap::new());
    }

    for outcome in outcomes {
        for code in driver_codes {
            let pos = *outcome.get(code.as_str()).unwrap_or(&DNF_POSITION);
            *position_counts.entry(code.as_str()).or_default().entry(pos).or_insert(0) += 1;
            if pos == 1 {
                *win_counts.entry(code.as_str()).or_insert(0) += 1;
            }
            if pos >= 1 && pos <= 3 {
                *podium_counts.entry(code.as_str()).or_insert(0) += 1;
            }
            if pos >= 1 && pos <= 10 {
                *points_counts.entry(code.as_str()).or_insert(0) += 1;
            }
            let effective_pos = if pos == DNF_POSITION { driver_codes.len() as f64 + 1.0 } else { pos as f64 };
            *position_sum.entry(code.as_str()).or_insert(0.0) += effective_pos;
        }
    }

    let mut drivers: Vec<DriverPrediction> = driver_codes
        .iter()
        .map(|code| {
            let counts = position_counts.get(code.as_str()).cloned().unwrap_or_default();
            let finish_distribution = counts.into_iter().map(|(pos, c)| (pos, c as f64 / n)).collect();
            DriverPrediction {
                driver_code: code.clone(),
                win_prob: *win_counts.get(code.as_str()).unwrap_or(&0) as f64 / n,
                podium_prob: *podium_counts.get(code.as_str()).unwrap_or(&0) as f64 / n,
                points_prob: *points_counts.get(code.as_str()).unwrap_or(&0) as f64 / n,
                finish_distribution,
            }
        })
        .collect();

    let expected_position: HashMap<&str, f64> = driver_codes
        .iter()
        .map(|code| (code.as_str(), position_sum.get(code.as_str()).copied().unwrap_or(0.0) / n))
        .collect();

    let mut predicted_order = driver_codes.clone();
    predicted_order.sort_by(|a, b| {
        expected_position[a.as_str()]
            .partial_cmp(&expected_position[b.as_str()])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    drivers.sort_by(|a, b| b.win_prob.partial_cmp(&a.win_prob).unwrap_or(std::cmp::Ordering::Equal));

    let confidence = confidence_score(&drivers);

    Predictions {
        members: outcomes.len() as u32,
        predicted_order,
        drivers,
        confidence,
    }
}

/// `clamp01(mean_top1_probability * member_agreement)`, where
/// `member_agreement = 1 - normalized_entropy(win_prob)` treats the win-prob
/// distribution across the grid as a probability mass function whose
/// entropy measures how spread out the predicted winner is.
fn confidence_score(drivers: &[DriverPrediction]) -> f64 {
    if drivers.is_empty() {
        return 0.0;
    }
    let mean_top1_probability = drivers.iter().map(|d| d.win_prob).fold(0.0, f64::max);

    let total: f64 = drivers.iter().map(|d| d.win_prob).sum();
    let entropy = if total <= 0.0 {
        0.0
    } else {
        -drivers
            .iter()
            .map(|d| d.win_prob / total)
            .filter(|p| *p > 0.0)
            .map(|p| p * p.ln())
            .sum::<f64>()
    };
    let max_entropy = (drivers.len() as f64).ln();
    let normalized_entropy = if max_entropy > 0.0 { entropy / max_entropy } else { 0.0 };
    let member_agreement = 1.0 - normalized_entropy;

    (mean_top1_probability * member_agreement).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(pairs: &[(&str, u32)]) -> MemberOutcome {
        pairs.iter().map(|(code, pos)| (code.to_string(), *pos)).collect()
    }

    #[test]
    fn a_dominant_winner_yields_high_confidence() {
        let codes = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let outcomes: Vec<MemberOutcome> = (0..100)
            .map(|i| if i < 90 { outcome(&[("A", 1), ("B", 2), ("C", 3)]) } else { outcome(&[("B", 1), ("A", 2), ("C", 3)]) })
            .collect();

        let predictions = aggregate(&codes, &outcomes);
        assert_eq!(predictions.predicted_order[0], "A");
        assert!(predictions.drivers[0].win_prob > 0.8);
        assert!(predictions.confidence > 0.5);
    }

    #[test]
    fn a_three_way_tie_yields_low_confidence() {
        let codes = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let outcomes: Vec<MemberOutcome> = vec![
            outcome(&[("A", 1), ("B", 2), ("C", 3)]),
            outcome(&[("B", 1), ("C", 2), ("A", 3)]),
            outcome(&[("C", 1), ("A", 2), ("B", 3)]),
        ];

        let predictions = aggregate(&codes, &outcomes);
        assert!(predictions.confidence < 0.2);
    }

    #[test]
    fn dnf_members_are_excluded_from_podium_and_points() {
        let codes = vec!["A".to_string(), "B".to_string()];
        let outcomes = vec![outcome(&[("A", 1)])]; // B did not finish this member
        let predictions = aggregate(&codes, &outcomes);
        let b = predictions.drivers.iter().find(|d| d.driver_code == "B").unwrap();
        assert_eq!(b.win_prob, 0.0);
        assert_eq!(b.podium_prob, 0.0);
    }
}
