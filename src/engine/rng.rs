//! Seeded determinism. The donor seeded `rand::rng()` from OS entropy on
//! every construction; the one deliberate substitution here is
//! `StdRng::seed_from_u64`, since byte-identical replay requires the RNG's
//! internal counter, not just its algorithm, to be reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derives an ensemble member's seed from a base seed and its index, per the
/// predictor's `base_seed ⊕ i` contract.
pub fn ensemble_seed(base_seed: u64, member_index: u64) -> u64 {
    base_seed ^ member_index
}

/// Derives a deterministic base seed from a scenario id and its modifiers,
/// per the predictor's `hash(scenario_id, modifiers)` contract.
pub fn hash_seed(scenario_id: &str, modifiers_bits: u64) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    scenario_id.hash(&mut hasher);
    modifiers_bits.hash(&mut hasher);
    hasher.finish()
}
