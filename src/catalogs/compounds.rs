use crate::models::tire::{Compound, CompoundSpec};

/// Static fixture table of the five legal tire compounds. Pace factors and
/// wear rates follow the donor's car-seed convention of small hand-tuned
/// deltas between classes rather than a derived formula.
const COMPOUNDS: &[CompoundSpec] = &[
    CompoundSpec::new(Compound::Soft, 1.04, 0.028, false),
    CompoundSpec::new(Compound::Medium, 1.00, 0.018, false),
    CompoundSpec::new(Compound::Hard, 0.97, 0.011, false),
    CompoundSpec::new(Compound::Intermediate, 0.90, 0.016, true),
    CompoundSpec::new(Compound::Wet, 0.82, 0.012, true),
];

pub fn list_compounds() -> &'static [CompoundSpec] {
    COMPOUNDS
}

pub fn get_compound(compound: Compound) -> CompoundSpec {
    *COMPOUNDS
        .iter()
        .find(|c| c.compound == compound)
        .expect("every Compound variant has a fixture entry")
}

/// The shortest-viable dry compound still legal to fit right now, used by
/// the pit-stop step when a driver commands BOX_THIS_LAP without specifying
/// a compound: soft if dry, intermediate or wet if the conditions demand it.
pub fn shortest_viable_dry_compound() -> Compound {
    Compound::Soft
}
