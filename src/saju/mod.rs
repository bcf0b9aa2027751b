mod compatibility;
mod cycle;
mod profile;

pub use compatibility::{
    CompatibilityReport, CompatibilityScores, Relation, harmony_score, score_pair,
};
pub use cycle::{Branch, Element, Pillar, Stem};
pub use profile::{BirthInfo, ElementCounts, Gender, SajuProfile};
