//! Pair compatibility scoring from two four-pillar charts.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::cycle::Element;
use super::profile::SajuProfile;

/// How the two day-master elements relate on the generation/control cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Relation {
    #[strum(to_string = "same element")]
    Same,
    #[strum(to_string = "generative harmony")]
    Generative,
    #[strum(to_string = "controlling tension")]
    Controlling,
    #[strum(to_string = "neutral")]
    Neutral,
}

impl Relation {
    pub fn between(a: Element, b: Element) -> Relation {
        if a == b {
            Relation::Same
        } else if a.generates() == b || b.generates() == a {
            Relation::Generative
        } else if a.controls() == b || b.controls() == a {
            Relation::Controlling
        } else {
            Relation::Neutral
        }
    }

    fn bonus(self) -> i32 {
        match self {
            Relation::Same => 15,
            Relation::Generative => 10,
            Relation::Controlling => -10,
            Relation::Neutral => 0,
        }
    }
}

/// The five compatibility axes, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityScores {
    pub overall: u8,
    pub love: u8,
    pub marriage: u8,
    pub business: u8,
    pub friendship: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub scores: CompatibilityScores,
    pub relation: Relation,
    pub element_a: Element,
    pub element_b: Element,
    pub harmony_a: u8,
    pub harmony_b: u8,
}

/// Internal harmony of a single chart: element balance plus generation-chain
/// coverage, centered at 50.
pub fn harmony_score(profile: &SajuProfile) -> u8 {
    let counts = profile.element_counts();
    let mut score: i32 = 50;

    // A day master backed by three or more of its own element stands firm.
    if counts.count(profile.reference_stem().element()) >= 3 {
        score += 20;
    }

    match counts.spread() {
        0..=2 => score += 15,
        4.. => score -= 10,
        _ => {}
    }

    if counts.generation_links() >= 3 {
        score += 10;
    }

    clamp_score(score)
}

/// Score a pair of charts. Symmetric: swapping the arguments swaps only
/// `harmony_a`/`harmony_b`, never the scores.
pub fn score_pair(a: &SajuProfile, b: &SajuProfile) -> CompatibilityReport {
    let harmony_a = harmony_score(a);
    let harmony_b = harmony_score(b);
    let element_a = a.reference_stem().element();
    let element_b = b.reference_stem().element();
    let relation = Relation::between(element_a, element_b);

    let base = (i32::from(harmony_a) + i32::from(harmony_b)) / 2 + relation.bonus();
    let overall = clamp_score(base);

    // Axis spread mirrors the legacy report: business runs cautious,
    // friendship generous, love and marriage hug the overall figure.
    let scores = CompatibilityScores {
        overall,
        love: clamp_score(base - 5),
        marriage: clamp_score(base + 5),
        business: clamp_score(base - 10),
        friendship: clamp_score(base + 10),
    };

    CompatibilityReport {
        scores,
        relation,
        element_a,
        element_b,
        harmony_a,
        harmony_b,
    }
}

fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saju::profile::{BirthInfo, Gender};
    use pretty_assertions::assert_eq;

    fn profile(year: i32, month: u32, day: u32, hour: u32) -> SajuProfile {
        SajuProfile::from_birth(BirthInfo {
            year,
            month,
            day,
            hour,
            gender: Gender::Male,
        })
        .unwrap()
    }

    #[test]
    fn scoring_is_symmetric() {
        let a = profile(1988, 4, 12, 9);
        let b = profile(1991, 11, 3, 21);
        let ab = score_pair(&a, &b);
        let ba = score_pair(&b, &a);
        assert_eq!(ab.scores, ba.scores);
        assert_eq!(ab.relation, ba.relation);
        assert_eq!(ab.harmony_a, ba.harmony_b);
        assert_eq!(ab.element_a, ba.element_b);
    }

    #[test]
    fn all_axes_stay_in_range() {
        let pairs = [
            (profile(1970, 1, 1, 0), profile(2005, 12, 31, 23)),
            (profile(1984, 6, 6, 6), profile(1984, 6, 6, 6)),
            (profile(1999, 9, 9, 9), profile(2000, 2, 29, 12)),
        ];
        for (a, b) in &pairs {
            let report = score_pair(a, b);
            for score in [
                report.scores.overall,
                report.scores.love,
                report.scores.marriage,
                report.scores.business,
                report.scores.friendship,
            ] {
                assert!(score <= 100);
            }
        }
    }

    #[test]
    fn identical_charts_read_as_same_element() {
        let a = profile(1990, 5, 20, 10);
        let report = score_pair(&a, &a);
        assert_eq!(report.relation, Relation::Same);
        assert_eq!(report.harmony_a, report.harmony_b);
    }

    #[test]
    fn relation_table_follows_the_cycles() {
        assert_eq!(
            Relation::between(Element::Wood, Element::Fire),
            Relation::Generative
        );
        assert_eq!(
            Relation::between(Element::Fire, Element::Wood),
            Relation::Generative
        );
        assert_eq!(
            Relation::between(Element::Metal, Element::Wood),
            Relation::Controlling
        );
        assert_eq!(
            Relation::between(Element::Wood, Element::Metal),
            Relation::Controlling
        );
        assert_eq!(
            Relation::between(Element::Wood, Element::Wood),
            Relation::Same
        );
    }
}
