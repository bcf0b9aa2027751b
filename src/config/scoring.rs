//! Day scoring rule weights and tier boundaries

use serde::{Deserialize, Serialize};

use crate::models::Tier;

/// Additive rule weights for day scoring. All bonuses are positive by
/// construction: a day can only rise above the base, never sink below it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub base_score: i32,
    /// Weekend day when the purpose is a wedding.
    pub weekend_wedding: i32,
    /// Weekday when the purpose is business or a contract.
    pub weekday_business: i32,
    /// Day-of-month falling on the auspicious 7-residues {1, 3, 6}.
    pub auspicious_dom: i32,
    /// Months 5, 6, 9, 10.
    pub favorable_season: i32,
    /// Wedding in April-June.
    pub wedding_season: i32,
    /// Moving in March-May or September-November.
    pub moving_season: i32,
    /// Yang day stem.
    pub yang_stem: i32,
    /// Cardinal day branch (子/卯/午/酉).
    pub cardinal_branch: i32,
    /// Day element generating the chart's day-master element.
    pub day_master_support: i32,
    /// Day element equal to the day-master element.
    pub day_master_match: i32,
    pub tiers: TierThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 50,
            weekend_wedding: 15,
            weekday_business: 10,
            auspicious_dom: 10,
            favorable_season: 5,
            wedding_season: 10,
            moving_season: 8,
            yang_stem: 3,
            cardinal_branch: 5,
            day_master_support: 5,
            day_master_match: 3,
            tiers: TierThresholds::default(),
        }
    }
}

/// Descending score boundaries for tier classification. A table, not a law:
/// the legacy system shipped two variants (80/65/50/35 and 85/70/50/35) and
/// this is where a deployment picks one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierThresholds {
    pub great_fortune: u8,
    pub fortune: u8,
    pub neutral: u8,
    pub minor_caution: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            great_fortune: 80,
            fortune: 65,
            neutral: 50,
            minor_caution: 35,
        }
    }
}

impl TierThresholds {
    pub fn classify(&self, score: u8) -> Tier {
        if score >= self.great_fortune {
            Tier::GreatFortune
        } else if score >= self.fortune {
            Tier::Fortune
        } else if score >= self.neutral {
            Tier::Neutral
        } else if score >= self.minor_caution {
            Tier::MinorCaution
        } else {
            Tier::Caution
        }
    }
}
