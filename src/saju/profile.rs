//! Four-pillar chart derivation from birth data.
//!
//! The pillar formulas are the simplified folk versions (fixed anchors and
//! tables), deliberately not solar-term astronomy: the year wheel is anchored
//! at 1984 (甲子), the month uses the fixed branch table starting at 丑, and
//! the hour maps through the two-hour branch wheel.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use super::cycle::{Branch, Element, Pillar, Stem};
use crate::utils::{utc_midnight, ymd_to_epoch_ms};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Raw birth data as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthInfo {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Birth hour 0-23.
    pub hour: u32,
    pub gender: Gender,
}

/// The four-pillar record. Immutable once derived; everything downstream
/// (scoring, compatibility) keys off it, primarily off the day stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SajuProfile {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    pub birth: BirthInfo,
}

impl SajuProfile {
    /// Derive the full chart. Rejects calendar-invalid birth dates and hours
    /// before anything else sees them.
    pub fn from_birth(birth: BirthInfo) -> Result<Self> {
        if birth.hour >= 24 {
            bail!("birth hour {} out of range 0-23", birth.hour);
        }
        let Some(birth_ts) = ymd_to_epoch_ms(birth.year, birth.month, birth.day) else {
            bail!(
                "invalid birth date {:04}-{:02}-{:02}",
                birth.year,
                birth.month,
                birth.day
            );
        };

        // Year wheel: 1984 is 갑자 (甲子).
        let year_diff = i64::from(birth.year) - 1984;
        let year = Pillar::new(Stem::from_index(year_diff), Branch::from_index(year_diff));

        // Month wheel: fixed branch table starting at 丑 for month 1.
        let month_idx = i64::from(birth.month);
        let month = Pillar::new(Stem::from_index(month_idx), Branch::from_index(month_idx));

        // Day pillar: the one exact wheel, shared with day scanning.
        let day = Pillar::for_day(utc_midnight(birth_ts));

        // Hour wheel: each branch spans two hours, 子 wrapping 23:00-01:00.
        let hour_idx = i64::from(birth.hour);
        let hour = Pillar::new(
            Stem::from_index(hour_idx),
            Branch::from_index((hour_idx + 1) / 2),
        );

        Ok(Self {
            year,
            month,
            day,
            hour,
            birth,
        })
    }

    /// The day stem (일간), the chart's reference point.
    pub fn reference_stem(&self) -> Stem {
        self.day.stem
    }

    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// Five-element distribution over all eight stem/branch positions.
    pub fn element_counts(&self) -> ElementCounts {
        let mut counts = ElementCounts::default();
        for pillar in self.pillars() {
            counts.add(pillar.stem.element());
            counts.add(pillar.branch.element());
        }
        counts
    }
}

/// Element tally across a chart (sums to 8 for a full profile).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCounts([u8; Element::COUNT]);

impl ElementCounts {
    pub fn add(&mut self, element: Element) {
        self.0[element as usize] += 1;
    }

    pub fn count(&self, element: Element) -> u8 {
        self.0[element as usize]
    }

    pub fn total(&self) -> u8 {
        self.0.iter().sum()
    }

    /// Gap between the most and least represented element. A small spread
    /// reads as a balanced chart.
    pub fn spread(&self) -> u8 {
        let max = self.0.iter().copied().max().unwrap_or(0);
        let min = self.0.iter().copied().min().unwrap_or(0);
        max - min
    }

    /// How many links of the generation cycle (wood→fire→…→wood) have both
    /// endpoints present in the chart.
    pub fn generation_links(&self) -> usize {
        use strum::IntoEnumIterator;
        Element::iter()
            .filter(|e| self.count(*e) > 0 && self.count(e.generates()) > 0)
            .count()
    }

    pub fn is_present(&self, element: Element) -> bool {
        self.count(element) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn birth(year: i32, month: u32, day: u32, hour: u32) -> BirthInfo {
        BirthInfo {
            year,
            month,
            day,
            hour,
            gender: Gender::Female,
        }
    }

    #[test]
    fn year_pillar_anchored_at_1984() {
        let p = SajuProfile::from_birth(birth(1984, 6, 1, 12)).unwrap();
        assert_eq!(p.year.stem, Stem::Gap);
        assert_eq!(p.year.branch, Branch::Ja);
        // 1990 = 경오 (six steps along both wheels)
        let p = SajuProfile::from_birth(birth(1990, 6, 1, 12)).unwrap();
        assert_eq!(p.year.stem, Stem::Gyeong);
        assert_eq!(p.year.branch, Branch::O);
    }

    #[test]
    fn month_branch_table_wraps() {
        let jan = SajuProfile::from_birth(birth(2000, 1, 15, 0)).unwrap();
        assert_eq!(jan.month.branch, Branch::Chuk);
        let dec = SajuProfile::from_birth(birth(2000, 12, 15, 0)).unwrap();
        assert_eq!(dec.month.branch, Branch::Ja);
    }

    #[test]
    fn hour_branch_spans_two_hours() {
        let h23 = SajuProfile::from_birth(birth(2000, 1, 1, 23)).unwrap();
        assert_eq!(h23.hour.branch, Branch::Ja); // (23+1)/2 = 12 -> wraps to 子
        let h0 = SajuProfile::from_birth(birth(2000, 1, 1, 0)).unwrap();
        assert_eq!(h0.hour.branch, Branch::Ja);
        let h13 = SajuProfile::from_birth(birth(2000, 1, 1, 13)).unwrap();
        assert_eq!(h13.hour.branch, Branch::Mi); // (13+1)/2 = 7
    }

    #[test]
    fn invalid_births_are_rejected() {
        assert!(SajuProfile::from_birth(birth(2001, 2, 29, 0)).is_err());
        assert!(SajuProfile::from_birth(birth(2000, 13, 1, 0)).is_err());
        assert!(SajuProfile::from_birth(birth(2000, 1, 1, 24)).is_err());
    }

    #[test]
    fn element_counts_cover_all_eight_positions() {
        let p = SajuProfile::from_birth(birth(1990, 3, 15, 8)).unwrap();
        let counts = p.element_counts();
        assert_eq!(counts.total(), 8);
        assert!(counts.spread() <= 8);
    }

    #[test]
    fn reference_stem_is_the_day_stem() {
        let p = SajuProfile::from_birth(birth(1990, 3, 15, 8)).unwrap();
        assert_eq!(p.reference_stem(), p.day.stem);
    }
}
