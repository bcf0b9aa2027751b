//! The sexagenary day cycle: heavenly stems, earthly branches, five elements.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::utils::TimeUtils;

/// Calibration anchor for the day cycle: 1900-01-01 (UTC) sits at sexagenary
/// position 36 (庚子). That date is day -25_567 relative to the Unix epoch, so
/// shifting epoch day counts by 25_567 + 36 lands every date on its cycle slot.
///
/// The anchor is the folk-calendar convention the rest of the scoring tables
/// were tuned against: an approximate heuristic, not validated against an
/// authoritative almanac.
const CYCLE_CALIBRATION_OFFSET: i64 = 25_567 + 36;

/// The five phases (오행). Both stems and branches collapse onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const COUNT: usize = 5;

    /// Hanja glyph (木火土金水).
    pub fn hanja(self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }

    /// The element this one produces in the mutual-generation cycle
    /// (wood→fire→earth→metal→water→wood).
    pub fn generates(self) -> Element {
        match self {
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
        }
    }

    /// The element this one suppresses in the mutual-control cycle
    /// (wood→earth, earth→water, water→fire, fire→metal, metal→wood).
    pub fn controls(self) -> Element {
        match self {
            Element::Wood => Element::Earth,
            Element::Earth => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Metal,
            Element::Metal => Element::Wood,
        }
    }
}

/// The ten heavenly stems (천간), in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

impl Stem {
    pub const COUNT: usize = 10;

    const ALL: [Stem; Self::COUNT] = [
        Stem::Gap,
        Stem::Eul,
        Stem::Byeong,
        Stem::Jeong,
        Stem::Mu,
        Stem::Gi,
        Stem::Gyeong,
        Stem::Sin,
        Stem::Im,
        Stem::Gye,
    ];

    const HANJA: [&'static str; Self::COUNT] =
        ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
    const HANGUL: [&'static str; Self::COUNT] =
        ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];

    /// Normalizes any integer into the 10-cycle (negative offsets included).
    pub fn from_index(index: i64) -> Stem {
        Self::ALL[index.rem_euclid(Self::COUNT as i64) as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn hanja(self) -> &'static str {
        Self::HANJA[self.index()]
    }

    pub fn hangul(self) -> &'static str {
        Self::HANGUL[self.index()]
    }

    /// Even-indexed stems carry yang polarity, odd-indexed yin.
    pub fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    pub fn element(self) -> Element {
        match self {
            Stem::Gap | Stem::Eul => Element::Wood,
            Stem::Byeong | Stem::Jeong => Element::Fire,
            Stem::Mu | Stem::Gi => Element::Earth,
            Stem::Gyeong | Stem::Sin => Element::Metal,
            Stem::Im | Stem::Gye => Element::Water,
        }
    }
}

/// The twelve earthly branches (지지), in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

impl Branch {
    pub const COUNT: usize = 12;

    const ALL: [Branch; Self::COUNT] = [
        Branch::Ja,
        Branch::Chuk,
        Branch::In,
        Branch::Myo,
        Branch::Jin,
        Branch::Sa,
        Branch::O,
        Branch::Mi,
        Branch::Sin,
        Branch::Yu,
        Branch::Sul,
        Branch::Hae,
    ];

    const HANJA: [&'static str; Self::COUNT] = [
        "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
    ];
    const HANGUL: [&'static str; Self::COUNT] = [
        "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
    ];

    /// Normalizes any integer into the 12-cycle (negative offsets included).
    pub fn from_index(index: i64) -> Branch {
        Self::ALL[index.rem_euclid(Self::COUNT as i64) as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn hanja(self) -> &'static str {
        Self::HANJA[self.index()]
    }

    pub fn hangul(self) -> &'static str {
        Self::HANGUL[self.index()]
    }

    /// 子/卯/午/酉, the four cardinal-direction branches, traditionally
    /// favorable days.
    pub fn is_cardinal(self) -> bool {
        matches!(self, Branch::Ja | Branch::Myo | Branch::O | Branch::Yu)
    }

    pub fn element(self) -> Element {
        match self {
            Branch::Ja | Branch::Hae => Element::Water,
            Branch::In | Branch::Myo => Element::Wood,
            Branch::Sa | Branch::O => Element::Fire,
            Branch::Sin | Branch::Yu => Element::Metal,
            Branch::Chuk | Branch::Jin | Branch::Mi | Branch::Sul => Element::Earth,
        }
    }
}

/// One position in the 60-cycle: a (stem, branch) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// The day pillar for a UTC-midnight timestamp.
    ///
    /// Callers normalize first (`utils::utc_midnight`); this stays a pure
    /// integer function so the same timestamp encodes identically on every
    /// host regardless of local timezone. Exact civil arithmetic: the day
    /// count is the euclidean quotient of epoch-ms, so leap years fall out of
    /// the calendar itself rather than a days-per-year approximation.
    pub fn for_day(day_ts: i64) -> Pillar {
        let days_since_epoch = day_ts.div_euclid(TimeUtils::MS_IN_D);
        let cycle_pos = days_since_epoch + CYCLE_CALIBRATION_OFFSET;
        Pillar {
            stem: Stem::from_index(cycle_pos),
            branch: Branch::from_index(cycle_pos),
        }
    }

    /// Hanja label, e.g. "庚子".
    pub fn label(&self) -> String {
        format!("{}{}", self.stem.hanja(), self.branch.hanja())
    }

    /// Hangul label, e.g. "경자".
    pub fn hangul_label(&self) -> String {
        format!("{}{}", self.stem.hangul(), self.branch.hangul())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{TimeUtils, ymd_to_epoch_ms};
    use pretty_assertions::assert_eq;

    #[test]
    fn indices_stay_in_range() {
        for offset in [-25_567, -1, 0, 1, 365, 146_097] {
            let pillar = Pillar::for_day(offset * TimeUtils::MS_IN_D);
            assert!(pillar.stem.index() < Stem::COUNT);
            assert!(pillar.branch.index() < Branch::COUNT);
        }
    }

    #[test]
    fn calibration_anchor_is_gyeongja() {
        // 1900-01-01 is the documented anchor: 경자 (庚子).
        let anchor = ymd_to_epoch_ms(1900, 1, 1).unwrap();
        let pillar = Pillar::for_day(anchor);
        assert_eq!(pillar.stem, Stem::Gyeong);
        assert_eq!(pillar.branch, Branch::Ja);
        assert_eq!(pillar.label(), "庚子");
        assert_eq!(pillar.hangul_label(), "경자");
    }

    #[test]
    fn sixty_day_periodicity() {
        let base = ymd_to_epoch_ms(2026, 8, 7).unwrap();
        let same = Pillar::for_day(base + 60 * TimeUtils::MS_IN_D);
        assert_eq!(Pillar::for_day(base), same);
        // and no shorter shared period
        let shifted = Pillar::for_day(base + 30 * TimeUtils::MS_IN_D);
        assert_ne!(Pillar::for_day(base), shifted);
    }

    #[test]
    fn consecutive_days_advance_both_wheels() {
        let base = ymd_to_epoch_ms(2000, 2, 28).unwrap();
        let a = Pillar::for_day(base);
        let b = Pillar::for_day(base + TimeUtils::MS_IN_D);
        assert_eq!(b.stem.index(), (a.stem.index() + 1) % Stem::COUNT);
        assert_eq!(b.branch.index(), (a.branch.index() + 1) % Branch::COUNT);
    }

    #[test]
    fn negative_indices_normalize() {
        assert_eq!(Stem::from_index(-1), Stem::Gye);
        assert_eq!(Branch::from_index(-1), Branch::Hae);
        assert_eq!(Stem::from_index(-10), Stem::Gap);
    }

    #[test]
    fn element_tables_match_the_classic_mapping() {
        assert_eq!(Stem::Gap.element(), Element::Wood);
        assert_eq!(Stem::Gyeong.element(), Element::Metal);
        assert_eq!(Branch::Ja.element(), Element::Water);
        assert_eq!(Branch::Sul.element(), Element::Earth);
        assert_eq!(Element::Water.generates(), Element::Wood);
        assert_eq!(Element::Metal.controls(), Element::Wood);
    }
}
