//! Per-day desirability scoring: a cheap additive rule table, not astronomy.

use anyhow::{Context, Result};
use chrono::Weekday;

use crate::config::ScoringConfig;
use crate::models::{DayScore, Purpose};
use crate::saju::{Pillar, SajuProfile};
use crate::utils::civil_parts;

/// Score one day for one purpose. Never fails and never panics: this runs
/// inside a loop over hundreds of independent days, so an internal fault on
/// one day degrades to the neutral fallback instead of aborting the scan.
pub fn score_day(
    profile: &SajuProfile,
    day_ts: i64,
    purpose: Purpose,
    cfg: &ScoringConfig,
) -> DayScore {
    match try_score_day(profile, day_ts, purpose, cfg) {
        Ok(score) => score,
        Err(e) => {
            log::debug!("day scoring fault at ts {day_ts}: {e}");
            fallback_score(day_ts, cfg)
        }
    }
}

fn try_score_day(
    profile: &SajuProfile,
    day_ts: i64,
    purpose: Purpose,
    cfg: &ScoringConfig,
) -> Result<DayScore> {
    let (month, day_of_month, weekday) =
        civil_parts(day_ts).context("timestamp outside the representable calendar range")?;
    let pillar = Pillar::for_day(day_ts);

    let mut score = cfg.base_score;
    let mut reasons: Vec<String> = Vec::new();
    let mut hit = |points: i32, reason: &str| {
        score += points;
        reasons.push(reason.to_string());
    };

    // 1. Day-of-week vs purpose
    let weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
    if weekend {
        if purpose == Purpose::Wedding {
            hit(cfg.weekend_wedding, "weekend suits a wedding");
        }
    } else if matches!(purpose, Purpose::Business | Purpose::Contract) {
        hit(cfg.weekday_business, "weekday suits business");
    }

    // 2. Numerologically favorable day-of-month
    if matches!(day_of_month % 7, 1 | 3 | 6) {
        hit(cfg.auspicious_dom, "auspicious date");
    }

    // 3. Season
    if matches!(month, 5 | 6 | 9 | 10) {
        hit(cfg.favorable_season, "favorable season");
    }

    // 4. Purpose/season cross bonus
    match purpose {
        Purpose::Wedding if (4..=6).contains(&month) => {
            hit(cfg.wedding_season, "prime wedding season");
        }
        Purpose::Moving if (3..=5).contains(&month) || (9..=11).contains(&month) => {
            hit(cfg.moving_season, "prime moving season");
        }
        _ => {}
    }

    // 5. Day-pillar qualities
    if pillar.stem.is_yang() {
        hit(cfg.yang_stem, "yang energy day");
    }
    if pillar.branch.is_cardinal() {
        hit(cfg.cardinal_branch, "cardinal branch day");
    }

    // 6. Day element vs the chart's day master
    let day_element = pillar.stem.element();
    let master_element = profile.reference_stem().element();
    if day_element.generates() == master_element {
        hit(cfg.day_master_support, "day energy supports the day master");
    } else if day_element == master_element {
        hit(cfg.day_master_match, "day energy matches the day master");
    }

    let score = score.clamp(0, 100) as u8;
    reasons.truncate(3);

    Ok(DayScore {
        timestamp: day_ts,
        pillar,
        score,
        tier: cfg.tiers.classify(score),
        reasons,
    })
}

fn fallback_score(day_ts: i64, cfg: &ScoringConfig) -> DayScore {
    let score = cfg.base_score.clamp(0, 100) as u8;
    DayScore {
        timestamp: day_ts,
        pillar: Pillar::for_day(day_ts),
        score,
        tier: cfg.tiers.classify(score),
        reasons: vec!["analysis error".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tier;
    use crate::saju::{BirthInfo, Gender};
    use crate::utils::{TimeUtils, ymd_to_epoch_ms};
    use pretty_assertions::assert_eq;

    fn test_profile() -> SajuProfile {
        SajuProfile::from_birth(BirthInfo {
            year: 1990,
            month: 3,
            day: 15,
            hour: 8,
            gender: Gender::Female,
        })
        .unwrap()
    }

    fn cfg() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn weekend_wedding_bonus_is_the_only_purpose_delta_on_a_saturday() {
        // 2026-08-01 is a Saturday in month 8 (no season bonuses in play).
        let ts = ymd_to_epoch_ms(2026, 8, 1).unwrap();
        let profile = test_profile();
        let wedding = score_day(&profile, ts, Purpose::Wedding, &cfg());
        let general = score_day(&profile, ts, Purpose::General, &cfg());
        assert_eq!(
            i32::from(wedding.score) - i32::from(general.score),
            cfg().weekend_wedding
        );
        assert_eq!(wedding.reasons[0], "weekend suits a wedding");
    }

    #[test]
    fn weekday_bonus_applies_to_business_and_contract() {
        // 2026-08-03 is a Monday.
        let ts = ymd_to_epoch_ms(2026, 8, 3).unwrap();
        let profile = test_profile();
        let general = score_day(&profile, ts, Purpose::General, &cfg());
        for purpose in [Purpose::Business, Purpose::Contract] {
            let scored = score_day(&profile, ts, purpose, &cfg());
            assert_eq!(
                i32::from(scored.score) - i32::from(general.score),
                cfg().weekday_business
            );
        }
        // but not on a Sunday
        let sunday = ymd_to_epoch_ms(2026, 8, 2).unwrap();
        let scored = score_day(&profile, sunday, Purpose::Business, &cfg());
        let general = score_day(&profile, sunday, Purpose::General, &cfg());
        assert_eq!(scored.score, general.score);
    }

    #[test]
    fn reason_order_follows_rule_order_and_caps_at_three() {
        // 2026-05-02: Saturday, May -> weekend + favorable season + prime
        // wedding season fire first; pillar rules can only land beyond the cap.
        let ts = ymd_to_epoch_ms(2026, 5, 2).unwrap();
        let scored = score_day(&test_profile(), ts, Purpose::Wedding, &cfg());
        assert!(scored.reasons.len() <= 3);
        assert_eq!(scored.reasons[0], "weekend suits a wedding");
        assert_eq!(scored.reasons[1], "favorable season");
        assert_eq!(scored.reasons[2], "prime wedding season");
    }

    #[test]
    fn auspicious_day_of_month_residues() {
        let profile = test_profile();
        // 2026-02-03: dom 3 -> auspicious. 2026-02-04: dom 4 -> not.
        let hit = score_day(
            &profile,
            ymd_to_epoch_ms(2026, 2, 3).unwrap(),
            Purpose::General,
            &cfg(),
        );
        assert!(hit.reasons.contains(&"auspicious date".to_string()));
        let miss = score_day(
            &profile,
            ymd_to_epoch_ms(2026, 2, 4).unwrap(),
            Purpose::General,
            &cfg(),
        );
        assert!(!miss.reasons.contains(&"auspicious date".to_string()));
    }

    #[test]
    fn scores_stay_clamped_and_tiers_consistent_across_a_year() {
        let profile = test_profile();
        let start = ymd_to_epoch_ms(2026, 1, 1).unwrap();
        let table = cfg().tiers;
        for (offset, purpose) in (0..365).zip(
            [
                Purpose::Wedding,
                Purpose::Moving,
                Purpose::Business,
                Purpose::Contract,
                Purpose::General,
            ]
            .into_iter()
            .cycle(),
        ) {
            let scored = score_day(
                &profile,
                start + offset * TimeUtils::MS_IN_D,
                purpose,
                &cfg(),
            );
            assert!(scored.score <= 100);
            // only positive bonuses exist, so the base is a floor
            assert!(scored.score >= 50);
            assert_eq!(scored.tier, table.classify(scored.score));
            assert!(scored.reasons.len() <= 3);
        }
    }

    #[test]
    fn unrepresentable_timestamp_degrades_to_neutral_fallback() {
        let scored = score_day(&test_profile(), i64::MAX, Purpose::Wedding, &cfg());
        assert_eq!(scored.score, 50);
        assert_eq!(scored.tier, Tier::Neutral);
        assert_eq!(scored.reasons, vec!["analysis error".to_string()]);
    }

    #[test]
    fn scoring_is_deterministic() {
        let ts = ymd_to_epoch_ms(2026, 6, 6).unwrap();
        let profile = test_profile();
        let a = score_day(&profile, ts, Purpose::Moving, &cfg());
        let b = score_day(&profile, ts, Purpose::Moving, &cfg());
        assert_eq!(a, b);
    }
}
