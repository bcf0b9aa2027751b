use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::saju::Pillar;
use crate::utils::{day_span, epoch_ms_to_date_string, utc_midnight};

/// What the user wants the day for. Drives the purpose-specific scoring rules.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Wedding,
    Moving,
    Business,
    Contract,
    General,
}

/// Qualitative bucket for a day score, best to worst.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum Tier {
    #[strum(to_string = "great fortune")]
    GreatFortune,
    #[strum(to_string = "fortune")]
    Fortune,
    #[strum(to_string = "neutral")]
    Neutral,
    #[strum(to_string = "minor caution")]
    MinorCaution,
    #[strum(to_string = "caution")]
    Caution,
}

/// One scored calendar day. Plain owned data: the date is an integer
/// UTC-midnight timestamp so the value copies cleanly across the worker
/// boundary, and only the presentation layer turns it back into a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayScore {
    pub timestamp: i64,
    pub pillar: Pillar,
    pub score: u8,
    pub tier: Tier,
    /// At most 3 short justifications, in rule-evaluation order.
    pub reasons: Vec<String>,
}

impl DayScore {
    pub fn date_string(&self) -> String {
        epoch_ms_to_date_string(self.timestamp)
    }
}

/// A scan request window. Timestamps are normalized to UTC midnight on
/// construction; the enumerated span is capped by the engine's span ceiling,
/// never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWindow {
    pub start_ts: i64,
    pub end_ts: i64,
    pub purpose: Purpose,
}

impl ScanWindow {
    pub fn new(start_ts: i64, end_ts: i64, purpose: Purpose) -> Self {
        Self {
            start_ts: utc_midnight(start_ts),
            end_ts: utc_midnight(end_ts),
            purpose,
        }
    }

    /// Rejects inverted windows before any session is created.
    pub fn validate(&self) -> Result<()> {
        if self.end_ts < self.start_ts {
            bail!(
                "scan window ends before it starts ({} > {})",
                epoch_ms_to_date_string(self.start_ts),
                epoch_ms_to_date_string(self.end_ts)
            );
        }
        Ok(())
    }

    /// Inclusive day count, before the span ceiling is applied.
    pub fn total_days(&self) -> i64 {
        day_span(self.start_ts, self.end_ts)
    }
}
