mod day_score;

pub use day_score::{DayScore, Purpose, ScanWindow, Tier};
