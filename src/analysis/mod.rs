// Day quality analysis
mod day_quality;

pub use day_quality::score_day;
