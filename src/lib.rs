// Core modules
pub mod analysis;
pub mod config;
pub mod engine;
pub mod models;
pub mod saju;
pub mod utils;

// Re-export commonly used types outside of crate
pub use config::ScanConfig;
pub use engine::{ScanAggregator, ScanEngine, ScanStatus};
pub use models::{DayScore, Purpose, ScanWindow, Tier};
pub use saju::{BirthInfo, Gender, Pillar, SajuProfile};

// CLI argument parsing
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scan a date window for favorable days
    Scan(ScanArgs),
    /// Score the compatibility of two birth charts
    Compat(CompatArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth: String,

    /// Birth hour 0-23
    #[arg(long, default_value_t = 12)]
    pub hour: u32,

    #[arg(long, value_enum, default_value_t = Gender::Female)]
    pub gender: Gender,

    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Last day of the window, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,

    #[arg(long, value_enum, default_value_t = Purpose::General)]
    pub purpose: Purpose,

    /// Progress throttle override in milliseconds
    #[arg(long)]
    pub progress_interval_ms: Option<u64>,

    /// How many of the best days to print
    #[arg(long, default_value_t = 15)]
    pub top: usize,

    /// Emit JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompatArgs {
    /// First person's birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_a: String,

    #[arg(long, default_value_t = 12)]
    pub hour_a: u32,

    #[arg(long, value_enum, default_value_t = Gender::Female)]
    pub gender_a: Gender,

    /// Second person's birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_b: String,

    #[arg(long, default_value_t = 12)]
    pub hour_b: u32,

    #[arg(long, value_enum, default_value_t = Gender::Male)]
    pub gender_b: Gender,

    /// Emit JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
