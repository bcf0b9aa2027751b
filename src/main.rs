use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use tabled::{Table, Tabled};

use good_days::saju::{CompatibilityReport, score_pair};
use good_days::utils::{TimeUtils, parse_date_arg};
use good_days::{
    BirthInfo, Cli, Command, CompatArgs, Gender, ScanArgs, ScanEngine, ScanStatus, ScanWindow,
};

fn main() -> Result<()> {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, global_level)
        .filter(Some("good_days"), my_code_level)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Scan(args) => run_scan(&args),
        Command::Compat(args) => run_compat(&args),
    }
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Pillar")]
    pillar: String,
    #[tabled(rename = "Score")]
    score: u8,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Reasons")]
    reasons: String,
}

fn run_scan(args: &ScanArgs) -> Result<()> {
    let profile = profile_from_args(&args.birth, args.hour, args.gender)?;
    let window = ScanWindow::new(
        parse_date_arg(&args.from)?,
        parse_date_arg(&args.to)?,
        args.purpose,
    );

    let mut engine = ScanEngine::with_defaults().context("could not start the scan engine")?;
    engine.start_with_interval(profile, window, args.progress_interval_ms)?;

    let mut last_percent = 0u8;
    let status = engine.run_to_completion(|agg| {
        if agg.percent != last_percent {
            log::info!("scan progress: {}/{} days ({}%)", agg.done, agg.total, agg.percent);
            last_percent = agg.percent;
        }
    });

    if status != ScanStatus::Completed {
        bail!("scan ended without completing ({status})");
    }

    let best = engine.aggregator.top(args.top);
    if args.json {
        println!("{}", serde_json::to_string_pretty(best)?);
        return Ok(());
    }

    println!(
        "Scanned {} day(s) for '{}'. Top {}:",
        engine.aggregator.done,
        args.purpose,
        best.len()
    );
    let rows: Vec<DayRow> = best
        .iter()
        .map(|d| DayRow {
            date: d.date_string(),
            pillar: format!("{} ({})", d.pillar.label(), d.pillar.hangul_label()),
            score: d.score,
            tier: d.tier.to_string(),
            reasons: d.reasons.join("; "),
        })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

#[derive(Tabled)]
struct CompatRow {
    #[tabled(rename = "Axis")]
    axis: &'static str,
    #[tabled(rename = "Score")]
    score: u8,
}

fn run_compat(args: &CompatArgs) -> Result<()> {
    let a = profile_from_args(&args.birth_a, args.hour_a, args.gender_a)?;
    let b = profile_from_args(&args.birth_b, args.hour_b, args.gender_b)?;
    let report = score_pair(&a, &b);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_compat(&report);
    Ok(())
}

fn print_compat(report: &CompatibilityReport) {
    println!(
        "Day masters {} and {} in {} (chart harmony {} / {})",
        report.element_a.hanja(),
        report.element_b.hanja(),
        report.relation,
        report.harmony_a,
        report.harmony_b
    );
    let rows = vec![
        CompatRow {
            axis: "overall",
            score: report.scores.overall,
        },
        CompatRow {
            axis: "love",
            score: report.scores.love,
        },
        CompatRow {
            axis: "marriage",
            score: report.scores.marriage,
        },
        CompatRow {
            axis: "business",
            score: report.scores.business,
        },
        CompatRow {
            axis: "friendship",
            score: report.scores.friendship,
        },
    ];
    println!("{}", Table::new(rows));
}

fn profile_from_args(birth: &str, hour: u32, gender: Gender) -> Result<good_days::SajuProfile> {
    let date = NaiveDate::parse_from_str(birth, TimeUtils::STANDARD_TIME_FORMAT)
        .with_context(|| format!("invalid birth date '{birth}', expected YYYY-MM-DD"))?;
    good_days::SajuProfile::from_birth(BirthInfo {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        hour,
        gender,
    })
}
