//! rota-runner: headless daily substitution schedule runner.
//!
//! Usage:
//!   rota-runner --date 2026-01-12 --data-dir ./data
//!   rota-runner --date today --seed 7 --json
//!   rota-runner --date 2026-01-12 --config rota.json --accept

use anyhow::{bail, Context, Result};
use rota_core::{
    compose::render_announcements,
    config::GeneratorConfig,
    engine::{GenerationOutcome, ScheduleGenerator},
    store::JsonStore,
    writeback::{accept_schedule, AcceptanceSummary},
    TargetDay,
};
use std::env;

#[derive(serde::Serialize)]
struct RunReport<'a> {
    outcome:    &'a GenerationOutcome,
    accepted:   Option<&'a AcceptanceSummary>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = flag_value(&args, "--data-dir").unwrap_or("./data");
    let Some(date) = flag_value(&args, "--date") else {
        bail!("--date YYYY-MM-DD (or 'today') is required");
    };
    let accept = args.iter().any(|a| a == "--accept");
    let json = args.iter().any(|a| a == "--json");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None       => GeneratorConfig::default(),
    };
    let default_seed = config.seed;
    config = config.with_seed(parse_arg(&args, "--seed", default_seed));

    let day = resolve_day(date)?;
    let store = JsonStore::open(data_dir);
    let mut snapshot = store
        .load_snapshot()
        .with_context(|| format!("loading master records from {data_dir}"))?;

    if !json {
        println!("rota-runner");
        println!("  date:      {day}");
        println!("  seed:      {}", config.seed);
        println!("  data_dir:  {data_dir}");
        println!();
    }

    let outcome = ScheduleGenerator::build(&snapshot, config).generate(day)?;

    let accepted = if accept {
        let summary = accept_schedule(&mut snapshot.staff, &outcome);
        store.save_staff(&snapshot.staff)?;
        log::info!("date={} staff records written to {data_dir}", day.date);
        Some(summary)
    } else {
        None
    };

    if json {
        let report = RunReport { outcome: &outcome, accepted: accepted.as_ref() };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&snapshot, &outcome, accepted.as_ref());
    }
    Ok(())
}

fn print_summary(
    snapshot: &rota_core::Snapshot,
    outcome:  &GenerationOutcome,
    accepted: Option<&AcceptanceSummary>,
) {
    let announcements = render_announcements(snapshot, &outcome.schedule);
    if announcements.is_empty() {
        println!("(No substitutions needed)");
    } else {
        println!("{announcements}");
    }

    println!();
    println!("=== RUN SUMMARY ===");
    println!("  run_id:       {}", outcome.run_id);
    println!("  present:      {}", outcome.presence.present.len());
    println!("  excluded:     {}", outcome.presence.excluded.len());
    println!("  substitutes:  {}", outcome.schedule.substitutes().count());
    println!("  cleaning:     {}", outcome.schedule.cleaning_overtime.len());
    for (location_id, missing) in outcome.unresolved_deficits() {
        println!("  UNCOVERED:    {} short by {missing}", snapshot.location_name(location_id));
    }
    match accepted {
        Some(summary) => println!(
            "  accepted:     {} substitutes marked, {} overtime records",
            summary.substitutes_marked.len(),
            summary.overtime_added.len()
        ),
        None => println!("  accepted:     no (pass --accept to update staff records)"),
    }
}

fn resolve_day(raw: &str) -> Result<TargetDay> {
    if raw == "today" {
        return Ok(TargetDay::new(chrono::Local::now().date_naive()));
    }
    Ok(TargetDay::parse(raw)?)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
