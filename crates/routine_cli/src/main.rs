//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `routine_core` linkage with a deterministic ping/version check.
//! - Optionally print today's summary for a routine database.

use chrono::Local;
use routine_core::db::open_db;
use routine_core::{
    EngineConfig, OccurrenceStatus, RoutineService, SqliteRoutineRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("routine_core ping={}", routine_core::ping());
    println!("routine_core version={}", routine_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match print_today(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("routine_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_today(db_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let repo = SqliteRoutineRepository::try_new(&conn)?;
    let service = RoutineService::load(repo, EngineConfig::default())?;
    let state = service.state();

    // The host samples the clock once; the engine only sees this value.
    let now = Local::now().naive_local();
    let summary = state.day_summary(now);
    println!(
        "today={} done={}/{} rate={}% streak={}",
        now.format("%A, %B %-d"),
        summary.completed,
        summary.total,
        summary.completion_percent,
        summary.streak
    );

    for item in state.today(now) {
        let status = match item.status {
            OccurrenceStatus::Done => "done".to_string(),
            OccurrenceStatus::Missed => "missed".to_string(),
            OccurrenceStatus::DueNow => "due now".to_string(),
            OccurrenceStatus::StartsIn { minutes } => format!("in {minutes} min"),
        };
        println!(
            "{} [{}] {} ({})",
            item.scheduled.format("%H:%M"),
            item.task.priority,
            item.task.title,
            status
        );
    }
    Ok(())
}
