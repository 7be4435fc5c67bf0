use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use staycal_core::ics::parse_calendar;

pub fn run(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Could not read {}", file.display()))?;
    let events = parse_calendar(&content)?;

    if events.is_empty() {
        println!("{}", "No events".dimmed());
        return Ok(());
    }

    for event in &events {
        for day in event.days() {
            println!(
                "{}  {}  {}",
                day.format("%Y-%m-%d"),
                event.summary.replace('\n', " "),
                format!("({})", event.uid).dimmed()
            );
        }
    }

    Ok(())
}
