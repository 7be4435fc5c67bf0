use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use staycal_core::config::StayCalConfig;
use staycal_core::export::{ExportFormat, ExportSettings, export};
use staycal_core::source::JsonFileSource;
use tracing::debug;

pub async fn run(
    input: PathBuf,
    format: ExportFormat,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    name: Option<String>,
) -> Result<()> {
    let mut config = match config_path {
        Some(ref path) => StayCalConfig::load_from(path)?,
        None => StayCalConfig::load()?,
    };
    if name.is_some() {
        config.calendar_name = name;
    }

    let settings = ExportSettings {
        config,
        file_stem: file_stem(output.as_deref().unwrap_or(&input)),
        dtstamp: None,
    };

    debug!(input = %input.display(), format = %format, "Exporting reservations");
    let source = JsonFileSource::new(input);
    let export = export(&source, format, &settings).await?;

    for rejected in &export.rejected {
        eprintln!(
            "{} {}: {}",
            "skipped".yellow(),
            rejected.reservation_id,
            rejected.reason
        );
    }

    match output {
        Some(path) => {
            std::fs::write(&path, &export.body)
                .with_context(|| format!("Could not write {}", path.display()))?;
            eprintln!(
                "{} {} events to {} ({})",
                "Wrote".green(),
                export.event_count,
                path.display(),
                export.content_type
            );
        }
        None => {
            std::io::stdout().write_all(export.body.as_bytes())?;
        }
    }

    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("calendar")
        .to_string()
}
