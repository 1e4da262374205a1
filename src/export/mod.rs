//! Export Module
//!
//! Writes catalog cards and user schedules to disk.
//!
//! - CSV: one row per card, schedules carry an extra timeline column
//! - JSON: the same payload the read API serves
//! - Files default to the platform data dir under `exports/`

mod csv_export;
mod json_export;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use directories::ProjectDirs;

use crate::domain::{ExperienceCard, Schedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Get the export directory path, creating it if needed
fn get_export_dir() -> std::io::Result<PathBuf> {
    let export_dir = ProjectDirs::from("app", "nomad", "nomad")
        .map(|dirs| dirs.data_dir().join("exports"))
        .unwrap_or_else(|| PathBuf::from(".nomad").join("exports"));
    fs::create_dir_all(&export_dir)?;
    Ok(export_dir)
}

/// Generate a timestamped filename
fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

fn resolve_path(out: Option<PathBuf>, prefix: &str, format: ExportFormat) -> Result<PathBuf> {
    match out {
        Some(path) => Ok(path),
        None => {
            let dir = get_export_dir().context("Failed to create export directory")?;
            Ok(dir.join(generate_filename(prefix, format.extension())))
        }
    }
}

/// Export catalog cards; returns where they went and how many were written
pub fn export_cards(
    cards: &[ExperienceCard],
    format: ExportFormat,
    out: Option<PathBuf>,
) -> Result<(PathBuf, usize)> {
    let path = resolve_path(out, "experiences", format)?;
    let count = match format {
        ExportFormat::Csv => csv_export::write_cards(&path, cards),
        ExportFormat::Json => json_export::write_json(&path, &cards).map(|_| cards.len()),
    }
    .map_err(|err| export_failed(&path, err))?;
    Ok((path, count))
}

/// Export a user's schedule; returns where it went and how many rows
pub fn export_schedule(
    schedule: &Schedule<ExperienceCard>,
    format: ExportFormat,
    out: Option<PathBuf>,
) -> Result<(PathBuf, usize)> {
    let path = resolve_path(out, "schedule", format)?;
    let count = match format {
        ExportFormat::Csv => csv_export::write_schedule(&path, schedule),
        ExportFormat::Json => json_export::write_json(&path, schedule).map(|_| schedule.len()),
    }
    .map_err(|err| export_failed(&path, err))?;
    Ok((path, count))
}

fn export_failed(path: &Path, err: Box<dyn std::error::Error>) -> anyhow::Error {
    anyhow!("Export to {} failed: {}", path.display(), err)
}
