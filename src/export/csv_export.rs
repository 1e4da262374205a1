//! CSV Export
//!
//! Writes experience cards to CSV files, one row per card.

use std::io::Write;
use std::path::Path;

use crate::domain::{ExperienceCard, Schedule, Timeline};

const HEADER: [&str; 13] = [
    "id",
    "title",
    "location",
    "price",
    "organizer",
    "creator",
    "start_time",
    "end_time",
    "participants",
    "max_participants",
    "canceled",
    "status",
    "timeline",
];

/// Write catalog cards to a CSV file
pub fn write_cards(path: &Path, cards: &[ExperienceCard]) -> Result<usize, Box<dyn std::error::Error>> {
    let wtr = csv::Writer::from_path(path)?;
    write_rows(wtr, cards.iter().map(|card| (card, None)))?;
    Ok(cards.len())
}

/// Write a user's schedule to a CSV file, upcoming rows first
pub fn write_schedule(
    path: &Path,
    schedule: &Schedule<ExperienceCard>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let wtr = csv::Writer::from_path(path)?;
    let rows = schedule
        .upcoming
        .iter()
        .map(|card| (card, Some(Timeline::Upcoming)))
        .chain(
            schedule
                .history
                .iter()
                .map(|card| (card, Some(Timeline::History))),
        );
    write_rows(wtr, rows)?;
    Ok(schedule.len())
}

fn write_rows<'a, W: Write>(
    mut wtr: csv::Writer<W>,
    rows: impl Iterator<Item = (&'a ExperienceCard, Option<Timeline>)>,
) -> Result<(), Box<dyn std::error::Error>> {
    wtr.write_record(HEADER)?;

    for (card, timeline) in rows {
        wtr.write_record([
            card.id.to_string(),
            card.title.clone(),
            card.location.clone(),
            card.price.clone(),
            card.organizer.clone(),
            card.creator.to_string(),
            card.start_time.to_string(),
            card.end_time.to_string(),
            card.participant_count.to_string(),
            card.max_participants.to_string(),
            card.canceled.to_string(),
            card.status.map(|s| s.to_string()).unwrap_or_default(),
            match timeline {
                Some(Timeline::Upcoming) => "upcoming".to_string(),
                Some(Timeline::History) => "history".to_string(),
                None => String::new(),
            },
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
