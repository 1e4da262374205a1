//! Schedule shaping: merging a user's experience ids and splitting by time

use std::collections::HashSet;

use serde::Serialize;

use super::experience::ScheduleStatus;

/// Anything that carries an end timestamp (unix seconds, 0 when unset)
pub trait Timed {
    fn end_time(&self) -> u64;
}

/// Which side of "now" an experience falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeline {
    Upcoming,
    History,
}

impl Timeline {
    /// An unset end time (0) always counts as upcoming.
    pub fn classify(end_time: u64, now: u64) -> Self {
        if end_time == 0 || end_time > now {
            Timeline::Upcoming
        } else {
            Timeline::History
        }
    }
}

/// An id from the merged approved/requested lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedId {
    pub id: u64,
    pub status: ScheduleStatus,
}

/// Union of a user's approved and requested ids.
///
/// Each id appears once, approved ids first in their own order followed by
/// requested ids not seen yet. Approval wins over a pending request.
pub fn merge_experience_ids(approved: &[u64], requested: &[u64]) -> Vec<MergedId> {
    let approved_set: HashSet<u64> = approved.iter().copied().collect();
    let mut seen = HashSet::with_capacity(approved.len() + requested.len());

    approved
        .iter()
        .chain(requested.iter())
        .copied()
        .filter(|id| seen.insert(*id))
        .map(|id| MergedId {
            id,
            status: if approved_set.contains(&id) {
                ScheduleStatus::Approved
            } else {
                ScheduleStatus::Pending
            },
        })
        .collect()
}

/// Items split into upcoming and history
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule<T> {
    pub upcoming: Vec<T>,
    pub history: Vec<T>,
}

impl<T> Default for Schedule<T> {
    fn default() -> Self {
        Self {
            upcoming: Vec::new(),
            history: Vec::new(),
        }
    }
}

impl<T> Schedule<T> {
    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.history.is_empty()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len() + self.history.len()
    }

    /// Both sides, upcoming first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.upcoming.iter().chain(self.history.iter())
    }
}

/// Split `items` around `now`, keeping relative order on each side.
pub fn partition<T: Timed>(items: Vec<T>, now: u64) -> Schedule<T> {
    let mut schedule = Schedule::default();
    for item in items {
        match Timeline::classify(item.end_time(), now) {
            Timeline::Upcoming => schedule.upcoming.push(item),
            Timeline::History => schedule.history.push(item),
        }
    }
    schedule
}
