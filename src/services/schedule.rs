//! A user's schedule: approved and requested experiences around "now"

use std::collections::HashMap;

use alloy_primitives::Address;
use tracing::{info, warn};

use super::{Fetch, Marketplace};
use crate::domain::{merge_experience_ids, partition, ExperienceCard, Schedule, ScheduleStatus};

impl Marketplace {
    /// Both id lists are read concurrently. Either one failing fails the
    /// schedule; an unreadable experience only drops that entry.
    pub async fn user_schedule(&self, user: Address, now: u64) -> Fetch<Schedule<ExperienceCard>> {
        let (approved, requested) = futures::join!(
            self.ledger.user_approved_experiences(user),
            self.ledger.user_requested_experiences(user),
        );

        let approved = match approved {
            Ok(ids) => ids,
            Err(err) => {
                warn!(%user, error = %err, "approved experiences unavailable");
                return Fetch::failed(err);
            }
        };
        let requested = match requested {
            Ok(ids) => ids,
            Err(err) => {
                warn!(%user, error = %err, "requested experiences unavailable");
                return Fetch::failed(err);
            }
        };

        let merged = merge_experience_ids(&approved, &requested);
        if merged.is_empty() {
            return Fetch::Empty;
        }

        let statuses: HashMap<u64, ScheduleStatus> =
            merged.iter().map(|entry| (entry.id, entry.status)).collect();
        let ids: Vec<u64> = merged.iter().map(|entry| entry.id).collect();
        let (experiences, skipped) = self.fetch_experiences(ids).await;
        if experiences.is_empty() {
            return Fetch::Failed(format!(
                "none of the {} scheduled experiences could be read",
                merged.len()
            ));
        }

        let cards = experiences
            .iter()
            .map(|experience| {
                let status = statuses
                    .get(&experience.id)
                    .copied()
                    .unwrap_or(ScheduleStatus::Pending);
                self.card(experience).with_status(status)
            })
            .collect();

        let schedule = partition(cards, now);
        info!(
            %user,
            upcoming = schedule.upcoming.len(),
            history = schedule.history.len(),
            skipped,
            "schedule loaded"
        );
        Fetch::Loaded(schedule)
    }
}
