//! Catalog reads: every listed experience, one experience, search

use tracing::{debug, info, warn};

use super::{Fetch, Marketplace};
use crate::domain::{filter_cards, Experience, ExperienceCard};

impl Marketplace {
    /// Every experience in the registry, in id order.
    ///
    /// `Empty` when nothing is listed, `Failed` when the count cannot be read
    /// or none of the listed experiences can.
    pub async fn all_experiences(&self) -> Fetch<Vec<Experience>> {
        let count = match self.ledger.experience_count().await {
            Ok(count) => count,
            Err(err) => {
                warn!(error = %err, "experience count unavailable");
                return Fetch::failed(err);
            }
        };

        if count == 0 {
            debug!("no experiences listed");
            return Fetch::Empty;
        }

        let (experiences, skipped) = self.fetch_experiences((0..count).collect()).await;
        if experiences.is_empty() {
            return Fetch::Failed(format!("none of the {count} listed experiences could be read"));
        }

        info!(count, fetched = experiences.len(), skipped, "catalog loaded");
        Fetch::Loaded(experiences)
    }

    /// Catalog as cards, narrowed by an optional free-text query
    pub async fn catalog_cards(&self, query: Option<&str>) -> Fetch<Vec<ExperienceCard>> {
        self.all_experiences().await.map(|experiences| {
            let cards = experiences.iter().map(|e| self.card(e)).collect();
            filter_cards(cards, query.unwrap_or_default())
        })
    }

    pub async fn experience(&self, id: u64) -> Fetch<Experience> {
        match self.ledger.experience(id).await {
            Ok(experience) => Fetch::Loaded(experience),
            Err(err) => {
                warn!(experience_id = id, error = %err, "experience unavailable");
                Fetch::failed(err)
            }
        }
    }

    pub async fn experience_card(&self, id: u64) -> Fetch<ExperienceCard> {
        self.experience(id).await.map(|experience| self.card(&experience))
    }
}
