//! Profile hub reads

use alloy_primitives::Address;
use tracing::warn;

use super::{Fetch, Marketplace};
use crate::domain::{ProfileSummary, UserProfile};

impl Marketplace {
    /// `Empty` for an address the hub has never seen
    pub async fn user_profile(&self, user: Address) -> Fetch<UserProfile> {
        match self.ledger.profile(user).await {
            Ok(profile) if profile.exists => Fetch::Loaded(profile),
            Ok(_) => Fetch::Empty,
            Err(err) => {
                warn!(%user, error = %err, "profile unavailable");
                Fetch::failed(err)
            }
        }
    }

    /// Profile counters plus figures derived from the approved list.
    ///
    /// Either read may fail on its own: an unreadable profile counts as the
    /// default profile and an unreadable approved list as zero. Only when
    /// both fail is the summary `Failed`.
    pub async fn profile_summary(&self, user: Address) -> Fetch<ProfileSummary> {
        let (profile, approved) = futures::join!(
            self.ledger.profile(user),
            self.ledger.user_approved_experiences(user),
        );

        match (profile, approved) {
            (Err(profile_err), Err(approved_err)) => {
                warn!(%user, error = %profile_err, "profile unavailable");
                warn!(%user, error = %approved_err, "approved experiences unavailable");
                Fetch::failed(profile_err)
            }
            (profile, approved) => {
                let profile = profile.unwrap_or_else(|err| {
                    warn!(%user, error = %err, "profile unavailable, using defaults");
                    UserProfile::default()
                });
                let approved_count = approved.map(|ids| ids.len()).unwrap_or_else(|err| {
                    warn!(%user, error = %err, "approved experiences unavailable");
                    0
                });
                Fetch::Loaded(ProfileSummary::new(profile, approved_count))
            }
        }
    }
}
