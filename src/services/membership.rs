//! Membership status of a user for one experience

use alloy_primitives::Address;
use tracing::warn;

use super::{Fetch, Marketplace};
use crate::domain::{membership_status, MembershipStatus};

impl Marketplace {
    /// Participants are read first; join requests only when the user is not
    /// already approved.
    pub async fn user_status(&self, id: u64, user: Address) -> Fetch<MembershipStatus> {
        let participants = match self.ledger.participants(id).await {
            Ok(participants) => participants,
            Err(err) => {
                warn!(experience_id = id, %user, error = %err, "participant list unavailable");
                return Fetch::failed(err);
            }
        };

        if participants.contains(&user) {
            return Fetch::Loaded(MembershipStatus::Approved);
        }

        let join_requests = match self.ledger.join_requests(id).await {
            Ok(requests) => requests,
            Err(err) => {
                warn!(experience_id = id, %user, error = %err, "join request list unavailable");
                return Fetch::failed(err);
            }
        };

        Fetch::Loaded(membership_status(&participants, &join_requests, &user))
    }
}
