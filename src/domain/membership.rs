//! Membership classification against participant and join-request lists

use alloy_primitives::Address;

use super::experience::MembershipStatus;

/// Classify `user` for one experience.
///
/// Being a participant wins over having a pending join request. Addresses
/// compare by value, so hex casing never matters.
pub fn membership_status(
    participants: &[Address],
    join_requests: &[Address],
    user: &Address,
) -> MembershipStatus {
    if participants.contains(user) {
        MembershipStatus::Approved
    } else if join_requests.contains(user) {
        MembershipStatus::Requested
    } else {
        MembershipStatus::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const ALICE: Address = address!("0x1111111111111111111111111111111111111111");
    const BOB: Address = address!("0x2222222222222222222222222222222222222222");

    #[test]
    fn test_participant_is_approved_even_with_request() {
        assert_eq!(
            membership_status(&[ALICE], &[ALICE, BOB], &ALICE),
            MembershipStatus::Approved
        );
    }

    #[test]
    fn test_request_only_is_requested() {
        assert_eq!(
            membership_status(&[ALICE], &[BOB], &BOB),
            MembershipStatus::Requested
        );
    }

    #[test]
    fn test_unknown_user_is_none() {
        assert_eq!(membership_status(&[], &[], &ALICE), MembershipStatus::None);
    }

    #[test]
    fn test_mixed_case_input_matches() {
        let lower: Address = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse().unwrap();
        let upper: Address = "0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED".parse().unwrap();
        assert_eq!(
            membership_status(&[lower], &[], &upper),
            MembershipStatus::Approved
        );
    }
}
