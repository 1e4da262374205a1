//! Marketplace reads end to end against an in-memory ledger

mod common;

use std::time::Duration;

use alloy_primitives::{Address, B256};
use common::*;
use nomad::domain::ScheduleStatus;
use nomad::services::{ConfirmationError, ConfirmationStatus};
use nomad::{Fetch, MembershipStatus, UserProfile};

#[tokio::test]
async fn test_catalog_lists_every_experience_in_id_order() {
    let marketplace = MemoryLedger::with_experiences(sample_catalog()).into_marketplace();

    let cards = marketplace.catalog_cards(None).await;
    let cards = cards.loaded().expect("catalog should load");
    let ids: Vec<u64> = cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);

    let first = &cards[0];
    assert_eq!(first.price, "$1.5");
    assert_eq!(first.organizer, "0x1111...1111");
    assert!(first.image.starts_with("https://images.unsplash.com/"));
}

#[tokio::test]
async fn test_empty_registry_is_empty_not_failed() {
    let marketplace = MemoryLedger::default().into_marketplace();
    assert_eq!(marketplace.catalog_cards(None).await, Fetch::Empty);
}

#[tokio::test]
async fn test_unreadable_count_fails_the_catalog() {
    let ledger = MemoryLedger {
        fail_count: true,
        ..MemoryLedger::with_experiences(sample_catalog())
    };
    let cards = ledger.into_marketplace().catalog_cards(None).await;
    assert!(cards.is_failed());
    assert!(cards.error().unwrap().contains("experienceCount"));
    assert!(cards.into_value_or_default().is_empty());
}

#[tokio::test]
async fn test_one_unreadable_experience_keeps_the_rest() {
    let ledger = MemoryLedger {
        broken_experiences: [2].into_iter().collect(),
        ..MemoryLedger::with_experiences(sample_catalog())
    };
    let experiences = ledger.into_marketplace().all_experiences().await;
    let ids: Vec<u64> = experiences
        .into_value_or_default()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![0, 1, 3]);
}

#[tokio::test]
async fn test_all_experiences_unreadable_is_failed() {
    let ledger = MemoryLedger {
        broken_experiences: [0, 1, 2, 3].into_iter().collect(),
        ..MemoryLedger::with_experiences(sample_catalog())
    };
    let experiences = ledger.into_marketplace().all_experiences().await;
    assert_eq!(
        experiences.error(),
        Some("none of the 4 listed experiences could be read")
    );
}

#[tokio::test]
async fn test_search_matches_title_and_description() {
    let marketplace = MemoryLedger::with_experiences(sample_catalog()).into_marketplace();

    let by_title = marketplace.catalog_cards(Some("HIKE")).await.into_value_or_default();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].id, 2);

    let by_description = marketplace
        .catalog_cards(Some("with locals"))
        .await
        .into_value_or_default();
    assert_eq!(by_description.len(), 4);

    let nothing = marketplace.catalog_cards(Some("skydiving")).await;
    assert_eq!(nothing, Fetch::Loaded(Vec::new()));
}

#[tokio::test]
async fn test_participant_is_approved() {
    let mut ledger = MemoryLedger::with_experiences(sample_catalog());
    ledger.participants.insert(3, vec![BOB, ALICE]);
    ledger.join_requests.insert(3, vec![ALICE]);
    ledger.join_requests.insert(2, vec![ALICE]);
    let marketplace = ledger.into_marketplace();

    assert_eq!(
        marketplace.user_status(3, ALICE).await,
        Fetch::Loaded(MembershipStatus::Approved)
    );
    assert_eq!(
        marketplace.user_status(2, ALICE).await,
        Fetch::Loaded(MembershipStatus::Requested)
    );
    assert_eq!(
        marketplace.user_status(1, ALICE).await,
        Fetch::Loaded(MembershipStatus::None)
    );
}

#[tokio::test]
async fn test_status_read_failure_degrades_to_none() {
    let ledger = MemoryLedger {
        fail_join_requests: true,
        ..MemoryLedger::with_experiences(sample_catalog())
    };
    let status = ledger.into_marketplace().user_status(1, ALICE).await;
    assert!(status.is_failed());
    assert_eq!(status.into_value_or_default(), MembershipStatus::None);
}

#[tokio::test]
async fn test_schedule_merges_and_splits_around_now() {
    let mut ledger = MemoryLedger::with_experiences(sample_catalog());
    ledger.approved.insert(ALICE, vec![1, 2]);
    ledger.requested.insert(ALICE, vec![2, 3]);

    let schedule = ledger
        .into_marketplace()
        .user_schedule(ALICE, 2_000)
        .await
        .loaded()
        .expect("schedule should load");

    let upcoming: Vec<(u64, Option<ScheduleStatus>)> =
        schedule.upcoming.iter().map(|c| (c.id, c.status)).collect();
    assert_eq!(
        upcoming,
        vec![
            (2, Some(ScheduleStatus::Approved)),
            (3, Some(ScheduleStatus::Pending)),
        ]
    );

    let history: Vec<(u64, Option<ScheduleStatus>)> =
        schedule.history.iter().map(|c| (c.id, c.status)).collect();
    assert_eq!(history, vec![(1, Some(ScheduleStatus::Approved))]);
}

#[tokio::test]
async fn test_schedule_without_memberships_is_empty() {
    let marketplace = MemoryLedger::with_experiences(sample_catalog()).into_marketplace();
    assert_eq!(marketplace.user_schedule(BOB, 2_000).await, Fetch::Empty);
}

#[tokio::test]
async fn test_schedule_skips_unreadable_experience() {
    let mut ledger = MemoryLedger {
        broken_experiences: [2].into_iter().collect(),
        ..MemoryLedger::with_experiences(sample_catalog())
    };
    ledger.approved.insert(ALICE, vec![1, 2]);
    ledger.requested.insert(ALICE, vec![3]);

    let schedule = ledger
        .into_marketplace()
        .user_schedule(ALICE, 2_000)
        .await
        .loaded()
        .expect("the readable entries should load");

    let upcoming: Vec<(u64, Option<ScheduleStatus>)> =
        schedule.upcoming.iter().map(|c| (c.id, c.status)).collect();
    assert_eq!(upcoming, vec![(3, Some(ScheduleStatus::Pending))]);

    let history: Vec<(u64, Option<ScheduleStatus>)> =
        schedule.history.iter().map(|c| (c.id, c.status)).collect();
    assert_eq!(history, vec![(1, Some(ScheduleStatus::Approved))]);
}

#[tokio::test]
async fn test_schedule_fails_when_a_list_is_unreadable() {
    let mut ledger = MemoryLedger::with_experiences(sample_catalog());
    ledger.approved.insert(ALICE, vec![1]);
    ledger.fail_requested = true;

    let schedule = ledger.into_marketplace().user_schedule(ALICE, 2_000).await;
    assert!(schedule.is_failed());
    assert!(schedule.into_value_or_default().is_empty());
}

#[tokio::test]
async fn test_profile_summary_estimates_people_met() {
    let mut ledger = MemoryLedger::with_experiences(sample_catalog());
    ledger.profiles.insert(
        ALICE,
        UserProfile {
            exists: true,
            hosted_count: 1,
            attended_count: 4,
            last_joined_timestamp: 1_700_000_000,
            last_hosted_timestamp: 0,
        },
    );
    ledger.approved.insert(ALICE, vec![0, 1]);

    let summary = ledger
        .into_marketplace()
        .profile_summary(ALICE)
        .await
        .loaded()
        .expect("summary should load");
    assert_eq!(summary.experiences_count, 4);
    assert_eq!(summary.people_met_estimate, 12);
}

#[tokio::test]
async fn test_profile_failure_falls_back_to_zeroes() {
    let ledger = MemoryLedger {
        fail_profile: true,
        ..MemoryLedger::default()
    };
    let marketplace = ledger.into_marketplace();

    assert!(marketplace.user_profile(ALICE).await.is_failed());
    let summary = marketplace.profile_summary(ALICE).await.into_value_or_default();
    assert!(!summary.profile.exists);
    assert_eq!(summary.experiences_count, 0);
    assert_eq!(summary.people_met_estimate, 0);
}

#[tokio::test]
async fn test_profile_failure_still_counts_approved_experiences() {
    let mut ledger = MemoryLedger {
        fail_profile: true,
        ..MemoryLedger::with_experiences(sample_catalog())
    };
    ledger.approved.insert(ALICE, vec![1, 2]);

    let summary = ledger.into_marketplace().profile_summary(ALICE).await;
    let summary = summary.loaded().expect("summary should load without a profile");
    assert!(!summary.profile.exists);
    assert_eq!(summary.experiences_count, 2);
    assert_eq!(summary.people_met_estimate, 0);
}

#[tokio::test]
async fn test_profile_summary_fails_when_both_reads_fail() {
    let ledger = MemoryLedger {
        fail_profile: true,
        fail_approved: true,
        ..MemoryLedger::default()
    };
    let summary = ledger.into_marketplace().profile_summary(ALICE).await;
    assert!(summary.is_failed());
    assert_eq!(summary.into_value_or_default().experiences_count, 0);
}

#[tokio::test]
async fn test_unknown_profile_is_empty() {
    let marketplace = MemoryLedger::default().into_marketplace();
    assert_eq!(marketplace.user_profile(BOB).await, Fetch::Empty);
}

#[tokio::test]
async fn test_unmined_transaction_is_pending() {
    let marketplace = MemoryLedger::default().into_marketplace();
    let hash = format!("{}", B256::repeat_byte(0x07));

    let confirmation = marketplace.check_transaction(&hash).await.unwrap();
    assert_eq!(confirmation.status, ConfirmationStatus::Pending);
    assert_eq!(
        confirmation.message.as_deref(),
        Some("Transaction not yet confirmed")
    );
    assert!(confirmation.block_number.is_none());
}

#[tokio::test]
async fn test_reverted_transaction_is_failed() {
    let hash = B256::repeat_byte(0x08);
    let mut ledger = MemoryLedger::default();
    ledger.receipts.insert(hash, receipt(false));

    let confirmation = ledger
        .into_marketplace()
        .check_transaction(&hash.to_string())
        .await
        .unwrap();
    assert_eq!(confirmation.status, ConfirmationStatus::Failed);
    assert_eq!(confirmation.block_number, Some(12_345));
    assert_eq!(confirmation.gas_used.as_deref(), Some("21000"));
    assert!(confirmation.timestamp.is_some());
}

#[tokio::test]
async fn test_receipt_lookup_failure_is_an_error() {
    let ledger = MemoryLedger {
        fail_receipts: true,
        ..MemoryLedger::default()
    };
    let result = ledger
        .into_marketplace()
        .check_transaction(&B256::repeat_byte(0x09).to_string())
        .await;
    assert!(matches!(result, Err(ConfirmationError::Ledger(_))));
}

#[tokio::test]
async fn test_wait_stops_after_max_attempts() {
    let marketplace = MemoryLedger::default().into_marketplace();
    let confirmation = marketplace
        .wait_for_transaction(
            &B256::repeat_byte(0x0a).to_string(),
            Duration::from_millis(1),
            3,
        )
        .await
        .unwrap();
    assert_eq!(confirmation.status, ConfirmationStatus::Pending);
}

#[tokio::test]
async fn test_wait_returns_once_confirmed() {
    let hash = B256::repeat_byte(0x0b);
    let mut ledger = MemoryLedger::default();
    ledger.receipts.insert(hash, receipt(true));

    let confirmation = ledger
        .into_marketplace()
        .wait_for_transaction(&hash.to_string(), Duration::from_secs(60), 10)
        .await
        .unwrap();
    assert_eq!(confirmation.status, ConfirmationStatus::Confirmed);
    assert_eq!(confirmation.block_hash, Some(B256::repeat_byte(0x42)));
}

#[test]
fn test_zero_address_has_no_memberships() {
    assert_eq!(
        nomad::domain::membership_status(&[ALICE], &[BOB], &Address::ZERO),
        MembershipStatus::None
    );
}

fn assert_send<T: Send>(_: T) {}

#[test]
fn test_read_futures_are_send() {
    let marketplace = MemoryLedger::with_experiences(sample_catalog()).into_marketplace();
    assert_send(marketplace.user_schedule(ALICE, 2_000));
    assert_send(marketplace.catalog_cards(Some("hike")));
    assert_send(marketplace.profile_summary(ALICE));
}
