//! In-memory ledger shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use nomad::infrastructure::ledger::LedgerResult;
use nomad::{Experience, ExperienceLedger, LedgerError, Marketplace, ReceiptSummary, ServiceOptions, UserProfile};

pub const ALICE: Address = Address::repeat_byte(0xa1);
pub const BOB: Address = Address::repeat_byte(0xb0);
pub const HOST: Address = Address::repeat_byte(0x11);

/// Ledger backed by maps; each read can be switched to fail
#[derive(Default)]
pub struct MemoryLedger {
    pub experiences: Vec<Experience>,
    pub participants: HashMap<u64, Vec<Address>>,
    pub join_requests: HashMap<u64, Vec<Address>>,
    pub approved: HashMap<Address, Vec<u64>>,
    pub requested: HashMap<Address, Vec<u64>>,
    pub profiles: HashMap<Address, UserProfile>,
    pub receipts: HashMap<B256, ReceiptSummary>,
    /// Experience ids whose detail read fails
    pub broken_experiences: HashSet<u64>,
    pub fail_count: bool,
    pub fail_participants: bool,
    pub fail_join_requests: bool,
    pub fail_approved: bool,
    pub fail_requested: bool,
    pub fail_profile: bool,
    pub fail_receipts: bool,
}

fn unreachable_node(method: &'static str) -> LedgerError {
    LedgerError::transport(method, "connection refused")
}

impl MemoryLedger {
    pub fn with_experiences(experiences: Vec<Experience>) -> Self {
        Self {
            experiences,
            ..Self::default()
        }
    }

    pub fn into_marketplace(self) -> Marketplace {
        Marketplace::new(Arc::new(self), ServiceOptions::default())
    }
}

#[async_trait::async_trait]
impl ExperienceLedger for MemoryLedger {
    async fn experience_count(&self) -> LedgerResult<u64> {
        if self.fail_count {
            return Err(unreachable_node("experienceCount()"));
        }
        Ok(self.experiences.len() as u64)
    }

    async fn experience(&self, id: u64) -> LedgerResult<Experience> {
        if self.broken_experiences.contains(&id) {
            return Err(unreachable_node("getExperience(uint256)"));
        }
        self.experiences
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| LedgerError::decode("getExperience(uint256)", "execution reverted"))
    }

    async fn join_requests(&self, id: u64) -> LedgerResult<Vec<Address>> {
        if self.fail_join_requests {
            return Err(unreachable_node("getJoinRequests(uint256)"));
        }
        Ok(self.join_requests.get(&id).cloned().unwrap_or_default())
    }

    async fn participants(&self, id: u64) -> LedgerResult<Vec<Address>> {
        if self.fail_participants {
            return Err(unreachable_node("getParticipants(uint256)"));
        }
        Ok(self.participants.get(&id).cloned().unwrap_or_default())
    }

    async fn user_approved_experiences(&self, user: Address) -> LedgerResult<Vec<u64>> {
        if self.fail_approved {
            return Err(unreachable_node("getUserApprovedExperiences(address)"));
        }
        Ok(self.approved.get(&user).cloned().unwrap_or_default())
    }

    async fn user_requested_experiences(&self, user: Address) -> LedgerResult<Vec<u64>> {
        if self.fail_requested {
            return Err(unreachable_node("getUserRequestedExperiences(address)"));
        }
        Ok(self.requested.get(&user).cloned().unwrap_or_default())
    }

    async fn profile(&self, user: Address) -> LedgerResult<UserProfile> {
        if self.fail_profile {
            return Err(unreachable_node("getProfile(address)"));
        }
        Ok(self.profiles.get(&user).copied().unwrap_or_default())
    }

    async fn transaction_receipt(&self, hash: B256) -> LedgerResult<Option<ReceiptSummary>> {
        if self.fail_receipts {
            return Err(unreachable_node("eth_getTransactionReceipt"));
        }
        Ok(self.receipts.get(&hash).copied())
    }

    async fn head_block(&self) -> LedgerResult<u64> {
        if self.fail_count {
            return Err(unreachable_node("eth_blockNumber"));
        }
        Ok(1_000)
    }

    fn endpoint_name(&self) -> String {
        "memory".to_string()
    }
}

pub fn experience(id: u64, title: &str, end_time: u64) -> Experience {
    Experience {
        id,
        creator: HOST,
        title: title.to_string(),
        description: format!("{title} with locals"),
        cover_image: String::new(),
        start_time: 1_700_000_000,
        end_time,
        location: "Lisbon".to_string(),
        price: U256::from(1_500_000_000_000_000_000u64),
        max_participants: 10,
        canceled: false,
        participant_count: 2,
    }
}

/// Four experiences; 0 and 1 ended at 1_000, 2 ends at 3_000, 3 is open-ended
pub fn sample_catalog() -> Vec<Experience> {
    vec![
        experience(0, "Surf lesson", 1_000),
        experience(1, "Pottery class", 1_000),
        experience(2, "Sunset hike", 3_000),
        experience(3, "Street food tour", 0),
    ]
}

pub fn receipt(success: bool) -> ReceiptSummary {
    ReceiptSummary {
        success,
        block_number: Some(12_345),
        block_hash: Some(B256::repeat_byte(0x42)),
        gas_used: 21_000,
    }
}
