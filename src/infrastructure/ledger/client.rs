//! Typed contract reads over an [`EthereumProvider`]

use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::rpc::types::TransactionRequest;
use alloy_sol_types::SolCall;

use super::bindings::{INomaProfileHub, INomadExperience};
use super::error::{LedgerError, LedgerResult};
use crate::domain::{Experience, UserProfile};
use crate::infrastructure::ethereum::EthereumProvider;

/// What the confirmation check needs from a mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub success: bool,
    pub block_number: Option<u64>,
    pub block_hash: Option<B256>,
    pub gas_used: u64,
}

/// Read access to the experience registry and the profile hub.
///
/// Every call is an independent, side-effect-free query.
#[async_trait::async_trait]
pub trait ExperienceLedger: Send + Sync + 'static {
    /// Number of experiences ever created; ids run from 0 to count - 1
    async fn experience_count(&self) -> LedgerResult<u64>;

    async fn experience(&self, id: u64) -> LedgerResult<Experience>;

    /// Addresses with a pending join request
    async fn join_requests(&self, id: u64) -> LedgerResult<Vec<Address>>;

    /// Approved participants
    async fn participants(&self, id: u64) -> LedgerResult<Vec<Address>>;

    async fn user_approved_experiences(&self, user: Address) -> LedgerResult<Vec<u64>>;

    async fn user_requested_experiences(&self, user: Address) -> LedgerResult<Vec<u64>>;

    async fn profile(&self, user: Address) -> LedgerResult<UserProfile>;

    /// `None` while the transaction is not mined
    async fn transaction_receipt(&self, hash: B256) -> LedgerResult<Option<ReceiptSummary>>;

    async fn head_block(&self) -> LedgerResult<u64>;

    fn endpoint_name(&self) -> String;
}

/// [`ExperienceLedger`] backed by `eth_call` against the two contracts
pub struct ContractLedger {
    provider: Box<dyn EthereumProvider>,
    experience_contract: Address,
    profile_hub: Address,
}

impl ContractLedger {
    pub fn new(
        provider: Box<dyn EthereumProvider>,
        experience_contract: Address,
        profile_hub: Address,
    ) -> Self {
        Self {
            provider,
            experience_contract,
            profile_hub,
        }
    }

    async fn read<C: SolCall>(&self, to: Address, call: C) -> LedgerResult<C::Return> {
        let request = TransactionRequest::default()
            .to(to)
            .input(Bytes::from(call.abi_encode()).into());

        let data = self
            .provider
            .call(request)
            .await
            .map_err(|err| LedgerError::transport(C::SIGNATURE, format!("{err:#}")))?;

        C::abi_decode_returns(&data).map_err(|err| LedgerError::decode(C::SIGNATURE, err))
    }
}

#[async_trait::async_trait]
impl ExperienceLedger for ContractLedger {
    async fn experience_count(&self) -> LedgerResult<u64> {
        let count = self
            .read(
                self.experience_contract,
                INomadExperience::experienceCountCall {},
            )
            .await?;
        Ok(saturating_u64(count))
    }

    async fn experience(&self, id: u64) -> LedgerResult<Experience> {
        let raw = self
            .read(
                self.experience_contract,
                INomadExperience::getExperienceCall {
                    experienceId: U256::from(id),
                },
            )
            .await?;

        Ok(Experience {
            id,
            creator: raw.creator,
            title: raw.title,
            description: raw.description,
            cover_image: raw.coverImage,
            start_time: saturating_u64(raw.startTime),
            end_time: saturating_u64(raw.endTime),
            location: raw.location,
            price: raw.price,
            max_participants: saturating_u64(raw.maxParticipants),
            canceled: raw.canceled,
            participant_count: saturating_u64(raw.participantCount),
        })
    }

    async fn join_requests(&self, id: u64) -> LedgerResult<Vec<Address>> {
        self.read(
            self.experience_contract,
            INomadExperience::getJoinRequestsCall {
                experienceId: U256::from(id),
            },
        )
        .await
    }

    async fn participants(&self, id: u64) -> LedgerResult<Vec<Address>> {
        self.read(
            self.experience_contract,
            INomadExperience::getParticipantsCall {
                experienceId: U256::from(id),
            },
        )
        .await
    }

    async fn user_approved_experiences(&self, user: Address) -> LedgerResult<Vec<u64>> {
        let ids = self
            .read(
                self.experience_contract,
                INomadExperience::getUserApprovedExperiencesCall { user },
            )
            .await?;
        Ok(experience_ids(ids))
    }

    async fn user_requested_experiences(&self, user: Address) -> LedgerResult<Vec<u64>> {
        let ids = self
            .read(
                self.experience_contract,
                INomadExperience::getUserRequestedExperiencesCall { user },
            )
            .await?;
        Ok(experience_ids(ids))
    }

    async fn profile(&self, user: Address) -> LedgerResult<UserProfile> {
        let profile = self
            .read(self.profile_hub, INomaProfileHub::getProfileCall { user })
            .await?;

        Ok(UserProfile {
            exists: profile.exists,
            hosted_count: saturating_u64(profile.hostedCount),
            attended_count: saturating_u64(profile.attendedCount),
            last_joined_timestamp: saturating_u64(profile.lastJoinedTimestamp),
            last_hosted_timestamp: saturating_u64(profile.lastHostedTimestamp),
        })
    }

    async fn transaction_receipt(&self, hash: B256) -> LedgerResult<Option<ReceiptSummary>> {
        let receipt = self
            .provider
            .get_receipt(hash)
            .await
            .map_err(|err| LedgerError::transport("eth_getTransactionReceipt", format!("{err:#}")))?;

        Ok(receipt.map(|receipt| ReceiptSummary {
            success: receipt.status(),
            block_number: receipt.block_number(),
            block_hash: receipt.block_hash(),
            gas_used: receipt.gas_used(),
        }))
    }

    async fn head_block(&self) -> LedgerResult<u64> {
        self.provider
            .block_number()
            .await
            .map_err(|err| LedgerError::transport("eth_blockNumber", format!("{err:#}")))
    }

    fn endpoint_name(&self) -> String {
        self.provider.endpoint_name()
    }
}

/// Counters and timestamps are `uint256` on chain; anything past `u64` is clamped
fn saturating_u64(value: U256) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Ids that do not fit a `u64` cannot be fetched back and are dropped
fn experience_ids(ids: Vec<U256>) -> Vec<u64> {
    ids.into_iter()
        .filter_map(|id| u64::try_from(id).ok())
        .collect()
}
