//! Services - async orchestration of ledger reads
//!
//! Every read goes out as an independent request. Batches of per-experience
//! reads are fanned out concurrently and joined back in input order; an item
//! that fails is logged and left out instead of failing the batch.
//!
//! Results come back as [`Fetch`], which keeps "nothing there" apart from
//! "could not read". Presentation code that only wants something to show
//! calls [`Fetch::into_value_or_default`].

mod catalog;
mod confirmation;
mod draft;
mod membership;
mod profile;
mod schedule;

use std::fmt;
use std::sync::Arc;

use alloy_primitives::Address;
use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::domain::{CardStyle, Experience, ExperienceCard};
use crate::infrastructure::ExperienceLedger;

pub use confirmation::{
    parse_transaction_id, Confirmation, ConfirmationError, ConfirmationStatus,
};
pub use draft::{build_create_call, DraftError, ExperienceDraft, WalletCall};

/// Outcome of a remote read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch<T> {
    /// The ledger answered with data
    Loaded(T),
    /// The ledger answered, and there is nothing to show
    Empty,
    /// The read failed; the message is for logs and diagnostics
    Failed(String),
}

impl<T> Fetch<T> {
    pub fn failed(err: impl fmt::Display) -> Self {
        Fetch::Failed(err.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Fetch::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Fetch::Failed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Fetch::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn loaded(self) -> Option<T> {
        match self {
            Fetch::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetch<U> {
        match self {
            Fetch::Loaded(value) => Fetch::Loaded(f(value)),
            Fetch::Empty => Fetch::Empty,
            Fetch::Failed(message) => Fetch::Failed(message),
        }
    }

    /// Degrade to the empty/default value: empty list, default profile,
    /// `none` status.
    pub fn into_value_or_default(self) -> T
    where
        T: Default,
    {
        self.loaded().unwrap_or_default()
    }
}

/// Knobs for the read services
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Upper bound on in-flight per-experience reads
    pub read_concurrency: usize,
    pub card_style: CardStyle,
    /// Target of createExperience payloads
    pub experience_contract: Address,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            read_concurrency: 8,
            card_style: CardStyle::default(),
            experience_contract: Address::ZERO,
        }
    }
}

/// Entry point for every read the application performs
pub struct Marketplace {
    ledger: Arc<dyn ExperienceLedger>,
    options: ServiceOptions,
}

impl Marketplace {
    pub fn new(ledger: Arc<dyn ExperienceLedger>, options: ServiceOptions) -> Self {
        Self { ledger, options }
    }

    pub fn ledger(&self) -> &dyn ExperienceLedger {
        self.ledger.as_ref()
    }

    /// Render an experience with the configured card style
    pub fn card(&self, experience: &Experience) -> ExperienceCard {
        ExperienceCard::new(experience, &self.options.card_style)
    }

    /// Read the details of every id concurrently, in input order.
    ///
    /// Returns the experiences that could be read and the number skipped.
    async fn fetch_experiences(&self, ids: Vec<u64>) -> (Vec<Experience>, usize) {
        let ledger = self.ledger.as_ref();
        let results: Vec<_> = stream::iter(ids)
            .map(|id| async move { (id, ledger.experience(id).await) })
            .buffered(self.options.read_concurrency.max(1))
            .collect()
            .await;

        let mut experiences = Vec::with_capacity(results.len());
        let mut skipped = 0;
        for (id, result) in results {
            match result {
                Ok(experience) => experiences.push(experience),
                Err(err) => {
                    warn!(experience_id = id, error = %err, "skipping unreadable experience");
                    skipped += 1;
                }
            }
        }
        (experiences, skipped)
    }
}
