//! Domain layer - pure types and shaping logic
//!
//! Nothing here performs I/O: services fetch from the ledger and hand the
//! results to these functions.

pub mod experience;
pub mod membership;
pub mod schedule;
pub mod search;
pub mod units;

pub use experience::{
    CardStyle, Experience, ExperienceCard, MembershipStatus, ProfileSummary, ScheduleStatus,
    UserProfile,
};
pub use membership::membership_status;
pub use schedule::{merge_experience_ids, partition, MergedId, Schedule, Timed, Timeline};
pub use search::filter_cards;
