//! Experience, profile and membership types read from the ledger

use std::fmt;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::schedule::Timed;
use super::units::{format_units, serialize_decimal, short_address};

/// Cover shown when an experience has no image of its own
pub const DEFAULT_COVER_IMAGE: &str =
    "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?w=800&h=600&fit=crop";

/// Decimals of the on-chain price
pub const PRICE_DECIMALS: u8 = 18;

/// A listed in-person event as stored by the experience contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub cover_image: String,
    /// Unix seconds
    pub start_time: u64,
    /// Unix seconds, 0 when unset
    pub end_time: u64,
    pub location: String,
    #[serde(serialize_with = "serialize_decimal")]
    pub price: U256,
    pub max_participants: u64,
    pub canceled: bool,
    pub participant_count: u64,
}

impl Timed for Experience {
    fn end_time(&self) -> u64 {
        self.end_time
    }
}

/// Hosting/attendance profile kept by the profile hub
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub exists: bool,
    pub hosted_count: u64,
    pub attended_count: u64,
    pub last_joined_timestamp: u64,
    pub last_hosted_timestamp: u64,
}

/// A user's relation to one experience
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    #[default]
    None,
    Requested,
    Approved,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::None => "none",
            MembershipStatus::Requested => "requested",
            MembershipStatus::Approved => "approved",
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of an entry in a user's schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Pending,
    Approved,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Pending => f.write_str("pending"),
            ScheduleStatus::Approved => f.write_str("approved"),
        }
    }
}

/// How raw experiences are rendered into cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStyle {
    pub fallback_image: String,
    pub price_decimals: u8,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            fallback_image: DEFAULT_COVER_IMAGE.to_string(),
            price_decimals: PRICE_DECIMALS,
        }
    }
}

/// Display-ready projection of an [`Experience`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceCard {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Formatted price, e.g. `$1.5`
    pub price: String,
    pub image: String,
    /// Shortened creator address
    pub organizer: String,
    pub creator: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub participant_count: u64,
    pub max_participants: u64,
    pub canceled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ScheduleStatus>,
}

impl ExperienceCard {
    pub fn new(experience: &Experience, style: &CardStyle) -> Self {
        let image = if experience.cover_image.trim().is_empty() {
            style.fallback_image.clone()
        } else {
            experience.cover_image.clone()
        };

        Self {
            id: experience.id,
            title: experience.title.clone(),
            description: experience.description.clone(),
            location: experience.location.clone(),
            price: format!("${}", format_units(experience.price, style.price_decimals)),
            image,
            organizer: short_address(&experience.creator),
            creator: experience.creator,
            start_time: experience.start_time,
            end_time: experience.end_time,
            participant_count: experience.participant_count,
            max_participants: experience.max_participants,
            canceled: experience.canceled,
            status: None,
        }
    }

    pub fn with_status(mut self, status: ScheduleStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Timed for ExperienceCard {
    fn end_time(&self) -> u64 {
        self.end_time
    }
}

/// Profile figures shown on a user's profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub profile: UserProfile,
    pub experiences_count: u64,
    pub people_met_estimate: u64,
}

/// Average number of people met per attended experience
pub const PEOPLE_PER_EXPERIENCE: u64 = 3;

impl ProfileSummary {
    pub fn new(profile: UserProfile, approved_count: usize) -> Self {
        let experiences_count = if profile.attended_count > 0 {
            profile.attended_count
        } else {
            approved_count as u64
        };
        Self {
            profile,
            experiences_count,
            people_met_estimate: profile.attended_count.saturating_mul(PEOPLE_PER_EXPERIENCE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Experience {
        Experience {
            id: 7,
            creator: "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse().unwrap(),
            title: "Sunset hike".into(),
            description: "Cerro San Cristobal".into(),
            cover_image: String::new(),
            start_time: 1_763_866_544,
            end_time: 0,
            location: "Santiago".into(),
            price: U256::from(2_500_000_000_000_000_000u128),
            max_participants: 12,
            canceled: false,
            participant_count: 5,
        }
    }

    #[test]
    fn test_card_uses_fallback_image() {
        let card = ExperienceCard::new(&sample(), &CardStyle::default());
        assert_eq!(card.image, DEFAULT_COVER_IMAGE);
        assert_eq!(card.price, "$2.5");
        assert_eq!(card.organizer, "0x5aAe...eAed");
        assert!(card.status.is_none());
    }

    #[test]
    fn test_card_keeps_cover_image() {
        let mut experience = sample();
        experience.cover_image = "https://example.com/cover.png".into();
        let card = ExperienceCard::new(&experience, &CardStyle::default())
            .with_status(ScheduleStatus::Pending);
        assert_eq!(card.image, "https://example.com/cover.png");
        assert_eq!(card.status, Some(ScheduleStatus::Pending));
    }

    #[test]
    fn test_profile_summary_counts() {
        let profile = UserProfile {
            exists: true,
            attended_count: 4,
            ..Default::default()
        };
        let summary = ProfileSummary::new(profile, 9);
        assert_eq!(summary.experiences_count, 4);
        assert_eq!(summary.people_met_estimate, 12);

        let summary = ProfileSummary::new(UserProfile::default(), 2);
        assert_eq!(summary.experiences_count, 2);
        assert_eq!(summary.people_met_estimate, 0);
    }

    #[test]
    fn test_experience_serializes_price_as_decimal() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["price"], "2500000000000000000");
        assert_eq!(json["coverImage"], "");
        assert_eq!(json["participantCount"], 5);
    }
}
