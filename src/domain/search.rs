//! Free-text filter over experience cards

use super::experience::ExperienceCard;

/// Keep cards whose title or description contains `query`, ignoring case.
/// A blank query keeps everything.
pub fn filter_cards(cards: Vec<ExperienceCard>, query: &str) -> Vec<ExperienceCard> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return cards;
    }

    cards
        .into_iter()
        .filter(|card| {
            card.title.to_lowercase().contains(&needle)
                || card.description.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::experience::{CardStyle, Experience};
    use alloy_primitives::{Address, U256};

    fn card(id: u64, title: &str, description: &str) -> ExperienceCard {
        let experience = Experience {
            id,
            creator: Address::ZERO,
            title: title.into(),
            description: description.into(),
            cover_image: String::new(),
            start_time: 0,
            end_time: 0,
            location: String::new(),
            price: U256::ZERO,
            max_participants: 10,
            canceled: false,
            participant_count: 0,
        };
        ExperienceCard::new(&experience, &CardStyle::default())
    }

    fn ids(cards: &[ExperienceCard]) -> Vec<u64> {
        cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_blank_query_keeps_all() {
        let cards = vec![card(0, "Tango", ""), card(1, "Asado", "")];
        assert_eq!(ids(&filter_cards(cards.clone(), "")), vec![0, 1]);
        assert_eq!(ids(&filter_cards(cards, "   ")), vec![0, 1]);
    }

    #[test]
    fn test_matches_title_or_description_case_insensitive() {
        let cards = vec![
            card(0, "Tango night", "Milonga in San Telmo"),
            card(1, "Asado", "Rooftop TANGO lesson after dinner"),
            card(2, "Bike tour", "Palermo parks"),
        ];
        assert_eq!(ids(&filter_cards(cards.clone(), "tango")), vec![0, 1]);
        assert_eq!(ids(&filter_cards(cards, "  PALERMO ")), vec![2]);
    }
}
