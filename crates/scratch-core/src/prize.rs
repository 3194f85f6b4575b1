//! Prize store
//!
//! Static, ordered registry of prize cards with lookup by identifier.

use crate::error::PrizeError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A prize that can be assigned to a visitor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrizeCard {
    /// Unique identifier, persisted as the visitor's assignment
    pub id: String,
    /// Artwork reference
    pub image: String,
    /// Opaque promo code sent on redemption
    pub promo: String,
    /// Accessible label for the artwork
    pub alt: String,
}

impl PrizeCard {
    /// Create new prize card
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        image: impl Into<String>,
        promo: impl Into<String>,
        alt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            image: image.into(),
            promo: promo.into(),
            alt: alt.into(),
        }
    }
}

/// Read-only prize registry
///
/// Never empty: [`PrizeStore::choose`] always has something to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeStore {
    cards: Vec<PrizeCard>,
}

impl PrizeStore {
    /// Build a store from an ordered list of cards
    ///
    /// # Errors
    /// - `PrizeError::EmptyCatalog` if `cards` is empty
    /// - `PrizeError::DuplicateId` if two cards share an id
    pub fn new(cards: Vec<PrizeCard>) -> Result<Self, PrizeError> {
        if cards.is_empty() {
            return Err(PrizeError::EmptyCatalog);
        }
        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(card.id.as_str()) {
                return Err(PrizeError::DuplicateId(card.id.clone()));
            }
        }
        Ok(Self { cards })
    }

    /// All cards, in catalog order
    #[inline]
    #[must_use]
    pub fn cards(&self) -> &[PrizeCard] {
        &self.cards
    }

    /// Look up a card by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PrizeCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Pick a card uniformly at random
    #[must_use]
    pub fn choose<R: Rng>(&self, rng: &mut R) -> &PrizeCard {
        &self.cards[rng.random_range(0..self.cards.len())]
    }

    /// Number of cards
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for PrizeStore {
    /// The built-in catalog
    fn default() -> Self {
        Self {
            cards: vec![PrizeCard::new(
                "P1",
                "/prize/MME GOLDEN TICKET.png",
                "2500 usd gift",
                "2500 usd gift",
            )],
        }
    }
}
