use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::str::FromStr;

/// Most community cards a table ever reveals (flop 3 + turn 1 + river 1).
pub const MAX_COMMUNITY: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many community cards: {0}")]
    TooManyCommunityCards(usize),
    #[error("duplicate community cards")]
    DuplicateCommunityCards,
    #[error("hole cards overlap with community cards")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards.
///
/// ```
/// use showdown_rs::cards::{Card, Rank, Suit};
/// use showdown_rs::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    /// First card dealt.
    pub fn first(&self) -> Card {
        self.0
    }

    /// Second card dealt.
    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.0 == card || self.1 == card
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Shared community cards, revealed in stages. At most five, all distinct.
///
/// ```
/// use showdown_rs::hand::Community;
///
/// let flop: Community = "2c 3c 4c".parse().unwrap();
/// assert_eq!(flop.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Community {
    cards: Vec<Card>,
}

impl Community {
    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(MAX_COMMUNITY) }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > MAX_COMMUNITY {
            return Err(HandError::TooManyCommunityCards(cards.len()));
        }
        let set: HashSet<Card> = cards.iter().copied().collect();
        if set.len() != cards.len() {
            return Err(HandError::DuplicateCommunityCards);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn extend<I>(&mut self, cards: I) -> Result<(), HandError>
    where
        I: IntoIterator<Item = Card>,
    {
        for card in cards {
            if self.cards.len() >= MAX_COMMUNITY {
                return Err(HandError::TooManyCommunityCards(self.cards.len() + 1));
            }
            if self.cards.contains(&card) {
                return Err(HandError::DuplicateCommunityCards);
            }
            self.cards.push(card);
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}

impl FromStr for Community {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Community::try_new(cards)
    }
}

/// Check that hole cards (if any) and community cards can coexist: community
/// within limits and distinct, no hole card repeated on the table.
pub fn validate_visible(hole: Option<&HoleCards>, community: &[Card]) -> Result<(), HandError> {
    if community.len() > MAX_COMMUNITY {
        return Err(HandError::TooManyCommunityCards(community.len()));
    }
    let set: HashSet<Card> = community.iter().copied().collect();
    if set.len() != community.len() {
        return Err(HandError::DuplicateCommunityCards);
    }
    if let Some(h) = hole {
        if h.first() == h.second() {
            return Err(HandError::DuplicateHoleCards);
        }
        if set.contains(&h.first()) || set.contains(&h.second()) {
            return Err(HandError::Overlap);
        }
    }
    Ok(())
}
