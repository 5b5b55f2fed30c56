use crate::cards::{Card, CardParseError};
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("expected at most five board cards, got {0}")]
    BoardSize(usize),
    #[error(transparent)]
    CardParse(#[from] CardParseError),
}

/// Decode a list of card codes, rejecting any repeated card.
///
/// ```
/// use holdem_equity::hand::parse_codes;
///
/// let cards = parse_codes(&["HA", "SK", "D2"]).unwrap();
/// assert_eq!(cards.len(), 3);
/// assert!(parse_codes(&["HA", "ha"]).is_err());
/// ```
pub fn parse_codes<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Card>, HandError> {
    let mut seen = 0u64;
    let mut cards = Vec::with_capacity(codes.len());
    for code in codes {
        let card = Card::from_str(code.as_ref())?;
        let bit = 1u64 << card.index();
        if seen & bit != 0 {
            return Err(HandError::DuplicateCard(card));
        }
        seen |= bit;
        cards.push(card);
    }
    Ok(cards)
}

/// A player's two private hole cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateCard(a));
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(cards: &[Card]) -> Result<Self, HandError> {
        match cards {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(cards.len())),
        }
    }

    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self, HandError> {
        Self::from_slice(&parse_codes(codes)?)
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

/// Community cards shared by all players: empty preflop, up to five by the
/// river.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > 5 {
            return Err(HandError::BoardSize(cards.len()));
        }
        if let Some(card) = first_repeat(&cards) {
            return Err(HandError::DuplicateCard(card));
        }
        Ok(Self { cards })
    }

    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self, HandError> {
        Self::try_new(parse_codes(codes)?)
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
}

/// Check that hole and board cards are pairwise disjoint.
pub fn validate_deal(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    for card in board.as_slice() {
        if *card == hole.first() || *card == hole.second() {
            return Err(HandError::DuplicateCard(*card));
        }
    }
    Ok(())
}

fn first_repeat(cards: &[Card]) -> Option<Card> {
    let mut seen = 0u64;
    for card in cards {
        let bit = 1u64 << card.index();
        if seen & bit != 0 {
            return Some(*card);
        }
        seen |= bit;
    }
    None
}
