use crate::cards::Card;
use rand::Rng;

const FULL_MASK: u64 = (1u64 << 52) - 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deck exhausted: all 52 cards are excluded")]
    Exhausted,
    #[error("card {0} excluded twice")]
    DuplicateExcluded(Card),
    #[error("requested {requested} cards but only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },
}

/// The 52-card universe minus a set of known cards, one bit per card.
///
/// The deck holds no randomness of its own; every draw takes the caller's
/// generator, so a seeded [`rand_chacha::ChaCha8Rng`] reproduces a deal
/// exactly.
///
/// ```
/// use holdem_equity::deck::Deck;
/// use holdem_equity::hand::parse_codes;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let known = parse_codes(&["HA", "HK"]).unwrap();
/// let mut deck = Deck::without(&known).unwrap();
/// assert_eq!(deck.len(), 50);
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let drawn = deck.draw(5, &mut rng).unwrap();
/// assert_eq!(drawn.len(), 5);
/// assert_eq!(deck.len(), 45);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck {
    mask: u64,
}

impl Deck {
    /// All 52 cards available.
    pub fn full() -> Self {
        Self { mask: FULL_MASK }
    }

    /// The universe minus `excluded`. A repeated exclusion or an exclusion
    /// list covering the whole deck is an error.
    pub fn without(excluded: &[Card]) -> Result<Self, DeckError> {
        let mut mask = FULL_MASK;
        for card in excluded {
            let bit = 1u64 << card.index();
            if mask & bit == 0 {
                return Err(DeckError::DuplicateExcluded(*card));
            }
            mask &= !bit;
        }
        if mask == 0 {
            return Err(DeckError::Exhausted);
        }
        Ok(Self { mask })
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn contains(&self, card: Card) -> bool {
        self.mask & (1u64 << card.index()) != 0
    }

    /// Draw one card uniformly at random and remove it from the deck.
    pub fn draw_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, DeckError> {
        if self.is_empty() {
            return Err(DeckError::InsufficientCards { requested: 1, remaining: 0 });
        }
        Ok(self.draw_unchecked(rng))
    }

    /// Draw without the emptiness check, for hot paths that sized the whole
    /// batch up front.
    pub(crate) fn draw_unchecked<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Card {
        debug_assert!(!self.is_empty());
        let pick = rng.random_range(0..self.len());
        let index = nth_set_bit(self.mask, pick);
        self.mask &= !(1u64 << index);
        Card::from_index(index)
    }

    /// Draw `n` distinct cards uniformly without replacement.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Result<Vec<Card>, DeckError> {
        if n > self.len() {
            return Err(DeckError::InsufficientCards { requested: n, remaining: self.len() });
        }
        let mut cards = Vec::with_capacity(n);
        for _ in 0..n {
            // cannot fail: the length check above covers the whole batch
            cards.push(self.draw_one(rng)?);
        }
        Ok(cards)
    }

    /// The remaining cards in index order.
    pub fn cards(&self) -> Vec<Card> {
        let mut out = Vec::with_capacity(self.len());
        let mut mask = self.mask;
        while mask != 0 {
            let index = mask.trailing_zeros() as u8;
            out.push(Card::from_index(index));
            mask &= mask - 1;
        }
        out
    }
}

/// Position of the `n`-th (0-based) set bit of `mask`. `n` must be below
/// `mask.count_ones()`.
fn nth_set_bit(mask: u64, mut n: usize) -> u8 {
    let mut m = mask;
    loop {
        let index = m.trailing_zeros() as u8;
        if n == 0 {
            return index;
        }
        n -= 1;
        m &= m - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::all_cards;
    use crate::hand::parse_codes;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn full_deck_has_52_cards() {
        let deck = Deck::full();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.cards().len(), 52);
    }

    #[test]
    fn exclusions_shrink_the_deck() {
        let known = parse_codes(&["HA", "HK", "HQ"]).unwrap();
        let deck = Deck::without(&known).unwrap();
        assert_eq!(deck.len(), 49);
        for card in &known {
            assert!(!deck.contains(*card));
        }
    }

    #[test]
    fn duplicate_exclusion_is_an_error() {
        let known = parse_codes(&["HA", "HK"]).unwrap();
        let doubled = [known[0], known[1], known[0]];
        assert!(matches!(Deck::without(&doubled), Err(DeckError::DuplicateExcluded(_))));
    }

    #[test]
    fn excluding_everything_is_exhaustion() {
        let universe: Vec<_> = all_cards().collect();
        assert!(matches!(Deck::without(&universe), Err(DeckError::Exhausted)));
    }

    #[test]
    fn draws_are_distinct_and_never_excluded() {
        let known = parse_codes(&["HA", "HK"]).unwrap();
        let mut deck = Deck::without(&known).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let drawn = deck.draw(50, &mut rng).unwrap();
        assert_eq!(drawn.len(), 50);
        assert!(deck.is_empty());

        let mut seen = std::collections::HashSet::new();
        for card in &drawn {
            assert!(seen.insert(*card), "card {card} drawn twice");
            assert!(!known.contains(card));
        }
    }

    #[test]
    fn overdrawing_fails_without_side_effects() {
        let mut deck = Deck::full();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = deck.draw(53, &mut rng).unwrap_err();
        assert_eq!(err, DeckError::InsufficientCards { requested: 53, remaining: 52 });
        assert_eq!(deck.len(), 52);
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let known = parse_codes(&["D7", "C7"]).unwrap();
        let mut a = Deck::without(&known).unwrap();
        let mut b = Deck::without(&known).unwrap();
        let mut rng_a = ChaCha8Rng::seed_from_u64(9);
        let mut rng_b = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(a.draw(10, &mut rng_a).unwrap(), b.draw(10, &mut rng_b).unwrap());
    }

    #[test]
    fn nth_set_bit_walks_the_mask() {
        let mask = 0b1011_0100u64;
        assert_eq!(nth_set_bit(mask, 0), 2);
        assert_eq!(nth_set_bit(mask, 1), 4);
        assert_eq!(nth_set_bit(mask, 2), 5);
        assert_eq!(nth_set_bit(mask, 3), 7);
    }
}
