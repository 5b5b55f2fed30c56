use crate::cards::Card;
use crate::evaluator::{evaluate_cards, EvalError, Evaluation};
use std::cmp::Ordering;
use std::fmt;

/// Outcome of a pairwise showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player1,
    Player2,
    Tie,
}

impl Winner {
    pub const fn as_str(self) -> &'static str {
        match self {
            Winner::Player1 => "player1",
            Winner::Player2 => "player2",
            Winner::Tie => "tie",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompareError {
    #[error("hand {index}: {source}")]
    Hand { index: usize, source: EvalError },
}

/// A resolved pairwise showdown: the winner plus both evaluated hands.
#[derive(Debug, Clone, Copy)]
pub struct Showdown {
    pub winner: Winner,
    pub player1: Evaluation,
    pub player2: Evaluation,
}

/// Evaluate and order two hands of 5 to 7 cards each. The winner is `Tie`
/// iff categories and tiebreak ranks are exactly equal. Evaluation failures
/// name the hand that caused them (0-based).
pub fn showdown(a: &[Card], b: &[Card]) -> Result<Showdown, CompareError> {
    let player1 = evaluate_cards(a).map_err(|source| CompareError::Hand { index: 0, source })?;
    let player2 = evaluate_cards(b).map_err(|source| CompareError::Hand { index: 1, source })?;
    let winner = match player1.cmp(&player2) {
        Ordering::Greater => Winner::Player1,
        Ordering::Less => Winner::Player2,
        Ordering::Equal => Winner::Tie,
    };
    Ok(Showdown { winner, player1, player2 })
}

/// [`showdown`] reduced to just the winner.
///
/// ```
/// use holdem_equity::compare::{compare, Winner};
/// use holdem_equity::hand::parse_codes;
///
/// let p1 = parse_codes(&["HA", "HK", "HQ", "HJ", "HT", "D2", "C3"]).unwrap();
/// let p2 = parse_codes(&["SA", "SK", "HQ", "HJ", "HT", "D2", "C3"]).unwrap();
/// assert_eq!(compare(&p1, &p2).unwrap(), Winner::Player1);
/// ```
pub fn compare(a: &[Card], b: &[Card]) -> Result<Winner, CompareError> {
    Ok(showdown(a, b)?.winner)
}

/// Rank any number of hands into tie-groups, best group first. Hands inside
/// a group keep their input order.
pub fn rank_hands<H: AsRef<[Card]>>(hands: &[H]) -> Result<Vec<Vec<usize>>, CompareError> {
    let mut evals = Vec::with_capacity(hands.len());
    for (index, hand) in hands.iter().enumerate() {
        let eval =
            evaluate_cards(hand.as_ref()).map_err(|source| CompareError::Hand { index, source })?;
        evals.push(eval);
    }
    Ok(rank_evaluations(&evals))
}

/// Tie-group hands that are already evaluated.
pub fn rank_evaluations(evals: &[Evaluation]) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..evals.len()).collect();
    order.sort_by(|&i, &j| evals[j].cmp(&evals[i]).then(i.cmp(&j)));

    let mut groups: Vec<Vec<usize>> = Vec::new();
    for i in order {
        match groups.last_mut() {
            Some(group) if evals[group[0]] == evals[i] => group.push(i),
            _ => groups.push(vec![i]),
        }
    }
    groups
}
