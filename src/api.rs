//! Request/response surface consumed by the transport layer. Cards arrive
//! and leave as two-character codes; everything else in the engine works on
//! decoded values. Transport, routing, and serialization live outside this
//! crate.

use crate::cards::Rank;
use crate::compare::{showdown, CompareError, Winner};
use crate::equity::{simulate, SimError, SimOptions};
use crate::evaluator::{evaluate_cards, Category, EvalError, Evaluation};
use crate::hand::{validate_deal, Board, HandError, HoleCards};
use tracing::debug;

/// Request-level failure, attributed to the field that caused it. All
/// variants are client errors; none of them indicate an engine fault.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    #[error("{field}: {source}")]
    Field { field: &'static str, source: HandError },
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Compare(#[from] CompareError),
    #[error(transparent)]
    Simulation(#[from] SimError),
}

#[derive(Debug, Clone)]
pub struct EvaluateRequest {
    pub hole_cards: Vec<String>,
    pub board_cards: Vec<String>,
}

/// The winning hand shape: display name ("Royal Flush" for the ace-high
/// straight flush), category, and tiebreak ranks most significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestHand {
    pub name: String,
    pub category: Category,
    pub tiebreak_ranks: Vec<Rank>,
}

impl From<&Evaluation> for BestHand {
    fn from(eval: &Evaluation) -> Self {
        Self {
            name: eval.label().to_string(),
            category: eval.category,
            tiebreak_ranks: eval.tiebreaks.as_slice().to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EvaluateResponse {
    pub best_hand: BestHand,
    /// Human description, e.g. "Full House, Kings full of Queens".
    pub description: String,
    /// Codes of the five cards forming the best hand.
    pub best_five: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PlayerCards {
    pub hole_cards: Vec<String>,
    pub board_cards: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CompareRequest {
    pub player1: PlayerCards,
    pub player2: PlayerCards,
}

#[derive(Debug, Clone)]
pub struct CompareResponse {
    pub winner: Winner,
    pub player1: BestHand,
    pub player2: BestHand,
}

#[derive(Debug, Clone)]
pub struct MonteCarloRequest {
    pub hole_cards: Vec<String>,
    pub board_cards: Vec<String>,
    pub num_players: usize,
    pub num_simulations: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct MonteCarloResponse {
    pub win_probability: f64,
    pub tie_probability: f64,
    pub loss_probability: f64,
    pub simulations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub status: &'static str,
}

/// Liveness signal.
pub fn health() -> Health {
    Health { status: "healthy" }
}

/// Evaluate hole plus board cards (5 to 7 total) and report the best hand.
pub fn evaluate(req: &EvaluateRequest) -> Result<EvaluateResponse, ApiError> {
    let (hole, board) =
        decode_deal("holeCards", &req.hole_cards, "boardCards", &req.board_cards)?;
    let eval = evaluate_cards(&seven_of(&hole, &board))?;
    debug!(hand = %eval, "evaluated hand");
    Ok(EvaluateResponse {
        best_hand: BestHand::from(&eval),
        description: eval.to_string(),
        best_five: eval.best_five.iter().map(|c| c.code()).collect(),
    })
}

/// Compare two players' hands over their (usually shared) boards.
pub fn compare_hands(req: &CompareRequest) -> Result<CompareResponse, ApiError> {
    let (hole1, board1) = decode_deal(
        "player1.holeCards",
        &req.player1.hole_cards,
        "player1.boardCards",
        &req.player1.board_cards,
    )?;
    let (hole2, board2) = decode_deal(
        "player2.holeCards",
        &req.player2.hole_cards,
        "player2.boardCards",
        &req.player2.board_cards,
    )?;

    let cards1 = seven_of(&hole1, &board1);
    let cards2 = seven_of(&hole2, &board2);
    let result = showdown(&cards1, &cards2)?;
    debug!(winner = %result.winner, "compared hands");
    Ok(CompareResponse {
        winner: result.winner,
        player1: BestHand::from(&result.player1),
        player2: BestHand::from(&result.player2),
    })
}

/// Estimate win/tie/loss probabilities with an entropy-seeded run sized to
/// the machine. [`monte_carlo_with`] takes explicit options.
pub fn monte_carlo(req: &MonteCarloRequest) -> Result<MonteCarloResponse, ApiError> {
    monte_carlo_with(req, &SimOptions::default())
}

pub fn monte_carlo_with(
    req: &MonteCarloRequest,
    options: &SimOptions,
) -> Result<MonteCarloResponse, ApiError> {
    let (hole, board) =
        decode_deal("holeCards", &req.hole_cards, "boardCards", &req.board_cards)?;
    debug!(
        players = req.num_players,
        simulations = req.num_simulations,
        "monte carlo request"
    );
    let result = simulate(&hole, &board, req.num_players, req.num_simulations, options)?;
    Ok(MonteCarloResponse {
        win_probability: result.win_probability,
        tie_probability: result.tie_probability,
        loss_probability: result.loss_probability,
        simulations: result.trials_run,
    })
}

fn decode_deal(
    hole_field: &'static str,
    hole_codes: &[String],
    board_field: &'static str,
    board_codes: &[String],
) -> Result<(HoleCards, Board), ApiError> {
    let hole = HoleCards::from_codes(hole_codes)
        .map_err(|source| ApiError::Field { field: hole_field, source })?;
    let board = Board::from_codes(board_codes)
        .map_err(|source| ApiError::Field { field: board_field, source })?;
    validate_deal(&hole, &board)
        .map_err(|source| ApiError::Field { field: board_field, source })?;
    Ok((hole, board))
}

fn seven_of(hole: &HoleCards, board: &Board) -> Vec<crate::cards::Card> {
    let mut cards = hole.as_array().to_vec();
    cards.extend_from_slice(board.as_slice());
    cards
}
