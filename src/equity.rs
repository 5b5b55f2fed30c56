use crate::cards::Card;
use crate::deck::{Deck, DeckError};
use crate::evaluator::evaluate_seven;
use crate::hand::{validate_deal, Board, HandError, HoleCards};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cmp::Ordering as CmpOrdering;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::debug;

/// Signal to stop a running simulation. Checked between batches, never
/// mid-trial.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// What an interrupted simulation returns: an error, or whatever has been
/// aggregated so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelPolicy {
    #[default]
    Abort,
    Partial,
}

/// Per-run knobs. The defaults give an entropy-seeded run across all
/// available cores; a fixed `seed` with a fixed `workers` count makes
/// repeated runs bit-identical.
#[derive(Debug, Clone, Default)]
pub struct SimOptions {
    pub seed: Option<u64>,
    pub workers: Option<NonZeroUsize>,
    /// Trials between cancellation checks; 0 falls back to the default.
    pub batch_size: usize,
    pub cancel: Option<CancelToken>,
    pub deadline: Option<Instant>,
    pub on_cancel: CancelPolicy,
}

const DEFAULT_BATCH: usize = 256;

/// Aggregated outcome of a simulation run. Probabilities are in [0, 1] and
/// sum to 1 up to float rounding; ties are credited fractionally as the
/// subject's share of a split pot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimResult {
    pub win_probability: f64,
    pub tie_probability: f64,
    pub loss_probability: f64,
    pub trials_run: u64,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimError {
    #[error("need at least 2 players, got {0}")]
    InvalidPlayerCount(usize),
    #[error("need at least 1 simulation, got {0}")]
    InvalidSimulationCount(u64),
    #[error("simulation cancelled")]
    Cancelled,
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Hand(#[from] HandError),
}

/// Shared, immutable inputs of one run. Each trial copies the base deck (a
/// single `u64`) and overwrites the undealt slots of the card buffers.
struct TrialPlan {
    base_deck: Deck,
    /// Subject's seven cards: hole at 0..2, board at 2..7. Slots past
    /// `2 + board_len` are placeholders until dealt.
    subject: [Card; 7],
    board_len: usize,
    opponents: usize,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    wins: u64,
    tie_credit: f64,
    trials: u64,
}

/// Estimate the subject's equity by dealing out `num_simulations` random
/// completions of the board and opponents' hole cards, all drawn without
/// replacement from the cards not already known.
///
/// Trials are partitioned across a fixed pool of scoped worker threads,
/// each with its own ChaCha stream; the per-worker tallies are reduced
/// after the join, so nothing is shared while the workers run.
///
/// ```
/// use holdem_equity::equity::{simulate, SimOptions};
/// use holdem_equity::hand::{Board, HoleCards};
///
/// let hole = HoleCards::from_codes(&["HA", "HK"]).unwrap();
/// let board = Board::from_codes(&["HQ", "HJ"]).unwrap();
/// let opts = SimOptions { seed: Some(7), ..SimOptions::default() };
/// let result = simulate(&hole, &board, 6, 1_000, &opts).unwrap();
/// assert!(result.win_probability > 0.0 && result.win_probability < 1.0);
/// ```
pub fn simulate(
    hole: &HoleCards,
    board: &Board,
    num_players: usize,
    num_simulations: u64,
    options: &SimOptions,
) -> Result<SimResult, SimError> {
    if num_players < 2 {
        return Err(SimError::InvalidPlayerCount(num_players));
    }
    if num_simulations < 1 {
        return Err(SimError::InvalidSimulationCount(num_simulations));
    }
    validate_deal(hole, board)?;

    let mut known = hole.as_array().to_vec();
    known.extend_from_slice(board.as_slice());
    let base_deck = Deck::without(&known)?;

    let board_len = board.len();
    let opponents = num_players - 1;
    let per_trial = (5 - board_len) + 2 * opponents;
    if per_trial > base_deck.len() {
        return Err(SimError::Deck(DeckError::InsufficientCards {
            requested: per_trial,
            remaining: base_deck.len(),
        }));
    }

    // Placeholder-fill the undealt slots; every trial overwrites them.
    let mut subject = [hole.first(); 7];
    subject[1] = hole.second();
    subject[2..2 + board_len].copy_from_slice(board.as_slice());

    let plan = TrialPlan { base_deck, subject, board_len, opponents };

    let seed = options.seed.unwrap_or_else(rand::random);
    let workers = worker_count(options, num_simulations);
    let batch_size = if options.batch_size == 0 { DEFAULT_BATCH } else { options.batch_size };
    debug!(seed, workers, trials = num_simulations, "starting equity simulation");

    let per_worker = num_simulations / workers as u64;
    let extra = (num_simulations % workers as u64) as usize;

    let tallies: Vec<Tally> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let quota = per_worker + u64::from(w < extra);
                let plan = &plan;
                let cancel = options.cancel.clone();
                let deadline = options.deadline;
                scope.spawn(move || {
                    run_worker(w as u64, seed, quota, batch_size, plan, cancel, deadline)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("equity worker panicked"))
            .collect()
    });

    let mut total = Tally::default();
    for t in &tallies {
        total.wins += t.wins;
        total.tie_credit += t.tie_credit;
        total.trials += t.trials;
    }
    debug!(wins = total.wins, trials = total.trials, "equity simulation finished");

    if total.trials < num_simulations
        && (options.on_cancel == CancelPolicy::Abort || total.trials == 0)
    {
        return Err(SimError::Cancelled);
    }

    let n = total.trials as f64;
    let win_probability = total.wins as f64 / n;
    let tie_probability = total.tie_credit / n;
    Ok(SimResult {
        win_probability,
        tie_probability,
        loss_probability: (1.0 - win_probability - tie_probability).max(0.0),
        trials_run: total.trials,
    })
}

fn worker_count(options: &SimOptions, num_simulations: u64) -> usize {
    let configured = options
        .workers
        .map(NonZeroUsize::get)
        .unwrap_or_else(|| thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1));
    (configured as u64).min(num_simulations).max(1) as usize
}

fn run_worker(
    index: u64,
    seed: u64,
    quota: u64,
    batch_size: usize,
    plan: &TrialPlan,
    cancel: Option<CancelToken>,
    deadline: Option<Instant>,
) -> Tally {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index);

    let mut tally = Tally::default();
    let mut remaining = quota;
    while remaining > 0 {
        if interrupted(&cancel, deadline) {
            break;
        }
        let batch = remaining.min(batch_size as u64);
        for _ in 0..batch {
            run_trial(plan, &mut rng, &mut tally);
        }
        remaining -= batch;
    }
    tally
}

fn interrupted(cancel: &Option<CancelToken>, deadline: Option<Instant>) -> bool {
    if cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
        return true;
    }
    deadline.is_some_and(|d| Instant::now() >= d)
}

fn run_trial(plan: &TrialPlan, rng: &mut ChaCha8Rng, tally: &mut Tally) {
    let mut deck = plan.base_deck;
    let mut subject = plan.subject;
    for slot in (2 + plan.board_len)..7 {
        subject[slot] = deck.draw_unchecked(rng);
    }
    let subject_eval = evaluate_seven(&subject);

    // Opponents share the completed board at 2..7.
    let mut opponent = subject;
    let mut better = 0usize;
    let mut equal = 0usize;
    for _ in 0..plan.opponents {
        opponent[0] = deck.draw_unchecked(rng);
        opponent[1] = deck.draw_unchecked(rng);
        match evaluate_seven(&opponent).cmp(&subject_eval) {
            CmpOrdering::Greater => better += 1,
            CmpOrdering::Equal => equal += 1,
            CmpOrdering::Less => {}
        }
    }

    if better == 0 {
        if equal == 0 {
            tally.wins += 1;
        } else {
            // split pot: the subject's share among the tied hands
            tally.tie_credit += 1.0 / (equal as f64 + 1.0);
        }
    }
    tally.trials += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(seed: u64) -> SimOptions {
        SimOptions {
            seed: Some(seed),
            workers: NonZeroUsize::new(2),
            ..SimOptions::default()
        }
    }

    fn deal(hole: [&str; 2], board: &[&str]) -> (HoleCards, Board) {
        (HoleCards::from_codes(&hole).unwrap(), Board::from_codes(board).unwrap())
    }

    #[test]
    fn player_and_simulation_counts_are_guarded() {
        let (hole, board) = deal(["HA", "HK"], &[]);
        assert_eq!(
            simulate(&hole, &board, 1, 100, &fixed(1)).unwrap_err(),
            SimError::InvalidPlayerCount(1)
        );
        assert_eq!(
            simulate(&hole, &board, 2, 0, &fixed(1)).unwrap_err(),
            SimError::InvalidSimulationCount(0)
        );
    }

    #[test]
    fn hole_board_overlap_is_rejected() {
        let (hole, board) = deal(["HA", "HK"], &["HA", "C2", "C3"]);
        assert!(matches!(
            simulate(&hole, &board, 2, 100, &fixed(1)),
            Err(SimError::Hand(HandError::DuplicateCard(_)))
        ));
    }

    #[test]
    fn too_many_players_exhaust_the_deck() {
        // 24 opponents need 48 cards on top of 5 board completions from a
        // 50-card deck
        let (hole, board) = deal(["HA", "HK"], &[]);
        let err = simulate(&hole, &board, 25, 100, &fixed(1)).unwrap_err();
        assert!(matches!(err, SimError::Deck(DeckError::InsufficientCards { .. })));
    }

    #[test]
    fn max_feasible_player_count_still_runs() {
        // 23 players: 5 + 2 * 22 = 49 of 50 remaining cards per trial
        let (hole, board) = deal(["HA", "HK"], &[]);
        let result = simulate(&hole, &board, 23, 50, &fixed(3)).unwrap();
        assert_eq!(result.trials_run, 50);
    }

    #[test]
    fn fixed_seed_and_partitioning_reproduce_bit_identical_results() {
        let (hole, board) = deal(["HA", "HK"], &["HQ", "HJ"]);
        let a = simulate(&hole, &board, 6, 2_000, &fixed(42)).unwrap();
        let b = simulate(&hole, &board, 6, 2_000, &fixed(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let (hole, board) = deal(["HA", "HK"], &["HQ", "HJ"]);
        let a = simulate(&hole, &board, 6, 2_000, &fixed(1)).unwrap();
        let b = simulate(&hole, &board, 6, 2_000, &fixed(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn pre_cancelled_abort_discards_everything() {
        let (hole, board) = deal(["HA", "HK"], &[]);
        let token = CancelToken::new();
        token.cancel();
        let options = SimOptions { cancel: Some(token), ..fixed(5) };
        assert_eq!(
            simulate(&hole, &board, 2, 10_000, &options).unwrap_err(),
            SimError::Cancelled
        );
    }

    #[test]
    fn pre_cancelled_partial_with_zero_trials_is_still_cancelled() {
        let (hole, board) = deal(["HA", "HK"], &[]);
        let token = CancelToken::new();
        token.cancel();
        let options = SimOptions {
            cancel: Some(token),
            on_cancel: CancelPolicy::Partial,
            ..fixed(5)
        };
        assert_eq!(
            simulate(&hole, &board, 2, 10_000, &options).unwrap_err(),
            SimError::Cancelled
        );
    }

    #[test]
    fn certain_win_on_a_full_board() {
        // royal flush on the board completion is the subject's; board fixed
        // so every opponent loses to the royal in hearts
        let (hole, board) = deal(["HA", "HK"], &["HQ", "HJ", "HT", "D2", "C3"]);
        let result = simulate(&hole, &board, 4, 500, &fixed(11)).unwrap();
        assert_eq!(result.win_probability, 1.0);
        assert_eq!(result.loss_probability, 0.0);
    }

    #[test]
    fn board_plays_for_everyone_is_all_ties() {
        // board is a royal flush; every player splits
        let (hole, board) = deal(["D2", "C3"], &["HA", "HK", "HQ", "HJ", "HT"]);
        let result = simulate(&hole, &board, 3, 200, &fixed(13)).unwrap();
        assert_eq!(result.win_probability, 0.0);
        // three-way split of every pot
        assert!((result.tie_probability - 1.0 / 3.0).abs() < 1e-12);
    }
}
