//! holdem-equity: Texas Hold'em evaluation and equity engine
//!
//! Goals:
//! - Deterministic best-five evaluation for 5 to 7 card hands
//! - Statistically sound Monte Carlo equity over a shared 52-card deck
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a hand
//! ```
//! use holdem_equity::evaluator::{evaluate_cards, Category};
//! use holdem_equity::hand::parse_codes;
//!
//! let cards = parse_codes(&["HA", "HK", "HQ", "HJ", "HT", "D2", "C3"]).unwrap();
//! let eval = evaluate_cards(&cards).unwrap();
//! assert_eq!(eval.category, Category::StraightFlush);
//! assert_eq!(eval.label(), "Royal Flush");
//! ```
//!
//! ## Quick start: estimate equity
//! ```
//! use holdem_equity::equity::{simulate, SimOptions};
//! use holdem_equity::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::from_codes(&["HA", "HK"]).unwrap();
//! let board = Board::from_codes(&["HQ", "HJ"]).unwrap();
//! let opts = SimOptions { seed: Some(1), ..SimOptions::default() };
//! let result = simulate(&hole, &board, 6, 1_000, &opts).unwrap();
//! let total = result.win_probability + result.tie_probability + result.loss_probability;
//! assert!((total - 1.0).abs() < 1e-9);
//! ```
//!
//! Transport, routing, and serialization are the embedding service's
//! concern; [`api`] is the logical request/response boundary it calls into.

pub mod api;
pub mod cards;
pub mod compare;
pub mod deck;
pub mod equity;
pub mod evaluator;
pub mod hand;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
