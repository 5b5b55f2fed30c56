use holdem_equity::cards::Card;
use holdem_equity::compare::{compare, rank_hands, showdown, CompareError, Winner};
use holdem_equity::evaluator::{Category, EvalError};
use holdem_equity::hand::parse_codes;

fn cards(codes: &[&str]) -> Vec<Card> {
    parse_codes(codes).unwrap()
}

fn with_board(hole: [&str; 2], board: &[&str]) -> Vec<Card> {
    let mut codes = hole.to_vec();
    codes.extend_from_slice(board);
    cards(&codes)
}

const SHARED_BOARD: [&str; 5] = ["HQ", "HJ", "HT", "D2", "C3"];

#[test]
fn royal_flush_beats_board_straight() {
    // player1 completes the heart royal; player2 only plays the board run
    let p1 = with_board(["HA", "HK"], &SHARED_BOARD);
    let p2 = with_board(["SA", "SK"], &SHARED_BOARD);
    assert_eq!(compare(&p1, &p2).unwrap(), Winner::Player1);

    let result = showdown(&p1, &p2).unwrap();
    assert_eq!(result.player1.category, Category::StraightFlush);
    assert!(result.player1.is_royal());
    assert_eq!(result.player2.category, Category::Straight);
}

#[test]
fn swapping_sides_swaps_the_winner() {
    let p1 = with_board(["HA", "HK"], &SHARED_BOARD);
    let p2 = with_board(["SA", "SK"], &SHARED_BOARD);
    assert_eq!(compare(&p2, &p1).unwrap(), Winner::Player2);
}

#[test]
fn comparing_a_hand_with_itself_is_a_tie() {
    let hand = with_board(["S9", "S8"], &SHARED_BOARD);
    assert_eq!(compare(&hand, &hand).unwrap(), Winner::Tie);
}

#[test]
fn board_playing_for_both_is_a_tie() {
    // neither hole improves on the board's queen-high straight
    let board = ["HQ", "HJ", "HT", "D9", "C8"];
    let p1 = with_board(["S2", "D3"], &board);
    let p2 = with_board(["C2", "H3"], &board);
    assert_eq!(compare(&p1, &p2).unwrap(), Winner::Tie);
}

#[test]
fn kickers_decide_otherwise_equal_hands() {
    let board = ["SA", "DA", "H7", "C5", "D2"];
    let p1 = with_board(["HK", "C9"], &board);
    let p2 = with_board(["HQ", "D9"], &board);
    assert_eq!(compare(&p1, &p2).unwrap(), Winner::Player1);
}

#[test]
fn errors_are_attributed_to_the_failing_side() {
    let good = with_board(["HA", "HK"], &SHARED_BOARD);
    let short = cards(&["SA", "SK"]);
    assert_eq!(
        compare(&short, &good).unwrap_err(),
        CompareError::Hand { index: 0, source: EvalError::InvalidHandSize(2) }
    );
    assert_eq!(
        compare(&good, &short).unwrap_err(),
        CompareError::Hand { index: 1, source: EvalError::InvalidHandSize(2) }
    );
}

#[test]
fn n_way_ranking_orders_groups_best_to_worst() {
    let hands = vec![
        with_board(["S4", "D5"], &SHARED_BOARD),  // queen high
        with_board(["HA", "HK"], &SHARED_BOARD),  // royal flush
        with_board(["SA", "SK"], &SHARED_BOARD),  // ace-high straight
        with_board(["DA", "DK"], &SHARED_BOARD),  // same straight, different suits
    ];
    let groups = rank_hands(&hands).unwrap();
    assert_eq!(groups[0], vec![1]);
    assert_eq!(groups[1], vec![2, 3]);
    assert_eq!(groups[2], vec![0]);
}

#[test]
fn tie_partition_is_stable_under_input_reordering() {
    let hands = vec![
        with_board(["SA", "SK"], &SHARED_BOARD),
        with_board(["DA", "DK"], &SHARED_BOARD),
        with_board(["HA", "HK"], &SHARED_BOARD),
    ];
    let reordered = vec![hands[2].clone(), hands[1].clone(), hands[0].clone()];

    let groups = rank_hands(&hands).unwrap();
    let regrouped = rank_hands(&reordered).unwrap();

    // same partition shape: one royal, then the two tied straights in
    // their own input order
    assert_eq!(groups, vec![vec![2], vec![0, 1]]);
    assert_eq!(regrouped, vec![vec![0], vec![1, 2]]);
}

#[test]
fn n_way_errors_carry_the_offending_index() {
    let hands = vec![
        with_board(["HA", "HK"], &SHARED_BOARD),
        cards(&["SA", "SK"]),
    ];
    assert_eq!(
        rank_hands(&hands).unwrap_err(),
        CompareError::Hand { index: 1, source: EvalError::InvalidHandSize(2) }
    );
}
