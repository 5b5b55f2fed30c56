use super::hand_analysis::HandAnalysis;
use super::{Category, TieBreaks};

/// Each category knows whether a hand contains it and which ranks order it
/// against other hands of the same category. Detectors run in priority
/// order, strongest first; the high-card fallback always matches.
pub trait CategoryDetector {
    fn matches(&self, analysis: &HandAnalysis) -> bool;
    fn score(&self, analysis: &HandAnalysis) -> (Category, TieBreaks);
}

pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn matches(&self, analysis: &HandAnalysis) -> bool {
        analysis.flush_suit.is_some() && analysis.straight_top.is_some()
    }

    fn score(&self, analysis: &HandAnalysis) -> (Category, TieBreaks) {
        let top = analysis.straight_top.unwrap();
        (Category::StraightFlush, TieBreaks::of(&[top]))
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn matches(&self, analysis: &HandAnalysis) -> bool {
        analysis.groups.quad().is_some()
    }

    fn score(&self, analysis: &HandAnalysis) -> (Category, TieBreaks) {
        let quad = analysis.groups.quad().unwrap();
        let kicker = analysis.groups.kickers()[0];
        (Category::FourOfAKind, TieBreaks::of(&[quad, kicker]))
    }
}

pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn matches(&self, analysis: &HandAnalysis) -> bool {
        analysis.groups.is_full_house()
    }

    fn score(&self, analysis: &HandAnalysis) -> (Category, TieBreaks) {
        let trips = analysis.groups.trips().unwrap();
        let pair = analysis.groups.pairs()[0];
        (Category::FullHouse, TieBreaks::of(&[trips, pair]))
    }
}

pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn matches(&self, analysis: &HandAnalysis) -> bool {
        analysis.flush_suit.is_some()
    }

    fn score(&self, analysis: &HandAnalysis) -> (Category, TieBreaks) {
        (Category::Flush, TieBreaks::of(&analysis.ranks_desc))
    }
}

pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn matches(&self, analysis: &HandAnalysis) -> bool {
        analysis.straight_top.is_some()
    }

    fn score(&self, analysis: &HandAnalysis) -> (Category, TieBreaks) {
        let top = analysis.straight_top.unwrap();
        (Category::Straight, TieBreaks::of(&[top]))
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn matches(&self, analysis: &HandAnalysis) -> bool {
        analysis.groups.trips().is_some() && !analysis.groups.is_full_house()
    }

    fn score(&self, analysis: &HandAnalysis) -> (Category, TieBreaks) {
        let trips = analysis.groups.trips().unwrap();
        let kickers = analysis.groups.kickers();
        (Category::ThreeOfAKind, TieBreaks::of(&[trips, kickers[0], kickers[1]]))
    }
}

pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn matches(&self, analysis: &HandAnalysis) -> bool {
        analysis.groups.pairs().len() == 2
    }

    fn score(&self, analysis: &HandAnalysis) -> (Category, TieBreaks) {
        let pairs = analysis.groups.pairs();
        let kicker = analysis.groups.kickers()[0];
        (Category::TwoPair, TieBreaks::of(&[pairs[0], pairs[1], kicker]))
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn matches(&self, analysis: &HandAnalysis) -> bool {
        analysis.groups.pairs().len() == 1
    }

    fn score(&self, analysis: &HandAnalysis) -> (Category, TieBreaks) {
        let pair = analysis.groups.pairs()[0];
        let kickers = analysis.groups.kickers();
        (Category::Pair, TieBreaks::of(&[pair, kickers[0], kickers[1], kickers[2]]))
    }
}

pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn matches(&self, _analysis: &HandAnalysis) -> bool {
        true
    }

    fn score(&self, analysis: &HandAnalysis) -> (Category, TieBreaks) {
        (Category::HighCard, TieBreaks::of(&analysis.ranks_desc))
    }
}

pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];
