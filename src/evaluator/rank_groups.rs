use crate::cards::Rank;

/// Ranks of a five-card hand grouped by multiplicity, ordered by
/// (count desc, rank desc). That order is exactly the tiebreak order for
/// every grouped category: quads before their kicker, trips before the pair
/// of a full house, pairs before kickers.
///
/// Example: AAKKQ groups as [(2, Ace), (2, King), (1, Queen)].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(u8, Rank)>,
}

impl RankGroups {
    pub fn new(ranks: &[Rank; 5]) -> Self {
        let mut counts = [0u8; 15];
        for rank in ranks {
            counts[rank.value() as usize] += 1;
        }

        // Collect rank-descending, then a stable sort on count keeps the
        // rank order within equal counts.
        let mut groups: Vec<(u8, Rank)> = Rank::ALL
            .iter()
            .rev()
            .filter_map(|&rank| {
                let count = counts[rank.value() as usize];
                (count > 0).then_some((count, rank))
            })
            .collect();
        groups.sort_by(|a, b| b.0.cmp(&a.0));

        Self { groups }
    }

    fn find(&self, multiplicity: u8) -> Option<Rank> {
        self.groups.iter().find(|(c, _)| *c == multiplicity).map(|&(_, r)| r)
    }

    /// Rank of the four-of-a-kind, if any.
    pub fn quad(&self) -> Option<Rank> {
        self.find(4)
    }

    /// Rank of the three-of-a-kind, if any.
    pub fn trips(&self) -> Option<Rank> {
        self.find(3)
    }

    /// Pair ranks, highest first.
    pub fn pairs(&self) -> Vec<Rank> {
        self.of_count(2)
    }

    /// Unpaired ranks, highest first. These are the kickers of any grouped
    /// category.
    pub fn kickers(&self) -> Vec<Rank> {
        self.of_count(1)
    }

    pub fn is_full_house(&self) -> bool {
        self.trips().is_some() && !self.pairs().is_empty()
    }

    fn of_count(&self, multiplicity: u8) -> Vec<Rank> {
        self.groups
            .iter()
            .filter(|(c, _)| *c == multiplicity)
            .map(|&(_, r)| r)
            .collect()
    }
}
