use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};
use crate::evaluator::{Category, HandScore};

/// Everything the category detectors need, computed once per hand.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Ranks sorted high to low.
    pub ranks: [Rank; 5],
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut ranks = cards.map(Card::rank);
        ranks.sort_by(|a, b| b.cmp(a));

        Self {
            ranks,
            rank_groups: RankGroups::from_ranks(&ranks),
            suit_info: SuitInfo::detect(cards),
            straight_info: StraightInfo::detect(&ranks),
        }
    }

    pub fn lowest_rank(&self) -> Rank {
        self.ranks[4]
    }

    pub fn score(&self, category: Category, tiebreak: Vec<Rank>) -> HandScore {
        HandScore::new(category, tiebreak)
    }

    /// Fallback when no stronger category applies.
    pub fn high_card(&self) -> HandScore {
        self.score(Category::HighCard, self.ranks.to_vec())
    }
}
