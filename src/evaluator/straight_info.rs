use crate::cards::Rank;

/// Straight detection over five ranks, including the ace-low wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub is_straight: bool,
    /// Highest rank of the run; Five for the wheel.
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// `ranks` may be in any order.
    pub fn detect(ranks: &[Rank; 5]) -> Self {
        let mut sorted = *ranks;
        sorted.sort_by(|a, b| b.cmp(a));

        if (0..4).all(|i| sorted[i].value() == sorted[i + 1].value() + 1) {
            return StraightInfo { is_straight: true, top_rank: Some(sorted[0]) };
        }

        if sorted == [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two] {
            return StraightInfo { is_straight: true, top_rank: Some(Rank::Five) };
        }

        StraightInfo { is_straight: false, top_rank: None }
    }
}
