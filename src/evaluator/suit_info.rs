use crate::cards::Card;

/// Whether all five cards share one suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub is_flush: bool,
}

impl SuitInfo {
    pub fn detect(cards: &[Card; 5]) -> Self {
        let mut counts = [0u8; 4];
        for c in cards {
            counts[c.suit().index() as usize] += 1;
        }
        SuitInfo { is_flush: counts.contains(&5) }
    }
}
