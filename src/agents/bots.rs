use crate::cards::Card;
use crate::evaluator::Category;
use crate::selector::best_hand;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use tracing::trace;

use super::{BetAction, BettingPolicy, MatchAction, SeatView};

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(v) => StdRng::seed_from_u64(v),
        None => {
            let mut seed = [0u8; 32];
            rand::rng().fill_bytes(&mut seed);
            StdRng::from_seed(seed)
        }
    }
}

/// Knobs for [`RandomPolicy`].
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RandomProfile {
    /// Chance of folding outright in the betting pass.
    pub fold_rate: f64,
    /// Chance of matching when behind.
    pub match_rate: f64,
    /// Largest fraction of the balance put in by a single bet.
    pub max_fraction: f64,
    pub rng_seed: Option<u64>,
}

impl RandomProfile {
    pub fn new(fold_rate: f64, match_rate: f64, max_fraction: f64) -> Self {
        Self {
            fold_rate: fold_rate.clamp(0.0, 1.0),
            match_rate: match_rate.clamp(0.0, 1.0),
            max_fraction: max_fraction.clamp(0.0, 1.0),
            rng_seed: None,
        }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for RandomProfile {
    fn default() -> Self {
        Self::new(0.2, 0.5, 0.25)
    }
}

/// Bets a random slice of its balance, folds and matches at fixed rates.
#[derive(Debug)]
pub struct RandomPolicy {
    profile: RandomProfile,
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(profile: RandomProfile) -> Self {
        let rng = seeded_rng(profile.rng_seed);
        Self { profile, rng }
    }
}

impl BettingPolicy for RandomPolicy {
    fn place_bet(&mut self, view: &SeatView<'_>, _: &[Card], highest_bet: f64) -> BetAction {
        if highest_bet > view.balance || self.rng.random::<f64>() < self.profile.fold_rate {
            return BetAction::Fold;
        }
        let cap = (view.balance * self.profile.max_fraction).max(highest_bet);
        let amount = if cap > highest_bet {
            self.rng.random_range(highest_bet..=cap)
        } else {
            highest_bet
        };
        trace!(seat = view.seat, amount, "random bet");
        BetAction::Commit(amount.min(view.balance))
    }

    fn match_bet(&mut self, view: &SeatView<'_>, _: &[Card], highest_bet: f64) -> MatchAction {
        let owed = view.owed(highest_bet);
        if owed > view.balance || self.rng.random::<f64>() >= self.profile.match_rate {
            return MatchAction::Decline;
        }
        MatchAction::Match(Some(owed))
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Knobs for [`StrengthPolicy`].
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct StrengthProfile {
    /// Weakest made hand the policy is willing to play.
    pub min_category: Category,
    /// Fraction of balance staked with the strongest possible hand.
    pub aggression: f64,
}

impl StrengthProfile {
    pub fn new(min_category: Category, aggression: f64) -> Self {
        Self { min_category, aggression: aggression.clamp(0.0, 1.0) }
    }
}

impl Default for StrengthProfile {
    fn default() -> Self {
        Self::new(Category::Pair, 0.5)
    }
}

/// Sizes its bet by the category of its best visible hand.
#[derive(Debug, Clone)]
pub struct StrengthPolicy {
    profile: StrengthProfile,
}

impl StrengthPolicy {
    pub fn new(profile: StrengthProfile) -> Self {
        Self { profile }
    }

    fn category(view: &SeatView<'_>, community: &[Card]) -> Option<Category> {
        let hole = view.hole?;
        best_hand(Some(&hole), community).ok().map(|b| b.score.category())
    }
}

impl BettingPolicy for StrengthPolicy {
    fn place_bet(&mut self, view: &SeatView<'_>, community: &[Card], highest_bet: f64) -> BetAction {
        let Some(category) = Self::category(view, community) else {
            return BetAction::Fold;
        };
        if category < self.profile.min_category || highest_bet > view.balance {
            return BetAction::Fold;
        }
        let weight = f64::from(category.ordinal() + 1) / Category::ALL.len() as f64;
        let amount = (view.balance * self.profile.aggression * weight).max(highest_bet);
        trace!(seat = view.seat, %category, amount, "strength bet");
        BetAction::Commit(amount.min(view.balance))
    }

    fn match_bet(&mut self, view: &SeatView<'_>, community: &[Card], highest_bet: f64) -> MatchAction {
        let playable =
            Self::category(view, community).is_some_and(|c| c >= self.profile.min_category);
        if !playable || view.owed(highest_bet) > view.balance {
            return MatchAction::Decline;
        }
        MatchAction::Match(None)
    }

    fn name(&self) -> &str {
        "strength"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::hand::HoleCards;

    fn view(balance: f64, hole: Option<HoleCards>) -> SeatView<'static> {
        SeatView { seat: 1, name: "P2", balance, committed: 0.0, hole }
    }

    #[test]
    fn random_policy_is_reproducible_with_seed() {
        let community = parse_cards("2h 7d 9c Js Kh").unwrap();
        let mut a = RandomPolicy::new(RandomProfile::default().with_seed(11));
        let mut b = RandomPolicy::new(RandomProfile::default().with_seed(11));
        for _ in 0..20 {
            let v = view(100.0, None);
            assert_eq!(a.place_bet(&v, &community, 1.0), b.place_bet(&v, &community, 1.0));
            assert_eq!(a.match_bet(&v, &community, 5.0), b.match_bet(&v, &community, 5.0));
        }
    }

    #[test]
    fn random_policy_bets_stay_within_bounds() {
        let mut p = RandomPolicy::new(RandomProfile::new(0.0, 1.0, 0.5).with_seed(3));
        for _ in 0..50 {
            match p.place_bet(&view(40.0, None), &[], 2.0) {
                BetAction::Commit(a) => assert!((2.0..=20.0).contains(&a)),
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(p.place_bet(&view(1.0, None), &[], 2.0), BetAction::Fold);
        assert_eq!(p.match_bet(&view(40.0, None), &[], 6.0), MatchAction::Match(Some(6.0)));
    }

    #[test]
    fn strength_policy_folds_weak_hands() {
        let community = parse_cards("2h 7d 9c Js Kh").unwrap();
        let hole: HoleCards = "3c 4d".parse().unwrap();
        let mut p = StrengthPolicy::new(StrengthProfile::default());
        assert_eq!(p.place_bet(&view(100.0, Some(hole)), &community, 0.0), BetAction::Fold);
        assert_eq!(p.match_bet(&view(100.0, Some(hole)), &community, 5.0), MatchAction::Decline);
        assert_eq!(p.place_bet(&view(100.0, None), &community, 0.0), BetAction::Fold);
    }

    #[test]
    fn strength_policy_scales_with_category() {
        let community = parse_cards("2h 7d 9c Js Kh").unwrap();
        let pair: HoleCards = "Kc 4d".parse().unwrap();
        let trips: HoleCards = "Kc Kd".parse().unwrap();
        let mut p = StrengthPolicy::new(StrengthProfile::new(Category::Pair, 1.0));
        // pair: ordinal 1 -> 2/10 of balance; trips: ordinal 3 -> 4/10
        assert_eq!(p.place_bet(&view(100.0, Some(pair)), &community, 0.0), BetAction::Commit(20.0));
        assert_eq!(p.place_bet(&view(100.0, Some(trips)), &community, 0.0), BetAction::Commit(40.0));
        assert_eq!(p.place_bet(&view(100.0, Some(pair)), &community, 30.0), BetAction::Commit(30.0));
        assert_eq!(p.match_bet(&view(100.0, Some(pair)), &community, 30.0), MatchAction::Match(None));
    }
}
