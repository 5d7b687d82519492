//! Random five-card hands of a requested category.
//!
//! Used to exercise the evaluator. Every generator draws from the RNG it is
//! given, so a seeded RNG yields the same hands on every run.

use crate::cards::{Card, Rank, Suit};
use crate::evaluator::Category;
use rand::seq::index::sample;
use rand::seq::SliceRandom;
use rand::Rng;

fn rank_at(i: usize) -> Rank {
    Rank::ALL[i]
}

fn suit_at(i: usize) -> Suit {
    Suit::ALL[i]
}

/// `n` distinct ranks, none equal to anything in `exclude`.
fn distinct_ranks<R: Rng + ?Sized>(rng: &mut R, n: usize, exclude: &[Rank]) -> Vec<Rank> {
    let pool: Vec<Rank> = Rank::ALL.into_iter().filter(|r| !exclude.contains(r)).collect();
    sample(rng, pool.len(), n).into_iter().map(|i| pool[i]).collect()
}

fn distinct_suits<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<Suit> {
    sample(rng, Suit::ALL.len(), n).into_iter().map(suit_at).collect()
}

fn any_suit<R: Rng + ?Sized>(rng: &mut R) -> Suit {
    suit_at(rng.random_range(0..Suit::ALL.len()))
}

fn any_rank<R: Rng + ?Sized>(rng: &mut R) -> Rank {
    rank_at(rng.random_range(0..Rank::ALL.len()))
}

fn all_same_suit(suits: &[Suit]) -> bool {
    suits.windows(2).all(|w| w[0] == w[1])
}

fn zip_hand(ranks: &[Rank], suits: &[Suit]) -> [Card; 5] {
    std::array::from_fn(|i| Card::new(ranks[i], suits[i]))
}

fn high_card<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    loop {
        let mut ranks = distinct_ranks(rng, 5, &[]);
        ranks.sort_unstable();
        // no two neighbours at all, which also rules out every straight
        if ranks.windows(2).any(|w| w[1].value() == w[0].value() + 1) {
            continue;
        }
        let suits: Vec<Suit> = (0..5).map(|_| any_suit(rng)).collect();
        if all_same_suit(&suits) {
            continue;
        }
        return zip_hand(&ranks, &suits);
    }
}

fn pair<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    let pair = any_rank(rng);
    let ps = distinct_suits(rng, 2);
    let others = distinct_ranks(rng, 3, &[pair]);
    let os = distinct_suits(rng, 3);
    zip_hand(&[pair, pair, others[0], others[1], others[2]], &[ps[0], ps[1], os[0], os[1], os[2]])
}

fn two_pair<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    let pairs = distinct_ranks(rng, 2, &[]);
    let s0 = distinct_suits(rng, 2);
    let s1 = distinct_suits(rng, 2);
    let kicker = distinct_ranks(rng, 1, &pairs)[0];
    zip_hand(
        &[pairs[0], pairs[0], pairs[1], pairs[1], kicker],
        &[s0[0], s0[1], s1[0], s1[1], any_suit(rng)],
    )
}

fn three_of_a_kind<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    let trips = any_rank(rng);
    let ts = distinct_suits(rng, 3);
    let others = distinct_ranks(rng, 2, &[trips]);
    let os = distinct_suits(rng, 2);
    zip_hand(&[trips, trips, trips, others[0], others[1]], &[ts[0], ts[1], ts[2], os[0], os[1]])
}

/// Five consecutive ranks starting at `low`; `low` of 10 gives ten to ace.
fn run_from(low: u8) -> Vec<Rank> {
    (low..low + 5).filter_map(|v| Rank::try_from(v).ok()).collect()
}

fn straight<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    loop {
        let ranks = run_from(rng.random_range(2..=10));
        let suits: Vec<Suit> = (0..5).map(|_| any_suit(rng)).collect();
        if all_same_suit(&suits) {
            continue;
        }
        return zip_hand(&ranks, &suits);
    }
}

fn flush<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    let suit = any_suit(rng);
    loop {
        let mut ranks = distinct_ranks(rng, 5, &[]);
        ranks.sort_unstable();
        let wheel = ranks == [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Ace];
        let run = ranks.windows(2).all(|w| w[1].value() == w[0].value() + 1);
        if wheel || run {
            continue;
        }
        return zip_hand(&ranks, &[suit; 5]);
    }
}

fn full_house<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    let ranks = distinct_ranks(rng, 2, &[]);
    let ts = distinct_suits(rng, 3);
    let ps = distinct_suits(rng, 2);
    zip_hand(&[ranks[0], ranks[0], ranks[0], ranks[1], ranks[1]], &[ts[0], ts[1], ts[2], ps[0], ps[1]])
}

fn four_of_a_kind<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    let quad = any_rank(rng);
    let kicker = distinct_ranks(rng, 1, &[quad])[0];
    zip_hand(
        &[quad, quad, quad, quad, kicker],
        &[Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades, any_suit(rng)],
    )
}

fn straight_flush<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    let suit = any_suit(rng);
    // top card five through king; five is the wheel
    let top: u8 = rng.random_range(5..=13);
    let ranks = if top == 5 {
        vec![Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]
    } else {
        run_from(top - 4)
    };
    zip_hand(&ranks, &[suit; 5])
}

fn royal_flush<R: Rng + ?Sized>(rng: &mut R) -> [Card; 5] {
    zip_hand(&run_from(10), &[any_suit(rng); 5])
}

/// A random hand that classifies as `category`.
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use showdown_rs::evaluator::{classify, Category};
/// use showdown_rs::generator::generate;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let hand = generate(Category::FullHouse, &mut rng);
/// assert_eq!(classify(&hand).unwrap().category(), Category::FullHouse);
/// ```
pub fn generate<R: Rng + ?Sized>(category: Category, rng: &mut R) -> [Card; 5] {
    let mut hand = match category {
        Category::HighCard => high_card(rng),
        Category::Pair => pair(rng),
        Category::TwoPair => two_pair(rng),
        Category::ThreeOfAKind => three_of_a_kind(rng),
        Category::Straight => straight(rng),
        Category::Flush => flush(rng),
        Category::FullHouse => full_house(rng),
        Category::FourOfAKind => four_of_a_kind(rng),
        Category::StraightFlush => straight_flush(rng),
        Category::RoyalFlush => royal_flush(rng),
    };
    hand.shuffle(rng);
    hand
}
