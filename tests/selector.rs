use proptest::prelude::*;
use showdown_rs::cards::{parse_cards, Card};
use showdown_rs::deck::Deck;
use showdown_rs::evaluator::{classify, Category, HandScore};
use showdown_rs::hand::HoleCards;
use showdown_rs::selector::{best_hand, Combinations};

fn exhaustive_best(cards: &[Card]) -> HandScore {
    Combinations::new(cards.len(), 5)
        .map(|idx| {
            let five: Vec<Card> = idx.iter().map(|&i| cards[i]).collect();
            classify(&five).unwrap()
        })
        .max()
        .unwrap()
}

proptest! {
    // With two hole cards the candidate stages reach every five-card subset.
    #[test]
    fn house_rule_matches_exhaustive_search(
        deck in Just(Deck::standard().draw_n(52)).prop_shuffle(),
        board in 3usize..=5,
    ) {
        let hole = HoleCards::from_slice(&deck[..2]).unwrap();
        let community = &deck[2..2 + board];
        let best = best_hand(Some(&hole), community).unwrap();
        let all: Vec<Card> = deck[..2 + board].to_vec();
        prop_assert_eq!(&best.score, &exhaustive_best(&all));
        prop_assert_eq!(classify(&best.cards).unwrap(), best.score);
    }
}

#[test]
fn community_flush_is_used_without_hole_cards() {
    let community = parse_cards("2h 7h 9h Jh Kh").unwrap();
    let hole: HoleCards = "3c 4d".parse().unwrap();
    let best = best_hand(Some(&hole), &community).unwrap();
    assert_eq!(best.score.category(), Category::Flush);
    assert_eq!(best.cards.to_vec(), community);
}

#[test]
fn better_hole_flush_replaces_community_flush() {
    let community = parse_cards("2h 7h 9h Jh Kh").unwrap();
    let hole: HoleCards = "Ah 3c".parse().unwrap();
    let best = best_hand(Some(&hole), &community).unwrap();
    assert_eq!(best.score.category(), Category::Flush);
    assert_eq!(best.score.tiebreak_values(), vec![14, 13, 11, 9, 7]);
}
