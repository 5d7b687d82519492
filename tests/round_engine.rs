use std::cell::Cell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use showdown_rs::agents::{
    BetAction, BettingPolicy, FixedPolicy, FoldingPolicy, MatchAction, RandomPolicy, RandomProfile,
    SeatView, StrengthPolicy, StrengthProfile,
};
use showdown_rs::cards::Card;
use showdown_rs::config::TableConfig;
use showdown_rs::deck::Deck;
use showdown_rs::game::{Phase, RoundError, Table};

const EPS: f64 = 1e-3;

fn table(seats: usize, seed: u64) -> Table {
    Table::new(TableConfig::new(seats, 100.0).with_seed(seed)).expect("valid config")
}

/// Plays back a fixed answer and counts how often it is asked to match.
struct Scripted {
    bet: BetAction,
    matched: MatchAction,
    match_calls: Rc<Cell<usize>>,
}

impl Scripted {
    fn boxed(bet: BetAction, matched: MatchAction) -> Box<dyn BettingPolicy> {
        Box::new(Self { bet, matched, match_calls: Rc::default() })
    }
}

impl BettingPolicy for Scripted {
    fn place_bet(&mut self, _: &SeatView<'_>, _: &[Card], _: f64) -> BetAction {
        self.bet
    }
    fn match_bet(&mut self, _: &SeatView<'_>, _: &[Card], _: f64) -> MatchAction {
        self.match_calls.set(self.match_calls.get() + 1);
        self.matched
    }
}

fn mixed_policies(seats: usize, seed: u64) -> Vec<Box<dyn BettingPolicy>> {
    (0..seats)
        .map(|i| -> Box<dyn BettingPolicy> {
            match i % 3 {
                0 => Box::new(RandomPolicy::new(
                    RandomProfile::default().with_seed(seed.wrapping_add(i as u64)),
                )),
                1 => Box::new(StrengthPolicy::new(StrengthProfile::default())),
                _ => Box::new(FixedPolicy::new(3.0)),
            }
        })
        .collect()
}

#[test_log::test]
fn deals_and_reveals_from_the_front_of_the_deck() {
    let seed = 11;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut expected = Deck::shuffled(&mut rng);

    let mut t = table(3, seed);
    let mut p: Vec<Box<dyn BettingPolicy>> =
        (0..3).map(|_| Box::new(FoldingPolicy) as Box<dyn BettingPolicy>).collect();
    assert_eq!(t.advance(&mut p).unwrap(), Phase::Dealt);
    for seat in 0..3 {
        let hole = t.player(seat).unwrap().hole().unwrap();
        assert_eq!(hole.as_array().to_vec(), expected.draw_n(2));
    }
    t.advance(&mut p).unwrap();
    t.advance(&mut p).unwrap();
    t.advance(&mut p).unwrap();
    assert_eq!(t.community().to_vec(), expected.draw_n(5));

    // second hand: fresh shuffle, first seat moved to the back
    while t.advance(&mut p).unwrap() != Phase::Idle {}
    let mut second = Deck::shuffled(&mut rng);
    t.advance(&mut p).unwrap();
    assert_eq!(t.rotation(), &[1, 2, 0]);
    let first_two = second.draw_n(2);
    assert_eq!(t.player(1).unwrap().hole().unwrap().as_array().to_vec(), first_two);
}

#[test]
fn rotation_advances_once_per_hand() {
    let mut t = table(4, 3);
    let mut p: Vec<Box<dyn BettingPolicy>> =
        (0..4).map(|_| Box::new(FixedPolicy::new(1.0)) as Box<dyn BettingPolicy>).collect();
    let mut fronts = Vec::new();
    for _ in 0..5 {
        t.play_hand(&mut p).unwrap();
        fronts.push(t.rotation()[0]);
    }
    assert_eq!(fronts, vec![0, 1, 2, 3, 0]);
}

#[test]
fn equal_commitments_are_auto_matched() {
    let mut t = table(3, 5);
    let calls: Vec<Rc<Cell<usize>>> = (0..3).map(|_| Rc::default()).collect();
    let mut p: Vec<Box<dyn BettingPolicy>> = calls
        .iter()
        .map(|c| -> Box<dyn BettingPolicy> {
            Box::new(Scripted {
                bet: BetAction::Commit(7.0),
                matched: MatchAction::Decline,
                match_calls: Rc::clone(c),
            })
        })
        .collect();
    let out = t.play_hand(&mut p).unwrap();
    assert!(calls.iter().all(|c| c.get() == 0));
    assert_eq!(out.pot, 21.0);
    assert!(!out.is_uncontested());
    assert_abs_diff_eq!(t.total_money(), 300.0, epsilon = 1e-9);
}

#[test]
fn matching_pays_the_owed_amount() {
    let mut t = table(2, 9);
    let mut p: Vec<Box<dyn BettingPolicy>> = vec![
        Scripted::boxed(BetAction::Commit(4.0), MatchAction::Match(None)),
        Scripted::boxed(BetAction::Commit(10.0), MatchAction::Decline),
    ];
    while t.phase() != Phase::Matching {
        t.advance(&mut p).unwrap();
    }
    assert_eq!(t.pot(), 20.0);
    assert_eq!(t.player(0).unwrap().committed(), 10.0);
    assert_eq!(t.player(0).unwrap().balance(), 90.0);
    assert_eq!(t.active_seats(), vec![0, 1]);
}

#[test]
fn overpaying_match_is_clamped_to_owed() {
    let mut t = table(2, 9);
    let mut p: Vec<Box<dyn BettingPolicy>> = vec![
        Scripted::boxed(BetAction::Commit(4.0), MatchAction::Match(Some(50.0))),
        Scripted::boxed(BetAction::Commit(10.0), MatchAction::Decline),
    ];
    while t.phase() != Phase::Matching {
        t.advance(&mut p).unwrap();
    }
    assert_eq!(t.pot(), 20.0);
    assert_eq!(t.player(0).unwrap().committed(), 10.0);
    assert_eq!(t.player(0).unwrap().committed(), t.player(1).unwrap().committed());
    assert_eq!(t.player(0).unwrap().balance(), 90.0);
    assert_eq!(t.active_seats(), vec![0, 1]);

    while t.phase() != Phase::Idle {
        t.advance(&mut p).unwrap();
    }
    assert_abs_diff_eq!(t.total_money(), 200.0, epsilon = 1e-9);
}

#[test]
fn declining_to_match_forfeits_to_the_survivor() {
    let mut t = table(2, 9);
    let mut p: Vec<Box<dyn BettingPolicy>> = vec![
        Scripted::boxed(BetAction::Commit(4.0), MatchAction::Decline),
        Scripted::boxed(BetAction::Commit(10.0), MatchAction::Decline),
    ];
    let out = t.play_hand(&mut p).unwrap();
    assert_eq!(out.winners, vec![1]);
    assert!(out.is_uncontested());
    assert_eq!(t.player(0).unwrap().balance(), 96.0);
    assert_eq!(t.player(1).unwrap().balance(), 104.0);
}

#[test]
fn folded_players_return_next_hand() {
    let mut t = table(3, 2);
    let mut p: Vec<Box<dyn BettingPolicy>> = vec![
        Box::new(FoldingPolicy),
        Box::new(FixedPolicy::new(2.0)),
        Box::new(FoldingPolicy),
    ];
    let out = t.play_hand(&mut p).unwrap();
    assert_eq!(out.winners, vec![1]);
    assert_eq!(out.pot, 2.0);
    t.advance(&mut p).unwrap();
    assert_eq!(t.active_seats().len(), 3);
    assert!(t.players().iter().all(|pl| pl.hole().is_some()));
}

#[test]
fn over_balance_match_is_fatal_and_refunded() {
    let mut t = table(2, 4);
    let mut p: Vec<Box<dyn BettingPolicy>> = vec![
        Scripted::boxed(BetAction::Commit(1.0), MatchAction::Match(Some(500.0))),
        Scripted::boxed(BetAction::Commit(2.0), MatchAction::Decline),
    ];
    let err = t.play_hand(&mut p).unwrap_err();
    assert!(matches!(err, RoundError::OverBalance { seat: 0, .. }));
    assert_eq!(t.phase(), Phase::Idle);
    assert_eq!(t.pot(), 0.0);
    assert!(t.players().iter().all(|pl| pl.balance() == 100.0));
    assert!(t.last_outcome().is_none());
}

#[test]
fn same_seed_replays_the_same_session() {
    let run = |seed: u64| {
        let mut t = table(5, seed);
        let mut p = mixed_policies(5, seed);
        (0..10).map(|_| t.play_hand(&mut p).unwrap()).collect::<Vec<_>>()
    };
    assert_eq!(run(123), run(123));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn money_is_conserved_every_hand(seed in any::<u64>(), seats in 2usize..=6) {
        let mut t = table(seats, seed);
        let mut p = mixed_policies(seats, seed);
        let total = 100.0 * seats as f64;
        for _ in 0..15 {
            let out = t.play_hand(&mut p).unwrap();
            let paid: f64 = out.payouts.iter().map(|x| x.amount).sum();
            prop_assert!((paid - out.pot).abs() <= EPS);
            prop_assert_eq!(t.pot(), 0.0);
            prop_assert!((t.total_money() - total).abs() <= EPS);
            prop_assert!(t.players().iter().all(|pl| pl.balance() >= 0.0));
            if out.pot > 0.0 {
                prop_assert!(!out.winners.is_empty());
            }
        }
    }
}
