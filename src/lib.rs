//! showdown-rs: hand ranking and round settlement for a single-pot
//! community-card poker table driven by automated policies.
//!
//! Goals:
//! - Exact, deterministic five-card ranking with category-specific tie-breaks
//! - One betting pass and one matching pass per hand, settled from a single pot
//! - Typed errors instead of panics; seeded RNG for reproducible hands
//!
//! ## Quick start: rank and compare hands
//! ```
//! use showdown_rs::cards::parse_cards;
//! use showdown_rs::evaluator::{beats, classify, winners, Category};
//!
//! let flush = parse_cards("Ah 9h 7h 4h 2h").unwrap();
//! let straight = parse_cards("9c Td Jh Qs Kc").unwrap();
//! assert_eq!(classify(&flush).unwrap().category(), Category::Flush);
//! assert!(beats(&flush, &straight).unwrap());
//! assert_eq!(winners(&[flush, straight]).unwrap(), vec![0]);
//! ```
//!
//! ## Playing hands
//! ```
//! use showdown_rs::agents::{BettingPolicy, FixedPolicy};
//! use showdown_rs::config::TableConfig;
//! use showdown_rs::game::Table;
//!
//! let mut table = Table::new(TableConfig::new(3, 100.0).with_seed(7)).unwrap();
//! let mut policies: Vec<Box<dyn BettingPolicy>> =
//!     (0..3).map(|_| Box::new(FixedPolicy::new(5.0)) as Box<dyn BettingPolicy>).collect();
//! let outcome = table.play_hand(&mut policies).unwrap();
//! assert_eq!(outcome.pot, 15.0);
//! assert!((table.total_money() - 300.0).abs() < 1e-9);
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod generator;
pub mod hand;
pub mod pot;
pub mod selector;
pub mod session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
