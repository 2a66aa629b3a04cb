//! Card queries.
//!
//! Stateless: a query is evaluated against a card collection and the
//! schema it was loaded with. Property terms are resolved by name, so the
//! same code path serves every game.

pub mod filter;

pub use filter::{filter_cards, CardFilter, CardQuery};
