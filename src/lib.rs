//! Entente: a constraint-solver adjudication core for Diplomacy.
//!
//! One movement turn is modelled as a finite-domain constraint satisfaction
//! problem: per-unit outcomes, per-order strengths, support and convoy
//! statuses are variables, the rulebook is a constraint set, and a
//! backtracking solver finds the unique consistent resolution — circular
//! move chains, support-cut cascades, and convoy paradoxes included.
//!
//! `resolve::adjudicate` is the entry point; `board` holds the map and
//! game-state model, `hypergraph` the canonicalised order structure,
//! `notation` the text order format, and `protocol` the visualiser
//! payload shapes.

pub mod board;
pub mod csp;
pub mod hypergraph;
pub mod notation;
pub mod protocol;
pub mod resolve;
