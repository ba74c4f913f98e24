//! Exhaustive reference search.
//!
//! Enumerates every assignment of `n` students to exactly `k` rooms and
//! keeps the happiest feasible one. Exponential in `n`; used to check the
//! annealing controller against ground truth on toy inputs.

mod search;

pub use search::{brute_force, ExhaustiveSolution};
