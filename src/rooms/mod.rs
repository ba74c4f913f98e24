//! Breakout room scoring and the annealing entry point.
//!
//! Happiness and stress of a room sum over its ordered student pairs, so
//! each unordered pair counts twice.
//! A partition into `k` rooms is feasible when every room's stress is at
//! most `budget / k`, recomputed for the current `k` so merging or
//! emptying a room moves the bar for every other room.

mod problem;
mod scoring;

pub use problem::{optimize, optimize_with, BreakoutProblem, Solution};
pub use scoring::{energy, is_feasible, per_room_budget, total_happiness, total_stress};
