//! Breakout room assignment by simulated annealing.
//!
//! Assigns `n` students to an unknown number `k` of disjoint rooms so
//! that the summed pairwise happiness inside rooms is high while every
//! room's summed pairwise stress stays within `budget / k`.
//!
//! - **Graph**: complete weighted graph with a happiness and a stress
//!   value per student pair.
//! - **Partition**: set partition of students into non-empty rooms with a
//!   synchronized student → room map, plus the single-student relocation
//!   move.
//! - **Rooms**: scoring, feasibility, the energy function and the
//!   [`rooms::optimize`] entry point.
//! - **SA**: the annealing controller (elapsed-time schedule,
//!   acceptance rule, give-up threshold).
//! - **Exhaustive**: brute-force reference search for tiny instances.
//! - **IO**: plain text instance and assignment formats.
//! - **Batch**: independent runs over many instances, optionally on a
//!   rayon pool (`parallel` feature).
//!
//! # Example
//!
//! ```
//! use breakout_rooms::graph::RoomGraph;
//! use breakout_rooms::rooms::{self, is_feasible};
//! use breakout_rooms::sa::AnnealConfig;
//!
//! let graph = RoomGraph::from_fn(4, |i, j| {
//!     if (i, j) == (0, 1) { (40.0, 5.0) } else { (1.0, 9.0) }
//! });
//! let config = AnnealConfig::default().with_seed(7);
//! let solution = rooms::optimize_with(&graph, 40.0, &config);
//! assert_eq!(solution.assignment.len(), 4);
//! if solution.feasible {
//!     assert!(is_feasible(&graph, &solution.partition, 40.0));
//! }
//! ```

pub mod batch;
pub mod exhaustive;
pub mod graph;
pub mod io;
pub mod partition;
pub mod rooms;
pub mod sa;
