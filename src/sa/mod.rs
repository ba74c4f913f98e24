//! Simulated annealing controller.
//!
//! Elapsed time `t` starts small and grows by a fixed increment each
//! iteration; temperature is `1 / t`. Strict improvements are always
//! accepted, other candidates are accepted per an [`AcceptanceRule`].
//! A run ends once it is both cooled and feasible, or once it is so cold
//! that it gives up.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod types;

pub use config::{AcceptanceRule, AnnealConfig};
pub use runner::{AnnealResult, AnnealRunner, Termination};
pub use types::AnnealProblem;
