//! Batch driver over many independent instances.

mod runner;

pub use runner::{BatchJob, BatchOutcome, BatchRunner, DirReport};
