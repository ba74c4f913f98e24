//! Complete weighted student graph.
//!
//! Every unordered pair of distinct students carries two non-negative
//! weights: happiness (reward) and stress (penalty). A [`RoomGraph`] is
//! always complete; incomplete input is rejected when the graph is built.

mod generator;
mod model;

pub use generator::{random_instance, Instance};
pub use model::{GraphError, RoomGraph, RoomGraphBuilder};
