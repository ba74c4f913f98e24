//! Problem instances and random instance generation.

use super::model::RoomGraph;
use rand::Rng;

/// A student graph together with its total stress budget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    pub graph: RoomGraph,
    pub budget: f64,
}

impl Instance {
    pub fn new(graph: RoomGraph, budget: f64) -> Self {
        Self { graph, budget }
    }
}

/// Draws a random instance of `n` students.
///
/// Budget ~ U(0.1, 99.9), happiness ~ U(0.1, 50.0) and stress ~ U(5.0, 10.0)
/// per pair, each rounded to three decimals so the instance survives a
/// text round trip unchanged.
pub fn random_instance<R: Rng>(n: usize, rng: &mut R) -> Instance {
    let budget = round3(rng.random_range(0.1..99.9));
    let graph = RoomGraph::from_fn(n, |_, _| {
        let happiness = round3(rng.random_range(0.1..50.0));
        let stress = round3(rng.random_range(5.0..10.0));
        (happiness, stress)
    });
    Instance { graph, budget }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
