//! Breakout room assignment as an annealing problem.

use super::scoring::{energy, is_feasible, total_happiness};
use crate::graph::RoomGraph;
use crate::partition::{self, Partition};
use crate::sa::{AnnealConfig, AnnealProblem, AnnealRunner, Termination};
use rand::Rng;

/// A student graph with a total stress budget.
///
/// Runs start from the identity partition and move one student at a
/// time; energy is [`energy`] and feasibility is [`is_feasible`] against
/// the budget split over the current room count.
#[derive(Debug, Clone, Copy)]
pub struct BreakoutProblem<'a> {
    graph: &'a RoomGraph,
    budget: f64,
}

impl<'a> BreakoutProblem<'a> {
    pub fn new(graph: &'a RoomGraph, budget: f64) -> Self {
        Self { graph, budget }
    }

    pub fn graph(&self) -> &'a RoomGraph {
        self.graph
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }
}

impl AnnealProblem for BreakoutProblem<'_> {
    type State = Partition;

    fn initial_state(&self) -> Partition {
        Partition::identity(self.graph.len())
    }

    fn energy(&self, state: &Partition) -> f64 {
        energy(self.graph, state)
    }

    fn propose<R: Rng>(&self, state: &Partition, rng: &mut R) -> Option<Partition> {
        partition::propose(state, rng)
    }

    fn is_feasible(&self, state: &Partition) -> bool {
        is_feasible(self.graph, state, self.budget)
    }
}

/// Outcome of [`optimize`].
///
/// An infeasible solution is an ordinary result: the run gave up before
/// reaching a feasible state. Callers that need a guarantee check
/// `feasible` and may retry with another seed.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Room index per student.
    pub assignment: Vec<usize>,
    pub room_count: usize,
    pub feasible: bool,
    pub termination: Termination,
    pub total_happiness: f64,
    pub energy: f64,
    pub iterations: usize,
    pub partition: Partition,
}

/// Assigns students to rooms with the default annealing configuration.
pub fn optimize(graph: &RoomGraph, total_stress_budget: f64) -> Solution {
    optimize_with(graph, total_stress_budget, &AnnealConfig::default())
}

/// Assigns students to rooms with an explicit configuration.
///
/// Never fails for a valid configuration. An empty graph yields an empty
/// assignment with zero rooms.
///
/// # Panics
/// Panics if `config` is invalid.
pub fn optimize_with(graph: &RoomGraph, total_stress_budget: f64, config: &AnnealConfig) -> Solution {
    if graph.is_empty() {
        return Solution {
            assignment: Vec::new(),
            room_count: 0,
            feasible: true,
            termination: Termination::Converged,
            total_happiness: 0.0,
            energy: f64::INFINITY,
            iterations: 0,
            partition: Partition::identity(0),
        };
    }

    let problem = BreakoutProblem::new(graph, total_stress_budget);
    let result = AnnealRunner::run(&problem, config);
    let partition = result.state;

    Solution {
        assignment: partition.assignment().to_vec(),
        room_count: partition.room_count(),
        feasible: result.feasible,
        termination: result.termination,
        total_happiness: total_happiness(graph, &partition),
        energy: result.energy,
        iterations: result.iterations,
        partition,
    }
}
