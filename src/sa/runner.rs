//! Annealing execution loop.

use super::config::AnnealConfig;
use super::types::AnnealProblem;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Cooled to `min_temperature` in a feasible state.
    Converged,
    /// Temperature fell below `give_up_temperature`; the state may be
    /// infeasible.
    GaveUp,
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult<S: Clone> {
    /// The state held when the run ended.
    pub state: S,

    /// Energy of `state`.
    pub energy: f64,

    /// Whether `state` is feasible.
    pub feasible: bool,

    pub termination: Termination,

    /// Number of iterations (time steps) executed.
    pub iterations: usize,

    /// Number of accepted candidates (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving candidates.
    pub improving_moves: usize,

    /// Iterations in which no genuine relocation was found within
    /// `max_proposal_attempts` draws.
    pub exhausted_proposals: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Current energy sampled every `history_interval` iterations.
    pub energy_history: Vec<f64>,
}

/// Executes the annealing controller.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Runs the controller from the problem's initial state.
    ///
    /// Each iteration draws proposals until one is a genuine change,
    /// accepts it unconditionally if it lowers the energy and otherwise
    /// consults [`AcceptanceRule`](super::AcceptanceRule), then advances
    /// elapsed time. The run ends with [`Termination::Converged`] once the
    /// temperature is at or below `min_temperature` in a feasible state,
    /// or with [`Termination::GaveUp`] once it drops below
    /// `give_up_temperature`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`AnnealConfig::validate`]
    /// first to get a descriptive error).
    pub fn run<P: AnnealProblem>(problem: &P, config: &AnnealConfig) -> AnnealResult<P::State> {
        if let Err(e) = config.validate() {
            panic!("invalid AnnealConfig: {e}");
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut current = problem.initial_state();
        let mut current_energy = problem.energy(&current);

        let mut t = config.initial_time;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut exhausted_proposals = 0usize;

        let mut energy_history = vec![current_energy];

        debug!(
            seed,
            initial_energy = current_energy,
            initial_temperature = AnnealConfig::temperature(t),
            "annealing started"
        );

        let termination = loop {
            let temperature = AnnealConfig::temperature(t);

            if temperature <= config.min_temperature && problem.is_feasible(&current) {
                break Termination::Converged;
            }
            if temperature < config.give_up_temperature {
                break Termination::GaveUp;
            }

            let candidate =
                (0..config.max_proposal_attempts).find_map(|_| problem.propose(&current, &mut rng));

            match candidate {
                Some(candidate) => {
                    let candidate_energy = problem.energy(&candidate);
                    let delta = candidate_energy - current_energy;

                    let accept = if delta < 0.0 {
                        improving_moves += 1;
                        true
                    } else {
                        let v: f64 = rng.random_range(0.0..1.0);
                        config.acceptance.accepts(delta, temperature, v)
                    };

                    if accept {
                        trace!(iteration = iterations, delta, temperature, "move accepted");
                        current = candidate;
                        current_energy = candidate_energy;
                        accepted_moves += 1;
                    }
                }
                None => exhausted_proposals += 1,
            }

            iterations += 1;
            if config.history_interval > 0 && iterations.is_multiple_of(config.history_interval) {
                energy_history.push(current_energy);
            }

            t += config.time_increment;
        };

        let feasible = match termination {
            Termination::Converged => true,
            Termination::GaveUp => problem.is_feasible(&current),
        };

        debug!(
            ?termination,
            feasible,
            iterations,
            accepted_moves,
            improving_moves,
            final_energy = current_energy,
            "annealing finished"
        );

        AnnealResult {
            state: current,
            energy: current_energy,
            feasible,
            termination,
            iterations,
            accepted_moves,
            improving_moves,
            exhausted_proposals,
            final_temperature: AnnealConfig::temperature(t),
            energy_history,
        }
    }
}
