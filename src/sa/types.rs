//! Core trait for the annealing controller.

use rand::Rng;

/// A problem the annealing controller can drive.
///
/// The implementor owns the state representation, the energy function,
/// the move generator and the feasibility predicate. The controller owns
/// time, temperature, acceptance and termination.
///
/// # Minimization
///
/// The controller minimizes energy. Infinite energy is allowed and marks a
/// state that is never preferred over a finite one.
pub trait AnnealProblem: Send + Sync {
    /// The search state.
    type State: Clone + Send;

    /// The state a run starts from.
    fn initial_state(&self) -> Self::State;

    /// Energy of a state. Lower is better.
    fn energy(&self, state: &Self::State) -> f64;

    /// Proposes a candidate neighbor, or `None` when the draw produced no
    /// genuine change and must be resampled. Never mutates `state`.
    fn propose<R: Rng>(&self, state: &Self::State, rng: &mut R) -> Option<Self::State>;

    /// Whether `state` satisfies the hard constraints.
    fn is_feasible(&self, state: &Self::State) -> bool;
}
