//! Annealing configuration and acceptance rules.

/// Rule for accepting a non-improving candidate.
///
/// Both rules draw `v ~ U[0, 1)` and compare it with a probability `P`
/// derived from the energy increase `delta >= 0` and temperature `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AcceptanceRule {
    /// `P = 1 / (1 + exp(-delta / T))`, accept iff `P > v`.
    ///
    /// `P` is at least 0.5 for any non-negative `delta` and grows with
    /// `delta`, so worse candidates are accepted more readily than
    /// Metropolis would. A move to an infinite-energy state is accepted
    /// with certainty.
    #[default]
    Logistic,

    /// Metropolis criterion: `P = exp(-delta / T)`, accept iff `v < P`.
    ///
    /// Reference: Kirkpatrick, Gelatt & Vecchi (1983)
    Metropolis,
}

impl AcceptanceRule {
    /// Probability of accepting a candidate `delta` worse at temperature `t`.
    ///
    /// NaN when `delta` is NaN (both energies infinite), which rejects.
    pub fn probability(self, delta: f64, temperature: f64) -> f64 {
        match self {
            AcceptanceRule::Logistic => 1.0 / (1.0 + (-delta / temperature).exp()),
            AcceptanceRule::Metropolis => (-delta / temperature).exp(),
        }
    }

    /// Applies the rule to a uniform draw `v`.
    pub fn accepts(self, delta: f64, temperature: f64, v: f64) -> bool {
        let p = self.probability(delta, temperature);
        match self {
            AcceptanceRule::Logistic => p > v,
            AcceptanceRule::Metropolis => v < p,
        }
    }
}

/// Configuration for the annealing controller.
///
/// The controller tracks elapsed time `t`, starting at `initial_time` and
/// advancing by `time_increment` after every iteration. Temperature is
/// `1 / t`. A run converges once the temperature is at or below
/// `min_temperature` and the current state is feasible, and gives up once
/// the temperature falls below `give_up_temperature`.
///
/// # Examples
///
/// ```
/// use breakout_rooms::sa::{AcceptanceRule, AnnealConfig};
///
/// let config = AnnealConfig::default()
///     .with_min_temperature(0.04)
///     .with_give_up_temperature(0.01)
///     .with_acceptance(AcceptanceRule::Metropolis)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Elapsed time at the start of a run.
    pub initial_time: f64,

    /// Elapsed time added after every iteration.
    pub time_increment: f64,

    /// Temperature at or below which a feasible state ends the run.
    pub min_temperature: f64,

    /// Temperature below which the run stops regardless of feasibility.
    pub give_up_temperature: f64,

    /// Acceptance rule for non-improving candidates.
    pub acceptance: AcceptanceRule,

    /// Maximum number of proposals drawn per iteration while looking for
    /// a genuine relocation. An iteration that exhausts it moves nothing.
    pub max_proposal_attempts: usize,

    /// Record the current energy every this many iterations. 0 = never.
    pub history_interval: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_time: 0.02,
            time_increment: 0.02,
            min_temperature: 0.04,
            give_up_temperature: 0.005,
            acceptance: AcceptanceRule::default(),
            max_proposal_attempts: 1000,
            history_interval: 100,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_time(mut self, t: f64) -> Self {
        self.initial_time = t;
        self
    }

    pub fn with_time_increment(mut self, dt: f64) -> Self {
        self.time_increment = dt;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_give_up_temperature(mut self, t: f64) -> Self {
        self.give_up_temperature = t;
        self
    }

    pub fn with_acceptance(mut self, rule: AcceptanceRule) -> Self {
        self.acceptance = rule;
        self
    }

    pub fn with_max_proposal_attempts(mut self, n: usize) -> Self {
        self.max_proposal_attempts = n;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Temperature at elapsed time `t`.
    #[inline]
    pub fn temperature(t: f64) -> f64 {
        1.0 / t
    }

    /// Upper bound on the iterations of one run: the number of time steps
    /// until the temperature drops below the give-up threshold. Saturates
    /// at `usize::MAX` for very small thresholds.
    pub fn max_iterations(&self) -> usize {
        let end = 1.0 / self.give_up_temperature;
        if end <= self.initial_time {
            return 0;
        }
        // float to int casts saturate
        let steps = ((end - self.initial_time) / self.time_increment).ceil() as usize;
        steps.saturating_add(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_time > 0.0 && self.initial_time.is_finite()) {
            return Err("initial_time must be positive and finite".into());
        }
        if !(self.time_increment > 0.0 && self.time_increment.is_finite()) {
            return Err("time_increment must be positive and finite".into());
        }
        if self.min_temperature <= 0.0 {
            return Err("min_temperature must be positive".into());
        }
        if self.give_up_temperature <= 0.0 {
            return Err("give_up_temperature must be positive".into());
        }
        if self.give_up_temperature > self.min_temperature {
            return Err(format!(
                "give_up_temperature ({}) must not exceed min_temperature ({})",
                self.give_up_temperature, self.min_temperature
            ));
        }
        if self.max_proposal_attempts == 0 {
            return Err("max_proposal_attempts must be at least 1".into());
        }
        Ok(())
    }
}
