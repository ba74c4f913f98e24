//! Independent annealing runs over many instances.

use crate::graph::Instance;
use crate::io::{read_instance_file, write_assignment_file, ParseError};
use crate::rooms::{optimize_with, Solution};
use crate::sa::AnnealConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// A named instance to solve.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub name: String,
    pub instance: Instance,
}

/// Result for one [`BatchJob`].
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub name: String,
    /// Last solution produced; feasible unless every attempt failed.
    pub solution: Solution,
    /// Number of annealing runs used.
    pub attempts: usize,
}

/// Summary of [`BatchRunner::run_dir`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirReport {
    /// Instances whose assignment was written.
    pub written: usize,
    /// Instances skipped because an output already existed.
    pub skipped: usize,
    /// Instances that could not be read or stayed infeasible after every
    /// attempt.
    pub failed: Vec<String>,
}

/// Runs [`optimize_with`] over many instances.
///
/// Each instance is solved independently. An infeasible result is
/// retried with a fresh seed until `max_attempts` runs have been made.
/// With the `parallel` feature instances are spread over a rayon pool;
/// no two runs ever share an instance.
///
/// # Examples
///
/// ```
/// use breakout_rooms::batch::{BatchJob, BatchRunner};
/// use breakout_rooms::graph::random_instance;
/// use breakout_rooms::sa::AnnealConfig;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let jobs: Vec<BatchJob> = (0..3)
///     .map(|i| BatchJob { name: format!("small-{i}"), instance: random_instance(6, &mut rng) })
///     .collect();
/// let runner = BatchRunner::new(AnnealConfig::default().with_seed(9)).with_max_attempts(2);
/// let outcomes = runner.run(&jobs);
/// assert_eq!(outcomes.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: AnnealConfig,
    max_attempts: usize,
}

impl BatchRunner {
    pub fn new(config: AnnealConfig) -> Self {
        Self {
            config,
            max_attempts: 3,
        }
    }

    /// Sets the number of runs per instance (at least one).
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n.max(1);
        self
    }

    /// Solves every job; outcomes are returned in job order.
    pub fn run(&self, jobs: &[BatchJob]) -> Vec<BatchOutcome> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            jobs.par_iter()
                .enumerate()
                .map(|(index, job)| self.solve(index, job))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            jobs.iter()
                .enumerate()
                .map(|(index, job)| self.solve(index, job))
                .collect()
        }
    }

    /// Solves one job, retrying while the result is infeasible.
    pub fn solve(&self, index: usize, job: &BatchJob) -> BatchOutcome {
        let mut attempts = 0;
        loop {
            let config = self.attempt_config(index, attempts);
            let solution = optimize_with(&job.instance.graph, job.instance.budget, &config);
            attempts += 1;

            if solution.feasible || attempts >= self.max_attempts {
                if solution.feasible {
                    debug!(job = %job.name, attempts, rooms = solution.room_count, "solved");
                } else {
                    warn!(job = %job.name, attempts, "no feasible assignment found");
                }
                return BatchOutcome {
                    name: job.name.clone(),
                    solution,
                    attempts,
                };
            }
        }
    }

    /// Solves every `*.in` file in `input_dir`, writing `<stem>.out` files
    /// into `output_dir` for feasible results. Existing outputs are left
    /// untouched and their instances are not solved. A file that cannot be
    /// read or parsed is recorded in [`DirReport::failed`] and the rest of
    /// the directory is still processed.
    pub fn run_dir(
        &self,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<DirReport, ParseError> {
        let output_dir = output_dir.as_ref();
        let mut report = DirReport::default();

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(input_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "in") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut jobs = Vec::with_capacity(paths.len());
        for path in paths {
            let name = match path.file_stem() {
                Some(stem) => stem.to_string_lossy().into_owned(),
                None => continue,
            };
            if output_dir.join(format!("{name}.out")).exists() {
                report.skipped += 1;
                continue;
            }
            match read_instance_file(&path) {
                Ok(instance) => jobs.push(BatchJob { name, instance }),
                Err(e) => {
                    warn!(job = %name, error = %e, "unreadable instance");
                    report.failed.push(name);
                }
            }
        }

        info!(jobs = jobs.len(), skipped = report.skipped, "batch started");

        std::fs::create_dir_all(output_dir)?;
        for outcome in self.run(&jobs) {
            if outcome.solution.feasible {
                let path = output_dir.join(format!("{}.out", outcome.name));
                write_assignment_file(path, &outcome.solution.assignment)?;
                report.written += 1;
            } else {
                report.failed.push(outcome.name);
            }
        }

        info!(
            written = report.written,
            failed = report.failed.len(),
            "batch finished"
        );
        Ok(report)
    }

    /// Per-attempt configuration. Seeded batches derive a distinct seed for
    /// every (job, attempt) pair so runs are reproducible regardless of
    /// scheduling.
    fn attempt_config(&self, index: usize, attempt: usize) -> AnnealConfig {
        let mut config = self.config.clone();
        if let Some(seed) = self.config.seed {
            config.seed = Some(mix_seed(seed, index as u64, attempt as u64));
        }
        config
    }
}

/// SplitMix64 finalizer over the combined inputs.
fn mix_seed(seed: u64, index: u64, attempt: u64) -> u64 {
    let mut z = seed
        .wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(attempt.wrapping_mul(0xD1B5_4A32_D192_ED03));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
