//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete run:
//! initialization → (selection → crossover → mutation → re-scoring →
//! replacement → convergence check) × generations → best individual.

use std::sync::Arc;

use rand::Rng;

use super::config::GaConfig;
use super::population::{GenerationStats, Population, PopulationState};
use crate::error::ConfigError;
use crate::model::{Time, Topology};
use crate::random::rng_from_seed;
use crate::schedule::Individual;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best individual of the final population. Its resolved snapshot is
    /// the presentable schedule.
    pub best: Individual,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: Time,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run stopped early on a convergence check.
    pub converged: bool,

    /// Terminal population state.
    pub state: PopulationState,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<Time>,

    /// Per-generation record of parents, crossover and mutation.
    pub stats: Vec<GenerationStats>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_deadlock::ga::{GaConfig, GaRunner};
/// use u_deadlock::model::Topology;
///
/// let mut b = Topology::builder();
/// let i1 = b.item("I1");
/// let r1 = b.resource("R1");
/// let r2 = b.resource("R2");
/// b.request(r1, i1, 5).request(r2, i1, 5);
///
/// let config = GaConfig::default()
///     .with_population_size(5)
///     .with_max_generations(10)
///     .with_seed(42);
/// let result = GaRunner::run(b.build(), &config).unwrap();
/// assert_eq!(result.best_fitness, 10);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    pub fn run(
        topology: impl Into<Arc<Topology>>,
        config: &GaConfig,
    ) -> Result<GaResult, ConfigError> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(topology, config, &mut rng)
    }

    /// Generates a random topology, then runs the GA on it.
    ///
    /// Topology generation and evolution draw from the same seeded
    /// generator, so a fixed seed reproduces both.
    pub fn run_generated(
        item_count: usize,
        resource_count: usize,
        config: &GaConfig,
    ) -> Result<GaResult, ConfigError> {
        let mut rng = rng_from_seed(config.seed);
        let topology = Topology::random(item_count, resource_count, &mut rng);
        Self::run_with_rng(topology, config, &mut rng)
    }

    /// Runs the GA drawing from a caller-supplied generator.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(
        topology: impl Into<Arc<Topology>>,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult, ConfigError> {
        Self::run_with_observer(topology, config, rng, |_| {})
    }

    /// Runs the GA and reports every generation to `observer`.
    pub fn run_with_observer<R: Rng, F: FnMut(&GenerationStats)>(
        topology: impl Into<Arc<Topology>>,
        config: &GaConfig,
        rng: &mut R,
        mut observer: F,
    ) -> Result<GaResult, ConfigError> {
        let topology = topology.into();
        let interval = config.effective_convergence_interval(topology.resource_count());

        // 1. Initialize population
        let mut population = Population::new(topology, config, rng)?;
        tracing::info!(
            population = config.population_size,
            max_generations = config.max_generations,
            convergence_interval = interval,
            initial_best = population.best_fitness(),
            "starting GA"
        );

        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(population.best_fitness());
        let mut stats = Vec::with_capacity(config.max_generations);

        // 2. Evolutionary loop
        for cycle in 0..config.max_generations {
            let generation = population.step(rng);
            tracing::debug!(
                generation = generation.generation,
                best = generation.best_fitness,
                average = generation.average_fitness,
                "generation complete"
            );
            fitness_history.push(generation.best_fitness);
            observer(&generation);
            stats.push(generation);

            // 3. Convergence check
            if interval > 0 && cycle % interval == 0 && population.check_convergence() {
                break;
            }
        }
        population.finish();

        let state = population.state();
        let generations = population.generation();
        let best = population.into_best();
        tracing::info!(
            best = best.fitness(),
            generations,
            state = ?state,
            "GA finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            converged: state == PopulationState::Converged,
            state,
            fitness_history,
            stats,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
