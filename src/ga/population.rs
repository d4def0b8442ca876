//! Steady-state population.
//!
//! Each generation breeds two children from two sampled parents and lets the
//! best two of the four replace the parents, so the population size never
//! changes.

use std::sync::Arc;

use rand::Rng;

use super::config::GaConfig;
use super::operators::{column_crossover, swap_mutation};
use super::selection::take_best;
use super::types::Scored;
use crate::error::ConfigError;
use crate::model::{Time, Topology};
use crate::schedule::{Candidate, Individual};

/// Lifecycle of a population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationState {
    /// Members created and scored; no generation has run.
    Initialized,
    /// At least one generation has run.
    Evolving,
    /// Stopped early: average fitness unchanged between two checks.
    Converged,
    /// Stopped at the generation cap.
    IterationLimitReached,
}

/// What happened in one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Population indices of the two parents, at selection time.
    pub parents: [usize; 2],
    /// Resource whose column was swapped, `None` if no crossover happened.
    pub crossover_resource: Option<usize>,
    /// Whether the children were mutated.
    pub mutated: bool,
    /// Lowest fitness in the population after replacement.
    pub best_fitness: Time,
    /// Mean fitness in the population after replacement.
    pub average_fitness: f64,
}

/// A fixed-size set of resolved individuals over one topology.
///
/// The configuration validated by [`Population::new`] drives every later
/// [`step`](Population::step).
#[derive(Debug, Clone)]
pub struct Population {
    topology: Arc<Topology>,
    config: GaConfig,
    members: Vec<Individual>,
    state: PopulationState,
    generation: usize,
    last_total: Option<Time>,
}

impl Population {
    /// Creates and resolves `config.population_size` random individuals.
    ///
    /// Fails if the configuration is invalid, the topology has no resources,
    /// or its summed request durations do not fit in [`Time`].
    pub fn new<R: Rng>(
        topology: Arc<Topology>,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if topology.resource_count() == 0 {
            return Err(ConfigError::NoResources);
        }
        // Resolved times never exceed the sum of all durations.
        if topology.total_duration().is_none() {
            return Err(ConfigError::DurationOverflow);
        }

        let candidates: Vec<Candidate> = (0..config.population_size)
            .map(|_| Candidate::random(Arc::clone(&topology), rng))
            .collect();
        let members = resolve_all(candidates, config.parallel);

        Ok(Self {
            topology,
            config: config.clone(),
            members,
            state: PopulationState::Initialized,
            generation: 0,
            last_total: None,
        })
    }

    /// Runs one generation.
    ///
    /// Random draws happen in a fixed order: crossover draw, mutation draw,
    /// parent sample, both children, crossover resource, mutation picks.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> GenerationStats {
        let config = &self.config;
        self.state = PopulationState::Evolving;
        self.generation += 1;

        let crossover_draw: f64 = rng.random();
        let mutation_draw: f64 = rng.random();
        let parents = config
            .selection
            .select(&self.members, config.sample_size, rng);

        let mut child1 = Candidate::random(Arc::clone(&self.topology), rng);
        let mut child2 = Candidate::random(Arc::clone(&self.topology), rng);

        let mut crossover_resource = None;
        let mut mutated = false;
        if crossover_draw < config.crossover_rate {
            let resource = rng.random_range(0..self.topology.resource_count());
            column_crossover(
                &mut child1,
                &mut child2,
                &self.members[parents[0]],
                &self.members[parents[1]],
                resource,
            );
            crossover_resource = Some(resource);

            if mutation_draw < config.mutation_rate {
                swap_mutation(&mut child1, rng);
                swap_mutation(&mut child2, rng);
                mutated = true;
            }

            let children = [child1.resolve(), child2.resolve()];
            self.replace_parents(parents, children);
        }

        GenerationStats {
            generation: self.generation,
            parents,
            crossover_resource,
            mutated,
            best_fitness: self.best_fitness(),
            average_fitness: self.average_fitness(),
        }
    }

    /// Survivor selection: the parents leave, the best two of
    /// {parent1, parent2, child1, child2} are appended.
    fn replace_parents(&mut self, parents: [usize; 2], children: [Individual; 2]) {
        let size = self.members.len();
        let [a, b] = parents;
        let (hi, lo) = if a > b { (a, b) } else { (b, a) };
        let removed_hi = self.members.remove(hi);
        let removed_lo = self.members.remove(lo);
        let (p1, p2) = if a > b {
            (removed_hi, removed_lo)
        } else {
            (removed_lo, removed_hi)
        };

        let [c1, c2] = children;
        let mut contestants = vec![p1, p2, c1, c2];
        let mut order: Vec<usize> = (0..contestants.len()).collect();
        let first = take_best(&contestants, &mut order);
        let second = take_best(&contestants, &mut order);

        let (winner1, winner2) = if first > second {
            let w1 = contestants.swap_remove(first);
            let w2 = contestants.swap_remove(second);
            (w1, w2)
        } else {
            let w2 = contestants.swap_remove(second);
            let w1 = contestants.swap_remove(first);
            (w1, w2)
        };
        self.members.push(winner1);
        self.members.push(winner2);

        assert_eq!(self.members.len(), size, "population size changed");
    }

    /// Compares the average fitness with the previous check.
    ///
    /// Returns `true` (and moves to [`PopulationState::Converged`]) when it
    /// is unchanged; otherwise records it and returns `false`. The first
    /// check only records.
    pub fn check_convergence(&mut self) -> bool {
        // Size is constant, so equal totals mean equal averages.
        let total: Time = self.members.iter().map(Scored::fitness).sum();
        let converged = self.last_total == Some(total);
        tracing::debug!(
            generation = self.generation,
            average = self.average_fitness(),
            converged,
            "convergence check"
        );
        self.last_total = Some(total);
        if converged {
            self.state = PopulationState::Converged;
        }
        converged
    }

    /// Marks the run as stopped by the generation cap unless it converged.
    pub fn finish(&mut self) {
        if self.state != PopulationState::Converged {
            self.state = PopulationState::IterationLimitReached;
        }
    }

    /// Configuration the population was built with.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PopulationState {
        self.state
    }

    /// Generations run so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Shared problem definition.
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// Members in their current order.
    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether there are no members. Never true for a constructed population.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The first member with the lowest fitness.
    pub fn best(&self) -> &Individual {
        self.members
            .iter()
            .min_by_key(|m| m.fitness())
            .expect("population must not be empty")
    }

    /// Lowest fitness among members.
    pub fn best_fitness(&self) -> Time {
        self.best().fitness()
    }

    /// Mean fitness of members.
    pub fn average_fitness(&self) -> f64 {
        let total: Time = self.members.iter().map(Scored::fitness).sum();
        total as f64 / self.members.len() as f64
    }

    /// Consumes the population and returns its best member.
    pub fn into_best(self) -> Individual {
        let idx = self
            .members
            .iter()
            .enumerate()
            .min_by_key(|(_, m)| m.fitness())
            .map(|(i, _)| i)
            .expect("population must not be empty");
        let mut members = self.members;
        members.swap_remove(idx)
    }
}

/// Resolves candidates, in parallel when enabled. Order is preserved.
#[cfg(feature = "parallel")]
fn resolve_all(candidates: Vec<Candidate>, parallel: bool) -> Vec<Individual> {
    use rayon::prelude::*;

    if parallel {
        candidates.into_par_iter().map(Candidate::resolve).collect()
    } else {
        candidates.into_iter().map(Candidate::resolve).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn resolve_all(candidates: Vec<Candidate>, _parallel: bool) -> Vec<Individual> {
    candidates.into_iter().map(Candidate::resolve).collect()
}
