//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::ParentSelection;
use crate::error::ConfigError;

/// Default number of members sampled when choosing parents.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Configuration for the scheduling GA.
///
/// # Defaults
///
/// ```
/// use u_deadlock::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.max_generations, 1000);
/// assert_eq!(config.sample_size, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_deadlock::ga::{GaConfig, ParentSelection};
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_max_generations(200)
///     .with_selection(ParentSelection::Roulette)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of individuals in the population. Constant across generations.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Probability that a generation performs crossover (0.0–1.0).
    ///
    /// Generations without crossover leave the population unchanged.
    pub crossover_rate: f64,

    /// Probability that the children of a crossover are also mutated.
    pub mutation_rate: f64,

    /// Distinct members drawn per generation; the parents come from this sample.
    pub sample_size: usize,

    /// How the two parents are chosen from the sample.
    pub selection: ParentSelection,

    /// Generations between convergence checks.
    ///
    /// `None` derives the interval from the resource count
    /// (see [`convergence_interval_for`](Self::convergence_interval_for)).
    /// `Some(0)` disables early stopping.
    pub convergence_interval: Option<usize>,

    /// Whether to resolve the initial population in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Resolution draws no
    /// random numbers, so results do not depend on this flag.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 1000,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            sample_size: DEFAULT_SAMPLE_SIZE,
            selection: ParentSelection::default(),
            convergence_interval: None,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the parent sample size.
    pub fn with_sample_size(mut self, k: usize) -> Self {
        self.sample_size = k;
        self
    }

    /// Sets the parent selection rule.
    pub fn with_selection(mut self, sel: ParentSelection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets a fixed convergence check interval (0 to disable).
    pub fn with_convergence_interval(mut self, generations: usize) -> Self {
        self.convergence_interval = Some(generations);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for small topologies.
    ///
    /// - Population: 20, Generations: 300
    pub fn fast() -> Self {
        Self {
            population_size: 20,
            max_generations: 300,
            ..Self::default()
        }
    }

    /// Preset for medium topologies.
    ///
    /// - Population: 50, Generations: 1000
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for large topologies.
    ///
    /// - Population: 100, Generations: 2000
    pub fn quality() -> Self {
        Self {
            population_size: 100,
            max_generations: 2000,
            ..Self::default()
        }
    }

    /// Selects a preset from the number of resources.
    ///
    /// - `resource_count < 10` → [`fast()`](Self::fast)
    /// - `10 ≤ resource_count < 100` → [`balanced()`](Self::balanced)
    /// - `resource_count ≥ 100` → [`quality()`](Self::quality)
    pub fn auto_select(resource_count: usize) -> Self {
        if resource_count < 10 {
            Self::fast()
        } else if resource_count < 100 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Derived convergence interval: `1000 / resource_count`, clamped to
    /// `10..=250`. More resources mean more frequent checks.
    pub fn convergence_interval_for(resource_count: usize) -> usize {
        (1000 / resource_count.max(1)).clamp(10, 250)
    }

    /// Effective convergence interval for a topology; 0 means disabled.
    pub fn effective_convergence_interval(&self, resource_count: usize) -> usize {
        self.convergence_interval
            .unwrap_or_else(|| Self::convergence_interval_for(resource_count))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_size < 2 {
            return Err(ConfigError::SampleTooSmall(self.sample_size));
        }
        if self.population_size < self.sample_size {
            return Err(ConfigError::PopulationTooSmall {
                size: self.population_size,
                sample: self.sample_size,
            });
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 1000);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.2).abs() < 1e-10);
        assert_eq!(config.sample_size, 5);
        assert_eq!(config.selection, ParentSelection::BestOfSample);
        assert!(config.convergence_interval.is_none());
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(12)
            .with_max_generations(40)
            .with_crossover_rate(0.5)
            .with_mutation_rate(0.1)
            .with_sample_size(4)
            .with_selection(ParentSelection::Roulette)
            .with_convergence_interval(7)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 12);
        assert_eq!(config.max_generations, 40);
        assert!((config.crossover_rate - 0.5).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.sample_size, 4);
        assert_eq!(config.selection, ParentSelection::Roulette);
        assert_eq!(config.convergence_interval, Some(7));
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-2.0);
        assert!((config.crossover_rate - 1.0).abs() < 1e-10);
        assert!(config.mutation_rate.abs() < 1e-10);
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
        assert!(GaConfig::default().with_population_size(5).validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(4);
        assert_eq!(
            config.validate(),
            Err(ConfigError::PopulationTooSmall { size: 4, sample: 5 })
        );
    }

    #[test]
    fn test_validate_sample_too_small() {
        let config = GaConfig::default().with_sample_size(1);
        assert_eq!(config.validate(), Err(ConfigError::SampleTooSmall(1)));
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroGenerations));
    }

    #[test]
    fn test_presets_validate() {
        for config in [GaConfig::fast(), GaConfig::balanced(), GaConfig::quality()] {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_auto_select_boundaries() {
        assert_eq!(GaConfig::auto_select(9).population_size, 20);
        assert_eq!(GaConfig::auto_select(10).population_size, 50);
        assert_eq!(GaConfig::auto_select(99).max_generations, 1000);
        assert_eq!(GaConfig::auto_select(100).max_generations, 2000);
    }

    #[test]
    fn test_convergence_interval_shrinks_with_resources() {
        assert_eq!(GaConfig::convergence_interval_for(0), 250);
        assert_eq!(GaConfig::convergence_interval_for(2), 250);
        assert_eq!(GaConfig::convergence_interval_for(10), 100);
        assert_eq!(GaConfig::convergence_interval_for(50), 20);
        assert_eq!(GaConfig::convergence_interval_for(500), 10);
    }

    #[test]
    fn test_effective_convergence_interval() {
        let config = GaConfig::default();
        assert_eq!(config.effective_convergence_interval(10), 100);
        let config = config.with_convergence_interval(0);
        assert_eq!(config.effective_convergence_interval(10), 0);
    }
}
