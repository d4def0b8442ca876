//! Genetic optimizer for resource schedules.
//!
//! A steady-state GA over [`Individual`](crate::schedule::Individual)s:
//! every generation samples parents, breeds two fresh children, swaps one
//! resource column between them, optionally mutates, re-resolves, and lets
//! the best two of parents and children survive.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, presets)
//! - [`Population`]: The member set and its lifecycle state
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final best individual with run statistics
//!
//! # Submodules
//!
//! - [`operators`]: Column crossover and swap mutation on candidates
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Syswerda (1991), "A Study of Reproduction in Generational and Steady-State
//!   Genetic Algorithms"

mod config;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::{GaConfig, DEFAULT_SAMPLE_SIZE};
pub use population::{GenerationStats, Population, PopulationState};
pub use runner::{GaResult, GaRunner};
pub use selection::ParentSelection;
pub use types::Scored;
