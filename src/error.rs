//! Error types.
//!
//! Configuration problems are detected before the evolutionary loop starts;
//! record errors come from reading flat `(item, time, resource)` rows.

use thiserror::Error;

/// Invalid optimizer configuration or topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Population is smaller than the parent sample drawn each generation.
    #[error("population_size ({size}) must be at least the parent sample size ({sample})")]
    PopulationTooSmall {
        /// Configured population size.
        size: usize,
        /// Configured parent sample size.
        sample: usize,
    },

    /// Parent sample cannot yield two distinct parents.
    #[error("sample_size must be at least 2, got {0}")]
    SampleTooSmall(usize),

    /// Generation cap of zero.
    #[error("max_generations must be at least 1")]
    ZeroGenerations,

    /// Topology has no resources to schedule.
    #[error("topology has no resources")]
    NoResources,

    /// Summed request durations exceed the time range.
    #[error("total requested time overflows the time range")]
    DurationOverflow,
}

/// An explicit schedule order that does not fit its topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// One order per resource is required.
    #[error("expected {expected} resource orders, got {found}")]
    ResourceCountMismatch {
        /// Resources in the topology.
        expected: usize,
        /// Orders supplied.
        found: usize,
    },

    /// The order is not a permutation of the resource's plan.
    #[error("order for resource {0} is not a permutation of its plan")]
    NotAPermutation(usize),
}

/// Malformed flat record input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Input is empty or the first line is not the expected header.
    #[error("missing or invalid header, expected `item,time,resource`")]
    MissingHeader,

    /// A row has fewer than three fields.
    #[error("line {line}: missing field `{field}`")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Name of the absent field.
        field: &'static str,
    },

    /// A row has more than three fields.
    #[error("line {line}: unexpected extra field")]
    ExtraField {
        /// 1-based line number.
        line: usize,
    },

    /// A name cannot be written as a single field: it is empty, has
    /// surrounding whitespace, or contains a comma or line break.
    #[error("name `{name}` cannot be written as a record field")]
    UnwritableName {
        /// Offending item or resource name.
        name: String,
    },

    /// The time column is not a non-negative integer.
    #[error("line {line}: invalid time `{value}`")]
    InvalidTime {
        /// 1-based line number.
        line: usize,
        /// Raw field text.
        value: String,
    },
}
