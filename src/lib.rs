//! Mutual-exclusion resource scheduling with a genetic algorithm.
//!
//! Items (processes, people, jobs) request fixed amounts of time on
//! single-capacity resources. An item may not occupy two resources at once.
//! This crate searches for an ordering of every resource's requests that,
//! after inserting the waits needed to honor that rule, has a small
//! makespan.
//!
//! - **Model**: Items, resources, request plans and timeslots, shared by
//!   every candidate of a run.
//! - **Schedule**: Lock-step conflict resolution that turns one permutation
//!   per resource into a delay-annotated, scored schedule.
//! - **GA**: A steady-state genetic algorithm with sampled parent selection,
//!   single-resource column crossover, swap mutation and best-of-four
//!   survivor replacement, stopping on a generation cap or a flat average.
//! - **IO**: Flat `item,time,resource` records for problem definitions and a
//!   report of the final resolved schedule.
//!
//! # Architecture
//!
//! The optimizer is single-threaded and fully deterministic for a given
//! seed: one generator is threaded through every random decision.
//! Resolution itself draws no randomness and can be run in parallel
//! (`parallel` feature).

pub mod error;
pub mod ga;
pub mod io;
pub mod model;
pub mod random;
pub mod schedule;
pub mod telemetry;
