//! Schedule construction and conflict resolution.
//!
//! A candidate schedule is one permutation of every resource's plan. Resolving
//! it simulates all resources in lock-step rounds, inserts delay slots so
//! that no item is served by two resources at the same time, and scores the
//! result by its makespan.
//!
//! The two phases are separate types:
//!
//! - [`Candidate`]: a permutation that may have been edited by genetic
//!   operators. It has no fitness.
//! - [`Individual`]: a resolved candidate. It owns the makespan, the
//!   delay-free permutation (input to further operators) and the
//!   delay-inclusive snapshot (the presentable schedule).
//!
//! [`Candidate::resolve`] is the only way from one to the other, so the
//! fitness of an edited schedule can never be read before it is recomputed.

mod individual;
mod resolver;
mod state;

pub use individual::{Candidate, Individual, Occupancy};
pub use state::ResourceSchedule;
