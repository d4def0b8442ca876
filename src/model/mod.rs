//! Problem definition: who requests which resource, and for how long.
//!
//! A [`Topology`] is built once per problem and shared (behind an `Arc`)
//! by every candidate schedule of a run. Items and resources live in
//! arenas inside the topology and are addressed by [`ItemId`] and
//! [`ResourceId`]; nothing in this module is mutated after construction.
//!
//! # Key Types
//!
//! - [`Item`]: a requester (process, person, job)
//! - [`Resource`]: a single-capacity server with a fixed request plan
//! - [`Timeslot`]: one unit of work or one inserted idle wait
//! - [`Topology`] / [`TopologyBuilder`]: the assembled problem

mod item;
mod resource;
mod timeslot;
mod topology;

pub use item::{Item, ItemId};
pub use resource::{Resource, ResourceId};
pub use timeslot::Timeslot;
pub use topology::{Topology, TopologyBuilder, MAX_GENERATED_DURATION};

/// Time unit for durations and accumulated resource time.
pub type Time = u64;
