//! Single-capacity servers.

use std::fmt;

use super::{Time, Timeslot};

/// Index of a [`Resource`] inside its topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceId(usize);

impl ResourceId {
    /// Wraps an arena index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the topology's resource list.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A resource and its plan: the fixed list of work requests it must serve.
///
/// The plan order carries no meaning; candidate schedules permute it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    name: String,
    plan: Vec<Timeslot>,
}

impl Resource {
    /// Creates a resource with an empty plan.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plan: Vec::new(),
        }
    }

    /// Resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Work requests for this resource.
    pub fn plan(&self) -> &[Timeslot] {
        &self.plan
    }

    /// Appends a request to the plan.
    pub fn add_to_plan(&mut self, slot: Timeslot) {
        self.plan.push(slot);
    }

    /// Sum of requested durations, i.e. this resource's time with no waits.
    ///
    /// Saturates at `Time::MAX`.
    pub fn plan_time(&self) -> Time {
        self.plan
            .iter()
            .fold(0, |acc: Time, slot| acc.saturating_add(slot.duration()))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
