//! Resolved schedule export.

use std::fmt;

use crate::model::{Time, Timeslot};
use crate::schedule::Individual;

/// One slot of an exported schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotReport {
    /// Item name, or `Delay`.
    pub label: String,
    /// Slot length.
    pub duration: Time,
    /// Whether the slot is an inserted wait.
    pub is_delay: bool,
}

/// One resource of an exported schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceReport {
    /// Resource name.
    pub name: String,
    /// Completion time including waits.
    pub total_time: Time,
    /// Delay-inclusive slots in service order.
    pub slots: Vec<SlotReport>,
}

/// The delay-inclusive schedule of a resolved individual plus its makespan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleReport {
    /// Largest resource completion time.
    pub makespan: Time,
    /// Per-resource schedules, in topology order.
    pub resources: Vec<ResourceReport>,
}

impl ScheduleReport {
    /// Builds the report from an individual's resolved snapshot.
    pub fn from_individual(individual: &Individual) -> Self {
        let topology = individual.topology();
        let resources = topology
            .resources()
            .iter()
            .enumerate()
            .map(|(r, resource)| ResourceReport {
                name: resource.name().to_string(),
                total_time: individual.total_time(r),
                slots: individual
                    .resolved(r)
                    .iter()
                    .map(|slot: &Timeslot| SlotReport {
                        label: topology.slot_label(slot).to_string(),
                        duration: slot.duration(),
                        is_delay: slot.is_delay(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            makespan: individual.fitness(),
            resources,
        }
    }

    /// Total idle time inserted across all resources.
    pub fn total_delay(&self) -> Time {
        self.resources
            .iter()
            .flat_map(|r| &r.slots)
            .filter(|s| s.is_delay)
            .map(|s| s.duration)
            .sum()
    }
}

impl fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for resource in &self.resources {
            write!(f, "{}: [", resource.name)?;
            for (k, slot) in resource.slots.iter().enumerate() {
                if k > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "({}, {})", slot.label, slot.duration)?;
            }
            writeln!(f, "]")?;
        }
        write!(f, "makespan: {}", self.makespan)
    }
}
