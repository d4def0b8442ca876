//! Units of resource occupancy.

use super::{ItemId, Time};

/// One entry in a resource plan or schedule.
///
/// Timeslots are values: resolution produces new delay slots rather than
/// editing existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timeslot {
    /// The resource serves `item` for `duration`.
    Work {
        /// Requesting item.
        item: ItemId,
        /// Service time.
        duration: Time,
    },
    /// The resource idles while another resource releases an item.
    Delay {
        /// Idle time.
        duration: Time,
    },
}

impl Timeslot {
    /// Label used for delay slots in exported schedules.
    pub const DELAY_LABEL: &'static str = "Delay";

    /// A work slot.
    pub const fn work(item: ItemId, duration: Time) -> Self {
        Self::Work { item, duration }
    }

    /// A delay slot.
    pub const fn delay(duration: Time) -> Self {
        Self::Delay { duration }
    }

    /// Occupied (or idle) time of this slot.
    pub const fn duration(&self) -> Time {
        match *self {
            Self::Work { duration, .. } | Self::Delay { duration } => duration,
        }
    }

    /// The requesting item, `None` for delays.
    pub const fn item(&self) -> Option<ItemId> {
        match *self {
            Self::Work { item, .. } => Some(item),
            Self::Delay { .. } => None,
        }
    }

    /// Whether this is an inserted wait.
    pub const fn is_delay(&self) -> bool {
        matches!(self, Self::Delay { .. })
    }
}
