//! Per-resource schedule bookkeeping.

use crate::model::{Time, Timeslot};

/// One resource's mutable schedule inside a candidate.
///
/// Holds the current slot order, the time accumulated by the last
/// resolution, and how many delay slots that resolution queued for
/// insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSchedule {
    slots: Vec<Timeslot>,
    total_time: Time,
    expanded_size: usize,
}

impl ResourceSchedule {
    /// Creates a schedule with the given slot order and zeroed counters.
    pub fn from_slots(slots: Vec<Timeslot>) -> Self {
        Self {
            slots,
            total_time: 0,
            expanded_size: 0,
        }
    }

    /// Current slot order.
    pub fn slots(&self) -> &[Timeslot] {
        &self.slots
    }

    /// Mutable view of the slots. The length cannot change through it.
    pub fn slots_mut(&mut self) -> &mut [Timeslot] {
        &mut self.slots
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the schedule has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Time consumed so far, waits included.
    pub fn total_time(&self) -> Time {
        self.total_time
    }

    /// Delay slots queued by the current resolution pass.
    pub fn expanded_size(&self) -> usize {
        self.expanded_size
    }

    /// Appends a slot.
    pub fn push(&mut self, slot: Timeslot) {
        self.slots.push(slot);
    }

    /// Removes all slots and zeroes the counters.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.reset();
    }

    /// Zeroes `total_time` and `expanded_size`, keeping the slots.
    pub fn reset(&mut self) {
        self.total_time = 0;
        self.expanded_size = 0;
    }

    /// Serves a slot with no wait.
    ///
    /// Saturates at `Time::MAX`.
    pub fn add_time(&mut self, duration: Time) {
        self.total_time = self.total_time.saturating_add(duration);
    }

    /// Idles until `release`, then serves a slot of `duration`.
    ///
    /// Returns the idle time. `release` earlier than the current time means
    /// no wait. Saturates at `Time::MAX`.
    pub fn wait_until_then_add(&mut self, release: Time, duration: Time) -> Time {
        let wait = release.saturating_sub(self.total_time);
        self.total_time = self.total_time.max(release).saturating_add(duration);
        wait
    }

    /// Records one queued delay and returns the schedule index it goes to
    /// for a slot currently at `position`.
    ///
    /// Each earlier delay of this pass shifts later slots right by one.
    pub fn expand(&mut self, position: usize) -> usize {
        let index = position + self.expanded_size;
        self.expanded_size += 1;
        index
    }

    /// Inserts a slot at `index`.
    pub(crate) fn insert(&mut self, index: usize, slot: Timeslot) {
        self.slots.insert(index, slot);
    }

    /// Drops every delay slot, leaving only work in its current order.
    pub fn strip_delays(&mut self) {
        self.slots.retain(|s| !s.is_delay());
    }
}
