//! Lock-step conflict resolution.
//!
//! Round `i` visits position `i` of every resource schedule, in resource
//! order. A table keeps, per item, the resource that served it most recently.
//! When a resource reaches a slot whose item is held by a resource that is
//! further ahead in time, it idles until that resource's current time.
//!
//! Rounds must interleave across resources: the wait computed in round `i`
//! depends on the times every other resource reached in rounds `< i`.

use super::state::ResourceSchedule;
use crate::model::{Time, Timeslot};

/// A delay to splice into a schedule once all rounds have run.
#[derive(Debug, Clone, Copy)]
struct PendingDelay {
    resource: usize,
    index: usize,
    duration: Time,
}

/// Resolves `schedules` in place and returns the makespan.
///
/// Expects delay-free schedules whose work slots reference items
/// `0..item_count`. On return every schedule contains its inserted delay
/// slots and its final `total_time`.
pub(crate) fn resolve(schedules: &mut [ResourceSchedule], item_count: usize) -> Time {
    for schedule in schedules.iter_mut() {
        schedule.reset();
    }

    let rounds = schedules.iter().map(ResourceSchedule::len).max().unwrap_or(0);
    let mut holder: Vec<Option<usize>> = vec![None; item_count];
    let mut pending = Vec::new();

    for position in 0..rounds {
        for r in 0..schedules.len() {
            let Some(&Timeslot::Work { item, duration }) = schedules[r].slots().get(position)
            else {
                continue;
            };

            let own_time = schedules[r].total_time();
            let release = holder[item.index()]
                .map(|h| schedules[h].total_time())
                .filter(|&t| t > own_time);

            match release {
                Some(release) => {
                    let index = schedules[r].expand(position);
                    let wait = schedules[r].wait_until_then_add(release, duration);
                    tracing::trace!(resource = r, position, index, wait, "queued delay");
                    pending.push(PendingDelay {
                        resource: r,
                        index,
                        duration: wait,
                    });
                }
                None => schedules[r].add_time(duration),
            }

            holder[item.index()] = Some(r);
        }
    }

    // Per resource, delays were queued in increasing position order with
    // the shift already applied, so inserting in queue order is exact.
    for delay in pending {
        schedules[delay.resource].insert(delay.index, Timeslot::delay(delay.duration));
    }

    makespan(schedules)
}

/// Largest `total_time` across resources, zero when there are none.
pub(crate) fn makespan(schedules: &[ResourceSchedule]) -> Time {
    schedules
        .iter()
        .map(ResourceSchedule::total_time)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    fn work(i: usize, d: Time) -> Timeslot {
        Timeslot::work(ItemId::new(i), d)
    }

    fn schedules(orders: Vec<Vec<Timeslot>>) -> Vec<ResourceSchedule> {
        orders.into_iter().map(ResourceSchedule::from_slots).collect()
    }

    #[test]
    fn test_shared_item_is_delayed() {
        let mut s = schedules(vec![vec![work(0, 5)], vec![work(0, 5)]]);
        let fitness = resolve(&mut s, 1);

        assert_eq!(fitness, 10);
        assert_eq!(s[0].total_time(), 5);
        assert_eq!(s[1].total_time(), 10);
        assert_eq!(s[0].slots(), &[work(0, 5)]);
        assert_eq!(s[1].slots(), &[Timeslot::delay(5), work(0, 5)]);
    }

    #[test]
    fn test_single_resource_never_waits() {
        let mut s = schedules(vec![vec![work(0, 3), work(1, 4), work(2, 2)]]);
        assert_eq!(resolve(&mut s, 3), 9);
        assert!(s[0].slots().iter().all(|slot| !slot.is_delay()));
    }

    #[test]
    fn test_repeated_item_on_same_resource() {
        let mut s = schedules(vec![vec![work(0, 2), work(0, 3)]]);
        assert_eq!(resolve(&mut s, 1), 5);
        assert_eq!(s[0].len(), 2);
    }

    #[test]
    fn test_empty_resource_contributes_nothing() {
        let mut s = schedules(vec![vec![], vec![work(0, 4)]]);
        assert_eq!(resolve(&mut s, 1), 4);
        assert_eq!(s[0].total_time(), 0);
    }

    #[test]
    fn test_no_resources() {
        let mut s: Vec<ResourceSchedule> = Vec::new();
        assert_eq!(resolve(&mut s, 0), 0);
    }

    #[test]
    fn test_holder_behind_requires_no_delay() {
        // R0 serves item 1 early; R1 reaches item 1 later in time.
        let mut s = schedules(vec![vec![work(1, 1)], vec![work(0, 6), work(1, 2)]]);
        assert_eq!(resolve(&mut s, 2), 8);
        assert!(s[1].slots().iter().all(|slot| !slot.is_delay()));
    }

    #[test]
    fn test_multiple_delays_land_before_their_slots() {
        // R0: A(4) B(4); R1: A(1) B(1)
        // Round 0: R0 takes A -> 4; R1 wants A held until 4 -> wait 4, now 5.
        // Round 1: R0 takes B -> 8; R1 wants B held until 8 -> wait 3, now 9.
        let mut s = schedules(vec![
            vec![work(0, 4), work(1, 4)],
            vec![work(0, 1), work(1, 1)],
        ]);
        assert_eq!(resolve(&mut s, 2), 9);
        assert_eq!(
            s[1].slots(),
            &[
                Timeslot::delay(4),
                work(0, 1),
                Timeslot::delay(3),
                work(1, 1)
            ]
        );
        assert_eq!(s[1].expanded_size(), 2);
    }

    #[test]
    fn test_resolution_restarts_counters() {
        let mut s = schedules(vec![vec![work(0, 5)], vec![work(0, 5)]]);
        resolve(&mut s, 1);
        for schedule in &mut s {
            schedule.strip_delays();
        }
        assert_eq!(resolve(&mut s, 1), 10);
        assert_eq!(s[1].expanded_size(), 1);
    }
}
