//! Candidate and resolved schedules.

use std::sync::Arc;

use rand::Rng;

use super::resolver;
use super::state::ResourceSchedule;
use crate::error::ScheduleError;
use crate::io::ScheduleReport;
use crate::model::{ItemId, Time, Timeslot, Topology};
use crate::random::shuffle;

/// An unscored schedule: one slot order per resource.
///
/// Produced at random, from explicit orders, or from an [`Individual`] that
/// is about to be edited. Call [`resolve`](Self::resolve) to score it.
#[derive(Debug, Clone)]
pub struct Candidate {
    topology: Arc<Topology>,
    schedules: Vec<ResourceSchedule>,
}

impl Candidate {
    /// Copies every plan and shuffles each copy independently.
    pub fn random<R: Rng>(topology: Arc<Topology>, rng: &mut R) -> Self {
        let schedules = topology
            .resources()
            .iter()
            .map(|resource| {
                let mut slots = resource.plan().to_vec();
                shuffle(&mut slots, rng);
                ResourceSchedule::from_slots(slots)
            })
            .collect();
        Self {
            topology,
            schedules,
        }
    }

    /// Uses the given order for each resource.
    ///
    /// Each order must be a permutation of that resource's plan.
    pub fn from_orders(
        topology: Arc<Topology>,
        orders: Vec<Vec<Timeslot>>,
    ) -> Result<Self, ScheduleError> {
        if orders.len() != topology.resource_count() {
            return Err(ScheduleError::ResourceCountMismatch {
                expected: topology.resource_count(),
                found: orders.len(),
            });
        }
        for (r, (order, resource)) in orders.iter().zip(topology.resources()).enumerate() {
            if !is_permutation_of(order, resource.plan()) {
                return Err(ScheduleError::NotAPermutation(r));
            }
        }
        let schedules = orders.into_iter().map(ResourceSchedule::from_slots).collect();
        Ok(Self {
            topology,
            schedules,
        })
    }

    /// Shared problem definition.
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// Number of resource schedules.
    pub fn resource_count(&self) -> usize {
        self.schedules.len()
    }

    /// Slot order of one resource.
    pub fn schedule(&self, resource: usize) -> &[Timeslot] {
        self.schedules[resource].slots()
    }

    /// Editable slot order of one resource. Its length is fixed.
    ///
    /// Only reorder the slots; writing a delay makes
    /// [`resolve`](Self::resolve) panic.
    pub fn schedule_mut(&mut self, resource: usize) -> &mut [Timeslot] {
        self.schedules[resource].slots_mut()
    }

    /// Resolves conflicts, scores, snapshots the delay-inclusive schedule,
    /// then strips the delays from the working order.
    ///
    /// # Panics
    /// Panics if a working order contains a delay slot.
    pub fn resolve(mut self) -> Individual {
        for (r, schedule) in self.schedules.iter().enumerate() {
            assert!(
                !schedule.slots().iter().any(Timeslot::is_delay),
                "working order of resource {r} contains a delay"
            );
        }
        let fitness = resolver::resolve(&mut self.schedules, self.topology.item_count());
        let resolved = self
            .schedules
            .iter()
            .map(|s| s.slots().to_vec())
            .collect();
        for schedule in &mut self.schedules {
            schedule.strip_delays();
        }
        Individual {
            topology: self.topology,
            schedules: self.schedules,
            resolved,
            fitness,
        }
    }
}

/// One interval during which a resource serves an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    /// Resource index.
    pub resource: usize,
    /// Served item.
    pub item: ItemId,
    /// Start time (inclusive).
    pub start: Time,
    /// End time (exclusive).
    pub end: Time,
}

impl Occupancy {
    /// Whether two intervals share any time.
    pub fn overlaps(&self, other: &Occupancy) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A resolved, scored schedule.
///
/// The working order ([`permutation`](Self::permutation)) is delay-free and
/// feeds crossover and mutation; the snapshot
/// ([`resolved`](Self::resolved)) keeps the delays for presentation.
#[derive(Debug, Clone)]
pub struct Individual {
    topology: Arc<Topology>,
    schedules: Vec<ResourceSchedule>,
    resolved: Vec<Vec<Timeslot>>,
    fitness: Time,
}

impl Individual {
    /// Makespan: the largest resource total time.
    pub fn fitness(&self) -> Time {
        self.fitness
    }

    /// Shared problem definition.
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// Number of resources.
    pub fn resource_count(&self) -> usize {
        self.schedules.len()
    }

    /// Delay-free order of one resource.
    pub fn permutation(&self, resource: usize) -> &[Timeslot] {
        self.schedules[resource].slots()
    }

    /// Delay-inclusive schedule of one resource.
    pub fn resolved(&self, resource: usize) -> &[Timeslot] {
        &self.resolved[resource]
    }

    /// Completion time of one resource, waits included.
    pub fn total_time(&self, resource: usize) -> Time {
        self.schedules[resource].total_time()
    }

    /// Copies the working order back into an editable candidate.
    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            topology: Arc::clone(&self.topology),
            schedules: self.working_schedules(),
        }
    }

    /// Turns this individual back into an editable candidate.
    pub fn into_candidate(self) -> Candidate {
        let schedules = self.working_schedules();
        Candidate {
            topology: self.topology,
            schedules,
        }
    }

    fn working_schedules(&self) -> Vec<ResourceSchedule> {
        self.schedules
            .iter()
            .map(|s| ResourceSchedule::from_slots(s.slots().to_vec()))
            .collect()
    }

    /// Every work interval of the resolved schedule, in resource order.
    pub fn occupancy_intervals(&self) -> Vec<Occupancy> {
        let mut intervals = Vec::new();
        for (resource, slots) in self.resolved.iter().enumerate() {
            let mut clock = 0;
            for slot in slots {
                let end = clock + slot.duration();
                if let Some(item) = slot.item() {
                    intervals.push(Occupancy {
                        resource,
                        item,
                        start: clock,
                        end,
                    });
                }
                clock = end;
            }
        }
        intervals
    }

    /// Presentable copy of the resolved schedule.
    pub fn report(&self) -> ScheduleReport {
        ScheduleReport::from_individual(self)
    }
}

fn is_permutation_of(order: &[Timeslot], plan: &[Timeslot]) -> bool {
    if order.len() != plan.len() {
        return false;
    }
    let mut a = order.to_vec();
    let mut b = plan.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest, Strategy};

    fn shared_item_topology() -> Arc<Topology> {
        let mut b = Topology::builder();
        let i = b.item("I1");
        let ra = b.resource("A");
        let rb = b.resource("B");
        b.request(ra, i, 5).request(rb, i, 5);
        Arc::new(b.build())
    }

    fn single_resource_topology() -> Arc<Topology> {
        let mut b = Topology::builder();
        let i1 = b.item("I1");
        let i2 = b.item("I2");
        let i3 = b.item("I3");
        let r = b.resource("R1");
        b.request(r, i1, 3).request(r, i2, 4).request(r, i3, 2);
        Arc::new(b.build())
    }

    fn sorted(slots: &[Timeslot]) -> Vec<Timeslot> {
        let mut v = slots.to_vec();
        v.sort_unstable();
        v
    }

    fn assert_permutations(ind: &Individual) {
        for (r, resource) in ind.topology().resources().iter().enumerate() {
            assert_eq!(sorted(ind.permutation(r)), sorted(resource.plan()));
        }
    }

    fn assert_conflict_free(ind: &Individual) {
        let intervals = ind.occupancy_intervals();
        for (k, a) in intervals.iter().enumerate() {
            for b in &intervals[k + 1..] {
                if a.item == b.item && a.resource != b.resource {
                    assert!(!a.overlaps(b), "overlap: {a:?} and {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_one_item_two_resources() {
        let mut rng = create_rng(42);
        let ind = Candidate::random(shared_item_topology(), &mut rng).resolve();

        assert_eq!(ind.fitness(), 10);
        assert_eq!(ind.total_time(0), 5);
        assert_eq!(ind.total_time(1), 10);
        assert_eq!(ind.resolved(1)[0], Timeslot::delay(5));
        assert_eq!(ind.permutation(1).len(), 1);
        assert!(!ind.permutation(1)[0].is_delay());
    }

    #[test]
    fn test_single_resource_fitness_independent_of_order() {
        let topology = single_resource_topology();
        let mut rng = create_rng(7);
        for _ in 0..20 {
            let ind = Candidate::random(Arc::clone(&topology), &mut rng).resolve();
            assert_eq!(ind.fitness(), 9);
        }
    }

    #[test]
    #[should_panic(expected = "contains a delay")]
    fn test_resolve_rejects_delay_in_working_order() {
        let mut rng = create_rng(3);
        let mut c = Candidate::random(single_resource_topology(), &mut rng);
        c.schedule_mut(0)[1] = Timeslot::delay(4);
        c.resolve();
    }

    #[test]
    fn test_from_orders_rejects_delays() {
        let topology = single_resource_topology();
        let mut order = topology.resources()[0].plan().to_vec();
        order[0] = Timeslot::delay(3);
        assert_eq!(
            Candidate::from_orders(topology, vec![order]).unwrap_err(),
            ScheduleError::NotAPermutation(0)
        );
    }

    #[test]
    fn test_from_orders_rejects_foreign_slots() {
        let topology = single_resource_topology();
        let bad = vec![vec![Timeslot::work(ItemId::new(0), 3)]];
        assert_eq!(
            Candidate::from_orders(Arc::clone(&topology), bad).unwrap_err(),
            ScheduleError::NotAPermutation(0)
        );
        assert_eq!(
            Candidate::from_orders(topology, vec![]).unwrap_err(),
            ScheduleError::ResourceCountMismatch {
                expected: 1,
                found: 0
            }
        );
    }

    #[test]
    fn test_from_orders_keeps_given_order() {
        let topology = single_resource_topology();
        let mut order = topology.resources()[0].plan().to_vec();
        order.reverse();
        let c = Candidate::from_orders(topology, vec![order.clone()]).unwrap();
        assert_eq!(c.schedule(0), order.as_slice());
    }

    #[test]
    fn test_rescoring_after_edit() {
        let topology = shared_item_topology();
        let mut rng = create_rng(1);
        let ind = Candidate::random(topology, &mut rng).resolve();
        let again = ind.to_candidate().resolve();
        assert_eq!(again.fitness(), ind.fitness());
        assert_eq!(again.resolved(1), ind.resolved(1));
    }

    #[test]
    fn test_into_candidate_drops_fitness_phase() {
        let topology = single_resource_topology();
        let mut rng = create_rng(3);
        let ind = Candidate::random(topology, &mut rng).resolve();
        let mut c = ind.into_candidate();
        c.schedule_mut(0).swap(0, 2);
        assert_eq!(c.resolve().fitness(), 9);
    }

    #[test]
    fn test_report_matches_snapshot() {
        let mut rng = create_rng(42);
        let ind = Candidate::random(shared_item_topology(), &mut rng).resolve();
        let report = ind.report();
        assert_eq!(report.makespan, 10);
        assert_eq!(report.resources[1].slots[0].label, "Delay");
    }

    fn arb_topology() -> impl Strategy<Value = (Topology, u64)> {
        (1usize..6, 1usize..6, any::<u64>()).prop_map(|(items, resources, seed)| {
            let mut rng = create_rng(seed);
            (Topology::random(items, resources, &mut rng), seed)
        })
    }

    proptest! {
        #[test]
        fn prop_working_order_is_permutation((topology, seed) in arb_topology()) {
            let mut rng = create_rng(seed ^ 0x5eed);
            let ind = Candidate::random(Arc::new(topology), &mut rng).resolve();
            assert_permutations(&ind);
        }

        #[test]
        fn prop_resolved_schedule_is_conflict_free((topology, seed) in arb_topology()) {
            let mut rng = create_rng(seed ^ 0x5eed);
            let ind = Candidate::random(Arc::new(topology), &mut rng).resolve();
            assert_conflict_free(&ind);
        }

        #[test]
        fn prop_fitness_bounds((topology, seed) in arb_topology()) {
            let lower = topology.plan_time_lower_bound();
            let mut rng = create_rng(seed ^ 0x5eed);
            let ind = Candidate::random(Arc::new(topology), &mut rng).resolve();
            let max_total = (0..ind.resource_count()).map(|r| ind.total_time(r)).max().unwrap_or(0);
            prop_assert_eq!(ind.fitness(), max_total);
            prop_assert!(ind.fitness() >= lower);
        }

        #[test]
        fn prop_snapshot_sums_to_total_time((topology, seed) in arb_topology()) {
            let mut rng = create_rng(seed ^ 0x5eed);
            let ind = Candidate::random(Arc::new(topology), &mut rng).resolve();
            for r in 0..ind.resource_count() {
                let sum: Time = ind.resolved(r).iter().map(Timeslot::duration).sum();
                prop_assert_eq!(sum, ind.total_time(r));
            }
        }
    }
}
