//! Schedule crossover and mutation.
//!
//! Both operators edit [`Candidate`]s, i.e. delay-free permutations whose
//! fitness is unknown until they are resolved again.
//!
//! # Crossover
//!
//! - [`column_crossover`]: swap one whole resource column between two
//!   children, taking the parents' working orders
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two positions in one resource's order, O(1)

use rand::Rng;

use crate::schedule::{Candidate, Individual};

/// Single-resource crossover.
///
/// Overwrites `child1`'s order for `resource` with `parent2`'s working order,
/// and `child2`'s with `parent1`'s. All other resources keep the children's
/// own orders.
///
/// # Panics
/// Panics if the four orders for `resource` do not have the same length.
/// They are permutations of the same plan, so a mismatch means the
/// individuals come from different topologies.
pub fn column_crossover(
    child1: &mut Candidate,
    child2: &mut Candidate,
    parent1: &Individual,
    parent2: &Individual,
    resource: usize,
) {
    let from1 = parent1.permutation(resource);
    let from2 = parent2.permutation(resource);
    assert_eq!(from1.len(), from2.len(), "parent columns differ in length");
    assert_eq!(
        child1.schedule(resource).len(),
        from2.len(),
        "child column length differs from parent"
    );
    assert_eq!(
        child2.schedule(resource).len(),
        from1.len(),
        "child column length differs from parent"
    );

    child1.schedule_mut(resource).copy_from_slice(from2);
    child2.schedule_mut(resource).copy_from_slice(from1);
}

/// A swap applied by [`swap_mutation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    /// Mutated resource.
    pub resource: usize,
    /// First position.
    pub i: usize,
    /// Second position (may equal `i`).
    pub j: usize,
}

/// Swap mutation: pick a resource, then exchange two random positions in
/// its order.
///
/// Returns `None` when the candidate has no resources or the picked
/// resource's order is empty.
pub fn swap_mutation<R: Rng>(candidate: &mut Candidate, rng: &mut R) -> Option<Swap> {
    let resources = candidate.resource_count();
    if resources == 0 {
        return None;
    }
    let resource = rng.random_range(0..resources);
    let slots = candidate.schedule_mut(resource);
    let n = slots.len();
    if n == 0 {
        return None;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    slots.swap(i, j);
    Some(Swap { resource, i, j })
}
