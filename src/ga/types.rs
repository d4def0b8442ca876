//! Shared trait for anything ranked by makespan.

use crate::model::Time;
use crate::schedule::Individual;

/// A scored population member.
///
/// Lower fitness is better. Selection and survivor replacement are written
/// against this trait so they can be exercised with plain test doubles.
pub trait Scored {
    /// Makespan of this member.
    fn fitness(&self) -> Time;
}

impl Scored for Individual {
    fn fitness(&self) -> Time {
        Individual::fitness(self)
    }
}
