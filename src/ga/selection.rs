//! Parent selection.
//!
//! Each generation draws a small sample of distinct members uniformly at
//! random, then picks two parents from it.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Scored;
use crate::model::Time;
use rand::Rng;

/// Rule for picking two parents out of the sampled members.
///
/// All rules assume **minimization** (lower makespan = better).
///
/// # Examples
///
/// ```
/// use u_deadlock::ga::ParentSelection;
///
/// // The two fittest of the sample
/// let sel = ParentSelection::BestOfSample;
///
/// // Fitness-weighted draw within the sample
/// let sel = ParentSelection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentSelection {
    /// The two members of the sample with the lowest fitness.
    ///
    /// Ties go to the member sampled first.
    #[default]
    BestOfSample,

    /// Two draws without replacement, weighted by `Σf − f_i` over the sample.
    ///
    /// When every sampled member has fitness 0 the weights are undefined and
    /// the draw is uniform.
    Roulette,
}

impl ParentSelection {
    /// Samples `sample_size` distinct members and returns two distinct
    /// parent indices into `population`.
    ///
    /// # Panics
    /// Panics if `sample_size < 2` or `sample_size > population.len()`.
    pub fn select<I: Scored, R: Rng>(
        &self,
        population: &[I],
        sample_size: usize,
        rng: &mut R,
    ) -> [usize; 2] {
        assert!(sample_size >= 2, "sample must hold at least two members");
        assert!(
            sample_size <= population.len(),
            "sample larger than population"
        );

        let sample = sample_distinct(population.len(), sample_size, rng);
        match self {
            ParentSelection::BestOfSample => best_two(population, sample),
            ParentSelection::Roulette => roulette_two(population, sample, rng),
        }
    }
}

/// Draws `k` distinct indices from `0..n` by rejection, in draw order.
pub(crate) fn sample_distinct<R: Rng>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let mut sample = Vec::with_capacity(k);
    while sample.len() < k {
        let idx = rng.random_range(0..n);
        if !sample.contains(&idx) {
            sample.push(idx);
        }
    }
    sample
}

/// Removes and returns the first minimum of `candidates` by fitness.
pub(crate) fn take_best<I: Scored>(population: &[I], candidates: &mut Vec<usize>) -> usize {
    let mut best = 0;
    for k in 1..candidates.len() {
        if population[candidates[k]].fitness() < population[candidates[best]].fitness() {
            best = k;
        }
    }
    candidates.remove(best)
}

fn best_two<I: Scored>(population: &[I], mut sample: Vec<usize>) -> [usize; 2] {
    let first = take_best(population, &mut sample);
    let second = take_best(population, &mut sample);
    [first, second]
}

fn roulette_two<I: Scored, R: Rng>(
    population: &[I],
    mut sample: Vec<usize>,
    rng: &mut R,
) -> [usize; 2] {
    let first = sample.remove(roulette_pick(population, &sample, rng));
    let second = sample.remove(roulette_pick(population, &sample, rng));
    [first, second]
}

/// Position within `sample` chosen with weight `Σf − f_i`.
fn roulette_pick<I: Scored, R: Rng>(population: &[I], sample: &[usize], rng: &mut R) -> usize {
    let fitnesses: Vec<Time> = sample.iter().map(|&i| population[i].fitness()).collect();
    let total: Time = fitnesses.iter().sum();

    let weights: Vec<Time> = fitnesses.iter().map(|&f| total - f).collect();
    let weight_sum: Time = weights.iter().sum();
    if total == 0 || weight_sum == 0 {
        return rng.random_range(0..sample.len());
    }

    let threshold = rng.random_range(0..weight_sum);
    let mut cumulative = 0;
    for (k, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return k;
        }
    }

    sample.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    struct TestInd {
        fit: Time,
    }

    impl Scored for TestInd {
        fn fitness(&self) -> Time {
            self.fit
        }
    }

    fn make_population(fitnesses: &[Time]) -> Vec<TestInd> {
        fitnesses.iter().map(|&f| TestInd { fit: f }).collect()
    }

    #[test]
    fn test_sample_is_distinct() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let mut s = sample_distinct(6, 5, &mut rng);
            s.sort_unstable();
            s.dedup();
            assert_eq!(s.len(), 5);
            assert!(s.iter().all(|&i| i < 6));
        }
    }

    #[test]
    fn test_best_of_full_sample_picks_two_lowest() {
        let pop = make_population(&[10, 5, 1, 8, 3]);
        let mut rng = create_rng(42);
        for _ in 0..50 {
            let [p1, p2] = ParentSelection::BestOfSample.select(&pop, 5, &mut rng);
            assert_eq!(p1, 2);
            assert_eq!(p2, 4);
        }
    }

    #[test]
    fn test_best_two_tie_goes_to_first_sampled() {
        let pop = make_population(&[4, 4, 4, 9, 9]);
        assert_eq!(best_two(&pop, vec![1, 0, 2, 3, 4]), [1, 0]);
        assert_eq!(best_two(&pop, vec![3, 2, 4, 0, 1]), [2, 0]);
    }

    #[test]
    fn test_parents_are_distinct() {
        let pop = make_population(&[7, 7, 7, 7, 7, 7, 7, 7]);
        let mut rng = create_rng(3);
        for sel in [ParentSelection::BestOfSample, ParentSelection::Roulette] {
            for _ in 0..200 {
                let [a, b] = sel.select(&pop, 5, &mut rng);
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_roulette_favors_low_fitness() {
        let pop = make_population(&[100, 50, 1, 80, 90]);
        let mut rng = create_rng(42);
        let mut firsts = [0u32; 5];
        for _ in 0..5000 {
            let [p1, _] = ParentSelection::Roulette.select(&pop, 5, &mut rng);
            firsts[p1] += 1;
        }
        assert!(
            firsts[2] > firsts[0],
            "best should be picked more often: {firsts:?}"
        );
    }

    #[test]
    fn test_roulette_all_zero_falls_back_to_uniform() {
        let pop = make_population(&[0, 0, 0, 0, 0]);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 5];
        for _ in 0..5000 {
            let [p1, _] = ParentSelection::Roulette.select(&pop, 5, &mut rng);
            counts[p1] += 1;
        }
        for &c in &counts {
            assert!(c > 700, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_roulette_single_nonzero_member_never_first() {
        // Weights: Σf − f_i = [10, 10, 10, 10, 0].
        let pop = make_population(&[0, 0, 0, 0, 10]);
        let mut rng = create_rng(5);
        for _ in 0..500 {
            let [p1, _] = ParentSelection::Roulette.select(&pop, 5, &mut rng);
            assert_ne!(p1, 4);
        }
    }

    #[test]
    #[should_panic(expected = "sample larger than population")]
    fn test_sample_larger_than_population_panics() {
        let pop = make_population(&[1, 2, 3]);
        let mut rng = create_rng(42);
        ParentSelection::BestOfSample.select(&pop, 5, &mut rng);
    }
}
