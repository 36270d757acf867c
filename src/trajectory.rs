// src/trajectory.rs
//! Stochastic Trajectory Sampling
//!
//! # Mathematical Framework
//!
//! A CTMC in state `i` holds for an exponential time and then jumps; with one
//! independent exponential clock per feasible successor,
//! ```text
//! T_j ~ Exp(q[i][j])    for every j with q[i][j] > 0
//! ```
//! the first clock to ring decides both the holding time (the minimal draw)
//! and the next state (its owner). This race of competing exponentials is
//! equivalent to sampling the embedded jump chain with exponential holding
//! times and needs no per-row normalization.
//!
//! Sampling is memoryless: each draw depends only on the current state's
//! generator row, never on history.
//!
//! # Absorbing states
//!
//! A state with no positive outgoing rate never jumps. A globally absorbing
//! chain skips simulation entirely; a state absorbed mid-walk keeps its state
//! and accumulates infinite holding times from then on. Neither case is an
//! error.

use rand::Rng;
use rayon::prelude::*;

use crate::chain::ChainModel;
use crate::error::{CtmcError, CtmcResult};
use crate::rng::{get_exponential_draw, RngFactory};

/// A sampled realization of a chain: cumulative jump times and visited states
///
/// Both sequences have length `draws + 1`; `times[0] = 0` and `states[0]` is
/// the starting index. Times are non-decreasing and become `+∞` once the walk
/// is absorbed.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub times: Vec<f64>,
    pub states: Vec<usize>,
}

impl Trajectory {
    /// Number of recorded points (draws + 1)
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Fraction of elapsed time spent in each state.
    ///
    /// For an ergodic chain and a long trajectory this converges to the
    /// stationary distribution. An absorbed walk spends an infinite time in
    /// its terminal state, so that state gets fraction 1.
    pub fn occupation_fractions(&self, n_states: usize) -> Vec<f64> {
        let mut occupancy = vec![0.0; n_states];
        for k in 0..self.len().saturating_sub(1) {
            let dt = self.times[k + 1] - self.times[k];
            if dt.is_infinite() {
                occupancy.fill(0.0);
                occupancy[self.states[k]] = 1.0;
                return occupancy;
            }
            occupancy[self.states[k]] += dt;
        }
        let total: f64 = occupancy.iter().sum();
        if total > 0.0 {
            for o in &mut occupancy {
                *o /= total;
            }
        }
        occupancy
    }
}

/// Feasible transitions per state: the positive off-diagonal entries of each
/// generator row.
fn transition_pattern<T>(chain: &ChainModel<T>) -> Vec<Vec<(usize, f64)>> {
    let q = chain.generator();
    (0..chain.n_states())
        .map(|i| {
            q.row(i)
                .filter(|&(j, rate)| j != i && rate > 0.0)
                .collect()
        })
        .collect()
}

/// Sample one trajectory of `draws` jumps starting from state `start`.
///
/// # Errors
///
/// [`CtmcError::StartIndexOutOfRange`] when `start` is not in `[0, n)`.
pub fn sample_trajectory<T, R: Rng + ?Sized>(
    chain: &ChainModel<T>,
    start: usize,
    draws: usize,
    rng: &mut R,
) -> CtmcResult<Trajectory> {
    let n = chain.n_states();
    if start >= n {
        return Err(CtmcError::StartIndexOutOfRange {
            index: start,
            states: n,
        });
    }

    let pattern = transition_pattern(chain);

    // Globally absorbing chain: nothing ever moves, skip the simulation loop.
    if pattern.iter().all(|row| row.is_empty()) {
        let mut times = vec![f64::INFINITY; draws + 1];
        times[0] = 0.0;
        return Ok(Trajectory {
            times,
            states: vec![start; draws + 1],
        });
    }

    let mut times = Vec::with_capacity(draws + 1);
    let mut states = Vec::with_capacity(draws + 1);
    times.push(0.0);
    states.push(start);

    let mut t = 0.0;
    let mut current = start;
    for _ in 0..draws {
        let candidates = &pattern[current];
        // Race of competing exponential clocks: the first to ring wins.
        let mut holding = f64::INFINITY;
        let mut next = current;
        for &(j, rate) in candidates {
            let draw = get_exponential_draw(rng, rate);
            if draw < holding {
                holding = draw;
                next = j;
            }
        }
        // An empty candidate set leaves holding at ∞: the state absorbs.
        t += holding;
        current = next;
        times.push(t);
        states.push(current);
    }

    Ok(Trajectory { times, states })
}

/// Sample one trajectory with a freshly seeded RNG.
pub fn sample_trajectory_seeded<T>(
    chain: &ChainModel<T>,
    start: usize,
    draws: usize,
    seed: u64,
) -> CtmcResult<Trajectory> {
    let mut rng = crate::rng::seed_rng_from_u64(seed);
    sample_trajectory(chain, start, draws, &mut rng)
}

/// Sample `runs` independent trajectories in parallel.
///
/// Each run draws from its own RNG stream derived from `base_seed`, so the
/// result is deterministic regardless of thread scheduling and no generator
/// state is shared across threads.
pub fn sample_trajectories<T: Sync>(
    chain: &ChainModel<T>,
    start: usize,
    draws: usize,
    runs: usize,
    base_seed: u64,
) -> CtmcResult<Vec<Trajectory>> {
    let n = chain.n_states();
    if start >= n {
        return Err(CtmcError::StartIndexOutOfRange {
            index: start,
            states: n,
        });
    }

    let factory = RngFactory::new(base_seed);
    (0..runs)
        .into_par_iter()
        .map(|run_id| {
            let mut rng = factory.create_std_rng(run_id as u64);
            sample_trajectory(chain, start, draws, &mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seed_rng_from_u64;
    use crate::sparse::SparseMatrix;

    fn two_state_chain(rate: f64) -> ChainModel<usize> {
        let q = SparseMatrix::from_dense(&[vec![-rate, rate], vec![rate, -rate]]);
        ChainModel::from_generator(q).unwrap()
    }

    #[test]
    fn test_shape_and_monotonicity() {
        let chain = two_state_chain(2.0);
        let mut rng = seed_rng_from_u64(42);
        let draws = 500;

        let trajectory = sample_trajectory(&chain, 0, draws, &mut rng).unwrap();
        assert_eq!(trajectory.times.len(), draws + 1);
        assert_eq!(trajectory.states.len(), draws + 1);
        assert_eq!(trajectory.times[0], 0.0);
        assert_eq!(trajectory.states[0], 0);

        for w in trajectory.times.windows(2) {
            assert!(w[1] >= w[0], "times must be non-decreasing");
        }
        assert!(trajectory.states.iter().all(|&s| s < 2));
    }

    #[test]
    fn test_two_state_alternates() {
        // Each state has exactly one feasible successor, so the embedded jump
        // chain is deterministic.
        let chain = two_state_chain(1.0);
        let mut rng = seed_rng_from_u64(7);

        let trajectory = sample_trajectory(&chain, 1, 10, &mut rng).unwrap();
        for (k, &s) in trajectory.states.iter().enumerate() {
            assert_eq!(s, (1 + k) % 2);
        }
    }

    #[test]
    fn test_degenerate_single_state() {
        let q = SparseMatrix::from_dense(&[vec![0.0]]);
        let chain = ChainModel::from_generator(q).unwrap();
        let mut rng = seed_rng_from_u64(42);

        let trajectory = sample_trajectory(&chain, 0, 5, &mut rng).unwrap();
        assert_eq!(trajectory.states, vec![0; 6]);
        assert_eq!(trajectory.times[0], 0.0);
        assert!(trajectory.times[1..].iter().all(|&t| t == f64::INFINITY));
    }

    #[test]
    fn test_absorbing_state_mid_walk() {
        // State 1 has no outgoing rate: once entered, the walk stays there
        // with infinite holding times.
        let q = SparseMatrix::from_dense(&[vec![-1.0, 1.0], vec![0.0, 0.0]]);
        let chain = ChainModel::from_generator(q).unwrap();
        let mut rng = seed_rng_from_u64(42);

        let trajectory = sample_trajectory(&chain, 0, 4, &mut rng).unwrap();
        assert_eq!(trajectory.states, vec![0, 1, 1, 1, 1]);
        assert!(trajectory.times[1].is_finite());
        assert!(trajectory.times[2..].iter().all(|&t| t == f64::INFINITY));
    }

    #[test]
    fn test_start_index_out_of_range() {
        let chain = two_state_chain(1.0);
        let mut rng = seed_rng_from_u64(42);

        let result = sample_trajectory(&chain, 2, 10, &mut rng);
        assert!(matches!(
            result,
            Err(CtmcError::StartIndexOutOfRange {
                index: 2,
                states: 2
            })
        ));
    }

    #[test]
    fn test_mean_holding_time() {
        // From state 0 of a symmetric 2-state chain with rate r, holding
        // times are Exp(r) with mean 1/r.
        let rate = 4.0;
        let chain = two_state_chain(rate);
        let mut rng = seed_rng_from_u64(99);
        let draws = 50_000;

        let trajectory = sample_trajectory(&chain, 0, draws, &mut rng).unwrap();
        let mean = trajectory.times[draws] / draws as f64;
        assert!(
            (mean - 1.0 / rate).abs() < 0.01,
            "mean holding time {} should be close to {}",
            mean,
            1.0 / rate
        );
    }

    #[test]
    fn test_occupation_fractions_sum_to_one() {
        let chain = two_state_chain(1.0);
        let mut rng = seed_rng_from_u64(3);

        let trajectory = sample_trajectory(&chain, 0, 1000, &mut rng).unwrap();
        let occupancy = trajectory.occupation_fractions(2);
        let total: f64 = occupancy.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_occupation_fractions_absorbed() {
        let q = SparseMatrix::from_dense(&[vec![-1.0, 1.0], vec![0.0, 0.0]]);
        let chain = ChainModel::from_generator(q).unwrap();
        let mut rng = seed_rng_from_u64(5);

        let trajectory = sample_trajectory(&chain, 0, 10, &mut rng).unwrap();
        let occupancy = trajectory.occupation_fractions(2);
        assert_eq!(occupancy, vec![0.0, 1.0]);
    }

    #[test]
    fn test_parallel_runs_are_deterministic() {
        let chain = two_state_chain(2.0);

        let runs1 = sample_trajectories(&chain, 0, 200, 4, 42).unwrap();
        let runs2 = sample_trajectories(&chain, 0, 200, 4, 42).unwrap();
        assert_eq!(runs1, runs2);

        // Distinct streams should produce distinct jump times.
        assert_ne!(runs1[0].times, runs1[1].times);
    }
}
