// tests/sampling_test.rs
use ctmc::{
    sample_trajectories, sample_trajectory_seeded, stationary_distribution, ChainModel,
    SparseMatrix, StationaryConfig,
};

fn ergodic_three_state() -> ChainModel<usize> {
    let q = SparseMatrix::from_dense(&[
        vec![-3.0, 2.0, 1.0],
        vec![1.0, -2.0, 1.0],
        vec![2.0, 2.0, -4.0],
    ]);
    ChainModel::from_generator(q).unwrap()
}

#[test]
fn test_trajectory_shape_properties() {
    let chain = ergodic_three_state();
    let draws = 1000;

    let trajectory = sample_trajectory_seeded(&chain, 1, draws, 42).unwrap();

    assert_eq!(trajectory.times.len(), draws + 1);
    assert_eq!(trajectory.states.len(), draws + 1);
    assert_eq!(trajectory.times[0], 0.0);
    assert_eq!(trajectory.states[0], 1);
    for w in trajectory.times.windows(2) {
        assert!(w[1] >= w[0], "times must be non-decreasing");
    }
    assert!(trajectory.states.iter().all(|&s| s < chain.n_states()));
}

#[test]
fn test_occupation_matches_stationary() {
    // Ergodic theorem: the empirical fraction of time in each state over a
    // long trajectory converges to the stationary distribution.
    let chain = ergodic_three_state();
    let pi = stationary_distribution(&chain, &StationaryConfig::default()).unwrap();

    let trajectory = sample_trajectory_seeded(&chain, 0, 200_000, 42).unwrap();
    let occupancy = trajectory.occupation_fractions(chain.n_states());

    println!("stationary: {:?}", pi);
    println!("empirical occupation: {:?}", occupancy);

    for i in 0..chain.n_states() {
        assert!(
            (occupancy[i] - pi[i]).abs() < 0.03,
            "state {}: empirical {} vs stationary {}",
            i,
            occupancy[i],
            pi[i]
        );
    }
}

#[test]
fn test_two_state_occupation_ratio() {
    // π = [0.75, 0.25] for rates 1 out of state 0 and 3 out of state 1.
    let q = SparseMatrix::from_dense(&[vec![-1.0, 1.0], vec![3.0, -3.0]]);
    let chain = ChainModel::from_generator(q).unwrap();

    let trajectory = sample_trajectory_seeded(&chain, 0, 100_000, 7).unwrap();
    let occupancy = trajectory.occupation_fractions(2);

    assert!(
        (occupancy[0] - 0.75).abs() < 0.02,
        "occupation[0] = {}",
        occupancy[0]
    );
    assert!(
        (occupancy[1] - 0.25).abs() < 0.02,
        "occupation[1] = {}",
        occupancy[1]
    );
}

#[test]
fn test_parallel_sampling_independent_streams() {
    let chain = ergodic_three_state();
    let runs = 8;

    let trajectories = sample_trajectories(&chain, 0, 500, runs, 123).unwrap();
    assert_eq!(trajectories.len(), runs);

    // Deterministic under the same base seed.
    let again = sample_trajectories(&chain, 0, 500, runs, 123).unwrap();
    assert_eq!(trajectories, again);

    // Pairwise distinct jump times across streams.
    for i in 0..runs {
        for j in (i + 1)..runs {
            assert_ne!(
                trajectories[i].times, trajectories[j].times,
                "runs {} and {} produced identical trajectories",
                i, j
            );
        }
    }
}

#[test]
fn test_degenerate_chain_sampling() {
    // No positive off-diagonal entries anywhere: the chain never moves.
    let q = SparseMatrix::from_dense(&[vec![0.0, 0.0], vec![0.0, 0.0]]);
    let chain = ChainModel::from_generator(q).unwrap();

    let trajectory = sample_trajectory_seeded(&chain, 1, 4, 42).unwrap();
    assert_eq!(trajectory.states, vec![1; 5]);
    assert_eq!(trajectory.times[0], 0.0);
    assert!(trajectory.times[1..].iter().all(|&t| t == f64::INFINITY));
}
