use std::sync::Arc;

use four_room::{Env, FourRoomEnv, Grid, Step, SyncVectorEnv};

// Ensure a vector env with N=1 produces the same rollout as a single env
// when seeds and actions are the same.
#[test]
fn single_vs_vector_n1_same_rollout() {
    let seed = four_room::utils::split_n(0, 1)[0];
    let mut single = FourRoomEnv::four_room(99).unwrap();
    let (obs_s, _info_s) = single.reset(Some(seed)).unwrap();

    let mut vec_env = SyncVectorEnv::new(1, |_| FourRoomEnv::four_room(99).unwrap());
    let obs_all = vec_env.reset_all(Some(0)).unwrap();
    assert_eq!(obs_s, obs_all[0].0);

    let actions = vec![1, 1, 2, 2, 2, 0, 3, 1, 2, 2, 1, 1, 2, 0, 1];
    for a in actions {
        let s_single: Step<_> = single.step(a).unwrap();
        let s_vec = vec_env.step_all(vec![a]).unwrap()[0].clone();
        assert_eq!(s_single, s_vec);
        if s_single.done() { break; }
    }
}

// Copies share the map but never each other's episode state.
#[test]
fn vector_copies_are_independent() {
    let grid = Arc::new(Grid::four_room().unwrap());
    let mut v = SyncVectorEnv::new(2, |i| FourRoomEnv::from_shared(Arc::clone(&grid), false, i as u64));
    let obs = v.reset_all(Some(123)).unwrap();
    assert_eq!(obs.len(), 2);
    assert_eq!(obs[0].0.position, (12, 0));

    // left is blocked at the start cell, up is free
    let steps = v.step_all(vec![0, 1]).unwrap();
    assert_eq!(steps[0].observation.position, (12, 0));
    assert_eq!(steps[1].observation.position, (11, 0));
    assert_eq!(v.envs()[0].state().unwrap().position, (12, 0));
}
