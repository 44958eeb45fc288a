// A simple synchronous vector environment running N independent copies of an Env in a loop.

use crate::core::{Env, GymError, Info, RenderFrame, Result, Step};
use crate::utils::rng::split_n;

/// Runs N copies of an environment in the current thread.
///
/// - Construct with `SyncVectorEnv::new(n, |i| make_env(i))`
/// - Step with a batch of actions: `step_all(actions)`
/// - Reset all envs (optionally with a base seed): `reset_all(Some(0))`
///
/// Each copy owns its episode state; copies built around one `Arc<Grid>`
/// only share the immutable map.
pub struct SyncVectorEnv<E: Env> {
    envs: Vec<E>,
}

impl<E: Env> SyncVectorEnv<E> {
    /// Create N copies using the provided factory closure, called with the copy's index.
    pub fn new<F>(n: usize, factory: F) -> Self
    where
        F: FnMut(usize) -> E,
    {
        Self { envs: (0..n).map(factory).collect() }
    }

    /// Number of contained environments.
    pub fn len(&self) -> usize { self.envs.len() }
    /// Whether there are no environments.
    pub fn is_empty(&self) -> bool { self.envs.is_empty() }

    /// Reset all environments.
    ///
    /// With a `base_seed`, copy `i` is reseeded with the i-th sub-seed of
    /// [`split_n`], so a vector of one sees the same stream for a given
    /// base seed regardless of its size.
    ///
    /// Resets cannot be checked ahead of time. If copy `k` fails, copies
    /// before it have already started new episodes and the error is
    /// returned; copy `k` and the ones after it keep their previous state.
    pub fn reset_all(&mut self, base_seed: Option<u64>) -> Result<Vec<(E::Obs, Info)>> {
        let seeds = base_seed.map(|s| split_n(s, self.envs.len()));
        self.envs
            .iter_mut()
            .enumerate()
            .map(|(i, e)| e.reset(seeds.as_ref().map(|s| s[i])))
            .collect()
    }

    /// Step all environments with a batch of actions.
    ///
    /// Every copy is checked with [`Env::check_step`] first, so on error
    /// no copy has moved.
    pub fn step_all(&mut self, actions: Vec<E::Act>) -> Result<Vec<Step<E::Obs>>> {
        if actions.len() != self.envs.len() {
            return Err(GymError::InvalidAction(format!(
                "got {} actions for {} environments",
                actions.len(),
                self.envs.len()
            )));
        }
        for (i, (e, a)) in self.envs.iter().zip(&actions).enumerate() {
            e.check_step(a).map_err(|err| match err {
                GymError::InvalidAction(m) => GymError::InvalidAction(format!("env {i}: {m}")),
                GymError::NotReady(m) => GymError::NotReady(format!("env {i}: {m}")),
                other => other,
            })?;
        }
        self.envs
            .iter_mut()
            .zip(actions)
            .map(|(e, a)| e.step(a))
            .collect()
    }

    /// Render all environments; returns a vector of optional frames (one per env).
    pub fn render_all(&self) -> Vec<Option<RenderFrame>> {
        self.envs.iter().map(|e| e.render()).collect()
    }

    /// Close all environments.
    pub fn close_all(&mut self) {
        for e in &mut self.envs { e.close(); }
    }

    pub fn envs(&self) -> &[E] { &self.envs }
    pub fn envs_mut(&mut self) -> &mut [E] { &mut self.envs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envs::FourRoomEnv;
    use crate::grid::Grid;
    use std::sync::Arc;

    #[test]
    fn vector_env_runs_batch() {
        let grid = Arc::new(Grid::four_room().unwrap());
        let mut v = SyncVectorEnv::new(3, |i| FourRoomEnv::from_shared(Arc::clone(&grid), true, i as u64));
        assert_eq!(Arc::strong_count(&grid), 4);
        let obs = v.reset_all(Some(123)).unwrap();
        assert_eq!(obs.len(), 3);
        let steps = v.step_all(vec![0, 1, 2]).unwrap();
        assert_eq!(steps.len(), 3);
        for s in &steps {
            assert_eq!(s.observation.collected.len(), 12);
        }
        let frames = v.render_all();
        assert!(matches!(frames[0], Some(RenderFrame::Text(_))));
        v.close_all();
    }

    #[test]
    fn mismatched_batch_is_rejected() {
        let mut v = SyncVectorEnv::new(2, |i| FourRoomEnv::four_room(i as u64).unwrap());
        v.reset_all(None).unwrap();
        assert!(matches!(v.step_all(vec![0]), Err(GymError::InvalidAction(_))));
    }

    #[test]
    fn one_failure_does_not_touch_other_states() {
        for actions in [vec![9, 0], vec![1, 9]] {
            let mut v = SyncVectorEnv::new(2, |i| FourRoomEnv::four_room(i as u64).unwrap());
            v.reset_all(Some(5)).unwrap();
            let before: Vec<_> = v.envs().iter().map(|e| (e.state().cloned(), e.steps())).collect();
            assert!(matches!(v.step_all(actions), Err(GymError::InvalidAction(_))));
            let after: Vec<_> = v.envs().iter().map(|e| (e.state().cloned(), e.steps())).collect();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn finished_copy_blocks_the_whole_batch() {
        let grid = Arc::new(Grid::from_rows(&["_G"], Default::default()).unwrap());
        let mut v = SyncVectorEnv::new(2, |i| FourRoomEnv::from_shared(Arc::clone(&grid), false, i as u64));
        v.reset_all(None).unwrap();
        // only the second copy reaches the goal
        v.envs_mut()[1].step(2).unwrap();
        let before = v.envs()[0].state().cloned();
        let err = v.step_all(vec![2, 2]).unwrap_err();
        assert!(matches!(&err, GymError::NotReady(m) if m.starts_with("env 1")));
        assert_eq!(v.envs()[0].state().cloned(), before);
        assert_eq!(v.envs()[0].steps(), 0);
    }
}
