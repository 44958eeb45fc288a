// Wrappers for composing environments.
//
// - TransformReward: remap rewards, e.g. to retarget shape values at train time
// - RecordEpisodeStatistics: accumulate return, length and pickups per episode

use crate::core::{Env, Info, InfoValue, RenderFrame, Result, Step};

/// TransformReward maps rewards through a user-provided function (e.g., scaling).
pub struct TransformReward<E, F>
where
    E: Env,
    F: Fn(f32) -> f32,
{
    inner: E,
    f: F,
}

impl<E, F> TransformReward<E, F>
where
    E: Env,
    F: Fn(f32) -> f32,
{
    pub fn new(inner: E, f: F) -> Self { Self { inner, f } }

    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }
    pub fn into_inner(self) -> E { self.inner }
}

impl<E, F> Env for TransformReward<E, F>
where
    E: Env,
    F: Fn(f32) -> f32,
{
    type Obs = E::Obs;
    type Act = E::Act;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Obs, Info)> { self.inner.reset(seed) }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let mut s = self.inner.step(action)?;
        s.reward = (self.f)(s.reward);
        Ok(s)
    }

    fn check_step(&self, action: &Self::Act) -> Result<()> { self.inner.check_step(action) }

    fn render(&self) -> Option<RenderFrame> { self.inner.render() }
    fn close(&mut self) { self.inner.close() }
}

/// RecordEpisodeStatistics tracks cumulative return and episode length.
/// On episode end (terminated or truncated), it injects keys into the returned Step's Info:
/// - "episode_return": f64
/// - "episode_length": i64
/// - "episode_shapes": i64, steps whose info carried a "shape" pickup
///
/// A failed step is not counted.
pub struct RecordEpisodeStatistics<E: Env> {
    inner: E,
    ep_return: f64,
    ep_length: i64,
    ep_shapes: i64,
}

impl<E: Env> RecordEpisodeStatistics<E> {
    pub fn new(inner: E) -> Self { Self { inner, ep_return: 0.0, ep_length: 0, ep_shapes: 0 } }

    pub fn inner(&self) -> &E { &self.inner }
    pub fn inner_mut(&mut self) -> &mut E { &mut self.inner }

    /// Return accumulated so far in the running episode.
    pub fn episode_return(&self) -> f64 { self.ep_return }
}

impl<E: Env> Env for RecordEpisodeStatistics<E> {
    type Obs = E::Obs;
    type Act = E::Act;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Obs, Info)> {
        let out = self.inner.reset(seed)?;
        self.ep_return = 0.0;
        self.ep_length = 0;
        self.ep_shapes = 0;
        Ok(out)
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let mut s = self.inner.step(action)?;
        self.ep_return += s.reward as f64;
        self.ep_length += 1;
        if s.info.get("shape").is_some() {
            self.ep_shapes += 1;
        }
        if s.done() {
            s.info.insert("episode_return", InfoValue::from(self.ep_return));
            s.info.insert("episode_length", InfoValue::from(self.ep_length));
            s.info.insert("episode_shapes", InfoValue::from(self.ep_shapes));
            // reset counters for next episode
            self.ep_return = 0.0;
            self.ep_length = 0;
            self.ep_shapes = 0;
        }
        Ok(s)
    }

    fn check_step(&self, action: &Self::Act) -> Result<()> { self.inner.check_step(action) }

    fn render(&self) -> Option<RenderFrame> { self.inner.render() }
    fn close(&mut self) { self.inner.close() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GymError;
    use crate::envs::FourRoomEnv;
    use crate::grid::{Grid, RewardTable};

    fn corridor() -> FourRoomEnv {
        let grid = Grid::from_rows(&["_ 1G"], RewardTable::from([('1', -0.5)])).unwrap();
        FourRoomEnv::new(grid, false, 0)
    }

    #[test]
    fn statistics_are_reported_at_goal() {
        let mut env = RecordEpisodeStatistics::new(corridor());
        env.reset(Some(1)).unwrap();
        let mut last = None;
        for _ in 0..3 {
            last = Some(env.step(2).unwrap());
        }
        let s = last.unwrap();
        assert!(s.terminated);
        assert_eq!(s.info.get("episode_return"), Some(&InfoValue::F64(0.5)));
        assert_eq!(s.info.get("episode_length"), Some(&InfoValue::I64(3)));
        assert_eq!(s.info.get("episode_shapes"), Some(&InfoValue::I64(1)));
        assert_eq!(env.episode_return(), 0.0);
    }

    #[test]
    fn invalid_action_is_not_counted() {
        let mut env = RecordEpisodeStatistics::new(corridor());
        env.reset(None).unwrap();
        assert!(env.step(9).is_err());
        let s = env.step(2).unwrap();
        assert!(s.info.get("episode_length").is_none());
        assert_eq!(env.ep_length, 1);
    }

    #[test]
    fn transform_reward_scales_shape_and_goal() {
        let mut env = TransformReward::new(corridor(), |r| r * 10.0);
        env.reset(None).unwrap();
        assert_eq!(env.step(2).unwrap().reward, 0.0);
        assert_eq!(env.step(2).unwrap().reward, -5.0);
        assert_eq!(env.step(2).unwrap().reward, 10.0);
        assert!(env.inner().is_finished());
        assert!(matches!(env.check_step(&2), Err(GymError::NotReady(_))));
    }

    #[test]
    fn statistics_forward_step_checks() {
        let mut env = RecordEpisodeStatistics::new(corridor());
        assert!(env.check_step(&0).is_err());
        env.reset(None).unwrap();
        assert!(env.check_step(&0).is_ok());
        assert!(matches!(env.check_step(&4), Err(GymError::InvalidAction(_))));
    }
}
