//! Declarative environment setup.

use crate::core::Result;
use crate::envs::FourRoomEnv;
use crate::grid::{four_room_rewards, Grid, RewardTable, FOUR_ROOM_LAYOUT};

/// Everything needed to build a [`FourRoomEnv`].
///
/// With the `serde` feature it can be stored next to experiment results so
/// a run can be rebuilt exactly.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FourRoomConfig {
    /// One string per map row.
    pub layout: Vec<String>,
    pub rewards: RewardTable,
    /// Start mode used by `Env::reset`.
    pub random_start: bool,
    pub seed: u64,
    pub max_episode_steps: Option<u32>,
}

impl Default for FourRoomConfig {
    fn default() -> Self {
        Self {
            layout: FOUR_ROOM_LAYOUT.iter().map(|r| r.to_string()).collect(),
            rewards: four_room_rewards(),
            random_start: true,
            seed: 0,
            max_episode_steps: None,
        }
    }
}

impl FourRoomConfig {
    pub fn grid(&self) -> Result<Grid> {
        Ok(Grid::from_rows(&self.layout, self.rewards.clone())?)
    }

    pub fn build(&self) -> Result<FourRoomEnv> {
        let mut env = FourRoomEnv::new(self.grid()?, self.random_start, self.seed);
        env.max_episode_steps = self.max_episode_steps;
        Ok(env)
    }
}
