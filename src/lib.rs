pub mod core;
pub mod grid;
pub mod state;
pub mod render;
pub mod config;
pub mod spaces;
pub mod utils;
pub mod envs;
pub mod wrappers;
pub mod vector;

pub use crate::core::{Env, GymError, Info, InfoValue, RenderFrame, Result, Step};
pub use crate::grid::{Cell, Grid, GridError, RewardTable, Shape};
pub use crate::state::{Action, CollectedShapes, Coord, EpisodeState, Observation};
pub use crate::render::Renderer;
pub use crate::config::FourRoomConfig;
pub use crate::spaces::{Discrete, MultiBinary, MultiDiscrete, Space};
pub use crate::envs::{FourRoomEnv, GOAL_REWARD};
pub use crate::wrappers::{RecordEpisodeStatistics, TransformReward};
pub use crate::utils::{encode_png, save_png};
pub use crate::vector::SyncVectorEnv;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn four_room_runs_random_policy() {
        let mut env = FourRoomEnv::four_room(0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let space = env.action_space();
        let (obs, _info) = env.reset(Some(0)).unwrap();
        assert!(env.position_space().contains(&vec![obs.position.0 as u32, obs.position.1 as u32]));
        for _ in 0..200 {
            let s = env.step(space.sample(&mut rng)).unwrap();
            assert!(env.collected_space().contains(&s.observation.collected.to_bits()));
            if s.done() {
                assert_eq!(s.reward, GOAL_REWARD);
                break;
            }
        }
        env.close();
    }

    #[test]
    fn render_text_exists() {
        let mut env = FourRoomEnv::four_room(1).unwrap();
        env.reset(None).unwrap();
        match env.render() {
            Some(RenderFrame::Text(t)) => {
                assert_eq!(t.lines().count(), 13);
                assert_eq!(t.matches('A').count(), 1);
            }
            other => panic!("expected text frame, got {other:?}"),
        }
        assert!(matches!(env.render_pixels(8), RenderFrame::Pixels { width: 104, height: 104, .. }));
    }

    #[test]
    fn action_count_is_four() {
        let env = FourRoomEnv::four_room(0).unwrap();
        assert_eq!(env.action_count(), 4);
        assert_eq!(env.action_space().n(), 4);
        assert_eq!(env.max_num_agents(), 1);
    }
}
