pub mod four_room;

pub use four_room::{FourRoomEnv, GOAL_REWARD};
