pub mod png;
pub mod rng;
pub mod render2d;

pub use png::{encode_png, save_png};
pub use rng::{RngStream, SeedSequence, rng_from_seed, split_n};
pub use render2d::{Canvas, Color};
