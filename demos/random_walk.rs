use four_room::{Env, FourRoomConfig, RecordEpisodeStatistics, Space};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

fn main() -> four_room::Result<()> {
    // RUST_LOG=four_room=debug shows pickups and goal arrivals.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = FourRoomConfig { seed: 7, max_episode_steps: Some(500), ..Default::default() };
    let mut env = RecordEpisodeStatistics::new(cfg.build()?);
    let actions = env.inner().action_space();
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    for episode in 0..5 {
        env.reset(None)?;
        println!("episode {episode}\n{}\n", env.inner().render_text());
        loop {
            let s = env.step(actions.sample(&mut rng))?;
            if s.done() {
                println!(
                    "  return={:?} length={:?} shapes={:?} reached_goal={}",
                    s.info.get("episode_return"),
                    s.info.get("episode_length"),
                    s.info.get("episode_shapes"),
                    s.terminated,
                );
                break;
            }
        }
    }
    Ok(())
}
