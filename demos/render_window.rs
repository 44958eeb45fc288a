use std::sync::mpsc;

use four_room::{Env, FourRoomEnv, Observation, RenderFrame};
use minifb::{Key, Window, WindowOptions};
use rand::Rng;

const TILE: u32 = 32;

fn rgba_to_u32(a: u8, r: u8, g: u8, b: u8) -> u32 {
    // Minifb expects ARGB on most platforms; construct accordingly.
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

fn main() -> four_room::Result<()> {
    let mut env = FourRoomEnv::four_room(123)?;
    let (obs, _info) = env.reset(None)?;

    // The attached renderer only forwards positions; drawing happens below.
    let (tx, rx) = mpsc::channel();
    env.attach_renderer(move |o: &Observation| {
        let _ = tx.send(o.position);
    });
    env.render_observation(&obs);

    let (width, height) = match env.render_pixels(TILE) {
        RenderFrame::Pixels { width, height, .. } => (width as usize, height as usize),
        RenderFrame::Text(_) => unreachable!("render_pixels always yields pixels"),
    };
    let mut window = Window::new("four-room: random walk", width, height, WindowOptions::default())
        .expect("Unable to open window");
    window.set_target_fps(20);

    let mut buffer: Vec<u32> = vec![0; width * height];
    let mut rng = rand::thread_rng();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let step = env.step(rng.gen_range(0..4))?;
        env.render_observation(&step.observation);
        if step.done() {
            let (obs, _) = env.reset(None)?;
            env.render_observation(&obs);
        }
        for position in rx.try_iter() {
            window.set_title(&format!("four-room: agent at {position:?}"));
        }

        if let RenderFrame::Pixels { data, .. } = env.render_pixels(TILE) {
            for (dst, px) in buffer.iter_mut().zip(data.chunks_exact(4)) {
                *dst = rgba_to_u32(px[3], px[0], px[1], px[2]);
            }
            window
                .update_with_buffer(&buffer, width, height)
                .expect("Failed to update window buffer");
        }
    }
    Ok(())
}
