//! Rendering: the pluggable observation hook plus built-in text and pixel snapshots.

use crate::core::RenderFrame;
use crate::grid::{Cell, Grid};
use crate::state::{Coord, EpisodeState, Observation};
use crate::utils::render2d::{Canvas, BLACK, BLUE, GRAY, GREEN, LIGHT_GRAY, SHAPE_COLORS, WHITE};

/// Something that can display observations, e.g. a window or a frame recorder.
///
/// The environment forwards observations through
/// [`FourRoomEnv::render_observation`](crate::envs::FourRoomEnv::render_observation)
/// and knows nothing else about it.
pub trait Renderer {
    fn display(&mut self, observation: &Observation);
}

impl<F: FnMut(&Observation)> Renderer for F {
    fn display(&mut self, observation: &Observation) { self(observation) }
}

/// What a cell looks like for the current episode.
///
/// `starts` is the environment's live start set, which replaces the map's
/// own `_` markers once random starts have been sampled.
fn visible(grid: &Grid, coord: Coord, state: Option<&EpisodeState>, starts: &[Coord]) -> Cell {
    match grid.cell(coord) {
        Some(Cell::Shape { id, .. }) if state.is_some_and(|s| s.collected.get(id)) => Cell::Empty,
        Some(Cell::Initial) | Some(Cell::Empty) if starts.contains(&coord) => Cell::Initial,
        Some(Cell::Initial) => Cell::Empty,
        Some(cell) => cell,
        None => Cell::Barrier,
    }
}

/// ASCII snapshot: map symbols, `A` for the agent, collected shapes blanked.
pub fn text_frame(grid: &Grid, state: Option<&EpisodeState>, starts: &[Coord]) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in 0..grid.height() {
        if row > 0 {
            out.push('\n');
        }
        for col in 0..grid.width() {
            let coord = (row, col);
            if state.is_some_and(|s| s.position == coord) {
                out.push('A');
            } else {
                out.push(visible(grid, coord, state, starts).symbol());
            }
        }
    }
    out
}

/// RGBA snapshot with `tile`-pixel cells.
pub fn pixel_frame(grid: &Grid, state: Option<&EpisodeState>, starts: &[Coord], tile: u32) -> RenderFrame {
    let mut canvas = Canvas::for_grid(grid.height(), grid.width(), tile);
    canvas.clear(WHITE);
    let inset = canvas.tile / 5;
    for coord in grid.coords() {
        match visible(grid, coord, state, starts) {
            Cell::Barrier => canvas.fill_tile(coord, 0, BLACK),
            Cell::Goal => canvas.fill_tile(coord, 0, GREEN),
            Cell::Initial => canvas.fill_tile(coord, 0, LIGHT_GRAY),
            Cell::Shape { symbol, .. } => {
                let color = symbol.to_digit(10).map_or(GRAY, |d| SHAPE_COLORS[d as usize]);
                canvas.fill_tile(coord, inset, color);
            }
            Cell::Empty => {}
        }
    }
    if let Some(s) = state {
        canvas.fill_tile(s.position, inset, BLUE);
    }
    canvas.into_render_frame()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::RewardTable;

    fn grid() -> Grid {
        Grid::from_rows(&["_ 1", "X G"], RewardTable::from([('1', 0.5)])).unwrap()
    }

    #[test]
    fn text_frame_marks_agent_and_collected_shapes() {
        let g = grid();
        assert_eq!(text_frame(&g, None, g.initial_cells()), "_ 1\nX G");

        let mut s = EpisodeState::new((0, 1), g.shape_count());
        assert_eq!(text_frame(&g, Some(&s), g.initial_cells()), "_A1\nX G");
        s.collected.insert(0);
        s.position = (1, 1);
        assert_eq!(text_frame(&g, Some(&s), g.initial_cells()), "_  \nXAG");
    }

    #[test]
    fn sampled_start_replaces_map_markers() {
        let g = grid();
        assert_eq!(text_frame(&g, None, &[(1, 1)]), "  1\nX_G");
    }

    #[test]
    fn pixel_frame_has_grid_dimensions() {
        let g = grid();
        let s = EpisodeState::new((0, 0), g.shape_count());
        match pixel_frame(&g, Some(&s), g.initial_cells(), 10) {
            RenderFrame::Pixels { width, height, data } => {
                assert_eq!((width, height), (30, 20));
                assert_eq!(data.len(), 30 * 20 * 4);
                // barrier tile at (1, 0) is solid black
                let idx = ((15 * width + 5) * 4) as usize;
                assert_eq!(&data[idx..idx + 4], &[0, 0, 0, 255]);
            }
            other => panic!("expected pixels, got {other:?}"),
        }
    }
}
