use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::core::{Env, GymError, Info, RenderFrame, Result, Step};
use crate::grid::{Cell, Grid, GridError};
use crate::render::{self, Renderer};
use crate::spaces::{Discrete, MultiBinary, MultiDiscrete};
use crate::state::{Action, Coord, EpisodeState, Observation};
use crate::utils::rng::{rng_from_seed, RngStream};

/// Reward for entering the goal, independent of the shape reward table.
pub const GOAL_REWARD: f32 = 1.0;

/// Four-room shapes gridworld (Barreto et al., "Successor Features for Transfer
/// in Reinforcement Learning", 2017).
///
/// Observation: agent `(row, col)` plus one collected bit per shape cell.
/// Action space: Discrete(4) {0: left, 1: up, 2: right, 3: down}
/// Reward: the shape's table value on first pickup, 1.0 on reaching the goal, else 0.
///
/// The grid is shared read-only; the episode state belongs to this instance alone.
pub struct FourRoomEnv {
    grid: Arc<Grid>,
    /// Current start set. Begins as the map's `_` cells and is replaced
    /// by the sampled cell on every random start.
    initial: Vec<Coord>,
    state: Option<EpisodeState>,
    /// Set by a terminal or truncated step; cleared by `initialize`.
    finished: bool,
    steps: u32,

    /// Start mode used by `Env::reset`.
    pub random_start: bool,
    /// Optional truncation limit. `None` never truncates.
    pub max_episode_steps: Option<u32>,

    rng: RngStream,
    renderer: Option<Box<dyn Renderer + Send>>,
}

impl FourRoomEnv {
    pub fn new(grid: Grid, random_start: bool, seed: u64) -> Self {
        Self::from_shared(Arc::new(grid), random_start, seed)
    }

    /// Build an instance around a grid that other instances may already use.
    pub fn from_shared(grid: Arc<Grid>, random_start: bool, seed: u64) -> Self {
        Self {
            initial: grid.initial_cells().to_vec(),
            grid,
            state: None,
            finished: false,
            steps: 0,
            random_start,
            max_episode_steps: None,
            rng: rng_from_seed(seed),
            renderer: None,
        }
    }

    /// The canonical four-room map with random starts.
    pub fn four_room(seed: u64) -> Result<Self> {
        Ok(Self::new(Grid::four_room()?, true, seed))
    }

    /// A fresh instance on the same grid with its own RNG, no live episode
    /// and no renderer. Start mode and step limit carry over.
    pub fn clone_with_seed(&self, seed: u64) -> Self {
        let mut env = Self::from_shared(Arc::clone(&self.grid), self.random_start, seed);
        env.max_episode_steps = self.max_episode_steps;
        env
    }

    /// Start a new episode.
    ///
    /// With `random_start` the previous start set is discarded and a single
    /// empty cell is drawn uniformly; it stays the start set for later calls.
    /// Otherwise a start is drawn uniformly from the current start set.
    /// On error the previous episode is left untouched.
    pub fn initialize(&mut self, random_start: bool) -> Result<Observation> {
        let start = if random_start {
            let cell = *self.grid.empty_cells().choose(&mut self.rng).ok_or(GridError::NoEmptyCells)?;
            self.initial.clear();
            self.initial.push(cell);
            cell
        } else {
            *self.initial.choose(&mut self.rng).ok_or(GridError::NoInitialCells)?
        };

        let state = EpisodeState::new(start, self.grid.shape_count());
        self.state = Some(state.clone());
        self.finished = false;
        self.steps = 0;
        debug!(?start, random_start, "episode initialized");
        Ok(state)
    }

    /// Advance the live episode by one move.
    ///
    /// Blocked moves (off the grid or into a barrier) are ordinary steps with
    /// zero reward. Fails with [`GymError::NotReady`] when no episode is live,
    /// including after the step that ended the previous one.
    pub fn transition(&mut self, action: Action) -> Result<Step<Observation>> {
        self.ensure_live()?;
        let grid = &self.grid;
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| GymError::NotReady("no episode in progress; call initialize".into()))?;

        let mut info = Info::new();
        let target = action.apply(state.position).and_then(|c| Some((c, grid.cell(c)?)));
        let (reward, terminated) = match target {
            None | Some((_, Cell::Barrier)) => {
                info.insert("blocked", true);
                (0.0, false)
            }
            Some((next, cell)) => {
                info.insert("blocked", false);
                state.position = next;
                match cell {
                    Cell::Goal => {
                        info.insert("goal", true);
                        debug!(position = ?next, collected = state.collected.count(), "goal reached");
                        (GOAL_REWARD, true)
                    }
                    Cell::Shape { symbol, id } => {
                        if state.collected.insert(id) {
                            let reward = grid.shape(id).map_or(0.0, |s| s.reward);
                            info.insert("shape", id);
                            debug!(shape = id, %symbol, reward, "shape collected");
                            (reward, false)
                        } else {
                            (0.0, false)
                        }
                    }
                    Cell::Empty | Cell::Initial | Cell::Barrier => (0.0, false),
                }
            }
        };
        let observation = state.clone();

        self.steps = self.steps.saturating_add(1);
        let truncated = !terminated && self.max_episode_steps.is_some_and(|max| self.steps >= max);
        self.finished = terminated || truncated;
        trace!(?action, position = ?observation.position, reward, terminated, truncated, "step");
        Ok(Step::new(observation, reward, terminated, truncated, info))
    }

    /// `Ok` when an episode is live and can take another step.
    pub fn ensure_live(&self) -> Result<()> {
        if self.finished {
            Err(GymError::NotReady("episode has ended; call initialize".into()))
        } else if self.state.is_none() {
            Err(GymError::NotReady("no episode in progress; call initialize".into()))
        } else {
            Ok(())
        }
    }

    pub fn attach_renderer<R: Renderer + Send + 'static>(&mut self, renderer: R) {
        self.renderer = Some(Box::new(renderer));
    }

    pub fn detach_renderer(&mut self) -> Option<Box<dyn Renderer + Send>> {
        self.renderer.take()
    }

    /// Forward `observation` to the attached renderer, if any.
    pub fn render_observation(&mut self, observation: &Observation) {
        if let Some(r) = self.renderer.as_mut() {
            r.display(observation);
        }
    }

    pub fn render_text(&self) -> String {
        render::text_frame(&self.grid, self.state.as_ref(), &self.initial)
    }

    pub fn render_pixels(&self, tile: u32) -> RenderFrame {
        render::pixel_frame(&self.grid, self.state.as_ref(), &self.initial, tile)
    }

    pub fn action_count(&self) -> usize { Action::COUNT }

    pub fn max_num_agents(&self) -> usize { 1 }

    pub fn action_space(&self) -> Discrete { Discrete::new(Action::COUNT as u32) }

    /// `[height, width]`.
    pub fn position_space(&self) -> MultiDiscrete {
        MultiDiscrete::new(vec![self.grid.height() as u32, self.grid.width() as u32])
    }

    pub fn collected_space(&self) -> MultiBinary { MultiBinary::new(self.grid.shape_count()) }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn shared_grid(&self) -> Arc<Grid> { Arc::clone(&self.grid) }

    /// The live episode state, if `initialize` has run.
    pub fn state(&self) -> Option<&EpisodeState> { self.state.as_ref() }

    pub fn initial_cells(&self) -> &[Coord] { &self.initial }

    /// Whether the last step ended the episode.
    pub fn is_finished(&self) -> bool { self.finished }

    pub fn steps(&self) -> u32 { self.steps }
}

impl Env for FourRoomEnv {
    type Obs = Observation;
    type Act = u32;

    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Obs, Info)> {
        // A failed reset keeps the old stream as well as the old episode.
        let previous = seed.map(|s| std::mem::replace(&mut self.rng, rng_from_seed(s)));
        match self.initialize(self.random_start) {
            Ok(obs) => Ok((obs, Info::new())),
            Err(e) => {
                if let Some(rng) = previous { self.rng = rng; }
                Err(e)
            }
        }
    }

    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>> {
        let action = Action::try_from(action)?;
        self.transition(action)
    }

    fn check_step(&self, action: &Self::Act) -> Result<()> {
        Action::try_from(*action)?;
        self.ensure_live()
    }

    fn render(&self) -> Option<RenderFrame> { Some(RenderFrame::Text(self.render_text())) }

    fn close(&mut self) {
        self.renderer = None;
    }
}
