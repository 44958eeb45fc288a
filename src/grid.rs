//! Immutable grid model: cell classification, shape ids and reward lookup.
//!
//! Map symbols:
//! - `G` the goal (exactly one)
//! - `_` a candidate start cell
//! - `X` a barrier
//! - `0`..=`9` a shape whose reward is looked up in the reward table
//! - anything else is an empty cell

use std::collections::BTreeMap;

use tracing::debug;

use crate::state::Coord;

/// Reward granted for collecting a shape, keyed by its digit symbol.
pub type RewardTable = BTreeMap<char, f32>;

/// Reasons a map cannot be turned into a [`Grid`], or an episode cannot start on it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("map has no cells")]
    EmptyGrid,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("map has no goal cell")]
    MissingGoal,
    #[error("map has more than one goal cell: {first:?} and {second:?}")]
    DuplicateGoal { first: Coord, second: Coord },
    #[error("shape '{symbol}' at ({row}, {col}) has no entry in the reward table")]
    UnmappedShape { symbol: char, row: usize, col: usize },
    #[error("map declares no initial cell and random starts are disabled")]
    NoInitialCells,
    #[error("map has no empty cell to start from")]
    NoEmptyCells,
}

/// Classification of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Initial,
    Barrier,
    Goal,
    /// Shape cell with its dense index into the collected bitset.
    Shape { symbol: char, id: usize },
}

impl Cell {
    /// The map symbol this cell round-trips to. Empty cells print as a space.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Initial => '_',
            Cell::Barrier => 'X',
            Cell::Goal => 'G',
            Cell::Shape { symbol, .. } => symbol,
        }
    }
}

/// A collectible shape cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
    pub coord: Coord,
    pub symbol: char,
    pub reward: f32,
}

/// Parsed map. Built once, then shared read-only by every episode.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major.
    cells: Vec<Cell>,
    goal: Coord,
    initial: Vec<Coord>,
    empty: Vec<Coord>,
    /// Indexed by shape id.
    shapes: Vec<Shape>,
    rewards: RewardTable,
    /// Raw markers, kept so the map can be reclassified with another reward table.
    source: Vec<Vec<char>>,
}

/// The canonical 13x13 four-room layout.
pub const FOUR_ROOM_LAYOUT: [&str; 13] = [
    "1    2X     G",
    "      X      ",
    "      1      ",
    "             ",
    "      X      ",
    "2    3X      ",
    "XX3 XXXXX 1XX",
    "      X2    3",
    "      X      ",
    "             ",
    "      2      ",
    "      X      ",
    "_     X3    1",
];

/// Rewards of the canonical layout: two positive shape types and one to avoid.
pub fn four_room_rewards() -> RewardTable {
    RewardTable::from([('1', 1.0), ('2', 0.5), ('3', -1.0)])
}

impl Grid {
    /// Classify every cell of `map`.
    ///
    /// Shape ids are handed out column by column, top to bottom within a
    /// column, so the bitset layout is stable for a given map.
    pub fn new(map: Vec<Vec<char>>, rewards: RewardTable) -> Result<Self, GridError> {
        let height = map.len();
        let width = map.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::EmptyGrid);
        }
        if let Some((row, r)) = map.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::RaggedRow { row, expected: width, found: r.len() });
        }

        let mut cells = vec![Cell::Empty; width * height];
        let mut goal: Option<Coord> = None;
        let mut initial = Vec::new();
        let mut empty = Vec::new();
        let mut shapes = Vec::new();

        for col in 0..width {
            for row in 0..height {
                let cell = match map[row][col] {
                    'G' => {
                        if let Some(first) = goal {
                            return Err(GridError::DuplicateGoal { first, second: (row, col) });
                        }
                        goal = Some((row, col));
                        Cell::Goal
                    }
                    '_' => {
                        initial.push((row, col));
                        Cell::Initial
                    }
                    'X' => Cell::Barrier,
                    symbol @ '0'..='9' => {
                        let reward = *rewards
                            .get(&symbol)
                            .ok_or(GridError::UnmappedShape { symbol, row, col })?;
                        let id = shapes.len();
                        shapes.push(Shape { coord: (row, col), symbol, reward });
                        Cell::Shape { symbol, id }
                    }
                    _ => {
                        empty.push((row, col));
                        Cell::Empty
                    }
                };
                cells[row * width + col] = cell;
            }
        }

        let goal = goal.ok_or(GridError::MissingGoal)?;
        // Start-cell sampling draws from these, so keep them in reading order.
        initial.sort_unstable();
        empty.sort_unstable();

        debug!(width, height, shapes = shapes.len(), ?goal, "grid parsed");
        Ok(Self { width, height, cells, goal, initial, empty, shapes, rewards, source: map })
    }

    /// Parse a map given as one string per row.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], rewards: RewardTable) -> Result<Self, GridError> {
        let map = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        Self::new(map, rewards)
    }

    /// The canonical four-room map with its default rewards.
    pub fn four_room() -> Result<Self, GridError> {
        Self::from_rows(&FOUR_ROOM_LAYOUT, four_room_rewards())
    }

    /// Same map, different shape values.
    pub fn with_rewards(&self, rewards: RewardTable) -> Result<Self, GridError> {
        Self::new(self.source.clone(), rewards)
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn in_bounds(&self, (row, col): Coord) -> bool {
        row < self.height && col < self.width
    }

    /// Classification of `coord`, or `None` when it lies off the grid.
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.in_bounds(coord).then(|| self.cells[coord.0 * self.width + coord.1])
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.cell(coord) == Some(Cell::Barrier)
    }

    pub fn goal(&self) -> Coord { self.goal }

    /// Cells marked `_`, in reading order.
    pub fn initial_cells(&self) -> &[Coord] { &self.initial }

    /// Unmarked cells eligible for random starts, in reading order.
    pub fn empty_cells(&self) -> &[Coord] { &self.empty }

    pub fn occupied_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(move |&c| self.is_occupied(c))
    }

    /// Every coordinate in reading order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let (height, width) = (self.height, self.width);
        (0..height).flat_map(move |r| (0..width).map(move |c| (r, c)))
    }

    pub fn shape_count(&self) -> usize { self.shapes.len() }

    pub fn shapes(&self) -> &[Shape] { &self.shapes }

    pub fn shape(&self, id: usize) -> Option<&Shape> { self.shapes.get(id) }

    pub fn shape_at(&self, coord: Coord) -> Option<&Shape> {
        match self.cell(coord)? {
            Cell::Shape { id, .. } => self.shapes.get(id),
            _ => None,
        }
    }

    pub fn reward_at(&self, coord: Coord) -> Option<f32> {
        self.shape_at(coord).map(|s| s.reward)
    }

    pub fn rewards(&self) -> &RewardTable { &self.rewards }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.cells.chunks(self.width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
