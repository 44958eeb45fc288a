//! Per-episode state: agent position, action encoding and the collected-shape bitset.

use crate::core::GymError;

/// A grid coordinate as `(row, col)`, with `(0, 0)` at the top left.
pub type Coord = (usize, usize);

/// The four cardinal moves, encoded 0=LEFT, 1=UP, 2=RIGHT, 3=DOWN.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum Action {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
}

impl Action {
    pub const COUNT: usize = 4;
    pub const ALL: [Action; Action::COUNT] = [Action::Left, Action::Up, Action::Right, Action::Down];

    /// `(d_row, d_col)` unit offset of this move.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Left => (0, -1),
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
        }
    }

    /// Apply the offset to `from`. Returns `None` when the move would leave the
    /// upper or left edge; the lower and right edges are the grid's business.
    pub fn apply(self, (row, col): Coord) -> Option<Coord> {
        let (dr, dc) = self.delta();
        Some((row.checked_add_signed(dr)?, col.checked_add_signed(dc)?))
    }
}

impl TryFrom<u32> for Action {
    type Error = GymError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        Ok(match v {
            0 => Action::Left,
            1 => Action::Up,
            2 => Action::Right,
            3 => Action::Down,
            other => return Err(GymError::InvalidAction(format!("{other} (expected 0..=3)"))),
        })
    }
}

impl From<Action> for u32 {
    fn from(a: Action) -> Self { a as u32 }
}

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-length bitset with one bit per shape cell.
///
/// The length is set when the episode starts and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectedShapes {
    len: usize,
    words: Box<[u64]>,
}

impl CollectedShapes {
    /// All-zero bitset of `len` bits.
    pub fn new(len: usize) -> Self {
        let words = vec![0u64; len.div_ceil(WORD_BITS)].into_boxed_slice();
        Self { len, words }
    }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Out-of-range indices read as not collected.
    pub fn get(&self, index: usize) -> bool {
        index < self.len && self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    /// Set bit `index`, returning whether it was newly set.
    ///
    /// # Panics
    /// If `index >= len()`.
    pub fn insert(&mut self, index: usize) -> bool {
        assert!(index < self.len, "shape index {index} out of range for {} shapes", self.len);
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.words[index / WORD_BITS];
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn none(&self) -> bool { self.words.iter().all(|&w| w == 0) }

    /// Indices of collected shapes, ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&i| self.get(i))
    }

    /// The bitset as a `0/1` vector, the element type of
    /// [`MultiBinary`](crate::spaces::MultiBinary).
    pub fn to_bits(&self) -> Vec<u8> {
        (0..self.len).map(|i| self.get(i) as u8).collect()
    }
}

/// Live state of one episode, also handed out as the observation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EpisodeState {
    pub position: Coord,
    pub collected: CollectedShapes,
}

/// What the agent sees after each call: exactly the episode state.
pub type Observation = EpisodeState;

impl EpisodeState {
    pub fn new(position: Coord, shape_count: usize) -> Self {
        Self { position, collected: CollectedShapes::new(shape_count) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_round_trips_through_u32() {
        for a in Action::ALL {
            assert_eq!(Action::try_from(u32::from(a)).unwrap(), a);
        }
        assert!(matches!(Action::try_from(7), Err(GymError::InvalidAction(_))));
    }

    #[test]
    fn apply_stops_at_top_left_edges() {
        assert_eq!(Action::Left.apply((3, 0)), None);
        assert_eq!(Action::Up.apply((0, 3)), None);
        assert_eq!(Action::Right.apply((0, 0)), Some((0, 1)));
        assert_eq!(Action::Down.apply((0, 0)), Some((1, 0)));
    }

    #[test]
    fn bitset_spans_word_boundaries() {
        let mut c = CollectedShapes::new(130);
        assert!(c.none());
        assert!(c.insert(0));
        assert!(c.insert(64));
        assert!(c.insert(129));
        assert!(!c.insert(64));
        assert_eq!(c.count(), 3);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![0, 64, 129]);
        assert!(!c.get(130));
        let bits = c.to_bits();
        assert_eq!(bits.len(), 130);
        assert_eq!(bits[129], 1);
    }

    #[test]
    fn zero_shapes_is_valid() {
        let c = CollectedShapes::new(0);
        assert!(c.is_empty());
        assert!(c.none());
        assert!(c.to_bits().is_empty());
    }
}
