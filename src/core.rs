// Core traits and types shared by the environment, wrappers and vector runner.

use crate::grid::GridError;

/// A small ordered info map attached to every step.
/// Keys are few per step, so a vector beats a hash map here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Info {
    entries: Vec<(String, InfoValue)>,
}

impl Info {
    pub fn new() -> Self { Self { entries: Vec::new() } }

    /// Insert or replace a key with the given value.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: impl Into<InfoValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(InfoValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn len(&self) -> usize { self.entries.len() }
}

/// Value types carried in an [`Info`] map.
#[derive(Clone, Debug, PartialEq)]
pub enum InfoValue {
    Bool(bool),
    I64(i64),
    F64(f64),
}

impl From<bool> for InfoValue { fn from(v: bool) -> Self { InfoValue::Bool(v) } }
impl From<i64> for InfoValue { fn from(v: i64) -> Self { InfoValue::I64(v) } }
impl From<usize> for InfoValue { fn from(v: usize) -> Self { InfoValue::I64(v as i64) } }
impl From<f64> for InfoValue { fn from(v: f64) -> Self { InfoValue::F64(v) } }

/// A frame returned by `Env::render`.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderFrame {
    /// ASCII snapshot, one line per grid row.
    Text(String),
    /// Row-major RGBA pixel buffer.
    Pixels {
        width: u32,
        height: u32,
        data: Vec<u8>,
    },
}

/// The outcome of a single transition.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<Obs> {
    pub observation: Obs,
    pub reward: f32,
    /// The goal was reached; the episode is over.
    pub terminated: bool,
    /// The optional step limit was hit. Never set by the transition rules themselves.
    pub truncated: bool,
    pub info: Info,
}

impl<Obs> Step<Obs> {
    pub fn new(observation: Obs, reward: f32, terminated: bool, truncated: bool, info: Info) -> Self {
        Self { observation, reward, terminated, truncated, info }
    }

    /// Whether the caller must reset before stepping again.
    pub fn done(&self) -> bool { self.terminated || self.truncated }
}

/// Errors raised by the environment APIs.
///
/// Blocked moves (off-grid or into a barrier) are ordinary transitions and
/// never surface here.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GymError {
    /// The map or reward table is malformed, or no start cell can be chosen.
    #[error("configuration error: {0}")]
    Configuration(#[from] GridError),
    #[error("invalid action: {0}")]
    InvalidAction(String),
    /// No live episode: `initialize` has not run, or the last episode ended.
    #[error("environment not ready: {0}")]
    NotReady(String),
    /// The operation needs a cargo feature that is not enabled, or a frame kind it cannot handle.
    #[error("not supported: {0}")]
    NotSupported(String),
    #[error("i/o error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, GymError>;

/// Core environment trait following the Gymnasium contract.
///
/// Every fallible call leaves the environment untouched when it returns `Err`.
pub trait Env {
    type Obs;
    type Act;

    /// Start a new episode. When `seed` is given the internal RNG is reseeded first.
    fn reset(&mut self, seed: Option<u64>) -> Result<(Self::Obs, Info)>;

    /// Apply an action and advance the environment by one step.
    fn step(&mut self, action: Self::Act) -> Result<Step<Self::Obs>>;

    /// Report the error `step(action)` would return, without stepping.
    ///
    /// `Ok` means the step will succeed. Batch runners use this to reject a
    /// batch before any copy moves.
    fn check_step(&self, _action: &Self::Act) -> Result<()> { Ok(()) }

    fn render(&self) -> Option<RenderFrame> { None }

    fn close(&mut self) {}
}
