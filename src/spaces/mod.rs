//! Spaces describing actions (`Discrete`), agent positions (`MultiDiscrete`)
//! and collected-shape bits (`MultiBinary`).

pub mod space;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

pub use space::Space;

/// Integers in `[0, n)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discrete {
    n: u32,
}

impl Discrete {
    pub fn new(n: u32) -> Self {
        assert!(n > 0, "Discrete space requires n > 0");
        Self { n }
    }

    pub fn n(&self) -> u32 { self.n }
}

impl Space for Discrete {
    type Element = u32;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        Uniform::from(0..self.n).sample(rng)
    }

    fn contains(&self, elem: &u32) -> bool { *elem < self.n }
}

/// Fixed-length vectors of `0/1` values.
///
/// A length of zero is allowed: a map without shapes has an empty bitset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiBinary {
    n: usize,
}

impl MultiBinary {
    pub fn new(n: usize) -> Self { Self { n } }

    pub fn n(&self) -> usize { self.n }
}

impl Space for MultiBinary {
    type Element = Vec<u8>;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u8> {
        (0..self.n).map(|_| rng.gen_bool(0.5) as u8).collect()
    }

    fn contains(&self, elem: &Vec<u8>) -> bool {
        elem.len() == self.n && elem.iter().all(|&v| v <= 1)
    }
}

/// Vectors whose i-th entry lies in `[0, nvec[i])`; a position is `[height, width]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiDiscrete {
    nvec: Vec<u32>,
}

impl MultiDiscrete {
    pub fn new<I: Into<Vec<u32>>>(nvec: I) -> Self {
        let nvec = nvec.into();
        assert!(!nvec.is_empty(), "MultiDiscrete requires at least one dimension");
        for (i, &n) in nvec.iter().enumerate() {
            assert!(n > 0, "MultiDiscrete nvec[{i}] must be > 0");
        }
        Self { nvec }
    }

    pub fn nvec(&self) -> &[u32] { &self.nvec }
    pub fn ndim(&self) -> usize { self.nvec.len() }
}

impl Space for MultiDiscrete {
    type Element = Vec<u32>;

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u32> {
        self.nvec.iter().map(|&n| Uniform::from(0..n).sample(rng)).collect()
    }

    fn contains(&self, elem: &Vec<u32>) -> bool {
        elem.len() == self.nvec.len() && elem.iter().zip(&self.nvec).all(|(&v, &n)| v < n)
    }
}
