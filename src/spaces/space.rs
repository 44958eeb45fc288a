use rand::Rng;

/// A set of values an environment accepts or produces.
pub trait Space {
    type Element;

    /// Draw a uniform sample using the provided RNG.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Element;

    fn contains(&self, elem: &Self::Element) -> bool;
}
