// Entropy seam for the synthetic data generators

/// Source of the random jitter mixed into generated fleet figures.
///
/// Production uses an unseeded generator; tests plug in fixed sources so
/// generated values can be asserted exactly.
pub trait NoiseSource: Send + Sync {
    /// Uniform integer in `[0, bound)`. Returns 0 when `bound` is 0.
    fn below(&self, bound: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn fraction(&self) -> f64;
}
