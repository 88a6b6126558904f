//! Injectable randomness.
//!
//! Every random draw in the engine (weighted offsets, spreads, jitter,
//! fresh saturation/lightness) goes through a [`RandomSource`] passed in by
//! the caller. Nothing reaches for a process-wide generator, so a seeded
//! source makes a whole palette reproducible.

use rand::Rng;

/// A stream of uniform draws in [0, 1).
pub trait RandomSource {
    /// Next value in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Uniform value in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        (hi - lo).mul_add(self.next_f64(), lo)
    }

    /// -1.0 or +1.0 with equal probability.
    fn sign(&mut self) -> f64 {
        if self.next_f64() < 0.5 { -1.0 } else { 1.0 }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

// ---------------------------------------------------------------------------
// Xorshift: a minimal deterministic PRNG
// ---------------------------------------------------------------------------

/// Minimal deterministic xorshift32 generator.
#[derive(Debug, Clone)]
pub struct Xorshift {
    state: u32,
}

impl Xorshift {
    /// Seed the generator. A zero seed would stick at zero, so it becomes 1.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    const fn next(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}

impl RandomSource for Xorshift {
    fn next_f64(&mut self) -> f64 {
        // 2^32, so u32::MAX maps just below 1.0.
        f64::from(self.next()) / 4_294_967_296.0
    }
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

/// Adapter over any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RandSource<R>(pub R);

impl<R: Rng> RandomSource for RandSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of draws, cycling when it runs out.
///
/// Pins exact values in tests; an empty list yields 0.0 forever.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceSource {
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), pos: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}
