//! Park-Miller Linear Congruential Generator (MINSTD)
//!
//! Every consumer that regenerates a maze from its seed (circuit verifier,
//! frontend renderer) runs this exact generator, so the constants and the
//! truncating arithmetic below are part of the wire contract.
//!
//! Constants:
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

/// Park-Miller multiplier.
pub const MULTIPLIER: u64 = 48271;

/// Park-Miller modulus, 2^31 - 1.
pub const MODULUS: u64 = 2147483647;

/// Park-Miller Linear Congruential Generator
///
/// Generates a deterministic sequence of pseudo-random numbers from a seed.
/// Same seed always produces the same sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleLCG {
    state: u32,
}

impl SimpleLCG {
    /// Create a new LCG with the given seed
    ///
    /// If seed is 0, it's replaced with 1 to avoid degenerate sequence
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Current generator state.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance RNG state
    ///
    /// Seeds above the modulus reduce into range on the first draw, after
    /// which the state stays within `1..MODULUS`.
    fn advance(&mut self) -> u64 {
        // u64 holds state * A (< 2^32 * 2^16) without overflow
        let next = (self.state as u64 * MULTIPLIER) % MODULUS;
        self.state = next as u32;
        next
    }

    /// Generate a value in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.advance() as f64 / MODULUS as f64
    }

    /// Generate random integer in range [a, b] (inclusive)
    ///
    /// Computes `a + floor(state * (b - a + 1) / M)` in integers, which is
    /// exactly `a + floor(next_f64() * (b - a + 1))` without float rounding.
    pub fn randint(&mut self, a: usize, b: usize) -> usize {
        debug_assert!(a <= b, "randint called with empty range [{a}, {b}]");
        let range = (b - a + 1) as u64;
        a + self.scaled(range) as usize
    }

    /// Choose random index from a range [0, len)
    pub fn choice_index(&mut self, len: usize) -> usize {
        self.scaled(len as u64) as usize
    }

    /// Choose an element of `items`, or `None` if it is empty.
    ///
    /// An empty slice consumes no draw.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.choice_index(items.len()))
    }

    fn scaled(&mut self, n: u64) -> u64 {
        let state = self.advance();
        // widened so state * n cannot overflow for any usize range
        ((state as u128 * n as u128) / MODULUS as u128) as u64
    }
}
