use crate::consts::PRNG_SEED_WORD_B;
use std::time::{SystemTime, UNIX_EPOCH};

/// xorshift128+ generator driving every random choice on the hot path.
///
/// Initialization shuffles use a separately seeded [`fastrand::Rng`] so the
/// annealing trajectory under a fixed seed does not depend on how the
/// initial permutations were produced.
#[derive(Debug, Clone)]
pub struct Xorshift128p {
    a: u64,
    b: u64,
}

impl Xorshift128p {
    /// Seeds the first word from the wall clock, second word fixed.
    pub fn from_clock() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(1);
        Self::with_seed(secs)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            a: seed,
            b: PRNG_SEED_WORD_B,
        }
    }

    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        let mut t = self.a;
        let s = self.b;
        self.a = s;
        t ^= t << 23;
        t ^= t >> 17;
        t ^= s ^ (s >> 26);
        self.b = t;
        t.wrapping_add(s)
    }

    /// Uniform-ish value in `[0, n)` via the modulo reduction. The bias for
    /// n far below 2^64 is negligible and the reduction is kept as-is.
    #[inline(always)]
    pub fn below(&mut self, n: u64) -> u64 {
        debug_assert!(n > 0, "range for below() must be non-empty");
        self.next_u64() % n
    }

    /// Value in `[0, 1]`, scaled against `u64::MAX`.
    #[inline(always)]
    pub fn next_unit(&mut self) -> f64 {
        self.next_u64() as f64 / u64::MAX as f64
    }
}
