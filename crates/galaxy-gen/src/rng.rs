//! Park–Miller minimal-standard generator seeded from a string hash.

const MODULUS: u64 = 2_147_483_647; // 2^31 - 1
const MULTIPLIER: u64 = 16_807;

/// Polynomial string hash (base 31) over UTF-16 code units, wrapped to 32 bits.
///
/// Returns the absolute value widened to `u64` so `i32::MIN` does not overflow.
pub fn hash_seed(seed: &str) -> u64 {
    let mut hash: i32 = 0;
    for unit in seed.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    i64::from(hash).unsigned_abs()
}

/// Deterministic pseudo-random stream. Two instances built from the same seed
/// string yield identical sequences.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: &str) -> Self {
        // A zero state would stick at zero forever.
        let state = match hash_seed(seed) % MODULUS {
            0 => 1,
            s => s,
        };
        Self { state }
    }

    /// Next value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * MULTIPLIER % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }

    #[inline]
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform integer in `[min, max]`, both ends inclusive.
    #[inline]
    pub fn int(&mut self, min: i64, max: i64) -> i64 {
        let v = self.range(min as f64, (max + 1) as f64).floor() as i64;
        v.min(max)
    }

    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.int(0, items.len() as i64 - 1) as usize;
        items.get(i)
    }

    /// `true` with probability `p`.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
