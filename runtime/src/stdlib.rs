//! Integer helpers and the pseudo-random generator.

/// Largest value [`Rng::rand`] returns.
pub const RAND_MAX: i32 = 32767;

pub fn abs(x: i32) -> i32 {
    x.wrapping_abs()
}

/// Parses an optionally signed decimal integer after leading blanks,
/// stopping at the first non-digit. Returns 0 when no digits follow.
pub fn atoi(s: &[u8]) -> i32 {
    let mut rest = s;
    while let [b' ' | b'\t' | b'\n' | b'\r', tail @ ..] = rest {
        rest = tail;
    }

    let sign = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            -1
        }
        [b'+', tail @ ..] => {
            rest = tail;
            1
        }
        _ => 1,
    };

    let mut result: i32 = 0;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        result = result.wrapping_mul(10).wrapping_add(i32::from(b - b'0'));
    }
    result.wrapping_mul(sign)
}

/// Linear congruential generator with the classic C library constants.
///
/// The sequence depends on the seed alone.
#[derive(Debug, Clone)]
pub struct Rng {
    seed: u32,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Rng {
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn srand(&mut self, seed: u32) {
        self.seed = seed;
    }

    /// Next value in `0..=RAND_MAX`.
    pub fn rand(&mut self) -> i32 {
        self.seed = self.seed.wrapping_mul(1103515245).wrapping_add(12345);
        ((self.seed / 65536) % 32768) as i32
    }
}
