use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::line_coding::{Bit, IDLE_CODE, code_from_bits};

/// Timer-driven input source.
///
/// Produces raw direct codes: idle (`-1`), or a random symbol built from
/// `bits_per_symbol` random bits (`0, 1, 10, 11` for PAM5).
pub struct TickGenerator {
    rng: StdRng,
    idle_one_in: u32,
}

impl TickGenerator {
    pub fn new(seed: Option<u64>, idle_one_in: u32) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            idle_one_in: idle_one_in.max(1),
        }
    }

    pub fn next_code(&mut self, randomize: bool, bits_per_symbol: usize) -> i32 {
        if !randomize {
            return IDLE_CODE;
        }
        if self
            .rng
            .random_bool(1.0 / self.idle_one_in as f64)
        {
            return IDLE_CODE;
        }
        let bits: Vec<Bit> = (0..bits_per_symbol)
            .map(|_| Bit::from(self.rng.random::<bool>()))
            .collect();
        code_from_bits(&bits)
    }
}
