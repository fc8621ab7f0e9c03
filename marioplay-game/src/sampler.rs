//! Uniform random sources for the `?` block substitution.
//!
//! Reference playability CSVs were produced with a 48-bit linear congruential
//! generator; [`JavaRandom`] reproduces its stream bit for bit so a seed maps
//! to the same block contents here. Any `rand` generator can be used instead
//! through [`RandSampler`].

use rand::{Rng, RngCore};

/// Source of uniform draws in `[0, 1)`.
pub trait UnitSampler {
    fn next_unit(&mut self) -> f64;
}

impl<S: UnitSampler + ?Sized> UnitSampler for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<S: UnitSampler + ?Sized> UnitSampler for Box<S> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const ADDEND: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;
const DOUBLE_UNIT: f64 = 1.0 / (1_u64 << 53) as f64;

/// 48-bit LCG compatible with `java.util.Random`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaRandom {
    state: u64,
}

impl JavaRandom {
    /// Seed the generator the way the reference tool seeds from its `int` argument.
    #[must_use]
    pub fn new(seed: i64) -> Self {
        #[allow(clippy::cast_sign_loss)]
        let raw = seed as u64;
        Self {
            state: (raw ^ MULTIPLIER) & MASK,
        }
    }

    fn next_bits(&mut self, bits: u32) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        #[allow(clippy::cast_possible_truncation)]
        let value = (self.state >> (48 - bits)) as u32;
        value
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn next_double(&mut self) -> f64 {
        let high = u64::from(self.next_bits(26)) << 27;
        let low = u64::from(self.next_bits(27));
        (high + low) as f64 * DOUBLE_UNIT
    }
}

impl UnitSampler for JavaRandom {
    fn next_unit(&mut self) -> f64 {
        self.next_double()
    }
}

/// Adapter feeding draws from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandSampler<R>(pub R);

impl<R: RngCore> UnitSampler for RandSampler<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}
