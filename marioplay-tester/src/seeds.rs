use clap::ValueEnum;
use marioplay_game::{JavaRandom, RandSampler, UnitSampler};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Random stream used for `?` block contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RngKind {
    /// 48-bit LCG matching the stream of the reference playability runs
    #[default]
    Java,
    /// ChaCha20 stream from `rand_chacha`
    Chacha,
}

/// Build the sampler for `kind`, seeded from the command-line seed.
#[must_use]
pub fn build_sampler(kind: RngKind, seed: i64) -> Box<dyn UnitSampler> {
    match kind {
        RngKind::Java => Box::new(JavaRandom::new(seed)),
        RngKind::Chacha => Box::new(RandSampler(ChaCha20Rng::seed_from_u64(seed.unsigned_abs()))),
    }
}
