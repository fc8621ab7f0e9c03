//! VGLC to engine-native level translation.

use crate::sampler::UnitSampler;
use crate::tiles::{EngineTile, QuestionReward, VglcTile};

/// Native symbol for a `?` block given a uniform draw in `[0, 1)`.
#[must_use]
pub fn question_block_for(draw: f64) -> char {
    QuestionReward::from_draw(draw).symbol()
}

/// Deterministic mapping for every symbol except `?`.
///
/// Returns `None` for `?`, whose replacement needs a random draw.
#[must_use]
pub const fn translate_symbol(symbol: char) -> Option<char> {
    match VglcTile::from_symbol(symbol) {
        Some(VglcTile::FullQuestionBlock) => None,
        Some(
            VglcTile::TopLeftPipe
            | VglcTile::TopRightPipe
            | VglcTile::LeftPipe
            | VglcTile::RightPipe,
        ) => Some(EngineTile::PIPE),
        Some(VglcTile::CannonTop | VglcTile::CannonBody) => Some(EngineTile::CANNON),
        Some(VglcTile::EmptyQuestionBlock) => Some(EngineTile::USED_BLOCK),
        Some(VglcTile::Enemy) => Some(EngineTile::GOOMBA),
        _ => Some(symbol),
    }
}

/// Translate raw VGLC level text into the engine's tile alphabet.
///
/// Every character maps to exactly one character, so row count, row widths
/// and line breaks are preserved. One draw is taken from `sampler` per `?`,
/// in reading order; nothing else touches the sampler.
pub fn translate_vglc<S>(level: &str, sampler: &mut S) -> String
where
    S: UnitSampler + ?Sized,
{
    let mut out = String::with_capacity(level.len());
    for symbol in level.chars() {
        let translated =
            translate_symbol(symbol).unwrap_or_else(|| question_block_for(sampler.next_unit()));
        out.push(translated);
    }
    out
}
