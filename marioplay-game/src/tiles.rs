//! Tile vocabularies for the two level dialects.
//!
//! Generator corpora emit levels in the VGLC alphabet; the simulation engine
//! reads its own native alphabet. [`VglcTile`] names the source symbols and
//! [`EngineTile`] the handful of native symbols the translator produces.

use serde::{Deserialize, Serialize};

/// One symbol of the VGLC Super Mario Bros. alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VglcTile {
    Ground,
    Breakable,
    Empty,
    FullQuestionBlock,
    EmptyQuestionBlock,
    Enemy,
    TopLeftPipe,
    TopRightPipe,
    LeftPipe,
    RightPipe,
    Coin,
    CannonTop,
    CannonBody,
}

impl VglcTile {
    pub const ALL: [Self; 13] = [
        Self::Ground,
        Self::Breakable,
        Self::Empty,
        Self::FullQuestionBlock,
        Self::EmptyQuestionBlock,
        Self::Enemy,
        Self::TopLeftPipe,
        Self::TopRightPipe,
        Self::LeftPipe,
        Self::RightPipe,
        Self::Coin,
        Self::CannonTop,
        Self::CannonBody,
    ];

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'X' => Some(Self::Ground),
            'S' => Some(Self::Breakable),
            '-' => Some(Self::Empty),
            '?' => Some(Self::FullQuestionBlock),
            'Q' => Some(Self::EmptyQuestionBlock),
            'E' => Some(Self::Enemy),
            '<' => Some(Self::TopLeftPipe),
            '>' => Some(Self::TopRightPipe),
            '[' => Some(Self::LeftPipe),
            ']' => Some(Self::RightPipe),
            'o' => Some(Self::Coin),
            'B' => Some(Self::CannonTop),
            'b' => Some(Self::CannonBody),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Ground => 'X',
            Self::Breakable => 'S',
            Self::Empty => '-',
            Self::FullQuestionBlock => '?',
            Self::EmptyQuestionBlock => 'Q',
            Self::Enemy => 'E',
            Self::TopLeftPipe => '<',
            Self::TopRightPipe => '>',
            Self::LeftPipe => '[',
            Self::RightPipe => ']',
            Self::Coin => 'o',
            Self::CannonTop => 'B',
            Self::CannonBody => 'b',
        }
    }
}

/// Native engine symbols written by the translator.
pub struct EngineTile;

impl EngineTile {
    pub const PIPE: char = 't';
    pub const CANNON: char = '*';
    pub const USED_BLOCK: char = 'D';
    pub const GOOMBA: char = 'g';
}

/// Contents picked for a full `?` block.
///
/// Variants are ordered by the upper edge of their probability band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionReward {
    CoinBlock,
    MushroomBlock,
    FireFlowerBlock,
    StarBlock,
    SingleCoinBlock,
}

impl QuestionReward {
    pub const BANDS: [(f64, Self); 4] = [
        (0.2, Self::CoinBlock),
        (0.4, Self::MushroomBlock),
        (0.6, Self::FireFlowerBlock),
        (0.8, Self::StarBlock),
    ];

    /// Pick the reward for a uniform draw in `[0, 1)`.
    ///
    /// Bands are half-open: a draw of exactly `0.2` lands in the second band.
    #[must_use]
    pub fn from_draw(draw: f64) -> Self {
        Self::BANDS
            .iter()
            .find(|(upper, _)| draw < *upper)
            .map_or(Self::SingleCoinBlock, |(_, reward)| *reward)
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::CoinBlock => 'C',
            Self::MushroomBlock => 'L',
            Self::FireFlowerBlock => 'U',
            Self::StarBlock => '@',
            Self::SingleCoinBlock => '!',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip_through_from_symbol() {
        for tile in VglcTile::ALL {
            assert_eq!(VglcTile::from_symbol(tile.symbol()), Some(tile));
        }
        assert_eq!(VglcTile::from_symbol('Z'), None);
        assert_eq!(VglcTile::from_symbol('t'), None);
    }

    #[test]
    fn reward_bands_are_half_open() {
        assert_eq!(QuestionReward::from_draw(0.0), QuestionReward::CoinBlock);
        assert_eq!(QuestionReward::from_draw(0.2), QuestionReward::MushroomBlock);
        assert_eq!(QuestionReward::from_draw(0.399_999), QuestionReward::MushroomBlock);
        assert_eq!(QuestionReward::from_draw(0.4), QuestionReward::FireFlowerBlock);
        assert_eq!(QuestionReward::from_draw(0.6), QuestionReward::StarBlock);
        assert_eq!(QuestionReward::from_draw(0.8), QuestionReward::SingleCoinBlock);
        assert_eq!(QuestionReward::from_draw(0.999), QuestionReward::SingleCoinBlock);
    }
}
