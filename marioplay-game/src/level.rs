use log::warn;

use crate::tiles::VglcTile;

/// A level grid held as its rows of tile symbols.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Level {
    rows: Vec<String>,
}

impl Level {
    /// Split level text into rows, accepting `\n` and `\r\n` separators.
    ///
    /// A single trailing line break does not start an extra row.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let rows = text.lines().map(str::to_string).collect();
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row, in symbols.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_rectangular(&self) -> bool {
        let width = self.width();
        self.rows.iter().all(|row| row.chars().count() == width)
    }

    /// Distinct symbols outside the VGLC alphabet, in first-seen order.
    #[must_use]
    pub fn unknown_symbols(&self) -> Vec<char> {
        let mut unknown = Vec::new();
        for symbol in self.rows.iter().flat_map(|row| row.chars()) {
            if VglcTile::from_symbol(symbol).is_none() && !unknown.contains(&symbol) {
                unknown.push(symbol);
            }
        }
        unknown
    }

    /// Log a warning for ragged rows and for symbols outside the VGLC
    /// alphabet. Returns `true` when the grid is clean.
    pub fn warn_if_irregular(&self, name: &str) -> bool {
        let mut clean = true;
        if !self.is_rectangular() {
            warn!(
                "{name}: ragged rows ({} rows, widest {})",
                self.height(),
                self.width()
            );
            clean = false;
        }
        let unknown = self.unknown_symbols();
        if !unknown.is_empty() {
            let symbols: String = unknown.into_iter().collect();
            warn!("{name}: symbols outside the VGLC alphabet kept as-is: {symbols}");
            clean = false;
        }
        clean
    }
}
