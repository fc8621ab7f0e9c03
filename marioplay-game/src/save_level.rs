use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

/// Split level text on `\n` or `\r\n`, dropping trailing empty rows.
///
/// Text without any line break is a single row, even when empty.
fn split_rows(level: &str) -> Vec<&str> {
    if !level.contains('\n') {
        return vec![level];
    }
    let mut rows: Vec<&str> = level
        .split('\n')
        .map(|row| row.strip_suffix('\r').unwrap_or(row))
        .collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    rows
}

/// Write level rows to `out`, each ended by the host line terminator.
///
/// # Errors
///
/// Returns any error raised by the writer.
pub fn save_level_to<W: Write>(level: &str, mut out: W) -> io::Result<()> {
    for row in split_rows(level) {
        out.write_all(row.as_bytes())?;
        out.write_all(LINE_ENDING.as_bytes())?;
    }
    out.flush()
}

/// Write level text to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_level(level: &str, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    save_level_to(level, BufWriter::new(file))
}
