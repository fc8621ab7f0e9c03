use anyhow::{Context, Result};
use log::error;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

/// Set up `env_logger`, defaulting to `default_level` unless `RUST_LOG` is set.
pub fn init_logging(verbose: bool, default_level: &str) {
    let level = if verbose { "debug" } else { default_level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Read a level file as text. Bytes that are not valid UTF-8 are replaced
/// rather than rejected, so only I/O failures are errors.
///
/// # Errors
///
/// Returns the I/O error if the file cannot be read.
pub fn read_level(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a level file, falling back to empty text when it cannot be read.
#[must_use]
pub fn read_level_or_empty(path: &Path) -> String {
    read_level(path).unwrap_or_else(|err| {
        error!("Error reading file {}: {err}", path.display());
        String::new()
    })
}

/// Report destination: stdout unless a file was requested.
pub enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    /// # Errors
    ///
    /// Returns an error if the requested file cannot be created.
    pub fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    pub fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_level_reads_as_empty() {
        let path = std::env::temp_dir().join("marioplay-definitely-missing-level.txt");
        assert_eq!(read_level_or_empty(&path), "");
    }

    #[test]
    fn non_utf8_level_is_decoded_not_dropped() {
        let path = std::env::temp_dir().join(format!(
            "marioplay-latin1-{}.txt",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        std::fs::write(&path, b"--\xe9--\nXXXXX\n").unwrap();
        let text = read_level_or_empty(&path);
        assert_eq!(text, "--\u{fffd}--\nXXXXX\n");
        assert_eq!(read_level(&path).unwrap(), text);
    }

    #[test]
    fn output_target_writes_file() {
        let path = std::env::temp_dir().join(format!(
            "marioplay-output-{}.txt",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        target.write_all(b"1\n1\n").unwrap();
        target.flush().unwrap();
        drop(target);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "1\n1\n");
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"").unwrap();
        target.flush().unwrap();
    }
}
