//! Level file enumeration and experiment discovery.
//!
//! Entries are visited in file-name order within each directory. The random
//! stream used for translation is shared across levels, so a stable visiting
//! order is what makes a seeded run repeatable across filesystems.

use log::{error, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Experiment;

/// A directory could not be listed.
#[derive(Debug, Error)]
#[error("failed to walk {path}: {source}")]
pub struct WalkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

fn sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>, WalkError> {
    let wrap = |source| WalkError {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(wrap)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(wrap)?;
    entries.sort_by_key(fs::DirEntry::file_name);
    Ok(entries)
}

fn walk(dir: &Path, visit: &mut dyn FnMut(&Path, bool)) -> Result<(), WalkError> {
    for entry in sorted_entries(dir)? {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            visit(&path, true);
            walk(&path, visit)?;
        } else if file_type.is_file() {
            visit(&path, false);
        } else if file_type.is_symlink() {
            // Linked directories are not descended into; linked files count.
            if fs::metadata(&path).is_ok_and(|meta| meta.is_file()) {
                visit(&path, false);
            }
        }
    }
    Ok(())
}

/// Every regular file below `root`, depth first.
///
/// # Errors
///
/// Returns an error if `root` or any directory below it cannot be listed.
pub fn list_level_files(root: &Path) -> Result<Vec<PathBuf>, WalkError> {
    let mut files = Vec::new();
    walk(root, &mut |path, is_dir| {
        if !is_dir {
            files.push(path.to_path_buf());
        }
    })?;
    Ok(files)
}

/// Turn each directory below `generators_root/parent` into an experiment.
///
/// Directories named `levels` are containers rather than level sets and are
/// left out. Output files are named `Playability_<dir name>.csv`. A walk
/// failure is logged and yields no experiments.
#[must_use]
pub fn discover_experiments(generators_root: &Path, parent: &str) -> Vec<Experiment> {
    let base = generators_root.join(parent);
    let mut experiments = Vec::new();
    let walked = walk(&base, &mut |path, is_dir| {
        if !is_dir {
            return;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return;
        };
        if name == "levels" {
            return;
        }
        let Ok(relative) = path.strip_prefix(&base) else {
            return;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        info!("discovered experiment {name}");
        experiments.push(Experiment::new(
            format!("{}/{relative}", parent.trim_end_matches('/')),
            format!("Playability_{name}.csv"),
        ));
    });

    if let Err(err) = walked {
        error!("experiment discovery under {parent} failed: {err}");
        return Vec::new();
    }
    experiments
}
