//! Artifact discovery for `manifest.json` and `config.yml`
//!
//! Pure filesystem probing; an absent artifact is never an error here.
//! Callers decide how to report what was (not) found.

use std::env;
use std::path::{Path, PathBuf};

/// File name of the application manifest
pub const MANIFEST_FILE: &str = "manifest.json";
/// File name of the optional deployment config
pub const CONFIG_FILE: &str = "config.yml";

/// Parent levels searched above each starting directory
const MAX_SEARCH_DEPTH: usize = 5;

/// Path of the entry script for the current invocation.
///
/// The dispatcher sets `DOCGO_EXEC_PATH`; outside of a dispatch the process
/// executable stands in.
pub fn entry_script_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("DOCGO_EXEC_PATH") {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    env::current_exe().ok()
}

/// Locate `manifest.json` for the current process.
///
/// Starting directories are the entry script's directory (if determinable)
/// and then the working directory; all levels of the first start are
/// exhausted before the next start is tried.
pub fn find_manifest() -> Option<PathBuf> {
    let mut starts = Vec::new();
    if let Some(entry) = entry_script_path() {
        if let Some(dir) = entry.parent() {
            starts.push(dir.to_path_buf());
        }
    }
    if let Ok(cwd) = env::current_dir() {
        starts.push(cwd);
    }
    find_manifest_from(&starts)
}

/// Search each starting directory and at most [`MAX_SEARCH_DEPTH`] parents
/// above it for `manifest.json`; first hit across the full order wins.
pub fn find_manifest_from<P: AsRef<Path>>(starts: &[P]) -> Option<PathBuf> {
    for start in starts {
        let mut dir = start.as_ref().to_path_buf();
        for _ in 0..=MAX_SEARCH_DEPTH {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            match dir.parent() {
                Some(parent) => dir = parent.to_path_buf(),
                None => break,
            }
        }
    }
    None
}

/// Locate `config.yml`: the executable's directory, then the working
/// directory, then the directory of the already-resolved manifest.
/// Short-circuits on the first existing file.
pub fn find_config_file(manifest_path: Option<&Path>) -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(entry) = entry_script_path() {
        if let Some(dir) = entry.parent() {
            candidates.push(dir.to_path_buf());
        }
    }
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd);
    }
    if let Some(manifest) = manifest_path {
        if let Some(dir) = manifest.parent() {
            candidates.push(dir.to_path_buf());
        }
    }
    find_config_file_in(&candidates)
}

/// First candidate directory containing a `config.yml`
pub fn find_config_file_in<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|dir| dir.as_ref().join(CONFIG_FILE))
        .find(|path| path.is_file())
}
