//! Minimal `.env` loading for docgo scripts
//!
//! Lines of `KEY=VALUE`; blank lines and `#` comments are ignored; the first
//! `=` splits key from value. Values already present in the process
//! environment are never overwritten.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::locate;

/// Guard variable preventing repeated `.env` application in a process tree
pub const ENV_LOADED_GUARD: &str = "DOCGO_ENV_LOADED";

const ENV_FILE: &str = ".env";

/// Apply the first `.env` file found in the working directory, the entry
/// script's directory, or its parent. Returns the path that was applied.
pub fn load_dotenv() -> Option<PathBuf> {
    if env::var_os(ENV_LOADED_GUARD).is_some() {
        return None;
    }
    let mut candidates = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd);
    }
    if let Some(entry) = locate::entry_script_path() {
        if let Some(dir) = entry.parent() {
            candidates.push(dir.to_path_buf());
            if let Some(parent) = dir.parent() {
                candidates.push(parent.to_path_buf());
            }
        }
    }
    let found = candidates
        .iter()
        .map(|dir| dir.join(ENV_FILE))
        .find(|path| path.is_file());
    if let Some(path) = &found {
        apply_env_file(path);
    }
    env::set_var(ENV_LOADED_GUARD, "1");
    found
}

/// Apply one `.env` file; unreadable files are treated as empty.
/// Returns the number of variables actually set.
pub fn apply_env_file(path: &Path) -> usize {
    match fs::read_to_string(path) {
        Ok(content) => apply_env_source(&content),
        Err(_) => 0,
    }
}

/// Apply `.env` contents to the process environment
pub fn apply_env_source(content: &str) -> usize {
    let mut applied = 0;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_none() {
            env::set_var(key, value.trim());
            applied += 1;
        }
    }
    applied
}
