//! Locating the `.solr-fstats.toml` files that supply connection and output defaults.
//!
//! Each directory from the working directory up to the filesystem root may hold one file. A file
//! marked `root = true` fences off everything above it, including the file in the home
//! directory.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// Name of a per-directory or home-directory settings file.
pub const CONFIG_FILENAME: &str = ".solr-fstats.toml";

/// Lists the settings files that apply when running from `cwd`, nearest first.
///
/// The home-directory file comes last unless a `root = true` file was reached first. An empty
/// list means every setting falls back to its default.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let fenced = is_root_config(&candidate);
        configs.push(candidate);
        if fenced {
            return configs;
        }
    }

    if let Some(home_file) = global_config_path()
        && home_file.is_file()
        && !configs.contains(&home_file)
    {
        configs.push(home_file);
    }

    configs
}

/// `~/.solr-fstats.toml`, or `None` when there is no home directory.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Whether `path` is the home-directory settings file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|home_file| path == home_file)
}
