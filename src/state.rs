// src/state.rs

//! Process-wide defaults.

use crate::{constants::VERBOSE_ENV, models::Origin};
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Process-wide defaults picked up by [`crate::Shell::current`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Echo commands and mirror their output live.
    pub verbose: bool,
    /// Working directory for children. `None` inherits the parent's.
    pub cwd: Option<PathBuf>,
}

impl Settings {
    fn from_env() -> Self {
        let verbose = env::var(VERBOSE_ENV)
            .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self { verbose, cwd: None }
    }
}

static SETTINGS: OnceLock<Mutex<Settings>> = OnceLock::new();

fn lock_settings() -> MutexGuard<'static, Settings> {
    SETTINGS
        .get_or_init(|| Mutex::new(Settings::from_env()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// A copy of the current defaults.
pub fn snapshot() -> Settings {
    lock_settings().clone()
}

/// Turns command echo and live output mirroring on or off.
pub fn set_verbose(verbose: bool) {
    lock_settings().verbose = verbose;
}

/// Current verbosity default.
pub fn is_verbose() -> bool {
    lock_settings().verbose
}

/// Working directory set by [`cd`], if any.
pub fn current_dir() -> Option<PathBuf> {
    lock_settings().cwd.clone()
}

/// Changes the working directory used by every command built afterwards.
///
/// `~` is expanded. A path that does not exist is fatal: the path and the
/// call site are printed to stderr and the process exits with status 1.
/// Commands already in flight keep the directory they were started with.
#[track_caller]
pub fn cd(path: impl AsRef<Path>) {
    let origin = Origin::here();
    match checked_dir(path.as_ref()) {
        Some(dir) => {
            log::debug!("Working directory set to {}", dir.display());
            lock_settings().cwd = Some(dir);
        }
        None => {
            eprintln!(
                "{}: cd {}: no such directory\n    at {}",
                "Error".red().bold(),
                path.as_ref().display(),
                origin
            );
            std::process::exit(1);
        }
    }
}

/// Expands `~` and returns the directory if it exists.
pub(crate) fn checked_dir(path: &Path) -> Option<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
    let resolved = match current_dir() {
        Some(base) if expanded.is_relative() => base.join(expanded),
        _ => expanded,
    };
    resolved
        .is_dir()
        .then(|| dunce::canonicalize(&resolved).unwrap_or(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_dir_accepts_existing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let checked = checked_dir(dir.path()).unwrap();
        assert_eq!(checked, dunce::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn test_checked_dir_rejects_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert!(checked_dir(&dir.path().join("missing")).is_none());
    }

    #[test]
    fn test_cd_and_verbose_update_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        cd(dir.path());
        set_verbose(true);
        let settings = snapshot();
        assert!(settings.verbose);
        assert_eq!(settings.cwd, Some(dunce::canonicalize(dir.path()).unwrap()));
        assert_eq!(current_dir(), settings.cwd);
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_checked_dir_rejects_files() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(checked_dir(file.path()).is_none());
    }
}
