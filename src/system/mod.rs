//! # System Interaction Layer
//!
//! Everything that touches the host lives here.
//!
//! - **`resolver`**: finds an interpreter on the `PATH` once per process and
//!   pairs it with a quoting strategy and a strict-mode prefix.
//! - **`executor`**: spawns the resolved shell, streams both pipes into an
//!   [`crate::ProcessOutput`] and reports non-zero exits as errors.
//! - **`prompt`**: a blocking terminal question with tab completion.

pub mod executor;
pub mod prompt;
pub mod resolver;

use std::path::PathBuf;

/// Looks `name` up on the `PATH`. Never fails; a missing executable is `None`.
pub fn which(name: &str) -> Option<PathBuf> {
    ::which::which(name).ok()
}
