//! # shellout
//!
//! Compose shell commands from literal text and interpolated values, run them
//! under a shell picked once per process, and get back a structured
//! [`ProcessOutput`].
//!
//! Every interpolated value is quoted so it reaches the command as exactly one
//! word. A previous [`ProcessOutput`] can be interpolated directly; its stdout
//! is used with one trailing newline removed.
//!
//! ```no_run
//! # async fn demo() -> Result<(), shellout::ExecutionError> {
//! use shellout::{cd, set_verbose, sh};
//!
//! set_verbose(true);
//! cd("/tmp");
//! let branch = sh!("git rev-parse --abbrev-ref HEAD").await?;
//! sh!("git push origin {}", &branch).await?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod state;
pub mod system;

pub use crate::core::{
    context::Shell,
    quoting::{Quoting, quote},
    template::{Template, TemplateError},
};
pub use crate::models::{Arg, Origin, ProcessOutput};
pub use crate::state::{cd, set_verbose};
pub use crate::system::{
    executor::{ExecutionError, exit_code_info},
    prompt::question,
    resolver::{ResolvedShell, ShellKind},
    which,
};
pub use colored::{self, Colorize};
