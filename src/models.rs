// src/models.rs

//! Data types shared across the crate.

use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};

// --- Call Site ---

/// Where in the calling code a command was issued.
///
/// Captured through `#[track_caller]` at the moment a command is requested, so it
/// always points at user code rather than at this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Origin(&'static Location<'static>);

impl Origin {
    /// Captures the location of the caller.
    #[track_caller]
    pub fn here() -> Self {
        Self(Location::caller())
    }

    /// The source file of the call site.
    pub fn file(&self) -> &'static str {
        self.0.file()
    }

    /// The line of the call site.
    pub fn line(&self) -> u32 {
        self.0.line()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.0.file(), self.0.line(), self.0.column())
    }
}

// --- Execution Result ---

/// Immutable record of one completed command.
///
/// Fields are private and only exposed through accessors. Converting it to a
/// string yields the combined stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
    combined: String,
    origin: Origin,
}

impl ProcessOutput {
    /// Assembles a result from captured streams.
    pub fn new(
        exit_code: i32,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        combined: impl Into<String>,
        origin: Origin,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            combined: combined.into(),
            origin,
        }
    }

    /// Exit code of the child. Signal terminations on Unix are reported as `128 + signal`.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Everything the child wrote to stdout.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Everything the child wrote to stderr.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Stdout and stderr merged in arrival order.
    pub fn combined(&self) -> &str {
        &self.combined
    }

    /// The call site that issued the command.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// `true` when the exit code is exactly zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout with exactly one trailing newline removed, if present.
    /// This is the value substituted when the result is interpolated.
    pub fn trimmed_stdout(&self) -> &str {
        self.stdout.strip_suffix('\n').unwrap_or(&self.stdout)
    }

    /// Iterates over the lines of stdout.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines()
    }
}

impl fmt::Display for ProcessOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.combined)
    }
}

// --- Interpolation Values ---

/// A value substituted into one slot of a command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A scalar, quoted as a single shell word.
    Raw(String),
    /// Several scalars, each quoted and joined with single spaces.
    List(Vec<String>),
    /// A prior result; only its stdout (minus one trailing newline) is used.
    Output(ProcessOutput),
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Raw(value.clone())
    }
}

impl From<&Path> for Arg {
    fn from(value: &Path) -> Self {
        Self::Raw(value.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for Arg {
    fn from(value: PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

impl From<&PathBuf> for Arg {
    fn from(value: &PathBuf) -> Self {
        Self::from(value.as_path())
    }
}

impl From<ProcessOutput> for Arg {
    fn from(value: ProcessOutput) -> Self {
        Self::Output(value)
    }
}

impl From<&ProcessOutput> for Arg {
    fn from(value: &ProcessOutput) -> Self {
        Self::Output(value.clone())
    }
}

impl From<Vec<String>> for Arg {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for Arg {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Arg {
    fn from(value: &[&str]) -> Self {
        Self::List(value.iter().map(|s| (*s).to_string()).collect())
    }
}

macro_rules! impl_arg_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Raw(value.to_string())
                }
            }
        )*
    };
}

impl_arg_from_scalar!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char);
