// src/system/resolver.rs

//! Interpreter detection, once per process.

use crate::{
    constants::{SHELL_PREFERENCE, STRICT_MODE_PREFIX},
    core::quoting::Quoting,
};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// The family of interpreter that was found on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    /// A POSIX-style shell (`bash`): strict mode and safe quoting.
    Posix,
    /// PowerShell, used as an alternative when no POSIX shell exists.
    PowerShell,
    /// Nothing was found; the platform's default spawning shell is used.
    HostDefault,
}

/// The interpreter every built command is handed to, together with the
/// quoting strategy and command prefix that match it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShell {
    kind: ShellKind,
    program: PathBuf,
    prefix: Option<&'static str>,
    quoting: Quoting,
}

/// Program and arguments needed to run one command under a resolved shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Interpreter to spawn.
    pub program: PathBuf,
    /// Arguments, ending with the (prefixed) command text.
    pub args: Vec<String>,
}

impl ResolvedShell {
    /// A POSIX shell at `program`.
    pub fn posix(program: impl Into<PathBuf>) -> Self {
        Self {
            kind: ShellKind::Posix,
            program: program.into(),
            prefix: Some(STRICT_MODE_PREFIX),
            quoting: Quoting::Posix,
        }
    }

    /// PowerShell at `program`. Values are interpolated unescaped.
    pub fn powershell(program: impl Into<PathBuf>) -> Self {
        Self {
            kind: ShellKind::PowerShell,
            program: program.into(),
            prefix: None,
            quoting: Quoting::Identity,
        }
    }

    /// The host's default spawning shell (`sh -c` or `cmd /C`). Values are
    /// interpolated unescaped.
    pub fn host_default() -> Self {
        let program = if cfg!(windows) { "cmd" } else { "sh" };
        Self {
            kind: ShellKind::HostDefault,
            program: PathBuf::from(program),
            prefix: None,
            quoting: Quoting::Identity,
        }
    }

    /// Which family the interpreter belongs to.
    pub fn kind(&self) -> ShellKind {
        self.kind
    }

    /// Path or name of the interpreter.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Text injected ahead of every command, if the interpreter supports strict mode.
    pub fn prefix(&self) -> Option<&'static str> {
        self.prefix
    }

    /// Strategy used for every interpolated value.
    pub fn quoting(&self) -> Quoting {
        self.quoting
    }

    /// The warning owed to the user when interpolation is not escaped.
    pub fn warning(&self) -> Option<&'static str> {
        match self.kind {
            ShellKind::Posix => None,
            ShellKind::PowerShell => Some(
                "No bash found, falling back to PowerShell. Interpolated values are NOT quoted; unescaped interpolation is unsafe.",
            ),
            ShellKind::HostDefault => Some(
                "No bash or PowerShell found, using the default system shell. Interpolated values are NOT quoted; unescaped interpolation is unsafe.",
            ),
        }
    }

    /// How `command` is handed to the interpreter.
    pub fn invocation(&self, command: &str) -> Invocation {
        let script = match self.prefix {
            Some(prefix) => format!("{}{}", prefix, command),
            None => command.to_string(),
        };
        let args = match self.kind {
            ShellKind::Posix => vec!["-c".to_string(), script],
            ShellKind::PowerShell => vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                script,
            ],
            ShellKind::HostDefault if cfg!(windows) => vec!["/C".to_string(), script],
            ShellKind::HostDefault => vec!["-c".to_string(), script],
        };
        Invocation {
            program: self.program.clone(),
            args,
        }
    }
}

/// Walks the preference list and returns the first interpreter `lookup` finds.
///
/// `lookup` must not fail loudly; a missing executable is just `None`.
pub fn resolve_with(lookup: impl Fn(&str) -> Option<PathBuf>) -> ResolvedShell {
    for (name, kind) in SHELL_PREFERENCE {
        if let Some(path) = lookup(*name) {
            log::debug!("Resolved shell '{}' ({:?}) at {}", name, kind, path.display());
            return match kind {
                ShellKind::Posix => ResolvedShell::posix(path),
                ShellKind::PowerShell => ResolvedShell::powershell(path),
                ShellKind::HostDefault => ResolvedShell::host_default(),
            };
        }
    }
    log::debug!("No preferred shell found on PATH, using the host default.");
    ResolvedShell::host_default()
}

/// Probes the `PATH` of the running process.
pub fn resolve() -> ResolvedShell {
    resolve_with(|name| which::which(name).ok())
}

static RESOLVED_SHELL: OnceLock<Arc<ResolvedShell>> = OnceLock::new();

/// The process-wide shell, resolved on first use and never re-evaluated.
/// Any warning is printed exactly once, at resolution time.
pub fn global() -> Arc<ResolvedShell> {
    RESOLVED_SHELL
        .get_or_init(|| {
            let shell = resolve();
            if let Some(warning) = shell.warning() {
                log::warn!("{}", warning);
                eprintln!("{}: {}", "Warning".yellow().bold(), warning);
            }
            Arc::new(shell)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_is_preferred() {
        let shell = resolve_with(|name| Some(PathBuf::from(format!("/usr/bin/{}", name))));
        assert_eq!(shell.kind(), ShellKind::Posix);
        assert_eq!(shell.program(), Path::new("/usr/bin/bash"));
        assert_eq!(shell.prefix(), Some(STRICT_MODE_PREFIX));
        assert_eq!(shell.quoting(), Quoting::Posix);
        assert!(shell.warning().is_none());
    }

    #[test]
    fn test_classification_follows_the_preference_table() {
        for (name, kind) in SHELL_PREFERENCE {
            let shell = resolve_with(|probe| (probe == *name).then(|| PathBuf::from(*name)));
            assert_eq!(shell.kind(), *kind, "{} was classified wrongly", name);
            assert_eq!(shell.program(), Path::new(name));
        }
    }

    #[test]
    fn test_powershell_is_the_fallback() {
        let shell = resolve_with(|name| (name == "powershell").then(|| PathBuf::from("C:/ps/powershell.exe")));
        assert_eq!(shell.kind(), ShellKind::PowerShell);
        assert_eq!(shell.quoting(), Quoting::Identity);
        assert!(shell.prefix().is_none());
        assert!(shell.warning().is_some());
    }

    #[test]
    fn test_nothing_found_degrades_to_identity() {
        let shell = resolve_with(|_| None);
        assert_eq!(shell.kind(), ShellKind::HostDefault);
        assert_eq!(shell.quoting(), Quoting::Identity);
        assert!(shell.warning().unwrap().contains("unsafe"));
        assert_eq!(shell.quoting().quote("a b"), "a b");
    }

    #[test]
    fn test_posix_invocation_carries_strict_prefix() {
        let invocation = ResolvedShell::posix("/bin/bash").invocation("echo hi");
        assert_eq!(invocation.program, PathBuf::from("/bin/bash"));
        assert_eq!(invocation.args, vec!["-c".to_string(), "set -euo pipefail;echo hi".to_string()]);
    }

    #[test]
    fn test_powershell_invocation() {
        let invocation = ResolvedShell::powershell("pwsh").invocation("Get-Date");
        assert_eq!(invocation.args.last().map(String::as_str), Some("Get-Date"));
        assert!(invocation.args.contains(&"-Command".to_string()));
    }

    #[test]
    fn test_global_resolution_is_memoized() {
        assert!(Arc::ptr_eq(&global(), &global()));
    }
}
