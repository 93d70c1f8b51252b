// src/constants.rs

//! Fixed names and sizes.

use crate::system::resolver::ShellKind;

/// Interpreters probed on first use, in order of preference, with the family
/// each one belongs to.
pub const SHELL_PREFERENCE: &[(&str, ShellKind)] = &[
    ("bash", ShellKind::Posix),
    ("pwsh", ShellKind::PowerShell),
    ("powershell", ShellKind::PowerShell),
];

/// Injected ahead of every command when the POSIX shell is in use.
pub const STRICT_MODE_PREFIX: &str = "set -euo pipefail;";

/// Environment variable that switches verbose mode on at startup.
pub const VERBOSE_ENV: &str = "SHELLOUT_VERBOSE";

/// Placeholder that marks an interpolation slot in a parsed template.
pub const SLOT_MARKER: &str = "{}";

/// Escape for a literal `{}` in a parsed template.
pub const ESCAPED_SLOT_MARKER: &str = "{{}}";

/// Size of the read buffer used for each child pipe.
pub const CHUNK_SIZE: usize = 8192;

/// `CREATE_NO_WINDOW` process creation flag.
#[cfg(windows)]
pub const CREATE_NO_WINDOW: u32 = 0x0800_0000;
