// src/core/color.rs

//! Highlighting for the verbose command echo.

use colored::Colorize;

/// Formats a command for the verbose echo: `$ ` followed by the command, with
/// its first whitespace-delimited token highlighted.
pub fn highlight_command(command: &str) -> String {
    let trimmed = command.trim_start();
    let leading = command.strip_suffix(trimmed).unwrap_or_default();
    let split_at = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (head, rest) = trimmed.split_at(split_at);
    format!("{} {}{}{}", "$".dimmed(), leading, head.green().bold(), rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_keeps_command_text() {
        colored::control::set_override(false);
        assert_eq!(highlight_command("git status --short"), "$ git status --short");
        assert_eq!(highlight_command("  ls"), "$   ls");
        assert_eq!(highlight_command(""), "$ ");
    }
}
