// src/core/quoting.rs

//! Quoting strategies for interpolated values.

use std::borrow::Cow;

/// How interpolated values are escaped before they reach the interpreter.
///
/// Chosen once together with the resolved shell and reused for every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// POSIX single-quote escaping; every value parses back as exactly one word.
    Posix,
    /// No escaping at all. Only used when no POSIX-style shell could be found,
    /// which makes interpolation unsafe.
    Identity,
}

impl Quoting {
    /// Turns `value` into a literal the interpreter reads back unchanged.
    ///
    /// Total over any input. NUL bytes cannot travel through an argv, so the
    /// POSIX strategy drops them before quoting.
    pub fn quote<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            Self::Identity => Cow::Borrowed(value),
            Self::Posix => {
                if value.contains('\0') {
                    let cleaned: String = value.chars().filter(|c| *c != '\0').collect();
                    Cow::Owned(posix_quote(&cleaned).into_owned())
                } else {
                    posix_quote(value)
                }
            }
        }
    }

    /// `true` when values are escaped.
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Posix)
    }
}

/// Quotes `value` with the strategy of the process-wide shell.
pub fn quote(value: &str) -> String {
    crate::system::resolver::global().quoting().quote(value).into_owned()
}

fn posix_quote(value: &str) -> Cow<'_, str> {
    // The input is NUL-free here, the only case `try_quote` rejects.
    shlex::try_quote(value).unwrap_or_else(|_| Cow::Owned(format!("'{}'", value.replace('\'', "'\\''"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parses_back(value: &str) {
        let quoted = Quoting::Posix.quote(value);
        let words = shlex::split(&quoted).unwrap();
        assert_eq!(words, vec![value.to_string()], "quoted form was {}", quoted);
    }

    #[test]
    fn test_posix_round_trips_metacharacters() {
        for value in [
            "a b",
            "it's",
            "say \"hi\"",
            "$HOME",
            "a;b",
            "a && b",
            "`whoami`",
            "tab\there",
            "line\nbreak",
            "*.rs",
            "",
            "plain",
            "'\"'\"",
        ] {
            parses_back(value);
        }
    }

    #[test]
    fn test_posix_quotes_spaces_with_single_quotes() {
        assert_eq!(Quoting::Posix.quote("a b"), "'a b'");
    }

    #[test]
    fn test_posix_leaves_safe_words_alone() {
        assert_eq!(Quoting::Posix.quote("hello"), "hello");
        assert_eq!(Quoting::Posix.quote("42"), "42");
    }

    #[test]
    fn test_posix_drops_nul_bytes() {
        let quoted = Quoting::Posix.quote("a\0b c");
        assert_eq!(shlex::split(&quoted).unwrap(), vec!["ab c".to_string()]);
    }

    #[test]
    fn test_identity_passes_values_through() {
        assert_eq!(Quoting::Identity.quote("a b; rm x"), "a b; rm x");
        assert!(!Quoting::Identity.is_safe());
    }
}
