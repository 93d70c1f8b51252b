// src/core/template.rs

//! Command templates and the command builder.

use crate::{
    constants::{ESCAPED_SLOT_MARKER, SLOT_MARKER},
    core::quoting::Quoting,
    models::Arg,
};
use thiserror::Error;

/// Errors raised while filling a template.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    /// The number of values does not match the number of slots.
    #[error("Template has {slots} interpolation slot(s) but {values} value(s) were supplied.")]
    Arity {
        /// Slots in the template.
        slots: usize,
        /// Values supplied by the caller.
        values: usize,
    },
}

/// Literal segments of a command, with one interpolation slot between each pair.
///
/// Always holds at least one segment, so `segments == slots + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<String>,
}

impl Template {
    /// Splits `source` on every `{}` marker. `{{}}` stands for a literal `{}`
    /// (as in `find . -exec rm {{}} \;`) and does not open a slot.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::with_capacity(source.len());
        let mut rest = source;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix(ESCAPED_SLOT_MARKER) {
                current.push_str(SLOT_MARKER);
                rest = after;
            } else if let Some(after) = rest.strip_prefix(SLOT_MARKER) {
                segments.push(std::mem::take(&mut current));
                rest = after;
            } else {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    current.push(c);
                }
                rest = chars.as_str();
            }
        }
        segments.push(current);
        Self { segments }
    }

    /// Builds a template from pre-split literal segments.
    /// An empty list is treated as a single empty segment.
    pub fn from_segments<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        let mut segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            segments.push(String::new());
        }
        Self { segments }
    }

    /// Number of interpolation slots.
    pub fn slots(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// The literal segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Interleaves the literal segments with the quoted values:
    /// `segments[0] + quote(v0) + segments[1] + ... + segments[n]`.
    ///
    /// Segments are copied verbatim; only values go through `quoting`.
    pub fn build(&self, values: &[Arg], quoting: Quoting) -> Result<String, TemplateError> {
        if values.len() != self.slots() {
            return Err(TemplateError::Arity {
                slots: self.slots(),
                values: values.len(),
            });
        }

        let mut command = String::with_capacity(self.segments.iter().map(String::len).sum::<usize>() + values.len() * 16);
        let mut segments = self.segments.iter();
        if let Some(first) = segments.next() {
            command.push_str(first);
        }
        for (value, segment) in values.iter().zip(segments) {
            command.push_str(&substitute(value, quoting));
            command.push_str(segment);
        }
        Ok(command)
    }
}

/// Renders one interpolation value through the active quoting strategy.
fn substitute(value: &Arg, quoting: Quoting) -> String {
    match value {
        Arg::Raw(raw) => quoting.quote(raw).into_owned(),
        Arg::List(items) => items
            .iter()
            .map(|item| quoting.quote(item))
            .collect::<Vec<_>>()
            .join(" "),
        Arg::Output(output) => quoting.quote(output.trimmed_stdout()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Origin, ProcessOutput};

    #[test]
    fn test_parse_splits_on_slot_markers() {
        let template = Template::parse("cp {} {}");
        assert_eq!(template.segments(), &["cp ", " ", ""]);
        assert_eq!(template.slots(), 2);
        assert_eq!(Template::parse("ls -la").slots(), 0);
    }

    #[test]
    fn test_escaped_marker_stays_literal() {
        let template = Template::parse(r"find {} -exec rm {{}} \;");
        assert_eq!(template.slots(), 1);
        assert_eq!(template.segments(), &["find ", r" -exec rm {} \;"]);
        let command = template.build(&[Arg::from("my dir")], Quoting::Posix).unwrap();
        assert_eq!(command, r"find 'my dir' -exec rm {} \;");

        let template = Template::parse("xargs -I{{}} echo {{}}");
        assert_eq!(template.slots(), 0);
        assert_eq!(template.build(&[], Quoting::Posix).unwrap(), "xargs -I{} echo {}");
    }

    #[test]
    fn test_parse_keeps_multibyte_text_and_lone_braces() {
        let template = Template::parse("echo ñ{ {}}");
        assert_eq!(template.segments(), &["echo ñ{ ", "}"]);
    }

    #[test]
    fn test_build_interleaves_segments_and_quoted_values() {
        let template = Template::from_segments(["echo ", " and ", "!"]);
        let command = template
            .build(&[Arg::from("a b"), Arg::from("c")], Quoting::Posix)
            .unwrap();
        assert_eq!(command, "echo 'a b' and c!");
    }

    #[test]
    fn test_segments_are_never_quoted() {
        let template = Template::parse("echo $HOME | grep {}");
        let command = template.build(&[Arg::from("x y")], Quoting::Posix).unwrap();
        assert_eq!(command, "echo $HOME | grep 'x y'");
    }

    #[test]
    fn test_prior_output_loses_one_trailing_newline() {
        let previous = ProcessOutput::new(0, "42\n\n", "", "42\n\n", Origin::here());
        let command = Template::parse("echo {}")
            .build(&[Arg::from(&previous)], Quoting::Identity)
            .unwrap();
        assert_eq!(command, "echo 42\n");

        let previous = ProcessOutput::new(0, "42\n", "", "42\n", Origin::here());
        let command = Template::parse("echo {}")
            .build(&[Arg::from(previous)], Quoting::Posix)
            .unwrap();
        assert_eq!(command, "echo 42");
    }

    #[test]
    fn test_list_values_are_quoted_individually() {
        let command = Template::parse("touch {}")
            .build(&[Arg::from(vec!["a", "b c"])], Quoting::Posix)
            .unwrap();
        assert_eq!(command, "touch a 'b c'");

        let command = Template::parse("touch {}")
            .build(&[Arg::List(Vec::new())], Quoting::Posix)
            .unwrap();
        assert_eq!(command, "touch ");
    }

    #[test]
    fn test_identity_quoting_leaves_spaces_unquoted() {
        let command = Template::parse("echo {}")
            .build(&[Arg::from("a b")], Quoting::Identity)
            .unwrap();
        assert_eq!(command, "echo a b");
    }

    #[test]
    fn test_arity_mismatch_is_rejected() {
        let result = Template::parse("echo {} {}").build(&[Arg::from("x")], Quoting::Posix);
        assert_eq!(result, Err(TemplateError::Arity { slots: 2, values: 1 }));
    }

    #[test]
    fn test_empty_segment_list_builds_empty_command() {
        let template = Template::from_segments(Vec::<String>::new());
        assert_eq!(template.slots(), 0);
        assert_eq!(template.build(&[], Quoting::Posix).unwrap(), "");
    }
}
