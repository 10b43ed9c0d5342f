//! Template scanner — splits a string into literal text and expression spans.
//!
//! A span is delimited by the fixed sigil pair `${{` and `}}`. Spans do not
//! nest; the code of a span runs to the first closing sigil. Everything
//! outside spans is literal text preserved byte for byte.
//!
//! Unbalanced sigils are structural configuration errors, not code errors:
//! they mean the document itself is malformed, regardless of what the span
//! code says.

use restprobe_types::ConfigError;

/// Opening sigil of an expression span.
pub const SPAN_OPEN: &str = "${{";
/// Closing sigil of an expression span.
pub const SPAN_CLOSE: &str = "}}";

/// One part of a scanned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    /// Literal text outside any span, copied verbatim.
    Literal(String),
    /// The code between one sigil pair, sigils stripped.
    Expr(String),
}

/// A string scanned into literal and expression parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    parts: Vec<TemplatePart>,
}

impl Template {
    /// Scan `text` left to right for sigil-delimited spans.
    ///
    /// Fails with [`ConfigError::UnterminatedSpan`] when an opening sigil has
    /// no closing one, and [`ConfigError::UnmatchedSpanClose`] when a closing
    /// sigil appears in literal text.
    pub fn parse(text: &str) -> Result<Template, ConfigError> {
        // Byte-level scan: both sigils are pure ASCII, so every match
        // position is a valid char boundary for slicing `text`.
        let bytes = text.as_bytes();
        let mut parts = Vec::new();
        let mut literal_start = 0;
        let mut pos = 0;

        while pos < bytes.len() {
            if bytes[pos..].starts_with(SPAN_OPEN.as_bytes()) {
                if pos > literal_start {
                    parts.push(TemplatePart::Literal(text[literal_start..pos].to_string()));
                }
                let code_start = pos + SPAN_OPEN.len();
                let Some(close) = find_subslice(&bytes[code_start..], SPAN_CLOSE.as_bytes())
                else {
                    return Err(ConfigError::UnterminatedSpan { position: pos });
                };
                let code_end = code_start + close;
                parts.push(TemplatePart::Expr(text[code_start..code_end].to_string()));
                pos = code_end + SPAN_CLOSE.len();
                literal_start = pos;
            } else if bytes[pos..].starts_with(SPAN_CLOSE.as_bytes()) {
                return Err(ConfigError::UnmatchedSpanClose { position: pos });
            } else {
                pos += 1;
            }
        }

        if literal_start < text.len() {
            parts.push(TemplatePart::Literal(text[literal_start..].to_string()));
        }

        Ok(Template { parts })
    }

    /// The scanned parts, in source order.
    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// True when the string contained at least one expression span.
    pub fn has_spans(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, TemplatePart::Expr(_)))
    }

    /// The span code when the whole string is exactly one span with no
    /// surrounding literal text — the form that evaluates to a typed value.
    pub fn as_whole_span(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [TemplatePart::Expr(code)] => Some(code),
            _ => None,
        }
    }
}

/// First occurrence of `needle` in `haystack`, as a byte offset.
fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_one_literal_part() {
        let t = Template::parse("just text").unwrap();
        assert_eq!(t.parts(), [TemplatePart::Literal("just text".into())]);
        assert!(!t.has_spans());
    }

    #[test]
    fn empty_string_has_no_parts() {
        let t = Template::parse("").unwrap();
        assert!(t.parts().is_empty());
        assert!(t.as_whole_span().is_none());
    }

    #[test]
    fn whole_span_form_is_detected() {
        let t = Template::parse("${{ response.status == 200 }}").unwrap();
        assert_eq!(t.as_whole_span(), Some(" response.status == 200 "));
    }

    #[test]
    fn leading_literal_defeats_whole_span_form() {
        let t = Template::parse("x${{ 1 }}").unwrap();
        assert!(t.as_whole_span().is_none());
        assert!(t.has_spans());
    }

    #[test]
    fn multiple_spans_interleave_with_literals() {
        let t = Template::parse("${{ a }}-${{ b }}").unwrap();
        assert_eq!(
            t.parts(),
            [
                TemplatePart::Expr(" a ".into()),
                TemplatePart::Literal("-".into()),
                TemplatePart::Expr(" b ".into()),
            ]
        );
    }

    #[test]
    fn unterminated_span_is_a_config_error() {
        let err = Template::parse("Bearer ${{ token").unwrap_err();
        assert_eq!(err, ConfigError::UnterminatedSpan { position: 7 });
    }

    #[test]
    fn stray_closing_sigil_is_a_config_error() {
        let err = Template::parse("oops }} here").unwrap_err();
        assert_eq!(err, ConfigError::UnmatchedSpanClose { position: 5 });
    }

    #[test]
    fn dollar_without_sigil_is_literal() {
        let t = Template::parse("cost: $100 and ${one brace}").unwrap();
        assert!(!t.has_spans());
    }
}
