//! Candidate matchers tried at each cursor position of a step's text.

use crate::param_type::ParamType;

/// One alternative of the step-parameter lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Matcher {
    /// `"<name>"`: a placeholder wrapped in quotes.
    QuotedPlaceholder,
    /// `<name>`: a bare placeholder.
    BarePlaceholder,
    /// `"text"`: a quoted literal without angle brackets inside.
    QuotedLiteral,
    /// `12` or `12.5`: an ASCII integer or decimal numeral.
    Number,
}

/// Order in which matchers are tried; the first match at a position wins.
///
/// Placeholders come before quoted literals and numerals so that `"<qty>"`
/// yields the placeholder name `qty` rather than a quoted literal.
pub const MATCHER_PRECEDENCE: [Matcher; 4] = [
    Matcher::QuotedPlaceholder,
    Matcher::BarePlaceholder,
    Matcher::QuotedLiteral,
    Matcher::Number,
];

/// A successful match at the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// Captured value without surrounding quotes or brackets.
    pub raw: &'a str,
    /// Number of bytes consumed from the input.
    pub len: usize,
}

impl Matcher {
    /// Type assumed for the token before any column inference.
    #[must_use]
    pub const fn candidate_type(self) -> ParamType {
        match self {
            Self::QuotedPlaceholder | Self::QuotedLiteral => ParamType::String,
            Self::BarePlaceholder | Self::Number => ParamType::Int,
        }
    }

    /// Whether the captured value names an examples-table column.
    #[must_use]
    pub const fn is_placeholder(self) -> bool {
        matches!(self, Self::QuotedPlaceholder | Self::BarePlaceholder)
    }

    /// Try to match this alternative at the very start of `input`.
    #[must_use]
    pub fn try_match(self, input: &str) -> Option<Match<'_>> {
        match self {
            Self::QuotedPlaceholder => quoted_placeholder(input),
            Self::BarePlaceholder => bare_placeholder(input),
            Self::QuotedLiteral => quoted_literal(input),
            Self::Number => number(input),
        }
    }
}

fn bare_placeholder(input: &str) -> Option<Match<'_>> {
    let rest = input.strip_prefix('<')?;
    let end = rest.find('>')?;
    let raw = rest.get(..end).filter(|name| !name.is_empty())?;
    Some(Match { raw, len: end + 2 })
}

fn quoted_placeholder(input: &str) -> Option<Match<'_>> {
    let rest = input.strip_prefix('"')?;
    let inner = bare_placeholder(rest)?;
    rest.get(inner.len..)?.starts_with('"').then_some(Match {
        raw: inner.raw,
        len: inner.len + 2,
    })
}

fn quoted_literal(input: &str) -> Option<Match<'_>> {
    let rest = input.strip_prefix('"')?;
    let end = rest.find(['"', '<', '>'])?;
    if end == 0 || !rest.get(end..)?.starts_with('"') {
        return None;
    }
    let raw = rest.get(..end)?;
    Some(Match { raw, len: end + 2 })
}

fn leading_digits(input: &str) -> usize {
    input.bytes().take_while(u8::is_ascii_digit).count()
}

fn number(input: &str) -> Option<Match<'_>> {
    let whole = leading_digits(input);
    if whole == 0 {
        return None;
    }
    let mut len = whole;
    if let Some(fraction) = input.get(whole..).and_then(|r| r.strip_prefix('.')) {
        let digits = leading_digits(fraction);
        if digits > 0 {
            len += 1 + digits;
        }
    }
    let raw = input.get(..len)?;
    Some(Match { raw, len })
}
