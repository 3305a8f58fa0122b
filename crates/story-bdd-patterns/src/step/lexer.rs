//! Single-pass tokenizer splitting step text into literals and parameters.

use super::matcher::{MATCHER_PRECEDENCE, Matcher};
use crate::param_type::ParamType;

/// One parameter occurrence discovered in a step's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamToken<'a> {
    /// Matched value without surrounding quotes or angle brackets.
    pub raw: &'a str,
    /// Alternative that produced the token.
    pub matcher: Matcher,
    /// Type assigned to the token.
    pub inferred_type: ParamType,
}

/// Lexical unit of a step's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepToken<'a> {
    /// A run of characters no matcher claimed.
    Literal(&'a str),
    /// A parameter occurrence.
    Param(ParamToken<'a>),
}

/// Tokenize `text` left to right.
///
/// At each position the matchers in [`MATCHER_PRECEDENCE`] are tried in order
/// and the first match is committed; otherwise one character becomes literal
/// text. Adjacent literal characters are merged into a single token.
///
/// ```
/// use story_bdd_patterns::{ParamType, StepToken, tokenize_step};
/// let tokens = tokenize_step("I add <qty> items");
/// assert_eq!(tokens.len(), 3);
/// assert!(matches!(
///     tokens.get(1),
///     Some(StepToken::Param(p)) if p.raw == "qty" && p.inferred_type == ParamType::Int
/// ));
/// ```
#[must_use]
pub fn tokenize_step(text: &str) -> Vec<StepToken<'_>> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while let Some(rest) = text.get(pos..).filter(|rest| !rest.is_empty()) {
        let hit = MATCHER_PRECEDENCE
            .iter()
            .find_map(|&matcher| matcher.try_match(rest).map(|m| (matcher, m)));
        let Some((matcher, found)) = hit else {
            pos += rest.chars().next().map_or(1, char::len_utf8);
            continue;
        };
        flush_literal(&mut tokens, text, literal_start, pos);
        tokens.push(StepToken::Param(ParamToken {
            raw: found.raw,
            matcher,
            inferred_type: matcher.candidate_type(),
        }));
        pos += found.len;
        literal_start = pos;
    }
    flush_literal(&mut tokens, text, literal_start, pos);
    tokens
}

fn flush_literal<'a>(tokens: &mut Vec<StepToken<'a>>, text: &'a str, start: usize, end: usize) {
    if let Some(literal) = text.get(start..end).filter(|lit| !lit.is_empty()) {
        tokens.push(StepToken::Literal(literal));
    }
}
