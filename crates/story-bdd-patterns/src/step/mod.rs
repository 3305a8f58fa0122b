//! Step-parameter lexing and pattern construction.

mod lexer;
mod matcher;
mod pattern;

pub use lexer::{ParamToken, StepToken, tokenize_step};
pub use matcher::{MATCHER_PRECEDENCE, Match, Matcher};
pub use pattern::StepPattern;
