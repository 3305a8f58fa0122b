//! Language tables and step-text utilities shared by the story-bdd crates.
//!
//! The crate holds the pieces that need no knowledge of the story model: the
//! bilingual keyword table, localised section vocabulary, the ordered
//! step-parameter matchers, and examples-table parsing with column type
//! inference.

mod errors;
mod keyword;
mod language;
mod param_type;
mod step;
mod table;

pub use errors::{TableError, UnsupportedLanguage};
pub use keyword::{KeywordTable, SplitStep, StepKeyword, StepKeywordParseError};
pub use language::{HeaderOpeners, Language, SectionWords, strip_opener};
pub use param_type::ParamType;
pub use step::{
    MATCHER_PRECEDENCE, Match, Matcher, ParamToken, StepPattern, StepToken, tokenize_step,
};
pub use table::{ExamplesTable, infer_column_type, normalise_row};
