//! Bilingual step keyword table.
//!
//! [`KeywordTable`] is the single immutable source of the words that may open
//! a step line. It is built once and handed by reference to the parser,
//! the renderer, and the step synthesizer; nothing mutates it after
//! construction, so a shared instance is safe across concurrent runs.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::language::Language;

/// Semantic slot of a step keyword, independent of language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
}

impl StepKeyword {
    /// Every keyword slot in table order.
    pub const ALL: [Self; 5] = [Self::Given, Self::When, Self::Then, Self::And, Self::But];

    /// Canonical spelling of this keyword in `lang`.
    ///
    /// ```
    /// use story_bdd_patterns::{Language, StepKeyword};
    /// assert_eq!(StepKeyword::Then.word(Language::Portuguese), "Então");
    /// assert_eq!(StepKeyword::And.word(Language::English), "And");
    /// ```
    #[must_use]
    pub const fn word(self, lang: Language) -> &'static str {
        let words = match lang {
            Language::Portuguese => &PORTUGUESE_KEYWORDS,
            Language::English => &ENGLISH_KEYWORDS,
        };
        match self {
            Self::Given => words[0],
            Self::When => words[1],
            Self::Then => words[2],
            Self::And => words[3],
            Self::But => words[4],
        }
    }
}

const PORTUGUESE_KEYWORDS: [&str; 5] = ["Dado", "Quando", "Então", "E", "Mas"];
const ENGLISH_KEYWORDS: [&str; 5] = ["Given", "When", "Then", "And", "But"];

/// Error returned when parsing a [`StepKeyword`] from a string fails.
///
/// Contains the unrecognised keyword text for diagnostic purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepKeywordParseError(pub String);

impl fmt::Display for StepKeywordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid step keyword: {}", self.0)
    }
}

impl std::error::Error for StepKeywordParseError {}

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        KeywordTable::shared()
            .recognise(trimmed)
            .map(|(_, keyword)| keyword)
            .ok_or_else(|| StepKeywordParseError(trimmed.to_string()))
    }
}

/// A step line split into its leading keyword and the remaining text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitStep<'a> {
    /// Semantic slot of the leading keyword.
    pub keyword: StepKeyword,
    /// Language the keyword was written in.
    pub language: Language,
    /// Keyword exactly as written in the line.
    pub word: &'a str,
    /// Everything after the keyword, leading whitespace removed.
    pub text: &'a str,
}

/// Immutable bilingual mapping of step-opening keywords.
///
/// Recognition is case-insensitive; emission always uses the canonical
/// spelling from the table.
///
/// # Examples
/// ```
/// use story_bdd_patterns::{KeywordTable, Language};
/// let table = KeywordTable::shared();
/// assert_eq!(table.translate("dado", Language::English), "Given");
/// assert_eq!(table.counterpart("When"), "Quando");
/// assert_eq!(table.counterpart("Suppose"), "Suppose");
/// ```
#[derive(Debug, Clone)]
pub struct KeywordTable {
    lookup: HashMap<String, (Language, StepKeyword)>,
}

static SHARED: LazyLock<KeywordTable> = LazyLock::new(KeywordTable::new);

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordTable {
    /// Build the table from the fixed Portuguese and English keyword sets.
    #[must_use]
    pub fn new() -> Self {
        let mut lookup = HashMap::with_capacity(StepKeyword::ALL.len() * Language::ALL.len());
        for lang in Language::ALL {
            for keyword in StepKeyword::ALL {
                lookup.insert(keyword.word(lang).to_lowercase(), (lang, keyword));
            }
        }
        Self { lookup }
    }

    /// Process-wide instance, constructed on first use.
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Ordered opening keywords for `lang`.
    #[must_use]
    pub const fn keywords(&self, lang: Language) -> &'static [&'static str] {
        match lang {
            Language::Portuguese => &PORTUGUESE_KEYWORDS,
            Language::English => &ENGLISH_KEYWORDS,
        }
    }

    /// Identify `word` as a keyword of either language.
    #[must_use]
    pub fn recognise(&self, word: &str) -> Option<(Language, StepKeyword)> {
        self.lookup.get(&word.to_lowercase()).copied()
    }

    /// Spell `word` in `target`, or return it unchanged when it is not a
    /// keyword.
    #[must_use]
    pub fn translate<'a>(&self, word: &'a str, target: Language) -> &'a str {
        self.recognise(word)
            .map_or(word, |(_, keyword)| keyword.word(target))
    }

    /// Spell `word` in the other language of the pair, or return it
    /// unchanged when it is not a keyword.
    #[must_use]
    pub fn counterpart<'a>(&self, word: &'a str) -> &'a str {
        self.recognise(word)
            .map_or(word, |(lang, keyword)| keyword.word(lang.other()))
    }

    /// Split a step line into its recognised leading keyword and the rest.
    ///
    /// Returns `None` when the first word is not a keyword in either
    /// language.
    ///
    /// ```
    /// use story_bdd_patterns::{KeywordTable, StepKeyword};
    /// let split = KeywordTable::shared()
    ///     .split_step("  ENTÃO vejo o total")
    ///     .expect("line opens with a keyword");
    /// assert_eq!(split.keyword, StepKeyword::Then);
    /// assert_eq!(split.word, "ENTÃO");
    /// assert_eq!(split.text, "vejo o total");
    /// ```
    #[must_use]
    pub fn split_step<'a>(&self, line: &'a str) -> Option<SplitStep<'a>> {
        let trimmed = line.trim();
        let (word, text) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(word, rest)| (word, rest.trim_start()));
        let (language, keyword) = self.recognise(word)?;
        Some(SplitStep {
            keyword,
            language,
            word,
            text,
        })
    }
}
