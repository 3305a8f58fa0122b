//! Supported natural languages and their fixed specification vocabulary.

use std::fmt;
use std::str::FromStr;

use crate::errors::UnsupportedLanguage;

/// Natural language of a story and of the document rendered from it.
///
/// Portuguese is the primary language and therefore the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// Portuguese (`pt`).
    #[default]
    Portuguese,
    /// English (`en`).
    English,
}

impl Language {
    /// Every supported language, primary first.
    pub const ALL: [Self; 2] = [Self::Portuguese, Self::English];

    /// Lower-case code written in `# language:` directives.
    ///
    /// ```
    /// use story_bdd_patterns::Language;
    /// assert_eq!(Language::English.code(), "en");
    /// ```
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Portuguese => "pt",
            Self::English => "en",
        }
    }

    /// The other member of the supported pair.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Portuguese => Self::English,
            Self::English => Self::Portuguese,
        }
    }

    /// Section and message vocabulary used when rendering in this language.
    #[must_use]
    pub const fn words(self) -> &'static SectionWords {
        match self {
            Self::Portuguese => &PORTUGUESE_WORDS,
            Self::English => &ENGLISH_WORDS,
        }
    }

    /// Openers recognised for the three story header lines.
    #[must_use]
    pub const fn header_openers(self) -> &'static HeaderOpeners {
        match self {
            Self::Portuguese => &PORTUGUESE_OPENERS,
            Self::English => &ENGLISH_OPENERS,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("pt") {
            Ok(Self::Portuguese)
        } else if trimmed.eq_ignore_ascii_case("en") {
            Ok(Self::English)
        } else {
            Err(UnsupportedLanguage(trimmed.to_ascii_lowercase()))
        }
    }
}

/// Fixed words a rendered specification document needs in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionWords {
    /// Title keyword of the document (`Feature`).
    pub feature: &'static str,
    /// Plain scenario section keyword.
    pub scenario: &'static str,
    /// Data-driven scenario section keyword.
    pub outline: &'static str,
    /// Examples table header keyword.
    pub examples: &'static str,
    /// Counter word used to title outline sections (`Example 1`).
    pub example: &'static str,
    /// Fallback used when the first step of a scenario has no text.
    pub condition: &'static str,
    /// Fallback used when the last step of a scenario has no text.
    pub result: &'static str,
    /// Prefix of the pending body in generated step stubs.
    pub pending: &'static str,
    /// Heading phrase of a generated step-definition file.
    pub steps_header: &'static str,
}

static PORTUGUESE_WORDS: SectionWords = SectionWords {
    feature: "Funcionalidade",
    scenario: "Cenário",
    outline: "Esquema do Cenário",
    examples: "Exemplos",
    example: "Exemplo",
    condition: "Condição",
    result: "Resultado",
    pending: "Implementar passo",
    steps_header: "Definições de passos para",
};

static ENGLISH_WORDS: SectionWords = SectionWords {
    feature: "Feature",
    scenario: "Scenario",
    outline: "Scenario Outline",
    examples: "Examples",
    example: "Example",
    condition: "condition",
    result: "result",
    pending: "Implement step",
    steps_header: "Step definitions for",
};

/// Line openers for the role, want, and goal header lines.
///
/// Each list holds the verbose phrasing before the terse one so that prefix
/// stripping removes as much filler as possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderOpeners {
    /// Openers of the "as a <role>" line.
    pub role: &'static [&'static str],
    /// Openers of the "I want <capability>" line.
    pub want: &'static [&'static str],
    /// Openers of the "so that <benefit>" line.
    pub goal: &'static [&'static str],
}

static PORTUGUESE_OPENERS: HeaderOpeners = HeaderOpeners {
    role: &["eu como", "como"],
    want: &["eu quero que", "eu quero", "quero que", "quero"],
    goal: &["para que", "para eu", "para"],
};

static ENGLISH_OPENERS: HeaderOpeners = HeaderOpeners {
    role: &["as an", "as a"],
    want: &["i want to", "i want"],
    goal: &["so that", "in order to"],
};

/// Strip the first matching opener from `line`, returning the remainder.
///
/// Matching is case-insensitive and only succeeds on a word boundary, so
/// `Parar` is not mistaken for `Para`.
///
/// ```
/// use story_bdd_patterns::{Language, strip_opener};
/// let openers = Language::English.header_openers();
/// assert_eq!(strip_opener("I want to log in", openers.want), Some("log in"));
/// assert_eq!(strip_opener("Iwant", openers.want), None);
/// ```
#[must_use]
pub fn strip_opener<'a>(line: &'a str, openers: &[&str]) -> Option<&'a str> {
    let trimmed = line.trim_start();
    openers.iter().find_map(|opener| {
        let head = trimmed.get(..opener.len())?;
        if !head.to_lowercase().eq(opener) {
            return None;
        }
        let rest = trimmed.get(opener.len()..)?;
        match rest.chars().next() {
            None => Some(rest),
            Some(c) if is_opener_separator(c) => Some(rest.trim_start_matches(is_opener_separator)),
            Some(_) => None,
        }
    })
}

fn is_opener_separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == ':'
}
