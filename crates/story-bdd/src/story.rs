//! In-memory model of a parsed user story.

use std::fmt;
use std::str::FromStr;

use story_bdd_patterns::{ExamplesTable, Language, TableError};

/// Category of a block of behaviour, written `[KIND]` in a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Shared preconditions.
    Context,
    /// Happy-path behaviour.
    Success,
    /// Expected failure of a business operation.
    Failure,
    /// System or infrastructure error.
    Error,
    /// Exceptional flow.
    Exception,
    /// Input validation.
    Validation,
    /// Authorisation and access control.
    Permission,
    /// Boundary values.
    EdgeCase,
    /// Speed and load expectations.
    Performance,
    /// Business rule.
    Rule,
}

impl GroupKind {
    /// Every block kind in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Context,
        Self::Success,
        Self::Failure,
        Self::Error,
        Self::Exception,
        Self::Validation,
        Self::Permission,
        Self::EdgeCase,
        Self::Performance,
        Self::Rule,
    ];

    /// Upper-case tag as written between brackets.
    ///
    /// ```
    /// use story_bdd::GroupKind;
    /// assert_eq!(GroupKind::EdgeCase.tag(), "EDGE_CASE");
    /// ```
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Context => "CONTEXT",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Error => "ERROR",
            Self::Exception => "EXCEPTION",
            Self::Validation => "VALIDATION",
            Self::Permission => "PERMISSION",
            Self::EdgeCase => "EDGE_CASE",
            Self::Performance => "PERFORMANCE",
            Self::Rule => "RULE",
        }
    }

    /// Localised test-category label used in plain scenario titles.
    #[must_use]
    pub const fn label(self, lang: Language) -> &'static str {
        match lang {
            Language::Portuguese => match self {
                Self::Context => "Contexto",
                Self::Success => "Teste Positivo",
                Self::Failure => "Teste Negativo",
                Self::Error => "Teste de Erro",
                Self::Exception => "Teste de Exceção",
                Self::Validation => "Teste de Validação",
                Self::Permission => "Teste de Permissão",
                Self::EdgeCase => "Teste de Limite",
                Self::Performance => "Teste de Desempenho",
                Self::Rule => "Regra de Negócio",
            },
            Language::English => match self {
                Self::Context => "Context",
                Self::Success => "Positive test",
                Self::Failure => "Negative test",
                Self::Error => "Error test",
                Self::Exception => "Exception test",
                Self::Validation => "Validation test",
                Self::Permission => "Permission test",
                Self::EdgeCase => "Boundary test",
                Self::Performance => "Performance test",
                Self::Rule => "Business rule",
            },
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a bracketed tag is not a known block kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown block kind: {0}")]
pub struct UnknownGroupKind(pub String);

impl FromStr for GroupKind {
    type Err = UnknownGroupKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let upper = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == upper)
            .ok_or_else(|| UnknownGroupKind(upper))
    }
}

/// One typed block of behaviour within a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Block category.
    pub kind: GroupKind,
    /// Optional annotation written after `@` on the opener line.
    pub tag: Option<String>,
    /// Trimmed step lines in order.
    pub steps: Vec<String>,
    /// Trimmed example lines in order.
    pub examples: Vec<String>,
    /// Whether an examples opener targeted this group.
    pub declares_examples: bool,
}

impl Group {
    /// Create an empty group of `kind`.
    #[must_use]
    pub fn new(kind: GroupKind, tag: Option<String>) -> Self {
        Self {
            kind,
            tag,
            steps: Vec::new(),
            examples: Vec::new(),
            declares_examples: false,
        }
    }

    /// Whether the group renders as a scenario outline.
    #[must_use]
    pub fn is_outline(&self) -> bool {
        !self.examples.is_empty()
    }

    /// Parse the group's example lines into a table.
    ///
    /// # Errors
    ///
    /// Propagates [`TableError`] when no row exists or a row is ragged.
    pub fn examples_table(&self) -> Result<ExamplesTable, TableError> {
        ExamplesTable::parse(&self.examples)
    }
}

/// Structural anomaly noticed while parsing, reported later by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseIssue {
    /// An examples opener appeared before any group was open.
    OrphanExamples {
        /// One-based line number of the opener.
        line: usize,
    },
}

/// A parsed user story.
///
/// Header fields hold the whole header line, opener included; an empty string
/// means the line was absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Story {
    /// Language of the story and of the rendered document.
    pub language: Language,
    /// Role line, e.g. `As a manager`.
    pub as_a: String,
    /// Capability line, e.g. `I want customers to log in`.
    pub i_want: String,
    /// Benefit line, e.g. `So that I track progress`.
    pub so_that: String,
    /// Blocks in source order, which is also their rendering order.
    pub groups: Vec<Group>,
    /// Anomalies recorded during parsing.
    pub issues: Vec<ParseIssue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("success", GroupKind::Success)]
    #[case(" Edge_Case ", GroupKind::EdgeCase)]
    #[case("RULE", GroupKind::Rule)]
    fn parses_kinds_case_insensitively(#[case] input: &str, #[case] expected: GroupKind) {
        assert_eq!(input.parse::<GroupKind>(), Ok(expected));
    }

    #[test]
    fn rejects_examples_as_a_kind() {
        assert_eq!(
            "examples".parse::<GroupKind>(),
            Err(UnknownGroupKind("EXAMPLES".into()))
        );
    }

    #[test]
    fn every_kind_has_a_label_in_both_languages() {
        for kind in GroupKind::ALL {
            for lang in Language::ALL {
                assert!(!kind.label(lang).is_empty());
            }
            assert_eq!(kind.tag().parse::<GroupKind>(), Ok(kind));
        }
    }

    #[test]
    fn outline_follows_examples() {
        let mut group = Group::new(GroupKind::Success, None);
        assert!(!group.is_outline());
        group.examples.push("| a |".into());
        assert!(group.is_outline());
    }
}
