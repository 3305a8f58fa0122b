//! Structural checks run between parsing and rendering.

use std::fmt;

use story_bdd_patterns::TableError;
use thiserror::Error;

use crate::story::{GroupKind, ParseIssue, Story};

/// One structural problem found in a [`Story`].
///
/// Group and examples-block indices are one-based, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more of the role, want, and goal lines are missing.
    #[error("incomplete header: missing {}", .missing.join(", "))]
    IncompleteHeader {
        /// Names of the missing fields.
        missing: Vec<&'static str>,
    },
    /// The story has no blocks at all.
    #[error("no blocks detected")]
    NoBlocks,
    /// A block has neither steps nor example rows.
    #[error("group {index} of type {kind} is empty")]
    EmptyGroup {
        /// Group position.
        index: usize,
        /// Group category.
        kind: GroupKind,
    },
    /// A block declares examples but none of its rows is a table row.
    #[error("examples block {index} has no valid table")]
    MissingTable {
        /// Group position.
        index: usize,
    },
    /// A row of a block's table has the wrong number of cells.
    #[error("examples block {index}: row {row} has {found} columns, expected {expected}")]
    RaggedTable {
        /// Group position.
        index: usize,
        /// One-based row number, header included.
        row: usize,
        /// Header column count.
        expected: usize,
        /// Cells found in the row.
        found: usize,
    },
    /// An examples opener appeared before any block.
    #[error("examples block at line {line} has no open group")]
    OrphanExamples {
        /// One-based source line.
        line: usize,
    },
}

/// Every structural problem found in one story.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Problems in detection order.
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Whether the story may be rendered.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable message per problem.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

/// Check `story` and report every structural problem.
///
/// All checks run; none short-circuits another.
///
/// ```
/// use story_bdd::{Parser, ValidationError, validate};
/// use story_bdd_patterns::KeywordTable;
///
/// let story = Parser::new(KeywordTable::shared()).parse("Como gerente\nQuero pagar\n");
/// let report = validate(&story);
/// assert!(!report.is_valid());
/// assert_eq!(
///     report.messages(),
///     ["incomplete header: missing so_that", "no blocks detected"]
/// );
/// ```
#[must_use]
pub fn validate(story: &Story) -> ValidationReport {
    let mut errors = Vec::new();

    let missing: Vec<&'static str> = [
        ("as_a", &story.as_a),
        ("i_want", &story.i_want),
        ("so_that", &story.so_that),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect();
    if !missing.is_empty() {
        errors.push(ValidationError::IncompleteHeader { missing });
    }

    if story.groups.is_empty() {
        errors.push(ValidationError::NoBlocks);
    }

    for (offset, group) in story.groups.iter().enumerate() {
        let index = offset + 1;
        if group.steps.is_empty() && group.examples.is_empty() {
            errors.push(ValidationError::EmptyGroup {
                index,
                kind: group.kind,
            });
        }
        if !group.declares_examples && group.examples.is_empty() {
            continue;
        }
        match group.examples_table() {
            Ok(_) => {}
            Err(TableError::MissingHeader) => errors.push(ValidationError::MissingTable { index }),
            Err(TableError::RaggedRow {
                row,
                expected,
                found,
            }) => errors.push(ValidationError::RaggedTable {
                index,
                row,
                expected,
                found,
            }),
        }
    }

    errors.extend(story.issues.iter().map(|issue| match *issue {
        ParseIssue::OrphanExamples { line } => ValidationError::OrphanExamples { line },
    }));

    ValidationReport { errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::Group;
    use rstest::{fixture, rstest};

    #[fixture]
    fn story() -> Story {
        let mut group = Group::new(GroupKind::Success, None);
        group.steps.push("Given a cart".into());
        Story {
            as_a: "As a manager".into(),
            i_want: "I want customers to log in".into(),
            so_that: "So that I track progress".into(),
            groups: vec![group],
            ..Story::default()
        }
    }

    #[rstest]
    fn complete_story_is_valid(story: Story) {
        assert!(validate(&story).is_valid());
    }

    #[rstest]
    fn missing_goal_mentions_the_header(mut story: Story) {
        story.so_that.clear();
        let report = validate(&story);
        assert_eq!(
            report.errors,
            [ValidationError::IncompleteHeader {
                missing: vec!["so_that"]
            }]
        );
        assert!(report.to_string().contains("header"));
    }

    #[rstest]
    fn empty_group_names_index_and_kind(mut story: Story) {
        story.groups.push(Group::new(GroupKind::Failure, None));
        let report = validate(&story);
        assert_eq!(report.messages(), ["group 2 of type FAILURE is empty"]);
    }

    #[rstest]
    fn declared_examples_need_a_table(mut story: Story) {
        if let Some(group) = story.groups.first_mut() {
            group.declares_examples = true;
            group.examples.push("email, password".into());
        }
        assert_eq!(
            validate(&story).errors,
            [ValidationError::MissingTable { index: 1 }]
        );
    }

    #[rstest]
    fn ragged_tables_are_reported(mut story: Story) {
        if let Some(group) = story.groups.first_mut() {
            group.examples = vec!["| a | b |".into(), "| 1 |".into()];
        }
        assert_eq!(
            validate(&story).messages(),
            ["examples block 1: row 2 has 1 columns, expected 2"]
        );
    }

    #[test]
    fn reports_every_problem_at_once() {
        let story = Story {
            groups: vec![Group::new(GroupKind::Rule, None)],
            issues: vec![ParseIssue::OrphanExamples { line: 3 }],
            ..Story::default()
        };
        assert_eq!(
            validate(&story).messages(),
            [
                "incomplete header: missing as_a, i_want, so_that",
                "group 1 of type RULE is empty",
                "examples block at line 3 has no open group",
            ]
        );
    }

    #[test]
    fn empty_story_has_no_blocks() {
        let report = validate(&Story::default());
        assert!(report.errors.contains(&ValidationError::NoBlocks));
    }
}
