//! Error types shared by the keyword, table, and language modules.

use thiserror::Error;

/// Raised when a `# language:` directive names a code outside the supported
/// pair.
///
/// # Examples
/// ```
/// use story_bdd_patterns::{Language, UnsupportedLanguage};
/// let err = "fr".parse::<Language>().unwrap_err();
/// assert_eq!(err, UnsupportedLanguage("fr".into()));
/// assert_eq!(err.to_string(), "unsupported language code `fr` (expected pt or en)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language code `{0}` (expected pt or en)")]
pub struct UnsupportedLanguage(pub String);

/// Errors surfaced while projecting raw example rows into an
/// [`ExamplesTable`](crate::ExamplesTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// No row beginning with the `|` delimiter was found.
    #[error("examples block has no table rows")]
    MissingHeader,
    /// A data row does not have as many cells as the header.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        /// One-based index of the offending row, counting the header as row 1.
        row: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of cells in the offending row.
        found: usize,
    },
}
