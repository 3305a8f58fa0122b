//! Examples tables: parsing pipe-delimited rows and inferring column types.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::TableError;
use crate::param_type::ParamType;

#[expect(clippy::expect_used, reason = "pattern is a literal checked by tests")]
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+$").expect("integer pattern compiles"));

#[expect(clippy::expect_used, reason = "pattern is a literal checked by tests")]
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+\.\d+$").expect("decimal pattern compiles"));

/// Normalise a raw example line into a table row, if it is one.
///
/// Surrounding whitespace is removed, then one double quote at each end of the
/// whole row. Lines that do not then begin with `|` are not table rows.
///
/// ```
/// use story_bdd_patterns::normalise_row;
/// assert_eq!(normalise_row("  \"| a | b |\" "), Some("| a | b |"));
/// assert_eq!(normalise_row("not a row"), None);
/// ```
#[must_use]
pub fn normalise_row(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted).trim();
    unquoted.starts_with('|').then_some(unquoted)
}

fn split_cells(row: &str) -> Vec<String> {
    let inner = row.strip_prefix('|').unwrap_or(row);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Parsed projection of a group's example rows.
///
/// Every row holds exactly `header.len()` cells. Column lookups are exact and
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExamplesTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ExamplesTable {
    /// Parse raw example lines; the first table row is the header.
    ///
    /// Lines that are not table rows (see [`normalise_row`]) are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MissingHeader`] when no table row exists and
    /// [`TableError::RaggedRow`] when a data row's cell count differs from the
    /// header's.
    ///
    /// # Examples
    /// ```
    /// use story_bdd_patterns::ExamplesTable;
    /// let table = ExamplesTable::parse(&["| email | ok |", "| a@b.c | true |"])
    ///     .expect("well-formed table");
    /// assert_eq!(table.header(), ["email", "ok"]);
    /// assert_eq!(table.column("ok"), Some(vec!["true"]));
    /// ```
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, TableError> {
        let mut table_rows = lines
            .iter()
            .filter_map(|line| normalise_row(line.as_ref()))
            .map(split_cells);
        let header = table_rows.next().ok_or(TableError::MissingHeader)?;
        let mut rows = Vec::new();
        for (offset, row) in table_rows.enumerate() {
            if row.len() != header.len() {
                return Err(TableError::RaggedRow {
                    row: offset + 2,
                    expected: header.len(),
                    found: row.len(),
                });
            }
            rows.push(row);
        }
        Ok(Self { header, rows })
    }

    /// Column names in order.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, each aligned with [`header`](Self::header).
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Whether `name` is exactly one of the header's column names.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.header.iter().any(|column| column == name)
    }

    /// Every value of column `name`, or `None` if there is no such column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.header.iter().position(|column| column == name)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.get(index).map(String::as_str))
                .collect(),
        )
    }

    /// Infer the parameter type of column `name` from all of its values.
    ///
    /// Inference is all-or-nothing: one value outside a category forces the
    /// whole column to the next candidate, ending at [`ParamType::String`].
    /// Unknown columns and columns without data rows are strings.
    ///
    /// ```
    /// use story_bdd_patterns::{ExamplesTable, ParamType};
    /// let table = ExamplesTable::parse(&["| qty | price |", "| 1 | 1.5 |", "| 999 | 2.0 |"])
    ///     .expect("well-formed table");
    /// assert_eq!(table.infer_type("qty"), ParamType::Int);
    /// assert_eq!(table.infer_type("price"), ParamType::Float);
    /// assert_eq!(table.infer_type("missing"), ParamType::String);
    /// ```
    #[must_use]
    pub fn infer_type(&self, name: &str) -> ParamType {
        let Some(values) = self.column(name) else {
            return ParamType::String;
        };
        if values.is_empty() {
            return ParamType::String;
        }
        if values
            .iter()
            .all(|v| v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("false"))
        {
            ParamType::Boolean
        } else if values.iter().all(|v| INTEGER.is_match(v)) {
            ParamType::Int
        } else if values.iter().all(|v| DECIMAL.is_match(v)) {
            ParamType::Float
        } else {
            ParamType::String
        }
    }
}

/// Infer the type of `column` in an optional table.
///
/// Without a table every placeholder is a string.
#[must_use]
pub fn infer_column_type(column: &str, table: Option<&ExamplesTable>) -> ParamType {
    table.map_or(ParamType::String, |t| t.infer_type(column))
}
