//! Parameter-substituted step patterns.

use super::lexer::{ParamToken, StepToken, tokenize_step};
use crate::table::ExamplesTable;

/// A step's text with every parameter replaced by its type marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPattern<'a> {
    /// Escaped pattern text, e.g. `I add {int} items`.
    pub pattern: String,
    /// Parameters in order of appearance, with their final types.
    pub params: Vec<ParamToken<'a>>,
}

impl<'a> StepPattern<'a> {
    /// Build the pattern for `text`, the part of a step after its keyword.
    ///
    /// Placeholders whose name is a column of `table` take the column's
    /// inferred type; every other token keeps its matcher's candidate type.
    /// Literal text is escaped twice. Cucumber-expression syntax (`(`, `{`,
    /// `/`, `\`) is escaped so it matches literally, then the result is made
    /// safe inside a Ruby double-quoted string (`"`, `\`, and `#`, which
    /// would otherwise start `#{}` interpolation).
    ///
    /// ```
    /// use story_bdd_patterns::{ExamplesTable, StepPattern};
    /// let table = ExamplesTable::parse(&["| quantity |", "| 1 |", "| 999 |"])
    ///     .expect("well-formed table");
    /// let built = StepPattern::build("I add <quantity> items", Some(&table));
    /// assert_eq!(built.pattern, "I add {int} items");
    /// let built = StepPattern::build("I log in with \"<email>\"", None);
    /// assert_eq!(built.pattern, "I log in with {string}");
    /// ```
    #[must_use]
    pub fn build(text: &'a str, table: Option<&ExamplesTable>) -> Self {
        let mut pattern = String::with_capacity(text.len());
        let mut params = Vec::new();
        for token in tokenize_step(text) {
            match token {
                StepToken::Literal(literal) => push_escaped(&mut pattern, literal),
                StepToken::Param(mut param) => {
                    let column_table = table
                        .filter(|t| param.matcher.is_placeholder() && t.has_column(param.raw));
                    if let Some(table) = column_table {
                        param.inferred_type = table.infer_type(param.raw);
                    }
                    pattern.push_str(param.inferred_type.marker());
                    params.push(param);
                }
            }
        }
        Self { pattern, params }
    }
}

fn push_escaped(out: &mut String, literal: &str) {
    for c in literal.chars() {
        match c {
            '(' | '{' | '/' => out.push_str("\\\\"),
            '\\' => out.push_str("\\\\\\"),
            '"' | '#' => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_type::ParamType;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> ExamplesTable {
        let lines = [
            "| email | active | price | code |",
            "| a@b.c | true | 1.5 | 7 |",
            "| x@y.z | false | 20.0 | 8 |",
        ];
        match ExamplesTable::parse(&lines) {
            Ok(table) => table,
            Err(err) => panic!("fixture table should parse: {err}"),
        }
    }

    #[rstest]
    #[case("with \"<email>\"", "with {string}")]
    #[case("flag <active> is set", "flag {boolean} is set")]
    #[case("costs <price>", "costs {float}")]
    #[case("code \"<code>\" entered", "code {int} entered")]
    #[case("unknown <missing>", "unknown {int}")]
    #[case("unknown \"<missing>\"", "unknown {string}")]
    #[case("pay 2.50 for \"tea\"", "pay {int} for {string}")]
    fn substitutes_type_markers(table: ExamplesTable, #[case] text: &str, #[case] expected: &str) {
        assert_eq!(StepPattern::build(text, Some(&table)).pattern, expected);
    }

    #[test]
    fn escapes_stray_quotes_and_backslashes() {
        let built = StepPattern::build(r#"path C:\tmp has "odd quote"#, None);
        assert_eq!(built.pattern, r#"path C:\\\\tmp has \"odd quote"#);
        assert!(built.params.is_empty());
    }

    #[rstest]
    #[case("total is #{sum}", r"total is \#\\{sum}")]
    #[case("item #<n> arrives", r"item \#{int} arrives")]
    #[case("pick apple(s)", r"pick apple\\(s)")]
    #[case("yes/no answer", r"yes\\/no answer")]
    fn escapes_interpolation_and_expression_syntax(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(StepPattern::build(text, None).pattern, expected);
    }

    #[test]
    fn differing_literals_share_a_pattern() {
        let first = StepPattern::build("user \"Ann\" has 3 cats", None);
        let second = StepPattern::build("user \"Bob\" has 12 cats", None);
        assert_eq!(first.pattern, second.pattern);
        assert_ne!(first.params, second.params);
    }

    #[test]
    fn reports_final_param_types() {
        let built = StepPattern::build("I add <quantity> items", None);
        let types: Vec<_> = built.params.iter().map(|p| p.inferred_type).collect();
        assert_eq!(types, vec![ParamType::Int]);
    }
}
