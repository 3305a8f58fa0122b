//! Parameter types assigned to tokens found in step text.

use std::fmt;

/// Type of a step parameter, rendered as a Cucumber-expression marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Arbitrary text, `{string}`.
    String,
    /// Whole number, `{int}`.
    Int,
    /// Decimal number, `{float}`.
    Float,
    /// `true` or `false`, `{boolean}`.
    Boolean,
}

impl ParamType {
    /// Placeholder marker substituted into step patterns.
    ///
    /// ```
    /// use story_bdd_patterns::ParamType;
    /// assert_eq!(ParamType::Int.marker(), "{int}");
    /// ```
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::String => "{string}",
            Self::Int => "{int}",
            Self::Float => "{float}",
            Self::Boolean => "{boolean}",
        }
    }

    /// Bare type name without braces.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
