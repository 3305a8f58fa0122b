//! Step-definition stub synthesis from rendered step lines.
//!
//! Each step's text is tokenized into literals and parameters, parameters are
//! replaced by type markers, and the `(keyword, pattern)` pair becomes the
//! step's signature. Only the first step with a given signature yields a
//! stub. Signature sets live for one synthesis call and are never shared
//! between stories.

use std::collections::HashSet;
use std::fmt;

use story_bdd_patterns::{ExamplesTable, KeywordTable, Language, ParamType, StepPattern};

use crate::feature::RenderedFeature;

/// Deduplication key of a stub.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StepSignature {
    /// Canonical keyword, e.g. `Then`.
    pub keyword: String,
    /// Escaped pattern with type markers.
    pub pattern: String,
}

/// Insertion-ordered set of signatures already emitted.
#[derive(Debug, Clone, Default)]
pub struct SignatureSet {
    order: Vec<StepSignature>,
    seen: HashSet<StepSignature>,
}

impl SignatureSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `signature`, returning `false` if it was already present.
    pub fn insert(&mut self, signature: StepSignature) -> bool {
        if self.seen.contains(&signature) {
            return false;
        }
        self.seen.insert(signature.clone());
        self.order.push(signature);
        true
    }

    /// Whether `signature` has been recorded.
    #[must_use]
    pub fn contains(&self, signature: &StepSignature) -> bool {
        self.seen.contains(signature)
    }

    /// Signatures in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StepSignature> {
        self.order.iter()
    }

    /// Number of recorded signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// A step-definition skeleton for one unique signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepStub {
    /// Canonical keyword.
    pub keyword: String,
    /// Escaped pattern with type markers.
    pub pattern: String,
    /// Positional argument names, `arg1` to `argN`.
    pub arguments: Vec<String>,
    /// Types of the arguments, aligned with [`arguments`](Self::arguments).
    pub parameter_types: Vec<ParamType>,
    /// Step text after the keyword, before substitution.
    pub source_text: String,
}

impl StepStub {
    /// Signature this stub was emitted for.
    #[must_use]
    pub fn signature(&self) -> StepSignature {
        StepSignature {
            keyword: self.keyword.clone(),
            pattern: self.pattern.clone(),
        }
    }
}

/// Stubs destined for one step-definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFile {
    /// Stem of the feature file the stubs belong to.
    pub feature_name: String,
    /// Language of the feature.
    pub language: Language,
    /// Stubs in first-occurrence order.
    pub stubs: Vec<StepStub>,
}

impl fmt::Display for StepFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_step_file(self))
    }
}

/// Result of synthesizing one story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesis {
    /// At least one stub was produced.
    Stubs(StepFile),
    /// No step line produced a stub.
    NoSteps,
}

/// Builds step stubs from rendered step lines.
#[derive(Debug, Clone, Copy)]
pub struct StepSynthesizer<'k> {
    keywords: &'k KeywordTable,
}

impl<'k> StepSynthesizer<'k> {
    /// Create a synthesizer bound to `keywords`.
    #[must_use]
    pub const fn new(keywords: &'k KeywordTable) -> Self {
        Self { keywords }
    }

    /// Synthesize stubs for `steps`, typing placeholders from `table`.
    ///
    /// Lines that do not open with a step keyword are skipped. Deduplication
    /// covers this call only.
    ///
    /// # Examples
    /// ```
    /// use story_bdd::StepSynthesizer;
    /// use story_bdd_patterns::KeywordTable;
    ///
    /// let stubs = StepSynthesizer::new(KeywordTable::shared())
    ///     .synthesize(&["Given I have 3 apples", "Given I have 12 apples"], None);
    /// assert_eq!(stubs.len(), 1);
    /// assert_eq!(stubs[0].pattern, "I have {int} apples");
    /// assert_eq!(stubs[0].source_text, "I have 3 apples");
    /// ```
    #[must_use]
    pub fn synthesize<S: AsRef<str>>(
        &self,
        steps: &[S],
        table: Option<&ExamplesTable>,
    ) -> Vec<StepStub> {
        let mut signatures = SignatureSet::new();
        let mut stubs = Vec::new();
        self.collect(steps, table, &mut signatures, &mut stubs);
        stubs
    }

    /// Synthesize stubs for every section of `feature` with one signature
    /// set, so identical steps in different sections yield one stub.
    #[must_use]
    pub fn synthesize_feature(&self, feature: &RenderedFeature) -> Synthesis {
        let mut signatures = SignatureSet::new();
        let mut stubs = Vec::new();
        for section in &feature.sections {
            self.collect(
                &section.steps,
                section.table.as_ref(),
                &mut signatures,
                &mut stubs,
            );
        }
        if stubs.is_empty() {
            log::debug!("{}: no steps produced", feature.file_name);
            return Synthesis::NoSteps;
        }
        Synthesis::Stubs(StepFile {
            feature_name: feature.file_name.clone(),
            language: feature.language,
            stubs,
        })
    }

    fn collect<S: AsRef<str>>(
        &self,
        steps: &[S],
        table: Option<&ExamplesTable>,
        signatures: &mut SignatureSet,
        stubs: &mut Vec<StepStub>,
    ) {
        for line in steps {
            let line = line.as_ref();
            let Some(split) = self.keywords.split_step(line) else {
                log::debug!("skipping line without a step keyword: {line}");
                continue;
            };
            let built = StepPattern::build(split.text, table);
            let stub = StepStub {
                keyword: split.keyword.word(split.language).to_string(),
                arguments: (1..=built.params.len()).map(|n| format!("arg{n}")).collect(),
                parameter_types: built.params.iter().map(|p| p.inferred_type).collect(),
                pattern: built.pattern,
                source_text: split.text.to_string(),
            };
            if signatures.insert(stub.signature()) {
                stubs.push(stub);
            }
        }
    }
}

/// Render a step-definition file in Cucumber's Ruby step syntax.
///
/// ```
/// use story_bdd::{StepFile, StepStub, render_step_file};
/// use story_bdd_patterns::{Language, ParamType};
///
/// let file = StepFile {
///     feature_name: "cart".into(),
///     language: Language::English,
///     stubs: vec![StepStub {
///         keyword: "Then".into(),
///         pattern: "I add {int} items".into(),
///         arguments: vec!["arg1".into()],
///         parameter_types: vec![ParamType::Int],
///         source_text: "I add <quantity> items".into(),
///     }],
/// };
/// assert_eq!(
///     render_step_file(&file),
///     "# encoding: utf-8\n# Step definitions for cart.feature\n\n\
///      Then(\"I add {int} items\") do |arg1|\n  \
///      pending 'Implement step: I add <quantity> items'\nend\n\n"
/// );
/// ```
#[must_use]
pub fn render_step_file(file: &StepFile) -> String {
    let words = file.language.words();
    let mut out = format!(
        "# encoding: utf-8\n# {} {}.feature\n\n",
        words.steps_header, file.feature_name
    );
    for stub in &file.stubs {
        out.push_str(&stub.keyword);
        out.push_str("(\"");
        out.push_str(&stub.pattern);
        out.push_str("\") do");
        if !stub.arguments.is_empty() {
            out.push_str(" |");
            out.push_str(&stub.arguments.join(", "));
            out.push('|');
        }
        out.push_str("\n  pending '");
        out.push_str(words.pending);
        out.push_str(": ");
        out.push_str(&escape_single_quoted(&stub.source_text));
        out.push_str("'\nend\n\n");
    }
    out
}

fn escape_single_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\'' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn synthesizer() -> StepSynthesizer<'static> {
        StepSynthesizer::new(KeywordTable::shared())
    }

    #[rstest]
    fn plain_steps_have_no_arguments(synthesizer: StepSynthesizer<'static>) {
        let stubs = synthesizer.synthesize(
            &["Given I am on the login page", "Then I see the dashboard"],
            None,
        );
        assert_eq!(stubs.len(), 2);
        assert!(stubs.iter().all(|stub| stub.arguments.is_empty()));
    }

    #[rstest]
    fn keyword_is_part_of_the_signature(synthesizer: StepSynthesizer<'static>) {
        let stubs = synthesizer.synthesize(&["Given I wait", "When I wait", "when I wait"], None);
        let keywords: Vec<_> = stubs.iter().map(|s| s.keyword.as_str()).collect();
        assert_eq!(keywords, ["Given", "When"]);
    }

    #[rstest]
    fn stubs_carry_the_signature_that_deduplicated_them(synthesizer: StepSynthesizer<'static>) {
        let stubs = synthesizer.synthesize(
            &["Given user \"Ann\" has 3 cats", "Given user \"Bob\" has 12 cats"],
            None,
        );
        let [stub] = stubs.as_slice() else {
            panic!("expected one stub, got {stubs:?}");
        };
        assert_eq!(
            stub.signature(),
            StepSignature {
                keyword: "Given".into(),
                pattern: "user {string} has {int} cats".into(),
            }
        );
        assert_eq!(stub.source_text, "user \"Ann\" has 3 cats");
    }

    #[rstest]
    fn each_call_starts_a_fresh_set(synthesizer: StepSynthesizer<'static>) {
        let first = synthesizer.synthesize(&["Then I see the result"], None);
        let second = synthesizer.synthesize(&["Then I see the result"], None);
        assert_eq!(first, second);
        assert_eq!(second.len(), 1);
    }

    #[rstest]
    fn skips_lines_without_keywords(synthesizer: StepSynthesizer<'static>) {
        assert!(synthesizer.synthesize(&["| a | b |", ""], None).is_empty());
    }

    #[rstest]
    fn arguments_follow_token_order(synthesizer: StepSynthesizer<'static>) {
        let table = ExamplesTable::parse(&["| flag |", "| true |"]).ok();
        let stubs = synthesizer.synthesize(&["Dado \"Ana\" com <flag> e 2.5 kg"], table.as_ref());
        let [stub] = stubs.as_slice() else {
            panic!("expected one stub, got {stubs:?}");
        };
        assert_eq!(stub.keyword, "Dado");
        assert_eq!(stub.pattern, "{string} com {boolean} e {int} kg");
        assert_eq!(stub.arguments, ["arg1", "arg2", "arg3"]);
        assert_eq!(
            stub.parameter_types,
            [ParamType::String, ParamType::Boolean, ParamType::Int]
        );
    }

    #[test]
    fn signature_set_keeps_insertion_order() {
        let mut set = SignatureSet::new();
        let sig = |k: &str, p: &str| StepSignature {
            keyword: k.into(),
            pattern: p.into(),
        };
        assert!(set.insert(sig("Then", "b")));
        assert!(set.insert(sig("Given", "a")));
        assert!(!set.insert(sig("Then", "b")));
        assert_eq!(set.len(), 2);
        let patterns: Vec<_> = set.iter().map(|s| s.pattern.as_str()).collect();
        assert_eq!(patterns, ["b", "a"]);
        assert!(set.contains(&sig("Given", "a")));
    }

    #[test]
    fn pending_body_escapes_quotes() {
        let file = StepFile {
            feature_name: "x".into(),
            language: Language::Portuguese,
            stubs: vec![StepStub {
                keyword: "Dado".into(),
                pattern: "o item {string}".into(),
                arguments: vec!["arg1".into()],
                parameter_types: vec![ParamType::String],
                source_text: r#"o item "d'água\x""#.into(),
            }],
        };
        let text = render_step_file(&file);
        assert!(text.starts_with("# encoding: utf-8\n# Definições de passos para x.feature\n\n"));
        assert!(text.contains(r#"  pending 'Implementar passo: o item "d\'água\\x"'"#));
        assert_eq!(text, file.to_string());
    }
}
