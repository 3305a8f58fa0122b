//! Recover sections from an already rendered feature document.

use gherkin::{GherkinEnv, StepType};
use story_bdd_patterns::{ExamplesTable, KeywordTable, Language, StepKeyword};
use thiserror::Error;

use super::{RenderedFeature, RenderedSection};

/// Errors raised while reading a feature document.
#[derive(Debug, Error)]
pub enum FeatureReadError {
    /// The document is not valid Gherkin.
    #[error("failed to parse feature file: {0}")]
    Parse(#[from] gherkin::ParseError),
}

/// Read the scenario sections of a feature document.
///
/// The document is parsed with `gherkin`, so every keyword synonym of the
/// document's `# language:` is accepted. Backgrounds, scenarios, and the
/// contents of `Rule:` blocks each become one section, in document order.
/// Steps whose keyword is not in `keywords` (bullets such as `*`, or synonyms
/// like `Dada`) are written with the canonical keyword of their step type.
///
/// # Errors
///
/// Returns [`FeatureReadError::Parse`] when `text` is not valid Gherkin.
///
/// ```
/// use story_bdd::read_feature;
/// use story_bdd_patterns::{KeywordTable, Language};
///
/// let text = "# language: en\nFeature: pay\n  Scenario Outline: Example 1\n    \
///             Given I pay <amount>\n    Examples:\n      | amount |\n      | 10 |\n";
/// let feature = read_feature(KeywordTable::shared(), "pay", text).unwrap();
/// assert_eq!(feature.language, Language::English);
/// assert_eq!(feature.sections.len(), 1);
/// assert_eq!(feature.sections[0].steps, ["Given I pay <amount>"]);
/// assert!(feature.sections[0].table.is_some());
/// ```
pub fn read_feature(
    keywords: &KeywordTable,
    file_name: &str,
    text: &str,
) -> Result<RenderedFeature, FeatureReadError> {
    let feature = gherkin::Feature::parse(text, GherkinEnv::default())?;
    let language = document_language(keywords, &feature);
    let reader = SectionReader { keywords, language };

    let mut sections = Vec::new();
    if let Some(background) = feature.background.as_ref() {
        sections.push(reader.background(background));
    }
    sections.extend(feature.scenarios.iter().map(|s| reader.scenario(s)));
    for rule in &feature.rules {
        if let Some(background) = rule.background.as_ref() {
            sections.push(reader.background(background));
        }
        sections.extend(rule.scenarios.iter().map(|s| reader.scenario(s)));
    }

    Ok(RenderedFeature {
        file_name: file_name.to_string(),
        language,
        text: text.to_string(),
        sections,
    })
}

/// The document language follows its `Feature` keyword, then its first
/// recognised step keyword, then the primary language.
fn document_language(keywords: &KeywordTable, feature: &gherkin::Feature) -> Language {
    let keyword = feature.keyword.trim();
    if let Some(lang) = Language::ALL
        .into_iter()
        .find(|lang| lang.words().feature.eq_ignore_ascii_case(keyword))
    {
        return lang;
    }
    feature
        .background
        .iter()
        .flat_map(|b| &b.steps)
        .chain(feature.scenarios.iter().flat_map(|s| &s.steps))
        .find_map(|step| keywords.recognise(step.keyword.trim()))
        .map(|(lang, _)| lang)
        .unwrap_or_default()
}

const fn slot(ty: StepType) -> StepKeyword {
    match ty {
        StepType::Given => StepKeyword::Given,
        StepType::When => StepKeyword::When,
        StepType::Then => StepKeyword::Then,
    }
}

#[derive(Clone, Copy)]
struct SectionReader<'k> {
    keywords: &'k KeywordTable,
    language: Language,
}

impl SectionReader<'_> {
    fn background(&self, background: &gherkin::Background) -> RenderedSection {
        RenderedSection {
            title: background.name.trim().to_string(),
            steps: self.steps(&background.steps),
            ..RenderedSection::default()
        }
    }

    fn scenario(&self, scenario: &gherkin::Scenario) -> RenderedSection {
        let example_rows = example_rows(&scenario.examples);
        let table = if example_rows.is_empty() {
            None
        } else {
            ExamplesTable::parse(&example_rows).ok()
        };
        RenderedSection {
            tags: scenario
                .tags
                .iter()
                .map(|tag| format!("@{}", tag.trim_start_matches('@')))
                .collect(),
            outline: !scenario.examples.is_empty(),
            title: scenario.name.trim().to_string(),
            steps: self.steps(&scenario.steps),
            example_rows,
            table,
        }
    }

    fn steps(&self, steps: &[gherkin::Step]) -> Vec<String> {
        steps
            .iter()
            .map(|step| {
                let written = step.keyword.trim();
                let keyword = if self.keywords.recognise(written).is_some() {
                    written
                } else {
                    slot(step.ty).word(self.language)
                };
                format!("{keyword} {}", step.value.trim())
            })
            .collect()
    }
}

/// Rows of every examples table of a scenario, as pipe-delimited lines.
///
/// The header of the first table is kept; later tables contribute their data
/// rows only.
fn example_rows(examples: &[gherkin::Examples]) -> Vec<String> {
    let mut rows = Vec::new();
    for table in examples.iter().filter_map(|ex| ex.table.as_ref()) {
        let skip = usize::from(!rows.is_empty());
        rows.extend(
            table
                .rows
                .iter()
                .skip(skip)
                .map(|cells| format!("| {} |", cells.join(" | "))),
        );
    }
    rows
}
