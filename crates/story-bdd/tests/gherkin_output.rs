//! Rendered documents must be valid Gherkin in both supported languages.
#![expect(clippy::expect_used, reason = "tests require descriptive failures")]

use gherkin::{Feature, GherkinEnv, StepType};
use rstest::rstest;
use story_bdd::{FeatureGenerator, GeneratorConfig, Parser, read_feature};
use story_bdd_patterns::KeywordTable;

const PORTUGUESE_STORY: &str = "# language: pt
Como gerente de loja
Quero acompanhar pedidos atrasados
Para avisar os clientes

[CONTEXT]
Dado que estou autenticado

[SUCCESS]@pedidos
Quando abro a lista de pedidos
Então vejo 3 pedidos atrasados
Mas não vejo pedidos entregues

[VALIDATION]
Quando filtro por \"<status>\"
Então vejo <total> pedidos
[EXEMPLOS]
| status | total |
\"| atrasado | 3 |\"
| entregue | 0 |
";

const ENGLISH_STORY: &str = "# language: en
As a store manager
I want to follow late orders
So that I can warn customers

[FAILURE]
Dado I am logged out
Quando I open the orders page
Então I am redirected to login

[PERFORMANCE]
Given <orders> orders exist
Then the list loads in <seconds> seconds
[EXAMPLES]
| orders | seconds |
| 10 | 0.5 |
| 1000 | 2.0 |
";

fn render(story: &str) -> String {
    let keywords = KeywordTable::shared();
    let parsed = Parser::new(keywords).parse(story);
    FeatureGenerator::new(keywords, GeneratorConfig::default())
        .render(&parsed)
        .text
}

#[rstest]
#[case(PORTUGUESE_STORY, "acompanhar pedidos atrasados", 3)]
#[case(ENGLISH_STORY, "follow late orders", 2)]
fn rendered_document_parses_as_gherkin(
    #[case] story: &str,
    #[case] feature_name: &str,
    #[case] scenarios: usize,
) {
    let text = render(story);
    let feature = Feature::parse(&text, GherkinEnv::default()).expect("rendered feature parses");
    assert_eq!(feature.name, feature_name);
    assert_eq!(feature.scenarios.len(), scenarios);
}

#[test]
fn portuguese_outline_keeps_steps_and_examples() {
    let text = render(PORTUGUESE_STORY);
    let feature = Feature::parse(&text, GherkinEnv::default()).expect("rendered feature parses");
    let outline = feature.scenarios.last().expect("outline scenario");
    assert_eq!(outline.name, "Exemplo 1");
    let steps: Vec<_> = outline.steps.iter().map(|s| (s.ty, s.value.as_str())).collect();
    assert_eq!(
        steps,
        [
            (StepType::When, "filtro por \"<status>\""),
            (StepType::Then, "vejo <total> pedidos"),
        ]
    );
    let table = outline
        .examples
        .first()
        .and_then(|examples| examples.table.as_ref())
        .expect("examples table");
    assert_eq!(
        table.rows,
        [
            vec!["status".to_string(), "total".to_string()],
            vec!["atrasado".to_string(), "3".to_string()],
            vec!["entregue".to_string(), "0".to_string()],
        ]
    );
}

#[test]
fn english_document_translates_portuguese_keywords() {
    let text = render(ENGLISH_STORY);
    let feature = Feature::parse(&text, GherkinEnv::default()).expect("rendered feature parses");
    let first = feature.scenarios.first().expect("plain scenario");
    assert_eq!(
        first.name,
        "Negative test - I am logged out - I am redirected to login"
    );
    let tags: Vec<_> = first
        .tags
        .iter()
        .map(|tag| tag.trim_start_matches('@'))
        .collect();
    assert_eq!(tags, ["failure"]);
    let kinds: Vec<_> = first.steps.iter().map(|s| s.ty).collect();
    assert_eq!(kinds, [StepType::Given, StepType::When, StepType::Then]);
}

#[test]
fn reader_recovers_what_the_generator_wrote() {
    let keywords = KeywordTable::shared();
    let story = Parser::new(keywords).parse(ENGLISH_STORY);
    let rendered = FeatureGenerator::new(keywords, GeneratorConfig::default()).render(&story);
    let read = read_feature(keywords, &rendered.file_name, &rendered.text)
        .expect("rendered feature reads back");
    assert_eq!(read.language, rendered.language);
    assert_eq!(read.sections, rendered.sections);
}
