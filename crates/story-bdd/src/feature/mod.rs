//! Rendering of stories into Gherkin feature documents.

mod reader;

use story_bdd_patterns::{ExamplesTable, KeywordTable, Language, normalise_row, strip_opener};

use crate::story::{Group, Story};

pub use reader::{FeatureReadError, read_feature};

/// Default number of `i_want` words kept in a suggested file name.
pub const DEFAULT_FILE_NAME_WORDS: usize = 5;

const FALLBACK_FILE_NAME: &str = "story";
const SECTION_INDENT: usize = 2;
const STEP_INDENT: usize = 4;
const ROW_INDENT: usize = 6;

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of words of the `i_want` line used for the file name.
    pub file_name_words: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            file_name_words: DEFAULT_FILE_NAME_WORDS,
        }
    }
}

/// One scenario or outline section of a rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedSection {
    /// Tags in order, each with its leading `@`.
    pub tags: Vec<String>,
    /// Whether the section is a scenario outline.
    pub outline: bool,
    /// Section title after the keyword.
    pub title: String,
    /// Step lines with their keyword in the document language.
    pub steps: Vec<String>,
    /// Example rows as written, after normalisation.
    pub example_rows: Vec<String>,
    /// Parsed examples table of an outline section.
    pub table: Option<ExamplesTable>,
}

/// A rendered specification document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFeature {
    /// Suggested file stem, without the `.feature` extension.
    pub file_name: String,
    /// Language the document is written in.
    pub language: Language,
    /// Complete document text.
    pub text: String,
    /// Sections in document order.
    pub sections: Vec<RenderedSection>,
}

/// Renders [`Story`] values into feature documents.
///
/// Output depends only on the story and configuration, so rendering the same
/// story twice yields identical text.
#[derive(Debug, Clone, Copy)]
pub struct FeatureGenerator<'k> {
    keywords: &'k KeywordTable,
    config: GeneratorConfig,
}

impl<'k> FeatureGenerator<'k> {
    /// Create a generator bound to `keywords`.
    #[must_use]
    pub const fn new(keywords: &'k KeywordTable, config: GeneratorConfig) -> Self {
        Self { keywords, config }
    }

    /// Render `story` in its own language.
    ///
    /// Groups without steps are skipped. Groups with example rows become
    /// outlines titled by a running counter; the others become plain
    /// scenarios titled after their kind and first and last steps.
    ///
    /// # Examples
    /// ```
    /// use story_bdd::{FeatureGenerator, GeneratorConfig, Parser};
    /// use story_bdd_patterns::KeywordTable;
    ///
    /// let keywords = KeywordTable::shared();
    /// let story = Parser::new(keywords).parse(
    ///     "Como gerente\nQuero ver relatórios\nPara decidir\n[SUCCESS]\nGiven um relatório\nThen vejo o total\n",
    /// );
    /// let feature = FeatureGenerator::new(keywords, GeneratorConfig::default()).render(&story);
    /// assert_eq!(feature.file_name, "quero_ver_relat_rios");
    /// assert!(feature.text.starts_with("# language: pt\nFuncionalidade: ver relatórios\n"));
    /// assert!(feature.text.contains("    Dado um relatório\n"));
    /// ```
    #[must_use]
    pub fn render(&self, story: &Story) -> RenderedFeature {
        let language = story.language;
        let words = language.words();
        let mut text = String::new();

        push_line(&mut text, 0, &format!("# language: {}", language.code()));
        let title = strip_opener(&story.i_want, language.header_openers().want)
            .filter(|rest| !rest.is_empty())
            .unwrap_or(&story.i_want);
        push_line(&mut text, 0, &format!("{}: {title}", words.feature));
        for header in [&story.as_a, &story.i_want, &story.so_that] {
            push_line(&mut text, SECTION_INDENT, &format!("# {header}"));
        }

        let mut sections = Vec::new();
        let mut outline_counter = 0;
        for (offset, group) in story.groups.iter().enumerate() {
            if group.steps.is_empty() {
                log::debug!(
                    "group {} of type {} has no steps; not rendered",
                    offset + 1,
                    group.kind
                );
                continue;
            }
            let section = if group.is_outline() {
                outline_counter += 1;
                self.outline(group, language, outline_counter)
            } else {
                self.scenario(group, language)
            };
            text.push('\n');
            write_section(&mut text, &section, language);
            sections.push(section);
        }

        RenderedFeature {
            file_name: suggested_file_name(&story.i_want, self.config.file_name_words),
            language,
            text,
            sections,
        }
    }

    fn translated_steps(&self, group: &Group, language: Language) -> Vec<String> {
        group
            .steps
            .iter()
            .map(|line| match self.keywords.split_step(line) {
                Some(split) if split.text.is_empty() => {
                    self.keywords.translate(split.word, language).to_string()
                }
                Some(split) => format!(
                    "{} {}",
                    self.keywords.translate(split.word, language),
                    split.text
                ),
                None => line.clone(),
            })
            .collect()
    }

    fn step_text<'a>(&self, line: &'a str) -> &'a str {
        self.keywords
            .split_step(line)
            .map_or_else(|| line.trim(), |split| split.text)
    }

    fn scenario(&self, group: &Group, language: Language) -> RenderedSection {
        let words = language.words();
        let first = group
            .steps
            .first()
            .map(|line| self.step_text(line))
            .filter(|text| !text.is_empty())
            .unwrap_or(words.condition);
        let last = group
            .steps
            .last()
            .map(|line| self.step_text(line))
            .filter(|text| !text.is_empty())
            .unwrap_or(words.result);
        RenderedSection {
            tags: tags_for(group),
            outline: false,
            title: format!("{} - {first} - {last}", group.kind.label(language)),
            steps: self.translated_steps(group, language),
            example_rows: Vec::new(),
            table: None,
        }
    }

    fn outline(&self, group: &Group, language: Language, counter: usize) -> RenderedSection {
        RenderedSection {
            tags: tags_for(group),
            outline: true,
            title: format!("{} {counter}", language.words().example),
            steps: self.translated_steps(group, language),
            example_rows: example_rows(&group.examples)
                .into_iter()
                .map(str::to_string)
                .collect(),
            table: group.examples_table().ok(),
        }
    }
}

fn tags_for(group: &Group) -> Vec<String> {
    std::iter::once(format!("@{}", group.kind.tag().to_lowercase()))
        .chain(group.tag.iter().map(|tag| format!("@{tag}")))
        .collect()
}

fn write_section(out: &mut String, section: &RenderedSection, language: Language) {
    let words = language.words();
    push_line(out, SECTION_INDENT, &section.tags.join(" "));
    let keyword = if section.outline {
        words.outline
    } else {
        words.scenario
    };
    push_line(out, SECTION_INDENT, &format!("{keyword}: {}", section.title));
    for step in &section.steps {
        push_line(out, STEP_INDENT, step);
    }
    if section.outline {
        push_line(out, STEP_INDENT, &format!("{}:", words.examples));
        for row in &section.example_rows {
            push_line(out, ROW_INDENT, row);
        }
    }
}

fn push_line(out: &mut String, indent: usize, line: &str) {
    out.extend(std::iter::repeat_n(' ', indent));
    out.push_str(line);
    out.push('\n');
}

/// Derive a file stem from a capability line.
///
/// The line is lower-cased, split on every character that is not an ASCII
/// letter or digit, and the first `words` non-empty pieces are joined with
/// `_`. Falls back to `story` when nothing remains.
///
/// ```
/// use story_bdd::suggested_file_name;
/// assert_eq!(
///     suggested_file_name("Quero adicionar produtos ao carrinho de compras", 5),
///     "quero_adicionar_produtos_ao_carrinho"
/// );
/// assert_eq!(suggested_file_name("I want to log in", 3), "i_want_to");
/// assert_eq!(suggested_file_name("!!!", 5), "story");
/// ```
#[must_use]
pub fn suggested_file_name(i_want: &str, words: usize) -> String {
    let name = i_want
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .take(words)
        .collect::<Vec<_>>()
        .join("_");
    if name.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        name
    }
}

/// Rows of `lines` that survive normalisation, in order.
///
/// ```
/// use story_bdd::example_rows;
/// let lines = ["\"| a | b |\"".to_string(), "note".to_string()];
/// let rows = example_rows(&lines);
/// assert_eq!(rows, ["| a | b |"]);
/// ```
#[must_use]
pub fn example_rows(lines: &[String]) -> Vec<&str> {
    lines.iter().filter_map(|line| normalise_row(line)).collect()
}
