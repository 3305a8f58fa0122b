//! Line-oriented parser turning story text into a [`Story`].
//!
//! Parsing never fails. Structural problems surface as empty fields, empty
//! groups, or [`ParseIssue`]s that [`validate`](crate::validate) reports.
//!
//! Blank lines are dropped everywhere and every kept line is stored trimmed.
//! Header lines are only captured before the first block opener; after that,
//! lines belong to the most recently opened group.

use std::sync::LazyLock;

use regex::Regex;
use story_bdd_patterns::{KeywordTable, Language, strip_opener};

use crate::story::{Group, GroupKind, ParseIssue, Story};

#[expect(clippy::expect_used, reason = "pattern is a literal checked by tests")]
static LANGUAGE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#\s*lang(?:uage)?\s*:\s*(\S+)\s*$").expect("directive pattern compiles")
});

#[expect(clippy::expect_used, reason = "pattern is a literal checked by tests")]
static BLOCK_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([A-Za-z_]+)\](?:@([A-Za-z0-9_-]+))?$").expect("opener pattern compiles")
});

/// Bracketed words that open an examples block.
pub const EXAMPLES_OPENERS: [&str; 3] = ["EXAMPLES", "EXEMPLO", "EXEMPLOS"];

/// A line that opens a new block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOpener {
    /// `[KIND]` or `[KIND]@tag`.
    Group {
        /// Block category.
        kind: GroupKind,
        /// Optional annotation.
        tag: Option<String>,
    },
    /// `[EXAMPLES]` or a localised variant, optionally annotated.
    Examples,
}

impl BlockOpener {
    /// Recognise a trimmed line as a block opener.
    ///
    /// Tags are matched case-insensitively. Bracketed words outside the
    /// vocabulary are ordinary content.
    ///
    /// ```
    /// use story_bdd::{BlockOpener, GroupKind};
    /// assert_eq!(
    ///     BlockOpener::parse("[success]@smoke"),
    ///     Some(BlockOpener::Group { kind: GroupKind::Success, tag: Some("smoke".into()) })
    /// );
    /// assert_eq!(BlockOpener::parse("[Exemplos]"), Some(BlockOpener::Examples));
    /// assert_eq!(BlockOpener::parse("[TODO]"), None);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = BLOCK_OPENER.captures(line.trim())?;
        let word = caps.get(1)?.as_str().to_ascii_uppercase();
        if EXAMPLES_OPENERS.contains(&word.as_str()) {
            return Some(Self::Examples);
        }
        let kind = word.parse::<GroupKind>().ok()?;
        let tag = caps.get(2).map(|m| m.as_str().to_string());
        Some(Self::Group { kind, tag })
    }
}

/// Destination of content lines inside the current group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserMode {
    /// Lines are steps.
    #[default]
    CollectingSteps,
    /// Lines are example rows.
    CollectingExamples,
}

impl ParserMode {
    /// Mode entered after reading `opener`.
    ///
    /// Only block openers change the mode: a group opener starts collecting
    /// steps and an examples opener starts collecting rows.
    #[must_use]
    pub const fn after(opener: &BlockOpener) -> Self {
        match opener {
            BlockOpener::Group { .. } => Self::CollectingSteps,
            BlockOpener::Examples => Self::CollectingExamples,
        }
    }
}

/// Story parser bound to a keyword table.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'k> {
    keywords: &'k KeywordTable,
    default_language: Language,
}

impl<'k> Parser<'k> {
    /// Create a parser that assumes the primary language when a story has
    /// no directive.
    #[must_use]
    pub fn new(keywords: &'k KeywordTable) -> Self {
        Self {
            keywords,
            default_language: Language::default(),
        }
    }

    /// Use `language` for stories without a `# language:` directive.
    #[must_use]
    pub const fn with_default_language(mut self, language: Language) -> Self {
        self.default_language = language;
        self
    }

    /// Parse story `text`.
    ///
    /// # Examples
    /// ```
    /// use story_bdd::{GroupKind, Parser};
    /// use story_bdd_patterns::{KeywordTable, Language};
    ///
    /// let text = "# language: en\nAs a shopper\nI want to pay\nSo that I leave\n\
    ///             [SUCCESS]\nGiven a cart\nThen I pay\n";
    /// let story = Parser::new(KeywordTable::shared()).parse(text);
    /// assert_eq!(story.language, Language::English);
    /// assert_eq!(story.as_a, "As a shopper");
    /// assert_eq!(story.groups.len(), 1);
    /// assert_eq!(story.groups[0].kind, GroupKind::Success);
    /// ```
    #[must_use]
    pub fn parse(&self, text: &str) -> Story {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .peekable();

        let mut story = Story {
            language: self.default_language,
            ..Story::default()
        };
        if let Some(code) = lines.peek().and_then(|&(_, line)| directive_code(line)) {
            match code.parse::<Language>() {
                Ok(language) => story.language = language,
                Err(err) => log::warn!("{err}; using {}", story.language),
            }
            lines.next();
        }

        let mut mode = ParserMode::default();
        for (number, line) in lines {
            if let Some(opener) = BlockOpener::parse(line) {
                mode = ParserMode::after(&opener);
                open_block(&mut story, opener, number);
                continue;
            }
            if story.groups.is_empty() {
                if mode == ParserMode::CollectingSteps {
                    capture_header(&mut story, line, number);
                }
                continue;
            }
            let Some(group) = story.groups.last_mut() else {
                continue;
            };
            match mode {
                ParserMode::CollectingSteps => {
                    if self.keywords.split_step(line).is_none() {
                        log::debug!("line {number}: step does not open with a known keyword");
                    }
                    group.steps.push(line.to_string());
                }
                ParserMode::CollectingExamples => group.examples.push(line.to_string()),
            }
        }
        story
    }
}

fn directive_code(line: &str) -> Option<&str> {
    LANGUAGE_DIRECTIVE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn open_block(story: &mut Story, opener: BlockOpener, number: usize) {
    match opener {
        BlockOpener::Group { kind, tag } => story.groups.push(Group::new(kind, tag)),
        BlockOpener::Examples => {
            let Some(group) = story.groups.last_mut() else {
                log::warn!("line {number}: examples block has no open group");
                story.issues.push(ParseIssue::OrphanExamples { line: number });
                return;
            };
            group.declares_examples = true;
        }
    }
}

fn capture_header(story: &mut Story, line: &str, number: usize) {
    let openers = story.language.header_openers();
    let slots = [
        (&mut story.as_a, openers.role),
        (&mut story.i_want, openers.want),
        (&mut story.so_that, openers.goal),
    ];
    for (field, candidates) in slots {
        if field.is_empty() && strip_opener(line, candidates).is_some() {
            *field = line.to_string();
            return;
        }
    }
    log::debug!("line {number}: ignoring preamble text outside any block");
}
