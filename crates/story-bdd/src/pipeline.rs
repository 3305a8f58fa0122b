//! Parse, validate, render, and synthesize one story in a single call.

use story_bdd_patterns::{KeywordTable, Language};

use crate::feature::{FeatureGenerator, GeneratorConfig, RenderedFeature};
use crate::parser::Parser;
use crate::story::Story;
use crate::synthesis::{StepSynthesizer, Synthesis};
use crate::validation::{ValidationReport, validate};

/// Options shared by every run of a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    /// Language of stories without a `# language:` directive.
    pub default_language: Language,
    /// Rendering options.
    pub generator: GeneratorConfig,
}

/// Result of running one story through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The story failed validation and was skipped.
    Rejected(ValidationReport),
    /// The story was rendered.
    Generated {
        /// Parsed story.
        story: Box<Story>,
        /// Rendered feature document.
        feature: RenderedFeature,
        /// Synthesized step definitions.
        steps: Synthesis,
    },
}

/// The full story-to-artefacts chain.
///
/// Each run builds its own story and signature set; only the keyword table
/// is shared, so one pipeline may serve many stories.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'k> {
    parser: Parser<'k>,
    generator: FeatureGenerator<'k>,
    synthesizer: StepSynthesizer<'k>,
}

impl<'k> Pipeline<'k> {
    /// Assemble a pipeline around `keywords`.
    #[must_use]
    pub fn new(keywords: &'k KeywordTable, config: PipelineConfig) -> Self {
        Self {
            parser: Parser::new(keywords).with_default_language(config.default_language),
            generator: FeatureGenerator::new(keywords, config.generator),
            synthesizer: StepSynthesizer::new(keywords),
        }
    }

    /// Run story `text` through every stage.
    ///
    /// # Examples
    /// ```
    /// use story_bdd::{Outcome, Pipeline, PipelineConfig, Synthesis};
    /// use story_bdd_patterns::KeywordTable;
    ///
    /// let pipeline = Pipeline::new(KeywordTable::shared(), PipelineConfig::default());
    /// let text = "Como cliente\nQuero pagar\nPara sair\n[SUCCESS]\nDado um carrinho\n";
    /// let Outcome::Generated { feature, steps, .. } = pipeline.run(text) else {
    ///     panic!("story should be valid");
    /// };
    /// assert_eq!(feature.file_name, "quero_pagar");
    /// assert!(matches!(steps, Synthesis::Stubs(file) if file.stubs.len() == 1));
    /// ```
    #[must_use]
    pub fn run(&self, text: &str) -> Outcome {
        let story = self.parser.parse(text);
        let report = validate(&story);
        if !report.is_valid() {
            log::debug!("story rejected: {report}");
            return Outcome::Rejected(report);
        }
        let feature = self.generator.render(&story);
        let steps = self.synthesizer.synthesize_feature(&feature);
        Outcome::Generated {
            story: Box::new(story),
            feature,
            steps,
        }
    }
}
