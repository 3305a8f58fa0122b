//! Core library for `story-bdd`.
//!
//! Turns annotated plain-text user stories into Gherkin feature documents and
//! step-definition stubs. The stages run in order:
//!
//! 1. [`Parser`] reads story text into a [`Story`].
//! 2. [`validate`] reports structural problems as a [`ValidationReport`].
//! 3. [`FeatureGenerator`] renders a valid story into a [`RenderedFeature`].
//! 4. [`StepSynthesizer`] turns the rendered steps into [`StepStub`]s.
//!
//! [`Pipeline`] chains all four for one story. No stage performs I/O.

mod feature;
mod parser;
mod pipeline;
mod story;
mod synthesis;
mod validation;

pub use feature::{
    DEFAULT_FILE_NAME_WORDS, FeatureGenerator, FeatureReadError, GeneratorConfig, RenderedFeature,
    RenderedSection, example_rows, read_feature, suggested_file_name,
};
pub use parser::{BlockOpener, EXAMPLES_OPENERS, Parser, ParserMode};
pub use pipeline::{Outcome, Pipeline, PipelineConfig};
pub use story::{Group, GroupKind, ParseIssue, Story, UnknownGroupKind};
pub use synthesis::{
    SignatureSet, StepFile, StepSignature, StepStub, StepSynthesizer, Synthesis, render_step_file,
};
pub use validation::{ValidationError, ValidationReport, validate};
