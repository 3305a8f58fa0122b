//! Writing generated files and rendering reports.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use eyre::{Context, Result};
use serde::Serialize;
use story_bdd::{RenderedFeature, StepFile, ValidationReport};

use crate::error::CliError;

/// Subdirectory of the output root that receives step-definition files.
pub const STEPS_DIR: &str = "steps";

/// Path of a feature document relative to the output root.
#[must_use]
pub fn feature_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{name}.feature"))
}

/// Path of a step-definition file relative to the output root.
///
/// ```
/// use story_bdd_cli::output::steps_path;
///
/// assert_eq!(steps_path("login"), "steps/login_steps.rb");
/// ```
#[must_use]
pub fn steps_path(name: &str) -> Utf8PathBuf {
    Utf8Path::new(STEPS_DIR).join(format!("{name}_steps.rb"))
}

/// Capability handle on the output root.
///
/// Every write is resolved inside the root; paths escaping it are refused
/// by `cap-std`.
#[derive(Debug)]
pub struct OutputDir {
    root: Utf8PathBuf,
    dir: Dir,
}

impl OutputDir {
    /// Create `root` and its steps subdirectory if needed, then open it.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] when a directory cannot be created or opened.
    pub fn create(root: &Utf8Path) -> Result<Self, CliError> {
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        dir.create_dir_all(STEPS_DIR)?;
        Ok(Self {
            root: root.to_owned(),
            dir,
        })
    }

    /// Root the handle was opened on.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `feature` as `<root>/<name>.feature`, returning the full path.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] when the file cannot be written.
    pub fn write_feature(&self, feature: &RenderedFeature) -> Result<Utf8PathBuf, CliError> {
        self.write(&feature_path(&feature.file_name), &feature.text)
    }

    /// Write `file` as `<root>/steps/<name>_steps.rb`, returning the full
    /// path.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] when the file cannot be written.
    pub fn write_steps(&self, file: &StepFile) -> Result<Utf8PathBuf, CliError> {
        self.write(&steps_path(&file.feature_name), &file.to_string())
    }

    fn write(&self, relative: &Utf8Path, contents: &str) -> Result<Utf8PathBuf, CliError> {
        self.dir.write(relative, contents)?;
        let path = self.root.join(relative);
        tracing::debug!(%path, "wrote file");
        Ok(path)
    }
}

/// Counts reported at the end of a `generate` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Stories read.
    pub stories: usize,
    /// Feature documents produced.
    pub features: usize,
    /// Step-definition files produced.
    pub step_files: usize,
    /// Stories skipped after failing validation.
    pub skipped: usize,
}

/// Validation outcome of one story, as emitted by `check --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Story file as given on the command line.
    pub file: String,
    /// Whether the story passed every check.
    pub valid: bool,
    /// Human-readable validation errors.
    pub errors: Vec<String>,
}

impl CheckReport {
    /// Build the report for `file` from its validation result.
    #[must_use]
    pub fn new(file: &Utf8Path, report: &ValidationReport) -> Self {
        Self {
            file: file.to_string(),
            valid: report.is_valid(),
            errors: report.messages(),
        }
    }
}

pub(crate) fn write_skipped(
    writer: &mut dyn Write,
    file: &Utf8Path,
    report: &ValidationReport,
) -> Result<()> {
    writeln!(writer, "skipped {file}").wrap_err_with(|| format!("failed to report {file}"))?;
    for message in report.messages() {
        writeln!(writer, "  - {message}")
            .wrap_err_with(|| format!("failed to report {file}: {message}"))?;
    }
    Ok(())
}

pub(crate) fn write_created(writer: &mut dyn Write, path: &Utf8Path) -> Result<()> {
    writeln!(writer, "created {path}").wrap_err_with(|| format!("failed to report {path}"))
}

pub(crate) fn write_no_steps(writer: &mut dyn Write, file: &Utf8Path) -> Result<()> {
    writeln!(writer, "{file}: no steps produced")
        .wrap_err_with(|| format!("failed to report {file}"))
}

pub(crate) fn write_document(writer: &mut dyn Write, path: &Utf8Path, text: &str) -> Result<()> {
    writeln!(writer, "==> {path} <==")
        .and_then(|()| writer.write_all(text.as_bytes()))
        .wrap_err_with(|| format!("failed to print {path}"))
}

pub(crate) fn write_summary(writer: &mut dyn Write, summary: &Summary) -> Result<()> {
    writeln!(
        writer,
        "{} stories: {} features, {} step files, {} skipped",
        summary.stories, summary.features, summary.step_files, summary.skipped
    )
    .wrap_err("failed to write summary")
}

pub(crate) fn write_check_text(writer: &mut dyn Write, reports: &[CheckReport]) -> Result<()> {
    for report in reports {
        let written = if report.valid {
            writeln!(writer, "ok {}", report.file)
        } else {
            writeln!(writer, "invalid {}: {}", report.file, report.errors.join("; "))
        };
        written.wrap_err_with(|| format!("failed to report {}", report.file))?;
    }
    Ok(())
}

pub(crate) fn write_check_json(writer: &mut dyn Write, reports: &[CheckReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, reports)
        .wrap_err("failed to serialise check reports")?;
    writeln!(writer).wrap_err("failed to terminate JSON output")
}
