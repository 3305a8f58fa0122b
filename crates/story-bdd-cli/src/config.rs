//! Command line configuration parsed from environment variables.
//!
//! Every setting can be supplied through an environment variable prefixed
//! with `STORY_BDD_` and overridden by the matching command line flag.

use std::env;
use std::str::FromStr;

use camino::Utf8PathBuf;
use story_bdd::{GeneratorConfig, PipelineConfig};
use story_bdd_patterns::Language;

use crate::error::CliError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "STORY_BDD_LOG_LEVEL";
/// Environment variable holding the default story language.
pub const LANG_VAR: &str = "STORY_BDD_LANG";
/// Environment variable holding the file-name word count.
pub const FILE_NAME_WORDS_VAR: &str = "STORY_BDD_FILE_NAME_WORDS";
/// Environment variable holding the output directory.
pub const OUTPUT_DIR_VAR: &str = "STORY_BDD_OUTPUT_DIR";

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "features";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Info` when not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging.
    Trace,
    /// Per-group parsing and rendering decisions.
    Debug,
    /// Standard informational messages.
    #[default]
    Info,
    /// Unsupported language codes and other recoverable oddities.
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub const fn as_filter_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Parse a file-name word count, rejecting zero and non-numbers.
///
/// # Errors
///
/// Returns [`CliError::InvalidConfig`] unless `value` is a positive integer.
///
/// # Examples
/// ```
/// use story_bdd_cli::config::parse_file_name_words;
///
/// assert_eq!(parse_file_name_words("3").ok(), Some(3));
/// assert!(parse_file_name_words("0").is_err());
/// ```
pub fn parse_file_name_words(value: &str) -> Result<usize, CliError> {
    match value.trim().parse::<usize>() {
        Ok(words) if words > 0 => Ok(words),
        _ => Err(CliError::InvalidConfig(format!(
            "invalid file name word count '{value}', expected a positive integer"
        ))),
    }
}

fn parse_language(value: &str) -> Result<Language, CliError> {
    value
        .parse()
        .map_err(|err| CliError::InvalidConfig(format!("{LANG_VAR}: {err}")))
}

fn parse_output_dir(value: &str) -> Result<Utf8PathBuf, CliError> {
    if value.trim().is_empty() {
        return Err(CliError::InvalidConfig(format!(
            "{OUTPUT_DIR_VAR} must not be empty"
        )));
    }
    Ok(Utf8PathBuf::from(value))
}

/// Values supplied on the command line that take precedence over the
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// `--log-level`.
    pub log_level: Option<LogLevel>,
    /// `--lang`.
    pub default_language: Option<Language>,
    /// `--file-name-words`.
    pub file_name_words: Option<usize>,
    /// `--output`.
    pub output_dir: Option<Utf8PathBuf>,
}

/// Configuration for one `story-bdd` invocation.
///
/// # Environment Variables
///
/// - `STORY_BDD_LOG_LEVEL`: trace, debug, info, warn, or error
/// - `STORY_BDD_LANG`: language of stories without a directive (`pt`, `en`)
/// - `STORY_BDD_FILE_NAME_WORDS`: words kept in generated file names
/// - `STORY_BDD_OUTPUT_DIR`: root directory for generated files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level.
    pub log_level: LogLevel,
    /// Language of stories without a `# language:` directive.
    pub default_language: Language,
    /// Words kept in generated file names.
    pub file_name_words: usize,
    /// Root directory for generated files.
    pub output_dir: Utf8PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            default_language: Language::default(),
            file_name_words: GeneratorConfig::default().file_name_words,
            output_dir: Utf8PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if a value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let defaults = Self::default();

        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|val| val.parse())
            .transpose()?
            .unwrap_or(defaults.log_level);

        let default_language = lookup(LANG_VAR)
            .map(|val| parse_language(&val))
            .transpose()?
            .unwrap_or(defaults.default_language);

        let file_name_words = lookup(FILE_NAME_WORDS_VAR)
            .map(|val| parse_file_name_words(&val))
            .transpose()?
            .unwrap_or(defaults.file_name_words);

        let output_dir = lookup(OUTPUT_DIR_VAR)
            .map(|val| parse_output_dir(&val))
            .transpose()?
            .unwrap_or(defaults.output_dir);

        Ok(Self {
            log_level,
            default_language,
            file_name_words,
            output_dir,
        })
    }

    /// Apply command line overrides on top of environment-based values.
    #[must_use]
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(language) = overrides.default_language {
            self.default_language = language;
        }
        if let Some(words) = overrides.file_name_words {
            self.file_name_words = words;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Pipeline options derived from this configuration.
    #[must_use]
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            default_language: self.default_language,
            generator: GeneratorConfig {
                file_name_words: self.file_name_words,
            },
        }
    }
}
