//! Application configuration: an optional TOML file plus environment overrides.
//!
//! ```toml
//! single_bank = "wbt"          # skip subject selection
//!
//! [source]
//! kind = "http"
//! base_url = "http://localhost:8080/"
//!
//! [defaults]
//! question_count = 20          # or "full"
//! timer_enabled = false
//!
//! [[banks]]
//! id = "wbt"
//! name = "Web Technology"
//! source = "extracted_questions-wbt.json"
//! icon = "globe"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use quiz_core::model::{BankConfig, BankId, Settings};

use crate::catalog::BankCatalog;
use crate::error::ConfigError;
use crate::source::{FileQuestionSource, HttpQuestionSource, QuestionSource};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "quizbank.toml";

pub const ENV_SOURCE_URL: &str = "QUIZBANK_SOURCE_URL";
pub const ENV_SOURCE_DIR: &str = "QUIZBANK_SOURCE_DIR";
pub const ENV_BANK: &str = "QUIZBANK_BANK";

/// Where bank payloads are fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Http { base_url: String },
    Dir { root: PathBuf },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Dir {
            root: PathBuf::from("public"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    source: Option<SourceConfig>,
    banks: Vec<BankConfig>,
    single_bank: Option<BankId>,
    defaults: Settings,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub catalog: BankCatalog,
    /// When set, the app opens this bank directly and never shows subject selection.
    pub single_bank: Option<BankId>,
    pub defaults: Settings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            catalog: BankCatalog::builtin(),
            single_bank: None,
            defaults: Settings::default(),
        }
    }
}

impl AppConfig {
    /// Load config from `path`, or from `quizbank.toml` if it exists, then apply
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when an explicit file is missing or any file is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Read` or any parse/validation error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "reading config file");
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` for TOML errors, invalid banks, or a bad source URL.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;
        let catalog = if file.banks.is_empty() {
            BankCatalog::builtin()
        } else {
            BankCatalog::new(file.banks)?
        };
        let config = Self {
            source: file.source.unwrap_or_default(),
            catalog,
            single_bank: file.single_bank,
            defaults: file.defaults,
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply `QUIZBANK_*` overrides through `lookup`. A source URL wins over a directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when an override produces an invalid config.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = non_empty(ENV_SOURCE_DIR) {
            self.source = SourceConfig::Dir {
                root: PathBuf::from(dir),
            };
        }
        if let Some(url) = non_empty(ENV_SOURCE_URL) {
            self.source = SourceConfig::Http { base_url: url };
        }
        if let Some(bank) = non_empty(ENV_BANK) {
            self.single_bank = Some(BankId::new(bank.trim()));
        }
        self.validate()
    }

    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown single bank or unparsable source URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(id) = &self.single_bank {
            self.catalog.require(id)?;
        }
        if let SourceConfig::Http { base_url } = &self.source {
            parse_base_url(base_url)?;
        }
        Ok(())
    }

    /// The bank to open directly, if the app runs in single-bank mode.
    #[must_use]
    pub fn single_bank_config(&self) -> Option<&BankConfig> {
        self.single_bank.as_ref().and_then(|id| self.catalog.get(id))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` for an unparsable HTTP base URL.
    pub fn build_source(&self) -> Result<Arc<dyn QuestionSource>, ConfigError> {
        let source: Arc<dyn QuestionSource> = match &self.source {
            SourceConfig::Http { base_url } => {
                Arc::new(HttpQuestionSource::new(parse_base_url(base_url)?))
            }
            SourceConfig::Dir { root } => Arc::new(FileQuestionSource::new(root.clone())),
        };
        Ok(source)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidUrl {
        raw: raw.to_owned(),
    })
}
