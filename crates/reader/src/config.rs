//! Reader configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::output::text::BASE_WIDTH;
use crate::output::Format;

/// Settings for a [`Session`](crate::suite::Session), usually read from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub format: Format,
    pub text_width: usize,
    /// Faults tolerated per suite before it is aborted
    pub fault_threshold: usize,
    pub fixture_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            format: Format::Text,
            text_width: BASE_WIDTH,
            fault_threshold: 3,
            fixture_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl ReaderConfig {
    pub fn from_toml(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let input = fs::read_to_string(path)?;
        Self::from_toml(&input)
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_text_width(mut self, width: usize) -> Self {
        self.text_width = width;
        self
    }

    pub fn with_fault_threshold(mut self, threshold: usize) -> Self {
        self.fault_threshold = threshold;
        self
    }

    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = Some(dir.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}
