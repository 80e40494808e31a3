//! Report sinks for evaluated test trees

pub mod text;
pub mod yaml;

pub use text::TextTestWriter;
pub use yaml::YamlTestWriter;

use ectester_api::DeviceInfo;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::test::Test;

/// What a writer learns about a suite run when its document opens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteInfo {
    pub name: String,
    pub description: String,
    pub device: DeviceInfo,
}

impl SuiteInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>, device: DeviceInfo) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            device,
        }
    }
}

/// Append-only consumer of a suite's top-level tests
///
/// Calls arrive as `begin`, any number of `output_test`/`output_error`, then
/// `end`, once per suite run.
pub trait TestWriter {
    fn begin(&mut self, suite: &SuiteInfo) -> Result<()>;

    /// Record an evaluated test; pending tests are ignored
    fn output_test(&mut self, test: &Test) -> Result<()>;

    /// Record a test whose evaluation was cut short, whatever its state
    fn output_error(&mut self, test: &Test, cause: &str) -> Result<()>;

    fn end(&mut self) -> Result<()>;
}

impl<W: TestWriter + ?Sized> TestWriter for Box<W> {
    fn begin(&mut self, suite: &SuiteInfo) -> Result<()> {
        (**self).begin(suite)
    }

    fn output_test(&mut self, test: &Test) -> Result<()> {
        (**self).output_test(test)
    }

    fn output_error(&mut self, test: &Test, cause: &str) -> Result<()> {
        (**self).output_error(test, cause)
    }

    fn end(&mut self) -> Result<()> {
        (**self).end()
    }
}

/// Report format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Yaml,
}
