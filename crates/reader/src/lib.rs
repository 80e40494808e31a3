//! Test evaluation engine for elliptic-curve smart card applets
//!
//! Commands are wrapped in [`test::Test`] trees whose nodes carry a declared
//! [`ExpectedValue`](ectester_api::ExpectedValue). Suites evaluate those trees
//! against a [`CardChannel`](ectester_api::CardChannel) and hand the results
//! to a [`output::TestWriter`].

pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod response;
pub mod store;
pub mod suite;
pub mod test;

pub use command::Command;
pub use config::ReaderConfig;
pub use error::{Error, Result};
pub use output::{Format, SuiteInfo, TestWriter, TextTestWriter, YamlTestWriter};
pub use response::Response;
pub use store::FixtureStore;
pub use suite::{suite_by_name, Session, SuiteContext, SuiteOutcome, TestSuite};
pub use test::{CompoundTest, Policy, SimpleTest, Test, TestResult, TestState};
