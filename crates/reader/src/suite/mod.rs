//! Test suites and the session that runs them
//!
//! A suite looks up its fixtures in [`TestSuite::setup`], before the card is
//! touched, and then builds and evaluates its test trees through a
//! [`SuiteContext`] in [`TestSuite::run_tests`]. A [`Session`] ties a suite
//! run to a channel, a writer and a fixture provider.

pub mod composite;
pub mod default;

pub use composite::CompositeSuite;
pub use default::DefaultSuite;

use std::collections::BTreeMap;
use std::io::Write;

use ectester_api::{CardChannel, FixtureProvider};
use once_cell::sync::Lazy;
use tracing::{error, info, warn};

use crate::command::Command;
use crate::config::ReaderConfig;
use crate::error::{Error, Result};
use crate::output::{Format, SuiteInfo, TestWriter, TextTestWriter, YamlTestWriter};
use crate::response::Response;
use crate::test::Test;

pub trait TestSuite {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Resolve fixtures; must not talk to the card
    fn setup(&mut self, provider: &dyn FixtureProvider) -> Result<()>;

    /// Build and evaluate every test tree, in order
    fn run_tests(&mut self, ctx: &mut SuiteContext<'_>) -> Result<()>;
}

impl<S: TestSuite + ?Sized> TestSuite for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn setup(&mut self, provider: &dyn FixtureProvider) -> Result<()> {
        (**self).setup(provider)
    }

    fn run_tests(&mut self, ctx: &mut SuiteContext<'_>) -> Result<()> {
        (**self).run_tests(ctx)
    }
}

/// Constructor of a registered suite
pub type SuiteFactory = fn() -> Box<dyn TestSuite>;

fn default_suite() -> Box<dyn TestSuite> {
    Box::new(DefaultSuite::new())
}

fn composite_suite() -> Box<dyn TestSuite> {
    Box::new(CompositeSuite::new())
}

static SUITES: Lazy<BTreeMap<&'static str, SuiteFactory>> = Lazy::new(|| {
    let mut m = BTreeMap::<&'static str, SuiteFactory>::new();
    m.insert(default::NAME, default_suite);
    m.insert(composite::NAME, composite_suite);
    m
});

/// Look up a shipped suite by name
pub fn suite_by_name(name: &str) -> Option<Box<dyn TestSuite>> {
    SUITES.get(name).map(|factory| factory())
}

/// Names of the shipped suites, sorted
pub fn suite_names() -> impl Iterator<Item = &'static str> {
    SUITES.keys().copied()
}

/// Evaluation state of one suite run
///
/// Owns the ordered list of top-level tests and counts faults against the
/// configured threshold.
pub struct SuiteContext<'a> {
    channel: &'a mut dyn CardChannel,
    writer: &'a mut dyn TestWriter,
    fault_threshold: usize,
    faults: usize,
    tests: Vec<Test>,
}

impl<'a> SuiteContext<'a> {
    pub fn new(
        channel: &'a mut dyn CardChannel,
        writer: &'a mut dyn TestWriter,
        fault_threshold: usize,
    ) -> Self {
        Self {
            channel,
            writer,
            fault_threshold,
            faults: 0,
            tests: Vec::new(),
        }
    }

    /// Evaluate a test without reporting it, handing it back for adoption
    /// into a larger tree
    ///
    /// Its faults count once the tree it ends up in goes through
    /// [`SuiteContext::do_test`].
    pub fn run_test(&mut self, mut test: Test) -> Result<Test> {
        if let Err(e) = test.evaluate(&mut *self.channel) {
            self.report_interrupted(&test, &e);
            return Err(e);
        }
        Ok(test)
    }

    /// Evaluate a top-level test and report it; returns whether it was ok
    pub fn do_test(&mut self, mut test: Test) -> Result<bool> {
        if let Err(e) = test.evaluate(&mut *self.channel) {
            self.report_interrupted(&test, &e);
            self.tests.push(test);
            return Err(e);
        }

        let faults = test.faults();
        if faults > 0 {
            self.writer
                .output_error(&test, &format!("{} evaluation fault(s)", faults))?;
        } else {
            self.writer.output_test(&test)?;
        }
        let ok = test.ok();
        self.tests.push(test);
        self.count_faults_n(faults)?;
        Ok(ok)
    }

    /// Release what the applet allocated for a configuration, then hand
    /// `outcome` back
    ///
    /// Skipped only when the card is unreachable. A cleanup failure takes
    /// precedence over `outcome`.
    pub fn cleanup<T>(&mut self, outcome: Result<T>) -> Result<T> {
        if matches!(&outcome, Err(Error::Api(e)) if e.is_fatal()) {
            return outcome;
        }
        self.send(&Command::cleanup())?;
        outcome
    }

    /// Send a command outside of any test tree
    pub fn send(&mut self, command: &Command) -> Result<Response> {
        let response = command.send(&mut *self.channel)?;
        if !response.is_ok() {
            warn!(
                sw = format_args!("{:04X}", response.sw()),
                "{} was refused",
                command.description()
            );
        }
        Ok(response)
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn faults(&self) -> usize {
        self.faults
    }

    pub fn into_tests(self) -> Vec<Test> {
        self.tests
    }

    /// Report a partially evaluated tree; the evaluation error wins over a
    /// failing writer
    fn report_interrupted(&mut self, test: &Test, cause: &Error) {
        if let Err(e) = self.writer.output_error(test, &cause.to_string()) {
            error!("could not report interrupted test: {}", e);
        }
    }

    fn count_faults_n(&mut self, faults: usize) -> Result<()> {
        self.faults += faults;
        if self.faults > self.fault_threshold {
            return Err(Error::FaultThreshold {
                faults: self.faults,
                threshold: self.fault_threshold,
            });
        }
        Ok(())
    }
}

/// Summary of one suite run
#[derive(Debug)]
pub struct SuiteOutcome {
    name: String,
    tests: Vec<Test>,
    error: Option<String>,
}

impl SuiteOutcome {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level tests in the order they ran
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    /// The error that stopped the suite, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn aborted(&self) -> bool {
        self.error.is_some()
    }

    /// Every top-level test ran ok without faults
    pub fn ok(&self) -> bool {
        !self.aborted() && self.tests.iter().all(|t| t.ok() && t.faults() == 0)
    }
}

/// Runs suites against one card, reporting to one writer
pub struct Session<'a> {
    channel: Box<dyn CardChannel + 'a>,
    writer: Box<dyn TestWriter + 'a>,
    provider: Box<dyn FixtureProvider + 'a>,
    config: ReaderConfig,
    outcomes: Vec<SuiteOutcome>,
}

impl<'a> Session<'a> {
    pub fn new(
        channel: impl CardChannel + 'a,
        writer: impl TestWriter + 'a,
        provider: impl FixtureProvider + 'a,
        config: ReaderConfig,
    ) -> Self {
        Self {
            channel: Box::new(channel),
            writer: Box::new(writer),
            provider: Box::new(provider),
            config,
            outcomes: Vec::new(),
        }
    }

    /// The sink selected by `config`, writing to `out`
    pub fn writer_for<W: Write + 'a>(config: &ReaderConfig, out: W) -> Box<dyn TestWriter + 'a> {
        match config.format {
            Format::Text => Box::new(TextTestWriter::new(out).with_width(config.text_width)),
            Format::Yaml => Box::new(YamlTestWriter::new(out)),
        }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Run a suite to completion
    ///
    /// Setup failures are returned before the writer is opened. Once the
    /// writer is open it is always closed, also when the suite aborts.
    pub fn run(&mut self, mut suite: impl TestSuite) -> Result<&SuiteOutcome> {
        let name = suite.name().to_string();

        if let Err(e) = suite.setup(self.provider.as_ref()) {
            warn!(suite = %name, "setup failed: {}", e);
            self.outcomes.push(SuiteOutcome {
                name,
                tests: Vec::new(),
                error: Some(e.to_string()),
            });
            return Err(e);
        }

        let info = SuiteInfo::new(&name, suite.description(), self.channel.device_info());
        info!(suite = %name, "Running test suite");
        self.writer.begin(&info)?;

        let mut ctx = SuiteContext::new(
            self.channel.as_mut(),
            self.writer.as_mut(),
            self.config.fault_threshold,
        );
        let run = suite.run_tests(&mut ctx);
        let tests = ctx.into_tests();
        let ended = self.writer.end();

        match run {
            Ok(()) => {
                let passed = tests.iter().filter(|t| t.ok()).count();
                info!(suite = %name, passed, total = tests.len(), "Test suite finished");
                self.outcomes.push(SuiteOutcome {
                    name,
                    tests,
                    error: None,
                });
                ended?;
            }
            Err(e) => {
                error!(suite = %name, "test suite aborted: {}", e);
                self.outcomes.push(SuiteOutcome {
                    name,
                    tests,
                    error: Some(e.to_string()),
                });
                ended?;
                return Err(e);
            }
        }
        Ok(&self.outcomes[self.outcomes.len() - 1])
    }

    pub fn outcomes(&self) -> &[SuiteOutcome] {
        &self.outcomes
    }

    /// 0 when everything passed, 1 when some test did not, 2 when a suite
    /// was aborted
    pub fn exit_code(&self) -> i32 {
        if self.outcomes.iter().any(SuiteOutcome::aborted) {
            2
        } else if self.outcomes.iter().all(SuiteOutcome::ok) {
            0
        } else {
            1
        }
    }
}
