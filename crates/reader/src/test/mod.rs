//! Evaluatable test trees
//!
//! A [`Test`] is either a single card exchange ([`SimpleTest`]) or a
//! combinator over ordered children ([`CompoundTest`]). Every node moves from
//! [`TestState::Pending`] to [`TestState::Evaluated`] exactly once; evaluating
//! an evaluated node does nothing, so a precondition can be run on its own
//! and later adopted into a larger tree.


pub use compound::{CompoundTest, Policy};
pub use result::TestResult;
pub use simple::SimpleTest;

use ectester_api::{CardChannel, ExpectedValue};

use crate::command::Command;
use crate::error::Result;

/// Lifecycle of a test node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TestState {
    #[default]
    Pending,
    Evaluated(TestResult),
}

impl TestState {
    pub fn has_run(&self) -> bool {
        matches!(self, TestState::Evaluated(_))
    }

    pub fn result(&self) -> Option<&TestResult> {
        match self {
            TestState::Pending => None,
            TestState::Evaluated(result) => Some(result),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Test {
    Simple(SimpleTest),
    Compound(CompoundTest),
}

impl Test {
    /// A single exchange expected to classify as `expected`
    pub fn expect(command: Command, expected: ExpectedValue) -> Self {
        Test::Simple(SimpleTest::new(command, expected))
    }

    /// A single exchange with explicit ok and nok causes
    pub fn expect_with(
        command: Command,
        expected: ExpectedValue,
        ok_cause: impl Into<String>,
        nok_cause: impl Into<String>,
    ) -> Self {
        Test::Simple(SimpleTest::new(command, expected).with_causes(ok_cause, nok_cause))
    }

    pub fn all(expected: ExpectedValue, description: impl Into<String>, children: Vec<Test>) -> Self {
        Test::Compound(CompoundTest::all(expected, description, children))
    }

    pub fn any(expected: ExpectedValue, description: impl Into<String>, children: Vec<Test>) -> Self {
        Test::Compound(CompoundTest::any(expected, description, children))
    }

    pub fn greedy_all_try(
        expected: ExpectedValue,
        description: impl Into<String>,
        children: Vec<Test>,
    ) -> Self {
        Test::Compound(CompoundTest::greedy_all_try(expected, description, children))
    }

    pub fn description(&self) -> &str {
        match self {
            Test::Simple(t) => t.description(),
            Test::Compound(t) => t.description(),
        }
    }

    pub fn expected(&self) -> ExpectedValue {
        match self {
            Test::Simple(t) => t.expected(),
            Test::Compound(t) => t.expected(),
        }
    }

    pub fn state(&self) -> &TestState {
        match self {
            Test::Simple(t) => t.state(),
            Test::Compound(t) => t.state(),
        }
    }

    pub fn has_run(&self) -> bool {
        self.state().has_run()
    }

    pub fn result(&self) -> Option<&TestResult> {
        self.state().result()
    }

    /// Whether the node was evaluated and met its expectation
    pub fn ok(&self) -> bool {
        self.result().is_some_and(TestResult::ok)
    }

    /// Whether evaluation reached this node
    ///
    /// A compound interrupted by a fatal error is still pending but counts as
    /// started once any of its children did.
    pub fn started(&self) -> bool {
        match self {
            Test::Simple(t) => t.state().has_run(),
            Test::Compound(t) => t.state().has_run() || t.children().iter().any(Test::started),
        }
    }

    pub fn children(&self) -> &[Test] {
        match self {
            Test::Simple(_) => &[],
            Test::Compound(t) => t.children(),
        }
    }

    /// Number of faulted leaves in this subtree
    pub fn faults(&self) -> usize {
        match self {
            Test::Simple(t) => usize::from(t.fault().is_some()),
            Test::Compound(t) => t.children().iter().map(Test::faults).sum(),
        }
    }

    pub fn evaluate(&mut self, channel: &mut dyn CardChannel) -> Result<()> {
        match self {
            Test::Simple(t) => t.evaluate(channel),
            Test::Compound(t) => t.evaluate(channel),
        }
    }
}

impl From<SimpleTest> for Test {
    fn from(test: SimpleTest) -> Self {
        Test::Simple(test)
    }
}

impl From<CompoundTest> for Test {
    fn from(test: CompoundTest) -> Self {
        Test::Compound(test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, KEYPAIR_LOCAL};
    use ectester_api::{FieldKind, Result as ApiResult};
    use ExpectedValue::*;

    /// Replies with the scripted status words in order, 0x9000 once exhausted
    struct Script {
        sws: Vec<u16>,
        sent: usize,
    }

    impl Script {
        fn new(sws: &[u16]) -> Self {
            Self {
                sws: sws.to_vec(),
                sent: 0,
            }
        }
    }

    impl CardChannel for Script {
        fn transmit(&mut self, _command: &[u8]) -> ApiResult<Vec<u8>> {
            let sw = self.sws.get(self.sent).copied().unwrap_or(0x9000);
            self.sent += 1;
            Ok(sw.to_be_bytes().to_vec())
        }
    }

    fn step(expected: ExpectedValue) -> Test {
        Test::expect(Command::generate(KEYPAIR_LOCAL), expected)
    }

    #[test]
    fn test_all_stops_at_first_failure() {
        let mut channel = Script::new(&[0x9000, 0x6A80, 0x9000]);
        let mut test = Test::all(Success, "all", vec![step(Success), step(Success), step(Success)]);
        test.evaluate(&mut channel).unwrap();

        assert_eq!(channel.sent, 2);
        assert!(!test.ok());
        assert_eq!(test.result().unwrap().value(), Failure);
        assert!(!test.children()[2].has_run());
    }

    #[test]
    fn test_greedy_runs_everything() {
        let mut channel = Script::new(&[0x6A80, 0x9000, 0x9000]);
        let mut test = Test::greedy_all_try(
            Success,
            "greedy",
            vec![step(Success), step(Success), step(Success)],
        );
        test.evaluate(&mut channel).unwrap();

        assert_eq!(channel.sent, 3);
        assert!(test.children().iter().all(Test::has_run));
        assert!(!test.ok());
    }

    #[test]
    fn test_any_needs_one() {
        let mut channel = Script::new(&[0x6A80, 0x9000, 0x6A80]);
        let mut test = Test::any(Success, "any", vec![step(Success), step(Success), step(Success)]);
        test.evaluate(&mut channel).unwrap();
        assert_eq!(channel.sent, 3);
        assert!(test.ok());
        assert_eq!(test.result().unwrap().cause(), "Some sub-tests had the expected result.");

        let mut channel = Script::new(&[0x6A80, 0x6A80]);
        let mut test = Test::any(Success, "any", vec![step(Success), step(Success)]);
        test.evaluate(&mut channel).unwrap();
        assert!(!test.ok());
    }

    #[test]
    fn test_empty_compounds() {
        let mut channel = Script::new(&[]);
        let mut all = Test::all(Success, "", Vec::new());
        let mut greedy = Test::greedy_all_try(Success, "", Vec::new());
        let mut any = Test::any(Success, "", Vec::new());
        all.evaluate(&mut channel).unwrap();
        greedy.evaluate(&mut channel).unwrap();
        any.evaluate(&mut channel).unwrap();

        assert!(all.ok());
        assert!(greedy.ok());
        assert!(!any.ok());
        assert_eq!(channel.sent, 0);
    }

    #[test]
    fn test_declared_failure_inverts_aggregate() {
        let mut channel = Script::new(&[0x6A80]);
        let mut test = Test::all(Failure, "expect failure", vec![step(Success)]);
        test.evaluate(&mut channel).unwrap();
        let result = test.result().unwrap();
        assert_eq!(result.value(), Failure);
        assert!(result.ok());
    }

    #[test]
    fn test_evaluated_precondition_is_not_resent() {
        let mut channel = Script::new(&[0x9000]);
        let mut pre = Test::expect(Command::allocate(KEYPAIR_LOCAL, 256, FieldKind::Fp), Success);
        pre.evaluate(&mut channel).unwrap();
        assert!(pre.ok());

        let mut tree = Test::all(Success, "adopted", vec![pre, step(Success)]);
        tree.evaluate(&mut channel).unwrap();
        assert_eq!(channel.sent, 2);
        assert!(tree.ok());

        tree.evaluate(&mut channel).unwrap();
        assert_eq!(channel.sent, 2);
    }

    #[test]
    fn test_fault_is_recorded_not_raised() {
        let mut channel = Script::new(&[]);
        let point = vec![0x04; 70_000];
        let mut test = Test::greedy_all_try(
            Failure,
            "faulty",
            vec![
                Test::expect(
                    Command::ecdh_direct(KEYPAIR_LOCAL, 0x00, 0x0000, 0x01, &point),
                    Failure,
                ),
                step(Success),
            ],
        );
        test.evaluate(&mut channel).unwrap();

        assert_eq!(test.faults(), 1);
        assert_eq!(channel.sent, 1);
        let leaf = test.children()[0].result().unwrap();
        assert!(!leaf.ok());
        assert_eq!(leaf.value(), Failure);
        assert!(leaf.cause().contains("invalid length"));
    }
}
