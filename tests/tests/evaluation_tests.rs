use ectester_api::{ExpectedValue, FieldKind};
use ectester_reader::command::{Command, INS_ALLOCATE, INS_GENERATE, KEYPAIR_LOCAL};
use ectester_reader::{Test, TestResult};
use ectester_tests::card::{SW_FUNC_NOT_SUPPORTED, SW_KEY_INVALID};
use ectester_tests::SimulatedCard;
use proptest::prelude::*;
use ExpectedValue::*;

fn allocate() -> Command {
    Command::allocate(KEYPAIR_LOCAL, 256, FieldKind::Fp)
}

fn generate(expected: ExpectedValue) -> Test {
    Test::expect(Command::generate(KEYPAIR_LOCAL), expected)
}

#[test]
fn test_truth_table() {
    let cases = [
        (Success, Success, true),
        (Success, Failure, false),
        (Failure, Success, false),
        (Failure, Failure, true),
        (Any, Success, true),
        (Any, Failure, true),
        (Success, Any, false),
        (Failure, Any, false),
        (Any, Any, true),
    ];
    for (expected, actual, ok) in cases {
        let result = TestResult::evaluate(expected, actual, None, None);
        assert_eq!(result.ok(), ok, "{} against {}", expected, actual);
        assert_eq!(result.value(), actual);
    }
}

#[test]
fn test_simple_success_accepted() {
    let mut card = SimulatedCard::new();
    let mut test = Test::expect(allocate(), Success);
    test.evaluate(&mut card).unwrap();

    let result = test.result().unwrap();
    assert!(result.ok());
    assert_eq!(result.value(), Success);
    assert_eq!(card.transmitted().len(), 1);
}

#[test]
fn test_simple_unexpected_success() {
    let mut card = SimulatedCard::new();
    let mut test = Test::expect_with(allocate(), Failure, "refused", "accepted");
    test.evaluate(&mut card).unwrap();

    let result = test.result().unwrap();
    assert!(!result.ok());
    assert_eq!(result.value(), Success);
    assert_eq!(result.cause(), "accepted");
}

#[test]
fn test_greedy_with_expected_rejection() {
    let mut card = SimulatedCard::new().with_status(INS_GENERATE, SW_KEY_INVALID);
    let mut test = Test::greedy_all_try(
        Success,
        "allocate then generate",
        vec![Test::expect(allocate(), Success), generate(Failure)],
    );
    test.evaluate(&mut card).unwrap();

    assert!(test.children().iter().all(Test::ok));
    let result = test.result().unwrap();
    assert!(result.ok());
    assert_eq!(result.value(), Success);
}

#[test]
fn test_all_stops_on_failed_allocation() {
    let mut card = SimulatedCard::new().with_status(INS_ALLOCATE, SW_FUNC_NOT_SUPPORTED);
    let mut test = Test::all(
        Success,
        "fail fast",
        vec![Test::expect(allocate(), Success), generate(Success)],
    );
    test.evaluate(&mut card).unwrap();

    assert!(!test.children()[1].has_run());
    assert!(!test.ok());
    assert_eq!(card.instructions(), vec![INS_ALLOCATE]);
}

#[test]
fn test_transport_failure_leaves_tree_pending() {
    let mut card = SimulatedCard::new().fail_at(1);
    let mut test = Test::greedy_all_try(
        Success,
        "interrupted",
        vec![generate(Success), generate(Success), generate(Success)],
    );
    let err = test.evaluate(&mut card).unwrap_err();

    assert!(err.is_fatal());
    assert!(!test.has_run());
    assert!(test.started());
    assert!(test.children()[0].ok());
    assert!(!test.children()[1].has_run());
    assert!(!test.children()[2].has_run());
}

fn status_words() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(prop_oneof![Just(0x9000u16), Just(SW_KEY_INVALID)], 0..8)
}

fn generates(n: usize) -> Vec<Test> {
    (0..n).map(|_| generate(Success)).collect()
}

proptest! {
    #[test]
    fn all_runs_until_first_failure(sws in status_words()) {
        let mut card = SimulatedCard::new().with_script(INS_GENERATE, &sws);
        let mut test = Test::all(Success, "all", generates(sws.len()));
        test.evaluate(&mut card).unwrap();

        let first_failure = sws.iter().position(|&sw| sw != 0x9000);
        prop_assert_eq!(card.transmitted().len(), first_failure.map_or(sws.len(), |i| i + 1));
        prop_assert_eq!(test.ok(), first_failure.is_none());
    }

    #[test]
    fn greedy_runs_everything(sws in status_words()) {
        let mut card = SimulatedCard::new().with_script(INS_GENERATE, &sws);
        let mut test = Test::greedy_all_try(Success, "greedy", generates(sws.len()));
        test.evaluate(&mut card).unwrap();

        prop_assert_eq!(card.transmitted().len(), sws.len());
        prop_assert_eq!(test.ok(), sws.iter().all(|&sw| sw == 0x9000));
    }

    #[test]
    fn any_needs_one_success(sws in status_words()) {
        let mut card = SimulatedCard::new().with_script(INS_GENERATE, &sws);
        let mut test = Test::any(Success, "any", generates(sws.len()));
        test.evaluate(&mut card).unwrap();

        prop_assert_eq!(card.transmitted().len(), sws.len());
        prop_assert_eq!(test.ok(), sws.iter().any(|&sw| sw == 0x9000));
    }
}
