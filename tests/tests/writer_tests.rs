use ectester_api::ExpectedValue;
use ectester_reader::output::yaml::{parse_reports, NodeKind, TestRecord};
use ectester_reader::suite::{CompositeSuite, DefaultSuite};
use ectester_reader::{Format, ReaderConfig, Session};
use ectester_tests::fixtures::{builtin_store, composite_store};
use ectester_tests::SimulatedCard;

#[test]
fn test_yaml_report_parses_back_to_the_same_tree() {
    let store = composite_store().unwrap();
    let config = ReaderConfig::default().with_format(Format::Yaml);
    let mut card = SimulatedCard::new();
    let mut out = Vec::new();

    let records: Vec<TestRecord> = {
        let writer = Session::writer_for(&config, &mut out);
        let mut session = Session::new(&mut card, writer, &store, config.clone());
        let outcome = session.run(CompositeSuite::new()).unwrap();
        outcome.tests().iter().map(TestRecord::from_test).collect()
    };

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("---\n"));
    let reports = parse_reports(&text).unwrap();
    assert_eq!(reports.len(), 1);

    let run = &reports[0].test_run;
    assert_eq!(run.suite.name, "composite");
    assert_eq!(run.device["name"], "simulated card");
    assert_eq!(run.tests, records);
}

#[test]
fn test_yaml_node_shapes() {
    let store = builtin_store().unwrap();
    let config = ReaderConfig::default().with_format(Format::Yaml);
    let mut out = Vec::new();
    {
        let writer = Session::writer_for(&config, &mut out);
        let mut session = Session::new(SimulatedCard::new(), writer, &store, config.clone());
        session.run(DefaultSuite::new()).unwrap();
    }

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("type: compound"));
    let reports = parse_reports(&text).unwrap();
    let node = &reports[0].test_run.tests[0];

    assert_eq!(node.kind, Some(NodeKind::Compound));
    assert!(node.command.is_none());
    let result = node.result.as_ref().unwrap();
    assert!(result.ok);
    assert_eq!(result.value, ExpectedValue::Success);
    assert_eq!(result.cause, "All sub-tests had the expected result.");

    let children = node.tests.as_ref().unwrap();
    assert_eq!(children.len(), 4);
    let allocate = &children[0];
    assert!(allocate.kind.is_none());
    let command = allocate.command.as_ref().unwrap();
    assert_eq!((command.cla, command.ins, command.p1), (0xB0, 0x5A, 0x03));
    assert_eq!(command.data, "00C005");
    assert_eq!(allocate.response.as_ref().unwrap().sw, "9000");

    // key agreement replies carry the shared secret
    let ecdh = &children[3];
    assert_eq!(ecdh.response.as_ref().unwrap().data.len(), 64);
}

#[test]
fn test_one_document_per_suite_run() {
    let store = composite_store().unwrap();
    let config = ReaderConfig::default().with_format(Format::Yaml);
    let mut out = Vec::new();
    {
        let writer = Session::writer_for(&config, &mut out);
        let mut session = Session::new(SimulatedCard::new(), writer, &store, config.clone());
        session.run(DefaultSuite::new()).unwrap();
        session.run(CompositeSuite::new()).unwrap();
        assert_eq!(session.outcomes().len(), 2);
    }

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().filter(|l| *l == "---").count(), 4);
    let names: Vec<String> = parse_reports(&text)
        .unwrap()
        .into_iter()
        .map(|r| r.test_run.suite.name)
        .collect();
    assert_eq!(names, vec!["default", "composite"]);
}

#[test]
fn test_text_width_is_configurable() {
    let store = builtin_store().unwrap();
    let config = ReaderConfig::default().with_text_width(40);
    let mut out = Vec::new();
    {
        let writer = Session::writer_for(&config, &mut out);
        let mut session = Session::new(SimulatedCard::new(), writer, &store, config.clone());
        session.run(DefaultSuite::new()).unwrap();
    }

    let text = String::from_utf8(out).unwrap();
    let tree: Vec<&str> = text.lines().filter(|l| !l.starts_with("===")).collect();
    assert_eq!(tree.len(), 10);
    for line in tree {
        assert_eq!(line.chars().position(|c| c == '┃'), Some(41), "{}", line);
    }
}
