//! Structured YAML report
//!
//! Each suite run becomes one document framed by `---` lines:
//!
//! ```yaml
//! ---
//! testRun:
//!   suite: { name: ..., desc: ... }
//!   device: { ... }
//!   tests: [ ... ]
//! ---
//! ```

use std::collections::BTreeMap;
use std::io::Write;

use ectester_api::ExpectedValue;
use serde::{Deserialize, Serialize};

use super::{SuiteInfo, TestWriter};
use crate::error::Result;
use crate::test::{SimpleTest, Test, TestResult};

const DOCUMENT_MARKER: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "testRun")]
    pub test_run: TestRun,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRun {
    pub suite: SuiteRecord,
    #[serde(default)]
    pub device: BTreeMap<String, String>,
    #[serde(default)]
    pub tests: Vec<TestRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteRecord {
    pub name: String,
    pub desc: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Compound,
}

/// One node of the report tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub desc: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    /// Absent for nodes an error interrupted before they were judged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<TestRecord>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub ok: bool,
    pub value: ExpectedValue,
    pub cause: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    /// Hex encoded payload
    pub data: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Status word as four hex digits
    pub sw: String,
    pub data: String,
    pub time_us: u64,
}

impl From<&TestResult> for ResultRecord {
    fn from(result: &TestResult) -> Self {
        Self {
            ok: result.ok(),
            value: result.value(),
            cause: result.cause().to_string(),
        }
    }
}

fn simple_record(test: &SimpleTest) -> (CommandRecord, Option<ResponseRecord>) {
    let apdu = test.command().apdu();
    let command = CommandRecord {
        cla: apdu.cla(),
        ins: apdu.ins(),
        p1: apdu.p1(),
        p2: apdu.p2(),
        data: hex::encode_upper(apdu.data()),
        desc: test.command().description().to_string(),
    };
    let response = test.response().map(|r| ResponseRecord {
        sw: format!("{:04X}", r.sw()),
        data: hex::encode_upper(r.data()),
        time_us: r.duration().as_micros() as u64,
    });
    (command, response)
}

impl TestRecord {
    /// Snapshot a test tree; compound nodes keep only started children
    pub fn from_test(test: &Test) -> Self {
        let mut record = TestRecord {
            desc: test.description().to_string(),
            kind: None,
            result: test.result().map(ResultRecord::from),
            command: None,
            response: None,
            tests: None,
        };
        match test {
            Test::Simple(simple) => {
                let (command, response) = simple_record(simple);
                record.command = Some(command);
                record.response = response;
            }
            Test::Compound(compound) => {
                record.kind = Some(NodeKind::Compound);
                record.tests = Some(compound.started().map(TestRecord::from_test).collect());
            }
        }
        record
    }
}

/// Parse every report document in a YAML stream written by [`YamlTestWriter`]
pub fn parse_reports(input: &str) -> Result<Vec<Report>> {
    let mut reports = Vec::new();
    let mut document = String::new();
    for line in input.lines() {
        if line == DOCUMENT_MARKER {
            if !document.trim().is_empty() {
                reports.push(serde_yaml::from_str(&document)?);
            }
            document.clear();
        } else {
            document.push_str(line);
            document.push('\n');
        }
    }
    if !document.trim().is_empty() {
        reports.push(serde_yaml::from_str(&document)?);
    }
    Ok(reports)
}

pub struct YamlTestWriter<W: Write> {
    out: W,
    run: Option<TestRun>,
}

impl<W: Write> YamlTestWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, run: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn tests(&mut self) -> Result<&mut Vec<TestRecord>> {
        match self.run.as_mut() {
            Some(run) => Ok(&mut run.tests),
            None => Err(ectester_api::Error::Other {
                context: "YAML report",
                message: "test output before begin".into(),
            }
            .into()),
        }
    }
}

impl<W: Write> TestWriter for YamlTestWriter<W> {
    fn begin(&mut self, suite: &SuiteInfo) -> Result<()> {
        writeln!(self.out, "{}", DOCUMENT_MARKER)?;
        self.run = Some(TestRun {
            suite: SuiteRecord {
                name: suite.name.clone(),
                desc: suite.description.clone(),
            },
            device: suite.device.clone(),
            tests: Vec::new(),
        });
        Ok(())
    }

    fn output_test(&mut self, test: &Test) -> Result<()> {
        if !test.has_run() {
            return Ok(());
        }
        self.tests()?.push(TestRecord::from_test(test));
        Ok(())
    }

    fn output_error(&mut self, test: &Test, _cause: &str) -> Result<()> {
        self.tests()?.push(TestRecord::from_test(test));
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        let Some(test_run) = self.run.take() else {
            return Ok(());
        };
        let document = serde_yaml::to_string(&Report { test_run })?;
        self.out.write_all(document.as_bytes())?;
        writeln!(self.out, "{}", DOCUMENT_MARKER)?;
        self.out.flush()?;
        Ok(())
    }
}
