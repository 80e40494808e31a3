//! Human readable tree report

use std::io::Write;

use super::{SuiteInfo, TestWriter};
use crate::error::Result;
use crate::test::Test;

/// Default total line width before the value column
pub const BASE_WIDTH: usize = 76;

/// Indentation added per tree level; equals the connector width
const INDENT: usize = 6;
/// Width of the tag and glyph in front of every description
const PREFIX: usize = 6;

pub struct TextTestWriter<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> TextTestWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            width: BASE_WIDTH,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn test_string(&self, test: &Test, offset: usize) -> String {
        let tag = match test.result() {
            None => "--  ",
            Some(r) if r.ok() => "OK  ",
            Some(_) => "NOK ",
        };
        let glyph = match test {
            Test::Simple(_) => "━ ",
            Test::Compound(_) => "┳ ",
        };
        let width = self.width.saturating_sub(offset + PREFIX);
        let value = test.result().map_or("PENDING", |r| r.value().name());
        let cause = test.result().map_or("not evaluated", |r| r.cause());

        let mut out = format!(
            "{}{}{:<width$.width$} ┃ {:<9} ┃ ",
            tag,
            glyph,
            test.description(),
            value,
            width = width
        );
        match test {
            Test::Simple(simple) => match simple.response() {
                Some(response) => out.push_str(&format!(
                    "{:04X} ┃ {:>5} ms ┃ {}",
                    response.sw(),
                    response.duration().as_millis(),
                    cause
                )),
                None => out.push_str(cause),
            },
            Test::Compound(compound) => {
                out.push_str(cause);
                let started: Vec<&Test> = compound.started().collect();
                for (i, child) in started.iter().enumerate() {
                    out.push('\n');
                    out.push_str(if i + 1 == started.len() { "    ┗ " } else { "    ┣ " });
                    out.push_str(&self.test_string(child, offset + INDENT));
                }
            }
        }
        out
    }
}

impl<W: Write> TestWriter for TextTestWriter<W> {
    fn begin(&mut self, suite: &SuiteInfo) -> Result<()> {
        writeln!(self.out, "=== Running test suite: {} ===", suite.name)?;
        writeln!(self.out, "=== {}", suite.description)?;
        self.out.flush()?;
        Ok(())
    }

    fn output_test(&mut self, test: &Test) -> Result<()> {
        if !test.has_run() {
            return Ok(());
        }
        let line = self.test_string(test, 0);
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }

    fn output_error(&mut self, test: &Test, cause: &str) -> Result<()> {
        let line = self.test_string(test, 0);
        writeln!(self.out, "{}", line)?;
        writeln!(self.out, "ERROR: {}", cause)?;
        self.out.flush()?;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
