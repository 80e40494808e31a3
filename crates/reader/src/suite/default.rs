//! Baseline run over the standard named curves

use ectester_api::{Curve, ExpectedValue, FixtureProvider};
use ectester_params::traditional::ecdh::{KA_ECDH, TRANSFORMATION_NONE};
use tracing::warn;

use super::{SuiteContext, TestSuite};
use crate::command::{
    Command, CURVE_EXTERNAL, EXPORT_FALSE, KEYPAIR_BOTH, KEYPAIR_LOCAL, KEYPAIR_REMOTE,
};
use crate::error::Result;
use crate::store::BUILTIN_CATEGORY;
use crate::test::Test;

pub const NAME: &str = "default";

#[derive(Debug, Default)]
pub struct DefaultSuite {
    curves: Vec<Curve>,
}

impl DefaultSuite {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TestSuite for DefaultSuite {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "The default suite tests key generation and ECDH with explicitly set parameters of standard curves. All of it is expected to succeed."
    }

    fn setup(&mut self, provider: &dyn FixtureProvider) -> Result<()> {
        self.curves = provider.curves(BUILTIN_CATEGORY)?;
        Ok(())
    }

    fn run_tests(&mut self, ctx: &mut SuiteContext<'_>) -> Result<()> {
        for curve in &self.curves {
            let allocate = ctx.run_test(Test::expect(
                Command::allocate(KEYPAIR_BOTH, curve.bits(), curve.field()),
                ExpectedValue::Success,
            ))?;
            if !allocate.ok() {
                warn!(curve = %curve.id(), "allocation refused, skipping");
                let skipped = ctx.do_test(Test::all(
                    ExpectedValue::Success,
                    format!("No support for {}b {}.", curve.bits(), curve.field()),
                    vec![allocate],
                ));
                ctx.cleanup(skipped)?;
                continue;
            }

            let tests = vec![
                allocate,
                Test::expect(
                    Command::set(KEYPAIR_BOTH, CURVE_EXTERNAL, curve.params(), &curve.flatten()),
                    ExpectedValue::Success,
                ),
                Test::expect(Command::generate(KEYPAIR_BOTH), ExpectedValue::Success),
                Test::expect(
                    Command::ecdh(
                        KEYPAIR_LOCAL,
                        KEYPAIR_REMOTE,
                        EXPORT_FALSE,
                        TRANSFORMATION_NONE,
                        KA_ECDH,
                    ),
                    ExpectedValue::Success,
                ),
            ];
            let tested = ctx.do_test(Test::all(
                ExpectedValue::Success,
                format!("Tests of {}b {} on {}.", curve.bits(), curve.field(), curve.id()),
                tests,
            ));
            ctx.cleanup(tested)?;
        }
        Ok(())
    }
}
