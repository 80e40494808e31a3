//! ECDH over curves of composite order
//!
//! Key agreement with a small-order point on such a curve leaks the private
//! key modulo the point's order, so a card is expected to refuse it.

use ectester_api::{group_by_prefix, Curve, Error as ApiError, ExpectedValue, FixtureProvider, Key};
use ectester_params::traditional::ecdh::{KA_ECDH, TRANSFORMATION_NONE};
use tracing::warn;

use super::{SuiteContext, TestSuite};
use crate::command::{
    Command, CURVE_EXTERNAL, EXPORT_FALSE, KEYPAIR_BOTH, KEYPAIR_LOCAL, KEYPAIR_REMOTE,
};
use crate::error::Result;
use crate::test::Test;

pub const NAME: &str = "composite";

const CATEGORY: &str = "composite";

/// Curve id prefixes of the generator order groups
const SMALL: &str = "small";
const PQ: &str = "pq";
const RG0: &str = "rg0";

#[derive(Debug, Default)]
pub struct CompositeSuite {
    keyed: Vec<(Curve, Vec<Key>)>,
    small: Vec<Curve>,
    pq: Vec<Curve>,
    rg0: Vec<Curve>,
}

impl CompositeSuite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small-order public keys against a card-generated private key
    fn test_keys(&self, ctx: &mut SuiteContext<'_>, curve: &Curve, keys: &[Key]) -> Result<()> {
        let allocate = ctx.run_test(Test::expect(
            Command::allocate(KEYPAIR_LOCAL, curve.bits(), curve.field()),
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
            return Ok(());
        }

        let mut tests = vec![allocate];
        for key in keys {
            let set = Test::expect(
                Command::set(KEYPAIR_LOCAL, CURVE_EXTERNAL, curve.params(), &curve.flatten()),
                ExpectedValue::Any,
            );
            let generate = Test::expect(Command::generate(KEYPAIR_LOCAL), ExpectedValue::Any);
            let ecdh = Test::expect_with(
                Command::ecdh_direct(
                    KEYPAIR_LOCAL,
                    EXPORT_FALSE,
                    TRANSFORMATION_NONE,
                    KA_ECDH,
                    &key.flatten(),
                ),
                ExpectedValue::Failure,
                "Card correctly rejected to do ECDH over a composite order curve.",
                "Card incorrectly does ECDH over a composite order curve, leaks bits of private key.",
            );
            tests.push(Test::greedy_all_try(
                ExpectedValue::Success,
                format!("Composite test of {}, {}", curve.id(), key.desc()),
                vec![set, generate, ecdh],
            ));
        }
        let tested = ctx.do_test(Test::all(
            ExpectedValue::Success,
            format!("Composite test of {}.", curve.id()),
            tests,
        ));
        ctx.cleanup(tested)?;
        Ok(())
    }

    /// Key agreement between two card keypairs on each curve of a group
    fn test_group(
        ctx: &mut SuiteContext<'_>,
        curves: &[Curve],
        name: Option<&str>,
        dh_value: ExpectedValue,
        causes: Option<(&str, &str)>,
    ) -> Result<()> {
        for curve in curves {
            let allocate = Test::expect(
                Command::allocate(KEYPAIR_BOTH, curve.bits(), curve.field()),
                ExpectedValue::Success,
            );
            let set = Test::expect(
                Command::set(KEYPAIR_BOTH, CURVE_EXTERNAL, curve.params(), &curve.flatten()),
                ExpectedValue::Any,
            );
            let generate = Test::expect(Command::generate(KEYPAIR_BOTH), ExpectedValue::Any);
            let command = Command::ecdh(
                KEYPAIR_LOCAL,
                KEYPAIR_REMOTE,
                EXPORT_FALSE,
                TRANSFORMATION_NONE,
                KA_ECDH,
            );
            let ecdh = match causes {
                Some((ok, nok)) => Test::expect_with(command, dh_value, ok, nok),
                None => Test::expect(command, dh_value),
            };

            let description = format!("{} test of {}.", name.unwrap_or(curve.desc()), curve.id());
            let tested = ctx.do_test(Test::greedy_all_try(
                ExpectedValue::Success,
                description,
                vec![allocate, set, generate, ecdh],
            ));
            ctx.cleanup(tested)?;
        }
        Ok(())
    }
}

fn take_group(groups: &mut Vec<(String, Vec<Curve>)>, prefix: &str) -> Result<Vec<Curve>> {
    let index = groups
        .iter()
        .position(|(p, _)| p == prefix)
        .ok_or_else(|| ApiError::missing("curve group", format!("{}/{}", CATEGORY, prefix)))?;
    Ok(groups.remove(index).1)
}

impl TestSuite for CompositeSuite {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "The composite suite runs ECDH over curves with composite order. This should generally fail, as using such a curve is unsafe."
    }

    fn setup(&mut self, provider: &dyn FixtureProvider) -> Result<()> {
        let keys = provider.keys(CATEGORY)?;
        self.keyed = provider.group_by_curve(keys)?;

        let mut groups = group_by_prefix(provider.curves(CATEGORY)?);
        self.small = take_group(&mut groups, SMALL)?;
        self.pq = take_group(&mut groups, PQ)?;
        self.rg0 = take_group(&mut groups, RG0)?;
        Ok(())
    }

    fn run_tests(&mut self, ctx: &mut SuiteContext<'_>) -> Result<()> {
        for (curve, keys) in &self.keyed {
            self.test_keys(ctx, curve, keys)?;
        }

        Self::test_group(
            ctx,
            &self.small,
            Some("Small generator order"),
            ExpectedValue::Failure,
            Some((
                "Card correctly rejected to do ECDH over a small order generator.",
                "Card incorrectly does ECDH over a small order generator.",
            )),
        )?;
        Self::test_group(ctx, &self.pq, None, ExpectedValue::Any, None)?;
        Self::test_group(ctx, &self.rg0, None, ExpectedValue::Any, None)?;
        Ok(())
    }
}
