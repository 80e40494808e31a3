//! Core data model shared by the engine and its collaborators
//!
//! Curves and keys are fixtures: read-only records supplied by a
//! [`FixtureProvider`](crate::traits::FixtureProvider) and turned into command
//! payloads through [`Curve::flatten`] and [`Key::flatten`].

use core::fmt;
use ectester_internal::endian::push_length_prefixed;
use ectester_params::traditional::ec::parameter_count;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Field over which a curve is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Prime field
    Fp,
    /// Binary field
    F2m,
}

impl FieldKind {
    /// Applet key class code (`KeyPair.ALG_EC_FP` / `KeyPair.ALG_EC_F2M`)
    pub fn code(self) -> u8 {
        match self {
            FieldKind::Fp => 0x05,
            FieldKind::F2m => 0x04,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Fp => "ALG_EC_FP",
            FieldKind::F2m => "ALG_EC_F2M",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that `data` carries exactly the parameters named by `mask`, each
/// small enough for a u16 length prefix.
fn check_parameters(context: &'static str, mask: u16, data: &[Vec<u8>]) -> Result<()> {
    let expected = parameter_count(mask);
    if data.len() != expected {
        return Err(Error::InvalidParameter {
            context,
            message: format!(
                "parameter mask {:#06x} names {} parameter(s), {} supplied",
                mask,
                expected,
                data.len()
            ),
        });
    }
    if let Some(param) = data.iter().find(|p| p.len() > u16::MAX as usize) {
        return Err(Error::InvalidLength {
            context,
            expected: u16::MAX as usize,
            actual: param.len(),
        });
    }
    Ok(())
}

fn flatten_parameters(data: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.iter().map(|p| p.len() + 2).sum());
    for param in data {
        // lengths were checked on construction
        let _ = push_length_prefixed(&mut out, param);
    }
    out
}

/// Named elliptic curve domain
#[derive(Clone, PartialEq, Eq)]
pub struct Curve {
    id: String,
    bits: u16,
    field: FieldKind,
    params: u16,
    data: Vec<Vec<u8>>,
    desc: String,
}

impl Curve {
    /// Create a curve; `data` holds the parameters named by `params`, in
    /// mask bit order.
    pub fn new(
        id: impl Into<String>,
        bits: u16,
        field: FieldKind,
        params: u16,
        data: Vec<Vec<u8>>,
        desc: impl Into<String>,
    ) -> Result<Self> {
        check_parameters("curve parameters", params, &data)?;
        Ok(Self {
            id: id.into(),
            bits,
            field,
            params,
            data,
            desc: desc.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    pub fn field(&self) -> FieldKind {
        self.field
    }

    /// Parameter mask
    pub fn params(&self) -> u16 {
        self.params
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Canonical parameter bytes: each parameter prefixed by its u16 length
    pub fn flatten(&self) -> Vec<u8> {
        flatten_parameters(&self.data)
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("id", &self.id)
            .field("bits", &self.bits)
            .field("field", &self.field)
            .field("params", &format_args!("{:#06x}", self.params))
            .finish()
    }
}

/// Key fixture bound to a curve
///
/// Key payloads may carry private scalars, so they are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    id: String,
    curve: String,
    params: u16,
    data: Vec<Vec<u8>>,
    desc: String,
}

impl Key {
    pub fn new(
        id: impl Into<String>,
        curve: impl Into<String>,
        params: u16,
        data: Vec<Vec<u8>>,
        desc: impl Into<String>,
    ) -> Result<Self> {
        check_parameters("key parameters", params, &data)?;
        Ok(Self {
            id: id.into(),
            curve: curve.into(),
            params,
            data,
            desc: desc.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the owning curve
    pub fn curve(&self) -> &str {
        &self.curve
    }

    pub fn params(&self) -> u16 {
        self.params
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn flatten(&self) -> Vec<u8> {
        flatten_parameters(&self.data)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("id", &self.id)
            .field("curve", &self.curve)
            .field("params", &format_args!("{:#06x}", self.params))
            .finish_non_exhaustive()
    }
}

/// Outcome classification of an exchange, and what a test declares it expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ExpectedValue {
    /// The card reported its "ok" status
    Success,
    /// The card reported any other status
    Failure,
    /// Either outcome is acceptable
    Any,
}

impl ExpectedValue {
    /// Whether an actual classification satisfies this expectation
    pub fn accepts(self, actual: ExpectedValue) -> bool {
        match self {
            ExpectedValue::Any => true,
            expected => expected == actual,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExpectedValue::Success => "SUCCESS",
            ExpectedValue::Failure => "FAILURE",
            ExpectedValue::Any => "ANY",
        }
    }
}

impl fmt::Display for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // honour width so report columns line up
        f.pad(self.name())
    }
}
