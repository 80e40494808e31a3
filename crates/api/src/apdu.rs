//! Command and response APDU codec
//!
//! Commands are laid out as `CLA INS P1 P2 [Lc data] [Le]` (ISO 7816-4 cases
//! 1 to 4). The short form is used whenever the payload fits in 255 bytes and
//! at most 256 response bytes are expected; the extended form otherwise.
//! Responses are `data SW1 SW2`.

use crate::error::{Error, Result};
use ectester_internal::endian::{push_u16_be, split_trailing_u16};

/// The single status word that means "operation succeeded"
pub const SW_OK: u16 = 0x9000;

/// Largest payload the extended form can carry
pub const MAX_EXTENDED_DATA: usize = u16::MAX as usize;

const MAX_SHORT_DATA: usize = 255;
const MAX_SHORT_LE: u16 = 256;

/// An immutable command descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandApdu {
    cla: u8,
    ins: u8,
    p1: u8,
    p2: u8,
    data: Vec<u8>,
    le: u16,
}

impl CommandApdu {
    /// Create a command; `data` is copied. An `le` of zero omits the field.
    pub fn new(cla: u8, ins: u8, p1: u8, p2: u8, data: &[u8], le: u16) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: data.to_vec(),
            le,
        }
    }

    pub fn cla(&self) -> u8 {
        self.cla
    }

    pub fn ins(&self) -> u8 {
        self.ins
    }

    pub fn p1(&self) -> u8 {
        self.p1
    }

    pub fn p2(&self) -> u8 {
        self.p2
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Expected response length, zero when none is requested
    pub fn le(&self) -> u16 {
        self.le
    }

    /// Whether [`encode`](Self::encode) uses the extended length form
    pub fn is_extended(&self) -> bool {
        self.data.len() > MAX_SHORT_DATA || self.le > MAX_SHORT_LE
    }

    /// Canonical byte encoding
    ///
    /// Fails with [`Error::InvalidLength`] when the payload exceeds what the
    /// extended form can describe.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let lc = self.data.len();
        if lc > MAX_EXTENDED_DATA {
            return Err(Error::InvalidLength {
                context: "command data",
                expected: MAX_EXTENDED_DATA,
                actual: lc,
            });
        }
        let extended = self.is_extended();

        let mut out = Vec::with_capacity(4 + 3 + lc + 3);
        out.extend_from_slice(&[self.cla, self.ins, self.p1, self.p2]);

        if lc > 0 {
            if extended {
                out.push(0x00);
                push_u16_be(&mut out, lc as u16);
            } else {
                out.push(lc as u8);
            }
            out.extend_from_slice(&self.data);
        }

        if self.le > 0 {
            if !extended {
                // 256 wraps to 0x00
                out.push(self.le as u8);
            } else {
                if lc == 0 {
                    out.push(0x00);
                }
                push_u16_be(&mut out, self.le);
            }
        }

        Ok(out)
    }
}

/// Payload plus status word, as received from the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseApdu {
    data: Vec<u8>,
    sw: u16,
}

impl ResponseApdu {
    pub fn new(data: Vec<u8>, sw: u16) -> Self {
        Self { data, sw }
    }

    /// Decode a raw reply
    ///
    /// Anything shorter than a status word is a [`Error::MalformedResponse`],
    /// which callers treat as a broken channel.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let (data, sw) = split_trailing_u16(raw).ok_or(Error::MalformedResponse {
            context: "response decoding",
            length: raw.len(),
        })?;
        Ok(Self {
            data: data.to_vec(),
            sw,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn sw(&self) -> u16 {
        self.sw
    }

    pub fn sw1(&self) -> u8 {
        (self.sw >> 8) as u8
    }

    pub fn sw2(&self) -> u8 {
        self.sw as u8
    }

    /// Whether the card reported [`SW_OK`]
    pub fn is_ok(&self) -> bool {
        self.sw == SW_OK
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        push_u16_be(&mut out, self.sw);
        out
    }
}
