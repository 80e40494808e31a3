//! Applet commands and their round trip over a card channel
//!
//! Every builder produces an immutable [`Command`]: the encoded APDU plus a
//! human readable description that names the test node built around it.

use std::time::Instant;

use ectester_api::{CardChannel, CommandApdu, FieldKind, ResponseApdu, Result, ResultExt};
use ectester_internal::endian::push_u16_be;
use ectester_params::traditional::ecdh::ka_name;
use tracing::debug;

use crate::response::Response;

/// Class byte of the tester applet
pub const CLA_ECTESTERAPPLET: u8 = 0xB0;

pub const INS_ALLOCATE: u8 = 0x5A;
pub const INS_SET: u8 = 0x5C;
pub const INS_GENERATE: u8 = 0x5E;
pub const INS_ECDH: u8 = 0x70;
pub const INS_ECDH_DIRECT: u8 = 0x71;
pub const INS_CLEANUP: u8 = 0x03;

pub const KEYPAIR_LOCAL: u8 = 0x01;
pub const KEYPAIR_REMOTE: u8 = 0x02;
pub const KEYPAIR_BOTH: u8 = KEYPAIR_LOCAL | KEYPAIR_REMOTE;

/// Use the card's default domain parameters
pub const CURVE_DEFAULT: u8 = 0x01;
/// Use the parameters carried in the command data
pub const CURVE_EXTERNAL: u8 = 0xFF;

pub const EXPORT_FALSE: u8 = 0x00;
pub const EXPORT_TRUE: u8 = 0xFF;

fn keypair_name(keypair: u8) -> &'static str {
    match keypair {
        KEYPAIR_LOCAL => "KeyPair_LOCAL",
        KEYPAIR_REMOTE => "KeyPair_REMOTE",
        KEYPAIR_BOTH => "KeyPair_BOTH",
        _ => "KeyPair_?",
    }
}

/// A request to the applet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    apdu: CommandApdu,
    description: String,
}

impl Command {
    /// Wrap an arbitrary APDU
    pub fn new(apdu: CommandApdu, description: impl Into<String>) -> Self {
        Self {
            apdu,
            description: description.into(),
        }
    }

    /// Allocate `keypair` for keys of `bits` over `field`
    pub fn allocate(keypair: u8, bits: u16, field: FieldKind) -> Self {
        let mut data = Vec::with_capacity(3);
        push_u16_be(&mut data, bits);
        data.push(field.code());
        Self::new(
            CommandApdu::new(CLA_ECTESTERAPPLET, INS_ALLOCATE, keypair, 0x00, &data, 0),
            format!("Allocate {} {}b {}", keypair_name(keypair), bits, field),
        )
    }

    /// Set domain parameters on `keypair`
    ///
    /// `external` holds flattened parameters and is only sent with
    /// [`CURVE_EXTERNAL`].
    pub fn set(keypair: u8, curve: u8, params: u16, external: &[u8]) -> Self {
        let mut data = Vec::with_capacity(2 + external.len());
        push_u16_be(&mut data, params);
        if curve == CURVE_EXTERNAL {
            data.extend_from_slice(external);
        }
        let source = match curve {
            CURVE_DEFAULT => "default",
            CURVE_EXTERNAL => "external",
            _ => "named",
        };
        Self::new(
            CommandApdu::new(CLA_ECTESTERAPPLET, INS_SET, keypair, curve, &data, 0),
            format!("Set {} {} parameters", keypair_name(keypair), source),
        )
    }

    pub fn generate(keypair: u8) -> Self {
        Self::new(
            CommandApdu::new(CLA_ECTESTERAPPLET, INS_GENERATE, keypair, 0x00, &[], 0),
            format!("Generate {}", keypair_name(keypair)),
        )
    }

    /// Key agreement between two on-card keypairs
    pub fn ecdh(pubkp: u8, privkp: u8, export: u8, transformation: u16, ka: u8) -> Self {
        let mut data = Vec::with_capacity(4);
        data.push(export);
        push_u16_be(&mut data, transformation);
        data.push(ka);
        Self::new(
            CommandApdu::new(CLA_ECTESTERAPPLET, INS_ECDH, pubkp, privkp, &data, 0),
            format!(
                "{} of {}, {}",
                ka_name(ka),
                keypair_name(pubkp),
                keypair_name(privkp)
            ),
        )
    }

    /// Key agreement of an on-card private key with a supplied public key
    ///
    /// `pubkey` is the key in its flattened form ([`ectester_api::Key::flatten`]):
    /// each parameter prefixed by its big-endian u16 length, which is the
    /// layout the applet parses after the KA type.
    pub fn ecdh_direct(privkp: u8, export: u8, transformation: u16, ka: u8, pubkey: &[u8]) -> Self {
        let mut data = Vec::with_capacity(3 + pubkey.len());
        push_u16_be(&mut data, transformation);
        data.push(ka);
        data.extend_from_slice(pubkey);
        Self::new(
            CommandApdu::new(CLA_ECTESTERAPPLET, INS_ECDH_DIRECT, privkp, export, &data, 0),
            format!("{} of {} and supplied point", ka_name(ka), keypair_name(privkp)),
        )
    }

    /// Release everything the applet allocated
    pub fn cleanup() -> Self {
        Self::new(
            CommandApdu::new(CLA_ECTESTERAPPLET, INS_CLEANUP, 0x00, 0x00, &[], 0),
            "Request JCSystem object deletion",
        )
    }

    pub fn apdu(&self) -> &CommandApdu {
        &self.apdu
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Perform one exchange with the card
    ///
    /// An encoding failure is reported before anything is transmitted. Channel
    /// failures and replies without a status word are fatal
    /// (see [`ectester_api::Error::is_fatal`]).
    pub fn send(&self, channel: &mut dyn CardChannel) -> Result<Response> {
        let encoded = self.apdu.encode().with_context("command encoding")?;
        debug!(
            ins = format_args!("{:02X}", self.apdu.ins()),
            len = encoded.len(),
            "transmitting {}",
            self.description
        );

        let start = Instant::now();
        let raw = channel.transmit(&encoded)?;
        let elapsed = start.elapsed();

        let apdu = ResponseApdu::decode(&raw)?;
        debug!(
            sw = format_args!("{:04X}", apdu.sw()),
            elapsed_us = elapsed.as_micros() as u64,
            "response received"
        );
        Ok(Response::new(apdu, elapsed))
    }
}
