//! In-memory stand-in for a card running the tester applet

use std::collections::{BTreeMap, HashMap, VecDeque};

use ectester_api::{CardChannel, DeviceInfo, Error, Result, SW_OK};
use ectester_reader::command::{INS_ECDH, INS_ECDH_DIRECT};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Status word the applet uses for an unsupported operation
pub const SW_FUNC_NOT_SUPPORTED: u16 = 0x6A81;
/// Status word the applet uses for a rejected key
pub const SW_KEY_INVALID: u16 = 0x6F00;

/// Scripted card
///
/// Each instruction answers with its queued status words first, then with its
/// default, then with `0x9000`. Successful key agreements return 32 random
/// bytes from a seeded generator.
pub struct SimulatedCard {
    defaults: HashMap<u8, u16>,
    scripts: HashMap<u8, VecDeque<u16>>,
    fail_at: Option<usize>,
    truncate_at: Option<usize>,
    transmitted: Vec<Vec<u8>>,
    rng: StdRng,
}

impl Default for SimulatedCard {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedCard {
    pub fn new() -> Self {
        Self {
            defaults: HashMap::new(),
            scripts: HashMap::new(),
            fail_at: None,
            truncate_at: None,
            transmitted: Vec::new(),
            rng: StdRng::seed_from_u64(0x5EC9),
        }
    }

    /// Answer every `ins` command with `sw` unless a script says otherwise
    pub fn with_status(mut self, ins: u8, sw: u16) -> Self {
        self.defaults.insert(ins, sw);
        self
    }

    /// Answer the next `sws.len()` `ins` commands with `sws`, in order
    pub fn with_script(mut self, ins: u8, sws: &[u16]) -> Self {
        self.scripts.entry(ins).or_default().extend(sws);
        self
    }

    /// Fail the transmission with this zero-based index
    pub fn fail_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Reply to the transmission with this index with a single byte
    pub fn truncate_at(mut self, index: usize) -> Self {
        self.truncate_at = Some(index);
        self
    }

    /// Every command received, including failed transmissions
    pub fn transmitted(&self) -> &[Vec<u8>] {
        &self.transmitted
    }

    /// Instruction bytes of everything received, in order
    pub fn instructions(&self) -> Vec<u8> {
        self.transmitted.iter().map(|c| c[1]).collect()
    }

    fn status(&mut self, ins: u8) -> u16 {
        if let Some(sw) = self.scripts.get_mut(&ins).and_then(VecDeque::pop_front) {
            return sw;
        }
        self.defaults.get(&ins).copied().unwrap_or(SW_OK)
    }
}

impl CardChannel for SimulatedCard {
    fn transmit(&mut self, command: &[u8]) -> Result<Vec<u8>> {
        let index = self.transmitted.len();
        self.transmitted.push(command.to_vec());

        if self.fail_at == Some(index) {
            return Err(Error::transport("simulated card", "card removed"));
        }
        if self.truncate_at == Some(index) {
            return Ok(vec![0x90]);
        }
        let ins = *command.get(1).ok_or(Error::InvalidLength {
            context: "simulated card",
            expected: 4,
            actual: command.len(),
        })?;

        let sw = self.status(ins);
        let mut reply = Vec::new();
        if sw == SW_OK && (ins == INS_ECDH || ins == INS_ECDH_DIRECT) {
            let mut secret = [0u8; 32];
            self.rng.fill_bytes(&mut secret);
            reply.extend_from_slice(&secret);
        }
        reply.extend_from_slice(&sw.to_be_bytes());
        Ok(reply)
    }

    fn device_info(&self) -> DeviceInfo {
        BTreeMap::from([
            ("name".to_string(), "simulated card".to_string()),
            ("atr".to_string(), "3BF81300008131FE454A434F5076323431B7".to_string()),
        ])
    }
}
