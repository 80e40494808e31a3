//! Decoded card replies

use std::time::Duration;

use ectester_api::{ExpectedValue, ResponseApdu};

/// Reply to a [`Command`](crate::command::Command), with its round-trip time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    apdu: ResponseApdu,
    duration: Duration,
}

impl Response {
    pub fn new(apdu: ResponseApdu, duration: Duration) -> Self {
        Self { apdu, duration }
    }

    pub fn apdu(&self) -> &ResponseApdu {
        &self.apdu
    }

    pub fn data(&self) -> &[u8] {
        self.apdu.data()
    }

    pub fn sw(&self) -> u16 {
        self.apdu.sw()
    }

    pub fn is_ok(&self) -> bool {
        self.apdu.is_ok()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Outcome of the exchange as seen by test evaluation
    pub fn classify(&self) -> ExpectedValue {
        classify(&self.apdu)
    }
}

/// `SW_OK` is a success; every other status word is a failure
pub fn classify(apdu: &ResponseApdu) -> ExpectedValue {
    if apdu.is_ok() {
        ExpectedValue::Success
    } else {
        ExpectedValue::Failure
    }
}
