//! Exclusive, sequential channel to the card under test

use std::collections::BTreeMap;

use crate::Result;

/// Identifying fields of the device behind a channel (reader name, ATR, ...)
pub type DeviceInfo = BTreeMap<String, String>;

/// A connected card
///
/// Exactly one command is in flight at a time and commands arrive in the
/// order they are transmitted; the card keeps state between them. Failures,
/// including timeouts, must be reported as [`Error::Transport`](crate::Error).
pub trait CardChannel {
    /// Send one encoded command and block for the raw reply
    fn transmit(&mut self, command: &[u8]) -> Result<Vec<u8>>;

    /// Fields identifying the device, copied into reports
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo::new()
    }
}

impl<C: CardChannel + ?Sized> CardChannel for &mut C {
    fn transmit(&mut self, command: &[u8]) -> Result<Vec<u8>> {
        (**self).transmit(command)
    }

    fn device_info(&self) -> DeviceInfo {
        (**self).device_info()
    }
}

impl<C: CardChannel + ?Sized> CardChannel for Box<C> {
    fn transmit(&mut self, command: &[u8]) -> Result<Vec<u8>> {
        (**self).transmit(command)
    }

    fn device_info(&self) -> DeviceInfo {
        (**self).device_info()
    }
}
