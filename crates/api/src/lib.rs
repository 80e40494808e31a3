//! Public API types and traits for the ectester crates
//!
//! This crate provides the wire codec for card commands, the fixture data
//! model (curves and keys), the verdict vocabulary, and the traits through
//! which the engine reaches its external collaborators: the card channel and
//! the fixture provider.

pub mod apdu;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use apdu::{CommandApdu, ResponseApdu, SW_OK};
pub use error::{Error, Result, ResultExt};
pub use types::*;

pub use traits::{group_by_prefix, CardChannel, DeviceInfo, FixtureProvider};
