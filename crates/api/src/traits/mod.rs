//! Traits through which the engine reaches its external collaborators

pub mod channel;
pub mod provider;

pub use channel::{CardChannel, DeviceInfo};
pub use provider::{group_by_prefix, id_prefix, FixtureProvider};
