//! Internal utilities shared by the ectester crates
//!
//! Nothing in here is part of the stable API surface.

pub mod endian;

pub use endian::*;
