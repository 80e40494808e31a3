//! Constant values for the ectester crates
//!
//! Domain parameters are plain values handed to whichever component needs
//! them; nothing in this crate holds mutable state.

pub mod traditional;

pub use traditional::ec::{CurveParams, SECP192R1, SECP256R1, STANDARD_CURVES};
