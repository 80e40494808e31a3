//! # ectester
//!
//! Conformance and security testing of elliptic-curve implementations on
//! smart cards.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ectester = "0.3"
//! ```
//!
//! ## Features
//!
//! - `reader` (default): the evaluation engine, shipped suites and report writers
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`ectester-api`]: APDU codec, fixture data model, channel and provider traits
//! - [`ectester-internal`]: byte order helpers
//! - [`ectester-params`]: standard curve domains and applet constants
//! - [`ectester-reader`]: test trees, suites, sessions and report writers

// Core re-exports (always available)
pub use ectester_api as api;
pub use ectester_internal as internal;
pub use ectester_params as params;

// Feature-gated re-exports
#[cfg(feature = "reader")]
pub use ectester_reader as reader;

/// Common imports for ectester users
pub mod prelude {
    pub use crate::api::{
        CardChannel, CommandApdu, Curve, DeviceInfo, ExpectedValue, FieldKind, FixtureProvider,
        Key, ResponseApdu, SW_OK,
    };

    #[cfg(feature = "reader")]
    pub use crate::reader::{
        Command, FixtureStore, Format, ReaderConfig, Session, Test, TestResult, TestSuite,
        TestWriter,
    };
}
