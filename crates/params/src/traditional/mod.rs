//! Constants for elliptic-curve algorithms exercised on the card

pub mod ec;
pub mod ecdh;
