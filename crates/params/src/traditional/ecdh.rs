//! Constants for Elliptic Curve Diffie-Hellman on the card

/// `KeyAgreement.ALG_EC_SVDP_DH`: plain x-coordinate of the shared point
pub const KA_ECDH: u8 = 0x01;

/// `KeyAgreement.ALG_EC_SVDP_DHC`: cofactor-multiplied variant
pub const KA_ECDHC: u8 = 0x02;

/// Public key handed to the card as-is
pub const TRANSFORMATION_NONE: u16 = 0x0000;

/// Human readable name of a key agreement type
pub fn ka_name(ka: u8) -> &'static str {
    match ka {
        KA_ECDH => "ALG_EC_SVDP_DH",
        KA_ECDHC => "ALG_EC_SVDP_DHC",
        _ => "unknown",
    }
}
