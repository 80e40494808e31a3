//! Elliptic curve domain parameters
//!
//! Curves over prime fields from SEC 2 (http://www.secg.org/sec2-v2.pdf), plus
//! the parameter bit mask the applet uses to name which parts of a domain (or a
//! key) a payload carries.

/// Prime field modulus `p`
pub const PARAMETER_FP: u16 = 0x0001;
/// Binary field reduction polynomial
pub const PARAMETER_F2M: u16 = 0x0002;
/// Curve coefficient `a`
pub const PARAMETER_A: u16 = 0x0004;
/// Curve coefficient `b`
pub const PARAMETER_B: u16 = 0x0008;
/// Generator point, ANSI X9.62 uncompressed
pub const PARAMETER_G: u16 = 0x0010;
/// Order of the generator
pub const PARAMETER_R: u16 = 0x0020;
/// Cofactor
pub const PARAMETER_K: u16 = 0x0040;
/// Public point
pub const PARAMETER_W: u16 = 0x0080;
/// Private scalar
pub const PARAMETER_S: u16 = 0x0100;

/// Full domain over a prime field
pub const DOMAIN_FP: u16 =
    PARAMETER_FP | PARAMETER_A | PARAMETER_B | PARAMETER_G | PARAMETER_R | PARAMETER_K;
/// Full domain over a binary field
pub const DOMAIN_F2M: u16 =
    PARAMETER_F2M | PARAMETER_A | PARAMETER_B | PARAMETER_G | PARAMETER_R | PARAMETER_K;

/// All parameter bits in the order payloads are laid out
pub const PARAMETER_ORDER: [u16; 9] = [
    PARAMETER_FP,
    PARAMETER_F2M,
    PARAMETER_A,
    PARAMETER_B,
    PARAMETER_G,
    PARAMETER_R,
    PARAMETER_K,
    PARAMETER_W,
    PARAMETER_S,
];

/// Number of parameters named by `mask`
pub const fn parameter_count(mask: u16) -> usize {
    (mask & 0x01FF).count_ones() as usize
}

/// Domain parameters of a named prime-field curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParams {
    /// SEC 2 name
    pub name: &'static str,
    /// Field size in bits
    pub bits: u16,
    pub p: &'static [u8],
    pub a: &'static [u8],
    pub b: &'static [u8],
    /// Generator x coordinate
    pub gx: &'static [u8],
    /// Generator y coordinate
    pub gy: &'static [u8],
    /// Order of G
    pub r: &'static [u8],
    /// Cofactor of G
    pub k: u16,
}

impl CurveParams {
    /// Generator as an ANSI X9.62 uncompressed point (`04 || x || y`)
    pub fn uncompressed_generator(&self) -> Vec<u8> {
        let mut g = Vec::with_capacity(1 + self.gx.len() + self.gy.len());
        g.push(0x04);
        g.extend_from_slice(self.gx);
        g.extend_from_slice(self.gy);
        g
    }

    /// Domain parameters in [`PARAMETER_ORDER`], matching [`DOMAIN_FP`]
    pub fn domain(&self) -> Vec<Vec<u8>> {
        vec![
            self.p.to_vec(),
            self.a.to_vec(),
            self.b.to_vec(),
            self.uncompressed_generator(),
            self.r.to_vec(),
            self.k.to_be_bytes().to_vec(),
        ]
    }
}

const SECP192R1_P: [u8; 24] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];
const SECP192R1_A: [u8; 24] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFC,
];
const SECP192R1_B: [u8; 24] = [
    0x64, 0x21, 0x05, 0x19, 0xE5, 0x9C, 0x80, 0xE7, 0x0F, 0xA7, 0xE9, 0xAB, 0x72, 0x24, 0x30, 0x49,
    0xFE, 0xB8, 0xDE, 0xEC, 0xC1, 0x46, 0xB9, 0xB1,
];
const SECP192R1_GX: [u8; 24] = [
    0x18, 0x8D, 0xA8, 0x0E, 0xB0, 0x30, 0x90, 0xF6, 0x7C, 0xBF, 0x20, 0xEB, 0x43, 0xA1, 0x88, 0x00,
    0xF4, 0xFF, 0x0A, 0xFD, 0x82, 0xFF, 0x10, 0x12,
];
const SECP192R1_GY: [u8; 24] = [
    0x07, 0x19, 0x2B, 0x95, 0xFF, 0xC8, 0xDA, 0x78, 0x63, 0x10, 0x11, 0xED, 0x6B, 0x24, 0xCD, 0xD5,
    0x73, 0xF9, 0x77, 0xA1, 0x1E, 0x79, 0x48, 0x11,
];
const SECP192R1_R: [u8; 24] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x99, 0xDE, 0xF8, 0x36,
    0x14, 0x6B, 0xC9, 0xB1, 0xB4, 0xD2, 0x28, 0x31,
];

const SECP256R1_P: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];
const SECP256R1_A: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFC,
];
const SECP256R1_B: [u8; 32] = [
    0x5A, 0xC6, 0x35, 0xD8, 0xAA, 0x3A, 0x93, 0xE7, 0xB3, 0xEB, 0xBD, 0x55, 0x76, 0x98, 0x86, 0xBC,
    0x65, 0x1D, 0x06, 0xB0, 0xCC, 0x53, 0xB0, 0xF6, 0x3B, 0xCE, 0x3C, 0x3E, 0x27, 0xD2, 0x60, 0x4B,
];
const SECP256R1_GX: [u8; 32] = [
    0x6B, 0x17, 0xD1, 0xF2, 0xE1, 0x2C, 0x42, 0x47, 0xF8, 0xBC, 0xE6, 0xE5, 0x63, 0xA4, 0x40, 0xF2,
    0x77, 0x03, 0x7D, 0x81, 0x2D, 0xEB, 0x33, 0xA0, 0xF4, 0xA1, 0x39, 0x45, 0xD8, 0x98, 0xC2, 0x96,
];
const SECP256R1_GY: [u8; 32] = [
    0x4F, 0xE3, 0x42, 0xE2, 0xFE, 0x1A, 0x7F, 0x9B, 0x8E, 0xE7, 0xEB, 0x4A, 0x7C, 0x0F, 0x9E, 0x16,
    0x2B, 0xCE, 0x33, 0x57, 0x6B, 0x31, 0x5E, 0xCE, 0xCB, 0xB6, 0x40, 0x68, 0x37, 0xBF, 0x51, 0xF5,
];
const SECP256R1_R: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xBC, 0xE6, 0xFA, 0xAD, 0xA7, 0x17, 0x9E, 0x84, 0xF3, 0xB9, 0xCA, 0xC2, 0xFC, 0x63, 0x25, 0x51,
];

/// secp192r1
pub const SECP192R1: CurveParams = CurveParams {
    name: "secp192r1",
    bits: 192,
    p: &SECP192R1_P,
    a: &SECP192R1_A,
    b: &SECP192R1_B,
    gx: &SECP192R1_GX,
    gy: &SECP192R1_GY,
    r: &SECP192R1_R,
    k: 1,
};

/// secp256r1
pub const SECP256R1: CurveParams = CurveParams {
    name: "secp256r1",
    bits: 256,
    p: &SECP256R1_P,
    a: &SECP256R1_A,
    b: &SECP256R1_B,
    gx: &SECP256R1_GX,
    gy: &SECP256R1_GY,
    r: &SECP256R1_R,
    k: 1,
};

/// Every curve with built-in parameters, smallest first
// TODO: add secp224r1, secp384r1 and secp521r1.
pub const STANDARD_CURVES: [&CurveParams; 2] = [&SECP192R1, &SECP256R1];
