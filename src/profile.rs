//! Standard code profiles for the six-bit transmission scheme.
//!
//! Both profiles carry 12 data symbols over GF(64) built from the same
//! field polynomial; they differ in parity count, first root, and the
//! virtual padding that shortens the side-channel codeword to 20 symbols.
//! Each profile is built once behind a `OnceLock` and shared read-only.

use std::sync::OnceLock;

use crate::codec::CodeProfile;

/// Symbol width in bits (GF(64) symbols).
pub const SYMBOL_BITS: u32 = 6;

/// Field generator polynomial: x^6 + x + 1.
pub const FIELD_POLY: u32 = 0x43;

/// Primary profile: exponent of the first generator root (alpha^3).
pub const PRIMARY_FCR: usize = 3;

/// Primary profile: parity symbols (codeword 63 = 12 data + 51 parity).
pub const PRIMARY_NROOTS: usize = 51;

/// Side-channel profile: exponent of the first generator root (alpha^1).
pub const SIDE_CHANNEL_FCR: usize = 1;

/// Side-channel profile: parity symbols (codeword 20 = 12 data + 8 parity).
pub const SIDE_CHANNEL_NROOTS: usize = 8;

/// Side-channel profile: virtually padded positions of the full-length
/// 63-symbol codeword, realizing the shortened 20-symbol code.
pub const SIDE_CHANNEL_PAD: usize = 43;

/// Primitive-element step between consecutive roots (both profiles).
pub const ROOT_STEP: usize = 1;

/// The primary (63,12) code: 12 data symbols, 51 parity symbols.
pub fn primary() -> &'static CodeProfile {
    static PROFILE: OnceLock<CodeProfile> = OnceLock::new();
    PROFILE.get_or_init(|| {
        CodeProfile::new(SYMBOL_BITS, FIELD_POLY, PRIMARY_FCR, ROOT_STEP, PRIMARY_NROOTS, 0)
            .expect("primary profile parameters are valid")
    })
}

/// The shortened (20,12) side-channel code: 12 data symbols, 8 parity
/// symbols, 43 padded positions.
pub fn side_channel() -> &'static CodeProfile {
    static PROFILE: OnceLock<CodeProfile> = OnceLock::new();
    PROFILE.get_or_init(|| {
        CodeProfile::new(
            SYMBOL_BITS,
            FIELD_POLY,
            SIDE_CHANNEL_FCR,
            ROOT_STEP,
            SIDE_CHANNEL_NROOTS,
            SIDE_CHANNEL_PAD,
        )
        .expect("side-channel profile parameters are valid")
    })
}
