//! Reed-Solomon forward error correction over GF(64).
//!
//! Encode 12-symbol six-bit messages into parity-protected codewords and
//! decode noisy codewords back, with erasure support. Two standard
//! profiles are built in: the primary (63,12) code with 51 parity symbols
//! and the shortened (20,12) side-channel code with 8 parity symbols.
//! Custom profiles (field polynomial, root placement, parity count,
//! shortening pad) can be built with [`CodeProfile::new`].
//!
//! # Example
//!
//! ```
//! let p = rs6::profile::primary();
//! let message = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
//!
//! // Codeword = parity followed by message, high-to-low degree.
//! let mut codeword = p.encode(&message).unwrap();
//! codeword.extend_from_slice(&message);
//!
//! // Corrupt a symbol; decode recovers the message and reports the count.
//! codeword[17] ^= 0x09;
//! let result = p.decode(&codeword, &[]).unwrap();
//! assert_eq!(result.message(), Some(&message[..]));
//! assert_eq!(result.error_count(), 1);
//! ```

pub mod codec;
pub mod gf;
pub mod profile;

pub use codec::{CodeProfile, DecodeResult};
pub use gf::GaloisField;

/// Errors returned by profile construction and encode/decode input checks.
///
/// A pattern the code cannot correct is *not* an error: decoding reports it
/// as [`DecodeResult::Uncorrectable`], since callers branch on it as a
/// routine outcome of noisy input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("symbol width {0} not supported (must be 1..=8 bits)")]
    BadSymbolWidth(u32),

    #[error("field polynomial {poly:#x} is not primitive of degree {bits}")]
    BadFieldPoly { poly: u32, bits: u32 },

    #[error("parity count {nroots} outside 1..{max}")]
    BadParityCount { nroots: usize, max: usize },

    #[error("root step {prim} is not invertible modulo {order}")]
    BadRootStep { prim: usize, order: usize },

    #[error("padding {pad} leaves no data symbols in a {max}-symbol codeword")]
    BadPadding { pad: usize, max: usize },

    #[error("message has {got} symbols, expected {want}")]
    MessageLength { got: usize, want: usize },

    #[error("codeword has {got} symbols, expected {want}")]
    CodewordLength { got: usize, want: usize },

    #[error("symbol value {value} outside field range 0..{order}")]
    SymbolRange { value: u8, order: usize },

    #[error("{numera} erasures exceed the {nroots}-symbol parity budget")]
    TooManyErasures { numera: usize, nroots: usize },

    #[error("erasure position {pos} outside codeword of length {len}")]
    ErasureOutOfRange { pos: usize, len: usize },

    #[error("erasure position {0} listed more than once")]
    DuplicateErasure(usize),

    #[error("division by zero in the field")]
    DivisionByZero,

    #[error("logarithm of zero is undefined")]
    LogOfZero,
}
