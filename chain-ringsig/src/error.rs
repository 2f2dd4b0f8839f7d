//! Errors related to chain-ringsig.
use thiserror::Error;

use crate::verification::Equation;

/// Errors of the bit-index utility.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitIndexError {
    /// Bit positions are 1-indexed from the most significant bit, so they
    /// must lie in `[1, width]`.
    #[error("Bit position {position} outside of [1, {width}]")]
    PositionOutOfRange { position: usize, width: usize },

    /// The value does not fit in the requested number of bits.
    #[error("Value {value} does not fit in {width} bits")]
    ValueTooWide { value: usize, width: usize },

    /// One blinding scalar is needed per bit position.
    #[error("Expected {expected} blinding scalars, got {got}")]
    WidthMismatch { expected: usize, got: usize },
}

#[derive(Error, Debug)]
pub enum RingSigError {
    /// This error occurs when the random source could not produce a scalar.
    /// Signing is aborted.
    #[error("Entropy source failure: {0}")]
    EntropyFailure(#[from] rand_core::Error),

    /// This error occurs when we try to build a structure from a byte array
    /// with unexpected structure, or holding a non-canonical point or scalar.
    #[error("Decoding failure: {0}")]
    DecodingFailure(String),

    /// A ring needs at least two members to hide the signer.
    #[error("Ring must contain at least two public keys, got {0}")]
    RingTooSmall(usize),

    #[error("Signer index {index} out of range for a ring of size {size}")]
    SignerIndexOutOfRange { index: usize, size: usize },

    #[error(transparent)]
    BitIndex(#[from] BitIndexError),

    /// This error occurs when the per-bit vectors of a signature do not match
    /// the bit width of the ring it is verified against.
    #[error("Signature shape mismatch: expected {expected} bit positions, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// One or more verification equations did not hold.
    #[error("Ring signature verification failed: {0:?}")]
    VerificationFailure(Vec<Equation>),
}
