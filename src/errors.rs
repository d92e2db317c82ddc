// -*- mode: rust; -*-
//
// This file is part of ed25519-engine.
// Copyright (c) 2017-2019 isis lovecruft
// Copyright (c) 2026 The ed25519-engine developers
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Errors which may occur when parsing keys and/or signatures to or from wire formats,
//! or when verifying them.

// rustc seems to think the typenames in match statements (e.g. in
// Display) should be snake cased, for some reason.
#![allow(non_snake_case)]

use core::fmt;
use core::fmt::Display;

/// The cause of a [`SignatureError`].  Most application-level developers
/// will likely not need to pay any attention to these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum InternalError {
    /// The `y` coordinate of an encoded point has no matching `x`.
    PointDecompressionError,
    /// The encoded point has `x = 0` but its sign bit is set.
    NegativeZeroError,
    /// A scalar had its high bits set, or was not reduced where that is
    /// required.
    ScalarFormatError,
    /// An error in the length of bytes handed to a constructor.
    ///
    /// To use this, pass a string specifying the `name` of the type which is
    /// returning the error, and the `length` in bytes which its constructor
    /// expects.
    BytesLengthError {
        /// The type or buffer that was given the wrong number of bytes.
        name: &'static str,
        /// The length it expects.
        length: usize,
    },
    /// The verification equation wasn't satisfied
    VerifyError,
    /// A public key or signature commitment of small order, rejected by
    /// strict verification.
    SmallOrderError,
    /// The public half of a serialised keypair does not match its secret
    /// half.
    MismatchedKeypairError,
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalError::PointDecompressionError => write!(f, "Cannot decompress Edwards point"),
            InternalError::NegativeZeroError => {
                write!(f, "Edwards point encodes x = 0 with the sign bit set")
            }
            InternalError::ScalarFormatError => write!(f, "Cannot use scalar with high-bit set"),
            InternalError::BytesLengthError { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
            InternalError::VerifyError => write!(f, "Verification equation was not satisfied"),
            InternalError::SmallOrderError => write!(f, "Point has small order"),
            InternalError::MismatchedKeypairError => {
                write!(f, "Public key does not match the secret key")
            }
        }
    }
}

impl std::error::Error for InternalError {}

/// Errors which may occur while processing signatures and keypairs.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * A problem decompressing `r`, a curve point, in the `Signature`, or the
///   curve point for a `PublicKey`.
///
/// * A problem with the format of `s`, a scalar, in the `Signature`.  This
///   is only raised if the high-bit of the scalar was set.  (Scalars must
///   only be constructed from 255-bit integers.)
///
/// * Failure of a signature to satisfy the verification equation.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SignatureError(pub(crate) InternalError);

impl SignatureError {
    /// The specific cause of this error.
    pub fn kind(&self) -> InternalError {
        self.0
    }

    /// Whether the caller handed over input of the wrong shape, as
    /// opposed to well-formed input that failed a cryptographic check.
    pub fn is_length_error(&self) -> bool {
        matches!(self.0, InternalError::BytesLengthError { .. })
    }
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SignatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<InternalError> for SignatureError {
    fn from(err: InternalError) -> SignatureError {
        SignatureError(err)
    }
}
