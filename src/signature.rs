// -*- mode: rust; -*-
//
// This file is part of ed25519-engine.
// Copyright (c) 2017-2019 isis lovecruft
// Copyright (c) 2026 The ed25519-engine developers
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! An ed25519 signature.

use core::fmt::Debug;

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde::{Deserializer, Serializer};

use crate::edwards::CompressedEdwardsY;
use crate::errors::*;
use crate::scalar::Scalar;
use crate::SIGNATURE_LENGTH;

/// An ed25519 signature, `R ‖ S`.
///
/// # Note
///
/// These signatures are "detached": they do **not** include a copy of the
/// message which has been signed.  See
/// [`engine::sign_attached`](crate::engine::sign_attached) for the
/// combined layout.
///
/// A `Signature` can only be built from bytes whose top three bits are
/// clear, so `S` is always below \\(2\^{253}\\).  It is not necessarily
/// reduced mod \\(\ell\\); only strict verification insists on that.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Signature {
    /// `R` is the compressed commitment point \\(rB\\), where \\(r\\) is
    /// the reduced SHA-512 digest of the nonce half of the expanded secret
    /// key followed by the message.
    pub(crate) R: CompressedEdwardsY,

    /// `S` is \\(r + ha \bmod \ell\\), where \\(h\\) is the reduced
    /// SHA-512 digest of `R ‖ A ‖ M`, as it appeared on the wire.
    pub(crate) S: [u8; 32],
}

impl Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature( R: {:?}, S: {:?} )", &self.R, &self.S)
    }
}

impl Signature {
    /// Convert this `Signature` to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes: [u8; SIGNATURE_LENGTH] = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..32].copy_from_slice(&self.R.as_bytes()[..]);
        signature_bytes[32..].copy_from_slice(&self.S[..]);
        signature_bytes
    }

    /// Construct a `Signature` from a slice of bytes.
    ///
    /// # Errors
    ///
    /// * a length error if `bytes` is not 64 bytes long;
    /// * `ScalarFormatError` if any of the top three bits of the last byte
    ///   is set.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(SignatureError(InternalError::BytesLengthError {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            }));
        }
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        lower.copy_from_slice(&bytes[..32]);
        upper.copy_from_slice(&bytes[32..]);

        if upper[31] & 224 != 0 {
            return Err(SignatureError(InternalError::ScalarFormatError));
        }

        Ok(Signature {
            R: CompressedEdwardsY(lower),
            S: upper,
        })
    }

    /// The commitment `R`, as sent.
    pub fn r_bytes(&self) -> &[u8; 32] {
        self.R.as_bytes()
    }

    /// The response `S`, as sent.
    pub fn s_bytes(&self) -> &[u8; 32] {
        &self.S
    }

    /// `S` as a scalar for the verification equation.  It is below
    /// \\(2\^{253}\\) but may be unreduced, which the variable-time
    /// multiplication accepts.
    pub(crate) fn s_scalar(&self) -> Scalar {
        Scalar::from_bits(self.S)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<Signature, SignatureError> {
        Signature::from_bytes(bytes)
    }
}

impl From<Signature> for [u8; SIGNATURE_LENGTH] {
    fn from(signature: Signature) -> [u8; SIGNATURE_LENGTH] {
        signature.to_bytes()
    }
}

#[cfg(feature = "serde")]
impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes()[..])
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        struct SignatureVisitor;

        impl<'d> Visitor<'d> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("An ed25519 signature as 64 bytes, as specified in RFC8032.")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<Signature, E>
            where
                E: SerdeError,
            {
                Signature::from_bytes(bytes).map_err(SerdeError::custom)
            }
        }
        deserializer.deserialize_bytes(SignatureVisitor)
    }
}
