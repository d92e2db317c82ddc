// -*- mode: rust; -*-
//
// This file is part of ed25519-engine.
// Copyright (c) 2017-2019 isis lovecruft
// Copyright (c) 2026 The ed25519-engine developers
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! ed25519 public keys.

use core::fmt::Debug;

use sha2::{Digest, Sha512};

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::*;
use crate::scalar::Scalar;
use crate::secret::*;
use crate::signature::*;
use crate::PUBLIC_KEY_LENGTH;

/// An ed25519 public key: the encoding of \\(A = aB\\).
///
/// Construction only checks the length.  Whether the bytes decode to a
/// curve point is settled by [`PublicKey::verify`], which rejects keys
/// that do not.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PublicKey(pub(crate) CompressedEdwardsY);

impl Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PublicKey({:?})", self.0)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<'a> From<&'a SecretKey> for PublicKey {
    /// Derive this public key from its corresponding `SecretKey`.
    fn from(secret_key: &SecretKey) -> PublicKey {
        let expanded = ExpandedSecretKey::from(secret_key);
        PublicKey::from(&expanded)
    }
}

impl<'a> From<&'a ExpandedSecretKey> for PublicKey {
    /// Derive this public key from its corresponding `ExpandedSecretKey`.
    fn from(expanded_secret_key: &ExpandedSecretKey) -> PublicKey {
        PublicKey(expanded_secret_key.public_point().compress())
    }
}

impl PublicKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }

    /// Construct a `PublicKey` from a slice of bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use ed25519_engine::PublicKey;
    /// use ed25519_engine::PUBLIC_KEY_LENGTH;
    /// use ed25519_engine::SignatureError;
    ///
    /// # fn doctest() -> Result<PublicKey, SignatureError> {
    /// let public_key_bytes: [u8; PUBLIC_KEY_LENGTH] = [
    ///    215,  90, 152,   1, 130, 177,  10, 183, 213,  75, 254, 211, 201, 100,   7,  58,
    ///     14, 225, 114, 243, 218, 166,  35,  37, 175,   2,  26, 104, 247,   7,   81, 26];
    ///
    /// let public_key = PublicKey::from_bytes(&public_key_bytes)?;
    /// #
    /// # Ok(public_key)
    /// # }
    /// #
    /// # fn main() {
    /// #     doctest();
    /// # }
    /// ```
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is an EdDSA `PublicKey` or whose error value
    /// is an `SignatureError` describing the error that occurred.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, SignatureError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(InternalError::BytesLengthError {
                name: "PublicKey",
                length: PUBLIC_KEY_LENGTH,
            }
            .into());
        }
        let mut bits: [u8; 32] = [0u8; 32];
        bits.copy_from_slice(&bytes[..32]);

        Ok(PublicKey(CompressedEdwardsY(bits)))
    }

    /// Decode this key to a curve point.
    ///
    /// # Errors
    ///
    /// `PointDecompressionError` or `NegativeZeroError`, as for
    /// [`CompressedEdwardsY::decompress`].
    pub fn decompress(&self) -> Result<EdwardsPoint, SignatureError> {
        self.0.decompress()
    }

    /// Whether this key decodes to a point of small order.  Any signature
    /// such a key "verifies" says nothing about who made it.
    pub fn is_weak(&self) -> bool {
        self.decompress().map(|point| point.is_small_order()).unwrap_or(false)
    }

    // h = H(R || A || M)
    #[allow(non_snake_case)]
    fn compute_challenge(R: &CompressedEdwardsY, A: &CompressedEdwardsY, M: &[u8]) -> Scalar {
        let mut h = Sha512::new();
        h.update(R.as_bytes());
        h.update(A.as_bytes());
        h.update(M);

        Scalar::from_hash(h)
    }

    // The R a valid signature would carry: [s]B - [h]A, computed as
    // [h](-A) + [s]B.  The caller compares encodings bytewise, so a
    // non-canonical R in the signature never matches.
    #[allow(non_snake_case)]
    fn recompute_r(
        minus_A: &EdwardsPoint,
        A: &CompressedEdwardsY,
        signature: &Signature,
        M: &[u8],
    ) -> CompressedEdwardsY {
        let h = Self::compute_challenge(&signature.R, A, M);
        EdwardsPoint::vartime_double_scalar_mul_basepoint(&h, minus_A, &signature.s_scalar())
            .compress()
    }

    /// Verify a signature on a message with this public key.
    ///
    /// # Return
    ///
    /// Returns `Ok(())` if the signature is valid, and `Err` otherwise:
    ///
    /// * `PointDecompressionError` or `NegativeZeroError` if this key does
    ///   not decode;
    /// * `VerifyError` if the verification equation does not hold.
    ///
    /// The top bits of `S` were already checked when the [`Signature`]
    /// was parsed.  `S` is otherwise taken as sent, so it need not be
    /// reduced; see [`PublicKey::verify_strict`].
    #[allow(non_snake_case)]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        let minus_A = self.0.decompress_negate_vartime().map_err(|e| {
            log::trace!("public key rejected: {}", e);
            e
        })?;

        let expected_R = Self::recompute_r(&minus_A, &self.0, signature, message);
        if expected_R == signature.R {
            Ok(())
        } else {
            log::trace!("verification equation not satisfied");
            Err(InternalError::VerifyError.into())
        }
    }

    /// Strictly verify a signature on a message with this public key.
    ///
    /// On top of [`PublicKey::verify`] this rejects:
    ///
    /// * an `S` which is not reduced mod \\(\ell\\), with `ScalarFormatError`,
    ///   closing off the trivial malleability of adding \\(\ell\\) to `S`;
    /// * a public key or an `R` of small order, with `SmallOrderError`;
    /// * an `R` which does not decode, with its decoding error.
    #[allow(non_snake_case)]
    pub fn verify_strict(
        &self,
        message: &[u8],
        signature: &Signature,
    ) -> Result<(), SignatureError> {
        if Option::<Scalar>::from(Scalar::from_canonical_bytes(signature.S)).is_none() {
            log::trace!("signature scalar is not reduced");
            return Err(InternalError::ScalarFormatError.into());
        }

        let signature_R = signature.R.decompress()?;
        let minus_A = self.0.decompress_negate_vartime()?;

        // Logical OR is fine here as we're not trying to be constant time.
        if signature_R.is_small_order() || minus_A.is_small_order() {
            log::trace!("small order point in strict verification");
            return Err(InternalError::SmallOrderError.into());
        }

        let expected_R = Self::recompute_r(&minus_A, &self.0, signature, message);
        if expected_R == signature.R {
            Ok(())
        } else {
            log::trace!("verification equation not satisfied");
            Err(InternalError::VerifyError.into())
        }
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<PublicKey, SignatureError> {
        PublicKey::from_bytes(bytes)
    }
}

impl From<PublicKey> for [u8; PUBLIC_KEY_LENGTH] {
    fn from(public_key: PublicKey) -> [u8; PUBLIC_KEY_LENGTH] {
        public_key.to_bytes()
    }
}

#[cfg(feature = "serde")]
impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.as_bytes()[..])
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        struct PublicKeyVisitor;

        impl<'de> serde::de::Visitor<'de> for PublicKeyVisitor {
            type Value = PublicKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(formatter, "An ed25519 public key as 32 bytes")
            }

            fn visit_bytes<E: SerdeError>(self, bytes: &[u8]) -> Result<Self::Value, E> {
                PublicKey::try_from(bytes).map_err(E::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; 32];

                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| SerdeError::invalid_length(i, &"expected 32 bytes"))?;
                }

                let remaining = (0..)
                    .map(|_| seq.next_element::<u8>())
                    .take_while(|el| matches!(el, Ok(Some(_))))
                    .count();

                if remaining > 0 {
                    return Err(SerdeError::invalid_length(32 + remaining, &"expected 32 bytes"));
                }

                PublicKey::try_from(&bytes[..]).map_err(SerdeError::custom)
            }
        }

        deserializer.deserialize_bytes(PublicKeyVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::EIGHT_TORSION;

    fn signed(seed: u8, message: &[u8]) -> (PublicKey, Signature) {
        let secret = SecretKey::from_bytes(&[seed; 32]).unwrap();
        let expanded = ExpandedSecretKey::from(&secret);
        let public = PublicKey::from(&expanded);
        let signature = expanded.sign(message, &public);
        (public, signature)
    }

    #[test]
    fn from_bytes_only_checks_length() {
        assert!(PublicKey::from_bytes(&[0u8; 31]).unwrap_err().is_length_error());
        // y = 2 is not on the curve, but that is found out at verification.
        let mut off_curve = [0u8; 32];
        off_curve[0] = 2;
        assert!(PublicKey::from_bytes(&off_curve).is_ok());
    }

    #[test]
    fn verify_good_and_tampered() {
        let message = b"the engine signs what it is given";
        let (public, signature) = signed(3, message);

        assert!(public.verify(message, &signature).is_ok());
        assert!(public.verify_strict(message, &signature).is_ok());

        let err = public.verify(b"something else", &signature).unwrap_err();
        assert_eq!(err.kind(), InternalError::VerifyError);
    }

    #[test]
    fn verify_rejects_undecodable_key_with_its_cause() {
        let message = b"m";
        let (_, signature) = signed(4, message);

        let mut off_curve = [0u8; 32];
        off_curve[0] = 2;
        let err = PublicKey::from_bytes(&off_curve)
            .unwrap()
            .verify(message, &signature)
            .unwrap_err();
        assert_eq!(err.kind(), InternalError::PointDecompressionError);

        // y = 1, x = 0, sign bit set.
        let mut negative_zero = [0u8; 32];
        negative_zero[0] = 1;
        negative_zero[31] = 0x80;
        let err = PublicKey::from_bytes(&negative_zero)
            .unwrap()
            .verify(message, &signature)
            .unwrap_err();
        assert_eq!(err.kind(), InternalError::NegativeZeroError);
    }

    #[test]
    fn unreduced_s_passes_verify_but_not_verify_strict() {
        let message = b"malleable";
        let (public, signature) = signed(5, message);

        // S + l is still below 2^253, so it parses.
        let l = crate::constants::BASEPOINT_ORDER;
        let mut s_plus_l = [0u8; 32];
        let mut carry = 0u16;
        for i in 0..32 {
            let sum = signature.S[i] as u16 + l[i] as u16 + carry;
            s_plus_l[i] = sum as u8;
            carry = sum >> 8;
        }
        let mut bytes = signature.to_bytes();
        bytes[32..].copy_from_slice(&s_plus_l);
        let mauled = Signature::from_bytes(&bytes).unwrap();

        assert!(public.verify(message, &mauled).is_ok());
        let err = public.verify_strict(message, &mauled).unwrap_err();
        assert_eq!(err.kind(), InternalError::ScalarFormatError);
    }

    #[test]
    fn small_order_key_is_weak_and_fails_strict() {
        let weak = PublicKey(EIGHT_TORSION[1].compress());
        assert!(weak.is_weak());

        let (public, _) = signed(6, b"");
        assert!(!public.is_weak());

        // The identity as R and S = 0 satisfy the equation for the identity key.
        let identity_key = PublicKey(EIGHT_TORSION[0].compress());
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(identity_key.as_bytes());
        let trivial = Signature::from_bytes(&bytes).unwrap();
        assert!(identity_key.verify(b"anything", &trivial).is_ok());
        let err = identity_key.verify_strict(b"anything", &trivial).unwrap_err();
        assert_eq!(err.kind(), InternalError::SmallOrderError);
    }
}
