// -*- mode: rust; -*-
//
// This file is part of ed25519-engine.
// Copyright (c) 2017-2019 isis lovecruft
// Copyright (c) 2026 The ed25519-engine developers
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! ed25519 secret key types.

use core::fmt::Debug;

use digest::generic_array::typenum::U64;
use digest::Digest;

#[cfg(feature = "rand_core")]
use rand_core::CryptoRngCore;

use sha2::Sha512;

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
#[cfg(feature = "serde")]
use serde_bytes::{ByteBuf as SerdeByteBuf, Bytes as SerdeBytes};

use zeroize::Zeroize;

use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::*;
use crate::public::PublicKey;
use crate::scalar::{clamp_integer, Scalar};
use crate::signature::Signature;
use crate::{EXPANDED_SECRET_KEY_LENGTH, SECRET_KEY_LENGTH};

/// An EdDSA secret key: the 32-byte seed everything else is derived from.
///
/// Instances of this secret are automatically overwritten with zeroes when they
/// fall out of scope.
pub struct SecretKey(pub(crate) [u8; SECRET_KEY_LENGTH]);

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize()
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl AsRef<[u8]> for SecretKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Clone for SecretKey {
    fn clone(&self) -> SecretKey {
        SecretKey(self.0)
    }
}

impl SecretKey {
    /// Convert this secret key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0
    }

    /// View this secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Construct a `SecretKey` from a slice of bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use ed25519_engine::SecretKey;
    /// use ed25519_engine::SECRET_KEY_LENGTH;
    /// use ed25519_engine::SignatureError;
    ///
    /// # fn doctest() -> Result<SecretKey, SignatureError> {
    /// let secret_key_bytes: [u8; SECRET_KEY_LENGTH] = [
    ///    157, 097, 177, 157, 239, 253, 090, 096,
    ///    186, 132, 074, 244, 146, 236, 044, 196,
    ///    068, 073, 197, 105, 123, 050, 105, 025,
    ///    112, 059, 172, 003, 028, 174, 127, 096, ];
    ///
    /// let secret_key: SecretKey = SecretKey::from_bytes(&secret_key_bytes)?;
    /// #
    /// # Ok(secret_key)
    /// # }
    /// #
    /// # fn main() {
    /// #     let result = doctest();
    /// #     assert!(result.is_ok());
    /// # }
    /// ```
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is an EdDSA `SecretKey` or whose error value
    /// is an `SignatureError` wrapping the internal error that occurred.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<SecretKey, SignatureError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(InternalError::BytesLengthError {
                name: "SecretKey",
                length: SECRET_KEY_LENGTH,
            }
            .into());
        }
        let mut bits: [u8; 32] = [0u8; 32];
        bits.copy_from_slice(&bytes[..32]);

        Ok(SecretKey(bits))
    }

    /// Generate a `SecretKey` from a `csprng`.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "rand_core")]
    /// # fn main() {
    /// use rand_core::OsRng;
    /// use ed25519_engine::{PublicKey, SecretKey};
    ///
    /// let secret_key: SecretKey = SecretKey::generate(&mut OsRng);
    /// let public_key: PublicKey = (&secret_key).into();
    /// # }
    /// #
    /// # #[cfg(not(feature = "rand_core"))]
    /// # fn main() { }
    /// ```
    #[cfg(feature = "rand_core")]
    pub fn generate<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> SecretKey {
        let mut sk: SecretKey = SecretKey([0u8; 32]);

        csprng.fill_bytes(&mut sk.0);

        sk
    }
}

#[cfg(feature = "serde")]
impl Serialize for SecretKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        SerdeBytes::new(self.as_bytes()).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for SecretKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        let bytes = <SerdeByteBuf>::deserialize(deserializer)?;
        SecretKey::from_bytes(bytes.as_ref()).map_err(SerdeError::custom)
    }
}

/// An "expanded" secret key: the SHA-512 digest of a [`SecretKey`].
///
/// The lower half of the digest, once clamped, is the secret scalar `a`
/// with public key `A = aB`.  The upper half is the nonce prefix hashed
/// together with each message to derive that signature's `r`.
///
/// The unclamped lower half is kept as well, so that `to_bytes` returns
/// exactly the 64 bytes the key was built from.
///
/// Instances of this secret are automatically overwritten with zeroes when they
/// fall out of scope.
pub struct ExpandedSecretKey {
    pub(crate) scalar_bytes: [u8; 32],
    pub(crate) key: Scalar,
    pub(crate) nonce: [u8; 32],
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.scalar_bytes.zeroize();
        self.key.zeroize();
        self.nonce.zeroize()
    }
}

impl Debug for ExpandedSecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("ExpandedSecretKey(..)")
    }
}

impl Clone for ExpandedSecretKey {
    fn clone(&self) -> ExpandedSecretKey {
        ExpandedSecretKey {
            scalar_bytes: self.scalar_bytes,
            key: self.key,
            nonce: self.nonce,
        }
    }
}

impl<'a> From<&'a SecretKey> for ExpandedSecretKey {
    /// Hash the seed with SHA-512 and split the digest.
    fn from(secret_key: &'a SecretKey) -> ExpandedSecretKey {
        let mut h: Sha512 = Sha512::default();
        h.update(secret_key.as_bytes());
        ExpandedSecretKey::from_hash(h)
    }
}

impl ExpandedSecretKey {
    /// Build an `ExpandedSecretKey` from the 64 bytes of a seed's SHA-512
    /// digest.
    ///
    /// Any 64 bytes are accepted; the lower half is clamped before use as
    /// a scalar.
    pub fn from_bytes(bytes: &[u8; EXPANDED_SECRET_KEY_LENGTH]) -> ExpandedSecretKey {
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        lower.copy_from_slice(&bytes[00..32]);
        upper.copy_from_slice(&bytes[32..64]);

        ExpandedSecretKey {
            key: Scalar::from_bits(clamp_integer(lower)),
            scalar_bytes: lower,
            nonce: upper,
        }
    }

    /// Like [`ExpandedSecretKey::from_bytes`], for a slice whose length
    /// is checked.
    pub fn from_slice(bytes: &[u8]) -> Result<ExpandedSecretKey, SignatureError> {
        let bytes: &[u8; EXPANDED_SECRET_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            SignatureError::from(InternalError::BytesLengthError {
                name: "ExpandedSecretKey",
                length: EXPANDED_SECRET_KEY_LENGTH,
            })
        })?;
        Ok(ExpandedSecretKey::from_bytes(bytes))
    }

    /// Finish a 512-bit digest and use its output as the expansion.
    ///
    /// With a `Sha512` instance fed exactly the seed this is the same as
    /// `ExpandedSecretKey::from(&SecretKey)`; other inputs let a caller
    /// derive a key from any high-entropy byte string.
    pub fn from_hash<D>(hash: D) -> ExpandedSecretKey
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output: [u8; 64] = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        let expanded = ExpandedSecretKey::from_bytes(&output);
        output.zeroize();
        expanded
    }

    /// The 64 bytes this key was built from, unclamped.
    pub fn to_bytes(&self) -> [u8; EXPANDED_SECRET_KEY_LENGTH] {
        let mut bytes: [u8; 64] = [0u8; 64];

        bytes[..32].copy_from_slice(&self.scalar_bytes);
        bytes[32..].copy_from_slice(&self.nonce);
        bytes
    }

    /// The public point `A = aB`.
    pub(crate) fn public_point(&self) -> EdwardsPoint {
        EdwardsPoint::mul_base(&self.key)
    }

    /// Sign a message with this `ExpandedSecretKey`.
    ///
    /// `public_key` is hashed into the challenge as given.  Passing a key
    /// which does not belong to this secret yields a signature that fails
    /// to verify under either key; [`crate::Keypair`] keeps the two
    /// halves together.
    #[allow(non_snake_case)]
    pub fn sign(&self, message: &[u8], public_key: &PublicKey) -> Signature {
        let mut h: Sha512 = Sha512::new();
        let R: CompressedEdwardsY;
        let r: Scalar;
        let s: Scalar;
        let k: Scalar;

        h.update(self.nonce);
        h.update(message);

        r = Scalar::from_hash(h);
        R = EdwardsPoint::mul_base(&r).compress();

        h = Sha512::new();
        h.update(R.as_bytes());
        h.update(public_key.as_bytes());
        h.update(message);

        k = Scalar::from_hash(h);
        s = Scalar::muladd(&k, &self.key, &r);

        Signature { R, S: s.to_bytes() }
    }
}
