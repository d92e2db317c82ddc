// -*- mode: rust; -*-
//
// This file is part of ed25519-engine.
// Copyright (c) 2017-2019 isis lovecruft
// Copyright (c) 2026 The ed25519-engine developers
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! An ed25519 keypair: an expanded secret key and its public key, held
//! together so the two can never disagree.

use digest::generic_array::typenum::U64;
use digest::Digest;

#[cfg(feature = "rand_core")]
use rand_core::CryptoRngCore;

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
#[cfg(feature = "serde")]
use serde_bytes::{ByteBuf as SerdeByteBuf, Bytes as SerdeBytes};

use zeroize::Zeroize;

use crate::errors::*;
use crate::public::PublicKey;
use crate::secret::{ExpandedSecretKey, SecretKey};
use crate::signature::Signature;
use crate::{EXPANDED_SECRET_KEY_LENGTH, KEYPAIR_LENGTH, SECRET_KEY_LENGTH};

/// An ed25519 keypair.
///
/// The public half is always the one derived from the secret half; every
/// constructor either derives it or checks it.
#[derive(Clone, Debug)]
pub struct Keypair {
    /// The secret half of this keypair.
    pub(crate) secret: ExpandedSecretKey,
    /// The public half of this keypair.
    pub(crate) public: PublicKey,
}

impl Keypair {
    /// Derive a keypair from a 32-byte seed.
    ///
    /// # Example
    ///
    /// ```
    /// use ed25519_engine::Keypair;
    ///
    /// let keypair = Keypair::from_seed(&[7u8; 32]);
    /// let signature = keypair.sign(b"hello");
    /// assert!(keypair.verify(b"hello", &signature).is_ok());
    /// ```
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Keypair {
        let secret = SecretKey(*seed);
        Keypair::from_secret_key(&secret)
    }

    /// Derive a keypair from a `SecretKey`.
    pub fn from_secret_key(secret_key: &SecretKey) -> Keypair {
        Keypair::from_expanded(ExpandedSecretKey::from(secret_key))
    }

    /// Derive a keypair from an already expanded secret key.
    pub fn from_expanded(secret: ExpandedSecretKey) -> Keypair {
        let public = PublicKey::from(&secret);
        Keypair { secret, public }
    }

    /// Derive a keypair from the 64-byte expansion of a seed.
    pub fn from_expanded_bytes(bytes: &[u8; EXPANDED_SECRET_KEY_LENGTH]) -> Keypair {
        Keypair::from_expanded(ExpandedSecretKey::from_bytes(bytes))
    }

    /// Derive a keypair from the output of a finished 512-bit digest,
    /// used in place of the SHA-512 expansion of a seed.
    ///
    /// ```
    /// use ed25519_engine::Keypair;
    /// use sha2::{Digest, Sha512};
    ///
    /// let mut h = Sha512::new();
    /// h.update(b"a passphrase with plenty of entropy");
    /// let keypair = Keypair::from_hash(h);
    /// # let _ = keypair;
    /// ```
    pub fn from_hash<D>(hash: D) -> Keypair
    where
        D: Digest<OutputSize = U64>,
    {
        Keypair::from_expanded(ExpandedSecretKey::from_hash(hash))
    }

    /// Generate a keypair from a fresh random seed.
    #[cfg(feature = "rand_core")]
    pub fn generate<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> Keypair {
        let secret = SecretKey::generate(csprng);
        Keypair::from_secret_key(&secret)
    }

    /// The public half of this keypair.
    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    /// The secret half of this keypair.
    pub fn secret(&self) -> &ExpandedSecretKey {
        &self.secret
    }

    /// Convert this keypair to bytes.
    ///
    /// # Returns
    ///
    /// An array of bytes, `[u8; KEYPAIR_LENGTH]`.  The first
    /// `EXPANDED_SECRET_KEY_LENGTH` bytes are the expanded secret key,
    /// and the last `PUBLIC_KEY_LENGTH` bytes are the public key.
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes: [u8; KEYPAIR_LENGTH] = [0u8; KEYPAIR_LENGTH];
        let mut secret = self.secret.to_bytes();

        bytes[..EXPANDED_SECRET_KEY_LENGTH].copy_from_slice(&secret);
        bytes[EXPANDED_SECRET_KEY_LENGTH..].copy_from_slice(self.public.as_bytes());
        secret.zeroize();
        bytes
    }

    /// Construct a `Keypair` from the bytes produced by
    /// [`Keypair::to_bytes`].
    ///
    /// # Errors
    ///
    /// * a length error if `bytes` is not `KEYPAIR_LENGTH` long;
    /// * `MismatchedKeypairError` if the public half is not the one the
    ///   secret half derives.
    pub fn from_bytes(bytes: &[u8]) -> Result<Keypair, SignatureError> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(SignatureError(InternalError::BytesLengthError {
                name: "Keypair",
                length: KEYPAIR_LENGTH,
            }));
        }
        let secret = ExpandedSecretKey::from_slice(&bytes[..EXPANDED_SECRET_KEY_LENGTH])?;
        let public = PublicKey::from_bytes(&bytes[EXPANDED_SECRET_KEY_LENGTH..])?;

        let keypair = Keypair::from_expanded(secret);
        if keypair.public != public {
            log::trace!("keypair bytes carry a foreign public key");
            return Err(InternalError::MismatchedKeypairError.into());
        }
        Ok(keypair)
    }

    /// Sign a message with this keypair's secret key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.secret.sign(message, &self.public)
    }

    /// Verify a signature on a message with this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        self.public.verify(message, signature)
    }

    /// Strictly verify a signature on a message with this keypair's
    /// public key.  See [`PublicKey::verify_strict`].
    pub fn verify_strict(
        &self,
        message: &[u8],
        signature: &Signature,
    ) -> Result<(), SignatureError> {
        self.public.verify_strict(message, signature)
    }
}

impl TryFrom<&[u8]> for Keypair {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<Keypair, SignatureError> {
        Keypair::from_bytes(bytes)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Keypair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut bytes = self.to_bytes();
        let result = SerdeBytes::new(&bytes[..]).serialize(serializer);
        bytes.zeroize();
        result
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for Keypair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        let mut bytes = <SerdeByteBuf>::deserialize(deserializer)?.into_vec();
        let keypair = Keypair::from_bytes(bytes.as_ref()).map_err(SerdeError::custom);
        bytes.zeroize();
        keypair
    }
}
