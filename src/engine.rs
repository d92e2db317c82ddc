// -*- mode: rust; -*-
//
// This file is part of ed25519-engine.
// Copyright (c) 2026 The ed25519-engine developers
// See LICENSE for licensing information.

//! The byte-level surface: keypair derivation, signing, verification and
//! opening of signed messages over plain byte slices.
//!
//! Input of the wrong length is reported as an `Err` before any
//! cryptography runs.  Well-sized input that fails a cryptographic check
//! is an expected outcome: [`verify`] answers `Ok(false)` for it, and
//! [`open`] reports the cause while never handing back unauthenticated
//! message bytes.
//!
//! ```
//! use ed25519_engine::engine::{self, KeyMaterial};
//!
//! # fn main() -> Result<(), ed25519_engine::SignatureError> {
//! let keypair = engine::make_keypair(&[42u8; 32])?;
//! let public = keypair.public().to_bytes();
//!
//! let signature = engine::sign(b"hello", &KeyMaterial::from(keypair));
//! assert!(engine::verify(b"hello", &signature.to_bytes(), &public)?);
//! assert!(!engine::verify(b"hellO", &signature.to_bytes(), &public)?);
//! # Ok(())
//! # }
//! ```

use zeroize::Zeroize;

use crate::errors::*;
use crate::keypair::Keypair;
use crate::public::PublicKey;
use crate::secret::{ExpandedSecretKey, SecretKey};
use crate::signature::Signature;
use crate::{EXPANDED_SECRET_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};

/// Signing key material in any of the forms a caller may hold.
///
/// Every form signs identically for the same underlying seed.
#[derive(Clone, Debug)]
pub enum KeyMaterial {
    /// A 32-byte seed; it is expanded on every signature.
    Seed(SecretKey),
    /// The 64-byte SHA-512 expansion of a seed.
    Expanded(ExpandedSecretKey),
    /// A keypair from [`make_keypair`], with its public key at hand.
    Keypair(Keypair),
}

impl KeyMaterial {
    /// Interpret raw key bytes by their length: 32 bytes are a seed and
    /// 64 bytes an expansion.
    ///
    /// # Errors
    ///
    /// A length error for any other length.
    pub fn from_bytes(bytes: &[u8]) -> Result<KeyMaterial, SignatureError> {
        match bytes.len() {
            SECRET_KEY_LENGTH => Ok(KeyMaterial::Seed(SecretKey::from_bytes(bytes)?)),
            EXPANDED_SECRET_KEY_LENGTH => {
                Ok(KeyMaterial::Expanded(ExpandedSecretKey::from_slice(bytes)?))
            }
            _ => Err(InternalError::BytesLengthError {
                name: "KeyMaterial",
                length: SECRET_KEY_LENGTH,
            }
            .into()),
        }
    }

    /// The public key this material signs for.
    pub fn public_key(&self) -> PublicKey {
        match self {
            KeyMaterial::Seed(secret) => PublicKey::from(secret),
            KeyMaterial::Expanded(expanded) => PublicKey::from(expanded),
            KeyMaterial::Keypair(keypair) => *keypair.public(),
        }
    }
}

impl From<SecretKey> for KeyMaterial {
    fn from(secret: SecretKey) -> KeyMaterial {
        KeyMaterial::Seed(secret)
    }
}

impl From<ExpandedSecretKey> for KeyMaterial {
    fn from(expanded: ExpandedSecretKey) -> KeyMaterial {
        KeyMaterial::Expanded(expanded)
    }
}

impl From<Keypair> for KeyMaterial {
    fn from(keypair: Keypair) -> KeyMaterial {
        KeyMaterial::Keypair(keypair)
    }
}

/// Derive a keypair from a 32-byte seed.
///
/// # Errors
///
/// A length error if `seed` is not 32 bytes.
pub fn make_keypair(seed: &[u8]) -> Result<Keypair, SignatureError> {
    let secret = SecretKey::from_bytes(seed)?;
    Ok(Keypair::from_secret_key(&secret))
}

/// Derive a keypair from 64 bytes of hash output, used directly as the
/// expansion of a seed.
///
/// # Errors
///
/// A length error if `hash` is not 64 bytes.
pub fn make_keypair_from_hash(hash: &[u8]) -> Result<Keypair, SignatureError> {
    let expanded = ExpandedSecretKey::from_slice(hash).map_err(|_| {
        SignatureError::from(InternalError::BytesLengthError {
            name: "hash",
            length: EXPANDED_SECRET_KEY_LENGTH,
        })
    })?;
    Ok(Keypair::from_expanded(expanded))
}

/// Sign `message` with any form of key material.
pub fn sign(message: &[u8], key: &KeyMaterial) -> Signature {
    match key {
        KeyMaterial::Seed(secret) => {
            let expanded = ExpandedSecretKey::from(secret);
            let public = PublicKey::from(&expanded);
            expanded.sign(message, &public)
        }
        KeyMaterial::Expanded(expanded) => expanded.sign(message, &PublicKey::from(expanded)),
        KeyMaterial::Keypair(keypair) => keypair.sign(message),
    }
}

/// Sign `message` and return `signature ‖ message`.
pub fn sign_attached(message: &[u8], key: &KeyMaterial) -> Vec<u8> {
    let signature = sign(message, key);
    let mut signed = Vec::with_capacity(SIGNATURE_LENGTH + message.len());
    signed.extend_from_slice(&signature.to_bytes());
    signed.extend_from_slice(message);
    signed
}

/// Check a detached signature.
///
/// # Returns
///
/// `Ok(true)` for a valid signature and `Ok(false)` for any
/// cryptographic failure: high bits in `S`, a public key that does not
/// decode, or a mismatched `R`.
///
/// # Errors
///
/// A length error if `signature` is not 64 bytes or `public_key` is not
/// 32 bytes.
pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<bool, SignatureError> {
    let (signature, public_key) = parse_detached(signature, public_key)?;
    let verdict = match signature {
        Ok(signature) => public_key.verify(message, &signature),
        Err(e) => Err(e),
    };
    Ok(verdict.is_ok())
}

/// Split the length checks, which are errors, from the format check on
/// `S`, which is a verification failure.
fn parse_detached(
    signature: &[u8],
    public_key: &[u8],
) -> Result<(Result<Signature, SignatureError>, PublicKey), SignatureError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(InternalError::BytesLengthError {
            name: "Signature",
            length: SIGNATURE_LENGTH,
        }
        .into());
    }
    let public_key = PublicKey::from_bytes(public_key)?;
    let signature = Signature::from_bytes(signature).map_err(|e| {
        log::trace!("signature rejected: {}", e);
        e
    });
    Ok((signature, public_key))
}

/// Verify a `signature ‖ message` buffer and return the message.
///
/// # Errors
///
/// * a length error if `signed_message` is shorter than a signature or
///   `public_key` is not 32 bytes;
/// * `ScalarFormatError`, `PointDecompressionError`, `NegativeZeroError`
///   or `VerifyError` for the cryptographic failure that occurred.
///
/// The message is staged in a buffer which is zeroed before any error is
/// returned.
pub fn open(signed_message: &[u8], public_key: &[u8]) -> Result<Vec<u8>, SignatureError> {
    let length = signed_message.len().saturating_sub(SIGNATURE_LENGTH);
    let mut message = vec![0u8; length];
    match open_into(signed_message, public_key, &mut message) {
        Ok(written) => {
            message.truncate(written);
            Ok(message)
        }
        Err(e) => {
            message.zeroize();
            Err(e)
        }
    }
}

/// Verify a `signature ‖ message` buffer, writing the message into `out`.
///
/// Returns the number of message bytes written to the front of `out`.
/// On failure all of `out` is zeroed, whatever was in it before.
///
/// # Errors
///
/// As for [`open`], plus a length error if `out` cannot hold the
/// message.
pub fn open_into(
    signed_message: &[u8],
    public_key: &[u8],
    out: &mut [u8],
) -> Result<usize, SignatureError> {
    match open_staged(signed_message, public_key, out) {
        Ok(written) => Ok(written),
        Err(e) => {
            out.zeroize();
            Err(e)
        }
    }
}

fn open_staged(
    signed_message: &[u8],
    public_key: &[u8],
    out: &mut [u8],
) -> Result<usize, SignatureError> {
    if signed_message.len() < SIGNATURE_LENGTH {
        return Err(InternalError::BytesLengthError {
            name: "SignedMessage",
            length: SIGNATURE_LENGTH,
        }
        .into());
    }
    let (signature, message) = signed_message.split_at(SIGNATURE_LENGTH);
    if out.len() < message.len() {
        return Err(InternalError::BytesLengthError {
            name: "OpenOutput",
            length: message.len(),
        }
        .into());
    }

    let (signature, public_key) = parse_detached(signature, public_key)?;
    out[..message.len()].copy_from_slice(message);

    public_key.verify(&out[..message.len()], &signature?)?;
    Ok(message.len())
}

#[cfg(test)]
mod test {
    use super::*;

    const SEED: [u8; 32] = [0x31u8; 32];

    #[test]
    fn key_material_from_bytes_dispatches_on_length() {
        assert!(matches!(KeyMaterial::from_bytes(&[0u8; 32]), Ok(KeyMaterial::Seed(_))));
        assert!(matches!(KeyMaterial::from_bytes(&[0u8; 64]), Ok(KeyMaterial::Expanded(_))));
        for len in [0, 31, 33, 63, 65, 96] {
            let err = KeyMaterial::from_bytes(&vec![0u8; len]).unwrap_err();
            assert!(err.is_length_error());
        }
    }

    #[test]
    fn three_key_forms_sign_identically() {
        let keypair = make_keypair(&SEED).unwrap();
        let expansion = keypair.secret().to_bytes();

        let forms = [
            KeyMaterial::from_bytes(&SEED).unwrap(),
            KeyMaterial::from_bytes(&expansion).unwrap(),
            KeyMaterial::from(keypair.clone()),
        ];
        let expected = keypair.sign(b"same message");
        for form in forms.iter() {
            assert_eq!(sign(b"same message", form), expected);
            assert_eq!(form.public_key(), *keypair.public());
        }
    }

    #[test]
    fn make_keypair_checks_length() {
        assert!(make_keypair(&[0u8; 31]).unwrap_err().is_length_error());
        assert!(make_keypair_from_hash(&[0u8; 32]).unwrap_err().is_length_error());
        assert!(make_keypair_from_hash(&[0u8; 64]).is_ok());
    }

    #[test]
    fn verify_lengths_are_errors_and_failures_are_false() {
        let keypair = make_keypair(&SEED).unwrap();
        let public = keypair.public().to_bytes();
        let signature = keypair.sign(b"m").to_bytes();

        assert_eq!(verify(b"m", &signature, &public), Ok(true));
        assert!(verify(b"m", &signature[..63], &public).unwrap_err().is_length_error());
        assert!(verify(b"m", &signature, &public[..31]).unwrap_err().is_length_error());

        let mut high = signature;
        high[63] |= 0x80;
        assert_eq!(verify(b"m", &high, &public), Ok(false));

        let mut off_curve = [0u8; 32];
        off_curve[0] = 2;
        assert_eq!(verify(b"m", &signature, &off_curve), Ok(false));
    }

    #[test]
    fn sign_attached_then_open() {
        let key = KeyMaterial::from_bytes(&SEED).unwrap();
        let public = key.public_key().to_bytes();
        let signed = sign_attached(b"attached message", &key);

        assert_eq!(&signed[SIGNATURE_LENGTH..], b"attached message");
        assert_eq!(open(&signed, &public).unwrap(), b"attached message".to_vec());

        let empty = sign_attached(b"", &key);
        assert_eq!(empty.len(), SIGNATURE_LENGTH);
        assert_eq!(open(&empty, &public).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn open_into_zeroes_output_on_failure() {
        let key = KeyMaterial::from_bytes(&SEED).unwrap();
        let public = key.public_key().to_bytes();
        let mut signed = sign_attached(b"do not leak me", &key);
        let last = signed.len() - 1;
        signed[last] ^= 1;

        let mut out = [0xaau8; 32];
        let err = open_into(&signed, &public, &mut out).unwrap_err();
        assert_eq!(err.kind(), InternalError::VerifyError);
        assert_eq!(out, [0u8; 32]);
    }

    #[test]
    fn open_failure_causes_are_distinct() {
        let key = KeyMaterial::from_bytes(&SEED).unwrap();
        let public = key.public_key().to_bytes();
        let signed = sign_attached(b"x", &key);

        assert!(open(&signed[..63], &public).unwrap_err().is_length_error());

        let mut high = signed.clone();
        high[63] |= 0x20;
        assert_eq!(open(&high, &public).unwrap_err().kind(), InternalError::ScalarFormatError);

        let mut off_curve = [0u8; 32];
        off_curve[0] = 2;
        assert_eq!(
            open(&signed, &off_curve).unwrap_err().kind(),
            InternalError::PointDecompressionError
        );

        let mut negative_zero = [0u8; 32];
        negative_zero[0] = 1;
        negative_zero[31] = 0x80;
        assert_eq!(
            open(&signed, &negative_zero).unwrap_err().kind(),
            InternalError::NegativeZeroError
        );

        let mut out = [0u8; 0];
        assert!(open_into(&signed, &public, &mut out).unwrap_err().is_length_error());
    }

    #[test]
    fn open_into_reports_message_length() {
        let key = KeyMaterial::from_bytes(&SEED).unwrap();
        let public = key.public_key().to_bytes();
        let signed = sign_attached(b"four", &key);

        let mut out = [0u8; 16];
        assert_eq!(open_into(&signed, &public, &mut out), Ok(4));
        assert_eq!(&out[..4], b"four");
    }
}
