// -*- mode: rust; -*-
//
// This file is part of ed25519-engine.
// Copyright (c) 2016-2021 isis agora lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// Copyright (c) 2026 The ed25519-engine developers
// See LICENSE for licensing information.
//
// Authors:
// - Isis Agora Lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

#![doc(html_root_url = "https://docs.rs/ed25519-engine/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! Ed25519 signatures (RFC 8032) over a self-contained curve25519 core.
//!
//! The crate is layered bottom-up: arithmetic in
//! \\(\mathbb F\_{2\^{255}-19}\\), scalars mod the group order \\(\ell\\),
//! twisted Edwards group operations, and on top of those the signature
//! engine.  Secret-dependent work (field and group arithmetic, the
//! fixed-base multiplication by a secret scalar) runs in constant time;
//! verification, whose inputs are public, uses a faster variable-time
//! double-scalar multiplication.
//!
//! # Example
//!
//! ```
//! use ed25519_engine::{Keypair, Signature};
//!
//! let keypair = Keypair::from_seed(&[0x2au8; 32]);
//! let message: &[u8] = b"This is a test of the tsunami alert system.";
//! let signature: Signature = keypair.sign(message);
//!
//! assert!(keypair.public().verify(message, &signature).is_ok());
//! ```
//!
//! The byte-level functions in [`engine`] take and return plain slices and
//! accept the seed, its 64-byte expansion, or a [`Keypair`] as signing key.
//!
//! # Features
//!
//! * `precomputed-tables` (default): fixed-base multiplication and
//!   verification use lookup tables of basepoint multiples, built once on
//!   first use.
//! * `rand_core`: `SecretKey::generate` and `Keypair::generate`.
//! * `serde`: serialisation of keys and signatures as byte strings.

//------------------------------------------------------------------------
// Internal macros. Must come first!
//------------------------------------------------------------------------

#[macro_use]
pub(crate) mod macros;

//------------------------------------------------------------------------
// Curve arithmetic
//------------------------------------------------------------------------

// Scalar arithmetic mod l = 2^252 + ..., the order of the basepoint
pub mod scalar;

// Point operations on the Edwards form of Curve25519
pub mod edwards;

// Useful constants, like the Ed25519 basepoint
pub mod constants;

// External (and internal) traits.
pub mod traits;

// Finite field arithmetic mod p = 2^255 - 19
pub(crate) mod field;

// Arithmetic backends live here
pub(crate) mod backend;

// Generic code for window lookups
pub(crate) mod window;

//------------------------------------------------------------------------
// Signatures
//------------------------------------------------------------------------

pub mod engine;

mod errors;
mod keypair;
mod public;
mod secret;
mod signature;

pub use crate::engine::KeyMaterial;
pub use crate::errors::{InternalError, SignatureError};
pub use crate::keypair::Keypair;
pub use crate::public::PublicKey;
pub use crate::secret::{ExpandedSecretKey, SecretKey};
pub use crate::signature::Signature;

/// The length of an ed25519 `Signature`, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// The length of an ed25519 `SecretKey` (the seed), in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// The length of an ed25519 `PublicKey`, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// The length of an "expanded" ed25519 key, `ExpandedSecretKey`, in bytes.
pub const EXPANDED_SECRET_KEY_LENGTH: usize = 64;

/// The length of an ed25519 `Keypair`, in bytes.
pub const KEYPAIR_LENGTH: usize = EXPANDED_SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;
