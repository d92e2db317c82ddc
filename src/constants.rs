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

//! Curve parameters, the basepoint, and the lookup tables of
//! precomputed multiples of it.
//!
//! The tables are built the first time they are used and shared by
//! every thread afterwards:
//!
//! ```
//! # #[cfg(feature = "precomputed-tables")]
//! # {
//! use ed25519_engine::constants;
//! use ed25519_engine::edwards::EdwardsPoint;
//! use ed25519_engine::scalar::Scalar;
//!
//! let B = &*constants::ED25519_BASEPOINT_TABLE;
//! let two_B = B * &Scalar::from(2u64);
//!
//! assert_eq!(two_B, EdwardsPoint::mul_base(&Scalar::from(2u64)));
//! # }
//! ```

#![allow(non_snake_case)]

#[cfg(feature = "precomputed-tables")]
use once_cell::sync::Lazy;

use crate::edwards::CompressedEdwardsY;
#[cfg(feature = "precomputed-tables")]
use crate::edwards::EdwardsBasepointTable;
#[cfg(feature = "precomputed-tables")]
use crate::backend::serial::curve_models::AffineNielsPoint;
#[cfg(feature = "precomputed-tables")]
use crate::window::NafLookupTable5;

pub use crate::backend::serial::u64::constants::{ED25519_BASEPOINT_POINT, EIGHT_TORSION};

/// The Ed25519 basepoint, in `CompressedEdwardsY` format.
///
/// This is the little-endian byte encoding of \\( 4/5 \pmod p \\),
/// which is the \\(y\\)-coordinate of the Ed25519 basepoint.
///
/// The sign bit is 0 since the basepoint has \\(x\\) chosen to be positive.
pub const ED25519_BASEPOINT_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66,
]);

/// `BASEPOINT_ORDER` is the order of the Ed25519 basepoint, i.e.,
/// $$
/// \ell = 2^\{252\} + 27742317777372353535851937790883648493,
/// $$
/// in little-endian bytes.  It reduces to zero as a `Scalar`, so it is
/// kept as bytes.
pub const BASEPOINT_ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
];

/// The Ed25519 basepoint, as an `EdwardsBasepointTable` for scalar
/// multiplication.
#[cfg(feature = "precomputed-tables")]
pub static ED25519_BASEPOINT_TABLE: Lazy<EdwardsBasepointTable> = Lazy::new(|| {
    log::debug!("building the fixed-base table for the Ed25519 basepoint");
    EdwardsBasepointTable::create(&ED25519_BASEPOINT_POINT)
});

/// Odd multiples of the basepoint `[B, 3B, 5B, 7B, 9B, 11B, 13B, 15B]`,
/// for variable-time double-base multiplication.
#[cfg(feature = "precomputed-tables")]
pub(crate) static AFFINE_ODD_MULTIPLES_OF_BASEPOINT: Lazy<NafLookupTable5<AffineNielsPoint>> =
    Lazy::new(|| {
        log::debug!("building the odd-multiples table for the Ed25519 basepoint");
        NafLookupTable5::from(&ED25519_BASEPOINT_POINT)
    });

#[cfg(test)]
mod test {
    use crate::backend::serial::u64::constants as backend_constants;
    use crate::constants;
    use crate::field::FieldElement;
    use crate::traits::{IsIdentity, ValidityCheck};

    #[test]
    fn test_eight_torsion() {
        for i in 0..8 {
            let Q = constants::EIGHT_TORSION[i].mul_by_pow_2(3);
            assert!(Q.is_valid());
            assert!(Q.is_identity());
        }
    }

    #[test]
    fn test_four_torsion() {
        for i in (0..8).filter(|i| i % 2 == 0) {
            let Q = constants::EIGHT_TORSION[i].mul_by_pow_2(2);
            assert!(Q.is_valid());
            assert!(Q.is_identity());
        }
    }

    #[test]
    fn test_two_torsion() {
        for i in (0..8).filter(|i| i % 4 == 0) {
            let Q = constants::EIGHT_TORSION[i].mul_by_pow_2(1);
            assert!(Q.is_valid());
            assert!(Q.is_identity());
        }
    }

    #[test]
    /// Test that SQRT_M1 is a square root of -1
    fn test_sqrt_minus_one() {
        let minus_one = FieldElement::MINUS_ONE;
        let sqrt_m1_sq = &backend_constants::SQRT_M1 * &backend_constants::SQRT_M1;
        assert_eq!(minus_one, sqrt_m1_sq);
        assert!(!bool::from(backend_constants::SQRT_M1.is_negative()));
    }

    /// Test that d = -121665/121666
    #[test]
    fn test_d_vs_ratio() {
        let a = -&FieldElement::from_limbs([121665, 0, 0, 0, 0]);
        let b = FieldElement::from_limbs([121666, 0, 0, 0, 0]);
        let d = &a * &b.invert();
        let d2 = &d + &d;
        assert_eq!(d, backend_constants::EDWARDS_D);
        assert_eq!(d2, backend_constants::EDWARDS_D2);
    }

    #[test]
    fn basepoint_constants_agree() {
        assert!(constants::ED25519_BASEPOINT_POINT.is_valid());
        assert_eq!(
            constants::ED25519_BASEPOINT_POINT.compress(),
            constants::ED25519_BASEPOINT_COMPRESSED
        );
    }

    /// Fixed-base multiplication agrees with the variable-base ladder
    /// whether or not the shared table is compiled in.
    #[test]
    fn mul_base_matches_ladder_in_every_configuration() {
        use crate::edwards::EdwardsPoint;
        use crate::scalar::Scalar;

        let two = Scalar::from(2u64);
        let ladder = &constants::ED25519_BASEPOINT_POINT * &two;
        assert_eq!(EdwardsPoint::mul_base(&two), ladder);
        assert_eq!(
            ladder,
            &constants::ED25519_BASEPOINT_POINT + &constants::ED25519_BASEPOINT_POINT
        );
    }

    #[test]
    #[cfg(feature = "precomputed-tables")]
    fn shared_table_holds_the_basepoint() {
        let bp = constants::ED25519_BASEPOINT_TABLE.basepoint();
        assert_eq!(bp.compress(), constants::ED25519_BASEPOINT_COMPRESSED);
    }
}
