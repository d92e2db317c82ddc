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

#![allow(non_snake_case)]

use crate::backend::serial::curve_models::{AffineNielsPoint, ProjectiveNielsPoint, ProjectivePoint};
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::NafLookupTable5;

/// Compute \\(aA + bB\\) in variable time, where \\(B\\) is the Ed25519 basepoint.
///
/// Both scalars are recoded in width-5 NAF; the odd multiples of `A`
/// are computed per call, those of `B` come from the shared table when
/// the `precomputed-tables` feature is on.
pub fn mul(a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> EdwardsPoint {
    let a_naf = a.non_adjacent_form(5);
    let b_naf = b.non_adjacent_form(5);

    let table_A = NafLookupTable5::<ProjectiveNielsPoint>::from(A);

    cfg_if::cfg_if! {
        if #[cfg(feature = "precomputed-tables")] {
            let table_B = &*crate::constants::AFFINE_ODD_MULTIPLES_OF_BASEPOINT;
        } else {
            let table_B = &NafLookupTable5::<AffineNielsPoint>::from(
                &crate::constants::ED25519_BASEPOINT_POINT,
            );
        }
    }

    naf_double_base(&a_naf, &table_A, &b_naf, table_B)
}

fn naf_double_base(
    a_naf: &[i8; 256],
    table_A: &NafLookupTable5<ProjectiveNielsPoint>,
    b_naf: &[i8; 256],
    table_B: &NafLookupTable5<AffineNielsPoint>,
) -> EdwardsPoint {
    // Find starting index
    let mut i: usize = 255;
    for j in (0..256).rev() {
        i = j;
        if a_naf[i] != 0 || b_naf[i] != 0 {
            break;
        }
    }

    let mut r = ProjectivePoint::identity();
    loop {
        let mut t = r.double();

        match a_naf[i] {
            x if x > 0 => t = &t.as_extended() + &table_A.select(x as usize),
            x if x < 0 => t = &t.as_extended() - &table_A.select(-x as usize),
            _ => {}
        }

        match b_naf[i] {
            x if x > 0 => t = &t.as_extended() + &table_B.select(x as usize),
            x if x < 0 => t = &t.as_extended() - &table_B.select(-x as usize),
            _ => {}
        }

        r = t.as_projective();

        if i == 0 {
            break;
        }
        i -= 1;
    }

    r.as_extended()
}
