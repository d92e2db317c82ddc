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

//! Limb values of the curve and group constants for the 64-bit backend.

use super::field::FieldElement51;
use super::scalar::Scalar52;
use crate::edwards::EdwardsPoint;

/// Edwards `d` value, equal to `-121665/121666 mod p`.
pub(crate) const EDWARDS_D: FieldElement51 = FieldElement51::from_limbs([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// Edwards `2*d` value, equal to `2*(-121665/121666) mod p`.
pub(crate) const EDWARDS_D2: FieldElement51 = FieldElement51::from_limbs([
    1859910466990425,
    932731440258426,
    1072319116312658,
    1815898335770999,
    633789495995903,
]);

/// One of the two square roots of `-1 (mod p)`.
pub(crate) const SQRT_M1: FieldElement51 = FieldElement51::from_limbs([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// `L` is the order of the basepoint, \\( 2\^{252} + 27742317777372353535851937790883648493 \\).
pub(crate) const L: Scalar52 = Scalar52([
    0x0002631a5cf5d3ed,
    0x000dea2f79cd6581,
    0x000000000014def9,
    0x0000000000000000,
    0x0000100000000000,
]);

/// `L * LFACTOR = -1 (mod 2^52)`
pub(crate) const LFACTOR: u64 = 0x51da312547e1b;

/// `R = 2^260 % L`
pub(crate) const R: Scalar52 = Scalar52([
    0x000f48bd6721e6ed,
    0x0003bab5ac67e45a,
    0x000fffffeb35e51b,
    0x000fffffffffffff,
    0x00000fffffffffff,
]);

/// `RR = (2^260)^2 % L`
pub(crate) const RR: Scalar52 = Scalar52([
    0x0009d265e952d13b,
    0x000d63c715bea69f,
    0x0005be65cb687604,
    0x0003dceec73d217f,
    0x000009411b7c309a,
]);

/// The Ed25519 basepoint \\(B\\), the point with \\(y = 4/5\\) and
/// positive \\(x\\), in extended coordinates.
pub const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement51::from_limbs([
        1738742601995546,
        1146398526822698,
        2070867633025821,
        562264141797630,
        587772402128613,
    ]),
    Y: FieldElement51::from_limbs([
        1801439850948184,
        1351079888211148,
        450359962737049,
        900719925474099,
        1801439850948198,
    ]),
    Z: FieldElement51::ONE,
    T: FieldElement51::from_limbs([
        1841354044333475,
        16398895984059,
        755974180946558,
        900171276175154,
        1821297809914039,
    ]),
};

/// The 8-torsion subgroup \\(\mathcal E\[8\]\\).
///
/// The `i`-th entry is \\(i \cdot T\\) for a fixed point \\(T\\) of
/// order 8, so the entries at even indices form \\(\mathcal E\[4\]\\).
#[rustfmt::skip]
pub const EIGHT_TORSION: [EdwardsPoint; 8] = [
    EdwardsPoint {
        X: FieldElement51::ZERO,
        Y: FieldElement51::ONE,
        Z: FieldElement51::ONE,
        T: FieldElement51::ZERO,
    },
    EdwardsPoint {
        X: FieldElement51::from_limbs([358744748052810, 1691584618240980, 977650209285361, 1429865912637724, 560044844278676]),
        Y: FieldElement51::from_limbs([84926274344903, 473620666599931, 365590438845504, 1028470286882429, 2146499180330972]),
        Z: FieldElement51::ONE,
        T: FieldElement51::from_limbs([1448326834587521, 1857896831960481, 1093722731865333, 1677408490711241, 1915505153018406]),
    },
    EdwardsPoint {
        X: FieldElement51::from_limbs([533094393274173, 2016890930128738, 18285341111199, 134597186663265, 1486323764102114]),
        Y: FieldElement51::ZERO,
        Z: FieldElement51::ONE,
        T: FieldElement51::ZERO,
    },
    EdwardsPoint {
        X: FieldElement51::from_limbs([358744748052810, 1691584618240980, 977650209285361, 1429865912637724, 560044844278676]),
        Y: FieldElement51::from_limbs([2166873539340326, 1778179147085316, 1886209374839743, 1223329526802818, 105300633354275]),
        Z: FieldElement51::ONE,
        T: FieldElement51::from_limbs([803472979097708, 393902981724766, 1158077081819914, 574391322974006, 336294660666841]),
    },
    EdwardsPoint {
        X: FieldElement51::ZERO,
        Y: FieldElement51::MINUS_ONE,
        Z: FieldElement51::ONE,
        T: FieldElement51::ZERO,
    },
    EdwardsPoint {
        X: FieldElement51::from_limbs([1893055065632419, 560215195444267, 1274149604399886, 821933901047523, 1691754969406571]),
        Y: FieldElement51::from_limbs([2166873539340326, 1778179147085316, 1886209374839743, 1223329526802818, 105300633354275]),
        Z: FieldElement51::ONE,
        T: FieldElement51::from_limbs([1448326834587521, 1857896831960481, 1093722731865333, 1677408490711241, 1915505153018406]),
    },
    EdwardsPoint {
        X: FieldElement51::from_limbs([1718705420411056, 234908883556509, 2233514472574048, 2117202627021982, 765476049583133]),
        Y: FieldElement51::ZERO,
        Z: FieldElement51::ONE,
        T: FieldElement51::ZERO,
    },
    EdwardsPoint {
        X: FieldElement51::from_limbs([1893055065632419, 560215195444267, 1274149604399886, 821933901047523, 1691754969406571]),
        Y: FieldElement51::from_limbs([84926274344903, 473620666599931, 365590438845504, 1028470286882429, 2146499180330972]),
        Z: FieldElement51::ONE,
        T: FieldElement51::from_limbs([803472979097708, 393902981724766, 1158077081819914, 574391322974006, 336294660666841]),
    },
];
