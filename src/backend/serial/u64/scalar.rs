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

//! Arithmetic mod \\(\ell = 2\^{252} + 27742317777372353535851937790883648493\\)
//! with five \\(52\\)-bit unsigned limbs.
//!
//! Five \\(51\\)-bit limbs would hold the \\(253\\)-bit values, but
//! Montgomery reduction of a \\(512\\)-bit product needs \\(R =
//! 2\^{260}\\), so \\(52\\)-bit limbs are used.  A schoolbook column of
//! a \\(5 \times 5\\) product of \\(52\\)-bit limbs is at most
//!
//! ```text
//! (0xfffffffffffff^2) * 5 = 0x4ffffffffffff60000000000005 (107 bits)
//! ```
//!
//! which leaves room in a `u128` for the reduction carries.

use core::fmt::Debug;

use zeroize::Zeroize;

use super::constants;

/// An element of \\(\mathbb Z / \ell \mathbb Z\\) as five \\(52\\)-bit
/// limbs, least significant first.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) struct Scalar52(pub(crate) [u64; 5]);

impl Debug for Scalar52 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar52({:?})", &self.0[..])
    }
}

impl Zeroize for Scalar52 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// `u64 * u64 = u128` multiply helper
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

const MASK_52: u64 = (1u64 << 52) - 1;

fn load_words<const N: usize>(bytes: &[u8]) -> [u64; N] {
    let mut words = [0u64; N];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *word = u64::from_le_bytes(buf);
    }
    words
}

impl Scalar52 {
    /// The scalar \\( 0 \\).
    pub(crate) const ZERO: Scalar52 = Scalar52([0, 0, 0, 0, 0]);

    /// Unpack a 32 byte / 256 bit scalar into 5 52-bit limbs.
    ///
    /// The top limb holds 48 bits, so all 256 input bits are kept.  The
    /// result is not reduced.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Scalar52 {
        let words: [u64; 4] = load_words(bytes);
        let top_mask = (1u64 << 48) - 1;

        Scalar52([
              words[0]                             & MASK_52,
            ((words[0] >> 52) | (words[1] << 12)) & MASK_52,
            ((words[1] >> 40) | (words[2] << 24)) & MASK_52,
            ((words[2] >> 28) | (words[3] << 36)) & MASK_52,
             (words[3] >> 16)                      & top_mask,
        ])
    }

    /// Reduce a 64 byte / 512 bit little-endian integer mod \\(\ell\\).
    #[rustfmt::skip] // keep alignment of lo[*] and hi[*] calculations
    pub(crate) fn from_bytes_wide(bytes: &[u8; 64]) -> Scalar52 {
        let words: [u64; 8] = load_words(bytes);

        let lo = Scalar52([
              words[0]                             & MASK_52,
            ((words[0] >> 52) | (words[1] << 12)) & MASK_52,
            ((words[1] >> 40) | (words[2] << 24)) & MASK_52,
            ((words[2] >> 28) | (words[3] << 36)) & MASK_52,
            ((words[3] >> 16) | (words[4] << 48)) & MASK_52,
        ]);
        let hi = Scalar52([
             (words[4] >>  4)                      & MASK_52,
            ((words[4] >> 56) | (words[5] <<  8)) & MASK_52,
            ((words[5] >> 44) | (words[6] << 20)) & MASK_52,
            ((words[6] >> 32) | (words[7] << 32)) & MASK_52,
              words[7] >> 20,
        ]);

        // lo + hi * 2^260, where (lo * R) / R = lo and (hi * R^2) / R = hi * R.
        let lo = Scalar52::montgomery_mul(&lo, &constants::R);
        let hi = Scalar52::montgomery_mul(&hi, &constants::RR);

        Scalar52::add(&hi, &lo)
    }

    /// Pack the limbs of this `Scalar52` into 32 little-endian bytes.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        let l = &self.0;
        let mut s = [0u8; 32];

        s[ 0] =  l[0]                       as u8;
        s[ 1] = (l[0] >>  8)                as u8;
        s[ 2] = (l[0] >> 16)                as u8;
        s[ 3] = (l[0] >> 24)                as u8;
        s[ 4] = (l[0] >> 32)                as u8;
        s[ 5] = (l[0] >> 40)                as u8;
        s[ 6] =((l[0] >> 48) | (l[1] << 4)) as u8;
        s[ 7] = (l[1] >>  4)                as u8;
        s[ 8] = (l[1] >> 12)                as u8;
        s[ 9] = (l[1] >> 20)                as u8;
        s[10] = (l[1] >> 28)                as u8;
        s[11] = (l[1] >> 36)                as u8;
        s[12] = (l[1] >> 44)                as u8;
        s[13] =  l[2]                       as u8;
        s[14] = (l[2] >>  8)                as u8;
        s[15] = (l[2] >> 16)                as u8;
        s[16] = (l[2] >> 24)                as u8;
        s[17] = (l[2] >> 32)                as u8;
        s[18] = (l[2] >> 40)                as u8;
        s[19] =((l[2] >> 48) | (l[3] << 4)) as u8;
        s[20] = (l[3] >>  4)                as u8;
        s[21] = (l[3] >> 12)                as u8;
        s[22] = (l[3] >> 20)                as u8;
        s[23] = (l[3] >> 28)                as u8;
        s[24] = (l[3] >> 36)                as u8;
        s[25] = (l[3] >> 44)                as u8;
        s[26] =  l[4]                       as u8;
        s[27] = (l[4] >>  8)                as u8;
        s[28] = (l[4] >> 16)                as u8;
        s[29] = (l[4] >> 24)                as u8;
        s[30] = (l[4] >> 32)                as u8;
        s[31] = (l[4] >> 40)                as u8;

        s
    }

    /// Compute `a + b` (mod l).  Both inputs must be below `l`.
    pub(crate) fn add(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        let mut sum = Scalar52::ZERO;

        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = a.0[i] + b.0[i] + (carry >> 52);
            sum.0[i] = carry & MASK_52;
        }

        // subtract l if the sum is >= l
        Scalar52::sub(&sum, &constants::L)
    }

    /// Compute `a - b` (mod l).
    pub(crate) fn sub(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        let mut difference = Scalar52::ZERO;

        let mut borrow: u64 = 0;
        for i in 0..5 {
            borrow = a.0[i].wrapping_sub(b.0[i] + (borrow >> 63));
            difference.0[i] = borrow & MASK_52;
        }

        // Add l back, masked by the final borrow, so the branch does not
        // depend on the values.
        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = (carry >> 52) + difference.0[i] + (constants::L.0[i] & underflow_mask);
            difference.0[i] = carry & MASK_52;
        }

        difference
    }

    /// Schoolbook product of the limbs, without reduction.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of z[*] calculations
    pub(crate) fn mul_internal(a: &Scalar52, b: &Scalar52) -> [u128; 9] {
        let a = &a.0;
        let b = &b.0;
        let mut z = [0u128; 9];

        z[0] = m(a[0], b[0]);
        z[1] = m(a[0], b[1]) + m(a[1], b[0]);
        z[2] = m(a[0], b[2]) + m(a[1], b[1]) + m(a[2], b[0]);
        z[3] = m(a[0], b[3]) + m(a[1], b[2]) + m(a[2], b[1]) + m(a[3], b[0]);
        z[4] = m(a[0], b[4]) + m(a[1], b[3]) + m(a[2], b[2]) + m(a[3], b[1]) + m(a[4], b[0]);
        z[5] =                 m(a[1], b[4]) + m(a[2], b[3]) + m(a[3], b[2]) + m(a[4], b[1]);
        z[6] =                                 m(a[2], b[4]) + m(a[3], b[3]) + m(a[4], b[2]);
        z[7] =                                                 m(a[3], b[4]) + m(a[4], b[3]);
        z[8] =                                                                 m(a[4], b[4]);

        z
    }

    /// Compute `limbs / R` (mod l), where `R = 2^260`.
    #[inline(always)]
    #[rustfmt::skip] // keep alignment of n* and r* calculations
    pub(crate) fn montgomery_reduce(limbs: &[u128; 9]) -> Scalar52 {
        #[inline(always)]
        fn part1(sum: u128) -> (u128, u64) {
            let p = (sum as u64).wrapping_mul(constants::LFACTOR) & MASK_52;
            ((sum + m(p, constants::L.0[0])) >> 52, p)
        }

        #[inline(always)]
        fn part2(sum: u128) -> (u128, u64) {
            let w = (sum as u64) & MASK_52;
            (sum >> 52, w)
        }

        // l[3] is zero, so its multiples are left out
        let l = &constants::L.0;

        // Find n such that limbs + n*l is divisible by R ...
        let (carry, n0) = part1(        limbs[0]);
        let (carry, n1) = part1(carry + limbs[1] + m(n0, l[1]));
        let (carry, n2) = part1(carry + limbs[2] + m(n0, l[2]) + m(n1, l[1]));
        let (carry, n3) = part1(carry + limbs[3]               + m(n1, l[2]) + m(n2, l[1]));
        let (carry, n4) = part1(carry + limbs[4] + m(n0, l[4])               + m(n2, l[2]) + m(n3, l[1]));

        // ... then the upper half is the quotient by R.
        let (carry, r0) = part2(carry + limbs[5]               + m(n1, l[4])               + m(n3, l[2]) + m(n4, l[1]));
        let (carry, r1) = part2(carry + limbs[6]                             + m(n2, l[4])               + m(n4, l[2]));
        let (carry, r2) = part2(carry + limbs[7]                                           + m(n3, l[4])              );
        let (carry, r3) = part2(carry + limbs[8]                                                         + m(n4, l[4]));
        let         r4  = carry as u64;

        // the result is below 2l, so one conditional subtraction finishes it
        Scalar52::sub(&Scalar52([r0, r1, r2, r3, r4]), &constants::L)
    }

    /// Compute `a * b` (mod l).
    #[inline(never)]
    pub(crate) fn mul(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        let ab = Scalar52::montgomery_reduce(&Scalar52::mul_internal(a, b));
        Scalar52::montgomery_reduce(&Scalar52::mul_internal(&ab, &constants::RR))
    }

    /// Compute `(a * b) / R` (mod l).
    #[inline(never)]
    pub(crate) fn montgomery_mul(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        Scalar52::montgomery_reduce(&Scalar52::mul_internal(a, b))
    }

    /// Compute `a * b + c` (mod l).  `c` must be below `l`.
    pub(crate) fn mul_add(a: &Scalar52, b: &Scalar52, c: &Scalar52) -> Scalar52 {
        Scalar52::add(&Scalar52::mul(a, b), c)
    }

    /// Reduce this value, which may be as large as \\(2\^{260}\\), mod `l`.
    pub(crate) fn reduce(&self) -> Scalar52 {
        // (self * R) / R
        Scalar52::montgomery_mul(self, &constants::R)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// x = 2^253 - 1, just above the largest reduced scalar; exercises
    /// the carry bounds.
    static X: Scalar52 = Scalar52([
        0x000fffffffffffff,
        0x000fffffffffffff,
        0x000fffffffffffff,
        0x000fffffffffffff,
        0x00001fffffffffff,
    ]);

    /// x^2 mod l
    static XX: Scalar52 = Scalar52([
        0x0001668020217559,
        0x000531640ffd0ec0,
        0x00085fd6f9f38a31,
        0x000c268f73bb1cf4,
        0x000006ce65046df0,
    ]);

    /// x^2 / R mod l
    static XX_MONT: Scalar52 = Scalar52([
        0x000c754eea569a5c,
        0x00063b6ed36cb215,
        0x0008ffa36bf25886,
        0x000e9183614e7543,
        0x0000061db6c6f26f,
    ]);

    static Y: Scalar52 = Scalar52([
        0x000b75071e1458fa,
        0x000bf9d75e1ecdac,
        0x000433d2baf0672b,
        0x0005fffcc11fad13,
        0x00000d96018bb825,
    ]);

    /// x*y mod l
    static XY: Scalar52 = Scalar52([
        0x000ee6d76ba7632d,
        0x000ed50d71d84e02,
        0x00000000001ba634,
        0x0000000000000000,
        0x0000000000000000,
    ]);

    /// a and b with a + b = l
    static A: Scalar52 = Scalar52([
        0x0005236c07b3be89,
        0x0001bc3d2a67c0c4,
        0x000a4aa782aae3ee,
        0x0006b3f6e4fec4c4,
        0x00000532da9fab8c,
    ]);

    static B: Scalar52 = Scalar52([
        0x000d3fae55421564,
        0x000c2df24f65a4bc,
        0x0005b5587d69fb0b,
        0x00094c091b013b3b,
        0x00000acd25605473,
    ]);

    /// a - b mod l
    static AB: Scalar52 = Scalar52([
        0x000a46d80f677d12,
        0x0003787a54cf8188,
        0x0004954f0555c7dc,
        0x000d67edc9fd8989,
        0x00000a65b53f5718,
    ]);

    /// (2^512 - 1) mod l
    static C: Scalar52 = Scalar52([
        0x000611e3449c0f00,
        0x000a768859347a40,
        0x0007f5be65d00e1b,
        0x0009a3dceec73d21,
        0x00000399411b7c30,
    ]);

    #[test]
    fn mul_max() {
        assert_eq!(Scalar52::mul(&X, &X), XX);
    }

    #[test]
    fn montgomery_mul_max() {
        assert_eq!(Scalar52::montgomery_mul(&X, &X), XX_MONT);
    }

    #[test]
    fn mul() {
        assert_eq!(Scalar52::mul(&X, &Y), XY);
    }

    #[test]
    fn add_to_order_is_zero() {
        assert_eq!(Scalar52::add(&A, &B), Scalar52::ZERO);
    }

    #[test]
    fn sub() {
        assert_eq!(Scalar52::sub(&A, &B), AB);
    }

    #[test]
    fn mul_add_matches_mul_then_add() {
        let expected = Scalar52::add(&Scalar52::mul(&XY, &Y), &A);
        assert_eq!(Scalar52::mul_add(&XY, &Y, &A), expected);
        // a * 1 + b = l = 0
        let one = Scalar52([1, 0, 0, 0, 0]);
        assert_eq!(Scalar52::mul_add(&A, &one, &B), Scalar52::ZERO);
    }

    #[test]
    fn from_bytes_wide_all_ones() {
        let bignum = [255u8; 64];
        assert_eq!(Scalar52::from_bytes_wide(&bignum), C);
    }

    #[test]
    fn bytes_round_trip_below_order() {
        let bytes = A.to_bytes();
        assert_eq!(Scalar52::from_bytes(&bytes), A);
    }
}
