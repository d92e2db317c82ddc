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

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\), using \\(64\\)-bit
//! limbs with \\(128\\)-bit products.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;

use zeroize::Zeroize;

/// A `FieldElement51` represents an element of the field
/// \\( \mathbb Z / (2\^{255} - 19)\\).
///
/// The element is stored in radix \\(2\^{51}\\) as five `u64` limbs.
/// Limbs may grow to \\(2\^{54}\\) between reductions, so the
/// representation is not canonical; use `to_bytes` to compare.
#[derive(Copy, Clone)]
pub struct FieldElement51(pub(crate) [u64; 5]);

const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

// 16p, limb by limb.  Adding it before a subtraction keeps every limb
// positive as long as the subtrahend limbs are below 2^54.
const SIXTEEN_P: [u64; 5] = [
    36028797018963664,
    36028797018963952,
    36028797018963952,
    36028797018963952,
    36028797018963952,
];

impl Debug for FieldElement51 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement51({:?})", &self.0[..])
    }
}

impl Zeroize for FieldElement51 {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'b> AddAssign<&'b FieldElement51> for FieldElement51 {
    fn add_assign(&mut self, rhs: &'b FieldElement51) {
        for i in 0..5 {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<'a, 'b> Add<&'b FieldElement51> for &'a FieldElement51 {
    type Output = FieldElement51;
    fn add(self, rhs: &'b FieldElement51) -> FieldElement51 {
        let mut output = *self;
        output += rhs;
        output
    }
}

impl<'b> SubAssign<&'b FieldElement51> for FieldElement51 {
    fn sub_assign(&mut self, rhs: &'b FieldElement51) {
        let result = &*self - rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Sub<&'b FieldElement51> for &'a FieldElement51 {
    type Output = FieldElement51;
    fn sub(self, rhs: &'b FieldElement51) -> FieldElement51 {
        FieldElement51::reduce([
            (self.0[0] + SIXTEEN_P[0]) - rhs.0[0],
            (self.0[1] + SIXTEEN_P[1]) - rhs.0[1],
            (self.0[2] + SIXTEEN_P[2]) - rhs.0[2],
            (self.0[3] + SIXTEEN_P[3]) - rhs.0[3],
            (self.0[4] + SIXTEEN_P[4]) - rhs.0[4],
        ])
    }
}

impl<'b> MulAssign<&'b FieldElement51> for FieldElement51 {
    fn mul_assign(&mut self, rhs: &'b FieldElement51) {
        let result = &*self * rhs;
        self.0 = result.0;
    }
}

/// \\(64 \times 64 \rightarrow 128\\)-bit multiply.
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

impl<'a, 'b> Mul<&'b FieldElement51> for &'a FieldElement51 {
    type Output = FieldElement51;

    #[rustfmt::skip] // keep alignment of c* calculations
    fn mul(self, rhs: &'b FieldElement51) -> FieldElement51 {
        let a: &[u64; 5] = &self.0;
        let b: &[u64; 5] = &rhs.0;

        debug_assert!(a.iter().all(|&x| x < (1 << 54)));
        debug_assert!(b.iter().all(|&x| x < (1 << 54)));

        // 2^255 = 19 (mod p), so limbs that wrap past 2^255 pick up a
        // factor of 19.  Fold it into b while the values are still 64 bits.
        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        let     c0: u128 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let mut c1: u128 = m(a[1], b[0]) + m(a[0], b[1])  + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let mut c2: u128 = m(a[2], b[0]) + m(a[1], b[1])  + m(a[0], b[2])  + m(a[4], b3_19) + m(a[3], b4_19);
        let mut c3: u128 = m(a[3], b[0]) + m(a[2], b[1])  + m(a[1], b[2])  + m(a[0], b[3])  + m(a[4], b4_19);
        let mut c4: u128 = m(a[4], b[0]) + m(a[3], b[1])  + m(a[2], b[2])  + m(a[1], b[3])  + m(a[0], b[4]);

        FieldElement51::carry_wide(c0, &mut c1, &mut c2, &mut c3, &mut c4)
    }
}

impl<'a> Neg for &'a FieldElement51 {
    type Output = FieldElement51;
    fn neg(self) -> FieldElement51 {
        let mut output = *self;
        output.negate();
        output
    }
}

impl ConditionallySelectable for FieldElement51 {
    fn conditional_select(a: &FieldElement51, b: &FieldElement51, choice: Choice) -> FieldElement51 {
        FieldElement51([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }

    fn conditional_swap(a: &mut FieldElement51, b: &mut FieldElement51, choice: Choice) {
        for i in 0..5 {
            u64::conditional_swap(&mut a.0[i], &mut b.0[i], choice);
        }
    }

    fn conditional_assign(&mut self, other: &FieldElement51, choice: Choice) {
        for i in 0..5 {
            self.0[i].conditional_assign(&other.0[i], choice);
        }
    }
}

impl FieldElement51 {
    pub(crate) const fn from_limbs(limbs: [u64; 5]) -> FieldElement51 {
        FieldElement51(limbs)
    }

    /// The scalar \\( 0 \\).
    pub const ZERO: FieldElement51 = FieldElement51::from_limbs([0, 0, 0, 0, 0]);
    /// The scalar \\( 1 \\).
    pub const ONE: FieldElement51 = FieldElement51::from_limbs([1, 0, 0, 0, 0]);
    /// The scalar \\( -1 \\).
    pub const MINUS_ONE: FieldElement51 = FieldElement51::from_limbs([
        2251799813685228,
        2251799813685247,
        2251799813685247,
        2251799813685247,
        2251799813685247,
    ]);

    /// Invert the sign of this field element in place.
    pub fn negate(&mut self) {
        let neg = FieldElement51::reduce([
            SIXTEEN_P[0] - self.0[0],
            SIXTEEN_P[1] - self.0[1],
            SIXTEEN_P[2] - self.0[2],
            SIXTEEN_P[3] - self.0[3],
            SIXTEEN_P[4] - self.0[4],
        ]);
        self.0 = neg.0;
    }

    /// Carry every limb in parallel.  Afterwards each limb is below
    /// \\(2\^{51} + 2\^{13} \cdot 19\\).
    #[inline(always)]
    fn reduce(mut limbs: [u64; 5]) -> FieldElement51 {
        let c0 = limbs[0] >> 51;
        let c1 = limbs[1] >> 51;
        let c2 = limbs[2] >> 51;
        let c3 = limbs[3] >> 51;
        let c4 = limbs[4] >> 51;

        limbs[0] &= LOW_51_BIT_MASK;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        limbs[0] += c4 * 19;
        limbs[1] += c0;
        limbs[2] += c1;
        limbs[3] += c2;
        limbs[4] += c3;

        FieldElement51(limbs)
    }

    /// Shared tail of `mul` and `pow2k`: carry 128-bit coefficients
    /// down to 64-bit limbs.
    #[inline(always)]
    fn carry_wide(c0: u128, c1: &mut u128, c2: &mut u128, c3: &mut u128, c4: &mut u128) -> FieldElement51 {
        // Each coefficient is below 2^(2*54 + 6.3), so the carries fit
        // in a u64 and after one pass every value fits in a u64 again.
        *c1 += (c0 >> 51) as u64 as u128;
        let mut out0: u64 = (c0 as u64) & LOW_51_BIT_MASK;
        *c2 += (*c1 >> 51) as u64 as u128;
        let out1: u64 = (*c1 as u64) & LOW_51_BIT_MASK;
        *c3 += (*c2 >> 51) as u64 as u128;
        let out2: u64 = (*c2 as u64) & LOW_51_BIT_MASK;
        *c4 += (*c3 >> 51) as u64 as u128;
        let out3: u64 = (*c3 as u64) & LOW_51_BIT_MASK;

        let carry: u64 = (*c4 >> 51) as u64;
        let out4: u64 = (*c4 as u64) & LOW_51_BIT_MASK;

        // c4 has no factors of 19, so carry < 2^(2*54 + 2.33 - 51) and
        // 19 * carry still fits in a u64.
        out0 += carry * 19;

        // out0 may now exceed 2^51 slightly; one more carry into out1.
        let out1 = out1 + (out0 >> 51);
        out0 &= LOW_51_BIT_MASK;

        FieldElement51([out0, out1, out2, out3, out4])
    }

    /// Load a `FieldElement51` from the low 255 bits of a 256-bit input.
    ///
    /// The high bit is ignored and the input is not required to be
    /// canonical: \\(2\^{255} - 18\\) decodes to \\(1\\).
    #[rustfmt::skip] // keep alignment of bit shifts
    pub const fn from_bytes(bytes: &[u8; 32]) -> FieldElement51 {
        const fn load8_at(input: &[u8; 32], i: usize) -> u64 {
               (input[i] as u64)
            | ((input[i + 1] as u64) << 8)
            | ((input[i + 2] as u64) << 16)
            | ((input[i + 3] as u64) << 24)
            | ((input[i + 4] as u64) << 32)
            | ((input[i + 5] as u64) << 40)
            | ((input[i + 6] as u64) << 48)
            | ((input[i + 7] as u64) << 56)
        }

        FieldElement51(
        // bits [  0, 51)
        [  load8_at(bytes,  0)        & LOW_51_BIT_MASK
        // bits [ 51,102)
        , (load8_at(bytes,  6) >>  3) & LOW_51_BIT_MASK
        // bits [102,153)
        , (load8_at(bytes, 12) >>  6) & LOW_51_BIT_MASK
        // bits [153,204)
        , (load8_at(bytes, 19) >>  1) & LOW_51_BIT_MASK
        // bits [204,255)
        , (load8_at(bytes, 24) >> 12) & LOW_51_BIT_MASK
        ])
    }

    /// Serialize this `FieldElement51` to its canonical 32-byte
    /// little-endian encoding.  Bit 255 is always clear.
    #[rustfmt::skip] // keep alignment of s[*] calculations
    pub fn to_bytes(self) -> [u8; 32] {
        // After one carry pass h is at most a little over 2^255, so
        // h = qp + r with q in {0, 1}.
        let mut limbs = FieldElement51::reduce(self.0).0;

        // h >= p iff h + 19 >= 2^255, so q is the carry out of h + 19.
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        // h - q*p = h + 19q - q*2^255; the last term is dropped below.
        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        let mut s = [0u8; 32];
        s[ 0] =   limbs[0]                           as u8;
        s[ 1] =  (limbs[0] >>  8)                    as u8;
        s[ 2] =  (limbs[0] >> 16)                    as u8;
        s[ 3] =  (limbs[0] >> 24)                    as u8;
        s[ 4] =  (limbs[0] >> 32)                    as u8;
        s[ 5] =  (limbs[0] >> 40)                    as u8;
        s[ 6] = ((limbs[0] >> 48) | (limbs[1] << 3)) as u8;
        s[ 7] =  (limbs[1] >>  5)                    as u8;
        s[ 8] =  (limbs[1] >> 13)                    as u8;
        s[ 9] =  (limbs[1] >> 21)                    as u8;
        s[10] =  (limbs[1] >> 29)                    as u8;
        s[11] =  (limbs[1] >> 37)                    as u8;
        s[12] = ((limbs[1] >> 45) | (limbs[2] << 6)) as u8;
        s[13] =  (limbs[2] >>  2)                    as u8;
        s[14] =  (limbs[2] >> 10)                    as u8;
        s[15] =  (limbs[2] >> 18)                    as u8;
        s[16] =  (limbs[2] >> 26)                    as u8;
        s[17] =  (limbs[2] >> 34)                    as u8;
        s[18] =  (limbs[2] >> 42)                    as u8;
        s[19] = ((limbs[2] >> 50) | (limbs[3] << 1)) as u8;
        s[20] =  (limbs[3] >>  7)                    as u8;
        s[21] =  (limbs[3] >> 15)                    as u8;
        s[22] =  (limbs[3] >> 23)                    as u8;
        s[23] =  (limbs[3] >> 31)                    as u8;
        s[24] =  (limbs[3] >> 39)                    as u8;
        s[25] = ((limbs[3] >> 47) | (limbs[4] << 4)) as u8;
        s[26] =  (limbs[4] >>  4)                    as u8;
        s[27] =  (limbs[4] >> 12)                    as u8;
        s[28] =  (limbs[4] >> 20)                    as u8;
        s[29] =  (limbs[4] >> 28)                    as u8;
        s[30] =  (limbs[4] >> 36)                    as u8;
        s[31] =  (limbs[4] >> 44)                    as u8;

        debug_assert!((s[31] & 0b1000_0000u8) == 0u8);

        s
    }

    /// Given \\(k > 0\\), return \\(\mathtt{self}\^{2\^k}\\).
    #[rustfmt::skip] // keep alignment of c* calculations
    pub fn pow2k(&self, mut k: u32) -> FieldElement51 {
        debug_assert!(k > 0);

        let mut a: [u64; 5] = self.0;

        loop {
            debug_assert!(a.iter().all(|&x| x < (1 << 54)));

            let a3_19 = 19 * a[3];
            let a4_19 = 19 * a[4];

            let     c0: u128 = m(a[0],  a[0]) + 2 * ( m(a[1], a4_19) + m(a[2], a3_19) );
            let mut c1: u128 = m(a[3], a3_19) + 2 * ( m(a[0],  a[1]) + m(a[2], a4_19) );
            let mut c2: u128 = m(a[1],  a[1]) + 2 * ( m(a[0],  a[2]) + m(a[4], a3_19) );
            let mut c3: u128 = m(a[4], a4_19) + 2 * ( m(a[0],  a[3]) + m(a[1],  a[2]) );
            let mut c4: u128 = m(a[2],  a[2]) + 2 * ( m(a[0],  a[4]) + m(a[1],  a[3]) );

            a = FieldElement51::carry_wide(c0, &mut c1, &mut c2, &mut c3, &mut c4).0;

            k -= 1;
            if k == 0 {
                break;
            }
        }

        FieldElement51(a)
    }

    /// Returns the square of this field element.
    pub fn square(&self) -> FieldElement51 {
        self.pow2k(1)
    }

    /// Returns 2 times the square of this field element.
    pub fn square2(&self) -> FieldElement51 {
        let mut square = self.pow2k(1);
        for i in 0..5 {
            square.0[i] *= 2;
        }
        square
    }
}
