// -*- mode: rust; -*-
//
// This file is part of ed25519-engine.
// See LICENSE for licensing information.

use criterion::{criterion_group, criterion_main, Criterion};

mod helpers {
    use rand_core::{CryptoRng, Error, RngCore};

    /// A fake RNG which simply returns zeroes.
    pub struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0u32
        }

        fn next_u64(&mut self) -> u64 {
            0u64
        }

        fn fill_bytes(&mut self, bytes: &mut [u8]) {
            bytes.fill(0);
        }

        fn try_fill_bytes(&mut self, bytes: &mut [u8]) -> Result<(), Error> {
            self.fill_bytes(bytes);
            Ok(())
        }
    }

    impl CryptoRng for ZeroRng {}
}

mod ed25519_benches {
    use super::helpers::ZeroRng;
    use super::*;
    use ed25519_engine::edwards::EdwardsPoint;
    use ed25519_engine::engine::{self, KeyMaterial};
    use ed25519_engine::scalar::Scalar;
    use ed25519_engine::{Keypair, Signature};
    use rand_core::OsRng;

    fn sign(c: &mut Criterion) {
        let keypair: Keypair = Keypair::generate(&mut OsRng);
        let msg: &[u8] = b"";

        c.bench_function("Ed25519 signing", move |b| b.iter(|| keypair.sign(msg)));
    }

    fn sign_from_seed(c: &mut Criterion) {
        let key = KeyMaterial::from_bytes(&[7u8; 32]).unwrap();
        let msg: &[u8] = b"";

        c.bench_function("Ed25519 signing from a bare seed", move |b| {
            b.iter(|| engine::sign(msg, &key))
        });
    }

    fn verify(c: &mut Criterion) {
        let keypair: Keypair = Keypair::generate(&mut OsRng);
        let msg: &[u8] = b"";
        let sig: Signature = keypair.sign(msg);

        c.bench_function("Ed25519 signature verification", move |b| {
            b.iter(|| keypair.verify(msg, &sig))
        });
    }

    fn verify_strict(c: &mut Criterion) {
        let keypair: Keypair = Keypair::generate(&mut OsRng);
        let msg: &[u8] = b"";
        let sig: Signature = keypair.sign(msg);

        c.bench_function("Ed25519 strict signature verification", move |b| {
            b.iter(|| keypair.verify_strict(msg, &sig))
        });
    }

    fn key_generation(c: &mut Criterion) {
        let mut rng = ZeroRng;

        c.bench_function("Ed25519 keypair generation", move |b| {
            b.iter(|| Keypair::generate(&mut rng))
        });
    }

    fn basepoint_mul(c: &mut Criterion) {
        let s = Scalar::from_bytes_mod_order([0x5au8; 32]);

        c.bench_function("Constant-time fixed-base scalar mul", move |b| {
            b.iter(|| EdwardsPoint::mul_base(&s))
        });
    }

    fn vartime_double_base_mul(c: &mut Criterion) {
        let a = Scalar::from_bytes_mod_order([0x9au8; 32]);
        let b_scalar = Scalar::from_bytes_mod_order([0x3cu8; 32]);
        let point = EdwardsPoint::mul_base(&a);

        c.bench_function("Variable-time aA+bB, A variable, B fixed", move |b| {
            b.iter(|| EdwardsPoint::vartime_double_scalar_mul_basepoint(&a, &point, &b_scalar))
        });
    }

    criterion_group! {
        name = ed25519_benches;
        config = Criterion::default();
        targets =
            sign,
            sign_from_seed,
            verify,
            verify_strict,
            key_generation,
            basepoint_mul,
            vartime_double_base_mul,
    }
}

criterion_main!(ed25519_benches::ed25519_benches);
