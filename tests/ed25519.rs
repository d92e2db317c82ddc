// -*- mode: rust; -*-
//
// This file is part of ed25519-engine.
// See LICENSE for licensing information.

//! Integration tests for ed25519-engine.

use ed25519_engine::engine::{self, KeyMaterial};
use ed25519_engine::*;

#[cfg(test)]
mod vectors {
    use super::*;

    struct RfcVector {
        secret: &'static str,
        public: &'static str,
        message: &'static str,
        signature: &'static str,
    }

    // RFC 8032, section 7.1.
    const RFC8032_VECTORS: [RfcVector; 5] = [
    // TEST 1 (empty message)
    RfcVector {
        secret: "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
        public: "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
        message: "",
        signature: "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
                    5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
    },
    // TEST 2 (one byte)
    RfcVector {
        secret: "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
        public: "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
        message: "72",
        signature: "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
                    085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
    },
    // TEST 3 (two bytes)
    RfcVector {
        secret: "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
        public: "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
        message: "af82",
        signature: "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac\
                    18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
    },
    // TEST 1024 (1023 bytes)
    RfcVector {
        secret: "f5e5767cf153319517630f226876b86c8160cc583bc013744c6bf255f5cc0ee5",
        public: "278117fc144c72340f67d0f2316e8386ceffbf2b2428c9c51fef7c597f1d426e",
        message: "08b8b2b733424243760fe426a4b54908632110a66c2f6591eabd3345e3e4eb98\
                  fa6e264bf09efe12ee50f8f54e9f77b1e355f6c50544e23fb1433ddf73be84d8\
                  79de7c0046dc4996d9e773f4bc9efe5738829adb26c81b37c93a1b270b20329d\
                  658675fc6ea534e0810a4432826bf58c941efb65d57a338bbd2e26640f89ffbc\
                  1a858efcb8550ee3a5e1998bd177e93a7363c344fe6b199ee5d02e82d522c4fe\
                  ba15452f80288a821a579116ec6dad2b3b310da903401aa62100ab5d1a36553e\
                  06203b33890cc9b832f79ef80560ccb9a39ce767967ed628c6ad573cb116dbef\
                  efd75499da96bd68a8a97b928a8bbc103b6621fcde2beca1231d206be6cd9ec7\
                  aff6f6c94fcd7204ed3455c68c83f4a41da4af2b74ef5c53f1d8ac70bdcb7ed1\
                  85ce81bd84359d44254d95629e9855a94a7c1958d1f8ada5d0532ed8a5aa3fb2\
                  d17ba70eb6248e594e1a2297acbbb39d502f1a8c6eb6f1ce22b3de1a1f40cc24\
                  554119a831a9aad6079cad88425de6bde1a9187ebb6092cf67bf2b13fd65f270\
                  88d78b7e883c8759d2c4f5c65adb7553878ad575f9fad878e80a0c9ba63bcbcc\
                  2732e69485bbc9c90bfbd62481d9089beccf80cfe2df16a2cf65bd92dd597b07\
                  07e0917af48bbb75fed413d238f5555a7a569d80c3414a8d0859dc65a46128ba\
                  b27af87a71314f318c782b23ebfe808b82b0ce26401d2e22f04d83d1255dc51a\
                  ddd3b75a2b1ae0784504df543af8969be3ea7082ff7fc9888c144da2af58429e\
                  c96031dbcad3dad9af0dcbaaaf268cb8fcffead94f3c7ca495e056a9b47acdb7\
                  51fb73e666c6c655ade8297297d07ad1ba5e43f1bca32301651339e22904cc8c\
                  42f58c30c04aafdb038dda0847dd988dcda6f3bfd15c4b4c4525004aa06eeff8\
                  ca61783aacec57fb3d1f92b0fe2fd1a85f6724517b65e614ad6808d6f6ee34df\
                  f7310fdc82aebfd904b01e1dc54b2927094b2db68d6f903b68401adebf5a7e08\
                  d78ff4ef5d63653a65040cf9bfd4aca7984a74d37145986780fc0b16ac451649\
                  de6188a7dbdf191f64b5fc5e2ab47b57f7f7276cd419c17a3ca8e1b939ae49e4\
                  88acba6b965610b5480109c8b17b80e1b7b750dfc7598d5d5011fd2dcc5600a3\
                  2ef5b52a1ecc820e308aa342721aac0943bf6686b64b2579376504ccc493d97e\
                  6aed3fb0f9cd71a43dd497f01f17c0e2cb3797aa2a2f256656168e6c496afc5f\
                  b93246f6b1116398a346f1a641f3b041e989f7914f90cc2c7fff357876e506b5\
                  0d334ba77c225bc307ba537152f3f1610e4eafe595f6d9d90d11faa933a15ef1\
                  369546868a7f3a45a96768d40fd9d03412c091c6315cf4fde7cb68606937380d\
                  b2eaaa707b4c4185c32eddcdd306705e4dc1ffc872eeee475a64dfac86aba41c\
                  0618983f8741c5ef68d3a101e8a3b8cac60c905c15fc910840b94c00a0b9d0",
        signature: "0aab4c900501b3e24d7cdf4663326a3a87df5e4843b2cbdb67cbf6e460fec350\
                    aa5371b1508f9f4528ecea23c436d94b5e8fcd4f681e30a6ac00a9704a188a03",
    },
    // TEST SHA(abc)
    RfcVector {
        secret: "833fe62409237b9d62ec77587520911e9a759cec1d19755b7da901b96dca3d42",
        public: "ec172b93ad5e563bf4932c70e1245034c35467ef2efd4d64ebf819683467e2bf",
        message: "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
                  2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        signature: "dc2a4459e7369633a52b1bf277839a00201009a3efbf3ecb69bea2186c26b589\
                    09351fc9ac90b3ecfdfbc7c66431e0303dca179c138ac17ad9bef1177331a704",
    },
    ];

    #[test]
    fn against_reference_implementation() {
        for (i, v) in RFC8032_VECTORS.iter().enumerate() {
            let secret = hex::decode(v.secret).unwrap();
            let public = hex::decode(v.public).unwrap();
            let message = hex::decode(v.message).unwrap();
            let expected = hex::decode(v.signature).unwrap();

            let keypair = engine::make_keypair(&secret).unwrap();
            assert_eq!(
                &keypair.public().to_bytes()[..],
                &public[..],
                "public key mismatch in vector {}",
                i
            );

            let signature = keypair.sign(&message);
            assert_eq!(
                &signature.to_bytes()[..],
                &expected[..],
                "signature mismatch in vector {}",
                i
            );
            assert!(
                engine::verify(&message, &expected, &public).unwrap(),
                "signature failed to verify in vector {}",
                i
            );

            let public_key = PublicKey::from_bytes(&public).unwrap();
            let parsed = Signature::from_bytes(&expected).unwrap();
            assert!(public_key.verify_strict(&message, &parsed).is_ok());
        }
    }

    #[test]
    fn empty_message_first_vector() {
        let secret = hex_literal::hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let public = hex_literal::hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
        let expected = hex_literal::hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155"
            "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );

        let keypair = Keypair::from_seed(&secret);
        assert_eq!(keypair.public().to_bytes(), public);
        assert_eq!(keypair.sign(b"").to_bytes(), expected);
    }

    #[test]
    fn every_key_form_reproduces_the_vectors() {
        for v in RFC8032_VECTORS.iter() {
            let secret = hex::decode(v.secret).unwrap();
            let message = hex::decode(v.message).unwrap();
            let expected = hex::decode(v.signature).unwrap();

            let seed = KeyMaterial::from_bytes(&secret).unwrap();
            let keypair = engine::make_keypair(&secret).unwrap();
            let expanded = KeyMaterial::from_bytes(&keypair.secret().to_bytes()).unwrap();
            let whole = KeyMaterial::from(keypair);

            for key in [&seed, &expanded, &whole] {
                assert_eq!(&engine::sign(&message, key).to_bytes()[..], &expected[..]);
            }
        }
    }
}

#[cfg(test)]
mod integrations {
    use super::*;
    use ed25519_engine::edwards::EdwardsPoint;
    use ed25519_engine::scalar::{clamp_integer, Scalar};
    use sha2::{Digest, Sha512};

    fn random_seed() -> [u8; 32] {
        rand::random()
    }

    #[test]
    fn sign_is_deterministic() {
        for _ in 0..8 {
            let seed = random_seed();
            let message: Vec<u8> = (0..48).map(|_| rand::random::<u8>()).collect();
            let first = engine::make_keypair(&seed).unwrap().sign(&message);
            let second = engine::make_keypair(&seed).unwrap().sign(&message);
            assert_eq!(first.to_bytes(), second.to_bytes());
        }
    }

    #[test]
    fn sign_verify_round_trip() {
        let good: &[u8] = "test message".as_bytes();
        let bad: &[u8] = "wrong message".as_bytes();

        let keypair = Keypair::from_seed(&random_seed());
        let good_sig = keypair.sign(good);
        let bad_sig = keypair.sign(bad);

        assert!(
            keypair.verify(good, &good_sig).is_ok(),
            "Verification of a valid signature failed!"
        );
        assert!(
            keypair.verify(good, &bad_sig).is_err(),
            "Verification of a signature on a different message passed!"
        );
        assert!(
            keypair.verify(bad, &good_sig).is_err(),
            "Verification of a signature on a different message passed!"
        );
    }

    #[test]
    fn round_trip_many_lengths() {
        let keypair = Keypair::from_seed(&random_seed());
        let public = keypair.public().to_bytes();
        for len in [0usize, 1, 31, 32, 63, 64, 65, 127, 128, 1000] {
            let message = vec![0x5cu8; len];
            let signature = keypair.sign(&message).to_bytes();
            assert!(engine::verify(&message, &signature, &public).unwrap());
        }
    }

    #[test]
    fn single_bit_flips_are_rejected() {
        let keypair = Keypair::from_seed(&random_seed());
        let message = b"flip a bit anywhere and this stops verifying".to_vec();
        let signature = keypair.sign(&message).to_bytes();
        let public = keypair.public().to_bytes();

        for &(byte, bit) in &[(0usize, 0u8), (5, 3), (20, 7), (43, 1)] {
            let mut m = message.clone();
            m[byte] ^= 1 << bit;
            assert!(!engine::verify(&m, &signature, &public).unwrap());
        }
        for &(byte, bit) in &[(0usize, 0u8), (17, 4), (31, 7), (32, 0), (47, 5), (62, 2), (63, 0)] {
            let mut s = signature;
            s[byte] ^= 1 << bit;
            assert!(!engine::verify(&message, &s, &public).unwrap());
        }
        for &(byte, bit) in &[(0usize, 0u8), (9, 6), (16, 2), (31, 7)] {
            let mut p = public;
            p[byte] ^= 1 << bit;
            assert!(!engine::verify(&message, &signature, &p).unwrap());
        }
    }

    #[test]
    fn high_bits_of_s_fail_verification() {
        let keypair = Keypair::from_seed(&random_seed());
        let signature = keypair.sign(b"canonical").to_bytes();
        let public = keypair.public().to_bytes();

        for bit in 5..8 {
            let mut s = signature;
            s[63] |= 1 << bit;
            assert!(!engine::verify(b"canonical", &s, &public).unwrap());
            let err = Signature::from_bytes(&s).unwrap_err();
            assert_eq!(err.kind(), InternalError::ScalarFormatError);
        }
    }

    #[test]
    fn off_curve_public_key_fails_verification() {
        let keypair = Keypair::from_seed(&random_seed());
        let signature = keypair.sign(b"who signed this?");

        // (y^2 - 1) / (d y^2 + 1) is not a square for y = 2.
        let mut off_curve = [0u8; 32];
        off_curve[0] = 2;

        assert!(!engine::verify(b"who signed this?", &signature.to_bytes(), &off_curve).unwrap());
        let err = PublicKey::from_bytes(&off_curve)
            .unwrap()
            .verify(b"who signed this?", &signature)
            .unwrap_err();
        assert_eq!(err.kind(), InternalError::PointDecompressionError);
    }

    #[test]
    fn negative_zero_is_its_own_error() {
        // y = 1 is the identity, whose x is 0; setting the sign bit asks for -0.
        let mut negative_zero = [0u8; 32];
        negative_zero[0] = 1;
        negative_zero[31] = 0x80;

        let err = edwards::CompressedEdwardsY(negative_zero).decompress().unwrap_err();
        assert_eq!(err.kind(), InternalError::NegativeZeroError);

        let mut no_root = [0u8; 32];
        no_root[0] = 2;
        let other = edwards::CompressedEdwardsY(no_root).decompress().unwrap_err();
        assert_ne!(err, other);
    }

    #[test]
    fn keypair_matches_independent_derivation() {
        for _ in 0..16 {
            let seed = random_seed();
            let keypair = engine::make_keypair(&seed).unwrap();

            let digest = Sha512::digest(seed);
            let mut lower = [0u8; 32];
            lower.copy_from_slice(&digest[..32]);
            let a = Scalar::from_bytes_mod_order(clamp_integer(lower));
            let expected = EdwardsPoint::mul_base(&a).compress();

            assert_eq!(keypair.public().as_bytes(), expected.as_bytes());
            assert_eq!(&keypair.secret().to_bytes()[..], digest.as_slice());
        }
    }

    #[test]
    fn open_recovers_message() {
        let key = KeyMaterial::from_bytes(&random_seed()).unwrap();
        let public = key.public_key().to_bytes();
        let signed = engine::sign_attached(b"recover me", &key);

        assert_eq!(engine::open(&signed, &public).unwrap(), b"recover me");
    }

    #[test]
    fn open_zeroes_output_on_failure() {
        let key = KeyMaterial::from_bytes(&random_seed()).unwrap();
        let public = key.public_key().to_bytes();
        let mut signed = engine::sign_attached(b"unauthenticated plaintext", &key);
        signed[10] ^= 0x01;

        let mut out = vec![0xffu8; signed.len()];
        let err = engine::open_into(&signed, &public, &mut out).unwrap_err();
        assert_eq!(err.kind(), InternalError::VerifyError);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn mismatched_public_key_in_sign_does_not_verify() {
        let ours = Keypair::from_seed(&[1u8; 32]);
        let theirs = Keypair::from_seed(&[2u8; 32]);

        let signature = ours.secret().sign(b"m", theirs.public());
        assert!(theirs.verify(b"m", &signature).is_err());
        assert!(ours.verify(b"m", &signature).is_err());
    }

    #[test]
    fn key_from_hash_bytes() {
        let mut h = Sha512::new();
        h.update(b"some other 512-bit source");
        let digest = h.clone().finalize();

        let from_digest = Keypair::from_hash(h);
        let from_bytes = engine::make_keypair_from_hash(digest.as_slice()).unwrap();
        assert_eq!(from_digest.to_bytes()[..], from_bytes.to_bytes()[..]);

        let signature = from_bytes.sign(b"m");
        assert!(from_digest.verify(b"m", &signature).is_ok());
    }

    #[cfg(feature = "rand_core")]
    #[test]
    fn generated_keypairs_sign_and_verify() {
        let keypair = Keypair::generate(&mut rand_core::OsRng);
        let signature = keypair.sign(b"fresh");
        assert!(keypair.verify_strict(b"fresh", &signature).is_ok());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serialisation {
    use super::*;

    #[test]
    fn serialize_deserialize_signature() {
        let keypair = Keypair::from_seed(&[3u8; 32]);
        let signature = keypair.sign(b"serde");

        let encoded = bincode::serialize(&signature).unwrap();
        let decoded: Signature = bincode::deserialize(&encoded).unwrap();
        assert_eq!(signature, decoded);
    }

    #[test]
    fn serialize_deserialize_public_key() {
        let public = *Keypair::from_seed(&[4u8; 32]).public();

        let encoded = bincode::serialize(&public).unwrap();
        // u64 length prefix then the key itself.
        assert_eq!(encoded.len(), 8 + PUBLIC_KEY_LENGTH);
        let decoded: PublicKey = bincode::deserialize(&encoded).unwrap();
        assert_eq!(public, decoded);
    }

    #[test]
    fn serialize_deserialize_secret_and_keypair() {
        let secret = SecretKey::from_bytes(&[5u8; 32]).unwrap();
        let encoded = bincode::serialize(&secret).unwrap();
        let decoded: SecretKey = bincode::deserialize(&encoded).unwrap();
        assert_eq!(secret.as_bytes(), decoded.as_bytes());

        let keypair = Keypair::from_secret_key(&secret);
        let encoded = bincode::serialize(&keypair).unwrap();
        let decoded: Keypair = bincode::deserialize(&encoded).unwrap();
        assert_eq!(keypair.to_bytes()[..], decoded.to_bytes()[..]);
    }

    #[test]
    fn deserialize_rejects_wrong_length() {
        let encoded = bincode::serialize(serde_bytes::Bytes::new(&[0u8; 31])).unwrap();
        assert!(bincode::deserialize::<PublicKey>(&encoded).is_err());
        assert!(bincode::deserialize::<Signature>(&encoded).is_err());
    }
}
