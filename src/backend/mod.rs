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

//! Arithmetic backends.
//!
//! Only the serial 64-bit backend is provided: field elements use
//! `u64` limbs with `u128` products, which every supported target can
//! express even where the multiply is not native.

pub mod serial;
