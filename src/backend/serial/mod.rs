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

//! Serial implementations of field, scalar and point arithmetic.
//!
//! Point operations use the mixed-model strategy described in
//! [`curve_models`]; the multiplication algorithms built on them live in
//! [`scalar_mul`].

pub mod curve_models;

pub mod scalar_mul;

pub mod u64;
