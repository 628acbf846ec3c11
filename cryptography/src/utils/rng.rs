// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Random number generation

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/**
 * Marker trait to require a cryptographically secure random number generator.
 *
 * Every sampling function in this library takes `&mut impl CRng`, so each
 * beacon participant owns its random source and randomness never leaves the
 * node that generated it.
 */
pub trait CRng: RngCore + CryptoRng {}

impl<R: RngCore + CryptoRng> CRng for R {}

/// Returns the operating-system random number generator, the default
/// [`CRng`] for beacon nodes.
#[must_use]
pub fn os_rng() -> OsRng {
    OsRng
}
