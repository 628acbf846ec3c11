// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Transcript hashing.
//!
//! Fiat-Shamir challenges and the beacon output are derived by hashing the
//! decimal-string rendering of each transcript element, concatenated in the
//! order given by the caller. The serialization must be identical on every
//! node; callers are responsible for passing transcript elements in the
//! documented order.

use num_bigint::BigUint;
use sha2::Sha256;
use sha3::{Digest, Sha3_224};

/// Hash a transcript of group elements to a scalar modulo `q`.
///
/// Applies SHA3-224 to the concatenated base-10 representations of the
/// transcript elements, interprets the digest as a big-endian unsigned
/// integer, and reduces it modulo `q`.
#[must_use]
pub fn hash_to_scalar(transcript: &[&BigUint], q: &BigUint) -> BigUint {
    let mut hasher = Sha3_224::new();
    for element in transcript {
        hasher.update(element.to_str_radix(10).as_bytes());
    }
    let digest = hasher.finalize();

    BigUint::from_bytes_be(digest.as_slice()) % q
}

/// Derive a beacon output from a raw group element.
///
/// Applies SHA-256 to the base-10 representation of `value` and reduces the
/// digest modulo `p`, so the published output is unpredictable even when
/// the raw group element has algebraic structure.
#[must_use]
pub fn output_digest(value: &BigUint, p: &BigUint) -> BigUint {
    let mut hasher = Sha256::new();
    hasher.update(value.to_str_radix(10).as_bytes());
    let digest = hasher.finalize();

    BigUint::from_bytes_be(digest.as_slice()) % p
}
