// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Cryptography library for the HERB++ randomness beacon
//!
//! All operations work over the prime-order subgroup of ℤ_p* defined by a
//! safe prime `p`, with arbitrary-precision integers throughout. Group
//! arithmetic is performed modulo `p`; exponent arithmetic modulo the
//! subgroup order `q = (p - 1) / 2`.

/// Modular arithmetic over arbitrary-precision integers.
pub mod arith;
/// Group parameters shared by all participants.
pub mod context;
pub mod cryptosystem;
pub mod dkgd;
/// Utilities such as error types, hashing and random number generation.
pub mod utils;
pub mod zkp;
