// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Zero knowledge proofs
//!
//! Both proofs are sigma protocols made non-interactive by the Fiat-Shamir
//! transform: the verifier's challenge is the
//! [transcript hash][`crate::utils::hash::hash_to_scalar`] of the prover's
//! public values. The transcript orderings documented on each proof are
//! normative; every participant must hash the same byte sequence.
//!
//! # [Schnorr][`crate::zkp::schnorr`]
//!
//! Proves knowledge of a discrete logarithm. Accompanies every encryption
//! share to show knowledge of the encryption randomness.
//!
//! # [Discrete log equality][`crate::zkp::dlogeq`]
//!
//! Chaum-Pedersen proof that two discrete logarithms are equal. Accompanies
//! every partial decryption to show it was raised to the participant's
//! share. See
//! [`decryption_factor`][`crate::dkgd::recipient::Recipient::decryption_factor`].

/// Discrete logarithm equality proofs.
pub mod dlogeq;

/// Schnorr knowledge of discrete logarithm proofs.
pub mod schnorr;
