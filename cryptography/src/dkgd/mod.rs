// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Distributed key generation and decryption
//!
//! This module models a one-shot Pedersen-style verifiable secret sharing
//! with two main abstractions:
//!
//! - [`dealer::Dealer`][`crate::dkgd::dealer::Dealer`]
//!
//!   A participant fulfilling the role of dealer. A dealer generates a
//!   random polynomial of degree `t - 1` and distributes one evaluation of
//!   it privately to every participant, including itself (acting as a
//!   recipient), together with a commitment vector of `t` checking values
//!   that lets each recipient verify its subshare without interaction.
//!
//! - [`recipient::Recipient`][`crate::dkgd::recipient::Recipient`]
//!
//!   A participant fulfilling the role of subshare recipient. A recipient
//!   collects one [`VerifiableShare`][`crate::dkgd::dealer::VerifiableShare`]
//!   from every participant, verifies them, and constructs
//!
//!   1) the group public key `h = g^s mod p` from the first checking
//!      values, where `s` is the unknown sum of all dealers' constant
//!      terms, and
//!   2) its private share `sh_i = Σ_j f_j(i) mod q` from the subshare
//!      values.
//!
//! # Distributed decryption
//!
//! Recipients compute partial decryptions of an aggregated ciphertext as
//! [`DecryptionFactor`][`crate::dkgd::recipient::DecryptionFactor`]
//! instances, each carrying a [proof][`crate::zkp::dlogeq`] of correctness.
//! Any `t` verified factors can be combined by Lagrange interpolation in
//! the exponent to recover the group decryption; see
//! [`combine`][`crate::dkgd::recipient::combine`].

/// Distributed key generation: dealer side.
pub mod dealer;

/// Distributed key generation and decryption: recipient side.
pub mod recipient;
