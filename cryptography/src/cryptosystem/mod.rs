// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Public key cryptosystems
//!
//! # [ElGamal][`crate::cryptosystem::elgamal`]
//!
//! Multiplicatively homomorphic encryption over the order-`q` subgroup of
//! ℤ_p*. Each beacon round aggregates the participants' ciphertexts into a
//! single product ciphertext, which is then decrypted by threshold
//! [partial decryption][`crate::dkgd::recipient::Recipient::decryption_factor`].

pub mod elgamal;
