// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Error type for this library

use thiserror::Error;

/**
 * Error type for the cryptography library.
 *
 * This error type is used to represent all possible errors that can occur
 * within the cryptography library.
 */
#[derive(Error, Debug)]
pub enum Error {
    /// Occurs when the configured prime is not a safe prime, or no generator
    /// of the order-`q` subgroup can be found.
    #[error("{0}")]
    InvalidGroup(String),

    /// Occurs when a modular inverse is requested for an argument that is
    /// not coprime with the modulus.
    #[error("{0}")]
    NotInvertible(String),

    /// Occurs when verification of a distributed key generation
    /// [subshare][`crate::dkgd::dealer::VerifiableShare`] fails.
    #[error("{0}")]
    ShareVerificationFailed(String),

    /// Occurs when threshold parameters are inconsistent, such as a
    /// commitment vector whose length differs from the threshold.
    #[error("{0}")]
    InvalidParameters(String),
}
