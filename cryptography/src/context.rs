// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Group parameters shared by all beacon participants.

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::utils::rng::CRng;
use crate::utils::Error;

/**
 * The group parameters of a beacon execution.
 *
 * A [`GroupContext`] holds a safe prime `p`, the prime order
 * `q = (p - 1) / 2` of the working subgroup of ℤ_p*, and a generator `g`
 * of that subgroup. All participants must be configured with the same `p`;
 * `q` and `g` are derived deterministically, so agreement on `p` implies
 * agreement on the whole context.
 *
 * Group arithmetic is performed modulo `p`; exponent arithmetic modulo `q`.
 *
 * # Examples
 *
 * ```
 * use cryptography::context::GroupContext;
 * use num_bigint::BigUint;
 *
 * let ctx = GroupContext::new(BigUint::from(1019u32)).unwrap();
 * assert_eq!(*ctx.q(), BigUint::from(509u32));
 * ```
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupContext {
    /// The safe prime defining ℤ_p*.
    p: BigUint,
    /// The prime order of the working subgroup.
    q: BigUint,
    /// A generator of the order-`q` subgroup.
    g: BigUint,
}

impl GroupContext {
    /// Construct a group context from a safe prime.
    ///
    /// The order `q` and the generator `g` are derived from `p`: the
    /// generator search walks `x = 2, 3, ...` until `x^2 ≢ 1 (mod p)` and
    /// `x^q ≢ 1 (mod p)`, then uses `x^2 mod p`, which is guaranteed to lie
    /// in the order-`q` subgroup.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidGroup`] if `p` or `(p - 1) / 2` is not prime, or
    ///   the generator search exhausts (impossible for a safe prime).
    pub fn new(p: BigUint) -> Result<Self, Error> {
        if p <= BigUint::from(5u32) || !arith::is_prime(&p) {
            return Err(Error::InvalidGroup(format!("{} is not a usable prime", p)));
        }

        let q = (&p - BigUint::one()) / 2u32;
        if !arith::is_prime(&q) {
            return Err(Error::InvalidGroup(format!(
                "{} is not a safe prime: ({} - 1) / 2 is composite",
                p, p
            )));
        }

        let g = Self::find_generator(&p, &q)?;

        Ok(Self { p, q, g })
    }

    /// Search for a generator of the order-`q` subgroup.
    fn find_generator(p: &BigUint, q: &BigUint) -> Result<BigUint, Error> {
        let one = BigUint::one();
        let mut x = BigUint::from(2u32);

        while &x < p {
            let x_squared = (&x * &x) % p;
            if x_squared != one && arith::mod_exp(&x, q, p) != one {
                return Ok(x_squared);
            }
            x += 1u32;
        }

        Err(Error::InvalidGroup(format!(
            "no generator of the order-{} subgroup of Z_{}*",
            q, p
        )))
    }

    /// The safe prime `p`.
    #[must_use]
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The subgroup order `q`.
    #[must_use]
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// The subgroup generator `g`.
    #[must_use]
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Sample a scalar uniformly from `{1, ..., q}`.
    pub fn random_scalar<R: CRng>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_range(&BigUint::one(), &(&self.q + BigUint::one()))
    }

    /// Sample a plaintext uniformly from `{1, ..., p - 1}`.
    pub fn random_message<R: CRng>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_range(&BigUint::one(), &self.p)
    }
}
