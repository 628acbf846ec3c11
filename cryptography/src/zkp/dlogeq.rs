// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Chaum-Pedersen proof of equality of discrete logarithms.

use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::context::GroupContext;
use crate::utils::hash::hash_to_scalar;
use crate::utils::rng::CRng;

/**
 * Proof of equality of discrete logarithms.
 *
 * Given public values `h1`, `g1`, `h2`, `g2` and a secret `x`, proves
 * equality of logarithms such that `h1 = g1^x` and `h2 = g2^x` modulo `p`.
 * This is required to prove correctness of
 * [partial decryption][`crate::dkgd::recipient::Recipient::decryption_factor`]:
 * there `g1 = g`, `h1` is the participant's verification key, `g2` is the
 * aggregated ciphertext component and `h2` the decryption factor.
 *
 * The challenge transcript is `[h1, h2, a1, a2]`, hashed in that order.
 *
 * # Examples
 *
 * ```
 * use cryptography::context::GroupContext;
 * use cryptography::zkp::dlogeq::DlogEqProof;
 * use cryptography::utils::rng::os_rng;
 * use cryptography::arith;
 * use num_bigint::BigUint;
 *
 * let ctx = GroupContext::new(BigUint::from(1019u32)).unwrap();
 * let mut rng = os_rng();
 *
 * let secret_x = ctx.random_scalar(&mut rng);
 * let g2 = arith::mod_exp(ctx.g(), &BigUint::from(7u32), ctx.p());
 * let h1 = arith::mod_exp(ctx.g(), &secret_x, ctx.p());
 * let h2 = arith::mod_exp(&g2, &secret_x, ctx.p());
 *
 * let proof = DlogEqProof::prove(&ctx, ctx.g(), &h1, &g2, &h2, &secret_x, &mut rng);
 * assert!(proof.verify(&ctx, ctx.g(), &h1, &g2, &h2));
 * ```
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DlogEqProof {
    /// Commitment under the first base, `g1^w mod p`
    pub a1: BigUint,
    /// Commitment under the second base, `g2^w mod p`
    pub a2: BigUint,
    /// Challenge response `(w - x * c) mod q`
    pub r: BigUint,
}

impl DlogEqProof {
    /// Construct a discrete log equality proof from the given values.
    pub(crate) fn new(a1: BigUint, a2: BigUint, r: BigUint) -> Self {
        Self { a1, a2, r }
    }

    /// Prove equality of discrete logarithms such that `h1 = g1^secret_x`
    /// and `h2 = g2^secret_x`.
    ///
    /// The response `w - x * c` can go negative; it is reduced into
    /// `[0, q)` with the signed reduction before leaving the prover.
    #[allow(clippy::too_many_arguments)]
    pub fn prove<R: CRng>(
        ctx: &GroupContext,
        g1: &BigUint,
        h1: &BigUint,
        g2: &BigUint,
        h2: &BigUint,
        secret_x: &BigUint,
        rng: &mut R,
    ) -> Self {
        let w = ctx.random_scalar(rng);
        let a1 = arith::mod_exp(g1, &w, ctx.p());
        let a2 = arith::mod_exp(g2, &w, ctx.p());

        let c = hash_to_scalar(&[h1, h2, &a1, &a2], ctx.q());
        let r = arith::mod_signed(
            &(BigInt::from(w) - BigInt::from(secret_x * &c)),
            ctx.q(),
        );

        Self::new(a1, a2, r)
    }

    /// Verify this proof of equality of discrete logarithms.
    ///
    /// Accepts iff `a1 ≡ g1^r * h1^c (mod p)` and
    /// `a2 ≡ g2^r * h2^c (mod p)` for the recomputed challenge `c`.
    #[must_use]
    pub fn verify(
        &self,
        ctx: &GroupContext,
        g1: &BigUint,
        h1: &BigUint,
        g2: &BigUint,
        h2: &BigUint,
    ) -> bool {
        let c = hash_to_scalar(&[h1, h2, &self.a1, &self.a2], ctx.q());

        let check1 = (arith::mod_exp(g1, &self.r, ctx.p()) * arith::mod_exp(h1, &c, ctx.p()))
            % ctx.p()
            == self.a1;
        let check2 = (arith::mod_exp(g2, &self.r, ctx.p()) * arith::mod_exp(h2, &c, ctx.p()))
            % ctx.p()
            == self.a2;

        check1 && check2
    }
}
