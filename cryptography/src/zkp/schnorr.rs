// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Schnorr proof of knowledge of discrete logarithm.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::context::GroupContext;
use crate::utils::hash::hash_to_scalar;
use crate::utils::rng::CRng;

/**
 * Schnorr proof of knowledge of discrete logarithm.
 *
 * Given a public value `y`, proves knowledge of a secret `r` such that
 * `y = g^r mod p`, where `g` is the group generator.
 *
 * The challenge transcript is `[g, y, u]`, hashed in that order; the proof
 * carries the challenge so the verifier checks both that the challenge
 * was derived from the transcript and that the response equation holds.
 *
 * # Examples
 *
 * ```
 * use cryptography::context::GroupContext;
 * use cryptography::zkp::schnorr::SchnorrProof;
 * use cryptography::utils::rng::os_rng;
 * use cryptography::arith;
 * use num_bigint::BigUint;
 *
 * let ctx = GroupContext::new(BigUint::from(1019u32)).unwrap();
 * let mut rng = os_rng();
 *
 * let secret_r = ctx.random_scalar(&mut rng);
 * let public_y = arith::mod_exp(ctx.g(), &secret_r, ctx.p());
 *
 * let proof = SchnorrProof::prove(&ctx, &public_y, &secret_r, &mut rng);
 * assert!(proof.verify(&ctx, &public_y));
 * ```
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchnorrProof {
    /// Prover commitment `g^w mod p`
    pub u: BigUint,
    /// Fiat-Shamir challenge
    pub c: BigUint,
    /// Challenge response `(w + c * r) mod q`
    pub z: BigUint,
}

impl SchnorrProof {
    /// Construct a Schnorr proof from the given values.
    pub(crate) fn new(u: BigUint, c: BigUint, z: BigUint) -> Self {
        Self { u, c, z }
    }

    /// Prove knowledge of the discrete logarithm `secret_r` for
    /// `y = g^secret_r mod p`.
    pub fn prove<R: CRng>(
        ctx: &GroupContext,
        public_y: &BigUint,
        secret_r: &BigUint,
        rng: &mut R,
    ) -> Self {
        let w = ctx.random_scalar(rng);
        let u = arith::mod_exp(ctx.g(), &w, ctx.p());
        let c = hash_to_scalar(&[ctx.g(), public_y, &u], ctx.q());
        let z = (&w + &c * secret_r) % ctx.q();

        Self::new(u, c, z)
    }

    /// Verify this Schnorr proof of knowledge.
    ///
    /// Accepts iff the carried challenge matches the transcript hash *and*
    /// `g^z ≡ u * y^c (mod p)`.
    #[must_use]
    pub fn verify(&self, ctx: &GroupContext, public_y: &BigUint) -> bool {
        let expected = hash_to_scalar(&[ctx.g(), public_y, &self.u], ctx.q());
        if expected != self.c {
            return false;
        }

        let lhs = arith::mod_exp(ctx.g(), &self.z, ctx.p());
        let rhs = (&self.u * arith::mod_exp(public_y, &self.c, ctx.p())) % ctx.p();

        lhs == rhs
    }
}
