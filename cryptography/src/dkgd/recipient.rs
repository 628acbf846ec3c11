// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Pedersen-style verifiable secret sharing: recipient, partial
//! decryption and threshold combination

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::context::GroupContext;
use crate::cryptosystem::elgamal::Ciphertext;
use crate::dkgd::dealer::VerifiableShare;
use crate::utils::rng::CRng;
use crate::utils::Error;

/**
 * The 1-based position of a participant in the agreed view.
 *
 * Positions are the evaluation points of all sharing polynomials, so two
 * participants must never hold the same position.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantPosition(pub u32);

impl ParticipantPosition {
    /// Construct a position from a 1-based index.
    #[must_use]
    pub fn new(position: u32) -> Self {
        Self(position)
    }

    /// Construct a position from a 1-based `usize` index.
    ///
    /// # Panics
    ///
    /// Panics if the index does not fit in `u32`; views are far smaller.
    #[must_use]
    pub fn from_usize(position: usize) -> Self {
        Self(u32::try_from(position).expect("participant position fits in u32"))
    }
}

/**
 * A participant that has collected and verified subshares from every
 * dealer.
 *
 * A [`Recipient`] holds the participant's private share
 * `sh_i = Σ_j f_j(i) mod q` of the unknown group secret `s`. The share is
 * fixed for the lifetime of the beacon once constructed.
 *
 * # Examples
 *
 * ```
 * use cryptography::context::GroupContext;
 * use cryptography::dkgd::dealer::Dealer;
 * use cryptography::dkgd::recipient::{ParticipantPosition, Recipient};
 * use cryptography::utils::rng::os_rng;
 * use num_bigint::BigUint;
 *
 * let ctx = GroupContext::new(BigUint::from(1019u32)).unwrap();
 * let mut rng = os_rng();
 *
 * let dealers: Vec<Dealer> = (0..3).map(|_| Dealer::generate(2, &ctx, &mut rng)).collect();
 * let position = ParticipantPosition::new(1);
 * let shares: Vec<_> = dealers
 *     .iter()
 *     .map(|d| d.verifiable_shares(3, &ctx).for_recipient(&position))
 *     .collect();
 *
 * let (recipient, group_key) = Recipient::from_shares(&ctx, position, &shares).unwrap();
 * ```
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    /// This participant's position in the view.
    position: ParticipantPosition,
    /// The accumulated private share.
    share: BigUint,
}

impl Recipient {
    /// Construct a recipient from one verified subshare per dealer.
    ///
    /// Every subshare is re-verified against its checking values; the
    /// private share is the sum of the subshare values modulo `q`, and the
    /// group key is the product of the first checking values modulo `p`.
    ///
    /// # Errors
    ///
    /// - [`Error::ShareVerificationFailed`] if any subshare fails
    ///   verification.
    /// - [`Error::InvalidParameters`] if a subshare carries an empty
    ///   commitment vector.
    ///
    /// Returns the recipient and the group key `h = g^s mod p`.
    pub fn from_shares(
        ctx: &GroupContext,
        position: ParticipantPosition,
        shares: &[VerifiableShare],
    ) -> Result<(Recipient, BigUint), Error> {
        let mut share = BigUint::from(0u32);
        let mut group_key = BigUint::one();

        for verifiable_share in shares {
            let Some(public_key_share) = verifiable_share.checking_values.first() else {
                return Err(Error::InvalidParameters(
                    "subshare carries no checking values".to_string(),
                ));
            };
            if !verifiable_share.verify(ctx, &position) {
                return Err(Error::ShareVerificationFailed(format!(
                    "subshare for position {} does not match its checking values",
                    position.0
                )));
            }

            share = (share + &verifiable_share.value) % ctx.q();
            group_key = (group_key * public_key_share) % ctx.p();
        }

        Ok((Recipient { position, share }, group_key))
    }

    /// This participant's position.
    #[must_use]
    pub fn position(&self) -> &ParticipantPosition {
        &self.position
    }

    /// This participant's private share.
    #[must_use]
    pub fn share(&self) -> &BigUint {
        &self.share
    }

    /// The public verification key `g^{sh_i} mod p` for this share.
    #[must_use]
    pub fn verification_key(&self, ctx: &GroupContext) -> BigUint {
        arith::mod_exp(ctx.g(), &self.share, ctx.p())
    }

    /// Compute this participant's partial decryption of an aggregated
    /// ciphertext component `A`, together with a proof of correctness.
    ///
    /// The factor is `D = A^{sh_i} mod p`; the embedded proof shows
    /// `log_g(g^{sh_i}) = log_A(D)` without revealing the share.
    pub fn decryption_factor<R: CRng>(
        &self,
        ctx: &GroupContext,
        aggregate: &BigUint,
        rng: &mut R,
    ) -> DecryptionFactor {
        let value = arith::mod_exp(aggregate, &self.share, ctx.p());
        let verification_key = self.verification_key(ctx);
        let proof = crate::zkp::dlogeq::DlogEqProof::prove(
            ctx,
            ctx.g(),
            &verification_key,
            aggregate,
            &value,
            &self.share,
            rng,
        );

        DecryptionFactor {
            value,
            verification_key,
            proof,
        }
    }
}

/**
 * One participant's partial decryption of an aggregated ciphertext.
 *
 * Contains the decryption factor `D = A^{sh_i} mod p`, the participant's
 * verification key `Y = g^{sh_i} mod p`, and a
 * [discrete log equality proof][`crate::zkp::dlogeq::DlogEqProof`] that the
 * two exponents coincide.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecryptionFactor {
    /// the decryption factor `A^{sh_i} mod p`
    pub value: BigUint,
    /// the verification key `g^{sh_i} mod p`
    pub verification_key: BigUint,
    /// proof that the factor was raised to the same exponent as the
    /// verification key
    pub proof: crate::zkp::dlogeq::DlogEqProof,
}

impl DecryptionFactor {
    /// Verify the embedded proof against the carried verification key and
    /// the given aggregate `A`.
    #[must_use]
    pub fn verify(&self, ctx: &GroupContext, aggregate: &BigUint) -> bool {
        self.proof.verify(
            ctx,
            ctx.g(),
            &self.verification_key,
            aggregate,
            &self.value,
        )
    }
}

/// Compute the Lagrange coefficient `λ_i` for interpolation at zero over
/// the index set `indices`, in the exponent ring modulo `q`:
/// `λ_i = Π_{j ∈ indices, j ≠ i} j * (j - i)^{-1} mod q`.
///
/// The difference `j - i` can be negative and is routed through the signed
/// reduction before inversion.
///
/// # Errors
///
/// Returns [`Error::NotInvertible`] if two indices coincide modulo `q`;
/// positions in a view are distinct, so this indicates a caller bug.
pub fn lagrange_coefficient(q: &BigUint, i: u32, indices: &[u32]) -> Result<BigUint, Error> {
    let mut lambda = BigUint::one();

    for &j in indices {
        if j == i {
            continue;
        }
        let numerator = BigUint::from(j) % q;
        let difference = arith::mod_signed(&(BigInt::from(j) - BigInt::from(i)), q);
        let inverse = arith::mod_inv(&difference, q)?;

        lambda = (((lambda * numerator) % q) * inverse) % q;
    }

    Ok(lambda)
}

/// Combine `t` partial decryptions of an aggregated ciphertext into the
/// group plaintext.
///
/// Interpolates the factors in the exponent, `M = Π_i D_i^{λ_i} mod p`,
/// which reconstructs `A^s`; the plaintext is then `B * M^{-1} mod p`.
/// Callers pass exactly the factors of their chosen `t`-subset, keyed by
/// participant position.
///
/// # Errors
///
/// Returns [`Error::NotInvertible`] if the interpolated value is not a
/// group element, which indicates corrupted factors.
pub fn combine(
    ctx: &GroupContext,
    ciphertext: &Ciphertext,
    factors: &[(u32, BigUint)],
) -> Result<BigUint, Error> {
    let indices: Vec<u32> = factors.iter().map(|(i, _)| *i).collect();

    let mut interpolated = BigUint::one();
    for (i, value) in factors {
        let lambda = lagrange_coefficient(ctx.q(), *i, &indices)?;
        interpolated = (interpolated * arith::mod_exp(value, &lambda, ctx.p())) % ctx.p();
    }

    Ok((&ciphertext.b * arith::mod_inv(&interpolated, ctx.p())?) % ctx.p())
}
