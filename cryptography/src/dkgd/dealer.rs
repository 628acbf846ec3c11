// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Pedersen-style verifiable secret sharing: dealer

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::context::GroupContext;
use crate::dkgd::recipient::ParticipantPosition;
use crate::utils::rng::CRng;

/**
 * A dealer in the distributed key generation protocol.
 *
 * * NOTE: this API does not represent private subshares as encrypted
 *   values. The messaging layer delivers subshares point-to-point; channel
 *   confidentiality is the transport's concern.
 *
 * The dealer generates a random polynomial `f` of degree `t - 1` and
 * distributes `n` evaluations `f(1), ..., f(n)` of it, one per
 * participant, including itself. The dealer also publishes `t` checking
 * values `g^{a_0}, ..., g^{a_{t-1}}` that allow the participants to verify
 * their subshares. The constant term `a_0` is the dealer's secret
 * contribution to the group key, and the first checking value `g^{a_0}`
 * doubles as the dealer's public-key share; no separate broadcast of it is
 * needed.
 *
 * At least `t` of the `n` participants are needed to decrypt ciphertexts
 * encrypted with the group key.
 *
 * # Examples
 *
 * ```
 * use cryptography::context::GroupContext;
 * use cryptography::dkgd::dealer::Dealer;
 * use cryptography::dkgd::recipient::ParticipantPosition;
 * use cryptography::utils::rng::os_rng;
 * use num_bigint::BigUint;
 *
 * let ctx = GroupContext::new(BigUint::from(1019u32)).unwrap();
 * let mut rng = os_rng();
 *
 * let dealer = Dealer::generate(3, &ctx, &mut rng);
 * let shares = dealer.verifiable_shares(5, &ctx);
 *
 * let position = ParticipantPosition::new(2);
 * assert!(shares.for_recipient(&position).verify(&ctx, &position));
 * ```
 */
#[derive(Clone)]
pub struct Dealer {
    /// The polynomial used by this dealer to share their secret.
    polynomial: Polynomial,
}

impl Dealer {
    /// Construct a new [`Dealer`] by randomly generating a `threshold - 1`
    /// degree polynomial.
    pub fn generate<R: CRng>(threshold: usize, ctx: &GroupContext, rng: &mut R) -> Self {
        let polynomial = Polynomial::generate(threshold, ctx, rng);
        Self { polynomial }
    }

    /// Compute the `participants` subshares distributed by this dealer and
    /// its `threshold` checking values.
    ///
    /// Each subshare is computed as `f(i)` for `i = 1, ..., participants`;
    /// each checking value as `g^{a_l} mod p` for the coefficients `a_l`.
    pub fn verifiable_shares(&self, participants: usize, ctx: &GroupContext) -> DealerShares {
        let shares = (1..=participants)
            .map(|i| {
                let i = u32::try_from(i).expect("participant count fits in u32");
                self.polynomial.eval(i, ctx.q())
            })
            .collect();

        let checking_values = self
            .polynomial
            .coefficients
            .iter()
            .map(|a| arith::mod_exp(ctx.g(), a, ctx.p()))
            .collect();

        DealerShares {
            shares,
            checking_values,
        }
    }
}

/**
 * A polynomial of degree `t - 1` over the exponent ring modulo `q`.
 *
 * The polynomial is defined by `t` coefficients sampled uniformly from
 * `{1, ..., q}`; its constant term is the dealer's secret contribution.
 */
#[derive(Clone)]
pub struct Polynomial {
    pub(crate) coefficients: Vec<BigUint>,
}

impl Polynomial {
    /// Generate a random polynomial with `threshold` coefficients.
    pub fn generate<R: CRng>(threshold: usize, ctx: &GroupContext, rng: &mut R) -> Self {
        let coefficients = (0..threshold).map(|_| ctx.random_scalar(rng)).collect();
        Self { coefficients }
    }

    /// Evaluate the polynomial at a small integer point using Horner's
    /// method, modulo `q`.
    pub fn eval(&self, x: u32, q: &BigUint) -> BigUint {
        let x = BigUint::from(x);
        let mut sum = BigUint::zero();

        for coefficient in self.coefficients.iter().rev() {
            sum = (sum * &x + coefficient) % q;
        }

        sum
    }
}

/**
 * The set of verifiable subshares produced by one dealer.
 *
 * A [`DealerShares`] contains one subshare for each of the `n`
 * participants, together with the dealer's `t` checking values. The
 * subshare for participant `i` is stored at index `i - 1`.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerShares {
    /// The subshares distributed to each participant, offset by -1.
    pub shares: Vec<BigUint>,
    /// The checking values for the dealer's polynomial coefficients.
    pub checking_values: Vec<BigUint>,
}

impl DealerShares {
    /// Return the subshare for the requested recipient together with the
    /// checking values needed to verify it.
    ///
    /// # Panics
    ///
    /// Panics if the position exceeds the number of shares; positions are
    /// drawn from the participant view, which has exactly `n` entries.
    #[must_use]
    pub fn for_recipient(&self, recipient: &ParticipantPosition) -> VerifiableShare {
        let index = usize::try_from(recipient.0 - 1).expect("ParticipantPosition(u32) fits usize");
        VerifiableShare::new(self.shares[index].clone(), self.checking_values.clone())
    }
}

/**
 * One verifiable subshare distributed by one dealer to one recipient.
 *
 * A [`VerifiableShare`] contains a secret scalar and the dealer's `t`
 * checking values necessary to verify the correctness of the subshare. The
 * private share held by a recipient is the sum modulo `q` of the `n`
 * secret scalars it receives from all dealers, including itself.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableShare {
    /// the secret subshare as a raw scalar
    pub value: BigUint,
    /// the checking values for the dealer's polynomial
    pub checking_values: Vec<BigUint>,
}

impl VerifiableShare {
    /// Construct a new [`VerifiableShare`] from the given values.
    pub fn new(value: BigUint, checking_values: Vec<BigUint>) -> Self {
        Self {
            value,
            checking_values,
        }
    }

    /// Verify this subshare against its dealer's checking values.
    ///
    /// Checks `g^value ≡ Π_l C_l^(i^l) (mod p)` where `i` is the
    /// recipient's position. Exponents `i^l` are reduced modulo `q`, which
    /// is sound because every checking value lies in the order-`q`
    /// subgroup.
    #[must_use]
    pub fn verify(&self, ctx: &GroupContext, position: &ParticipantPosition) -> bool {
        let lhs = arith::mod_exp(ctx.g(), &self.value, ctx.p());

        let i = BigUint::from(position.0);
        let mut power = BigUint::one();
        let mut rhs = BigUint::one();
        for checking_value in &self.checking_values {
            rhs = (rhs * arith::mod_exp(checking_value, &power, ctx.p())) % ctx.p();
            power = (power * &i) % ctx.q();
        }

        lhs == rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::rng::os_rng;

    fn context() -> GroupContext {
        GroupContext::new(BigUint::from(1019u32)).unwrap()
    }

    #[test]
    fn test_polynomial_eval_horner() {
        let q = BigUint::from(509u32);
        // f(x) = 3 + 2x + 5x^2
        let polynomial = Polynomial {
            coefficients: vec![
                BigUint::from(3u32),
                BigUint::from(2u32),
                BigUint::from(5u32),
            ],
        };

        assert_eq!(polynomial.eval(0, &q), BigUint::from(3u32));
        assert_eq!(polynomial.eval(1, &q), BigUint::from(10u32));
        assert_eq!(polynomial.eval(2, &q), BigUint::from(27u32));
    }

    #[test]
    fn test_all_subshares_verify() {
        let ctx = context();
        let mut rng = os_rng();
        let dealer = Dealer::generate(3, &ctx, &mut rng);
        let shares = dealer.verifiable_shares(5, &ctx);

        for i in 1..=5 {
            let position = ParticipantPosition::new(i);
            assert!(
                shares.for_recipient(&position).verify(&ctx, &position),
                "subshare for participant {} should verify",
                i
            );
        }
    }

    #[test]
    fn test_tampered_subshare_fails_verification() {
        let ctx = context();
        let mut rng = os_rng();
        let dealer = Dealer::generate(3, &ctx, &mut rng);
        let shares = dealer.verifiable_shares(5, &ctx);

        let position = ParticipantPosition::new(2);
        let mut share = shares.for_recipient(&position);
        share.value = (share.value + BigUint::one()) % ctx.q();

        assert!(
            !share.verify(&ctx, &position),
            "a tampered subshare must not verify"
        );
    }

    #[test]
    fn test_subshare_does_not_verify_at_wrong_position() {
        let ctx = context();
        // fixed polynomial with f(2) = 27 and f(3) = 54, so the two
        // positions demand distinct subshares
        let dealer = Dealer {
            polynomial: Polynomial {
                coefficients: vec![
                    BigUint::from(3u32),
                    BigUint::from(2u32),
                    BigUint::from(5u32),
                ],
            },
        };
        let shares = dealer.verifiable_shares(5, &ctx);

        let share = shares.for_recipient(&ParticipantPosition::new(2));
        assert!(!share.verify(&ctx, &ParticipantPosition::new(3)));
    }
}
