// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Modular arithmetic over arbitrary-precision integers.
//!
//! Group arithmetic lives in ℤ_p* and uses [`BigUint`]; intermediate values
//! that can go negative (Lagrange numerators, differences of indices,
//! Chaum-Pedersen responses) are computed in [`BigInt`] and routed through
//! [`mod_signed`] before any further use. Modular inverses are only defined
//! for positive arguments, so callers must reduce first.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::utils::Error;

/// Compute `base^exponent mod modulus` for a non-negative exponent.
#[must_use]
pub fn mod_exp(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exponent, modulus)
}

/// Reduce a signed value into the range `[0, modulus)`.
///
/// This is the Euclidean remainder: `mod_signed(-x, m) = m - (x mod m)` for
/// `0 < x mod m`, unlike the sign-following `%` operator on [`BigInt`].
#[must_use]
pub fn mod_signed(value: &BigInt, modulus: &BigUint) -> BigUint {
    let modulus = BigInt::from(modulus.clone());
    let reduced = value.mod_floor(&modulus);
    // mod_floor with a positive modulus is always non-negative
    reduced
        .to_biguint()
        .expect("Euclidean remainder is non-negative")
}

/// Compute the multiplicative inverse of `value` modulo `modulus`.
///
/// # Errors
///
/// Returns [`Error::NotInvertible`] if `value` is zero or not coprime with
/// the modulus.
pub fn mod_inv(value: &BigUint, modulus: &BigUint) -> Result<BigUint, Error> {
    if value.is_zero() {
        return Err(Error::NotInvertible(
            "zero has no multiplicative inverse".to_string(),
        ));
    }

    let a = BigInt::from(value.clone());
    let m = BigInt::from(modulus.clone());
    let egcd = a.extended_gcd(&m);

    if !egcd.gcd.is_one() {
        return Err(Error::NotInvertible(format!(
            "{} is not invertible modulo {}",
            value, modulus
        )));
    }

    Ok(mod_signed(&egcd.x, modulus))
}

/// Witnesses for the Miller-Rabin primality test. This set is deterministic
/// for all inputs below 3.3 * 10^24, which covers the test-vector primes;
/// for larger inputs the test remains a strong probabilistic check.
const MILLER_RABIN_WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Miller-Rabin primality test.
///
/// Used to validate configured group parameters; safe-prime *selection* is
/// the responsibility of the surrounding harness.
#[must_use]
pub fn is_prime(candidate: &BigUint) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);

    if candidate < &two {
        return false;
    }
    for witness in MILLER_RABIN_WITNESSES {
        if *candidate == BigUint::from(witness) {
            return true;
        }
    }
    if candidate.is_even() {
        return false;
    }

    // candidate - 1 = d * 2^s with d odd
    let candidate_minus_one = candidate - &one;
    let s = candidate_minus_one
        .trailing_zeros()
        .expect("an even positive number has trailing zeros");
    let d = &candidate_minus_one >> s;

    'witness: for witness in MILLER_RABIN_WITNESSES {
        let witness = BigUint::from(witness);
        if &witness >= candidate {
            continue;
        }

        let mut x = witness.modpow(&d, candidate);
        if x == one || x == candidate_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, candidate);
            if x == candidate_minus_one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_mod_exp() {
        assert_eq!(mod_exp(&int(4), &int(13), &int(497)), int(445));
        assert_eq!(mod_exp(&int(5), &int(0), &int(7)), int(1));
    }

    #[test]
    fn test_mod_signed_negative_values() {
        assert_eq!(mod_signed(&BigInt::from(-7), &int(5)), int(3));
        assert_eq!(mod_signed(&BigInt::from(-5), &int(5)), int(0));
        assert_eq!(mod_signed(&BigInt::from(12), &int(5)), int(2));
        // mod(-x, q) = q - (x mod q) for x not a multiple of q
        assert_eq!(mod_signed(&BigInt::from(-1), &int(509)), int(508));
    }

    #[test]
    fn test_mod_inv_roundtrip() {
        let q = int(509);
        for value in [1u64, 2, 3, 42, 100, 508] {
            let inverse = mod_inv(&int(value), &q).expect("inverse should exist");
            assert_eq!((int(value) * inverse) % &q, int(1), "a * a^-1 = 1 mod q");
        }
    }

    #[test]
    fn test_mod_inv_not_coprime() {
        assert!(mod_inv(&int(6), &int(9)).is_err());
        assert!(mod_inv(&int(0), &int(9)).is_err());
    }

    #[test]
    fn test_is_prime() {
        for prime in [2u64, 3, 5, 509, 1019, 50021, 100043] {
            assert!(is_prime(&int(prime)), "{} should be prime", prime);
        }
        for composite in [0u64, 1, 4, 15, 1001, 1017, 100041] {
            assert!(!is_prime(&int(composite)), "{} should be composite", composite);
        }
    }
}
