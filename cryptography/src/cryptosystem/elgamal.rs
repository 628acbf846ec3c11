// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! ElGamal cryptosystem

use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::context::GroupContext;
use crate::utils::rng::CRng;
use crate::utils::Error;

/**
 * An `ElGamal` key pair.
 *
 * This struct represents a key pair in the `ElGamal` encryption scheme,
 * including the secret scalar value and the public group element.
 *
 * In the beacon protocol the group key pair is never held by any single
 * node; [`KeyPair`] exists for local encryption and for exercising the
 * cryptosystem laws in tests.
 *
 * # Examples
 *
 * ```
 * use cryptography::context::GroupContext;
 * use cryptography::cryptosystem::elgamal::KeyPair;
 * use cryptography::utils::rng::os_rng;
 * use num_bigint::BigUint;
 *
 * let ctx = GroupContext::new(BigUint::from(1019u32)).unwrap();
 * let mut rng = os_rng();
 *
 * let keypair = KeyPair::generate(&ctx, &mut rng);
 * let message = ctx.random_message(&mut rng);
 * let ciphertext = keypair.pkey.encrypt(&ctx, &message, &mut rng);
 *
 * let decrypted = keypair.decrypt(&ctx, &ciphertext).unwrap();
 * assert_eq!(message, decrypted);
 * ```
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPair {
    /// the private key as a raw scalar
    pub skey: BigUint,
    /// the public key
    pub pkey: PublicKey,
}

impl KeyPair {
    /// Construct a new key pair, generating fresh key material.
    pub fn generate<R: CRng>(ctx: &GroupContext, rng: &mut R) -> Self {
        let skey = ctx.random_scalar(rng);
        let pkey = PublicKey::new(arith::mod_exp(ctx.g(), &skey, ctx.p()));
        KeyPair { skey, pkey }
    }

    /// Decrypt the given ciphertext with this key pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInvertible`] if the ciphertext components are
    /// not group elements; this indicates a malformed ciphertext.
    pub fn decrypt(&self, ctx: &GroupContext, ciphertext: &Ciphertext) -> Result<BigUint, Error> {
        let shared = arith::mod_exp(&ciphertext.a, &self.skey, ctx.p());
        Ok((&ciphertext.b * arith::mod_inv(&shared, ctx.p())?) % ctx.p())
    }
}

/**
 * An `ElGamal` public key.
 *
 * This struct represents a public key in the `ElGamal` encryption scheme.
 * It contains the group element `y`, which is used in the encryption
 * process. During beacon rounds `y` is the jointly generated group key
 * `h = g^s mod p` whose secret `s` no participant knows.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKey {
    /// the public key as a raw group element
    pub y: BigUint,
}

impl PublicKey {
    /// Construct a public key from an existing group element.
    pub fn new(y: BigUint) -> Self {
        Self { y }
    }

    /// Encrypt the given message with this public key and the given
    /// randomness.
    ///
    /// Computes `(a, b) = (g^r, m * y^r) mod p`. The caller keeps `r`; the
    /// beacon protocol needs it to prove knowledge of the encryption
    /// randomness.
    pub fn encrypt_with_r(
        &self,
        ctx: &GroupContext,
        message: &BigUint,
        r: &BigUint,
    ) -> Ciphertext {
        let a = arith::mod_exp(ctx.g(), r, ctx.p());
        let b = (message * arith::mod_exp(&self.y, r, ctx.p())) % ctx.p();
        Ciphertext { a, b }
    }

    /// Encrypt the given message with this public key, sampling fresh
    /// randomness.
    pub fn encrypt<R: CRng>(
        &self,
        ctx: &GroupContext,
        message: &BigUint,
        rng: &mut R,
    ) -> Ciphertext {
        let r = ctx.random_scalar(rng);
        self.encrypt_with_r(ctx, message, &r)
    }
}

/**
 * An `ElGamal` ciphertext `(a, b) = (g^r, m * y^r) mod p`.
 *
 * Ciphertexts are multiplicatively homomorphic: the component-wise product
 * of two ciphertexts encrypts the product of their plaintexts. Beacon
 * rounds rely on this to aggregate all participants' contributions into a
 * single ciphertext before threshold decryption.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ciphertext {
    /// the randomness component `g^r`
    pub a: BigUint,
    /// the masked message component `m * y^r`
    pub b: BigUint,
}

impl Ciphertext {
    /// The identity ciphertext, which encrypts `1` with randomness `0`.
    pub fn identity() -> Self {
        Self {
            a: BigUint::one(),
            b: BigUint::one(),
        }
    }

    /// Homomorphic combination: the component-wise product modulo `p`.
    pub fn mul(&self, other: &Ciphertext, p: &BigUint) -> Ciphertext {
        Ciphertext {
            a: (&self.a * &other.a) % p,
            b: (&self.b * &other.b) % p,
        }
    }
}
