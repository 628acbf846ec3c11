// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

/*!
This file contains all the message structures exchanged between participants
in the beacon protocol. All individual message structs are unified under the
`ProtocolMessage` enum for type-safe handling.

Messages carry no signatures: the transport is unauthenticated by design,
and the integrity of every contribution is established by the NIZK it
carries (or, for subshares, by verification against the dealer's
commitment vector).
*/

use cryptography::cryptosystem::elgamal::Ciphertext;
use cryptography::dkgd::recipient::DecryptionFactor;
use cryptography::zkp::schnorr::SchnorrProof;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// The identity of a beacon participant, assigned by the configured view.
/// The transport tags every delivered message with its sender's identity.
pub type NodeId = String;

/// One dealer's contribution to another participant's private share,
/// together with the commitment vector that makes it verifiable. Sent
/// point-to-point during distributed key generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubshareMsg {
    /// the evaluation `f_j(i) mod q` of the dealer's polynomial at the
    /// receiver's position
    pub subshare: BigUint,
    /// the dealer's `t` checking values; the first doubles as the dealer's
    /// public-key share
    pub commitment: Vec<BigUint>,
}

/// A participant's encryption share for one beacon round: an ElGamal
/// ciphertext over a locally random plaintext, plus a Schnorr proof of
/// knowledge of the encryption randomness. Broadcast to all peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncShareMsg {
    /// the contribution `(a, b) = (g^r, m * h^r) mod p`
    pub ciphertext: Ciphertext,
    /// proof of knowledge of `r` for the statement `a = g^r`
    pub nizk: SchnorrProof,
    /// the round this share belongs to
    pub round: u64,
}

/// A participant's partial decryption of the round's aggregated
/// ciphertext, carrying its correctness proof and the aggregate it was
/// computed over. Broadcast to all peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecShareMsg {
    /// the decryption factor, the sender's verification key and the DLEQ
    /// proof binding them
    pub factor: DecryptionFactor,
    /// the aggregated ciphertext component `A = Π a_i mod p` the factor
    /// was computed over
    pub aggregate: BigUint,
    /// the round this share belongs to
    pub round: u64,
}

/// The beacon value for one completed round, reported to the client by the
/// node configured as replier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconReply {
    /// the completed round
    pub round: u64,
    /// the round's beacon output, an integer in `[0, p)`
    pub output: BigUint,
}

/// The set of peer-to-peer protocol messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProtocolMessage {
    /// DKG subshare distribution (unicast).
    Subshare(SubshareMsg),
    /// Beacon round encryption share (broadcast).
    EncShare(EncShareMsg),
    /// Beacon round partial decryption (broadcast).
    DecShare(DecShareMsg),
}
