// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Top-level beacon node actor.
//!
//! The actor is a single-threaded state machine: the transport delivers
//! one input at a time, the handler for the current state processes it to
//! completion, and all state mutation happens inside that handler. The
//! actor never blocks on a peer; everything it cannot act on yet is stored
//! in per-round maps and revisited when the node catches up.

use std::collections::BTreeMap;

use cryptography::context::GroupContext;
use cryptography::cryptosystem::elgamal::{Ciphertext, PublicKey};
use cryptography::dkgd::dealer::{Dealer, VerifiableShare};
use cryptography::dkgd::recipient::{combine, ParticipantPosition, Recipient};
use cryptography::utils::hash;
use cryptography::zkp::schnorr::SchnorrProof;
use enum_dispatch::enum_dispatch;
use num_bigint::BigUint;
use rand::rngs::OsRng;
use tracing::{debug, info, warn};

use super::handlers::*;
use crate::config::BeaconConfig;
use crate::messages::{
    BeaconReply, DecShareMsg, EncShareMsg, NodeId, ProtocolMessage, SubshareMsg,
};

// --- I. Actor-Specific I/O ---

/// The set of inputs that the `NodeActor` can process. The client sends
/// `Start`; everything else arrives from peers, tagged with the sender
/// identity by the transport.
#[enum_dispatch(NodeBoomerang)]
#[derive(Debug, Clone, PartialEq)]
pub enum NodeInput {
    /// Begin the protocol: deal subshares and enter key generation.
    Start(Start),
    /// A DKG subshare from a peer dealer.
    Subshare(ReceivedSubshare),
    /// A beacon round encryption share from a peer.
    EncShare(ReceivedEncShare),
    /// A beacon round partial decryption from a peer.
    DecShare(ReceivedDecShare),
}

/// The set of outputs that the `NodeActor` can produce for the embedding
/// application. Outbound protocol traffic is returned separately as
/// [`Outbound`] envelopes.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutput {
    /// Key generation completed; the node holds its private share and the
    /// group key.
    DkgComplete {
        /// the jointly generated group key `h = g^s mod p`
        group_key: BigUint,
    },
    /// A beacon round completed with the given output.
    RoundComplete {
        /// the completed round
        round: u64,
        /// the round's beacon output
        output: BigUint,
    },
    /// All configured rounds completed; the node is done.
    BeaconComplete {
        /// the number of rounds produced
        rounds: u64,
    },
    /// The protocol has failed fatally.
    Failed(FailureData),
    /// The input was invalid for the current state.
    InvalidInput(FailureData),
}

/// An outbound envelope produced by the actor for the transport to
/// deliver.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Send to a single peer.
    Unicast(NodeId, ProtocolMessage),
    /// Send to every peer except this node.
    Broadcast(ProtocolMessage),
    /// Report a completed round to the client (replier nodes only).
    Client(BeaconReply),
}

/// The protocol phase a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodePhase {
    Idle,
    KeyGen,
    Beacon,
    Complete,
    Failed,
}

/// The data resulting from a failure or an invalid input.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureData {
    pub phase: NodePhase,
    pub failure_msg: String,
}

/// The result of handling one input: an optional state transition, the
/// outputs for the embedding application, and the outbound envelopes.
pub(crate) type Transition = (Option<NodeState>, Vec<NodeOutput>, Vec<Outbound>);

// --- II. Node State ---

/// The states for the node actor.
#[enum_dispatch(NodeStateHandler)]
#[derive(Debug, Clone, Copy)]
pub(crate) enum NodeState {
    Idle,
    KeyGen,
    Beacon,
    Complete,
    Failed,
}

/// Per-round bookkeeping. Entries are keyed by the sender's 1-based view
/// position; once written they are never overwritten for the same key.
#[derive(Debug, Clone, Default)]
pub(crate) struct RoundState {
    /// `view_subciphertext[k]`: one encryption share per participant.
    pub(crate) subciphertexts: BTreeMap<u32, Ciphertext>,
    /// `view_subdecryption[k]`: one partial decryption per participant.
    pub(crate) subdecryptions: BTreeMap<u32, BigUint>,
}

// --- III. Node Actor ---

/// The beacon node actor.
#[derive(Debug)]
pub struct NodeActor {
    /// The current state.
    pub(crate) state: NodeState,

    /// This node's identity.
    pub(crate) me: NodeId,

    /// This node's 1-based position in the view.
    my_index: u32,

    /// The group parameters, identical on every node.
    ctx: GroupContext,

    /// The reconstruction threshold `t`.
    threshold: usize,

    /// The ordered participant view.
    view: Vec<NodeId>,

    /// Identity -> 1-based view position.
    view_id: BTreeMap<NodeId, u32>,

    /// Number of beacon rounds to run.
    round_max: u64,

    /// Whether this node reports outputs to the client.
    replier: bool,

    /// Reserved hook: present on the node state but never consulted by the
    /// current protocol.
    #[allow(dead_code)]
    byzantine: bool,

    /// This node's cryptographically secure random source.
    rng: OsRng,

    /// Verified subshares collected during DKG, keyed by dealer position.
    /// The self contribution counts as one of the `n` expected entries.
    subshares: BTreeMap<u32, VerifiableShare>,

    /// This node's accumulated share; fixed once DKG completes.
    recipient: Option<Recipient>,

    /// The group key `h = g^s mod p`; fixed once DKG completes.
    group_key: Option<BigUint>,

    /// Round bookkeeping, keyed by round number. Rounds ahead of
    /// `round_current` hold buffered out-of-order traffic.
    pub(crate) rounds: BTreeMap<u64, RoundState>,

    /// The highest round this node has entered; monotonically increasing.
    pub(crate) round_current: u64,
}

impl NodeActor {
    /// Create a new `NodeActor` for the participant `me` under the given
    /// configuration. The actor starts in the `Idle` state and does
    /// nothing until the client's `Start` arrives.
    pub fn new(me: NodeId, config: BeaconConfig) -> Result<Self, String> {
        let n = config.view.len();
        if n == 0 {
            return Err("the view must not be empty".to_string());
        }
        if config.threshold < 1 || config.threshold as usize > n {
            return Err(format!(
                "threshold must satisfy 1 <= t <= n, got t = {} with n = {}",
                config.threshold, n
            ));
        }

        let mut view_id = BTreeMap::new();
        for (index, identity) in config.view.iter().enumerate() {
            let position = u32::try_from(index + 1).expect("view position fits in u32");
            if view_id.insert(identity.clone(), position).is_some() {
                return Err(format!("duplicate identity {} in view", identity));
            }
        }

        let Some(&my_index) = view_id.get(&me) else {
            return Err(format!("local identity {} is not in the view", me));
        };

        let ctx = GroupContext::new(config.p).map_err(|e| e.to_string())?;

        Ok(Self {
            state: NodeState::Idle(Idle),
            me,
            my_index,
            ctx,
            threshold: config.threshold as usize,
            view: config.view,
            view_id,
            round_max: config.round_max,
            replier: config.replier,
            byzantine: false,
            rng: OsRng,
            subshares: BTreeMap::new(),
            recipient: None,
            group_key: None,
            rounds: BTreeMap::new(),
            round_current: 0,
        })
    }

    /// Handle an input to the node actor using enum_dispatch.
    pub fn handle_input(&mut self, input: NodeInput) -> (Vec<NodeOutput>, Vec<Outbound>) {
        let (new_state, outputs, outbound) = input.boomerang(self);

        self.state = new_state.unwrap_or(self.state);
        (outputs, outbound)
    }

    /// The group key, once DKG has completed.
    #[must_use]
    pub fn group_key(&self) -> Option<&BigUint> {
        self.group_key.as_ref()
    }

    /// Build failure data for the current phase.
    pub(crate) fn failure_data(&self, failure_msg: String) -> FailureData {
        FailureData {
            phase: self.phase(),
            failure_msg,
        }
    }

    fn phase(&self) -> NodePhase {
        match self.state {
            NodeState::Idle(_) => NodePhase::Idle,
            NodeState::KeyGen(_) => NodePhase::KeyGen,
            NodeState::Beacon(_) => NodePhase::Beacon,
            NodeState::Complete(_) => NodePhase::Complete,
            NodeState::Failed(_) => NodePhase::Failed,
        }
    }

    // --- DKG sub-machine ---

    /// Deal this node's subshares: pick a local polynomial, commit, send
    /// one evaluation to every peer, and record the self contribution.
    /// Called by the `Idle` handler on `Start`.
    pub(crate) fn start_key_gen(&mut self) -> Transition {
        let dealer = Dealer::generate(self.threshold, &self.ctx, &mut self.rng);
        let shares = dealer.verifiable_shares(self.view.len(), &self.ctx);

        let mut outbound = Vec::new();
        for (identity, &position) in &self.view_id {
            if position == self.my_index {
                continue;
            }
            let share = shares.for_recipient(&ParticipantPosition::new(position));
            outbound.push(Outbound::Unicast(
                identity.clone(),
                ProtocolMessage::Subshare(SubshareMsg {
                    subshare: share.value,
                    commitment: share.checking_values,
                }),
            ));
        }

        let own = shares.for_recipient(&ParticipantPosition::new(self.my_index));
        self.subshares.insert(self.my_index, own);
        info!(node = %self.me, "subshares dealt to all peers");

        // The Start may arrive after every peer's subshare has; the
        // completion check here is identical to the one in the subshare
        // handler.
        let (state, outputs, more) = self.check_dkg_complete();
        outbound.extend(more);
        (
            Some(state.unwrap_or(NodeState::KeyGen(KeyGen))),
            outputs,
            outbound,
        )
    }

    /// Verify and store a subshare from a peer dealer. Invalid subshares
    /// are fatal: the QUAL assumption says they cannot happen, so one
    /// arriving means the execution is unsound.
    pub(crate) fn receive_subshare(&mut self, from: &NodeId, msg: &SubshareMsg) -> Transition {
        let Some(&position) = self.view_id.get(from) else {
            return (
                None,
                vec![NodeOutput::InvalidInput(
                    self.failure_data(format!("subshare from unknown sender {}", from)),
                )],
                vec![],
            );
        };

        if self.subshares.contains_key(&position) {
            debug!(node = %self.me, from = %from, "duplicate subshare discarded");
            return (None, vec![], vec![]);
        }

        if msg.commitment.len() != self.threshold {
            return (
                Some(NodeState::Failed(Failed)),
                vec![NodeOutput::Failed(self.failure_data(format!(
                    "subshare from {} carries {} checking values, expected {}",
                    from,
                    msg.commitment.len(),
                    self.threshold
                )))],
                vec![],
            );
        }

        let share = VerifiableShare::new(msg.subshare.clone(), msg.commitment.clone());
        if !share.verify(&self.ctx, &ParticipantPosition::new(self.my_index)) {
            return (
                Some(NodeState::Failed(Failed)),
                vec![NodeOutput::Failed(self.failure_data(format!(
                    "subshare from {} failed verification",
                    from
                )))],
                vec![],
            );
        }

        self.subshares.insert(position, share);
        self.check_dkg_complete()
    }

    /// Shared DKG completion check: once all `n` subshares (including our
    /// own) are present, freeze the share and the group key and enter
    /// round 1.
    fn check_dkg_complete(&mut self) -> Transition {
        if self.subshares.len() < self.view.len() {
            return (None, vec![], vec![]);
        }

        let shares: Vec<VerifiableShare> = self.subshares.values().cloned().collect();
        let position = ParticipantPosition::new(self.my_index);
        match Recipient::from_shares(&self.ctx, position, &shares) {
            Ok((recipient, group_key)) => {
                info!(node = %self.me, "key generation complete");
                self.recipient = Some(recipient);
                self.group_key = Some(group_key.clone());

                let mut outputs = vec![NodeOutput::DkgComplete { group_key }];
                let mut outbound = Vec::new();

                if self.round_max == 0 {
                    outputs.push(NodeOutput::BeaconComplete { rounds: 0 });
                    return (Some(NodeState::Complete(Complete)), outputs, outbound);
                }

                self.round_current = 1;
                let state = self.pump_rounds(&mut outputs, &mut outbound);
                (
                    Some(state.unwrap_or(NodeState::Beacon(Beacon))),
                    outputs,
                    outbound,
                )
            }
            Err(e) => (
                Some(NodeState::Failed(Failed)),
                vec![NodeOutput::Failed(self.failure_data(e.to_string()))],
                vec![],
            ),
        }
    }

    // --- Beacon round sub-machine ---

    /// Route an encryption share by its carried round.
    pub(crate) fn receive_enc_share(&mut self, from: &NodeId, msg: &EncShareMsg) -> Transition {
        let Some(&position) = self.view_id.get(from) else {
            return (
                None,
                vec![NodeOutput::InvalidInput(
                    self.failure_data(format!("encryption share from unknown sender {}", from)),
                )],
                vec![],
            );
        };

        // rounds are numbered from 1; round 0 never carries traffic
        if msg.round == 0 || msg.round < self.round_current {
            debug!(node = %self.me, from = %from, round = msg.round, "past-round encryption share discarded");
            return (None, vec![], vec![]);
        }

        if !msg.nizk.verify(&self.ctx, &msg.ciphertext.a) {
            warn!(node = %self.me, from = %from, round = msg.round, "invalid encryption share proof discarded");
            return (None, vec![], vec![]);
        }

        let slot = self.rounds.entry(msg.round).or_default();
        if slot.subciphertexts.contains_key(&position) {
            debug!(node = %self.me, from = %from, round = msg.round, "duplicate encryption share discarded");
            return (None, vec![], vec![]);
        }
        slot.subciphertexts.insert(position, msg.ciphertext.clone());

        if msg.round == self.round_current {
            let mut outputs = Vec::new();
            let mut outbound = Vec::new();
            let state = self.pump_rounds(&mut outputs, &mut outbound);
            return (state, outputs, outbound);
        }

        debug!(node = %self.me, from = %from, round = msg.round, "future-round encryption share buffered");
        (None, vec![], vec![])
    }

    /// Route a partial decryption by its carried round. The DLEQ proof is
    /// verified against the sender's advertised verification key and
    /// aggregate.
    pub(crate) fn receive_dec_share(&mut self, from: &NodeId, msg: &DecShareMsg) -> Transition {
        let Some(&position) = self.view_id.get(from) else {
            return (
                None,
                vec![NodeOutput::InvalidInput(
                    self.failure_data(format!("partial decryption from unknown sender {}", from)),
                )],
                vec![],
            );
        };

        // rounds are numbered from 1; round 0 never carries traffic
        if msg.round == 0 || msg.round < self.round_current {
            debug!(node = %self.me, from = %from, round = msg.round, "past-round partial decryption discarded");
            return (None, vec![], vec![]);
        }

        if !msg.factor.verify(&self.ctx, &msg.aggregate) {
            warn!(node = %self.me, from = %from, round = msg.round, "invalid partial decryption proof discarded");
            return (None, vec![], vec![]);
        }

        let slot = self.rounds.entry(msg.round).or_default();
        if slot.subdecryptions.contains_key(&position) {
            debug!(node = %self.me, from = %from, round = msg.round, "duplicate partial decryption discarded");
            return (None, vec![], vec![]);
        }
        slot.subdecryptions
            .insert(position, msg.factor.value.clone());

        if msg.round == self.round_current {
            let mut outputs = Vec::new();
            let mut outbound = Vec::new();
            let state = self.pump_rounds(&mut outputs, &mut outbound);
            return (state, outputs, outbound);
        }

        debug!(node = %self.me, from = %from, round = msg.round, "future-round partial decryption buffered");
        (None, vec![], vec![])
    }

    /// Drive the current round as far as the collected material allows,
    /// cascading through buffered rounds. Invoked on round entry and after
    /// every current-round store.
    ///
    /// Per round, in order: broadcast our encryption share on entry; once
    /// all `n` subciphertexts are fixed, broadcast our partial decryption
    /// of the aggregate; once `t` partials are present, finalize and
    /// advance. The full-`n` requirement is what makes every partial refer
    /// to the same aggregate.
    fn pump_rounds(
        &mut self,
        outputs: &mut Vec<NodeOutput>,
        outbound: &mut Vec<Outbound>,
    ) -> Option<NodeState> {
        loop {
            let round = self.round_current;
            if round > self.round_max {
                outputs.push(NodeOutput::BeaconComplete {
                    rounds: self.round_max,
                });
                info!(node = %self.me, rounds = self.round_max, "beacon complete");
                return Some(NodeState::Complete(Complete));
            }

            let have_own_enc = self
                .rounds
                .get(&round)
                .is_some_and(|r| r.subciphertexts.contains_key(&self.my_index));
            if !have_own_enc {
                let msg = self.make_enc_share(round);
                self.rounds
                    .entry(round)
                    .or_default()
                    .subciphertexts
                    .insert(self.my_index, msg.ciphertext.clone());
                outbound.push(Outbound::Broadcast(ProtocolMessage::EncShare(msg)));
            }

            let enc_full = self
                .rounds
                .get(&round)
                .is_some_and(|r| r.subciphertexts.len() == self.view.len());
            if !enc_full {
                return None;
            }

            let have_own_dec = self
                .rounds
                .get(&round)
                .is_some_and(|r| r.subdecryptions.contains_key(&self.my_index));
            if !have_own_dec {
                let msg = self.make_dec_share(round);
                self.rounds
                    .entry(round)
                    .or_default()
                    .subdecryptions
                    .insert(self.my_index, msg.factor.value.clone());
                outbound.push(Outbound::Broadcast(ProtocolMessage::DecShare(msg)));
            }

            let dec_ready = self
                .rounds
                .get(&round)
                .is_some_and(|r| r.subdecryptions.len() >= self.threshold);
            if !dec_ready {
                return None;
            }

            match self.finalize_round(round) {
                Ok(output) => {
                    info!(node = %self.me, round, "round complete");
                    if self.replier {
                        outbound.push(Outbound::Client(BeaconReply {
                            round,
                            output: output.clone(),
                        }));
                    }
                    outputs.push(NodeOutput::RoundComplete { round, output });
                    self.round_current += 1;
                }
                Err(msg) => {
                    outputs.push(NodeOutput::Failed(self.failure_data(msg)));
                    return Some(NodeState::Failed(Failed));
                }
            }
        }
    }

    /// Build this node's encryption share for a round: a fresh random
    /// plaintext encrypted under the group key, with a proof of knowledge
    /// of the encryption randomness.
    fn make_enc_share(&mut self, round: u64) -> EncShareMsg {
        let group_key = self
            .group_key
            .clone()
            .expect("beacon rounds run only after key generation");

        let r = self.ctx.random_scalar(&mut self.rng);
        let message = self.ctx.random_message(&mut self.rng);
        let ciphertext = PublicKey::new(group_key).encrypt_with_r(&self.ctx, &message, &r);
        let nizk = SchnorrProof::prove(&self.ctx, &ciphertext.a, &r, &mut self.rng);

        EncShareMsg {
            ciphertext,
            nizk,
            round,
        }
    }

    /// Build this node's partial decryption of the round's aggregate.
    fn make_dec_share(&mut self, round: u64) -> DecShareMsg {
        let aggregate = self.aggregate_ciphertext(round).a;
        let recipient = self
            .recipient
            .as_ref()
            .expect("beacon rounds run only after key generation");
        let factor = recipient.decryption_factor(&self.ctx, &aggregate, &mut self.rng);

        DecShareMsg {
            factor,
            aggregate,
            round,
        }
    }

    /// The component-wise product of all stored subciphertexts of a round.
    fn aggregate_ciphertext(&self, round: u64) -> Ciphertext {
        let state = self
            .rounds
            .get(&round)
            .expect("aggregation runs only on populated rounds");

        let mut product = Ciphertext::identity();
        for ciphertext in state.subciphertexts.values() {
            product = product.mul(ciphertext, self.ctx.p());
        }
        product
    }

    /// Finalize a round: Lagrange-combine a threshold subset of the
    /// partials into the group decryption and hash the revealed product
    /// into the beacon output.
    fn finalize_round(&mut self, round: u64) -> Result<BigUint, String> {
        let aggregated = self.aggregate_ciphertext(round);

        let state = self
            .rounds
            .get(&round)
            .expect("finalization runs only on populated rounds");
        // any t partials interpolate to the same value; take the lowest
        // positions for determinism
        let factors: Vec<(u32, BigUint)> = state
            .subdecryptions
            .iter()
            .take(self.threshold)
            .map(|(position, value)| (*position, value.clone()))
            .collect();

        let raw = combine(&self.ctx, &aggregated, &factors).map_err(|e| e.to_string())?;
        Ok(hash::output_digest(&raw, self.ctx.p()))
    }
}
