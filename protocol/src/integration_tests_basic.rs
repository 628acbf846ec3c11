// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Basic end-to-end tests of the beacon protocol. These drive full
//! multi-node executions through an in-memory message pump with reliable,
//! ordered delivery, plus targeted scenarios for tampered proofs and
//! out-of-order delivery.

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, VecDeque};

    use num_bigint::BigUint;
    use num_traits::One;

    use crate::beacon_node::handlers::{
        ReceivedDecShare, ReceivedEncShare, ReceivedSubshare, Start,
    };
    use crate::beacon_node::top_level_actor::{NodeActor, NodeInput, NodeOutput, NodeState, Outbound};
    use crate::config::BeaconConfig;
    use crate::messages::{BeaconReply, NodeId, ProtocolMessage};

    /// An in-flight protocol message, addressed by node index.
    #[derive(Debug, Clone)]
    struct Envelope {
        from: NodeId,
        to: usize,
        msg: ProtocolMessage,
    }

    /// A hand-driven message pump standing in for the network emulator:
    /// reliable delivery, FIFO per queue, no delays.
    struct Pump {
        view: Vec<NodeId>,
        queue: VecDeque<Envelope>,
        replies: Vec<BeaconReply>,
        outputs: Vec<Vec<NodeOutput>>,
        enc_messages: usize,
        dec_messages: usize,
    }

    impl Pump {
        fn new(view: Vec<NodeId>) -> Self {
            let outputs = vec![Vec::new(); view.len()];
            Pump {
                view,
                queue: VecDeque::new(),
                replies: Vec::new(),
                outputs,
                enc_messages: 0,
                dec_messages: 0,
            }
        }

        fn node_index(&self, id: &NodeId) -> usize {
            self.view
                .iter()
                .position(|candidate| candidate == id)
                .expect("outbound messages address nodes in the view")
        }

        /// Enqueue the outbound envelopes produced by `from`.
        fn dispatch(&mut self, from: usize, outbound: Vec<Outbound>) {
            let from_id = self.view[from].clone();
            for out in outbound {
                match out {
                    Outbound::Unicast(to, msg) => {
                        let to = self.node_index(&to);
                        self.queue.push_back(Envelope {
                            from: from_id.clone(),
                            to,
                            msg,
                        });
                    }
                    Outbound::Broadcast(msg) => {
                        match msg {
                            ProtocolMessage::EncShare(_) => self.enc_messages += 1,
                            ProtocolMessage::DecShare(_) => self.dec_messages += 1,
                            ProtocolMessage::Subshare(_) => {}
                        }
                        for to in 0..self.view.len() {
                            if to != from {
                                self.queue.push_back(Envelope {
                                    from: from_id.clone(),
                                    to,
                                    msg: msg.clone(),
                                });
                            }
                        }
                    }
                    Outbound::Client(reply) => self.replies.push(reply),
                }
            }
        }

        /// Feed the client `Start` to every node.
        fn start_all(&mut self, nodes: &mut [NodeActor]) {
            for index in 0..nodes.len() {
                let (outputs, outbound) = nodes[index].handle_input(NodeInput::Start(Start));
                self.outputs[index].extend(outputs);
                self.dispatch(index, outbound);
            }
        }

        /// Deliver one envelope, optionally rewritten by `tamper`.
        fn deliver(
            &mut self,
            nodes: &mut [NodeActor],
            mut envelope: Envelope,
            tamper: &dyn Fn(&mut Envelope),
        ) {
            tamper(&mut envelope);
            let input = match envelope.msg {
                ProtocolMessage::Subshare(msg) => NodeInput::Subshare(ReceivedSubshare {
                    from: envelope.from,
                    msg,
                }),
                ProtocolMessage::EncShare(msg) => NodeInput::EncShare(ReceivedEncShare {
                    from: envelope.from,
                    msg,
                }),
                ProtocolMessage::DecShare(msg) => NodeInput::DecShare(ReceivedDecShare {
                    from: envelope.from,
                    msg,
                }),
            };
            let (outputs, outbound) = nodes[envelope.to].handle_input(input);
            self.outputs[envelope.to].extend(outputs);
            self.dispatch(envelope.to, outbound);
        }

        /// Deliver queued envelopes in FIFO order until quiescence.
        fn run(&mut self, nodes: &mut [NodeActor], max_steps: usize) {
            self.run_tampered(nodes, max_steps, &|_| {});
        }

        fn run_tampered(
            &mut self,
            nodes: &mut [NodeActor],
            max_steps: usize,
            tamper: &dyn Fn(&mut Envelope),
        ) {
            let mut steps = 0;
            while let Some(envelope) = self.queue.pop_front() {
                steps += 1;
                assert!(steps <= max_steps, "message pump did not quiesce");
                self.deliver(nodes, envelope, tamper);
            }
        }

        /// The per-round outputs a node reported, in completion order.
        fn round_outputs(&self, index: usize) -> Vec<(u64, BigUint)> {
            self.outputs[index]
                .iter()
                .filter_map(|output| match output {
                    NodeOutput::RoundComplete { round, output } => {
                        Some((*round, output.clone()))
                    }
                    _ => None,
                })
                .collect()
        }

        /// The group key a node reported at DKG completion.
        fn dkg_key(&self, index: usize) -> Option<BigUint> {
            self.outputs[index].iter().find_map(|output| match output {
                NodeOutput::DkgComplete { group_key } => Some(group_key.clone()),
                _ => None,
            })
        }
    }

    fn create_nodes(
        threshold: u32,
        participants: usize,
        p: u64,
        round_max: u64,
        replier: Option<usize>,
    ) -> (Vec<NodeActor>, Pump) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let view: Vec<NodeId> = (1..=participants).map(|i| format!("Node{}", i)).collect();
        let nodes = view
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let config = BeaconConfig {
                    threshold,
                    p: BigUint::from(p),
                    view: view.clone(),
                    round_max,
                    replier: replier == Some(index),
                };
                NodeActor::new(id.clone(), config).expect("node construction should succeed")
            })
            .collect();

        (nodes, Pump::new(view))
    }

    fn assert_agreement(pump: &Pump, participants: usize, rounds: u64) {
        let reference: BTreeMap<u64, BigUint> = pump.round_outputs(0).into_iter().collect();
        assert_eq!(reference.len() as u64, rounds);

        for index in 1..participants {
            let this: BTreeMap<u64, BigUint> = pump.round_outputs(index).into_iter().collect();
            assert_eq!(
                this, reference,
                "node {} must derive the same outputs as node 1",
                index + 1
            );
        }
    }

    #[test]
    fn test_invalid_configurations_are_rejected() {
        let view: Vec<NodeId> = vec!["Node1".to_string(), "Node2".to_string()];
        let config = BeaconConfig {
            threshold: 3,
            p: BigUint::from(1019u32),
            view: view.clone(),
            round_max: 0,
            replier: false,
        };
        // t > n
        assert!(NodeActor::new("Node1".to_string(), config.clone()).is_err());

        // not a safe prime
        let mut bad_prime = config.clone();
        bad_prime.threshold = 2;
        bad_prime.p = BigUint::from(13u32);
        assert!(NodeActor::new("Node1".to_string(), bad_prime).is_err());

        // local identity missing from the view
        let mut stranger = config.clone();
        stranger.threshold = 2;
        assert!(NodeActor::new("Node9".to_string(), stranger).is_err());

        // duplicate identity
        let mut duplicated = config;
        duplicated.threshold = 2;
        duplicated.view = vec!["Node1".to_string(), "Node1".to_string()];
        assert!(NodeActor::new("Node1".to_string(), duplicated).is_err());

        // empty view
        let empty = BeaconConfig {
            threshold: 1,
            p: BigUint::from(1019u32),
            view: vec![],
            round_max: 0,
            replier: false,
        };
        assert!(NodeActor::new("Node1".to_string(), empty).is_err());
    }

    // S1: DKG only, 10 nodes. Every node must exit key generation with the
    // same group key and terminate without emitting beacon traffic.
    #[test]
    fn test_dkg_only_10_nodes() {
        let (mut nodes, mut pump) = create_nodes(6, 10, 1019, 0, None);

        pump.start_all(&mut nodes);
        pump.run(&mut nodes, 10_000);

        let reference = pump.dkg_key(0).expect("node 1 should complete DKG");
        for index in 0..nodes.len() {
            assert_eq!(
                pump.dkg_key(index).as_ref(),
                Some(&reference),
                "node {} must agree on the group key",
                index + 1
            );
            assert!(matches!(nodes[index].state, NodeState::Complete(_)));
        }

        assert_eq!(pump.enc_messages, 0, "DKG-only runs emit no beacon traffic");
        assert_eq!(pump.dec_messages, 0);
        assert!(pump.replies.is_empty());

        println!("✓ all 10 nodes agree on the group key");
    }

    // S2 + S3: a 100-round beacon with one replier. The client collects
    // exactly one reply per round, in strictly increasing order, and every
    // node derives identical outputs.
    #[test]
    fn test_beacon_100_rounds_with_replier() {
        const ROUNDS: u64 = 100;
        let (mut nodes, mut pump) = create_nodes(6, 10, 100_043, ROUNDS, Some(0));
        let p = BigUint::from(100_043u32);

        pump.start_all(&mut nodes);
        pump.run(&mut nodes, 1_000_000);

        assert_eq!(pump.replies.len() as u64, ROUNDS);
        let mut previous = 0u64;
        for reply in &pump.replies {
            assert!(
                reply.round > previous,
                "reply rounds must be strictly increasing"
            );
            assert!(reply.output < p, "outputs must lie in [0, p)");
            previous = reply.round;
        }
        assert_eq!(previous, ROUNDS);

        assert_agreement(&pump, nodes.len(), ROUNDS);
        for node in &nodes {
            assert!(
                matches!(node.state, NodeState::Complete(_)),
                "every node must terminate successfully"
            );
        }

        println!("✓ client collected {} agreeing round outputs", ROUNDS);
    }

    // Boundary: a single participant. Rounds cascade to completion inside
    // the Start input, with no network traffic at all.
    #[test]
    fn test_single_node_beacon() {
        let (mut nodes, mut pump) = create_nodes(1, 1, 1019, 2, Some(0));

        pump.start_all(&mut nodes);
        pump.run(&mut nodes, 10);

        assert_eq!(pump.replies.len(), 2);
        assert_eq!(pump.round_outputs(0).len(), 2);
        assert!(matches!(nodes[0].state, NodeState::Complete(_)));
    }

    // Boundary: t = n. Every round requires all partials; no subset
    // selection is exercised.
    #[test]
    fn test_full_threshold_beacon() {
        const ROUNDS: u64 = 3;
        let (mut nodes, mut pump) = create_nodes(3, 3, 1019, ROUNDS, None);

        pump.start_all(&mut nodes);
        pump.run(&mut nodes, 10_000);

        assert_agreement(&pump, nodes.len(), ROUNDS);
        for node in &nodes {
            assert!(matches!(node.state, NodeState::Complete(_)));
        }
    }

    // S4: a tampered Schnorr proof. Every receiver must discard the share,
    // and because a round only finalizes once all n subciphertexts are
    // present, the round stalls: the known bottleneck of the full-n rule.
    #[test]
    fn test_tampered_encryption_share_stalls_the_round() {
        let (mut nodes, mut pump) = create_nodes(2, 3, 1019, 1, None);

        pump.start_all(&mut nodes);
        pump.run_tampered(&mut nodes, 10_000, &|envelope| {
            if envelope.from == "Node1" {
                if let ProtocolMessage::EncShare(ref mut msg) = envelope.msg {
                    msg.nizk.z += BigUint::one();
                }
            }
        });

        for (index, node) in nodes.iter().enumerate() {
            assert!(
                pump.round_outputs(index).is_empty(),
                "no node may complete a round missing a subciphertext"
            );
            assert!(matches!(node.state, NodeState::Beacon(_)));
            assert_eq!(node.round_current, 1);
        }

        // the receivers hold only their own and each other's shares
        for index in [1usize, 2] {
            let stored = nodes[index].rounds[&1].subciphertexts.len();
            assert_eq!(stored, 2, "the tampered share must not be stored");
        }
    }

    // S6: a tampered DLEQ proof. Receivers reject the partial decryption
    // and the round still completes from the remaining t = 2 partials.
    #[test]
    fn test_tampered_partial_decryption_is_excluded() {
        let (mut nodes, mut pump) = create_nodes(2, 3, 1019, 1, None);

        pump.start_all(&mut nodes);
        pump.run_tampered(&mut nodes, 10_000, &|envelope| {
            if envelope.from == "Node1" {
                if let ProtocolMessage::DecShare(ref mut msg) = envelope.msg {
                    msg.factor.proof.r += BigUint::one();
                }
            }
        });

        assert_agreement(&pump, nodes.len(), 1);
        for node in &nodes {
            assert!(matches!(node.state, NodeState::Complete(_)));
        }

        // Node1's partial was rejected everywhere but at Node1 itself
        for index in [1usize, 2] {
            assert!(
                !nodes[index].rounds[&1].subdecryptions.contains_key(&1),
                "the tampered partial must not enter the threshold subset"
            );
        }
    }

    // S5: out-of-order delivery. Everything addressed to Node3 is withheld
    // and then delivered in reverse order, so round-1 encryption shares
    // arrive while Node3 is still waiting for subshares. Node3 must buffer
    // by round and still complete rounds 1, 2, 3 in order.
    #[test]
    fn test_out_of_order_delivery_is_buffered_and_drained() {
        const ROUNDS: u64 = 3;
        const SLOW: usize = 2;
        let (mut nodes, mut pump) = create_nodes(2, 3, 1019, ROUNDS, None);

        pump.start_all(&mut nodes);

        // Phase 1: deliver everything except traffic to the slow node,
        // which is collected instead.
        let mut withheld = Vec::new();
        let mut steps = 0;
        while let Some(envelope) = pump.queue.pop_front() {
            steps += 1;
            assert!(steps <= 10_000, "phase 1 did not quiesce");
            if envelope.to == SLOW {
                withheld.push(envelope);
            } else {
                pump.deliver(&mut nodes, envelope, &|_| {});
            }
        }

        // The fast nodes are stuck in round 1 waiting for the slow node's
        // encryption share; the slow node has not even finished key
        // generation.
        assert!(matches!(nodes[SLOW].state, NodeState::KeyGen(_)));
        assert!(pump.round_outputs(SLOW).is_empty());

        // Phase 2: release the withheld traffic in reverse order, then let
        // the execution run to quiescence with normal delivery.
        withheld.reverse();
        for envelope in withheld {
            pump.queue.push_back(envelope);
        }
        pump.run(&mut nodes, 10_000);

        let slow_rounds: Vec<u64> = pump
            .round_outputs(SLOW)
            .iter()
            .map(|(round, _)| *round)
            .collect();
        assert_eq!(
            slow_rounds,
            vec![1, 2, 3],
            "buffered rounds must complete strictly in order"
        );

        assert_agreement(&pump, nodes.len(), ROUNDS);
        for node in &nodes {
            assert!(matches!(node.state, NodeState::Complete(_)));
        }
    }

    // A start command arriving after every peer subshare: the completion
    // check must fire from the Start handler.
    #[test]
    fn test_start_arriving_after_all_subshares() {
        const LATE: usize = 0;
        let (mut nodes, mut pump) = create_nodes(2, 3, 1019, 1, None);

        // start everyone but the late node and deliver only its inbound
        // subshares
        for index in 1..nodes.len() {
            let (outputs, outbound) = nodes[index].handle_input(NodeInput::Start(Start));
            pump.outputs[index].extend(outputs);
            pump.dispatch(index, outbound);
        }
        let mut deferred = VecDeque::new();
        while let Some(envelope) = pump.queue.pop_front() {
            if envelope.to == LATE {
                pump.deliver(&mut nodes, envelope, &|_| {});
            } else {
                deferred.push_back(envelope);
            }
        }
        assert!(matches!(nodes[LATE].state, NodeState::Idle(_)));

        // the late Start completes DKG immediately
        let (outputs, outbound) = nodes[LATE].handle_input(NodeInput::Start(Start));
        assert!(outputs
            .iter()
            .any(|output| matches!(output, NodeOutput::DkgComplete { .. })));
        pump.outputs[LATE].extend(outputs);
        pump.dispatch(LATE, outbound);

        pump.queue.append(&mut deferred);
        pump.run(&mut nodes, 10_000);

        assert_agreement(&pump, nodes.len(), 1);
    }
}
