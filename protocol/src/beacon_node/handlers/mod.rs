// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

pub mod beacon;
pub mod complete;
pub mod failed;
pub mod idle;
pub mod key_gen;

use enum_dispatch::enum_dispatch;

use super::top_level_actor::{NodeActor, NodeOutput, Transition};
use crate::messages::{DecShareMsg, EncShareMsg, NodeId, SubshareMsg};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Idle;

#[derive(Debug, Clone, Copy)]
pub(crate) struct KeyGen;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Beacon;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Complete;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Failed;

#[enum_dispatch]
pub(crate) trait NodeStateHandler {
    /// Handle an unhandled combination of input and state; this results in
    /// an "invalid input" response, but does not stop protocol execution,
    /// as it is recoverable and doesn't affect the state in any way.
    fn unhandled(&self, actor: &mut NodeActor, input: String) -> Transition {
        (
            None,
            vec![NodeOutput::InvalidInput(actor.failure_data(format!(
                "Invalid input ({}) for the current phase",
                input
            )))],
            vec![],
        )
    }

    fn handle_start(&self, input: &Start, actor: &mut NodeActor) -> Transition {
        self.unhandled(actor, format!("{:?}", input))
    }

    fn handle_subshare(&self, input: &ReceivedSubshare, actor: &mut NodeActor) -> Transition {
        self.unhandled(actor, format!("subshare from {}", input.from))
    }

    fn handle_enc_share(&self, input: &ReceivedEncShare, actor: &mut NodeActor) -> Transition {
        self.unhandled(
            actor,
            format!("round {} encryption share from {}", input.msg.round, input.from),
        )
    }

    fn handle_dec_share(&self, input: &ReceivedDecShare, actor: &mut NodeActor) -> Transition {
        self.unhandled(
            actor,
            format!(
                "round {} partial decryption from {}",
                input.msg.round, input.from
            ),
        )
    }
}

/// NodeBoomerang trait for double dispatch on inputs.
#[enum_dispatch]
pub(crate) trait NodeBoomerang {
    fn boomerang(&self, actor: &mut NodeActor) -> Transition;
}

// Input wrapper structs for the NodeBoomerang pattern.

/// The client's command to begin the protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct Start;

impl NodeBoomerang for Start {
    fn boomerang(&self, actor: &mut NodeActor) -> Transition {
        actor.state.clone().handle_start(self, actor)
    }
}

/// A DKG subshare, tagged with its sender.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedSubshare {
    pub from: NodeId,
    pub msg: SubshareMsg,
}

impl NodeBoomerang for ReceivedSubshare {
    fn boomerang(&self, actor: &mut NodeActor) -> Transition {
        actor.state.clone().handle_subshare(self, actor)
    }
}

/// A beacon round encryption share, tagged with its sender.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedEncShare {
    pub from: NodeId,
    pub msg: EncShareMsg,
}

impl NodeBoomerang for ReceivedEncShare {
    fn boomerang(&self, actor: &mut NodeActor) -> Transition {
        actor.state.clone().handle_enc_share(self, actor)
    }
}

/// A beacon round partial decryption, tagged with its sender.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedDecShare {
    pub from: NodeId,
    pub msg: DecShareMsg,
}

impl NodeBoomerang for ReceivedDecShare {
    fn boomerang(&self, actor: &mut NodeActor) -> Transition {
        actor.state.clone().handle_dec_share(self, actor)
    }
}
