// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! This file contains the state handler for the `Idle` state.

use super::*;

impl NodeStateHandler for Idle {
    fn handle_start(&self, _input: &Start, actor: &mut NodeActor) -> Transition {
        actor.start_key_gen()
    }

    /// Under network asynchrony a peer's subshare can arrive before our
    /// own `Start`; it is verified and stored immediately. The DKG cannot
    /// complete from here, because the self contribution is only recorded
    /// by `Start`.
    fn handle_subshare(&self, input: &ReceivedSubshare, actor: &mut NodeActor) -> Transition {
        actor.receive_subshare(&input.from, &input.msg)
    }

    /// A peer that already finished key generation may open round 1 before
    /// our `Start` arrives; its traffic is buffered by round.
    fn handle_enc_share(&self, input: &ReceivedEncShare, actor: &mut NodeActor) -> Transition {
        actor.receive_enc_share(&input.from, &input.msg)
    }

    fn handle_dec_share(&self, input: &ReceivedDecShare, actor: &mut NodeActor) -> Transition {
        actor.receive_dec_share(&input.from, &input.msg)
    }
}
