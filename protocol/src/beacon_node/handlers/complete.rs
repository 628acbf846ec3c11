// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! This file contains the state handler for the `Complete` state.

use tracing::debug;

use super::*;

impl NodeStateHandler for Complete {
    /// Slower peers are still finishing their last rounds when this node
    /// completes; their remaining traffic is stale here and is dropped
    /// without comment.
    fn handle_enc_share(&self, input: &ReceivedEncShare, actor: &mut NodeActor) -> Transition {
        debug!(node = %actor.me, from = %input.from, round = input.msg.round,
            "encryption share after completion discarded");
        (None, vec![], vec![])
    }

    fn handle_dec_share(&self, input: &ReceivedDecShare, actor: &mut NodeActor) -> Transition {
        debug!(node = %actor.me, from = %input.from, round = input.msg.round,
            "partial decryption after completion discarded");
        (None, vec![], vec![])
    }
}
