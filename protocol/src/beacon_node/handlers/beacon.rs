// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! This file contains the state handler for the `Beacon` state.

use super::*;

impl NodeStateHandler for Beacon {
    fn handle_enc_share(&self, input: &ReceivedEncShare, actor: &mut NodeActor) -> Transition {
        actor.receive_enc_share(&input.from, &input.msg)
    }

    fn handle_dec_share(&self, input: &ReceivedDecShare, actor: &mut NodeActor) -> Transition {
        actor.receive_dec_share(&input.from, &input.msg)
    }
}
