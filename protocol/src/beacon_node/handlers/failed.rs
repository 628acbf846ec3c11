// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! This file contains the state handler for the `Failed` state.

use super::*;

impl NodeStateHandler for Failed {
    /// Once the node has failed it stays failed; every input is refused.
    fn unhandled(&self, actor: &mut NodeActor, _input: String) -> Transition {
        (
            None,
            vec![NodeOutput::Failed(actor.failure_data(
                "node has failed, cannot process inputs".to_string(),
            ))],
            vec![],
        )
    }
}
