// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! Beacon configuration.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::messages::NodeId;

/**
 * The configuration of a beacon execution, identical on every node.
 *
 * The participant count `n` is the length of the view; positions in the
 * view (1-based) are the evaluation points of all sharing polynomials, so
 * every node must be configured with the view in the same order.
 *
 * Validation happens at actor construction: `1 <= threshold <= n`, a
 * non-empty view of unique identities containing the local node, and a
 * safe prime `p`. The generator is derived from `p`, never configured.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconConfig {
    /// Reconstruction threshold `t`.
    pub threshold: u32,
    /// The safe prime defining the group.
    pub p: BigUint,
    /// Ordered participant identities.
    pub view: Vec<NodeId>,
    /// Number of beacon rounds to run; `0` means DKG only.
    pub round_max: u64,
    /// Whether this node reports round outputs to the client.
    pub replier: bool,
}
