// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Free & Fair
// See LICENSE.md for details

//! The beacon node actor.
//!
//! One [`NodeActor`][`crate::beacon_node::top_level_actor::NodeActor`] per
//! participant. Inputs are dispatched to the current state's handler;
//! handlers delegate the shared routing and aggregation logic to methods on
//! the actor itself.

pub mod handlers;
pub mod top_level_actor;
