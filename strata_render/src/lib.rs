// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quad emission and damage aggregation for strata.
//!
//! This crate sits between [`strata_core`]'s scene tree and a backend
//! renderer. It defines:
//!
//! - [`SharedQuadState`] — per-layer draw state shared by a run of quads
//! - [`DrawQuad`] / [`QuadList`] — draw commands for one frame
//! - [`DamageRegion`] — spatial damage aggregated from the tree's dirty
//!   flags, for partial re-rendering

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod damage;
mod quad;

pub use damage::{DamageRegion, collect_damage};
pub use quad::{
    DrawQuad, Material, QuadList, SharedQuadState, append_debug_border_quad, shared_quad_state,
};
