// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene tree: arena-allocated compositing nodes.
//!
//! [`SceneTree`] owns every node and hands out generational [`NodeId`]
//! handles. All structural mutation (parenting, masks, replicas, destruction)
//! and all property mutation go through tree methods, which is what lets the
//! damage protocol stay correct: a setter cannot forget to propagate because
//! propagation lives in the only mutation path.
//!
//! The module splits by concern: `tree` holds arena storage, topology, and
//! ownership transfer; `node` the per-node state and read accessors;
//! `properties` the tracked setters and their damage classes; `damage` the
//! dirty propagation and frame-boundary reset; `scroll` the offsets,
//! clamping, and gesture routing; `surface` the render surfaces and draw
//! bracket.

mod damage;
mod id;
mod node;
mod properties;
mod scroll;
mod surface;
mod traverse;
mod tree;

pub use id::NodeId;
pub use node::SceneNode;
pub use scroll::{ScrollInputType, ScrollStatus};
pub use surface::RenderSurface;
pub use traverse::Children;
pub use tree::SceneTree;
