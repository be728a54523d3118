// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene-graph nodes and change tracking for layered compositing.
//!
//! `strata_core` provides the compositor-side node tree: an arena of scene
//! nodes addressed by generational handles, with per-property damage
//! propagation, a clamped scroll model, and hooks for render surfaces. It is
//! `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! The crate is organized around a frame cycle that alternates mutation and
//! consumption of damage:
//!
//! ```text
//!   Embedder commits ──► SceneTree setters ──► dirty flags accumulate
//!                                                   │
//!                ┌──────────────────────────────────┘
//!                ▼
//!   Layout pass (computes draw state, assigns render targets)
//!                │
//!                ▼
//!   Damage pass reads flags ──► draw ──► reset_all_change_tracking_for_subtree()
//! ```
//!
//! **[`scene`]** — The arena-backed [`SceneTree`](scene::SceneTree): tree
//! topology with mask/replica sublayers, tracked property setters with four
//! damage classes, scroll offsets and gesture routing, render surfaces, and
//! the frame-boundary reset.
//!
//! **[`transform`]** — 4x4 transform type with inversion and point
//! projection for hit testing.
//!
//! **[`geometry`]** — Integer point/size/rect and a rect-union region, the
//! device-pixel side of the geometry model (floating-point geometry comes
//! from [`kurbo`]).
//!
//! **[`sort`]** — The [`LayerSorter`](sort::LayerSorter) seam for depth
//! sorting inside `preserves_3d` contexts.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! scroll-routing and sort instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! **[`animation`]**, **[`scrollbar`]**, **[`resource`]** — Collaborator
//! seams: animation state queried by the layout pass, scrollbar offset
//! fan-out, and the resource-provider capability for the draw bracket.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animation;
pub mod color;
pub mod filter;
pub mod geometry;
pub mod resource;
pub mod scene;
pub mod scrollbar;
pub mod settings;
pub mod sort;
pub mod trace;
pub mod transform;
