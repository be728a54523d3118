// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw quads and the per-layer state they share.

use alloc::vec::Vec;

use strata_core::color::Color;
use strata_core::geometry::IntRect;
use strata_core::scene::{NodeId, SceneTree};
use strata_core::transform::Transform3d;

/// Draw state shared by every quad a layer emits in one frame.
///
/// Snapshotted from a layer's computed draw state; quads reference it by
/// index into the [`QuadList`].
#[derive(Clone, Debug, PartialEq)]
pub struct SharedQuadState {
    /// Content-space to target-space transform.
    pub quad_transform: Transform3d,
    /// Visible portion of the content, in content space.
    pub visible_content_rect: IntRect,
    /// The layer's footprint in target space.
    pub drawable_content_rect: IntRect,
    /// Effective opacity, inherited surface opacities included.
    pub opacity: f32,
    /// Whether the content is fully opaque.
    pub opaque: bool,
}

/// Snapshots a layer's computed draw state into a [`SharedQuadState`].
///
/// Call after the layout pass has filled in the draw transform, visible
/// rect, and draw opacity.
///
/// # Panics
///
/// Panics if the handle is stale.
#[must_use]
pub fn shared_quad_state(tree: &SceneTree, id: NodeId) -> SharedQuadState {
    let node = tree.node(id);
    SharedQuadState {
        quad_transform: node.draw_transform(),
        visible_content_rect: node.visible_content_rect(),
        drawable_content_rect: node.drawable_content_rect(),
        opacity: node.draw_opacity(),
        opaque: node.contents_opaque(),
    }
}

/// What a quad draws.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// A hollow rectangle outlining a layer, for debugging.
    DebugBorder {
        /// Outline rect, in content space.
        rect: IntRect,
        /// Border color.
        color: Color,
        /// Border width in pixels.
        width: f64,
    },
}

/// A single draw command.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawQuad {
    /// Index of the [`SharedQuadState`] this quad draws with.
    pub shared_state: usize,
    /// What to draw.
    pub material: Material,
}

/// An ordered list of draw commands for one frame, back to front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuadList {
    shared_states: Vec<SharedQuadState>,
    quads: Vec<DrawQuad>,
}

impl QuadList {
    /// Creates an empty quad list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shared_states: Vec::new(),
            quads: Vec::new(),
        }
    }

    /// Appends a shared state and returns its index for quads to reference.
    pub fn push_shared_state(&mut self, state: SharedQuadState) -> usize {
        self.shared_states.push(state);
        self.shared_states.len() - 1
    }

    /// Appends a quad.
    pub fn push(&mut self, quad: DrawQuad) {
        self.quads.push(quad);
    }

    /// The quads, in draw order.
    #[must_use]
    pub fn quads(&self) -> &[DrawQuad] {
        &self.quads
    }

    /// The shared states referenced by [`quads`](Self::quads).
    #[must_use]
    pub fn shared_states(&self) -> &[SharedQuadState] {
        &self.shared_states
    }
}

/// Emits a debug-border quad for the layer, if debug borders are on.
///
/// A layer shows a border only when the border color is visible *and* the
/// width is positive; otherwise this is a no-op.
///
/// # Panics
///
/// Panics if the handle is stale.
pub fn append_debug_border_quad(
    tree: &SceneTree,
    id: NodeId,
    shared_state: usize,
    list: &mut QuadList,
) {
    let node = tree.node(id);
    if !node.has_debug_borders() {
        return;
    }
    list.push(DrawQuad {
        shared_state,
        material: Material::DebugBorder {
            rect: IntRect::from_size(node.content_bounds()),
            color: node.debug_border_color(),
            width: node.debug_border_width(),
        },
    });
}
