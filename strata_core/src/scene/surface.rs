// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render surfaces and the draw-phase resource bracket.

use crate::geometry::IntRect;
use crate::resource::ResourceProvider;

use super::id::{INVALID, NodeId};
use super::tree::SceneTree;

/// An intermediate compositing target owned by a node.
///
/// A node owns a surface when its content (plus descendants) must be rendered
/// to a texture first: masking, replica reflections, or forced offscreen
/// rendering. The layout pass decides which nodes get one.
#[derive(Debug, Default)]
pub struct RenderSurface {
    /// Portion of the target, in target space, this surface draws into.
    content_rect: IntRect,
    /// Set when a surface-level property (opacity, transform) changed since
    /// the last change-tracking reset.
    surface_property_changed: bool,
}

impl RenderSurface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The portion of the target this surface draws into, in target space.
    #[must_use]
    pub const fn content_rect(&self) -> IntRect {
        self.content_rect
    }

    pub(crate) fn set_content_rect(&mut self, rect: IntRect) {
        self.surface_property_changed |= rect != self.content_rect;
        self.content_rect = rect;
    }

    /// Whether a surface-level property changed since the last reset.
    #[must_use]
    pub const fn surface_property_changed(&self) -> bool {
        self.surface_property_changed
    }

    pub(crate) fn reset_property_changed_flag(&mut self) {
        self.surface_property_changed = false;
    }
}

impl SceneTree {
    /// Gives the node a fresh render surface.
    ///
    /// The node becomes its own render target.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node already has a surface.
    pub fn create_render_surface(&mut self, id: NodeId) {
        self.validate(id);
        let node = self.slot_mut(id.idx);
        assert!(
            node.render_surface.is_none(),
            "layer already owns a render surface"
        );
        node.render_surface = Some(RenderSurface::new());
        node.render_target = id.idx;
    }

    /// Drops the node's render surface, if any.
    ///
    /// The render target assignment is cleared along with it; the next layout
    /// pass reassigns targets.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn clear_render_surface(&mut self, id: NodeId) {
        self.validate(id);
        let node = self.slot_mut(id.idx);
        node.render_surface = None;
        node.render_target = INVALID;
    }

    /// Sets the surface's content rect, in target space.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no render surface.
    pub fn set_surface_content_rect(&mut self, id: NodeId, rect: IntRect) {
        self.validate(id);
        let node = self.slot_mut(id.idx);
        match &mut node.render_surface {
            Some(surface) => surface.set_content_rect(rect),
            None => panic!("layer {} has no render surface", node.id),
        }
    }

    /// Assigns the node's render target, as computed by the layout pass.
    ///
    /// Plain state, not a tracked property.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn set_render_target(&mut self, id: NodeId, target: NodeId) {
        self.validate(id);
        self.validate(target);
        self.slot_mut(id.idx).render_target = target.idx;
    }

    /// Returns whether any descendant of the node draws content.
    ///
    /// The node's own `draws_content` is not consulted.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn descendant_draws_content(&self, id: NodeId) -> bool {
        self.validate(id);
        self.descendant_draws_content_at(id.idx)
    }

    fn descendant_draws_content_at(&self, idx: u32) -> bool {
        let mut child = self.slot(idx).first_child;
        while child != INVALID {
            if self.slot(child).draws_content || self.descendant_draws_content_at(child) {
                return true;
            }
            child = self.slot(child).next_sibling;
        }
        false
    }

    /// Opens the draw bracket for a layer.
    ///
    /// Called once per frame before the layer's quads are appended. Resources
    /// acquired here stay valid until [`did_draw`](Self::did_draw).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale, or (in debug builds) if the bracket is
    /// already open.
    pub fn will_draw(&mut self, id: NodeId, resource_provider: &mut dyn ResourceProvider) {
        self.validate(id);
        _ = resource_provider;
        #[cfg(debug_assertions)]
        {
            let node = self.slot_mut(id.idx);
            assert!(
                !node.between_will_draw_and_did_draw,
                "will_draw called twice without did_draw"
            );
            node.between_will_draw_and_did_draw = true;
        }
    }

    /// Closes the draw bracket for a layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale, or (in debug builds) if the bracket was
    /// never opened.
    pub fn did_draw(&mut self, id: NodeId, resource_provider: &mut dyn ResourceProvider) {
        self.validate(id);
        _ = resource_provider;
        #[cfg(debug_assertions)]
        {
            let node = self.slot_mut(id.idx);
            assert!(
                node.between_will_draw_and_did_draw,
                "did_draw called without a matching will_draw"
            );
            node.between_will_draw_and_did_draw = false;
        }
    }
}
