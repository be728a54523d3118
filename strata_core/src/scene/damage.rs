// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change tracking: dirty propagation and frame-boundary reset.
//!
//! Two per-node flags record damage between frames:
//!
//! - `layer_property_changed` covers layer-level properties. Setters
//!   propagate it eagerly to the relevant scope (self, subtree, or
//!   descendants) at mutation time.
//! - `layer_surface_property_changed` covers surface-level properties
//!   (opacity, transform). It is set only on the mutated node; the damage
//!   scope is synthesized at query time by walking ancestors up to the
//!   nearest render-surface owner.
//!
//! Both flags, plus each node's update rect and each surface's changed flag,
//! are cleared by [`SceneTree::reset_all_change_tracking_for_subtree`] once
//! a frame's damage has been consumed.

use kurbo::Rect;

use super::id::{INVALID, NodeId};
use super::tree::SceneTree;

impl SceneTree {
    /// Marks the node and every descendant as having a changed layer
    /// property. Unconditional: callers gate on actual value change.
    pub(crate) fn note_layer_property_changed_for_subtree(&mut self, idx: u32) {
        self.slot_mut(idx).layer_property_changed = true;
        self.note_layer_property_changed_for_descendants(idx);
    }

    /// Marks every descendant, excluding the node itself.
    pub(crate) fn note_layer_property_changed_for_descendants(&mut self, idx: u32) {
        let mut child = self.slot(idx).first_child;
        while child != INVALID {
            self.note_layer_property_changed_for_subtree(child);
            child = self.slot(child).next_sibling;
        }
    }

    /// Returns whether a surface-level property changed for this node's
    /// surface since the last reset.
    ///
    /// The mutation-time flag only lands on the mutated node, so this walks
    /// ancestors until one owns a render surface: a changed ancestor inside
    /// the same surface damages this node too.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn layer_surface_property_changed(&self, id: NodeId) -> bool {
        self.validate(id);
        if self.slot(id.idx).layer_surface_property_changed {
            return true;
        }
        let mut current = self.slot(id.idx).parent;
        while current != INVALID && self.slot(current).render_surface.is_none() {
            if self.slot(current).layer_surface_property_changed {
                return true;
            }
            current = self.slot(current).parent;
        }
        false
    }

    /// Clears all change tracking for the node and everything it owns.
    ///
    /// Resets both dirty flags, the update rect, and the render surface's
    /// changed flag; then recurses into the mask, the replica (whose own
    /// mask is covered by the recursion), and the children.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn reset_all_change_tracking_for_subtree(&mut self, id: NodeId) {
        self.validate(id);
        self.reset_change_tracking_at(id.idx);
    }

    fn reset_change_tracking_at(&mut self, idx: u32) {
        let node = self.slot_mut(idx);
        node.layer_property_changed = false;
        node.layer_surface_property_changed = false;
        node.update_rect = Rect::ZERO;
        if let Some(surface) = &mut node.render_surface {
            surface.reset_property_changed_flag();
        }

        let mask = self.slot(idx).mask_layer;
        if mask != INVALID {
            self.reset_change_tracking_at(mask);
        }
        let replica = self.slot(idx).replica_layer;
        if replica != INVALID {
            self.reset_change_tracking_at(replica);
        }

        let mut child = self.slot(idx).first_child;
        while child != INVALID {
            self.reset_change_tracking_at(child);
            child = self.slot(child).next_sibling;
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::color::Color;

    #[test]
    fn subtree_propagation_reaches_descendants() {
        let mut tree = SceneTree::new();
        let root = tree.create_node(1);
        let child = tree.create_node(2);
        let grandchild = tree.create_node(3);
        tree.add_child(root, child);
        tree.add_child(child, grandchild);

        tree.set_masks_to_bounds(root, true);

        assert!(tree.node(root).layer_property_changed());
        assert!(tree.node(child).layer_property_changed());
        assert!(tree.node(grandchild).layer_property_changed());
    }

    #[test]
    fn local_change_does_not_touch_children() {
        let mut tree = SceneTree::new();
        let root = tree.create_node(1);
        let child = tree.create_node(2);
        tree.add_child(root, child);

        tree.set_background_color(root, Color::from_argb(0xff, 0, 0, 0));

        assert!(tree.node(root).layer_property_changed());
        assert!(!tree.node(child).layer_property_changed());
    }

    #[test]
    fn surface_property_query_walks_to_surface_owner() {
        let mut tree = SceneTree::new();
        let root = tree.create_node(1);
        let mid = tree.create_node(2);
        let leaf = tree.create_node(3);
        tree.add_child(root, mid);
        tree.add_child(mid, leaf);

        tree.set_opacity(root, 0.5);

        // No surfaces anywhere: the change is visible from every descendant.
        assert!(tree.layer_surface_property_changed(root));
        assert!(tree.layer_surface_property_changed(mid));
        assert!(tree.layer_surface_property_changed(leaf));
    }

    #[test]
    fn surface_owner_stops_the_ancestor_walk() {
        let mut tree = SceneTree::new();
        let root = tree.create_node(1);
        let mid = tree.create_node(2);
        let leaf = tree.create_node(3);
        tree.add_child(root, mid);
        tree.add_child(mid, leaf);

        // `mid` owns a surface, so damage above it belongs to a different
        // surface and must not leak down to `leaf`.
        tree.create_render_surface(mid);
        tree.set_opacity(root, 0.5);

        assert!(tree.layer_surface_property_changed(root));
        assert!(!tree.layer_surface_property_changed(leaf));

        // The walk stops at the surface owner without consulting its flag;
        // a change on `mid` itself reads true only on `mid`. The damage pass
        // visits surface owners directly.
        tree.set_opacity(mid, 0.25);
        assert!(tree.layer_surface_property_changed(mid));
        assert!(!tree.layer_surface_property_changed(leaf));
    }

    #[test]
    fn non_surface_ancestor_changes_reach_descendants() {
        let mut tree = SceneTree::new();
        let root = tree.create_node(1);
        let mid = tree.create_node(2);
        let leaf = tree.create_node(3);
        tree.add_child(root, mid);
        tree.add_child(mid, leaf);
        tree.create_render_surface(root);

        // `mid` owns no surface, so its change is visible below it.
        tree.set_opacity(mid, 0.25);
        assert!(tree.layer_surface_property_changed(leaf));
        assert!(!tree.layer_surface_property_changed(root));
    }

    #[test]
    fn reset_clears_flags_update_rects_and_owned_sublayers() {
        let mut tree = SceneTree::new();
        let root = tree.create_node(1);
        let child = tree.create_node(2);
        let mask = tree.create_node(3);
        let replica = tree.create_node(4);
        tree.add_child(root, child);
        tree.set_mask_layer(root, Some(mask));
        tree.set_replica_layer(root, Some(replica));
        tree.create_render_surface(root);

        tree.set_opacity(root, 0.5);
        tree.set_masks_to_bounds(root, true);
        tree.set_update_rect(root, Rect::new(0.0, 0.0, 10.0, 10.0));
        let mask = tree.mask_layer(root).unwrap();
        let replica = tree.replica_layer(root).unwrap();

        tree.reset_all_change_tracking_for_subtree(root);

        for id in [root, child, mask, replica] {
            assert!(!tree.node(id).layer_property_changed());
            assert!(!tree.layer_surface_property_changed(id));
            assert_eq!(tree.node(id).update_rect(), Rect::ZERO);
        }
        assert!(!tree.node(root).render_surface().unwrap().surface_property_changed());
    }
}
