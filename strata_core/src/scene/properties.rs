// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property setters and their damage classes.
//!
//! Every tracked setter is equality-gated: storing the current value again
//! is a no-op and marks nothing. When the value does change, the setter
//! propagates damage to one of four scopes:
//!
//! - **local** — only this node's `layer_property_changed`,
//! - **subtree** — this node and every descendant,
//! - **descendants** — every descendant but not this node,
//! - **surface** — this node's `layer_surface_property_changed` only
//!   (the subtree scope is synthesized at query time, see
//!   [`SceneTree::layer_surface_property_changed`]).
//!
//! Computed outputs and per-commit bookkeeping are plain stores with no
//! damage at all; the layout pass that writes them is itself driven by the
//! damage these setters recorded.

use kurbo::{Point, Rect};

use crate::color::Color;
use crate::filter::FilterOperations;
use crate::geometry::{IntRect, IntSize};
use crate::resource::ResourceId;
use crate::transform::Transform3d;

use super::id::NodeId;
use super::tree::SceneTree;

/// Equality-gated setter boilerplate. Expands to a method that stores the
/// value and applies the named damage scope only when the value changed.
macro_rules! tracked_setter {
    ($(#[$meta:meta])* $name:ident, $field:ident, $ty:ty, local) => {
        $(#[$meta])*
        pub fn $name(&mut self, id: NodeId, value: $ty) {
            self.validate(id);
            if self.slot(id.idx).$field == value {
                return;
            }
            let node = self.slot_mut(id.idx);
            node.$field = value;
            node.layer_property_changed = true;
        }
    };
    ($(#[$meta:meta])* $name:ident, $field:ident, $ty:ty, subtree) => {
        $(#[$meta])*
        pub fn $name(&mut self, id: NodeId, value: $ty) {
            self.validate(id);
            if self.slot(id.idx).$field == value {
                return;
            }
            self.slot_mut(id.idx).$field = value;
            self.note_layer_property_changed_for_subtree(id.idx);
        }
    };
    ($(#[$meta:meta])* $name:ident, $field:ident, $ty:ty, surface) => {
        $(#[$meta])*
        pub fn $name(&mut self, id: NodeId, value: $ty) {
            self.validate(id);
            if self.slot(id.idx).$field == value {
                return;
            }
            let node = self.slot_mut(id.idx);
            node.$field = value;
            node.layer_surface_property_changed = true;
        }
    };
    ($(#[$meta:meta])* $name:ident, $field:ident, $ty:ty, plain) => {
        $(#[$meta])*
        pub fn $name(&mut self, id: NodeId, value: $ty) {
            self.validate(id);
            self.slot_mut(id.idx).$field = value;
        }
    };
}

impl SceneTree {
    // -- Geometry and style (tracked) --

    /// Sets the untransformed layer size.
    ///
    /// When the layer clips its subtree to these bounds, resizing damages
    /// the whole subtree; otherwise only this layer repaints.
    pub fn set_bounds(&mut self, id: NodeId, bounds: IntSize) {
        self.validate(id);
        if self.slot(id.idx).bounds == bounds {
            return;
        }
        self.slot_mut(id.idx).bounds = bounds;
        if self.slot(id.idx).masks_to_bounds {
            self.note_layer_property_changed_for_subtree(id.idx);
        } else {
            self.slot_mut(id.idx).layer_property_changed = true;
        }
    }

    tracked_setter!(
        /// Sets the transform origin, as a fraction of the bounds.
        set_anchor_point, anchor_point, Point, subtree
    );
    tracked_setter!(
        /// Sets the z-offset of the transform origin.
        set_anchor_point_z, anchor_point_z, f64, subtree
    );
    tracked_setter!(
        /// Sets the layer's position within its parent, before transforms.
        set_position, position, Point, subtree
    );
    tracked_setter!(
        /// Sets whether the layer clips its subtree to its bounds.
        set_masks_to_bounds, masks_to_bounds, bool, subtree
    );
    tracked_setter!(
        /// Declares the layer's content fully opaque, enabling culling
        /// behind it.
        set_contents_opaque, contents_opaque, bool, subtree
    );
    tracked_setter!(
        /// Sets whether descendants keep their own 3D positions rather than
        /// being flattened into this layer's plane.
        set_preserves_3d, preserves_3d, bool, subtree
    );
    tracked_setter!(
        /// Sets whether back-facing content is drawn.
        set_double_sided, double_sided, bool, subtree
    );
    tracked_setter!(
        /// Sets the transform applied on the compositor side, after the
        /// layer transform.
        set_impl_transform, impl_transform, Transform3d, subtree
    );
    tracked_setter!(
        /// Sets the filter chain applied to the layer and its subtree.
        set_filters, filters, FilterOperations, subtree
    );
    tracked_setter!(
        /// Sets the filter chain applied to what is behind the layer.
        /// Damage is local: the backdrop itself is not part of the subtree.
        set_background_filters, background_filters, FilterOperations, local
    );
    tracked_setter!(
        /// Sets whether the layer produces visible content.
        set_draws_content, draws_content, bool, local
    );
    tracked_setter!(
        /// Sets the fill color drawn behind the content.
        set_background_color, background_color, Color, local
    );
    tracked_setter!(
        /// Sets the debug border color.
        set_debug_border_color, debug_border_color, Color, local
    );
    tracked_setter!(
        /// Sets the debug border width.
        set_debug_border_width, debug_border_width, f64, local
    );
    tracked_setter!(
        /// Sets the size of the layer's content, which may differ from the
        /// bounds when content is rastered at another resolution.
        set_content_bounds, content_bounds, IntSize, local
    );

    /// Records that this layer's position among its siblings changed.
    ///
    /// Pass `false` to record "no change" (a no-op); there is no way to
    /// retract a recorded change short of a full reset.
    pub fn set_stacking_order_changed(&mut self, id: NodeId, changed: bool) {
        self.validate(id);
        if changed {
            self.note_layer_property_changed_for_subtree(id.idx);
        }
    }

    /// Sets the transform applied to children only.
    ///
    /// The layer's own geometry is unaffected, so damage covers descendants
    /// but not the layer itself.
    pub fn set_sublayer_transform(&mut self, id: NodeId, transform: Transform3d) {
        self.validate(id);
        if self.slot(id.idx).sublayer_transform == transform {
            return;
        }
        self.slot_mut(id.idx).sublayer_transform = transform;
        self.note_layer_property_changed_for_descendants(id.idx);
    }

    // -- Surface-level properties --

    tracked_setter!(
        /// Sets the layer's opacity.
        ///
        /// Opacity applies at the render-surface level, so only the
        /// surface-changed flag is raised; descendants observe it through
        /// [`SceneTree::layer_surface_property_changed`].
        set_opacity, opacity, f32, surface
    );
    tracked_setter!(
        /// Sets the layer's transform about its anchor point.
        ///
        /// Like opacity, a surface-level change.
        set_transform, transform, Transform3d, surface
    );

    /// Opacity update driven by the animation system. Same damage as
    /// [`set_opacity`](Self::set_opacity).
    pub fn set_opacity_from_animation(&mut self, id: NodeId, opacity: f32) {
        self.set_opacity(id, opacity);
    }

    /// Transform update driven by the animation system. Same damage as
    /// [`set_transform`](Self::set_transform).
    pub fn set_transform_from_animation(&mut self, id: NodeId, transform: Transform3d) {
        self.set_transform(id, transform);
    }

    // -- Computed outputs and per-commit bookkeeping (untracked) --

    tracked_setter!(
        /// Stores the draw transform computed by the layout pass.
        set_draw_transform, draw_transform, Transform3d, plain
    );
    tracked_setter!(
        /// Stores the screen-space transform computed by the layout pass.
        set_screen_space_transform, screen_space_transform, Transform3d, plain
    );
    tracked_setter!(
        /// Stores the effective opacity computed by the layout pass.
        set_draw_opacity, draw_opacity, f32, plain
    );
    tracked_setter!(
        /// Stores the visible portion of the content, in content space.
        set_visible_content_rect, visible_content_rect, IntRect, plain
    );
    tracked_setter!(
        /// Stores the layer's drawable footprint, in target space.
        set_drawable_content_rect, drawable_content_rect, IntRect, plain
    );
    tracked_setter!(
        /// Stores the region repainted this frame, in content space.
        /// The damage pass consumes it; the reset clears it.
        set_update_rect, update_rect, Rect, plain
    );
    tracked_setter!(
        /// Stores or clears the resource backing the layer's content.
        set_contents_resource, contents_resource, Option<ResourceId>, plain
    );
    tracked_setter!(
        /// Forces the layout pass to give this layer a render surface.
        set_force_render_surface, force_render_surface, bool, plain
    );
    tracked_setter!(
        /// Inherits backface visibility from the parent instead of this
        /// layer's own transform.
        set_use_parent_backface_visibility, use_parent_backface_visibility, bool, plain
    );
    tracked_setter!(
        /// Sets whether missing tiles draw a checkerboard.
        set_draw_checkerboard_for_missing_tiles, draw_checkerboard_for_missing_tiles, bool, plain
    );
    tracked_setter!(
        /// Sets whether text in this layer may use subpixel antialiasing.
        set_use_lcd_text, use_lcd_text, bool, plain
    );
}
