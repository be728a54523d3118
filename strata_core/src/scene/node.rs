// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node state and read-only queries.

use kurbo::{Point, Rect, Vec2};

use crate::animation::{AnimatedProperty, AnimationController};
use crate::color::Color;
use crate::filter::FilterOperations;
use crate::geometry::{IntPoint, IntRect, IntSize, Region};
use crate::resource::ResourceId;
use crate::scrollbar::ScrollbarController;
use crate::settings::Settings;
use crate::transform::Transform3d;

use super::id::INVALID;
use super::surface::RenderSurface;

/// One layer of the retained scene graph.
///
/// Nodes are owned by a [`SceneTree`](super::SceneTree) and addressed by
/// [`NodeId`](super::NodeId) handles. All mutation goes through tree setters
/// so damage propagation cannot be bypassed; this type exposes the read side.
#[derive(Debug)]
pub struct SceneNode {
    pub(crate) id: i32,

    // -- Topology (raw slot indices; INVALID when absent) --
    pub(crate) parent: u32,
    pub(crate) first_child: u32,
    pub(crate) next_sibling: u32,
    pub(crate) prev_sibling: u32,
    pub(crate) mask_layer: u32,
    pub(crate) replica_layer: u32,
    // Cached sublayer ids for change detection, -1 when absent.
    pub(crate) mask_layer_id: i32,
    pub(crate) replica_layer_id: i32,

    // -- Geometry and style --
    pub(crate) bounds: IntSize,
    pub(crate) content_bounds: IntSize,
    pub(crate) position: Point,
    pub(crate) anchor_point: Point,
    pub(crate) anchor_point_z: f64,
    pub(crate) transform: Transform3d,
    pub(crate) sublayer_transform: Transform3d,
    pub(crate) impl_transform: Transform3d,
    pub(crate) opacity: f32,
    pub(crate) contents_opaque: bool,
    pub(crate) masks_to_bounds: bool,
    pub(crate) double_sided: bool,
    pub(crate) preserves_3d: bool,
    pub(crate) draws_content: bool,
    pub(crate) force_render_surface: bool,
    pub(crate) use_parent_backface_visibility: bool,
    pub(crate) draw_checkerboard_for_missing_tiles: bool,
    pub(crate) use_lcd_text: bool,
    pub(crate) background_color: Color,
    pub(crate) debug_border_color: Color,
    pub(crate) debug_border_width: f64,
    pub(crate) filters: FilterOperations,
    pub(crate) background_filters: FilterOperations,

    // -- Scroll state --
    pub(crate) scroll_position: IntPoint,
    pub(crate) scroll_delta: Vec2,
    pub(crate) max_scroll_position: IntSize,
    pub(crate) scrollable: bool,
    pub(crate) should_scroll_on_main_thread: bool,
    pub(crate) have_wheel_event_handlers: bool,
    pub(crate) non_fast_scrollable_region: Region,
    pub(crate) scrollbar_controller: Option<ScrollbarController>,

    // -- Computed outputs (written by external passes) --
    pub(crate) draw_transform: Transform3d,
    pub(crate) screen_space_transform: Transform3d,
    pub(crate) draw_opacity: f32,
    pub(crate) visible_content_rect: IntRect,
    pub(crate) drawable_content_rect: IntRect,

    // -- Render surface --
    pub(crate) render_target: u32,
    pub(crate) render_surface: Option<RenderSurface>,

    // -- Content --
    pub(crate) contents_resource: Option<ResourceId>,

    // -- Change tracking --
    pub(crate) layer_property_changed: bool,
    pub(crate) layer_surface_property_changed: bool,
    pub(crate) update_rect: Rect,

    // -- Collaborators --
    pub(crate) animation: AnimationController,

    #[cfg(debug_assertions)]
    pub(crate) between_will_draw_and_did_draw: bool,
}

impl SceneNode {
    pub(crate) fn new(id: i32) -> Self {
        assert!(id > 0, "layer id must be positive, got {id}");
        Self {
            id,
            parent: INVALID,
            first_child: INVALID,
            next_sibling: INVALID,
            prev_sibling: INVALID,
            mask_layer: INVALID,
            replica_layer: INVALID,
            mask_layer_id: -1,
            replica_layer_id: -1,
            bounds: IntSize::ZERO,
            content_bounds: IntSize::ZERO,
            position: Point::ZERO,
            anchor_point: Point::new(0.5, 0.5),
            anchor_point_z: 0.0,
            transform: Transform3d::IDENTITY,
            sublayer_transform: Transform3d::IDENTITY,
            impl_transform: Transform3d::IDENTITY,
            opacity: 1.0,
            contents_opaque: false,
            masks_to_bounds: false,
            double_sided: true,
            preserves_3d: false,
            draws_content: false,
            force_render_surface: false,
            use_parent_backface_visibility: false,
            draw_checkerboard_for_missing_tiles: false,
            use_lcd_text: false,
            background_color: Color::TRANSPARENT,
            debug_border_color: Color::TRANSPARENT,
            debug_border_width: 0.0,
            filters: FilterOperations::new(),
            background_filters: FilterOperations::new(),
            scroll_position: IntPoint::ZERO,
            scroll_delta: Vec2::ZERO,
            max_scroll_position: IntSize::ZERO,
            scrollable: false,
            should_scroll_on_main_thread: false,
            have_wheel_event_handlers: false,
            non_fast_scrollable_region: Region::new(),
            scrollbar_controller: None,
            draw_transform: Transform3d::IDENTITY,
            screen_space_transform: Transform3d::IDENTITY,
            draw_opacity: 0.0,
            visible_content_rect: IntRect::ZERO,
            drawable_content_rect: IntRect::ZERO,
            render_target: INVALID,
            render_surface: None,
            contents_resource: None,
            layer_property_changed: false,
            layer_surface_property_changed: false,
            update_rect: Rect::ZERO,
            animation: AnimationController::new(),
            #[cfg(debug_assertions)]
            between_will_draw_and_did_draw: false,
        }
    }

    /// Returns the externally assigned layer id (always positive).
    #[inline]
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Returns the layer bounds in layer space.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> IntSize {
        self.bounds
    }

    /// Returns the content bounds (bounds scaled to content resolution).
    #[inline]
    #[must_use]
    pub const fn content_bounds(&self) -> IntSize {
        self.content_bounds
    }

    /// Returns the position relative to the parent.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Returns the anchor point in normalized layer coordinates.
    #[inline]
    #[must_use]
    pub const fn anchor_point(&self) -> Point {
        self.anchor_point
    }

    /// Returns the z component of the anchor point.
    #[inline]
    #[must_use]
    pub const fn anchor_point_z(&self) -> f64 {
        self.anchor_point_z
    }

    /// Returns the layer's local transform.
    #[inline]
    #[must_use]
    pub const fn transform(&self) -> Transform3d {
        self.transform
    }

    /// Returns the transform applied to children.
    #[inline]
    #[must_use]
    pub const fn sublayer_transform(&self) -> Transform3d {
        self.sublayer_transform
    }

    /// Returns the compositor-side adjustment transform.
    #[inline]
    #[must_use]
    pub const fn impl_transform(&self) -> Transform3d {
        self.impl_transform
    }

    /// Returns the layer opacity.
    #[inline]
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Returns whether the layer's contents are fully opaque.
    #[inline]
    #[must_use]
    pub const fn contents_opaque(&self) -> bool {
        self.contents_opaque
    }

    /// Returns whether descendants are clipped to the layer bounds.
    #[inline]
    #[must_use]
    pub const fn masks_to_bounds(&self) -> bool {
        self.masks_to_bounds
    }

    /// Returns whether back faces are visible.
    #[inline]
    #[must_use]
    pub const fn double_sided(&self) -> bool {
        self.double_sided
    }

    /// Returns whether descendants share this layer's 3-D space.
    #[inline]
    #[must_use]
    pub const fn preserves_3d(&self) -> bool {
        self.preserves_3d
    }

    /// Returns whether the layer draws content of its own.
    #[inline]
    #[must_use]
    pub const fn draws_content(&self) -> bool {
        self.draws_content
    }

    /// Returns whether the layer must originate a render surface.
    #[inline]
    #[must_use]
    pub const fn force_render_surface(&self) -> bool {
        self.force_render_surface
    }

    /// Returns whether backface visibility is inherited from the parent.
    #[inline]
    #[must_use]
    pub const fn use_parent_backface_visibility(&self) -> bool {
        self.use_parent_backface_visibility
    }

    /// Returns whether text on this layer is rendered with LCD subpixel
    /// antialiasing.
    #[inline]
    #[must_use]
    pub const fn use_lcd_text(&self) -> bool {
        self.use_lcd_text
    }

    /// Returns the background color.
    #[inline]
    #[must_use]
    pub const fn background_color(&self) -> Color {
        self.background_color
    }

    /// Returns the debug border color.
    #[inline]
    #[must_use]
    pub const fn debug_border_color(&self) -> Color {
        self.debug_border_color
    }

    /// Returns the debug border width.
    #[inline]
    #[must_use]
    pub const fn debug_border_width(&self) -> f64 {
        self.debug_border_width
    }

    /// Returns whether a debug border would actually be drawn.
    ///
    /// Both a non-zero alpha and a positive width are required; a zero-width
    /// border with full alpha is still suppressed.
    #[inline]
    #[must_use]
    pub fn has_debug_borders(&self) -> bool {
        self.debug_border_color.alpha() != 0 && self.debug_border_width > 0.0
    }

    /// Returns the layer's filter stack.
    #[inline]
    #[must_use]
    pub const fn filters(&self) -> &FilterOperations {
        &self.filters
    }

    /// Returns the layer's background filter stack.
    #[inline]
    #[must_use]
    pub const fn background_filters(&self) -> &FilterOperations {
        &self.background_filters
    }

    /// Returns the committed scroll position.
    #[inline]
    #[must_use]
    pub const fn scroll_position(&self) -> IntPoint {
        self.scroll_position
    }

    /// Returns the accumulated, uncommitted scroll delta.
    #[inline]
    #[must_use]
    pub const fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    /// Returns the maximum scroll position.
    #[inline]
    #[must_use]
    pub const fn max_scroll_position(&self) -> IntSize {
        self.max_scroll_position
    }

    /// Returns the committed scroll position plus the accumulated delta.
    #[inline]
    #[must_use]
    pub fn total_scroll_offset(&self) -> Vec2 {
        Vec2::new(
            f64::from(self.scroll_position.x) + self.scroll_delta.x,
            f64::from(self.scroll_position.y) + self.scroll_delta.y,
        )
    }

    /// Returns whether the layer accepts compositor-thread scrolling.
    #[inline]
    #[must_use]
    pub const fn scrollable(&self) -> bool {
        self.scrollable
    }

    /// Returns whether scrolls on this layer must route to the main thread.
    #[inline]
    #[must_use]
    pub const fn should_scroll_on_main_thread(&self) -> bool {
        self.should_scroll_on_main_thread
    }

    /// Returns whether the layer has registered wheel-event handlers.
    #[inline]
    #[must_use]
    pub const fn have_wheel_event_handlers(&self) -> bool {
        self.have_wheel_event_handlers
    }

    /// Returns the region that cannot be scrolled on the compositor thread.
    #[inline]
    #[must_use]
    pub const fn non_fast_scrollable_region(&self) -> &Region {
        &self.non_fast_scrollable_region
    }

    /// Returns the scrollbar controller, if one has been created.
    #[inline]
    #[must_use]
    pub const fn scrollbar_controller(&self) -> Option<&ScrollbarController> {
        self.scrollbar_controller.as_ref()
    }

    /// Returns the draw transform computed by the layout pass.
    #[inline]
    #[must_use]
    pub const fn draw_transform(&self) -> Transform3d {
        self.draw_transform
    }

    /// Returns the screen-space transform computed by the layout pass.
    #[inline]
    #[must_use]
    pub const fn screen_space_transform(&self) -> Transform3d {
        self.screen_space_transform
    }

    /// Returns the draw opacity computed by the layout pass.
    #[inline]
    #[must_use]
    pub const fn draw_opacity(&self) -> f32 {
        self.draw_opacity
    }

    /// Returns the visible content rect computed by the layout pass.
    #[inline]
    #[must_use]
    pub const fn visible_content_rect(&self) -> IntRect {
        self.visible_content_rect
    }

    /// Returns the drawable content rect computed by the layout pass.
    #[inline]
    #[must_use]
    pub const fn drawable_content_rect(&self) -> IntRect {
        self.drawable_content_rect
    }

    /// Returns the render surface owned by this node, if any.
    #[inline]
    #[must_use]
    pub const fn render_surface(&self) -> Option<&RenderSurface> {
        self.render_surface.as_ref()
    }

    /// Returns the contents resource id for content-bearing layers.
    ///
    /// # Panics
    ///
    /// Panics when called on a layer that carries no content resource; that
    /// indicates a caller misusing an abstract capability, not a data error.
    #[must_use]
    pub fn contents_resource_id(&self) -> ResourceId {
        match self.contents_resource {
            Some(id) => id,
            None => panic!(
                "contents_resource_id queried on layer {} which has no content resource",
                self.id
            ),
        }
    }

    /// Returns the incremental damage rectangle accumulated this frame.
    #[inline]
    #[must_use]
    pub const fn update_rect(&self) -> Rect {
        self.update_rect
    }

    /// Returns whether a subtree-relevant property changed this frame.
    #[inline]
    #[must_use]
    pub const fn layer_property_changed(&self) -> bool {
        self.layer_property_changed
    }

    /// Returns the animation bookkeeping for this node.
    #[inline]
    #[must_use]
    pub const fn animation(&self) -> &AnimationController {
        &self.animation
    }

    /// Returns mutable animation bookkeeping for this node.
    #[inline]
    pub const fn animation_mut(&mut self) -> &mut AnimationController {
        &mut self.animation
    }

    /// Returns whether opacity is currently driven by an animation.
    #[inline]
    #[must_use]
    pub const fn opacity_is_animating(&self) -> bool {
        self.animation.is_animating(AnimatedProperty::Opacity)
    }

    /// Returns whether the transform is currently driven by an animation.
    #[inline]
    #[must_use]
    pub const fn transform_is_animating(&self) -> bool {
        self.animation.is_animating(AnimatedProperty::Transform)
    }

    /// Returns the portion of the visible content rect that is known to be
    /// opaque.
    #[must_use]
    pub fn visible_content_opaque_region(&self) -> Region {
        if self.contents_opaque {
            Region::from(self.visible_content_rect)
        } else {
            Region::new()
        }
    }

    /// Returns whether missing tiles should be drawn as a checkerboard.
    ///
    /// The per-layer flag is overridden by the global setting that fills
    /// missing tiles with the background color instead.
    #[inline]
    #[must_use]
    pub const fn draw_checkerboard_for_missing_tiles(&self, settings: &Settings) -> bool {
        self.draw_checkerboard_for_missing_tiles
            && !settings.background_color_instead_of_checkerboard
    }

    /// Returns whether the damage pass must treat this layer as fully damaged
    /// every frame.
    #[inline]
    #[must_use]
    pub const fn layer_is_always_damaged(&self) -> bool {
        false
    }

    /// Scales a layer-space rectangle into content space.
    #[must_use]
    pub fn layer_rect_to_content_rect(&self, layer_rect: IntRect) -> IntRect {
        if self.bounds.is_empty() {
            return IntRect::ZERO;
        }
        let width_scale = f64::from(self.content_bounds.width) / f64::from(self.bounds.width);
        let height_scale = f64::from(self.content_bounds.height) / f64::from(self.bounds.height);
        let r = layer_rect.to_rect();
        let scaled = Rect::new(
            r.x0 * width_scale,
            r.y0 * height_scale,
            r.x1 * width_scale,
            r.y1 * height_scale,
        );
        IntRect::enclosing(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_construction_contract() {
        let node = SceneNode::new(1);
        assert_eq!(node.id(), 1);
        assert_eq!(node.opacity(), 1.0);
        assert_eq!(node.anchor_point(), Point::new(0.5, 0.5));
        assert!(node.double_sided());
        assert!(!node.draws_content());
        assert!(!node.layer_property_changed());
        assert_eq!(node.update_rect(), Rect::ZERO);
        assert_eq!(node.mask_layer_id, -1);
        assert_eq!(node.replica_layer_id, -1);
    }

    #[test]
    #[should_panic(expected = "layer id must be positive")]
    fn non_positive_id_is_fatal() {
        let _ = SceneNode::new(0);
    }

    #[test]
    fn debug_border_predicate_requires_both_conditions() {
        let mut node = SceneNode::new(1);
        assert!(!node.has_debug_borders());

        // Full alpha, zero width: still suppressed.
        node.debug_border_color = Color::from_argb(0xff, 0, 0xff, 0);
        assert!(!node.has_debug_borders());

        // Positive width, transparent color: still suppressed.
        node.debug_border_color = Color::TRANSPARENT;
        node.debug_border_width = 2.0;
        assert!(!node.has_debug_borders());

        node.debug_border_color = Color::from_argb(0xff, 0, 0xff, 0);
        assert!(node.has_debug_borders());
    }

    #[test]
    fn opaque_region_follows_contents_opaque() {
        let mut node = SceneNode::new(1);
        node.visible_content_rect = IntRect::new(0, 0, 10, 10);
        assert!(node.visible_content_opaque_region().is_empty());

        node.contents_opaque = true;
        let region = node.visible_content_opaque_region();
        assert!(region.contains(IntPoint::new(5, 5)));
    }

    #[test]
    fn checkerboard_suppressed_by_settings() {
        let mut node = SceneNode::new(1);
        node.draw_checkerboard_for_missing_tiles = true;

        let settings = Settings::default();
        assert!(node.draw_checkerboard_for_missing_tiles(&settings));

        let settings = Settings {
            background_color_instead_of_checkerboard: true,
        };
        assert!(!node.draw_checkerboard_for_missing_tiles(&settings));
    }

    #[test]
    fn layer_rect_scales_to_content_space() {
        let mut node = SceneNode::new(1);
        node.bounds = IntSize::new(100, 100);
        node.content_bounds = IntSize::new(200, 50);
        let content = node.layer_rect_to_content_rect(IntRect::new(10, 10, 20, 20));
        assert_eq!(content, IntRect::new(20, 5, 40, 10));
    }

    #[test]
    fn empty_bounds_yield_empty_content_rect() {
        let node = SceneNode::new(1);
        assert_eq!(
            node.layer_rect_to_content_rect(IntRect::new(0, 0, 10, 10)),
            IntRect::ZERO
        );
    }

    #[test]
    #[should_panic(expected = "no content resource")]
    fn contents_resource_id_on_plain_layer_is_fatal() {
        let node = SceneNode::new(1);
        let _ = node.contents_resource_id();
    }

    #[test]
    fn total_scroll_offset_combines_position_and_delta() {
        let mut node = SceneNode::new(1);
        node.scroll_position = IntPoint::new(10, 20);
        node.scroll_delta = Vec2::new(0.5, -1.5);
        assert_eq!(node.total_scroll_offset(), Vec2::new(10.5, 18.5));
    }
}
