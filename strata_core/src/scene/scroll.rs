// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrolling: committed offsets, impl-side deltas, and gesture routing.

use kurbo::{Point, Vec2};

use crate::geometry::{IntPoint, IntSize, Region};
use crate::scrollbar::ScrollbarController;
use crate::trace::{ScrollRejectReason, Tracer, TryScrollEvent};

use super::id::NodeId;
use super::tree::SceneTree;

/// The outcome of routing a scroll gesture at a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollStatus {
    /// The gesture starts here, on the compositor thread.
    Started,
    /// The gesture must be handled by the main thread.
    OnMainThread,
    /// The gesture does not apply to this layer; keep looking.
    Ignored,
}

/// The kind of input driving a scroll gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollInputType {
    /// Touch or pointer gesture.
    Gesture,
    /// Mouse wheel.
    Wheel,
}

impl SceneTree {
    /// Applies a scroll delta, clamped so the total offset stays within
    /// `[0, max_scroll_position]` per axis, and returns the unconsumed
    /// remainder.
    ///
    /// A fully clamped-out scroll stores nothing and marks nothing; the
    /// whole input comes back as remainder. Otherwise the new delta damages
    /// the subtree and the scrollbar controller is notified.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn scroll_by(&mut self, id: NodeId, scroll: Vec2) -> Vec2 {
        self.validate(id);
        let node = self.slot(id.idx);
        let pos = node.scroll_position;
        let max = node.max_scroll_position;
        let min_delta = Vec2::new(-f64::from(pos.x), -f64::from(pos.y));
        let max_delta = Vec2::new(
            f64::from(max.width - pos.x),
            f64::from(max.height - pos.y),
        );
        let target = node.scroll_delta + scroll;
        // Clamp per axis with max-then-min, matching saturating behavior
        // when the committed position already exceeds the current maximum
        // (`f64::clamp` would panic there).
        let new_delta = Vec2::new(
            target.x.max(min_delta.x).min(max_delta.x),
            target.y.max(min_delta.y).min(max_delta.y),
        );
        let unscrolled = target - new_delta;

        if node.scroll_delta == new_delta {
            return unscrolled;
        }

        self.slot_mut(id.idx).scroll_delta = new_delta;
        self.notify_scrollbar_controller(id.idx);
        self.note_layer_property_changed_for_subtree(id.idx);
        unscrolled
    }

    /// Decides whether a scroll gesture at `screen_point` can start on this
    /// layer, checking in order:
    ///
    /// 1. the main-thread override flag,
    /// 2. an invertible screen-space transform (hit testing needs it),
    /// 3. the non-fast-scrollable region, hit tested in layer space
    ///    (a clipped projection skips this check),
    /// 4. wheel-event handlers, for wheel input,
    /// 5. whether the layer is scrollable at all.
    ///
    /// Every decision is reported to the tracer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn try_scroll(
        &self,
        id: NodeId,
        screen_point: Point,
        input_type: ScrollInputType,
        tracer: &mut Tracer<'_>,
    ) -> ScrollStatus {
        self.validate(id);
        let node = self.slot(id.idx);
        let layer_id = node.id;

        let mut decide = |status: ScrollStatus, reason: Option<ScrollRejectReason>| {
            tracer.try_scroll(&TryScrollEvent {
                layer_id,
                status,
                reason,
            });
            status
        };

        if node.should_scroll_on_main_thread {
            return decide(
                ScrollStatus::OnMainThread,
                Some(ScrollRejectReason::MainThreadFlag),
            );
        }

        let Some(inverse) = node.screen_space_transform.inverse() else {
            return decide(
                ScrollStatus::Ignored,
                Some(ScrollRejectReason::NonInvertibleTransform),
            );
        };

        if !node.non_fast_scrollable_region.is_empty() {
            // A clipped projection means the point has no well-defined
            // position in layer space; skip the region check.
            if let Some(local_point) = inverse.project_point(screen_point) {
                if node
                    .non_fast_scrollable_region
                    .contains(IntPoint::floored(local_point))
                {
                    return decide(
                        ScrollStatus::OnMainThread,
                        Some(ScrollRejectReason::NonFastScrollableRegion),
                    );
                }
            }
        }

        if input_type == ScrollInputType::Wheel && node.have_wheel_event_handlers {
            return decide(
                ScrollStatus::OnMainThread,
                Some(ScrollRejectReason::WheelEventHandlers),
            );
        }

        if !node.scrollable {
            return decide(
                ScrollStatus::Ignored,
                Some(ScrollRejectReason::NotScrollable),
            );
        }

        decide(ScrollStatus::Started, None)
    }

    // -- Scroll state setters --

    /// Sets the committed scroll position. Damages the subtree and notifies
    /// the scrollbar controller.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_scroll_position(&mut self, id: NodeId, position: IntPoint) {
        self.validate(id);
        if self.slot(id.idx).scroll_position == position {
            return;
        }
        self.slot_mut(id.idx).scroll_position = position;
        self.note_layer_property_changed_for_subtree(id.idx);
        self.notify_scrollbar_controller(id.idx);
    }

    /// Sets the impl-side scroll delta directly (commit plumbing). Damages
    /// the subtree and notifies the scrollbar controller.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_scroll_delta(&mut self, id: NodeId, delta: Vec2) {
        self.validate(id);
        if self.slot(id.idx).scroll_delta == delta {
            return;
        }
        self.slot_mut(id.idx).scroll_delta = delta;
        self.note_layer_property_changed_for_subtree(id.idx);
        self.notify_scrollbar_controller(id.idx);
    }

    /// Sets the maximum scrollable extent.
    ///
    /// Layout-derived state: stored unconditionally, marks no damage, but
    /// still notifies the scrollbar controller so thumb geometry can track
    /// the new range.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_max_scroll_position(&mut self, id: NodeId, max: IntSize) {
        self.validate(id);
        self.slot_mut(id.idx).max_scroll_position = max;
        self.notify_scrollbar_controller(id.idx);
    }

    /// Sets whether the layer accepts scroll gestures.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_scrollable(&mut self, id: NodeId, scrollable: bool) {
        self.validate(id);
        self.slot_mut(id.idx).scrollable = scrollable;
    }

    /// Forces scroll handling onto the main thread for this layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_should_scroll_on_main_thread(&mut self, id: NodeId, value: bool) {
        self.validate(id);
        self.slot_mut(id.idx).should_scroll_on_main_thread = value;
    }

    /// Records whether wheel-event handlers are registered on this layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_have_wheel_event_handlers(&mut self, id: NodeId, value: bool) {
        self.validate(id);
        self.slot_mut(id.idx).have_wheel_event_handlers = value;
    }

    /// Sets the region, in layer space, where fast scrolling is not safe.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_non_fast_scrollable_region(&mut self, id: NodeId, region: Region) {
        self.validate(id);
        self.slot_mut(id.idx).non_fast_scrollable_region = region;
    }

    // -- Scrollbar wiring --

    /// Associates a horizontal scrollbar layer, creating the scrollbar
    /// controller on first use, and pushes the current offset to it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_horizontal_scrollbar_layer(&mut self, id: NodeId, scrollbar: Option<NodeId>) {
        self.validate(id);
        self.slot_mut(id.idx)
            .scrollbar_controller
            .get_or_insert_with(ScrollbarController::default)
            .set_horizontal_scrollbar_layer(scrollbar);
        self.notify_scrollbar_controller(id.idx);
    }

    /// Associates a vertical scrollbar layer, creating the scrollbar
    /// controller on first use, and pushes the current offset to it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_vertical_scrollbar_layer(&mut self, id: NodeId, scrollbar: Option<NodeId>) {
        self.validate(id);
        self.slot_mut(id.idx)
            .scrollbar_controller
            .get_or_insert_with(ScrollbarController::default)
            .set_vertical_scrollbar_layer(scrollbar);
        self.notify_scrollbar_controller(id.idx);
    }

    /// Pushes the current total offset into the node's scrollbar
    /// controller, if it has one.
    fn notify_scrollbar_controller(&mut self, idx: u32) {
        let total = self.slot(idx).total_scroll_offset();
        if let Some(controller) = &mut self.slot_mut(idx).scrollbar_controller {
            controller.update_scroll_offset(total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::IntRect;
    use crate::transform::Transform3d;

    fn scrollable_layer(tree: &mut SceneTree) -> NodeId {
        let id = tree.create_node(1);
        tree.set_scrollable(id, true);
        tree.set_max_scroll_position(id, IntSize::new(100, 100));
        id
    }

    #[test]
    fn scroll_by_clamps_and_returns_remainder() {
        let mut tree = SceneTree::new();
        let id = scrollable_layer(&mut tree);

        let unscrolled = tree.scroll_by(id, Vec2::new(150.0, 150.0));

        assert_eq!(tree.node(id).scroll_delta(), Vec2::new(100.0, 100.0));
        assert_eq!(unscrolled, Vec2::new(50.0, 50.0));
        assert!(tree.node(id).layer_property_changed());
    }

    #[test]
    fn scroll_below_zero_is_clamped() {
        let mut tree = SceneTree::new();
        let id = scrollable_layer(&mut tree);
        tree.set_scroll_position(id, IntPoint::new(10, 10));

        let unscrolled = tree.scroll_by(id, Vec2::new(-30.0, -30.0));

        assert_eq!(tree.node(id).scroll_delta(), Vec2::new(-10.0, -10.0));
        assert_eq!(unscrolled, Vec2::new(-20.0, -20.0));
        assert_eq!(tree.node(id).total_scroll_offset(), Vec2::ZERO);
    }

    #[test]
    fn fully_clamped_scroll_marks_nothing() {
        let mut tree = SceneTree::new();
        let id = scrollable_layer(&mut tree);
        tree.scroll_by(id, Vec2::new(100.0, 100.0));
        tree.reset_all_change_tracking_for_subtree(id);

        // Already pinned at max; the whole input comes back.
        let unscrolled = tree.scroll_by(id, Vec2::new(10.0, 10.0));

        assert_eq!(unscrolled, Vec2::new(10.0, 10.0));
        assert!(!tree.node(id).layer_property_changed());
    }

    #[test]
    fn position_past_max_saturates_instead_of_panicking() {
        let mut tree = SceneTree::new();
        let id = tree.create_node(1);
        tree.set_scrollable(id, true);
        // Content shrank: the committed position now exceeds the maximum.
        tree.set_scroll_position(id, IntPoint::new(50, 50));
        tree.set_max_scroll_position(id, IntSize::new(20, 20));

        let unscrolled = tree.scroll_by(id, Vec2::ZERO);

        assert_eq!(tree.node(id).scroll_delta(), Vec2::new(-30.0, -30.0));
        assert_eq!(unscrolled, Vec2::new(30.0, 30.0));
    }

    #[test]
    fn max_scroll_position_marks_no_damage() {
        let mut tree = SceneTree::new();
        let id = tree.create_node(1);
        tree.set_max_scroll_position(id, IntSize::new(500, 500));
        assert!(!tree.node(id).layer_property_changed());
        assert_eq!(tree.node(id).max_scroll_position(), IntSize::new(500, 500));
    }

    #[test]
    fn try_scroll_starts_on_a_plain_scrollable_layer() {
        let mut tree = SceneTree::new();
        let id = scrollable_layer(&mut tree);
        let status = tree.try_scroll(
            id,
            Point::new(5.0, 5.0),
            ScrollInputType::Gesture,
            &mut Tracer::none(),
        );
        assert_eq!(status, ScrollStatus::Started);
    }

    #[test]
    fn try_scroll_honors_the_main_thread_flag_first() {
        let mut tree = SceneTree::new();
        let id = scrollable_layer(&mut tree);
        tree.set_should_scroll_on_main_thread(id, true);
        let status = tree.try_scroll(
            id,
            Point::new(5.0, 5.0),
            ScrollInputType::Gesture,
            &mut Tracer::none(),
        );
        assert_eq!(status, ScrollStatus::OnMainThread);
    }

    #[test]
    fn try_scroll_ignores_layers_with_singular_transforms() {
        let mut tree = SceneTree::new();
        let id = scrollable_layer(&mut tree);
        tree.set_screen_space_transform(id, Transform3d::from_scale(0.0, 1.0, 1.0));
        let status = tree.try_scroll(
            id,
            Point::new(5.0, 5.0),
            ScrollInputType::Gesture,
            &mut Tracer::none(),
        );
        assert_eq!(status, ScrollStatus::Ignored);
    }

    #[test]
    fn try_scroll_hit_tests_the_non_fast_region_in_layer_space() {
        let mut tree = SceneTree::new();
        let id = scrollable_layer(&mut tree);
        tree.set_non_fast_scrollable_region(id, Region::from(IntRect::new(0, 0, 50, 50)));
        // Layer space is shifted 100px right of screen space.
        tree.set_screen_space_transform(id, Transform3d::from_translation(100.0, 0.0, 0.0));

        let inside = tree.try_scroll(
            id,
            Point::new(110.0, 10.0),
            ScrollInputType::Gesture,
            &mut Tracer::none(),
        );
        assert_eq!(inside, ScrollStatus::OnMainThread);

        let outside = tree.try_scroll(
            id,
            Point::new(10.0, 10.0),
            ScrollInputType::Gesture,
            &mut Tracer::none(),
        );
        assert_eq!(outside, ScrollStatus::Started);
    }

    #[test]
    fn try_scroll_routes_wheel_input_past_handlers_to_main_thread() {
        let mut tree = SceneTree::new();
        let id = scrollable_layer(&mut tree);
        tree.set_have_wheel_event_handlers(id, true);

        let wheel = tree.try_scroll(
            id,
            Point::new(5.0, 5.0),
            ScrollInputType::Wheel,
            &mut Tracer::none(),
        );
        assert_eq!(wheel, ScrollStatus::OnMainThread);

        // Gesture input is unaffected by wheel handlers.
        let gesture = tree.try_scroll(
            id,
            Point::new(5.0, 5.0),
            ScrollInputType::Gesture,
            &mut Tracer::none(),
        );
        assert_eq!(gesture, ScrollStatus::Started);
    }

    #[test]
    fn try_scroll_ignores_non_scrollable_layers() {
        let mut tree = SceneTree::new();
        let id = tree.create_node(1);
        let status = tree.try_scroll(
            id,
            Point::new(5.0, 5.0),
            ScrollInputType::Gesture,
            &mut Tracer::none(),
        );
        assert_eq!(status, ScrollStatus::Ignored);
    }

    #[test]
    fn scrollbar_controller_tracks_the_total_offset() {
        let mut tree = SceneTree::new();
        let id = scrollable_layer(&mut tree);
        let scrollbar = tree.create_node(2);
        tree.set_horizontal_scrollbar_layer(id, Some(scrollbar));
        tree.set_scroll_position(id, IntPoint::new(10, 0));
        tree.scroll_by(id, Vec2::new(5.0, 0.0));

        let controller = tree.node(id).scrollbar_controller().unwrap();
        assert_eq!(controller.last_offset(), Vec2::new(15.0, 0.0));
        assert_eq!(controller.horizontal_scrollbar_layer(), Some(scrollbar));
    }

    #[test]
    fn set_scroll_position_damages_the_subtree() {
        let mut tree = SceneTree::new();
        let id = scrollable_layer(&mut tree);
        let child = tree.create_node(2);
        tree.add_child(id, child);

        tree.set_scroll_position(id, IntPoint::new(3, 4));
        assert!(tree.node(child).layer_property_changed());

        tree.reset_all_change_tracking_for_subtree(id);
        tree.set_scroll_position(id, IntPoint::new(3, 4));
        assert!(!tree.node(id).layer_property_changed());
    }
}
