// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollbar attachment and offset forwarding.
//!
//! Scrollbar rendering and fade animation live outside this core. The
//! controller exists so a scrollable node can forward every scroll-offset
//! change to whatever draws its scrollbars; it is created lazily on the first
//! scrollbar attachment.

use kurbo::Vec2;

use crate::scene::NodeId;

/// Tracks the scrollbar layers attached to one scrollable node and the last
/// scroll offset forwarded to them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollbarController {
    horizontal_scrollbar_layer: Option<NodeId>,
    vertical_scrollbar_layer: Option<NodeId>,
    last_offset: Vec2,
}

impl ScrollbarController {
    /// Creates a controller with no attached scrollbar layers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new total scroll offset (committed position plus delta).
    pub fn update_scroll_offset(&mut self, offset: Vec2) {
        self.last_offset = offset;
    }

    /// Returns the most recently forwarded scroll offset.
    #[must_use]
    pub fn last_offset(&self) -> Vec2 {
        self.last_offset
    }

    /// Returns the attached horizontal scrollbar layer, if any.
    #[must_use]
    pub fn horizontal_scrollbar_layer(&self) -> Option<NodeId> {
        self.horizontal_scrollbar_layer
    }

    /// Returns the attached vertical scrollbar layer, if any.
    #[must_use]
    pub fn vertical_scrollbar_layer(&self) -> Option<NodeId> {
        self.vertical_scrollbar_layer
    }

    pub(crate) fn set_horizontal_scrollbar_layer(&mut self, layer: Option<NodeId>) {
        self.horizontal_scrollbar_layer = layer;
    }

    pub(crate) fn set_vertical_scrollbar_layer(&mut self, layer: Option<NodeId>) {
        self.vertical_scrollbar_layer = layer;
    }
}
