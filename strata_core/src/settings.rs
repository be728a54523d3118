// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compositor-wide settings consulted by the scene tree.

/// Global toggles that affect how layers answer draw-related queries.
///
/// Settings are owned by the embedder and passed by reference where a query
/// depends on them; the tree itself stores none of this state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    /// When set, missing tiles are filled with the layer's background color
    /// instead of a checkerboard pattern, suppressing
    /// [`SceneNode::draw_checkerboard_for_missing_tiles`].
    ///
    /// [`SceneNode::draw_checkerboard_for_missing_tiles`]:
    ///     crate::scene::SceneNode::draw_checkerboard_for_missing_tiles
    pub background_color_instead_of_checkerboard: bool,
}
