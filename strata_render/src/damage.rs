// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage aggregation from the tree's change tracking.

use alloc::vec::Vec;

use strata_core::geometry::IntRect;
use strata_core::scene::{NodeId, SceneTree};

/// A region of the output that needs re-rendering.
///
/// Backends can use this to minimize GPU work by only redrawing areas that
/// changed since the last frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DamageRegion {
    /// The entire output needs redrawing.
    #[default]
    Full,
    /// A list of target-space rectangles that need redrawing.
    Rects(Vec<IntRect>),
    /// Nothing changed; the previous frame can be reused.
    None,
}

impl DamageRegion {
    /// Returns `true` if no region needs redrawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Rects(rects) => rects.is_empty(),
            Self::Full => false,
        }
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&*self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => {
                let mut merged = a.clone();
                merged.extend_from_slice(b);
                *self = Self::Rects(merged);
            }
        }
    }
}

/// Aggregates damage for the subtree rooted at `root` from the tree's
/// change-tracking flags.
///
/// A layer whose properties changed (its own flag, or a surface-level change
/// visible through its ancestors) contributes its whole target-space
/// footprint. A layer whose content repainted contributes its update rect,
/// mapped to content coordinates and offset into the footprint.
///
/// Does not reset the flags; run
/// [`reset_all_change_tracking_for_subtree`](SceneTree::reset_all_change_tracking_for_subtree)
/// once the damage has been consumed.
///
/// # Panics
///
/// Panics if the handle is stale.
#[must_use]
pub fn collect_damage(tree: &SceneTree, root: NodeId) -> DamageRegion {
    let mut rects = Vec::new();
    collect_into(tree, root, &mut rects);
    if rects.is_empty() {
        DamageRegion::None
    } else {
        DamageRegion::Rects(rects)
    }
}

fn collect_into(tree: &SceneTree, id: NodeId, rects: &mut Vec<IntRect>) {
    let node = tree.node(id);
    let footprint = node.drawable_content_rect();

    if node.layer_property_changed()
        || tree.layer_surface_property_changed(id)
        || node.layer_is_always_damaged()
    {
        if !footprint.is_empty() {
            rects.push(footprint);
        }
    } else {
        let update = node.update_rect();
        if update.area() > 0.0 {
            let content = node.layer_rect_to_content_rect(IntRect::enclosing(update));
            if !content.is_empty() {
                rects.push(IntRect::new(
                    footprint.x + content.x,
                    footprint.y + content.y,
                    content.width,
                    content.height,
                ));
            }
        }
    }

    if let Some(mask) = tree.mask_layer(id) {
        collect_into(tree, mask, rects);
    }
    if let Some(replica) = tree.replica_layer(id) {
        collect_into(tree, replica, rects);
    }
    for child in tree.children(id) {
        collect_into(tree, child, rects);
    }
}
