// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth sorting of sibling layers in 3D contexts.

use crate::scene::{NodeId, SceneTree};
use crate::trace::{LayerSortEvent, Tracer};

/// Reorders a run of sibling layers by depth.
///
/// Layers inside a `preserves_3d` context draw back to front, which may
/// differ from paint order. The tree core only defines the seam; the sorting
/// policy (splitting intersecting layers, topological ordering) is supplied
/// by the renderer.
pub trait LayerSorter {
    /// Reorders `layers` in place into draw order.
    fn sort(&mut self, tree: &SceneTree, layers: &mut [NodeId]);
}

/// Runs a sorter over a sibling run, reporting the request to the tracer.
pub fn sort_layers(
    tree: &SceneTree,
    layers: &mut [NodeId],
    sorter: &mut dyn LayerSorter,
    tracer: &mut Tracer<'_>,
) {
    tracer.layer_sort(&LayerSortEvent {
        layer_count: layers.len(),
    });
    sorter.sort(tree, layers);
}
