// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, NodeId};
use super::tree::SceneTree;

/// An iterator over the direct children of a node, in paint order.
///
/// Created by [`SceneTree::children`].
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a SceneTree,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a SceneTree, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.tree.slot(idx).next_sibling;
        Some(self.tree.handle(idx))
    }
}
