// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena storage, tree topology, and ownership.

use alloc::vec::Vec;
use core::marker::PhantomData;

use super::id::{INVALID, NodeId};
use super::node::SceneNode;
use super::traverse::Children;

/// Arena storage for all scene nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot; destroyed nodes are recycled via a free list, and generation
/// counters prevent stale handle access.
///
/// Ownership flows strictly tree → node → children / mask / replica / render
/// surface. Parent links are observing raw indices, never shared ownership.
///
/// The tree is confined to the thread that created it: the raw-pointer marker
/// below makes it `!Send + !Sync`, so cross-thread mutation is rejected at
/// compile time rather than by a runtime thread-identity assertion.
#[derive(Debug)]
pub struct SceneTree {
    nodes: Vec<Option<SceneNode>>,
    generations: Vec<u32>,
    free_list: Vec<u32>,
    _thread_confined: PhantomData<*mut ()>,
}

impl Default for SceneTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree {
    /// Creates an empty scene tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            _thread_confined: PhantomData,
        }
    }

    // -- Allocation API --

    /// Creates a new node carrying the externally assigned layer id.
    ///
    /// The node starts detached, with an identity transform, full opacity,
    /// and no content.
    ///
    /// # Panics
    ///
    /// Panics if `layer_id` is not positive.
    pub fn create_node(&mut self, layer_id: i32) -> NodeId {
        let node = SceneNode::new(layer_id);
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot; its generation was bumped at destruction.
            self.nodes[idx as usize] = Some(node);
            idx
        } else {
            let idx = u32::try_from(self.nodes.len()).expect("scene tree slot count overflow");
            self.nodes.push(Some(node));
            self.generations.push(0);
            idx
        };
        NodeId {
            idx,
            generation: self.generations[idx as usize],
        }
    }

    /// Destroys a node and everything it owns: children, mask, replica, and
    /// render surface, recursively.
    ///
    /// The node is first detached from its parent, if it has one.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale, or (in debug builds) if any destroyed
    /// node is inside an open `will_draw`/`did_draw` bracket.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        if self.slot(id.idx).parent != INVALID {
            self.unlink_from_parent(id.idx);
        }
        self.destroy_subtree(id.idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx as usize) < self.nodes.len()
            && self.generations[id.idx as usize] == id.generation
            && self.nodes[id.idx as usize].is_some()
    }

    /// Returns a shared view of the node's state.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SceneNode {
        self.validate(id);
        self.slot(id.idx)
    }

    /// Returns a mutable view of the node's collaborator state.
    ///
    /// Property mutation goes through tree setters so damage propagation
    /// cannot be bypassed; this accessor exists for animation bookkeeping.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        self.validate(id);
        self.slot_mut(id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`, transferring ownership.
    ///
    /// Child order is paint order, established by the caller.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.slot(c).parent == INVALID,
            "child already has a parent"
        );

        self.slot_mut(c).parent = p;
        self.slot_mut(c).prev_sibling = INVALID;
        self.slot_mut(c).next_sibling = INVALID;

        if self.slot(p).first_child == INVALID {
            self.slot_mut(p).first_child = c;
        } else {
            // Walk to last child.
            let mut last = self.slot(p).first_child;
            while self.slot(last).next_sibling != INVALID {
                last = self.slot(last).next_sibling;
            }
            self.slot_mut(last).next_sibling = c;
            self.slot_mut(c).prev_sibling = last;
        }
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, or
    /// `sibling` has no parent.
    pub fn insert_before(&mut self, child: NodeId, sibling: NodeId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.slot(c).parent == INVALID,
            "child already has a parent"
        );
        let p = self.slot(s).parent;
        assert!(p != INVALID, "sibling has no parent");

        let prev = self.slot(s).prev_sibling;
        self.slot_mut(c).parent = p;
        self.slot_mut(c).next_sibling = s;
        self.slot_mut(c).prev_sibling = prev;

        if prev != INVALID {
            self.slot_mut(prev).next_sibling = c;
        } else {
            // `sibling` was the first child.
            self.slot_mut(p).first_child = c;
        }
        self.slot_mut(s).prev_sibling = c;
    }

    /// Detaches the node from its parent, if it has one.
    ///
    /// The node is not destroyed; it lives on as a detached root. Calling
    /// this on a node with no parent is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        if self.slot(child.idx).parent == INVALID {
            return;
        }
        self.unlink_from_parent(child.idx);
    }

    /// Detaches every child, first to last, leaving them as detached roots.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_all_children(&mut self, parent: NodeId) {
        self.validate(parent);
        while self.slot(parent.idx).first_child != INVALID {
            let first = self.slot(parent.idx).first_child;
            self.unlink_from_parent(first);
        }
    }

    /// Destroys every child subtree without any detach bookkeeping.
    ///
    /// This is the fast teardown path: child slots are reclaimed directly,
    /// skipping the per-child unlink work. Only meaningful when the owning
    /// node itself is about to be destroyed.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn clear_child_list(&mut self, parent: NodeId) {
        self.validate(parent);
        let mut child = self.slot(parent.idx).first_child;
        self.slot_mut(parent.idx).first_child = INVALID;
        while child != INVALID {
            let next = self.slot(child).next_sibling;
            self.destroy_subtree(child);
            child = next;
        }
    }

    /// Returns the parent of a node, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.live_handle(self.slot(id.idx).parent)
    }

    /// Returns an iterator over the direct children of a node.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.slot(id.idx).first_child)
    }

    /// Returns the node's mask layer, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn mask_layer(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.live_handle(self.slot(id.idx).mask_layer)
    }

    /// Returns the node's replica layer, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn replica_layer(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.live_handle(self.slot(id.idx).replica_layer)
    }

    /// Returns the node's render target: itself when it owns a render
    /// surface, otherwise the surface-owning ancestor assigned by the layout
    /// pass.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn render_target(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.live_handle(self.slot(id.idx).render_target)
    }

    /// Returns every live node that is neither parented nor owned as a mask
    /// or replica sublayer, in slot order.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "slot count is bounded to u32 at allocation"
    )]
    pub fn roots(&self) -> Vec<NodeId> {
        let mut owned = Vec::new();
        for node in self.nodes.iter().flatten() {
            if node.mask_layer != INVALID {
                owned.push(node.mask_layer);
            }
            if node.replica_layer != INVALID {
                owned.push(node.replica_layer);
            }
        }
        let mut roots = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            let Some(node) = node else { continue };
            let idx = i as u32;
            if node.parent == INVALID && !owned.contains(&idx) {
                roots.push(self.handle(idx));
            }
        }
        roots
    }

    // -- Mask / replica ownership --

    /// Installs (or removes) the node's mask layer, taking ownership.
    ///
    /// A previously owned mask is destroyed. Damage is propagated to the
    /// subtree only when the mask's *layer id* differs from the cached one,
    /// so re-installing the same logical mask is quiet.
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or the mask already has a parent.
    pub fn set_mask_layer(&mut self, id: NodeId, mask: Option<NodeId>) {
        self.validate(id);
        let new_idx = match mask {
            Some(m) => {
                self.validate(m);
                assert!(m.idx != id.idx, "layer cannot be its own mask");
                assert!(
                    self.slot(m.idx).parent == INVALID,
                    "mask layer must not have a parent"
                );
                m.idx
            }
            None => INVALID,
        };

        let old_idx = self.slot(id.idx).mask_layer;
        if old_idx != INVALID && old_idx != new_idx {
            self.destroy_subtree(old_idx);
        }
        self.slot_mut(id.idx).mask_layer = new_idx;

        let new_id = if new_idx == INVALID {
            -1
        } else {
            self.slot(new_idx).id
        };
        if new_id == self.slot(id.idx).mask_layer_id {
            return;
        }
        self.slot_mut(id.idx).mask_layer_id = new_id;
        self.note_layer_property_changed_for_subtree(id.idx);
    }

    /// Installs (or removes) the node's replica layer, taking ownership.
    ///
    /// Same contract as [`set_mask_layer`](Self::set_mask_layer).
    ///
    /// # Panics
    ///
    /// Panics if a handle is stale or the replica already has a parent.
    pub fn set_replica_layer(&mut self, id: NodeId, replica: Option<NodeId>) {
        self.validate(id);
        let new_idx = match replica {
            Some(r) => {
                self.validate(r);
                assert!(r.idx != id.idx, "layer cannot be its own replica");
                assert!(
                    self.slot(r.idx).parent == INVALID,
                    "replica layer must not have a parent"
                );
                r.idx
            }
            None => INVALID,
        };

        let old_idx = self.slot(id.idx).replica_layer;
        if old_idx != INVALID && old_idx != new_idx {
            self.destroy_subtree(old_idx);
        }
        self.slot_mut(id.idx).replica_layer = new_idx;

        let new_id = if new_idx == INVALID {
            -1
        } else {
            self.slot(new_idx).id
        };
        if new_id == self.slot(id.idx).replica_layer_id {
            return;
        }
        self.slot_mut(id.idx).replica_layer_id = new_id;
        self.note_layer_property_changed_for_subtree(id.idx);
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            self.is_alive(id),
            "stale NodeId: {id:?} (current gen: {})",
            if (id.idx as usize) < self.generations.len() {
                self.generations[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Returns the node at a raw slot index, which must be live.
    pub(crate) fn slot(&self, idx: u32) -> &SceneNode {
        self.nodes[idx as usize]
            .as_ref()
            .expect("internal: raw index refers to a freed slot")
    }

    pub(crate) fn slot_mut(&mut self, idx: u32) -> &mut SceneNode {
        self.nodes[idx as usize]
            .as_mut()
            .expect("internal: raw index refers to a freed slot")
    }

    /// Builds a handle for a live raw index.
    pub(crate) fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generations[idx as usize],
        }
    }

    fn live_handle(&self, idx: u32) -> Option<NodeId> {
        if idx == INVALID || self.nodes[idx as usize].is_none() {
            None
        } else {
            Some(self.handle(idx))
        }
    }

    /// Removes `idx` from its parent's child list.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.slot(idx).parent;
        let prev = self.slot(idx).prev_sibling;
        let next = self.slot(idx).next_sibling;

        if prev != INVALID {
            self.slot_mut(prev).next_sibling = next;
        } else {
            // Was first child.
            self.slot_mut(p).first_child = next;
        }

        if next != INVALID {
            self.slot_mut(next).prev_sibling = prev;
        }

        let node = self.slot_mut(idx);
        node.parent = INVALID;
        node.prev_sibling = INVALID;
        node.next_sibling = INVALID;
    }

    /// Reclaims `idx` and everything it owns, without touching the parent's
    /// child list.
    pub(crate) fn destroy_subtree(&mut self, idx: u32) {
        let mut child = self.slot(idx).first_child;
        while child != INVALID {
            let next = self.slot(child).next_sibling;
            self.destroy_subtree(child);
            child = next;
        }

        let mask = self.slot(idx).mask_layer;
        if mask != INVALID && self.nodes[mask as usize].is_some() {
            self.destroy_subtree(mask);
        }
        let replica = self.slot(idx).replica_layer;
        if replica != INVALID && self.nodes[replica as usize].is_some() {
            self.destroy_subtree(replica);
        }

        #[cfg(debug_assertions)]
        assert!(
            !self.slot(idx).between_will_draw_and_did_draw,
            "layer destroyed inside a will_draw/did_draw bracket"
        );

        // Bump generation so old handles immediately fail validation.
        self.generations[idx as usize] += 1;
        self.nodes[idx as usize] = None;
        self.free_list.push(idx);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut tree = SceneTree::new();
        let id = tree.create_node(1);
        assert!(tree.is_alive(id));
        tree.destroy_node(id);
        assert!(!tree.is_alive(id));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut tree = SceneTree::new();
        let id1 = tree.create_node(1);
        tree.destroy_node(id1);
        let id2 = tree.create_node(2);
        // id2 reuses the same slot but has a different generation.
        assert!(!tree.is_alive(id1));
        assert!(tree.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_node_access() {
        let mut tree = SceneTree::new();
        let id = tree.create_node(1);
        tree.destroy_node(id);
        let _ = tree.node(id);
    }

    #[test]
    #[should_panic(expected = "layer id must be positive")]
    fn negative_layer_id_is_fatal() {
        let mut tree = SceneTree::new();
        let _ = tree.create_node(-4);
    }

    #[test]
    fn add_child_and_query() {
        let mut tree = SceneTree::new();
        let parent = tree.create_node(1);
        let child1 = tree.create_node(2);
        let child2 = tree.create_node(3);

        tree.add_child(parent, child1);
        tree.add_child(parent, child2);

        assert_eq!(tree.parent(child1), Some(parent));
        assert_eq!(tree.parent(child2), Some(parent));

        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![child1, child2]);
    }

    #[test]
    fn remove_from_parent_detaches_without_destroying() {
        let mut tree = SceneTree::new();
        let parent = tree.create_node(1);
        let child = tree.create_node(2);

        tree.add_child(parent, child);
        tree.remove_from_parent(child);

        assert_eq!(tree.parent(child), None);
        assert!(tree.children(parent).next().is_none());
        assert!(tree.is_alive(child));
    }

    #[test]
    fn remove_from_parent_without_parent_is_noop() {
        let mut tree = SceneTree::new();
        let node = tree.create_node(1);
        tree.remove_from_parent(node);
        assert!(tree.is_alive(node));
        assert_eq!(tree.parent(node), None);
    }

    #[test]
    fn remove_all_children_preserves_the_children() {
        let mut tree = SceneTree::new();
        let parent = tree.create_node(1);
        let a = tree.create_node(2);
        let b = tree.create_node(3);
        tree.add_child(parent, a);
        tree.add_child(parent, b);

        tree.remove_all_children(parent);

        assert!(tree.children(parent).next().is_none());
        assert!(tree.is_alive(a) && tree.is_alive(b));
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.parent(b), None);
    }

    #[test]
    fn clear_child_list_reclaims_the_children() {
        let mut tree = SceneTree::new();
        let parent = tree.create_node(1);
        let a = tree.create_node(2);
        let b = tree.create_node(3);
        let grandchild = tree.create_node(4);
        tree.add_child(parent, a);
        tree.add_child(parent, b);
        tree.add_child(a, grandchild);

        tree.clear_child_list(parent);

        assert!(tree.children(parent).next().is_none());
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert!(!tree.is_alive(grandchild));
        assert!(tree.is_alive(parent));
    }

    #[test]
    fn insert_before_works() {
        let mut tree = SceneTree::new();
        let parent = tree.create_node(1);
        let a = tree.create_node(2);
        let b = tree.create_node(3);
        let c = tree.create_node(4);

        tree.add_child(parent, a);
        tree.add_child(parent, c);
        tree.insert_before(b, c);

        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![a, b, c]);
    }

    #[test]
    #[should_panic(expected = "child already has a parent")]
    fn double_add_child_panics() {
        let mut tree = SceneTree::new();
        let p1 = tree.create_node(1);
        let p2 = tree.create_node(2);
        let child = tree.create_node(3);
        tree.add_child(p1, child);
        tree.add_child(p2, child);
    }

    #[test]
    fn destroy_reclaims_whole_subtree() {
        let mut tree = SceneTree::new();
        let root = tree.create_node(1);
        let child = tree.create_node(2);
        let grandchild = tree.create_node(3);
        let mask = tree.create_node(4);
        let replica = tree.create_node(5);

        tree.add_child(root, child);
        tree.add_child(child, grandchild);
        tree.set_mask_layer(root, Some(mask));
        tree.set_replica_layer(root, Some(replica));

        tree.destroy_node(root);

        assert!(!tree.is_alive(root));
        assert!(!tree.is_alive(child));
        assert!(!tree.is_alive(grandchild));
        assert!(!tree.is_alive(mask));
        assert!(!tree.is_alive(replica));
    }

    #[test]
    fn destroying_a_child_unlinks_it_first() {
        let mut tree = SceneTree::new();
        let parent = tree.create_node(1);
        let a = tree.create_node(2);
        let b = tree.create_node(3);
        tree.add_child(parent, a);
        tree.add_child(parent, b);

        tree.destroy_node(a);

        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![b]);
    }

    #[test]
    fn roots_exclude_owned_sublayers() {
        let mut tree = SceneTree::new();
        let a = tree.create_node(1);
        let b = tree.create_node(2);
        let child = tree.create_node(3);
        let mask = tree.create_node(4);
        tree.add_child(a, child);
        tree.set_mask_layer(a, Some(mask));

        assert_eq!(tree.roots(), vec![a, b]);
    }

    #[test]
    fn mask_layer_identity_uses_cached_id() {
        let mut tree = SceneTree::new();
        let node = tree.create_node(1);
        let mask = tree.create_node(7);
        tree.set_mask_layer(node, Some(mask));
        assert!(tree.node(node).layer_property_changed());

        tree.reset_all_change_tracking_for_subtree(node);

        // Re-installing the same logical mask (same id) is quiet.
        let mask = tree.mask_layer(node).unwrap();
        tree.set_mask_layer(node, Some(mask));
        assert!(!tree.node(node).layer_property_changed());

        // Replacing it with a different id propagates.
        let other = tree.create_node(8);
        tree.set_mask_layer(node, Some(other));
        assert!(tree.node(node).layer_property_changed());
        assert!(tree.mask_layer(node).is_some());
    }

    #[test]
    fn removing_the_mask_destroys_it_and_propagates() {
        let mut tree = SceneTree::new();
        let node = tree.create_node(1);
        let mask = tree.create_node(2);
        tree.set_mask_layer(node, Some(mask));
        tree.reset_all_change_tracking_for_subtree(node);

        tree.set_mask_layer(node, None);
        assert!(!tree.is_alive(mask));
        assert_eq!(tree.mask_layer(node), None);
        assert!(tree.node(node).layer_property_changed());
    }

    #[test]
    fn replica_layer_identity_uses_cached_id() {
        let mut tree = SceneTree::new();
        let node = tree.create_node(1);
        let replica = tree.create_node(9);
        tree.set_replica_layer(node, Some(replica));
        assert!(tree.node(node).layer_property_changed());
        assert_eq!(tree.replica_layer(node), Some(replica));
    }
}
