// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Textual scene-tree dumps.

use std::fmt::Write as _;

use strata_core::scene::{NodeId, SceneTree};

/// Renders the subtree rooted at `root` as indented text.
///
/// Each node prints its layer id, bounds, render target (when assigned),
/// draw transform, and whether it draws content. A replica subtree is
/// printed under a `Replica:` label, a mask under `Mask:`, then the
/// children, each one indent level deeper.
///
/// # Panics
///
/// Panics if the handle is stale.
#[must_use]
pub fn layer_tree_as_text(tree: &SceneTree, root: NodeId) -> String {
    let mut out = String::new();
    dump_layer(tree, root, 0, &mut out);
    out
}

fn write_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn dump_layer(tree: &SceneTree, id: NodeId, indent: usize, out: &mut String) {
    dump_properties(tree, id, indent, out);

    if let Some(replica) = tree.replica_layer(id) {
        write_indent(out, indent + 1);
        out.push_str("Replica:\n");
        dump_layer(tree, replica, indent + 2, out);
    }
    if let Some(mask) = tree.mask_layer(id) {
        write_indent(out, indent + 1);
        out.push_str("Mask:\n");
        dump_layer(tree, mask, indent + 2, out);
    }

    for child in tree.children(id) {
        dump_layer(tree, child, indent + 1, out);
    }
}

fn dump_properties(tree: &SceneTree, id: NodeId, indent: usize, out: &mut String) {
    let node = tree.node(id);

    write_indent(out, indent);
    let _ = writeln!(out, "layer ID: {}", node.id());

    write_indent(out, indent);
    let _ = writeln!(out, "bounds: {}, {}", node.bounds().width, node.bounds().height);

    if let Some(target) = tree.render_target(id) {
        write_indent(out, indent);
        let _ = writeln!(out, "renderTarget: {}", tree.node(target).id());
    }

    // Row-major components, rows separated by `//`.
    write_indent(out, indent);
    out.push_str("drawTransform: ");
    let t = node.draw_transform();
    for row in 0..4 {
        if row != 0 {
            out.push_str("// ");
        }
        for col in 0..4 {
            let _ = write!(out, "{} ", t.at(row, col));
        }
    }
    out.push('\n');

    write_indent(out, indent);
    let _ = writeln!(
        out,
        "drawsContent: {}",
        if node.draws_content() { "yes" } else { "no" }
    );
}

#[cfg(test)]
mod tests {
    use strata_core::geometry::IntSize;

    use super::*;

    #[test]
    fn dump_covers_replica_mask_and_children_in_order() {
        let mut tree = SceneTree::new();
        let root = tree.create_node(1);
        let child = tree.create_node(2);
        let mask = tree.create_node(3);
        let replica = tree.create_node(4);

        tree.set_bounds(root, IntSize::new(100, 50));
        tree.set_draws_content(root, true);
        tree.add_child(root, child);
        tree.set_mask_layer(root, Some(mask));
        tree.set_replica_layer(root, Some(replica));

        let identity = "drawTransform: 1 0 0 0 // 0 1 0 0 // 0 0 1 0 // 0 0 0 1 ";
        let expected = format!(
            "layer ID: 1\n\
             bounds: 100, 50\n\
             {identity}\n\
             drawsContent: yes\n\
             \x20 Replica:\n\
             \x20   layer ID: 4\n\
             \x20   bounds: 0, 0\n\
             \x20   {identity}\n\
             \x20   drawsContent: no\n\
             \x20 Mask:\n\
             \x20   layer ID: 3\n\
             \x20   bounds: 0, 0\n\
             \x20   {identity}\n\
             \x20   drawsContent: no\n\
             \x20 layer ID: 2\n\
             \x20 bounds: 0, 0\n\
             \x20 {identity}\n\
             \x20 drawsContent: no\n"
        );
        assert_eq!(layer_tree_as_text(&tree, root), expected);
    }

    #[test]
    fn dump_includes_the_render_target_id() {
        let mut tree = SceneTree::new();
        let root = tree.create_node(7);
        tree.create_render_surface(root);
        let text = layer_tree_as_text(&tree, root);
        assert!(text.contains("renderTarget: 7"), "got: {text}");
    }
}
