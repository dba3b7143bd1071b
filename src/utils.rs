use std::fmt::Write;

use crate::{Composer, NodeKey};

pub fn render_tree<N, D>(composer: &Composer<N>, node_key: NodeKey, display_fn: D) -> String
where
    D: Fn(Option<&N>) -> String,
{
    let mut out = String::from("Root\n");
    for (index, child) in composer.nodes[node_key].children.iter().enumerate() {
        let has_sibling = index + 1 < composer.nodes[node_key].children.len();
        render_node(composer, *child, &display_fn, has_sibling, String::new(), &mut out);
    }
    out
}

fn render_node<N, D>(
    composer: &Composer<N>,
    node_key: NodeKey,
    display_fn: &D,
    has_sibling: bool,
    lines_string: String,
    out: &mut String,
) where
    D: Fn(Option<&N>) -> String,
{
    let Some(node) = composer.nodes.get(node_key) else {
        return;
    };
    let fork_string = if has_sibling {
        "├── "
    } else {
        "└── "
    };
    let _ = writeln!(
        out,
        "{lines}{fork}{display} [{scope:?} @ {node_key}]",
        lines = lines_string,
        fork = fork_string,
        display = display_fn(node.data.as_ref()),
        scope = node.scope_id,
        node_key = node_key,
    );
    let bar = if has_sibling { "│   " } else { "    " };
    let new_string = lines_string + bar;
    let num_children = node.children.len();
    for (index, child) in node.children.iter().cloned().enumerate() {
        let has_sibling = index < num_children - 1;
        render_node(composer, child, display_fn, has_sibling, new_string.clone(), out);
    }
}
