//! User-facing label helpers.
//!
//! Labeling a Dot can turn it into an anchor, so label changes on Dots
//! propagate to every link referencing them.

use crate::class::NodeClass;
use crate::classify;
use crate::host::{GraphHost, NodeId, Prompt};
use crate::ident;
use crate::link;

pub const DOT_LABEL_FONT_SIZE_LARGE: f32 = 42.0;
pub const DOT_LABEL_FONT_SIZE_MEDIUM: f32 = 24.0;
pub const NODE_LABEL_FONT_SIZE_LARGE: f32 = 20.0;

fn update_dot_link_labels<H: GraphHost>(host: &mut H, dot: NodeId, new_label: &str) {
    let reference = ident::qualify(host, dot);
    for node in host.all_nodes() {
        if !classify::is_link(host, node) {
            continue;
        }
        if host.attr_text(node, link::REFERENCE_ATTR).as_deref() == Some(reference.as_str()) {
            host.set_label(node, &format!("Link: {new_label}"));
            link::reconnect_link(host, node);
        }
    }
}

/// Set a node's label, with per-class font sizing.
///
/// Dot nodes take `dot_font` and push the new label out to every link
/// referencing them; all other nodes take `node_font`.
pub fn apply_label<H: GraphHost>(
    host: &mut H,
    node: NodeId,
    text: &str,
    dot_font: Option<f32>,
    node_font: Option<f32>,
) {
    host.set_label(node, text);
    if host.class(node) == NodeClass::Dot {
        if let Some(size) = dot_font {
            host.set_note_font_size(node, size);
        }
        update_dot_link_labels(host, node, text);
    } else if let Some(size) = node_font {
        host.set_note_font_size(node, size);
    }
}

fn first_selected<H: GraphHost>(host: &H) -> Option<NodeId> {
    host.selection().into_iter().next()
}

/// Prompt for a label and apply it with large font sizing.
pub fn create_large_label<H: GraphHost, P: Prompt + ?Sized>(host: &mut H, prompt: &mut P) {
    let Some(node) = first_selected(host) else {
        return;
    };
    let current = host.label(node);
    let Some(text) = prompt.text("Label:", &current) else {
        return;
    };
    apply_label(
        host,
        node,
        &text,
        Some(DOT_LABEL_FONT_SIZE_LARGE),
        Some(NODE_LABEL_FONT_SIZE_LARGE),
    );
}

/// Prompt for a label; Dots get medium font sizing, other nodes keep
/// theirs.
pub fn create_medium_label<H: GraphHost, P: Prompt + ?Sized>(host: &mut H, prompt: &mut P) {
    let Some(node) = first_selected(host) else {
        return;
    };
    let current = host.label(node);
    let Some(text) = prompt.text("Label:", &current) else {
        return;
    };
    apply_label(host, node, &text, Some(DOT_LABEL_FONT_SIZE_MEDIUM), None);
}

/// Prompt for a suffix and append it to the node's existing label.
pub fn append_to_label<H: GraphHost, P: Prompt + ?Sized>(host: &mut H, prompt: &mut P) {
    let Some(node) = first_selected(host) else {
        return;
    };
    let Some(suffix) = prompt.text("Append to label:", "") else {
        return;
    };
    let combined = format!("{}{}", host.label(node), suffix);
    apply_label(host, node, &combined, None, None);
}
