//! The copy/cut/paste protocol.
//!
//! Copy annotates each selected node with a reference attribute describing
//! what the node should resolve to after a paste; paste reads those
//! annotations back and either reconnects nodes in place or replaces them
//! with freshly-created links. The empty reference is meaningful: it marks
//! a node as "paste normally, do not resolve or replace".

use tracing::debug;

use crate::classify;
use crate::host::{GraphHost, NodeId};
use crate::ident;
use crate::link;

/// Annotate the current selection and copy it to the transfer buffer.
///
/// With `cut` set, anchors and replaceable sources store an empty
/// reference instead of their own qualified name: the originals are about
/// to be deleted, so a later paste must not try to link back to them.
pub fn copy<H: GraphHost>(host: &mut H, cut: bool) {
    let selection = host.selection();

    for &node in &selection {
        if classify::is_link(host, node) {
            // Already carries a reference (or an explicit empty one).
            continue;
        }

        if classify::is_anchor(host, node) {
            let stored = if cut {
                String::new()
            } else {
                ident::qualify(host, node)
            };
            link::attach_reference_attr(host, node, &stored);
        } else if classify::is_source_hiding(host, node) {
            match host.input(node, 0) {
                // An input copied along with the node keeps its wire
                // verbatim; nothing to resolve later.
                Some(input) if !selection.contains(&input) => {
                    debug!(
                        node = ?node,
                        input = ?input,
                        "storing hidden input reference before copy"
                    );
                    link::configure_link(host, input, node);
                }
                _ => link::attach_reference_attr(host, node, ""),
            }
        } else if classify::is_replaceable_source(host, node) {
            let stored = if cut {
                String::new()
            } else {
                ident::qualify(host, node)
            };
            link::attach_reference_attr(host, node, &stored);
        }
    }

    host.copy_to_buffer(&selection);
}

/// Copy the selection with cut semantics, then delete every originally
/// selected node.
pub fn cut<H: GraphHost>(host: &mut H) {
    let selection = host.selection();
    copy(host, true);
    for node in selection {
        host.delete_node(node);
    }
}

/// Paste the transfer buffer and resolve the annotations stored at
/// copy-time.
///
/// Pasted anchors and replaceable sources whose reference resolves are
/// replaced by fresh link nodes of the appropriate class; pasted
/// hidden-input nodes are reconnected in place. A reference that fails to
/// resolve (another document, a deleted source) leaves that node exactly
/// as pasted. Returns the newest pasted node, mirroring the host paste
/// primitive, or `None` when the buffer was empty.
pub fn paste<H: GraphHost>(host: &mut H) -> Option<NodeId> {
    let last_pasted = host.paste_from_buffer()?;
    let pasted = host.selection();
    let mut working = pasted.clone();

    for node in pasted {
        if !host.has_attr(node, link::REFERENCE_ATTR) {
            continue;
        }
        let Some(source) = link::find_source(host, node) else {
            debug!(node = ?node, "pasted reference did not resolve, leaving node as pasted");
            continue;
        };

        if classify::is_anchor(host, node) || classify::is_replaceable_source(host, node) {
            // Promote to link: a fresh node of the substitute class takes
            // the pasted node's place.
            host.clear_selection();
            host.set_selected(node, true);

            let class = link::link_class_for_source(host, Some(source));
            let fresh = host.create_node(class);
            link::configure_link(host, source, fresh);
            let (x, y) = host.position(node);
            host.set_position(fresh, x, y);

            if let Some(index) = working.iter().position(|&n| n == node) {
                working.remove(index);
            }
            working.push(fresh);
            host.delete_node(node);
        } else if host.class(node).hides_input() {
            link::configure_link(host, source, node);
        }
    }

    // The loop above may have replaced nodes; re-establish the selection.
    host.clear_selection();
    for &node in &working {
        host.set_selected(node, true);
    }

    Some(last_pasted)
}

/// Paste once per originally-selected node, isolating each as the sole
/// selection for its paste, then select the union of everything pasted.
pub fn paste_multiple<H: GraphHost>(host: &mut H) {
    let originals = host.selection();
    let mut accumulated: Vec<NodeId> = Vec::new();

    for node in originals {
        host.clear_selection();
        host.set_selected(node, true);
        paste(host);

        for pasted in host.selection() {
            if !accumulated.contains(&pasted) {
                accumulated.push(pasted);
            }
        }
    }

    host.clear_selection();
    for &node in &accumulated {
        host.set_selected(node, true);
    }
}

/// The host copy primitive without any annotation.
pub fn plain_copy<H: GraphHost>(host: &mut H) {
    let selection = host.selection();
    host.copy_to_buffer(&selection);
}

/// The host copy primitive followed by deletion, without any annotation.
pub fn plain_cut<H: GraphHost>(host: &mut H) {
    let selection = host.selection();
    host.copy_to_buffer(&selection);
    for node in selection {
        host.delete_node(node);
    }
}

/// The host paste primitive without any resolution.
pub fn plain_paste<H: GraphHost>(host: &mut H) -> Option<NodeId> {
    host.paste_from_buffer()
}
