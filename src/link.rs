//! Link setup: the reference attribute and presentation mirroring.
//!
//! A link's color, label, and hidden-input state are cached views of its
//! source, refreshed by [`configure_link`] on every (re)connection. Nothing
//! else in the crate writes those properties on a link.

use tracing::debug;

use crate::class::{self, NodeClass};
use crate::classify;
use crate::color;
use crate::host::{ActionKind, AttrDescriptor, GraphHost, NodeId};
use crate::ident;

/// Hidden string attribute holding the qualified name of a link's source.
/// Presence of this attribute is what makes a node a link.
pub const REFERENCE_ATTR: &str = "anchor_source";

/// Hidden group the reference attribute lives in.
pub const REFERENCE_GROUP: &str = "anchor_paste_group";

/// Action attribute installed on link nodes.
pub const RECONNECT_ACTION: &str = "reconnect_link";

/// The link class to stand in for `source`: a Dot for a Dot, the
/// substitution table for everything else, the generic proxy when there is
/// no source at all.
pub fn link_class_for_source<H: GraphHost>(host: &H, source: Option<NodeId>) -> NodeClass {
    match source {
        Some(source) => class::link_class_for(&host.class(source)),
        None => NodeClass::PostageStamp,
    }
}

/// Configure `link` as a stand-in for `source`.
///
/// Sets the hidden-input flag, mirrors the source's color, label, and note
/// font size, attaches the reference attribute holding the source's
/// qualified name, and connects input 0 to the source. This is the single
/// place link presentation state is written; call it exactly once per
/// (re)connection event.
pub fn configure_link<H: GraphHost>(host: &mut H, source: NodeId, link: NodeId) {
    host.set_hide_input(link, true);

    let color = color::node_color(host, source);
    host.set_tile_color(link, color);

    let source_label = host.label(source);
    let display = if source_label.is_empty() {
        host.name(source)
    } else {
        source_label
    };
    host.set_label(link, &format!("Link: {display}"));

    let font_size = host.note_font_size(source);
    host.set_note_font_size(link, font_size);

    let reference = ident::qualify(host, source);
    attach_reference_attr(host, link, &reference);
    host.set_input(link, 0, Some(source));
}

/// Idempotently (re)install the reference attribute on `node` and set its
/// value.
///
/// The group and the attribute are removed first (best-effort) and
/// re-added, so they always sit at the end of the node's attribute list in
/// a deterministic order. Non-anchor nodes also get the reconnect action;
/// anchors carry their own child-reconnect action instead.
pub fn attach_reference_attr<H: GraphHost>(host: &mut H, node: NodeId, value: &str) {
    if !classify::is_anchor(host, node) {
        add_reconnect_action(host, node);
    }

    host.remove_attr(node, REFERENCE_ATTR);
    host.remove_attr(node, REFERENCE_GROUP);

    host.add_attr(
        node,
        AttrDescriptor::Group {
            name: REFERENCE_GROUP.to_string(),
        },
    );
    host.add_attr(
        node,
        AttrDescriptor::Text {
            name: REFERENCE_ATTR.to_string(),
        },
    );
    host.set_attr_text(node, REFERENCE_ATTR, value);
}

fn add_reconnect_action<H: GraphHost>(host: &mut H, node: NodeId) {
    if host.has_attr(node, RECONNECT_ACTION) {
        return;
    }
    host.add_attr(
        node,
        AttrDescriptor::Action {
            name: RECONNECT_ACTION.to_string(),
            label: "Reconnect".to_string(),
            action: ActionKind::ReconnectLink,
        },
    );
}

/// Resolve the source a link references, using the link itself as the
/// resolution context.
///
/// `None` for an absent or empty reference, a scope mismatch, or a source
/// that no longer exists.
pub fn find_source<H: GraphHost>(host: &H, link: NodeId) -> Option<NodeId> {
    let stored = host.attr_text(link, REFERENCE_ATTR)?;
    if stored.is_empty() {
        return None;
    }
    ident::resolve(host, &stored, link)
}

/// Re-resolve a link's reference and, on success, reconnect it by running
/// the full [`configure_link`], so presentation state is refreshed along
/// with input 0.
pub fn reconnect_link<H: GraphHost>(host: &mut H, link: NodeId) {
    match find_source(host, link) {
        Some(source) => configure_link(host, source, link),
        None => debug!(link = ?link, "link reference did not resolve, leaving it alone"),
    }
}
