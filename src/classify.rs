//! Node role predicates.
//!
//! The four predicates below are the vocabulary every other module speaks.
//! All of them are O(1) (class tag and attribute lookups only, no graph
//! traversal) and none of them mutate anything.

use crate::anchor::ANCHOR_PREFIX;
use crate::class::NodeClass;
use crate::host::{GraphHost, NodeId};
use crate::link::REFERENCE_ATTR;

/// A node that can stand in for upstream graph: its class supports the
/// hidden-input flag and the flag is currently set.
pub fn is_source_hiding<H: GraphHost>(host: &H, node: NodeId) -> bool {
    host.class(node).hides_input() && host.hide_input(node)
}

/// A node whose class is a key of the substitution table; it should be
/// represented by a link on paste rather than duplicated.
pub fn is_replaceable_source<H: GraphHost>(host: &H, node: NodeId) -> bool {
    host.class(node).is_replaceable_source()
}

/// An anchor: named with the anchor prefix, or a Dot carrying a non-blank
/// label. An unlabeled Dot is never an anchor.
pub fn is_anchor<H: GraphHost>(host: &H, node: NodeId) -> bool {
    if host.name(node).starts_with(ANCHOR_PREFIX) {
        return true;
    }
    host.class(node) == NodeClass::Dot && !host.label(node).trim().is_empty()
}

/// A link: carries the reference attribute, whatever its content. An empty
/// reference still marks the node as a link (it means "do not replace").
pub fn is_link<H: GraphHost>(host: &H, node: NodeId) -> bool {
    host.has_attr(node, REFERENCE_ATTR)
}
