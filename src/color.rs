//! Tile-color resolution.
//!
//! Links and anchors never carry authored colors; everything here derives a
//! color from the node being represented, the host's per-class preference
//! table, or the backdrop an anchor sits inside.

use crate::class::NodeClass;
use crate::host::{GraphHost, NodeId};

/// Color given to an anchor with no input to inherit from.
pub const ANCHOR_DEFAULT_COLOR: u32 = 0x6f3399_ff;

/// The color a node displays: its own tile color when set, else the host's
/// per-class default, else the host's global default.
pub fn node_color<H: GraphHost>(host: &H, node: NodeId) -> u32 {
    let own = host.tile_color(node);
    if own != 0 {
        return own;
    }
    let prefs = host.color_prefs();
    prefs
        .class_color(host.class(node).as_str())
        .unwrap_or(prefs.default)
}

/// The smallest backdrop whose bounds contain the node's position.
///
/// Containment is half-open: a node sitting exactly on the right or bottom
/// edge is outside. Equal-area backdrops tie-break on the lower `NodeId`,
/// i.e. the one created first.
pub fn smallest_containing_backdrop<H: GraphHost>(host: &H, node: NodeId) -> Option<NodeId> {
    let (nx, ny) = host.position(node);
    let mut best: Option<(i64, NodeId)> = None;
    for candidate in host.all_nodes() {
        if host.class(candidate) != NodeClass::Backdrop {
            continue;
        }
        let (bx, by) = host.position(candidate);
        let (bw, bh) = host.size(candidate);
        let contains = bx <= nx && nx < bx + bw && by <= ny && ny < by + bh;
        if !contains {
            continue;
        }
        let area = i64::from(bw) * i64::from(bh);
        if best.map_or(true, |(best_area, best_id)| {
            (area, candidate) < (best_area, best_id)
        }) {
            best = Some((area, candidate));
        }
    }
    best.map(|(_, id)| id)
}

/// The tile color an anchor should display.
///
/// Priority: the smallest containing backdrop's color (only when the
/// anchor's input is a `Read` node, and only if that color is set), then
/// the input node's own resolved color, then [`ANCHOR_DEFAULT_COLOR`].
pub fn anchor_color<H: GraphHost>(host: &H, anchor: NodeId) -> u32 {
    let input = host.input(anchor, 0);

    if let Some(input) = input {
        if host.class(input) == NodeClass::Read {
            if let Some(backdrop) = smallest_containing_backdrop(host, anchor) {
                let color = host.tile_color(backdrop);
                if color != 0 {
                    return color;
                }
            }
        }
        return node_color(host, input);
    }

    ANCHOR_DEFAULT_COLOR
}
