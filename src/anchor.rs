//! Anchor lifecycle: creation, renaming, reconnection, and link creation
//! from an existing anchor.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::class::NodeClass;
use crate::classify;
use crate::color;
use crate::host::{
    ActionKind, AnchorEntry, AnchorPicker, AttrDescriptor, GraphHost, NodeId, Prompt,
};
use crate::ident;
use crate::link;

/// Name prefix that marks a NoOp node as an anchor.
pub const ANCHOR_PREFIX: &str = "Anchor_";

/// Action attribute installed on anchors: reconnect every dependent link.
pub const RECONNECT_CHILDREN_ACTION: &str = "reconnect_child_links";

/// Action attribute installed on anchors: rename with propagation.
pub const RENAME_ACTION: &str = "rename_anchor";

/// Vertical gap between an anchor and the node it is created under.
const ANCHOR_OFFSET_Y: i32 = 20;

fn non_word_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("hard-coded pattern compiles"))
}

fn versioned_file_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(.+)_v\d+(?:\.[^.]+)?\.[^.]+$").expect("hard-coded pattern compiles")
    })
}

/// The user-facing name of an anchor: a Dot's trimmed label, or the node
/// name with the anchor prefix stripped.
pub fn display_name<H: GraphHost>(host: &H, anchor: NodeId) -> String {
    if host.class(anchor) == NodeClass::Dot {
        return host.label(anchor).trim().to_string();
    }
    let name = host.name(anchor);
    name.strip_prefix(ANCHOR_PREFIX).unwrap_or(&name).to_string()
}

/// Every anchor in the document, sorted case-insensitively by display
/// name.
pub fn all_anchors<H: GraphHost>(host: &H) -> Vec<NodeId> {
    let mut anchors: Vec<NodeId> = host
        .all_nodes()
        .into_iter()
        .filter(|&node| classify::is_anchor(host, node))
        .collect();
    anchors.sort_by_key(|&node| display_name(host, node).to_lowercase());
    anchors
}

/// Trim and replace everything outside `[A-Za-z0-9_]` with underscores.
pub fn sanitize_anchor_name(name: &str) -> String {
    non_word_pattern().replace_all(name.trim(), "_").into_owned()
}

/// Suggest an anchor name for a node: the basename of its file attribute
/// with any `_v<digits>` version suffix (and the extension) stripped,
/// prefixed with the label of the smallest backdrop containing the node.
pub fn suggest_anchor_name<H: GraphHost>(host: &H, input: NodeId) -> String {
    let mut suggestion = String::new();

    if let Some(path) = host.file_path(input) {
        if !path.is_empty() {
            let filename = path
                .rsplit(|c| c == '/' || c == '\\')
                .next()
                .unwrap_or(path.as_str());
            suggestion = match versioned_file_pattern().captures(filename) {
                Some(captures) => captures[1].to_string(),
                None => filename
                    .rsplit_once('.')
                    .map(|(stem, _)| stem)
                    .unwrap_or(filename)
                    .to_string(),
            };
        }
    }

    if let Some(backdrop) = color::smallest_containing_backdrop(host, input) {
        let label = host.label(backdrop).trim().to_string();
        if !label.is_empty() {
            suggestion = format!("{label}_{suggestion}");
        }
    }

    suggestion
}

fn add_reconnect_children_action<H: GraphHost>(host: &mut H, anchor: NodeId) {
    if host.has_attr(anchor, RECONNECT_CHILDREN_ACTION) {
        return;
    }
    host.add_attr(
        anchor,
        AttrDescriptor::Action {
            name: RECONNECT_CHILDREN_ACTION.to_string(),
            label: "Reconnect Child Links".to_string(),
            action: ActionKind::ReconnectChildren,
        },
    );
}

fn add_rename_action<H: GraphHost>(host: &mut H, anchor: NodeId) {
    if host.has_attr(anchor, RENAME_ACTION) {
        return;
    }
    host.add_attr(
        anchor,
        AttrDescriptor::Action {
            name: RENAME_ACTION.to_string(),
            label: "Rename".to_string(),
            action: ActionKind::RenameAnchor,
        },
    );
}

/// Create a new anchor, prompting for its name.
///
/// When exactly one node is selected it becomes the anchor's input and the
/// name suggestion source; the anchor is positioned centered just below
/// it. Cancelling the prompt, or a name that sanitizes to nothing, aborts
/// with no side effects. Returns the new anchor, if one was created.
pub fn create_anchor<H: GraphHost, P: Prompt + ?Sized>(
    host: &mut H,
    prompt: &mut P,
) -> Option<NodeId> {
    let selection = host.selection();
    let input = if selection.len() == 1 {
        Some(selection[0])
    } else {
        None
    };

    let suggested = match input {
        Some(node) => suggest_anchor_name(host, node),
        None => String::new(),
    };
    let name = prompt.text("Anchor name:", &suggested)?;
    if name.trim().is_empty() {
        return None;
    }
    let sanitized = sanitize_anchor_name(&name);
    if sanitized.is_empty() {
        return None;
    }

    host.clear_selection();
    let anchor = host.create_node(NodeClass::NoOp);
    host.set_name(anchor, &format!("{ANCHOR_PREFIX}{sanitized}"));
    let label = display_name(host, anchor);
    host.set_label(anchor, &label);

    if let Some(input) = input {
        host.set_input(anchor, 0, Some(input));
        let (x, y) = host.position(input);
        let (input_w, input_h) = host.size(input);
        let (anchor_w, _) = host.size(anchor);
        host.set_position(
            anchor,
            x + input_w / 2 - anchor_w / 2,
            y + input_h + ANCHOR_OFFSET_Y,
        );
    }

    let tile_color = color::anchor_color(host, anchor);
    host.set_tile_color(anchor, tile_color);
    add_reconnect_children_action(host, anchor);
    add_rename_action(host, anchor);
    host.set_selected(anchor, true);
    Some(anchor)
}

/// Rename an anchor and propagate the new name to every link that
/// references it.
///
/// Only links whose stored reference exactly equals the anchor's old
/// qualified name are rewritten; links targeting other anchors stay
/// untouched.
pub fn rename_anchor<H: GraphHost, P: Prompt + ?Sized>(
    host: &mut H,
    prompt: &mut P,
    anchor: NodeId,
) {
    let suggested = match host.input(anchor, 0) {
        Some(input) => suggest_anchor_name(host, input),
        None => display_name(host, anchor),
    };
    let Some(name) = prompt.text("Rename anchor:", &suggested) else {
        return;
    };
    if name.trim().is_empty() {
        return;
    }
    let sanitized = sanitize_anchor_name(&name);
    if sanitized.is_empty() {
        return;
    }

    let old_reference = ident::qualify(host, anchor);
    host.set_name(anchor, &format!("{ANCHOR_PREFIX}{sanitized}"));
    let label = display_name(host, anchor);
    host.set_label(anchor, &label);
    let new_reference = ident::qualify(host, anchor);

    let new_label = {
        let label = host.label(anchor);
        if label.is_empty() {
            host.name(anchor)
        } else {
            label
        }
    };

    let mut rewritten = 0usize;
    for node in host.all_nodes() {
        if !classify::is_link(host, node) {
            continue;
        }
        if host.attr_text(node, link::REFERENCE_ATTR).as_deref() == Some(old_reference.as_str()) {
            host.set_attr_text(node, link::REFERENCE_ATTR, &new_reference);
            host.set_label(node, &format!("Link: {new_label}"));
            rewritten += 1;
        }
    }
    debug!(
        old = %old_reference,
        new = %new_reference,
        rewritten,
        "anchor renamed"
    );
}

/// Rename the sole selected node, when it is an anchor.
pub fn rename_selected_anchor<H: GraphHost, P: Prompt + ?Sized>(host: &mut H, prompt: &mut P) {
    let selection = host.selection();
    if selection.len() == 1 && classify::is_anchor(host, selection[0]) {
        rename_anchor(host, prompt, selection[0]);
    }
}

/// Reconnect every link whose reference exactly equals this anchor's
/// qualified name.
///
/// Exact equality only: matching on substrings would also reconnect links
/// whose anchor name merely contains this one.
pub fn reconnect_children<H: GraphHost>(host: &mut H, anchor: NodeId) {
    let reference = ident::qualify(host, anchor);
    for node in host.all_nodes() {
        if !classify::is_link(host, node) {
            continue;
        }
        if host.attr_text(node, link::REFERENCE_ATTR).as_deref() == Some(reference.as_str()) {
            link::reconnect_link(host, node);
        }
    }
}

/// Reconnect every link in the document, whatever it targets.
pub fn reconnect_all<H: GraphHost>(host: &mut H) {
    for node in host.all_nodes() {
        if classify::is_link(host, node) {
            link::reconnect_link(host, node);
        }
    }
}

/// Create a link node pointing at an existing anchor.
///
/// The link class is chosen from the anchor itself when it is a Dot, and
/// from the anchor's input otherwise; the link is then configured against
/// the anchor.
pub fn create_from_anchor<H: GraphHost>(host: &mut H, anchor: NodeId) -> NodeId {
    host.clear_selection();
    let source = if host.class(anchor) == NodeClass::Dot {
        Some(anchor)
    } else {
        host.input(anchor, 0)
    };
    let class = link::link_class_for_source(host, source);
    let link_node = host.create_node(class);
    link::configure_link(host, anchor, link_node);
    host.set_selected(link_node, true);
    link_node
}

/// Offer every anchor through the picker and create a link from the
/// chosen one. A no-op when the picker capability is absent or the
/// document has no anchors.
pub fn pick_anchor_and_create<H: GraphHost>(
    host: &mut H,
    picker: Option<&mut dyn AnchorPicker>,
) -> Option<NodeId> {
    let picker = picker?;
    let anchors = all_anchors(host);
    if anchors.is_empty() {
        return None;
    }
    let entries: Vec<AnchorEntry> = anchors
        .iter()
        .map(|&anchor| AnchorEntry {
            node: anchor,
            display_name: display_name(host, anchor),
            color: color::anchor_color(host, anchor),
        })
        .collect();
    let chosen = picker.choose(&entries)?;
    if !host.exists(chosen) {
        return None;
    }
    Some(create_from_anchor(host, chosen))
}

/// The one-key anchor entry point: rename the sole selected anchor, create
/// an anchor from any other selection, or, with nothing selected, pick an
/// existing anchor and create a link from it.
pub fn anchor_shortcut<H: GraphHost, P: Prompt + ?Sized>(
    host: &mut H,
    prompt: &mut P,
    picker: Option<&mut dyn AnchorPicker>,
) {
    let selection = host.selection();
    if selection.len() == 1 && classify::is_anchor(host, selection[0]) {
        rename_anchor(host, prompt, selection[0]);
    } else if !selection.is_empty() {
        create_anchor(host, prompt);
    } else {
        pick_anchor_and_create(host, picker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;

    fn graph() -> MemoryGraph {
        MemoryGraph::new("comp_v01.nk")
    }

    // ========================================================================
    // sanitize_anchor_name()
    // ========================================================================

    #[test]
    fn test_sanitize_keeps_word_characters() {
        assert_eq!(sanitize_anchor_name("bg_plate_01"), "bg_plate_01");
    }

    #[test]
    fn test_sanitize_replaces_everything_else() {
        assert_eq!(sanitize_anchor_name("bg plate (main)"), "bg_plate__main_");
    }

    #[test]
    fn test_sanitize_trims_first() {
        assert_eq!(sanitize_anchor_name("  plate  "), "plate");
    }

    // ========================================================================
    // suggest_anchor_name()
    // ========================================================================

    #[test]
    fn test_suggest_strips_version_suffix() {
        let mut graph = graph();
        let read = graph.create_node(NodeClass::Read);
        graph.set_file_path(read, "/shots/sq010/bg_plate_v012.1001.exr");
        assert_eq!(suggest_anchor_name(&graph, read), "bg_plate");
    }

    #[test]
    fn test_suggest_unversioned_file_uses_stem() {
        let mut graph = graph();
        let read = graph.create_node(NodeClass::Read);
        graph.set_file_path(read, "/shots/sq010/bg_plate.exr");
        assert_eq!(suggest_anchor_name(&graph, read), "bg_plate");
    }

    #[test]
    fn test_suggest_prefixes_backdrop_label() {
        let mut graph = graph();
        let read = graph.create_node(NodeClass::Read);
        graph.set_file_path(read, "/shots/sq010/bg_plate_v012.1001.exr");
        graph.set_position(read, 50, 50);
        graph.add_backdrop("plates", 0x223344_ff, 0, 0, 200, 200);
        assert_eq!(suggest_anchor_name(&graph, read), "plates_bg_plate");
    }

    #[test]
    fn test_suggest_without_file_is_empty() {
        let mut graph = graph();
        let noop = graph.create_node(NodeClass::NoOp);
        assert_eq!(suggest_anchor_name(&graph, noop), "");
    }

    // ========================================================================
    // display_name() / all_anchors()
    // ========================================================================

    #[test]
    fn test_display_name_strips_prefix() {
        let mut graph = graph();
        let anchor = graph.create_node(NodeClass::NoOp);
        graph.set_name(anchor, "Anchor_plate");
        assert_eq!(display_name(&graph, anchor), "plate");
    }

    #[test]
    fn test_display_name_of_dot_is_trimmed_label() {
        let mut graph = graph();
        let dot = graph.create_node(NodeClass::Dot);
        graph.set_label(dot, " beauty ");
        assert_eq!(display_name(&graph, dot), "beauty");
    }

    #[test]
    fn test_all_anchors_sorted_case_insensitively() {
        let mut graph = graph();
        let b = graph.create_node(NodeClass::NoOp);
        graph.set_name(b, "Anchor_Zebra");
        let a = graph.create_node(NodeClass::NoOp);
        graph.set_name(a, "Anchor_apple");
        let dot = graph.create_node(NodeClass::Dot);
        graph.set_label(dot, "Mango");

        assert_eq!(all_anchors(&graph), vec![a, dot, b]);
    }
}
