//! Test harness building a small, realistic document.

#![allow(dead_code)]

use anchor_paste::{GraphHost, MemoryGraph, NodeClass, NodeId, REFERENCE_ATTR};

/// A document with the usual suspects: a file reader, a processing node
/// downstream of it, and a hidden-input proxy pointing back at the reader.
///
/// ```text
/// read ── blur
///   └──── stamp (hidden input)
/// ```
pub struct GraphFixture {
    pub graph: MemoryGraph,
    pub read: NodeId,
    pub blur: NodeId,
    pub stamp: NodeId,
}

impl GraphFixture {
    pub fn new() -> Self {
        super::init_tracing();
        let mut graph = MemoryGraph::new("comp_v01.nk");

        let read = graph.create_node(NodeClass::Read);
        graph.set_file_path(read, "/shots/sq010/bg_plate_v012.1001.exr");
        graph.set_tile_color(read, 0x112233_ff);
        graph.set_position(read, 100, 100);

        let blur = graph.create_node(NodeClass::Other("Blur".into()));
        graph.set_input(blur, 0, Some(read));
        graph.set_position(blur, 100, 200);

        let stamp = graph.create_node(NodeClass::PostageStamp);
        graph.set_hide_input(stamp, true);
        graph.set_input(stamp, 0, Some(read));
        graph.set_position(stamp, 300, 200);

        Self {
            graph,
            read,
            blur,
            stamp,
        }
    }

    /// Replace the selection with exactly these nodes, in order.
    pub fn select(&mut self, nodes: &[NodeId]) {
        self.graph.clear_selection();
        for &node in nodes {
            self.graph.set_selected(node, true);
        }
    }

    /// Look up a node by name, panicking when it is missing.
    pub fn node_named(&self, name: &str) -> NodeId {
        self.graph
            .node_by_path(name)
            .unwrap_or_else(|| panic!("no node named {name:?}"))
    }

    /// The reference a link node carries, if any.
    pub fn reference_of(&self, node: NodeId) -> Option<String> {
        self.graph.attr_text(node, REFERENCE_ATTR)
    }
}
