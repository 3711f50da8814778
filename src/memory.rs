//! In-memory reference implementation of the host capability surface.
//!
//! [`MemoryGraph`] backs the test suite and headless consumers. It keeps
//! host-like semantics where they matter to this crate: names stay unique
//! (renames and pastes increment a trailing counter), the transfer buffer
//! is a serialized snapshot that preserves only the connections among the
//! copied nodes, and deleting a node detaches everything that pointed at
//! it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::class::NodeClass;
use crate::host::{AttrDescriptor, ColorPrefs, GraphHost, NodeId};

#[derive(Clone, Debug)]
struct UserAttr {
    descriptor: AttrDescriptor,
    text: String,
}

#[derive(Clone, Debug)]
struct NodeData {
    class: NodeClass,
    name: String,
    label: String,
    tile_color: u32,
    hide_input: bool,
    note_font_size: f32,
    file: Option<String>,
    position: (i32, i32),
    size: (i32, i32),
    inputs: Vec<Option<NodeId>>,
    attrs: Vec<UserAttr>,
}

impl NodeData {
    fn new(class: NodeClass, name: String) -> Self {
        let size = match class {
            NodeClass::Dot => (12, 12),
            NodeClass::Backdrop => (200, 150),
            _ => (80, 18),
        };
        Self {
            class,
            name,
            label: String::new(),
            tile_color: 0,
            hide_input: false,
            note_font_size: 0.0,
            file: None,
            position: (0, 0),
            size,
            inputs: Vec::new(),
            attrs: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct AttrSnapshot {
    descriptor: AttrDescriptor,
    text: String,
}

/// One node in the transfer buffer. Inputs are indices into the snapshot
/// list; connections leaving the copied set are dropped.
#[derive(Serialize, Deserialize)]
struct NodeSnapshot {
    class: NodeClass,
    name: String,
    label: String,
    tile_color: u32,
    hide_input: bool,
    note_font_size: f32,
    file: Option<String>,
    position: (i32, i32),
    size: (i32, i32),
    inputs: Vec<Option<usize>>,
    attrs: Vec<AttrSnapshot>,
}

/// An in-memory node-graph document.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: BTreeMap<NodeId, NodeData>,
    next_id: i32,
    document_name: String,
    selection: Vec<NodeId>,
    buffer: Option<String>,
    prefs: ColorPrefs,
}

impl MemoryGraph {
    /// Create an empty document with the given name (e.g. `comp_v01.nk`).
    pub fn new(document_name: impl Into<String>) -> Self {
        Self {
            document_name: document_name.into(),
            ..Self::default()
        }
    }

    /// Replace the default-color preference table.
    pub fn set_color_prefs(&mut self, prefs: ColorPrefs) {
        self.prefs = prefs;
    }

    /// Set a node's file attribute.
    pub fn set_file_path(&mut self, node: NodeId, path: impl Into<String>) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.file = Some(path.into());
        }
    }

    /// Resize a node; mainly useful for backdrops.
    pub fn set_size(&mut self, node: NodeId, width: i32, height: i32) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.size = (width, height);
        }
    }

    /// Create a backdrop with the given label, color and bounds.
    pub fn add_backdrop(
        &mut self,
        label: &str,
        color: u32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> NodeId {
        let backdrop = self.create_node(NodeClass::Backdrop);
        self.set_label(backdrop, label);
        self.set_tile_color(backdrop, color);
        self.set_position(backdrop, x, y);
        self.set_size(backdrop, width, height);
        backdrop
    }

    /// Raw contents of the transfer buffer, when something has been
    /// copied.
    pub fn transfer_buffer(&self) -> Option<&str> {
        self.buffer.as_deref()
    }

    /// Replace the transfer buffer, e.g. with contents copied in another
    /// document.
    pub fn set_transfer_buffer(&mut self, contents: impl Into<String>) {
        self.buffer = Some(contents.into());
    }

    /// Attribute names on a node, in list order.
    pub fn attr_names(&self, node: NodeId) -> Vec<String> {
        self.nodes
            .get(&node)
            .map(|data| {
                data.attrs
                    .iter()
                    .map(|attr| attr.descriptor.name().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn name_taken(&self, name: &str, exclude: Option<NodeId>) -> bool {
        self.nodes
            .iter()
            .any(|(&id, data)| Some(id) != exclude && data.name == name)
    }

    /// Make a requested name unique by incrementing any trailing counter,
    /// the way node-graph hosts rename colliding nodes.
    fn unique_name(&self, requested: &str, exclude: Option<NodeId>) -> String {
        if !self.name_taken(requested, exclude) {
            return requested.to_string();
        }
        let stem = requested.trim_end_matches(|c: char| c.is_ascii_digit());
        let digits = &requested[stem.len()..];
        let mut counter: u32 = digits.parse().map(|n: u32| n + 1).unwrap_or(1);
        loop {
            let candidate = format!("{stem}{counter}");
            if !self.name_taken(&candidate, exclude) {
                return candidate;
            }
            counter += 1;
        }
    }
}

impl GraphHost for MemoryGraph {
    fn create_node(&mut self, class: NodeClass) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        let name = self.unique_name(&format!("{}1", class.as_str()), None);
        self.nodes.insert(id, NodeData::new(class, name));
        id
    }

    fn delete_node(&mut self, node: NodeId) {
        if self.nodes.remove(&node).is_none() {
            return;
        }
        self.selection.retain(|&selected| selected != node);
        for data in self.nodes.values_mut() {
            for input in &mut data.inputs {
                if *input == Some(node) {
                    *input = None;
                }
            }
        }
    }

    fn all_nodes(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    fn node_by_path(&self, path: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, data)| data.name == path)
            .map(|(&id, _)| id)
    }

    fn exists(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn class(&self, node: NodeId) -> NodeClass {
        self.nodes
            .get(&node)
            .map(|data| data.class.clone())
            .unwrap_or(NodeClass::Other(String::new()))
    }

    fn name(&self, node: NodeId) -> String {
        self.nodes
            .get(&node)
            .map(|data| data.name.clone())
            .unwrap_or_default()
    }

    fn set_name(&mut self, node: NodeId, name: &str) {
        let effective = self.unique_name(name, Some(node));
        if let Some(data) = self.nodes.get_mut(&node) {
            data.name = effective;
        }
    }

    fn full_path(&self, node: NodeId) -> String {
        // MemoryGraph has no groups, so the path is the bare name.
        self.name(node)
    }

    fn label(&self, node: NodeId) -> String {
        self.nodes
            .get(&node)
            .map(|data| data.label.clone())
            .unwrap_or_default()
    }

    fn set_label(&mut self, node: NodeId, label: &str) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.label = label.to_string();
        }
    }

    fn tile_color(&self, node: NodeId) -> u32 {
        self.nodes.get(&node).map(|data| data.tile_color).unwrap_or(0)
    }

    fn set_tile_color(&mut self, node: NodeId, color: u32) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.tile_color = color;
        }
    }

    fn hide_input(&self, node: NodeId) -> bool {
        self.nodes.get(&node).map(|data| data.hide_input).unwrap_or(false)
    }

    fn set_hide_input(&mut self, node: NodeId, hidden: bool) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.hide_input = hidden;
        }
    }

    fn note_font_size(&self, node: NodeId) -> f32 {
        self.nodes
            .get(&node)
            .map(|data| data.note_font_size)
            .unwrap_or(0.0)
    }

    fn set_note_font_size(&mut self, node: NodeId, size: f32) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.note_font_size = size;
        }
    }

    fn file_path(&self, node: NodeId) -> Option<String> {
        self.nodes.get(&node).and_then(|data| data.file.clone())
    }

    fn position(&self, node: NodeId) -> (i32, i32) {
        self.nodes.get(&node).map(|data| data.position).unwrap_or((0, 0))
    }

    fn set_position(&mut self, node: NodeId, x: i32, y: i32) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.position = (x, y);
        }
    }

    fn size(&self, node: NodeId) -> (i32, i32) {
        self.nodes.get(&node).map(|data| data.size).unwrap_or((0, 0))
    }

    fn input(&self, node: NodeId, slot: usize) -> Option<NodeId> {
        self.nodes
            .get(&node)
            .and_then(|data| data.inputs.get(slot).copied().flatten())
    }

    fn set_input(&mut self, node: NodeId, slot: usize, source: Option<NodeId>) {
        if let Some(data) = self.nodes.get_mut(&node) {
            if data.inputs.len() <= slot {
                data.inputs.resize(slot + 1, None);
            }
            data.inputs[slot] = source;
        }
    }

    fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.nodes.get(&node).is_some_and(|data| {
            data.attrs.iter().any(|attr| attr.descriptor.name() == name)
        })
    }

    fn attr_text(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes.get(&node).and_then(|data| {
            data.attrs
                .iter()
                .find(|attr| attr.descriptor.name() == name)
                .map(|attr| attr.text.clone())
        })
    }

    fn set_attr_text(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(&node) {
            if let Some(attr) = data
                .attrs
                .iter_mut()
                .find(|attr| attr.descriptor.name() == name)
            {
                attr.text = value.to_string();
            }
        }
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.attrs.retain(|attr| attr.descriptor.name() != name);
        }
    }

    fn add_attr(&mut self, node: NodeId, descriptor: AttrDescriptor) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.attrs.push(UserAttr {
                descriptor,
                text: String::new(),
            });
        }
    }

    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn set_selected(&mut self, node: NodeId, selected: bool) {
        if selected {
            if self.nodes.contains_key(&node) && !self.selection.contains(&node) {
                self.selection.push(node);
            }
        } else {
            self.selection.retain(|&existing| existing != node);
        }
    }

    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn copy_to_buffer(&mut self, nodes: &[NodeId]) {
        let copied: Vec<NodeId> = nodes
            .iter()
            .copied()
            .filter(|id| self.nodes.contains_key(id))
            .collect();

        let snapshots: Vec<NodeSnapshot> = copied
            .iter()
            .map(|id| {
                let data = &self.nodes[id];
                NodeSnapshot {
                    class: data.class.clone(),
                    name: data.name.clone(),
                    label: data.label.clone(),
                    tile_color: data.tile_color,
                    hide_input: data.hide_input,
                    note_font_size: data.note_font_size,
                    file: data.file.clone(),
                    position: data.position,
                    size: data.size,
                    inputs: data
                        .inputs
                        .iter()
                        .map(|input| {
                            input.and_then(|source| {
                                copied.iter().position(|&copied_id| copied_id == source)
                            })
                        })
                        .collect(),
                    attrs: data
                        .attrs
                        .iter()
                        .map(|attr| AttrSnapshot {
                            descriptor: attr.descriptor.clone(),
                            text: attr.text.clone(),
                        })
                        .collect(),
                }
            })
            .collect();

        self.buffer = serde_json::to_string(&snapshots).ok();
    }

    fn paste_from_buffer(&mut self) -> Option<NodeId> {
        let json = self.buffer.clone()?;
        let snapshots: Vec<NodeSnapshot> = serde_json::from_str(&json).ok()?;
        if snapshots.is_empty() {
            return None;
        }

        let mut pasted: Vec<NodeId> = Vec::with_capacity(snapshots.len());
        for snapshot in &snapshots {
            let id = self.create_node(snapshot.class.clone());
            self.set_name(id, &snapshot.name);
            if let Some(data) = self.nodes.get_mut(&id) {
                data.label = snapshot.label.clone();
                data.tile_color = snapshot.tile_color;
                data.hide_input = snapshot.hide_input;
                data.note_font_size = snapshot.note_font_size;
                data.file = snapshot.file.clone();
                data.position = snapshot.position;
                data.size = snapshot.size;
                data.attrs = snapshot
                    .attrs
                    .iter()
                    .map(|attr| UserAttr {
                        descriptor: attr.descriptor.clone(),
                        text: attr.text.clone(),
                    })
                    .collect();
            }
            pasted.push(id);
        }

        for (snapshot, &id) in snapshots.iter().zip(&pasted) {
            for (slot, input) in snapshot.inputs.iter().enumerate() {
                if let Some(index) = input {
                    self.set_input(id, slot, pasted.get(*index).copied());
                }
            }
        }

        self.selection = pasted.clone();
        pasted.last().copied()
    }

    fn document_name(&self) -> String {
        self.document_name.clone()
    }

    fn color_prefs(&self) -> ColorPrefs {
        self.prefs.clone()
    }
}
