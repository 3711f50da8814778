//! The capability surface consumed from the host application.
//!
//! Everything this crate does to a document goes through [`GraphHost`]. The
//! trait is deliberately narrow: node creation and deletion, typed property
//! accessors, a small dynamic-attribute surface (needed because the
//! reference attribute's position in the attribute list is significant), the
//! global selection, and the copy/paste transfer buffer.
//!
//! Interactive capabilities are split out so a headless host can omit them:
//! [`Prompt`] for text input and [`AnchorPicker`] for the visual anchor
//! chooser. Entry points that need a picker take an `Option` and degrade to
//! a no-op when it is absent.

use serde::{Deserialize, Serialize};

use crate::class::NodeClass;

/// Opaque handle to a node owned by the host document.
///
/// Ids are allocated in creation order and are never reused within a
/// session, so `NodeId` ordering doubles as a deterministic tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub i32);

/// Payload of a user-invocable action attribute.
///
/// The host decides how to surface these (a button on the node panel, a
/// context-menu entry); invoking one should call back into the matching
/// crate operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Re-resolve and reconnect this link to its stored source.
    ReconnectLink,
    /// Reconnect every link that references this anchor.
    ReconnectChildren,
    /// Prompt for a new anchor name and propagate it to dependent links.
    RenameAnchor,
}

/// Descriptor for a dynamic attribute added to a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrDescriptor {
    /// Hidden container group; keeps the attributes that follow it together.
    Group { name: String },
    /// Hidden string attribute.
    Text { name: String },
    /// User-invocable action button.
    Action {
        name: String,
        label: String,
        action: ActionKind,
    },
}

impl AttrDescriptor {
    /// The attribute name this descriptor installs.
    pub fn name(&self) -> &str {
        match self {
            AttrDescriptor::Group { name } => name,
            AttrDescriptor::Text { name } => name,
            AttrDescriptor::Action { name, .. } => name,
        }
    }
}

/// One entry of the host's per-class default-color preference table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorSlot {
    /// Class names this slot applies to, matched case-insensitively.
    pub classes: Vec<String>,
    /// The color choice associated with the slot, `0xRRGGBBAA`.
    pub color: u32,
}

/// The host's default-color preferences: slot membership lists plus a
/// global fallback used when no slot matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorPrefs {
    pub slots: Vec<ColorSlot>,
    pub default: u32,
}

impl Default for ColorPrefs {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            default: 0xcccccc_ff,
        }
    }
}

impl ColorPrefs {
    /// Look up the color choice for a class name, if any slot lists it.
    pub fn class_color(&self, class: &str) -> Option<u32> {
        self.slots
            .iter()
            .find(|slot| {
                slot.classes
                    .iter()
                    .any(|entry| entry.eq_ignore_ascii_case(class))
            })
            .map(|slot| slot.color)
    }
}

/// Graph-editing capabilities the crate consumes from the host document.
///
/// Implementations are expected to be single-threaded and synchronous; see
/// [`MemoryGraph`](crate::MemoryGraph) for the in-memory reference
/// implementation used by the test suite.
///
/// Accessors taking a [`NodeId`] assume the node is alive. For an id that
/// has been deleted, property getters return a neutral default (empty
/// string, zero, `None`) rather than panicking.
pub trait GraphHost {
    // --- node lifecycle -------------------------------------------------

    /// Create a node of the given class with a fresh, unique name.
    fn create_node(&mut self, class: NodeClass) -> NodeId;
    /// Delete a node, detaching any inputs that point at it.
    fn delete_node(&mut self, node: NodeId);
    /// Every node in the document, in creation order.
    fn all_nodes(&self) -> Vec<NodeId>;
    /// Look up a node by its in-document path (see [`full_path`](Self::full_path)).
    fn node_by_path(&self, path: &str) -> Option<NodeId>;
    /// Whether the node still exists.
    fn exists(&self, node: NodeId) -> bool;

    // --- identity -------------------------------------------------------

    fn class(&self, node: NodeId) -> NodeClass;
    fn name(&self, node: NodeId) -> String;
    /// Rename a node. Hosts keep names unique, so the effective name may
    /// differ from the requested one; read it back with [`name`](Self::name).
    fn set_name(&mut self, node: NodeId, name: &str);
    /// Path of the node within the document, `.`-separated inside groups.
    fn full_path(&self, node: NodeId) -> String;

    // --- presentation ---------------------------------------------------

    fn label(&self, node: NodeId) -> String;
    fn set_label(&mut self, node: NodeId, label: &str);
    /// Tile color as `0xRRGGBBAA`; `0` means "unset".
    fn tile_color(&self, node: NodeId) -> u32;
    fn set_tile_color(&mut self, node: NodeId, color: u32);
    fn hide_input(&self, node: NodeId) -> bool;
    fn set_hide_input(&mut self, node: NodeId, hidden: bool);
    fn note_font_size(&self, node: NodeId) -> f32;
    fn set_note_font_size(&mut self, node: NodeId, size: f32);
    /// The node's file attribute, for classes that have one.
    fn file_path(&self, node: NodeId) -> Option<String>;

    // --- layout ---------------------------------------------------------

    fn position(&self, node: NodeId) -> (i32, i32);
    fn set_position(&mut self, node: NodeId, x: i32, y: i32);
    /// On-screen size; for backdrops, the bounds of the contained area.
    fn size(&self, node: NodeId) -> (i32, i32);

    // --- topology -------------------------------------------------------

    fn input(&self, node: NodeId, slot: usize) -> Option<NodeId>;
    fn set_input(&mut self, node: NodeId, slot: usize, source: Option<NodeId>);

    // --- dynamic attributes ---------------------------------------------

    fn has_attr(&self, node: NodeId, name: &str) -> bool;
    fn attr_text(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attr_text(&mut self, node: NodeId, name: &str, value: &str);
    /// Best-effort removal; removing an attribute that does not exist is
    /// not an error.
    fn remove_attr(&mut self, node: NodeId, name: &str);
    /// Append an attribute at the end of the node's attribute list.
    fn add_attr(&mut self, node: NodeId, descriptor: AttrDescriptor);

    // --- selection ------------------------------------------------------

    /// The current selection, in selection order.
    fn selection(&self) -> Vec<NodeId>;
    fn set_selected(&mut self, node: NodeId, selected: bool);
    fn clear_selection(&mut self);

    // --- transfer buffer ------------------------------------------------

    /// Serialize the given nodes (and the connections among them) into the
    /// transfer buffer, replacing its previous contents.
    fn copy_to_buffer(&mut self, nodes: &[NodeId]);
    /// Materialize the transfer buffer's contents as fresh nodes. Returns
    /// the newest pasted node and leaves the pasted set selected, or `None`
    /// when the buffer is empty. The buffer survives the paste.
    fn paste_from_buffer(&mut self) -> Option<NodeId>;

    // --- document -------------------------------------------------------

    /// Name of the document; the part before the first `.` is the stem used
    /// in qualified names.
    fn document_name(&self) -> String;
    /// The host's default-color preference table.
    fn color_prefs(&self) -> ColorPrefs;
}

/// Text-input capability. Returning `None` means the user cancelled.
pub trait Prompt {
    fn text(&mut self, message: &str, initial: &str) -> Option<String>;
}

/// One row offered by an [`AnchorPicker`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorEntry {
    pub node: NodeId,
    pub display_name: String,
    /// Swatch color, `0xRRGGBBAA`.
    pub color: u32,
}

/// Interactive anchor chooser.
///
/// Hosts with a UI implement this over their picker widget; headless hosts
/// pass `None` wherever an `Option<&mut dyn AnchorPicker>` is expected and
/// the picker-driven entry points become no-ops.
pub trait AnchorPicker {
    /// Offer the given anchors and return the chosen one, or `None` on
    /// cancel.
    fn choose(&mut self, anchors: &[AnchorEntry]) -> Option<NodeId>;
}
