//! # Anchor Paste
//!
//! Anchor/link aware copy, cut and paste for node-graph documents.
//!
//! Cross-references between nodes normally break when the nodes are
//! duplicated, renamed, or pasted into another document. This crate records
//! a node's logical identity at copy-time as a *qualified name* and
//! re-resolves it at paste-time, so hidden-input connections are rebuilt
//! and expensive source nodes (file readers, cameras) are replaced by
//! lightweight *link* stand-ins instead of being copied again. *Anchors*
//! are user-named nodes that give a piece of upstream graph a stable
//! identity for links to point at.
//!
//! ## Features
//!
//! - **Host-Agnostic** - All document access goes through the [`GraphHost`]
//!   capability trait
//! - **Reference Integrity** - Qualified names refuse to resolve across
//!   documents or group scopes instead of guessing
//! - **Typed Substitution** - The source-to-link class mapping is an
//!   exhaustive enum match, not a string table
//! - **Headless-Friendly** - Interactive capabilities ([`Prompt`],
//!   [`AnchorPicker`]) are injected and optional
//!
//! ## Quick Start
//!
//! ```
//! use anchor_paste::{clipboard, GraphHost, MemoryGraph, NodeClass};
//!
//! let mut graph = MemoryGraph::new("comp_v01.nk");
//! let read = graph.create_node(NodeClass::Read);
//! graph.set_selected(read, true);
//!
//! // Copy annotates the selection, paste turns the reader into a link.
//! clipboard::copy(&mut graph, false);
//! let pasted = clipboard::paste(&mut graph);
//! assert!(pasted.is_some());
//! ```
//!
//! ## Core Components
//!
//! - [`ident`] - Qualified-name capture and resolution
//! - [`classify`] - Node role predicates (anchor, link, source-hiding,
//!   replaceable source)
//! - [`link`] - Link configuration and the reference attribute
//! - [`clipboard`] - The copy/cut/paste protocol
//! - [`anchor`] - Anchor creation, renaming, and reconnection
//! - [`labels`] - Label helpers with Dot-label propagation
//! - [`memory`] - [`MemoryGraph`], the in-memory reference host

pub mod anchor;
pub mod class;
pub mod classify;
pub mod clipboard;
pub mod color;
pub mod error;
pub mod host;
pub mod ident;
pub mod labels;
pub mod link;
pub mod memory;

// Re-export the capability surface and the types most callers need.
pub use class::{link_class_for, NodeClass};
pub use error::IdentityError;
pub use host::{
    ActionKind, AnchorEntry, AnchorPicker, AttrDescriptor, ColorPrefs, ColorSlot, GraphHost,
    NodeId, Prompt,
};
pub use ident::{qualify, resolve, QualifiedName};
pub use memory::MemoryGraph;

// Frequently used operations, re-exported for convenience.
pub use anchor::{
    all_anchors, anchor_shortcut, create_anchor, create_from_anchor, reconnect_all,
    reconnect_children, rename_anchor, ANCHOR_PREFIX,
};
pub use color::{anchor_color, node_color, ANCHOR_DEFAULT_COLOR};
pub use link::{configure_link, find_source, reconnect_link, REFERENCE_ATTR};
