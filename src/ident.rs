//! Qualified node identity: capture at copy-time, re-resolution at
//! paste-time.
//!
//! A qualified name is `<document-stem>.<path-within-document>`. The stem
//! exists purely to disambiguate: two documents routinely contain nodes
//! with the same short name, and a reference pasted into the wrong document
//! must fail to resolve instead of silently grabbing the name-alike.

use std::fmt;

use tracing::debug;

use crate::error::IdentityError;
use crate::host::{GraphHost, NodeId};

/// A parsed qualified name.
///
/// Segment zero is the document stem; the remaining segments are the node's
/// path within the document (more than one when the node lives inside a
/// group).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// Parse a stored reference string.
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        if raw.is_empty() {
            return Err(IdentityError::Empty);
        }
        let segments: Vec<String> = raw.split('.').map(str::to_owned).collect();
        if segments.len() < 2 {
            return Err(IdentityError::MissingScope {
                raw: raw.to_string(),
            });
        }
        if segments.iter().any(String::is_empty) {
            return Err(IdentityError::EmptySegment {
                raw: raw.to_string(),
            });
        }
        Ok(Self { segments })
    }

    /// The document stem the reference was captured in.
    pub fn document_stem(&self) -> &str {
        &self.segments[0]
    }

    /// The node's path within its document, with the stem stripped.
    pub fn node_path(&self) -> String {
        self.segments[1..].join(".")
    }

    /// The enclosing scope: every segment except the node's own name.
    ///
    /// Two references resolve against each other only when their scopes are
    /// identical: same document stem and same chain of parent groups.
    pub fn scope(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// The qualified name of a live node.
pub fn qualify<H: GraphHost>(host: &H, node: NodeId) -> String {
    let document = host.document_name();
    let stem = document.split('.').next().unwrap_or("");
    format!("{stem}.{}", host.full_path(node))
}

/// Resolve a stored reference, using `context` to establish the scope the
/// lookup happens in.
///
/// Returns `None` when the reference is malformed, when the stored scope
/// differs from the context's (different document, or different parent
/// group), or when no node with that path exists anymore. Never guesses.
pub fn resolve<H: GraphHost>(host: &H, stored: &str, context: NodeId) -> Option<NodeId> {
    let stored = match QualifiedName::parse(stored) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(%err, "reference not parseable, skipping resolution");
            return None;
        }
    };
    let current = match QualifiedName::parse(&qualify(host, context)) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(%err, "context has no qualified name, skipping resolution");
            return None;
        }
    };
    if stored.scope() != current.scope() {
        debug!(
            stored = %stored,
            context = %current,
            "scope mismatch, reference belongs to another document or group"
        );
        return None;
    }
    host.node_by_path(&stored.node_path())
}
