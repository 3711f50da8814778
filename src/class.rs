//! Node classes and the source-to-link substitution table.

use serde::{Deserialize, Serialize};

/// Class tag of a node.
///
/// The classes this crate reasons about are explicit variants; everything
/// else the host knows about arrives as [`Other`](NodeClass::Other). The
/// numbered camera variants some hosts expose ("Camera2" through "Camera4")
/// all fold into [`Camera`](NodeClass::Camera).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeClass {
    /// Image file reader.
    Read,
    /// Deep-image file reader.
    DeepRead,
    /// Geometry file reader.
    ReadGeo,
    /// Camera, any generation.
    Camera,
    /// Scene/geometry importer.
    GeoImport,
    /// Lightweight thumbnail proxy; the generic link stand-in.
    PostageStamp,
    /// Zero-size pass-through; labelable.
    Dot,
    /// No-op pass-through.
    NoOp,
    /// Rectangular container used for color/context inheritance.
    Backdrop,
    /// Any class this crate has no special handling for.
    Other(String),
}

impl NodeClass {
    /// Parse a host class string.
    pub fn from_host_class(class: &str) -> Self {
        match class {
            "Read" => NodeClass::Read,
            "DeepRead" => NodeClass::DeepRead,
            "ReadGeo" => NodeClass::ReadGeo,
            "Camera" | "Camera2" | "Camera3" | "Camera4" => NodeClass::Camera,
            "GeoImport" => NodeClass::GeoImport,
            "PostageStamp" => NodeClass::PostageStamp,
            "Dot" => NodeClass::Dot,
            "NoOp" => NodeClass::NoOp,
            "BackdropNode" => NodeClass::Backdrop,
            other => NodeClass::Other(other.to_string()),
        }
    }

    /// Canonical class string, as the host would spell it.
    pub fn as_str(&self) -> &str {
        match self {
            NodeClass::Read => "Read",
            NodeClass::DeepRead => "DeepRead",
            NodeClass::ReadGeo => "ReadGeo",
            NodeClass::Camera => "Camera",
            NodeClass::GeoImport => "GeoImport",
            NodeClass::PostageStamp => "PostageStamp",
            NodeClass::Dot => "Dot",
            NodeClass::NoOp => "NoOp",
            NodeClass::Backdrop => "BackdropNode",
            NodeClass::Other(name) => name,
        }
    }

    /// Whether nodes of this class support the hidden-input flag and can
    /// therefore serve as link stand-ins.
    pub fn hides_input(&self) -> bool {
        matches!(
            self,
            NodeClass::PostageStamp | NodeClass::Dot | NodeClass::NoOp
        )
    }

    /// Whether instances of this class should be represented by a link on
    /// paste instead of being duplicated.
    pub fn is_replaceable_source(&self) -> bool {
        matches!(
            self,
            NodeClass::Read
                | NodeClass::DeepRead
                | NodeClass::ReadGeo
                | NodeClass::Camera
                | NodeClass::GeoImport
        )
    }
}

/// The class a link node should have for a given source class.
///
/// A Dot is stood in for by another Dot; image readers get the thumbnail
/// proxy; the remaining replaceable sources get a plain pass-through. Any
/// unrecognized class falls back to the generic proxy.
pub fn link_class_for(source: &NodeClass) -> NodeClass {
    match source {
        NodeClass::Dot => NodeClass::Dot,
        NodeClass::Read => NodeClass::PostageStamp,
        NodeClass::DeepRead
        | NodeClass::ReadGeo
        | NodeClass::Camera
        | NodeClass::GeoImport => NodeClass::NoOp,
        _ => NodeClass::PostageStamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_classes() {
        assert_eq!(NodeClass::from_host_class("Read"), NodeClass::Read);
        assert_eq!(NodeClass::from_host_class("Dot"), NodeClass::Dot);
        assert_eq!(
            NodeClass::from_host_class("BackdropNode"),
            NodeClass::Backdrop
        );
    }

    #[test]
    fn test_parse_folds_numbered_cameras() {
        for class in ["Camera", "Camera2", "Camera3", "Camera4"] {
            assert_eq!(NodeClass::from_host_class(class), NodeClass::Camera);
        }
    }

    #[test]
    fn test_parse_unknown_class_is_other() {
        assert_eq!(
            NodeClass::from_host_class("Blur"),
            NodeClass::Other("Blur".to_string())
        );
    }

    #[test]
    fn test_replaceable_sources() {
        assert!(NodeClass::Read.is_replaceable_source());
        assert!(NodeClass::Camera.is_replaceable_source());
        assert!(!NodeClass::Dot.is_replaceable_source());
        assert!(!NodeClass::Other("Blur".into()).is_replaceable_source());
    }

    #[test]
    fn test_link_class_reader_gets_proxy() {
        assert_eq!(link_class_for(&NodeClass::Read), NodeClass::PostageStamp);
    }

    #[test]
    fn test_link_class_dot_stays_dot() {
        assert_eq!(link_class_for(&NodeClass::Dot), NodeClass::Dot);
    }

    #[test]
    fn test_link_class_heavy_sources_get_noop() {
        for class in [
            NodeClass::DeepRead,
            NodeClass::ReadGeo,
            NodeClass::Camera,
            NodeClass::GeoImport,
        ] {
            assert_eq!(link_class_for(&class), NodeClass::NoOp);
        }
    }

    #[test]
    fn test_link_class_unknown_falls_back_to_proxy() {
        assert_eq!(
            link_class_for(&NodeClass::Other("Blur".into())),
            NodeClass::PostageStamp
        );
    }
}
