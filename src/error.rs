//! Error types.

use thiserror::Error;

/// Why a stored reference string could not be parsed.
///
/// These never surface to the user: every public operation treats a
/// malformed reference the same way as an unresolvable one and leaves the
/// affected node alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("empty reference")]
    Empty,

    #[error("reference {raw:?} carries no document scope")]
    MissingScope { raw: String },

    #[error("reference {raw:?} contains an empty path segment")]
    EmptySegment { raw: String },
}
