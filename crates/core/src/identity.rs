//! Content-derived identity of a parameter tree

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity token of a parameter tree snapshot
///
/// Two trees with the same content carry the same id. The all-zero id is
/// reserved for the invalid/empty sentinel tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TreeId([u8; 32]);

impl TreeId {
    /// Sentinel id of a tree that was never registered
    pub const INVALID: TreeId = TreeId([0; 32]);

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this id belongs to a real tree snapshot
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl Default for TreeId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
