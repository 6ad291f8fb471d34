use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;

/// Identifier used for empty space unless configured otherwise.
pub const DEFAULT_EMPTY_BLOCK: &str = "game:air";

/// Type code of a block, usually namespaced (`game:stone`).
///
/// Two ids are equal only if their strings are byte-for-byte equal; no
/// namespace defaulting or case folding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(SmolStr);

impl BlockId {
    pub fn new(code: impl Into<SmolStr>) -> Self {
        BlockId(code.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(code: &str) -> Self {
        BlockId::new(code)
    }
}

impl From<String> for BlockId {
    fn from(code: String) -> Self {
        BlockId::new(code)
    }
}

impl Borrow<str> for BlockId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
