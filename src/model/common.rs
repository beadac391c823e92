use super::Block;
use crate::types::BlockId;
use serde::Serialize;

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockCommon {
    pub id: BlockId,
    pub has_children: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            has_children: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = !children.is_empty();
        self.children = children;
        self
    }
}

impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(BlockId::new_v4())
    }
}

/// A block: the fields every block shares plus the payload of its variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockNode<P> {
    #[serde(flatten)]
    pub common: BlockCommon,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> BlockNode<P> {
    pub fn new(common: BlockCommon, payload: P) -> Self {
        Self { common, payload }
    }
}
