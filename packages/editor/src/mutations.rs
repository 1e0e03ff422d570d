//! # Block Mutations
//!
//! Semantic operations on a block document.
//!
//! ## Mutation Semantics
//!
//! ### UpdateProps
//! - Merges into the existing props; keys not named are kept
//! - Last write wins per key
//!
//! ### ReplaceContent
//! - Atomic replacement of the inline content (not a character diff)
//!
//! ### InsertBlock
//! - `parent_id: None` inserts at the top level
//! - Index is clamped to the sibling count
//!
//! ### RemoveBlock
//! - Removes the block and all descendants
//!
//! ### ReplaceDocument
//! - Swaps the whole sequence, as an import or a reset does
//!
//! Blocks are addressed by id anywhere along the `children` axis.

use folio_document::{Block, Inline, Props};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Merge props into a block
    UpdateProps { block_id: String, props: Props },

    /// Replace the inline content of a block
    ReplaceContent {
        block_id: String,
        content: Vec<Inline>,
    },

    /// Insert a block under a parent (or at the top level) at index
    InsertBlock {
        parent_id: Option<String>,
        index: usize,
        block: Block,
    },

    /// Remove a block from the tree
    RemoveBlock { block_id: String },

    /// Replace every block
    ReplaceDocument { blocks: Vec<Block> },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),
}

impl Mutation {
    /// Apply mutation to a block sequence with validation
    pub fn apply(&self, blocks: &mut Vec<Block>) -> Result<(), MutationError> {
        self.validate(blocks)?;

        match self {
            Mutation::UpdateProps { block_id, props } => {
                let block = find_block_mut(blocks, block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                block.props.merge(props.clone());
                Ok(())
            }

            Mutation::ReplaceContent { block_id, content } => {
                let block = find_block_mut(blocks, block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                block.content = content.clone();
                Ok(())
            }

            Mutation::InsertBlock {
                parent_id,
                index,
                block,
            } => {
                let siblings = match parent_id {
                    Some(parent_id) => {
                        &mut find_block_mut(blocks, parent_id)
                            .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?
                            .children
                    }
                    None => blocks,
                };
                let insert_index = (*index).min(siblings.len());
                siblings.insert(insert_index, block.clone());
                Ok(())
            }

            Mutation::RemoveBlock { block_id } => {
                remove_block(blocks, block_id)
                    .map(|_| ())
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))
            }

            Mutation::ReplaceDocument { blocks: replacement } => {
                *blocks = replacement.clone();
                Ok(())
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, blocks: &[Block]) -> Result<(), MutationError> {
        match self {
            Mutation::UpdateProps { block_id, .. }
            | Mutation::ReplaceContent { block_id, .. }
            | Mutation::RemoveBlock { block_id } => {
                find_block(blocks, block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                Ok(())
            }

            Mutation::InsertBlock {
                parent_id: Some(parent_id),
                ..
            } => {
                find_block(blocks, parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                Ok(())
            }

            Mutation::InsertBlock { parent_id: None, .. } | Mutation::ReplaceDocument { .. } => {
                Ok(())
            }
        }
    }

    /// Id of the block this mutation touches, if it targets one
    pub fn target(&self) -> Option<&str> {
        match self {
            Mutation::UpdateProps { block_id, .. }
            | Mutation::ReplaceContent { block_id, .. }
            | Mutation::RemoveBlock { block_id } => Some(block_id),
            Mutation::InsertBlock { parent_id, .. } => parent_id.as_deref(),
            Mutation::ReplaceDocument { .. } => None,
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// New version number
    pub version: u64,
}

/// Depth-first lookup through a sequence and its children
pub fn find_block<'a>(blocks: &'a [Block], id: &str) -> Option<&'a Block> {
    blocks.iter().find_map(|block| block.find(id))
}

pub fn find_block_mut<'a>(blocks: &'a mut [Block], id: &str) -> Option<&'a mut Block> {
    blocks.iter_mut().find_map(|block| block.find_mut(id))
}

/// Remove a block from wherever it sits and return it
fn remove_block(blocks: &mut Vec<Block>, id: &str) -> Option<Block> {
    if let Some(pos) = blocks.iter().position(|b| b.id.as_deref() == Some(id)) {
        return Some(blocks.remove(pos));
    }

    for block in blocks.iter_mut() {
        if let Some(removed) = remove_block(&mut block.children, id) {
            return Some(removed);
        }
    }

    None
}
