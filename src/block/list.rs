use super::model::{Block, BlockKind};
use crate::error::BlockEditError;
use itertools::Itertools;

/// An editable, ordered list of blocks, enforcing the rules the editing
/// surface applies before a configuration is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    /// Takes a snapshot in display order (stable by `position`).
    pub fn new(blocks: Vec<Block>) -> Self {
        let blocks = blocks.into_iter().sorted_by_key(|b| b.position).collect();
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Removes a block. System blocks can only be disabled, never deleted.
    pub fn remove(&mut self, index: usize) -> Result<Block, BlockEditError> {
        let block = self.get(index)?;
        if block.kind.is_system() {
            return Err(BlockEditError::SystemBlockNotDeletable {
                index,
                type_name: block.block_type().to_string(),
            });
        }
        let removed = self.blocks.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Flips `enabled` and returns the new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool, BlockEditError> {
        self.get(index)?;
        let block = &mut self.blocks[index];
        block.enabled = !block.enabled;
        Ok(block.enabled)
    }

    /// Appends an enabled block after the current last position.
    pub fn push(&mut self, kind: BlockKind) {
        let position = self
            .blocks
            .iter()
            .map(|b| b.position + 1)
            .max()
            .unwrap_or(0);
        self.blocks.push(Block::new(position, kind));
    }

    /// Moves the block at `from` to `to`, shifting the blocks in between.
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), BlockEditError> {
        self.get(from)?;
        self.get(to)?;
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        self.renumber();
        Ok(())
    }

    /// Rewrites positions as `0..n` in the current display order.
    pub fn renumber(&mut self) {
        for (i, block) in self.blocks.iter_mut().enumerate() {
            block.position = i as i64;
        }
    }

    fn get(&self, index: usize) -> Result<&Block, BlockEditError> {
        self.blocks.get(index).ok_or(BlockEditError::IndexOutOfRange {
            index,
            len: self.blocks.len(),
        })
    }
}

impl From<Vec<Block>> for BlockList {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}
