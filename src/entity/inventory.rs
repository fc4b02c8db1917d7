use serde::{Deserialize, Serialize};

use crate::world::BlockId;

/// One hotbar slot: a fixed block kind and how many are held
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemStack {
    pub block: BlockId,
    pub count: u32,
}

impl ItemStack {
    pub fn new(block: BlockId, count: u32) -> Self {
        ItemStack { block, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Fixed-size hotbar; every slot is bound to one block kind
///
/// Blocks without a slot cannot be picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotbar {
    pub slots: Vec<ItemStack>,
}

impl Hotbar {
    pub const SIZE: usize = 6;

    pub const DEFAULT_LAYOUT: [BlockId; Self::SIZE] = [
        BlockId::Dirt,
        BlockId::Grass,
        BlockId::Stone,
        BlockId::Log,
        BlockId::Leaves,
        BlockId::Coal,
    ];

    /// Empty hotbar with the default slot layout
    pub fn new() -> Self {
        Self::with_layout(Self::DEFAULT_LAYOUT)
    }

    pub fn with_layout(layout: [BlockId; Self::SIZE]) -> Self {
        Hotbar {
            slots: layout.iter().map(|&block| ItemStack::new(block, 0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Add one block to its matching slot
    /// Returns false (and drops the block) when no slot holds this kind
    pub fn credit(&mut self, block: BlockId) -> bool {
        match self.slots.iter_mut().find(|stack| stack.block == block) {
            Some(stack) => {
                stack.count = stack.count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Take one block from a slot
    /// Returns the block taken, or None if the slot is missing or empty
    pub fn take(&mut self, index: usize) -> Option<BlockId> {
        let stack = self.slots.get_mut(index)?;
        if stack.is_empty() {
            return None;
        }
        stack.count -= 1;
        Some(stack.block)
    }

    pub fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(index)
    }

    /// Count held of a block kind
    pub fn count_of(&self, block: BlockId) -> u32 {
        self.slots
            .iter()
            .filter(|stack| stack.block == block)
            .map(|stack| stack.count)
            .sum()
    }
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::new()
    }
}
