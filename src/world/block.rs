//! Block definitions and the static block registry

use serde::{Deserialize, Serialize};

/// Every block a tile can hold
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockId {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    Log = 4,
    Leaves = 5,
    Coal = 6,
    Iron = 7,
}

/// Static properties of a block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockDef {
    pub id: BlockId,
    pub name: &'static str,
    /// Blocks the player's bounding box
    pub solid: bool,
    /// Base color (RGBA)
    pub color: [u8; 4],
}

/// Registry indexed by `BlockId as usize`
static BLOCKS: [BlockDef; BlockId::COUNT] = [
    BlockDef {
        id: BlockId::Air,
        name: "Air",
        solid: false,
        color: [0, 0, 0, 0],
    },
    BlockDef {
        id: BlockId::Grass,
        name: "Grass",
        solid: true,
        color: [95, 159, 53, 255],
    },
    BlockDef {
        id: BlockId::Dirt,
        name: "Dirt",
        solid: true,
        color: [134, 96, 67, 255],
    },
    BlockDef {
        id: BlockId::Stone,
        name: "Stone",
        solid: true,
        color: [125, 125, 125, 255],
    },
    BlockDef {
        id: BlockId::Log,
        name: "Log",
        solid: true,
        color: [102, 81, 51, 255],
    },
    BlockDef {
        id: BlockId::Leaves,
        name: "Leaves",
        solid: true,
        color: [58, 125, 40, 255],
    },
    BlockDef {
        id: BlockId::Coal,
        name: "Coal",
        solid: true,
        color: [45, 45, 45, 255],
    },
    BlockDef {
        id: BlockId::Iron,
        name: "Iron",
        solid: true,
        color: [216, 175, 147, 255],
    },
];

impl BlockId {
    pub const COUNT: usize = 8;

    pub const ALL: [BlockId; Self::COUNT] = [
        BlockId::Air,
        BlockId::Grass,
        BlockId::Dirt,
        BlockId::Stone,
        BlockId::Log,
        BlockId::Leaves,
        BlockId::Coal,
        BlockId::Iron,
    ];

    #[inline]
    pub fn def(self) -> &'static BlockDef {
        &BLOCKS[self as usize]
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.def().solid
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockId::Air
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// Look up a block by its raw tag
    pub fn from_raw(raw: u8) -> Option<BlockId> {
        Self::ALL.get(raw as usize).copied()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
