//! Snapshot persistence - binary and RON codecs plus a directory of named saves

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::health::{Health, Hunger};
use crate::entity::inventory::Hotbar;
use crate::entity::player::Player;
use crate::world::chunk::Chunk;

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

/// Bumped whenever the snapshot layout changes
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decompress snapshot: {0}")]
    Decompress(#[from] lz4_flex::block::DecompressError),

    #[error("failed to encode snapshot: {0}")]
    Encode(String),

    #[error("failed to decode snapshot: {0}")]
    Decode(String),

    #[error("RON error: {0}")]
    Ron(String),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("snapshot seed {found} does not match world seed {expected}")]
    SeedMismatch { found: u64, expected: u64 },

    #[error("invalid player state: {0}")]
    InvalidPlayer(String),

    #[error("invalid hotbar: {0}")]
    InvalidHotbar(String),

    #[error("chunk {0} appears more than once")]
    DuplicateChunk(i32),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Saved player state; hotbar is stored alongside in [`WorldSnapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub health: Health,
    pub hunger: Hunger,
}

impl PlayerSnapshot {
    pub fn capture(player: &Player) -> Self {
        Self {
            position: player.position,
            velocity: player.velocity,
            health: player.health,
            hunger: player.hunger,
        }
    }
}

/// Everything needed to resume a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub version: u32,
    pub seed: u64,
    pub saved_at: String,
    pub player: PlayerSnapshot,
    pub hotbar: Hotbar,
    pub selected_slot: usize,
    pub chunks: Vec<Chunk>,
}

impl WorldSnapshot {
    pub fn new(seed: u64, player: &Player, chunks: Vec<Chunk>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            seed,
            saved_at: timestamp(),
            player: PlayerSnapshot::capture(player),
            hotbar: player.inventory.clone(),
            selected_slot: player.selected_slot,
            chunks,
        }
    }

    /// Check the snapshot can be applied to a world with `seed`
    pub fn validate(&self, seed: u64) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::VersionMismatch {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        if self.seed != seed {
            return Err(PersistenceError::SeedMismatch {
                found: self.seed,
                expected: seed,
            });
        }

        let player = &self.player;
        if !player.position.is_finite() || !player.velocity.is_finite() {
            return Err(PersistenceError::InvalidPlayer(format!(
                "non-finite position {:?} or velocity {:?}",
                player.position, player.velocity
            )));
        }
        if player.health.max == 0 || player.health.current > player.health.max {
            return Err(PersistenceError::InvalidPlayer(format!(
                "health {}/{}",
                player.health.current, player.health.max
            )));
        }
        if player.hunger.max == 0 || player.hunger.current > player.hunger.max {
            return Err(PersistenceError::InvalidPlayer(format!(
                "hunger {}/{}",
                player.hunger.current, player.hunger.max
            )));
        }

        if self.hotbar.len() != Hotbar::SIZE {
            return Err(PersistenceError::InvalidHotbar(format!(
                "{} slots, expected {}",
                self.hotbar.len(),
                Hotbar::SIZE
            )));
        }
        if let Some(index) = self.hotbar.slots.iter().position(|stack| stack.block.is_air()) {
            return Err(PersistenceError::InvalidHotbar(format!(
                "slot {} holds air",
                index
            )));
        }
        if self.selected_slot >= self.hotbar.len() {
            return Err(PersistenceError::InvalidHotbar(format!(
                "selected slot {} out of range",
                self.selected_slot
            )));
        }

        let mut keys = ahash::AHashSet::with_capacity(self.chunks.len());
        for chunk in &self.chunks {
            if !keys.insert(chunk.key) {
                return Err(PersistenceError::DuplicateChunk(chunk.key));
            }
        }

        Ok(())
    }

    /// Serialize with bincode and compress with lz4
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let serialized = bincode_next::serde::encode_to_vec(self, bincode_next::config::standard())
            .map_err(|e| PersistenceError::Encode(format!("{:?}", e)))?;
        Ok(lz4_flex::compress_prepend_size(&serialized))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let serialized = lz4_flex::decompress_size_prepended(bytes)?;
        let (snapshot, _): (WorldSnapshot, _) =
            bincode_next::serde::decode_from_slice(&serialized, bincode_next::config::standard())
                .map_err(|e| PersistenceError::Decode(format!("{:?}", e)))?;
        Ok(snapshot)
    }

    /// Human-readable form, mostly for debugging saves
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, Default::default())
            .map_err(|e| PersistenceError::Ron(e.to_string()))
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| PersistenceError::Ron(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}

#[cfg(target_arch = "wasm32")]
fn timestamp() -> String {
    "WASM Session".to_string()
}

/// Directory of named snapshots, one `<name>.sav` file each
#[cfg(not(target_arch = "wasm32"))]
pub struct SaveStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl SaveStore {
    pub const EXTENSION: &'static str = "sav";

    /// Open (and create if needed) a save directory
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, Self::EXTENSION))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    pub fn save(&self, name: &str, snapshot: &WorldSnapshot) -> Result<()> {
        let path = self.path_for(name);
        let bytes = snapshot.to_bytes()?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, &bytes)?;
        std::fs::rename(&temp_path, &path)?;

        log::info!(
            "[SAVE] '{}' - {} chunks, {} bytes compressed - {:?}",
            name,
            snapshot.chunks.len(),
            bytes.len(),
            path
        );
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<WorldSnapshot> {
        let path = self.path_for(name);
        let bytes = std::fs::read(&path)?;
        log::debug!("Read {} bytes from {:?}", bytes.len(), path);

        let snapshot = WorldSnapshot::from_bytes(&bytes)?;
        log::info!(
            "[LOAD] '{}' - {} chunks, saved at {}",
            name,
            snapshot.chunks.len(),
            snapshot.saved_at
        );
        Ok(snapshot)
    }

    /// Remove a save; missing saves are not an error
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name);
        if path.exists() {
            std::fs::remove_file(&path)?;
            log::info!("Deleted save: {}", name);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::BlockId;

    fn sample() -> WorldSnapshot {
        let mut player = Player::new(Vec2::new(12.5, -40.0));
        player.velocity = Vec2::new(1.5, 3.0);
        player.health.set(7);
        player.hunger.set(11);
        player.inventory.credit(BlockId::Log);
        player.inventory.credit(BlockId::Log);
        player.select_slot(3);

        let mut a = Chunk::new(-1);
        a.set(31, 0, BlockId::Coal);
        let mut b = Chunk::new(4);
        b.set(0, 63, BlockId::Iron);

        WorldSnapshot::new(1337, &player, vec![a, b])
    }

    fn assert_same(a: &WorldSnapshot, b: &WorldSnapshot) {
        assert_eq!(a.version, b.version);
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.saved_at, b.saved_at);
        assert_eq!(a.player, b.player);
        assert_eq!(a.hotbar, b.hotbar);
        assert_eq!(a.selected_slot, b.selected_slot);
        assert_eq!(a.chunks.len(), b.chunks.len());
        for (x, y) in a.chunks.iter().zip(&b.chunks) {
            assert_eq!(x.key, y.key);
            assert!(x.same_tiles(y));
        }
    }

    #[test]
    fn test_snapshot_captures_player() {
        let snapshot = sample();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.player.health.current, 7);
        assert_eq!(snapshot.hotbar.count_of(BlockId::Log), 2);
        assert_eq!(snapshot.selected_slot, 3);
        assert!(!snapshot.saved_at.is_empty());
    }

    #[test]
    fn test_binary_codec() {
        let snapshot = sample();
        let bytes = snapshot.to_bytes().unwrap();
        let decoded = WorldSnapshot::from_bytes(&bytes).unwrap();
        assert_same(&snapshot, &decoded);
    }

    #[test]
    fn test_ron_codec() {
        let snapshot = sample();
        let text = snapshot.to_ron().unwrap();
        assert!(text.contains("seed: 1337"));
        let decoded = WorldSnapshot::from_ron(&text).unwrap();
        assert_same(&snapshot, &decoded);
    }

    #[test]
    fn test_corrupt_bytes_are_rejected() {
        assert!(WorldSnapshot::from_bytes(&[1, 2, 3]).is_err());

        let mut bytes = sample().to_bytes().unwrap();
        bytes.truncate(bytes.len() / 2);
        assert!(WorldSnapshot::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample().validate(1337).is_ok());
    }

    #[test]
    fn test_validate_version_and_seed() {
        let mut snapshot = sample();
        assert!(matches!(
            snapshot.validate(42),
            Err(PersistenceError::SeedMismatch { found: 1337, expected: 42 })
        ));

        snapshot.version = 99;
        assert!(matches!(
            snapshot.validate(1337),
            Err(PersistenceError::VersionMismatch { found: 99, .. })
        ));
    }

    #[test]
    fn test_validate_player() {
        let mut snapshot = sample();
        snapshot.player.position.x = f32::NAN;
        assert!(matches!(
            snapshot.validate(1337),
            Err(PersistenceError::InvalidPlayer(_))
        ));

        let mut snapshot = sample();
        snapshot.player.health.current = snapshot.player.health.max + 1;
        assert!(matches!(
            snapshot.validate(1337),
            Err(PersistenceError::InvalidPlayer(_))
        ));
    }

    #[test]
    fn test_validate_hotbar() {
        let mut snapshot = sample();
        snapshot.selected_slot = Hotbar::SIZE;
        assert!(matches!(
            snapshot.validate(1337),
            Err(PersistenceError::InvalidHotbar(_))
        ));

        let mut snapshot = sample();
        snapshot.hotbar.slots.pop();
        assert!(matches!(
            snapshot.validate(1337),
            Err(PersistenceError::InvalidHotbar(_))
        ));

        let mut snapshot = sample();
        snapshot.hotbar.slots[1] = crate::entity::inventory::ItemStack::new(BlockId::Air, 4);
        match snapshot.validate(1337) {
            Err(PersistenceError::InvalidHotbar(reason)) => assert!(reason.contains("slot 1")),
            other => panic!("expected an air slot rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_duplicate_chunks() {
        let mut snapshot = sample();
        snapshot.chunks.push(Chunk::new(4));
        assert!(matches!(
            snapshot.validate(1337),
            Err(PersistenceError::DuplicateChunk(4))
        ));
    }

    #[test]
    fn test_save_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("saves")).unwrap();
        let snapshot = sample();

        assert!(!store.exists("slot1"));
        store.save("slot1", &snapshot).unwrap();
        assert!(store.exists("slot1"));
        assert!(!store.path_for("slot1").with_extension("tmp").exists());

        let loaded = store.load("slot1").unwrap();
        assert_same(&snapshot, &loaded);

        store.delete("slot1").unwrap();
        assert!(!store.exists("slot1"));
        store.delete("slot1").unwrap();
    }

    #[test]
    fn test_save_store_missing_and_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path()).unwrap();

        assert!(matches!(store.load("nope"), Err(PersistenceError::Io(_))));

        // Small size prefix followed by a literal run that overflows the input
        std::fs::write(store.path_for("bad"), [4u8, 0, 0, 0, 0xF0, 0x00]).unwrap();
        assert!(store.load("bad").is_err());
    }
}
