//! Game memory offsets with an optional JSON override file
//!
//! The defaults match the one supported build; a JSON file lets a user patch
//! individual offsets after a game update without rebuilding the payload.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::memory::layout::{chip, flags, item};

/// Byte offsets from the executable module base for everything the checker
/// polls or mutates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOffsets {
    /// Game build the offsets were taken from
    pub version: String,
    pub current_phase: u64,
    pub world_loaded: u64,
    pub player_name_set: u64,
    pub is_loading: u64,
    pub player_location: u64,
    pub unit_data: u64,
    pub item_table: u64,
    pub chip_table: u64,
}

impl Default for GameOffsets {
    fn default() -> Self {
        Self {
            version: "steam-1.02".to_string(),
            current_phase: flags::CURRENT_PHASE,
            world_loaded: flags::WORLD_LOADED,
            player_name_set: flags::PLAYER_NAME_SET,
            is_loading: flags::IS_LOADING,
            player_location: flags::PLAYER_LOCATION,
            unit_data: flags::UNIT_DATA,
            item_table: item::TABLE_START,
            chip_table: chip::TABLE_START,
        }
    }
}

impl GameOffsets {
    pub fn is_valid(&self) -> bool {
        !self.version.is_empty()
            && self.current_phase != 0
            && self.world_loaded != 0
            && self.player_name_set != 0
            && self.is_loading != 0
            && self.player_location != 0
            && self.unit_data != 0
            && self.item_table != 0
            && self.chip_table != 0
    }
}

/// Load offsets from a JSON file, rejecting incomplete overrides
pub fn load_offsets<P: AsRef<Path>>(path: P) -> Result<GameOffsets> {
    let content = fs::read_to_string(&path)?;
    let offsets: GameOffsets = serde_json::from_str(&content)?;
    if !offsets.is_valid() {
        return Err(Error::InvalidOffsets(format!(
            "{} has zeroed fields or no version",
            path.as_ref().display()
        )));
    }
    debug!(
        "Loaded offsets for build {} from {}",
        offsets.version,
        path.as_ref().display()
    );
    Ok(offsets)
}

/// Save offsets to a JSON file
pub fn save_offsets<P: AsRef<Path>>(path: P, offsets: &GameOffsets) -> Result<()> {
    let content = serde_json::to_string_pretty(offsets)?;
    fs::write(&path, content)?;
    info!("Saved offsets to {}", path.as_ref().display());
    Ok(())
}
