//! Memory layout constants for the supported NieR:Automata build
//!
//! All offsets are bytes relative to the executable module base and are only
//! meaningful for the one build this mod targets. A mismatched build produces
//! garbage reads, not errors; there is nothing here to validate against.

/// World-state flags polled every tick
pub mod flags {
    /// Current scripted phase, a fixed-length ASCII identifier
    pub const CURRENT_PHASE: u64 = 0xF64B10;

    /// 1 while a world is loaded, 0 on the title screen
    pub const WORLD_LOADED: u64 = 0xF6E240;

    /// 1 once the player has set a save name
    pub const PLAYER_NAME_SET: u64 = 0x124DE4C;

    /// Nonzero while a loading screen is up
    pub const IS_LOADING: u64 = 0x100D410;

    /// Pointer to the player object's position vector; the object moves, so
    /// the pointer is reread every tick
    pub const PLAYER_LOCATION: u64 = 0x12553E0;

    /// Per-unit event flag array
    pub const UNIT_DATA: u64 = 0x14944C8;

    /// Byte within unit data carrying the small-desert-flyer kill bit
    pub const FLYER_KILL_BYTE: u64 = 7;
    pub const FLYER_KILL_BIT: u8 = 0x2;
}

/// Item table geometry and the item ids this mod touches
pub mod item {
    pub const TABLE_START: u64 = 0x148C4C4;
    pub const SLOT_BYTES: u64 = 12;
    pub const TABLE_SLOTS: u64 = 512;

    /// Id stored in an unused slot
    pub const EMPTY_ID: u32 = u32::MAX;

    /// Owner marker written for items the player never picked up themselves
    pub const UNOWNED: u32 = u32::MAX;

    pub const SEVERED_CABLE_ID: u32 = 550;
    pub const DENTED_PLATE_ID: u32 = 610;

    // The fish sub-range of the item id space, inclusive on both ends
    pub const FISH_AROWANA_ID: u32 = 8001;
    pub const FISH_MACKEREL_ID: u32 = 8021;
    pub const FISH_BROKEN_FIREARM_ID: u32 = 8041;
}

/// Chip table geometry and the Taunt+2 chip constants
pub mod chip {
    pub const TABLE_START: u64 = 0x148E410;
    pub const SLOT_WORDS: usize = 12;
    pub const SLOT_BYTES: u64 = 48;
    pub const TABLE_SLOTS: u64 = 300;

    pub const EMPTY_ID: u32 = u32::MAX;

    pub const TAUNT2_ID: u32 = 228;
    pub const TAUNT2_BASE_ID: u32 = 3228;
    pub const TAUNT2_TYPE: u32 = 25;
    pub const TAUNT2_LEVEL: u32 = 2;

    /// Size every Taunt+2 chip is forced to
    pub const TAUNT2_TARGET_SIZE: u32 = 6;

    /// Minimum number of Taunt+2 chips a run needs
    pub const TAUNT2_MIN_COUNT: usize = 2;
}

/// Timing constants for the poll loop
pub mod timing {
    /// Interval between checker ticks in the payload worker thread (ms)
    pub const POLL_INTERVAL_MS: u64 = 16;
}
