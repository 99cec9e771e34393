use crate::game::{PHASE_RAW_LEN, Phase, Vec3};
use crate::memory::GameRam;
use crate::memory::layout::flags;
use crate::offset::GameOffsets;

/// One tick's worth of polled world state.
///
/// The world-loaded and name-set flags are kept as raw values rather than
/// booleans: the run branch requires them to be exactly 1 and the reset
/// branch exactly 0, and the game does use other transient values in between.
#[derive(Debug, Clone, Copy)]
pub struct WorldSnapshot {
    pub world_loaded: u32,
    pub player_name_set: u32,
    pub loading: bool,
    pub phase: Option<Phase>,
    pub flyer_killed: bool,
    pub player_location: Option<Vec3>,
}

impl WorldSnapshot {
    /// Read every polled field once. No field is validated; a wrong build
    /// simply yields flags that never line up and a checker that stays idle.
    pub fn read(ram: &impl GameRam, base: u64, offsets: &GameOffsets) -> Self {
        let mut raw_phase = [0u8; PHASE_RAW_LEN];
        ram.read(base + offsets.current_phase, &mut raw_phase);

        let unit_flags = ram.read_u8(base + offsets.unit_data + flags::FLYER_KILL_BYTE);

        // The position lives behind a pointer that is rewritten whenever the
        // player object is recreated, so chase it fresh every tick.
        let location_ptr = ram.read_u64(base + offsets.player_location);
        let player_location = (location_ptr != 0).then(|| {
            Vec3::new(
                ram.read_f32(location_ptr),
                ram.read_f32(location_ptr + 4),
                ram.read_f32(location_ptr + 8),
            )
        });

        Self {
            world_loaded: ram.read_u32(base + offsets.world_loaded),
            player_name_set: ram.read_u32(base + offsets.player_name_set),
            loading: ram.read_u32(base + offsets.is_loading) != 0,
            phase: Phase::detect(&raw_phase),
            flyer_killed: unit_flags & flags::FLYER_KILL_BIT != 0,
            player_location,
        }
    }

    /// Both flags exactly 1: a run is in progress
    pub fn in_run(&self) -> bool {
        self.world_loaded == 1 && self.player_name_set == 1
    }

    /// Both flags exactly 0: the player backed out to a fresh start
    pub fn run_reset(&self) -> bool {
        self.world_loaded == 0 && self.player_name_set == 0
    }
}
