//! Chip table manager
//!
//! Chip records are 12 little-endian words. Only the id and size fields
//! matter to this mod; the rest are carried verbatim so inserts look exactly
//! like slots the game itself writes.

use tracing::{info, warn};

use crate::memory::GameRam;
use crate::memory::layout::chip;

/// One chip record as stored in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipSlot {
    pub id: u32,
    /// Secondary id the game derives from `id` and level
    pub base_id: u32,
    pub chip_type: u32,
    pub level: u32,
    /// Slot cost; the field this mod rewrites
    pub size: u32,
    /// Equip-set assignments, all-bits-set when unassigned
    pub sets: [u32; 3],
    pub unknown: [u32; 3],
    pub reserved: u32,
}

impl ChipSlot {
    /// A Taunt+2 chip already shrunk to the target size
    pub fn taunt2_template() -> ChipSlot {
        ChipSlot {
            id: chip::TAUNT2_ID,
            base_id: chip::TAUNT2_BASE_ID,
            chip_type: chip::TAUNT2_TYPE,
            level: chip::TAUNT2_LEVEL,
            size: chip::TAUNT2_TARGET_SIZE,
            sets: [u32::MAX; 3],
            unknown: [u32::MAX; 3],
            reserved: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id == chip::EMPTY_ID
    }

    fn from_words(words: [u32; chip::SLOT_WORDS]) -> ChipSlot {
        ChipSlot {
            id: words[0],
            base_id: words[1],
            chip_type: words[2],
            level: words[3],
            size: words[4],
            sets: [words[5], words[6], words[7]],
            unknown: [words[8], words[9], words[10]],
            reserved: words[11],
        }
    }

    fn to_words(self) -> [u32; chip::SLOT_WORDS] {
        [
            self.id,
            self.base_id,
            self.chip_type,
            self.level,
            self.size,
            self.sets[0],
            self.sets[1],
            self.sets[2],
            self.unknown[0],
            self.unknown[1],
            self.unknown[2],
            self.reserved,
        ]
    }
}

pub struct ChipManager {
    table_addr: u64,
}

impl ChipManager {
    pub fn new(table_addr: u64) -> Self {
        Self { table_addr }
    }

    fn slot_addr(&self, index: u64) -> u64 {
        self.table_addr + index * chip::SLOT_BYTES
    }

    pub fn slot(&self, ram: &impl GameRam, index: u64) -> ChipSlot {
        let addr = self.slot_addr(index);
        let mut words = [0u32; chip::SLOT_WORDS];
        for (word_index, word) in words.iter_mut().enumerate() {
            *word = ram.read_u32(addr + word_index as u64 * 4);
        }
        ChipSlot::from_words(words)
    }

    pub fn set_slot(&self, ram: &mut impl GameRam, index: u64, slot: ChipSlot) {
        let addr = self.slot_addr(index);
        for (word_index, word) in slot.to_words().into_iter().enumerate() {
            ram.write_u32(addr + word_index as u64 * 4, word);
        }
    }

    fn first_empty(&self, ram: &impl GameRam) -> Option<u64> {
        (0..chip::TABLE_SLOTS).find(|&index| self.slot(ram, index).is_empty())
    }

    pub fn insert(&self, ram: &mut impl GameRam, slot: ChipSlot) -> bool {
        match self.first_empty(ram) {
            Some(index) => {
                self.set_slot(ram, index, slot);
                true
            }
            None => {
                warn!("Chip table has no free slot; dropping insert of chip {}", slot.id);
                false
            }
        }
    }

    /// Guarantee two size-6 Taunt+2 chips.
    ///
    /// Scans from the start of the table, forcing the size of matching chips
    /// to 6 and stopping after the second match; a third existing copy is
    /// left untouched. If fewer than two were found, the difference is
    /// inserted from the fixed template.
    pub fn ensure_taunt_chips(&self, ram: &mut impl GameRam) {
        let mut found = 0usize;
        for index in 0..chip::TABLE_SLOTS {
            let mut slot = self.slot(ram, index);
            if slot.id == chip::TAUNT2_ID {
                info!("Found Taunt+2 chip; setting size to {}", chip::TAUNT2_TARGET_SIZE);
                slot.size = chip::TAUNT2_TARGET_SIZE;
                self.set_slot(ram, index, slot);
                found += 1;
            }

            if found >= chip::TAUNT2_MIN_COUNT {
                break;
            }
        }

        if found < chip::TAUNT2_MIN_COUNT {
            let missing = chip::TAUNT2_MIN_COUNT - found;
            for _ in 0..missing {
                self.insert(ram, ChipSlot::taunt2_template());
            }
            info!("Added {} Taunt+2 chip(s)", missing);
        } else {
            info!("Player already has {} Taunt+2 chips", chip::TAUNT2_MIN_COUNT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockRam;

    const TABLE: u64 = 0x4000;

    fn empty_table() -> (MockRam, ChipManager) {
        let size = (chip::TABLE_SLOTS * chip::SLOT_BYTES) as usize;
        let ram = MockRam::builder(TABLE, size).filled(TABLE, size, 0xFF).build();
        (ram, ChipManager::new(TABLE))
    }

    fn taunt2_with_size(size: u32) -> ChipSlot {
        ChipSlot {
            size,
            ..ChipSlot::taunt2_template()
        }
    }

    fn other_chip(id: u32) -> ChipSlot {
        ChipSlot {
            id,
            base_id: id + 3000,
            chip_type: 1,
            level: 0,
            size: 9,
            sets: [u32::MAX; 3],
            unknown: [u32::MAX; 3],
            reserved: 0,
        }
    }

    #[test]
    fn test_slot_round_trip() {
        let (mut ram, chips) = empty_table();
        let slot = taunt2_with_size(21);
        chips.set_slot(&mut ram, 3, slot);
        assert_eq!(chips.slot(&ram, 3), slot);
        assert!(chips.slot(&ram, 2).is_empty());
    }

    #[test]
    fn test_ensure_with_no_matches_inserts_two() {
        let (mut ram, chips) = empty_table();
        chips.insert(&mut ram, other_chip(50));

        chips.ensure_taunt_chips(&mut ram);

        assert_eq!(chips.slot(&ram, 1), ChipSlot::taunt2_template());
        assert_eq!(chips.slot(&ram, 2), ChipSlot::taunt2_template());
        assert!(chips.slot(&ram, 3).is_empty());
        // The unrelated chip is untouched
        assert_eq!(chips.slot(&ram, 0), other_chip(50));
    }

    #[test]
    fn test_ensure_with_one_match_upgrades_and_inserts_one() {
        let (mut ram, chips) = empty_table();
        chips.insert(&mut ram, taunt2_with_size(21));

        chips.ensure_taunt_chips(&mut ram);

        assert_eq!(chips.slot(&ram, 0).size, chip::TAUNT2_TARGET_SIZE);
        assert_eq!(chips.slot(&ram, 1), ChipSlot::taunt2_template());
        assert!(chips.slot(&ram, 2).is_empty());
    }

    #[test]
    fn test_ensure_with_three_matches_upgrades_only_first_two() {
        let (mut ram, chips) = empty_table();
        chips.insert(&mut ram, taunt2_with_size(21));
        chips.insert(&mut ram, taunt2_with_size(14));
        chips.insert(&mut ram, taunt2_with_size(21));

        chips.ensure_taunt_chips(&mut ram);

        assert_eq!(chips.slot(&ram, 0).size, chip::TAUNT2_TARGET_SIZE);
        assert_eq!(chips.slot(&ram, 1).size, chip::TAUNT2_TARGET_SIZE);
        // Third copy is left alone, and nothing new is inserted
        assert_eq!(chips.slot(&ram, 2).size, 21);
        assert!(chips.slot(&ram, 3).is_empty());
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let (mut ram, chips) = empty_table();
        chips.ensure_taunt_chips(&mut ram);
        chips.ensure_taunt_chips(&mut ram);

        assert_eq!(chips.slot(&ram, 0), ChipSlot::taunt2_template());
        assert_eq!(chips.slot(&ram, 1), ChipSlot::taunt2_template());
        assert!(chips.slot(&ram, 2).is_empty());
    }
}
