//! Item table manager
//!
//! The item table is a fixed array of 12-byte slots in game memory. Unused
//! slots carry the all-bits-set id. The manager only knows the table's base
//! address; every operation goes through a [`GameRam`] view so the same code
//! runs against the live process and the test region.

use tracing::{debug, info, warn};

use crate::memory::GameRam;
use crate::memory::layout::item;

/// One inventory record as stored in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSlot {
    pub id: u32,
    /// Owner marker; the game writes 0xFFFFFFFF for items not tied to a
    /// pickup actor, and so do we
    pub owner: u32,
    pub quantity: u32,
}

impl ItemSlot {
    pub const EMPTY: ItemSlot = ItemSlot {
        id: item::EMPTY_ID,
        owner: item::UNOWNED,
        quantity: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.id == item::EMPTY_ID
    }
}

pub struct InventoryManager {
    table_addr: u64,
}

impl InventoryManager {
    pub fn new(table_addr: u64) -> Self {
        Self { table_addr }
    }

    fn slot_addr(&self, index: u64) -> u64 {
        self.table_addr + index * item::SLOT_BYTES
    }

    pub fn slot(&self, ram: &impl GameRam, index: u64) -> ItemSlot {
        let addr = self.slot_addr(index);
        ItemSlot {
            id: ram.read_u32(addr),
            owner: ram.read_u32(addr + 4),
            quantity: ram.read_u32(addr + 8),
        }
    }

    pub fn set_slot(&self, ram: &mut impl GameRam, index: u64, slot: ItemSlot) {
        let addr = self.slot_addr(index);
        ram.write_u32(addr, slot.id);
        ram.write_u32(addr + 4, slot.owner);
        ram.write_u32(addr + 8, slot.quantity);
    }

    pub fn reset_slot(&self, ram: &mut impl GameRam, index: u64) {
        self.set_slot(ram, index, ItemSlot::EMPTY);
    }

    /// Index of the first slot holding `id`
    pub fn find_by_id(&self, ram: &impl GameRam, id: u32) -> Option<u64> {
        (0..item::TABLE_SLOTS).find(|&index| self.slot(ram, index).id == id)
    }

    fn first_empty(&self, ram: &impl GameRam) -> Option<u64> {
        (0..item::TABLE_SLOTS).find(|&index| self.slot(ram, index).is_empty())
    }

    /// Indices of every occupied slot whose id falls in `[lo, hi]`
    pub fn occupied_in_range(&self, ram: &impl GameRam, lo: u32, hi: u32) -> Vec<u64> {
        (0..item::TABLE_SLOTS)
            .filter(|&index| {
                let slot = self.slot(ram, index);
                !slot.is_empty() && slot.id >= lo && slot.id <= hi
            })
            .collect()
    }

    /// Write `slot` into the lowest unused position. The table is assumed to
    /// have room; a full table is not an error the game ever reports, so we
    /// just log and drop the insert.
    pub fn insert(&self, ram: &mut impl GameRam, slot: ItemSlot) -> bool {
        match self.first_empty(ram) {
            Some(index) => {
                self.set_slot(ram, index, slot);
                true
            }
            None => {
                warn!("Item table has no free slot; dropping insert of item {}", slot.id);
                false
            }
        }
    }

    /// Ensure the player holds exactly `quantity` of `id`: overwrite the
    /// existing slot's count if one exists, otherwise insert a fresh unowned
    /// slot. The count is replaced, never added to.
    pub fn grant(&self, ram: &mut impl GameRam, id: u32, quantity: u32) {
        match self.find_by_id(ram, id) {
            Some(index) => {
                let mut slot = self.slot(ram, index);
                info!(
                    "Found {} of item {}; adjusting count to {}",
                    slot.quantity, id, quantity
                );
                slot.quantity = quantity;
                self.set_slot(ram, index, slot);
            }
            None => {
                info!("Item {} not present; adding {}", id, quantity);
                self.insert(
                    ram,
                    ItemSlot {
                        id,
                        owner: item::UNOWNED,
                        quantity,
                    },
                );
            }
        }
    }

    /// The fishing-tutorial mutation. Scans the fish id range; with
    /// `should_delete` every caught fish is cleared and the caller keeps
    /// retrying, otherwise the first fish found is rewritten to a mackerel
    /// and the mutation is done. Extra fish slots are deliberately left
    /// alone in the rewrite path.
    pub fn adjust_fish(&self, ram: &mut impl GameRam, should_delete: bool) -> bool {
        let fish = self.occupied_in_range(ram, item::FISH_AROWANA_ID, item::FISH_BROKEN_FIREARM_ID);
        if fish.is_empty() {
            return false;
        }

        if should_delete {
            for &index in &fish {
                self.reset_slot(ram, index);
            }
            debug!("Cleared {} fish slot(s)", fish.len());
            return false;
        }

        let mut slot = self.slot(ram, fish[0]);
        info!("Overriding fish with id {}", slot.id);
        slot.id = item::FISH_MACKEREL_ID;
        self.set_slot(ram, fish[0], slot);
        info!("Done overwriting fish in inventory");
        true
    }
}
