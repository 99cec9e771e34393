//! # automod
//!
//! Core library for the NieR:Automata speedrun helper mod.
//!
//! This crate provides:
//! - An unchecked view over the host process memory ([`memory`])
//! - Memory offsets for the supported game build, with a JSON override file ([`offset`])
//! - Inventory and chip table managers ([`inventory`], [`chip`])
//! - The per-frame polling state machine ([`checker`])
//! - The DXGI factory/swap chain wrapper seam used for the loading-screen
//!   DVD mode ([`dx`])
//!
//! Everything here is platform independent and testable against a simulated
//! memory region; the Windows payload crate supplies the real process view
//! and the real DXGI objects.

pub mod checker;
pub mod chip;
pub mod dx;
pub mod error;
pub mod game;
pub mod inventory;
pub mod memory;
pub mod offset;

pub use checker::ModChecker;
pub use chip::{ChipManager, ChipSlot};
pub use dx::{
    DetachedFactory, DeviceHandle, DxgiFactory, FactoryWrapper, SwapChain, SwapChainDesc,
    SwapChainWrapper, WindowHandle,
};
pub use error::{Error, Result};
pub use game::{Phase, Vec3, Volume, WorldSnapshot};
pub use inventory::{InventoryManager, ItemSlot};
pub use memory::{GameRam, ProcessRam};
pub use offset::{GameOffsets, load_offsets, save_offsets};
