//! Injected payload for the speedrun helper
//!
//! Loaded into the game process via LoadLibrary injection. `DllMain` spawns a
//! single worker thread that resolves the module base, sets up file logging,
//! and then drives [`automod::ModChecker`] once per poll interval until the
//! DLL is unloaded.
//!
//! The loading-screen DVD mode needs the game's DXGI factory created through
//! [`automod::FactoryWrapper`], which only a deployment that replaces the
//! game's dxgi.dll can provide. An injected payload has no factory to wrap,
//! so the checker runs without one and the memory mutations are the whole
//! feature set here.

#![cfg(windows)]

mod logging;

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use automod::dx::DetachedFactory;
use automod::memory::layout::timing;
use automod::{FactoryWrapper, GameOffsets, ModChecker, ProcessRam};
use tracing::{error, info, warn};
use windows::Win32::Foundation::{BOOL, HMODULE};
use windows::Win32::System::Diagnostics::Debug::OutputDebugStringW;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::SystemServices::{DLL_PROCESS_ATTACH, DLL_PROCESS_DETACH};
use windows::core::PCWSTR;

/// Per-offset override file, read from the game's working directory
const OFFSETS_FILE: &str = "automod-offsets.json";

/// Cleared on DLL_PROCESS_DETACH to stop the worker loop
static RUNNING: AtomicBool = AtomicBool::new(false);

#[unsafe(no_mangle)]
extern "system" fn DllMain(
    _module: HMODULE,
    reason: u32,
    _reserved: *mut core::ffi::c_void,
) -> BOOL {
    match reason {
        DLL_PROCESS_ATTACH => {
            RUNNING.store(true, Ordering::Release);
            thread::spawn(worker);
        }
        DLL_PROCESS_DETACH => {
            RUNNING.store(false, Ordering::Release);
        }
        _ => {}
    }
    BOOL::from(true)
}

fn worker() {
    // Let the game finish its own startup first
    thread::sleep(Duration::from_millis(500));
    if let Err(e) = run() {
        let message = format!("automod worker stopped: {e:#}");
        // No subscriber exists if logging setup itself is what failed, so
        // also hand the message to the debugger channel
        error!("{message}");
        debug_out(&message);
    }
}

/// Emit a message via OutputDebugString, visible in a debugger or DbgView
/// even when no tracing subscriber is installed
fn debug_out(message: &str) {
    let mut wide: Vec<u16> = message.encode_utf16().collect();
    wide.push(0);
    unsafe { OutputDebugStringW(PCWSTR(wide.as_ptr())) };
}

fn load_offsets_or_default() -> GameOffsets {
    match automod::load_offsets(OFFSETS_FILE) {
        Ok(offsets) => {
            info!("Using offsets override for build {}", offsets.version);
            offsets
        }
        Err(e) if e.is_not_found() => GameOffsets::default(),
        Err(e) => {
            warn!("Ignoring {OFFSETS_FILE}: {e}; using build defaults");
            GameOffsets::default()
        }
    }
}

fn run() -> Result<()> {
    logging::init()?;

    let module = unsafe { GetModuleHandleW(None) }.context("resolving game module base")?;
    let base = module.0 as u64;
    info!("automod attached; module base {base:#x}");

    let offsets = load_offsets_or_default();
    let mut checker = ModChecker::new(base, offsets);

    // Safety: the worker thread is the only reader/writer on our side, and
    // the game outlives the loop (detach stops it before unload).
    let mut ram = unsafe { ProcessRam::new() };

    while RUNNING.load(Ordering::Acquire) {
        checker.tick(&mut ram, None::<&mut FactoryWrapper<DetachedFactory>>);
        thread::sleep(Duration::from_millis(timing::POLL_INTERVAL_MS));
    }

    info!("automod detaching");
    Ok(())
}
