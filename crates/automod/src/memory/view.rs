//! Unchecked view over the host process address space
//!
//! The game owns every byte this module touches; we only hold addresses into
//! it. Reads and writes are raw and unvalidated (wrong build means wrong
//! data, not an error), so all pointer arithmetic is confined to this seam
//! and the rest of the crate works through the [`GameRam`] trait.

/// Byte-level access to game memory at absolute addresses.
///
/// Implemented by [`ProcessRam`] for the injected payload and by a mock
/// region in tests. Multi-byte helpers decode little-endian, matching the
/// target process.
pub trait GameRam {
    fn read(&self, addr: u64, buf: &mut [u8]);
    fn write(&mut self, addr: u64, data: &[u8]);

    fn read_u8(&self, addr: u64) -> u8 {
        let mut buf = [0u8; 1];
        self.read(addr, &mut buf);
        buf[0]
    }

    fn read_u32(&self, addr: u64) -> u32 {
        let mut buf = [0u8; 4];
        self.read(addr, &mut buf);
        u32::from_le_bytes(buf)
    }

    fn read_u64(&self, addr: u64) -> u64 {
        let mut buf = [0u8; 8];
        self.read(addr, &mut buf);
        u64::from_le_bytes(buf)
    }

    fn read_f32(&self, addr: u64) -> f32 {
        let mut buf = [0u8; 4];
        self.read(addr, &mut buf);
        f32::from_le_bytes(buf)
    }

    fn write_u32(&mut self, addr: u64, value: u32) {
        self.write(addr, &value.to_le_bytes());
    }
}

/// In-process implementation: addresses are dereferenced directly.
pub struct ProcessRam {
    _private: (),
}

impl ProcessRam {
    /// Create a view over the current process.
    ///
    /// # Safety
    ///
    /// Every address later passed to [`GameRam`] methods must stay mapped and
    /// writable for the lifetime of the view, and the caller must not race
    /// the game's own writers from another thread. The payload satisfies both
    /// by polling from a single worker thread inside the game process.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl GameRam for ProcessRam {
    fn read(&self, addr: u64, buf: &mut [u8]) {
        unsafe {
            std::ptr::copy_nonoverlapping(addr as usize as *const u8, buf.as_mut_ptr(), buf.len());
        }
    }

    fn write(&mut self, addr: u64, data: &[u8]) {
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), addr as usize as *mut u8, data.len());
        }
    }
}
