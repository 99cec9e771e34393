//! Simulated memory region for tests
//!
//! Backs the same [`GameRam`] contract as the in-process view with a plain
//! byte vector, so table managers and the checker can be exercised without a
//! game process. Out-of-range access panics, which in a test is exactly what
//! we want.

use super::GameRam;

pub struct MockRam {
    base: u64,
    bytes: Vec<u8>,
}

impl MockRam {
    pub fn new(base: u64, size: usize) -> Self {
        Self {
            base,
            bytes: vec![0; size],
        }
    }

    pub fn builder(base: u64, size: usize) -> MockRamBuilder {
        MockRamBuilder {
            ram: Self::new(base, size),
        }
    }

    fn range(&self, addr: u64, len: usize) -> std::ops::Range<usize> {
        let start = addr
            .checked_sub(self.base)
            .unwrap_or_else(|| panic!("address {addr:#x} below mock base {:#x}", self.base))
            as usize;
        let end = start + len;
        assert!(
            end <= self.bytes.len(),
            "address range {addr:#x}+{len} beyond mock region"
        );
        start..end
    }
}

impl GameRam for MockRam {
    fn read(&self, addr: u64, buf: &mut [u8]) {
        let range = self.range(addr, buf.len());
        buf.copy_from_slice(&self.bytes[range]);
    }

    fn write(&mut self, addr: u64, data: &[u8]) {
        let range = self.range(addr, data.len());
        self.bytes[range].copy_from_slice(data);
    }
}

pub struct MockRamBuilder {
    ram: MockRam,
}

impl MockRamBuilder {
    pub fn with_bytes(mut self, addr: u64, data: &[u8]) -> Self {
        self.ram.write(addr, data);
        self
    }

    pub fn with_u32(mut self, addr: u64, value: u32) -> Self {
        self.ram.write_u32(addr, value);
        self
    }

    pub fn with_u64(mut self, addr: u64, value: u64) -> Self {
        self.ram.write(addr, &value.to_le_bytes());
        self
    }

    pub fn with_f32(mut self, addr: u64, value: f32) -> Self {
        self.ram.write(addr, &value.to_le_bytes());
        self
    }

    /// Fill a region with a repeated byte, e.g. 0xFF to mark table slots
    /// unused.
    pub fn filled(mut self, addr: u64, len: usize, value: u8) -> Self {
        self.ram.write(addr, &vec![value; len]);
        self
    }

    pub fn build(self) -> MockRam {
        self.ram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_typed_reads() {
        let mut ram = MockRam::builder(0x1000, 0x100)
            .with_u32(0x1000, 0xDEAD_BEEF)
            .with_u64(0x1008, 0x1122_3344_5566_7788)
            .with_f32(0x1010, 324.5)
            .build();

        assert_eq!(ram.read_u32(0x1000), 0xDEAD_BEEF);
        assert_eq!(ram.read_u64(0x1008), 0x1122_3344_5566_7788);
        assert_eq!(ram.read_f32(0x1010), 324.5);

        ram.write_u32(0x1020, 7);
        assert_eq!(ram.read_u32(0x1020), 7);
        assert_eq!(ram.read_u8(0x1020), 7);
    }

    #[test]
    #[should_panic(expected = "below mock base")]
    fn test_read_below_base_panics() {
        let ram = MockRam::new(0x1000, 0x10);
        ram.read_u32(0xFF0);
    }
}
