//! Sparse word-granular memory.
//!
//! The backing store behind the golden model and the load/store unit: a
//! conceptually infinite physical memory held as a hash map of aligned
//! 64-bit words. Sub-word stores read-modify-write their containing word;
//! nothing is ever allocated until written.

use std::collections::HashMap;

use crate::common::PhysAddr;

/// Byte-addressable backing store abstraction.
///
/// The load/store unit and the caches only require this narrow surface, so
/// any byte-addressable model can stand in for [`SparseMemory`].
pub trait Backing {
    /// Loads `size` bytes starting at `addr`, zero for unwritten memory.
    fn load(&mut self, addr: PhysAddr, size: usize) -> u64;

    /// Stores the low `size` bytes of `value` at `addr`.
    fn store(&mut self, addr: PhysAddr, value: u64, size: usize);
}

/// Sparse physical memory keyed by aligned 64-bit word address.
#[derive(Clone, Debug, Default)]
pub struct SparseMemory {
    words: HashMap<u64, u64>,
}

impl SparseMemory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the aligned word containing `addr` has been written.
    ///
    /// This is the presence test behind the `page` fault: translated
    /// addresses with no backing word fault rather than reading zero.
    pub fn contains_word(&self, addr: PhysAddr) -> bool {
        self.words.contains_key(&(addr.val() & !0x7))
    }

    /// Reads the aligned word containing `addr`, if present.
    pub fn read_word(&self, addr: PhysAddr) -> Option<u64> {
        self.words.get(&(addr.val() & !0x7)).copied()
    }

    /// Writes a full aligned word, creating it if absent.
    pub fn write_word(&mut self, addr: PhysAddr, value: u64) {
        let _ = self.words.insert(addr.val() & !0x7, value);
    }

    /// Number of resident words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    fn read_byte(&self, addr: u64) -> u8 {
        let word = self.words.get(&(addr & !0x7)).copied().unwrap_or(0);
        (word >> ((addr & 0x7) * 8)) as u8
    }

    #[inline]
    fn write_byte(&mut self, addr: u64, byte: u8) {
        let word = self.words.entry(addr & !0x7).or_insert(0);
        let shift = (addr & 0x7) * 8;
        *word = (*word & !(0xFFu64 << shift)) | (u64::from(byte) << shift);
    }
}

impl Backing for SparseMemory {
    fn load(&mut self, addr: PhysAddr, size: usize) -> u64 {
        let mut value = 0u64;
        for i in 0..size.min(8) {
            value |= u64::from(self.read_byte(addr.val().wrapping_add(i as u64))) << (i * 8);
        }
        value
    }

    fn store(&mut self, addr: PhysAddr, value: u64, size: usize) {
        for i in 0..size.min(8) {
            self.write_byte(addr.val().wrapping_add(i as u64), (value >> (i * 8)) as u8);
        }
    }
}
