//! Data cache models.
//!
//! Plain address-to-word maps with hit/miss accounting. These structures are
//! not on the golden model's correctness path; they exist so a pipeline
//! driver can collect realistic cache statistics through the coverage sink.

use std::collections::HashMap;

use crate::common::PhysAddr;
use crate::coverage::{CoverageRef, Level};

/// L1 data cache: word map with byte-strobe writes.
#[derive(Debug, Default)]
pub struct L1DCache {
    mem: HashMap<u64, u64>,
    coverage: Option<CoverageRef>,
}

impl L1DCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a coverage sink.
    pub fn set_coverage(&mut self, coverage: CoverageRef) {
        self.coverage = Some(coverage);
    }

    /// Writes `data` into the word containing `addr` under the byte strobe
    /// mask `wstrb` (bit i enables byte lane i).
    pub fn write(&mut self, addr: PhysAddr, data: u64, wstrb: u8) {
        let word_addr = addr.val() & !0x7;
        let hit = self.mem.contains_key(&word_addr);
        let slot = self.mem.entry(word_addr).or_insert(0);
        for lane in 0..8 {
            if (wstrb >> lane) & 1 != 0 {
                let mask = 0xFFu64 << (8 * lane);
                *slot = (*slot & !mask) | (data & mask);
            }
        }
        self.record(hit);
    }

    /// Reads the word containing `addr`, zero if absent.
    pub fn read(&mut self, addr: PhysAddr) -> u64 {
        let word_addr = addr.val() & !0x7;
        let hit = self.mem.contains_key(&word_addr);
        self.record(hit);
        self.mem.get(&word_addr).copied().unwrap_or(0)
    }

    fn record(&self, hit: bool) {
        if let Some(cov) = &self.coverage {
            cov.borrow_mut().record_cache(Level::L1, hit);
        }
    }
}

/// Shared-level cache model (L2 or L3): a plain word map.
#[derive(Debug)]
pub struct UnifiedCache {
    level: Level,
    mem: HashMap<u64, u64>,
    coverage: Option<CoverageRef>,
}

impl UnifiedCache {
    /// Creates an empty L2 cache.
    pub fn l2() -> Self {
        Self::with_level(Level::L2)
    }

    /// Creates an empty L3 cache.
    pub fn l3() -> Self {
        Self::with_level(Level::L3)
    }

    fn with_level(level: Level) -> Self {
        Self {
            level,
            mem: HashMap::new(),
            coverage: None,
        }
    }

    /// Attaches a coverage sink.
    pub fn set_coverage(&mut self, coverage: CoverageRef) {
        self.coverage = Some(coverage);
    }

    /// Reads the word at `addr`, zero if absent.
    pub fn read(&mut self, addr: PhysAddr) -> u64 {
        let hit = self.mem.contains_key(&addr.val());
        self.record(hit);
        self.mem.get(&addr.val()).copied().unwrap_or(0)
    }

    /// Writes the word at `addr`.
    pub fn write(&mut self, addr: PhysAddr, data: u64) {
        let hit = self.mem.contains_key(&addr.val());
        let _ = self.mem.insert(addr.val(), data);
        self.record(hit);
    }

    fn record(&self, hit: bool) {
        if let Some(cov) = &self.coverage {
            cov.borrow_mut().record_cache(self.level, hit);
        }
    }
}
