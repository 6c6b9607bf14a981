//! L1 instruction cache.
//!
//! A physically tagged instruction word store with its own translation
//! stack. Fetches translate the virtual PC through the cascade with execute
//! permission and return 0 on any translation fault, leaving fault handling
//! to the fetch stage driving it.

use std::collections::HashMap;

use crate::common::{Access, PhysAddr, VirtAddr};
use crate::config::TranslationConfig;
use crate::coverage::CoverageRef;
use crate::mmu::{Translation, TranslationStack};

/// L1 instruction cache with an embedded translation stack.
#[derive(Debug)]
pub struct L1ICache {
    mem: HashMap<u64, u32>,
    /// Fetch-side translation cascade, owned by this cache.
    pub translation: TranslationStack,
}

impl L1ICache {
    /// Creates an empty instruction cache.
    pub fn new(cfg: &TranslationConfig) -> Self {
        Self {
            mem: HashMap::new(),
            translation: TranslationStack::new(cfg),
        }
    }

    /// Attaches a coverage sink to the embedded translation stack.
    pub fn set_coverage(&mut self, coverage: &CoverageRef) {
        self.translation.set_coverage(coverage);
    }

    /// Installs a 32-bit instruction word at physical address `pa`.
    pub fn load(&mut self, pa: PhysAddr, word: u32) {
        let _ = self.mem.insert(pa.val() & !0x3, word);
    }

    /// Translates `va` for execute and returns the instruction word there,
    /// or 0 when translation faults or nothing is cached.
    pub fn fetch(&mut self, va: VirtAddr) -> u32 {
        match self.translation.translate(va, Access::Execute) {
            Translation::Hit { pa, perm_fault: false, .. } => {
                self.mem.get(&(pa.val() & !0x3)).copied().unwrap_or(0)
            }
            _ => 0,
        }
    }
}
