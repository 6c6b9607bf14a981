//! Physical and Virtual Address types.
//!
//! Strong types for the two address spaces so translation seams cannot
//! accidentally mix them. A [`VirtAddr`] only becomes a [`PhysAddr`] by going
//! through the TLB cascade or the page walker.

/// Number of bits in the page offset (4 KiB pages).
pub const PAGE_SHIFT: u64 = 12;

/// A virtual address as seen by the executing program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u64);

/// A physical address after translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Virtual page number (address with the page offset stripped).
    #[inline(always)]
    pub const fn vpn(self) -> u64 {
        self.0 >> PAGE_SHIFT
    }

    /// Byte offset within the 4 KiB page.
    #[inline(always)]
    pub const fn page_offset(self) -> u64 {
        self.0 & 0xFFF
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Physical page number (address with the page offset stripped).
    #[inline(always)]
    pub const fn ppn(self) -> u64 {
        self.0 >> PAGE_SHIFT
    }
}

impl From<u64> for VirtAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl From<u64> for PhysAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}
