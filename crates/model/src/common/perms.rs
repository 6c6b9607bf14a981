//! Page permissions and memory access kinds.
//!
//! Permissions are carried as an explicit four-flag copy type rather than the
//! original permission strings; [`PagePerms::parse`] and `Display` keep the
//! string form available for harness code and trace output.

use std::fmt;

/// Kind of memory access being permission-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Data read (loads, AMO read half).
    Read,
    /// Data write (stores, AMO write half).
    Write,
    /// Instruction fetch.
    Execute,
}

/// Permission bits attached to a page mapping.
///
/// `u` marks the page user-accessible; it does not grant anything by itself
/// but drives the SMEP/SMAP checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PagePerms {
    /// Read permission.
    pub r: bool,
    /// Write permission.
    pub w: bool,
    /// Execute permission.
    pub x: bool,
    /// User-accessible page.
    pub u: bool,
}

impl PagePerms {
    /// No permissions at all.
    pub const NONE: Self = Self {
        r: false,
        w: false,
        x: false,
        u: false,
    };

    /// Read only.
    pub const R: Self = Self { r: true, ..Self::NONE };

    /// Read/write (the default for explicit data mappings).
    pub const RW: Self = Self {
        r: true,
        w: true,
        ..Self::NONE
    };

    /// Read/write/execute — used for TLB refills and the identity-mapping
    /// fallback, matching the legacy model's permissive refill policy.
    pub const RWX: Self = Self {
        r: true,
        w: true,
        x: true,
        ..Self::NONE
    };

    /// Read/write/execute plus user.
    pub const RWXU: Self = Self {
        r: true,
        w: true,
        x: true,
        u: true,
    };

    /// Parses a permission string: any subset of the characters `r w x u`.
    ///
    /// Unknown characters are ignored, matching the tolerance of the string
    /// representation this replaces.
    pub fn parse(s: &str) -> Self {
        let mut p = Self::NONE;
        for c in s.chars() {
            match c {
                'r' => p.r = true,
                'w' => p.w = true,
                'x' => p.x = true,
                'u' => p.u = true,
                _ => {}
            }
        }
        p
    }

    /// Returns true if this permission set allows the given access kind.
    #[inline]
    pub const fn allows(self, access: Access) -> bool {
        match access {
            Access::Read => self.r,
            Access::Write => self.w,
            Access::Execute => self.x,
        }
    }

    /// Returns a copy with the user bit set.
    #[inline]
    pub const fn user(mut self) -> Self {
        self.u = true;
        self
    }
}

impl fmt::Display for PagePerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.r {
            write!(f, "r")?;
        }
        if self.w {
            write!(f, "w")?;
        }
        if self.x {
            write!(f, "x")?;
        }
        if self.u {
            write!(f, "u")?;
        }
        Ok(())
    }
}
