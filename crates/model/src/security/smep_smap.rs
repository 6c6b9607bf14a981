//! SMEP/SMAP permission checks.
//!
//! Pure predicates over privilege mode, page user bit, and feature enables.
//! SMEP blocks kernel-mode execution of user pages; SMAP blocks kernel-mode
//! data access to user pages unless the access carries an override.

/// True if a kernel-mode fetch of a user page must fault under SMEP.
pub const fn smep_fault(is_kernel: bool, va_user: bool, smep: bool) -> bool {
    is_kernel && smep && va_user
}

/// True if a kernel-mode data access to a user page must fault under SMAP.
/// `override_ac` models the access-control override (AC-flag analogue).
pub const fn smap_fault(is_kernel: bool, va_user: bool, smap: bool, override_ac: bool) -> bool {
    is_kernel && smap && va_user && !override_ac
}

/// Combined check: execute accesses consult SMEP, data accesses SMAP.
pub const fn check(
    is_kernel: bool,
    va_user: bool,
    is_exec: bool,
    smep: bool,
    smap: bool,
    override_ac: bool,
) -> bool {
    if is_exec {
        smep_fault(is_kernel, va_user, smep)
    } else {
        smap_fault(is_kernel, va_user, smap, override_ac)
    }
}
