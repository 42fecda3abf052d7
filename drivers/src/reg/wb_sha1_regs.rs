/*++

Licensed under the Apache-2.0 license.

File Name:

    wb_sha1_regs.rs

Abstract:

    File contains register definitions for the Wishbone SHA-1 Engine

--*/

use tock_registers::{register_bitfields, LocalRegisterCopy};

/// Base address of the register window on the Wishbone bus
pub const WB_SHA1_BASE: usize = 0x3000_0024;

/// Identity Register
pub(crate) const IDENTITY_OFFSET: usize = 0x00;

/// Capability Count Register
pub(crate) const CAPABILITY_OFFSET: usize = 0x04;

/// Status/Control Register
pub(crate) const STATUS_OFFSET: usize = 0x08;

/// Message Input Window
pub(crate) const MSG_IN_OFFSET: usize = 0x0C;

/// Digest Output Window
pub(crate) const DIGEST_OFFSET: usize = 0x10;

/// Diagnostic Register
pub(crate) const DIAGNOSTIC_OFFSET: usize = 0x14;

register_bitfields! [
    u32,

    /// Status/Control Register Fields
    pub Status [
        ACTIVE OFFSET(0) NUMBITS(1) [],
        RESET OFFSET(1) NUMBITS(1) [],
        PANIC OFFSET(2) NUMBITS(1) [],
        COMPLETE OFFSET(3) NUMBITS(1) [],
        ROUND OFFSET(4) NUMBITS(8) [],
    ],
];

/// Snapshot of the status register
pub type StatusReg = LocalRegisterCopy<u32, Status::Register>;

/// Address of the register at byte `offset` from `base`.
pub(crate) fn reg_ptr(base: *mut u32, offset: usize) -> *mut u32 {
    base.wrapping_add(offset / core::mem::size_of::<u32>())
}
