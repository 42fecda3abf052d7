/*++

Licensed under the Apache-2.0 license.

File Name:

    wb_sha1.rs

Abstract:

    File contains API for the Wishbone SHA-1 peripheral.

--*/

use crate::mmio::{Mmio, RealMmio};
use crate::reg::wb_sha1_regs::*;

/// Wishbone SHA-1 peripheral
///
/// The message and digest registers are shifting windows: each access moves
/// to the next logical word while the address stays fixed.
pub struct WbSha1<TMmio: Mmio = RealMmio> {
    base: *mut u32,
    mmio: TMmio,
}

impl WbSha1<RealMmio> {
    /// Create a driver for the peripheral at its fixed base address.
    ///
    /// # Safety
    ///
    /// The register window must be mapped and the caller must not create
    /// instances that issue conflicting accesses.
    pub unsafe fn new() -> Self {
        Self::new_with_mmio(WB_SHA1_BASE as *mut u32, RealMmio)
    }
}

impl<TMmio: Mmio> WbSha1<TMmio> {
    /// Create a driver for the register window at `base`, accessed via `mmio`.
    ///
    /// # Safety
    ///
    /// `base` must point at the register window as seen through `mmio`.
    pub unsafe fn new_with_mmio(base: *mut u32, mmio: TMmio) -> Self {
        Self { base, mmio }
    }

    /// Read the identity register
    pub fn get_identity(&self) -> u32 {
        self.read(IDENTITY_OFFSET)
    }

    /// Read the capability count register
    pub fn get_capability_count(&self) -> u32 {
        self.read(CAPABILITY_OFFSET)
    }

    /// Read the status register. Reads do not consume any bits.
    pub fn read_status(&self) -> StatusReg {
        StatusReg::new(self.read(STATUS_OFFSET))
    }

    /// Write the next word of the message block
    ///
    /// # Arguments
    ///
    /// * `word` - Message word
    pub fn write_message_word(&mut self, word: u32) {
        self.write(MSG_IN_OFFSET, word)
    }

    /// Read the next word of the digest
    pub fn read_digest_word(&mut self) -> u32 {
        self.read(DIGEST_OFFSET)
    }

    /// Acknowledge completion, dropping the interrupt line
    pub fn acknowledge(&mut self) {
        self.write(STATUS_OFFSET, 0)
    }

    /// Return the engine to idle
    pub fn reset_engine(&mut self) {
        self.write(STATUS_OFFSET, Status::RESET::SET.value)
    }

    /// Yield inside a busy-wait that does not touch the peripheral
    pub fn relax(&self) {
        self.mmio.relax()
    }

    fn read(&self, offset: usize) -> u32 {
        // The constructor guarantees `base` maps the register window.
        unsafe { self.mmio.read_volatile(reg_ptr(self.base, offset)) }
    }

    fn write(&mut self, offset: usize, val: u32) {
        unsafe { self.mmio.write_volatile(reg_ptr(self.base, offset), val) }
    }
}
