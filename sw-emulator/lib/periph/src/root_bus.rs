/*++

Licensed under the Apache-2.0 license.

File Name:

    root_bus.rs

Abstract:

    File contains the root bus of the user project area, decoding the
    WB-SHA1 register window.

--*/

use crate::{WbSha1Args, WbSha1Periph};
use wb_sha1_emu_bus::{Bus, BusError, Clock};
use wb_sha1_emu_types::{RvAddr, RvData, RvSize};

/// Wishbone bus as seen from the management core
pub struct WbSha1RootBus {
    pub sha1: WbSha1Periph,
}

impl WbSha1RootBus {
    /// Base address of the WB-SHA1 register window
    pub const SHA1_BASE: RvAddr = 0x3000_0024;

    pub fn new(clock: &Clock, args: WbSha1Args) -> Self {
        Self {
            sha1: WbSha1Periph::new(clock, args),
        }
    }

    fn sha1_offset(addr: RvAddr) -> Option<RvAddr> {
        addr.checked_sub(Self::SHA1_BASE)
            .filter(|offset| *offset < WbSha1Periph::MMAP_SIZE)
    }
}

impl Bus for WbSha1RootBus {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        match Self::sha1_offset(addr) {
            Some(offset) => self.sha1.read(size, offset),
            None => Err(BusError::LoadAccessFault),
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        match Self::sha1_offset(addr) {
            Some(offset) => self.sha1.write(size, offset, val),
            None => Err(BusError::StoreAccessFault),
        }
    }

    fn poll(&mut self) {
        self.sha1.poll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let mut bus = WbSha1RootBus::new(&Clock::new(), WbSha1Args::default());
        assert_eq!(bus.read(RvSize::Word, 0x3000_0024), Ok(0x5348_4131));
        assert_eq!(bus.read(RvSize::Word, 0x3000_0028), Ok(4));
        assert_eq!(
            bus.read(RvSize::Word, 0x3000_0020),
            Err(BusError::LoadAccessFault)
        );
        assert_eq!(
            bus.read(RvSize::Word, 0x3000_003c),
            Err(BusError::LoadAccessFault)
        );
        assert_eq!(bus.write(RvSize::Word, 0x3000_0038, 0x0bad_f00d), Ok(()));
        assert_eq!(bus.sha1.diagnostic_writes(), &[0x0bad_f00d]);
        assert_eq!(
            bus.write(RvSize::Word, 0x2fff_fffc, 0),
            Err(BusError::StoreAccessFault)
        );
    }
}
