/*++

Licensed under the Apache-2.0 license.

File Name:

    fake_bus.rs

Abstract:

    File contains code for a fake implementation of the Bus trait.

--*/
use wb_sha1_emu_types::{RvAddr, RvData, RvSize};

use crate::{testing::Log, Bus, BusError};
use std::fmt::Write;

/// A Bus implementation that logs all calls, and allows the user to override
/// the return value of the methods.
///
/// # Example
///
/// ```
/// use wb_sha1_emu_bus::{Bus, testing::FakeBus};
/// use wb_sha1_emu_types::RvSize;
///
/// let mut fake_bus = FakeBus::new();
/// fake_bus.read_result = Ok(35);
/// assert_eq!(fake_bus.read(RvSize::Word, 0x3000_0024), Ok(35));
/// assert_eq!("read(RvSize::Word, 0x30000024)\n", fake_bus.log.take());
/// ```
pub struct FakeBus {
    pub log: Log,
    pub read_result: Result<RvData, BusError>,
    pub write_result: Result<(), BusError>,
}
impl FakeBus {
    pub fn new() -> Self {
        Self {
            log: Log::new(),
            read_result: Ok(0),
            write_result: Ok(()),
        }
    }
}
impl Default for FakeBus {
    fn default() -> Self {
        Self::new()
    }
}
impl Bus for FakeBus {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        let _ = writeln!(self.log.w(), "read(RvSize::{size:?}, {addr:#x})");
        self.read_result
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        let _ = writeln!(self.log.w(), "write(RvSize::{size:?}, {addr:#x}, {val:#x})");
        self.write_result
    }

    fn poll(&mut self) {
        let _ = writeln!(self.log.w(), "poll()");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_bus() {
        let mut fake_bus = FakeBus::new();

        assert_eq!(fake_bus.read(RvSize::Word, 0x3000_0030), Ok(0));
        assert_eq!("read(RvSize::Word, 0x30000030)\n", fake_bus.log.take());

        assert_eq!(fake_bus.write(RvSize::Word, 0x3000_0038, 0xbad_f00d), Ok(()));
        assert_eq!(
            "write(RvSize::Word, 0x30000038, 0xbadf00d)\n",
            fake_bus.log.take()
        );

        fake_bus.read_result = Err(BusError::LoadAccessFault);
        assert_eq!(
            fake_bus.read(RvSize::Byte, 0x3000_0024),
            Err(BusError::LoadAccessFault)
        );
        assert_eq!("read(RvSize::Byte, 0x30000024)\n", fake_bus.log.take());

        fake_bus.write_result = Err(BusError::StoreAddrMisaligned);
        assert_eq!(
            fake_bus.write(RvSize::Word, 0x3000_0031, 0x1),
            Err(BusError::StoreAddrMisaligned)
        );
        assert_eq!("write(RvSize::Word, 0x30000031, 0x1)\n", fake_bus.log.take());

        fake_bus.poll();
        assert_eq!("poll()\n", fake_bus.log.take());
    }
}
