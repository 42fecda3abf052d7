/*++

Licensed under the Apache-2.0 license.

File Name:

    fault_reporter.rs

Abstract:

    File contains API for reporting the end of a run through the diagnostic
    register.

--*/

use crate::mmio::{Mmio, RealMmio};
use crate::reg::wb_sha1_regs::{reg_ptr, DIAGNOSTIC_OFFSET, WB_SHA1_BASE};
use wb_sha1_error::{HarnessError, END_OF_RUN_SENTINEL};

/// Why the core stopped
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HaltReason {
    /// A check failed
    Fault(HarnessError),

    /// The run completed
    Terminated,
}

impl HaltReason {
    /// Value written to the diagnostic register
    pub fn code(self) -> u32 {
        match self {
            HaltReason::Fault(err) => err.into(),
            HaltReason::Terminated => END_OF_RUN_SENTINEL,
        }
    }

    /// Recover the reason from a diagnostic register value. Returns None for
    /// zero.
    pub fn from_code(code: u32) -> Option<Self> {
        if code == END_OF_RUN_SENTINEL {
            return Some(HaltReason::Terminated);
        }
        HarnessError::try_from(code).ok().map(HaltReason::Fault)
    }
}

impl From<HarnessError> for HaltReason {
    fn from(err: HarnessError) -> Self {
        HaltReason::Fault(err)
    }
}

/// Fault reporter
///
/// Success and failure both end here; they differ only in the value left in
/// the diagnostic register.
pub struct FaultReporter<TMmio: Mmio = RealMmio> {
    diag: *mut u32,
    mmio: TMmio,
}

impl FaultReporter<RealMmio> {
    /// # Safety
    ///
    /// The diagnostic register must be mapped.
    pub unsafe fn new() -> Self {
        Self::new_with_mmio(WB_SHA1_BASE as *mut u32, RealMmio)
    }
}

impl<TMmio: Mmio> FaultReporter<TMmio> {
    /// Create a reporter for the register window at `base`.
    ///
    /// # Safety
    ///
    /// `base` must point at the register window as seen through `mmio`.
    pub unsafe fn new_with_mmio(base: *mut u32, mmio: TMmio) -> Self {
        Self {
            diag: reg_ptr(base, DIAGNOSTIC_OFFSET),
            mmio,
        }
    }

    /// Write the code for `reason` to the diagnostic register once
    pub fn publish(&mut self, reason: HaltReason) {
        unsafe { self.mmio.write_volatile(self.diag, reason.code()) }
    }

    /// Report `reason` and park the core
    ///
    /// # Returns
    ///
    /// This method does not return
    pub fn halt(mut self, reason: HaltReason) -> ! {
        loop {
            self.publish(reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmio::testing::FakeMmio;

    #[test]
    fn test_codes() {
        assert_eq!(HaltReason::Terminated.code(), 0x0bad_f00d);
        assert_eq!(
            HaltReason::Fault(HarnessError::IDENTITY_MISMATCH).code(),
            0x0001_0001
        );
    }

    #[test]
    fn test_from_code() {
        assert_eq!(HaltReason::from_code(0x0bad_f00d), Some(HaltReason::Terminated));
        assert_eq!(
            HaltReason::from_code(0x0001_0012),
            Some(HaltReason::Fault(HarnessError::DIGEST_WORD_2))
        );
        assert_eq!(HaltReason::from_code(0), None);
    }

    #[test]
    fn test_publish_writes_diagnostic_once() {
        let mmio = FakeMmio::default();
        let mut reporter =
            unsafe { FaultReporter::new_with_mmio(WB_SHA1_BASE as *mut u32, mmio.clone()) };
        reporter.publish(HarnessError::ENGINE_NOT_IDLE.into());
        assert_eq!(mmio.take_log(), "write *0x30000038 <- 0x10003\n");

        reporter.publish(HaltReason::Terminated);
        assert_eq!(mmio.take_log(), "write *0x30000038 <- 0xbadf00d\n");
    }
}
