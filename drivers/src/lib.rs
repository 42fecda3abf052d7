/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the WB-SHA1 driver library.

--*/

#![cfg_attr(not(test), no_std)]

mod reg;

mod completion;
mod fault_reporter;
mod irq;
mod mmio;
mod wait;
mod wb_sha1;

pub use completion::CompletionFlag;
pub use fault_reporter::{FaultReporter, HaltReason};
pub use irq::handle_completion_irq;
pub use mmio::{Mmio, RealMmio};
pub use reg::wb_sha1_regs::{Status, StatusReg, WB_SHA1_BASE};
pub use wait::WaitPolicy;
pub use wb_sha1::WbSha1;
