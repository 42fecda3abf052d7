/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains Macros and API for the WB-SHA1 Test Harness

References:
    https://os.phil-opp.com/vga-text-mode for print functionality.

--*/
#![cfg_attr(not(any(test, feature = "std")), no_std)]

use core::fmt;

mod params;

pub use params::{
    TestParams, EXPECTED_CAPABILITY_COUNT, EXPECTED_DIGEST, EXPECTED_IDENTITY, MESSAGE_BLOCK,
};
pub use sha1_test::{Sha1Test, TestState};

#[cfg(feature = "riscv")]
core::arch::global_asm!(include_str!("start.S"));

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::_print(format_args!($($arg)*)));
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    cfg_if::cfg_if! {
        if #[cfg(feature = "std")] {
            std::eprint!("{}", args);
        } else {
            // The management core has no console.
            let _ = args;
        }
    }
}

/// Enable the machine external interrupt
///
/// # Safety
///
/// The trap vector must be installed and the completion flag armed.
#[cfg(feature = "riscv")]
pub unsafe fn enable_interrupts() {
    const MIE_MEIE: u32 = 1 << 11;
    const MSTATUS_MIE: u32 = 1 << 3;
    core::arch::asm!(
        "csrs mie, {meie}",
        "csrs mstatus, {mie}",
        meie = in(reg) MIE_MEIE,
        mie = in(reg) MSTATUS_MIE,
    );
}

/// Defines the firmware entry points: `main`, the trap entry called from
/// the vector in start.S, and the panic handler. All three end in the fault
/// reporter.
#[macro_export]
macro_rules! firmware_entry {
    () => {
        use core::panic::PanicInfo;
        use wb_sha1_drivers::{
            handle_completion_irq, CompletionFlag, FaultReporter, HaltReason, WbSha1,
        };
        use wb_sha1_error::HarnessError;
        use $crate::{println, Sha1Test, TestParams};

        static COMPLETION: CompletionFlag = CompletionFlag::new();

        /// mcause bit set for interrupts
        const MCAUSE_INTERRUPT: u32 = 1 << 31;

        #[panic_handler]
        pub fn panic(info: &PanicInfo) -> ! {
            println!("[failed]");
            println!("Error: {}\n", info);
            unsafe { FaultReporter::new() }.halt(HaltReason::Fault(HarnessError::FW_PANIC))
        }

        #[no_mangle]
        pub extern "C" fn main() -> ! {
            COMPLETION.arm();
            unsafe { $crate::enable_interrupts() };

            let sha1 = unsafe { WbSha1::new() };
            let reason = Sha1Test::new(sha1, &COMPLETION, TestParams::default()).run();
            unsafe { FaultReporter::new() }.halt(reason)
        }

        #[no_mangle]
        pub extern "C" fn trap_entry(mcause: u32) -> ! {
            let reason = if mcause & MCAUSE_INTERRUPT != 0 {
                let mut sha1 = unsafe { WbSha1::new() };
                handle_completion_irq(&mut sha1, &COMPLETION)
            } else {
                HaltReason::Fault(HarnessError::FW_UNEXPECTED_TRAP)
            };
            unsafe { FaultReporter::new() }.halt(reason)
        }
    };
}
