/*++

Licensed under the Apache-2.0 license.

File Name:

    mmio.rs

Abstract:

    File contains the bus accessor used by the drivers.

--*/

/// Word-granular access to memory-mapped registers.
///
/// Every call is a single synchronous access; there is no failure path.
pub trait Mmio {
    /// Loads the word at `src`.
    ///
    /// # Safety
    ///
    /// `src` must be the address of a readable device register.
    unsafe fn read_volatile(&self, src: *const u32) -> u32;

    /// Stores `src` to the word at `dst`.
    ///
    /// # Safety
    ///
    /// `dst` must be the address of a writable device register.
    unsafe fn write_volatile(&self, dst: *mut u32, src: u32);

    /// Called once per iteration of a busy-wait that makes no bus access.
    fn relax(&self) {
        core::hint::spin_loop();
    }
}

/// Accesses the registers directly through volatile loads and stores.
#[derive(Clone, Copy, Debug, Default)]
pub struct RealMmio;

impl Mmio for RealMmio {
    #[inline(always)]
    unsafe fn read_volatile(&self, src: *const u32) -> u32 {
        core::ptr::read_volatile(src)
    }

    #[inline(always)]
    unsafe fn write_volatile(&self, dst: *mut u32, src: u32) {
        core::ptr::write_volatile(dst, src)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Mmio;
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, VecDeque};
    use std::fmt::Write;
    use std::rc::Rc;

    /// An Mmio that logs every access and answers reads from per-address
    /// queues. Reads of an address with an empty queue return 0.
    #[derive(Clone, Default)]
    pub(crate) struct FakeMmio {
        log: Rc<RefCell<String>>,
        reads: Rc<RefCell<HashMap<u32, VecDeque<u32>>>>,
        relax_count: Rc<Cell<usize>>,
    }

    impl FakeMmio {
        pub(crate) fn push_read(&self, addr: u32, val: u32) {
            self.reads
                .borrow_mut()
                .entry(addr)
                .or_default()
                .push_back(val);
        }

        pub(crate) fn take_log(&self) -> String {
            std::mem::take(&mut *self.log.borrow_mut())
        }

        pub(crate) fn relax_count(&self) -> usize {
            self.relax_count.get()
        }
    }

    impl Mmio for FakeMmio {
        unsafe fn read_volatile(&self, src: *const u32) -> u32 {
            let addr = src as usize as u32;
            let val = self
                .reads
                .borrow_mut()
                .get_mut(&addr)
                .and_then(|queue| queue.pop_front())
                .unwrap_or(0);
            writeln!(self.log.borrow_mut(), "read *0x{addr:08x} -> 0x{val:x}").unwrap();
            val
        }

        unsafe fn write_volatile(&self, dst: *mut u32, src: u32) {
            let addr = dst as usize as u32;
            writeln!(self.log.borrow_mut(), "write *0x{addr:08x} <- 0x{src:x}").unwrap();
        }

        fn relax(&self) {
            self.relax_count.set(self.relax_count.get() + 1);
        }
    }
}
