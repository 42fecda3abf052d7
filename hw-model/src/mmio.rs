// Licensed under the Apache-2.0 license

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wb_sha1_drivers::{
    handle_completion_irq, CompletionFlag, FaultReporter, Mmio, WbSha1, WB_SHA1_BASE,
};
use wb_sha1_emu_bus::{Bus, Clock};
use wb_sha1_emu_periph::WbSha1RootBus;
use wb_sha1_emu_types::RvSize;

use crate::bus_logger::BusLogger;

const DIAGNOSTIC_ADDR: u32 = WB_SHA1_BASE as u32 + 0x14;

/// First value the core reported before parking.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Halt {
    pub(crate) code: u32,
    pub(crate) in_irq: bool,
}

/// State of the emulated management core.
pub(crate) struct Core {
    pub(crate) bus: RefCell<BusLogger<WbSha1RootBus>>,
    pub(crate) clock: Clock,
    pub(crate) completion: CompletionFlag,
    irq_connected: bool,
    in_irq: Cell<bool>,
    halt: Cell<Option<Halt>>,
}

impl Core {
    pub(crate) fn new(bus: BusLogger<WbSha1RootBus>, clock: Clock, irq_connected: bool) -> Rc<Self> {
        Rc::new(Self {
            bus: RefCell::new(bus),
            clock,
            completion: CompletionFlag::new(),
            irq_connected,
            in_irq: Cell::new(false),
            halt: Cell::new(None),
        })
    }

    pub(crate) fn halt(&self) -> Option<Halt> {
        self.halt.get()
    }

    /// Advance one bus cycle, then take the interrupt if it is pending.
    fn tick(self: &Rc<Self>) {
        self.clock
            .increment_and_process_timer_actions(1, &mut *self.bus.borrow_mut());
        self.dispatch_irq();
    }

    fn dispatch_irq(self: &Rc<Self>) {
        if !self.irq_connected || self.in_irq.get() || self.halt.get().is_some() {
            return;
        }
        if !self.bus.borrow().bus.sha1.irq_asserted() {
            return;
        }

        self.bus.borrow_mut().log_event("UC", "irq");
        self.in_irq.set(true);
        let mmio = ModelMmio {
            core: Rc::clone(self),
        };
        let reason = {
            let mut sha1 = unsafe { WbSha1::new_with_mmio(WB_SHA1_BASE as *mut u32, mmio.clone()) };
            handle_completion_irq(&mut sha1, &self.completion)
        };
        unsafe { FaultReporter::new_with_mmio(WB_SHA1_BASE as *mut u32, mmio) }.publish(reason);
        self.in_irq.set(false);
    }

    /// The core spins in the reporter loop from the first diagnostic write
    /// on; later accesses have no effect.
    fn park(&self, code: u32) {
        if self.halt.get().is_none() {
            self.halt.set(Some(Halt {
                code,
                in_irq: self.in_irq.get(),
            }));
        }
    }
}

/// An Mmio implementation backed by the emulated Wishbone bus.
///
/// Each access is one clock cycle, and the completion interrupt is taken at
/// access boundaries.
#[derive(Clone)]
pub struct ModelMmio {
    core: Rc<Core>,
}

impl ModelMmio {
    pub(crate) fn new(core: Rc<Core>) -> Self {
        Self { core }
    }
}

impl Mmio for ModelMmio {
    /// Loads from address `src` on the bus and returns the value.
    ///
    /// # Panics
    ///
    /// This function panics if the bus faults.
    ///
    /// # Safety
    ///
    /// As the pointer isn't read from, this Mmio implementation isn't actually
    /// unsafe.
    unsafe fn read_volatile(&self, src: *const u32) -> u32 {
        if self.core.halt().is_some() {
            return 0;
        }
        let addr = src as usize as u32;
        let result = self.core.bus.borrow_mut().read(RvSize::Word, addr);
        let val = result.unwrap_or_else(|e| panic!("Bus fault reading 0x{addr:08x}: {e:?}"));
        self.core.tick();
        val
    }

    /// Stores `src` to address `dst` on the bus.
    ///
    /// # Panics
    ///
    /// This function panics if the bus faults.
    ///
    /// # Safety
    ///
    /// As the pointer isn't written to, this Mmio implementation isn't actually
    /// unsafe.
    unsafe fn write_volatile(&self, dst: *mut u32, src: u32) {
        if self.core.halt().is_some() {
            return;
        }
        let addr = dst as usize as u32;
        let result = self.core.bus.borrow_mut().write(RvSize::Word, addr, src);
        if let Err(e) = result {
            panic!("Bus fault writing 0x{addr:08x}: {e:?}");
        }
        if addr == DIAGNOSTIC_ADDR {
            self.core.park(src);
        }
        self.core.tick();
    }

    fn relax(&self) {
        if self.core.halt().is_none() {
            self.core.tick();
        }
    }
}
