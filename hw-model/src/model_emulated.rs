// Licensed under the Apache-2.0 license

use std::cell::Ref;
use std::rc::Rc;

use wb_sha1_drivers::{CompletionFlag, FaultReporter, HaltReason, WbSha1, WB_SHA1_BASE};
use wb_sha1_emu_bus::Clock;
use wb_sha1_emu_periph::{WbSha1Periph, WbSha1RootBus};
use wb_sha1_test_harness::{println, Sha1Test, TestParams};

use crate::bus_logger::BusLogger;
use crate::mmio::{Core, ModelMmio};
use crate::{InitParams, ModelError, RunOutcome};

const DIGEST_WORDS: usize = 5;

pub struct ModelEmulated {
    core: Rc<Core>,
}

impl ModelEmulated {
    pub fn new(params: InitParams) -> Result<Self, ModelError> {
        if let Some(idx) = params.corrupt_digest_word {
            if idx >= DIGEST_WORDS {
                return Err(ModelError::InvalidDigestWord(idx));
            }
        }

        let clock = Clock::new();
        let mut root_bus = WbSha1RootBus::new(&clock, params.periph);
        root_bus.sha1.corrupt_digest_word(params.corrupt_digest_word);
        if params.stale_completion {
            root_bus.sha1.force_complete();
        }

        let mut bus = BusLogger::new(root_bus);
        bus.log = params.log;

        Ok(Self {
            core: Core::new(bus, clock, params.irq_connected),
        })
    }

    /// Driver for the emulated peripheral
    pub fn sha1(&self) -> WbSha1<ModelMmio> {
        unsafe { WbSha1::new_with_mmio(WB_SHA1_BASE as *mut u32, self.mmio()) }
    }

    /// Completion flag shared by the test flow and the interrupt handler
    pub fn completion(&self) -> &CompletionFlag {
        &self.core.completion
    }

    /// Peripheral state, for inspection
    pub fn periph(&self) -> Ref<'_, WbSha1Periph> {
        Ref::map(self.core.bus.borrow(), |bus| &bus.bus.sha1)
    }

    /// Bus cycles elapsed
    pub fn cycles(&self) -> u64 {
        self.core.clock.now()
    }

    /// Run the test flow as the firmware does: arm the completion flag, run
    /// to a terminal state, and report the result.
    pub fn run(&mut self, params: TestParams) -> Result<RunOutcome, ModelError> {
        if let Some(halt) = self.core.halt() {
            let reason = HaltReason::from_code(halt.code).unwrap_or(HaltReason::Terminated);
            return Err(ModelError::AlreadyHalted(reason));
        }

        self.core.completion.arm();
        let reason = Sha1Test::new(self.sha1(), &self.core.completion, params).run();
        unsafe { FaultReporter::new_with_mmio(WB_SHA1_BASE as *mut u32, self.mmio()) }
            .publish(reason);
        self.core.bus.borrow_mut().flush();

        let (halt, halted_by_interrupt) = match self.core.halt() {
            Some(halt) => (
                HaltReason::from_code(halt.code).unwrap_or(reason),
                halt.in_irq,
            ),
            None => (reason, false),
        };
        println!(
            "[wb-sha1] halted with 0x{:08x}{}",
            halt.code(),
            if halted_by_interrupt {
                " from the interrupt handler"
            } else {
                ""
            }
        );

        let periph = self.periph();
        Ok(RunOutcome {
            halt,
            halted_by_interrupt,
            diagnostic_writes: periph.diagnostic_writes().to_vec(),
            message_words: periph.message_words().to_vec(),
            digest_reads: periph.digest_reads(),
            cycles: self.cycles(),
        })
    }

    fn mmio(&self) -> ModelMmio {
        ModelMmio::new(Rc::clone(&self.core))
    }
}
