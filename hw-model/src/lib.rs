// Licensed under the Apache-2.0 license

//! Host model of the management core and the WB-SHA1 peripheral, used to run
//! the test flow and the completion interrupt handler without hardware.

use std::fmt::{self, Display};
use std::io::Write;

use wb_sha1_drivers::HaltReason;
use wb_sha1_emu_periph::WbSha1Args;

mod bus_logger;
mod mmio;
mod model_emulated;

pub use bus_logger::{BusLogger, LogFile};
pub use mmio::ModelMmio;
pub use model_emulated::ModelEmulated;

pub struct InitParams {
    /// Emulated peripheral configuration
    pub periph: WbSha1Args,

    /// Whether the peripheral's interrupt line reaches the core
    pub irq_connected: bool,

    /// Start with the complete bit already set
    pub stale_completion: bool,

    /// Invert this digest word on every read
    pub corrupt_digest_word: Option<usize>,

    /// Where to write the bus trace
    pub log: Option<Box<dyn Write>>,
}

impl Default for InitParams {
    fn default() -> Self {
        Self {
            periph: WbSha1Args::default(),
            irq_connected: true,
            stale_completion: false,
            corrupt_digest_word: None,
            log: None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ModelError {
    /// The digest has five words
    InvalidDigestWord(usize),

    /// The core is parked in the fault reporter
    AlreadyHalted(HaltReason),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidDigestWord(idx) => {
                write!(f, "digest word index {idx} out of range")
            }
            ModelError::AlreadyHalted(reason) => {
                write!(f, "core already halted with code 0x{:08x}", reason.code())
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// Result of one run of the test flow.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunOutcome {
    /// First reason the core reported
    pub halt: HaltReason,

    /// Whether the report came from the interrupt handler
    pub halted_by_interrupt: bool,

    /// Values that reached the diagnostic register
    pub diagnostic_writes: Vec<u32>,

    /// Message words the peripheral accepted
    pub message_words: Vec<u32>,

    pub digest_reads: usize,

    /// Bus cycles elapsed
    pub cycles: u64,
}

impl RunOutcome {
    pub fn passed(&self) -> bool {
        self.halt == HaltReason::Terminated
    }
}
