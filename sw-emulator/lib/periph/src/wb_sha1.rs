/*++

Licensed under the Apache-2.0 license.

File Name:

    wb_sha1.rs

Abstract:

    File contains the Wishbone SHA-1 peripheral implementation.

--*/

use smlang::statemachine;
use tock_registers::register_bitfields;
use wb_sha1_emu_bus::{ActionHandle, Bus, BusError, Clock, Timer};
use wb_sha1_emu_crypto::Sha1;
use wb_sha1_emu_types::{RvAddr, RvData, RvSize};

const OFFSET_IDENTITY: RvAddr = 0x00;
const OFFSET_CAPABILITY: RvAddr = 0x04;
const OFFSET_STATUS: RvAddr = 0x08;
const OFFSET_MSG_IN: RvAddr = 0x0C;
const OFFSET_DIGEST: RvAddr = 0x10;
const OFFSET_DIAGNOSTIC: RvAddr = 0x14;

/// Rounds the engine runs per block
const SHA1_ROUNDS: u64 = 80;

/// Value the message window returns on reads (-EINVAL on the 28-bit data path)
const MSG_IN_READ_VAL: RvData = 0x0fff_ffea;

register_bitfields! [
    u32,

    /// Status/Control Register Fields
    pub Status [
        ACTIVE OFFSET(0) NUMBITS(1) [],
        RESET OFFSET(1) NUMBITS(1) [],
        PANIC OFFSET(2) NUMBITS(1) [],
        COMPLETE OFFSET(3) NUMBITS(1) [],
        ROUND OFFSET(4) NUMBITS(8) [],
    ],
];

/// Message word written to the message window
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MessageWord(pub u32);

statemachine! {
    transitions: {
        // CurrentState Event [guard] / action = NextState

        *Idle + Word(MessageWord) / store_word = Loading,
        Idle + Preload = Done,
        Idle + Reset / clear = Idle,

        Loading + Word(MessageWord) / store_word = Loading,
        // The sixteenth word starts the engine.
        Loading + FinalWord(MessageWord) / start_engine = Computing,
        Loading + Reset / clear = Idle,

        Computing + RoundsDone / publish_digest = Done,
        Computing + Reset / clear = Idle,

        Done + Word(MessageWord) / store_word = Loading,
        Done + Reset / clear = Idle
    }
}

/// State machine extended variables.
pub struct Context {
    /// Message block being loaded
    block: [u32; Sha1::BLOCK_WORDS],
    /// Next word to load
    word_idx: usize,
    /// SHA-1 engine
    sha1: Sha1,
    /// Digest visible through the digest window
    digest: [u32; Sha1::HASH_WORDS],
}

impl Context {
    fn new() -> Self {
        Self {
            block: [0; Sha1::BLOCK_WORDS],
            word_idx: 0,
            sha1: Sha1::new(),
            digest: [0; Sha1::HASH_WORDS],
        }
    }
}

impl StateMachineContext for Context {
    fn store_word(&mut self, word: &MessageWord) {
        self.block[self.word_idx] = word.0;
        self.word_idx += 1;
    }

    fn start_engine(&mut self, word: &MessageWord) {
        self.store_word(word);
        self.word_idx = 0;
        self.sha1.reset();
        self.sha1.update_words(&self.block);
    }

    fn publish_digest(&mut self) {
        self.digest = self.sha1.hash();
    }

    fn clear(&mut self) {
        *self = Context::new();
    }
}

/// Construction knobs for [`WbSha1Periph`].
#[derive(Clone, Debug)]
pub struct WbSha1Args {
    /// Value of the identity register
    pub identity: u32,

    /// Value of the capability count register
    pub capability_count: u32,

    /// Bus cycles from the final message word to completion. Zero completes
    /// during the write of the final word.
    pub compute_ticks: u64,

    /// Bus cycles from completion to the interrupt line being asserted
    pub irq_delay_ticks: u64,
}

impl Default for WbSha1Args {
    fn default() -> Self {
        Self {
            identity: WbSha1Periph::IDENTITY_VAL,
            capability_count: WbSha1Periph::CAPABILITY_VAL,
            compute_ticks: 0,
            irq_delay_ticks: 16,
        }
    }
}

/// Wishbone SHA-1 peripheral
pub struct WbSha1Periph {
    identity: u32,

    capability_count: u32,

    /// Engine lifecycle
    state_machine: StateMachine<Context>,

    /// Next digest word the window returns
    digest_idx: usize,

    /// Interrupt line
    irq: bool,

    timer: Timer,

    compute_ticks: u64,

    irq_delay_ticks: u64,

    /// Cycle at which the engine was started
    op_start: u64,

    op_complete_action: Option<ActionHandle>,

    irq_action: Option<ActionHandle>,

    /// Digest word index returned inverted, for fault injection
    corrupt_digest_word: Option<usize>,

    /// Every value written to the diagnostic register
    diagnostic: Vec<RvData>,

    /// Every message word the engine accepted
    received: Vec<RvData>,

    digest_reads: usize,
}

impl WbSha1Periph {
    /// IDENTITY Register Value ("SHA1")
    pub const IDENTITY_VAL: RvData = 0x5348_4131;

    /// CAPABILITY Register Value
    pub const CAPABILITY_VAL: RvData = 4;

    /// Size of the register window in bytes
    pub const MMAP_SIZE: RvAddr = 0x18;

    /// Create a new instance of the peripheral
    pub fn new(clock: &Clock, args: WbSha1Args) -> Self {
        Self {
            identity: args.identity,
            capability_count: args.capability_count,
            state_machine: StateMachine::new(Context::new()),
            digest_idx: 0,
            irq: false,
            timer: Timer::new(clock),
            compute_ticks: args.compute_ticks,
            irq_delay_ticks: args.irq_delay_ticks,
            op_start: 0,
            op_complete_action: None,
            irq_action: None,
            corrupt_digest_word: None,
            diagnostic: Vec::new(),
            received: Vec::new(),
            digest_reads: 0,
        }
    }

    /// Puts the engine in the complete state without running an operation,
    /// as if a previous owner left a finished digest behind.
    ///
    /// The engine must be idle.
    pub fn force_complete(&mut self) {
        let accepted = self.state_machine.process_event(Events::Preload).is_ok();
        debug_assert!(accepted, "force_complete requires an idle engine");
    }

    /// Makes every read of digest word `index` return the inverted word.
    pub fn corrupt_digest_word(&mut self, index: Option<usize>) {
        self.corrupt_digest_word = index;
    }

    /// Returns true while the interrupt line is asserted.
    pub fn irq_asserted(&self) -> bool {
        self.irq
    }

    /// Returns true while the engine is running rounds.
    pub fn is_busy(&self) -> bool {
        matches!(self.state_machine.state(), States::Computing)
    }

    /// Values written to the diagnostic register, oldest first.
    pub fn diagnostic_writes(&self) -> &[RvData] {
        &self.diagnostic
    }

    /// Message words accepted by the engine, oldest first.
    pub fn message_words(&self) -> &[RvData] {
        &self.received
    }

    /// Number of digest window reads.
    pub fn digest_reads(&self) -> usize {
        self.digest_reads
    }

    fn round_index(&self) -> u32 {
        if self.compute_ticks == 0 {
            return 0;
        }
        let elapsed = self.timer.now().saturating_sub(self.op_start);
        (elapsed * SHA1_ROUNDS / self.compute_ticks).min(SHA1_ROUNDS - 1) as u32
    }

    fn status(&self) -> RvData {
        let status = match self.state_machine.state() {
            States::Computing => Status::ACTIVE::SET + Status::ROUND.val(self.round_index()),
            States::Done => Status::COMPLETE::SET,
            _ => Status::ACTIVE::CLEAR,
        };
        status.value
    }

    fn on_write_status(&mut self, val: RvData) {
        if val & Status::RESET::SET.value != 0 {
            self.reset_engine();
        } else if val == 0 {
            // Acknowledge
            self.irq = false;
            if let Some(action) = self.irq_action.take() {
                self.timer.cancel(action);
            }
        }
    }

    fn on_write_message(&mut self, val: RvData) {
        let event = if self.state_machine.context().word_idx == Sha1::BLOCK_WORDS - 1 {
            Events::FinalWord(MessageWord(val))
        } else {
            Events::Word(MessageWord(val))
        };
        // Writes while the engine is busy are dropped.
        if self.state_machine.process_event(event).is_err() {
            return;
        }
        self.received.push(val);

        if self.is_busy() {
            self.digest_idx = 0;
            self.op_start = self.timer.now();
            if self.compute_ticks == 0 {
                self.complete_operation();
            } else {
                self.op_complete_action = Some(self.timer.schedule_poll_in(self.compute_ticks));
            }
        }
    }

    fn read_digest(&mut self) -> RvData {
        let idx = self.digest_idx;
        self.digest_idx = (idx + 1) % Sha1::HASH_WORDS;
        self.digest_reads += 1;

        let word = self.state_machine.context().digest[idx];
        if self.corrupt_digest_word == Some(idx) {
            !word
        } else {
            word
        }
    }

    fn complete_operation(&mut self) {
        let _ = self.state_machine.process_event(Events::RoundsDone);
        if self.irq_delay_ticks == 0 {
            self.irq = true;
        } else {
            self.irq_action = Some(self.timer.schedule_poll_in(self.irq_delay_ticks));
        }
    }

    fn reset_engine(&mut self) {
        let _ = self.state_machine.process_event(Events::Reset);
        if let Some(action) = self.op_complete_action.take() {
            self.timer.cancel(action);
        }
        if let Some(action) = self.irq_action.take() {
            self.timer.cancel(action);
        }
        self.irq = false;
        self.digest_idx = 0;
    }
}

impl Bus for WbSha1Periph {
    fn read(&mut self, size: RvSize, addr: RvAddr) -> Result<RvData, BusError> {
        if size != RvSize::Word {
            Err(BusError::LoadAccessFault)?
        }
        if addr & 0x3 != 0 {
            Err(BusError::LoadAddrMisaligned)?
        }
        match addr {
            OFFSET_IDENTITY => Ok(self.identity),
            OFFSET_CAPABILITY => Ok(self.capability_count),
            OFFSET_STATUS => Ok(self.status()),
            OFFSET_MSG_IN => Ok(MSG_IN_READ_VAL),
            OFFSET_DIGEST => Ok(self.read_digest()),
            _ => Err(BusError::LoadAccessFault),
        }
    }

    fn write(&mut self, size: RvSize, addr: RvAddr, val: RvData) -> Result<(), BusError> {
        if size != RvSize::Word {
            Err(BusError::StoreAccessFault)?
        }
        if addr & 0x3 != 0 {
            Err(BusError::StoreAddrMisaligned)?
        }
        match addr {
            OFFSET_STATUS => self.on_write_status(val),
            OFFSET_MSG_IN => self.on_write_message(val),
            OFFSET_DIAGNOSTIC => self.diagnostic.push(val),
            _ => Err(BusError::StoreAccessFault)?,
        }
        Ok(())
    }

    fn poll(&mut self) {
        if self.timer.fired(&mut self.op_complete_action) {
            self.complete_operation();
        }
        if self.timer.fired(&mut self.irq_action) {
            self.irq = true;
        }
    }
}
