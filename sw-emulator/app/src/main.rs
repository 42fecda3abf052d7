/*++

Licensed under the Apache-2.0 license.

File Name:

    main.rs

Abstract:

    File contains main entrypoint for the WB-SHA1 emulator. It runs the test
    flow against the emulated peripheral and exits with the diagnostic
    outcome.

--*/

use clap::{arg, value_parser};
use std::io;
use std::path::PathBuf;
use std::process::exit;
use wb_sha1_drivers::{HaltReason, WaitPolicy};
use wb_sha1_emu_periph::WbSha1Args;
use wb_sha1_hw_model::{InitParams, LogFile, ModelEmulated, ModelError, RunOutcome};
use wb_sha1_test_harness::TestParams;

/// Run ended with the termination sentinel
const EXIT_PASS: i32 = 0;

/// Run ended with a fault code
const EXIT_FAULT: i32 = 1;

/// The model rejected its configuration and nothing ran
const EXIT_MODEL_ERROR: i32 = 2;

fn run(init: InitParams, params: TestParams) -> Result<RunOutcome, ModelError> {
    ModelEmulated::new(init)?.run(params)
}

fn exit_status(result: &Result<RunOutcome, ModelError>) -> i32 {
    match result {
        Ok(outcome) if outcome.passed() => EXIT_PASS,
        Ok(_) => EXIT_FAULT,
        Err(_) => EXIT_MODEL_ERROR,
    }
}

fn wait_policy(limit: Option<&u32>) -> WaitPolicy {
    match limit {
        Some(limit) => WaitPolicy::Bounded(*limit),
        None => WaitPolicy::Unbounded,
    }
}

fn report(outcome: &RunOutcome) {
    match outcome.halt {
        HaltReason::Terminated => println!("[wb-sha1] PASS"),
        HaltReason::Fault(err) => println!("[wb-sha1] FAIL: {err}"),
    }
    println!(
        "[wb-sha1] diagnostic 0x{:08x}{}",
        outcome.halt.code(),
        if outcome.halted_by_interrupt {
            " (from interrupt handler)"
        } else {
            ""
        }
    );
    println!(
        "[wb-sha1] {} message words, {} digest reads, {} cycles",
        outcome.message_words.len(),
        outcome.digest_reads,
        outcome.cycles
    );
}

fn main() -> io::Result<()> {
    let args = clap::Command::new("wb-sha1-emu")
        .about("WB-SHA1 emulator. Exits 0 on pass, 1 on a fault, 2 on a bad configuration")
        .arg(
            arg!(--"compute-ticks" <CYCLES> "Cycles from the final message word to completion")
                .required(false)
                .value_parser(value_parser!(u64)),
        )
        .arg(
            arg!(--"irq-delay" <CYCLES> "Cycles from completion to the interrupt")
                .required(false)
                .value_parser(value_parser!(u64)),
        )
        .arg(arg!(--"no-irq" "Leave the interrupt line disconnected"))
        .arg(arg!(--"stale-completion" "Start with the complete bit already set"))
        .arg(
            arg!(--"corrupt-digest-word" <INDEX> "Invert one digest word on read")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--"poll-limit" <COUNT> "Bound on completion status polls")
                .required(false)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"irq-limit" <COUNT> "Bound on interrupt wait iterations")
                .required(false)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--trace <FILE> "Bus trace file")
                .required(false)
                .value_parser(value_parser!(PathBuf)),
        )
        .get_matches();

    let mut periph = WbSha1Args::default();
    if let Some(ticks) = args.get_one::<u64>("compute-ticks") {
        periph.compute_ticks = *ticks;
    }
    if let Some(ticks) = args.get_one::<u64>("irq-delay") {
        periph.irq_delay_ticks = *ticks;
    }

    let log = match args.get_one::<PathBuf>("trace") {
        Some(path) => Some(Box::new(LogFile::open(path)?) as Box<dyn io::Write>),
        None => None,
    };

    let init = InitParams {
        periph,
        irq_connected: !args.contains_id("no-irq"),
        stale_completion: args.contains_id("stale-completion"),
        corrupt_digest_word: args.get_one::<usize>("corrupt-digest-word").copied(),
        log,
    };
    let params = TestParams {
        poll: wait_policy(args.get_one::<u32>("poll-limit")),
        irq_wait: wait_policy(args.get_one::<u32>("irq-limit")),
        ..Default::default()
    };

    let result = run(init, params);
    match &result {
        Ok(outcome) => report(outcome),
        Err(e) => println!("{e}"),
    }
    exit(exit_status(&result));
}
