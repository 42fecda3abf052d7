// Licensed under the Apache-2.0 license

use rand::Rng;
use sha1::{Digest, Sha1};
use wb_sha1_drivers::{HaltReason, Status, WaitPolicy};
use wb_sha1_emu_bus::testing::Log;
use wb_sha1_emu_periph::WbSha1Args;
use wb_sha1_error::HarnessError;
use wb_sha1_hw_model::{InitParams, ModelEmulated, ModelError, RunOutcome};
use wb_sha1_test_harness::{TestParams, EXPECTED_DIGEST, MESSAGE_BLOCK};

const SHA1_IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

fn run(init: InitParams, params: TestParams) -> RunOutcome {
    let mut model = ModelEmulated::new(init).unwrap();
    model.run(params).unwrap()
}

fn fault(err: HarnessError) -> HaltReason {
    HaltReason::Fault(err)
}

#[test]
fn test_pass() {
    let outcome = run(InitParams::default(), TestParams::default());
    assert!(outcome.passed());
    assert!(outcome.halted_by_interrupt);
    assert_eq!(outcome.diagnostic_writes.first(), Some(&0x0bad_f00d));
    assert_eq!(outcome.message_words, MESSAGE_BLOCK);
    assert_eq!(outcome.digest_reads, 5);
}

#[test]
fn test_identity_mismatch() {
    let init = InitParams {
        periph: WbSha1Args {
            identity: 0x5348_4132,
            ..Default::default()
        },
        ..Default::default()
    };
    let outcome = run(init, TestParams::default());
    assert_eq!(outcome.halt, fault(HarnessError::IDENTITY_MISMATCH));
    assert!(!outcome.halted_by_interrupt);
    assert_eq!(outcome.diagnostic_writes, [0x0001_0001]);
    assert!(outcome.message_words.is_empty());
}

#[test]
fn test_capability_mismatch() {
    let init = InitParams {
        periph: WbSha1Args {
            capability_count: 3,
            ..Default::default()
        },
        ..Default::default()
    };
    let outcome = run(init, TestParams::default());
    assert_eq!(outcome.halt, fault(HarnessError::CAPABILITY_MISMATCH));
    assert!(outcome.message_words.is_empty());
}

#[test]
fn test_stale_completion() {
    let init = InitParams {
        stale_completion: true,
        ..Default::default()
    };
    let outcome = run(init, TestParams::default());
    assert_eq!(outcome.halt, fault(HarnessError::ENGINE_NOT_IDLE));
    assert!(outcome.message_words.is_empty());
}

#[test]
fn test_compute_latency_not_complete() {
    let init = InitParams {
        periph: WbSha1Args {
            compute_ticks: 100,
            ..Default::default()
        },
        ..Default::default()
    };
    let outcome = run(init, TestParams::default());
    assert_eq!(outcome.halt, fault(HarnessError::ENGINE_NOT_COMPLETE));
    assert_eq!(outcome.message_words.len(), 16);
    assert_eq!(outcome.digest_reads, 0);
}

#[test]
fn test_corrupt_digest_word() {
    let init = InitParams {
        corrupt_digest_word: Some(2),
        ..Default::default()
    };
    let outcome = run(init, TestParams::default());
    assert_eq!(outcome.halt, fault(HarnessError::DIGEST_WORD_2));
    assert!(!outcome.halted_by_interrupt);
    assert_eq!(outcome.digest_reads, 3);
}

#[test]
fn test_invalid_digest_word() {
    let init = InitParams {
        corrupt_digest_word: Some(5),
        ..Default::default()
    };
    assert_eq!(
        ModelEmulated::new(init).err(),
        Some(ModelError::InvalidDigestWord(5))
    );
}

#[test]
fn test_irq_disconnected() {
    let init = InitParams {
        irq_connected: false,
        ..Default::default()
    };
    let params = TestParams {
        irq_wait: WaitPolicy::Bounded(1000),
        ..Default::default()
    };
    let mut model = ModelEmulated::new(init).unwrap();
    let outcome = model.run(params).unwrap();
    assert_eq!(outcome.halt, fault(HarnessError::IRQ_TIMEOUT));
    assert!(model.completion().is_pending());
    assert!(model.periph().irq_asserted());
}

#[test]
fn test_irq_preempts_flow() {
    let init = InitParams {
        periph: WbSha1Args {
            irq_delay_ticks: 0,
            ..Default::default()
        },
        ..Default::default()
    };
    let outcome = run(init, TestParams::default());
    assert!(outcome.passed());
    assert!(outcome.halted_by_interrupt);
    assert_eq!(outcome.digest_reads, 0);
    assert_eq!(outcome.diagnostic_writes, [0x0bad_f00d]);
}

#[test]
fn test_run_after_halt() {
    let mut model = ModelEmulated::new(InitParams::default()).unwrap();
    assert!(model.run(TestParams::default()).unwrap().passed());
    assert_eq!(
        model.run(TestParams::default()),
        Err(ModelError::AlreadyHalted(HaltReason::Terminated))
    );
}

#[test]
fn test_bus_trace() {
    let log = Log::new();
    let init = InitParams {
        log: Some(Box::new(log.clone())),
        ..Default::default()
    };
    run(init, TestParams::default());

    let trace = log.take();
    assert!(trace.starts_with("UC  read4 *0x30000024 -> 0x53484131\n"));
    assert!(trace.contains("UC  read4 *0x30000028 -> 0x4\n"));
    assert!(trace.contains("UC write4 *0x30000030 <- 0x61626380\n"));
    assert!(trace.contains("UC irq\n"));
    assert!(trace.ends_with("UC write4 *0x30000038 <- 0xbadf00d\n"));
}

#[test]
fn test_random_message() {
    let mut rng = rand::thread_rng();
    let mut message = [0u32; 16];
    rng.fill(&mut message[..]);

    let mut block = [0u8; 64];
    for (chunk, word) in block.chunks_exact_mut(4).zip(message) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    let mut digest = SHA1_IV;
    sha1::compress(&mut digest, &[block.into()]);

    let outcome = run(
        InitParams::default(),
        TestParams {
            message,
            digest,
            ..Default::default()
        },
    );
    assert!(outcome.passed());
    assert_eq!(outcome.message_words, message);
}

#[test]
fn test_status_read_is_stable() {
    let model = ModelEmulated::new(InitParams::default()).unwrap();
    let sha1 = model.sha1();
    let first = sha1.read_status();
    let second = sha1.read_status();
    assert_eq!(first.get(), second.get());
    assert!(!first.is_set(Status::ACTIVE));
    assert!(!first.is_set(Status::COMPLETE));
    assert_eq!(model.cycles(), 2);
}

#[test]
fn test_expected_digest_matches_reference() {
    let reference = Sha1::digest(b"abc");
    let words: Vec<u32> = reference
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    assert_eq!(words, EXPECTED_DIGEST);
}
