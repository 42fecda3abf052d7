/*++

Licensed under the Apache-2.0 license.

File Name:

    params.rs

Abstract:

    File contains the expected values and wait limits used by the test flow.

--*/

use wb_sha1_drivers::WaitPolicy;

/// Expected identity register value ("SHA1")
pub const EXPECTED_IDENTITY: u32 = 0x5348_4131;

/// Expected capability count
pub const EXPECTED_CAPABILITY_COUNT: u32 = 4;

/// "abc", padded to one block with its 24-bit length
#[rustfmt::skip]
pub const MESSAGE_BLOCK: [u32; 16] = [
    0x61626380, 0x00000000, 0x00000000, 0x00000000,
    0x00000000, 0x00000000, 0x00000000, 0x00000000,
    0x00000000, 0x00000000, 0x00000000, 0x00000000,
    0x00000000, 0x00000000, 0x00000000, 0x00000018,
];

/// SHA-1("abc")
pub const EXPECTED_DIGEST: [u32; 5] = [0xa9993e36, 0x4706816a, 0xba3e2571, 0x7850c26c, 0x9cd0d89d];

/// Test flow parameters
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TestParams {
    pub identity: u32,
    pub capability_count: u32,
    pub message: [u32; 16],
    pub digest: [u32; 5],

    /// Limit on the completion poll
    pub poll: WaitPolicy,

    /// Limit on the wait for the completion interrupt
    pub irq_wait: WaitPolicy,
}

impl Default for TestParams {
    fn default() -> Self {
        Self {
            identity: EXPECTED_IDENTITY,
            capability_count: EXPECTED_CAPABILITY_COUNT,
            message: MESSAGE_BLOCK,
            digest: EXPECTED_DIGEST,
            poll: WaitPolicy::Unbounded,
            irq_wait: WaitPolicy::Unbounded,
        }
    }
}
