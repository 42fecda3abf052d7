/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the error type and codes reported by the WB-SHA1 harness.

--*/
#![cfg_attr(not(any(test, feature = "std")), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// Value written to the diagnostic register when a run ends normally.
///
/// Never used as a `HarnessError` code.
pub const END_OF_RUN_SENTINEL: u32 = 0x0bad_f00d;

/// Harness Error Type
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HarnessError(pub NonZeroU32);

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: HarnessError = HarnessError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl HarnessError {
    /// Create a harness error; only meant for const contexts, since a zero
    /// value panics. Runtime conversions go through `HarnessError::try_from()`.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("HarnessError cannot be 0"),
        }
    }

    define_error_constants![
        (
            IDENTITY_MISMATCH,
            0x0001_0001,
            "Identity register does not hold the expected value"
        ),
        (
            CAPABILITY_MISMATCH,
            0x0001_0002,
            "Capability count register does not hold the expected value"
        ),
        (
            ENGINE_NOT_IDLE,
            0x0001_0003,
            "Complete bit already set before the message feed"
        ),
        (
            ENGINE_NOT_COMPLETE,
            0x0001_0004,
            "Complete bit not set after the final message word"
        ),
        (DIGEST_WORD_0, 0x0001_0010, "Digest word 0 mismatch"),
        (DIGEST_WORD_1, 0x0001_0011, "Digest word 1 mismatch"),
        (DIGEST_WORD_2, 0x0001_0012, "Digest word 2 mismatch"),
        (DIGEST_WORD_3, 0x0001_0013, "Digest word 3 mismatch"),
        (DIGEST_WORD_4, 0x0001_0014, "Digest word 4 mismatch"),
        (
            POLL_TIMEOUT,
            0x0002_0001,
            "Completion poll ran out of iterations"
        ),
        (
            IRQ_TIMEOUT,
            0x0002_0002,
            "Completion interrupt did not arrive within the wait bound"
        ),
        (FW_PANIC, 0x0003_0001, "Firmware panicked"),
        (
            FW_UNEXPECTED_TRAP,
            0x0003_0002,
            "Firmware took a trap that was not an interrupt"
        ),
    ];

    /// Code reported for a mismatch of the digest word at `index`.
    pub const fn digest_word(index: usize) -> Self {
        match index {
            0 => Self::DIGEST_WORD_0,
            1 => Self::DIGEST_WORD_1,
            2 => Self::DIGEST_WORD_2,
            3 => Self::DIGEST_WORD_3,
            _ => Self::DIGEST_WORD_4,
        }
    }
}

impl From<core::num::NonZeroU32> for crate::HarnessError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::HarnessError(val)
    }
}

impl From<HarnessError> for core::num::NonZeroU32 {
    fn from(val: HarnessError) -> Self {
        val.0
    }
}

impl From<HarnessError> for u32 {
    fn from(val: HarnessError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for HarnessError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(HarnessError(val)),
            Err(err) => Err(err),
        }
    }
}

impl core::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "harness error 0x{:08x}", self.0.get())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HarnessError {}

pub type HarnessResult<T> = Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_try_from() {
        assert!(HarnessError::try_from(0).is_err());
        assert_eq!(
            Ok(HarnessError::ENGINE_NOT_IDLE),
            HarnessError::try_from(0x0001_0003)
        );
    }

    #[test]
    fn test_error_constants_uniqueness() {
        let constants = HarnessError::all_constants();
        let mut error_values = HashSet::new();
        let mut duplicates = Vec::new();

        for (name, value) in constants {
            if !error_values.insert(value) {
                duplicates.push((name, value));
            }
        }

        assert!(
            duplicates.is_empty(),
            "Found duplicate error codes: {:?}",
            duplicates
        );
    }

    #[test]
    fn test_sentinel_is_not_an_error_code() {
        assert!(HarnessError::all_constants()
            .iter()
            .all(|(_, value)| *value != END_OF_RUN_SENTINEL));
    }

    #[test]
    fn test_digest_word() {
        assert_eq!(HarnessError::digest_word(0), HarnessError::DIGEST_WORD_0);
        assert_eq!(HarnessError::digest_word(3), HarnessError::DIGEST_WORD_3);
        assert_eq!(HarnessError::digest_word(4), HarnessError::DIGEST_WORD_4);
        assert_eq!(u32::from(HarnessError::digest_word(2)), 0x0001_0012);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            HarnessError::IDENTITY_MISMATCH.to_string(),
            "harness error 0x00010001"
        );
    }
}
