/*++

Licensed under the Apache-2.0 license.

File Name:

    completion.rs

Abstract:

    File contains the completion flag shared by the test flow and the
    completion interrupt handler.

--*/

use core::sync::atomic::{AtomicBool, Ordering};

/// Completion flag
///
/// Set once when the run starts and cleared by the interrupt handler. Only
/// whole-word loads and stores are used, never a read-modify-write, so the
/// flag works on cores without atomic instructions.
pub struct CompletionFlag(AtomicBool);

impl CompletionFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Mark a completion as outstanding
    pub fn arm(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Mark the outstanding completion as delivered
    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Returns true until the interrupt handler has run
    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for CompletionFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_clear() {
        let flag = CompletionFlag::new();
        assert!(!flag.is_pending());
        flag.arm();
        assert!(flag.is_pending());
        flag.clear();
        assert!(!flag.is_pending());
    }

    #[test]
    fn test_static_flag() {
        static FLAG: CompletionFlag = CompletionFlag::new();
        FLAG.arm();
        assert!(FLAG.is_pending());
        FLAG.clear();
        assert!(!FLAG.is_pending());
    }
}
