/*++

Licensed under the Apache-2.0 license.

File Name:

    wait.rs

Abstract:

    File contains the busy-wait policy used by the test flow.

--*/

/// How long a busy-wait may spin
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WaitPolicy {
    /// Spin until the condition holds, however long that takes
    #[default]
    Unbounded,

    /// Evaluate the condition at most this many times
    Bounded(u32),
}

impl WaitPolicy {
    /// Spin until `predicate` returns true.
    ///
    /// # Returns
    ///
    /// false if the bound ran out first
    pub fn until<F>(self, mut predicate: F) -> bool
    where
        F: FnMut() -> bool,
    {
        match self {
            WaitPolicy::Unbounded => {
                while !predicate() {}
                true
            }
            WaitPolicy::Bounded(limit) => (0..limit).any(|_| predicate()),
        }
    }
}
