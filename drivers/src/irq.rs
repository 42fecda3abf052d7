/*++

Licensed under the Apache-2.0 license.

File Name:

    irq.rs

Abstract:

    File contains the completion interrupt handler.

--*/

use crate::{CompletionFlag, HaltReason, Mmio, WbSha1};

/// Handle the completion interrupt
///
/// Clears the completion flag before acknowledging the peripheral. The
/// caller reports the returned reason and never resumes the interrupted flow.
pub fn handle_completion_irq<TMmio: Mmio>(
    sha1: &mut WbSha1<TMmio>,
    completion: &CompletionFlag,
) -> HaltReason {
    completion.clear();
    sha1.acknowledge();
    HaltReason::Terminated
}
