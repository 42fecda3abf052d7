/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the WB-SHA1 Emulator Peripheral library.

--*/

mod root_bus;
mod wb_sha1;

pub use root_bus::WbSha1RootBus;
pub use wb_sha1::{Status, WbSha1Args, WbSha1Periph};
