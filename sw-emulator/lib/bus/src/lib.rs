/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the WB-SHA1 Emulator Bus library.

--*/
mod bus;
mod clock;
pub mod testing;

pub use crate::bus::{Bus, BusError};
pub use crate::clock::{ActionHandle, Clock, Timer};
