/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the WB-SHA1 Emulator Crypto library.

--*/

mod sha1;

pub use crate::sha1::Sha1;
