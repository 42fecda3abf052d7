/*++

Licensed under the Apache-2.0 license.

File Name:

    mod.rs

Abstract:

    File contains register definitions for the WB-SHA1 peripheral

--*/

pub(crate) mod wb_sha1_regs;
