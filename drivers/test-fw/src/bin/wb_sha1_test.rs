/*++

Licensed under the Apache-2.0 license.

File Name:

    wb_sha1_test.rs

Abstract:

    File contains the WB-SHA1 validation firmware. Success leaves 0x0bad_f00d
    in the diagnostic register; any other value names the failed check.

--*/
#![no_std]
#![no_main]

wb_sha1_test_harness::firmware_entry! {}
