/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the WB-SHA1 Emulator Types library.

--*/

/// Wishbone data width
pub type RvData = u32;

/// Wishbone address width
pub type RvAddr = u32;

/// Bus access size
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum RvSize {
    Byte = 1,
    HalfWord = 2,
    Word = 4,
    Invalid,
}

impl From<RvSize> for usize {
    fn from(val: RvSize) -> usize {
        match val {
            RvSize::Byte => 1,
            RvSize::HalfWord => 2,
            RvSize::Word => 4,
            RvSize::Invalid => panic!("RvSize::Invalid has no width"),
        }
    }
}

impl From<usize> for RvSize {
    fn from(val: usize) -> RvSize {
        match val {
            1 => RvSize::Byte,
            2 => RvSize::HalfWord,
            4 => RvSize::Word,
            _ => RvSize::Invalid,
        }
    }
}

impl std::fmt::Display for RvSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RvSize::Byte => write!(f, "Byte"),
            RvSize::HalfWord => write!(f, "HalfWord"),
            RvSize::Word => write!(f, "Word"),
            RvSize::Invalid => write!(f, "Invalid"),
        }
    }
}
