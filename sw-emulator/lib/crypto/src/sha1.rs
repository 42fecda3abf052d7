/*++

Licensed under the Apache-2.0 license.

File Name:

    sha1.rs

Abstract:

    File contains implementation of the Secure Hash Algorithm 1 (SHA-1) block
    engine.

--*/

/// SHA-1 block engine
///
/// Works on already padded 512-bit blocks, as the hardware engine does.
pub struct Sha1 {
    /// Hash
    hash: [u32; 5],
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha1 {
    /// SHA-1 Block Size in bytes
    pub const BLOCK_SIZE: usize = 64;

    /// SHA-1 Block Size in words
    pub const BLOCK_WORDS: usize = 16;

    /// SHA-1 Hash Size in words
    pub const HASH_WORDS: usize = 5;

    /// SHA-1 Initial Hash Vector
    const HASH_IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

    /// Create a new instance of the engine
    pub fn new() -> Self {
        Self {
            hash: Self::HASH_IV,
        }
    }

    /// Reset the state
    pub fn reset(&mut self) {
        self.hash = Self::HASH_IV;
    }

    /// Update the hash
    ///
    /// # Arguments
    ///
    /// * `block` - Block to compress
    pub fn update(&mut self, block: &[u8; Self::BLOCK_SIZE]) {
        ::sha1::compress(&mut self.hash, &[(*block).into()]);
    }

    /// Update the hash with a block given as big-endian words
    ///
    /// # Arguments
    ///
    /// * `words` - Block to compress
    pub fn update_words(&mut self, words: &[u32; Self::BLOCK_WORDS]) {
        let mut block = [0u8; Self::BLOCK_SIZE];
        block
            .chunks_exact_mut(4)
            .zip(words)
            .for_each(|(dest, word)| dest.copy_from_slice(&word.to_be_bytes()));
        self.update(&block);
    }

    /// Retrieve the hash as words
    pub fn hash(&self) -> [u32; Self::HASH_WORDS] {
        self.hash
    }
}
