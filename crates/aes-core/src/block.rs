//! Block representation helpers.

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// AES block of 16 bytes.
pub type Block = [u8; BLOCK_SIZE];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}

/// Returns true when `len` is a whole number of blocks.
#[inline]
pub fn is_block_aligned(len: usize) -> bool {
    len % BLOCK_SIZE == 0
}

/// Iterates over a block-aligned buffer as owned blocks.
///
/// Trailing bytes that do not fill a block are not yielded; callers check
/// alignment first.
pub(crate) fn blocks(data: &[u8]) -> impl Iterator<Item = Block> + '_ {
    debug_assert!(is_block_aligned(data.len()));
    data.chunks_exact(BLOCK_SIZE).map(|chunk| {
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);
        block
    })
}
