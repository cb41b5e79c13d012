/// Outcome of scanning one block of source data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BlockClass {
    /// Every byte in the block is zero; the destination receives a hole.
    Zero,
    /// At least one byte is non-zero; the block is written verbatim.
    Data,
}

impl BlockClass {
    /// Returns `true` for [`BlockClass::Zero`].
    #[must_use]
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Zero)
    }
}

const WORD: usize = size_of::<u64>();

/// Classifies `block` as [`BlockClass::Zero`] or [`BlockClass::Data`].
///
/// The scan compares eight bytes at a time and stops at the first non-zero
/// word. An empty slice is classified as zero.
#[must_use]
pub fn classify_block(block: &[u8]) -> BlockClass {
    let mut words = block.chunks_exact(WORD);
    let mut has_data = words.by_ref().any(|word| word != [0u8; WORD]);
    if !has_data {
        has_data = words.remainder().iter().any(|&byte| byte != 0);
    }

    if has_data {
        BlockClass::Data
    } else {
        BlockClass::Zero
    }
}
