use super::classify::BlockClass;

/// Statistics describing a completed sparse copy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CopySummary {
    block_size: usize,
    bytes_read: u64,
    bytes_written: u64,
    data_blocks: u64,
    hole_blocks: u64,
    length_fixed: bool,
}

impl CopySummary {
    pub(crate) const fn new(block_size: usize) -> Self {
        Self {
            block_size,
            bytes_read: 0,
            bytes_written: 0,
            data_blocks: 0,
            hole_blocks: 0,
            length_fixed: false,
        }
    }

    pub(crate) fn record_block(&mut self, class: BlockClass, len: usize) {
        let len = len as u64;
        self.bytes_read = self.bytes_read.saturating_add(len);
        match class {
            BlockClass::Data => {
                self.data_blocks += 1;
                self.bytes_written = self.bytes_written.saturating_add(len);
            }
            BlockClass::Zero => self.hole_blocks += 1,
        }
    }

    pub(crate) fn mark_length_fixed(&mut self) {
        self.length_fixed = true;
    }

    /// Block size used for reading and classification.
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Total bytes read from the source; equals the destination length.
    #[must_use]
    pub const fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Bytes physically written to the destination.
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Bytes skipped as holes.
    #[must_use]
    pub const fn hole_bytes(&self) -> u64 {
        self.bytes_read - self.bytes_written
    }

    /// Number of blocks that contained data.
    #[must_use]
    pub const fn data_blocks(&self) -> u64 {
        self.data_blocks
    }

    /// Number of all-zero blocks skipped.
    #[must_use]
    pub const fn hole_blocks(&self) -> u64 {
        self.hole_blocks
    }

    /// Whether the destination length had to be set explicitly because the
    /// source ended in a zero block.
    #[must_use]
    pub const fn length_fixed(&self) -> bool {
        self.length_fixed
    }
}
