/// Configuration accepted by [`SparseCopier`](super::SparseCopier).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CopyOptions {
    block_size: Option<i64>,
    truncate: bool,
}

impl CopyOptions {
    /// Creates the default option set: probed block size, no truncation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            block_size: None,
            truncate: false,
        }
    }

    /// Overrides the probed block size.
    ///
    /// `None` restores probing. Values that are not positive are rejected
    /// when the copy starts.
    #[must_use]
    pub const fn block_size(mut self, block_size: Option<i64>) -> Self {
        self.block_size = block_size;
        self
    }

    /// Requests that an existing destination be truncated when opened.
    #[must_use]
    pub const fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Returns the block size override, if any.
    #[must_use]
    pub const fn block_size_override(&self) -> Option<i64> {
        self.block_size
    }

    /// Reports whether the destination is truncated on open.
    #[must_use]
    pub const fn truncates(&self) -> bool {
        self.truncate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_probe_and_preserve_existing_destination() {
        let options = CopyOptions::default();
        assert_eq!(options, CopyOptions::new());
        assert_eq!(options.block_size_override(), None);
        assert!(!options.truncates());
    }

    #[test]
    fn builder_methods_compose() {
        let options = CopyOptions::new().block_size(Some(512)).truncate(true);
        assert_eq!(options.block_size_override(), Some(512));
        assert!(options.truncates());
        assert_eq!(options.block_size(None).block_size_override(), None);
    }
}
