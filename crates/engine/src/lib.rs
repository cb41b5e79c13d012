#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` implements the block-scan sparse copy used by the `sparse-cp`
//! binary. A source file is read in chunks sized from its preferred I/O block
//! size; chunks that consist entirely of zero bytes are skipped in the
//! destination by advancing the file position instead of writing, so the
//! destination ends up with holes wherever the source had zero blocks.
//!
//! # Design
//!
//! [`SparseCopier`] owns the copy loop. It consults a [`BlockSizeProbe`] for
//! the chunk size (the default [`StatBlockSize`] reads `st_blksize` from the
//! already-open source handle), allocates the block buffer, then opens
//! the destination through the creation policy in
//! [`sparse_copy::open_destination`], and drives the loop over any
//! [`Read`](std::io::Read) source and [`SparseSink`] destination.
//!
//! # Invariants
//!
//! - The destination's logical length equals the number of bytes read from
//!   the source once a copy succeeds, including when the source ends in a
//!   zero block.
//! - Classification boundaries are aligned to the block size; a short block
//!   is only ever produced at end of file.
//! - Block sizes outside `1..=`[`sparse_copy::MAX_BLOCK_SIZE`], or whose
//!   buffer cannot be allocated, are rejected before the destination is
//!   opened.
//! - Both file handles are released on every exit path.
//!
//! # Errors
//!
//! Failures surface as [`SparseCopyError`] values whose
//! [`kind`](SparseCopyError::kind) identifies the failing step together with
//! the path involved. No error is retried.
//!
//! # Examples
//!
//! ```no_run
//! use engine::{CopyOptions, SparseCopier};
//!
//! let summary = SparseCopier::new(CopyOptions::default())
//!     .copy("disk.img", "disk-copy.img")?;
//! println!("{} bytes, {} in holes", summary.bytes_read(), summary.hole_bytes());
//! # Ok::<(), engine::SparseCopyError>(())
//! ```

pub mod hole_file;
pub mod sparse_copy;

pub use sparse_copy::{
    BlockClass, BlockSizeProbe, CopyOptions, CopySummary, FixedBlockSize, SparseCopier,
    SparseCopyError, SparseCopyErrorKind, SparseSink, StatBlockSize, classify_block, copy_blocks,
};
