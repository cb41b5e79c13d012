use std::fs::File;
use std::io::{self, Read, SeekFrom};
use std::path::Path;

use tracing::{debug, trace};

use super::block_size::{BlockSizeProbe, MAX_BLOCK_SIZE, StatBlockSize};
use super::classify::{BlockClass, classify_block};
use super::destination::open_destination;
use super::error::SparseCopyError;
use super::options::CopyOptions;
use super::sink::SparseSink;
use super::summary::CopySummary;

/// Copies regular files block by block, turning all-zero blocks into holes.
#[derive(Clone, Debug, Default)]
pub struct SparseCopier<P = StatBlockSize> {
    options: CopyOptions,
    probe: P,
}

impl SparseCopier {
    /// Creates a copier that probes block sizes with `fstat(2)`.
    #[must_use]
    pub const fn new(options: CopyOptions) -> Self {
        Self {
            options,
            probe: StatBlockSize,
        }
    }
}

impl<P: BlockSizeProbe> SparseCopier<P> {
    /// Creates a copier that asks `probe` for the source block size.
    #[must_use]
    pub const fn with_probe(options: CopyOptions, probe: P) -> Self {
        Self { options, probe }
    }

    /// Copies `source` to `destination`, preserving zero blocks as holes.
    ///
    /// The source is opened first, then the block size is resolved and its
    /// buffer allocated, then the destination is opened; a failure at any of
    /// these steps returns before the next one runs. On success the
    /// destination's length equals the number of bytes read from the source.
    pub fn copy(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<CopySummary, SparseCopyError> {
        let source = source.as_ref();
        let destination = destination.as_ref();

        let mut reader = open_source(source)?;
        let mut buffer = self.resolve_block_buffer(&reader, source)?;
        let mut writer = open_destination(destination, self.options.truncates())
            .map_err(|error| SparseCopyError::destination_open(destination, error))?;

        debug!(
            target: "sparse_cp::copy",
            source = %source.display(),
            destination = %destination.display(),
            block_size = buffer.len(),
            "starting sparse copy"
        );

        let summary = scan_blocks(&mut reader, &mut writer, &mut buffer, source, destination)?;

        debug!(
            target: "sparse_cp::copy",
            bytes = summary.bytes_read(),
            written = summary.bytes_written(),
            holes = summary.hole_blocks(),
            "sparse copy finished"
        );
        Ok(summary)
    }

    fn resolve_block_buffer(
        &self,
        file: &File,
        source: &Path,
    ) -> Result<Vec<u8>, SparseCopyError> {
        let reported = match self.options.block_size_override() {
            Some(size) => size,
            None => self
                .probe
                .block_size_of(file)
                .map_err(|error| SparseCopyError::stat(source, error))?,
        };

        if reported <= 0 || reported > MAX_BLOCK_SIZE {
            return Err(SparseCopyError::invalid_block_size(source, reported));
        }
        usize::try_from(reported)
            .ok()
            .and_then(allocate_block)
            .ok_or_else(|| SparseCopyError::invalid_block_size(source, reported))
    }
}

fn allocate_block(block_size: usize) -> Option<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(block_size).ok()?;
    buffer.resize(block_size, 0);
    Some(buffer)
}

fn open_source(path: &Path) -> Result<File, SparseCopyError> {
    let file = File::open(path).map_err(|error| SparseCopyError::source_open(path, error))?;
    let metadata = file
        .metadata()
        .map_err(|error| SparseCopyError::stat(path, error))?;
    if !metadata.is_file() {
        return Err(SparseCopyError::source_open(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    Ok(file)
}

/// Runs the block-scan loop from `reader` into `sink`.
///
/// Each iteration fills a `block_size` buffer (short only at end of input),
/// writes it if it contains any non-zero byte, or seeks past it otherwise.
/// When the final block was a hole the sink's length is set explicitly so
/// the destination is as long as the input. `source` and `destination` are
/// only used to label errors; a `block_size` that is zero or cannot be
/// allocated is reported as an invalid block size.
pub fn copy_blocks<R, S>(
    reader: &mut R,
    sink: &mut S,
    block_size: usize,
    source: &Path,
    destination: &Path,
) -> Result<CopySummary, SparseCopyError>
where
    R: Read + ?Sized,
    S: SparseSink + ?Sized,
{
    let reported = i64::try_from(block_size).unwrap_or(i64::MAX);
    let mut buffer = Some(block_size)
        .filter(|&size| size > 0)
        .and_then(allocate_block)
        .ok_or_else(|| SparseCopyError::invalid_block_size(source, reported))?;
    scan_blocks(reader, sink, &mut buffer, source, destination)
}

fn scan_blocks<R, S>(
    reader: &mut R,
    sink: &mut S,
    buffer: &mut [u8],
    source: &Path,
    destination: &Path,
) -> Result<CopySummary, SparseCopyError>
where
    R: Read + ?Sized,
    S: SparseSink + ?Sized,
{
    let mut summary = CopySummary::new(buffer.len());
    let mut cursor = 0u64;
    let mut trailing_hole = false;

    loop {
        let filled = fill_block(reader, buffer)
            .map_err(|error| SparseCopyError::read(source, cursor, error))?;
        if filled == 0 {
            break;
        }

        let block = &buffer[..filled];
        let class = classify_block(block);
        let next = cursor + filled as u64;
        match class {
            BlockClass::Data => write_block(sink, block, destination, cursor)?,
            BlockClass::Zero => skip_block(sink, next, destination)?,
        }
        trace!(
            target: "sparse_cp::hole",
            offset = cursor,
            len = filled,
            ?class,
            "block"
        );

        summary.record_block(class, filled);
        trailing_hole = class.is_zero();
        cursor = next;
    }

    if trailing_hole {
        sink.set_len(cursor)
            .map_err(|error| SparseCopyError::length_set(destination, cursor, error))?;
        summary.mark_length_fixed();
    }

    Ok(summary)
}

fn fill_block<R: Read + ?Sized>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(read) => filled += read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
    Ok(filled)
}

fn write_block<S: SparseSink + ?Sized>(
    sink: &mut S,
    block: &[u8],
    destination: &Path,
    offset: u64,
) -> Result<(), SparseCopyError> {
    loop {
        match sink.write(block) {
            Ok(written) if written == block.len() => return Ok(()),
            Ok(written) => {
                return Err(SparseCopyError::write(
                    destination,
                    offset,
                    io::Error::new(
                        io::ErrorKind::WriteZero,
                        format!("short write: {written} of {} bytes", block.len()),
                    ),
                ));
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(SparseCopyError::write(destination, offset, error)),
        }
    }
}

fn skip_block<S: SparseSink + ?Sized>(
    sink: &mut S,
    target: u64,
    destination: &Path,
) -> Result<(), SparseCopyError> {
    let position = sink
        .seek(SeekFrom::Start(target))
        .map_err(|error| SparseCopyError::seek(destination, target, error))?;
    if position != target {
        return Err(SparseCopyError::seek(
            destination,
            target,
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("seek landed at {position}"),
            ),
        ));
    }
    Ok(())
}
