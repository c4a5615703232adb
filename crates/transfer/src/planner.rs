/// A contiguous byte subrange of the payload, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes covered by this range.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the range covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Renders the `Content-Range` header value for this range.
    ///
    /// The wire format addresses the last byte inclusively:
    /// `bytes {start}-{end - 1}/{total}`.
    pub fn content_range(&self, total_size: usize) -> String {
        format!("bytes {}-{}/{}", self.start, self.end - 1, total_size)
    }
}

/// Computes the ordered chunk ranges for a payload.
///
/// Produces `ceil(file_size / chunk_size)` contiguous, non-overlapping
/// ranges covering `[0, file_size)` in ascending order. A zero
/// `file_size` yields no ranges: an empty upload sends no chunks.
/// Pure and deterministic; panics only on a zero `chunk_size`.
pub fn plan_chunks(file_size: usize, chunk_size: usize) -> Vec<ByteRange> {
    assert!(chunk_size > 0, "chunk_size must be positive");

    let number_of_chunks = file_size.div_ceil(chunk_size);
    let mut ranges = Vec::with_capacity(number_of_chunks);
    for i in 0..number_of_chunks {
        let start = i * chunk_size;
        let end = usize::min(start + chunk_size, file_size);
        ranges.push(ByteRange { start, end });
    }
    ranges
}
