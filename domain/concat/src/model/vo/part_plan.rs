use super::ObjectUrl;

/// Parts below this size may only appear at the end of a multipart upload.
pub const MIN_PART_SIZE: u64 = 5 * 1024 * 1024;

/// Inclusive byte range within one source object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(end >= start);
        Self { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// The `bytes=start-end` form used by range gets and part copies.
    pub fn to_http_range(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

/// One slice of one source feeding a buffered part.
///
/// `range: None` reads the whole object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSegment {
    pub source: ObjectUrl,
    pub range: Option<ByteRange>,
}

/// One upload part the planner decided on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartPlan {
    /// Server-side copy of a contiguous range from exactly one source.
    Copy {
        source: ObjectUrl,
        range: Option<ByteRange>,
    },
    /// Segments downloaded and concatenated client-side into one part.
    Buffer { segments: Vec<PartSegment> },
}
