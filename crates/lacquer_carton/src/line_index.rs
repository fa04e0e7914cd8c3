//! Line index for converting byte offsets into 1-based line/column pairs.

use memchr::memchr_iter;

/// Precomputed line start offsets for a source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'s> {
    source: &'s str,
    line_starts: Vec<u32>,
}

impl<'s> LineIndex<'s> {
    /// Build the index in a single pass over the source.
    pub fn new(source: &'s str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        line_starts.extend(memchr_iter(b'\n', source.as_bytes()).map(|i| i as u32 + 1));
        Self {
            source,
            line_starts,
        }
    }

    /// Number of lines in the source (an empty source has one line).
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a 1-based `(line, column)` pair.
    ///
    /// Columns count characters, not bytes. Offsets past the end clamp to
    /// the end of the source.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.source.len() as u32);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let column = self
            .source
            .get(line_start..offset as usize)
            .map(|s| s.chars().count())
            .unwrap_or(offset as usize - line_start);
        (line as u32 + 1, column as u32 + 1)
    }
}
