//! Line lookup over a source text.
//!
//! Pre-computes the byte offset of each line start so that offset-to-line
//! queries are a binary search and line text can be sliced out directly.

/// Line start table for one source text.
///
/// ```
/// use wisp_diagnostic::LineTable;
///
/// let source = "let a = 1;\nlet b = a;";
/// let table = LineTable::build(source);
///
/// assert_eq!(table.line_text(source, 2), Some("let b = a;"));
/// assert_eq!(table.offset_to_line_col(source, 15), (2, 4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineTable {
    /// offsets[i] is the byte offset where line i + 1 starts.
    offsets: Vec<u32>,
}

impl LineTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push((i + 1) as u32);
            }
        }
        LineTable { offsets }
    }

    /// 1-based line containing `offset`.
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        (line_idx as u32) + 1
    }

    /// 1-based line and 0-based character column of `offset`.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let start = self.offsets.get((line - 1) as usize).copied().unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let column = source
            .get(start..end)
            .map_or(0, |prefix| prefix.chars().count() as u32);
        (line, column)
    }

    /// Text of a 1-based line, without its line terminator.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.offsets.get(idx)? as usize;
        let end = self
            .offsets
            .get(idx + 1)
            .map_or(source.len(), |next| *next as usize);
        let text = source.get(start..end)?;
        Some(text.trim_end_matches(['\n', '\r']))
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}
