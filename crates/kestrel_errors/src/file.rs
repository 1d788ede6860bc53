//! Mapping byte offsets to lines and columns.

/// Computes the byte indices of every line start.
///
/// `\n`, `\r`, `\r\n`, U+2028 and U+2029 all terminate a line.
pub fn line_starts(source: &str) -> impl '_ + Iterator<Item = usize> {
    let bytes = source.as_bytes();
    std::iter::once(0).chain(source.char_indices().filter_map(move |(i, c)| match c {
        '\n' => Some(i + 1),
        '\r' if bytes.get(i + 1) != Some(&b'\n') => Some(i + 1),
        '\u{2028}' | '\u{2029}' => Some(i + c.len_utf8()),
        _ => None,
    }))
}

/// A cached list of line starts used to resolve offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        Self {
            starts: line_starts(source).collect(),
        }
    }

    /// The 0-based line containing `offset`.
    pub fn line_index(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        }
    }

    /// The 1-based line and 0-based column of `offset`.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_index(offset);
        (line + 1, offset - self.starts[line])
    }

    /// The 1-based line and the 0-based column of `offset` counted in UTF-16 code units.
    pub fn line_col_utf16(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = self.line_index(offset);
        let start = self.starts[line];
        let column = source
            .get(start..offset)
            .map_or(0, |text| text.encode_utf16().count());
        (line + 1, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_line_terminators() {
        let src = "a\nb\r\nc\rd\u{2028}e";
        let starts: Vec<_> = line_starts(src).collect();
        assert_eq!(starts, vec![0, 2, 5, 7, 11]);
    }

    #[test]
    fn line_col_resolves() {
        let index = LineIndex::new("let a;\nlet b;");
        assert_eq!(index.line_col(0), (1, 0));
        assert_eq!(index.line_col(7), (2, 0));
        assert_eq!(index.line_col(11), (2, 4));
    }

    #[test]
    fn utf16_columns() {
        let src = "'é😀' + a";
        let index = LineIndex::new(src);
        // `é` is two bytes but one unit, the emoji four bytes but two units
        assert_eq!(index.line_col(9), (1, 9));
        assert_eq!(index.line_col_utf16(src, 9), (1, 6));
    }
}
