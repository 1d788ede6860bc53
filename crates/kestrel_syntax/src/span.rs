//! A structure representing a range of text inside of a string.

use std::ops::{Add, Range};

/// A byte range inside of the source code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn content<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.end - self.start
    }

    /// Whether `other` lies entirely inside of this span.
    #[inline]
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl Add for Span {
    type Output = Span;

    fn add(self, other: Self) -> Self {
        Self::new(self.start, other.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Range<usize> {
        span.range()
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Span {
        Span::new(range.start, range.end)
    }
}

impl From<usize> for Span {
    fn from(i: usize) -> Span {
        Span::new(i, i)
    }
}
