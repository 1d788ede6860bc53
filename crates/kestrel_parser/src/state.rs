use crate::Parser;
use kestrel_errors::ErrorKind;
use kestrel_syntax::Span;
use smol_str::SmolStr;
use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// The label is attached to an iteration statement, `continue` may target it.
    Loop,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub name: SmolStr,
    pub kind: LabelKind,
    /// The start of the statement the label applies to, consecutive labels share it.
    pub stmt_start: usize,
}

/// State kept by the parser while parsing a single function body.
///
/// Entering a function swaps in a fresh state with [`Parser::with_state`], the
/// enclosing function's state is restored once the guard drops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    /// Labels of the labelled statements the parser is currently inside of
    pub labels: Vec<Label>,
    /// The first error an expression raises if it turns out not to be a pattern, such
    /// as the shorthand initializer in `({ a = 1 })`
    pub cover: Option<(ErrorKind, Span)>,
    /// The start of the assignment expression a parenthesized list or identifier must
    /// begin at to be the head of an arrow function
    pub potential_arrow_at: Option<usize>,
    /// The first `yield` expression since the last potential arrow head
    pub yield_pos: Option<Span>,
    /// The first `await` expression since the last potential arrow head
    pub await_pos: Option<Span>,
    /// The first use of `await` as an identifier since the last potential arrow head
    pub await_ident_pos: Option<Span>,
}

impl ParserState {
    /// The state a function body starts out with.
    pub fn function_state() -> Self {
        Self::default()
    }

    /// Remember a cover grammar error, only the earliest one is kept.
    pub fn note_cover(&mut self, kind: ErrorKind, span: Span) {
        if self.cover.is_none() {
            self.cover = Some((kind, span));
        }
    }

    pub fn find_label(&self, name: &str) -> Option<&Label> {
        self.labels.iter().rev().find(|label| label.name == name)
    }

    /// Take the `yield`/`await` positions so a potential arrow head can be checked
    /// in isolation.
    pub fn take_arrow_positions(&mut self) -> ArrowPositions {
        ArrowPositions {
            yield_pos: self.yield_pos.take(),
            await_pos: self.await_pos.take(),
            await_ident_pos: self.await_ident_pos.take(),
        }
    }

    /// Restore positions taken by [`ParserState::take_arrow_positions`], keeping the
    /// earliest of every kind.
    pub fn merge_arrow_positions(&mut self, outer: ArrowPositions) {
        self.yield_pos = outer.yield_pos.or(self.yield_pos);
        self.await_pos = outer.await_pos.or(self.await_pos);
        self.await_ident_pos = outer.await_ident_pos.or(self.await_ident_pos);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrowPositions {
    pub yield_pos: Option<Span>,
    pub await_pos: Option<Span>,
    pub await_ident_pos: Option<Span>,
}

/// The names a module exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exports {
    names: HashSet<SmolStr>,
    /// Locally exported names which must be declared at the top level
    pub locals: Vec<(SmolStr, Span)>,
}

impl Exports {
    /// Record an exported name, returns `false` if it was already exported.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(SmolStr::new(name))
    }
}

impl<'src> Parser<'src> {
    pub fn with_state<'a>(&'a mut self, state: ParserState) -> StateGuard<'a, 'src> {
        let original_state = std::mem::replace(&mut self.state, state);
        StateGuard {
            original_state,
            inner: self,
        }
    }
}

pub struct StateGuard<'p, 'src> {
    inner: &'p mut Parser<'src>,
    original_state: ParserState,
}

impl<'p, 'src> Deref for StateGuard<'p, 'src> {
    type Target = Parser<'src>;

    fn deref(&self) -> &Parser<'src> {
        &self.inner
    }
}

impl<'p, 'src> DerefMut for StateGuard<'p, 'src> {
    fn deref_mut(&mut self) -> &mut Parser<'src> {
        &mut self.inner
    }
}

impl<'p, 'src> Drop for StateGuard<'p, 'src> {
    fn drop(&mut self) {
        std::mem::swap(&mut self.inner.state, &mut self.original_state);
    }
}
