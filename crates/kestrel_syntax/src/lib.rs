//! Definitions shared by the kestrel lexer and parser: token kinds, spans, and the
//! context bits which are threaded through every scanning and grammar routine.

#[macro_use]
mod kind;
mod context;
mod span;

pub use context::{Context, Options};
pub use kind::*;
pub use span::Span;
