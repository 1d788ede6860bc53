//! The grammar of ECMAScript and the parser functions for it.
//!
//! One function per production family, every function takes the parser and the
//! [`Context`](kestrel_syntax::Context) the production is parsed under. Every function is
//! public so a consumer can parse a single production, for example only an expression.

pub mod decl;
pub mod expr;
pub mod pat;
pub mod program;
pub mod stmt;
pub mod util;
