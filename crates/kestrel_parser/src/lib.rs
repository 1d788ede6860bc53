//! An ECMAScript parser which produces an ESTree compatible syntax tree.
//!
//! The parser is a hand written recursive descent parser driving the lazy
//! [`kestrel_lexer::Lexer`]. Every grammar procedure takes the [`Context`] it is parsed
//! under by value and returns a [`ParseResult`], the first lexical, syntax or early error
//! aborts the parse. Early errors are checked inline as productions are parsed, the only
//! deferred facts are the ones a `"use strict"` directive or a cover grammar decides.
//!
//! ```
//! use kestrel_parser::{parse, Options};
//!
//! let program = parse("let a = 5;", Options::default()).unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

#[macro_use]
mod token_set;
pub mod ast;
mod config;
pub mod estree;
mod parser;
pub mod scope;
mod state;
pub mod syntax;
#[cfg(test)]
mod tests;

pub use crate::{
    config::ParserConfig,
    parser::{Marker, Parser},
    state::{ParserState, StateGuard},
    token_set::TokenSet,
};
pub use kestrel_errors::{ErrorKind, ParseError, ParseResult};
pub use kestrel_syntax::{Context, Options, Span, TokenKind, T};

use ast::Program;
use log::debug;

/// Parse `source` as a script or module depending on `options`.
pub fn parse(source: &str, options: Options) -> ParseResult<Program> {
    debug!("parsing {} bytes with {:?}", source.len(), options);
    let mut p = Parser::new(source);
    let res = syntax::program::program(&mut p, Context::from_options(options));
    match &res {
        Ok(program) => debug!("parsed {} top level statements", program.body.len()),
        Err(err) => debug!("parse failed: {}", err),
    }
    res
}

/// Parse `source` with the script goal.
pub fn parse_script(source: &str) -> ParseResult<Program> {
    parse(source, Options::default())
}

/// Parse `source` with the module goal, module code is always strict.
pub fn parse_module(source: &str) -> ParseResult<Program> {
    parse(source, Options::MODULE)
}

/// Parse `source` with options taken from a [`ParserConfig`].
pub fn parse_with_config(source: &str, config: &ParserConfig) -> ParseResult<Program> {
    parse(source, config.options())
}
