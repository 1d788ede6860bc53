//! The physical parser structure.
//!
//! The parser owns the lexer and is positioned on exactly one current token. Grammar
//! procedures in [`crate::syntax`] drive it through `at`, `eat`, `expect` and `bump`,
//! every one of which takes the [`Context`] the next token is lexed under.

use crate::scope::{PrivateNameStack, ScopeStack};
use crate::state::Exports;
use crate::{ParserState, TokenSet};
use kestrel_errors::{ErrorKind, ParseError, ParseResult};
use kestrel_lexer::{Lexer, Token, TokenValue};
use kestrel_syntax::{Context, Span, TokenKind, T};
use smol_str::SmolStr;
use std::collections::HashSet;
use std::ops::Range;

/// A recursive descent ECMAScript parser which stops at the first error.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    pub state: ParserState,
    pub scopes: ScopeStack,
    /// Private names of the class bodies the parser is inside of, these outlive
    /// function states
    pub private_names: PrivateNameStack,
    pub exports: Exports,
    /// Spans of expressions which were wrapped in parentheses
    pub parenthesized: HashSet<Span>,
    /// Spans of array and object literals with a comma after a spread element,
    /// which makes them invalid as patterns
    pub trailing_comma_after_rest: HashSet<Span>,
    prev_end: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Parser<'src> {
        Parser {
            lexer: Lexer::new(source),
            state: ParserState::default(),
            scopes: ScopeStack::default(),
            private_names: PrivateNameStack::default(),
            exports: Exports::default(),
            parenthesized: HashSet::new(),
            trailing_comma_after_rest: HashSet::new(),
            prev_end: 0,
        }
    }

    pub fn source(&self) -> &'src str {
        self.lexer.source()
    }

    /// Get the current token kind of the parser
    pub fn cur(&self) -> TokenKind {
        self.lexer.token().kind
    }

    /// Get the current token of the parser
    pub fn cur_tok(&self) -> &Token {
        self.lexer.token()
    }

    /// The source text of the current token
    pub fn cur_src(&self) -> &'src str {
        self.lexer.raw()
    }

    pub fn cur_span(&self) -> Span {
        self.cur_tok().span()
    }

    /// The identifier name of the current token with escapes resolved
    pub fn cur_name(&self) -> SmolStr {
        match &self.cur_tok().value {
            TokenValue::Ident(name) => name.clone(),
            _ => SmolStr::new(self.cur_src()),
        }
    }

    /// Check if the parser is currently at a specific token
    pub fn at(&self, kind: TokenKind) -> bool {
        self.cur() == kind
    }

    /// Check if the parser's current token is contained in a token set
    pub fn at_ts(&self, kinds: TokenSet) -> bool {
        kinds.contains(self.cur())
    }

    /// Whether the current token is the contextual keyword `name`, spelled without escapes.
    pub fn at_contextual(&self, name: &str) -> bool {
        self.at(T![ident]) && !self.cur_tok().is_escaped() && self.cur_src() == name
    }

    /// Whether a line terminator separates the current token from the previous one
    pub fn has_linebreak_before(&self) -> bool {
        self.cur_tok().had_linebreak
    }

    /// The end of the previously consumed token
    pub fn prev_end(&self) -> usize {
        self.prev_end
    }

    /// Starts a new node at the current token.
    pub fn start(&self) -> Marker {
        Marker {
            start: self.cur_tok().start,
        }
    }

    /// Advances the parser by one token
    pub fn bump(&mut self, ctx: Context) -> ParseResult<()> {
        self.prev_end = self.cur_tok().end;
        self.lexer.next_token(ctx)
    }

    /// Consume the current token if `kind` matches.
    pub fn eat(&mut self, kind: TokenKind, ctx: Context) -> ParseResult<bool> {
        if !self.at(kind) {
            return Ok(false);
        }
        self.bump(ctx)?;
        Ok(true)
    }

    /// Consume the current token or fail if it is not `kind`.
    pub fn expect(&mut self, kind: TokenKind, ctx: Context) -> ParseResult<()> {
        if self.eat(kind, ctx)? {
            return Ok(());
        }
        if self.at(T![EOF]) {
            return Err(self.unexpected());
        }
        Err(self.err(
            ErrorKind::Expected(kind.to_str(), self.cur_src().to_string()),
            self.cur_span(),
        ))
    }

    pub fn expect_contextual(&mut self, name: &'static str, ctx: Context) -> ParseResult<()> {
        if self.at_contextual(name) {
            return self.bump(ctx);
        }
        if self.at(T![EOF]) {
            return Err(self.unexpected());
        }
        Err(self.err(
            ErrorKind::Expected(name, self.cur_src().to_string()),
            self.cur_span(),
        ))
    }

    /// Whether a semicolon may be inserted before the current token.
    pub fn can_insert_semicolon(&self) -> bool {
        self.at(T![EOF]) || self.at(T!['}']) || self.has_linebreak_before()
    }

    /// Consume a statement terminator, inserting one where automatic semicolon
    /// insertion allows it.
    pub fn semicolon(&mut self, ctx: Context) -> ParseResult<()> {
        if self.eat(T![;], ctx)? || self.can_insert_semicolon() {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Lex the token after the current one without consuming anything
    pub fn lookahead(&mut self, ctx: Context) -> ParseResult<Token> {
        self.lexer.lookahead(ctx)
    }

    /// Lex the `n`th token after the current one without consuming anything
    pub fn nth_lookahead(&mut self, n: usize, ctx: Context) -> ParseResult<Token> {
        let checkpoint = self.lexer.checkpoint();
        let res = (0..n)
            .try_for_each(|_| self.lexer.next_token(ctx))
            .map(|_| self.lexer.token().clone());
        self.lexer.rewind(checkpoint);
        res
    }

    /// Reinterpret the current `/` or `/=` as the start of a regular expression
    pub fn rescan_regex(&mut self, ctx: Context) -> ParseResult<()> {
        self.lexer.rescan_regex(ctx)
    }

    /// Reinterpret the current `}` as the continuation of a template literal
    pub fn rescan_template_continuation(&mut self, ctx: Context) -> ParseResult<()> {
        self.lexer.rescan_template_continuation(ctx)
    }

    pub fn take_legacy_octal(&mut self) -> Option<ParseError> {
        self.lexer.take_legacy_octal()
    }

    pub fn reset_legacy_octal(&mut self) {
        self.lexer.reset_legacy_octal()
    }

    /// Make a positioned error
    pub fn err(&self, kind: ErrorKind, range: impl Into<Range<usize>>) -> ParseError {
        ParseError::new(kind, range.into(), self.source())
    }

    /// An error for the current token not being valid here
    pub fn unexpected(&self) -> ParseError {
        let tok = self.cur_tok();
        if tok.kind == T![EOF] {
            self.err(ErrorKind::UnexpectedEof, tok.start..tok.end)
        } else {
            self.err(
                ErrorKind::UnexpectedToken(self.cur_src().to_string()),
                tok.start..tok.end,
            )
        }
    }

    /// The source text of `span` if raw values are requested
    pub fn raw(&self, span: Span, ctx: Context) -> Option<String> {
        if ctx.contains(Context::OPTIONS_RAW) {
            Some(self.source()[span.range()].to_string())
        } else {
            None
        }
    }
}

/// The start of a node which is still being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub start: usize,
}

impl Marker {
    /// The span from the start of this node to the end of the last consumed token.
    pub fn finish(self, p: &Parser) -> Span {
        Span::new(self.start, p.prev_end().max(self.start))
    }
}
