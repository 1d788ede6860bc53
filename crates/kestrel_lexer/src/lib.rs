//! A lookup table based ECMAScript lexer which is driven by the kestrel parser.
//!
//! The lexer never produces a token stream up front. The parser asks for one token at a
//! time and hands over the [`Context`] it is currently parsing under, which decides things
//! such as whether a legacy octal literal is an error. Some token boundaries depend on the
//! grammar, the parser therefore asks the lexer to rescan the current token as a regular
//! expression ([`Lexer::rescan_regex`]) or as the continuation of a template literal
//! ([`Lexer::rescan_template_continuation`]).
//!
//! Positions are byte offsets into the source, the source is a `&str` so every offset the
//! lexer stops at is a char boundary.

pub mod chars;
mod identifier;
mod numbers;
mod regex;
mod strings;
mod token;
#[cfg(test)]
mod tests;

pub use regex::RegexFlags;
pub use token::{Token, TokenFlags, TokenValue};

use chars::{char_flags, is_id_start, is_linebreak, CharFlags};
use kestrel_errors::{ErrorKind, ParseError, ParseResult};
use kestrel_syntax::{Context, TokenKind, T};
use log::trace;
use std::ops::Range;

/// The scanning state needed to resume lexing at an earlier position.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    cur: usize,
    line: usize,
    line_start: usize,
    token: Token,
    legacy_octal: Option<(ErrorKind, Range<usize>)>,
}

/// An ECMAScript lexer positioned on a single current token.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    cur: usize,
    line: usize,
    line_start: usize,
    token: Token,
    /// The first legacy octal numeral or escape scanned in sloppy mode since the last reset.
    legacy_octal: Option<(ErrorKind, Range<usize>)>,
}

impl<'src> Lexer<'src> {
    /// Make a new lexer, a leading hashbang line is skipped.
    ///
    /// The lexer starts out on an empty `EOF` token, call [`Lexer::next_token`] to scan
    /// the first real token.
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Self {
            source,
            bytes: source.as_bytes(),
            cur: 0,
            line: 1,
            line_start: 0,
            token: Token::eof(0, 1, 0),
            legacy_octal: None,
        };
        lexer.strip_shebang();
        lexer
    }

    fn strip_shebang(&mut self) {
        if !self.bytes.starts_with(b"#!") {
            return;
        }
        self.cur = 2;
        while let Some(chr) = self.current_char() {
            if is_linebreak(chr) {
                return;
            }
            self.cur += chr.len_utf8();
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// The current token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The source text of the current token.
    pub fn raw(&self) -> &'src str {
        &self.source[self.token.start..self.token.end]
    }

    /// Scan the next token, replacing the current one.
    pub fn next_token(&mut self, ctx: Context) -> ParseResult<()> {
        let had_linebreak = self.skip_trivia(ctx)?;
        let start = self.cur;
        self.token = Token::eof(start, self.line, start - self.line_start);
        self.token.had_linebreak = had_linebreak;

        if start < self.bytes.len() {
            self.token.kind = self.lex_token(ctx)?;
            self.token.end = self.cur;
        }
        trace!(
            "lexed {:?} at {}..{}",
            self.token.kind,
            self.token.start,
            self.token.end
        );
        Ok(())
    }

    /// Rescan the current `/` or `/=` token as a regular expression literal.
    pub fn rescan_regex(&mut self, _ctx: Context) -> ParseResult<()> {
        debug_assert!(matches!(self.token.kind, T![/] | T![/=]));
        self.cur = self.token.start;
        self.token.kind = self.read_regex()?;
        self.token.end = self.cur;
        Ok(())
    }

    /// Rescan the current `}` token as the continuation of a template literal.
    pub fn rescan_template_continuation(&mut self, ctx: Context) -> ParseResult<()> {
        debug_assert_eq!(self.token.kind, T!['}']);
        self.cur = self.token.start + 1;
        self.token.value = TokenValue::None;
        self.token.kind = self.read_template(ctx)?;
        self.token.end = self.cur;
        Ok(())
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cur: self.cur,
            line: self.line,
            line_start: self.line_start,
            token: self.token.clone(),
            legacy_octal: self.legacy_octal.clone(),
        }
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.cur = checkpoint.cur;
        self.line = checkpoint.line;
        self.line_start = checkpoint.line_start;
        self.token = checkpoint.token;
        self.legacy_octal = checkpoint.legacy_octal;
    }

    /// Scan the token after the current one without consuming anything.
    pub fn lookahead(&mut self, ctx: Context) -> ParseResult<Token> {
        let checkpoint = self.checkpoint();
        let res = self.next_token(ctx).map(|_| self.token.clone());
        self.rewind(checkpoint);
        res
    }

    /// Take the pending legacy octal error, if any legacy octal construct was scanned
    /// in sloppy mode since the last [`Lexer::reset_legacy_octal`].
    pub fn take_legacy_octal(&mut self) -> Option<ParseError> {
        self.legacy_octal
            .take()
            .map(|(kind, range)| ParseError::new(kind, range, self.source))
    }

    pub fn reset_legacy_octal(&mut self) {
        self.legacy_octal = None;
    }

    pub(crate) fn error(&self, kind: ErrorKind, range: Range<usize>) -> ParseError {
        ParseError::new(kind, range, self.source)
    }

    /// Reject a legacy octal construct in strict mode, or remember it for a later
    /// `"use strict"` directive.
    pub(crate) fn note_legacy_octal(
        &mut self,
        ctx: Context,
        kind: ErrorKind,
        range: Range<usize>,
    ) -> ParseResult<()> {
        if ctx.is_strict() {
            return Err(self.error(kind, range));
        }
        self.token.flags |= TokenFlags::OCTAL;
        if self.legacy_octal.is_none() {
            self.legacy_octal = Some((kind, range));
        }
        Ok(())
    }

    // Get the char which starts at the current byte
    #[inline]
    pub(crate) fn current_char(&self) -> Option<char> {
        self.source.get(self.cur..)?.chars().next()
    }

    // Advance the cursor and get the byte it lands on
    #[inline]
    fn next(&mut self) -> Option<u8> {
        self.cur += 1;
        self.bytes.get(self.cur).copied()
    }

    #[inline]
    fn eat(&mut self, kind: TokenKind) -> TokenKind {
        self.next();
        kind
    }

    // Called after the cursor moved past a line terminator
    #[inline]
    pub(crate) fn newline(&mut self) {
        self.line += 1;
        self.line_start = self.cur;
    }

    // Skip whitespace and comments, returns whether a line terminator was skipped
    fn skip_trivia(&mut self, ctx: Context) -> ParseResult<bool> {
        let at_input_start = self.token.end == 0;
        let mut had_linebreak = false;

        while let Some(byte) = self.bytes.get(self.cur).copied() {
            match byte {
                b' ' | b'\t' | 0x0B | 0x0C => self.cur += 1,
                b'\n' => {
                    self.cur += 1;
                    self.newline();
                    had_linebreak = true;
                }
                b'\r' => {
                    self.cur += 1;
                    if self.bytes.get(self.cur) == Some(&b'\n') {
                        self.cur += 1;
                    }
                    self.newline();
                    had_linebreak = true;
                }
                b'/' => match self.bytes.get(self.cur + 1) {
                    Some(b'/') => self.skip_line_comment(2),
                    Some(b'*') => had_linebreak |= self.skip_block_comment()?,
                    _ => break,
                },
                // html-like comments are only a thing in scripts
                b'<' if !ctx.is_module() && self.bytes[self.cur..].starts_with(b"<!--") => {
                    self.skip_line_comment(4)
                }
                b'-' if !ctx.is_module()
                    && (had_linebreak || at_input_start)
                    && self.bytes[self.cur..].starts_with(b"-->") =>
                {
                    self.skip_line_comment(3)
                }
                b if b >= 0x80 => {
                    let chr = match self.current_char() {
                        Some(chr) => chr,
                        None => break,
                    };
                    let flags = char_flags(chr);
                    if flags.contains(CharFlags::LINE_TERMINATOR) {
                        self.cur += chr.len_utf8();
                        self.newline();
                        had_linebreak = true;
                    } else if flags.contains(CharFlags::WHITESPACE) {
                        self.cur += chr.len_utf8();
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(had_linebreak)
    }

    fn skip_line_comment(&mut self, opener: usize) {
        self.cur += opener;
        while let Some(chr) = self.current_char() {
            if is_linebreak(chr) {
                return;
            }
            self.cur += chr.len_utf8();
        }
    }

    fn skip_block_comment(&mut self) -> ParseResult<bool> {
        let start = self.cur;
        let mut had_linebreak = false;
        self.cur += 2;

        loop {
            match self.bytes.get(self.cur) {
                None => return Err(self.error(ErrorKind::UnterminatedComment, start..start + 2)),
                Some(b'*') if self.bytes.get(self.cur + 1) == Some(&b'/') => {
                    self.cur += 2;
                    return Ok(had_linebreak);
                }
                Some(b'\n') => {
                    self.cur += 1;
                    self.newline();
                    had_linebreak = true;
                }
                Some(b'\r') => {
                    self.cur += 1;
                    if self.bytes.get(self.cur) == Some(&b'\n') {
                        self.cur += 1;
                    }
                    self.newline();
                    had_linebreak = true;
                }
                Some(0xE2) if self.current_char().map_or(false, is_linebreak) => {
                    self.cur += 3;
                    self.newline();
                    had_linebreak = true;
                }
                Some(_) => self.cur += 1,
            }
        }
    }

    #[inline]
    fn lookup(byte: u8) -> Dispatch {
        DISPATCHER.get(byte as usize).copied().unwrap_or(UNI)
    }

    #[inline]
    fn bin_or_assign(&mut self, bin: TokenKind, assign: TokenKind) -> TokenKind {
        if let Some(b'=') = self.next() {
            self.next();
            assign
        } else {
            bin
        }
    }

    #[inline]
    fn resolve_bang(&mut self) -> TokenKind {
        match self.next() {
            Some(b'=') => {
                if let Some(b'=') = self.next() {
                    self.next();
                    T![!==]
                } else {
                    T![!=]
                }
            }
            _ => T![!],
        }
    }

    #[inline]
    fn resolve_amp(&mut self) -> TokenKind {
        match self.next() {
            Some(b'&') => self.bin_or_assign(T![&&], T![&&=]),
            Some(b'=') => self.eat(T![&=]),
            _ => T![&],
        }
    }

    #[inline]
    fn resolve_pipe(&mut self) -> TokenKind {
        match self.next() {
            Some(b'|') => self.bin_or_assign(T![||], T![||=]),
            Some(b'=') => self.eat(T![|=]),
            _ => T![|],
        }
    }

    #[inline]
    fn resolve_plus(&mut self) -> TokenKind {
        match self.next() {
            Some(b'+') => self.eat(T![++]),
            Some(b'=') => self.eat(T![+=]),
            _ => T![+],
        }
    }

    #[inline]
    fn resolve_minus(&mut self) -> TokenKind {
        match self.next() {
            Some(b'-') => self.eat(T![--]),
            Some(b'=') => self.eat(T![-=]),
            _ => T![-],
        }
    }

    #[inline]
    fn resolve_star(&mut self) -> TokenKind {
        match self.next() {
            Some(b'*') => self.bin_or_assign(T![**], T![**=]),
            Some(b'=') => self.eat(T![*=]),
            _ => T![*],
        }
    }

    #[inline]
    fn resolve_less_than(&mut self) -> TokenKind {
        match self.next() {
            Some(b'<') => self.bin_or_assign(T![<<], T![<<=]),
            Some(b'=') => self.eat(T![<=]),
            _ => T![<],
        }
    }

    #[inline]
    fn resolve_greater_than(&mut self) -> TokenKind {
        match self.next() {
            Some(b'>') => match self.next() {
                Some(b'>') => self.bin_or_assign(T![>>>], T![>>>=]),
                Some(b'=') => self.eat(T![>>=]),
                _ => T![>>],
            },
            Some(b'=') => self.eat(T![>=]),
            _ => T![>],
        }
    }

    #[inline]
    fn resolve_eq(&mut self) -> TokenKind {
        match self.next() {
            Some(b'=') => {
                if let Some(b'=') = self.next() {
                    self.next();
                    T![===]
                } else {
                    T![==]
                }
            }
            Some(b'>') => self.eat(T![=>]),
            _ => T![=],
        }
    }

    #[inline]
    fn resolve_question(&mut self) -> TokenKind {
        match self.next() {
            Some(b'?') => self.bin_or_assign(T![??], T![??=]),
            // `a?.5:b` is a conditional, not an optional chain
            Some(b'.') if !matches!(self.bytes.get(self.cur + 1), Some(b'0'..=b'9')) => {
                self.eat(T![?.])
            }
            _ => T![?],
        }
    }

    #[inline]
    fn resolve_period(&mut self, ctx: Context) -> ParseResult<TokenKind> {
        match self.bytes.get(self.cur + 1) {
            Some(b'0'..=b'9') => self.read_number(ctx),
            Some(b'.') if self.bytes.get(self.cur + 2) == Some(&b'.') => {
                self.cur += 3;
                Ok(T![...])
            }
            _ => Ok(self.eat(T![.])),
        }
    }

    fn unexpected_char(&self) -> ParseError {
        let chr = self.current_char().unwrap_or('\u{FFFD}');
        self.error(
            ErrorKind::UnexpectedCharacter(chr),
            self.cur..self.cur + chr.len_utf8(),
        )
    }

    /// Lex the token starting at the cursor, the cursor must not be at the end of input.
    fn lex_token(&mut self, ctx: Context) -> ParseResult<TokenKind> {
        let byte = self.bytes[self.cur];

        let kind = match Self::lookup(byte) {
            EXL => self.resolve_bang(),
            PRC => self.bin_or_assign(T![%], T![%=]),
            AMP => self.resolve_amp(),
            PNO => self.eat(T!['(']),
            PNC => self.eat(T![')']),
            MUL => self.resolve_star(),
            PLS => self.resolve_plus(),
            COM => self.eat(T![,]),
            MIN => self.resolve_minus(),
            PRD => return self.resolve_period(ctx),
            SLH => self.bin_or_assign(T![/], T![/=]),
            ZER | DIG => return self.read_number(ctx),
            COL => self.eat(T![:]),
            SEM => self.eat(T![;]),
            LSS => self.resolve_less_than(),
            EQL => self.resolve_eq(),
            MOR => self.resolve_greater_than(),
            QST => self.resolve_question(),
            BTO => self.eat(T!['[']),
            BTC => self.eat(T![']']),
            CRT => self.bin_or_assign(T![^], T![^=]),
            BEO => self.eat(T!['{']),
            PIP => self.resolve_pipe(),
            BEC => self.eat(T!['}']),
            TLD => self.eat(T![~]),
            QOT => return self.read_str_literal(ctx),
            TPL => {
                self.cur += 1;
                return self.read_template(ctx);
            }
            IDT | BSL => return self.read_identifier(),
            HSH => return self.read_private_name(),
            UNI => match self.current_char() {
                Some(chr) if is_id_start(chr) => return self.read_identifier(),
                _ => return Err(self.unexpected_char()),
            },
            ERR => return Err(self.unexpected_char()),
        };
        Ok(kind)
    }
}

/// Lex a whole source, treating every `/` as a punctuator. Mostly useful for tests and
/// tools which only care about token boundaries.
pub fn tokenize(source: &str, ctx: Context) -> ParseResult<Vec<Token>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];
    loop {
        lexer.next_token(ctx)?;
        if lexer.token().kind == TokenKind::EOF {
            return Ok(tokens);
        }
        tokens.push(lexer.token().clone());
    }
}

// Every handler a byte coming in could be mapped to
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
enum Dispatch {
    ERR,
    EXL,
    QOT,
    IDT,
    PRC,
    AMP,
    PNO,
    PNC,
    MUL,
    PLS,
    COM,
    MIN,
    PRD,
    SLH,
    ZER,
    DIG,
    COL,
    SEM,
    LSS,
    EQL,
    MOR,
    QST,
    BTO,
    BSL,
    BTC,
    CRT,
    TPL,
    BEO,
    PIP,
    BEC,
    TLD,
    HSH,
    UNI,
}
use Dispatch::*;

// A lookup table mapping an ascii byte to its handler, anything above 0x7F is `UNI`.
// Whitespace and line terminators never reach the dispatcher since trivia is skipped first.
#[rustfmt::skip]
static DISPATCHER: [Dispatch; 128] = [
    //   0    1    2    3    4    5    6    7    8    9    A    B    C    D    E    F   //
    ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, // 0
    ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, // 1
    ERR, EXL, QOT, HSH, IDT, PRC, AMP, QOT, PNO, PNC, MUL, PLS, COM, MIN, PRD, SLH, // 2
    ZER, DIG, DIG, DIG, DIG, DIG, DIG, DIG, DIG, DIG, COL, SEM, LSS, EQL, MOR, QST, // 3
    ERR, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, // 4
    IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, BTO, BSL, BTC, CRT, IDT, // 5
    TPL, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, // 6
    IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, IDT, BEO, PIP, BEC, TLD, ERR, // 7
];
