//! String and template literals along with the escape sequences they share.

use crate::chars::is_linebreak;
use crate::{Lexer, TokenFlags, TokenValue};
use kestrel_errors::{ErrorKind, ParseResult};
use kestrel_syntax::{Context, TokenKind};
use std::ops::Range;

/// A single scanned escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Escape {
    Char(char),
    /// A `\u` escape, which may be one half of a surrogate pair.
    CodeUnit(u32),
    /// A backslash followed by a line terminator, contributes nothing.
    LineContinuation,
    /// `\1` through `\377`, including `\0` followed by a digit.
    LegacyOctal(char),
    /// `\8` or `\9`.
    NonOctalDecimal(char),
}

impl<'src> Lexer<'src> {
    /// Scan an escape sequence, the cursor must be on the byte after the backslash and
    /// that byte must exist.
    pub(crate) fn read_escape(&mut self) -> Result<Escape, ErrorKind> {
        let byte = match self.bytes.get(self.cur) {
            Some(byte) => *byte,
            None => return Err(ErrorKind::UnexpectedEof),
        };
        self.cur += 1;

        let escape = match byte {
            b'n' => Escape::Char('\n'),
            b't' => Escape::Char('\t'),
            b'r' => Escape::Char('\r'),
            b'b' => Escape::Char('\u{8}'),
            b'f' => Escape::Char('\u{C}'),
            b'v' => Escape::Char('\u{B}'),
            b'\n' => {
                self.newline();
                Escape::LineContinuation
            }
            b'\r' => {
                if self.bytes.get(self.cur) == Some(&b'\n') {
                    self.cur += 1;
                }
                self.newline();
                Escape::LineContinuation
            }
            b'x' => {
                let high = self.read_hex_digit(ErrorKind::InvalidHexEscape)?;
                let low = self.read_hex_digit(ErrorKind::InvalidHexEscape)?;
                Escape::Char(char::from((high * 16 + low) as u8))
            }
            b'u' => Escape::CodeUnit(self.read_unicode_escape()?),
            b'0' if !matches!(self.bytes.get(self.cur), Some(b'0'..=b'9')) => Escape::Char('\0'),
            b'0'..=b'7' => Escape::LegacyOctal(self.read_legacy_octal_escape(byte)),
            b'8' | b'9' => Escape::NonOctalDecimal(byte as char),
            _ => {
                self.cur -= 1;
                let chr = self.current_char().unwrap_or(byte as char);
                self.cur += chr.len_utf8();
                if is_linebreak(chr) {
                    self.newline();
                    Escape::LineContinuation
                } else {
                    Escape::Char(chr)
                }
            }
        };
        Ok(escape)
    }

    fn read_hex_digit(&mut self, err: ErrorKind) -> Result<u32, ErrorKind> {
        match self.bytes.get(self.cur).and_then(|b| (*b as char).to_digit(16)) {
            Some(digit) => {
                self.cur += 1;
                Ok(digit)
            }
            None => Err(err),
        }
    }

    /// Scan the part of a `\u` escape after the `u`, either `XXXX` or `{X...}`.
    pub(crate) fn read_unicode_escape(&mut self) -> Result<u32, ErrorKind> {
        if self.bytes.get(self.cur) != Some(&b'{') {
            let mut value = 0;
            for _ in 0..4 {
                value = value * 16 + self.read_hex_digit(ErrorKind::InvalidUnicodeEscape)?;
            }
            return Ok(value);
        }

        self.cur += 1;
        let mut value: u32 = 0;
        let mut digits = 0;
        let mut overflow = false;
        loop {
            match self.bytes.get(self.cur) {
                Some(b'}') if digits > 0 => {
                    self.cur += 1;
                    break;
                }
                Some(byte) => match (*byte as char).to_digit(16) {
                    Some(digit) => {
                        value = value.saturating_mul(16).saturating_add(digit);
                        overflow |= value > 0x10FFFF;
                        digits += 1;
                        self.cur += 1;
                    }
                    None => return Err(ErrorKind::InvalidUnicodeEscape),
                },
                None => return Err(ErrorKind::InvalidUnicodeEscape),
            }
        }

        if overflow {
            Err(ErrorKind::UnicodeOverflow)
        } else {
            Ok(value)
        }
    }

    // `\0` to `\377`, the first digit is already consumed
    fn read_legacy_octal_escape(&mut self, first: u8) -> char {
        let max_len = if first <= b'3' { 3 } else { 2 };
        let mut value = u32::from(first - b'0');
        let mut len = 1;

        while len < max_len {
            match self.bytes.get(self.cur) {
                Some(&byte) if (b'0'..=b'7').contains(&byte) => {
                    value = value * 8 + u32::from(byte - b'0');
                    self.cur += 1;
                    len += 1;
                }
                _ => break,
            }
        }
        char::from(value as u8)
    }

    /// Push a `\u` code unit onto `out`, joining it with a directly following low
    /// surrogate escape. Unpaired surrogates become U+FFFD.
    pub(crate) fn push_code_unit(&mut self, unit: u32, out: &mut String) {
        if (0xD800..0xDC00).contains(&unit) && self.bytes[self.cur..].starts_with(b"\\u") {
            let resume = self.cur;
            self.cur += 2;
            match self.read_unicode_escape() {
                Ok(low) if (0xDC00..0xE000).contains(&low) => {
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                    return;
                }
                _ => self.cur = resume,
            }
        }
        out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    pub(crate) fn read_str_literal(&mut self, ctx: Context) -> ParseResult<TokenKind> {
        let start = self.cur;
        let quote = self.bytes[start];
        self.cur += 1;
        let mut cooked = String::new();
        let mut chunk = self.cur;

        loop {
            match self.bytes.get(self.cur) {
                None | Some(b'\n') | Some(b'\r') => {
                    return Err(self.error(ErrorKind::UnterminatedString, start..self.cur))
                }
                Some(&byte) if byte == quote => break,
                Some(b'\\') => {
                    cooked.push_str(&self.source[chunk..self.cur]);
                    let escape_start = self.cur;
                    self.cur += 1;
                    if self.cur >= self.bytes.len() {
                        return Err(self.error(ErrorKind::UnterminatedString, start..self.cur));
                    }

                    match self.read_escape() {
                        Ok(Escape::Char(chr)) => cooked.push(chr),
                        Ok(Escape::CodeUnit(unit)) => self.push_code_unit(unit, &mut cooked),
                        Ok(Escape::LineContinuation) => {}
                        Ok(Escape::LegacyOctal(chr)) => {
                            self.note_legacy_octal(
                                ctx,
                                ErrorKind::StrictOctalEscape,
                                escape_start..self.cur,
                            )?;
                            cooked.push(chr);
                        }
                        Ok(Escape::NonOctalDecimal(chr)) => {
                            self.note_legacy_octal(
                                ctx,
                                ErrorKind::StrictEightOrNineEscape,
                                escape_start..self.cur,
                            )?;
                            cooked.push(chr);
                        }
                        Err(kind) => return Err(self.error(kind, escape_start..self.cur)),
                    }
                    chunk = self.cur;
                }
                // U+2028 and U+2029 are allowed in strings but still end a line
                Some(0xE2) if self.current_char().map_or(false, is_linebreak) => {
                    self.cur += 3;
                    self.newline();
                }
                Some(_) => self.cur += 1,
            }
        }

        cooked.push_str(&self.source[chunk..self.cur]);
        self.cur += 1;
        self.token.value = TokenValue::String(cooked);
        Ok(TokenKind::STRING)
    }

    /// Scan a template chunk, the cursor must be right after the opening `` ` `` or `}`.
    ///
    /// Yields `TEMPLATE_TAIL` for a chunk closed by `` ` `` and `TEMPLATE_CONT` for one
    /// closed by `${`. Invalid escapes do not fail, the chunk's cooked value becomes `None`
    /// and the parser decides whether that is an error.
    pub(crate) fn read_template(&mut self, _ctx: Context) -> ParseResult<TokenKind> {
        let start = self.token.start;
        let source = self.source;
        let mut cooked = Some(String::new());
        let mut raw = String::new();
        let mut chunk = self.cur;

        let kind = loop {
            match self.bytes.get(self.cur) {
                None => return Err(self.error(ErrorKind::UnterminatedTemplate, start..self.cur)),
                Some(b'`') => {
                    flush(source, chunk..self.cur, &mut cooked, &mut raw);
                    self.cur += 1;
                    break TokenKind::TEMPLATE_TAIL;
                }
                Some(b'$') if self.bytes.get(self.cur + 1) == Some(&b'{') => {
                    flush(source, chunk..self.cur, &mut cooked, &mut raw);
                    self.cur += 2;
                    break TokenKind::TEMPLATE_CONT;
                }
                Some(b'\\') => {
                    flush(source, chunk..self.cur, &mut cooked, &mut raw);
                    let escape_start = self.cur;
                    self.cur += 1;
                    if self.cur >= self.bytes.len() {
                        return Err(self.error(ErrorKind::UnterminatedTemplate, start..self.cur));
                    }

                    let escape = self.read_escape();
                    push_normalized(&source[escape_start..self.cur], &mut raw);
                    match escape {
                        Ok(Escape::Char(chr)) => {
                            if let Some(out) = cooked.as_mut() {
                                out.push(chr);
                            }
                        }
                        Ok(Escape::CodeUnit(unit)) => {
                            if let Some(out) = cooked.as_mut() {
                                let pair_start = self.cur;
                                self.push_code_unit(unit, out);
                                raw.push_str(&source[pair_start..self.cur]);
                            }
                        }
                        Ok(Escape::LineContinuation) => {}
                        _ => {
                            cooked = None;
                            self.token.flags |= TokenFlags::INVALID_TEMPLATE_ESCAPE;
                        }
                    }
                    chunk = self.cur;
                }
                // line terminators are normalized to `\n` in both cooked and raw values
                Some(b'\r') => {
                    flush(source, chunk..self.cur, &mut cooked, &mut raw);
                    self.cur += 1;
                    if self.bytes.get(self.cur) == Some(&b'\n') {
                        self.cur += 1;
                    }
                    self.newline();
                    if let Some(out) = cooked.as_mut() {
                        out.push('\n');
                    }
                    raw.push('\n');
                    chunk = self.cur;
                }
                Some(b'\n') => {
                    self.cur += 1;
                    self.newline();
                }
                Some(0xE2) if self.current_char().map_or(false, is_linebreak) => {
                    self.cur += 3;
                    self.newline();
                }
                Some(_) => self.cur += 1,
            }
        };

        self.token.value = TokenValue::Template { cooked, raw };
        Ok(kind)
    }
}

fn flush(source: &str, range: Range<usize>, cooked: &mut Option<String>, raw: &mut String) {
    let text = &source[range];
    if let Some(out) = cooked.as_mut() {
        out.push_str(text);
    }
    raw.push_str(text);
}

fn push_normalized(text: &str, raw: &mut String) {
    if text.contains('\r') {
        raw.push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
    } else {
        raw.push_str(text);
    }
}
