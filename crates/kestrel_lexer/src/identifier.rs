use crate::chars::{byte_flags, is_id_part, is_id_start, CharFlags};
use crate::{Lexer, TokenFlags, TokenValue};
use kestrel_errors::{ErrorKind, ParseResult};
use kestrel_syntax::TokenKind;
use smol_str::SmolStr;

impl<'src> Lexer<'src> {
    /// Read an identifier or keyword, the cursor must be on an identifier start or `\`.
    ///
    /// A keyword spelled with escapes is not a keyword, it is lexed as an `IDENT` with
    /// the `ESCAPED` flag and the parser decides whether that is an error.
    pub(crate) fn read_identifier(&mut self) -> ParseResult<TokenKind> {
        let start = self.cur;
        let mut name = String::new();
        let mut escaped = false;
        let mut first = true;

        loop {
            match self.bytes.get(self.cur) {
                Some(b'\\') => {
                    let chr = self.read_identifier_escape(first)?;
                    name.push(chr);
                    escaped = true;
                }
                Some(&byte) if byte < 0x80 => {
                    let wanted = if first {
                        CharFlags::IDENT_START
                    } else {
                        CharFlags::IDENT_PART
                    };
                    if !byte_flags(byte).contains(wanted) {
                        break;
                    }
                    name.push(byte as char);
                    self.cur += 1;
                }
                Some(_) => match self.current_char() {
                    Some(chr) if (first && is_id_start(chr)) || (!first && is_id_part(chr)) => {
                        name.push(chr);
                        self.cur += chr.len_utf8();
                    }
                    _ => break,
                },
                None => break,
            }
            first = false;
        }
        debug_assert!(self.cur > start);

        let kind = match TokenKind::from_keyword(&name) {
            Some(keyword) if !escaped => keyword,
            _ => TokenKind::IDENT,
        };
        if escaped {
            self.token.flags |= TokenFlags::ESCAPED;
        }
        self.token.value = TokenValue::Ident(SmolStr::new(name));
        Ok(kind)
    }

    /// Read a private name such as `#foo`, its value is the name without the `#`.
    pub(crate) fn read_private_name(&mut self) -> ParseResult<TokenKind> {
        let start = self.cur;
        self.cur += 1;
        match self.current_char() {
            Some(chr) if chr == '\\' || is_id_start(chr) => {
                self.read_identifier()?;
                Ok(TokenKind::PRIVATE_NAME)
            }
            _ => {
                self.cur = start;
                Err(self.unexpected_char())
            }
        }
    }

    // `\uXXXX` or `\u{X...}` inside of an identifier
    fn read_identifier_escape(&mut self, first: bool) -> ParseResult<char> {
        let start = self.cur;
        if self.bytes.get(self.cur + 1) != Some(&b'u') {
            return Err(self.error(ErrorKind::InvalidIdentifierEscape, start..start + 1));
        }
        self.cur += 2;

        let unit = match self.read_unicode_escape() {
            Ok(unit) => unit,
            Err(kind) => return Err(self.error(kind, start..self.cur)),
        };
        let valid = |chr: &char| {
            if first {
                is_id_start(*chr)
            } else {
                is_id_part(*chr)
            }
        };
        match char::from_u32(unit).filter(valid) {
            Some(chr) => Ok(chr),
            None => Err(self.error(ErrorKind::InvalidIdentifierEscape, start..self.cur)),
        }
    }
}
