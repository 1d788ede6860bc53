//! Regular expression literals.
//!
//! Only the boundaries of the body and the flags are validated, the pattern itself is
//! kept as opaque text.

use crate::chars::{is_id_part, is_linebreak};
use crate::{Lexer, TokenValue};
use bitflags::bitflags;
use kestrel_errors::{ErrorKind, ParseResult};
use kestrel_syntax::TokenKind;

bitflags! {
    pub struct RegexFlags: u8 {
        /// Generate indices for substring matches
        const D = 1 << 0;
        /// Global search
        const G = 1 << 1;
        /// Case-insensitive search
        const I = 1 << 2;
        /// Multiline mode
        const M = 1 << 3;
        /// Allows `.` to match newlines
        const S = 1 << 4;
        /// Full unicode support
        const U = 1 << 5;
        /// Unicode sets, a superset of `u`
        const V = 1 << 6;
        /// Sticky mode
        const Y = 1 << 7;
    }
}

impl RegexFlags {
    pub fn from_char(chr: char) -> Option<Self> {
        let flag = match chr {
            'd' => RegexFlags::D,
            'g' => RegexFlags::G,
            'i' => RegexFlags::I,
            'm' => RegexFlags::M,
            's' => RegexFlags::S,
            'u' => RegexFlags::U,
            'v' => RegexFlags::V,
            'y' => RegexFlags::Y,
            _ => return None,
        };
        Some(flag)
    }
}

impl<'src> Lexer<'src> {
    /// Read a regex literal, the cursor must be on the opening `/`.
    pub(crate) fn read_regex(&mut self) -> ParseResult<TokenKind> {
        let start = self.cur;
        let mut in_class = false;
        self.cur += 1;

        loop {
            let chr = match self.current_char() {
                Some(chr) if !is_linebreak(chr) => chr,
                _ => return Err(self.error(ErrorKind::UnterminatedRegExp, start..self.cur)),
            };
            self.cur += chr.len_utf8();
            match chr {
                '\\' => match self.current_char() {
                    Some(escaped) if !is_linebreak(escaped) => self.cur += escaped.len_utf8(),
                    _ => return Err(self.error(ErrorKind::UnterminatedRegExp, start..self.cur)),
                },
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        let pattern = self.source[start + 1..self.cur - 1].to_string();

        let flags_start = self.cur;
        let mut flags = RegexFlags::empty();
        while let Some(chr) = self.current_char() {
            if chr != '\\' && !is_id_part(chr) {
                break;
            }
            let range = self.cur..self.cur + chr.len_utf8();
            let flag = match RegexFlags::from_char(chr) {
                Some(flag) => flag,
                None => return Err(self.error(ErrorKind::InvalidRegExpFlag(chr), range)),
            };
            if flags.contains(flag) {
                return Err(self.error(ErrorKind::DuplicateRegExpFlag(chr), range));
            }
            flags |= flag;
            self.cur = range.end;
        }
        if flags.contains(RegexFlags::U | RegexFlags::V) {
            return Err(self.error(
                ErrorKind::InvalidRegExpFlag('v'),
                flags_start..self.cur,
            ));
        }

        self.token.value = TokenValue::Regex {
            pattern,
            flags: self.source[flags_start..self.cur].to_string(),
        };
        Ok(TokenKind::REGEX)
    }
}
