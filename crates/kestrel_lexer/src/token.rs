use bitflags::bitflags;
use kestrel_syntax::{Span, TokenKind};
use num_bigint::BigInt;
use smol_str::SmolStr;

bitflags! {
    #[derive(Default)]
    pub struct TokenFlags: u8 {
        /// An identifier which contained a unicode escape.
        const ESCAPED = 1 << 0;
        /// A legacy octal numeral, a decimal with a leading zero, or a string with
        /// a legacy octal or `\8`/`\9` escape.
        const OCTAL = 1 << 1;
        const BIGINT = 1 << 2;
        /// A template chunk whose cooked value is undefined.
        const INVALID_TEMPLATE_ESCAPE = 1 << 3;
    }
}

/// The semantic value of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Number(f64),
    BigInt(BigInt),
    /// The cooked value of a string literal.
    String(String),
    /// The name of an identifier or keyword with escapes resolved.
    Ident(SmolStr),
    Regex {
        pattern: String,
        flags: String,
    },
    Template {
        cooked: Option<String>,
        raw: String,
    },
}

impl Default for TokenValue {
    fn default() -> Self {
        TokenValue::None
    }
}

/// The token the lexer is currently positioned on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    /// 1-based line of `start`.
    pub line: usize,
    /// 0-based byte column of `start`.
    pub column: usize,
    /// Whether a line terminator precedes this token.
    pub had_linebreak: bool,
    pub flags: TokenFlags,
    pub value: TokenValue,
}

impl Token {
    pub(crate) fn eof(start: usize, line: usize, column: usize) -> Self {
        Self {
            kind: TokenKind::EOF,
            start,
            end: start,
            line,
            column,
            had_linebreak: false,
            flags: TokenFlags::empty(),
            value: TokenValue::None,
        }
    }

    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The identifier name of an `IDENT` or keyword token.
    pub fn ident(&self) -> Option<&SmolStr> {
        match &self.value {
            TokenValue::Ident(name) => Some(name),
            _ => None,
        }
    }

    #[inline]
    pub fn is_escaped(&self) -> bool {
        self.flags.contains(TokenFlags::ESCAPED)
    }
}
