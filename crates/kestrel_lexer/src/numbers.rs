//! Numeric literals.
//!
//! Integers which fit in 2^53 are accumulated while scanning, everything else is handed to
//! `lexical` so floats are correctly rounded. BigInt values go through `num-bigint`.

use crate::chars::{byte_flags, is_id_start, is_radix_digit, CharFlags};
use crate::{Lexer, TokenFlags, TokenValue};
use kestrel_errors::{ErrorKind, ParseResult};
use kestrel_syntax::{Context, TokenKind};
use num_bigint::BigInt;

const MAX_SAFE_INTEGER: u64 = 1 << 53;

struct DigitRun {
    count: usize,
    /// The exact value of the digits, `None` if it overflowed.
    value: Option<u64>,
}

impl<'src> Lexer<'src> {
    /// Scan a number starting with a digit or a `.` followed by a digit.
    pub(crate) fn read_number(&mut self, ctx: Context) -> ParseResult<TokenKind> {
        let start = self.cur;
        let kind = match self.bytes.get(self.cur) {
            Some(b'0') => self.read_zero(ctx, start)?,
            Some(b'.') => self.read_decimal_tail(start, String::new(), true)?,
            _ => self.read_decimal(start)?,
        };
        self.verify_number_end()?;
        Ok(kind)
    }

    // Read digits of `radix` into `buf`, single `_` separators are allowed between digits
    fn read_digits(&mut self, radix: u32, buf: &mut String) -> ParseResult<DigitRun> {
        let mut run = DigitRun {
            count: 0,
            value: Some(0),
        };
        let mut separator = None;

        loop {
            match self.bytes.get(self.cur) {
                Some(b'_') => {
                    if run.count == 0 {
                        return Err(self.error(
                            ErrorKind::UnexpectedNumericSeparator,
                            self.cur..self.cur + 1,
                        ));
                    }
                    if separator.is_some() {
                        return Err(self.error(
                            ErrorKind::ContinuousNumericSeparator,
                            self.cur..self.cur + 1,
                        ));
                    }
                    separator = Some(self.cur);
                }
                Some(&byte) if is_radix_digit(byte, radix) => {
                    let digit = u64::from((byte as char).to_digit(radix).unwrap_or(0));
                    run.value = run
                        .value
                        .and_then(|v| v.checked_mul(u64::from(radix)))
                        .and_then(|v| v.checked_add(digit));
                    run.count += 1;
                    separator = None;
                    buf.push(byte as char);
                }
                _ => break,
            }
            self.cur += 1;
        }

        if let Some(pos) = separator {
            return Err(self.error(ErrorKind::TrailingNumericSeparator, pos..pos + 1));
        }
        Ok(run)
    }

    fn read_zero(&mut self, ctx: Context, start: usize) -> ParseResult<TokenKind> {
        match self.bytes.get(self.cur + 1) {
            Some(b'x') | Some(b'X') => self.read_radix(16, start, ErrorKind::MissingHexDigits),
            Some(b'o') | Some(b'O') => self.read_radix(8, start, ErrorKind::MissingOctalDigits),
            Some(b'b') | Some(b'B') => self.read_radix(2, start, ErrorKind::MissingBinaryDigits),
            Some(b'0'..=b'9') => self.read_legacy(ctx, start),
            Some(b'_') => Err(self.error(
                ErrorKind::UnexpectedNumericSeparator,
                self.cur + 1..self.cur + 2,
            )),
            _ => {
                self.cur += 1;
                self.read_decimal_tail(start, "0".to_string(), true)
            }
        }
    }

    fn read_radix(&mut self, radix: u32, start: usize, missing: ErrorKind) -> ParseResult<TokenKind> {
        self.cur += 2;
        let mut digits = String::new();
        let run = self.read_digits(radix, &mut digits)?;
        if run.count == 0 {
            return Err(self.error(missing, start..self.cur));
        }

        if self.bytes.get(self.cur) == Some(&b'n') {
            self.cur += 1;
            return self.finish_bigint(&digits, radix, start);
        }

        let value = match run.value {
            Some(value) if value <= MAX_SAFE_INTEGER => value as f64,
            _ => lexical::parse_radix::<f64, _>(digits.as_bytes(), radix as u8)
                .map_err(|_| self.error(ErrorKind::InvalidNumber, start..self.cur))?,
        };
        self.token.value = TokenValue::Number(value);
        Ok(TokenKind::NUMBER)
    }

    // `0` followed by more digits, either a legacy octal or a decimal with leading zeros
    fn read_legacy(&mut self, ctx: Context, start: usize) -> ParseResult<TokenKind> {
        self.cur += 1;
        let mut digits = String::new();
        let mut octal = true;

        while let Some(&byte) = self.bytes.get(self.cur) {
            match byte {
                b'0'..=b'9' => {
                    octal &= byte < b'8';
                    digits.push(byte as char);
                    self.cur += 1;
                }
                b'_' => {
                    return Err(self.error(
                        ErrorKind::UnexpectedNumericSeparator,
                        self.cur..self.cur + 1,
                    ))
                }
                _ => break,
            }
        }

        if octal {
            if self.bytes.get(self.cur) == Some(&b'n') {
                return Err(self.error(ErrorKind::InvalidBigInt, start..self.cur + 1));
            }
            self.note_legacy_octal(ctx, ErrorKind::StrictOctalLiteral, start..self.cur)?;
            let value = digits
                .bytes()
                .fold(0f64, |acc, byte| acc * 8.0 + f64::from(byte - b'0'));
            self.token.value = TokenValue::Number(value);
            return Ok(TokenKind::NUMBER);
        }

        let trimmed = digits.trim_start_matches('0');
        let int = if trimmed.is_empty() { "0" } else { trimmed };
        let kind = self.read_decimal_tail(start, int.to_string(), false)?;
        self.note_legacy_octal(ctx, ErrorKind::StrictDecimalWithLeadingZero, start..self.cur)?;
        Ok(kind)
    }

    fn read_decimal(&mut self, start: usize) -> ParseResult<TokenKind> {
        let mut int = String::new();
        let run = self.read_digits(10, &mut int)?;

        match self.bytes.get(self.cur) {
            Some(b'.') | Some(b'e') | Some(b'E') | Some(b'n') => {}
            _ => {
                if let Some(value) = run.value.filter(|v| *v <= MAX_SAFE_INTEGER) {
                    self.token.value = TokenValue::Number(value as f64);
                    return Ok(TokenKind::NUMBER);
                }
            }
        }
        self.read_decimal_tail(start, int, true)
    }

    /// Read the optional fraction, exponent and BigInt suffix after the integer part.
    /// `text` accumulates the literal without separators for the final float parse.
    fn read_decimal_tail(
        &mut self,
        start: usize,
        mut text: String,
        allow_bigint: bool,
    ) -> ParseResult<TokenKind> {
        let mut float = false;

        if self.bytes.get(self.cur) == Some(&b'.') {
            float = true;
            self.cur += 1;
            if self.bytes.get(self.cur) == Some(&b'_') {
                return Err(self.error(
                    ErrorKind::UnexpectedNumericSeparator,
                    self.cur..self.cur + 1,
                ));
            }
            let mut fraction = String::new();
            self.read_digits(10, &mut fraction)?;
            if text.is_empty() {
                text.push('0');
            }
            if !fraction.is_empty() {
                text.push('.');
                text.push_str(&fraction);
            }
        }

        if let Some(b'e') | Some(b'E') = self.bytes.get(self.cur) {
            float = true;
            self.cur += 1;
            let mut exponent = String::new();
            match self.bytes.get(self.cur) {
                Some(b'+') => self.cur += 1,
                Some(b'-') => {
                    exponent.push('-');
                    self.cur += 1;
                }
                _ => {}
            }
            let run = self.read_digits(10, &mut exponent)?;
            if run.count == 0 {
                return Err(self.error(ErrorKind::MissingExponent, start..self.cur));
            }
            text.push('e');
            text.push_str(&exponent);
        }

        if self.bytes.get(self.cur) == Some(&b'n') {
            if float || !allow_bigint {
                return Err(self.error(ErrorKind::InvalidBigInt, start..self.cur + 1));
            }
            self.cur += 1;
            return self.finish_bigint(&text, 10, start);
        }

        let value = lexical::parse::<f64, _>(text.as_bytes())
            .map_err(|_| self.error(ErrorKind::InvalidNumber, start..self.cur))?;
        self.token.value = TokenValue::Number(value);
        Ok(TokenKind::NUMBER)
    }

    fn finish_bigint(&mut self, digits: &str, radix: u32, start: usize) -> ParseResult<TokenKind> {
        let value = BigInt::parse_bytes(digits.as_bytes(), radix)
            .ok_or_else(|| self.error(ErrorKind::InvalidBigInt, start..self.cur))?;
        self.token.flags |= TokenFlags::BIGINT;
        self.token.value = TokenValue::BigInt(value);
        Ok(TokenKind::BIG_INT)
    }

    // `3in x` and `1a` are errors, a numeric literal must not touch an identifier
    fn verify_number_end(&self) -> ParseResult<()> {
        let touches = match self.bytes.get(self.cur) {
            Some(b'\\') => true,
            Some(&byte) if byte < 0x80 => {
                byte_flags(byte).intersects(CharFlags::IDENT_START | CharFlags::DECIMAL)
            }
            Some(_) => self.current_char().map_or(false, is_id_start),
            None => false,
        };

        if touches {
            let len = self.current_char().map_or(1, char::len_utf8);
            return Err(self.error(ErrorKind::IdStartAfterNumber, self.cur..self.cur + len));
        }
        Ok(())
    }
}
