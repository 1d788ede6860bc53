use crate::{tokenize, Lexer, Token, TokenFlags, TokenValue};
use kestrel_errors::ErrorKind;
use kestrel_syntax::{Context, TokenKind};
use quickcheck_macros::quickcheck;

macro_rules! assert_lex {
    ($src:expr, $($kind:ident:$len:expr $(,)?)*) => {{
        let tokens = tokenize($src, Context::empty()).unwrap();
        #[allow(unused_mut)]
        let mut idx = 0;

        $(
            assert_eq!(tokens[idx].kind, TokenKind::$kind,
                "expected token kind {}, but found {:?}", stringify!($kind), tokens[idx].kind
            );
            assert_eq!(tokens[idx].len(), $len,
                "expected token length of {}, but found {} for token {:?}", $len, tokens[idx].len(), tokens[idx].kind);
            idx += 1;
        )*

        assert_eq!(idx, tokens.len());
    }}
}

fn lex_one(src: &str, ctx: Context) -> Token {
    let mut lexer = Lexer::new(src);
    lexer.next_token(ctx).unwrap();
    lexer.token().clone()
}

fn lex_err(src: &str, ctx: Context) -> ErrorKind {
    tokenize(src, ctx).unwrap_err().kind
}

fn number(src: &str) -> f64 {
    match lex_one(src, Context::empty()).value {
        TokenValue::Number(value) => value,
        other => panic!("expected a number for {:?}, found {:?}", src, other),
    }
}

fn string(src: &str) -> String {
    match lex_one(src, Context::empty()).value {
        TokenValue::String(value) => value,
        other => panic!("expected a string for {:?}, found {:?}", src, other),
    }
}

#[test]
fn empty() {
    assert_lex! {
        "",
    }
}

#[test]
fn identifier() {
    assert_lex! {
        "Abcdefg",
        IDENT:7
    }
}

#[test]
fn punctuators() {
    assert_lex! {
        "!%%&()*+,-.:;<=>?[]^{}|~",
        BANG:1,
        PERCENT:1,
        PERCENT:1,
        AMP:1,
        L_PAREN:1,
        R_PAREN:1,
        STAR:1,
        PLUS:1,
        COMMA:1,
        MINUS:1,
        DOT:1,
        COLON:1,
        SEMICOLON:1,
        L_ANGLE:1,
        EQ:1,
        R_ANGLE:1,
        QUESTION:1,
        L_BRACK:1,
        R_BRACK:1,
        CARET:1,
        L_CURLY:1,
        R_CURLY:1,
        PIPE:1,
        TILDE:1,
    }
}

#[test]
fn longest_punctuator_wins() {
    assert_lex! {
        ">>>= >>= >>> ?? ??= ?. **= ... &&= ||= => !== ===",
        USHREQ:4,
        SHREQ:3,
        USHR:3,
        QUESTION2:2,
        QUESTION2EQ:3,
        QUESTIONDOT:2,
        STAR2EQ:3,
        DOT3:3,
        AMP2EQ:3,
        PIPE2EQ:3,
        FAT_ARROW:2,
        NEQ2:3,
        EQ3:3,
    }
}

#[test]
fn optional_chain_is_not_taken_before_a_digit() {
    assert_lex! {
        "a?.5:b",
        IDENT:1,
        QUESTION:1,
        NUMBER:2,
        COLON:1,
        IDENT:1,
    }
}

#[test]
fn unicode_whitespace_is_trivia() {
    assert_lex! {
        "a\u{00a0}\u{1680}\u{2000}\u{3000}\u{FEFF}b",
        IDENT:1,
        IDENT:1,
    }
}

#[test]
fn comments_and_linebreaks() {
    let tokens = tokenize("a /* \n */ b // c\n d /* */ e", Context::empty()).unwrap();
    let breaks: Vec<_> = tokens.iter().map(|t| t.had_linebreak).collect();
    assert_eq!(breaks, vec![false, true, true, false]);
    assert_eq!((tokens[2].line, tokens[2].column), (3, 1));
}

#[test]
fn line_and_column() {
    let tokens = tokenize("a\r\n  b\u{2028}c", Context::empty()).unwrap();
    assert_eq!((tokens[1].line, tokens[1].column), (2, 2));
    assert_eq!((tokens[2].line, tokens[2].column), (3, 0));
}

#[test]
fn unterminated_block_comment() {
    assert_eq!(lex_err("a /* b", Context::empty()), ErrorKind::UnterminatedComment);
}

#[test]
fn html_comments_in_scripts() {
    assert_lex! {
        "a <!-- b\n--> c\nd",
        IDENT:1,
        IDENT:1,
    }
    assert_lex! {
        "--> x\ny",
        IDENT:1,
    }
}

#[test]
fn html_comments_are_operators_in_modules() {
    let kinds: Vec<_> = tokenize("a <!-- b", Context::MODULE)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::IDENT,
            TokenKind::L_ANGLE,
            TokenKind::BANG,
            TokenKind::MINUS2,
            TokenKind::IDENT
        ]
    );
}

#[test]
fn hashbang_is_skipped() {
    let tokens = tokenize("#!/usr/bin/env node\nfoo", Context::empty()).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].line, 2);
    assert!(tokens[0].had_linebreak);
}

#[test]
fn unexpected_character() {
    assert_eq!(lex_err("a # b", Context::empty()), ErrorKind::UnexpectedCharacter('#'));
    assert_eq!(lex_err("\u{2E80}", Context::empty()), ErrorKind::UnexpectedCharacter('\u{2E80}'));
}

#[test]
fn private_names() {
    let tok = lex_one("#foo", Context::empty());
    assert_eq!(tok.kind, TokenKind::PRIVATE_NAME);
    assert_eq!(tok.ident().map(|s| s.as_str()), Some("foo"));
    assert_eq!(tok.len(), 4);

    let keyword = lex_one("#if", Context::empty());
    assert_eq!(keyword.kind, TokenKind::PRIVATE_NAME);
    assert_eq!(keyword.ident().map(|s| s.as_str()), Some("if"));

    let escaped = lex_one("#\\u0061", Context::empty());
    assert_eq!(escaped.kind, TokenKind::PRIVATE_NAME);
    assert_eq!(escaped.ident().map(|s| s.as_str()), Some("a"));

    assert_eq!(lex_err("# foo", Context::empty()), ErrorKind::UnexpectedCharacter('#'));
    assert_eq!(lex_err("#1", Context::empty()), ErrorKind::UnexpectedCharacter('#'));
}

#[test]
fn keywords_and_escaped_identifiers() {
    assert_eq!(lex_one("if", Context::empty()).kind, TokenKind::IF_KW);
    assert_eq!(lex_one("yield", Context::empty()).kind, TokenKind::IDENT);

    let escaped = lex_one("\\u{69}f", Context::empty());
    assert_eq!(escaped.kind, TokenKind::IDENT);
    assert!(escaped.is_escaped());
    assert_eq!(escaped.ident().map(|s| s.as_str()), Some("if"));

    let tok = lex_one("\\u0061b\\u0063", Context::empty());
    assert_eq!(tok.ident().map(|s| s.as_str()), Some("abc"));
    assert_eq!(tok.len(), 13);

    assert_lex! {
        "café",
        IDENT:5
    }
}

#[test]
fn invalid_identifier_escapes() {
    assert_eq!(lex_err("\\u0030a", Context::empty()), ErrorKind::InvalidIdentifierEscape);
    assert_eq!(lex_err("a\\u002D", Context::empty()), ErrorKind::InvalidIdentifierEscape);
    assert_eq!(lex_err("a\\x41", Context::empty()), ErrorKind::InvalidIdentifierEscape);
    assert_eq!(lex_err("\\u{zz}", Context::empty()), ErrorKind::InvalidUnicodeEscape);
}

#[test]
fn numeric_values() {
    assert_eq!(number("0x1F"), 31.0);
    assert_eq!(number("0o17"), 15.0);
    assert_eq!(number("0B101"), 5.0);
    assert_eq!(number("1_000_000"), 1_000_000.0);
    assert_eq!(number(".5"), 0.5);
    assert_eq!(number("5."), 5.0);
    assert_eq!(number("1e3"), 1000.0);
    assert_eq!(number("2.5E-1"), 0.25);
    assert_eq!(number("1_0.0_1e1_0"), 10.01e10);
    assert_eq!(number("0"), 0.0);
    assert_eq!(number("0.1"), 0.1);
}

#[test]
fn large_numbers_are_rounded() {
    assert_eq!(number("9007199254740993"), 9007199254740992.0);
    assert_eq!(number("0x20000000000000000"), 2f64.powi(65));
    assert_eq!(number("1_000e-3"), 1.0);
}

#[test]
fn legacy_octal_and_leading_zero_decimals() {
    let octal = lex_one("017", Context::empty());
    assert_eq!(octal.value, TokenValue::Number(15.0));
    assert!(octal.flags.contains(TokenFlags::OCTAL));

    assert_eq!(number("019"), 19.0);
    assert_eq!(number("08.5"), 8.5);
    assert_eq!(number("0098"), 98.0);
    // `.` is not part of a legacy octal literal
    assert_lex! {
        "07.5",
        NUMBER:2,
        NUMBER:2,
    }
}

#[test]
fn legacy_octal_in_strict_mode() {
    assert_eq!(lex_err("017", Context::STRICT), ErrorKind::StrictOctalLiteral);
    assert_eq!(lex_err("019", Context::STRICT), ErrorKind::StrictDecimalWithLeadingZero);
    assert_eq!(lex_err("08.5", Context::STRICT), ErrorKind::StrictDecimalWithLeadingZero);
}

#[test]
fn bigint_literals() {
    let tok = lex_one("123n", Context::empty());
    assert_eq!(tok.kind, TokenKind::BIG_INT);
    assert_eq!(tok.value, TokenValue::BigInt(123.into()));
    assert!(tok.flags.contains(TokenFlags::BIGINT));

    assert_eq!(lex_one("0x1Fn", Context::empty()).value, TokenValue::BigInt(31.into()));
    assert_eq!(lex_one("0n", Context::empty()).value, TokenValue::BigInt(0.into()));
    assert_eq!(lex_one("1_0n", Context::empty()).value, TokenValue::BigInt(10.into()));
}

#[test]
fn invalid_bigints() {
    assert_eq!(lex_err("1.5n", Context::empty()), ErrorKind::InvalidBigInt);
    assert_eq!(lex_err("1e3n", Context::empty()), ErrorKind::InvalidBigInt);
    assert_eq!(lex_err("017n", Context::empty()), ErrorKind::InvalidBigInt);
    assert_eq!(lex_err("08n", Context::empty()), ErrorKind::InvalidBigInt);
    assert_eq!(lex_err("0008n", Context::STRICT), ErrorKind::InvalidBigInt);
}

#[test]
fn numeric_separator_errors() {
    assert_eq!(lex_err("1_", Context::empty()), ErrorKind::TrailingNumericSeparator);
    assert_eq!(lex_err("1__0", Context::empty()), ErrorKind::ContinuousNumericSeparator);
    assert_eq!(lex_err("0x_1", Context::empty()), ErrorKind::UnexpectedNumericSeparator);
    assert_eq!(lex_err("0_1", Context::empty()), ErrorKind::UnexpectedNumericSeparator);
    assert_eq!(lex_err("08_1", Context::empty()), ErrorKind::UnexpectedNumericSeparator);
    assert_eq!(lex_err("1._5", Context::empty()), ErrorKind::UnexpectedNumericSeparator);
    assert_eq!(lex_err("1e_5", Context::empty()), ErrorKind::UnexpectedNumericSeparator);
}

#[test]
fn malformed_numbers() {
    assert_eq!(lex_err("0x", Context::empty()), ErrorKind::MissingHexDigits);
    assert_eq!(lex_err("0o9", Context::empty()), ErrorKind::MissingOctalDigits);
    assert_eq!(lex_err("0b", Context::empty()), ErrorKind::MissingBinaryDigits);
    assert_eq!(lex_err("1e", Context::empty()), ErrorKind::MissingExponent);
    assert_eq!(lex_err("1e+", Context::empty()), ErrorKind::MissingExponent);
    assert_eq!(lex_err("3in x", Context::empty()), ErrorKind::IdStartAfterNumber);
    assert_eq!(lex_err("0b12", Context::empty()), ErrorKind::IdStartAfterNumber);
    assert_eq!(lex_err("1\\u0061", Context::empty()), ErrorKind::IdStartAfterNumber);
}

#[test]
fn string_escapes() {
    assert_eq!(string(r"'a\nb'"), "a\nb");
    assert_eq!(string(r#""\x41B\u{43}""#), "ABC");
    assert_eq!(string(r"'😀'"), "😀");
    assert_eq!(string(r"'\uD83D'"), "\u{FFFD}");
    assert_eq!(string("'a\\\nb'"), "ab");
    assert_eq!(string("'a\\\r\nb'"), "ab");
    assert_eq!(string(r"'\0'"), "\0");
    assert_eq!(string(r"'\q'"), "q");
    assert_eq!(string("'a\u{2028}b'"), "a\u{2028}b");
}

#[test]
fn legacy_string_escapes() {
    let tok = lex_one(r"'\101\8'", Context::empty());
    assert_eq!(tok.value, TokenValue::String("A8".into()));
    assert!(tok.flags.contains(TokenFlags::OCTAL));

    assert_eq!(string(r"'\08'"), "\u{0}8");
    assert_eq!(string(r"'\400'"), " 0");
    assert_eq!(lex_err(r"'\101'", Context::STRICT), ErrorKind::StrictOctalEscape);
    assert_eq!(lex_err(r"'\00'", Context::STRICT), ErrorKind::StrictOctalEscape);
    assert_eq!(lex_err(r"'\9'", Context::STRICT), ErrorKind::StrictEightOrNineEscape);
    assert_eq!(string(r"'\0'"), "\0");
}

#[test]
fn malformed_strings() {
    assert_eq!(lex_err("'abc", Context::empty()), ErrorKind::UnterminatedString);
    assert_eq!(lex_err("'a\nb'", Context::empty()), ErrorKind::UnterminatedString);
    assert_eq!(lex_err("'a\\", Context::empty()), ErrorKind::UnterminatedString);
    assert_eq!(lex_err(r"'\u{110000}'", Context::empty()), ErrorKind::UnicodeOverflow);
    assert_eq!(lex_err(r"'\xZ1'", Context::empty()), ErrorKind::InvalidHexEscape);
    assert_eq!(lex_err(r"'\u12'", Context::empty()), ErrorKind::InvalidUnicodeEscape);
}

#[test]
fn legacy_octal_is_remembered_until_taken() {
    let mut lexer = Lexer::new(r"'\07' 017");
    lexer.next_token(Context::empty()).unwrap();
    lexer.next_token(Context::empty()).unwrap();

    let err = lexer.take_legacy_octal().unwrap();
    assert_eq!(err.kind, ErrorKind::StrictOctalEscape);
    assert_eq!(err.range, 1..4);
    assert!(lexer.take_legacy_octal().is_none());

    let mut lexer = Lexer::new("017");
    lexer.next_token(Context::empty()).unwrap();
    lexer.reset_legacy_octal();
    assert!(lexer.take_legacy_octal().is_none());
}

#[test]
fn template_continuation() {
    let ctx = Context::empty();
    let mut lexer = Lexer::new("`a${x}b`");
    lexer.next_token(ctx).unwrap();
    assert_eq!(lexer.token().kind, TokenKind::TEMPLATE_CONT);
    assert_eq!(
        lexer.token().value,
        TokenValue::Template {
            cooked: Some("a".into()),
            raw: "a".into()
        }
    );

    lexer.next_token(ctx).unwrap();
    assert_eq!(lexer.token().kind, TokenKind::IDENT);
    lexer.next_token(ctx).unwrap();
    assert_eq!(lexer.token().kind, TokenKind::R_CURLY);

    lexer.rescan_template_continuation(ctx).unwrap();
    assert_eq!(lexer.token().kind, TokenKind::TEMPLATE_TAIL);
    assert_eq!(lexer.raw(), "}b`");
    lexer.next_token(ctx).unwrap();
    assert_eq!(lexer.token().kind, TokenKind::EOF);
}

#[test]
fn template_invalid_escape_has_no_cooked_value() {
    let tok = lex_one(r"`\unicode and \01`", Context::empty());
    assert_eq!(tok.kind, TokenKind::TEMPLATE_TAIL);
    assert!(tok.flags.contains(TokenFlags::INVALID_TEMPLATE_ESCAPE));
    assert_eq!(
        tok.value,
        TokenValue::Template {
            cooked: None,
            raw: r"\unicode and \01".into()
        }
    );
}

#[test]
fn template_line_terminators_are_normalized() {
    let tok = lex_one("`a\r\nb\rc\\\r\nd`", Context::empty());
    assert_eq!(
        tok.value,
        TokenValue::Template {
            cooked: Some("a\nb\ncd".into()),
            raw: "a\nb\nc\\\nd".into()
        }
    );
}

#[test]
fn unterminated_template() {
    assert_eq!(lex_err("`abc", Context::empty()), ErrorKind::UnterminatedTemplate);
}

fn regex(src: &str) -> Result<Token, ErrorKind> {
    let mut lexer = Lexer::new(src);
    lexer.next_token(Context::empty()).unwrap();
    lexer
        .rescan_regex(Context::empty())
        .map(|_| lexer.token().clone())
        .map_err(|err| err.kind)
}

#[test]
fn regex_literals() {
    let tok = regex("/a[/]b\\//gi").unwrap();
    assert_eq!(tok.kind, TokenKind::REGEX);
    assert_eq!(tok.len(), 11);
    assert_eq!(
        tok.value,
        TokenValue::Regex {
            pattern: "a[/]b\\/".into(),
            flags: "gi".into()
        }
    );

    let tok = regex("/=a/").unwrap();
    assert_eq!(
        tok.value,
        TokenValue::Regex {
            pattern: "=a".into(),
            flags: "".into()
        }
    );
}

#[test]
fn regex_errors() {
    assert_eq!(regex("/a/gg").unwrap_err(), ErrorKind::DuplicateRegExpFlag('g'));
    assert_eq!(regex("/a/x").unwrap_err(), ErrorKind::InvalidRegExpFlag('x'));
    assert_eq!(regex("/a/uv").unwrap_err(), ErrorKind::InvalidRegExpFlag('v'));
    assert_eq!(regex("/a\n/").unwrap_err(), ErrorKind::UnterminatedRegExp);
    assert_eq!(regex("/a\\").unwrap_err(), ErrorKind::UnterminatedRegExp);
}

#[test]
fn checkpoint_and_rewind() {
    let ctx = Context::empty();
    let mut lexer = Lexer::new("a b c");
    lexer.next_token(ctx).unwrap();
    let checkpoint = lexer.checkpoint();
    lexer.next_token(ctx).unwrap();
    lexer.next_token(ctx).unwrap();
    assert_eq!(lexer.raw(), "c");

    lexer.rewind(checkpoint);
    assert_eq!(lexer.raw(), "a");
    assert_eq!(lexer.lookahead(ctx).unwrap().start, 2);
    assert_eq!(lexer.raw(), "a");
}

#[quickcheck]
fn hex_literals_keep_their_value(value: u32) -> bool {
    let src = format!("0x{:x}", value);
    number(&src) == value as f64
}

#[quickcheck]
fn grouped_decimals_keep_their_value(value: u64) -> bool {
    let digits = value.to_string();
    let mut grouped = String::new();
    for (idx, chr) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('_');
        }
        grouped.push(chr);
    }
    number(&grouped) == value as f64
}
