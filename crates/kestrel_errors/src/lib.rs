//! Errors produced by the kestrel lexer and parser.
//!
//! Parsing is fail-fast: the first lexical, syntactic or early error aborts the parse
//! and is returned as a single [`ParseError`]. Every error kind lives in the closed
//! [`ErrorKind`] catalogue, its message comes from the `#[error]` template.

mod emit;
pub mod file;

pub use emit::emit;
pub use file::{line_starts, LineIndex};

use codespan_reporting::diagnostic::{Diagnostic, Label};
use std::ops::Range;
use thiserror::Error;

/// Every error the lexer or parser can raise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // lexical errors
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated template literal")]
    UnterminatedTemplate,
    #[error("unterminated regular expression literal")]
    UnterminatedRegExp,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid hexadecimal escape sequence")]
    InvalidHexEscape,
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    #[error("unicode code point escapes must not be greater than 0x10FFFF")]
    UnicodeOverflow,
    #[error("unicode escape sequence does not produce a valid identifier character")]
    InvalidIdentifierEscape,
    #[error("octal escape sequences are not allowed in strict mode")]
    StrictOctalEscape,
    #[error("`\\8` and `\\9` escape sequences are not allowed in strict mode")]
    StrictEightOrNineEscape,
    #[error("invalid escape sequence in template literal")]
    InvalidTemplateEscape,
    #[error("invalid regular expression flag `{0}`")]
    InvalidRegExpFlag(char),
    #[error("duplicate regular expression flag `{0}`")]
    DuplicateRegExpFlag(char),
    #[error("expected hexadecimal digits after `0x`")]
    MissingHexDigits,
    #[error("expected octal digits after `0o`")]
    MissingOctalDigits,
    #[error("expected binary digits after `0b`")]
    MissingBinaryDigits,
    #[error("numeric separators are not allowed at the end of numeric literals")]
    TrailingNumericSeparator,
    #[error("only one underscore is allowed as a numeric separator")]
    ContinuousNumericSeparator,
    #[error("numeric separators are not allowed here")]
    UnexpectedNumericSeparator,
    #[error("octal literals are not allowed in strict mode")]
    StrictOctalLiteral,
    #[error("decimals with leading zeros are not allowed in strict mode")]
    StrictDecimalWithLeadingZero,
    #[error("invalid BigInt literal")]
    InvalidBigInt,
    #[error("exponent part of a numeric literal is missing its digits")]
    MissingExponent,
    #[error("an identifier or digit cannot immediately follow a numeric literal")]
    IdStartAfterNumber,
    #[error("invalid numeric literal")]
    InvalidNumber,

    // syntax errors
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("expected `{0}` but found `{1}`")]
    Expected(&'static str, String),

    // early errors
    #[error("`{0}` is a reserved word")]
    ReservedWord(String),
    #[error("`{0}` is a reserved word in strict mode")]
    StrictReservedWord(String),
    #[error("keywords cannot contain escape characters")]
    EscapedKeyword,
    #[error("`{0}` cannot be declared or assigned in strict mode")]
    StrictEvalArguments(String),
    #[error("`with` statements are not allowed in strict mode")]
    StrictWith,
    #[error("deleting an unqualified identifier is not allowed in strict mode")]
    StrictDelete,
    #[error("in strict mode code functions can only be declared at the top level or inside a block")]
    StrictFunctionDeclaration,
    #[error("function declarations are not allowed in a single statement context")]
    FunctionDeclarationPlacement,
    #[error("lexical declarations are not allowed in a single statement context")]
    LexicalDeclarationPlacement,
    #[error("`let` cannot be used as a lexically bound name")]
    LetInLexicalBinding,
    #[error("duplicate parameter name `{0}`")]
    DuplicateParameter(String),
    #[error("identifier `{0}` has already been declared")]
    DuplicateBinding(String),
    #[error("\"use strict\" is not allowed in functions with non-simple parameters")]
    IllegalUseStrict,
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("invalid update expression target")]
    InvalidUpdateTarget,
    #[error("invalid destructuring target")]
    InvalidDestructuringTarget,
    #[error("for-in and for-of loop variable declarations may not have an initializer")]
    ForInOfInitializer,
    #[error("only a single variable can be declared in the head of a for-in or for-of loop")]
    ForInOfMultipleBindings,
    #[error("the left side of a for-of loop may not be `async`")]
    ForOfAsync,
    #[error("a rest element must be the last element")]
    RestNotLast,
    #[error("rest elements cannot have an initializer")]
    RestWithInitializer,
    #[error("a rest element may not be followed by a trailing comma")]
    RestTrailingComma,
    #[error("shorthand property initializers are only allowed in destructuring patterns")]
    InvalidCoverInitializedName,
    #[error("duplicate `__proto__` properties are not allowed in object literals")]
    DuplicateProto,
    #[error("missing initializer in const declaration")]
    ConstWithoutInitializer,
    #[error("missing initializer in destructuring declaration")]
    DestructuringWithoutInitializer,
    #[error("yield expressions are not allowed in formal parameters")]
    YieldInParameter,
    #[error("await expressions are not allowed in formal parameters")]
    AwaitInParameter,
    #[error("`yield` cannot be used as an identifier inside of a generator")]
    YieldIdentifier,
    #[error("`await` cannot be used as an identifier inside of an async function or module")]
    AwaitIdentifier,
    #[error("illegal return statement outside of a function")]
    IllegalReturn,
    #[error("illegal break statement outside of a loop or switch")]
    IllegalBreak,
    #[error("illegal continue statement outside of a loop")]
    IllegalContinue,
    #[error("undefined label `{0}`")]
    UnknownLabel(String),
    #[error("label `{0}` has already been declared")]
    DuplicateLabel(String),
    #[error("label `{0}` does not denote an iteration statement")]
    InvalidContinueLabel(String),
    #[error("line breaks are not allowed after `throw`")]
    NewlineAfterThrow,
    #[error("more than one default clause in switch statement")]
    MultipleDefaults,
    #[error("missing catch or finally after try")]
    MissingCatchOrFinally,
    #[error("`new.target` is only allowed inside of functions")]
    InvalidNewTarget,
    #[error("`super` property access is only allowed inside of methods")]
    InvalidSuperProperty,
    #[error("`super()` is only allowed in derived class constructors")]
    InvalidSuperCall,
    #[error("`import.meta` is only allowed in modules")]
    InvalidImportMeta,
    #[error("unknown meta property `{0}`")]
    InvalidMetaProperty(String),
    #[error("`import` and `export` may only appear at the top level of a module")]
    ImportExportOutsideModule,
    #[error("duplicate export `{0}`")]
    DuplicateExport(String),
    #[error("export `{0}` is not defined")]
    UndefinedExport(String),
    #[error("unary operators cannot be used on the left of `**` without parentheses")]
    UnaryBeforeExponentiation,
    #[error("`??` cannot be mixed with `||` or `&&` without parentheses")]
    MixedNullish,
    #[error("line terminators are not allowed before `=>`")]
    LineTerminatorBeforeArrow,
    #[error("arrow functions must be parenthesized to be used as an operand")]
    ArrowOperand,
    #[error("tagged templates cannot be used in optional chains")]
    TaggedTemplateInOptionalChain,
    #[error("optional chains cannot be used as the callee of `new`")]
    OptionalChainInNew,
    #[error("a class may only have one constructor")]
    DuplicateConstructor,
    #[error("class constructors cannot be accessors, generators or async")]
    SpecialConstructor,
    #[error("classes may not have a static member named `prototype`")]
    StaticPrototype,
    #[error("classes may not have a field named `constructor`")]
    ConstructorField,
    #[error("`arguments` is not allowed in class field initializers or static blocks")]
    ArgumentsInClassField,
    #[error("`await` is not allowed in class field initializers or static blocks")]
    AwaitInClassElement,
    #[error("private name `#{0}` has already been declared")]
    DuplicatePrivateName(String),
    #[error("private name `#{0}` is not defined")]
    UndeclaredPrivateName(String),
    #[error("classes may not have a private member named `#constructor`")]
    PrivateConstructor,
    #[error("private fields cannot be deleted")]
    PrivateFieldDelete,
    #[error("getters must not have any parameters")]
    GetterArity,
    #[error("setters must have exactly one parameter")]
    SetterArity,
    #[error("`import()` requires exactly one argument")]
    ImportCallArity,
}

impl ErrorKind {
    /// An extra note attached to rendered diagnostics.
    pub fn note(&self) -> Option<&'static str> {
        let note = match self {
            ErrorKind::UnicodeOverflow => "code points range from 0 to 0x10FFFF (1114111)",
            ErrorKind::StrictOctalLiteral => "use the `0o` prefix for octal literals",
            ErrorKind::StrictDecimalWithLeadingZero => "remove the leading zeros",
            ErrorKind::IllegalUseStrict => {
                "parameters with defaults, rest elements or destructuring make a parameter list non-simple"
            }
            ErrorKind::FunctionDeclarationPlacement => "wrap the function declaration in a block",
            ErrorKind::MixedNullish => "wrap either side of the `??` in parentheses",
            ErrorKind::UndeclaredPrivateName(_) => {
                "private names must be declared in an enclosing class body"
            }
            _ => return None,
        };
        Some(note)
    }
}

/// A single positioned parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} ({line}:{column})")]
pub struct ParseError {
    pub kind: ErrorKind,
    /// Byte range of the offending source text.
    pub range: Range<usize>,
    /// 1-based line of `range.start`.
    pub line: usize,
    /// 0-based byte column of `range.start`.
    pub column: usize,
}

impl ParseError {
    /// Create an error and resolve its line and column from `source`.
    pub fn new(kind: ErrorKind, range: Range<usize>, source: &str) -> Self {
        let (line, column) = LineIndex::new(source).line_col(range.start);
        Self {
            kind,
            range,
            line,
            column,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic<()> {
        let mut diagnostic = Diagnostic::error()
            .with_message(self.kind.to_string())
            .with_labels(vec![Label::primary((), self.range.clone())]);

        if let Some(note) = self.kind.note() {
            diagnostic = diagnostic.with_notes(vec![format!("note: {}", note)]);
        }
        diagnostic
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn error_display_includes_position() {
        let err = ParseError::new(ErrorKind::StrictOctalLiteral, 14..18, "\"use strict\";\n0755;");
        assert_eq!((err.line, err.column), (2, 0));
        expect![[r#"octal literals are not allowed in strict mode (2:0)"#]].assert_eq(&err.to_string());
    }

    #[test]
    fn messages_interpolate() {
        expect![[r#"duplicate parameter name `a`"#]]
            .assert_eq(&ErrorKind::DuplicateParameter("a".into()).to_string());
        expect![[r#"expected `)` but found `;`"#]]
            .assert_eq(&ErrorKind::Expected(")", ";".into()).to_string());
    }

    #[test]
    fn diagnostic_carries_note() {
        let err = ParseError::new(ErrorKind::UnicodeOverflow, 3..12, "'\\u{110000}'");
        let diagnostic = err.to_diagnostic();
        assert_eq!(diagnostic.labels[0].range, 3..12);
        assert_eq!(diagnostic.notes.len(), 1);
    }
}
