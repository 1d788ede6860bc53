//! The kinds of tokens the lexer produces.

/// The kind of a single token.
///
/// Contextual keywords such as `async`, `let`, `yield` or `of` are always lexed as
/// `IDENT`, the parser decides what they mean from the context they appear in.
#[allow(non_camel_case_types)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    EOF,
    SEMICOLON,
    COMMA,
    L_PAREN,
    R_PAREN,
    L_CURLY,
    R_CURLY,
    L_BRACK,
    R_BRACK,
    L_ANGLE,
    R_ANGLE,
    TILDE,
    QUESTION,
    QUESTION2,
    QUESTIONDOT,
    AMP,
    PIPE,
    PLUS,
    PLUS2,
    STAR,
    STAR2,
    SLASH,
    CARET,
    PERCENT,
    DOT,
    DOT3,
    COLON,
    EQ,
    EQ2,
    EQ3,
    FAT_ARROW,
    BANG,
    NEQ,
    NEQ2,
    MINUS,
    MINUS2,
    LTEQ,
    GTEQ,
    PLUSEQ,
    MINUSEQ,
    PIPEEQ,
    AMPEQ,
    CARETEQ,
    SLASHEQ,
    STAREQ,
    PERCENTEQ,
    AMP2,
    PIPE2,
    SHL,
    SHR,
    USHR,
    SHLEQ,
    SHREQ,
    USHREQ,
    AMP2EQ,
    PIPE2EQ,
    STAR2EQ,
    QUESTION2EQ,
    BREAK_KW,
    CASE_KW,
    CATCH_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DEBUGGER_KW,
    DEFAULT_KW,
    DELETE_KW,
    DO_KW,
    ELSE_KW,
    ENUM_KW,
    EXPORT_KW,
    EXTENDS_KW,
    FALSE_KW,
    FINALLY_KW,
    FOR_KW,
    FUNCTION_KW,
    IF_KW,
    IMPORT_KW,
    IN_KW,
    INSTANCEOF_KW,
    NEW_KW,
    NULL_KW,
    RETURN_KW,
    SUPER_KW,
    SWITCH_KW,
    THIS_KW,
    THROW_KW,
    TRUE_KW,
    TRY_KW,
    TYPEOF_KW,
    VAR_KW,
    VOID_KW,
    WHILE_KW,
    WITH_KW,
    NUMBER,
    BIG_INT,
    STRING,
    REGEX,
    IDENT,
    /// A private name such as `#foo`.
    PRIVATE_NAME,
    /// A template chunk ending in a backtick.
    TEMPLATE_TAIL,
    /// A template chunk ending in `${`.
    TEMPLATE_CONT,
}

use TokenKind::*;

impl TokenKind {
    /// Resolve a reserved word, contextual keywords are not included.
    pub fn from_keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "break" => BREAK_KW,
            "case" => CASE_KW,
            "catch" => CATCH_KW,
            "class" => CLASS_KW,
            "const" => CONST_KW,
            "continue" => CONTINUE_KW,
            "debugger" => DEBUGGER_KW,
            "default" => DEFAULT_KW,
            "delete" => DELETE_KW,
            "do" => DO_KW,
            "else" => ELSE_KW,
            "enum" => ENUM_KW,
            "export" => EXPORT_KW,
            "extends" => EXTENDS_KW,
            "false" => FALSE_KW,
            "finally" => FINALLY_KW,
            "for" => FOR_KW,
            "function" => FUNCTION_KW,
            "if" => IF_KW,
            "import" => IMPORT_KW,
            "in" => IN_KW,
            "instanceof" => INSTANCEOF_KW,
            "new" => NEW_KW,
            "null" => NULL_KW,
            "return" => RETURN_KW,
            "super" => SUPER_KW,
            "switch" => SWITCH_KW,
            "this" => THIS_KW,
            "throw" => THROW_KW,
            "true" => TRUE_KW,
            "try" => TRY_KW,
            "typeof" => TYPEOF_KW,
            "var" => VAR_KW,
            "void" => VOID_KW,
            "while" => WHILE_KW,
            "with" => WITH_KW,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_keyword(self) -> bool {
        self >= BREAK_KW && self <= WITH_KW
    }

    pub fn is_punct(self) -> bool {
        self >= SEMICOLON && self <= QUESTION2EQ
    }

    pub fn is_literal(self) -> bool {
        matches!(self, NUMBER | BIG_INT | STRING | REGEX)
    }

    /// Whether this token can be used where an `IdentifierName` is expected,
    /// such as after `.` or as a property key.
    pub fn is_identifier_name(self) -> bool {
        self == IDENT || self.is_keyword()
    }

    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            EQ | PLUSEQ
                | MINUSEQ
                | STAREQ
                | SLASHEQ
                | PERCENTEQ
                | STAR2EQ
                | SHLEQ
                | SHREQ
                | USHREQ
                | AMPEQ
                | PIPEEQ
                | CARETEQ
                | AMP2EQ
                | PIPE2EQ
                | QUESTION2EQ
        )
    }

    /// The source text of a punctuator or keyword, or a description of the token.
    pub fn to_str(self) -> &'static str {
        match self {
            EOF => "end of file",
            SEMICOLON => ";",
            COMMA => ",",
            L_PAREN => "(",
            R_PAREN => ")",
            L_CURLY => "{",
            R_CURLY => "}",
            L_BRACK => "[",
            R_BRACK => "]",
            L_ANGLE => "<",
            R_ANGLE => ">",
            TILDE => "~",
            QUESTION => "?",
            QUESTION2 => "??",
            QUESTIONDOT => "?.",
            AMP => "&",
            PIPE => "|",
            PLUS => "+",
            PLUS2 => "++",
            STAR => "*",
            STAR2 => "**",
            SLASH => "/",
            CARET => "^",
            PERCENT => "%",
            DOT => ".",
            DOT3 => "...",
            COLON => ":",
            EQ => "=",
            EQ2 => "==",
            EQ3 => "===",
            FAT_ARROW => "=>",
            BANG => "!",
            NEQ => "!=",
            NEQ2 => "!==",
            MINUS => "-",
            MINUS2 => "--",
            LTEQ => "<=",
            GTEQ => ">=",
            PLUSEQ => "+=",
            MINUSEQ => "-=",
            PIPEEQ => "|=",
            AMPEQ => "&=",
            CARETEQ => "^=",
            SLASHEQ => "/=",
            STAREQ => "*=",
            PERCENTEQ => "%=",
            AMP2 => "&&",
            PIPE2 => "||",
            SHL => "<<",
            SHR => ">>",
            USHR => ">>>",
            SHLEQ => "<<=",
            SHREQ => ">>=",
            USHREQ => ">>>=",
            AMP2EQ => "&&=",
            PIPE2EQ => "||=",
            STAR2EQ => "**=",
            QUESTION2EQ => "??=",
            BREAK_KW => "break",
            CASE_KW => "case",
            CATCH_KW => "catch",
            CLASS_KW => "class",
            CONST_KW => "const",
            CONTINUE_KW => "continue",
            DEBUGGER_KW => "debugger",
            DEFAULT_KW => "default",
            DELETE_KW => "delete",
            DO_KW => "do",
            ELSE_KW => "else",
            ENUM_KW => "enum",
            EXPORT_KW => "export",
            EXTENDS_KW => "extends",
            FALSE_KW => "false",
            FINALLY_KW => "finally",
            FOR_KW => "for",
            FUNCTION_KW => "function",
            IF_KW => "if",
            IMPORT_KW => "import",
            IN_KW => "in",
            INSTANCEOF_KW => "instanceof",
            NEW_KW => "new",
            NULL_KW => "null",
            RETURN_KW => "return",
            SUPER_KW => "super",
            SWITCH_KW => "switch",
            THIS_KW => "this",
            THROW_KW => "throw",
            TRUE_KW => "true",
            TRY_KW => "try",
            TYPEOF_KW => "typeof",
            VAR_KW => "var",
            VOID_KW => "void",
            WHILE_KW => "while",
            WITH_KW => "with",
            NUMBER => "number",
            BIG_INT => "bigint",
            STRING => "string",
            REGEX => "regular expression",
            IDENT => "identifier",
            PRIVATE_NAME => "private name",
            TEMPLATE_TAIL | TEMPLATE_CONT => "template",
        }
    }
}

/// Words which are only reserved in strict mode code.
pub fn is_strict_reserved(ident: &str) -> bool {
    matches!(
        ident,
        "implements"
            | "interface"
            | "let"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "static"
            | "yield"
    )
}

/// Words which can never be used as identifiers.
pub fn is_reserved_word(ident: &str) -> bool {
    TokenKind::from_keyword(ident).is_some()
}

/// `eval` and `arguments` cannot be bound or assigned in strict mode code.
pub fn is_eval_or_arguments(ident: &str) -> bool {
    ident == "eval" || ident == "arguments"
}

/// Shorthand for token kinds, e.g. `T![;]` or `T![function]`.
#[macro_export]
macro_rules! T {
    [;] => { $crate::TokenKind::SEMICOLON };
    [,] => { $crate::TokenKind::COMMA };
    ['('] => { $crate::TokenKind::L_PAREN };
    [')'] => { $crate::TokenKind::R_PAREN };
    ['{'] => { $crate::TokenKind::L_CURLY };
    ['}'] => { $crate::TokenKind::R_CURLY };
    ['['] => { $crate::TokenKind::L_BRACK };
    [']'] => { $crate::TokenKind::R_BRACK };
    [<] => { $crate::TokenKind::L_ANGLE };
    [>] => { $crate::TokenKind::R_ANGLE };
    [~] => { $crate::TokenKind::TILDE };
    [?] => { $crate::TokenKind::QUESTION };
    [??] => { $crate::TokenKind::QUESTION2 };
    [?.] => { $crate::TokenKind::QUESTIONDOT };
    [&] => { $crate::TokenKind::AMP };
    [|] => { $crate::TokenKind::PIPE };
    [+] => { $crate::TokenKind::PLUS };
    [++] => { $crate::TokenKind::PLUS2 };
    [*] => { $crate::TokenKind::STAR };
    [**] => { $crate::TokenKind::STAR2 };
    [/] => { $crate::TokenKind::SLASH };
    [^] => { $crate::TokenKind::CARET };
    [%] => { $crate::TokenKind::PERCENT };
    [.] => { $crate::TokenKind::DOT };
    [...] => { $crate::TokenKind::DOT3 };
    [:] => { $crate::TokenKind::COLON };
    [=] => { $crate::TokenKind::EQ };
    [==] => { $crate::TokenKind::EQ2 };
    [===] => { $crate::TokenKind::EQ3 };
    [=>] => { $crate::TokenKind::FAT_ARROW };
    [!] => { $crate::TokenKind::BANG };
    [!=] => { $crate::TokenKind::NEQ };
    [!==] => { $crate::TokenKind::NEQ2 };
    [-] => { $crate::TokenKind::MINUS };
    [--] => { $crate::TokenKind::MINUS2 };
    [<=] => { $crate::TokenKind::LTEQ };
    [>=] => { $crate::TokenKind::GTEQ };
    [+=] => { $crate::TokenKind::PLUSEQ };
    [-=] => { $crate::TokenKind::MINUSEQ };
    [|=] => { $crate::TokenKind::PIPEEQ };
    [&=] => { $crate::TokenKind::AMPEQ };
    [^=] => { $crate::TokenKind::CARETEQ };
    [/=] => { $crate::TokenKind::SLASHEQ };
    [*=] => { $crate::TokenKind::STAREQ };
    [%=] => { $crate::TokenKind::PERCENTEQ };
    [&&] => { $crate::TokenKind::AMP2 };
    [||] => { $crate::TokenKind::PIPE2 };
    [<<] => { $crate::TokenKind::SHL };
    [>>] => { $crate::TokenKind::SHR };
    [>>>] => { $crate::TokenKind::USHR };
    [<<=] => { $crate::TokenKind::SHLEQ };
    [>>=] => { $crate::TokenKind::SHREQ };
    [>>>=] => { $crate::TokenKind::USHREQ };
    [&&=] => { $crate::TokenKind::AMP2EQ };
    [||=] => { $crate::TokenKind::PIPE2EQ };
    [**=] => { $crate::TokenKind::STAR2EQ };
    [??=] => { $crate::TokenKind::QUESTION2EQ };
    [break] => { $crate::TokenKind::BREAK_KW };
    [case] => { $crate::TokenKind::CASE_KW };
    [catch] => { $crate::TokenKind::CATCH_KW };
    [class] => { $crate::TokenKind::CLASS_KW };
    [const] => { $crate::TokenKind::CONST_KW };
    [continue] => { $crate::TokenKind::CONTINUE_KW };
    [debugger] => { $crate::TokenKind::DEBUGGER_KW };
    [default] => { $crate::TokenKind::DEFAULT_KW };
    [delete] => { $crate::TokenKind::DELETE_KW };
    [do] => { $crate::TokenKind::DO_KW };
    [else] => { $crate::TokenKind::ELSE_KW };
    [enum] => { $crate::TokenKind::ENUM_KW };
    [export] => { $crate::TokenKind::EXPORT_KW };
    [extends] => { $crate::TokenKind::EXTENDS_KW };
    [false] => { $crate::TokenKind::FALSE_KW };
    [finally] => { $crate::TokenKind::FINALLY_KW };
    [for] => { $crate::TokenKind::FOR_KW };
    [function] => { $crate::TokenKind::FUNCTION_KW };
    [if] => { $crate::TokenKind::IF_KW };
    [import] => { $crate::TokenKind::IMPORT_KW };
    [in] => { $crate::TokenKind::IN_KW };
    [instanceof] => { $crate::TokenKind::INSTANCEOF_KW };
    [new] => { $crate::TokenKind::NEW_KW };
    [null] => { $crate::TokenKind::NULL_KW };
    [return] => { $crate::TokenKind::RETURN_KW };
    [super] => { $crate::TokenKind::SUPER_KW };
    [switch] => { $crate::TokenKind::SWITCH_KW };
    [this] => { $crate::TokenKind::THIS_KW };
    [throw] => { $crate::TokenKind::THROW_KW };
    [true] => { $crate::TokenKind::TRUE_KW };
    [try] => { $crate::TokenKind::TRY_KW };
    [typeof] => { $crate::TokenKind::TYPEOF_KW };
    [var] => { $crate::TokenKind::VAR_KW };
    [void] => { $crate::TokenKind::VOID_KW };
    [while] => { $crate::TokenKind::WHILE_KW };
    [with] => { $crate::TokenKind::WITH_KW };
    [ident] => { $crate::TokenKind::IDENT };
    [EOF] => { $crate::TokenKind::EOF };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_resolve() {
        assert_eq!(TokenKind::from_keyword("instanceof"), Some(T![instanceof]));
        assert_eq!(TokenKind::from_keyword("let"), None);
        assert_eq!(TokenKind::from_keyword("yield"), None);
        assert!(T![while].is_keyword());
        assert!(!T![ident].is_keyword());
    }

    #[test]
    fn macro_matches_text() {
        assert_eq!(T![>>>=].to_str(), ">>>=");
        assert_eq!(T![??=].to_str(), "??=");
        assert_eq!(T![?.].to_str(), "?.");
        assert_eq!(T![...].to_str(), "...");
        assert_eq!(T!['{'].to_str(), "{");
    }

    #[test]
    fn kind_classes() {
        assert!(T![;].is_punct());
        assert!(T![??=].is_punct());
        assert!(!T![break].is_punct());
        assert!(!T![EOF].is_punct());
        assert!(TokenKind::REGEX.is_literal());
        assert!(!T![null].is_literal());
        assert!(T![class].is_identifier_name());
        assert!(!TokenKind::PRIVATE_NAME.is_identifier_name());
        assert!(T![&&=].is_assign_op());
    }

    #[test]
    fn strict_reserved_words() {
        assert!(is_strict_reserved("package"));
        assert!(is_strict_reserved("yield"));
        assert!(!is_strict_reserved("await"));
        assert!(!is_strict_reserved("async"));
    }
}
