//! General utility functions for parsing and early error checking.

use crate::ast::{Expression, Identifier, Pattern};
use crate::scope::BindingKind;
use crate::*;
use kestrel_syntax::{is_eval_or_arguments, is_reserved_word, is_strict_reserved};

/// Check the rules for an identifier used as a reference or label.
///
/// Keywords are never lexed as identifiers, a reserved word reaching this check was
/// therefore spelled with escapes.
pub fn check_identifier(p: &mut Parser, name: &str, span: Span, ctx: Context) -> ParseResult<()> {
    if name == "await" && p.state.await_ident_pos.is_none() {
        p.state.await_ident_pos = Some(span);
    }

    if is_reserved_word(name) {
        return Err(p.err(ErrorKind::EscapedKeyword, span));
    }
    if name == "yield" && ctx.contains(Context::IN_GENERATOR) {
        return Err(p.err(ErrorKind::YieldIdentifier, span));
    }
    if name == "await" && (ctx.contains(Context::IN_ASYNC) || ctx.is_module()) {
        return Err(p.err(ErrorKind::AwaitIdentifier, span));
    }
    if name == "await" && ctx.contains(Context::AWAIT_RESERVED) {
        return Err(p.err(ErrorKind::AwaitInClassElement, span));
    }
    // test_err arguments_in_class_field
    // class A { x = arguments }
    // class A { x = () => arguments }
    // class A { static { arguments } }
    if name == "arguments" && ctx.contains(Context::IN_CLASS_FIELD) {
        return Err(p.err(ErrorKind::ArgumentsInClassField, span));
    }
    if ctx.is_strict() && is_strict_reserved(name) {
        return Err(p.err(ErrorKind::StrictReservedWord(name.to_string()), span));
    }
    Ok(())
}

/// Check the rules for an identifier which is bound by a declaration or parameter.
pub fn check_binding(p: &mut Parser, ident: &Identifier, ctx: Context) -> ParseResult<()> {
    check_identifier(p, &ident.name, ident.span, ctx)?;
    if ctx.is_strict() && is_eval_or_arguments(&ident.name) {
        return Err(p.err(
            ErrorKind::StrictEvalArguments(ident.name.to_string()),
            ident.span,
        ));
    }
    Ok(())
}

/// The checks a binding only fails once the code around it turned out to be strict.
pub fn check_strict_binding(p: &mut Parser, ident: &Identifier) -> ParseResult<()> {
    if is_strict_reserved(&ident.name) {
        return Err(p.err(
            ErrorKind::StrictReservedWord(ident.name.to_string()),
            ident.span,
        ));
    }
    if is_eval_or_arguments(&ident.name) {
        return Err(p.err(
            ErrorKind::StrictEvalArguments(ident.name.to_string()),
            ident.span,
        ));
    }
    Ok(())
}

/// Declare every name bound by `pattern` in the current scope.
pub fn declare_pattern(
    p: &mut Parser,
    pattern: &Pattern,
    kind: BindingKind,
) -> ParseResult<()> {
    let mut names = vec![];
    pattern.bound_names(&mut names);
    for ident in names {
        declare_name(p, ident, kind)?;
    }
    Ok(())
}

pub fn declare_name(p: &mut Parser, ident: &Identifier, kind: BindingKind) -> ParseResult<()> {
    if kind == BindingKind::Lexical && ident.name == "let" {
        return Err(p.err(ErrorKind::LetInLexicalBinding, ident.span));
    }
    if !p.scopes.declare(&ident.name, kind) {
        return Err(p.err(
            ErrorKind::DuplicateBinding(ident.name.to_string()),
            ident.span,
        ));
    }
    Ok(())
}

/// Check a formal parameter list, declaring the parameters in the current scope.
///
/// Duplicates are only allowed in sloppy functions with simple parameter lists.
pub fn declare_params(
    p: &mut Parser,
    params: &[Pattern],
    allow_duplicates: bool,
) -> ParseResult<()> {
    let mut names = vec![];
    for param in params {
        param.bound_names(&mut names);
    }

    let mut seen: Vec<&str> = Vec::with_capacity(names.len());
    for ident in names {
        if seen.contains(&ident.name.as_str()) {
            if !allow_duplicates {
                return Err(p.err(
                    ErrorKind::DuplicateParameter(ident.name.to_string()),
                    ident.span,
                ));
            }
        } else {
            seen.push(&ident.name);
        }
        p.scopes.declare(&ident.name, BindingKind::Var);
    }
    Ok(())
}

/// Check the target of `++`, `--` and compound assignments.
pub fn check_simple_target(
    p: &mut Parser,
    target: &Expression,
    kind: ErrorKind,
    ctx: Context,
) -> ParseResult<()> {
    match target {
        Expression::Identifier(ident) => {
            if ctx.is_strict() && is_eval_or_arguments(&ident.name) {
                return Err(p.err(
                    ErrorKind::StrictEvalArguments(ident.name.to_string()),
                    ident.span,
                ));
            }
            Ok(())
        }
        Expression::Member(_) => Ok(()),
        _ => Err(p.err(kind, target.span())),
    }
}

/// Get the binding power of a binary operator, `**` is handled by unary expressions.
pub fn binary_precedence(kind: TokenKind, ctx: Context) -> Option<u8> {
    Some(match kind {
        T![??] | T![||] => 1,
        T![&&] => 2,
        T![|] => 3,
        T![^] => 4,
        T![&] => 5,
        T![==] | T![!=] | T![===] | T![!==] => 6,
        T![<] | T![>] | T![<=] | T![>=] | T![instanceof] => 7,
        T![in] if ctx.contains(Context::ALLOW_IN) => 7,
        T![<<] | T![>>] | T![>>>] => 8,
        T![+] | T![-] => 9,
        T![*] | T![/] | T![%] => 10,
        _ => return None,
    })
}

/// Whether `expr` is an arrow function which was not wrapped in parentheses.
pub fn is_bare_arrow(p: &Parser, expr: &Expression) -> bool {
    matches!(expr, Expression::Arrow(_)) && !p.parenthesized.contains(&expr.span())
}
