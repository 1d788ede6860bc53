//! Binding patterns and the reinterpretation of expressions as patterns.
//!
//! Declarations and parameters parse patterns directly. Array and object literals on the
//! left of `=`, in the head of a `for-in`/`for-of` loop, or inside of arrow parameters
//! are parsed as expressions first and converted by [`expr_to_pattern`] once the
//! following token confirms what they are.

use super::expr::{assign_expr, property_name, PropName};
use super::util::check_binding;
use crate::ast::*;
use crate::*;
use kestrel_syntax::is_eval_or_arguments;

/// What a converted pattern is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternTarget {
    /// The target of `=` or of a `for-in`/`for-of` head, members are allowed.
    Assignment,
    /// Arrow function parameters, only identifiers may be bound.
    Binding,
}

pub fn binding_identifier(p: &mut Parser, ctx: Context) -> ParseResult<Identifier> {
    match p.cur() {
        T![ident] => {
            let ident = Identifier {
                span: p.cur_span(),
                name: p.cur_name(),
            };
            check_binding(p, &ident, ctx)?;
            p.bump(ctx)?;
            Ok(ident)
        }
        kind if kind.is_keyword() => Err(p.err(
            ErrorKind::ReservedWord(p.cur_src().to_string()),
            p.cur_span(),
        )),
        _ => Err(p.unexpected()),
    }
}

// test binding_patterns
// let [a, , ...b] = c;
// let { a, b: [c], ...d } = e;
// var { a = 1, b: { c } = {} } = f;
pub fn binding_pattern(p: &mut Parser, ctx: Context) -> ParseResult<Pattern> {
    match p.cur() {
        T!['['] => array_binding_pattern(p, ctx),
        T!['{'] => object_binding_pattern(p, ctx),
        _ => binding_identifier(p, ctx).map(Pattern::Identifier),
    }
}

/// A binding pattern with an optional default value.
pub fn binding_element(p: &mut Parser, ctx: Context) -> ParseResult<Pattern> {
    let m = p.start();
    let left = binding_pattern(p, ctx)?;
    if !p.eat(T![=], ctx)? {
        return Ok(left);
    }

    let right = assign_expr(p, ctx.with(Context::ALLOW_IN))?;
    Ok(Pattern::Assignment(Box::new(AssignmentPattern {
        span: m.finish(p),
        left,
        right,
    })))
}

/// `...pattern`, the rest element must close the list it is in.
pub fn binding_rest(p: &mut Parser, ctx: Context, closing: TokenKind) -> ParseResult<RestElement> {
    let m = p.start();
    p.bump(ctx)?;
    let argument = if closing == T!['}'] {
        Pattern::Identifier(binding_identifier(p, ctx)?)
    } else {
        binding_pattern(p, ctx)?
    };

    if p.at(T![=]) {
        return Err(p.err(ErrorKind::RestWithInitializer, p.cur_span()));
    }
    let rest = RestElement {
        span: m.finish(p),
        argument,
    };
    check_rest_is_last(p, closing, ctx)?;
    Ok(rest)
}

// Called after a rest element, the list must be closed now
fn check_rest_is_last(p: &mut Parser, closing: TokenKind, ctx: Context) -> ParseResult<()> {
    if !p.at(T![,]) {
        return Ok(());
    }
    let comma = p.cur_span();
    if p.lookahead(ctx)?.kind == closing {
        Err(p.err(ErrorKind::RestTrailingComma, comma))
    } else {
        Err(p.err(ErrorKind::RestNotLast, comma))
    }
}

pub fn array_binding_pattern(p: &mut Parser, ctx: Context) -> ParseResult<Pattern> {
    let m = p.start();
    p.expect(T!['['], ctx)?;
    let mut elements = vec![];

    while !p.at(T![']']) {
        if p.eat(T![,], ctx)? {
            elements.push(None);
            continue;
        }
        if p.at(T![...]) {
            let rest = binding_rest(p, ctx, T![']'])?;
            elements.push(Some(Pattern::Rest(Box::new(rest))));
            break;
        }

        elements.push(Some(binding_element(p, ctx)?));
        if !p.at(T![']']) {
            p.expect(T![,], ctx)?;
        }
    }

    p.expect(T![']'], ctx)?;
    Ok(Pattern::Array(ArrayPattern {
        span: m.finish(p),
        elements,
    }))
}

pub fn object_binding_pattern(p: &mut Parser, ctx: Context) -> ParseResult<Pattern> {
    let m = p.start();
    p.expect(T!['{'], ctx)?;
    let mut properties = vec![];

    while !p.at(T!['}']) {
        if p.at(T![...]) {
            let rest = binding_rest(p, ctx, T!['}'])?;
            properties.push(ObjectPatternProperty::Rest(rest));
            break;
        }

        properties.push(ObjectPatternProperty::Property(object_binding_prop(p, ctx)?));
        if !p.at(T!['}']) {
            p.expect(T![,], ctx)?;
        }
    }

    p.expect(T!['}'], ctx)?;
    Ok(Pattern::Object(ObjectPattern {
        span: m.finish(p),
        properties,
    }))
}

fn object_binding_prop(p: &mut Parser, ctx: Context) -> ParseResult<AssignmentProperty> {
    let m = p.start();
    let name_tok = p.cur_tok().clone();
    let PropName { key, computed, .. } = property_name(p, ctx)?;

    if p.eat(T![:], ctx)? {
        let value = binding_element(p, ctx)?;
        return Ok(AssignmentProperty {
            span: m.finish(p),
            key,
            value,
            shorthand: false,
            computed,
        });
    }

    let ident = match key {
        Expression::Identifier(ident) if name_tok.kind == T![ident] && !computed => ident,
        _ if name_tok.kind.is_keyword() => {
            return Err(p.err(
                ErrorKind::ReservedWord(p.source()[name_tok.span().range()].to_string()),
                name_tok.span(),
            ))
        }
        _ => return Err(p.unexpected()),
    };
    check_binding(p, &ident, ctx)?;

    let mut value = Pattern::Identifier(ident.clone());
    if p.eat(T![=], ctx)? {
        let right = assign_expr(p, ctx.with(Context::ALLOW_IN))?;
        value = Pattern::Assignment(Box::new(AssignmentPattern {
            span: m.finish(p),
            left: value,
            right,
        }));
    }
    Ok(AssignmentProperty {
        span: m.finish(p),
        key: Expression::Identifier(ident),
        value,
        shorthand: true,
        computed: false,
    })
}

/// Reinterpret an expression as a pattern.
///
/// Fails if the expression, or anything nested in it, is not a valid target for
/// `target`. Parenthesized identifiers and members are only valid assignment targets,
/// parenthesized literals are never patterns.
pub fn expr_to_pattern(
    p: &mut Parser,
    expr: Expression,
    target: PatternTarget,
    ctx: Context,
) -> ParseResult<Pattern> {
    to_pattern(p, expr, target, true, ctx)
}

fn to_pattern(
    p: &mut Parser,
    expr: Expression,
    target: PatternTarget,
    top: bool,
    ctx: Context,
) -> ParseResult<Pattern> {
    let span = expr.span();
    let parenthesized = p.parenthesized.contains(&span);
    let invalid = if top && target == PatternTarget::Assignment {
        ErrorKind::InvalidAssignmentTarget
    } else {
        ErrorKind::InvalidDestructuringTarget
    };

    match expr {
        Expression::Identifier(ident) => {
            if target == PatternTarget::Binding {
                if parenthesized {
                    return Err(p.err(invalid, span));
                }
                check_binding(p, &ident, ctx)?;
            } else if ctx.is_strict() && is_eval_or_arguments(&ident.name) {
                return Err(p.err(
                    ErrorKind::StrictEvalArguments(ident.name.to_string()),
                    span,
                ));
            }
            Ok(Pattern::Identifier(ident))
        }
        Expression::Member(member) if target == PatternTarget::Assignment => {
            Ok(Pattern::Member(member))
        }
        Expression::Array(arr) if !parenthesized => array_to_pattern(p, arr, target, ctx),
        Expression::Object(obj) if !parenthesized => object_to_pattern(p, obj, target, ctx),
        Expression::Assignment(assign)
            if !parenthesized
                && assign.operator == AssignmentOperator::Assign
                && !(top && target == PatternTarget::Assignment) =>
        {
            let AssignmentExpression { left, right, .. } = *assign;
            match &left {
                _ if target == PatternTarget::Binding => check_binding_pattern(p, &left, ctx)?,
                // `{ eval = 1 }` is a shorthand whose key was only checked as a reference
                Pattern::Identifier(ident) if ctx.is_strict() && is_eval_or_arguments(&ident.name) => {
                    return Err(p.err(
                        ErrorKind::StrictEvalArguments(ident.name.to_string()),
                        ident.span,
                    ));
                }
                _ => {}
            }
            Ok(Pattern::Assignment(Box::new(AssignmentPattern {
                span,
                left,
                right,
            })))
        }
        _ => Err(p.err(invalid, span)),
    }
}

fn array_to_pattern(
    p: &mut Parser,
    arr: ArrayExpression,
    target: PatternTarget,
    ctx: Context,
) -> ParseResult<Pattern> {
    let trailing_comma = p.trailing_comma_after_rest.contains(&arr.span);
    let len = arr.elements.len();
    let mut elements = Vec::with_capacity(len);

    for (idx, elem) in arr.elements.into_iter().enumerate() {
        let pattern = match elem {
            None => None,
            Some(ExprOrSpread::Expr(expr)) => Some(to_pattern(p, expr, target, false, ctx)?),
            Some(ExprOrSpread::Spread(spread)) => {
                if idx + 1 != len {
                    return Err(p.err(ErrorKind::RestNotLast, spread.span));
                }
                if trailing_comma {
                    return Err(p.err(ErrorKind::RestTrailingComma, spread.span));
                }
                let argument = rest_argument(p, spread.argument, target, false, ctx)?;
                Some(Pattern::Rest(Box::new(RestElement {
                    span: spread.span,
                    argument,
                })))
            }
        };
        elements.push(pattern);
    }

    Ok(Pattern::Array(ArrayPattern {
        span: arr.span,
        elements,
    }))
}

fn object_to_pattern(
    p: &mut Parser,
    obj: ObjectExpression,
    target: PatternTarget,
    ctx: Context,
) -> ParseResult<Pattern> {
    let trailing_comma = p.trailing_comma_after_rest.contains(&obj.span);
    let len = obj.properties.len();
    let mut properties = Vec::with_capacity(len);

    for (idx, member) in obj.properties.into_iter().enumerate() {
        let prop = match member {
            ObjectMember::Property(prop) => {
                if prop.method || prop.kind != PropertyKind::Init {
                    return Err(p.err(ErrorKind::InvalidDestructuringTarget, prop.span));
                }
                ObjectPatternProperty::Property(AssignmentProperty {
                    span: prop.span,
                    key: prop.key,
                    value: to_pattern(p, prop.value, target, false, ctx)?,
                    shorthand: prop.shorthand,
                    computed: prop.computed,
                })
            }
            ObjectMember::Spread(spread) => {
                if idx + 1 != len {
                    return Err(p.err(ErrorKind::RestNotLast, spread.span));
                }
                if trailing_comma {
                    return Err(p.err(ErrorKind::RestTrailingComma, spread.span));
                }
                ObjectPatternProperty::Rest(RestElement {
                    span: spread.span,
                    argument: rest_argument(p, spread.argument, target, true, ctx)?,
                })
            }
        };
        properties.push(prop);
    }

    Ok(Pattern::Object(ObjectPattern {
        span: obj.span,
        properties,
    }))
}

// The argument of a rest element, object rest elements only take simple targets
fn rest_argument(
    p: &mut Parser,
    argument: Expression,
    target: PatternTarget,
    object: bool,
    ctx: Context,
) -> ParseResult<Pattern> {
    match &argument {
        Expression::Assignment(assign) => {
            return Err(p.err(ErrorKind::RestWithInitializer, assign.span));
        }
        Expression::Array(_) | Expression::Object(_) if object => {
            return Err(p.err(ErrorKind::InvalidDestructuringTarget, argument.span()));
        }
        _ => {}
    }
    to_pattern(p, argument, target, false, ctx)
}

/// Validate a pattern which was converted as an assignment target for use as a binding.
pub fn check_binding_pattern(p: &mut Parser, pattern: &Pattern, ctx: Context) -> ParseResult<()> {
    match pattern {
        Pattern::Identifier(ident) => {
            if p.parenthesized.contains(&ident.span) {
                return Err(p.err(ErrorKind::InvalidDestructuringTarget, ident.span));
            }
            check_binding(p, ident, ctx)
        }
        Pattern::Member(member) => Err(p.err(ErrorKind::InvalidDestructuringTarget, member.span)),
        Pattern::Object(obj) => {
            for prop in &obj.properties {
                match prop {
                    ObjectPatternProperty::Property(prop) => {
                        check_binding_pattern(p, &prop.value, ctx)?
                    }
                    ObjectPatternProperty::Rest(rest) => {
                        check_binding_pattern(p, &rest.argument, ctx)?
                    }
                }
            }
            Ok(())
        }
        Pattern::Array(arr) => {
            for elem in arr.elements.iter().flatten() {
                check_binding_pattern(p, elem, ctx)?;
            }
            Ok(())
        }
        Pattern::Rest(rest) => check_binding_pattern(p, &rest.argument, ctx),
        Pattern::Assignment(assign) => check_binding_pattern(p, &assign.left, ctx),
    }
}

/// Convert the target of a compound assignment, which must be an identifier or member.
pub fn simple_target(p: &mut Parser, expr: Expression, ctx: Context) -> ParseResult<Pattern> {
    super::util::check_simple_target(p, &expr, ErrorKind::InvalidAssignmentTarget, ctx)?;
    match expr {
        Expression::Identifier(ident) => Ok(Pattern::Identifier(ident)),
        Expression::Member(member) => Ok(Pattern::Member(member)),
        other => Err(p.err(ErrorKind::InvalidAssignmentTarget, other.span())),
    }
}
