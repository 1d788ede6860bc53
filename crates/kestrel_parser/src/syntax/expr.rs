//! Expressions, these include `this`, identifiers, arrays, objects,
//! binary expressions, unary expressions, and more.
//!
//! See the [ECMAScript spec](https://tc39.es/ecma262/#sec-ecmascript-language-expressions).

use super::decl::{arrow_function, class_expr, function_expr, method_function};
use super::pat::{binding_identifier, expr_to_pattern, simple_target, PatternTarget};
use super::util::*;
use crate::ast::*;
use crate::*;
use kestrel_lexer::TokenValue;
use kestrel_syntax::TokenKind::*;

pub const LITERAL: TokenSet =
    token_set![T![true], T![false], NUMBER, BIG_INT, STRING, T![null]];

/// Tokens which may begin an expression, `/` and `/=` start a regular expression.
pub const STARTS_EXPR: TokenSet = token_set![
    T![!],
    T!['('],
    T!['['],
    T!['{'],
    T![++],
    T![--],
    T![~],
    T![+],
    T![-],
    T![/],
    T![/=],
    T![new],
    T![typeof],
    T![void],
    T![delete],
    T![ident],
    T![this],
    T![function],
    T![class],
    T![import],
    T![super],
    PRIVATE_NAME,
    TEMPLATE_TAIL,
    TEMPLATE_CONT
]
.union(LITERAL);

/// A literal expression.
///
/// `TRUE | FALSE | NUMBER | BIG_INT | STRING | NULL | REGEX`
// test literals
// 5
// true
// false
// 5n
// "foo"
// 'bar'
// null
// /a/g
pub fn literal(p: &mut Parser, ctx: Context) -> ParseResult<Literal> {
    let tok = p.cur_tok();
    let span = tok.span();
    let value = match (tok.kind, &tok.value) {
        (T![null], _) => LiteralValue::Null,
        (T![true], _) => LiteralValue::Boolean(true),
        (T![false], _) => LiteralValue::Boolean(false),
        (NUMBER, TokenValue::Number(num)) => LiteralValue::Number(*num),
        (BIG_INT, TokenValue::BigInt(num)) => LiteralValue::BigInt(num.clone()),
        (STRING, TokenValue::String(string)) => LiteralValue::String(string.clone()),
        (REGEX, TokenValue::Regex { pattern, flags }) => LiteralValue::RegExp {
            pattern: pattern.clone(),
            flags: flags.clone(),
        },
        _ => return Err(p.unexpected()),
    };
    let raw = p.raw(span, ctx);
    p.bump(ctx)?;
    Ok(Literal { span, value, raw })
}

/// An identifier used as a reference, e.g. `foo` in `foo + 1`.
pub fn identifier_reference(p: &mut Parser, ctx: Context) -> ParseResult<Identifier> {
    if !p.at(T![ident]) {
        return Err(p.unexpected());
    }
    let ident = Identifier {
        span: p.cur_span(),
        name: p.cur_name(),
    };
    check_identifier(p, &ident.name, ident.span, ctx)?;
    p.bump(ctx)?;
    Ok(ident)
}

/// Any identifier name including keywords, used after `.` and as property keys.
pub fn identifier_name(p: &mut Parser, ctx: Context) -> ParseResult<Identifier> {
    if !p.cur().is_identifier_name() {
        return Err(p.unexpected());
    }
    let ident = Identifier {
        span: p.cur_span(),
        name: p.cur_name(),
    };
    p.bump(ctx)?;
    Ok(ident)
}

/// A private name such as `#x`, the name excludes the `#`.
pub fn private_name(p: &mut Parser, ctx: Context) -> ParseResult<Identifier> {
    if !p.at(PRIVATE_NAME) {
        return Err(p.unexpected());
    }
    let ident = Identifier {
        span: p.cur_span(),
        name: p.cur_name(),
    };
    p.bump(ctx)?;
    Ok(ident)
}

// test private_member_access
// class A { #x; #y() {} m(o) { this.#x; o?.#x; o.a.#y(); } }
// test_err undeclared_private_name
// class A { m() { this.#x; } }
// this.#x
// A use of `#x`, checked against the enclosing class bodies once they end.
fn private_reference(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let ident = private_name(p, ctx)?;
    if !p.private_names.reference(ident.name.clone(), ident.span) {
        return Err(p.err(
            ErrorKind::UndeclaredPrivateName(ident.name.to_string()),
            ident.span,
        ));
    }
    Ok(Expression::PrivateName(ident))
}

/// A comma separated list of assignment expressions.
// test sequence_expr
// a, b, c
pub fn expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let first = assign_expr(p, ctx)?;
    sequence_rest(p, m, first, ctx)
}

/// Continue a sequence expression whose first item was already parsed.
pub fn sequence_rest(
    p: &mut Parser,
    m: Marker,
    first: Expression,
    ctx: Context,
) -> ParseResult<Expression> {
    if !p.at(T![,]) {
        return Ok(first);
    }
    let mut expressions = vec![first];
    while p.eat(T![,], ctx)? {
        expressions.push(assign_expr(p, ctx)?);
    }
    Ok(Expression::Sequence(SequenceExpression {
        span: m.finish(p),
        expressions,
    }))
}

/// An assignment expression such as `foo += bar` or `foo = 5`.
///
/// Any cover grammar error the expression leaves behind is raised, the result can
/// no longer become a pattern.
pub fn assign_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let outer = p.state.cover.take();
    let expr = assign_expr_cover(p, ctx)?;
    if let Some((kind, span)) = p.state.cover.take() {
        return Err(p.err(kind, span));
    }
    p.state.cover = outer;
    Ok(expr)
}

/// An assignment expression which may still be reinterpreted as a pattern by the caller.
///
/// Cover grammar errors of array and object literals are left in the parser state,
/// the caller must raise them if the expression stays an expression.
// test assign_expr
// foo += bar = b ??= 3;
// foo -= bar;
// [foo, bar] = baz;
// ({ bar, baz } = {});
// ({ bar: [baz], foo } = {});
pub fn assign_expr_cover(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    if p.at_contextual("yield") && ctx.contains(Context::IN_GENERATOR) {
        return yield_expr(p, ctx);
    }

    let outer = p.state.cover.take();
    let m = p.start();
    p.state.potential_arrow_at = Some(m.start);
    let target = conditional_expr(p, ctx)?;

    if is_bare_arrow(p, &target) {
        if p.cur().is_assign_op() && !p.has_linebreak_before() {
            return Err(p.err(ErrorKind::ArrowOperand, p.cur_span()));
        }
        p.state.cover = outer;
        return Ok(target);
    }

    if p.cur().is_assign_op() {
        let operator = assign_operator(p.cur());
        let left = if operator == AssignmentOperator::Assign {
            // the literal is a pattern now, its shorthand initializers are legal
            p.state.cover = None;
            expr_to_pattern(p, target, PatternTarget::Assignment, ctx)?
        } else {
            simple_target(p, target, ctx)?
        };
        p.bump(ctx)?;
        let right = assign_expr(p, ctx)?;
        p.state.cover = outer;
        return Ok(Expression::Assignment(Box::new(AssignmentExpression {
            span: m.finish(p),
            operator,
            left,
            right,
        })));
    }

    let literal = matches!(target, Expression::Array(_) | Expression::Object(_))
        && !p.parenthesized.contains(&target.span());
    if !literal {
        if let Some((kind, span)) = p.state.cover.take() {
            return Err(p.err(kind, span));
        }
    }
    let inner = p.state.cover.take();
    p.state.cover = outer.or(inner);
    Ok(target)
}

fn assign_operator(kind: TokenKind) -> AssignmentOperator {
    match kind {
        T![+=] => AssignmentOperator::Add,
        T![-=] => AssignmentOperator::Sub,
        T![*=] => AssignmentOperator::Mul,
        T![/=] => AssignmentOperator::Div,
        T![%=] => AssignmentOperator::Mod,
        T![**=] => AssignmentOperator::Exp,
        T![<<=] => AssignmentOperator::Shl,
        T![>>=] => AssignmentOperator::Shr,
        T![>>>=] => AssignmentOperator::UShr,
        T![|=] => AssignmentOperator::BitOr,
        T![^=] => AssignmentOperator::BitXor,
        T![&=] => AssignmentOperator::BitAnd,
        T![||=] => AssignmentOperator::LogicalOr,
        T![&&=] => AssignmentOperator::LogicalAnd,
        T![??=] => AssignmentOperator::Nullish,
        _ => AssignmentOperator::Assign,
    }
}

// test yield_expr
// function *foo() {
//  yield foo;
//  yield* foo;
//  yield;
// }
pub fn yield_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let span = p.cur_span();
    if ctx.contains(Context::IN_PARAMETERS) {
        return Err(p.err(ErrorKind::YieldInParameter, span));
    }
    if p.state.yield_pos.is_none() {
        p.state.yield_pos = Some(span);
    }
    p.bump(ctx)?;

    let mut delegate = false;
    let mut argument = None;
    if !p.has_linebreak_before() {
        delegate = p.eat(T![*], ctx)?;
        if delegate || p.at_ts(STARTS_EXPR) {
            argument = Some(assign_expr(p, ctx)?);
        }
    }
    Ok(Expression::Yield(Box::new(YieldExpression {
        span: m.finish(p),
        argument,
        delegate,
    })))
}

/// A conditional expression such as `foo ? bar : baz`
// test conditional_expr
// foo ? bar : baz
// foo ? bar : baz ? bar : baz
pub fn conditional_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let left = binary_operand(p, 0, ctx)?;
    let test = binary_expr(p, m, left, 0, ctx)?;
    if !p.at(T![?]) {
        return Ok(test);
    }
    if is_bare_arrow(p, &test) {
        if p.has_linebreak_before() {
            return Ok(test);
        }
        return Err(p.err(ErrorKind::ArrowOperand, p.cur_span()));
    }

    p.bump(ctx)?;
    let consequent = assign_expr(p, ctx.with(Context::ALLOW_IN))?;
    p.expect(T![:], ctx)?;
    let alternate = assign_expr(p, ctx)?;
    Ok(Expression::Conditional(Box::new(ConditionalExpression {
        span: m.finish(p),
        test,
        consequent,
        alternate,
    })))
}

/// A binary expression such as `2 + 2` or `foo * bar + 2`, parsed by precedence climbing.
// test binary_expressions
// 5 * 5
// 6 ** 6 ** 7
// 1 + 2 * 3
// (1 + 2) * 3
// 1 / 2
// 74 in foo
// foo instanceof Array
// foo ?? bar
// 1 + 1 + 1 + 1
// 5 + 6 - 1 * 2 / 1 ** 6
pub fn binary_expr(
    p: &mut Parser,
    m: Marker,
    left: Expression,
    min_prec: u8,
    ctx: Context,
) -> ParseResult<Expression> {
    let op = p.cur();
    let prec = match binary_precedence(op, ctx) {
        Some(prec) => prec,
        None => return Ok(left),
    };
    if is_bare_arrow(p, &left) {
        if p.has_linebreak_before() {
            return Ok(left);
        }
        return Err(p.err(ErrorKind::ArrowOperand, p.cur_span()));
    }
    if prec <= min_prec {
        return Ok(left);
    }

    let nullish = op == T![??];
    let logical = matches!(op, T![||] | T![&&]);
    p.bump(ctx)?;

    let right_m = p.start();
    let right_prec = if nullish { 2 } else { prec };
    let right = binary_operand(p, right_prec, ctx)?;
    let right = binary_expr(p, right_m, right, right_prec, ctx)?;

    // test_err mixed_nullish
    // a ?? b || c
    // a && b ?? c
    if (logical && p.at(T![??])) || (nullish && (p.at(T![||]) || p.at(T![&&]))) {
        return Err(p.err(ErrorKind::MixedNullish, p.cur_span()));
    }

    let span = m.finish(p);
    let expr = match op {
        T![||] => logical_expr(span, LogicalOperator::Or, left, right),
        T![&&] => logical_expr(span, LogicalOperator::And, left, right),
        T![??] => logical_expr(span, LogicalOperator::Nullish, left, right),
        _ => Expression::Binary(Box::new(BinaryExpression {
            span,
            operator: binary_operator(op),
            left,
            right,
        })),
    };
    binary_expr(p, m, expr, min_prec, ctx)
}

// test private_in
// class A { #x; static has(o) { return #x in o && a == #x in o; } }
// test_err private_name_operand
// class A { #x; m(o) { 1 + #x in o; } }
// class A { #x; m(o) { #x; } }
// A private name may only stand on its own as the left operand of `in`.
fn binary_operand(p: &mut Parser, min_prec: u8, ctx: Context) -> ParseResult<Expression> {
    if !p.at(PRIVATE_NAME) {
        return unary_expr(p, ctx);
    }
    let binds_in = p.lookahead(ctx)?.kind == T![in]
        && binary_precedence(T![in], ctx).map_or(false, |prec| prec > min_prec);
    if !binds_in {
        return Err(p.unexpected());
    }
    private_reference(p, ctx)
}

fn logical_expr(
    span: Span,
    operator: LogicalOperator,
    left: Expression,
    right: Expression,
) -> Expression {
    Expression::Logical(Box::new(LogicalExpression {
        span,
        operator,
        left,
        right,
    }))
}

fn binary_operator(kind: TokenKind) -> BinaryOperator {
    match kind {
        T![==] => BinaryOperator::Eq,
        T![!=] => BinaryOperator::NotEq,
        T![===] => BinaryOperator::StrictEq,
        T![!==] => BinaryOperator::StrictNotEq,
        T![<] => BinaryOperator::Lt,
        T![<=] => BinaryOperator::LtEq,
        T![>] => BinaryOperator::Gt,
        T![>=] => BinaryOperator::GtEq,
        T![<<] => BinaryOperator::Shl,
        T![>>] => BinaryOperator::Shr,
        T![>>>] => BinaryOperator::UShr,
        T![+] => BinaryOperator::Add,
        T![-] => BinaryOperator::Sub,
        T![*] => BinaryOperator::Mul,
        T![/] => BinaryOperator::Div,
        T![%] => BinaryOperator::Mod,
        T![|] => BinaryOperator::BitOr,
        T![^] => BinaryOperator::BitXor,
        T![&] => BinaryOperator::BitAnd,
        T![in] => BinaryOperator::In,
        T![instanceof] => BinaryOperator::Instanceof,
        _ => BinaryOperator::Exp,
    }
}

/// A unary expression such as `!foo`, `++bar`, or `await baz`, followed by `**` if
/// its operand allows it.
// test unary_expr
// ++a
// --a
// -a
// +a
// ~a
// !a
// typeof a
// void a
// delete a.b
// (-a) ** 2
// ++a ** 2
pub fn unary_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let expr = prefix_expr(p, ctx)?;
    // test_err unary_before_exponent
    // -a ** 2
    // await a ** 2
    if p.at(T![**])
        && matches!(expr, Expression::Unary(_) | Expression::Await(_))
        && !p.parenthesized.contains(&expr.span())
    {
        return Err(p.err(ErrorKind::UnaryBeforeExponentiation, expr.span()));
    }
    exponent_expr(p, m, expr, ctx)
}

// A unary expression without a trailing `**`
fn prefix_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let operator = match p.cur() {
        T![delete] => Some(UnaryOperator::Delete),
        T![void] => Some(UnaryOperator::Void),
        T![typeof] => Some(UnaryOperator::Typeof),
        T![+] => Some(UnaryOperator::Plus),
        T![-] => Some(UnaryOperator::Minus),
        T![~] => Some(UnaryOperator::BitNot),
        T![!] => Some(UnaryOperator::Not),
        _ => None,
    };

    if let Some(operator) = operator {
        p.bump(ctx)?;
        let argument = prefix_expr(p, ctx)?;
        let span = m.finish(p);
        if operator == UnaryOperator::Delete
            && ctx.is_strict()
            && matches!(argument, Expression::Identifier(_))
        {
            return Err(p.err(ErrorKind::StrictDelete, span));
        }
        // test_err delete_private_field
        // class A { #x; m() { delete this.#x; } }
        // class A { #x; m() { delete this?.#x; } }
        if operator == UnaryOperator::Delete && is_private_member(&argument) {
            return Err(p.err(ErrorKind::PrivateFieldDelete, span));
        }
        return Ok(Expression::Unary(Box::new(UnaryExpression {
            span,
            operator,
            argument,
        })));
    }

    if p.at(T![++]) || p.at(T![--]) {
        let operator = if p.at(T![++]) {
            UpdateOperator::Increment
        } else {
            UpdateOperator::Decrement
        };
        p.bump(ctx)?;
        let argument = prefix_expr(p, ctx)?;
        check_simple_target(p, &argument, ErrorKind::InvalidUpdateTarget, ctx)?;
        return Ok(Expression::Update(Box::new(UpdateExpression {
            span: m.finish(p),
            operator,
            prefix: true,
            argument,
        })));
    }

    if p.at_contextual("await") && ctx.contains(Context::IN_ASYNC) {
        return await_expr(p, ctx);
    }

    postfix_expr(p, ctx)
}

fn is_private_member(expr: &Expression) -> bool {
    match expr {
        Expression::Member(member) => matches!(member.property, Expression::PrivateName(_)),
        Expression::Chain(chain) => is_private_member(&chain.expression),
        _ => false,
    }
}

// test async_function_await
// async function foo() { await bar; await await baz(); }
fn await_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let span = p.cur_span();
    if ctx.contains(Context::IN_PARAMETERS) {
        return Err(p.err(ErrorKind::AwaitInParameter, span));
    }
    if p.state.await_pos.is_none() {
        p.state.await_pos = Some(span);
    }
    p.bump(ctx)?;
    let argument = prefix_expr(p, ctx)?;
    Ok(Expression::Await(Box::new(AwaitExpression {
        span: m.finish(p),
        argument,
    })))
}

// `**` is right associative and binds tighter than every other binary operator
fn exponent_expr(
    p: &mut Parser,
    m: Marker,
    left: Expression,
    ctx: Context,
) -> ParseResult<Expression> {
    if !p.at(T![**]) || is_bare_arrow(p, &left) {
        return Ok(left);
    }
    p.bump(ctx)?;
    let right = unary_expr(p, ctx)?;
    Ok(Expression::Binary(Box::new(BinaryExpression {
        span: m.finish(p),
        operator: BinaryOperator::Exp,
        left,
        right,
    })))
}

/// A postfix update expression such as `foo++`, the operator may not follow a newline.
// test postfix_expr
// foo++
// foo.bar--
pub fn postfix_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let expr = lhs_expr(p, ctx)?;
    if !(p.at(T![++]) || p.at(T![--])) || p.has_linebreak_before() || is_bare_arrow(p, &expr) {
        return Ok(expr);
    }

    check_simple_target(p, &expr, ErrorKind::InvalidUpdateTarget, ctx)?;
    let operator = if p.at(T![++]) {
        UpdateOperator::Increment
    } else {
        UpdateOperator::Decrement
    };
    p.bump(ctx)?;
    Ok(Expression::Update(Box::new(UpdateExpression {
        span: m.finish(p),
        operator,
        prefix: false,
        argument: expr,
    })))
}

/// A left hand side expression, a member, call, or new expression.
pub fn lhs_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let callee = member_or_new_expr(p, ctx, false)?;
    if is_bare_arrow(p, &callee) {
        return Ok(callee);
    }
    subscripts(p, m, callee, ctx, false)
}

/// A primary expression or one of `new`, `super`, `import` which begin a member chain.
pub fn member_or_new_expr(p: &mut Parser, ctx: Context, no_call: bool) -> ParseResult<Expression> {
    match p.cur() {
        T![new] => new_expr(p, ctx),
        T![super] => super_expr(p, ctx, no_call),
        T![import] => import_expr(p, ctx, no_call),
        _ => primary_expr(p, ctx),
    }
}

// test new_exprs
// new Foo()
// new foo;
// new.target
// new new new new Foo();
// new Foo(bar, baz, 6 + 6, foo[bar] + (foo) => {} * foo?.bar)
pub fn new_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let new_span = p.cur_span();
    p.bump(ctx)?;

    if p.at(T![.]) {
        p.bump(ctx)?;
        if !p.at_contextual("target") {
            return Err(meta_property_error(p));
        }
        let property = identifier_name(p, ctx)?;
        let span = m.finish(p);
        if !ctx.contains(Context::NEW_TARGET) {
            return Err(p.err(ErrorKind::InvalidNewTarget, span));
        }
        return Ok(Expression::MetaProperty(MetaProperty {
            span,
            meta: Identifier {
                span: new_span,
                name: "new".into(),
            },
            property,
        }));
    }

    if p.at(T![import]) {
        return Err(p.unexpected());
    }

    let callee_m = p.start();
    let callee = member_or_new_expr(p, ctx, true)?;
    let callee = subscripts(p, callee_m, callee, ctx, true)?;
    let arguments = if p.at(T!['(']) {
        arguments(p, ctx)?
    } else {
        vec![]
    };
    Ok(Expression::New(Box::new(NewExpression {
        span: m.finish(p),
        callee,
        arguments,
    })))
}

fn meta_property_error(p: &Parser) -> ParseError {
    if p.cur().is_identifier_name() {
        p.err(
            ErrorKind::InvalidMetaProperty(p.cur_src().to_string()),
            p.cur_span(),
        )
    } else {
        p.unexpected()
    }
}

// test super_property_access
// class A extends B { constructor() { super(); super.foo; super[bar]; } }
fn super_expr(p: &mut Parser, ctx: Context, no_call: bool) -> ParseResult<Expression> {
    let span = p.cur_span();
    p.bump(ctx)?;
    match p.cur() {
        T!['('] if !no_call => {
            if !ctx.contains(Context::SUPER_CALL) {
                return Err(p.err(ErrorKind::InvalidSuperCall, span));
            }
        }
        T![.] | T!['['] => {
            if !ctx.contains(Context::SUPER_PROPERTY) {
                return Err(p.err(ErrorKind::InvalidSuperProperty, span));
            }
        }
        _ => return Err(p.unexpected()),
    }
    Ok(Expression::Super(span))
}

// test import_call
// import("foo")
// import(foo,)
// test import_meta
// import.meta
fn import_expr(p: &mut Parser, ctx: Context, no_call: bool) -> ParseResult<Expression> {
    let m = p.start();
    let import_span = p.cur_span();
    p.bump(ctx)?;

    match p.cur() {
        T![.] => {
            p.bump(ctx)?;
            if !p.at_contextual("meta") {
                return Err(meta_property_error(p));
            }
            let property = identifier_name(p, ctx)?;
            let span = m.finish(p);
            if !ctx.is_module() {
                return Err(p.err(ErrorKind::InvalidImportMeta, span));
            }
            Ok(Expression::MetaProperty(MetaProperty {
                span,
                meta: Identifier {
                    span: import_span,
                    name: "import".into(),
                },
                property,
            }))
        }
        T!['('] if !no_call => {
            let inner = ctx.with(Context::ALLOW_IN);
            p.bump(inner)?;
            if p.at(T![')']) {
                return Err(p.err(ErrorKind::ImportCallArity, m.start..p.cur_tok().end));
            }
            let source = assign_expr(p, inner)?;
            if p.eat(T![,], inner)? && !p.at(T![')']) {
                return Err(p.err(ErrorKind::ImportCallArity, m.start..p.cur_tok().end));
            }
            p.expect(T![')'], ctx)?;
            Ok(Expression::Import(Box::new(ImportExpression {
                span: m.finish(p),
                source,
            })))
        }
        _ => Err(p.unexpected()),
    }
}

/// Member accesses, calls, and tagged templates following `object`.
///
/// With `no_call` the chain stops before the first call, which is the argument list of
/// an enclosing `new`.
// test subscripts
// foo`bar`
// foo(bar)(baz)(baz)[bar]
// foo?.bar?.()?.[baz]
pub fn subscripts(
    p: &mut Parser,
    m: Marker,
    mut object: Expression,
    ctx: Context,
    no_call: bool,
) -> ParseResult<Expression> {
    let mut maybe_async_arrow = match &object {
        Expression::Identifier(ident) => {
            ident.name == "async"
                && p.state.potential_arrow_at == Some(m.start)
                && &p.source()[ident.span.range()] == "async"
        }
        _ => false,
    };
    let mut in_chain = false;

    loop {
        let optional = p.at(T![?.]);
        if optional {
            if no_call {
                return Err(p.err(ErrorKind::OptionalChainInNew, p.cur_span()));
            }
            in_chain = true;
            p.bump(ctx)?;
        }

        object = match p.cur() {
            T![.] if !optional => {
                p.bump(ctx)?;
                let property = if p.at(PRIVATE_NAME) {
                    if matches!(object, Expression::Super(_)) {
                        return Err(p.unexpected());
                    }
                    private_reference(p, ctx)?
                } else {
                    Expression::Identifier(identifier_name(p, ctx)?)
                };
                member_expr(p, m, object, property, false, false)
            }
            T!['['] => {
                let inner = ctx.with(Context::ALLOW_IN);
                p.bump(inner)?;
                let property = expr(p, inner)?;
                p.expect(T![']'], ctx)?;
                member_expr(p, m, object, property, true, optional)
            }
            T!['('] if !no_call => {
                if maybe_async_arrow && !optional && !p.has_linebreak_before() {
                    let res = async_arrow_or_call(p, m, object, ctx)?;
                    if matches!(res, Expression::Arrow(_)) {
                        return Ok(res);
                    }
                    res
                } else {
                    let arguments = arguments(p, ctx)?;
                    Expression::Call(Box::new(CallExpression {
                        span: m.finish(p),
                        callee: object,
                        arguments,
                        optional,
                    }))
                }
            }
            TEMPLATE_TAIL | TEMPLATE_CONT => {
                if in_chain {
                    return Err(p.err(ErrorKind::TaggedTemplateInOptionalChain, p.cur_span()));
                }
                let quasi = template(p, ctx, true)?;
                Expression::TaggedTemplate(Box::new(TaggedTemplateExpression {
                    span: m.finish(p),
                    tag: object,
                    quasi,
                }))
            }
            kind if optional && kind.is_identifier_name() => {
                let property = identifier_name(p, ctx)?;
                member_expr(p, m, object, Expression::Identifier(property), false, true)
            }
            PRIVATE_NAME if optional => {
                let property = private_reference(p, ctx)?;
                member_expr(p, m, object, property, false, true)
            }
            _ if optional => return Err(p.unexpected()),
            _ => break,
        };
        maybe_async_arrow = false;
    }

    if in_chain {
        object = Expression::Chain(Box::new(ChainExpression {
            span: m.finish(p),
            expression: object,
        }));
    }
    Ok(object)
}

fn member_expr(
    p: &Parser,
    m: Marker,
    object: Expression,
    property: Expression,
    computed: bool,
    optional: bool,
) -> Expression {
    Expression::Member(Box::new(MemberExpression {
        span: m.finish(p),
        object,
        property,
        computed,
        optional,
    }))
}

/// An argument list such as `(a, ...b)`.
// test call_arguments
// foo();
// foo(a,);
// foo(a, b, ...c);
pub fn arguments(p: &mut Parser, ctx: Context) -> ParseResult<Vec<ExprOrSpread>> {
    let inner = ctx.with(Context::ALLOW_IN);
    p.expect(T!['('], inner)?;
    let mut args = vec![];
    while !p.at(T![')']) {
        if p.at(T![...]) {
            let m = p.start();
            p.bump(inner)?;
            let argument = assign_expr(p, inner)?;
            args.push(ExprOrSpread::Spread(SpreadElement {
                span: m.finish(p),
                argument,
            }));
        } else {
            args.push(ExprOrSpread::Expr(assign_expr(p, inner)?));
        }
        if !p.at(T![')']) {
            p.expect(T![,], inner)?;
        }
    }
    p.expect(T![')'], ctx)?;
    Ok(args)
}

// `async(a, b)` is a call until a `=>` makes it the head of an async arrow function
// test async_arrow_expr
// let a = async foo => {}
// let b = async (bar) => {}
// async (foo, bar, ...baz) => foo
fn async_arrow_or_call(
    p: &mut Parser,
    m: Marker,
    callee: Expression,
    ctx: Context,
) -> ParseResult<Expression> {
    let inner = ctx.with(Context::ALLOW_IN);
    p.bump(inner)?;
    let outer_positions = p.state.take_arrow_positions();
    let outer_cover = p.state.cover.take();

    let mut args = vec![];
    let mut comma_after_spread = false;
    while !p.at(T![')']) {
        let is_spread = p.at(T![...]);
        if is_spread {
            let spread_m = p.start();
            p.bump(inner)?;
            let argument = assign_expr_cover(p, inner)?;
            args.push(ExprOrSpread::Spread(SpreadElement {
                span: spread_m.finish(p),
                argument,
            }));
        } else {
            args.push(ExprOrSpread::Expr(assign_expr_cover(p, inner)?));
        }
        if !p.at(T![')']) {
            p.expect(T![,], inner)?;
            comma_after_spread = is_spread && p.at(T![')']);
        }
    }
    p.expect(T![')'], ctx)?;

    if p.at(T![=>]) {
        if p.has_linebreak_before() {
            return Err(p.err(ErrorKind::LineTerminatorBeforeArrow, p.cur_span()));
        }
        check_arrow_positions(p, true)?;
        p.state.cover = outer_cover;
        p.state.merge_arrow_positions(outer_positions);

        let len = args.len();
        let mut params = Vec::with_capacity(len);
        for (idx, arg) in args.into_iter().enumerate() {
            let param = match arg {
                ExprOrSpread::Expr(expr) => {
                    expr_to_pattern(p, expr, PatternTarget::Binding, ctx)?
                }
                ExprOrSpread::Spread(spread) => {
                    if idx + 1 != len {
                        return Err(p.err(ErrorKind::RestNotLast, spread.span));
                    }
                    if comma_after_spread {
                        return Err(p.err(ErrorKind::RestTrailingComma, spread.span));
                    }
                    if let Expression::Assignment(assign) = &spread.argument {
                        return Err(p.err(ErrorKind::RestWithInitializer, assign.span));
                    }
                    let argument =
                        expr_to_pattern(p, spread.argument, PatternTarget::Binding, ctx)?;
                    Pattern::Rest(Box::new(RestElement {
                        span: spread.span,
                        argument,
                    }))
                }
            };
            params.push(param);
        }
        return arrow_function(p, m, params, true, ctx);
    }

    if let Some((kind, span)) = p.state.cover.take() {
        return Err(p.err(kind, span));
    }
    p.state.cover = outer_cover;
    p.state.merge_arrow_positions(outer_positions);
    Ok(Expression::Call(Box::new(CallExpression {
        span: m.finish(p),
        callee,
        arguments: args,
        optional: false,
    })))
}

/// Raise `yield` or `await` expressions found while parsing what turned out to be arrow
/// function parameters.
pub fn check_arrow_positions(p: &mut Parser, is_async: bool) -> ParseResult<()> {
    if let Some(span) = p.state.yield_pos {
        return Err(p.err(ErrorKind::YieldInParameter, span));
    }
    if let Some(span) = p.state.await_pos {
        return Err(p.err(ErrorKind::AwaitInParameter, span));
    }
    if is_async {
        if let Some(span) = p.state.await_ident_pos {
            return Err(p.err(ErrorKind::AwaitIdentifier, span));
        }
    }
    Ok(())
}

/// A primary expression such as a literal, an identifier, or a parenthesized expression.
pub fn primary_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let can_be_arrow = p.state.potential_arrow_at == Some(p.cur_tok().start);

    match p.cur() {
        T![this] => {
            let span = p.cur_span();
            p.bump(ctx)?;
            Ok(Expression::This(span))
        }
        kind if LITERAL.contains(kind) => literal(p, ctx).map(Expression::Literal),
        T![/] | T![/=] => {
            p.rescan_regex(ctx)?;
            literal(p, ctx).map(Expression::Literal)
        }
        TEMPLATE_TAIL | TEMPLATE_CONT => template(p, ctx, false).map(Expression::Template),
        T!['('] => paren_expr(p, ctx, can_be_arrow),
        T!['['] => array_expr(p, ctx),
        T!['{'] => object_expr(p, ctx),
        T![function] => {
            let m = p.start();
            function_expr(p, m, ctx, false)
        }
        T![class] => class_expr(p, ctx),
        T![ident] => identifier_or_arrow(p, ctx, can_be_arrow),
        _ => Err(p.unexpected()),
    }
}

// test arrow_expr
// foo => {}
// yield => bar
// await => baz
fn identifier_or_arrow(p: &mut Parser, ctx: Context, can_be_arrow: bool) -> ParseResult<Expression> {
    let m = p.start();

    if p.at_contextual("async") {
        let next = p.lookahead(ctx)?;
        if !next.had_linebreak {
            if next.kind == T![function] {
                p.bump(ctx)?;
                return function_expr(p, m, ctx, true);
            }
            // `async x => x`, but `for (async of x)` must see `async` as an identifier
            if can_be_arrow
                && next.kind == T![ident]
                && p.nth_lookahead(2, ctx)?.kind == T![=>]
            {
                p.bump(ctx)?;
                let outer_positions = p.state.take_arrow_positions();
                let param = binding_identifier(p, ctx.with(Context::IN_ASYNC))?;
                if !p.at(T![=>]) {
                    return Err(p.unexpected());
                }
                p.state.merge_arrow_positions(outer_positions);
                return arrow_function(p, m, vec![Pattern::Identifier(param)], true, ctx);
            }
        }
    }

    let ident = identifier_reference(p, ctx)?;
    if can_be_arrow && p.at(T![=>]) {
        if p.has_linebreak_before() {
            return Err(p.err(ErrorKind::LineTerminatorBeforeArrow, p.cur_span()));
        }
        check_binding(p, &ident, ctx)?;
        return arrow_function(p, m, vec![Pattern::Identifier(ident)], false, ctx);
    }
    Ok(Expression::Identifier(ident))
}

/// A parenthesized expression, or the parameter list of an arrow function.
// test paren_or_arrow_expr
// (foo);
// (foo) => {};
// (5 + 5);
// ({foo, bar, b: [f, ...baz]}) => {};
// (foo, ...bar) => {}
pub fn paren_expr(p: &mut Parser, ctx: Context, can_be_arrow: bool) -> ParseResult<Expression> {
    let m = p.start();
    let inner = ctx.with(Context::ALLOW_IN);
    p.bump(inner)?;
    let outer_positions = p.state.take_arrow_positions();
    let outer_cover = p.state.cover.take();

    let inner_start = p.cur_tok().start;
    let mut items = vec![];
    let mut rest = None;
    let mut trailing_comma = false;
    while !p.at(T![')']) {
        if p.at(T![...]) {
            rest = Some(super::pat::binding_rest(p, inner, T![')'])?);
            break;
        }
        items.push(assign_expr_cover(p, inner)?);
        if !p.at(T![')']) {
            p.expect(T![,], inner)?;
            trailing_comma = p.at(T![')']);
        }
    }
    let inner_end = p.prev_end();
    p.expect(T![')'], ctx)?;

    if can_be_arrow && p.at(T![=>]) {
        if p.has_linebreak_before() {
            return Err(p.err(ErrorKind::LineTerminatorBeforeArrow, p.cur_span()));
        }
        check_arrow_positions(p, false)?;
        p.state.cover = outer_cover;
        p.state.merge_arrow_positions(outer_positions);

        let mut params = Vec::with_capacity(items.len() + 1);
        for item in items {
            params.push(expr_to_pattern(p, item, PatternTarget::Binding, ctx)?);
        }
        if let Some(rest) = rest {
            params.push(Pattern::Rest(Box::new(rest)));
        }
        return arrow_function(p, m, params, false, ctx);
    }

    // `()`, `(a,)` and `(...a)` are only valid as arrow parameters
    if items.is_empty() || rest.is_some() || trailing_comma {
        return Err(p.unexpected());
    }
    if let Some((kind, span)) = p.state.cover.take() {
        return Err(p.err(kind, span));
    }
    p.state.cover = outer_cover;
    p.state.merge_arrow_positions(outer_positions);

    let expr = if items.len() == 1 {
        items.remove(0)
    } else {
        Expression::Sequence(SequenceExpression {
            span: Span::new(inner_start, inner_end),
            expressions: items,
        })
    };
    p.parenthesized.insert(expr.span());
    Ok(expr)
}

/// A spread element in an array or object literal, the argument may still become a pattern.
fn spread_element(p: &mut Parser, ctx: Context) -> ParseResult<SpreadElement> {
    let m = p.start();
    p.bump(ctx)?;
    let argument = assign_expr_cover(p, ctx)?;
    Ok(SpreadElement {
        span: m.finish(p),
        argument,
    })
}

/// An array literal such as `[foo, bar, ...baz]`.
// test array_expr
// [foo, bar];
// [foo];
// [,foo];
// [foo,];
// [,,,,,foo,,,,];
// [...a, ...b];
pub fn array_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let inner = ctx.with(Context::ALLOW_IN);
    p.bump(inner)?;
    let mut elements = vec![];
    let mut comma_after_rest = false;

    while !p.at(T![']']) {
        if p.eat(T![,], inner)? {
            elements.push(None);
            continue;
        }
        let is_spread = p.at(T![...]);
        let elem = if is_spread {
            ExprOrSpread::Spread(spread_element(p, inner)?)
        } else {
            ExprOrSpread::Expr(assign_expr_cover(p, inner)?)
        };
        elements.push(Some(elem));
        if !p.at(T![']']) {
            p.expect(T![,], inner)?;
            comma_after_rest = is_spread && p.at(T![']']);
        }
    }
    p.expect(T![']'], ctx)?;

    let span = m.finish(p);
    if comma_after_rest {
        p.trailing_comma_after_rest.insert(span);
    }
    Ok(Expression::Array(ArrayExpression { span, elements }))
}

/// A property key, an identifier name, a string or numeric literal, or a computed key.
pub struct PropName {
    pub key: Expression,
    pub computed: bool,
}

impl PropName {
    /// The name of a non computed key, e.g. `constructor` for both `constructor` and `"constructor"`.
    pub fn static_name(&self) -> Option<&str> {
        if self.computed {
            return None;
        }
        match &self.key {
            Expression::Identifier(ident) => Some(&ident.name),
            Expression::Literal(lit) => lit.as_str(),
            _ => None,
        }
    }
}

// test property_names
// ({ a: 1, "b": 2, 3: 3, 4n: 4, [5]: 5, if: 6 })
pub fn property_name(p: &mut Parser, ctx: Context) -> ParseResult<PropName> {
    let key = match p.cur() {
        STRING | NUMBER | BIG_INT => Expression::Literal(literal(p, ctx)?),
        T!['['] => {
            let inner = ctx.with(Context::ALLOW_IN);
            p.bump(inner)?;
            let key = assign_expr(p, inner)?;
            p.expect(T![']'], ctx)?;
            return Ok(PropName {
                key,
                computed: true,
            });
        }
        kind if kind.is_identifier_name() => Expression::Identifier(identifier_name(p, ctx)?),
        _ => return Err(p.unexpected()),
    };
    Ok(PropName {
        key,
        computed: false,
    })
}

/// An object literal such as `{ a, b: 5, [c]() {}, ...d }`.
// test object_expr
// let a = {};
// let b = {foo,}
// let c = { a: 1, get b() { return 1 }, set b(v) {}, *c() {}, async d() {}, ...e }
pub fn object_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let m = p.start();
    let inner = ctx.with(Context::ALLOW_IN);
    p.bump(inner)?;
    let mut properties = vec![];
    let mut has_proto = false;
    let mut comma_after_rest = false;

    while !p.at(T!['}']) {
        if p.at(T![...]) {
            properties.push(ObjectMember::Spread(spread_element(p, inner)?));
            if !p.at(T!['}']) {
                p.expect(T![,], inner)?;
                comma_after_rest = p.at(T!['}']);
            }
            continue;
        }

        let prop = object_member(p, inner)?;
        if is_proto_init(&prop) {
            if has_proto {
                let span = prop.key.span();
                p.state.note_cover(ErrorKind::DuplicateProto, span);
            }
            has_proto = true;
        }
        properties.push(ObjectMember::Property(prop));
        if !p.at(T!['}']) {
            p.expect(T![,], inner)?;
        }
        comma_after_rest = false;
    }
    p.expect(T!['}'], ctx)?;

    let span = m.finish(p);
    if comma_after_rest {
        p.trailing_comma_after_rest.insert(span);
    }
    Ok(Expression::Object(ObjectExpression { span, properties }))
}

// `__proto__: value`, which may only appear once in an object literal
fn is_proto_init(prop: &Property) -> bool {
    if prop.computed || prop.shorthand || prop.method || prop.kind != PropertyKind::Init {
        return false;
    }
    match &prop.key {
        Expression::Identifier(ident) => ident.name == "__proto__",
        Expression::Literal(lit) => lit.as_str() == Some("__proto__"),
        _ => false,
    }
}

fn object_member(p: &mut Parser, ctx: Context) -> ParseResult<Property> {
    let m = p.start();
    let mut is_async = false;
    let mut kind = PropertyKind::Init;

    if p.at_contextual("async") || p.at_contextual("get") || p.at_contextual("set") {
        let next = p.lookahead(ctx)?;
        let is_modifier = !matches!(next.kind, T![,] | T![:] | T!['('] | T!['}'] | T![=])
            && !(p.at_contextual("async") && next.had_linebreak);
        if is_modifier {
            match p.cur_src() {
                "async" => is_async = true,
                "get" => kind = PropertyKind::Get,
                _ => kind = PropertyKind::Set,
            }
            p.bump(ctx)?;
        }
    }
    let generator = p.eat(T![*], ctx)?;
    if generator && kind != PropertyKind::Init {
        return Err(p.unexpected());
    }

    let name_kind = p.cur();
    let name_src = p.cur_src();
    let prop_name = property_name(p, ctx)?;

    if is_async || generator || kind != PropertyKind::Init || p.at(T!['(']) {
        let method_kind = match kind {
            PropertyKind::Get => MethodKind::Get,
            PropertyKind::Set => MethodKind::Set,
            PropertyKind::Init => MethodKind::Method,
        };
        let value = method_function(p, ctx, is_async, generator, method_kind, false)?;
        return Ok(Property {
            span: m.finish(p),
            key: prop_name.key,
            value: Expression::Function(Box::new(value)),
            kind,
            method: kind == PropertyKind::Init,
            shorthand: false,
            computed: prop_name.computed,
        });
    }

    if p.eat(T![:], ctx)? {
        let value = assign_expr_cover(p, ctx)?;
        return Ok(Property {
            span: m.finish(p),
            key: prop_name.key,
            value,
            kind,
            method: false,
            shorthand: false,
            computed: prop_name.computed,
        });
    }

    // shorthand, `{ a }` or the cover initializer `{ a = 1 }`
    let ident = match prop_name.key {
        Expression::Identifier(ident) if name_kind == T![ident] => ident,
        key if name_kind.is_keyword() => {
            return Err(p.err(ErrorKind::ReservedWord(name_src.to_string()), key.span()))
        }
        _ => return Err(p.unexpected()),
    };
    check_identifier(p, &ident.name, ident.span, ctx)?;

    let mut value = Expression::Identifier(ident.clone());
    if p.at(T![=]) {
        let eq = p.cur_span();
        p.state.note_cover(ErrorKind::InvalidCoverInitializedName, eq);
        p.bump(ctx)?;
        let right = assign_expr(p, ctx)?;
        value = Expression::Assignment(Box::new(AssignmentExpression {
            span: m.finish(p),
            operator: AssignmentOperator::Assign,
            left: Pattern::Identifier(ident.clone()),
            right,
        }));
    }
    Ok(Property {
        span: m.finish(p),
        key: Expression::Identifier(ident),
        value,
        kind,
        method: false,
        shorthand: true,
        computed: false,
    })
}

/// A template literal, tagged templates allow invalid escapes in their chunks.
// test template_literal
// let a = `foo ${bar}`;
// let b = ``;
// let c = `${a}${b}`;
// tag`\unicode`;
pub fn template(p: &mut Parser, ctx: Context, tagged: bool) -> ParseResult<TemplateLiteral> {
    let m = p.start();
    let mut quasis = vec![];
    let mut expressions = vec![];

    loop {
        let tok = p.cur_tok();
        let tail = match tok.kind {
            TEMPLATE_TAIL => true,
            TEMPLATE_CONT => false,
            _ => return Err(p.unexpected()),
        };
        let (cooked, raw) = match &tok.value {
            TokenValue::Template { cooked, raw } => (cooked.clone(), raw.clone()),
            _ => (None, String::new()),
        };
        let tok_span = tok.span();
        // without the leading `` ` `` or `}` and the trailing `` ` `` or `${`
        let span = Span::new(tok.start + 1, tok.end - if tail { 1 } else { 2 });
        if cooked.is_none() && !tagged {
            return Err(p.err(ErrorKind::InvalidTemplateEscape, tok_span));
        }
        quasis.push(TemplateElement {
            span,
            cooked,
            raw,
            tail,
        });

        if tail {
            p.bump(ctx)?;
            break;
        }
        let inner = ctx.with(Context::ALLOW_IN);
        p.bump(inner)?;
        expressions.push(expr(p, inner)?);
        if !p.at(T!['}']) {
            return Err(p.unexpected());
        }
        p.rescan_template_continuation(ctx)?;
    }

    Ok(TemplateLiteral {
        span: m.finish(p),
        quasis,
        expressions,
    })
}
