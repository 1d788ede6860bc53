//! Class and function declarations.

use super::expr::{assign_expr, lhs_expr, private_name, property_name, PropName};
use super::pat::{binding_element, binding_identifier, binding_rest};
use super::program::directives;
use super::stmt::statement_list;
use super::util::{check_strict_binding, declare_name, declare_params};
use crate::ast::*;
use crate::scope::{BindingKind, PrivateKind, ScopeFlags};
use crate::*;

/// The kind of function being parsed, decides which parameter rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Declaration,
    Expression,
    Method,
    Arrow,
}

/// What the body of a function needs to know about its head.
#[derive(Debug, Clone, Copy)]
pub struct FunctionInfo<'a> {
    pub id: Option<&'a Identifier>,
    pub params: &'a [Pattern],
    pub kind: FunctionKind,
}

impl FunctionInfo<'_> {
    pub fn is_simple(&self) -> bool {
        self.params.iter().all(Pattern::is_simple)
    }

    /// Validate the name and parameters again once a `"use strict"` directive made the
    /// function strict.
    pub fn check_strict(&self, p: &mut Parser) -> ParseResult<()> {
        if let Some(id) = self.id {
            check_strict_binding(p, id)?;
        }
        let mut names = vec![];
        for param in self.params {
            param.bound_names(&mut names);
        }
        for ident in names {
            check_strict_binding(p, ident)?;
        }
        Ok(())
    }

    /// Declare the parameters in the function scope, duplicates are only allowed for
    /// sloppy plain functions with simple parameter lists.
    pub fn declare_params(&self, p: &mut Parser, ctx: Context) -> ParseResult<()> {
        let allow_duplicates = matches!(
            self.kind,
            FunctionKind::Declaration | FunctionKind::Expression
        ) && !ctx.is_strict()
            && self.is_simple();
        declare_params(p, self.params, allow_duplicates)
    }
}

/// The context of the body of a non arrow function.
pub fn function_ctx(ctx: Context, is_async: bool, generator: bool) -> Context {
    ctx.without(Context::FUNCTION_RESET)
        .with(Context::IN_FUNCTION | Context::NEW_TARGET | Context::ALLOW_IN)
        .toggle_if(Context::IN_GENERATOR, generator)
        .toggle_if(Context::IN_ASYNC, is_async)
}

/// A function declaration, this could be async and or a generator. This takes a marker
/// because you need to first advance over async or start a marker and feed it in.
// test function_decl
// function foo() {}
// function *foo() {}
// async function foo() {}
// async function *foo() {}
// function foo(a, b = 5, ...c) { yield; }
pub fn function_decl(
    p: &mut Parser,
    m: Marker,
    ctx: Context,
    is_async: bool,
    optional_name: bool,
) -> ParseResult<Function> {
    function(p, m, ctx, is_async, FunctionKind::Declaration, optional_name)
}

// test function_expr
// let a = function() {}
// let b = function foo() {}
// let c = async function *foo() {}
pub fn function_expr(
    p: &mut Parser,
    m: Marker,
    ctx: Context,
    is_async: bool,
) -> ParseResult<Expression> {
    let func = function(p, m, ctx, is_async, FunctionKind::Expression, true)?;
    Ok(Expression::Function(Box::new(func)))
}

fn function(
    p: &mut Parser,
    m: Marker,
    ctx: Context,
    is_async: bool,
    kind: FunctionKind,
    optional_name: bool,
) -> ParseResult<Function> {
    p.expect(T![function], ctx)?;
    let generator = p.eat(T![*], ctx)?;
    let fctx = function_ctx(ctx, is_async, generator);
    let declaration = kind == FunctionKind::Declaration;

    let id = if p.at(T!['(']) && optional_name {
        None
    } else if declaration {
        Some(binding_identifier(p, ctx)?)
    } else {
        // the name of a function expression follows the function's own yield and await rules
        let name_ctx = ctx
            .toggle_if(Context::IN_GENERATOR, generator)
            .toggle_if(Context::IN_ASYNC, is_async);
        Some(binding_identifier(p, name_ctx)?)
    };

    if let (true, Some(id)) = (declaration, &id) {
        let plain_sloppy = !ctx.is_strict() && !generator && !is_async;
        let binding = p
            .scopes
            .function_binding(plain_sloppy, ctx.is_web_compat_sloppy());
        if !p.scopes.declare(&id.name, binding) {
            return Err(p.err(ErrorKind::DuplicateBinding(id.name.to_string()), id.span));
        }
    }

    let mut guard = p.with_state(ParserState::function_state());
    let p = &mut *guard;
    p.scopes.enter(ScopeFlags::FUNCTION);
    let params = formal_parameters(p, fctx.with(Context::IN_PARAMETERS))?;
    let info = FunctionInfo {
        id: id.as_ref(),
        params: &params,
        kind,
    };
    let body = function_body(p, fctx, ctx, &info)?;
    p.scopes.exit();

    Ok(Function {
        span: m.finish(p),
        id,
        params,
        body,
        generator,
        is_async,
    })
}

// test formal_params
// function foo(a, b) {}
// function bar(a, [b, c] = d, { e }, ...f) {}
// function baz(a,) {}
pub fn formal_parameters(p: &mut Parser, ctx: Context) -> ParseResult<Vec<Pattern>> {
    p.expect(T!['('], ctx)?;
    let mut params = vec![];

    while !p.at(T![')']) {
        if p.at(T![...]) {
            let rest = binding_rest(p, ctx, T![')'])?;
            params.push(Pattern::Rest(Box::new(rest)));
            break;
        }
        params.push(binding_element(p, ctx)?);
        if !p.at(T![')']) {
            p.expect(T![,], ctx)?;
        }
    }

    p.expect(T![')'], ctx)?;
    Ok(params)
}

/// The body of a function, starting with its directive prologue.
///
/// `ctx` is the context of the body, `outer` the context the closing brace is consumed
/// with.
pub fn function_body(
    p: &mut Parser,
    ctx: Context,
    outer: Context,
    info: &FunctionInfo,
) -> ParseResult<FunctionBody> {
    let m = p.start();
    // octal literals before the body can never be made strict by its prologue
    p.reset_legacy_octal();
    p.expect(T!['{'], ctx)?;

    let (mut body, ctx) = directives(p, ctx, Some(info))?;
    info.declare_params(p, ctx)?;
    statement_list(p, ctx, T!['}'], &mut body)?;
    p.expect(T!['}'], outer)?;

    Ok(FunctionBody {
        span: m.finish(p),
        body,
    })
}

/// Parse the body of an arrow function whose parameters were already parsed, the parser
/// must be at `=>`.
// test arrow_fn_bodies
// let a = () => {}
// let b = (c) => c * 2
// let d = async e => await e
pub fn arrow_function(
    p: &mut Parser,
    m: Marker,
    params: Vec<Pattern>,
    is_async: bool,
    ctx: Context,
) -> ParseResult<Expression> {
    if p.has_linebreak_before() {
        return Err(p.err(ErrorKind::LineTerminatorBeforeArrow, p.cur_span()));
    }
    // arrows keep `this`, `super` and `new.target` of the enclosing function
    let body_ctx = ctx
        .without(
            Context::IN_GENERATOR
                | Context::IN_PARAMETERS
                | Context::IN_ITERATION
                | Context::IN_SWITCH
                | Context::AWAIT_RESERVED,
        )
        .toggle_if(Context::IN_ASYNC, is_async)
        .with(Context::IN_FUNCTION);
    p.expect(T![=>], body_ctx)?;

    let mut guard = p.with_state(ParserState::function_state());
    let p = &mut *guard;
    p.scopes.enter(ScopeFlags::FUNCTION);
    let info = FunctionInfo {
        id: None,
        params: &params,
        kind: FunctionKind::Arrow,
    };
    let body = if p.at(T!['{']) {
        ArrowBody::Block(function_body(
            p,
            body_ctx.with(Context::ALLOW_IN),
            ctx,
            &info,
        )?)
    } else {
        info.declare_params(p, body_ctx)?;
        ArrowBody::Expression(assign_expr(p, body_ctx)?)
    };
    p.scopes.exit();

    Ok(Expression::Arrow(Box::new(ArrowFunction {
        span: m.finish(p),
        params,
        body,
        is_async,
    })))
}

/// The parameters and body of a method, the parser must be at the parameter list.
///
/// `super_call` allows `super()`, which only derived class constructors may call.
pub fn method_function(
    p: &mut Parser,
    ctx: Context,
    is_async: bool,
    generator: bool,
    kind: MethodKind,
    super_call: bool,
) -> ParseResult<Function> {
    let m = p.start();
    let fctx = function_ctx(ctx, is_async, generator)
        .with(Context::SUPER_PROPERTY)
        .toggle_if(Context::SUPER_CALL, super_call);

    let mut guard = p.with_state(ParserState::function_state());
    let p = &mut *guard;
    p.scopes.enter(ScopeFlags::FUNCTION);
    let params = formal_parameters(p, fctx.with(Context::IN_PARAMETERS))?;

    // test_err accessor_arity
    // ({ get a(b) {} })
    // ({ set a() {} })
    // ({ set a(...b) {} })
    match kind {
        MethodKind::Get if !params.is_empty() => {
            return Err(p.err(ErrorKind::GetterArity, m.finish(p)));
        }
        MethodKind::Set if params.len() != 1 || matches!(params[0], Pattern::Rest(_)) => {
            return Err(p.err(ErrorKind::SetterArity, m.finish(p)));
        }
        _ => {}
    }

    let info = FunctionInfo {
        id: None,
        params: &params,
        kind: FunctionKind::Method,
    };
    let body = function_body(p, fctx, ctx, &info)?;
    p.scopes.exit();

    Ok(Function {
        span: m.finish(p),
        id: None,
        params,
        body,
        generator,
        is_async,
    })
}

/// A class declaration, the name is only optional after `export default`.
// test class_decl
// class foo {}
// class foo extends bar {}
// class foo extends foo.bar {}
pub fn class_decl(p: &mut Parser, ctx: Context, optional_name: bool) -> ParseResult<Class> {
    class(p, ctx, true, optional_name)
}

// test class_expr
// let a = class {};
// let b = class foo { constructor() {} }
// foo[class {}]
pub fn class_expr(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    let class = class(p, ctx, false, true)?;
    Ok(Expression::Class(Box::new(class)))
}

fn class(p: &mut Parser, ctx: Context, declaration: bool, optional_name: bool) -> ParseResult<Class> {
    let m = p.start();
    // all parts of a class are strict mode code
    let class_ctx = ctx.with(Context::STRICT);
    p.expect(T![class], class_ctx)?;

    let id = if p.at(T![extends]) || p.at(T!['{']) {
        if declaration && !optional_name {
            return Err(p.unexpected());
        }
        None
    } else {
        Some(binding_identifier(p, class_ctx)?)
    };
    if let (true, Some(id)) = (declaration, &id) {
        declare_name(p, id, BindingKind::Lexical)?;
    }

    let super_class = if p.eat(T![extends], class_ctx)? {
        Some(lhs_expr(p, class_ctx)?)
    } else {
        None
    };

    let body_m = p.start();
    p.expect(T!['{'], class_ctx)?;
    p.private_names.enter();
    let mut members = vec![];
    let mut has_constructor = false;
    while !p.at(T!['}']) {
        if p.eat(T![;], class_ctx)? {
            continue;
        }
        members.push(class_member(
            p,
            class_ctx,
            super_class.is_some(),
            &mut has_constructor,
        )?);
    }
    if let Some((name, span)) = p.private_names.exit() {
        return Err(p.err(ErrorKind::UndeclaredPrivateName(name.to_string()), span));
    }
    p.expect(T!['}'], ctx)?;
    let body = ClassBody {
        span: body_m.finish(p),
        body: members,
    };

    Ok(Class {
        span: m.finish(p),
        id,
        super_class,
        body,
    })
}

// test class_members
// class foo {
//   constructor() {}
//   static bar() {}
//   get baz() {}
//   set baz(a) {}
//   async *qux() {}
//   [computed] = 5;
//   static field;
//   get;
//   static;
//   #private = 1;
//   static #method() {}
//   get #accessor() {}
//   set #accessor(a) {}
//   static {}
// }
fn class_member(
    p: &mut Parser,
    ctx: Context,
    derived: bool,
    has_constructor: &mut bool,
) -> ParseResult<ClassMember> {
    let m = p.start();

    let is_static = p.at_contextual("static")
        && !matches!(
            p.lookahead(ctx)?.kind,
            T!['('] | T![=] | T![;] | T!['}']
        );
    if is_static {
        p.bump(ctx)?;
        if p.at(T!['{']) {
            return static_block(p, m, ctx);
        }
    }

    let mut is_async = false;
    let mut kind = MethodKind::Method;
    if p.at_contextual("async") || p.at_contextual("get") || p.at_contextual("set") {
        let next = p.lookahead(ctx)?;
        let is_modifier = !matches!(next.kind, T!['('] | T![=] | T![;] | T!['}'])
            && !(p.at_contextual("async") && next.had_linebreak);
        if is_modifier {
            match p.cur_src() {
                "async" => is_async = true,
                "get" => kind = MethodKind::Get,
                _ => kind = MethodKind::Set,
            }
            p.bump(ctx)?;
        }
    }
    let accessor = kind != MethodKind::Method;
    let generator = p.eat(T![*], ctx)?;
    if generator && accessor {
        return Err(p.unexpected());
    }

    let key_span = p.cur_span();
    let name = class_element_name(p, ctx)?;
    let is_constructor = !is_static && name.static_name() == Some("constructor");
    let is_prototype = is_static && name.static_name() == Some("prototype");

    if is_prototype {
        return Err(p.err(ErrorKind::StaticPrototype, key_span));
    }

    if p.at(T!['(']) || is_async || generator || accessor {
        if is_constructor {
            if accessor || generator || is_async {
                return Err(p.err(ErrorKind::SpecialConstructor, key_span));
            }
            if *has_constructor {
                return Err(p.err(ErrorKind::DuplicateConstructor, key_span));
            }
            *has_constructor = true;
            kind = MethodKind::Constructor;
        }

        let private_kind = match kind {
            MethodKind::Get => PrivateKind::Getter,
            MethodKind::Set => PrivateKind::Setter,
            _ => PrivateKind::Method,
        };
        declare_private(p, &name, private_kind, is_static, key_span)?;

        let value = method_function(p, ctx, is_async, generator, kind, is_constructor && derived)?;
        return Ok(ClassMember::Method(MethodDefinition {
            span: m.finish(p),
            key: name.key,
            computed: name.computed,
            is_static,
            kind,
            value: Box::new(value),
        }));
    }

    if name.static_name() == Some("constructor") {
        return Err(p.err(ErrorKind::ConstructorField, key_span));
    }
    declare_private(p, &name, PrivateKind::Field, is_static, key_span)?;

    let value = if p.eat(T![=], ctx)? {
        // an initializer is evaluated like the body of a method
        let field_ctx = ctx
            .without(Context::FUNCTION_RESET)
            .with(
                Context::SUPER_PROPERTY
                    | Context::NEW_TARGET
                    | Context::ALLOW_IN
                    | Context::IN_CLASS_FIELD,
            )
            .toggle_if(
                Context::AWAIT_RESERVED,
                ctx.intersects(Context::IN_ASYNC | Context::AWAIT_RESERVED),
            );
        let mut guard = p.with_state(ParserState::function_state());
        Some(assign_expr(&mut *guard, field_ctx)?)
    } else {
        None
    };
    p.semicolon(ctx)?;

    Ok(ClassMember::Property(PropertyDefinition {
        span: m.finish(p),
        key: name.key,
        computed: name.computed,
        is_static,
        value,
    }))
}

/// A class member key, which unlike an object literal key may be a private name.
fn class_element_name(p: &mut Parser, ctx: Context) -> ParseResult<PropName> {
    if !p.at(TokenKind::PRIVATE_NAME) {
        return property_name(p, ctx);
    }
    let ident = private_name(p, ctx)?;
    Ok(PropName {
        key: Expression::PrivateName(ident),
        computed: false,
    })
}

// test_err private_name_declarations
// class A { #a; #a; }
// class A { get #a() {} #a() {} }
// class A { static get #a() {} set #a(b) {} }
// class A { #constructor() {} }
fn declare_private(
    p: &mut Parser,
    name: &PropName,
    kind: PrivateKind,
    is_static: bool,
    span: Span,
) -> ParseResult<()> {
    let ident = match &name.key {
        Expression::PrivateName(ident) => ident,
        _ => return Ok(()),
    };
    if ident.name == "constructor" {
        return Err(p.err(ErrorKind::PrivateConstructor, span));
    }
    if !p.private_names.declare(&ident.name, kind, is_static) {
        return Err(p.err(
            ErrorKind::DuplicatePrivateName(ident.name.to_string()),
            span,
        ));
    }
    Ok(())
}

/// A `static { }` block, the parser must be at the `{`.
///
/// The block is its own var scope. `this` and `super.x` refer to the class, while
/// `arguments`, `await`, `super()` and `return` are not allowed.
// test static_block
// class A { static { var a = 1; this.b = super.c; } static {} }
// test_err static_block_restrictions
// class A extends B { static { super(); } }
// class A { static { await; } }
// function f() { class A { static { return; } } }
fn static_block(p: &mut Parser, m: Marker, ctx: Context) -> ParseResult<ClassMember> {
    let block_ctx = ctx
        .without(
            Context::FUNCTION_RESET | Context::IN_FUNCTION | Context::OPTIONS_GLOBAL_RETURN,
        )
        .with(
            Context::SUPER_PROPERTY
                | Context::NEW_TARGET
                | Context::ALLOW_IN
                | Context::IN_CLASS_FIELD
                | Context::AWAIT_RESERVED,
        );
    p.expect(T!['{'], block_ctx)?;

    let mut guard = p.with_state(ParserState::function_state());
    let p = &mut *guard;
    p.scopes.enter(ScopeFlags::FUNCTION);
    let mut body = vec![];
    statement_list(p, block_ctx, T!['}'], &mut body)?;
    p.scopes.exit();
    p.expect(T!['}'], ctx)?;

    Ok(ClassMember::StaticBlock(StaticBlock {
        span: m.finish(p),
        body,
    }))
}
