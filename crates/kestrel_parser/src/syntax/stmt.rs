//! Statements, these include `if`, `while`, `for`, `;`, and more.
//!
//! See the [ECMAScript spec](https://tc39.es/ecma262/#sec-ecmascript-language-statements-and-declarations).

use super::decl::{class_decl, function_decl};
use super::expr::{assign_expr, assign_expr_cover, expr, identifier_reference, sequence_rest};
use super::pat::{binding_pattern, expr_to_pattern, PatternTarget};
use super::program::{export_decl, import_decl};
use super::util::{declare_name, declare_pattern};
use crate::ast::*;
use crate::scope::{BindingKind, ScopeFlags};
use crate::state::{Label, LabelKind};
use crate::*;

/// Where a statement appears, decides which declarations it may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtPlace {
    /// An item of a statement list, any declaration is allowed.
    List,
    /// The body of a loop or `with`.
    Single,
    /// The consequent or alternate of an `if`.
    If,
    /// The body of a labelled statement.
    Label,
}

/// Parse statements until `end`, which is not consumed.
pub fn statement_list(
    p: &mut Parser,
    ctx: Context,
    end: TokenKind,
    body: &mut Vec<Statement>,
) -> ParseResult<()> {
    while !p.at(end) {
        if p.at(T![EOF]) {
            return Err(p.unexpected());
        }
        body.push(statement(p, ctx, StmtPlace::List)?);
    }
    Ok(())
}

/// A single statement or declaration.
pub fn statement(p: &mut Parser, ctx: Context, place: StmtPlace) -> ParseResult<Statement> {
    let ctx = ctx.with(Context::ALLOW_IN);

    if p.at(T![ident]) {
        if p.at_contextual("let") && starts_let_decl(p, ctx, place)? {
            lexical_placement(p, place)?;
            return var_stmt(p, ctx);
        }
        if p.at_contextual("async") {
            let next = p.lookahead(ctx)?;
            if next.kind == T![function] && !next.had_linebreak {
                return function_stmt(p, ctx, place, true);
            }
        }
        return expr_or_labeled_stmt(p, ctx, place);
    }

    match p.cur() {
        T![;] => {
            let span = p.cur_span();
            p.bump(ctx)?;
            Ok(Statement::Empty(span))
        }
        T!['{'] => block_stmt(p, ctx).map(Statement::Block),
        T![var] => var_stmt(p, ctx),
        T![const] => {
            lexical_placement(p, place)?;
            var_stmt(p, ctx)
        }
        T![if] => if_stmt(p, ctx),
        T![for] => for_stmt(p, ctx),
        T![while] => while_stmt(p, ctx),
        T![do] => do_stmt(p, ctx),
        T![break] | T![continue] => jump_stmt(p, ctx),
        T![return] => return_stmt(p, ctx),
        T![with] => with_stmt(p, ctx),
        T![switch] => switch_stmt(p, ctx),
        T![throw] => throw_stmt(p, ctx),
        T![try] => try_stmt(p, ctx),
        T![debugger] => {
            let m = p.start();
            p.bump(ctx)?;
            p.semicolon(ctx)?;
            Ok(Statement::Debugger(m.finish(p)))
        }
        T![function] => function_stmt(p, ctx, place, false),
        T![class] => {
            lexical_placement(p, place)?;
            let class = class_decl(p, ctx, false)?;
            Ok(Statement::ClassDeclaration(Box::new(class)))
        }
        T![import] => {
            let next = p.lookahead(ctx)?.kind;
            if matches!(next, T!['('] | T![.]) {
                return expr_or_labeled_stmt(p, ctx, place);
            }
            module_item_placement(p, ctx, place)?;
            import_decl(p, ctx)
        }
        T![export] => {
            module_item_placement(p, ctx, place)?;
            export_decl(p, ctx)
        }
        _ => expr_or_labeled_stmt(p, ctx, place),
    }
}

fn lexical_placement(p: &mut Parser, place: StmtPlace) -> ParseResult<()> {
    if place != StmtPlace::List {
        return Err(p.err(ErrorKind::LexicalDeclarationPlacement, p.cur_span()));
    }
    Ok(())
}

fn module_item_placement(p: &mut Parser, ctx: Context, place: StmtPlace) -> ParseResult<()> {
    if !ctx.is_module() || place != StmtPlace::List || !p.scopes.at_top() {
        return Err(p.err(ErrorKind::ImportExportOutsideModule, p.cur_span()));
    }
    Ok(())
}

/// Whether a `let` starts a lexical declaration instead of being an identifier.
///
/// `let [` always does, outside of statement lists nothing else does.
fn starts_let_decl(p: &mut Parser, ctx: Context, place: StmtPlace) -> ParseResult<bool> {
    let next = p.lookahead(ctx)?.kind;
    Ok(match next {
        T!['['] => true,
        _ if place != StmtPlace::List => false,
        T!['{'] => true,
        _ => next.is_identifier_name() && !matches!(next, T![in] | T![instanceof]),
    })
}

// test function_placement
// if (a) function foo() {}
// foo: function bar() {}
// test_err strict_function_in_if
// "use strict"; if (a) function foo() {}
fn function_stmt(
    p: &mut Parser,
    ctx: Context,
    place: StmtPlace,
    is_async: bool,
) -> ParseResult<Statement> {
    if place != StmtPlace::List {
        // sloppy web code may put plain functions under `if` and labels
        let legacy = matches!(place, StmtPlace::If | StmtPlace::Label)
            && ctx.is_web_compat_sloppy()
            && !is_async
            && p.lookahead(ctx)?.kind != T![*];
        if !legacy {
            let kind = if ctx.is_strict() {
                ErrorKind::StrictFunctionDeclaration
            } else {
                ErrorKind::FunctionDeclarationPlacement
            };
            return Err(p.err(kind, p.cur_span()));
        }
    }

    let m = p.start();
    if is_async {
        p.bump(ctx)?;
    }
    let func = function_decl(p, m, ctx, is_async, false)?;
    Ok(Statement::FunctionDeclaration(Box::new(func)))
}

/// An expression statement or a labelled statement.
pub fn expr_or_labeled_stmt(
    p: &mut Parser,
    ctx: Context,
    place: StmtPlace,
) -> ParseResult<Statement> {
    let m = p.start();
    let starts_with_ident = p.at(T![ident]);
    let expression = expr(p, ctx)?;

    if starts_with_ident && p.at(T![:]) {
        if let Expression::Identifier(label) = expression {
            return labeled_stmt(p, m, label, ctx, place);
        }
    }

    p.semicolon(ctx)?;
    Ok(Statement::Expression(ExpressionStatement {
        span: m.finish(p),
        expression,
        directive: None,
    }))
}

// test labeled_stmt
// foo: while (true) { continue foo; }
// a: b: for (;;) { break a; }
// test_err duplicate_label
// foo: { foo: ; }
fn labeled_stmt(
    p: &mut Parser,
    m: Marker,
    label: Identifier,
    ctx: Context,
    place: StmtPlace,
) -> ParseResult<Statement> {
    p.bump(ctx)?;
    if p.state.find_label(&label.name).is_some() {
        return Err(p.err(ErrorKind::DuplicateLabel(label.name.to_string()), label.span));
    }

    let kind = if matches!(p.cur(), T![for] | T![while] | T![do]) {
        LabelKind::Loop
    } else {
        LabelKind::Other
    };
    let body_start = p.cur_tok().start;
    // labels directly in front of this one label the same statement
    for outer in p.state.labels.iter_mut().rev() {
        if outer.stmt_start != m.start {
            break;
        }
        outer.stmt_start = body_start;
        outer.kind = kind;
    }
    p.state.labels.push(Label {
        name: label.name.clone(),
        kind,
        stmt_start: body_start,
    });

    let body_place = match place {
        StmtPlace::List | StmtPlace::Label => StmtPlace::Label,
        StmtPlace::If | StmtPlace::Single => StmtPlace::Single,
    };
    let body = statement(p, ctx, body_place)?;
    p.state.labels.pop();

    Ok(Statement::Labeled(LabeledStatement {
        span: m.finish(p),
        label,
        body: Box::new(body),
    }))
}

/// A block statement with its own lexical scope.
pub fn block_stmt(p: &mut Parser, ctx: Context) -> ParseResult<BlockStatement> {
    p.scopes.enter(ScopeFlags::empty());
    let block = block_body(p, ctx)?;
    p.scopes.exit();
    Ok(block)
}

fn block_body(p: &mut Parser, ctx: Context) -> ParseResult<BlockStatement> {
    let m = p.start();
    p.expect(T!['{'], ctx)?;
    let mut body = vec![];
    statement_list(p, ctx, T!['}'], &mut body)?;
    p.expect(T!['}'], ctx)?;
    Ok(BlockStatement {
        span: m.finish(p),
        body,
    })
}

/// A variable statement such as `var a = 5;` or `let [b] = c;`
pub fn var_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    let mut decl = var_decl(p, ctx, false)?;
    p.semicolon(ctx)?;
    decl.span = m.finish(p);
    Ok(Statement::VariableDeclaration(decl))
}

/// The declarations of a `var`, `let`, or `const`, without the terminating semicolon.
///
/// In a `for` head a declarator followed by `in` or `of` does not need an initializer.
// test var_decl
// var a = 1, b;
// let [c, d] = e;
// const { f } = g;
// test_err const_without_init
// const a;
pub fn var_decl(p: &mut Parser, ctx: Context, for_head: bool) -> ParseResult<VariableDeclaration> {
    let m = p.start();
    let kind = match p.cur() {
        T![var] => VariableKind::Var,
        T![const] => VariableKind::Const,
        _ => VariableKind::Let,
    };
    p.bump(ctx)?;
    let binding = if kind == VariableKind::Var {
        BindingKind::Var
    } else {
        BindingKind::Lexical
    };

    let mut declarations = vec![];
    loop {
        let decl_m = p.start();
        let id = binding_pattern(p, ctx)?;
        declare_pattern(p, &id, binding)?;

        let init = if p.eat(T![=], ctx)? {
            Some(assign_expr(p, ctx)?)
        } else {
            let for_in_of = for_head && (p.at(T![in]) || p.at_contextual("of"));
            if !for_in_of {
                if kind == VariableKind::Const {
                    return Err(p.err(ErrorKind::ConstWithoutInitializer, id.span()));
                }
                if !id.is_simple() {
                    return Err(p.err(ErrorKind::DestructuringWithoutInitializer, id.span()));
                }
            }
            None
        };

        declarations.push(VariableDeclarator {
            span: decl_m.finish(p),
            id,
            init,
        });
        if !p.eat(T![,], ctx)? {
            break;
        }
    }

    Ok(VariableDeclaration {
        span: m.finish(p),
        kind,
        declarations,
    })
}

/// `(` expression `)` as used by `if`, `while`, `with`, and `switch`.
fn paren_test(p: &mut Parser, ctx: Context) -> ParseResult<Expression> {
    p.expect(T!['('], ctx)?;
    let test = expr(p, ctx)?;
    p.expect(T![')'], ctx)?;
    Ok(test)
}

// test if_stmt
// if (a) b; else if (c) d; else { e }
fn if_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    p.expect(T![if], ctx)?;
    let test = paren_test(p, ctx)?;
    let consequent = statement(p, ctx, StmtPlace::If)?;
    let alternate = if p.eat(T![else], ctx)? {
        Some(Box::new(statement(p, ctx, StmtPlace::If)?))
    } else {
        None
    };

    Ok(Statement::If(IfStatement {
        span: m.finish(p),
        test,
        consequent: Box::new(consequent),
        alternate,
    }))
}

fn while_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    p.expect(T![while], ctx)?;
    let test = paren_test(p, ctx)?;
    let body = statement(p, ctx.with(Context::IN_ITERATION), StmtPlace::Single)?;
    Ok(Statement::While(WhileStatement {
        span: m.finish(p),
        test,
        body: Box::new(body),
    }))
}

// test do_while_stmt
// do a; while (b) c
fn do_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    p.expect(T![do], ctx)?;
    let body = statement(p, ctx.with(Context::IN_ITERATION), StmtPlace::Single)?;
    p.expect(T![while], ctx)?;
    let test = paren_test(p, ctx)?;
    // the semicolon after a do-while is always optional
    p.eat(T![;], ctx)?;
    Ok(Statement::DoWhile(DoWhileStatement {
        span: m.finish(p),
        body: Box::new(body),
        test,
    }))
}

// test for_stmt
// for (let i = 0; i < 5; i++) {}
// for (;;) break;
// for (a in b) {}
// for (const [c, d] of e) {}
// for ([f, g] of h) {}
// test_err for_of_let_init
// for (let a = 1 of b) {}
fn for_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    p.expect(T![for], ctx)?;

    let is_await = p.at_contextual("await");
    if is_await {
        if !ctx.contains(Context::IN_ASYNC) {
            return Err(p.unexpected());
        }
        p.bump(ctx)?;
    }
    p.expect(T!['('], ctx)?;

    let lexical = p.at(T![const]) || (p.at_contextual("let") && starts_let_decl(p, ctx, StmtPlace::List)?);
    if lexical {
        p.scopes.enter(ScopeFlags::empty());
    }
    let stmt = for_rest(p, m, ctx, is_await, lexical)?;
    if lexical {
        p.scopes.exit();
    }
    Ok(stmt)
}

fn for_rest(
    p: &mut Parser,
    m: Marker,
    ctx: Context,
    is_await: bool,
    lexical: bool,
) -> ParseResult<Statement> {
    let head_ctx = ctx.without(Context::ALLOW_IN);

    let init = if p.at(T![;]) {
        None
    } else if p.at(T![var]) || lexical {
        let decl = var_decl(p, head_ctx, true)?;
        if p.at(T![in]) || p.at_contextual("of") {
            let is_of = !p.at(T![in]);
            check_for_in_of_decl(p, &decl, is_of, ctx)?;
            if is_of && decl.kind == VariableKind::Var {
                check_for_of_var(p, &decl)?;
            }
            return for_in_of(p, m, ForHead::Variable(decl), is_of, is_await, ctx);
        }
        Some(ForInit::Variable(decl))
    } else {
        let start = p.start();
        let start_span = p.cur_span();
        let starts_with_let = p.at_contextual("let");
        let outer = p.state.cover.take();
        let expression = assign_expr_cover(p, head_ctx)?;

        if p.at(T![in]) || p.at_contextual("of") {
            let is_of = !p.at(T![in]);
            if is_of && starts_with_let {
                return Err(p.err(ErrorKind::UnexpectedToken("let".to_string()), start_span));
            }
            if is_of && !is_await {
                if let Expression::Identifier(ident) = &expression {
                    if ident.name == "async" && ident.span.content(p.source()) == "async" {
                        return Err(p.err(ErrorKind::ForOfAsync, ident.span));
                    }
                }
            }
            p.state.cover = None;
            let pattern = expr_to_pattern(p, expression, PatternTarget::Assignment, ctx)?;
            p.state.cover = outer;
            return for_in_of(p, m, ForHead::Pattern(pattern), is_of, is_await, ctx);
        }

        if let Some((kind, span)) = p.state.cover.take() {
            return Err(p.err(kind, span));
        }
        p.state.cover = outer;
        Some(ForInit::Expression(sequence_rest(p, start, expression, head_ctx)?))
    };

    if is_await {
        return Err(p.unexpected());
    }
    p.expect(T![;], ctx)?;
    let test = if p.at(T![;]) { None } else { Some(expr(p, ctx)?) };
    p.expect(T![;], ctx)?;
    let update = if p.at(T![')']) { None } else { Some(expr(p, ctx)?) };
    p.expect(T![')'], ctx)?;
    let body = statement(p, ctx.with(Context::IN_ITERATION), StmtPlace::Single)?;

    Ok(Statement::For(ForStatement {
        span: m.finish(p),
        init,
        test,
        update,
        body: Box::new(body),
    }))
}

fn check_for_in_of_decl(
    p: &mut Parser,
    decl: &VariableDeclaration,
    is_of: bool,
    ctx: Context,
) -> ParseResult<()> {
    if decl.declarations.len() != 1 {
        return Err(p.err(ErrorKind::ForInOfMultipleBindings, decl.span));
    }
    let declarator = &decl.declarations[0];
    if declarator.init.is_some() {
        // `for (var a = b in c)` survives in sloppy web code
        let legacy = !is_of
            && decl.kind == VariableKind::Var
            && declarator.id.is_simple()
            && ctx.is_web_compat_sloppy();
        if !legacy {
            return Err(p.err(ErrorKind::ForInOfInitializer, declarator.span));
        }
    }
    Ok(())
}

// test_err for_of_var_redeclares_catch_param
// try {} catch (e) { for (var e of a); }
// Annex B only lets `for-in` and plain `var` statements redeclare a catch parameter
fn check_for_of_var(p: &mut Parser, decl: &VariableDeclaration) -> ParseResult<()> {
    let mut names = vec![];
    for declarator in &decl.declarations {
        declarator.id.bound_names(&mut names);
    }
    for ident in names {
        if p.scopes.hoists_through_catch_param(&ident.name) {
            return Err(p.err(
                ErrorKind::DuplicateBinding(ident.name.to_string()),
                ident.span,
            ));
        }
    }
    Ok(())
}

fn for_in_of(
    p: &mut Parser,
    m: Marker,
    left: ForHead,
    is_of: bool,
    is_await: bool,
    ctx: Context,
) -> ParseResult<Statement> {
    if is_await && !is_of {
        return Err(p.unexpected());
    }
    p.bump(ctx)?;
    let right = if is_of {
        assign_expr(p, ctx)?
    } else {
        expr(p, ctx)?
    };
    p.expect(T![')'], ctx)?;
    let body = Box::new(statement(p, ctx.with(Context::IN_ITERATION), StmtPlace::Single)?);
    let span = m.finish(p);

    Ok(if is_of {
        Statement::ForOf(ForOfStatement {
            span,
            is_await,
            left,
            right,
            body,
        })
    } else {
        Statement::ForIn(ForInStatement {
            span,
            left,
            right,
            body,
        })
    })
}

// test jump_stmts
// while (a) { break; continue; }
// switch (b) { case 1: break; }
// test_err illegal_break
// break;
fn jump_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    let keyword = p.cur_span();
    let is_break = p.at(T![break]);
    p.bump(ctx)?;

    let label = if p.at(T![ident]) && !p.has_linebreak_before() {
        let label = identifier_reference(p, ctx)?;
        match p.state.find_label(&label.name).map(|l| l.kind) {
            None => {
                return Err(p.err(ErrorKind::UnknownLabel(label.name.to_string()), label.span))
            }
            Some(LabelKind::Other) if !is_break => {
                return Err(p.err(
                    ErrorKind::InvalidContinueLabel(label.name.to_string()),
                    label.span,
                ))
            }
            Some(_) => {}
        }
        Some(label)
    } else {
        if is_break && !ctx.intersects(Context::IN_ITERATION | Context::IN_SWITCH) {
            return Err(p.err(ErrorKind::IllegalBreak, keyword));
        }
        if !is_break && !ctx.contains(Context::IN_ITERATION) {
            return Err(p.err(ErrorKind::IllegalContinue, keyword));
        }
        None
    };
    p.semicolon(ctx)?;

    let stmt = JumpStatement {
        span: m.finish(p),
        label,
    };
    Ok(if is_break {
        Statement::Break(stmt)
    } else {
        Statement::Continue(stmt)
    })
}

fn return_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    if !ctx.intersects(Context::IN_FUNCTION | Context::OPTIONS_GLOBAL_RETURN) {
        return Err(p.err(ErrorKind::IllegalReturn, p.cur_span()));
    }
    p.bump(ctx)?;
    let argument = if p.at(T![;]) || p.can_insert_semicolon() {
        None
    } else {
        Some(expr(p, ctx)?)
    };
    p.semicolon(ctx)?;
    Ok(Statement::Return(ReturnStatement {
        span: m.finish(p),
        argument,
    }))
}

// test_err strict_with
// "use strict"; with (a) {}
fn with_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    if ctx.is_strict() {
        return Err(p.err(ErrorKind::StrictWith, p.cur_span()));
    }
    p.bump(ctx)?;
    let object = paren_test(p, ctx)?;
    let body = statement(p, ctx, StmtPlace::Single)?;
    Ok(Statement::With(WithStatement {
        span: m.finish(p),
        object,
        body: Box::new(body),
    }))
}

// test switch_stmt
// switch (a) { case 1: let b; break; default: c(); case 2: }
// test_err multiple_defaults
// switch (a) { default: default: }
fn switch_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    p.expect(T![switch], ctx)?;
    let discriminant = paren_test(p, ctx)?;
    p.expect(T!['{'], ctx)?;
    p.scopes.enter(ScopeFlags::empty());

    let case_ctx = ctx.with(Context::IN_SWITCH);
    let mut cases = vec![];
    let mut seen_default = false;
    while !p.at(T!['}']) {
        let case_m = p.start();
        let test = if p.eat(T![case], ctx)? {
            Some(expr(p, ctx)?)
        } else {
            if p.at(T![default]) && seen_default {
                return Err(p.err(ErrorKind::MultipleDefaults, p.cur_span()));
            }
            p.expect(T![default], ctx)?;
            seen_default = true;
            None
        };
        p.expect(T![:], ctx)?;

        let mut consequent = vec![];
        while !matches!(p.cur(), T![case] | T![default] | T!['}']) {
            if p.at(T![EOF]) {
                return Err(p.unexpected());
            }
            consequent.push(statement(p, case_ctx, StmtPlace::List)?);
        }
        cases.push(SwitchCase {
            span: case_m.finish(p),
            test,
            consequent,
        });
    }

    p.scopes.exit();
    p.expect(T!['}'], ctx)?;
    Ok(Statement::Switch(SwitchStatement {
        span: m.finish(p),
        discriminant,
        cases,
    }))
}

// test_err newline_after_throw
// throw
// a;
fn throw_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    p.expect(T![throw], ctx)?;
    if p.has_linebreak_before() {
        return Err(p.err(ErrorKind::NewlineAfterThrow, p.cur_span()));
    }
    let argument = expr(p, ctx)?;
    p.semicolon(ctx)?;
    Ok(Statement::Throw(ThrowStatement {
        span: m.finish(p),
        argument,
    }))
}

// test try_stmt
// try {} catch (e) { var e; } finally {}
// try {} catch {}
// try {} catch ({ a, b }) {}
// test_err try_without_handler
// try {}
fn try_stmt(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    p.expect(T![try], ctx)?;
    let block = block_stmt(p, ctx)?;

    let handler = if p.at(T![catch]) {
        Some(catch_clause(p, ctx)?)
    } else {
        None
    };
    let finalizer = if p.eat(T![finally], ctx)? {
        Some(block_stmt(p, ctx)?)
    } else {
        None
    };
    if handler.is_none() && finalizer.is_none() {
        return Err(p.err(ErrorKind::MissingCatchOrFinally, p.cur_span()));
    }

    Ok(Statement::Try(TryStatement {
        span: m.finish(p),
        block,
        handler,
        finalizer,
    }))
}

fn catch_clause(p: &mut Parser, ctx: Context) -> ParseResult<CatchClause> {
    let m = p.start();
    p.expect(T![catch], ctx)?;

    // the parameter and the block share one scope
    let param = if p.eat(T!['('], ctx)? {
        let param = binding_pattern(p, ctx)?;
        match &param {
            Pattern::Identifier(ident) => {
                p.scopes.enter(ScopeFlags::SIMPLE_CATCH);
                declare_name(p, ident, BindingKind::SimpleCatch)?;
            }
            _ => {
                p.scopes.enter(ScopeFlags::empty());
                declare_pattern(p, &param, BindingKind::Lexical)?;
            }
        }
        p.expect(T![')'], ctx)?;
        Some(param)
    } else {
        p.scopes.enter(ScopeFlags::empty());
        None
    };
    let body = block_body(p, ctx)?;
    p.scopes.exit();

    Ok(CatchClause {
        span: m.finish(p),
        param,
        body,
    })
}
