//! Top level functions for parsing a script or module, also includes module specific items.

use super::decl::{class_decl, function_decl, FunctionInfo};
use super::expr::{assign_expr, identifier_name, literal};
use super::pat::binding_identifier;
use super::stmt::{statement, statement_list, StmtPlace};
use super::util::{check_binding, declare_name};
use crate::ast::*;
use crate::scope::{BindingKind, ScopeFlags};
use crate::*;
use kestrel_syntax::{is_reserved_word, is_strict_reserved};
use log::trace;

/// Parse an ECMAScript script or module, `ctx` decides the goal.
// test program
// "use strict";
// let a = 5;
// export { a };
pub fn program(p: &mut Parser, ctx: Context) -> ParseResult<Program> {
    // lex the first token
    p.bump(ctx)?;

    let module = ctx.is_module();
    p.scopes.enter(if module {
        ScopeFlags::TOP | ScopeFlags::MODULE
    } else {
        ScopeFlags::TOP
    });

    let (mut body, ctx) = directives(p, ctx, None)?;
    statement_list(p, ctx, T![EOF], &mut body)?;
    check_undefined_exports(p)?;
    p.scopes.exit();

    Ok(Program {
        span: Span::new(0, p.source().len()),
        source_type: if module {
            SourceType::Module
        } else {
            SourceType::Script
        },
        body,
    })
}

/// The directive prologue of a program or function body.
///
/// Returns the directives, the first statement after them if there is one, and the
/// context of the rest of the body, which is strict if one of the directives was
/// `"use strict"`.
// test directives
// "use strict"; 'use asm';
// function foo() { "use strict"; }
// "not a directive" + 5;
pub fn directives(
    p: &mut Parser,
    mut ctx: Context,
    func: Option<&FunctionInfo>,
) -> ParseResult<(Vec<Statement>, Context)> {
    let mut body = vec![];

    while p.at(TokenKind::STRING) {
        let tok_span = p.cur_span();
        let raw = p.cur_src();
        let mut stmt = statement(p, ctx, StmtPlace::List)?;
        let is_directive = match &stmt {
            Statement::Expression(stmt) => {
                matches!(&stmt.expression, Expression::Literal(lit) if lit.span == tok_span)
            }
            _ => false,
        };
        if !is_directive {
            body.push(stmt);
            break;
        }

        // the raw text without quotes, `"use\x20strict"` is not a strict directive
        let text = &raw[1..raw.len() - 1];
        if text == "use strict" {
            if let Some(func) = func {
                if !func.is_simple() {
                    return Err(p.err(ErrorKind::IllegalUseStrict, tok_span));
                }
            }
            if !ctx.is_strict() {
                trace!("directive at {} makes the scope strict", tok_span.start);
                ctx = ctx.with(Context::STRICT);
                if let Some(err) = p.take_legacy_octal() {
                    return Err(err);
                }
                if let Some(func) = func {
                    func.check_strict(p)?;
                }
            }
        }

        if let Statement::Expression(stmt) = &mut stmt {
            stmt.directive = Some(text.to_string());
        }
        body.push(stmt);
    }

    Ok((body, ctx))
}

fn check_undefined_exports(p: &mut Parser) -> ParseResult<()> {
    let locals = std::mem::take(&mut p.exports.locals);
    for (name, span) in locals {
        let declared = p.scopes.top().map_or(false, |scope| scope.declares(&name));
        if !declared {
            return Err(p.err(ErrorKind::UndefinedExport(name.to_string()), span));
        }
    }
    Ok(())
}

fn module_source(p: &mut Parser, ctx: Context) -> ParseResult<Literal> {
    match p.cur() {
        TokenKind::STRING => literal(p, ctx),
        T![EOF] => Err(p.unexpected()),
        _ => Err(p.err(
            ErrorKind::Expected("string", p.cur_src().to_string()),
            p.cur_span(),
        )),
    }
}

/// An identifier name or a string, `import { "a-b" as c } from "d"`
pub fn module_export_name(p: &mut Parser, ctx: Context) -> ParseResult<ModuleExportName> {
    if p.at(TokenKind::STRING) {
        Ok(ModuleExportName::String(literal(p, ctx)?))
    } else {
        Ok(ModuleExportName::Identifier(identifier_name(p, ctx)?))
    }
}

/// A module import declaration such as `import * as a from "a"`
// test import_decls
// import "a";
// import a from "b";
// import * as c from "d";
// import e, { f, g as h, "i" as j } from "k";
// import l, * as m from "n";
pub fn import_decl(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    p.expect(T![import], ctx)?;
    let mut specifiers = vec![];

    if !p.at(TokenKind::STRING) {
        let mut needs_more = true;
        if p.at(T![ident]) {
            let local = import_binding(p, ctx)?;
            specifiers.push(ImportSpecifier::Default {
                span: local.span,
                local,
            });
            needs_more = p.eat(T![,], ctx)?;
        }

        if needs_more {
            match p.cur() {
                T![*] => {
                    let spec_m = p.start();
                    p.bump(ctx)?;
                    p.expect_contextual("as", ctx)?;
                    let local = import_binding(p, ctx)?;
                    specifiers.push(ImportSpecifier::Namespace {
                        span: spec_m.finish(p),
                        local,
                    });
                }
                T!['{'] => named_imports(p, ctx, &mut specifiers)?,
                _ => return Err(p.unexpected()),
            }
        }
        p.expect_contextual("from", ctx)?;
    }

    let source = module_source(p, ctx)?;
    p.semicolon(ctx)?;
    Ok(Statement::ImportDeclaration(ImportDeclaration {
        span: m.finish(p),
        specifiers,
        source,
    }))
}

fn import_binding(p: &mut Parser, ctx: Context) -> ParseResult<Identifier> {
    let local = binding_identifier(p, ctx)?;
    declare_name(p, &local, BindingKind::Lexical)?;
    Ok(local)
}

fn named_imports(
    p: &mut Parser,
    ctx: Context,
    specifiers: &mut Vec<ImportSpecifier>,
) -> ParseResult<()> {
    p.expect(T!['{'], ctx)?;
    while !p.at(T!['}']) {
        let m = p.start();
        let name_kind = p.cur();
        let name_src = p.cur_src();
        let imported = module_export_name(p, ctx)?;

        let local = if p.at_contextual("as") {
            p.bump(ctx)?;
            binding_identifier(p, ctx)?
        } else {
            match &imported {
                ModuleExportName::Identifier(ident) if name_kind == T![ident] => {
                    check_binding(p, ident, ctx)?;
                    ident.clone()
                }
                ModuleExportName::Identifier(ident) => {
                    return Err(p.err(ErrorKind::ReservedWord(name_src.to_string()), ident.span))
                }
                ModuleExportName::String(_) => {
                    return Err(p.err(
                        ErrorKind::Expected("as", p.cur_src().to_string()),
                        p.cur_span(),
                    ))
                }
            }
        };
        declare_name(p, &local, BindingKind::Lexical)?;
        specifiers.push(ImportSpecifier::Named {
            span: m.finish(p),
            imported,
            local,
        });

        if !p.at(T!['}']) {
            p.expect(T![,], ctx)?;
        }
    }
    p.expect(T!['}'], ctx)
}

fn add_export(p: &mut Parser, name: &str, span: Span) -> ParseResult<()> {
    if !p.exports.insert(name) {
        return Err(p.err(ErrorKind::DuplicateExport(name.to_string()), span));
    }
    Ok(())
}

/// An export declaration such as `export { a as b }` or `export default c`
// test export_decls
// export * from "a";
// export * as b from "c";
// export { d, e as f, g as "h" };
// export { i as j } from "k";
// export default function () {}
// export const l = 1, { m } = n;
// export class o {}
pub fn export_decl(p: &mut Parser, ctx: Context) -> ParseResult<Statement> {
    let m = p.start();
    p.expect(T![export], ctx)?;

    match p.cur() {
        T![*] => {
            p.bump(ctx)?;
            let exported = if p.at_contextual("as") {
                p.bump(ctx)?;
                let name = module_export_name(p, ctx)?;
                add_export(p, name.name(), name.span())?;
                Some(name)
            } else {
                None
            };
            p.expect_contextual("from", ctx)?;
            let source = module_source(p, ctx)?;
            p.semicolon(ctx)?;
            Ok(Statement::ExportAllDeclaration(ExportAllDeclaration {
                span: m.finish(p),
                exported,
                source,
            }))
        }
        T![default] => {
            add_export(p, "default", p.cur_span())?;
            p.bump(ctx)?;
            let declaration = export_default(p, ctx)?;
            Ok(Statement::ExportDefaultDeclaration(ExportDefaultDeclaration {
                span: m.finish(p),
                declaration,
            }))
        }
        T!['{'] => export_named(p, m, ctx),
        _ => {
            let is_decl = match p.cur() {
                T![var] | T![const] | T![function] | T![class] => true,
                _ if p.at_contextual("let") => true,
                _ if p.at_contextual("async") => {
                    let next = p.lookahead(ctx)?;
                    next.kind == T![function] && !next.had_linebreak
                }
                _ => false,
            };
            if !is_decl {
                return Err(p.unexpected());
            }

            let decl = statement(p, ctx, StmtPlace::List)?;
            let mut names = vec![];
            match &decl {
                Statement::VariableDeclaration(var) => {
                    for declarator in &var.declarations {
                        declarator.id.bound_names(&mut names);
                    }
                }
                Statement::FunctionDeclaration(func) => names.extend(func.id.as_ref()),
                Statement::ClassDeclaration(class) => names.extend(class.id.as_ref()),
                other => {
                    return Err(p.err(
                        ErrorKind::UnexpectedToken(other.span().content(p.source()).to_string()),
                        other.span(),
                    ))
                }
            }
            for ident in names {
                add_export(p, &ident.name, ident.span)?;
            }

            Ok(Statement::ExportNamedDeclaration(ExportNamedDeclaration {
                span: m.finish(p),
                declaration: Some(Box::new(decl)),
                specifiers: vec![],
                source: None,
            }))
        }
    }
}

fn export_default(p: &mut Parser, ctx: Context) -> ParseResult<ExportDefaultKind> {
    if p.at(T![function]) {
        let m = p.start();
        let func = function_decl(p, m, ctx, false, true)?;
        return Ok(ExportDefaultKind::Function(Box::new(func)));
    }
    if p.at_contextual("async") {
        let next = p.lookahead(ctx)?;
        if next.kind == T![function] && !next.had_linebreak {
            let m = p.start();
            p.bump(ctx)?;
            let func = function_decl(p, m, ctx, true, true)?;
            return Ok(ExportDefaultKind::Function(Box::new(func)));
        }
    }
    if p.at(T![class]) {
        let class = class_decl(p, ctx, true)?;
        return Ok(ExportDefaultKind::Class(Box::new(class)));
    }

    let expr = assign_expr(p, ctx.with(Context::ALLOW_IN))?;
    p.semicolon(ctx)?;
    Ok(ExportDefaultKind::Expression(expr))
}

fn export_named(p: &mut Parser, m: Marker, ctx: Context) -> ParseResult<Statement> {
    p.expect(T!['{'], ctx)?;
    let mut specifiers = vec![];
    while !p.at(T!['}']) {
        let spec_m = p.start();
        let local = module_export_name(p, ctx)?;
        let exported = if p.at_contextual("as") {
            p.bump(ctx)?;
            module_export_name(p, ctx)?
        } else {
            local.clone()
        };
        add_export(p, exported.name(), exported.span())?;
        specifiers.push(ExportSpecifier {
            span: spec_m.finish(p),
            local,
            exported,
        });
        if !p.at(T!['}']) {
            p.expect(T![,], ctx)?;
        }
    }
    p.expect(T!['}'], ctx)?;

    let source = if p.at_contextual("from") {
        p.bump(ctx)?;
        Some(module_source(p, ctx)?)
    } else {
        None
    };

    // without a source the local names refer to top level bindings of this module
    if source.is_none() {
        for spec in &specifiers {
            match &spec.local {
                ModuleExportName::Identifier(ident) => {
                    if is_reserved_word(&ident.name) || is_strict_reserved(&ident.name) {
                        return Err(p.err(
                            ErrorKind::ReservedWord(ident.name.to_string()),
                            ident.span,
                        ));
                    }
                    p.exports.locals.push((ident.name.clone(), ident.span));
                }
                ModuleExportName::String(lit) => {
                    return Err(p.err(
                        ErrorKind::UnexpectedToken(lit.span.content(p.source()).to_string()),
                        lit.span,
                    ))
                }
            }
        }
    }
    p.semicolon(ctx)?;

    Ok(Statement::ExportNamedDeclaration(ExportNamedDeclaration {
        span: m.finish(p),
        declaration: None,
        specifiers,
        source,
    }))
}
