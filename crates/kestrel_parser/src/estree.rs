//! Conversion of the typed tree to ESTree shaped JSON.
//!
//! Every node becomes an object with a `type` discriminator. Positions are byte offsets
//! and only emitted when [`Options::RANGES`] is set, `loc` only with [`Options::LOC`],
//! and the raw text of literals only with [`Options::RAW`].

use crate::ast::*;
use kestrel_errors::LineIndex;
use kestrel_syntax::{Options, Span};
use serde_json::{json, Map, Value};

/// Serialize `program` as ESTree, `source` must be the text it was parsed from.
pub fn to_estree(program: &Program, source: &str, options: Options) -> Value {
    let ser = Serializer::new(source, options);
    ser.program(program)
}

struct Serializer<'a> {
    source: &'a str,
    options: Options,
    lines: Option<LineIndex>,
}

impl<'a> Serializer<'a> {
    fn new(source: &'a str, options: Options) -> Self {
        let lines = if options.contains(Options::LOC) {
            Some(LineIndex::new(source))
        } else {
            None
        };
        Self {
            source,
            options,
            lines,
        }
    }

    fn node(&self, ty: &str, span: Span, fields: Value) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), ty.into());
        if self.options.contains(Options::RANGES) {
            map.insert("start".into(), span.start.into());
            map.insert("end".into(), span.end.into());
        }
        if let Some(lines) = &self.lines {
            let (start_line, start_col) = lines.line_col_utf16(self.source, span.start);
            let (end_line, end_col) = lines.line_col_utf16(self.source, span.end);
            map.insert(
                "loc".into(),
                json!({
                    "start": { "line": start_line, "column": start_col },
                    "end": { "line": end_line, "column": end_col },
                }),
            );
        }
        if let Value::Object(fields) = fields {
            map.extend(fields);
        }
        Value::Object(map)
    }

    fn opt<T>(&self, value: Option<&T>, f: impl Fn(&Self, &T) -> Value) -> Value {
        value.map_or(Value::Null, |value| f(self, value))
    }

    fn list<T>(&self, items: &[T], f: impl Fn(&Self, &T) -> Value) -> Value {
        Value::Array(items.iter().map(|item| f(self, item)).collect())
    }

    fn program(&self, program: &Program) -> Value {
        let source_type = match program.source_type {
            SourceType::Script => "script",
            SourceType::Module => "module",
        };
        self.node(
            "Program",
            program.span,
            json!({
                "body": self.list(&program.body, Self::stmt),
                "sourceType": source_type,
            }),
        )
    }

    fn ident(&self, ident: &Identifier) -> Value {
        self.node("Identifier", ident.span, json!({ "name": ident.name.as_str() }))
    }

    fn literal(&self, lit: &Literal) -> Value {
        let mut fields = Map::new();
        match &lit.value {
            LiteralValue::Null => {
                fields.insert("value".into(), Value::Null);
            }
            LiteralValue::Boolean(value) => {
                fields.insert("value".into(), (*value).into());
            }
            LiteralValue::Number(value) => {
                fields.insert("value".into(), number(*value));
            }
            LiteralValue::String(value) => {
                fields.insert("value".into(), value.as_str().into());
            }
            LiteralValue::BigInt(value) => {
                fields.insert("value".into(), Value::Null);
                fields.insert("bigint".into(), value.to_string().into());
            }
            LiteralValue::RegExp { pattern, flags } => {
                fields.insert("value".into(), Value::Null);
                fields.insert("regex".into(), json!({ "pattern": pattern, "flags": flags }));
            }
        }
        if self.options.contains(Options::RAW) {
            if let Some(raw) = &lit.raw {
                fields.insert("raw".into(), raw.as_str().into());
            }
        }
        self.node("Literal", lit.span, Value::Object(fields))
    }

    fn block(&self, block: &BlockStatement) -> Value {
        self.node(
            "BlockStatement",
            block.span,
            json!({ "body": self.list(&block.body, Self::stmt) }),
        )
    }

    fn stmt(&self, stmt: &Statement) -> Value {
        match stmt {
            Statement::Expression(s) => {
                let mut fields = json!({ "expression": self.expr(&s.expression) });
                if let Some(directive) = &s.directive {
                    fields["directive"] = directive.as_str().into();
                }
                self.node("ExpressionStatement", s.span, fields)
            }
            Statement::Block(s) => self.block(s),
            Statement::Empty(span) => self.node("EmptyStatement", *span, json!({})),
            Statement::Debugger(span) => self.node("DebuggerStatement", *span, json!({})),
            Statement::With(s) => self.node(
                "WithStatement",
                s.span,
                json!({ "object": self.expr(&s.object), "body": self.stmt(&s.body) }),
            ),
            Statement::Return(s) => self.node(
                "ReturnStatement",
                s.span,
                json!({ "argument": self.opt(s.argument.as_ref(), Self::expr) }),
            ),
            Statement::Labeled(s) => self.node(
                "LabeledStatement",
                s.span,
                json!({ "label": self.ident(&s.label), "body": self.stmt(&s.body) }),
            ),
            Statement::Break(s) => self.node(
                "BreakStatement",
                s.span,
                json!({ "label": self.opt(s.label.as_ref(), Self::ident) }),
            ),
            Statement::Continue(s) => self.node(
                "ContinueStatement",
                s.span,
                json!({ "label": self.opt(s.label.as_ref(), Self::ident) }),
            ),
            Statement::If(s) => self.node(
                "IfStatement",
                s.span,
                json!({
                    "test": self.expr(&s.test),
                    "consequent": self.stmt(&s.consequent),
                    "alternate": self.opt(s.alternate.as_deref(), Self::stmt),
                }),
            ),
            Statement::Switch(s) => self.node(
                "SwitchStatement",
                s.span,
                json!({
                    "discriminant": self.expr(&s.discriminant),
                    "cases": self.list(&s.cases, Self::switch_case),
                }),
            ),
            Statement::Throw(s) => self.node(
                "ThrowStatement",
                s.span,
                json!({ "argument": self.expr(&s.argument) }),
            ),
            Statement::Try(s) => self.node(
                "TryStatement",
                s.span,
                json!({
                    "block": self.block(&s.block),
                    "handler": self.opt(s.handler.as_ref(), Self::catch_clause),
                    "finalizer": self.opt(s.finalizer.as_ref(), Self::block),
                }),
            ),
            Statement::While(s) => self.node(
                "WhileStatement",
                s.span,
                json!({ "test": self.expr(&s.test), "body": self.stmt(&s.body) }),
            ),
            Statement::DoWhile(s) => self.node(
                "DoWhileStatement",
                s.span,
                json!({ "body": self.stmt(&s.body), "test": self.expr(&s.test) }),
            ),
            Statement::For(s) => {
                let init = match &s.init {
                    Some(ForInit::Variable(decl)) => self.var_decl(decl),
                    Some(ForInit::Expression(expr)) => self.expr(expr),
                    None => Value::Null,
                };
                self.node(
                    "ForStatement",
                    s.span,
                    json!({
                        "init": init,
                        "test": self.opt(s.test.as_ref(), Self::expr),
                        "update": self.opt(s.update.as_ref(), Self::expr),
                        "body": self.stmt(&s.body),
                    }),
                )
            }
            Statement::ForIn(s) => self.node(
                "ForInStatement",
                s.span,
                json!({
                    "left": self.for_head(&s.left),
                    "right": self.expr(&s.right),
                    "body": self.stmt(&s.body),
                }),
            ),
            Statement::ForOf(s) => self.node(
                "ForOfStatement",
                s.span,
                json!({
                    "await": s.is_await,
                    "left": self.for_head(&s.left),
                    "right": self.expr(&s.right),
                    "body": self.stmt(&s.body),
                }),
            ),
            Statement::FunctionDeclaration(func) => self.function("FunctionDeclaration", func),
            Statement::VariableDeclaration(decl) => self.var_decl(decl),
            Statement::ClassDeclaration(class) => self.class("ClassDeclaration", class),
            Statement::ImportDeclaration(decl) => self.node(
                "ImportDeclaration",
                decl.span,
                json!({
                    "specifiers": self.list(&decl.specifiers, Self::import_specifier),
                    "source": self.literal(&decl.source),
                }),
            ),
            Statement::ExportNamedDeclaration(decl) => self.node(
                "ExportNamedDeclaration",
                decl.span,
                json!({
                    "declaration": self.opt(decl.declaration.as_deref(), Self::stmt),
                    "specifiers": self.list(&decl.specifiers, Self::export_specifier),
                    "source": self.opt(decl.source.as_ref(), Self::literal),
                }),
            ),
            Statement::ExportDefaultDeclaration(decl) => {
                let declaration = match &decl.declaration {
                    ExportDefaultKind::Function(func) => self.function("FunctionDeclaration", func),
                    ExportDefaultKind::Class(class) => self.class("ClassDeclaration", class),
                    ExportDefaultKind::Expression(expr) => self.expr(expr),
                };
                self.node(
                    "ExportDefaultDeclaration",
                    decl.span,
                    json!({ "declaration": declaration }),
                )
            }
            Statement::ExportAllDeclaration(decl) => self.node(
                "ExportAllDeclaration",
                decl.span,
                json!({
                    "exported": self.opt(decl.exported.as_ref(), Self::module_export_name),
                    "source": self.literal(&decl.source),
                }),
            ),
        }
    }

    fn switch_case(&self, case: &SwitchCase) -> Value {
        self.node(
            "SwitchCase",
            case.span,
            json!({
                "test": self.opt(case.test.as_ref(), Self::expr),
                "consequent": self.list(&case.consequent, Self::stmt),
            }),
        )
    }

    fn catch_clause(&self, clause: &CatchClause) -> Value {
        self.node(
            "CatchClause",
            clause.span,
            json!({
                "param": self.opt(clause.param.as_ref(), Self::pattern),
                "body": self.block(&clause.body),
            }),
        )
    }

    fn for_head(&self, head: &ForHead) -> Value {
        match head {
            ForHead::Variable(decl) => self.var_decl(decl),
            ForHead::Pattern(pat) => self.pattern(pat),
        }
    }

    fn var_decl(&self, decl: &VariableDeclaration) -> Value {
        let declarations = self.list(&decl.declarations, |ser, d: &VariableDeclarator| {
            ser.node(
                "VariableDeclarator",
                d.span,
                json!({ "id": ser.pattern(&d.id), "init": ser.opt(d.init.as_ref(), Self::expr) }),
            )
        });
        self.node(
            "VariableDeclaration",
            decl.span,
            json!({ "declarations": declarations, "kind": decl.kind.as_str() }),
        )
    }

    fn function(&self, ty: &str, func: &Function) -> Value {
        self.node(
            ty,
            func.span,
            json!({
                "id": self.opt(func.id.as_ref(), Self::ident),
                "expression": false,
                "generator": func.generator,
                "async": func.is_async,
                "params": self.list(&func.params, Self::pattern),
                "body": self.function_body(&func.body),
            }),
        )
    }

    fn function_body(&self, body: &FunctionBody) -> Value {
        self.node(
            "BlockStatement",
            body.span,
            json!({ "body": self.list(&body.body, Self::stmt) }),
        )
    }

    fn class(&self, ty: &str, class: &Class) -> Value {
        self.node(
            ty,
            class.span,
            json!({
                "id": self.opt(class.id.as_ref(), Self::ident),
                "superClass": self.opt(class.super_class.as_ref(), Self::expr),
                "body": self.node(
                    "ClassBody",
                    class.body.span,
                    json!({ "body": self.list(&class.body.body, Self::class_member) }),
                ),
            }),
        )
    }

    fn class_member(&self, member: &ClassMember) -> Value {
        match member {
            ClassMember::Method(method) => self.node(
                "MethodDefinition",
                method.span,
                json!({
                    "static": method.is_static,
                    "computed": method.computed,
                    "key": self.expr(&method.key),
                    "kind": method.kind.as_str(),
                    "value": self.function("FunctionExpression", &method.value),
                }),
            ),
            ClassMember::Property(prop) => self.node(
                "PropertyDefinition",
                prop.span,
                json!({
                    "static": prop.is_static,
                    "computed": prop.computed,
                    "key": self.expr(&prop.key),
                    "value": self.opt(prop.value.as_ref(), Self::expr),
                }),
            ),
            ClassMember::StaticBlock(block) => self.node(
                "StaticBlock",
                block.span,
                json!({ "body": self.list(&block.body, Self::stmt) }),
            ),
        }
    }

    fn module_export_name(&self, name: &ModuleExportName) -> Value {
        match name {
            ModuleExportName::Identifier(ident) => self.ident(ident),
            ModuleExportName::String(lit) => self.literal(lit),
        }
    }

    fn import_specifier(&self, spec: &ImportSpecifier) -> Value {
        match spec {
            ImportSpecifier::Default { span, local } => self.node(
                "ImportDefaultSpecifier",
                *span,
                json!({ "local": self.ident(local) }),
            ),
            ImportSpecifier::Namespace { span, local } => self.node(
                "ImportNamespaceSpecifier",
                *span,
                json!({ "local": self.ident(local) }),
            ),
            ImportSpecifier::Named {
                span,
                imported,
                local,
            } => self.node(
                "ImportSpecifier",
                *span,
                json!({
                    "imported": self.module_export_name(imported),
                    "local": self.ident(local),
                }),
            ),
        }
    }

    fn export_specifier(&self, spec: &ExportSpecifier) -> Value {
        self.node(
            "ExportSpecifier",
            spec.span,
            json!({
                "local": self.module_export_name(&spec.local),
                "exported": self.module_export_name(&spec.exported),
            }),
        )
    }

    fn expr_or_spread(&self, item: &ExprOrSpread) -> Value {
        match item {
            ExprOrSpread::Expr(expr) => self.expr(expr),
            ExprOrSpread::Spread(spread) => self.spread(spread),
        }
    }

    fn spread(&self, spread: &SpreadElement) -> Value {
        self.node(
            "SpreadElement",
            spread.span,
            json!({ "argument": self.expr(&spread.argument) }),
        )
    }

    fn template(&self, template: &TemplateLiteral) -> Value {
        let quasis = self.list(&template.quasis, |ser, quasi: &TemplateElement| {
            ser.node(
                "TemplateElement",
                quasi.span,
                json!({
                    "value": { "raw": quasi.raw, "cooked": quasi.cooked },
                    "tail": quasi.tail,
                }),
            )
        });
        self.node(
            "TemplateLiteral",
            template.span,
            json!({
                "quasis": quasis,
                "expressions": self.list(&template.expressions, Self::expr),
            }),
        )
    }

    fn member(&self, member: &MemberExpression) -> Value {
        self.node(
            "MemberExpression",
            member.span,
            json!({
                "object": self.expr(&member.object),
                "property": self.expr(&member.property),
                "computed": member.computed,
                "optional": member.optional,
            }),
        )
    }

    fn expr(&self, expr: &Expression) -> Value {
        match expr {
            Expression::Identifier(ident) => self.ident(ident),
            Expression::PrivateName(ident) => self.node(
                "PrivateIdentifier",
                ident.span,
                json!({ "name": ident.name.as_str() }),
            ),
            Expression::Literal(lit) => self.literal(lit),
            Expression::This(span) => self.node("ThisExpression", *span, json!({})),
            Expression::Super(span) => self.node("Super", *span, json!({})),
            Expression::Array(e) => {
                let elements: Vec<Value> = e
                    .elements
                    .iter()
                    .map(|elem| self.opt(elem.as_ref(), Self::expr_or_spread))
                    .collect();
                self.node("ArrayExpression", e.span, json!({ "elements": elements }))
            }
            Expression::Object(e) => {
                let properties = self.list(&e.properties, |ser, member: &ObjectMember| match member {
                    ObjectMember::Property(prop) => ser.node(
                        "Property",
                        prop.span,
                        json!({
                            "method": prop.method,
                            "shorthand": prop.shorthand,
                            "computed": prop.computed,
                            "key": ser.expr(&prop.key),
                            "value": ser.expr(&prop.value),
                            "kind": prop.kind.as_str(),
                        }),
                    ),
                    ObjectMember::Spread(spread) => ser.spread(spread),
                });
                self.node("ObjectExpression", e.span, json!({ "properties": properties }))
            }
            Expression::Function(func) => self.function("FunctionExpression", func),
            Expression::Arrow(arrow) => {
                let (body, expression) = match &arrow.body {
                    ArrowBody::Block(body) => (self.function_body(body), false),
                    ArrowBody::Expression(expr) => (self.expr(expr), true),
                };
                self.node(
                    "ArrowFunctionExpression",
                    arrow.span,
                    json!({
                        "id": null,
                        "expression": expression,
                        "generator": false,
                        "async": arrow.is_async,
                        "params": self.list(&arrow.params, Self::pattern),
                        "body": body,
                    }),
                )
            }
            Expression::Class(class) => self.class("ClassExpression", class),
            Expression::Template(template) => self.template(template),
            Expression::TaggedTemplate(e) => self.node(
                "TaggedTemplateExpression",
                e.span,
                json!({ "tag": self.expr(&e.tag), "quasi": self.template(&e.quasi) }),
            ),
            Expression::Unary(e) => self.node(
                "UnaryExpression",
                e.span,
                json!({
                    "operator": e.operator.as_str(),
                    "prefix": true,
                    "argument": self.expr(&e.argument),
                }),
            ),
            Expression::Update(e) => self.node(
                "UpdateExpression",
                e.span,
                json!({
                    "operator": e.operator.as_str(),
                    "prefix": e.prefix,
                    "argument": self.expr(&e.argument),
                }),
            ),
            Expression::Binary(e) => self.node(
                "BinaryExpression",
                e.span,
                json!({
                    "left": self.expr(&e.left),
                    "operator": e.operator.as_str(),
                    "right": self.expr(&e.right),
                }),
            ),
            Expression::Logical(e) => self.node(
                "LogicalExpression",
                e.span,
                json!({
                    "left": self.expr(&e.left),
                    "operator": e.operator.as_str(),
                    "right": self.expr(&e.right),
                }),
            ),
            Expression::Assignment(e) => self.node(
                "AssignmentExpression",
                e.span,
                json!({
                    "operator": e.operator.as_str(),
                    "left": self.pattern(&e.left),
                    "right": self.expr(&e.right),
                }),
            ),
            Expression::Conditional(e) => self.node(
                "ConditionalExpression",
                e.span,
                json!({
                    "test": self.expr(&e.test),
                    "consequent": self.expr(&e.consequent),
                    "alternate": self.expr(&e.alternate),
                }),
            ),
            Expression::Call(e) => self.node(
                "CallExpression",
                e.span,
                json!({
                    "callee": self.expr(&e.callee),
                    "arguments": self.list(&e.arguments, Self::expr_or_spread),
                    "optional": e.optional,
                }),
            ),
            Expression::New(e) => self.node(
                "NewExpression",
                e.span,
                json!({
                    "callee": self.expr(&e.callee),
                    "arguments": self.list(&e.arguments, Self::expr_or_spread),
                }),
            ),
            Expression::Member(e) => self.member(e),
            Expression::Sequence(e) => self.node(
                "SequenceExpression",
                e.span,
                json!({ "expressions": self.list(&e.expressions, Self::expr) }),
            ),
            Expression::Yield(e) => self.node(
                "YieldExpression",
                e.span,
                json!({
                    "delegate": e.delegate,
                    "argument": self.opt(e.argument.as_ref(), Self::expr),
                }),
            ),
            Expression::Await(e) => self.node(
                "AwaitExpression",
                e.span,
                json!({ "argument": self.expr(&e.argument) }),
            ),
            Expression::Chain(e) => self.node(
                "ChainExpression",
                e.span,
                json!({ "expression": self.expr(&e.expression) }),
            ),
            Expression::MetaProperty(e) => self.node(
                "MetaProperty",
                e.span,
                json!({ "meta": self.ident(&e.meta), "property": self.ident(&e.property) }),
            ),
            Expression::Import(e) => self.node(
                "ImportExpression",
                e.span,
                json!({ "source": self.expr(&e.source) }),
            ),
        }
    }

    fn pattern(&self, pat: &Pattern) -> Value {
        match pat {
            Pattern::Identifier(ident) => self.ident(ident),
            Pattern::Member(member) => self.member(member),
            Pattern::Object(obj) => {
                let properties = self.list(&obj.properties, |ser, prop: &ObjectPatternProperty| {
                    match prop {
                        ObjectPatternProperty::Property(prop) => ser.node(
                            "Property",
                            prop.span,
                            json!({
                                "method": false,
                                "shorthand": prop.shorthand,
                                "computed": prop.computed,
                                "key": ser.expr(&prop.key),
                                "value": ser.pattern(&prop.value),
                                "kind": "init",
                            }),
                        ),
                        ObjectPatternProperty::Rest(rest) => ser.rest(rest),
                    }
                });
                self.node("ObjectPattern", obj.span, json!({ "properties": properties }))
            }
            Pattern::Array(arr) => {
                let elements: Vec<Value> = arr
                    .elements
                    .iter()
                    .map(|elem| self.opt(elem.as_ref(), Self::pattern))
                    .collect();
                self.node("ArrayPattern", arr.span, json!({ "elements": elements }))
            }
            Pattern::Rest(rest) => self.rest(rest),
            Pattern::Assignment(assign) => self.node(
                "AssignmentPattern",
                assign.span,
                json!({ "left": self.pattern(&assign.left), "right": self.expr(&assign.right) }),
            ),
        }
    }

    fn rest(&self, rest: &RestElement) -> Value {
        self.node(
            "RestElement",
            rest.span,
            json!({ "argument": self.pattern(&rest.argument) }),
        )
    }
}

/// Integral values print without a fraction, values JSON cannot hold become `null`.
fn number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        return json!(value as i64);
    }
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}
