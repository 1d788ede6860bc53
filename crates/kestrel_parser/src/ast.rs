//! The typed syntax tree produced by the parser.
//!
//! Node shapes follow ESTree closely so serialization is a direct walk. Every node carries
//! the byte [`Span`] of the source text it was parsed from. Nodes are built bottom up and
//! never mutated after their parent captures them.

use kestrel_syntax::Span;
use num_bigint::BigInt;
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Script,
    Module,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub span: Span,
    pub source_type: SourceType,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub span: Span,
    pub name: SmolStr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    BigInt(BigInt),
    RegExp { pattern: String, flags: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub span: Span,
    pub value: LiteralValue,
    /// The source text of the literal, only kept when raw output is requested.
    pub raw: Option<String>,
}

impl Literal {
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            LiteralValue::String(value) => Some(value),
            _ => None,
        }
    }
}

// Statements

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(ExpressionStatement),
    Block(BlockStatement),
    Empty(Span),
    Debugger(Span),
    With(WithStatement),
    Return(ReturnStatement),
    Labeled(LabeledStatement),
    Break(JumpStatement),
    Continue(JumpStatement),
    If(IfStatement),
    Switch(SwitchStatement),
    Throw(ThrowStatement),
    Try(TryStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    For(ForStatement),
    ForIn(ForInStatement),
    ForOf(ForOfStatement),
    FunctionDeclaration(Box<Function>),
    VariableDeclaration(VariableDeclaration),
    ClassDeclaration(Box<Class>),
    ImportDeclaration(ImportDeclaration),
    ExportNamedDeclaration(ExportNamedDeclaration),
    ExportDefaultDeclaration(ExportDefaultDeclaration),
    ExportAllDeclaration(ExportAllDeclaration),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Expression(s) => s.span,
            Statement::Block(s) => s.span,
            Statement::Empty(span) | Statement::Debugger(span) => *span,
            Statement::With(s) => s.span,
            Statement::Return(s) => s.span,
            Statement::Labeled(s) => s.span,
            Statement::Break(s) | Statement::Continue(s) => s.span,
            Statement::If(s) => s.span,
            Statement::Switch(s) => s.span,
            Statement::Throw(s) => s.span,
            Statement::Try(s) => s.span,
            Statement::While(s) => s.span,
            Statement::DoWhile(s) => s.span,
            Statement::For(s) => s.span,
            Statement::ForIn(s) => s.span,
            Statement::ForOf(s) => s.span,
            Statement::FunctionDeclaration(f) => f.span,
            Statement::VariableDeclaration(d) => d.span,
            Statement::ClassDeclaration(c) => c.span,
            Statement::ImportDeclaration(d) => d.span,
            Statement::ExportNamedDeclaration(d) => d.span,
            Statement::ExportDefaultDeclaration(d) => d.span,
            Statement::ExportAllDeclaration(d) => d.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub span: Span,
    pub expression: Expression,
    /// The raw text of a directive without its quotes, e.g. `use strict`.
    pub directive: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub span: Span,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithStatement {
    pub span: Span,
    pub object: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub span: Span,
    pub argument: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStatement {
    pub span: Span,
    pub label: Identifier,
    pub body: Box<Statement>,
}

/// A `break` or `continue` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct JumpStatement {
    pub span: Span,
    pub label: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub span: Span,
    pub test: Expression,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub span: Span,
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub span: Span,
    /// `None` for the `default` clause.
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    pub span: Span,
    pub argument: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    pub span: Span,
    pub block: BlockStatement,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub span: Span,
    pub param: Option<Pattern>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub span: Span,
    pub test: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    pub span: Span,
    pub body: Box<Statement>,
    pub test: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Variable(VariableDeclaration),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub span: Span,
    pub init: Option<ForInit>,
    pub test: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Box<Statement>,
}

/// The left side of a `for-in` or `for-of` statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ForHead {
    Variable(VariableDeclaration),
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    pub span: Span,
    pub left: ForHead,
    pub right: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStatement {
    pub span: Span,
    pub is_await: bool,
    pub left: ForHead,
    pub right: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub span: Span,
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub span: Span,
    pub id: Pattern,
    pub init: Option<Expression>,
}

// Functions and classes

/// A function declaration, function expression, or the value of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub span: Span,
    pub id: Option<Identifier>,
    pub params: Vec<Pattern>,
    pub body: FunctionBody,
    pub generator: bool,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBody {
    pub span: Span,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Block(FunctionBody),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub span: Span,
    pub params: Vec<Pattern>,
    pub body: ArrowBody,
    pub is_async: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub span: Span,
    pub id: Option<Identifier>,
    pub super_class: Option<Expression>,
    pub body: ClassBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassBody {
    pub span: Span,
    pub body: Vec<ClassMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Method(MethodDefinition),
    Property(PropertyDefinition),
    StaticBlock(StaticBlock),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

impl MethodKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MethodKind::Constructor => "constructor",
            MethodKind::Method => "method",
            MethodKind::Get => "get",
            MethodKind::Set => "set",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    pub span: Span,
    pub key: Expression,
    pub computed: bool,
    pub is_static: bool,
    pub kind: MethodKind,
    pub value: Box<Function>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    pub span: Span,
    pub key: Expression,
    pub computed: bool,
    pub is_static: bool,
    pub value: Option<Expression>,
}

/// A `static { }` block, run once when the class is defined.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBlock {
    pub span: Span,
    pub body: Vec<Statement>,
}

// Modules

/// An exported or imported name, either an identifier or a string literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleExportName {
    Identifier(Identifier),
    String(Literal),
}

impl ModuleExportName {
    pub fn name(&self) -> &str {
        match self {
            ModuleExportName::Identifier(ident) => &ident.name,
            ModuleExportName::String(lit) => lit.as_str().unwrap_or_default(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ModuleExportName::Identifier(ident) => ident.span,
            ModuleExportName::String(lit) => lit.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `import a from "m"`
    Default { span: Span, local: Identifier },
    /// `import * as a from "m"`
    Namespace { span: Span, local: Identifier },
    /// `import { a as b } from "m"`
    Named {
        span: Span,
        imported: ModuleExportName,
        local: Identifier,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    pub span: Span,
    pub specifiers: Vec<ImportSpecifier>,
    pub source: Literal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    pub span: Span,
    pub local: ModuleExportName,
    pub exported: ModuleExportName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportNamedDeclaration {
    pub span: Span,
    pub declaration: Option<Box<Statement>>,
    pub specifiers: Vec<ExportSpecifier>,
    pub source: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportDefaultKind {
    Function(Box<Function>),
    Class(Box<Class>),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDefaultDeclaration {
    pub span: Span,
    pub declaration: ExportDefaultKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportAllDeclaration {
    pub span: Span,
    pub exported: Option<ModuleExportName>,
    pub source: Literal,
}

// Expressions

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    /// A private name such as `#x`, only valid as a class member key, after a `.`,
    /// or on the left of `in`. The name excludes the `#`.
    PrivateName(Identifier),
    Literal(Literal),
    This(Span),
    Super(Span),
    Array(ArrayExpression),
    Object(ObjectExpression),
    Function(Box<Function>),
    Arrow(Box<ArrowFunction>),
    Class(Box<Class>),
    Template(TemplateLiteral),
    TaggedTemplate(Box<TaggedTemplateExpression>),
    Unary(Box<UnaryExpression>),
    Update(Box<UpdateExpression>),
    Binary(Box<BinaryExpression>),
    Logical(Box<LogicalExpression>),
    Assignment(Box<AssignmentExpression>),
    Conditional(Box<ConditionalExpression>),
    Call(Box<CallExpression>),
    New(Box<NewExpression>),
    Member(Box<MemberExpression>),
    Sequence(SequenceExpression),
    Yield(Box<YieldExpression>),
    Await(Box<AwaitExpression>),
    Chain(Box<ChainExpression>),
    MetaProperty(MetaProperty),
    Import(Box<ImportExpression>),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(e) | Expression::PrivateName(e) => e.span,
            Expression::Literal(e) => e.span,
            Expression::This(span) | Expression::Super(span) => *span,
            Expression::Array(e) => e.span,
            Expression::Object(e) => e.span,
            Expression::Function(e) => e.span,
            Expression::Arrow(e) => e.span,
            Expression::Class(e) => e.span,
            Expression::Template(e) => e.span,
            Expression::TaggedTemplate(e) => e.span,
            Expression::Unary(e) => e.span,
            Expression::Update(e) => e.span,
            Expression::Binary(e) => e.span,
            Expression::Logical(e) => e.span,
            Expression::Assignment(e) => e.span,
            Expression::Conditional(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::New(e) => e.span,
            Expression::Member(e) => e.span,
            Expression::Sequence(e) => e.span,
            Expression::Yield(e) => e.span,
            Expression::Await(e) => e.span,
            Expression::Chain(e) => e.span,
            Expression::MetaProperty(e) => e.span,
            Expression::Import(e) => e.span,
        }
    }
}

/// An expression which may be spread, used by array literals and arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprOrSpread {
    Expr(Expression),
    Spread(SpreadElement),
}

impl ExprOrSpread {
    pub fn span(&self) -> Span {
        match self {
            ExprOrSpread::Expr(expr) => expr.span(),
            ExprOrSpread::Spread(spread) => spread.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadElement {
    pub span: Span,
    pub argument: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    pub span: Span,
    /// `None` is a hole.
    pub elements: Vec<Option<ExprOrSpread>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpression {
    pub span: Span,
    pub properties: Vec<ObjectMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    Property(Property),
    Spread(SpreadElement),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

impl PropertyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Init => "init",
            PropertyKind::Get => "get",
            PropertyKind::Set => "set",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub span: Span,
    pub key: Expression,
    pub value: Expression,
    pub kind: PropertyKind,
    pub method: bool,
    pub shorthand: bool,
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    pub span: Span,
    /// `None` when the chunk contains an invalid escape, only legal in tagged templates.
    pub cooked: Option<String>,
    pub raw: String,
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub span: Span,
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTemplateExpression {
    pub span: Span,
    pub tag: Expression,
    pub quasi: TemplateLiteral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    Plus,
    Not,
    BitNot,
    Typeof,
    Void,
    Delete,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::Not => "!",
            UnaryOperator::BitNot => "~",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub span: Span,
    pub operator: UnaryOperator,
    pub argument: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub span: Span,
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Shl,
    Shr,
    UShr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    BitOr,
    BitXor,
    BitAnd,
    In,
    Instanceof,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Eq => "==",
            BinaryOperator::NotEq => "!=",
            BinaryOperator::StrictEq => "===",
            BinaryOperator::StrictNotEq => "!==",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::Shl => "<<",
            BinaryOperator::Shr => ">>",
            BinaryOperator::UShr => ">>>",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Exp => "**",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::In => "in",
            BinaryOperator::Instanceof => "instanceof",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub span: Span,
    pub operator: BinaryOperator,
    pub left: Expression,
    pub right: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    Or,
    And,
    Nullish,
}

impl LogicalOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::Or => "||",
            LogicalOperator::And => "&&",
            LogicalOperator::Nullish => "??",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    pub span: Span,
    pub operator: LogicalOperator,
    pub left: Expression,
    pub right: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    Shl,
    Shr,
    UShr,
    BitOr,
    BitXor,
    BitAnd,
    LogicalOr,
    LogicalAnd,
    Nullish,
}

impl AssignmentOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::Add => "+=",
            AssignmentOperator::Sub => "-=",
            AssignmentOperator::Mul => "*=",
            AssignmentOperator::Div => "/=",
            AssignmentOperator::Mod => "%=",
            AssignmentOperator::Exp => "**=",
            AssignmentOperator::Shl => "<<=",
            AssignmentOperator::Shr => ">>=",
            AssignmentOperator::UShr => ">>>=",
            AssignmentOperator::BitOr => "|=",
            AssignmentOperator::BitXor => "^=",
            AssignmentOperator::BitAnd => "&=",
            AssignmentOperator::LogicalOr => "||=",
            AssignmentOperator::LogicalAnd => "&&=",
            AssignmentOperator::Nullish => "??=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub span: Span,
    pub operator: AssignmentOperator,
    pub left: Pattern,
    pub right: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub span: Span,
    pub test: Expression,
    pub consequent: Expression,
    pub alternate: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub span: Span,
    pub callee: Expression,
    pub arguments: Vec<ExprOrSpread>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    pub span: Span,
    pub callee: Expression,
    pub arguments: Vec<ExprOrSpread>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub span: Span,
    pub object: Expression,
    pub property: Expression,
    pub computed: bool,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceExpression {
    pub span: Span,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpression {
    pub span: Span,
    pub argument: Option<Expression>,
    pub delegate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwaitExpression {
    pub span: Span,
    pub argument: Expression,
}

/// The root of an optional chain such as `a?.b.c`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainExpression {
    pub span: Span,
    pub expression: Expression,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaProperty {
    pub span: Span,
    pub meta: Identifier,
    pub property: Identifier,
}

/// A dynamic `import(source)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportExpression {
    pub span: Span,
    pub source: Expression,
}

// Patterns

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Identifier(Identifier),
    /// Only valid as an assignment target, never in a binding.
    Member(Box<MemberExpression>),
    Object(ObjectPattern),
    Array(ArrayPattern),
    Rest(Box<RestElement>),
    Assignment(Box<AssignmentPattern>),
}

impl Pattern {
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(p) => p.span,
            Pattern::Member(p) => p.span,
            Pattern::Object(p) => p.span,
            Pattern::Array(p) => p.span,
            Pattern::Rest(p) => p.span,
            Pattern::Assignment(p) => p.span,
        }
    }

    /// Whether this is a plain identifier, a parameter list made of only those is simple.
    pub fn is_simple(&self) -> bool {
        matches!(self, Pattern::Identifier(_))
    }

    /// Collect every identifier this pattern binds, in source order.
    pub fn bound_names<'a>(&'a self, out: &mut Vec<&'a Identifier>) {
        match self {
            Pattern::Identifier(ident) => out.push(ident),
            Pattern::Member(_) => {}
            Pattern::Object(obj) => {
                for prop in &obj.properties {
                    match prop {
                        ObjectPatternProperty::Property(prop) => prop.value.bound_names(out),
                        ObjectPatternProperty::Rest(rest) => rest.argument.bound_names(out),
                    }
                }
            }
            Pattern::Array(arr) => {
                for elem in arr.elements.iter().flatten() {
                    elem.bound_names(out);
                }
            }
            Pattern::Rest(rest) => rest.argument.bound_names(out),
            Pattern::Assignment(assign) => assign.left.bound_names(out),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    pub span: Span,
    pub properties: Vec<ObjectPatternProperty>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProperty {
    Property(AssignmentProperty),
    Rest(RestElement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentProperty {
    pub span: Span,
    pub key: Expression,
    pub value: Pattern,
    pub shorthand: bool,
    pub computed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    pub span: Span,
    /// `None` is a hole.
    pub elements: Vec<Option<Pattern>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestElement {
    pub span: Span,
    pub argument: Pattern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPattern {
    pub span: Span,
    pub left: Pattern,
    pub right: Expression,
}
