use super::*;

parse_ok! {
    Options::default() => {
        arrows: "a => a; (a, b) => {}; async (a) => await a; async a => a; () => ({}); (a, ...b) => b;",
        async_as_identifier: "async(a, b); async; async\n(a);",
        arrow_in_conditional: "a ? (b) => c : d => e",
        templates: "`a${b}c${d}e`; tag`\\unicode`; ``;",
        optional_chains: "a?.b; a?.[b]; a?.(b); a?.b.c(d)?.e;",
        object_literals: "({ a, b: 1, [c]: 2, d() {}, get e() { return 1; }, set e(v) {}, async *f() {}, ...g, __proto__: null, 'h': 3, 1: 4 })",
        duplicate_proto_in_pattern: "({ __proto__: a, __proto__: b } = c);",
        cover_initializers_in_patterns: "({ a = 1 } = b); [{ c = 2 }] = d;",
        nested_assignment_patterns: "[a, [b, ...c], { d: e.f }] = g; ({ a: b[c] } = d);",
        parenthesized_targets: "(a) = 1; (a.b) = 2; (a) += 3;",
        regex_and_division: "x = /ab+c/i; a / b / c; a\n/b/g;",
        new_exprs: "new a; new a.b(); new new a()(); new (a().b)();",
        new_target: "function f() { return new.target; }",
        super_in_methods: "({ a() { return super.b; } }); class A { b() { super.c(); } }",
        yield_and_await_identifiers: "var yield = 1, await = 2; yield + await;",
        dynamic_import: "import('a'); import(b,);",
        exponents: "(-a) ** b; a ** -b; ++a ** 2; 2 ** 3 ** 2;",
        in_operator: "a in b; for (var a = (b in c); ;) {}",
        classes: "(class {}); (class A extends B { static c = 1; d = this; get; static; })",
        conditionals: "a ? b : c ? d : e",
        logical_assignment: "a ??= b; a ||= c; a &&= d; a **= 2;",
        nullish_in_parens: "a ?? (b || c); (a && b) ?? c;",
        generator_yields: "function* g() { yield; yield a; yield* b; yield\na; }",
    }
}

parse_err! {
    Options::default() => {
        nullish_with_or: "a ?? b || c" => ErrorKind::MixedNullish,
        or_with_nullish: "a || b ?? c" => ErrorKind::MixedNullish,
        nullish_with_and: "a ?? b && c" => ErrorKind::MixedNullish,
        unary_before_exponent: "-a ** b" => ErrorKind::UnaryBeforeExponentiation,
        await_before_exponent: "async function f() { await a ** 2; }" => ErrorKind::UnaryBeforeExponentiation,
        optional_chain_in_new: "new a?.b()" => ErrorKind::OptionalChainInNew,
        tagged_template_in_chain: "a?.b`c`" => ErrorKind::TaggedTemplateInOptionalChain,
        cover_initializer_in_expr: "({ a = 1 })" => ErrorKind::InvalidCoverInitializedName,
        nested_cover_initializer: "[{ a = 1 }]" => ErrorKind::InvalidCoverInitializedName,
        duplicate_proto: "({ __proto__: 1, __proto__: 2 })" => ErrorKind::DuplicateProto,
        literal_target: "1 = a" => ErrorKind::InvalidAssignmentTarget,
        binary_target: "a + 1 = 2" => ErrorKind::InvalidAssignmentTarget,
        parenthesized_pattern: "([a]) = 1" => ErrorKind::InvalidAssignmentTarget,
        compound_pattern: "[a] += 1" => ErrorKind::InvalidAssignmentTarget,
        literal_in_pattern: "({ a: 1 } = b)" => ErrorKind::InvalidDestructuringTarget,
        rest_not_last: "[...a, b] = c" => ErrorKind::RestNotLast,
        rest_trailing_comma: "[...a,] = c" => ErrorKind::RestTrailingComma,
        rest_initializer: "[...a = 1] = b" => ErrorKind::RestWithInitializer,
        update_literal: "1++" => ErrorKind::InvalidUpdateTarget,
        update_update: "++a++" => ErrorKind::InvalidUpdateTarget,
        arrow_newline: "a\n=> a" => ErrorKind::LineTerminatorBeforeArrow,
        paren_arrow_newline: "(a)\n=> a" => ErrorKind::LineTerminatorBeforeArrow,
        arrow_operand: "a => {} + 1" => ErrorKind::ArrowOperand,
        empty_parens: "(); a" => ErrorKind::UnexpectedToken(_),
        rest_in_parens: "(...a);" => ErrorKind::UnexpectedToken(_),
        import_call_without_args: "import()" => ErrorKind::ImportCallArity,
        import_call_two_args: "import(a, b)" => ErrorKind::ImportCallArity,
        unknown_meta_property: "function f() { new.foo }" => ErrorKind::InvalidMetaProperty(_),
        new_target_outside_function: "new.target" => ErrorKind::InvalidNewTarget,
        super_property_outside_method: "super.a" => ErrorKind::InvalidSuperProperty,
        super_call_in_base_class: "class A { constructor() { super(); } }" => ErrorKind::InvalidSuperCall,
        super_call_in_method: "class A extends B { foo() { super(); } }" => ErrorKind::InvalidSuperCall,
        untagged_invalid_escape: "`\\unicode`" => ErrorKind::InvalidTemplateEscape,
        getter_with_param: "({ get a(b) {} })" => ErrorKind::GetterArity,
        setter_without_param: "({ set a() {} })" => ErrorKind::SetterArity,
        setter_with_rest: "({ set a(...b) {} })" => ErrorKind::SetterArity,
        yield_in_arrow_params: "function* g() { (a = yield) => a; }" => ErrorKind::YieldInParameter,
        await_in_async_arrow_params: "async (await) => a" => ErrorKind::AwaitIdentifier,
        keyword_shorthand: "({ if })" => ErrorKind::ReservedWord(_),
    }
}

parse_err! {
    Options::STRICT => {
        strict_delete: "delete a;" => ErrorKind::StrictDelete,
        strict_delete_parenthesized: "delete (a);" => ErrorKind::StrictDelete,
        strict_assign_eval: "eval = 1;" => ErrorKind::StrictEvalArguments(_),
        strict_update_arguments: "arguments++" => ErrorKind::StrictEvalArguments(_),
        strict_pattern_eval: "[eval] = a;" => ErrorKind::StrictEvalArguments(_),
        strict_reserved_reference: "implements" => ErrorKind::StrictReservedWord(_),
        strict_arrow_param: "(interface) => 1" => ErrorKind::StrictReservedWord(_),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = single_expr("1 + 2 * 3");
    let add = match expr {
        Expression::Binary(bin) => bin,
        other => panic!("{:#?}", other),
    };
    assert_eq!(add.operator, BinaryOperator::Add);
    assert!(matches!(&add.right, Expression::Binary(mul) if mul.operator == BinaryOperator::Mul));
}

#[test]
fn left_associative_subtraction() {
    let expr = single_expr("a - b - c");
    match expr {
        Expression::Binary(outer) => {
            assert_eq!(outer.span, Span::new(0, 9));
            assert!(matches!(outer.left, Expression::Binary(_)));
            assert!(matches!(outer.right, Expression::Identifier(_)));
        }
        other => panic!("{:#?}", other),
    }
}

#[test]
fn exponent_is_right_associative() {
    let expr = single_expr("2 ** 3 ** 2");
    match expr {
        Expression::Binary(outer) => {
            assert_eq!(outer.operator, BinaryOperator::Exp);
            assert!(matches!(outer.left, Expression::Literal(_)));
            assert!(matches!(&outer.right, Expression::Binary(inner) if inner.operator == BinaryOperator::Exp));
        }
        other => panic!("{:#?}", other),
    }
}

#[test]
fn logical_operators() {
    assert!(matches!(
        single_expr("a ?? b"),
        Expression::Logical(logical) if logical.operator == LogicalOperator::Nullish
    ));
    // `&&` binds tighter than `||`
    match single_expr("a || b && c") {
        Expression::Logical(or) => {
            assert_eq!(or.operator, LogicalOperator::Or);
            assert!(matches!(&or.right, Expression::Logical(and) if and.operator == LogicalOperator::And));
        }
        other => panic!("{:#?}", other),
    }
}

#[test]
fn numeric_literals() {
    let number = |src| match single_expr(src) {
        Expression::Literal(Literal {
            value: LiteralValue::Number(value),
            ..
        }) => value,
        other => panic!("{:#?}", other),
    };
    assert_eq!(number("0x1F"), 31.0);
    assert_eq!(number("1_000"), 1000.0);
    assert_eq!(number(".5"), 0.5);
    assert_eq!(number("017"), 15.0);
    assert_eq!(number("1e3"), 1000.0);
}

#[test]
fn bigint_and_regex_literals() {
    match single_expr("10n") {
        Expression::Literal(lit) => assert_eq!(lit.value, LiteralValue::BigInt(10.into())),
        other => panic!("{:#?}", other),
    }
    match single_expr("/ab+c/gi") {
        Expression::Literal(lit) => assert_eq!(
            lit.value,
            LiteralValue::RegExp {
                pattern: "ab+c".into(),
                flags: "gi".into(),
            }
        ),
        other => panic!("{:#?}", other),
    }
}

#[test]
fn raw_is_only_kept_when_requested() {
    let raw = |options| match ok("0x10", options).body.remove(0) {
        Statement::Expression(ExpressionStatement {
            expression: Expression::Literal(lit),
            ..
        }) => lit.raw,
        other => panic!("{:#?}", other),
    };
    assert_eq!(raw(Options::default()), None);
    assert_eq!(raw(Options::RAW), Some("0x10".to_string()));
}

#[test]
fn template_chunks() {
    let tpl = match single_expr("`a${b}c`") {
        Expression::Template(tpl) => tpl,
        other => panic!("{:#?}", other),
    };
    assert_eq!(tpl.expressions.len(), 1);
    assert_eq!(tpl.quasis.len(), 2);
    assert_eq!(tpl.quasis[0].cooked.as_deref(), Some("a"));
    assert_eq!(tpl.quasis[0].span, Span::new(1, 2));
    assert!(!tpl.quasis[0].tail);
    assert_eq!(tpl.quasis[1].cooked.as_deref(), Some("c"));
    assert_eq!(tpl.quasis[1].span, Span::new(6, 7));
    assert!(tpl.quasis[1].tail);
}

#[test]
fn tagged_template_keeps_invalid_escapes_raw() {
    let tagged = match single_expr("tag`\\u`") {
        Expression::TaggedTemplate(tagged) => tagged,
        other => panic!("{:#?}", other),
    };
    let quasi = &tagged.quasi.quasis[0];
    assert_eq!(quasi.cooked, None);
    assert_eq!(quasi.raw, "\\u");
}

#[test]
fn optional_chain_is_wrapped_once() {
    let chain = match single_expr("a?.b.c") {
        Expression::Chain(chain) => chain,
        other => panic!("{:#?}", other),
    };
    assert_eq!(chain.span, Span::new(0, 6));
    match &chain.expression {
        Expression::Member(outer) => {
            assert!(!outer.optional);
            assert!(matches!(&outer.object, Expression::Member(inner) if inner.optional));
        }
        other => panic!("{:#?}", other),
    }
}

#[test]
fn arrow_functions() {
    match single_expr("(a, b) => a") {
        Expression::Arrow(arrow) => {
            assert_eq!(arrow.params.len(), 2);
            assert!(!arrow.is_async);
            assert!(matches!(arrow.body, ArrowBody::Expression(_)));
        }
        other => panic!("{:#?}", other),
    }
    match single_expr("async x => {}") {
        Expression::Arrow(arrow) => {
            assert!(arrow.is_async);
            assert!(matches!(arrow.body, ArrowBody::Block(_)));
        }
        other => panic!("{:#?}", other),
    }
    assert!(matches!(
        single_expr("async(a)"),
        Expression::Call(call) if matches!(&call.callee, Expression::Identifier(id) if id.name == "async")
    ));
}

#[test]
fn arrow_parameters_become_patterns() {
    let arrow = match single_expr("([a, b] = c, { d }, ...e) => 1") {
        Expression::Arrow(arrow) => arrow,
        other => panic!("{:#?}", other),
    };
    assert!(matches!(arrow.params[0], Pattern::Assignment(_)));
    assert!(matches!(arrow.params[1], Pattern::Object(_)));
    assert!(matches!(arrow.params[2], Pattern::Rest(_)));
}

#[test]
fn parenthesized_sequence_span() {
    match single_expr("(a, b)") {
        Expression::Sequence(seq) => {
            assert_eq!(seq.span, Span::new(1, 5));
            assert_eq!(seq.expressions.len(), 2);
        }
        other => panic!("{:#?}", other),
    }
}

#[test]
fn array_literal_assignment_becomes_pattern() {
    let assign = match single_expr("[a, , ...b] = c") {
        Expression::Assignment(assign) => assign,
        other => panic!("{:#?}", other),
    };
    match &assign.left {
        Pattern::Array(arr) => {
            assert_eq!(arr.elements.len(), 3);
            assert!(arr.elements[1].is_none());
            assert!(matches!(arr.elements[2], Some(Pattern::Rest(_))));
        }
        other => panic!("{:#?}", other),
    }
}

#[test]
fn object_property_kinds() {
    let obj = match single_expr("({ get a() {}, b() {}, c, d: 1 })") {
        Expression::Object(obj) => obj,
        other => panic!("{:#?}", other),
    };
    let props: Vec<_> = obj
        .properties
        .iter()
        .map(|member| match member {
            ObjectMember::Property(prop) => (prop.kind, prop.method, prop.shorthand),
            ObjectMember::Spread(_) => panic!("unexpected spread"),
        })
        .collect();
    assert_eq!(
        props,
        vec![
            (PropertyKind::Get, false, false),
            (PropertyKind::Init, true, false),
            (PropertyKind::Init, false, true),
            (PropertyKind::Init, false, false),
        ]
    );
}

#[test]
fn new_without_arguments() {
    match single_expr("new a.b") {
        Expression::New(new) => {
            assert!(new.arguments.is_empty());
            assert!(matches!(new.callee, Expression::Member(_)));
        }
        other => panic!("{:#?}", other),
    }
}
