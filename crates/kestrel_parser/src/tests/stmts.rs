use super::*;

parse_ok! {
    Options::default() => {
        var_decls: "var a = 1, b; let [c, d] = e; const { f } = g;",
        if_else: "if (a) b; else if (c) d; else { e }",
        for_loops: "for (let i = 0; i < 5; i++) {} for (;;) break; for (i = 0, j = 1; ; ) {}",
        for_in_of: "for (a in b) {} for (const [c, d] of e) {} for ([f, g] of h) {} for (var i in j) {}",
        while_loops: "while (a) continue; do a; while (b) c",
        labels: "foo: while (true) { continue foo; } a: b: for (;;) { break a; } c: { break c; }",
        switch_with_cases: "switch (a) { case 1: let b; break; default: c(); case 2: }",
        try_catch: "try {} catch (e) { var e; } finally {} try {} catch {} try {} catch ({ a, b }) {}",
        throw_and_debugger: "throw new Error('a'); debugger;",
        with_sloppy: "with (a) b;",
        let_as_identifier: "let = 1; let\nfoo; if (a) let\n",
        asi: "a\nb\n++c",
        empty_statements: ";;;",
        function_decls: "function a() {} async function b() { await c; } function* d() { yield e; }",
        redeclared_var_functions: "function f() {} var f; function f() {}",
        catch_param_var: "try {} catch (e) { for (var e in {}) ; }",
        class_decls: "class A extends B { constructor() { super(); } static c() {} get d() { return 1; } }",
        global_vars_in_blocks: "{ var a; } var a;",
        directives_only: "'use strict'; \"use asm\";",
    }
}

parse_ok! {
    Options::GLOBAL_RETURN => {
        global_return: "return 5;",
    }
}

parse_ok! {
    Options::WEB_COMPAT => {
        web_compat_if_function: "if (true) function foo() {} else function bar() {}",
        web_compat_labeled_function: "foo: function bar() {}",
        web_compat_for_in_initializer: "for (var a = 1 in b) {}",
    }
}

parse_err! {
    Options::default() => {
        illegal_return: "return;" => ErrorKind::IllegalReturn,
        illegal_break: "break;" => ErrorKind::IllegalBreak,
        illegal_continue: "switch (a) { case 1: continue; }" => ErrorKind::IllegalContinue,
        unknown_label: "while (a) break foo;" => ErrorKind::UnknownLabel(_),
        duplicate_label: "foo: { foo: ; }" => ErrorKind::DuplicateLabel(_),
        continue_non_loop_label: "foo: { while (a) continue foo; }" => ErrorKind::InvalidContinueLabel(_),
        newline_after_throw: "throw\na;" => ErrorKind::NewlineAfterThrow,
        multiple_defaults: "switch (a) { default: default: }" => ErrorKind::MultipleDefaults,
        try_without_handler: "try {}" => ErrorKind::MissingCatchOrFinally,
        const_without_init: "const a;" => ErrorKind::ConstWithoutInitializer,
        destructuring_without_init: "let [a];" => ErrorKind::DestructuringWithoutInitializer,
        let_binding_let: "let let = 1;" => ErrorKind::LetInLexicalBinding,
        duplicate_lexical: "let a; let a;" => ErrorKind::DuplicateBinding(_),
        lexical_then_var: "let a; { var a; }" => ErrorKind::DuplicateBinding(_),
        catch_param_let: "try {} catch (e) { let e; }" => ErrorKind::DuplicateBinding(_),
        if_function: "if (true) function foo() {}" => ErrorKind::FunctionDeclarationPlacement,
        while_function: "while (a) function foo() {}" => ErrorKind::FunctionDeclarationPlacement,
        if_lexical: "if (a) let [b] = c;" => ErrorKind::LexicalDeclarationPlacement,
        if_const: "if (a) const b = 1;" => ErrorKind::LexicalDeclarationPlacement,
        label_class: "foo: class A {}" => ErrorKind::LexicalDeclarationPlacement,
        for_of_initializer: "for (let a = 1 of b) {}" => ErrorKind::ForInOfInitializer,
        for_in_initializer: "for (var a = 1 in b) {}" => ErrorKind::ForInOfInitializer,
        for_of_multiple: "for (let a, b of c) {}" => ErrorKind::ForInOfMultipleBindings,
        for_of_async: "for (async of a) {}" => ErrorKind::ForOfAsync,
        for_in_bad_target: "for (a + b in c) {}" => ErrorKind::InvalidAssignmentTarget,
        missing_semicolon: "a b" => ErrorKind::UnexpectedToken(_),
        unterminated_block: "{ a;" => ErrorKind::UnexpectedEof,
        import_in_script: "import a from 'b';" => ErrorKind::ImportExportOutsideModule,
    }
}

parse_err! {
    Options::WEB_COMPAT => {
        web_compat_generator_in_if: "if (a) function* b() {}" => ErrorKind::FunctionDeclarationPlacement,
        web_compat_async_in_if: "if (a) async function b() {}" => ErrorKind::FunctionDeclarationPlacement,
        web_compat_labeled_function_in_if: "if (a) b: function c() {}" => ErrorKind::FunctionDeclarationPlacement,
    }
}

parse_err! {
    Options::STRICT => {
        strict_with: "with (a) {}" => ErrorKind::StrictWith,
        strict_if_function: "if (a) function b() {}" => ErrorKind::StrictFunctionDeclaration,
        strict_labeled_function: "a: function b() {}" => ErrorKind::StrictFunctionDeclaration,
    }
}

#[test]
fn labeled_statement_shape() {
    let program = ok("foo: bar;", Options::default());
    match &program.body[0] {
        Statement::Labeled(stmt) => {
            assert_eq!(stmt.label.name, "foo");
            assert!(matches!(*stmt.body, Statement::Expression(_)));
        }
        other => panic!("expected a labeled statement, found {:#?}", other),
    }
}

#[test]
fn do_while_spans_optional_semicolon() {
    let program = ok("do a; while (b)", Options::default());
    assert_eq!(program.body[0].span(), Span::new(0, 15));
}

#[test]
fn for_of_head_is_pattern() {
    let program = ok("for ([a, b] of c) ;", Options::default());
    match &program.body[0] {
        Statement::ForOf(stmt) => {
            assert!(!stmt.is_await);
            assert!(matches!(stmt.left, ForHead::Pattern(Pattern::Array(_))));
        }
        other => panic!("expected a for-of statement, found {:#?}", other),
    }
}

#[test]
fn for_await_in_async_function() {
    let program = ok("async function f() { for await (const a of b) ; }", Options::default());
    let func = match &program.body[0] {
        Statement::FunctionDeclaration(func) => func,
        other => panic!("expected a function, found {:#?}", other),
    };
    assert!(matches!(
        func.body.body[0],
        Statement::ForOf(ForOfStatement { is_await: true, .. })
    ));
    assert!(matches!(
        err("for await (const a of b) ;", Options::default()),
        ErrorKind::UnexpectedToken(_)
    ));
}

#[test]
fn let_expression_statements() {
    let program = ok("let\nfoo", Options::default());
    assert!(matches!(program.body[0], Statement::VariableDeclaration(_)));
    let program = ok("if (a) let\nfoo", Options::default());
    assert_eq!(program.body.len(), 2);
}
