use super::*;

parse_ok! {
    Options::MODULE => {
        imports: "import 'a'; import b from 'c'; import * as d from 'e'; import f, { g, h as i, 'j' as k } from 'l'; import m, * as n from 'o';",
        import_keyword_renamed: "import { if as a, default as b } from 'c';",
        exports: "export * from 'a'; export * as b from 'c'; let d, e; export { d, e as f, e as 'g' }; export { h as i } from 'j';",
        export_declarations: "export const l = 1, { m } = n; export class o {} export function p() {} export async function q() {} export let [r, ...s] = t;",
        export_default_function: "export default function () {}",
        export_default_named_function: "export default async function f() {} f();",
        export_default_class: "export default class {}",
        export_default_expression: "export default a + 1;",
        export_default_arrow: "export default async () => {};",
        export_before_declaration: "export { a }; var a;",
        export_function_declared_later: "export { f }; function f() {}",
        export_import_binding: "import a from 'b'; export { a };",
        reexport_keywords: "export { if, default as x } from 'a';",
        import_meta: "import.meta.url",
        dynamic_import: "import('a').then(b => b);",
        trailing_commas: "import { a, } from 'b'; export { a, };",
    }
}

parse_err! {
    Options::MODULE => {
        duplicate_named_export: "let a; export { a, a };" => ErrorKind::DuplicateExport(_),
        duplicate_default: "export default 1; export default 2;" => ErrorKind::DuplicateExport(_),
        duplicate_declared_export: "export let a; export { a };" => ErrorKind::DuplicateExport(_),
        duplicate_star_as: "export * as a from 'b'; export * as a from 'c';" => ErrorKind::DuplicateExport(_),
        undefined_export: "export { a };" => ErrorKind::UndefinedExport(_),
        export_of_block_binding: "{ let a; } export { a };" => ErrorKind::UndefinedExport(_),
        export_in_block: "{ export let a; }" => ErrorKind::ImportExportOutsideModule,
        import_in_function: "function f() { import a from 'b'; }" => ErrorKind::ImportExportOutsideModule,
        import_after_label: "a: import b from 'c';" => ErrorKind::ImportExportOutsideModule,
        import_conflicts_with_let: "import a from 'b'; let a;" => ErrorKind::DuplicateBinding(_),
        duplicate_import: "import a from 'b'; import { a } from 'c';" => ErrorKind::DuplicateBinding(_),
        import_keyword_without_as: "import { if } from 'a';" => ErrorKind::ReservedWord(_),
        import_string_without_as: "import { 'a' } from 'b';" => ErrorKind::Expected("as", _),
        import_strict_reserved: "import { a as package } from 'b';" => ErrorKind::StrictReservedWord(_),
        export_string_local: "export { 'a' };" => ErrorKind::UnexpectedToken(_),
        export_keyword_local: "export { if };" => ErrorKind::ReservedWord(_),
        export_expression: "export a;" => ErrorKind::UnexpectedToken(_),
        missing_from: "import a 'b';" => ErrorKind::Expected("from", _),
        source_not_a_string: "import a from b;" => ErrorKind::Expected("string", _),
        await_at_top_level: "await;" => ErrorKind::AwaitIdentifier,
    }
}

parse_err! {
    Options::default() => {
        import_meta_in_script: "import.meta" => ErrorKind::InvalidImportMeta,
        export_in_script: "export var a;" => ErrorKind::ImportExportOutsideModule,
        unknown_import_meta_property: "import.foo" => ErrorKind::InvalidMetaProperty(_),
    }
}

fn module_items(src: &str) -> Vec<Statement> {
    ok(src, Options::MODULE).body
}

#[test]
fn import_specifiers() {
    let items = module_items("import a, { b as c, 'd-e' as f } from 'g';");
    let import = match &items[0] {
        Statement::ImportDeclaration(import) => import,
        other => panic!("{:#?}", other),
    };
    assert_eq!(import.source.as_str(), Some("g"));
    assert_eq!(import.specifiers.len(), 3);
    assert!(matches!(
        &import.specifiers[0],
        ImportSpecifier::Default { local, .. } if local.name == "a"
    ));
    match &import.specifiers[1] {
        ImportSpecifier::Named { imported, local, .. } => {
            assert_eq!(imported.name(), "b");
            assert_eq!(local.name, "c");
        }
        other => panic!("{:#?}", other),
    }
    match &import.specifiers[2] {
        ImportSpecifier::Named { imported, local, .. } => {
            assert!(matches!(imported, ModuleExportName::String(_)));
            assert_eq!(imported.name(), "d-e");
            assert_eq!(local.name, "f");
        }
        other => panic!("{:#?}", other),
    }
}

#[test]
fn namespace_import() {
    let items = module_items("import * as ns from 'a';");
    match &items[0] {
        Statement::ImportDeclaration(import) => match &import.specifiers[..] {
            [ImportSpecifier::Namespace { span, local }] => {
                assert_eq!(local.name, "ns");
                assert_eq!(*span, Span::new(7, 14));
            }
            other => panic!("{:#?}", other),
        },
        other => panic!("{:#?}", other),
    }
}

#[test]
fn export_default_anonymous_function() {
    let items = module_items("export default function () {}");
    match &items[0] {
        Statement::ExportDefaultDeclaration(decl) => match &decl.declaration {
            ExportDefaultKind::Function(func) => assert!(func.id.is_none()),
            other => panic!("{:#?}", other),
        },
        other => panic!("{:#?}", other),
    }
}

#[test]
fn export_declaration_wraps_statement() {
    let items = module_items("export const a = 1;");
    match &items[0] {
        Statement::ExportNamedDeclaration(export) => {
            assert_eq!(export.span, Span::new(0, 19));
            assert!(export.specifiers.is_empty());
            assert!(export.source.is_none());
            assert!(matches!(
                export.declaration.as_deref(),
                Some(Statement::VariableDeclaration(VariableDeclaration {
                    kind: VariableKind::Const,
                    ..
                }))
            ));
        }
        other => panic!("{:#?}", other),
    }
}

#[test]
fn reexport_with_source() {
    let items = module_items("export { a as b, c } from 'd'; export * as e from 'f';");
    match &items[0] {
        Statement::ExportNamedDeclaration(export) => {
            let names: Vec<_> = export
                .specifiers
                .iter()
                .map(|spec| (spec.local.name(), spec.exported.name()))
                .collect();
            assert_eq!(names, vec![("a", "b"), ("c", "c")]);
            assert_eq!(export.source.as_ref().and_then(Literal::as_str), Some("d"));
        }
        other => panic!("{:#?}", other),
    }
    match &items[1] {
        Statement::ExportAllDeclaration(export) => {
            assert_eq!(export.exported.as_ref().map(ModuleExportName::name), Some("e"));
        }
        other => panic!("{:#?}", other),
    }
}

#[test]
fn module_code_is_strict() {
    assert_eq!(err("var package;", Options::MODULE), ErrorKind::StrictReservedWord("package".into()));
    assert_eq!(err("delete a;", Options::MODULE), ErrorKind::StrictDelete);
}
