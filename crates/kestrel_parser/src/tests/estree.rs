use super::*;
use crate::estree::to_estree;
use serde_json::{json, Value};

fn estree(src: &str, options: Options) -> Value {
    let program = ok(src, options);
    to_estree(&program, src, options)
}

fn first_expr(src: &str, options: Options) -> Value {
    estree(src, options)["body"][0]["expression"].clone()
}

#[test]
fn ranges() {
    assert_eq!(
        estree("a = 1;", Options::RANGES),
        json!({
            "type": "Program",
            "start": 0,
            "end": 6,
            "sourceType": "script",
            "body": [{
                "type": "ExpressionStatement",
                "start": 0,
                "end": 6,
                "expression": {
                    "type": "AssignmentExpression",
                    "start": 0,
                    "end": 5,
                    "operator": "=",
                    "left": { "type": "Identifier", "start": 0, "end": 1, "name": "a" },
                    "right": { "type": "Literal", "start": 4, "end": 5, "value": 1 },
                },
            }],
        })
    );
}

#[test]
fn positions_are_opt_in() {
    assert_eq!(
        estree("a;", Options::default()),
        json!({
            "type": "Program",
            "sourceType": "script",
            "body": [{
                "type": "ExpressionStatement",
                "expression": { "type": "Identifier", "name": "a" },
            }],
        })
    );
}

#[test]
fn literals() {
    let body = estree("10n; /a/g; 'x'; null; 1.5; 2; 1e21;", Options::RAW)["body"].clone();
    let expr = |idx: usize| body[idx]["expression"].clone();
    assert_eq!(
        expr(0),
        json!({ "type": "Literal", "value": null, "bigint": "10", "raw": "10n" })
    );
    assert_eq!(
        expr(1),
        json!({
            "type": "Literal",
            "value": null,
            "regex": { "pattern": "a", "flags": "g" },
            "raw": "/a/g",
        })
    );
    assert_eq!(expr(2), json!({ "type": "Literal", "value": "x", "raw": "'x'" }));
    assert_eq!(expr(3), json!({ "type": "Literal", "value": null, "raw": "null" }));
    assert_eq!(expr(4)["value"], json!(1.5));
    assert_eq!(expr(5)["value"], json!(2));
    assert_eq!(expr(6)["value"], json!(1e21));
}

#[test]
fn raw_needs_the_option() {
    assert_eq!(
        first_expr("'x'", Options::default()),
        json!({ "type": "Literal", "value": "x" })
    );
}

#[test]
fn directives() {
    let program = estree("'use strict'; a;", Options::default());
    assert_eq!(
        program["body"][0],
        json!({
            "type": "ExpressionStatement",
            "expression": { "type": "Literal", "value": "use strict" },
            "directive": "use strict",
        })
    );
    assert_eq!(program["body"][1].get("directive"), None);
}

#[test]
fn loc_uses_lines_and_utf16_columns() {
    let program = estree("a;\r\n'😀'; b", Options::LOC);
    assert_eq!(
        program["body"][0]["loc"],
        json!({ "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 2 } })
    );
    assert_eq!(
        program["body"][2]["expression"]["loc"],
        json!({ "start": { "line": 2, "column": 6 }, "end": { "line": 2, "column": 7 } })
    );
    assert_eq!(program["body"][0].get("start"), None);
}

#[test]
fn functions_and_arrows() {
    assert_eq!(
        first_expr("(a) => a", Options::default()),
        json!({
            "type": "ArrowFunctionExpression",
            "id": null,
            "expression": true,
            "generator": false,
            "async": false,
            "params": [{ "type": "Identifier", "name": "a" }],
            "body": { "type": "Identifier", "name": "a" },
        })
    );
    assert_eq!(
        estree("async function* f() {}", Options::default())["body"][0],
        json!({
            "type": "FunctionDeclaration",
            "id": { "type": "Identifier", "name": "f" },
            "expression": false,
            "generator": true,
            "async": true,
            "params": [],
            "body": { "type": "BlockStatement", "body": [] },
        })
    );
}

#[test]
fn templates() {
    assert_eq!(
        first_expr("`a${b}`", Options::RANGES),
        json!({
            "type": "TemplateLiteral",
            "start": 0,
            "end": 7,
            "quasis": [
                {
                    "type": "TemplateElement",
                    "start": 1,
                    "end": 2,
                    "value": { "raw": "a", "cooked": "a" },
                    "tail": false,
                },
                {
                    "type": "TemplateElement",
                    "start": 6,
                    "end": 6,
                    "value": { "raw": "", "cooked": "" },
                    "tail": true,
                },
            ],
            "expressions": [{ "type": "Identifier", "start": 4, "end": 5, "name": "b" }],
        })
    );
}

#[test]
fn optional_chain() {
    assert_eq!(
        first_expr("a?.b", Options::default()),
        json!({
            "type": "ChainExpression",
            "expression": {
                "type": "MemberExpression",
                "object": { "type": "Identifier", "name": "a" },
                "property": { "type": "Identifier", "name": "b" },
                "computed": false,
                "optional": true,
            },
        })
    );
}

#[test]
fn patterns() {
    let decl = estree("let [a, , ...b] = c;", Options::default())["body"][0].clone();
    assert_eq!(decl["kind"], json!("let"));
    assert_eq!(
        decl["declarations"][0]["id"],
        json!({
            "type": "ArrayPattern",
            "elements": [
                { "type": "Identifier", "name": "a" },
                null,
                { "type": "RestElement", "argument": { "type": "Identifier", "name": "b" } },
            ],
        })
    );
}

#[test]
fn module_items() {
    let program = estree("import a from 'b'; export default a;", Options::MODULE);
    assert_eq!(program["sourceType"], json!("module"));
    assert_eq!(
        program["body"][0],
        json!({
            "type": "ImportDeclaration",
            "specifiers": [{
                "type": "ImportDefaultSpecifier",
                "local": { "type": "Identifier", "name": "a" },
            }],
            "source": { "type": "Literal", "value": "b" },
        })
    );
    assert_eq!(
        program["body"][1],
        json!({
            "type": "ExportDefaultDeclaration",
            "declaration": { "type": "Identifier", "name": "a" },
        })
    );
}

#[test]
fn classes() {
    let class = estree("class A extends B { static m() {} f = 1; }", Options::default())["body"][0].clone();
    assert_eq!(class["type"], json!("ClassDeclaration"));
    assert_eq!(class["superClass"], json!({ "type": "Identifier", "name": "B" }));
    let members = &class["body"]["body"];
    assert_eq!(members[0]["type"], json!("MethodDefinition"));
    assert_eq!(members[0]["kind"], json!("method"));
    assert_eq!(members[0]["static"], json!(true));
    assert_eq!(members[0]["value"]["type"], json!("FunctionExpression"));
    assert_eq!(members[1]["type"], json!("PropertyDefinition"));
    assert_eq!(members[1]["value"], json!({ "type": "Literal", "value": 1 }));
}

#[test]
fn private_names_and_static_blocks() {
    let src = "class A { #x = 1; static { this.#x; } has(o) { return #x in o; } }";
    let members = estree(src, Options::default())["body"][0]["body"]["body"].clone();
    let private_x = json!({ "type": "PrivateIdentifier", "name": "x" });

    assert_eq!(members[0]["type"], json!("PropertyDefinition"));
    assert_eq!(members[0]["key"], private_x);
    assert_eq!(members[0]["computed"], json!(false));

    assert_eq!(
        members[1],
        json!({
            "type": "StaticBlock",
            "body": [{
                "type": "ExpressionStatement",
                "expression": {
                    "type": "MemberExpression",
                    "object": { "type": "ThisExpression" },
                    "property": private_x,
                    "computed": false,
                    "optional": false,
                },
            }],
        })
    );

    let test = &members[2]["value"]["body"]["body"][0]["argument"];
    assert_eq!(test["type"], json!("BinaryExpression"));
    assert_eq!(test["operator"], json!("in"));
    assert_eq!(test["left"], private_x);
}

#[test]
fn private_name_ranges_include_the_hash() {
    let src = "class A { #x; }";
    let key = estree(src, Options::RANGES)["body"][0]["body"]["body"][0]["key"].clone();
    assert_eq!(
        key,
        json!({ "type": "PrivateIdentifier", "start": 10, "end": 12, "name": "x" })
    );
}
