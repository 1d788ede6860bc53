use crate::ast::*;
use crate::{parse, ErrorKind, Options, Span};

/// Generate one test per source text, every text must parse under the given options.
macro_rules! parse_ok {
    ($options:expr => { $($name:ident: $src:expr),* $(,)? }) => {
        $(
            #[test]
            fn $name() {
                if let Err(err) = crate::parse($src, $options) {
                    panic!("{:?} failed to parse: {}", $src, err);
                }
            }
        )*
    };
}

/// Generate one test per source text, every text must fail with an error matching the pattern.
macro_rules! parse_err {
    ($options:expr => { $($name:ident: $src:expr => $kind:pat),* $(,)? }) => {
        $(
            #[test]
            fn $name() {
                match crate::parse($src, $options) {
                    Ok(program) => panic!("{:?} parsed, but an error was expected: {:#?}", $src, program),
                    Err(err) => assert!(
                        matches!(err.kind, $kind),
                        "unexpected error for {:?}: {:?}",
                        $src,
                        err.kind
                    ),
                }
            }
        )*
    };
}

mod estree;
mod exprs;
mod modules;
mod stmts;

pub fn ok(src: &str, options: Options) -> Program {
    match parse(src, options) {
        Ok(program) => program,
        Err(err) => panic!("{:?} failed to parse: {}", src, err),
    }
}

pub fn err(src: &str, options: Options) -> ErrorKind {
    match parse(src, options) {
        Ok(program) => panic!("{:?} parsed, but an error was expected: {:#?}", src, program),
        Err(err) => err.kind,
    }
}

/// The expression of the only statement of `src`.
pub fn single_expr(src: &str) -> Expression {
    let mut program = ok(src, Options::default());
    assert_eq!(program.body.len(), 1, "expected a single statement in {:?}", src);
    match program.body.remove(0) {
        Statement::Expression(stmt) => stmt.expression,
        other => panic!("expected an expression statement, found {:#?}", other),
    }
}

#[test]
fn identical_inputs_give_identical_results() {
    let src = "function f(a, b = 1) { return a ** b; }\nlet [x, , y] = z;";
    assert_eq!(parse(src, Options::default()), parse(src, Options::default()));
    let bad = "let a; let a;";
    assert_eq!(parse(bad, Options::default()), parse(bad, Options::default()));
}

#[test]
fn program_source_type() {
    assert_eq!(ok("", Options::default()).source_type, SourceType::Script);
    assert_eq!(ok("", Options::MODULE).source_type, SourceType::Module);
}
