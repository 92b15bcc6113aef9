use std::cell::RefCell;
use std::rc::Rc;

use kiwi::env::Env;
use kiwi::error::{Error, ParseError, RuntimeError};
use kiwi::native::global_env;
use kiwi::object::Object;
use kiwi::parser::produce_ast;
use kiwi::run;

fn assert_value(src: &str, expected: Object) {
    match run(src, &global_env().unwrap()) {
        Ok(value) => assert_eq!(value, expected, "source: {}", src),
        Err(e) => panic!("expected success for:\n{}\nError: {}", src, e),
    }
}

fn assert_runtime_error(src: &str, expected: RuntimeError) {
    assert_eq!(run(src, &global_env().unwrap()), Err(Error::Runtime(expected)), "source: {}", src);
}

#[test]
fn precedence() {
    assert_value("2 + 3 * 4", Object::Number(14.0));
    assert_value("2 * 3 + 4", Object::Number(10.0));
    assert_value("2 * (3 + 4)", Object::Number(14.0));
    assert_value("20 / 5 % 3 - 1", Object::Number(0.0));
}

#[test]
fn programs_share_a_root_scope() {
    let env: Rc<RefCell<Env>> = global_env().unwrap();

    run("let total = 0;", &env).unwrap();
    run("fn add(n) { total = total + n }", &env).unwrap();
    run("add(3); add(4);", &env).unwrap();

    assert_eq!(run("total", &env), Ok(Object::Number(7.0)));
    assert_eq!(
        run("let total = 1;", &env),
        Err(Error::Runtime(RuntimeError::Redeclaration { name: "total".to_owned() }))
    );
}

#[test]
fn constants() {
    assert_runtime_error(
        "const x = 1; x = 2;",
        RuntimeError::ConstantAssignment { name: "x".to_owned() },
    );
    assert_eq!(
        run("const x;", &global_env().unwrap()),
        Err(Error::Parse(ParseError::UninitializedConstant { name: "x".to_owned() }))
    );
    assert_runtime_error(
        "const limit = 3; fn raise() { limit = 4 } raise()",
        RuntimeError::ConstantAssignment { name: "limit".to_owned() },
    );
}

#[test]
fn builtins() {
    assert_value("true", Object::Boolean(true));
    assert_value("false", Object::Boolean(false));
    assert_value("null", Object::Null);
    assert_value("print(1, 2)", Object::Null);
    assert_runtime_error("true = false", RuntimeError::ConstantAssignment { name: "true".to_owned() });
}

#[test]
fn objects() {
    let src = "
        let x = 1;
        let point = { x, y: 2 * 3, nested: { z: x + 1 } };
        point.nested.z + point.y + point[0]
    ";

    // point[0] is a missing key, so the sum collapses to null
    assert_value(src, Object::Null);
    assert_value("let p = { a: 4 }; p.a * p.a", Object::Number(16.0));
}

#[test]
fn higher_order_functions() {
    let src = "
        fn twice(f, x) { f(f(x)) }
        fn inc(n) { n + 1 }
        twice(inc, 5)
    ";

    assert_value(src, Object::Number(7.0));
}

#[test]
fn closures_outlive_their_call() {
    let src = "
        fn adder(step) {
            fn add(n) { n + step }
            add
        }
        const addTen = adder(10);
        const addOne = adder(1);
        addTen(addOne(5))
    ";

    assert_value(src, Object::Number(16.0));
}

#[test]
fn runtime_errors_abort_the_unit() {
    let env = global_env().unwrap();

    assert!(run("let a = 1; b; let c = 3;", &env).is_err());
    assert_eq!(run("a", &env), Ok(Object::Number(1.0)));
    assert!(run("c", &env).is_err());
}

#[test]
fn not_callable() {
    assert_runtime_error(
        "let o = {}; o.missing()",
        RuntimeError::NotCallable {
            callee: "o.missing".to_owned(),
            type_name: "null".to_owned(),
        },
    );
}

#[test]
fn reparsing_identical_input_is_stable() {
    let src = "
        const origin = { x: 0, y: 0 };
        fn move(p, dx) { { x: p.x + dx, y: p.y } }
        let q = move(origin, 3);
        q.x = q.y = 1;
        print(q.x * 2 - 1 % 4)
    ";

    let first = produce_ast(src).unwrap();
    let second = produce_ast(src).unwrap();
    assert_eq!(first, second);

    let printed = first.to_string();
    assert_eq!(produce_ast(&printed).unwrap(), first);
}

#[test]
fn unicode_identifiers() {
    assert_value("let é = 1; const größe = { é }; größe.é + é", Object::Number(2.0));
}
