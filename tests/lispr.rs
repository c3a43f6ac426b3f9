use lispr::environment::Environment;
use lispr::evaluator;
use lispr::interpreter::{self, eval, read, rep};
use lispr::{list, LispObject};
use std::rc::Rc;

fn global() -> Rc<Environment> {
    Rc::new(Environment::default())
}

fn run(source: &str, env: &Rc<Environment>) -> interpreter::Result {
    eval(&read(source)?, env)
}

fn eval_error(source: &str, env: &Rc<Environment>) -> evaluator::Error {
    match run(source, env) {
        Err(interpreter::Error::Eval(e)) => e,
        other => panic!("expected an evaluation error from {}, got {:?}", source, other),
    }
}

#[test]
fn define_binds_in_the_given_environment() {
    let env = global();
    assert_eq!(eval(&list!["a", 1, "define"], &env).unwrap(), LispObject::Nil);
    assert_eq!(run("a", &env).unwrap(), LispObject::Integer(1));
    assert_eq!(run("(a 2 *)", &env).unwrap(), LispObject::Integer(2));
}

#[test]
fn redefinition_is_rejected() {
    let env = global();
    run("(a 1 define)", &env).unwrap();
    assert!(matches!(
        eval_error("(a 2 define)", &env),
        evaluator::Error::Redefinition(_)
    ));
    assert_eq!(run("a", &env).unwrap(), LispObject::Integer(1));
}

#[test]
fn define_needs_exactly_two_operands() {
    assert!(matches!(
        eval_error("(a define)", &global()),
        evaluator::Error::BadArgCount(_)
    ));
    assert!(matches!(
        eval_error("(a 1 2 define)", &global()),
        evaluator::Error::BadArgCount(_)
    ));
}

#[test]
fn lambda_needs_parameters_and_a_body() {
    let env = global();
    assert!(matches!(
        eval_error("(x lambda)", &env),
        evaluator::Error::BadArgCount(_)
    ));
    assert!(matches!(
        eval_error("(x (x x *) x lambda)", &env),
        evaluator::Error::BadArgCount(_)
    ));
}

#[test]
fn builtins_check_their_arity() {
    let env = global();
    assert!(matches!(
        eval_error("(1 2 3 +)", &env),
        evaluator::Error::BadArgCount(_)
    ));
    assert!(matches!(
        eval_error("(1 -)", &env),
        evaluator::Error::BadArgCount(_)
    ));
    assert!(matches!(
        eval_error("((1 2) (3 4) ' car)", &env),
        evaluator::Error::BadArgCount(_)
    ));
}

#[test]
fn recursive_procedures() {
    let env = global();
    run(
        "(fact (n ((1 (1 n eq?)) ((((n 1 -) fact) n *) else) cond) lambda) define)",
        &env,
    )
    .unwrap();
    assert_eq!(run("(5 fact)", &env).unwrap(), LispObject::Integer(120));
    assert_eq!(run("(1 fact)", &env).unwrap(), LispObject::Integer(1));
}

#[test]
fn integer_overflow_is_reported() {
    let env = global();
    assert!(matches!(
        eval_error("(9223372036854775807 1 +)", &env),
        evaluator::Error::IntegerOverflow(_)
    ));
    assert!(matches!(
        read("(99999999999999999999 1 -)"),
        Err(interpreter::Error::Read(_))
    ));
}

#[test]
fn equality() {
    let env = global();
    assert_eq!(run("(1 1 eq?)", &env).unwrap(), LispObject::Bool(true));
    assert_eq!(run("(1 2 eq?)", &env).unwrap(), LispObject::Bool(false));
    assert_eq!(run("((1 2 +) 3 eq?)", &env).unwrap(), LispObject::Bool(true));
    assert_eq!(
        run("((5 (5 5 /) *) 5 eq?)", &env).unwrap(),
        LispObject::Bool(true)
    );
}

#[test]
fn list_primitives() {
    let env = global();
    assert_eq!(run("(1 2 cons)", &env).unwrap(), list![1, 2]);
    assert_eq!(run("((1 2) ' car)", &env).unwrap(), LispObject::Integer(1));
    assert_eq!(run("((1 2) ' cdr)", &env).unwrap(), LispObject::Integer(2));
    assert_eq!(run("((1 2 3) ' cdr)", &env).unwrap(), list![2, 3]);
    assert!(matches!(
        eval_error("(() ' car)", &env),
        evaluator::Error::BadIndex(..)
    ));
}

#[test]
fn atom_test() {
    let env = global();
    assert_eq!(run("(1 atom?)", &env).unwrap(), LispObject::Bool(true));
    assert_eq!(run("((1 2) ' atom?)", &env).unwrap(), LispObject::Bool(false));
}

#[test]
fn quotation_returns_data() {
    let env = global();
    assert_eq!(
        eval(&list![list![1, 2], "'", "quote"], &env).unwrap(),
        list![1, 2]
    );
    assert_eq!(run("((1 2 +) ' quote)", &env).unwrap(), list![1, 2, "+"]);
    assert_eq!(run("(x ')", &env).unwrap(), LispObject::new_symbol("x"));
}

#[test]
fn cond_takes_the_first_true_clause() {
    let env = global();
    let clauses = list![
        list!["one", "'", list![1, 2, "eq?"]],
        list!["two", "'", list![1, 1, "eq?"]],
        "cond"
    ];
    assert_eq!(eval(&clauses, &env).unwrap(), LispObject::new_symbol("two"));
}

#[test]
fn cond_else_and_no_match() {
    let env = global();
    assert_eq!(
        run(
            "((one ' (1 2 eq?)) (two ' (2 3 eq?)) (three ' else) cond)",
            &env
        )
        .unwrap(),
        LispObject::new_symbol("three")
    );
    assert_eq!(
        run("((one ' (1 2 eq?)) (two ' (2 3 eq?)) cond)", &env).unwrap(),
        LispObject::Nil
    );
    assert_eq!(run("((10 (1 1 eq?)) cond)", &env).unwrap(), LispObject::Integer(10));
}

#[test]
fn closures_bind_parameters_at_call_time() {
    let env = global();
    run("(x 100 define)", &env).unwrap();
    run("(square (x (x x *) lambda) define)", &env).unwrap();
    assert_eq!(run("(5 square)", &env).unwrap(), LispObject::Integer(25));
    assert_eq!(run("x", &env).unwrap(), LispObject::Integer(100));
}

#[test]
fn closures_capture_their_defining_environment() {
    let env = global();
    run("(y 10 define)", &env).unwrap();
    run("(add-y (n (n y +) lambda) define)", &env).unwrap();
    assert_eq!(run("(5 add-y)", &env).unwrap(), LispObject::Integer(15));
}

#[test]
fn division_by_zero_propagates() {
    assert!(matches!(
        eval_error("(1 (2 2 -) /)", &global()),
        evaluator::Error::DivideByZero
    ));
}

#[test]
fn syntax_errors() {
    assert!(matches!(
        read("((1 2 +)"),
        Err(interpreter::Error::Read(_))
    ));
    assert!(matches!(read(")"), Err(interpreter::Error::Read(_))));
}

#[test]
fn rep_prints_only_real_results() {
    let env = global();
    assert_eq!(rep("(sq (x (x x *) lambda) define)", &env).unwrap(), None);
    assert_eq!(rep("(3 sq)", &env).unwrap(), Some(String::from("9")));
    assert_eq!(rep("(1 2 /)", &env).unwrap(), Some(String::from("0.5")));
    assert_eq!(rep("((1 2) ' quote)", &env).unwrap(), Some(String::from("(1 2)")));
    assert!(rep("missing", &env).is_err());
}
