use crate::builtins;
use crate::environment::{Environment, Redefinition, UnboundSymbol};
use crate::special_forms::{self, strip_quote_marker, Form, FormError};
use crate::types::{BadArgCount, Closure, LispObject, PrimitiveFn, Symbol, TypeMismatch};
use derive_more::From;
use itertools::Itertools;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

pub type Result<T = LispObject> = std::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    UnboundSymbol(UnboundSymbol),
    Redefinition(Redefinition),
    BadArgCount(BadArgCount),
    #[from(ignore)]
    BadIndex(usize, Range<usize>),
    #[from(ignore)]
    DivideByZero,
    #[from(ignore)]
    IntegerOverflow(&'static str),
    TypeMismatch(TypeMismatch),
    BadForm(FormError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnboundSymbol(UnboundSymbol(s)) => write!(f, "'{}' not found", s),
            Error::Redefinition(Redefinition(s)) => {
                write!(f, "'{}' is already defined in this scope", s)
            }
            Error::BadArgCount(e) => write!(f, "{}", e),
            Error::BadIndex(i, r) => {
                write!(f, "bad index: {} not in range [{}, {})", i, r.start, r.end)
            }
            Error::DivideByZero => write!(f, "cannot divide by zero!"),
            Error::IntegerOverflow(op) => write!(f, "integer overflow in {}", op),
            Error::TypeMismatch(e) => write!(f, "type mismatch: {}", e),
            Error::BadForm(e) => write!(f, "bad syntax: {}", e),
        }
    }
}

/// Evaluates `ast` in `env`. Only `define` mutates `env`.
pub fn eval(ast: &LispObject, env: &Rc<Environment>) -> Result {
    use LispObject::{List, Symbol};
    log::trace!("eval {}", ast);
    match ast {
        Symbol(s) => resolve(s, env),
        // The keyword sits at the end of the list; everything before it is an operand.
        List(argv) => match argv.split_last() {
            None => Ok(ast.clone()),
            Some((keyword, operands)) => dispatch(keyword, operands, env),
        },
        _ => Ok(ast.clone()),
    }
}

fn dispatch(keyword: &LispObject, operands: &[LispObject], env: &Rc<Environment>) -> Result {
    match Form::classify(keyword) {
        Form::Quote => special_forms::apply_quote(operands),
        Form::Cond => special_forms::apply_cond(operands, env),
        Form::Define => special_forms::apply_define(operands, env),
        Form::Lambda => special_forms::apply_lambda(operands, env),
        Form::Apply => {
            let callable = eval(keyword, env)?;
            let args = match strip_quote_marker(operands) {
                Some(quoted) => quoted.to_vec(),
                None => evaluate_sequence_elementwise(operands, env)?,
            };
            log::trace!("apply {} to {}", callable, pretty_print_args(&args));
            apply(&callable, &args)
        }
    }
}

/// Frames are searched innermost first; the built-ins answer for any name no
/// frame binds.
fn resolve(symbol: &Symbol, env: &Rc<Environment>) -> Result {
    match env.fetch(symbol) {
        Ok(value) => Ok(value),
        Err(unbound) => builtins::lookup(symbol)
            .map(LispObject::Primitive)
            .ok_or(Error::UnboundSymbol(unbound)),
    }
}

pub fn evaluate_sequence_elementwise(
    seq: &[LispObject],
    env: &Rc<Environment>,
) -> Result<Vec<LispObject>> {
    seq.iter().map(|obj| eval(obj, env)).collect()
}

pub fn apply(callable: &LispObject, args: &[LispObject]) -> Result {
    match callable {
        LispObject::Primitive(f) => call_primitive(f, args),
        LispObject::Closure(f) => call_closure(f, args),
        _ => Err(Error::TypeMismatch(TypeMismatch::NotCallable)),
    }
}

pub(crate) fn pretty_print_args(args: &[LispObject]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub fn call_primitive(func: &PrimitiveFn, args: &[LispObject]) -> Result {
    func.arity
        .validate_for(args.len(), func.name)
        .map_err(Error::BadArgCount)?;
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

fn call_closure(func: &Closure, args: &[LispObject]) -> Result {
    let env = make_closure_env(func, args)?;
    eval(&func.body, &env)
}

fn make_closure_env(func: &Closure, args: &[LispObject]) -> Result<Rc<Environment>> {
    log::trace!("Call {} with {}", func, pretty_print_args(args));
    func.parameters
        .arity()
        .validate_for(args.len(), "closure")
        .map_err(Error::BadArgCount)?;
    let env = Environment::spawn_from(&func.parent);
    for (key, value) in func.parameters.0.iter().zip(args) {
        env.define(key.clone(), value.clone())?;
    }
    log::trace!("closure env: {}", env);
    Ok(env)
}
