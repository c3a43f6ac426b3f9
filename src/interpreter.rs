use crate::environment::Environment;
use crate::{evaluator, printer, reader, LispObject};
use derive_more::From;
use std::fmt;
use std::rc::Rc;

pub type Result = std::result::Result<LispObject, Error>;

#[derive(Debug, From)]
pub enum Error {
    Read(reader::Error),
    Eval(evaluator::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Read(e) => write!(f, "{}", e),
            Error::Eval(e) => write!(f, "{}", e),
        }
    }
}

pub fn read(line: &str) -> Result {
    reader::read_str(line).map_err(Error::Read)
}

pub fn eval(obj: &LispObject, env: &Rc<Environment>) -> Result {
    evaluator::eval(obj, env).map_err(Error::Eval)
}

/// Reads and evaluates one statement, returning the printed result if the
/// statement produced one.
pub fn rep(line: &str, env: &Rc<Environment>) -> std::result::Result<Option<String>, Error> {
    let value = eval(&read(line)?, env)?;
    match value.is_nil() {
        true => Ok(None),
        false => Ok(Some(printer::pr_str(&value))),
    }
}
