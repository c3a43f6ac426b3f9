use crate::environment::Environment;
use crate::evaluator::{eval, Error, Result};
use crate::types::{truthy, Arity, Closure, ClosureParameters, LispObject, Symbol};
use std::fmt;
use std::rc::Rc;

/// What a list does, decided by the keyword in its final position.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Form {
    Quote,
    Cond,
    Define,
    Lambda,
    Apply,
}

impl Form {
    pub fn classify(keyword: &LispObject) -> Self {
        match keyword {
            LispObject::Symbol(name) => match name.as_ref() {
                "quote" | "'" => Form::Quote,
                "cond" => Form::Cond,
                "define" => Form::Define,
                "lambda" => Form::Lambda,
                _ => Form::Apply,
            },
            _ => Form::Apply,
        }
    }
}

#[derive(Debug)]
pub enum FormError {
    DefineTargetNotASymbol,
    ParametersNotGivenAsList,
    ParameterNotASymbol,
    CondClauseNotAList,
    EmptyCondClause,
    EmptyCondBranch,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            FormError::DefineTargetNotASymbol => "define: can only bind a symbol",
            FormError::ParametersNotGivenAsList => {
                "lambda: parameters must be a symbol or a list of symbols"
            }
            FormError::ParameterNotASymbol => "lambda: every parameter must be a symbol",
            FormError::CondClauseNotAList => "cond: every clause must be a list",
            FormError::EmptyCondClause => "cond: clause has no condition",
            FormError::EmptyCondBranch => "cond: clause has no branch before its condition",
        };
        write!(f, "{}", description)
    }
}

/// A trailing `'` operand marks the others as literal data.
pub(crate) fn strip_quote_marker(operands: &[LispObject]) -> Option<&[LispObject]> {
    match operands.split_last() {
        Some((last, rest)) if last.is_quote_marker() => Some(rest),
        _ => None,
    }
}

pub fn apply_quote(operands: &[LispObject]) -> Result {
    let operands = strip_quote_marker(operands).unwrap_or(operands);
    Arity::at_least(1)
        .validate_for(operands.len(), "quote")
        .map_err(Error::BadArgCount)?;
    match operands {
        [datum] => Ok(datum.clone()),
        _ => Ok(LispObject::wrap_list(operands.to_vec())),
    }
}

pub fn apply_cond(clauses: &[LispObject], env: &Rc<Environment>) -> Result {
    for clause in clauses {
        let clause = clause
            .as_list()
            .or(Err(Error::BadForm(FormError::CondClauseNotAList)))?;
        let (condition, branch) = clause
            .split_last()
            .ok_or(Error::BadForm(FormError::EmptyCondClause))?;
        if branch.is_empty() {
            return Err(Error::BadForm(FormError::EmptyCondBranch));
        }
        if condition.is_symbol_named("else") || truthy(&eval(condition, env)?) {
            log::trace!("cond matched clause with condition {}", condition);
            return match branch {
                [single] => eval(single, env),
                _ => eval(&LispObject::wrap_list(branch.to_vec()), env),
            };
        }
    }
    Ok(LispObject::Nil)
}

pub fn apply_define(operands: &[LispObject], env: &Rc<Environment>) -> Result {
    Arity::exactly(2)
        .validate_for(operands.len(), "define")
        .map_err(Error::BadArgCount)?;
    let key = operands[0]
        .as_symbol()
        .or(Err(Error::BadForm(FormError::DefineTargetNotASymbol)))?;
    let value = eval(&operands[1], env)?;
    log::debug!("define {} as {}", key, value);
    env.define(key.clone(), value)?;
    Ok(LispObject::Nil)
}

pub fn apply_lambda(operands: &[LispObject], env: &Rc<Environment>) -> Result {
    // We expect exactly two operands: the parameters, then the body. The
    // parameters are either one bare symbol or a list of symbols.
    Arity::exactly(2)
        .validate_for(operands.len(), "lambda")
        .map_err(Error::BadArgCount)?;
    let (parameters, body) = (&operands[0], &operands[1]);
    let parameters = match parameters {
        LispObject::Symbol(s) => vec![s.clone()],
        LispObject::List(symbols) => symbols
            .iter()
            .map(|obj| obj.as_symbol().map(Symbol::clone))
            .collect::<std::result::Result<Vec<_>, _>>()
            .or(Err(Error::BadForm(FormError::ParameterNotASymbol)))?,
        _ => return Err(Error::BadForm(FormError::ParametersNotGivenAsList)),
    };
    let closure = Closure {
        parameters: ClosureParameters(parameters),
        body: body.clone(),
        parent: env.clone(),
    };
    log::debug!("created {}", closure);
    Ok(LispObject::Closure(Rc::new(closure)))
}
