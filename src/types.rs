use crate::environment::Environment;
use crate::evaluator;
use crate::tokens::QUOTE_MARKER;
use derive_more::Deref;
use itertools::Itertools;
use std::fmt;
use std::fmt::Formatter;
use std::ops::RangeInclusive;
use std::rc::Rc;

pub type LispInt = i64;
pub type LispFloat = f64;

#[derive(Deref, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol(String::from(name))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arity(pub RangeInclusive<usize>);

#[derive(Debug)]
pub struct BadArgCount {
    name: String,
    expected: Arity,
    got: usize,
}

impl fmt::Display for BadArgCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "When evaluating {} expected {} arguments, but received {} arguments",
            self.name, self.expected, self.got
        )
    }
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self(n..=n)
    }

    pub(crate) const fn at_least(n: usize) -> Self {
        Self(n..=usize::MAX)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        self.0.contains(&n)
    }

    pub(crate) fn validate_for(&self, n: usize, name: &str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name: name.to_string(),
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.start() == self.0.end() {
            write!(f, "exactly {}", self.0.start())
        } else if *self.0.end() == usize::MAX {
            write!(f, "at least {}", self.0.start())
        } else {
            write!(f, "from {} to {}", self.0.start(), self.0.end())
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[LispObject]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

#[derive(Clone, Debug)]
pub struct ClosureParameters(pub Vec<Symbol>);

impl fmt::Display for ClosureParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(" "))
    }
}

impl ClosureParameters {
    pub fn arity(&self) -> Arity {
        Arity::exactly(self.0.len())
    }
}

#[derive(Clone)]
pub struct Closure {
    pub parameters: ClosureParameters,
    pub body: LispObject,
    pub parent: Rc<Environment>,
}

impl fmt::Debug for Closure {
    // Not derived because we want to skip the parent: the parent may well contain this Closure!
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {:?}}}",
            self.parameters, self.body
        )
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#<closure {}>", self.parameters)
    }
}

/// Both the expression tree produced by the reader and the values produced by
/// evaluation. Quotation hands expressions back as data, so one type serves.
#[derive(Debug, Clone)]
pub enum LispObject {
    /// The "no result" outcome of `define` and of a `cond` with no match.
    Nil,
    Integer(LispInt),
    Float(LispFloat),
    Bool(bool),
    Symbol(Symbol),
    List(Rc<Vec<LispObject>>),
    Primitive(&'static PrimitiveFn),
    Closure(Rc<Closure>),
}

pub(crate) fn truthy(obj: &LispObject) -> bool {
    use LispObject::*;
    match obj {
        Nil => false,
        Bool(b) => *b,
        Integer(x) => *x != 0,
        Float(x) => *x != 0.0,
        List(elements) => !elements.is_empty(),
        Symbol(_) | Primitive(_) | Closure(_) => true,
    }
}

#[derive(Debug)]
pub enum TypeMismatch {
    NotANumber,
    NotAList,
    NotASymbol,
    NotCallable,
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let description = match self {
            TypeMismatch::NotANumber => "expected a number",
            TypeMismatch::NotAList => "expected a list",
            TypeMismatch::NotASymbol => "expected a symbol",
            TypeMismatch::NotCallable => "expected a procedure",
        };
        write!(f, "{}", description)
    }
}

impl LispObject {
    pub(crate) fn as_list(&self) -> Result<&[LispObject], TypeMismatch> {
        match self {
            LispObject::List(x) => Ok(x),
            _ => Err(TypeMismatch::NotAList),
        }
    }

    pub(crate) fn as_symbol(&self) -> Result<&Symbol, TypeMismatch> {
        match self {
            LispObject::Symbol(s) => Ok(s),
            _ => Err(TypeMismatch::NotASymbol),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, LispObject::Nil)
    }

    pub(crate) fn is_atom(&self) -> bool {
        use LispObject::*;
        matches!(self, Integer(_) | Float(_) | Symbol(_))
    }

    pub(crate) fn is_symbol_named(&self, name: &str) -> bool {
        match self {
            LispObject::Symbol(s) => s.as_ref() == name,
            _ => false,
        }
    }

    pub(crate) fn is_quote_marker(&self) -> bool {
        self.is_symbol_named(QUOTE_MARKER)
    }

    pub fn wrap_list(elements: Vec<LispObject>) -> Self {
        Self::List(Rc::new(elements))
    }

    pub fn new_symbol(name: &str) -> Self {
        Self::Symbol(Symbol::from(name))
    }
}

impl From<LispInt> for LispObject {
    fn from(x: LispInt) -> Self {
        LispObject::Integer(x)
    }
}

impl From<LispFloat> for LispObject {
    fn from(x: LispFloat) -> Self {
        LispObject::Float(x)
    }
}

impl From<bool> for LispObject {
    fn from(b: bool) -> Self {
        LispObject::Bool(b)
    }
}

impl From<&str> for LispObject {
    fn from(name: &str) -> Self {
        LispObject::new_symbol(name)
    }
}

impl From<Vec<LispObject>> for LispObject {
    fn from(elements: Vec<LispObject>) -> Self {
        LispObject::wrap_list(elements)
    }
}

/// Builds a list object from anything convertible, e.g. `list![1, 2, "+"]`.
#[macro_export]
macro_rules! list {
    ($($element:expr),* $(,)?) => {
        $crate::types::LispObject::wrap_list(vec![$($crate::types::LispObject::from($element)),*])
    };
}

impl PartialEq for LispObject {
    fn eq(&self, other: &Self) -> bool {
        use LispObject::*;
        match (self, other) {
            (Integer(x), Integer(y)) => x == y,
            (Float(x), Float(y)) => x == y,
            (Integer(x), Float(y)) | (Float(y), Integer(x)) => (*x as LispFloat) == *y,
            (Bool(x), Bool(y)) => x == y,
            (Symbol(x), Symbol(y)) => x == y,
            (List(xs), List(ys)) => equal_sequences(xs, ys),
            (Primitive(f), Primitive(g)) => f.name == g.name,
            (Closure(f), Closure(g)) => Rc::ptr_eq(f, g),
            (Nil, Nil) => true,
            (_, _) => false,
        }
    }
}

fn equal_sequences(xs: &[LispObject], ys: &[LispObject]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| x == y)
}
