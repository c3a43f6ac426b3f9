use crate::types::LispObject;
use itertools::Itertools;
use std::fmt;

/// Renders an object as text the reader accepts again, where possible.
pub fn pr_str(object: &LispObject) -> String {
    match object {
        LispObject::Nil => String::from("nil"),
        LispObject::Integer(value) => value.to_string(),
        // Debug keeps the fractional part, so 1.0 does not come back as the integer 1.
        LispObject::Float(value) => format!("{:?}", value),
        LispObject::Bool(true) => String::from("#t"),
        LispObject::Bool(false) => String::from("#f"),
        LispObject::Symbol(name) => name.to_string(),
        LispObject::List(elements) => format!("({})", elements.iter().map(pr_str).join(" ")),
        LispObject::Primitive(f) => format!("#<primitive {}>", f.name),
        LispObject::Closure(c) => c.to_string(),
    }
}

impl fmt::Display for LispObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", pr_str(self))
    }
}
