use crate::types::{LispObject, Symbol};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// One lexical frame. Frames are shared through `Rc` so that a closure can
/// keep its defining frame alive after the call that created it returns.
#[derive(Default)]
pub struct Environment {
    data: RefCell<HashMap<Symbol, LispObject>>,
    outer: Option<Rc<Environment>>,
}

#[derive(Debug, PartialEq)]
pub struct UnboundSymbol(pub Symbol);

#[derive(Debug, PartialEq)]
pub struct Redefinition(pub Symbol);

impl Environment {
    pub fn spawn_from(outer: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            data: RefCell::new(HashMap::new()),
            outer: Some(outer.clone()),
        })
    }

    /// Binds `key` in this frame only. Bindings in outer frames may be
    /// shadowed; a binding already in this frame may not be replaced.
    pub fn define<T>(&self, key: T, value: LispObject) -> Result<(), Redefinition>
    where
        T: Into<Symbol>,
    {
        let key = key.into();
        let mut data = self.data.borrow_mut();
        if data.contains_key(&key) {
            return Err(Redefinition(key));
        }
        data.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &Symbol) -> Option<LispObject> {
        match self.data.borrow().get(key) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    pub fn fetch(&self, key: &Symbol) -> Result<LispObject, UnboundSymbol> {
        self.get(key).ok_or_else(|| UnboundSymbol(key.clone()))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        let mut names: Vec<_> = data.keys().map(|s| s.0.as_str()).collect();
        names.sort_unstable();
        write!(f, "{{{}}}", names.join(" "))?;
        if let Some(outer) = &self.outer {
            write!(f, " -> {}", outer)?;
        }
        Ok(())
    }
}
