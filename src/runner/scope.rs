use std::{cell::RefCell, ops::Deref, rc::Rc};

use rustc_hash::FxHashMap as HashMap;

use crate::value::Value;

#[derive(Debug)]
pub struct ScopeInner {
    pub bindings: RefCell<HashMap<String, Value>>,
    pub parent: Option<Scope>,
}

impl ScopeInner {
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }

        if let Some(parent) = &self.parent {
            return parent.get(name);
        }

        None
    }

    /// Rebinds `name` in the nearest scope that defines it.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return true;
        }

        if let Some(parent) = &self.parent {
            return parent.assign(name, value);
        }

        false
    }
}

#[derive(Debug, Clone)]
pub struct Scope(pub Rc<ScopeInner>);

impl Scope {
    pub fn new_global() -> Self {
        Self(Rc::new(ScopeInner {
            bindings: RefCell::new(HashMap::default()),
            parent: None,
        }))
    }

    /// Suite scopes enclose their parent suite; a case's fixture scope
    /// encloses its innermost suite.
    pub fn new_enclosed(&self) -> Self {
        Self(Rc::new(ScopeInner {
            bindings: RefCell::new(HashMap::default()),
            parent: Some(self.clone()),
        }))
    }
}

impl Deref for Scope {
    type Target = ScopeInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
