use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use crate::interpreter::object::Object;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    Mutable,
    Constant,
}

/// Why a reassignment was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReassignError {
    NotFound,
    Constant,
}

#[derive(Clone, Debug)]
struct Binding {
    value: Object,
    mutability: Mutability,
}

/// One scope frame. Frames form a chain through `outer`; function calls push
/// a new frame whose outer link is the frame the function was defined in,
/// not the caller's.
#[derive(Debug)]
pub struct Environment {
    store: HashMap<String, Binding>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new_global() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: None,
        }))
    }

    pub fn new_with_outer(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(binding) => Some(binding.value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Binds in the current frame only, shadowing any outer binding of the
    /// same name. Redefining a name in the same frame overwrites it.
    pub fn define(&mut self, name: String, value: Object, mutability: Mutability) {
        self.store.insert(name, Binding { value, mutability });
    }

    /// Mutates the binding in its defining frame, walking outward to find it.
    pub fn reassign(&mut self, name: &str, value: Object) -> Result<(), ReassignError> {
        if let Some(binding) = self.store.get_mut(name) {
            if binding.mutability == Mutability::Constant {
                return Err(ReassignError::Constant);
            }

            binding.value = value;
            return Ok(());
        }

        match &self.outer {
            Some(outer) => outer.borrow_mut().reassign(name, value),
            None => Err(ReassignError::NotFound),
        }
    }
}
