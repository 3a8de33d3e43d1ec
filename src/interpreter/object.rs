use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;
use ordered_float::OrderedFloat;
use crate::interpreter::ast::Block;
use crate::interpreter::builtins::Builtin;
use crate::interpreter::environment::Environment;
use crate::interpreter::lexer::Token;

#[cfg(test)]
mod tests;

/// Runtime value of the interpreter. `ReturnValue` and `Error` are control
/// signals rather than user-visible values; the evaluator unwraps the former
/// at function boundaries and short-circuits on the latter.
#[derive(Clone, Debug)]
pub enum Object {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Null,
    ReturnValue(Box<Object>),
    Error(String),
    Function(Rc<Function>),
    Builtin(&'static Builtin),
    Array(Vec<Object>),
    Dictionary(Dictionary),
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Float(_) => ObjectType::Float,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Null => ObjectType::Null,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::Array(_) => ObjectType::Array,
            Object::Dictionary(_) => ObjectType::Dictionary,
        }
    }

    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(value) => value.to_string(),
            Object::Float(value) => format!("{:?}", value),
            Object::Boolean(value) => value.to_string(),
            Object::String(value) => value.clone(),
            Object::Null => String::from("null"),
            Object::ReturnValue(value) => value.inspect(),
            Object::Error(message) => format!("Error: {}", message),
            Object::Function(function) => function.inspect(),
            Object::Builtin(_) => String::from("builtin function"),
            Object::Array(elements) => {
                let elements: Vec<String> = elements.iter()
                    .map(|element| element.inspect()).collect();

                format!("[{}]", elements.join(", "))
            },
            Object::Dictionary(dictionary) => dictionary.inspect(),
        }
    }

    /// Content hash for dictionary keys. Only scalar values hash; everything
    /// else returns `None` and the evaluator reports it as unusable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::Float(value) => Some(HashKey::Float(OrderedFloat(*value))),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            Object::String(value) => Some(HashKey::String(value.clone())),
            _ => None,
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Integer(left), Object::Integer(right)) => left == right,
            (Object::Float(left), Object::Float(right)) => left == right,
            (Object::Boolean(left), Object::Boolean(right)) => left == right,
            (Object::String(left), Object::String(right)) => left == right,
            (Object::Null, Object::Null) => true,
            (Object::ReturnValue(left), Object::ReturnValue(right)) => left == right,
            (Object::Error(left), Object::Error(right)) => left == right,
            // Functions and builtins compare by identity
            (Object::Function(left), Object::Function(right)) => Rc::ptr_eq(left, right),
            (Object::Builtin(left), Object::Builtin(right)) => std::ptr::eq(*left, *right),
            (Object::Array(left), Object::Array(right)) => left == right,
            (Object::Dictionary(left), Object::Dictionary(right)) => left == right,
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectType {
    Integer,
    Float,
    Boolean,
    String,
    Null,
    ReturnValue,
    Error,
    Function,
    Builtin,
    Array,
    Dictionary,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Float => "FLOAT",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::String => "STRING",
            ObjectType::Null => "NULL",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::Array => "ARRAY",
            ObjectType::Dictionary => "DICTIONARY",
        })
    }
}

/// Key derived from a hashable Object. Keys carry their type, so `1`,
/// `1.0` and `true` index distinct dictionary slots.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HashKey {
    Integer(i64),
    Float(OrderedFloat<f64>),
    Boolean(bool),
    String(String),
}

/// User-defined function. Holds on to the environment it was created in, so
/// a frame outlives its scope for as long as some function references it.
pub struct Function {
    pub parameters: Vec<Token>,
    pub body: Block,
    pub env: Rc<RefCell<Environment>>,
}

impl Function {
    pub fn inspect(&self) -> String {
        let parameters: Vec<&str> = self.parameters.iter()
            .map(|parameter| parameter.source()).collect();

        format!("fn({}) {{\n{:?}\n}}", parameters.join(", "), self.body)
    }
}

// Leaves out the captured environment: frames can reach this function again
// through the store, and the debug formatter would chase that cycle forever.
impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

/// Dictionary storage: pairs in insertion order next to a hash index into
/// the pair list. Lookups go through the index; display walks the pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct Dictionary {
    entries: Vec<(Object, Object)>,
    index: HashMap<HashKey, usize>,
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserting an existing key overwrites its value but keeps the slot of
    /// the first insertion.
    pub fn insert(&mut self, hash_key: HashKey, key: Object, value: Object) {
        match self.index.get(&hash_key) {
            Some(&slot) => self.entries[slot] = (key, value),
            None => {
                self.index.insert(hash_key, self.entries.len());
                self.entries.push((key, value));
            },
        }
    }

    pub fn get(&self, hash_key: &HashKey) -> Option<&Object> {
        self.index.get(hash_key).map(|&slot| &self.entries[slot].1)
    }

    pub fn entries(&self) -> &[(Object, Object)] {
        &self.entries
    }

    pub fn inspect(&self) -> String {
        let pairs: Vec<String> = self.entries.iter()
            .map(|(key, value)| format!("{}: {}", key.inspect(), value.inspect()))
            .collect();

        format!("{{{}}}", pairs.join(", "))
    }
}
