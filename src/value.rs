use core::fmt;
use std::{ops::Deref, rc::Rc};

use rustc_hash::FxHashMap as HashMap;

/// A value observed by hooks, test bodies and matchers.
/// Using `Rc` allows us to share the value between the fixture context and
/// assertions without copying the data, so it's cheap to clone. Two handles
/// to the same allocation are *identical*, which is what `to_be` checks for
/// composites.
#[derive(Debug, Clone)]
pub struct Value {
    pub(crate) inner: Rc<ValueInner>,
}

#[derive(Debug)]
pub enum ValueInner {
    String(String),
    Number(f64),
    Nil,
    Bool(bool),
    List(Vec<Value>),
    Object(Object),
}

#[derive(Debug, Default)]
pub struct Object {
    pub properties: HashMap<String, Value>,
}

impl ValueInner {
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueInner::String(_) => "string",
            ValueInner::Number(_) => "number",
            ValueInner::Nil => "nil",
            ValueInner::Bool(_) => "bool",
            ValueInner::List(_) => "list",
            ValueInner::Object(_) => "object",
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, ValueInner::List(_) | ValueInner::Object(_))
    }
}

impl Value {
    pub fn new_string(string: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ValueInner::String(string.into())),
        }
    }

    pub fn new_number(num: f64) -> Self {
        Self {
            inner: Rc::new(ValueInner::Number(num)),
        }
    }

    pub fn new_nil() -> Self {
        Self {
            inner: Rc::new(ValueInner::Nil),
        }
    }

    pub fn new_bool(boolean: bool) -> Self {
        Self {
            inner: Rc::new(ValueInner::Bool(boolean)),
        }
    }

    pub fn new_list(items: Vec<Value>) -> Self {
        Self {
            inner: Rc::new(ValueInner::List(items)),
        }
    }

    pub fn new_object(properties: HashMap<String, Value>) -> Self {
        Self {
            inner: Rc::new(ValueInner::Object(Object { properties })),
        }
    }

    /// Builds an object from key/value pairs, e.g.
    /// `Value::object([("key1", 1), ("key2", 2)])`.
    pub fn object<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::new_object(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn as_number(&self) -> Option<f64> {
        match &**self {
            ValueInner::Number(num) => Some(*num),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &**self {
            ValueInner::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(&**self, ValueInner::Nil)
    }

    /// Same allocation. Only meaningful for composites; primitives are
    /// compared by value in matchers.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Rendering used in failure messages: strings are quoted and object
    /// keys are sorted so messages are stable.
    pub fn describe(&self) -> String {
        match &**self {
            ValueInner::String(string) => format!("'{}'", string),
            ValueInner::List(items) => {
                if items.is_empty() {
                    return "[]".to_string();
                }
                let items: Vec<String> = items.iter().map(Value::describe).collect();
                format!("[ {} ]", items.join(", "))
            }
            ValueInner::Object(object) => {
                let mut keys: Vec<&String> = object.properties.keys().collect();
                keys.sort();
                let properties: Vec<String> = keys
                    .into_iter()
                    .map(|key| format!("{}: {}", key, object.properties[key].describe()))
                    .collect();
                format!("Object({{ {} }})", properties.join(", "))
            }
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &**self {
            ValueInner::Bool(boolean) => write!(f, "{}", boolean),
            ValueInner::Nil => write!(f, "nil"),
            ValueInner::Number(num) => write!(f, "{}", num),
            ValueInner::String(string) => write!(f, "{}", string),
            ValueInner::List(_) | ValueInner::Object(_) => write!(f, "{}", self.describe()),
        }
    }
}

impl Deref for Value {
    type Target = ValueInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::new_number(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::new_number(value as f64)
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::new_bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::new_string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::new_string(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::new_nil(),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::new_list(value.into_iter().map(Into::into).collect())
    }
}
