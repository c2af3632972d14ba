use std::{
    fmt::{self, Display},
    ops::Index,
};

use indexmap::IndexMap;

use crate::char_view::CharView;

/// Members in insertion order.
pub type Object = IndexMap<String, Value>;
pub type Array = Vec<Value>;

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Null,
    Object,
    Array,
    String,
    Number,
    Boolean,
}

/// JSON value. Strings keep their escape sequences as written.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Object(Object),
    Array(Array),
    String(String),
    Number(f64),
    Bool(bool),
}

impl Value {
    pub fn kind(&self) -> Type {
        match self {
            Self::Null => Type::Null,
            Self::Object(_) => Type::Object,
            Self::Array(_) => Type::Array,
            Self::String(_) => Type::String,
            Self::Number(_) => Type::Number,
            Self::Bool(_) => Type::Boolean,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Member `key` of an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.as_object_mut()?.get_mut(key)
    }

    /// Element `index` of an array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array()?.get(index)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.as_array_mut()?.get_mut(index)
    }

    /// Set member `key` of an object, returning the previous value. Returns
    /// the value back as `Err` when `self` is not an object.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>, Value> {
        match self.as_object_mut() {
            Some(o) => Ok(o.insert(key.into(), value)),
            None => Err(value),
        }
    }

    /// Append to an array. Returns the value back as `Err` when `self` is not
    /// an array.
    pub fn push(&mut self, value: Value) -> Result<(), Value> {
        match self.as_array_mut() {
            Some(a) => {
                a.push(value);
                Ok(())
            }
            None => Err(value),
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_index(index).unwrap_or(&NULL)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<CharView<'_>> for Value {
    fn from(v: CharView<'_>) -> Self {
        Self::String(String::from_utf8_lossy(v.as_bytes()).into_owned())
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::Object(o)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

/// Compact JSON text, or indented with two spaces per level when formatted
/// with `{:#}`. String contents are written as stored, so the output reads
/// back to the same value.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return self.write_pretty(f, 0);
        }

        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) if n.is_finite() => write!(f, "{}", n),
            Self::Number(_) => write!(f, "null"),
            Self::String(s) => write!(f, "\"{}\"", s),
            Self::Array(array) => {
                write!(f, "[")?;
                for (i, v) in array.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Self::Object(object) => {
                write!(f, "{{")?;
                for (i, (k, v)) in object.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "\"{}\":{}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

const INDENT: &str = "  ";

impl Value {
    fn write_pretty(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        let inner = INDENT.repeat(level + 1);

        match self {
            Self::Array(array) if !array.is_empty() => {
                writeln!(f, "[")?;
                for (i, v) in array.iter().enumerate() {
                    if i > 0 {
                        writeln!(f, ",")?;
                    }
                    write!(f, "{}", inner)?;
                    v.write_pretty(f, level + 1)?;
                }
                write!(f, "\n{}]", INDENT.repeat(level))
            }
            Self::Object(object) if !object.is_empty() => {
                writeln!(f, "{{")?;
                for (i, (k, v)) in object.iter().enumerate() {
                    if i > 0 {
                        writeln!(f, ",")?;
                    }
                    write!(f, "{}\"{}\": ", inner, k)?;
                    v.write_pretty(f, level + 1)?;
                }
                write!(f, "\n{}}}", INDENT.repeat(level))
            }
            // scalars and empty containers read the same either way
            _ => write!(f, "{}", self),
        }
    }
}
