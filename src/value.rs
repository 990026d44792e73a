use im::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a dynamically typed cell value.
///
/// # Examples
///
/// ```rust
/// use tabula::value::Value;
/// let n = Value::Int(42);
/// assert_eq!(n.type_name(), "int");
/// let s = Value::Str("hello".to_string());
/// assert_eq!(s.type_name(), "str");
/// let nil = Value::default();
/// assert!(nil.is_nil());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Nil,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
}

/// The kind tag of a [`Value`], used as a column's declared type.
///
/// # Examples
///
/// ```rust
/// use tabula::value::{Value, ValueKind};
/// assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
/// assert_eq!(ValueKind::Str.as_str(), "str");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Nil,
    Int,
    Float,
    Bool,
    Str,
    List,
    Map,
}

impl Value {
    /// Returns the kind tag describing the contained value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabula::value::{Value, ValueKind};
    /// let v = Value::Int(7);
    /// assert_eq!(v.kind(), ValueKind::Int);
    /// ```
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
        }
    }

    /// Returns a lower-case label for the contained value's type.
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Returns true if the value is Nil.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabula::value::Value;
    /// assert!(Value::Nil.is_nil());
    /// assert!(!Value::Int(1).is_nil());
    /// ```
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns the contained integer if this is an Int value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabula::value::Value;
    /// let v = Value::Int(2);
    /// assert_eq!(v.as_int(), Some(2));
    /// let v2 = Value::Str("nope".to_string());
    /// assert_eq!(v2.as_int(), None);
    /// ```
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained float if this is a Float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained bool if this is a Bool value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tabula::value::Value;
    /// let v = Value::Bool(false);
    /// assert_eq!(v.as_bool(), Some(false));
    /// assert_eq!(Value::Nil.as_bool(), None);
    /// ```
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the contained string slice if this is a Str value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Converts a JSON value into a tabula value.
    ///
    /// Whole numbers become `Int`; any other numeric becomes `Float`.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Nil),
            },
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), Value::from_json(value)))
                    .collect(),
            ),
        }
    }

    // ------------------------------------------------------------------------
    // Display formatting helpers
    // ------------------------------------------------------------------------

    /// Helper for formatting list values
    fn fmt_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }

    /// Helper for formatting map values
    fn fmt_map(f: &mut fmt::Formatter<'_>, map: &HashMap<String, Value>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (k, v) in map.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl ValueKind {
    /// Returns a lower-case name for the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Nil => "nil",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Str => "str",
            ValueKind::List => "list",
            ValueKind::Map => "map",
        }
    }

    /// Returns the kind a JSON value would convert to.
    pub fn of_json(json: &serde_json::Value) -> ValueKind {
        match json {
            serde_json::Value::Null => ValueKind::Nil,
            serde_json::Value::Bool(_) => ValueKind::Bool,
            serde_json::Value::Number(n) => {
                if n.as_i64().is_some() {
                    ValueKind::Int
                } else {
                    ValueKind::Float
                }
            }
            serde_json::Value::String(_) => ValueKind::Str,
            serde_json::Value::Array(_) => ValueKind::List,
            serde_json::Value::Object(_) => ValueKind::Map,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => Value::fmt_list(f, items),
            Value::Map(map) => Value::fmt_map(f, map),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

macro_rules! impl_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::$variant(value.into())
            }
        }
    };
}

impl_from!(Int, i64);
impl_from!(Int, i32);
impl_from!(Float, f64);
impl_from!(Float, f32);
impl_from!(Bool, bool);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(value: HashMap<String, Value>) -> Self {
        Value::Map(value)
    }
}

macro_rules! impl_try_from_value {
    ($ty:ty, $variant:ident) => {
        impl TryFrom<Value> for $ty {
            type Error = Value;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                if let Value::$variant(inner) = value {
                    Ok(inner)
                } else {
                    Err(value)
                }
            }
        }
    };
}

impl_try_from_value!(i64, Int);
impl_try_from_value!(f64, Float);
impl_try_from_value!(bool, Bool);
impl_try_from_value!(String, Str);
impl_try_from_value!(Vec<Value>, List);
impl_try_from_value!(HashMap<String, Value>, Map);
