//! Record reflection for projection.
//!
//! A [`Describable`] source exposes its readable fields as [`FieldSpec`]s
//! and serves field values by name. Any `Serialize` type can be turned into
//! a describable record through [`describe`], which uses JSON objects as the
//! universal record shape.

use serde::{Deserialize, Serialize};

use crate::errors::{internal, TabulaResult};
use crate::value::{Value, ValueKind};

/// Describes a single readable field of a record source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: String,
    kind: ValueKind,
    writable: bool,
}

impl FieldSpec {
    /// Creates a writable field description.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            writable: true,
        }
    }

    /// Marks the field as read-only at the source.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// The field's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's declared value kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether the field can be written back at the source.
    pub fn is_writable(&self) -> bool {
        self.writable
    }
}

/// Sources that can be projected into a table row.
///
/// `fields` lists the readable fields in declaration order. `read_field`
/// returns the current value of one field, or `None` when the source does
/// not expose a field under that name.
pub trait Describable {
    fn fields(&self) -> Vec<FieldSpec>;
    fn read_field(&self, name: &str) -> Option<Value>;
}

/// JSON objects are the universal describable record: one field per key, in
/// insertion order. Non-object JSON values expose no fields.
impl Describable for serde_json::Value {
    fn fields(&self) -> Vec<FieldSpec> {
        match self {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(name, value)| FieldSpec::new(name, ValueKind::of_json(value)))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn read_field(&self, name: &str) -> Option<Value> {
        self.get(name).map(Value::from_json)
    }
}

/// Serializes a record into a describable JSON value.
///
/// Field order follows the record's declaration order.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use tabula::describe::{describe, Describable};
///
/// #[derive(Serialize)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// let person = Person { name: "Alice".to_string(), age: 30 };
/// let record = describe(&person).unwrap();
/// let fields = record.fields();
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].name(), "name");
/// ```
pub fn describe<T: Serialize>(source: &T) -> TabulaResult<serde_json::Value> {
    serde_json::to_value(source).map_err(|err| internal(err.to_string()))
}

#[cfg(test)]
mod describe_tests {
    use super::*;

    #[test]
    fn test_object_fields_preserve_order_and_kind() {
        let record = serde_json::json!({"Name": "Alice", "Age": 30, "Active": true});
        let fields = record.fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].name(), "Name");
        assert_eq!(fields[0].kind(), ValueKind::Str);
        assert_eq!(fields[1].name(), "Age");
        assert_eq!(fields[1].kind(), ValueKind::Int);
        assert_eq!(fields[2].name(), "Active");
        assert_eq!(fields[2].kind(), ValueKind::Bool);
    }

    #[test]
    fn test_scalars_expose_no_fields() {
        assert!(serde_json::json!(42).fields().is_empty());
        assert!(serde_json::json!("text").fields().is_empty());
        assert!(serde_json::json!(null).fields().is_empty());
        assert!(serde_json::json!([1, 2]).fields().is_empty());
    }

    #[test]
    fn test_read_field_converts_values() {
        let record = serde_json::json!({"Name": "Alice", "Score": 1.5});
        assert_eq!(record.read_field("Name"), Some(Value::Str("Alice".to_string())));
        assert_eq!(record.read_field("Score"), Some(Value::Float(1.5)));
        assert_eq!(record.read_field("Missing"), None);
    }

    #[test]
    fn test_field_spec_read_only_builder() {
        let field = FieldSpec::new("Id", ValueKind::Int).read_only();
        assert!(!field.is_writable());
        assert_eq!(field.kind(), ValueKind::Int);
    }
}
