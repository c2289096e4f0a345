//! Declarative prop schemas for element kinds.
//!
//! A schema is an ordered list of fields, each with a name, a value type,
//! and a required flag. Validation is a total function returning a tagged
//! result: the lenient render path skips a failing element while the strict
//! document gate rejects the whole document, but both share this primitive.

use serde_json::Value;
use thiserror::Error;

/// Value type accepted by a prop field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType {
    /// JSON string.
    Text,
    /// JSON number, or a number expressed as a string. Generators emit
    /// either form interchangeably, so both are accepted verbatim.
    Numeric,
}

impl PropType {
    fn accepts(self, value: &Value) -> bool {
        match self {
            PropType::Text => value.is_string(),
            PropType::Numeric => value.is_number() || value.is_string(),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            PropType::Text => "string",
            PropType::Numeric => "number or string",
        }
    }
}

/// One declared prop field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropField {
    /// Prop name as it appears in the property bag (camelCase).
    pub name: &'static str,
    /// Accepted value type.
    pub ty: PropType,
    /// Whether the prop must be present.
    pub required: bool,
}

/// Ordered prop schema for one element kind.
///
/// Field declaration order is preserved through validation, which makes
/// attribute emission deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropSchema {
    fields: Vec<PropField>,
}

impl PropSchema {
    /// Creates an empty schema (accepts any bag, keeps nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a required field.
    pub fn required(mut self, name: &'static str, ty: PropType) -> Self {
        self.fields.push(PropField {
            name,
            ty,
            required: true,
        });
        self
    }

    /// Declares an optional field.
    pub fn optional(mut self, name: &'static str, ty: PropType) -> Self {
        self.fields.push(PropField {
            name,
            ty,
            required: false,
        });
        self
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[PropField] {
        &self.fields
    }

    /// Validates a raw property bag against this schema.
    ///
    /// Undeclared props are stripped, not rejected. Declared props must match
    /// their type when present; `null` never matches. Required props must be
    /// present. Validation failure is a normal outcome, never a panic.
    pub fn validate(
        &self,
        props: &serde_json::Map<String, Value>,
    ) -> Result<ValidatedProps, SchemaViolation> {
        let mut entries = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            match props.get(field.name) {
                Some(value) => {
                    if !field.ty.accepts(value) {
                        return Err(SchemaViolation::WrongType {
                            name: field.name,
                            expected: field.ty.expected(),
                            found: json_type(value),
                        });
                    }
                    entries.push((field.name, value.clone()));
                }
                None => {
                    if field.required {
                        return Err(SchemaViolation::MissingRequired { name: field.name });
                    }
                }
            }
        }
        Ok(ValidatedProps { entries })
    }
}

/// A property bag that passed schema validation.
///
/// Holds only declared props, in schema declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProps {
    entries: Vec<(&'static str, Value)>,
}

impl ValidatedProps {
    /// Iterates props in schema declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    /// Looks up a prop by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Returns true when no declared props were present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Why a property bag failed its kind's schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    /// A required prop is absent.
    #[error("missing required prop `{name}`")]
    MissingRequired {
        /// Name of the missing prop.
        name: &'static str,
    },
    /// A declared prop has the wrong value type.
    #[error("prop `{name}` expected {expected}, got {found}")]
    WrongType {
        /// Name of the offending prop.
        name: &'static str,
        /// Type the schema accepts.
        expected: &'static str,
        /// Type actually found in the bag.
        found: &'static str,
    },
    /// The element kind has no catalog entry.
    #[error("unregistered element kind `{kind}`")]
    UnknownKind {
        /// The unregistered kind name.
        kind: String,
    },
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rect_like() -> PropSchema {
        PropSchema::new()
            .required("x", PropType::Numeric)
            .required("y", PropType::Numeric)
            .optional("fill", PropType::Text)
    }

    fn bag(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let schema = rect_like();
        for props in [
            json!({"x": 10, "y": 20}),
            json!({"x": "10", "y": "20.5"}),
        ] {
            let validated = schema.validate(&bag(props)).unwrap();
            assert!(validated.get("x").is_some());
        }
    }

    #[test]
    fn missing_required_prop_fails() {
        let schema = rect_like();
        let err = schema.validate(&bag(json!({"x": 1}))).unwrap_err();
        assert_eq!(err, SchemaViolation::MissingRequired { name: "y" });
    }

    #[test]
    fn wrong_type_fails_without_panicking() {
        let schema = rect_like();
        let err = schema
            .validate(&bag(json!({"x": 1, "y": 2, "fill": 42})))
            .unwrap_err();
        assert!(matches!(err, SchemaViolation::WrongType { name: "fill", .. }));

        let err = schema
            .validate(&bag(json!({"x": {"nested": true}, "y": 2})))
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaViolation::WrongType {
                name: "x",
                found: "object",
                ..
            }
        ));
    }

    #[test]
    fn null_is_never_accepted() {
        let schema = rect_like();
        let err = schema
            .validate(&bag(json!({"x": 1, "y": 2, "fill": null})))
            .unwrap_err();
        assert!(matches!(err, SchemaViolation::WrongType { name: "fill", .. }));
    }

    #[test]
    fn undeclared_props_are_stripped() {
        let schema = rect_like();
        let validated = schema
            .validate(&bag(json!({"x": 1, "y": 2, "onClick": "alert(1)"})))
            .unwrap();
        assert!(validated.get("onClick").is_none());
    }

    #[test]
    fn declaration_order_is_preserved() {
        let schema = rect_like();
        let validated = schema
            .validate(&bag(json!({"fill": "#fff", "y": 2, "x": 1})))
            .unwrap();
        let names: Vec<&str> = validated.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y", "fill"]);
    }

    #[test]
    fn empty_schema_keeps_nothing() {
        let schema = PropSchema::new();
        let validated = schema.validate(&bag(json!({"anything": 1}))).unwrap();
        assert!(validated.is_empty());
    }
}
