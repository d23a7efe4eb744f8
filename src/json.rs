//! JSON Schema validation and serialized outcomes.
//!
//! [`JsonSchema`] compiles a JSON Schema document into a [`Schema`] usable
//! with [`parse`](crate::parse()). Each violation becomes an [`Issue`] whose
//! path is the JSON pointer of the offending value.
//!
//! ```
//! use outcomes::json::JsonSchema;
//! use outcomes::prelude::*;
//! use serde_json::json;
//!
//! let schema = JsonSchema::compile(&json!({
//!     "type": "object",
//!     "properties": { "name": { "type": "string" } },
//!     "required": ["name"]
//! }))
//! .unwrap();
//!
//! assert!(parse(&schema, json!({ "name": "x" })).is_success());
//! assert!(parse(&schema, json!({ "invalid": true })).is_failure());
//! ```

use crate::error::SchemaError;
use crate::parse::{Issue, Schema, Validation};
use jsonschema::JSONSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

/// A compiled JSON Schema.
pub struct JsonSchema {
    compiled: JSONSchema,
}

impl JsonSchema {
    /// Compile a schema document. The draft is detected from `$schema`.
    pub fn compile(schema: &Value) -> Result<Self, SchemaError> {
        let compiled =
            JSONSchema::compile(schema).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { compiled })
    }

    /// Validate, then deserialize the accepted document into `T`.
    pub fn typed<T: DeserializeOwned>(self) -> Typed<T> {
        Typed { schema: self, target: PhantomData }
    }

    fn issues(&self, instance: &Value) -> Vec<Issue> {
        match self.compiled.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| Issue { message: e.to_string(), path: Some(e.instance_path.to_string()) })
                .collect(),
        }
    }
}

impl fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema").finish_non_exhaustive()
    }
}

impl Schema<Value> for JsonSchema {
    type Output = Value;

    fn validate(&self, input: Value) -> Validation<'_, Value> {
        let issues = self.issues(&input);
        if issues.is_empty() {
            Validation::Valid(input)
        } else {
            Validation::Invalid(issues)
        }
    }
}

impl<'v> Schema<&'v Value> for JsonSchema {
    type Output = Value;

    fn validate(&self, input: &'v Value) -> Validation<'_, Value> {
        let issues = self.issues(input);
        if issues.is_empty() {
            Validation::Valid(input.clone())
        } else {
            Validation::Invalid(issues)
        }
    }
}

/// A JSON Schema whose accepted documents are deserialized into `T`.
pub struct Typed<T> {
    schema: JsonSchema,
    target: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed").field("schema", &self.schema).finish()
    }
}

impl<T: DeserializeOwned> Schema<Value> for Typed<T> {
    type Output = T;

    fn validate(&self, input: Value) -> Validation<'_, T> {
        let issues = self.schema.issues(&input);
        if !issues.is_empty() {
            return Validation::Invalid(issues);
        }
        match serde_json::from_value(input) {
            Ok(value) => Validation::Valid(value),
            Err(e) => Validation::Invalid(vec![Issue::new(e.to_string())]),
        }
    }
}

/// Whether `value` looks like a serialized outcome: a `"type"` tag of
/// `"Success"` or `"Failure"` alongside the matching payload field.
pub fn is_result(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    match object.get("type").and_then(Value::as_str) {
        Some("Success") => object.contains_key("value"),
        Some("Failure") => object.contains_key("error"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fail, parse, succeed, Outcome};
    use serde::Deserialize;
    use serde_json::json;

    fn manifest_schema() -> JsonSchema {
        JsonSchema::compile(&json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "version": { "type": "string" }
            },
            "required": ["name"]
        }))
        .unwrap()
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Manifest {
        name: String,
        version: Option<String>,
    }

    #[test]
    fn accepts_valid_documents() {
        let doc = json!({ "name": "x" });
        assert_eq!(parse(&manifest_schema(), &doc), succeed(doc.clone()));
    }

    #[test]
    fn rejects_with_pointer_paths() {
        let issues = parse(&manifest_schema(), json!({ "name": 7 })).unwrap_error();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path.as_deref(), Some("/name"));
    }

    #[test]
    fn missing_required_field_is_reported() {
        let issues = parse(&manifest_schema(), json!({ "invalid": true })).unwrap_error();
        assert!(issues.iter().any(|i| i.message.contains("name")));
    }

    #[test]
    fn invalid_schema_is_a_setup_error() {
        let err = JsonSchema::compile(&json!({ "type": 12 })).unwrap_err();
        assert!(matches!(err, SchemaError::Compile(_)));
    }

    #[test]
    fn typed_schema_deserializes() {
        let typed = manifest_schema().typed::<Manifest>();
        let out = parse(&typed, json!({ "name": "x", "version": "1.0.0" }));
        assert_eq!(
            out,
            succeed(Manifest { name: "x".into(), version: Some("1.0.0".into()) })
        );
        assert!(parse(&typed, json!([])).is_failure());
    }

    #[test]
    fn outcomes_serialize_tagged() {
        let ok: Outcome<i32, String> = succeed(1);
        let err: Outcome<i32, String> = fail("e".into());
        let ok_json = serde_json::to_value(&ok).unwrap();
        assert_eq!(ok_json, json!({ "type": "Success", "value": 1 }));
        assert!(is_result(&ok_json));
        assert!(is_result(&serde_json::to_value(&err).unwrap()));

        let back: Outcome<i32, String> = serde_json::from_value(ok_json).unwrap();
        assert_eq!(back, ok);
    }

    #[test]
    fn is_result_is_structural() {
        assert!(!is_result(&json!({ "type": "Success" })));
        assert!(!is_result(&json!({ "type": "Failure", "value": 1 })));
        assert!(!is_result(&json!({ "type": "Other", "value": 1 })));
        assert!(!is_result(&json!([1, 2])));
        assert!(is_result(&json!({ "type": "Failure", "error": null })));
    }
}
