// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Response schemas declared to the completion service.
//!
//! Serializes to the OpenAPI subset Gemini accepts as `responseSchema`, and
//! checks a decoded JSON value against the same declaration so that a reply
//! is either fully conforming or rejected.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// A declared response shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    /// Declaration order of `properties`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

impl Schema {
    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
            items: None,
            min_items: None,
            max_items: None,
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    pub fn integer() -> Self {
        Self::of(SchemaType::Integer)
    }

    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Add a required property.
    pub fn property(mut self, name: &str, schema: Schema) -> Self {
        self.properties.insert(name.to_string(), schema);
        self.property_ordering.push(name.to_string());
        self.required.push(name.to_string());
        self
    }

    /// Require exactly `count` array items.
    pub fn exactly(mut self, count: usize) -> Self {
        self.min_items = Some(count);
        self.max_items = Some(count);
        self
    }

    /// Check `value` against this schema.
    ///
    /// Returns a path-qualified description of the first mismatch.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), String> {
        let matches = match self.kind {
            SchemaType::String => value.is_string(),
            SchemaType::Number => value.is_number(),
            SchemaType::Integer => value.is_i64() || value.is_u64(),
            SchemaType::Boolean => value.is_boolean(),
            SchemaType::Array => value.is_array(),
            SchemaType::Object => value.is_object(),
        };
        if !matches {
            return Err(format!(
                "{}: expected {:?}, found {}",
                path,
                self.kind,
                kind_of(value)
            ));
        }

        if let Some(items) = value.as_array() {
            let len = items.len();
            if let Some(min) = self.min_items.filter(|min| len < *min) {
                return Err(format!("{}: expected at least {} items, found {}", path, min, len));
            }
            if let Some(max) = self.max_items.filter(|max| len > *max) {
                return Err(format!("{}: expected at most {} items, found {}", path, max, len));
            }
            if let Some(item_schema) = &self.items {
                for (i, item) in items.iter().enumerate() {
                    item_schema.validate_at(&format!("{}[{}]", path, i), item)?;
                }
            }
        }

        if let Some(fields) = value.as_object() {
            for name in &self.required {
                if !fields.contains_key(name) {
                    return Err(format!("{}: missing required field \"{}\"", path, name));
                }
            }
            for (name, field_schema) in &self.properties {
                if let Some(field) = fields.get(name) {
                    field_schema.validate_at(&format!("{}.{}", path, name), field)?;
                }
            }
        }

        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
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

    fn point() -> Schema {
        Schema::object()
            .property("name", Schema::string())
            .property("lat", Schema::number())
            .property("visits", Schema::integer())
    }

    #[test]
    fn test_serializes_to_gemini_shape() {
        let schema = Schema::array(point().describe("A place.")).exactly(2);
        let json = serde_json::to_value(&schema).unwrap();

        assert_eq!(json["type"], "ARRAY");
        assert_eq!(json["minItems"], 2);
        assert_eq!(json["maxItems"], 2);
        assert_eq!(json["items"]["type"], "OBJECT");
        assert_eq!(json["items"]["description"], "A place.");
        assert_eq!(json["items"]["properties"]["lat"]["type"], "NUMBER");
        assert_eq!(json["items"]["required"], json!(["name", "lat", "visits"]));
        assert_eq!(
            json["items"]["propertyOrdering"],
            json!(["name", "lat", "visits"])
        );
        assert!(json["items"]["properties"]["name"].get("required").is_none());
    }

    #[test]
    fn test_validate_accepts_conforming_value() {
        let schema = Schema::array(point()).exactly(1);
        let value = json!([{ "name": "Tahoe", "lat": 39.1, "visits": 3, "extra": true }]);
        assert_eq!(schema.validate(&value), Ok(()));
    }

    #[test]
    fn test_validate_reports_missing_field() {
        let value = json!({ "name": "Tahoe", "lat": 39.1 });
        let err = point().validate(&value).unwrap_err();
        assert_eq!(err, "$: missing required field \"visits\"");
    }

    #[test]
    fn test_validate_reports_wrong_type_with_path() {
        let schema = Schema::array(point());
        let value = json!([
            { "name": "Tahoe", "lat": 39.1, "visits": 3 },
            { "name": "Sur", "lat": "36.2", "visits": 1 }
        ]);
        let err = schema.validate(&value).unwrap_err();
        assert_eq!(err, "$[1].lat: expected Number, found string");
    }

    #[test]
    fn test_integer_rejects_fractions() {
        assert!(Schema::integer().validate(&json!(3)).is_ok());
        assert!(Schema::integer().validate(&json!(2.5)).is_err());
    }

    #[test]
    fn test_item_count_enforced() {
        let schema = Schema::array(Schema::string()).exactly(4);
        assert!(schema.validate(&json!(["a", "b", "c"])).is_err());
        assert!(schema.validate(&json!(["a", "b", "c", "d", "e"])).is_err());
        assert!(schema.validate(&json!(["a", "b", "c", "d"])).is_ok());
    }
}
