//! Declarations of provider-specific function properties.
//!
//! Plugins extend the function schema at construction time; the host may
//! later check function definitions against the merged schema.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::unit::FunctionRegistry;

/// JSON-schema style type of a declared property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Boolean,
    String,
    Number,
    Object,
    Array,
}

impl PropertyType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Boolean => value.is_boolean(),
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// A set of function properties, as declared by one plugin or merged from many.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    pub properties: BTreeMap<String, PropertyType>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl PropertySchema {
    /// Single optional property of the given type.
    pub fn optional(name: &str, ty: PropertyType) -> Self {
        Self {
            properties: BTreeMap::from([(name.to_string(), ty)]),
            required: Vec::new(),
        }
    }

    fn merge(&mut self, other: PropertySchema) {
        self.properties.extend(other.properties);
        for name in other.required {
            if !self.required.contains(&name) {
                self.required.push(name);
            }
        }
    }
}

/// The host capability plugins use to extend the function schema.
pub trait SchemaHandler {
    fn define_function_properties(&mut self, provider: &str, schema: PropertySchema);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    MissingRequired,
    WrongType {
        expected: PropertyType,
    },
}

/// A function definition that does not satisfy the declared schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub function: String,
    pub property: String,
    pub kind: ViolationKind,
}

impl Display for SchemaViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ViolationKind::MissingRequired => write!(
                f,
                "functions.{}: missing required property '{}'",
                self.function, self.property
            ),
            ViolationKind::WrongType { expected } => write!(
                f,
                "functions.{}.{} should be {}",
                self.function,
                self.property,
                expected.as_str()
            ),
        }
    }
}

/// In-memory schema handler keyed by provider.
#[derive(Debug, Default)]
pub struct ConfigSchemaHandler {
    function_properties: HashMap<String, PropertySchema>,
}

impl ConfigSchemaHandler {
    pub fn function_properties(&self, provider: &str) -> Option<&PropertySchema> {
        self.function_properties.get(provider)
    }

    /// Checks every function against the schema declared for `provider`.
    ///
    /// Properties nobody declared are not reported.
    pub fn validate_functions(
        &self,
        provider: &str,
        functions: &FunctionRegistry,
    ) -> Vec<SchemaViolation> {
        let Some(schema) = self.function_properties(provider) else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for unit in functions.iter() {
            for name in &schema.required {
                if unit.property(name).is_none() {
                    violations.push(SchemaViolation {
                        function: unit.name.clone(),
                        property: name.clone(),
                        kind: ViolationKind::MissingRequired,
                    });
                }
            }

            for (name, expected) in &schema.properties {
                if let Some(value) = unit.property(name) {
                    if !expected.matches(value) {
                        violations.push(SchemaViolation {
                            function: unit.name.clone(),
                            property: name.clone(),
                            kind: ViolationKind::WrongType {
                                expected: *expected,
                            },
                        });
                    }
                }
            }
        }
        violations
    }
}

impl SchemaHandler for ConfigSchemaHandler {
    fn define_function_properties(&mut self, provider: &str, schema: PropertySchema) {
        debug!(
            "defining function properties for provider {}: {:?}",
            provider,
            schema.properties.keys().collect::<Vec<_>>()
        );
        self.function_properties
            .entry(provider.to_string())
            .or_default()
            .merge(schema);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;
    use serde_json::json;

    fn registry(value: Value) -> FunctionRegistry {
        value
            .as_object()
            .unwrap()
            .iter()
            .map(|(name, props)| Unit::new(name.clone(), props.as_object().unwrap().clone()))
            .collect()
    }

    #[test]
    fn merges_declarations_per_provider() {
        let mut handler = ConfigSchemaHandler::default();
        handler.define_function_properties(
            "aws",
            PropertySchema::optional("toDeploy", PropertyType::Boolean),
        );
        handler.define_function_properties(
            "aws",
            PropertySchema {
                properties: BTreeMap::from([("team".to_string(), PropertyType::String)]),
                required: vec!["team".to_string()],
            },
        );

        let schema = handler.function_properties("aws").expect("aws schema");
        assert_eq!(schema.properties.len(), 2);
        assert_eq!(schema.required, vec!["team"]);
        assert!(handler.function_properties("azure").is_none());
    }

    #[test]
    fn reports_wrong_types_and_missing_required() {
        let mut handler = ConfigSchemaHandler::default();
        handler.define_function_properties(
            "aws",
            PropertySchema {
                properties: BTreeMap::from([
                    ("toDeploy".to_string(), PropertyType::Boolean),
                    ("team".to_string(), PropertyType::String),
                ]),
                required: vec!["team".to_string()],
            },
        );

        let functions = registry(json!({
            "ok": { "toDeploy": false, "team": "core" },
            "bad": { "toDeploy": "yes", "handler": "bad.handler" }
        }));

        let violations = handler.validate_functions("aws", &functions);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.function == "bad"));
        assert!(violations
            .iter()
            .any(|v| v.to_string() == "functions.bad.toDeploy should be boolean"));
        assert!(violations.iter().any(|v| v.kind == ViolationKind::MissingRequired));
    }

    #[test]
    fn unknown_provider_has_no_violations() {
        let handler = ConfigSchemaHandler::default();
        let functions = registry(json!({ "f": { "toDeploy": 1 } }));
        assert!(handler.validate_functions("aws", &functions).is_empty());
    }

    #[test]
    fn schema_serializes_like_a_json_schema_fragment() {
        let schema = PropertySchema::optional("toDeploy", PropertyType::Boolean);
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({ "properties": { "toDeploy": "boolean" }, "required": [] })
        );
    }
}
