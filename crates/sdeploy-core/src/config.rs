use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_PROVIDER;
use crate::unit::{FunctionRegistry, Unit};

/// A service manifest: the service, its provider, and its functions in document order.
#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub service: String,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default, rename = "configValidationMode")]
    pub validation_mode: ValidationMode,
    #[serde(default)]
    pub functions: Map<String, Value>,
}

impl ServiceConfig {
    /// Loads a manifest from disk. Files ending in `.json` are parsed as JSON,
    /// everything else as TOML.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {path}"))?;
        let is_json = Path::new(path)
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let cfg = if is_json {
            serde_json::from_str::<Self>(&text)
                .with_context(|| format!("failed to parse JSON config: {path}"))?
        } else {
            toml::from_str::<Self>(&text)
                .with_context(|| format!("failed to parse TOML config: {path}"))?
        };
        Ok(cfg)
    }

    /// Builds the function registry, keeping manifest order.
    ///
    /// # Errors
    /// Returns an error if a function definition is not a table.
    pub fn function_registry(&self) -> Result<FunctionRegistry> {
        let mut registry = FunctionRegistry::default();
        for (name, definition) in &self.functions {
            let Value::Object(properties) = definition else {
                bail!("function '{}' must be defined as a table", name);
            };
            registry.insert(Unit::new(name.clone(), properties.clone()));
        }
        Ok(registry)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider")]
    pub name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider(),
        }
    }
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

/// What the host does with function definitions that violate the declared schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    Warn,
    Error,
    Off,
}

impl Default for ValidationMode {
    fn default() -> Self {
        Self::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::UnitStore;
    use serde_json::json;
    use tempfile::tempdir;

    const MANIFEST: &str = r#"
service = "billing"

[functions.zeta]
handler = "zeta.handler"

[functions.alpha]
handler = "alpha.handler"
toDeploy = false

[functions.mid]
toDeploy = "yes"
"#;

    #[test]
    fn parses_toml_manifest_with_defaults() {
        let cfg: ServiceConfig = toml::from_str(MANIFEST).expect("manifest should parse");
        assert_eq!(cfg.service, "billing");
        assert_eq!(cfg.provider.name, "aws");
        assert_eq!(cfg.validation_mode, ValidationMode::Warn);

        let registry = cfg.function_registry().unwrap();
        assert_eq!(registry.unit_names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            registry.unit("alpha").unwrap().property("toDeploy"),
            Some(&json!(false))
        );
        // Values are carried through untyped.
        assert_eq!(
            registry.unit("mid").unwrap().property("toDeploy"),
            Some(&json!("yes"))
        );
    }

    #[test]
    fn loads_json_manifest_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sdeploy.json");
        std::fs::write(
            &path,
            r#"{
                "service": "api",
                "provider": { "name": "azure" },
                "configValidationMode": "error",
                "functions": { "b": { "toDeploy": null }, "a": {} }
            }"#,
        )
        .unwrap();

        let cfg = ServiceConfig::load_from_file(path.to_str().unwrap()).expect("json loads");
        assert_eq!(cfg.provider.name, "azure");
        assert_eq!(cfg.validation_mode, ValidationMode::Error);

        let registry = cfg.function_registry().unwrap();
        assert_eq!(registry.unit_names(), vec!["b", "a"]);
        assert_eq!(
            registry.unit("b").unwrap().property("toDeploy"),
            Some(&Value::Null)
        );
    }

    #[test]
    fn loads_toml_manifest_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sdeploy.toml");
        std::fs::write(&path, MANIFEST).unwrap();

        let cfg = ServiceConfig::load_from_file(path.to_str().unwrap()).expect("toml loads");
        assert_eq!(cfg.functions.len(), 3);
    }

    #[test]
    fn rejects_non_table_function() {
        let cfg: ServiceConfig = toml::from_str(
            r#"
            service = "svc"

            [functions]
            broken = "handler.js"
            "#,
        )
        .unwrap();

        let err = cfg.function_registry().expect_err("must fail");
        assert!(err.to_string().contains("function 'broken'"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ServiceConfig::load_from_file("/nonexistent/sdeploy.toml").expect_err("must fail");
        assert!(err.to_string().contains("/nonexistent/sdeploy.toml"));
    }
}
