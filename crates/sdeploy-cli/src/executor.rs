use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use sdeploy_core::{
    ConfigSchemaHandler, DeployLog, FunctionRegistry, HookContext, Options, PluginManager,
    ServiceConfig, ValidationMode,
};

use crate::Cli;

/// Runs the package lifecycle and emits the packaged manifest.
#[instrument(skip_all, fields(service = %cfg.service))]
pub fn package(
    cli: &Cli,
    cfg: &ServiceConfig,
    schema: &ConfigSchemaHandler,
    plugins: &PluginManager,
    options: &Options,
    log: &dyn DeployLog,
) -> Result<()> {
    let mut functions = cfg.function_registry()?;
    check_schema(cfg, schema, &functions)?;

    let mut ctx = HookContext {
        service: &mut functions,
        options,
        log,
    };
    plugins.run("package", &mut ctx)?;

    let manifest = packaged_manifest(cfg, &functions);
    let rendered = serde_json::to_string_pretty(&manifest)
        .context("failed to serialize packaged manifest")?;

    if cli.stdout {
        println!("{rendered}");
    } else {
        write_manifest(&cli.output, &rendered)?;
        info!(target: "sdeploy", "packaged {} function(s) into {}", functions.len(), cli.output);
    }
    Ok(())
}

fn check_schema(
    cfg: &ServiceConfig,
    schema: &ConfigSchemaHandler,
    functions: &FunctionRegistry,
) -> Result<()> {
    if cfg.validation_mode == ValidationMode::Off {
        return Ok(());
    }

    let violations = schema.validate_functions(&cfg.provider.name, functions);
    if violations.is_empty() {
        return Ok(());
    }

    match cfg.validation_mode {
        ValidationMode::Error => {
            let details = violations
                .iter()
                .map(|v| format!("  - {v}"))
                .collect::<Vec<_>>()
                .join("\n");
            bail!("configuration error:\n{details}")
        }
        _ => {
            for violation in &violations {
                warn!("configuration warning: {}", violation);
            }
            Ok(())
        }
    }
}

fn packaged_manifest(cfg: &ServiceConfig, functions: &FunctionRegistry) -> Value {
    json!({
        "service": cfg.service,
        "provider": { "name": cfg.provider.name },
        "functions": functions.to_json(),
    })
}

fn write_manifest(path: &str, content: &str) -> Result<()> {
    let output = Path::new(path);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    fs::write(output, content).with_context(|| format!("failed to write '{}'", output.display()))
}
