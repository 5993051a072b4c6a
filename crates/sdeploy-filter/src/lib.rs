//! Drops functions marked `toDeploy = false` before deployment artifacts are created.
//!
//! A function without the flag is deployed. A flag that is not a boolean stops
//! the packaging run.

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, instrument};

use sdeploy_core::{
    DeployLog, HookContext, HookPhase, LifecycleEvent, Options, Plugin, PropertySchema,
    PropertyType, SchemaHandler, Unit, UnitStore,
};

mod error;
mod outcome;

pub use error::FilterError;
pub use outcome::{FilterOutcome, VERBOSE_HINT};

pub const PLUGIN_NAME: &str = "selective-deploy";

/// Prefix of every line this plugin logs.
pub const LOG_PREFIX: &str = "[selective-deploy]:";

/// The per-function opt-out property.
pub const TO_DEPLOY: &str = "toDeploy";

/// Resolves a unit's opt-out flag: the explicit value, or `true` when absent.
///
/// # Errors
/// Returns [`FilterError::Configuration`] if the flag is present but not a boolean.
pub fn resolve_to_deploy(unit: &Unit) -> Result<bool, FilterError> {
    match unit.property(TO_DEPLOY) {
        None => Ok(true),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(FilterError::Configuration {
            unit: unit.name.clone(),
        }),
    }
}

/// The selective deployment plugin.
#[derive(Debug, Clone)]
pub struct SelectiveDeploy {
    provider: String,
}

impl SelectiveDeploy {
    /// Creates the plugin and declares the optional boolean `toDeploy`
    /// function property for `provider`.
    pub fn new(schema: &mut dyn SchemaHandler, provider: &str) -> Self {
        schema.define_function_properties(
            provider,
            PropertySchema::optional(TO_DEPLOY, PropertyType::Boolean),
        );
        Self {
            provider: provider.to_string(),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// The hook the filter runs at.
    pub fn hook_event() -> LifecycleEvent {
        LifecycleEvent::new(HookPhase::Before, "package", "createDeploymentArtifacts")
    }

    /// Removes every unit whose flag resolves to `false` and reports what happened.
    ///
    /// Units are visited in the store's natural order. Validation is fail-fast:
    /// units excluded before an invalid flag is found stay excluded.
    #[instrument(skip_all)]
    pub fn exclude_non_deployable(
        &self,
        store: &mut dyn UnitStore,
        options: &Options,
        log: &dyn DeployLog,
    ) -> Result<FilterOutcome, FilterError> {
        let names = store.unit_names();
        if names.is_empty() {
            debug!("no functions registered, nothing to filter");
            return Ok(FilterOutcome::default());
        }

        let mut outcome = FilterOutcome::default();
        for name in names {
            let unit = store
                .unit(&name)
                .ok_or_else(|| FilterError::UnknownUnit(name.clone()))?;

            if resolve_to_deploy(unit)? {
                outcome.kept.push(name);
            } else {
                store.remove_unit(&name);
                debug!("excluded {} from deployment", name);
                outcome.excluded.push(name);
            }
        }

        for line in outcome.detail_lines() {
            log.verbose(&format!("{LOG_PREFIX} {line}"));
        }
        log.notice(&format!(
            "{LOG_PREFIX} {}",
            outcome.summary_line(options.verbose)
        ));

        Ok(outcome)
    }
}

impl Plugin for SelectiveDeploy {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn hooks(&self) -> Vec<LifecycleEvent> {
        vec![Self::hook_event()]
    }

    fn run_hook(&self, event: &LifecycleEvent, ctx: &mut HookContext<'_>) -> Result<()> {
        if *event == Self::hook_event() {
            self.exclude_non_deployable(&mut *ctx.service, ctx.options, ctx.log)?;
        }
        Ok(())
    }
}
