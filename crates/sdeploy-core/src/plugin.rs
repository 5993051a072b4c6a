use anyhow::{anyhow, Context, Result};
use tracing::{debug, instrument};

use crate::lifecycle::{lifecycle_events, HookPhase, LifecycleEvent};
use crate::log::DeployLog;
use crate::unit::UnitStore;

/// Command-line options visible to plugins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub verbose: bool,
}

/// Everything a hook may touch while it runs.
pub struct HookContext<'a> {
    pub service: &'a mut dyn UnitStore,
    pub options: &'a Options,
    pub log: &'a dyn DeployLog,
}

/// A contract for all plugins attaching to the package lifecycle.
pub trait Plugin: std::fmt::Debug {
    /// Unique name of the plugin.
    fn name(&self) -> &str;
    /// The lifecycle events this plugin hooks into.
    fn hooks(&self) -> Vec<LifecycleEvent>;
    /// Runs the plugin's hook for `event`.
    fn run_hook(&self, event: &LifecycleEvent, ctx: &mut HookContext<'_>) -> Result<()>;
}

/// Registered plugins, dispatched in registration order.
#[derive(Debug, Default)]
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginManager {
    /// Registers a new plugin.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        debug!("registering plugin: {}", plugin.name());
        self.plugins.push(plugin);
    }

    /// Names of plugins hooked into `event`, in dispatch order.
    pub fn hooked_plugins(&self, event: &LifecycleEvent) -> Vec<&str> {
        self.plugins
            .iter()
            .filter(|plugin| plugin.hooks().contains(event))
            .map(|plugin| plugin.name())
            .collect()
    }

    /// Checks that every hook a plugin declares belongs to a known lifecycle.
    ///
    /// # Errors
    /// Returns an error naming the first plugin with an unknown hook.
    pub fn validate_hooks(&self) -> Result<()> {
        for plugin in &self.plugins {
            if let Some(unknown) = plugin.hooks().iter().find(|event| !event.is_known()) {
                return Err(anyhow!(
                    "plugin '{}' hooks into unknown lifecycle event '{}'",
                    plugin.name(),
                    unknown
                ));
            }
        }
        Ok(())
    }

    /// Runs the full lifecycle of `command`, firing before/at/after hooks for each event.
    ///
    /// The first failing hook aborts the run.
    #[instrument(skip(self, ctx))]
    pub fn run(&self, command: &str, ctx: &mut HookContext<'_>) -> Result<()> {
        let events = lifecycle_events(command)
            .ok_or_else(|| anyhow!("unknown lifecycle command '{}'", command))?;

        for event_name in events {
            for phase in [HookPhase::Before, HookPhase::At, HookPhase::After] {
                let event = LifecycleEvent::new(phase, command, event_name);
                self.fire(&event, ctx)?;
            }
        }
        Ok(())
    }

    fn fire(&self, event: &LifecycleEvent, ctx: &mut HookContext<'_>) -> Result<()> {
        for plugin in &self.plugins {
            if !plugin.hooks().contains(event) {
                continue;
            }
            debug!("running {} hook of {}", event, plugin.name());
            plugin
                .run_hook(event, ctx)
                .with_context(|| format!("{} hook of plugin '{}' failed", event, plugin.name()))?;
        }
        Ok(())
    }
}
