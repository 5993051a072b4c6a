//! Core abstractions for the selective-deploy workspace.
//!
//! This crate defines the service manifest, the ordered function registry,
//! lifecycle events, the plugin contract and dispatcher, schema declarations,
//! and the log channels plugins report through.

pub mod config;
pub mod constants;
pub mod lifecycle;
pub mod log;
pub mod plugin;
pub mod schema;
pub mod unit;

pub use config::{ProviderConfig, ServiceConfig, ValidationMode};
pub use lifecycle::{HookPhase, LifecycleEvent, LifecycleParseError};
pub use log::{DeployLog, MemoryLog, TracingLog};
pub use plugin::{HookContext, Options, Plugin, PluginManager};
pub use schema::{ConfigSchemaHandler, PropertySchema, PropertyType, SchemaHandler, SchemaViolation};
pub use unit::{FunctionRegistry, Unit, UnitStore};
