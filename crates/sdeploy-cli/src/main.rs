use anyhow::{anyhow, Context, Result};
use clap::Parser;

use sdeploy_core::constants::{CONFIG_FILE, DEFAULT_PACKAGE_OUTPUT};
use sdeploy_core::{ConfigSchemaHandler, Options, PluginManager, ServiceConfig, TracingLog};
use sdeploy_filter::SelectiveDeploy;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod executor;
mod styles;

use styles as s;

/// The command-line interface for selective-deploy.
#[derive(Debug, Parser)]
#[command(name = "sdeploy")]
#[command(version)]
#[command(styles = s::get_clap_styles())]
#[command(about = "Package a service, leaving out functions marked toDeploy = false")]
#[command(
    long_about = "Runs the package lifecycle for a service manifest. Functions that set
`toDeploy = false` are removed before deployment artifacts are created; functions
without the flag are packaged as usual.

Commands:
  package           Filter functions and write the packaged manifest
"
)]
pub(crate) struct Cli {
    /// Lifecycle command to run (currently only `package`).
    command: Option<String>,
    /// Path to the service manifest (TOML, or JSON when ending in `.json`).
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,
    /// Show the per-function filter report.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
    /// Print the packaged manifest to stdout instead of writing a file.
    #[arg(long, default_value_t = false)]
    stdout: bool,
    /// Where the packaged manifest is written.
    #[arg(long, default_value = DEFAULT_PACKAGE_OUTPUT)]
    output: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("parsed cli arguments: {:?}", cli);

    let command = match &cli.command {
        Some(cmd) => cmd.as_str(),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            return Ok(());
        }
    };

    if command != "package" {
        return Err(anyhow!("unknown command '{}' (supported: package)", command));
    }

    let cfg = ServiceConfig::load_from_file(&cli.config)
        .with_context(|| format!("unable to load config '{}'", cli.config))?;

    let mut schema = ConfigSchemaHandler::default();
    let mut plugins = PluginManager::default();
    plugins.register(Box::new(SelectiveDeploy::new(&mut schema, &cfg.provider.name)));
    plugins.validate_hooks()?;

    let options = Options {
        verbose: cli.verbose,
    };
    executor::package(&cli, &cfg, &schema, &plugins, &options, &TracingLog)
}
