//! Constants used across the selective-deploy workspace.

/// The filename for the service manifest.
pub const CONFIG_FILE: &str = "sdeploy.toml";

/// Default location of the packaged manifest written after the package lifecycle.
pub const DEFAULT_PACKAGE_OUTPUT: &str = ".sdeploy/manifest.json";

/// Provider assumed when the manifest does not name one.
pub const DEFAULT_PROVIDER: &str = "aws";

/// Events of the `package` command, in the order they fire.
pub const PACKAGE_LIFECYCLE: &[&str] = &[
    "cleanup",
    "initialize",
    "setupProviderConfiguration",
    "createDeploymentArtifacts",
    "compileLayers",
    "compileFunctions",
    "compileEvents",
    "finalize",
];
