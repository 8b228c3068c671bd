pub mod check;
pub mod diff;
pub mod explain;
pub mod init;
pub mod inspect;
pub mod version;

use miette::{IntoDiagnostic, Result};
use packcheck_core::config::load::{load_config, CONFIG_FILES};
use packcheck_core::BundlerConfig;
use std::path::{Path, PathBuf};

/// Load the config record for commands that require one.
///
/// Turns "no config discovered" into a user-facing error naming the
/// file names that were tried.
pub(crate) fn load_required(
    cwd: &Path,
    config_path: Option<&Path>,
) -> Result<(PathBuf, BundlerConfig)> {
    match load_config(cwd, config_path) {
        Ok(Some(found)) => Ok(found),
        Ok(None) => Err(miette::miette!(
            "No config file found in {} (looked for {})",
            cwd.display(),
            CONFIG_FILES.join(", ")
        )),
        Err(e) => Err(miette::miette!("{e}")),
    }
}

/// Serialize a report as pretty JSON to stdout.
pub(crate) fn print_json<T: serde::Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).into_diagnostic()?;
    println!("{json}");
    Ok(())
}
