use miette::{IntoDiagnostic, Result};
use packcheck_core::config::load::load_config_file;
use packcheck_core::diff::DiffReport;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::print_json;

/// Run the diff command.
///
/// Exits with status 1 when the records diverge, so scripts can use
/// diff as a drift gate.
pub fn run(cwd: &Path, left: &Path, right: &Path, format: &str, json: bool) -> Result<()> {
    let left_path = absolutize(cwd, left);
    let right_path = absolutize(cwd, right);

    let left_config = load_config_file(&left_path).map_err(|e| miette::miette!("{e}"))?;
    let right_config = load_config_file(&right_path).map_err(|e| miette::miette!("{e}"))?;

    let report = DiffReport::between(
        &left.display().to_string(),
        &right.display().to_string(),
        &left_config,
        &right_config,
    )
    .map_err(|e| miette::miette!("{e}"))?;

    if json {
        print_json(&report)?;
    } else {
        print_human(&report, format)?;
    }

    if !report.is_identical() {
        std::process::exit(1);
    }
    Ok(())
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn print_human(report: &DiffReport, format: &str) -> Result<()> {
    let mut out = io::stdout().lock();

    if report.is_identical() {
        w(
            &mut out,
            &format!(
                "\x1b[32mIdentical\x1b[0m: {} and {}\n",
                report.left, report.right
            ),
        )?;
        out.flush().into_diagnostic()?;
        return Ok(());
    }

    w(
        &mut out,
        &format!(
            "{} divergence(s) between {} and {}\n\n",
            report.divergences.len(),
            report.left,
            report.right
        ),
    )?;

    for d in &report.divergences {
        if format == "list" {
            w(
                &mut out,
                &format!(
                    "  {}: {} -> {}\n",
                    d.path,
                    render(d.left.as_ref()),
                    render(d.right.as_ref())
                ),
            )?;
        } else {
            w(&mut out, &format!("  {}:\n", d.path))?;
            w(
                &mut out,
                &format!("    \x1b[31m- {}\x1b[0m\n", render(d.left.as_ref())),
            )?;
            w(
                &mut out,
                &format!("    \x1b[32m+ {}\x1b[0m\n", render(d.right.as_ref())),
            )?;
        }
    }

    out.flush().into_diagnostic()?;
    Ok(())
}

fn render(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(absent)".to_string(),
    }
}

fn w(out: &mut impl Write, s: &str) -> Result<()> {
    out.write_all(s.as_bytes()).into_diagnostic()
}
