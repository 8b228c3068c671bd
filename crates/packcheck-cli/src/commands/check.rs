use miette::{IntoDiagnostic, Result};
use packcheck_core::check::{CheckReport, Severity};
use std::io::{self, Write};
use std::path::Path;

use super::{load_required, print_json};

/// Run the check command.
///
/// Exits with status 1 when any error-severity finding remains after
/// the severity filter; clap validates `severity`/`format` before we
/// get here.
pub fn run(
    cwd: &Path,
    config_path: Option<&Path>,
    severity: &str,
    format: &str,
    json: bool,
) -> Result<()> {
    let (path, config) = load_required(cwd, config_path)?;
    tracing::debug!(path = %path.display(), "checking config record");

    let min = Severity::parse(severity).unwrap_or(Severity::Info);
    let report =
        CheckReport::collect(&config, Some(path.display().to_string())).filtered(min);

    if json {
        print_json(&report)?;
    } else {
        print_human(&report, format)?;
    }

    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_human(report: &CheckReport, format: &str) -> Result<()> {
    let mut out = io::stdout().lock();

    if let Some(path) = &report.path {
        w(&mut out, &format!("Config: {path}\n\n"))?;
    }

    if report.findings.is_empty() {
        w(&mut out, "\x1b[32mNo findings\x1b[0m\n")?;
        out.flush().into_diagnostic()?;
        return Ok(());
    }

    if format == "summary" {
        w(
            &mut out,
            &format!(
                "{} error(s), {} warning(s), {} note(s)\n\n",
                report.count(Severity::Error),
                report.count(Severity::Warn),
                report.count(Severity::Info)
            ),
        )?;
    }

    for finding in &report.findings {
        let prefix = match finding.severity {
            Severity::Info => "\x1b[34minfo\x1b[0m",
            Severity::Warn => "\x1b[33mwarn\x1b[0m",
            Severity::Error => "\x1b[31merror\x1b[0m",
        };
        w(
            &mut out,
            &format!("  [{prefix}] {}: {}\n", finding.code, finding.message),
        )?;
    }

    out.flush().into_diagnostic()?;
    Ok(())
}

fn w(out: &mut impl Write, s: &str) -> Result<()> {
    out.write_all(s.as_bytes()).into_diagnostic()
}
