use miette::{IntoDiagnostic, Result};
use packcheck_core::config::{ConfigReport, Rule};
use std::io::{self, Write};
use std::path::Path;

use super::{load_required, print_json};

/// Run the inspect command.
///
/// When `json` is true, outputs a single JSON object to stdout.
/// Otherwise, outputs human-readable formatted text to stdout.
pub fn run(cwd: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let (path, config) = load_required(cwd, config_path)?;
    tracing::debug!(path = %path.display(), "loaded config record");

    let report = ConfigReport::new(path.display().to_string(), config);

    if json {
        print_json(&report)?;
    } else {
        print_human(&report)?;
    }

    Ok(())
}

fn print_human(report: &ConfigReport) -> Result<()> {
    let mut out = io::stdout().lock();
    let config = &report.config;

    w(&mut out, &format!("Config: {}\n\n", report.path))?;

    w(&mut out, "\x1b[1m## Entry\x1b[0m\n")?;
    w(
        &mut out,
        &format!(
            "  Entry:          {}\n",
            config.entry.as_deref().unwrap_or("(none)")
        ),
    )?;
    if let Some(devtool) = &config.devtool {
        w(&mut out, &format!("  Devtool:        {devtool}\n"))?;
    }
    w(&mut out, "\n")?;

    w(&mut out, "\x1b[1m## Output\x1b[0m\n")?;
    match &config.output {
        Some(output) => {
            w(
                &mut out,
                &format!(
                    "  Path:           {}\n",
                    output.path.as_deref().unwrap_or("(default)")
                ),
            )?;
            w(
                &mut out,
                &format!(
                    "  Public path:    {}\n",
                    output.public_path.as_deref().unwrap_or("(default)")
                ),
            )?;
            w(
                &mut out,
                &format!(
                    "  Filename:       {}\n",
                    output.filename.as_deref().unwrap_or("(default)")
                ),
            )?;
        }
        None => w(&mut out, "  (not configured)\n")?,
    }
    w(&mut out, "\n")?;

    let rules = config.rules();
    w(
        &mut out,
        &format!("\x1b[1m## Rules\x1b[0m ({} total)\n", rules.len()),
    )?;
    for (i, rule) in rules.iter().enumerate() {
        print_rule(&mut out, i, rule)?;
    }
    w(&mut out, "\n")?;

    w(&mut out, "\x1b[1m## Resolve\x1b[0m\n")?;
    match &config.resolve {
        Some(resolve) if !resolve.extensions.is_empty() => {
            w(
                &mut out,
                &format!("  Extensions:     {}\n", resolve.extensions.join(", ")),
            )?;
        }
        _ => w(&mut out, "  (not configured)\n")?,
    }
    w(&mut out, "\n")?;

    w(&mut out, "\x1b[1m## Dev server\x1b[0m\n")?;
    match &config.dev_server {
        Some(server) => {
            if let Some(port) = server.port {
                w(&mut out, &format!("  Port:           {port}\n"))?;
            }
            if let Some(base) = &server.content_base {
                w(&mut out, &format!("  Content base:   {base}\n"))?;
            }
            if let Some(fallback) = server.history_api_fallback {
                w(
                    &mut out,
                    &format!("  History fallback: {}\n", yes_no(fallback)),
                )?;
            }
            if let Some(hot) = server.hot {
                w(&mut out, &format!("  Hot reload:     {}\n", yes_no(hot)))?;
            }
            if let Some(inline) = server.inline {
                w(&mut out, &format!("  Inline:         {}\n", yes_no(inline)))?;
            }
            if let Some(no_info) = server.no_info {
                w(&mut out, &format!("  Quiet logs:     {}\n", yes_no(no_info)))?;
            }
        }
        None => w(&mut out, "  (not configured)\n")?,
    }

    out.flush().into_diagnostic()?;
    Ok(())
}

fn print_rule(out: &mut impl Write, index: usize, rule: &Rule) -> Result<()> {
    w(
        out,
        &format!(
            "  [{index}] {} -> {}",
            rule.test,
            rule.loader_chain().join(" | ")
        ),
    )?;
    if let Some(exclude) = &rule.exclude {
        w(out, &format!("  (exclude {exclude})"))?;
    }
    w(out, "\n")
}

fn w(out: &mut impl Write, s: &str) -> Result<()> {
    out.write_all(s.as_bytes()).into_diagnostic()
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}
