use miette::{IntoDiagnostic, Result};
use packcheck_core::Explanation;
use std::io::{self, Write};
use std::path::Path;

use super::{load_required, print_json};

/// Run the explain command.
pub fn run(cwd: &Path, file: &str, config_path: Option<&Path>, json: bool) -> Result<()> {
    let (path, config) = load_required(cwd, config_path)?;
    tracing::debug!(path = %path.display(), file, "explaining file against config record");

    let explanation = Explanation::collect(&config, file);

    if json {
        print_json(&explanation)?;
    } else {
        print_human(&explanation)?;
    }

    Ok(())
}

fn print_human(e: &Explanation) -> Result<()> {
    let mut out = io::stdout().lock();

    w(&mut out, &format!("File: {}\n\n", e.file))?;

    w(&mut out, "\x1b[1m## Matching rules\x1b[0m\n")?;
    if e.matches.is_empty() {
        w(&mut out, "  (none; the file passes through untransformed)\n")?;
    }
    for m in &e.matches {
        let status = if m.excluded {
            " \x1b[33m(excluded)\x1b[0m"
        } else {
            ""
        };
        w(
            &mut out,
            &format!(
                "  [{}] {} -> {}{status}\n",
                m.index,
                m.pattern,
                m.loaders.join(" | ")
            ),
        )?;
    }

    if !e.resolve_candidates.is_empty() {
        w(&mut out, "\n\x1b[1m## Resolution candidates\x1b[0m\n")?;
        for (i, candidate) in e.resolve_candidates.iter().enumerate() {
            w(&mut out, &format!("  {}. {candidate}\n", i + 1))?;
        }
    }

    out.flush().into_diagnostic()?;
    Ok(())
}

fn w(out: &mut impl Write, s: &str) -> Result<()> {
    out.write_all(s.as_bytes()).into_diagnostic()
}
