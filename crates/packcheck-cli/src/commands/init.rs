//! `packcheck init` command implementation.
//!
//! Scaffolds a webpack.config.js with the conventional layout:
//! TypeScript entry, `/dist/` output, script/image/style rules, and
//! the `.ts,.tsx,.js` resolution order. Non-destructive: won't
//! overwrite an existing config.

use miette::Result;
use std::io::{self, Write};
use std::path::Path;

use super::print_json;

const DEFAULT_ENTRY: &str = "./src/index.ts";

/// Run the init command.
pub fn run(cwd: &Path, yes: bool, json: bool) -> Result<()> {
    let entry = if yes {
        DEFAULT_ENTRY.to_string()
    } else {
        prompt(&format!("entry point ({DEFAULT_ENTRY}): "))?
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ENTRY.to_string())
    };

    let mut created: Vec<&str> = Vec::new();
    let mut skipped: Vec<&str> = Vec::new();

    let config_path = cwd.join("webpack.config.js");
    if config_path.exists() {
        skipped.push("webpack.config.js");
    } else {
        std::fs::write(&config_path, render_config(&entry))
            .map_err(|e| miette::miette!("Failed to write webpack.config.js: {}", e))?;
        created.push("webpack.config.js");
    }

    if json {
        print_json(&serde_json::json!({
            "created": created,
            "skipped": skipped,
            "entry": entry,
        }))?;
    } else {
        for name in &created {
            println!("created {name}");
        }
        for name in &skipped {
            println!("skipped {name} (already exists)");
        }
    }

    Ok(())
}

fn render_config(entry: &str) -> String {
    format!(
        r#"'use strict';
const path = require('path');

module.exports = {{
  devtool: 'inline-source-map',
  entry: '{entry}',
  output: {{
    path: path.resolve(__dirname, './dist'),
    publicPath: '/dist/',
    filename: 'bundle.js'
  }},
  module: {{
    rules: [
      {{
        test: /\.tsx?$/,
        loader: 'ts-loader',
        exclude: /node_modules/
      }},
      {{
        test: /\.(png|jpg|gif|svg)$/,
        loader: 'file-loader',
        options: {{
          name: '[name].[ext]?[hash]'
        }}
      }},
      {{
        test: /\.css$/,
        use: ['css-loader']
      }}
    ]
  }},
  resolve: {{
    extensions: ['.ts', '.tsx', '.js', '.json']
  }},
  devServer: {{
    historyApiFallback: true,
    noInfo: true
  }},
  performance: {{
    hints: false
  }}
}};
"#
    )
}

fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout()
        .flush()
        .map_err(|e| miette::miette!("Failed to flush stdout: {}", e))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| miette::miette!("Failed to read input: {}", e))?;

    Ok(Some(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use packcheck_core::config::load::parse_config_source;

    #[test]
    fn test_rendered_config_parses_clean() {
        let source = render_config(DEFAULT_ENTRY);
        let config = parse_config_source(&source).unwrap();
        assert_eq!(config.entry.as_deref(), Some(DEFAULT_ENTRY));
        let output = config.output.unwrap();
        assert_eq!(output.filename.as_deref(), Some("bundle.js"));
        assert_eq!(output.public_path.as_deref(), Some("/dist/"));
        assert_eq!(config.module.unwrap().rules.len(), 3);
    }

    #[test]
    fn test_init_is_non_destructive() {
        let dir = tempfile::tempdir().unwrap();
        let existing = "module.exports = { entry: './src/main.ts' };";
        std::fs::write(dir.path().join("webpack.config.js"), existing).unwrap();

        run(dir.path(), true, true).unwrap();

        let after = std::fs::read_to_string(dir.path().join("webpack.config.js")).unwrap();
        assert_eq!(after, existing);
    }

    #[test]
    fn test_init_creates_config() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), true, true).unwrap();
        assert!(dir.path().join("webpack.config.js").exists());
    }
}
