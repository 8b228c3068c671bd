//! Integration tests for `packcheck inspect --json` output.

use std::process::Command;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "packcheck-cli", "--bin", "packcheck", "--"]);
    cmd
}

const WEB_CONFIG: &str = r#"'use strict';
const path = require('path');

module.exports = {
    devtool: 'inline-source-map',
    entry: './src/index.ts',
    output: {
        path: path.resolve(__dirname, './dist'),
        publicPath: '/dist/',
        filename: 'bundle.js'
    },
    module: {
        rules: [
            { test: /\.tsx?$/, loader: 'ts-loader', exclude: /node_modules/ },
            { test: /\.(png|jpg|gif|svg)$/, loader: 'file-loader', options: { name: '[name].[ext]?[hash]' } },
            { test: /\.css$/, use: ['css-loader'] }
        ]
    },
    resolve: {
        extensions: ['.ts', '.tsx', '.js', '.json']
    },
    devServer: {
        historyApiFallback: true,
        noInfo: true
    },
    performance: {
        hints: false
    }
};
"#;

#[test]
fn test_inspect_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("webpack.config.js"), WEB_CONFIG).unwrap();

    let output = cargo_bin()
        .args(["--cwd", dir.path().to_str().unwrap(), "--json", "inspect"])
        .output()
        .expect("Failed to run inspect command");

    assert!(output.status.success(), "inspect should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    assert_eq!(json["config_schema_version"].as_u64(), Some(1));
    assert!(json.get("path").is_some(), "Missing path");

    let config = &json["config"];
    assert_eq!(config["entry"], "./src/index.ts");
    assert_eq!(config["output"]["filename"], "bundle.js");
    assert_eq!(config["output"]["publicPath"], "/dist/");
    assert_eq!(config["output"]["path"], "./dist");

    // Rule patterns keep their literal form
    let rules = config["module"]["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0]["test"], "/\\.tsx?$/");
    assert_eq!(rules[0]["loader"], "ts-loader");
    assert_eq!(rules[0]["exclude"], "/node_modules/");
    assert_eq!(rules[2]["use"][0], "css-loader");

    // Extension order is preserved
    let extensions = config["resolve"]["extensions"].as_array().unwrap();
    let exts: Vec<&str> = extensions.iter().map(|e| e.as_str().unwrap()).collect();
    assert_eq!(exts, [".ts", ".tsx", ".js", ".json"]);

    // Absent dev-server fields stay absent (no null backfill)
    let server = &config["devServer"];
    assert!(server.get("port").is_none(), "port should be absent");
    assert!(server.get("hot").is_none(), "hot should be absent");
    assert_eq!(server["historyApiFallback"], true);
}

#[test]
fn test_inspect_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = cargo_bin()
        .args(["--cwd", dir.path().to_str().unwrap(), "--json", "inspect"])
        .output()
        .expect("Failed to run inspect command");

    assert!(!output.status.success(), "inspect should fail with no config");
}

#[test]
fn test_inspect_explicit_config_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("custom.config.js"), WEB_CONFIG).unwrap();

    let output = cargo_bin()
        .args([
            "--cwd",
            dir.path().to_str().unwrap(),
            "--json",
            "inspect",
            "--config",
            "custom.config.js",
        ])
        .output()
        .expect("Failed to run inspect command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["config"]["entry"], "./src/index.ts");
}
