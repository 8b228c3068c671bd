//! Integration tests for `packcheck diff --json` output and exit codes.

use std::process::Command;

fn cargo_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO"));
    cmd.args(["run", "-p", "packcheck-cli", "--bin", "packcheck", "--"]);
    cmd
}

const WEB_CONFIG: &str = r#"
module.exports = {
    entry: './src/index.ts',
    output: { publicPath: '/dist/', filename: 'bundle.js' },
    module: {
        rules: [
            { test: /\.tsx?$/, loader: 'ts-loader', exclude: /node_modules/ },
            { test: /\.css$/, use: ['css-loader'] }
        ]
    },
    resolve: { extensions: ['.ts', '.tsx', '.js', '.json'] },
    devServer: { historyApiFallback: true, noInfo: true }
};
"#;

const APP_CONFIG: &str = r#"
module.exports = {
    entry: './src/main.ts',
    output: { publicPath: '/dist/', filename: 'bundle.js' },
    module: {
        rules: [
            { test: /\.tsx?$/, loader: 'ts-loader', exclude: /node_modules/ },
            { test: /\.css$/, use: ['style-loader', 'css-loader'] }
        ]
    },
    resolve: { extensions: ['.ts', '.tsx', '.js'] },
    devServer: { port: 8080, historyApiFallback: true, hot: true, inline: true }
};
"#;

#[test]
fn test_diff_divergent_records() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("web.config.js"), WEB_CONFIG).unwrap();
    std::fs::write(dir.path().join("app.config.js"), APP_CONFIG).unwrap();

    let output = cargo_bin()
        .args([
            "--cwd",
            dir.path().to_str().unwrap(),
            "--json",
            "diff",
            "web.config.js",
            "app.config.js",
        ])
        .output()
        .expect("Failed to run diff command");

    assert_eq!(output.status.code(), Some(1), "divergent records exit 1");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    assert_eq!(json["diff_schema_version"].as_u64(), Some(1));

    let paths: Vec<&str> = json["divergences"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["path"].as_str().unwrap())
        .collect();

    assert!(paths.contains(&"entry"));
    assert!(paths.contains(&"devServer.port"));
    assert!(paths.contains(&"devServer.hot"));
    assert!(paths.contains(&"module.rules[1].use[0]"));

    // Shared values do not show up
    assert!(!paths.contains(&"output.filename"));

    let port = json["divergences"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["path"] == "devServer.port")
        .unwrap();
    assert!(port["left"].is_null());
    assert_eq!(port["right"].as_u64(), Some(8080));
}

#[test]
fn test_diff_identical_records() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.config.js"), WEB_CONFIG).unwrap();
    std::fs::write(dir.path().join("b.config.js"), WEB_CONFIG).unwrap();

    let output = cargo_bin()
        .args([
            "--cwd",
            dir.path().to_str().unwrap(),
            "--json",
            "diff",
            "a.config.js",
            "b.config.js",
        ])
        .output()
        .expect("Failed to run diff command");

    assert!(output.status.success(), "identical records exit 0");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(json["divergences"].as_array().unwrap().is_empty());
}

#[test]
fn test_diff_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.config.js"), WEB_CONFIG).unwrap();

    let output = cargo_bin()
        .args([
            "--cwd",
            dir.path().to_str().unwrap(),
            "diff",
            "a.config.js",
            "missing.config.js",
        ])
        .output()
        .expect("Failed to run diff command");

    assert!(!output.status.success());
}
