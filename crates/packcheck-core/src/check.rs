//! Structural checks over a configuration record.
//!
//! Each finding carries a stable code, a severity, and a
//! human-readable message. Codes are part of the public JSON contract
//! and must not change; new codes may be added in future versions.
//!
//! Absence of an optional block (e.g. no `devServer` at all) is the
//! documented default state and produces no finding by itself; checks
//! only fire on fields a record actually needs or actively gets wrong.

use serde::{Deserialize, Serialize};

use crate::config::{BundlerConfig, Rule, RuleKind};

/// Check report schema version. Bump when changing the JSON structure.
pub const CHECK_SCHEMA_VERSION: u32 = 1;

/// Finding severity levels, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Parse a severity name as used on the CLI.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// A check finding with a stable code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Stable finding code (e.g. `ENTRY_MISSING`).
    pub code: String,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

impl Finding {
    #[must_use]
    pub fn info(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warn(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Warn,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Stable finding codes. These are part of the public API and must not
/// change. New codes may be added in future versions.
pub mod codes {
    pub const ENTRY_MISSING: &str = "ENTRY_MISSING";
    pub const OUTPUT_MISSING: &str = "OUTPUT_MISSING";
    pub const OUTPUT_FILENAME_MISSING: &str = "OUTPUT_FILENAME_MISSING";
    pub const PUBLIC_PATH_NO_TRAILING_SLASH: &str = "PUBLIC_PATH_NO_TRAILING_SLASH";
    pub const SCRIPT_RULE_MISSING: &str = "SCRIPT_RULE_MISSING";
    pub const SCRIPT_RULE_DUPLICATE: &str = "SCRIPT_RULE_DUPLICATE";
    pub const SCRIPT_RULE_NO_EXCLUDE: &str = "SCRIPT_RULE_NO_EXCLUDE";
    pub const IMAGE_RULE_MISSING: &str = "IMAGE_RULE_MISSING";
    pub const STYLE_RULE_MISSING: &str = "STYLE_RULE_MISSING";
    pub const RULE_NO_LOADER: &str = "RULE_NO_LOADER";
    pub const RULE_AMBIGUOUS_LOADER: &str = "RULE_AMBIGUOUS_LOADER";
    pub const RESOLVE_EXTENSIONS_MISSING: &str = "RESOLVE_EXTENSIONS_MISSING";
    pub const RESOLVE_EXTENSION_ORDER: &str = "RESOLVE_EXTENSION_ORDER";
    pub const RESOLVE_EXTENSION_NO_DOT: &str = "RESOLVE_EXTENSION_NO_DOT";
    pub const DEV_SERVER_PORT_PRIVILEGED: &str = "DEV_SERVER_PORT_PRIVILEGED";
}

/// The result of running all checks over one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub check_schema_version: u32,
    /// The file the record was loaded from, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    /// Run all checks over a record.
    #[must_use]
    pub fn collect(config: &BundlerConfig, path: Option<String>) -> Self {
        let mut findings = Vec::new();

        check_entry(config, &mut findings);
        check_output(config, &mut findings);
        check_rules(config, &mut findings);
        check_resolve(config, &mut findings);
        check_dev_server(config, &mut findings);

        Self {
            check_schema_version: CHECK_SCHEMA_VERSION,
            path,
            findings,
        }
    }

    /// Drop findings below the given severity.
    #[must_use]
    pub fn filtered(mut self, min: Severity) -> Self {
        self.findings.retain(|f| f.severity >= min);
        self
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

fn check_entry(config: &BundlerConfig, findings: &mut Vec<Finding>) {
    if config.entry.is_none() {
        findings.push(Finding::error(
            codes::ENTRY_MISSING,
            "no entry point; the bundler has no root module to start from",
        ));
    }
}

fn check_output(config: &BundlerConfig, findings: &mut Vec<Finding>) {
    let Some(output) = &config.output else {
        findings.push(Finding::warn(
            codes::OUTPUT_MISSING,
            "no output block; bundled files land in the tool's default location",
        ));
        return;
    };

    if output.filename.is_none() {
        findings.push(Finding::warn(
            codes::OUTPUT_FILENAME_MISSING,
            "output block has no filename",
        ));
    }

    if let Some(public_path) = &output.public_path {
        if !public_path.ends_with('/') {
            findings.push(Finding::warn(
                codes::PUBLIC_PATH_NO_TRAILING_SLASH,
                format!("publicPath '{public_path}' should end with '/'"),
            ));
        }
    }
}

fn check_rules(config: &BundlerConfig, findings: &mut Vec<Finding>) {
    let rules = config.rules();

    for (i, rule) in rules.iter().enumerate() {
        if rule.loader_chain().is_empty() {
            findings.push(Finding::error(
                codes::RULE_NO_LOADER,
                format!("rule {} ({}) has neither `loader` nor `use`", i, rule.test),
            ));
        }
        if rule.has_ambiguous_loader() {
            findings.push(Finding::error(
                codes::RULE_AMBIGUOUS_LOADER,
                format!(
                    "rule {} ({}) declares both `loader` and `use`; the bundler rejects this",
                    i, rule.test
                ),
            ));
        }
    }

    let script: Vec<&Rule> = rules.iter().filter(|r| r.kind() == RuleKind::Script).collect();
    match script.len() {
        0 => findings.push(Finding::error(
            codes::SCRIPT_RULE_MISSING,
            "no rule matches TypeScript files (.ts/.tsx)",
        )),
        1 => {}
        n => findings.push(Finding::warn(
            codes::SCRIPT_RULE_DUPLICATE,
            format!("{n} rules match TypeScript files; expected exactly one"),
        )),
    }

    for rule in &script {
        if !rule.excludes_dependencies() {
            findings.push(Finding::warn(
                codes::SCRIPT_RULE_NO_EXCLUDE,
                format!(
                    "script rule {} does not exclude the dependency directory",
                    rule.test
                ),
            ));
        }
    }

    if !rules.iter().any(|r| r.kind() == RuleKind::Image) {
        findings.push(Finding::info(
            codes::IMAGE_RULE_MISSING,
            "no rule matches image files (png/jpg/gif/svg)",
        ));
    }

    if !rules.iter().any(|r| r.kind() == RuleKind::Style) {
        findings.push(Finding::info(
            codes::STYLE_RULE_MISSING,
            "no rule matches stylesheet files (.css)",
        ));
    }
}

fn check_resolve(config: &BundlerConfig, findings: &mut Vec<Finding>) {
    let extensions = config
        .resolve
        .as_ref()
        .map_or(&[] as &[String], |r| r.extensions.as_slice());

    if extensions.is_empty() {
        findings.push(Finding::warn(
            codes::RESOLVE_EXTENSIONS_MISSING,
            "no resolve.extensions list; extensionless imports will not resolve to .ts",
        ));
        return;
    }

    let dotless: Vec<&str> = extensions
        .iter()
        .filter(|e| !e.starts_with('.'))
        .map(String::as_str)
        .collect();
    if !dotless.is_empty() {
        findings.push(Finding::warn(
            codes::RESOLVE_EXTENSION_NO_DOT,
            format!(
                "extensions without a leading dot: {}",
                dotless.join(", ")
            ),
        ));
    }

    // .ts, .tsx, .js must all be present and in that relative order.
    let pos = |ext: &str| extensions.iter().position(|e| e == ext);
    let ordered = matches!(
        (pos(".ts"), pos(".tsx"), pos(".js")),
        (Some(ts), Some(tsx), Some(js)) if ts < tsx && tsx < js
    );
    if !ordered {
        findings.push(Finding::warn(
            codes::RESOLVE_EXTENSION_ORDER,
            "resolve.extensions should list .ts, .tsx, .js in that relative order",
        ));
    }
}

fn check_dev_server(config: &BundlerConfig, findings: &mut Vec<Finding>) {
    let Some(server) = &config.dev_server else {
        return;
    };

    if let Some(port) = server.port {
        if port < 1024 {
            findings.push(Finding::warn(
                codes::DEV_SERVER_PORT_PRIVILEGED,
                format!("devServer.port {port} is a privileged port"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load::parse_config_source;
    use crate::fixtures::{APP_CONFIG, WEB_CONFIG};

    fn collect(source: &str) -> CheckReport {
        let config = parse_config_source(source).unwrap();
        CheckReport::collect(&config, None)
    }

    fn has_code(report: &CheckReport, code: &str) -> bool {
        report.findings.iter().any(|f| f.code == code)
    }

    #[test]
    fn test_fixture_records_are_clean() {
        for source in [WEB_CONFIG, APP_CONFIG] {
            let report = collect(source);
            assert!(
                !report.has_errors(),
                "unexpected errors: {:?}",
                report.findings
            );
            // .json at the tail of the first record does not disturb ordering
            assert!(!has_code(&report, codes::RESOLVE_EXTENSION_ORDER));
        }
    }

    #[test]
    fn test_empty_record_findings() {
        let report = collect("module.exports = {};");
        assert!(has_code(&report, codes::ENTRY_MISSING));
        assert!(has_code(&report, codes::OUTPUT_MISSING));
        assert!(has_code(&report, codes::SCRIPT_RULE_MISSING));
        assert!(has_code(&report, codes::IMAGE_RULE_MISSING));
        assert!(has_code(&report, codes::STYLE_RULE_MISSING));
        assert!(has_code(&report, codes::RESOLVE_EXTENSIONS_MISSING));
        assert!(report.has_errors());
    }

    #[test]
    fn test_public_path_trailing_slash() {
        let report = collect(
            "module.exports = { entry: './a.ts', output: { publicPath: '/dist', filename: 'b.js' } };",
        );
        assert!(has_code(&report, codes::PUBLIC_PATH_NO_TRAILING_SLASH));
    }

    #[test]
    fn test_duplicate_script_rules() {
        let source = r#"
            module.exports = {
                entry: './a.ts',
                module: {
                    rules: [
                        { test: /\.tsx?$/, loader: 'ts-loader', exclude: /node_modules/ },
                        { test: /\.ts$/, loader: 'babel-loader', exclude: /node_modules/ },
                    ],
                },
            };
        "#;
        let report = collect(source);
        assert!(has_code(&report, codes::SCRIPT_RULE_DUPLICATE));
    }

    #[test]
    fn test_script_rule_without_exclude() {
        let source = r#"
            module.exports = {
                entry: './a.ts',
                module: { rules: [{ test: /\.tsx?$/, loader: 'ts-loader' }] },
            };
        "#;
        let report = collect(source);
        assert!(has_code(&report, codes::SCRIPT_RULE_NO_EXCLUDE));
    }

    #[test]
    fn test_rule_without_loader() {
        let source = r#"
            module.exports = {
                entry: './a.ts',
                module: { rules: [{ test: /\.css$/ }] },
            };
        "#;
        let report = collect(source);
        assert!(has_code(&report, codes::RULE_NO_LOADER));
        assert!(report.has_errors());
    }

    #[test]
    fn test_rule_with_both_loader_and_use() {
        let source = r#"
            module.exports = {
                entry: './a.ts',
                module: {
                    rules: [
                        { test: /\.css$/, loader: 'style-loader', use: ['css-loader'] },
                    ],
                },
            };
        "#;
        let report = collect(source);
        assert!(has_code(&report, codes::RULE_AMBIGUOUS_LOADER));
        assert!(report.has_errors());
    }

    #[test]
    fn test_extension_order_violation() {
        let source = r#"
            module.exports = {
                entry: './a.ts',
                resolve: { extensions: ['.js', '.ts', '.tsx'] },
            };
        "#;
        let report = collect(source);
        assert!(has_code(&report, codes::RESOLVE_EXTENSION_ORDER));
    }

    #[test]
    fn test_extension_missing_dot() {
        let source = r#"
            module.exports = {
                entry: './a.ts',
                resolve: { extensions: ['.ts', '.tsx', '.js', 'json'] },
            };
        "#;
        let report = collect(source);
        assert!(has_code(&report, codes::RESOLVE_EXTENSION_NO_DOT));
    }

    #[test]
    fn test_privileged_port() {
        let source = "module.exports = { entry: './a.ts', devServer: { port: 80 } };";
        let report = collect(source);
        assert!(has_code(&report, codes::DEV_SERVER_PORT_PRIVILEGED));
    }

    #[test]
    fn test_absent_dev_server_is_silent() {
        let report = collect(WEB_CONFIG);
        assert!(!has_code(&report, codes::DEV_SERVER_PORT_PRIVILEGED));
    }

    #[test]
    fn test_severity_filter() {
        let report = collect("module.exports = {};").filtered(Severity::Error);
        assert!(report.findings.iter().all(|f| f.severity == Severity::Error));
        assert!(report.has_errors());
    }

    #[test]
    fn test_severity_parse_and_order() {
        assert_eq!(Severity::parse("warn"), Some(Severity::Warn));
        assert_eq!(Severity::parse("bogus"), None);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }
}
