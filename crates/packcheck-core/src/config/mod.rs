//! Typed model of a bundler configuration record.
//!
//! Mirrors the webpack config surface the tool cares about: entry,
//! output descriptor, module rules, resolution extensions, dev-server
//! options, and performance hints. Every field is optional except a
//! rule's `test` pattern; absence round-trips as absence (no `null`
//! backfill), because for several fields absence *is* the meaningful
//! default state.

pub mod load;
mod pattern;

pub use pattern::RulePattern;

use serde::{Deserialize, Serialize};

/// Schema version for the `inspect` JSON output. Bump when changing
/// the JSON structure.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// One bundler configuration record, as loaded from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BundlerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,

    /// Root module path the bundler starts dependency resolution from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve: Option<ResolveOptions>,

    #[serde(rename = "devServer", skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceOptions>,

    /// Top-level keys the model does not type. Preserved so inspect
    /// and diff never silently drop data.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Where bundled output lands: `{ path, publicPath, filename }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutputOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// URL path prefix the dev server serves output under.
    #[serde(rename = "publicPath", skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// The ordered module transformation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModuleOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

/// One (pattern, loader chain, options) transformation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// File pattern the rule applies to.
    pub test: RulePattern,

    /// Single-loader form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<String>,

    /// Multi-loader form, applied right-to-left by the bundler.
    #[serde(rename = "use", default, skip_serializing_if = "Vec::is_empty")]
    pub use_chain: Vec<String>,

    /// Paths the rule must not apply to (e.g. the dependency directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<RulePattern>,

    /// Loader options, preserved verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Rule {
    /// The loader chain, regardless of which form declared it.
    ///
    /// A rule declaring both `loader` and `use` is a configuration
    /// error upstream; both are reported here (loader first) so
    /// neither is silently dropped, and `check` flags the rule.
    #[must_use]
    pub fn loader_chain(&self) -> Vec<&str> {
        let mut chain: Vec<&str> = Vec::new();
        if let Some(l) = &self.loader {
            chain.push(l.as_str());
        }
        chain.extend(self.use_chain.iter().map(String::as_str));
        chain
    }

    /// Whether the rule declares both `loader` and `use`.
    #[must_use]
    pub fn has_ambiguous_loader(&self) -> bool {
        self.loader.is_some() && !self.use_chain.is_empty()
    }

    /// Classify the rule by the extensions its pattern matches.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        if self.test.matches_extension("ts") || self.test.matches_extension("tsx") {
            RuleKind::Script
        } else if ["png", "jpg", "gif", "svg"]
            .iter()
            .any(|e| self.test.matches_extension(e))
        {
            RuleKind::Image
        } else if self.test.matches_extension("css") {
            RuleKind::Style
        } else {
            RuleKind::Other
        }
    }

    /// Whether the rule's exclude pattern covers the dependency directory.
    #[must_use]
    pub fn excludes_dependencies(&self) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|p| p.is_match("node_modules/x.ts"))
    }
}

/// Broad rule category, derived from the `test` pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Script,
    Image,
    Style,
    Other,
}

/// Extension list consulted when resolving extensionless imports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResolveOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
}

impl ResolveOptions {
    /// Candidate file names for an extensionless specifier, in the
    /// order the extension list implies.
    #[must_use]
    pub fn candidates(&self, specifier: &str) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| format!("{specifier}{ext}"))
            .collect()
    }
}

/// Development-server options. Absence of a field means the external
/// tool's default applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DevServerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(rename = "contentBase", skip_serializing_if = "Option::is_none")]
    pub content_base: Option<String>,

    #[serde(rename = "historyApiFallback", skip_serializing_if = "Option::is_none")]
    pub history_api_fallback: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hot: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,

    #[serde(rename = "noInfo", skip_serializing_if = "Option::is_none")]
    pub no_info: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerformanceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<PerformanceHints>,
}

/// `performance.hints` is either a boolean (`false` disables hints)
/// or a level string (`"warning"`, `"error"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerformanceHints {
    Flag(bool),
    Level(String),
}

impl BundlerConfig {
    /// The module rules, or an empty slice when no `module` block exists.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        self.module.as_ref().map_or(&[], |m| m.rules.as_slice())
    }

    /// Rules whose `test` pattern matches the given path, in rule order.
    #[must_use]
    pub fn matching_rules(&self, path: &str) -> Vec<(usize, &Rule)> {
        self.rules()
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.test.is_match(path))
            .collect()
    }
}

/// Stable JSON envelope for `packcheck inspect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigReport {
    pub config_schema_version: u32,
    /// The file the record was loaded from.
    pub path: String,
    pub config: BundlerConfig,
}

impl ConfigReport {
    #[must_use]
    pub fn new(path: String, config: BundlerConfig) -> Self {
        Self {
            config_schema_version: CONFIG_SCHEMA_VERSION,
            path,
            config,
        }
    }
}
