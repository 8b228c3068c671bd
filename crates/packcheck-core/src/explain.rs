//! Explain how a record treats a given file or import specifier.
//!
//! Pure presentation of the record: lists the rules whose `test`
//! pattern matches, with their loader chains and whether the rule's
//! `exclude` knocks the file back out, and for an extensionless
//! specifier the candidate order `resolve.extensions` implies. No
//! module resolution happens here; nothing touches the filesystem.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{BundlerConfig, RuleKind};

/// Explain report schema version. Bump when changing the JSON structure.
pub const EXPLAIN_SCHEMA_VERSION: u32 = 1;

/// One rule whose pattern matched the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMatch {
    /// Rule position in `module.rules`.
    pub index: usize,
    /// The rule's pattern in literal form.
    pub pattern: String,
    pub kind: RuleKind,
    /// The loader chain the rule routes matches through.
    pub loaders: Vec<String>,
    /// True when the rule's `exclude` pattern also matches, so the
    /// rule does not actually apply.
    pub excluded: bool,
}

/// How the record treats one file or import specifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub explain_schema_version: u32,
    pub file: String,
    /// Matching rules in declaration order.
    pub matches: Vec<RuleMatch>,
    /// For an extensionless specifier, candidate names in resolution
    /// order; empty when the specifier already has an extension.
    pub resolve_candidates: Vec<String>,
}

impl Explanation {
    /// Collect the explanation for one file name or specifier.
    #[must_use]
    pub fn collect(config: &BundlerConfig, file: &str) -> Self {
        let matches = config
            .rules()
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.test.is_match(file))
            .map(|(index, rule)| RuleMatch {
                index,
                pattern: rule.test.literal(),
                kind: rule.kind(),
                loaders: rule
                    .loader_chain()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
                excluded: rule.exclude.as_ref().is_some_and(|p| p.is_match(file)),
            })
            .collect();

        let has_extension = Path::new(file)
            .extension()
            .is_some_and(|e| !e.is_empty());
        let resolve_candidates = if has_extension {
            Vec::new()
        } else {
            config
                .resolve
                .as_ref()
                .map_or_else(Vec::new, |r| r.candidates(file))
        };

        Self {
            explain_schema_version: EXPLAIN_SCHEMA_VERSION,
            file: file.to_string(),
            matches,
            resolve_candidates,
        }
    }
}
