//! Structural diff between two configuration records.
//!
//! The two source records this tool was built around are
//! near-duplicates that drifted apart (entry name, dev-server block,
//! style chain). Rather than guessing which divergences are
//! intentional, the diff makes every one observable: each divergence
//! carries a dotted field path and both sides' values, with `None`
//! marking absence.

use serde::{Deserialize, Serialize};

use crate::config::BundlerConfig;
use crate::error::Error;

/// Diff report schema version. Bump when changing the JSON structure.
pub const DIFF_SCHEMA_VERSION: u32 = 1;

/// One point where the two records disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    /// Dotted field path, e.g. `devServer.port` or `module.rules[2].use[0]`.
    pub path: String,
    /// Left record's value; `None` when the field is absent there.
    pub left: Option<serde_json::Value>,
    /// Right record's value; `None` when the field is absent there.
    pub right: Option<serde_json::Value>,
}

/// The full diff between two records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffReport {
    pub diff_schema_version: u32,
    pub left: String,
    pub right: String,
    pub divergences: Vec<Divergence>,
}

impl DiffReport {
    /// Compare two records, labelled by where they were loaded from.
    pub fn between(
        left_name: &str,
        right_name: &str,
        left: &BundlerConfig,
        right: &BundlerConfig,
    ) -> Result<Self, Error> {
        let a = serde_json::to_value(left).map_err(|e| Error::other(e.to_string()))?;
        let b = serde_json::to_value(right).map_err(|e| Error::other(e.to_string()))?;

        let mut divergences = Vec::new();
        diff_value("", &a, &b, &mut divergences);

        Ok(Self {
            diff_schema_version: DIFF_SCHEMA_VERSION,
            left: left_name.to_string(),
            right: right_name.to_string(),
            divergences,
        })
    }

    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.divergences.is_empty()
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Recursive value diff. Objects recurse over the union of their
/// keys (sorted, so output order is stable); arrays recurse by index;
/// anything else diverges when unequal.
fn diff_value(
    path: &str,
    left: &serde_json::Value,
    right: &serde_json::Value,
    out: &mut Vec<Divergence>,
) {
    use serde_json::Value;

    match (left, right) {
        (Value::Object(a), Value::Object(b)) => {
            let mut keys: Vec<&String> = a.keys().chain(b.keys()).collect();
            keys.sort();
            keys.dedup();

            for key in keys {
                let sub = join_path(path, key);
                match (a.get(key), b.get(key)) {
                    (Some(av), Some(bv)) => diff_value(&sub, av, bv, out),
                    (Some(av), None) => out.push(Divergence {
                        path: sub,
                        left: Some(av.clone()),
                        right: None,
                    }),
                    (None, Some(bv)) => out.push(Divergence {
                        path: sub,
                        left: None,
                        right: Some(bv.clone()),
                    }),
                    (None, None) => unreachable!(),
                }
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            let len = a.len().max(b.len());
            for i in 0..len {
                let sub = format!("{path}[{i}]");
                match (a.get(i), b.get(i)) {
                    (Some(av), Some(bv)) => diff_value(&sub, av, bv, out),
                    (Some(av), None) => out.push(Divergence {
                        path: sub,
                        left: Some(av.clone()),
                        right: None,
                    }),
                    (None, Some(bv)) => out.push(Divergence {
                        path: sub,
                        left: None,
                        right: Some(bv.clone()),
                    }),
                    (None, None) => unreachable!(),
                }
            }
        }
        (a, b) => {
            if a != b {
                out.push(Divergence {
                    path: path.to_string(),
                    left: Some(a.clone()),
                    right: Some(b.clone()),
                });
            }
        }
    }
}
