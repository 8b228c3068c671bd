//! Rule patterns: the regex literals webpack configs attach to
//! `test` and `exclude` fields.
//!
//! A pattern keeps its original source text so serialization is
//! byte-stable (`/\.tsx?$/` stays `/\.tsx?$/`), and compiles the
//! source with `regex-lite` for matching. JS regex literals used in
//! practice for file matching are a compatible subset.

use regex_lite::Regex;
use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// A compiled file-matching pattern from a config record.
#[derive(Debug, Clone)]
pub struct RulePattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl RulePattern {
    /// Compile a pattern from regex source text (no surrounding slashes).
    ///
    /// `flags` supports `i` (case-insensitive); other JS flags have no
    /// meaning for path matching and are rejected.
    pub fn new(source: &str, flags: &str) -> Result<Self, Error> {
        for f in flags.chars() {
            if f != 'i' {
                return Err(Error::BadPattern {
                    pattern: source.to_string(),
                    message: format!("unsupported flag '{f}'"),
                });
            }
        }

        let effective = if flags.contains('i') {
            format!("(?i){source}")
        } else {
            source.to_string()
        };

        let regex = Regex::new(&effective).map_err(|e| Error::BadPattern {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source: source.to_string(),
            flags: flags.to_string(),
            regex,
        })
    }

    /// Parse a pattern from its literal form: `/source/flags`.
    ///
    /// A bare string without slashes is accepted as plain regex source.
    pub fn parse_literal(literal: &str) -> Result<Self, Error> {
        if let Some(rest) = literal.strip_prefix('/') {
            if let Some(end) = rest.rfind('/') {
                return Self::new(&rest[..end], &rest[end + 1..]);
            }
        }
        Self::new(literal, "")
    }

    /// The regex source text, without slashes or flags.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The literal form: `/source/flags`.
    #[must_use]
    pub fn literal(&self) -> String {
        format!("/{}/{}", self.source, self.flags)
    }

    /// Whether the pattern matches the given path or file name.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Whether a file with the given extension (no leading dot) would match.
    ///
    /// Probes with a synthetic file name, so anchored suffix patterns
    /// like `\.tsx?$` behave as they would on real paths.
    #[must_use]
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.is_match(&format!("probe.{ext}"))
    }
}

impl PartialEq for RulePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl Eq for RulePattern {}

impl fmt::Display for RulePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal())
    }
}

impl Serialize for RulePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.literal())
    }
}

impl<'de> Deserialize<'de> for RulePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PatternVisitor;

        impl Visitor<'_> for PatternVisitor {
            type Value = RulePattern;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a regex literal like /\\.tsx?$/")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                RulePattern::parse_literal(v).map_err(|e| E::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(PatternVisitor)
    }
}
