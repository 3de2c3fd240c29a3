// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Safety gate for placeholder secrets
//!
//! The gate is a pure scan over configuration text. It has no notion of
//! environments; the controller decides when to run it.

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::error::SettingsError;

/// Placeholder markers rejected by the default rule set
pub const DEFAULT_MARKERS: [&str; 2] = ["CHANGE_THIS", "changethis"];

/// A predicate over a single configuration line
#[derive(Debug, Clone)]
pub enum GateRule {
    /// Case-sensitive substring match
    Contains(String),
    /// Regular expression match anywhere in the line
    Pattern(Regex),
}

impl GateRule {
    /// Compile a regex rule
    pub fn pattern(pattern: &str) -> Result<Self, SettingsError> {
        Regex::new(pattern)
            .map(Self::Pattern)
            .map_err(|source| SettingsError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Contains(needle) => line.contains(needle.as_str()),
            Self::Pattern(re) => re.is_match(line),
        }
    }
}

impl fmt::Display for GateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains(needle) => write!(f, "contains '{needle}'"),
            Self::Pattern(re) => write!(f, "matches /{}/", re.as_str()),
        }
    }
}

/// One offending line found by the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyViolation {
    /// 1-based line number
    pub line_number: usize,
    /// The full line, key and value
    pub line: String,
    /// Description of the rule that matched
    pub rule: String,
}

impl fmt::Display for SafetyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.line)
    }
}

/// Ordered list of rules a configuration must not match
#[derive(Debug, Clone)]
pub struct SafetyGate {
    rules: Vec<GateRule>,
}

impl Default for SafetyGate {
    fn default() -> Self {
        Self {
            rules: DEFAULT_MARKERS
                .iter()
                .map(|m| GateRule::Contains((*m).to_string()))
                .collect(),
        }
    }
}

impl SafetyGate {
    /// A gate with no rules; never reports anything
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: GateRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append compiled regex rules
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.rules.push(GateRule::pattern(pattern.as_ref())?);
        }
        Ok(self)
    }

    pub fn rules(&self) -> &[GateRule] {
        &self.rules
    }

    /// Scan `text` line by line. Each line yields at most one violation,
    /// attributed to the first rule that matches. Empty means safe.
    pub fn validate(&self, text: &str) -> Vec<SafetyViolation> {
        text.lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let line = line.trim_end_matches('\r');
                self.rules
                    .iter()
                    .find(|rule| rule.matches(line))
                    .map(|rule| SafetyViolation {
                        line_number: idx + 1,
                        line: line.to_string(),
                        rule: rule.to_string(),
                    })
            })
            .collect()
    }
}
