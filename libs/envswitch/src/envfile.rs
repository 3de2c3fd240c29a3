// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! `KEY=VALUE` configuration text
//!
//! Files are copied byte-for-byte by the switch; this module only reads
//! fields out of them. Lines that aren't assignments (comments, blanks,
//! anything without `=`) are skipped for lookups.

use crate::error::EnvFileError;

/// A single `KEY=VALUE` assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// 1-based line number in the source text
    pub line: usize,
    pub key: String,
    /// Value as stored, quotes included
    pub value: String,
}

/// Parsed assignments in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    assignments: Vec<Assignment>,
}

impl EnvFile {
    /// Parse configuration text. Repeated keys are malformed input.
    pub fn parse(text: &str) -> Result<Self, EnvFileError> {
        let mut assignments: Vec<Assignment> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let Some((key, value)) = split_assignment(raw) else {
                continue;
            };
            let line = idx + 1;

            if let Some(first) = assignments.iter().find(|a| a.key == key) {
                return Err(EnvFileError::DuplicateKey {
                    key: key.to_string(),
                    first_line: first.line,
                    line,
                });
            }

            assignments.push(Assignment {
                line,
                key: key.to_string(),
                value: value.to_string(),
            });
        }

        Ok(Self { assignments })
    }

    /// Raw stored value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    /// Value for `key` with surrounding double quotes removed
    pub fn display_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(strip_quotes)
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Look up a display value without failing: `None` when the key is absent
/// or the text is malformed.
pub fn optional_field(text: &str, key: &str) -> Option<String> {
    EnvFile::parse(text)
        .ok()?
        .display_value(key)
        .map(str::to_string)
}

/// Strip one layer of surrounding double quotes
pub fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim_end();
    if !is_valid_key(key) {
        return None;
    }
    Some((key, value.trim_end_matches('\r')))
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_parse_skips_non_assignments() {
        let text = "# header\n\nENVIRONMENT=local\nnot an assignment\nPOSTGRES_DB=app_dev\n";
        let env = EnvFile::parse(text).unwrap();

        assert_eq!(env.len(), 2);
        assert_eq!(env.get("ENVIRONMENT"), Some("local"));
        assert_eq!(env.get("POSTGRES_DB"), Some("app_dev"));
        assert_eq!(env.assignments()[1].line, 5);
    }

    #[test]
    fn test_duplicate_key_is_malformed() {
        let err = EnvFile::parse("A=1\nB=2\nA=3\n").unwrap_err();
        assert_eq!(
            err,
            EnvFileError::DuplicateKey {
                key: "A".to_string(),
                first_line: 1,
                line: 3,
            }
        );
    }

    #[test]
    fn test_value_may_contain_equals() {
        let env = EnvFile::parse("DATABASE_URL=postgres://u:p@h/db?sslmode=require\n").unwrap();
        assert_eq!(
            env.get("DATABASE_URL"),
            Some("postgres://u:p@h/db?sslmode=require")
        );
    }

    #[test]
    fn test_quotes_kept_in_storage_stripped_for_display() {
        let env = EnvFile::parse("PROJECT_NAME=\"Ski Coach\"\n").unwrap();
        assert_eq!(env.get("PROJECT_NAME"), Some("\"Ski Coach\""));
        assert_eq!(env.display_value("PROJECT_NAME"), Some("Ski Coach"));
    }

    #[test_case("\"x\"", "x" ; "quoted")]
    #[test_case("\"\"", "" ; "empty_quoted")]
    #[test_case("\"unterminated", "\"unterminated" ; "unterminated")]
    #[test_case("plain", "plain" ; "unquoted")]
    #[test_case("\"", "\"" ; "lone_quote")]
    fn test_strip_quotes(input: &str, expected: &str) {
        assert_eq!(strip_quotes(input), expected);
    }

    #[test]
    fn test_optional_field_falls_back_to_none() {
        assert_eq!(
            optional_field("ENVIRONMENT=staging\n", "ENVIRONMENT"),
            Some("staging".to_string())
        );
        assert_eq!(optional_field("OTHER=1\n", "ENVIRONMENT"), None);
        assert_eq!(
            optional_field("ENVIRONMENT=a\nENVIRONMENT=b\n", "ENVIRONMENT"),
            None
        );
        assert_eq!(optional_field("", "ENVIRONMENT"), None);
    }

    #[test]
    fn test_export_prefix_and_crlf() {
        let env = EnvFile::parse("export SECRET_KEY=abc\r\n").unwrap();
        assert_eq!(env.get("SECRET_KEY"), Some("abc"));
    }

    #[test_case("1ABC=x" ; "leading_digit")]
    #[test_case("=x" ; "empty_key")]
    #[test_case("A B=x" ; "space_in_key")]
    fn test_invalid_keys_are_passthrough(line: &str) {
        assert!(EnvFile::parse(line).unwrap().is_empty());
    }
}
