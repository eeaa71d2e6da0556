//! Flat Java-properties parsing for signing configuration files.
//!
//! Implements the subset of the `java.util.Properties` text format that
//! Gradle signing setups rely on: `key=value` lines, `#`/`!` comments,
//! backslash line continuations, and escape sequences.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// A flat set of string properties parsed from `key=value` text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Creates an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses properties from text.
    ///
    /// Lines starting with `#` or `!` are comments. A trailing backslash
    /// continues the entry on the next line. The first unescaped `=` or `:`
    /// separates key from value; a line without a separator defines a key
    /// with an empty value. Later assignments to the same key win.
    pub fn parse(input: &str) -> Self {
        let mut entries = HashMap::new();
        let mut logical = String::new();
        let mut continuing = false;

        for raw in input.lines() {
            let line = raw.trim_start();
            if !continuing && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
                continue;
            }
            if ends_with_odd_backslashes(line) {
                logical.push_str(&line[..line.len() - 1]);
                continuing = true;
                continue;
            }
            logical.push_str(line);
            let (key, value) = split_entry(&logical);
            entries.insert(key, value);
            logical.clear();
            continuing = false;
        }

        // Input ended mid-continuation
        if continuing && !logical.is_empty() {
            let (key, value) = split_entry(&logical);
            entries.insert(key, value);
        }

        Self { entries }
    }

    /// Loads properties from a file.
    ///
    /// A missing file yields an empty set. An unreadable or non-UTF-8 file
    /// is treated the same way, with a warning.
    pub fn load(path: &Path) -> Self {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Properties file {} not found, using empty set", path.display());
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read properties file {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match String::from_utf8(bytes) {
            Ok(text) => Self::parse(&text),
            Err(_) => {
                tracing::warn!(
                    "Properties file {} is not valid UTF-8, using empty set",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Returns the value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a property, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Number of properties in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set contains no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all `(key, value)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Checks whether a line ends in an unescaped continuation backslash.
fn ends_with_odd_backslashes(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Splits a logical line into key and value at the first unescaped
/// separator, unescaping both sides.
fn split_entry(line: &str) -> (String, String) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                let key = line[..i].trim_end();
                let value = line[i + c.len_utf8()..].trim_start();
                return (unescape(key), unescape(value));
            }
            _ => {}
        }
    }
    (unescape(line.trim_end()), String::new())
}

/// Resolves backslash escapes. Unknown escapes yield the escaped character
/// itself, matching Java semantics.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) => out.push(ch),
                    None => {
                        // Malformed \uXXXX, keep the raw text
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Escapes a string so it survives a parse round trip as a key or value.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '=' | ':' | '#' | '!' | ' ' => {
                out.push('\\');
                out.push(c);
            }
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
