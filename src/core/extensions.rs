//! Extension set - literal file-name suffix filter

use std::fmt;
use std::str::FromStr;

use crate::core::model::ConcatError;

/// Suffixes selected when none are configured
pub const DEFAULT_EXTENSIONS: [&str; 3] = [".ts", ".tsx", ".css"];

/// Set of accepted file-name suffixes.
///
/// Matching is a case-sensitive literal suffix test on the file name, not an
/// extension comparison: `.css` matches `foo.css`, and a bare `css` suffix
/// would also match `weirdcss`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    suffixes: Vec<String>,
}

impl ExtensionSet {
    /// Build a set from suffixes taken verbatim.
    pub fn from_raw_suffixes<I, S>(suffixes: I) -> Result<Self, ConcatError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: Vec<String> = Vec::new();
        for suffix in suffixes {
            let suffix = suffix.into();
            if suffix.is_empty() {
                continue;
            }
            if !set.contains(&suffix) {
                set.push(suffix);
            }
        }

        if set.is_empty() {
            return Err(ConcatError::Config("extension set is empty".to_string()));
        }

        Ok(Self { suffixes: set })
    }

    /// Check whether a file name ends with one of the suffixes
    pub fn matches(&self, file_name: &str) -> bool {
        self.suffixes.iter().any(|s| file_name.ends_with(s.as_str()))
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self {
            suffixes: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Parse a comma-separated list such as `ts,tsx,css`.
///
/// Items are trimmed and empty items dropped. An item without a leading dot
/// gets one, so `ts` selects `.ts` files.
impl FromStr for ExtensionSet {
    type Err = ConcatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suffixes = s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                if item.starts_with('.') {
                    item.to_string()
                } else {
                    format!(".{}", item)
                }
            });
        Self::from_raw_suffixes(suffixes)
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<&str> = self
            .suffixes
            .iter()
            .map(|s| s.strip_prefix('.').unwrap_or(s))
            .collect();
        write!(f, "{}", items.join(","))
    }
}
