use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Agent version stamped on every recording.
pub const AGENT_VERSION: &str = "arex.agent.version";
/// Set by the loader while the current time is inside the configured working window.
pub const DURING_WORK: &str = "arex.during.work";
/// Set by the loader once the local IP matched the target allow-list.
pub const IP_VALIDATE: &str = "arex.ip.validate";

/// Why a typed lookup produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("property `{0}` is not set")]
    Missing(String),
    #[error("property `{0}` is blank")]
    Blank(String),
    #[error("property `{key}` has malformed value `{value}`")]
    Malformed { key: String, value: String },
}

/// Immutable string properties with lookups that never fail.
///
/// Typed getters fall back to the caller's default whenever the value is
/// absent, blank or does not parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyStore {
    entries: HashMap<String, String>,
}

impl PropertyStore {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn get_string_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get_string(name).unwrap_or(default)
    }

    /// Only `true`/`false` (any ASCII case) parse; other text yields `default`,
    /// so `"yes"` with a `true` default reads as `true`.
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.parsed_with(name, parse_bool).unwrap_or(default)
    }

    pub fn get_int(&self, name: &str, default: i32) -> i32 {
        self.typed(name).unwrap_or(default)
    }

    pub fn get_long(&self, name: &str, default: i64) -> i64 {
        self.typed(name).unwrap_or(default)
    }

    /// Parsed with `f64::from_str`: no trimming, no `d`/`f` suffix, and
    /// `inf`/`nan` in any case are accepted as values.
    pub fn get_double(&self, name: &str, default: f64) -> f64 {
        self.typed(name).unwrap_or(default)
    }

    /// Strict lookup: the error says which of missing, blank or malformed applied.
    pub fn typed<T: FromStr>(&self, name: &str) -> Result<T, PropertyError> {
        self.parsed_with(name, |raw| raw.parse().ok())
    }

    fn parsed_with<T>(
        &self,
        name: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, PropertyError> {
        let raw = self
            .get_string(name)
            .ok_or_else(|| PropertyError::Missing(name.to_string()))?;
        if raw.trim().is_empty() {
            return Err(PropertyError::Blank(name.to_string()));
        }
        parse(raw).ok_or_else(|| PropertyError::Malformed {
            key: name.to_string(),
            value: raw.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ASCII case-insensitive; any other spelling is malformed.
fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
