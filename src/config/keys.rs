//! The table of known configuration keys
//!
//! Every leaf the file format, the environment overlay and the flag overrides
//! may set is listed here once. Nothing is derived from type metadata.

/// The value shape a leaf takes once loaded from a file or the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Taken verbatim.
    Text,
    /// Comma-separated list.
    List,
    /// Unsigned byte count.
    Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigKey {
    pub section: &'static str,
    pub field: &'static str,
    pub kind: KeyKind,
}

impl ConfigKey {
    const fn new(section: &'static str, field: &'static str, kind: KeyKind) -> Self {
        Self { section, field, kind }
    }

    /// Dotted path, e.g. `llm.api_key`.
    pub fn path(&self) -> String {
        format!("{}.{}", self.section, self.field)
    }
}

pub const SECTIONS: [&str; 3] = ["llm", "defaults", "github"];

pub static KEYS: [ConfigKey; 11] = [
    ConfigKey::new("llm", "provider", KeyKind::Text),
    ConfigKey::new("llm", "api_key", KeyKind::Text),
    ConfigKey::new("llm", "model", KeyKind::Text),
    ConfigKey::new("llm", "endpoint", KeyKind::Text),
    ConfigKey::new("defaults", "output_dir", KeyKind::Text),
    ConfigKey::new("defaults", "language", KeyKind::Text),
    ConfigKey::new("defaults", "audience", KeyKind::Text),
    ConfigKey::new("defaults", "include", KeyKind::List),
    ConfigKey::new("defaults", "exclude", KeyKind::List),
    ConfigKey::new("defaults", "max_size", KeyKind::Bytes),
    ConfigKey::new("github", "token", KeyKind::Text),
];

pub fn lookup(section: &str, field: &str) -> Option<&'static ConfigKey> {
    KEYS.iter().find(|key| key.section == section && key.field == field)
}

/// Split a comma-separated string, trimming whitespace and dropping empty
/// segments.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a byte count; blank means 0, i.e. no limit.
pub fn parse_byte_count(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u64>()
        .map_err(|e| format!("expected a non-negative byte count, got '{raw}' ({e})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_belongs_to_a_known_section() {
        for key in KEYS {
            assert!(SECTIONS.contains(&key.section), "{} has unknown section", key.path());
        }
    }

    #[test]
    fn lookup_finds_known_and_rejects_unknown() {
        assert_eq!(lookup("defaults", "max_size").map(|k| k.kind), Some(KeyKind::Bytes));
        assert!(lookup("llm", "apikey").is_none());
        assert!(lookup("github", "provider").is_none());
    }

    #[test]
    fn split_list_trims_and_drops_empty_segments() {
        assert_eq!(split_list(" *.go, ,src/** ,"), vec!["*.go", "src/**"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn byte_counts_accept_digits_and_blank() {
        assert_eq!(parse_byte_count(" 1048576 "), Ok(1_048_576));
        assert_eq!(parse_byte_count(""), Ok(0));
        assert!(parse_byte_count("-1").is_err());
        assert!(parse_byte_count("1MB").unwrap_err().contains("1MB"));
    }
}
