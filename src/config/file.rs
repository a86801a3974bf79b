//! Config file loading
//!
//! Reads one YAML or TOML document into an untyped tree. The tree is a
//! `serde_yaml::Mapping` regardless of the source format so the later layers
//! only deal with one representation.

use serde_yaml::{Mapping, Value};
use std::fs;
use std::io;
use std::path::Path;

use super::error::ConfigError;
use super::keys::{lookup, parse_byte_count, KeyKind, SECTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Toml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(FileFormat::Yaml),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Load and parse a config file.
///
/// A missing file yields [`ConfigError::FileNotFound`]; every other failure
/// (permissions, unsupported extension, bad syntax, non-mapping root) is a
/// distinct error so callers can tell "absent" from "broken".
pub fn load_file(path: &Path) -> Result<Mapping, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::FileNotFound { path: path.to_path_buf() },
        _ => ConfigError::FileRead { path: path.to_path_buf(), source },
    })?;

    let Some(format) = FileFormat::from_path(path) else {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_string();
        return Err(ConfigError::UnsupportedFormat { path: path.to_path_buf(), extension });
    };

    if content.trim().is_empty() {
        return Ok(Mapping::new());
    }

    let value = match format {
        FileFormat::Yaml => parse_yaml(&content, path)?,
        FileFormat::Toml => parse_toml(&content, path)?,
    };

    let tree = match value {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        other => {
            return Err(ConfigError::FileParse {
                path: path.to_path_buf(),
                message: format!("expected a mapping at the top level, found {}", kind_of(&other)),
            })
        }
    };

    Ok(prune_nulls(tree))
}

fn parse_yaml(content: &str, path: &Path) -> Result<Value, ConfigError> {
    serde_yaml::from_str(content)
        .map_err(|e| ConfigError::FileParse { path: path.to_path_buf(), message: e.to_string() })
}

fn parse_toml(content: &str, path: &Path) -> Result<Value, ConfigError> {
    let raw: toml::Value = toml::from_str(content)
        .map_err(|e| ConfigError::FileParse { path: path.to_path_buf(), message: e.to_string() })?;

    serde_yaml::to_value(raw)
        .map_err(|e| ConfigError::FileParse { path: path.to_path_buf(), message: e.to_string() })
}

/// `api_key:` with no value means "unset", not "null string".
fn prune_nulls(tree: Mapping) -> Mapping {
    tree.into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| match value {
            Value::Mapping(section) => (key, Value::Mapping(prune_nulls(section))),
            other => (key, other),
        })
        .collect()
}

/// Bring every known leaf of a loaded file to the shape of its key kind.
///
/// Text keys take numbers and booleans as their string form, list keys take
/// a single scalar or a sequence of scalars, and byte counts take numeric
/// strings. Anything else is a [`ConfigError::InvalidValue`] naming the key
/// and `path`. Unknown keys pass through untouched.
pub fn coerce_file_values(tree: Mapping, path: &Path) -> Result<Mapping, ConfigError> {
    let invalid = |key: String, message: String| ConfigError::InvalidValue {
        key,
        path: path.to_path_buf(),
        message,
    };
    let mut coerced = Mapping::new();

    for (key, value) in tree {
        let Some(section) = key.as_str().filter(|s| SECTIONS.contains(s)).map(str::to_string) else {
            coerced.insert(key, value);
            continue;
        };
        let fields = match value {
            Value::Mapping(fields) => fields,
            other => {
                return Err(invalid(section, format!("expected a section, found {}", kind_of(&other))))
            }
        };

        let mut typed = Mapping::new();
        for (field, value) in fields {
            let value = match field.as_str().and_then(|name| lookup(&section, name)) {
                Some(known) => coerce_leaf(known.kind, value).map_err(|m| invalid(known.path(), m))?,
                None => value,
            };
            typed.insert(field, value);
        }
        coerced.insert(key, Value::Mapping(typed));
    }

    Ok(coerced)
}

fn coerce_leaf(kind: KeyKind, value: Value) -> Result<Value, String> {
    match (kind, value) {
        (KeyKind::Text, value) => scalar_text(value).map(Value::String),
        (KeyKind::List, Value::Sequence(items)) => items
            .into_iter()
            .map(|item| scalar_text(item).map(Value::String))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        (KeyKind::List, value) => scalar_text(value).map(Value::String),
        (KeyKind::Bytes, Value::Number(n)) => n
            .as_u64()
            .map(|bytes| Value::Number(bytes.into()))
            .ok_or_else(|| format!("expected a non-negative byte count, got {n}")),
        (KeyKind::Bytes, Value::String(raw)) => parse_byte_count(&raw).map(|n| Value::Number(n.into())),
        (KeyKind::Bytes, other) => Err(format!("expected a byte count, found {}", kind_of(&other))),
    }
}

fn scalar_text(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("expected a string, found {}", kind_of(&other))),
    }
}

/// Dotted paths present in `tree` that are not part of the key table.
pub fn unknown_keys(tree: &Mapping) -> Vec<String> {
    let mut unknown = Vec::new();

    for (key, value) in tree {
        let Some(section) = key.as_str() else {
            unknown.push(format!("{key:?}"));
            continue;
        };
        if !SECTIONS.contains(&section) {
            unknown.push(section.to_string());
            continue;
        }
        let Value::Mapping(fields) = value else {
            continue;
        };
        for (field, _) in fields {
            match field.as_str() {
                Some(name) if lookup(section, name).is_some() => {}
                Some(name) => unknown.push(format!("{section}.{name}")),
                None => unknown.push(format!("{section}.{field:?}")),
            }
        }
    }

    unknown
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("write");
        path
    }

    #[test]
    fn loads_yaml_sections() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(&tmp, "config.yaml", "llm:\n  provider: openai\n  api_key: k\n");

        let tree = load_file(&path).expect("tree");
        let llm = tree.get("llm").and_then(Value::as_mapping).expect("llm section");
        assert_eq!(llm.get("provider").and_then(Value::as_str), Some("openai"));
    }

    #[test]
    fn loads_toml_into_the_same_tree_shape() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(&tmp, "config.toml", "[defaults]\nmax_size = 2048\ninclude = [\"*.rs\"]\n");

        let tree = load_file(&path).expect("tree");
        let defaults = tree.get("defaults").and_then(Value::as_mapping).expect("defaults");
        assert_eq!(defaults.get("max_size").and_then(Value::as_u64), Some(2048));
        assert!(defaults.get("include").and_then(Value::as_sequence).is_some());
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_file(&tmp.path().join("config.yaml")).expect_err("missing");
        assert!(err.is_not_found());
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(&tmp, "config.yaml", "llm:\n  provider: [openai\n");

        let err = load_file(&path).expect_err("malformed");
        assert!(matches!(err, ConfigError::FileParse { .. }), "got {err:?}");
    }

    #[test]
    fn scalar_root_is_a_parse_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(&tmp, "config.yml", "just a string\n");

        let err = load_file(&path).expect_err("scalar root");
        assert!(err.to_string().contains("expected a mapping"));
    }

    #[test]
    fn empty_document_is_an_empty_tree() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(&tmp, "config.yaml", "");
        assert!(load_file(&path).expect("tree").is_empty());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(&tmp, "config.json", "{}");

        let err = load_file(&path).expect_err("json");
        assert!(matches!(err, ConfigError::UnsupportedFormat { ref extension, .. } if extension == "json"));
    }

    #[test]
    fn null_leaves_are_dropped() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(&tmp, "config.yaml", "llm:\n  api_key:\n  model: gpt-4\ngithub:\n");

        let tree = load_file(&path).expect("tree");
        let llm = tree.get("llm").and_then(Value::as_mapping).expect("llm");
        assert!(llm.get("api_key").is_none());
        assert!(tree.get("github").is_none());
    }

    #[test]
    fn unknown_keys_are_reported_by_path() {
        let tmp = TempDir::new().expect("tmp");
        let path = write(
            &tmp,
            "config.yaml",
            "llm:\n  provider: openai\n  apikey: typo\nextras:\n  x: 1\n",
        );

        let tree = load_file(&path).expect("tree");
        assert_eq!(unknown_keys(&tree), vec!["llm.apikey".to_string(), "extras".to_string()]);
    }

    fn coerced(yaml: &str) -> Result<Mapping, ConfigError> {
        let tree = serde_yaml::from_str(yaml).expect("yaml");
        coerce_file_values(tree, Path::new("/work/config.yaml"))
    }

    #[test]
    fn scalars_are_typed_by_key_kind() {
        let tree = coerced(
            "llm:\n  model: 4\n  api_key: true\ndefaults:\n  max_size: \"1048576\"\n  include: [1, '*.rs']\n",
        )
        .expect("coerced");
        let llm = tree.get("llm").and_then(Value::as_mapping).expect("llm");
        assert_eq!(llm.get("model").and_then(Value::as_str), Some("4"));
        assert_eq!(llm.get("api_key").and_then(Value::as_str), Some("true"));
        let defaults = tree.get("defaults").and_then(Value::as_mapping).expect("defaults");
        assert_eq!(defaults.get("max_size").and_then(Value::as_u64), Some(1_048_576));
        let include = defaults.get("include").and_then(Value::as_sequence).expect("include");
        assert_eq!(include[0].as_str(), Some("1"));
    }

    #[test]
    fn mistyped_leaf_names_key_and_file() {
        let err = coerced("defaults:\n  max_size: lots\n").expect_err("not a number");
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, ref path, .. }
                if key == "defaults.max_size" && path == Path::new("/work/config.yaml")),
            "got {err:?}"
        );

        let err = coerced("defaults:\n  max_size: -5\n").expect_err("negative");
        assert!(err.to_string().contains("defaults.max_size"));

        let err = coerced("llm:\n  model: [a, b]\n").expect_err("list for text");
        assert!(err.to_string().contains("llm.model"));
    }

    #[test]
    fn known_section_must_be_a_mapping() {
        let err = coerced("llm: openai\n").expect_err("scalar section");
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "llm"));
    }

    #[test]
    fn unknown_keys_are_left_alone() {
        let tree = coerced("llm:\n  temperature: [1]\nextras: 3\n").expect("coerced");
        assert!(tree.get("extras").is_some());
        let llm = tree.get("llm").and_then(Value::as_mapping).expect("llm");
        assert!(llm.get("temperature").and_then(Value::as_sequence).is_some());
    }
}
