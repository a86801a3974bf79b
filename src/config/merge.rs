//! Layer merging
//!
//! Precedence, lowest to highest: config file, environment, CLI flags. The
//! explicit `--config` file and the discovered default file are alternatives,
//! so only one of them ever reaches this layer.

use serde_yaml::{Mapping, Value};

/// Deep-merge `overlay` on top of `base`.
///
/// Sections present on both sides are merged key by key; for anything else
/// the overlay's value replaces the base's.
pub fn deep_merge(mut base: Mapping, overlay: Mapping) -> Mapping {
    for (key, overlay_val) in overlay {
        match (base.remove(&key), overlay_val) {
            (Some(Value::Mapping(base_map)), Value::Mapping(overlay_map)) => {
                base.insert(key, Value::Mapping(deep_merge(base_map, overlay_map)));
            }
            (_, overlay_val) => {
                base.insert(key, overlay_val);
            }
        }
    }
    base
}

/// Set `section.field` in `tree`, creating the section if needed.
pub fn insert_leaf(tree: &mut Mapping, section: &str, field: &str, value: Value) {
    let slot = tree
        .entry(Value::String(section.to_string()))
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    if !slot.is_mapping() {
        *slot = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(fields) = slot {
        fields.insert(Value::String(field.to_string()), value);
    }
}

/// Values supplied on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub output_dir: Option<String>,
    pub language: Option<String>,
    pub audience: Option<String>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub max_size: Option<u64>,
    pub github_token: Option<String>,
}

impl ConfigOverrides {
    pub fn to_tree(&self) -> Mapping {
        let mut tree = Mapping::new();

        let text = [
            ("llm", "provider", &self.provider),
            ("llm", "api_key", &self.api_key),
            ("llm", "model", &self.model),
            ("llm", "endpoint", &self.endpoint),
            ("defaults", "output_dir", &self.output_dir),
            ("defaults", "language", &self.language),
            ("defaults", "audience", &self.audience),
            ("github", "token", &self.github_token),
        ];
        for (section, field, value) in text {
            if let Some(value) = value {
                insert_leaf(&mut tree, section, field, Value::String(value.clone()));
            }
        }

        for (field, patterns) in [("include", &self.include), ("exclude", &self.exclude)] {
            if let Some(patterns) = patterns {
                let seq = patterns.iter().cloned().map(Value::String).collect();
                insert_leaf(&mut tree, "defaults", field, Value::Sequence(seq));
            }
        }

        if let Some(max_size) = self.max_size {
            insert_leaf(&mut tree, "defaults", "max_size", Value::Number(max_size.into()));
        }

        tree
    }
}

/// Stack the three layers into the effective tree.
pub fn merge_layers(file: Mapping, env: Mapping, flags: &ConfigOverrides) -> Mapping {
    let merged = deep_merge(file, env);
    deep_merge(merged, flags.to_tree())
}
