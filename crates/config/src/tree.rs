//! JSON-backed parameter tree
//!
//! Configuration dumps arrive as YAML, TOML or JSON documents. All three are
//! converted to a `serde_json::Value` first and then into a typed
//! [`ParamTree`], whose nodes carry a SHA-256 content digest as identity.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use serde_json::Value as JsonValue;
use sha2::{Digest, Sha256};

use hlt_config_core::{ParamKind, ParameterTree, TreeId};

use crate::ConfigError;

/// Typed value stored in a [`ParamTree`]
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Strings(Vec<String>),
    UInts(Vec<u32>),
    Ints(Vec<i64>),
    Doubles(Vec<f64>),
    Tree(ParamTree),
    Trees(Vec<ParamTree>),
    /// `[]`, compatible with every list kind
    EmptyList,
}

impl Param {
    /// Whether this value can be read as `kind`
    pub fn matches(&self, kind: ParamKind) -> bool {
        match self {
            Param::EmptyList => kind.is_list(),
            other => other.kind() == Some(kind),
        }
    }

    /// Kind of this value, `None` for an empty list
    pub fn kind(&self) -> Option<ParamKind> {
        let kind = match self {
            Param::Bool(_) => ParamKind::Bool,
            Param::Int(_) => ParamKind::Int,
            Param::Double(_) => ParamKind::Double,
            Param::String(_) => ParamKind::String,
            Param::Strings(_) => ParamKind::Strings,
            Param::UInts(_) => ParamKind::UInts,
            Param::Ints(_) => ParamKind::Ints,
            Param::Doubles(_) => ParamKind::Doubles,
            Param::Tree(_) => ParamKind::Tree,
            Param::Trees(_) => ParamKind::Trees,
            Param::EmptyList => return None,
        };
        Some(kind)
    }

    fn type_name(&self) -> &'static str {
        self.kind().map(|k| k.as_str()).unwrap_or("empty list")
    }

    fn from_json(key: &str, value: JsonValue) -> Result<Option<Self>, ConfigError> {
        let param = match value {
            JsonValue::Null => {
                tracing::debug!(key, "Dropping null parameter");
                return Ok(None);
            }
            JsonValue::Bool(b) => Param::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Param::Int(i),
                None => Param::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Param::String(s),
            JsonValue::Object(map) => Param::Tree(ParamTree::from_map(map)?),
            JsonValue::Array(items) => Self::list_from_json(key, items)?,
        };
        Ok(Some(param))
    }

    fn list_from_json(key: &str, items: Vec<JsonValue>) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Ok(Param::EmptyList);
        }

        if items.iter().all(JsonValue::is_object) {
            let trees = items
                .into_iter()
                .filter_map(|item| match item {
                    JsonValue::Object(map) => Some(ParamTree::from_map(map)),
                    _ => None,
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Param::Trees(trees));
        }

        if items.iter().all(JsonValue::is_string) {
            let strings = items
                .into_iter()
                .filter_map(|item| match item {
                    JsonValue::String(s) => Some(s),
                    _ => None,
                })
                .collect();
            return Ok(Param::Strings(strings));
        }

        if items.iter().all(JsonValue::is_number) {
            let uints: Option<Vec<u32>> = items
                .iter()
                .map(|v| v.as_u64().and_then(|n| u32::try_from(n).ok()))
                .collect();
            if let Some(uints) = uints {
                return Ok(Param::UInts(uints));
            }
            let ints: Option<Vec<i64>> = items.iter().map(JsonValue::as_i64).collect();
            if let Some(ints) = ints {
                return Ok(Param::Ints(ints));
            }
            let doubles: Option<Vec<f64>> = items.iter().map(JsonValue::as_f64).collect();
            if let Some(doubles) = doubles {
                return Ok(Param::Doubles(doubles));
            }
        }

        Err(ConfigError::ParseError(format!(
            "Parameter '{}' is a list with mixed or unsupported element types",
            key
        )))
    }

    fn digest_into(&self, hasher: &mut Sha256) {
        fn len(hasher: &mut Sha256, n: usize) {
            hasher.update((n as u64).to_le_bytes());
        }
        fn string(hasher: &mut Sha256, s: &str) {
            len(hasher, s.len());
            hasher.update(s.as_bytes());
        }

        match self {
            Param::Bool(b) => hasher.update([1, *b as u8]),
            Param::Int(i) => {
                hasher.update([2]);
                hasher.update(i.to_le_bytes());
            }
            Param::Double(d) => {
                hasher.update([3]);
                hasher.update(d.to_bits().to_le_bytes());
            }
            Param::String(s) => {
                hasher.update([4]);
                string(hasher, s);
            }
            Param::Strings(v) => {
                hasher.update([5]);
                len(hasher, v.len());
                v.iter().for_each(|s| string(hasher, s));
            }
            Param::UInts(v) => {
                hasher.update([6]);
                len(hasher, v.len());
                v.iter().for_each(|n| hasher.update(n.to_le_bytes()));
            }
            Param::Ints(v) => {
                hasher.update([7]);
                len(hasher, v.len());
                v.iter().for_each(|n| hasher.update(n.to_le_bytes()));
            }
            Param::Doubles(v) => {
                hasher.update([8]);
                len(hasher, v.len());
                v.iter().for_each(|d| hasher.update(d.to_bits().to_le_bytes()));
            }
            Param::Tree(tree) => {
                hasher.update([9]);
                hasher.update(tree.id.as_bytes());
            }
            Param::Trees(trees) => {
                hasher.update([10]);
                len(hasher, trees.len());
                trees.iter().for_each(|t| hasher.update(t.id.as_bytes()));
            }
            Param::EmptyList => hasher.update([11]),
        }
    }
}

/// Parameter tree node
///
/// Entries are kept in key order. Equality compares content and identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamTree {
    id: TreeId,
    entries: BTreeMap<String, Param>,
}

static EMPTY_TREE: Lazy<ParamTree> = Lazy::new(ParamTree::invalid);

impl ParamTree {
    /// Empty tree carrying the invalid identity
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Build a tree from a JSON object
    pub fn from_json_value(value: JsonValue) -> Result<Self, ConfigError> {
        match value {
            JsonValue::Object(map) => Self::from_map(map),
            other => Err(ConfigError::ParseError(format!(
                "Parameter tree root must be an object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let value: JsonValue =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_json_value(value)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let value: JsonValue =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_json_value(value)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let value: JsonValue =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Self::from_json_value(value)
    }

    /// Load from file, format chosen by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let tree = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            _ => Self::from_json_str(&content)?,
        };

        tracing::info!(
            path = %path.display(),
            entries = tree.len(),
            id = %tree.id,
            "Loaded parameter tree"
        );
        Ok(tree)
    }

    fn from_map(map: serde_json::Map<String, JsonValue>) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        for (key, value) in map {
            if let Some(param) = Param::from_json(&key, value)? {
                entries.insert(key, param);
            }
        }

        let mut hasher = Sha256::new();
        for (key, param) in &entries {
            hasher.update(key.as_bytes());
            hasher.update([0]);
            param.digest_into(&mut hasher);
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());

        Ok(Self {
            id: TreeId::from_bytes(bytes),
            entries,
        })
    }

    /// Raw entry under `key`
    pub fn param(&self, key: &str) -> Option<&Param> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        writeln!(f, "{{")?;
        for (key, param) in &self.entries {
            write!(f, "{:width$}{}: {} = ", "", key, param.type_name(), width = indent + 2)?;
            match param {
                Param::Bool(b) => writeln!(f, "{}", b)?,
                Param::Int(i) => writeln!(f, "{}", i)?,
                Param::Double(d) => writeln!(f, "{}", d)?,
                Param::String(s) => writeln!(f, "'{}'", s)?,
                Param::Strings(v) => {
                    let quoted: Vec<String> = v.iter().map(|s| format!("'{}'", s)).collect();
                    writeln!(f, "{{ {} }}", quoted.join(", "))?
                }
                Param::UInts(v) => writeln!(f, "{{ {} }}", join_display(v))?,
                Param::Ints(v) => writeln!(f, "{{ {} }}", join_display(v))?,
                Param::Doubles(v) => writeln!(f, "{{ {} }}", join_display(v))?,
                Param::Tree(tree) => tree.write_indented(f, indent + 2)?,
                Param::Trees(trees) => {
                    writeln!(f, "[")?;
                    for tree in trees {
                        write!(f, "{:width$}", "", width = indent + 4)?;
                        tree.write_indented(f, indent + 4)?;
                    }
                    writeln!(f, "{:width$}]", "", width = indent + 2)?
                }
                Param::EmptyList => writeln!(f, "{{ }}")?,
            }
        }
        writeln!(f, "{:width$}}}", "", width = indent)
    }
}

fn join_display<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

impl fmt::Display for ParamTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl ParameterTree for ParamTree {
    fn id(&self) -> TreeId {
        self.id
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn exists_as(&self, key: &str, kind: ParamKind) -> bool {
        self.entries.get(key).is_some_and(|p| p.matches(kind))
    }

    fn bool_at(&self, key: &str) -> Option<bool> {
        match self.entries.get(key)? {
            Param::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn string_at(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            Param::String(s) => Some(s),
            _ => None,
        }
    }

    fn strings_at(&self, key: &str) -> Option<&[String]> {
        match self.entries.get(key)? {
            Param::Strings(v) => Some(v),
            Param::EmptyList => Some(&[]),
            _ => None,
        }
    }

    fn uints_at(&self, key: &str) -> Option<&[u32]> {
        match self.entries.get(key)? {
            Param::UInts(v) => Some(v),
            Param::EmptyList => Some(&[]),
            _ => None,
        }
    }

    fn tree_at(&self, key: &str) -> Option<&Self> {
        match self.entries.get(key)? {
            Param::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    fn trees_at(&self, key: &str) -> Option<Vec<&Self>> {
        match self.entries.get(key)? {
            Param::Trees(trees) => Some(trees.iter().collect()),
            Param::EmptyList => Some(Vec::new()),
            _ => None,
        }
    }

    fn names_of_kind(&self, kind: ParamKind) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, p)| p.matches(kind))
            .map(|(k, _)| k.clone())
            .collect()
    }

    fn empty() -> &'static Self {
        &EMPTY_TREE
    }
}
