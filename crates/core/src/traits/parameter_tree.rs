//! Capability interface over a hierarchical parameter tree

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, InputTag, Result, TreeId};

/// Shape of a value stored under a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    Bool,
    Int,
    Double,
    String,
    Strings,
    UInts,
    Ints,
    Doubles,
    Tree,
    Trees,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Double => "double",
            ParamKind::String => "string",
            ParamKind::Strings => "string list",
            ParamKind::UInts => "uint list",
            ParamKind::Ints => "int list",
            ParamKind::Doubles => "double list",
            ParamKind::Tree => "tree",
            ParamKind::Trees => "tree list",
        }
    }

    /// List kinds; an empty list satisfies any of them
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            ParamKind::Strings
                | ParamKind::UInts
                | ParamKind::Ints
                | ParamKind::Doubles
                | ParamKind::Trees
        )
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only hierarchical key/value store
///
/// Implementations:
/// - `ParamTree` - JSON/YAML/TOML backed tree (hlt-config-config)
///
/// Lookups on a key of the wrong shape return `None`; the provided
/// [`get`](ParameterTree::get) helpers turn that into an [`Error`].
///
/// # Example
///
/// ```ignore
/// let tree = ParamTree::from_file("hlt.yaml")?;
/// let name: Option<String> = tree.get_optional("@process_name")?;
/// let paths = tree.sub_tree("@trigger_paths")?;
/// ```
pub trait ParameterTree: fmt::Display + Send + Sync + Sized + 'static {
    /// Content-derived identity of this tree
    fn id(&self) -> TreeId;

    /// Whether `key` holds a value of any kind
    fn contains(&self, key: &str) -> bool;

    /// Whether `key` holds a value of `kind`
    fn exists_as(&self, key: &str, kind: ParamKind) -> bool;

    fn bool_at(&self, key: &str) -> Option<bool>;

    fn string_at(&self, key: &str) -> Option<&str>;

    fn strings_at(&self, key: &str) -> Option<&[String]>;

    fn uints_at(&self, key: &str) -> Option<&[u32]>;

    /// Nested tree stored under `key`
    fn tree_at(&self, key: &str) -> Option<&Self>;

    /// List of nested trees stored under `key`
    fn trees_at(&self, key: &str) -> Option<Vec<&Self>>;

    /// Names of all entries at this level holding a value of `kind`
    fn names_of_kind(&self, kind: ParamKind) -> Vec<String>;

    /// Shared empty tree carrying [`TreeId::INVALID`]
    fn empty() -> &'static Self;

    /// Typed value under `key`
    fn get<V: FromParameter>(&self, key: &str) -> Result<V> {
        if !self.contains(key) {
            return Err(Error::MissingKey {
                key: key.to_string(),
            });
        }
        V::from_tree(self, key)?.ok_or_else(|| Error::TypeMismatch {
            key: key.to_string(),
            expected: V::KIND,
        })
    }

    /// Typed value under `key`, `None` when the key is absent
    fn get_optional<V: FromParameter>(&self, key: &str) -> Result<Option<V>> {
        if !self.contains(key) {
            return Ok(None);
        }
        self.get(key).map(Some)
    }

    /// Nested tree under `key`
    fn sub_tree(&self, key: &str) -> Result<&Self> {
        if !self.contains(key) {
            return Err(Error::MissingKey {
                key: key.to_string(),
            });
        }
        self.tree_at(key).ok_or_else(|| Error::TypeMismatch {
            key: key.to_string(),
            expected: ParamKind::Tree,
        })
    }

    /// Nested tree under `key`, `None` when the key is absent
    fn optional_sub_tree(&self, key: &str) -> Result<Option<&Self>> {
        if !self.contains(key) {
            return Ok(None);
        }
        self.sub_tree(key).map(Some)
    }

    /// Nested tree list under `key`, empty when the key is absent
    fn sub_trees(&self, key: &str) -> Result<Vec<&Self>> {
        if !self.contains(key) {
            return Ok(Vec::new());
        }
        self.trees_at(key).ok_or_else(|| Error::TypeMismatch {
            key: key.to_string(),
            expected: ParamKind::Trees,
        })
    }
}

/// Value types that can be read out of a [`ParameterTree`]
pub trait FromParameter: Sized {
    /// Kind the value is stored as
    const KIND: ParamKind;

    /// `Ok(None)` when the stored value has a different shape
    fn from_tree<T: ParameterTree>(tree: &T, key: &str) -> Result<Option<Self>>;
}

impl FromParameter for bool {
    const KIND: ParamKind = ParamKind::Bool;

    fn from_tree<T: ParameterTree>(tree: &T, key: &str) -> Result<Option<Self>> {
        Ok(tree.bool_at(key))
    }
}

impl FromParameter for String {
    const KIND: ParamKind = ParamKind::String;

    fn from_tree<T: ParameterTree>(tree: &T, key: &str) -> Result<Option<Self>> {
        Ok(tree.string_at(key).map(str::to_string))
    }
}

impl FromParameter for Vec<String> {
    const KIND: ParamKind = ParamKind::Strings;

    fn from_tree<T: ParameterTree>(tree: &T, key: &str) -> Result<Option<Self>> {
        Ok(tree.strings_at(key).map(<[String]>::to_vec))
    }
}

impl FromParameter for Vec<u32> {
    const KIND: ParamKind = ParamKind::UInts;

    fn from_tree<T: ParameterTree>(tree: &T, key: &str) -> Result<Option<Self>> {
        Ok(tree.uints_at(key).map(<[u32]>::to_vec))
    }
}

/// Input tags are stored in their string encoding
impl FromParameter for InputTag {
    const KIND: ParamKind = ParamKind::String;

    fn from_tree<T: ParameterTree>(tree: &T, key: &str) -> Result<Option<Self>> {
        tree.string_at(key).map(str::parse::<InputTag>).transpose()
    }
}
