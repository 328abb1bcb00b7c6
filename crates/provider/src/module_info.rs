//! Lazily resolved module metadata
//!
//! A module label on a path resolves to the module's own sub-tree at the
//! process root. Resolution happens on first use and is memoized for the
//! lifetime of the cache; entries are never replaced or removed.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use hlt_config_core::{ParameterTree, Result};

use crate::constants::{labels, module_keys};

/// Strip scheduling prefixes (`-`, `!`) from a path entry
pub fn canonical_module_name(label: &str) -> &str {
    label
        .strip_prefix(labels::DISABLED_PREFIX)
        .or_else(|| label.strip_prefix(labels::NEGATED_PREFIX))
        .unwrap_or(label)
}

/// Whether a path entry is present but ignored
pub fn is_disabled(label: &str) -> bool {
    label.starts_with(labels::DISABLED_PREFIX)
}

/// Resolved metadata of one module
pub struct ModuleInfo<'a, T: ParameterTree> {
    tree: &'a T,
    class_name: String,
    edm_type: String,
    known: bool,
}

impl<'a, T: ParameterTree> ModuleInfo<'a, T> {
    fn resolve(root: &'a T, canonical: &str) -> Result<Self> {
        let Some(tree) = root.tree_at(canonical) else {
            tracing::trace!(module = canonical, "No sub-tree for module");
            return Ok(Self::unknown());
        };

        let class_name = tree
            .get_optional::<String>(module_keys::MODULE_TYPE)?
            .unwrap_or_default();
        let edm_type = tree
            .get_optional::<String>(module_keys::MODULE_EDM_TYPE)?
            .unwrap_or_default();

        Ok(Self {
            tree,
            class_name,
            edm_type,
            known: true,
        })
    }

    /// Entry for a label without a sub-tree, bound to the shared empty tree
    fn unknown() -> Self {
        Self {
            tree: T::empty(),
            class_name: String::new(),
            edm_type: String::new(),
            known: false,
        }
    }

    /// The module's own sub-tree
    pub fn tree(&self) -> &'a T {
        self.tree
    }

    /// Module class (`@module_type`)
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Framework kind (`@module_edm_type`), e.g. `EDFilter`
    pub fn edm_type(&self) -> &str {
        &self.edm_type
    }

    /// Whether the label resolved to a sub-tree
    pub fn is_known(&self) -> bool {
        self.known
    }
}

impl<T: ParameterTree> fmt::Debug for ModuleInfo<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleInfo")
            .field("class_name", &self.class_name)
            .field("edm_type", &self.edm_type)
            .field("known", &self.known)
            .field("tree", &self.tree.id())
            .finish()
    }
}

/// Memoization table keyed by canonical module label
///
/// Lookups take the read lock; a miss re-checks under the write lock before
/// touching the tree, so each label is resolved at most once.
pub struct ModuleInfoCache<'a, T: ParameterTree> {
    root: &'a T,
    entries: RwLock<HashMap<String, Arc<ModuleInfo<'a, T>>>>,
}

impl<'a, T: ParameterTree> ModuleInfoCache<'a, T> {
    pub fn new(root: &'a T) -> Self {
        Self {
            root,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Metadata for `label`, resolving and memoizing it on first use
    pub fn get(&self, label: &str) -> Result<Arc<ModuleInfo<'a, T>>> {
        let canonical = canonical_module_name(label);

        if let Some(info) = self.entries.read().get(canonical) {
            return Ok(Arc::clone(info));
        }

        let mut entries = self.entries.write();
        if let Some(info) = entries.get(canonical) {
            return Ok(Arc::clone(info));
        }

        let info = Arc::new(ModuleInfo::resolve(self.root, canonical)?);
        entries.insert(canonical.to_string(), Arc::clone(&info));
        Ok(info)
    }

    /// Whether `label` has been resolved already
    pub fn contains(&self, label: &str) -> bool {
        self.entries.read().contains_key(canonical_module_name(label))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
