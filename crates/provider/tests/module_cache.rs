//! Module-info memoization
//!
//! Uses an in-memory tree that counts sub-tree lookups per key, so the
//! tests can tell how often the cache went back to the tree.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use hlt_config_core::{ParamKind, ParameterTree, TreeId};
use hlt_config_provider::{HltConfigData, ModuleInfoCache};

#[derive(Default)]
struct CountingTree {
    id: TreeId,
    strings: HashMap<String, String>,
    children: HashMap<String, CountingTree>,
    lookups: Mutex<HashMap<String, usize>>,
}

impl CountingTree {
    fn root() -> Self {
        Self {
            id: TreeId::from_bytes([7; 32]),
            ..Self::default()
        }
    }

    fn with_module(mut self, label: &str, class: &str, edm_type: &str) -> Self {
        let mut module = CountingTree::root();
        module.strings.insert("@module_type".to_string(), class.to_string());
        module.strings.insert("@module_edm_type".to_string(), edm_type.to_string());
        self.children.insert(label.to_string(), module);
        self
    }

    fn lookups(&self, key: &str) -> usize {
        self.lookups.lock().get(key).copied().unwrap_or(0)
    }
}

impl fmt::Display for CountingTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountingTree({})", self.id)
    }
}

static EMPTY: Lazy<CountingTree> = Lazy::new(CountingTree::default);

impl ParameterTree for CountingTree {
    fn id(&self) -> TreeId {
        self.id
    }

    fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(key) || self.children.contains_key(key)
    }

    fn exists_as(&self, key: &str, kind: ParamKind) -> bool {
        match kind {
            ParamKind::String => self.strings.contains_key(key),
            ParamKind::Tree => self.children.contains_key(key),
            _ => false,
        }
    }

    fn bool_at(&self, _key: &str) -> Option<bool> {
        None
    }

    fn string_at(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    fn strings_at(&self, _key: &str) -> Option<&[String]> {
        None
    }

    fn uints_at(&self, _key: &str) -> Option<&[u32]> {
        None
    }

    fn tree_at(&self, key: &str) -> Option<&Self> {
        *self.lookups.lock().entry(key.to_string()).or_insert(0) += 1;
        self.children.get(key)
    }

    fn trees_at(&self, _key: &str) -> Option<Vec<&Self>> {
        None
    }

    fn names_of_kind(&self, kind: ParamKind) -> Vec<String> {
        match kind {
            ParamKind::String => self.strings.keys().cloned().collect(),
            ParamKind::Tree => self.children.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn empty() -> &'static Self {
        &EMPTY
    }
}

/// Repeated resolution returns the same entry and reads the tree once
#[test]
fn test_module_info_resolved_once() {
    let tree = CountingTree::root().with_module("hltPreMu50", "HLTPrescaler", "EDFilter");
    let hlt = HltConfigData::new(&tree).unwrap();

    let first = hlt.module_info("hltPreMu50").unwrap();
    for label in ["hltPreMu50", "-hltPreMu50", "!hltPreMu50"] {
        let again = hlt.module_info(label).unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }
    assert_eq!(hlt.module_type("hltPreMu50").unwrap(), "HLTPrescaler");
    assert_eq!(hlt.module_edm_type("-hltPreMu50").unwrap(), "EDFilter");

    assert_eq!(tree.lookups("hltPreMu50"), 1);
}

/// Unknown modules are memoized too and point at the shared empty tree
#[test]
fn test_unknown_module_memoized() {
    let tree = CountingTree::root();
    let cache = ModuleInfoCache::new(&tree);

    let info = cache.get("hltMissing").unwrap();
    assert!(!info.is_known());
    assert_eq!(info.class_name(), "");
    assert!(std::ptr::eq(info.tree(), CountingTree::empty()));

    cache.get("-hltMissing").unwrap();
    assert_eq!(tree.lookups("hltMissing"), 1);
    assert_eq!(cache.len(), 1);
    assert!(cache.contains("!hltMissing"));
}

/// Concurrent first queries populate each entry exactly once
#[test]
fn test_concurrent_population() {
    let labels = ["hltL1sSingleMu", "hltPreMu50", "hltL3fMu50", "hltMissing"];
    let tree = CountingTree::root()
        .with_module("hltL1sSingleMu", "HLTL1TSeed", "EDFilter")
        .with_module("hltPreMu50", "HLTPrescaler", "EDFilter")
        .with_module("hltL3fMu50", "HLTMuonL3PreFilter", "EDFilter");
    let hlt = HltConfigData::new(&tree).unwrap();

    let resolved: Vec<Vec<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let mut classes = Vec::new();
                    for _ in 0..50 {
                        for label in labels {
                            classes.push(hlt.module_type(label).unwrap());
                        }
                    }
                    classes
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for classes in &resolved {
        assert_eq!(classes, &resolved[0]);
    }
    for label in labels {
        assert_eq!(tree.lookups(label), 1, "{label}");
    }
}

/// A module type of the wrong shape is a type mismatch
#[test]
fn test_module_type_mismatch() {
    let mut tree = CountingTree::root();
    let mut module = CountingTree::root();
    module.children.insert("@module_type".to_string(), CountingTree::root());
    tree.children.insert("hltBroken".to_string(), module);

    let cache = ModuleInfoCache::new(&tree);
    let err = cache.get("hltBroken").unwrap_err();
    assert!(matches!(
        err,
        hlt_config_core::Error::TypeMismatch { expected: ParamKind::String, .. }
    ));
    assert!(cache.is_empty());
}
