//! Trigger configuration tables and their query surface

use std::collections::BTreeMap;
use std::sync::Arc;

use hlt_config_core::{ParameterTree, Result, TreeId};

use crate::constants::module_keys;
use crate::module_info::{ModuleInfo, ModuleInfoCache};
use crate::names::{row, NameTable, TableKey};
use crate::prescale::{PrescaleTable, PrescaleValue};
use crate::seeds::{L1tType, LegacySeed};

/// Indexed view of one HLT process configuration
///
/// All tables are built once by [`HltConfigData::new`] and never change
/// afterwards. The only interior state is the module-info cache, which
/// grows as modules are queried.
///
/// By-name lookups (`*_index`) return the table size when the name is
/// absent. Positional lookups are bounds-checked and return
/// [`Error::OutOfRange`](hlt_config_core::Error::OutOfRange) on a miss.
pub struct HltConfigData<'a, T: ParameterTree> {
    pub(crate) tree: &'a T,

    pub(crate) process_name: String,
    pub(crate) global_tag: String,
    pub(crate) table_name: String,

    pub(crate) triggers: NameTable,
    /// Per path: module labels in execution order with their positions
    pub(crate) modules: Vec<NameTable>,
    pub(crate) save_tags_modules: Vec<Vec<String>>,

    pub(crate) l1_seeds_legacy: Vec<Vec<LegacySeed>>,
    pub(crate) l1_seeds_stage2: Vec<Vec<String>>,
    pub(crate) l1t_type: L1tType,

    pub(crate) streams: NameTable,
    pub(crate) stream_contents: Vec<Vec<String>>,
    pub(crate) datasets: NameTable,
    pub(crate) dataset_contents: Vec<Vec<String>>,

    pub(crate) prescales: PrescaleTable,

    pub(crate) module_cache: ModuleInfoCache<'a, T>,
}

impl<'a, T: ParameterTree> HltConfigData<'a, T> {
    /// Extract all tables from `tree`
    ///
    /// A tree carrying [`TreeId::INVALID`] is accepted and yields empty
    /// tables. A value of the wrong shape at a reserved key fails.
    pub fn new(tree: &'a T) -> Result<Self> {
        let mut data = Self::blank(tree);
        if tree.id().is_valid() {
            data.extract()?;
        } else {
            tracing::debug!("Invalid parameter tree, skipping extraction");
        }
        Ok(data)
    }

    /// Extractor bound to the shared empty tree
    pub fn empty() -> Self {
        Self::blank(T::empty())
    }

    fn blank(tree: &'a T) -> Self {
        Self {
            tree,
            process_name: String::new(),
            global_tag: String::new(),
            table_name: String::new(),
            triggers: NameTable::default(),
            modules: Vec::new(),
            save_tags_modules: Vec::new(),
            l1_seeds_legacy: Vec::new(),
            l1_seeds_stage2: Vec::new(),
            l1t_type: L1tType::Unknown,
            streams: NameTable::default(),
            stream_contents: Vec::new(),
            datasets: NameTable::default(),
            dataset_contents: Vec::new(),
            prescales: PrescaleTable::default(),
            module_cache: ModuleInfoCache::new(tree),
        }
    }

    // ---- Provenance ----

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    pub fn global_tag(&self) -> &str {
        &self.global_tag
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Identity of the underlying tree
    pub fn id(&self) -> TreeId {
        self.tree.id()
    }

    pub fn process_tree(&self) -> &'a T {
        self.tree
    }

    pub fn l1t_type(&self) -> L1tType {
        self.l1t_type
    }

    // ---- Trigger paths ----

    /// Number of trigger paths
    pub fn size(&self) -> usize {
        self.triggers.len()
    }

    /// Number of modules on a path
    pub fn size_of(&self, trigger: impl TableKey) -> Result<usize> {
        Ok(self.path_modules(trigger)?.len())
    }

    pub fn trigger_names(&self) -> &[String] {
        self.triggers.names()
    }

    pub fn trigger_name(&self, index: usize) -> Result<&str> {
        self.triggers.name("trigger names", index)
    }

    /// Position of `trigger`, or [`size`](Self::size) when absent
    pub fn trigger_index(&self, trigger: &str) -> usize {
        self.triggers.position(trigger)
    }

    pub fn module_labels(&self, trigger: impl TableKey) -> Result<&[String]> {
        Ok(self.path_modules(trigger)?.names())
    }

    pub fn module_label(&self, trigger: impl TableKey, index: usize) -> Result<&str> {
        self.path_modules(trigger)?.name("module labels", index)
    }

    /// Position of `module` on the path, or the path length when absent
    pub fn module_index(&self, trigger: impl TableKey, module: &str) -> Result<usize> {
        Ok(self.path_modules(trigger)?.position(module))
    }

    /// Modules on the path whose products are kept for offline use
    pub fn save_tags_modules(&self, trigger: impl TableKey) -> Result<&[String]> {
        row(&self.save_tags_modules, "save-tags modules", &self.triggers, trigger)
            .map(Vec::as_slice)
    }

    fn path_modules(&self, trigger: impl TableKey) -> Result<&NameTable> {
        row(&self.modules, "trigger paths", &self.triggers, trigger)
    }

    // ---- L1 seeds ----

    pub fn all_l1_seeds_legacy(&self) -> &[Vec<LegacySeed>] {
        &self.l1_seeds_legacy
    }

    pub fn l1_seeds_legacy(&self, trigger: impl TableKey) -> Result<&[LegacySeed]> {
        row(&self.l1_seeds_legacy, "legacy L1 seeds", &self.triggers, trigger)
            .map(Vec::as_slice)
    }

    pub fn all_l1_seeds_stage2(&self) -> &[Vec<String>] {
        &self.l1_seeds_stage2
    }

    pub fn l1_seeds_stage2(&self, trigger: impl TableKey) -> Result<&[String]> {
        row(&self.l1_seeds_stage2, "stage-2 L1 seeds", &self.triggers, trigger)
            .map(Vec::as_slice)
    }

    // ---- Streams and datasets ----

    pub fn stream_names(&self) -> &[String] {
        self.streams.names()
    }

    pub fn stream_name(&self, index: usize) -> Result<&str> {
        self.streams.name("stream names", index)
    }

    pub fn stream_index(&self, stream: &str) -> usize {
        self.streams.position(stream)
    }

    pub fn stream_contents(&self) -> &[Vec<String>] {
        &self.stream_contents
    }

    /// Datasets of a stream, sorted
    pub fn stream_content(&self, stream: impl TableKey) -> Result<&[String]> {
        row(&self.stream_contents, "stream contents", &self.streams, stream)
            .map(Vec::as_slice)
    }

    pub fn dataset_names(&self) -> &[String] {
        self.datasets.names()
    }

    pub fn dataset_name(&self, index: usize) -> Result<&str> {
        self.datasets.name("dataset names", index)
    }

    pub fn dataset_index(&self, dataset: &str) -> usize {
        self.datasets.position(dataset)
    }

    pub fn dataset_contents(&self) -> &[Vec<String>] {
        &self.dataset_contents
    }

    /// Trigger paths of a dataset, sorted
    pub fn dataset_content(&self, dataset: impl TableKey) -> Result<&[String]> {
        row(&self.dataset_contents, "dataset contents", &self.datasets, dataset)
            .map(Vec::as_slice)
    }

    // ---- Prescales ----

    /// Number of prescale sets
    pub fn prescale_size(&self) -> usize {
        self.prescales.size()
    }

    pub fn prescale_labels(&self) -> &[String] {
        self.prescales.labels()
    }

    /// Index of the default prescale set
    pub fn prescale_default_set(&self) -> usize {
        self.prescales.default_set()
    }

    pub fn prescales(&self) -> &PrescaleTable {
        &self.prescales
    }

    /// Path → per-set prescales in the requested numeric view
    pub fn prescale_table<V: PrescaleValue>(&self) -> &BTreeMap<String, Vec<V>> {
        self.prescales.table::<V>()
    }

    /// Prescale of `trigger` in `set`; 1 for paths without a row
    pub fn prescale_value<V: PrescaleValue>(&self, set: usize, trigger: &str) -> Result<V> {
        self.prescales.prescale::<V>(set, trigger)
    }

    // ---- Modules ----

    /// Resolved metadata of a module, memoized by canonical label
    pub fn module_info(&self, label: &str) -> Result<Arc<ModuleInfo<'a, T>>> {
        self.module_cache.get(label)
    }

    /// Module class, empty for unknown modules
    pub fn module_type(&self, label: &str) -> Result<String> {
        Ok(self.module_info(label)?.class_name().to_string())
    }

    /// Framework kind of a module, empty for unknown modules
    pub fn module_edm_type(&self, label: &str) -> Result<String> {
        Ok(self.module_info(label)?.edm_type().to_string())
    }

    /// Sub-tree of a module, the shared empty tree for unknown modules
    pub fn module_tree(&self, label: &str) -> Result<&'a T> {
        Ok(self.module_info(label)?.tree())
    }

    /// Whether the module keeps its products for offline use
    pub fn save_tags(&self, label: &str) -> Result<bool> {
        Ok(self
            .module_tree(label)?
            .get_optional::<bool>(module_keys::SAVE_TAGS)?
            .unwrap_or(false))
    }
}
