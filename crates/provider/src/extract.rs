//! One-shot extraction of the indexed tables from the process tree

use std::collections::BTreeMap;

use hlt_config_core::{InputTag, ParameterTree, ParamKind, Result};

use crate::constants::{keys, labels, module_keys, module_types, prescale_keys};
use crate::data::HltConfigData;
use crate::module_info::is_disabled;
use crate::names::NameTable;
use crate::prescale::PrescaleTable;
use crate::seeds::{L1tType, LegacySeed};

impl<'a, T: ParameterTree> HltConfigData<'a, T> {
    /// Run every extraction stage in order; later stages read earlier tables
    pub(crate) fn extract(&mut self) -> Result<()> {
        self.extract_provenance()?;
        self.extract_paths()?;
        self.extract_save_tags()?;
        self.extract_seeds()?;

        let (streams, stream_contents) = grouped_lists(self.tree, keys::STREAMS)?;
        self.streams = streams;
        self.stream_contents = stream_contents;

        let (datasets, dataset_contents) = grouped_lists(self.tree, keys::DATASETS)?;
        self.datasets = datasets;
        self.dataset_contents = dataset_contents;

        tracing::debug!(
            streams = self.streams.len(),
            datasets = self.datasets.len(),
            "Extracted streams and datasets"
        );

        self.prescales = extract_prescales(self.tree)?;
        tracing::debug!(
            sets = self.prescales.size(),
            paths = self.prescales.path_count(),
            default_set = self.prescales.default_set(),
            "Extracted prescale table"
        );

        self.l1t_type = self.classify_l1t()?;

        tracing::info!(
            process = %self.process_name,
            global_tag = %self.global_tag,
            table = %self.table_name,
            l1t_type = self.l1t_type.code(),
            triggers = self.triggers.len(),
            "Extracted HLT configuration"
        );

        Ok(())
    }

    fn extract_provenance(&mut self) -> Result<()> {
        let root = self.tree;

        self.process_name = root
            .get_optional::<String>(keys::PROCESS_NAME)?
            .unwrap_or_default();

        if let Some(name) = keys::GLOBAL_TAG_TREES
            .iter()
            .find(|name| root.contains(name))
        {
            self.global_tag = root
                .sub_tree(name)?
                .get_optional::<String>(keys::GLOBAL_TAG)?
                .unwrap_or_default();
        }

        if let Some(version) = root.optional_sub_tree(keys::VERSION_TREE)? {
            self.table_name = version
                .get_optional::<String>(keys::TABLE_NAME)?
                .unwrap_or_default();
        }

        Ok(())
    }

    fn extract_paths(&mut self) -> Result<()> {
        let root = self.tree;

        let names = match root.optional_sub_tree(keys::TRIGGER_PATHS)? {
            Some(paths) => paths
                .get_optional::<Vec<String>>(keys::TRIGGER_PATHS)?
                .unwrap_or_default(),
            None => Vec::new(),
        };

        let mut modules = Vec::with_capacity(names.len());
        for name in &names {
            let labels: Vec<String> = root
                .get_optional::<Vec<String>>(name)?
                .unwrap_or_default()
                .into_iter()
                .filter(|label| !labels::SCHEDULING_TOKENS.contains(&label.as_str()))
                .collect();
            modules.push(NameTable::new(labels));
        }

        self.triggers = NameTable::new(names);
        self.modules = modules;

        tracing::debug!(
            triggers = self.triggers.len(),
            modules = self.modules.iter().map(NameTable::len).sum::<usize>(),
            "Extracted trigger paths"
        );
        Ok(())
    }

    /// Disabled modules are evaluated too
    fn extract_save_tags(&mut self) -> Result<()> {
        let mut save_tags_modules = Vec::with_capacity(self.modules.len());
        for path in &self.modules {
            let mut kept = Vec::new();
            for label in path.names() {
                if self.save_tags(label)? {
                    kept.push(label.clone());
                }
            }
            save_tags_modules.push(kept);
        }
        self.save_tags_modules = save_tags_modules;
        Ok(())
    }

    /// Disabled modules do not seed
    fn extract_seeds(&mut self) -> Result<()> {
        let mut legacy_seeds = Vec::with_capacity(self.modules.len());
        let mut stage2_seeds = Vec::with_capacity(self.modules.len());

        for path in &self.modules {
            let mut legacy = Vec::new();
            let mut stage2 = Vec::new();

            for label in path.names().iter().filter(|l| !is_disabled(l)) {
                let info = self.module_info(label)?;
                if !info.is_known() {
                    continue;
                }
                let module = info.tree();

                match info.class_name() {
                    module_types::LEGACY_SEED => legacy.push(LegacySeed {
                        technical: module
                            .get_optional::<bool>(module_keys::TECH_TRIGGER_SEEDING)?
                            .unwrap_or(false),
                        expression: module
                            .get_optional::<String>(module_keys::SEEDS_EXPRESSION)?
                            .unwrap_or_default(),
                    }),
                    module_types::STAGE2_SEED => {
                        let input = module.get_optional::<InputTag>(module_keys::GLOBAL_INPUT_TAG)?;
                        if input
                            .as_ref()
                            .is_some_and(|tag| tag.label() == module_types::EMULATED_OBJECT_MAP)
                        {
                            tracing::trace!(module = %label, "Seed reads emulated object map");
                            continue;
                        }
                        stage2.push(
                            module
                                .get_optional::<String>(module_keys::SEEDS_EXPRESSION)?
                                .unwrap_or_default(),
                        );
                    }
                    _ => {}
                }
            }

            legacy_seeds.push(legacy);
            stage2_seeds.push(stage2);
        }

        self.l1_seeds_legacy = legacy_seeds;
        self.l1_seeds_stage2 = stage2_seeds;

        tracing::debug!(
            legacy = self.l1_seeds_legacy.iter().map(Vec::len).sum::<usize>(),
            stage2 = self.l1_seeds_stage2.iter().map(Vec::len).sum::<usize>(),
            "Extracted L1 seeds"
        );
        Ok(())
    }

    fn classify_l1t(&self) -> Result<L1tType> {
        let all_modules = self
            .tree
            .get_optional::<Vec<String>>(keys::ALL_MODULES)?
            .unwrap_or_default();

        let (mut legacy, mut stage2) = (0, 0);
        for label in &all_modules {
            let info = self.module_info(label)?;
            let class = info.class_name();
            if module_types::LEGACY_KINDS.contains(&class) {
                legacy += 1;
            } else if module_types::STAGE2_KINDS.contains(&class) {
                stage2 += 1;
            }
        }

        let l1t_type = L1tType::from_counts(legacy, stage2);
        if l1t_type == L1tType::Unknown {
            tracing::debug!(legacy, stage2, "Could not identify L1 trigger type");
        }
        Ok(l1t_type)
    }
}

/// Names of the string lists in sub-tree `key`, sorted, with their sorted contents
fn grouped_lists<T: ParameterTree>(root: &T, key: &str) -> Result<(NameTable, Vec<Vec<String>>)> {
    let Some(group) = root.optional_sub_tree(key)? else {
        return Ok((NameTable::default(), Vec::new()));
    };

    let names = NameTable::sorted(group.names_of_kind(ParamKind::Strings));
    let mut contents = Vec::with_capacity(names.len());
    for name in names.names() {
        let mut content = group.get::<Vec<String>>(name)?;
        content.sort();
        contents.push(content);
    }
    Ok((names, contents))
}

fn extract_prescales<T: ParameterTree>(root: &T) -> Result<PrescaleTable> {
    let Some(service) = prescale_keys::TREES
        .iter()
        .find_map(|name| root.tree_at(name))
    else {
        return Ok(PrescaleTable::default());
    };

    let default_label = service
        .get_optional::<String>(prescale_keys::DEFAULT_LABEL)?
        .unwrap_or_else(|| prescale_keys::FALLBACK_DEFAULT_LABEL.to_string());
    let set_labels = service
        .get_optional::<Vec<String>>(prescale_keys::LABELS)?
        .unwrap_or_default();

    let mut rows = BTreeMap::new();
    for entry in service.sub_trees(prescale_keys::ROWS)? {
        let Some(path) = entry.get_optional::<String>(prescale_keys::PATH_NAME)? else {
            tracing::warn!("Prescale row without a path name, skipping");
            continue;
        };
        let values = entry
            .get_optional::<Vec<u32>>(prescale_keys::VALUES)?
            .unwrap_or_default();
        rows.insert(path, values);
    }

    PrescaleTable::new(&default_label, set_labels, rows)
}
