//! Reserved keys and module classes of a trigger configuration tree

/// Keys at the root of the process tree
pub mod keys {
    pub const PROCESS_NAME: &str = "@process_name";

    /// Global tag sub-tree names, checked in order
    pub const GLOBAL_TAG_TREES: [&str; 2] = ["GlobalTag", "PoolDBESSource@GlobalTag"];
    pub const GLOBAL_TAG: &str = "globaltag";

    pub const VERSION_TREE: &str = "HLTConfigVersion";
    pub const TABLE_NAME: &str = "tableName";

    /// Both the sub-tree and the path list inside it
    pub const TRIGGER_PATHS: &str = "@trigger_paths";

    pub const ALL_MODULES: &str = "@all_modules";

    pub const STREAMS: &str = "streams";
    pub const DATASETS: &str = "datasets";
}

/// Keys inside a module sub-tree
pub mod module_keys {
    pub const MODULE_TYPE: &str = "@module_type";
    pub const MODULE_EDM_TYPE: &str = "@module_edm_type";
    pub const SAVE_TAGS: &str = "saveTags";

    pub const TECH_TRIGGER_SEEDING: &str = "L1TechTriggerSeeding";
    pub const SEEDS_EXPRESSION: &str = "L1SeedsLogicalExpression";
    pub const GLOBAL_INPUT_TAG: &str = "L1GlobalInputTag";
}

/// Prescale configuration
pub mod prescale_keys {
    /// Prescale sub-tree names, checked in order
    pub const TREES: [&str; 2] = ["PrescaleService", "PrescaleTable"];
    pub const DEFAULT_LABEL: &str = "lvl1DefaultLabel";
    pub const LABELS: &str = "lvl1Labels";
    pub const ROWS: &str = "prescaleTable";
    pub const PATH_NAME: &str = "pathName";
    pub const VALUES: &str = "prescales";

    /// Default set label when the tree does not name one
    pub const FALLBACK_DEFAULT_LABEL: &str = "default";
}

/// Module classes with special meaning for L1 seeding
pub mod module_types {
    pub const LEGACY_SEED: &str = "HLTLevel1GTSeed";
    pub const LEGACY_GLOBAL_TRIGGER: &str = "L1GlobalTrigger";
    pub const STAGE2_SEED: &str = "HLTL1TSeed";
    pub const STAGE2_GLOBAL_TRIGGER: &str = "L1TGlobalProducer";
    pub const PRESCALER: &str = "HLTPrescaler";

    pub const LEGACY_KINDS: [&str; 2] = [LEGACY_SEED, LEGACY_GLOBAL_TRIGGER];
    pub const STAGE2_KINDS: [&str; 2] = [STAGE2_SEED, STAGE2_GLOBAL_TRIGGER];

    /// Object map label of the emulator; seeds reading it ignore L1 prescales
    pub const EMULATED_OBJECT_MAP: &str = "hltGtStage2ObjectMap";
}

/// Markers inside path module lists
pub mod labels {
    /// Prefix of a module that is present on the path but ignored
    pub const DISABLED_PREFIX: char = '-';
    /// Prefix of a module whose filter decision is inverted
    pub const NEGATED_PREFIX: char = '!';
    /// Sequence boundary tokens; not modules
    pub const SCHEDULING_TOKENS: [&str; 2] = ["#", "@"];
}
