//! Indexed HLT configuration tables
//!
//! [`HltConfigData`] walks a process parameter tree once and exposes:
//! - Trigger paths with their module lists and tag-saving modules
//! - Legacy and stage-2 L1 seeds per path, plus the L1 trigger generation
//! - Streams and datasets
//! - Prescale sets in integer, floating and fractional views
//! - Lazily resolved per-module metadata
//!
//! # Example
//!
//! ```ignore
//! let tree = ParamTree::from_file("hlt.yaml")?;
//! let hlt = HltConfigData::new(&tree)?;
//! let index = hlt.trigger_index("HLT_Mu50_v1");
//! if index < hlt.size() {
//!     println!("{:?}", hlt.module_labels(index)?);
//! }
//! ```

pub mod constants;
pub mod data;
pub mod dump;
mod extract;
pub mod module_info;
pub mod names;
pub mod prescale;
pub mod seeds;

pub use data::HltConfigData;
pub use dump::{DumpTarget, UnknownDumpTarget};
pub use module_info::{canonical_module_name, is_disabled, ModuleInfo, ModuleInfoCache};
pub use names::{NameTable, TableKey};
pub use prescale::{PrescaleTable, PrescaleValue};
pub use seeds::{L1tType, LegacySeed};
