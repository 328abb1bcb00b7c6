//! Human-readable rendering of the extracted tables

use std::fmt::{self, Write};
use std::str::FromStr;

use hlt_config_core::ParameterTree;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::module_types;
use crate::data::HltConfigData;

const HEADER: &str = "HltConfigData::dump";

/// A dump selector that names no known table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown dump target: {0}")]
pub struct UnknownDumpTarget(pub String);

/// Table selector for [`HltConfigData::render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DumpTarget {
    ProcessTree,
    ProcessName,
    GlobalTag,
    TableName,
    Triggers,
    TriggerSeeds,
    Modules,
    StreamNames,
    Streams,
    DatasetNames,
    Datasets,
    PrescaleTable,
}

impl DumpTarget {
    pub const ALL: [DumpTarget; 12] = [
        DumpTarget::ProcessTree,
        DumpTarget::ProcessName,
        DumpTarget::GlobalTag,
        DumpTarget::TableName,
        DumpTarget::Triggers,
        DumpTarget::TriggerSeeds,
        DumpTarget::Modules,
        DumpTarget::StreamNames,
        DumpTarget::Streams,
        DumpTarget::DatasetNames,
        DumpTarget::Datasets,
        DumpTarget::PrescaleTable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DumpTarget::ProcessTree => "ProcessTree",
            DumpTarget::ProcessName => "ProcessName",
            DumpTarget::GlobalTag => "GlobalTag",
            DumpTarget::TableName => "TableName",
            DumpTarget::Triggers => "Triggers",
            DumpTarget::TriggerSeeds => "TriggerSeeds",
            DumpTarget::Modules => "Modules",
            DumpTarget::StreamNames => "StreamNames",
            DumpTarget::Streams => "Streams",
            DumpTarget::DatasetNames => "DatasetNames",
            DumpTarget::Datasets => "Datasets",
            DumpTarget::PrescaleTable => "PrescaleTable",
        }
    }
}

impl fmt::Display for DumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DumpTarget {
    type Err = UnknownDumpTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ProcessPSet" {
            return Ok(DumpTarget::ProcessTree);
        }
        DumpTarget::ALL
            .into_iter()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| UnknownDumpTarget(s.to_string()))
    }
}

impl<'a, T: ParameterTree> HltConfigData<'a, T> {
    /// Render `target` as text
    pub fn render(&self, target: DumpTarget) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_dump(target, &mut out);
        out
    }

    /// Render a target named by string, or a notice for an unknown name
    pub fn dump(&self, what: &str) -> String {
        match what.parse::<DumpTarget>() {
            Ok(target) => self.render(target),
            Err(_) => format!("{}: Unknown dump request: {}\n", HEADER, what),
        }
    }

    /// Write `target` into `out`
    pub fn write_dump<W: Write>(&self, target: DumpTarget, out: &mut W) -> fmt::Result {
        match target {
            DumpTarget::ProcessTree => {
                writeln!(out, "{}: ProcessTree = ", HEADER)?;
                writeln!(out, "{}", self.tree)
            }
            DumpTarget::ProcessName => {
                writeln!(out, "{}: ProcessName = {}", HEADER, self.process_name)
            }
            DumpTarget::GlobalTag => writeln!(out, "{}: GlobalTag = {}", HEADER, self.global_tag),
            DumpTarget::TableName => writeln!(out, "{}: TableName = {}", HEADER, self.table_name),
            DumpTarget::Triggers => {
                writeln!(out, "{}: Triggers: {}", HEADER, self.size())?;
                for (i, name) in self.trigger_names().iter().enumerate() {
                    writeln!(out, "  {} {}", i, name)?;
                }
                Ok(())
            }
            DumpTarget::TriggerSeeds => self.write_trigger_seeds(out),
            DumpTarget::Modules => self.write_modules(out),
            DumpTarget::StreamNames => {
                write_names(out, "StreamNames", self.stream_names())
            }
            DumpTarget::Streams => {
                write_groups(out, "Streams", self.stream_names(), self.stream_contents())
            }
            DumpTarget::DatasetNames => {
                write_names(out, "DatasetNames", self.dataset_names())
            }
            DumpTarget::Datasets => {
                write_groups(out, "Datasets", self.dataset_names(), self.dataset_contents())
            }
            DumpTarget::PrescaleTable => self.write_prescales(out),
        }
    }

    fn write_trigger_seeds<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "{}: TriggerSeeds: {}", HEADER, self.size())?;
        let paths = self
            .l1_seeds_legacy
            .iter()
            .zip(&self.l1_seeds_stage2)
            .zip(self.trigger_names());
        for (i, ((legacy, stage2), name)) in paths.enumerate() {
            writeln!(out, "  {} {} {}/{}", i, name, legacy.len(), stage2.len())?;
            if !legacy.is_empty() {
                for (j, seed) in legacy.iter().enumerate() {
                    write!(out, "    {}: {} {}", module_types::LEGACY_SEED, j, seed)?;
                }
                writeln!(out)?;
            }
            if !stage2.is_empty() {
                for (j, seed) in stage2.iter().enumerate() {
                    write!(out, "    {}: {} {}", module_types::STAGE2_SEED, j, seed)?;
                }
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn write_modules<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "{} Triggers and Modules: {}", HEADER, self.size())?;
        for (i, (name, path)) in self.trigger_names().iter().zip(&self.modules).enumerate() {
            writeln!(out, "{} {} {}", i, name, path.len())?;
            write!(out, " - Modules: ")?;

            let (mut prescalers, mut legacy, mut stage2) = (0, 0, 0);
            for (j, label) in path.names().iter().enumerate() {
                let (class, edm_type, tags) = match self.module_info(label) {
                    Ok(info) => (
                        info.class_name().to_string(),
                        info.edm_type().to_string(),
                        self.save_tags(label).unwrap_or(false),
                    ),
                    Err(err) => {
                        tracing::warn!(module = %label, error = %err, "Unreadable module metadata");
                        (String::new(), String::new(), false)
                    }
                };
                write!(
                    out,
                    " {}:{}/{}/{}/{}",
                    j,
                    label,
                    class,
                    edm_type,
                    u8::from(tags)
                )?;
                match class.as_str() {
                    module_types::PRESCALER => prescalers += 1,
                    module_types::LEGACY_SEED => legacy += 1,
                    module_types::STAGE2_SEED => stage2 += 1,
                    _ => {}
                }
            }
            writeln!(out)?;
            writeln!(
                out,
                " - Number of {}/{}/{} modules: {}/{}/{}",
                module_types::PRESCALER,
                module_types::LEGACY_SEED,
                module_types::STAGE2_SEED,
                prescalers,
                legacy,
                stage2
            )?;
        }
        Ok(())
    }

    fn write_prescales<W: Write>(&self, out: &mut W) -> fmt::Result {
        let sets = self.prescale_size();
        writeln!(out, "{}: PrescaleTable: # of sets : {}", HEADER, sets)?;
        for (i, label) in self.prescale_labels().iter().enumerate() {
            write!(out, " {}/'{}'", i, label)?;
        }
        if sets > 0 {
            writeln!(out)?;
        }

        let table = self.prescale_table::<u32>();
        writeln!(out, "{}: PrescaleTable: # of paths: {}", HEADER, table.len())?;
        for (path, values) in table {
            for value in values {
                write!(out, " {}", value)?;
            }
            writeln!(out, " {}", path)?;
        }
        Ok(())
    }
}

fn write_names<W: Write>(out: &mut W, title: &str, names: &[String]) -> fmt::Result {
    writeln!(out, "{}: {}: {}", HEADER, title, names.len())?;
    for (i, name) in names.iter().enumerate() {
        writeln!(out, "  {} {}", i, name)?;
    }
    Ok(())
}

fn write_groups<W: Write>(
    out: &mut W,
    title: &str,
    names: &[String],
    contents: &[Vec<String>],
) -> fmt::Result {
    writeln!(out, "{}: {}: {}", HEADER, title, names.len())?;
    for (i, (name, content)) in names.iter().zip(contents).enumerate() {
        writeln!(out, "  {} {} {}", i, name, content.len())?;
        for (j, entry) in content.iter().enumerate() {
            writeln!(out, "    {} {}", j, entry)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        for target in DumpTarget::ALL {
            assert_eq!(target.as_str().parse::<DumpTarget>().unwrap(), target);
        }
        assert_eq!(
            "ProcessPSet".parse::<DumpTarget>().unwrap(),
            DumpTarget::ProcessTree
        );
        assert_eq!(
            "Everything".parse::<DumpTarget>(),
            Err(UnknownDumpTarget("Everything".to_string()))
        );
    }
}
