//! Input tags referencing upstream data products

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Reference to an upstream product, encoded as `label[:instance[:process]]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputTag {
    label: String,
    instance: String,
    process: String,
}

impl InputTag {
    pub fn new(
        label: impl Into<String>,
        instance: impl Into<String>,
        process: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            instance: instance.into(),
            process: process.into(),
        }
    }

    /// Module label of the producer
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn process(&self) -> &str {
        &self.process
    }
}

impl FromStr for InputTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [label] => Ok(Self::new(*label, "", "")),
            [label, instance] => Ok(Self::new(*label, *instance, "")),
            [label, instance, process] => Ok(Self::new(*label, *instance, *process)),
            _ => Err(Error::InvalidInputTag(s.to_string())),
        }
    }
}

impl fmt::Display for InputTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if !self.instance.is_empty() || !self.process.is_empty() {
            write!(f, ":{}", self.instance)?;
        }
        if !self.process.is_empty() {
            write!(f, ":{}", self.process)?;
        }
        Ok(())
    }
}
