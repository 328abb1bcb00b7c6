//! Level-1 seeding information

use std::fmt;

use serde::{Deserialize, Serialize};

/// Seed of a legacy `HLTLevel1GTSeed` module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySeed {
    /// Seeds on technical triggers rather than algorithm bits
    pub technical: bool,
    pub expression: String,
}

impl fmt::Display for LegacySeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", u8::from(self.technical), self.expression)
    }
}

/// L1 trigger generation the menu was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum L1tType {
    /// No identifying modules, or modules of both generations
    #[default]
    Unknown = 0,
    /// Legacy or stage-1 L1 trigger
    Legacy = 1,
    Stage2 = 2,
}

impl L1tType {
    /// Classify from the number of legacy and stage-2 modules in the menu
    pub fn from_counts(legacy: usize, stage2: usize) -> Self {
        match (legacy, stage2) {
            (0, 0) => L1tType::Unknown,
            (_, 0) => L1tType::Legacy,
            (0, _) => L1tType::Stage2,
            _ => L1tType::Unknown,
        }
    }

    /// Numeric code (0, 1 or 2)
    pub fn code(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for L1tType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l1t_type_from_counts() {
        assert_eq!(L1tType::from_counts(0, 0), L1tType::Unknown);
        assert_eq!(L1tType::from_counts(3, 1), L1tType::Unknown);
        assert_eq!(L1tType::from_counts(2, 0), L1tType::Legacy);
        assert_eq!(L1tType::from_counts(0, 5), L1tType::Stage2);
        assert_eq!(L1tType::Stage2.code(), 2);
        assert_eq!(L1tType::default(), L1tType::Unknown);
    }

    #[test]
    fn test_legacy_seed_display() {
        let seed = LegacySeed {
            technical: true,
            expression: "L1_SingleMu7".to_string(),
        };
        assert_eq!(seed.to_string(), "1/L1_SingleMu7");
    }
}
