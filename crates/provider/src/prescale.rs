//! HLT prescale sets
//!
//! Source values are `u32`; the `f64` and fractional views are derived from
//! them once, when the table is built.

use std::collections::BTreeMap;

use hlt_config_core::{Error, FractionalPrescale, Result};

/// Prescale of a path missing from the table
const UNPRESCALED: u32 = 1;

/// Per-path prescale values across all named sets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrescaleTable {
    labels: Vec<String>,
    default_set: usize,
    values: BTreeMap<String, Vec<u32>>,
    doubles: BTreeMap<String, Vec<f64>>,
    fractions: BTreeMap<String, Vec<FractionalPrescale>>,
}

impl PrescaleTable {
    /// Build a table from set labels and rows
    ///
    /// The default set is the first label equal to `default_label`, or set 0.
    /// An empty label list yields an empty table whatever the rows hold.
    pub fn new(
        default_label: &str,
        labels: Vec<String>,
        rows: BTreeMap<String, Vec<u32>>,
    ) -> Result<Self> {
        if labels.is_empty() {
            return Ok(Self::default());
        }

        for (path, row) in &rows {
            if row.len() != labels.len() {
                return Err(Error::PrescaleRowLength {
                    path: path.clone(),
                    expected: labels.len(),
                    found: row.len(),
                });
            }
        }

        let default_set = labels
            .iter()
            .position(|label| label == default_label)
            .unwrap_or(0);

        let doubles = rows
            .iter()
            .map(|(path, row)| (path.clone(), row.iter().map(|&v| f64::from(v)).collect()))
            .collect();
        let fractions = rows
            .iter()
            .map(|(path, row)| {
                (
                    path.clone(),
                    row.iter().map(|&v| FractionalPrescale::from(v)).collect(),
                )
            })
            .collect();

        Ok(Self {
            labels,
            default_set,
            values: rows,
            doubles,
            fractions,
        })
    }

    /// Number of prescale sets
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of the default set
    pub fn default_set(&self) -> usize {
        self.default_set
    }

    /// Number of paths carrying prescales
    pub fn path_count(&self) -> usize {
        self.values.len()
    }

    /// Path → per-set values in the requested numeric view
    pub fn table<V: PrescaleValue>(&self) -> &BTreeMap<String, Vec<V>> {
        V::view(self)
    }

    /// Prescale of `path` in `set`; paths without a row are unprescaled
    pub fn prescale<V: PrescaleValue>(&self, set: usize, path: &str) -> Result<V> {
        if set >= self.size() {
            return Err(Error::out_of_range("prescale sets", set, self.size()));
        }
        Ok(V::view(self)
            .get(path)
            .map(|row| row[set].clone())
            .unwrap_or_else(V::unprescaled))
    }
}

/// Numeric representations a prescale can be read as
pub trait PrescaleValue: Clone + Sized {
    #[doc(hidden)]
    fn view(table: &PrescaleTable) -> &BTreeMap<String, Vec<Self>>;

    /// Value of an unprescaled path
    fn unprescaled() -> Self;
}

impl PrescaleValue for u32 {
    fn view(table: &PrescaleTable) -> &BTreeMap<String, Vec<Self>> {
        &table.values
    }

    fn unprescaled() -> Self {
        UNPRESCALED
    }
}

impl PrescaleValue for f64 {
    fn view(table: &PrescaleTable) -> &BTreeMap<String, Vec<Self>> {
        &table.doubles
    }

    fn unprescaled() -> Self {
        f64::from(UNPRESCALED)
    }
}

impl PrescaleValue for FractionalPrescale {
    fn view(table: &PrescaleTable) -> &BTreeMap<String, Vec<Self>> {
        &table.fractions
    }

    fn unprescaled() -> Self {
        FractionalPrescale::from(UNPRESCALED)
    }
}
