//! Exact fractional prescale values

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prescale stored as a reduced `numerator / denominator` pair
///
/// Integer prescales map to `n / 1`; equality compares the reduced form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FractionalPrescale {
    numerator: u32,
    denominator: u32,
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl FractionalPrescale {
    /// Create a reduced fraction, `None` for a zero denominator
    pub fn new(numerator: u32, denominator: u32) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let divisor = gcd(numerator, denominator).max(1);
        Some(Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    pub fn to_f64(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl Default for FractionalPrescale {
    fn default() -> Self {
        Self::from(1)
    }
}

impl From<u32> for FractionalPrescale {
    fn from(value: u32) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }
}

impl PartialEq<u32> for FractionalPrescale {
    fn eq(&self, other: &u32) -> bool {
        self.is_integer() && self.numerator == *other
    }
}

impl fmt::Display for FractionalPrescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduction() {
        let p = FractionalPrescale::new(6, 4).unwrap();
        assert_eq!(p.numerator(), 3);
        assert_eq!(p.denominator(), 2);
        assert_eq!(p.to_string(), "3/2");
        assert_eq!(p.to_f64(), 1.5);
        assert!(FractionalPrescale::new(1, 0).is_none());
    }

    #[test]
    fn test_integer_prescale() {
        let p = FractionalPrescale::from(5);
        assert!(p.is_integer());
        assert_eq!(p, 5);
        assert_eq!(p.to_string(), "5");

        // zero prescale means "path disabled"
        let off = FractionalPrescale::new(0, 7).unwrap();
        assert_eq!(off, 0);
    }
}
