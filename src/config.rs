//! Construction parameters shared by both tables.

use crate::error::{TableError, TableResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPACITY: usize = 16;
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Initial bucket count and growth threshold.
///
/// Fixed at construction; only the capacity changes afterwards, and only by
/// doubling during insertion. Missing fields fall back to the defaults when
/// deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Capacity must be at least 1 and the load factor must lie in `(0, 1]`.
    pub fn validate(&self) -> TableResult<()> {
        if self.initial_capacity == 0 {
            return Err(TableError::InvalidConfig(
                "initial capacity must be at least 1".to_string(),
            ));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 || self.load_factor > 1.0 {
            return Err(TableError::InvalidConfig(format!(
                "load factor must be in (0, 1], got {}",
                self.load_factor
            )));
        }
        Ok(())
    }

    /// Entry count above which the next insertion grows a table of `capacity` buckets.
    pub(crate) fn threshold(&self, capacity: usize) -> f64 {
        capacity as f64 * self.load_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = TableConfig::default();
        assert_eq!(c.initial_capacity, 16);
        assert_eq!(c.load_factor, 0.75);
        assert!(c.validate().is_ok());
        assert_eq!(c.threshold(16), 12.0);
    }

    #[test]
    fn rejects_zero_capacity_and_bad_load_factors() {
        let zero = TableConfig::default().with_initial_capacity(0);
        assert!(matches!(zero.validate(), Err(TableError::InvalidConfig(_))));

        for lf in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let c = TableConfig::default().with_load_factor(lf);
            assert!(c.validate().is_err(), "load factor {lf} should be rejected");
        }

        assert!(TableConfig::default().with_load_factor(1.0).validate().is_ok());
    }

    #[test]
    fn deserializes_with_field_defaults() {
        let c: TableConfig = serde_json::from_str(r#"{"initial_capacity": 4}"#).unwrap();
        assert_eq!(c, TableConfig::default().with_initial_capacity(4));

        let c: TableConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, TableConfig::default());
    }
}
