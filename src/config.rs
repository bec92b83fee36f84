//! Construction-time tuning for `ChainedHashMap`.

use crate::error::{Result, TableError};

/// Smallest bucket count a table may have. Shrinking never goes below it.
pub const MIN_CAPACITY: usize = 1;

/// Shrink trigger used by `ChainedHashMap::new`.
pub const DEFAULT_LOW_LOAD_FACTOR: f64 = 0.25;

/// Grow trigger used by `ChainedHashMap::new`.
pub const DEFAULT_HIGH_LOAD_FACTOR: f64 = 0.75;

/// Bucket count of a freshly constructed table.
pub const DEFAULT_CAPACITY: usize = 16;

/// Load-factor bounds and starting bucket count.
///
/// - `low_load_factor`: erase shrinks the table when `len / capacity` drops
///   below this.
/// - `high_load_factor`: insert grows the table when `len / capacity`
///   exceeds this.
/// - `initial_capacity`: starting bucket count; must be a power of two.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableConfig {
    pub low_load_factor: f64,
    pub high_load_factor: f64,
    pub initial_capacity: usize,
}

impl TableConfig {
    /// Config with the given bounds and the default starting capacity.
    pub fn new(low_load_factor: f64, high_load_factor: f64) -> Self {
        Self {
            low_load_factor,
            high_load_factor,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Checks `0 < low < high < 1` and that the capacity is a power of two
    /// no smaller than `MIN_CAPACITY`. NaN bounds fail every comparison and
    /// are rejected.
    pub fn validate(&self) -> Result<()> {
        let (low, high) = (self.low_load_factor, self.high_load_factor);
        let bounds_ok = low > 0.0 && high < 1.0 && low < high;
        if !bounds_ok {
            return Err(TableError::InvalidConfiguration {
                reason: format!(
                    "load factors must satisfy 0 < low < high < 1 (got low={low}, high={high})"
                ),
            });
        }
        let cap = self.initial_capacity;
        if cap < MIN_CAPACITY || !cap.is_power_of_two() {
            return Err(TableError::InvalidConfiguration {
                reason: format!("initial capacity must be a power of two >= {MIN_CAPACITY} (got {cap})"),
            });
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOW_LOAD_FACTOR, DEFAULT_HIGH_LOAD_FACTOR)
    }
}
