use serde::{Deserialize, Serialize};

/// Runtime value. Only double-precision numbers exist at this stage.
pub type Value = f64;

/// Append-only constant pool.
///
/// A constant's identity is its index; indices are handed out in order
/// starting at 0 and never reused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueArray {
    values: Vec<Value>,
}

impl ValueArray {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append `value` and return its index.
    pub fn write(&mut self, value: Value) -> usize {
        self.values.push(value);
        self.values.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Drop every value and release the storage.
    pub fn clear(&mut self) {
        self.values = Vec::new();
    }
}

/// Format a value the way listings and diagnostics show it.
pub fn format_value(value: Value) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_ascend_from_zero() {
        let mut pool = ValueArray::new();
        for k in 0..300 {
            assert_eq!(pool.write(k as f64), k);
        }
        assert_eq!(pool.len(), 300);
        assert_eq!(pool.get(299), Some(299.0));
        assert_eq!(pool.get(300), None);
    }

    #[test]
    fn test_equal_values_are_not_deduplicated() {
        let mut pool = ValueArray::new();
        assert_eq!(pool.write(1.0), 0);
        assert_eq!(pool.write(1.0), 1);
        assert_eq!(pool.as_slice(), &[1.0, 1.0]);
    }

    #[test]
    fn test_clear_releases_storage() {
        let mut pool = ValueArray::new();
        pool.write(2.5);
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.write(3.0), 0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1.0), "1");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-0.125), "-0.125");
    }
}
