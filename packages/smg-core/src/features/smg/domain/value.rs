//! Symbolic values

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// First id handed out by the value factory. Ids below it belong to
/// `SmgValue::new`, so explicit and fresh values never alias.
pub const FRESH_VALUE_BASE: u64 = 1 << 32;

static NEXT_VALUE: AtomicU64 = AtomicU64::new(FRESH_VALUE_BASE);

/// Opaque identifier standing for a scalar or an address.
///
/// Values are graph-global: any number of has-value edges may hold the same
/// value, and at most one points-to edge may start from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SmgValue(u64);

impl SmgValue {
    /// The integer 0, and the address of the null object
    pub const NULL: SmgValue = SmgValue(0);

    /// Value with an explicit id, for fixtures and deserialized states.
    /// Keep `raw` below `FRESH_VALUE_BASE`.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Value factory: a non-null value never handed out before, disjoint
    /// from every explicit id below `FRESH_VALUE_BASE`
    pub fn fresh() -> Self {
        Self(NEXT_VALUE.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl From<u64> for SmgValue {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SmgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_values_are_distinct_and_non_null() {
        let a = SmgValue::fresh();
        let b = SmgValue::fresh();
        assert_ne!(a, b);
        assert!(!a.is_null());
        assert!(!b.is_null());
    }

    #[test]
    fn test_fresh_values_never_alias_explicit_ids() {
        let explicit: Vec<SmgValue> = (1..64).map(SmgValue::new).collect();
        for _ in 0..64 {
            let fresh = SmgValue::fresh();
            assert!(fresh.raw() >= FRESH_VALUE_BASE);
            assert!(!explicit.contains(&fresh));
        }
    }

    #[test]
    fn test_null_value() {
        assert!(SmgValue::NULL.is_null());
        assert_eq!(SmgValue::from(0), SmgValue::NULL);
        assert_eq!(SmgValue::NULL.to_string(), "#0");
    }
}
