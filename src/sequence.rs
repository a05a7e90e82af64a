use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::{debug, warn};

use crate::error::{ResolveError, Result};

/// Widest supported sequence; `10^19 - 1` is the largest such value in a `u64`
pub const MAX_WIDTH: u32 = 19;

/// Fixed-width sequential numbers, one independent sequence per digit count.
///
/// The first number issued for width `L` is `10^(L-1)`, every following call
/// issues the previous value plus one, up to `10^L - 1`. Past that the width
/// is exhausted and [`SequenceStore::next`] fails without touching the state.
#[derive(Debug, Default)]
pub struct SequenceStore {
    issued: Mutex<HashMap<u32, Vec<u64>>>,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store shared by every caller in this process
    pub fn global() -> &'static SequenceStore {
        static GLOBAL: OnceLock<SequenceStore> = OnceLock::new();
        GLOBAL.get_or_init(SequenceStore::new)
    }

    /// Issue the next number of `length` digits
    pub fn next(&self, length: u32) -> Result<String> {
        let (min, max) = bounds(length)?;
        let mut issued = self.lock();
        let numbers = issued.entry(length).or_default();

        let value = match numbers.last() {
            None => min,
            Some(&previous) if previous < max => previous + 1,
            Some(&previous) => {
                warn!(length, last = previous, "sequential numbers exhausted");
                return Err(ResolveError::SequenceExhausted {
                    length,
                    max: previous,
                });
            }
        };

        numbers.push(value);
        debug!(length, value, "issued sequential number");
        Ok(value.to_string())
    }

    /// The most recently issued number of `length` digits
    pub fn last(&self, length: u32) -> Option<String> {
        self.lock()
            .get(&length)
            .and_then(|numbers| numbers.last())
            .map(u64::to_string)
    }

    /// Every number issued so far for `length`, oldest first
    pub fn history(&self, length: u32) -> Vec<String> {
        self.lock()
            .get(&length)
            .map(|numbers| numbers.iter().map(u64::to_string).collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<u32, Vec<u64>>> {
        // the table is only appended to, so a poisoned guard is still consistent
        self.issued.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn bounds(length: u32) -> Result<(u64, u64)> {
    if length == 0 || length > MAX_WIDTH {
        return Err(ResolveError::UnsupportedWidth { length });
    }
    let min = 10u64.pow(length - 1);
    let max = match 10u64.checked_pow(length) {
        Some(limit) => limit - 1,
        None => u64::MAX,
    };
    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_seeds_smallest_number() {
        let store = SequenceStore::new();
        assert_eq!(store.next(1).unwrap(), "1");
        assert_eq!(store.next(3).unwrap(), "100");
        assert_eq!(store.next(6).unwrap(), "100000");
    }

    #[test]
    fn test_advances_by_one() {
        let store = SequenceStore::new();
        for k in 1..=50u64 {
            assert_eq!(store.next(4).unwrap(), (1000 + k - 1).to_string());
        }
        assert_eq!(store.last(4).as_deref(), Some("1049"));
    }

    #[test]
    fn test_widths_are_independent() {
        let store = SequenceStore::new();
        store.next(2).unwrap();
        store.next(2).unwrap();
        assert_eq!(store.next(3).unwrap(), "100");
        assert_eq!(store.history(2), vec!["10", "11"]);
        assert!(store.history(5).is_empty());
        assert_eq!(store.last(5), None);
    }

    #[test]
    fn test_exhaustion_is_an_error() {
        let store = SequenceStore::new();
        for expected in 1..=9 {
            assert_eq!(store.next(1).unwrap(), expected.to_string());
        }
        let err = store.next(1).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::SequenceExhausted { length: 1, max: 9 }
        ));
        // state untouched, still exhausted
        assert_eq!(store.last(1).as_deref(), Some("9"));
        assert!(store.next(1).is_err());
        assert_eq!(store.history(1).len(), 9);
    }

    #[test]
    fn test_two_digit_width_runs_to_99() {
        let store = SequenceStore::new();
        let issued: Vec<String> = (0..90).map(|_| store.next(2).unwrap()).collect();
        assert_eq!(issued.first().map(String::as_str), Some("10"));
        assert_eq!(issued.last().map(String::as_str), Some("99"));
        assert!(store.next(2).is_err());
    }

    #[test]
    fn test_unsupported_widths() {
        let store = SequenceStore::new();
        assert!(matches!(
            store.next(0),
            Err(ResolveError::UnsupportedWidth { length: 0 })
        ));
        assert!(matches!(
            store.next(20),
            Err(ResolveError::UnsupportedWidth { length: 20 })
        ));
        assert_eq!(store.next(19).unwrap(), "1000000000000000000");
    }

    #[test]
    fn test_concurrent_callers_get_distinct_numbers() {
        let store = Arc::new(SequenceStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..100)
                        .map(|_| store.next(5).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .map(|n| n.parse().unwrap())
            .collect();
        all.sort_unstable();

        let expected: Vec<u64> = (10_000..10_800).collect();
        assert_eq!(all, expected);
        assert_eq!(store.history(5).len(), 800);
    }
}
