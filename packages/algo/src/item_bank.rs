//! Item Bank
//!
//! Static 3PL parameters keyed by difficulty level 1-10. The table is fixed at
//! compile time and never mutated, so lookups are safe from any thread.

use serde::Serialize;

use crate::error::AlgoError;
use crate::types::{ItemParameters, MAX_DIFFICULTY, MIN_DIFFICULTY};

// ==================== Constants ====================

/// Short model name reported by introspection
pub const MODEL_NAME: &str = "3PL";

/// Long model name reported by introspection
pub const MODEL_DESCRIPTION: &str = "Three-Parameter Logistic";

/// Items ordered by difficulty level; index 0 is level 1
const ITEM_BANK: [ItemParameters; MAX_DIFFICULTY as usize] = [
    // very easy
    ItemParameters {
        a: 0.8,
        b: -3.0,
        c: 0.25,
    },
    ItemParameters {
        a: 0.9,
        b: -2.0,
        c: 0.25,
    },
    ItemParameters {
        a: 1.0,
        b: -1.2,
        c: 0.25,
    },
    ItemParameters {
        a: 1.1,
        b: -0.6,
        c: 0.25,
    },
    // medium
    ItemParameters {
        a: 1.2,
        b: 0.0,
        c: 0.25,
    },
    ItemParameters {
        a: 1.3,
        b: 0.6,
        c: 0.20,
    },
    ItemParameters {
        a: 1.4,
        b: 1.2,
        c: 0.20,
    },
    ItemParameters {
        a: 1.5,
        b: 1.8,
        c: 0.15,
    },
    ItemParameters {
        a: 1.6,
        b: 2.4,
        c: 0.15,
    },
    // expert
    ItemParameters {
        a: 1.8,
        b: 3.0,
        c: 0.10,
    },
];

/// Human-readable meaning of each item parameter
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ParameterDescriptions {
    pub a: &'static str,
    pub b: &'static str,
    pub c: &'static str,
}

pub const PARAMETER_DESCRIPTIONS: ParameterDescriptions = ParameterDescriptions {
    a: "Discrimination: how well item separates ability levels",
    b: "Difficulty: theta at which P(correct)=0.5 (adjusted for c)",
    c: "Guessing: lower asymptote (chance of correct at very low ability)",
};

// ==================== Lookup ====================

/// Check that a requested level exists in the bank
pub fn validate_level(level: i64) -> Result<u8, AlgoError> {
    u8::try_from(level)
        .ok()
        .filter(|l| (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(l))
        .ok_or(AlgoError::InvalidDifficulty(level))
}

/// Item parameters for a difficulty level
pub fn lookup(level: i64) -> Result<ItemParameters, AlgoError> {
    let level = validate_level(level)?;
    Ok(ITEM_BANK[usize::from(level - MIN_DIFFICULTY)])
}

/// All items in level order
pub fn entries() -> impl Iterator<Item = (u8, ItemParameters)> {
    (MIN_DIFFICULTY..=MAX_DIFFICULTY).zip(ITEM_BANK.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_medium() {
        let item = lookup(5).unwrap();
        assert_eq!(item, ItemParameters { a: 1.2, b: 0.0, c: 0.25 });
    }

    #[test]
    fn test_lookup_bounds() {
        assert_eq!(lookup(1).unwrap().b, -3.0);
        assert_eq!(lookup(10).unwrap().a, 1.8);
    }

    #[test]
    fn test_lookup_rejects_out_of_range() {
        assert_eq!(lookup(0), Err(AlgoError::InvalidDifficulty(0)));
        assert_eq!(lookup(11), Err(AlgoError::InvalidDifficulty(11)));
        assert_eq!(lookup(-3), Err(AlgoError::InvalidDifficulty(-3)));
        assert_eq!(lookup(300), Err(AlgoError::InvalidDifficulty(300)));
    }

    #[test]
    fn test_entries_are_ordered_and_valid() {
        let items: Vec<_> = entries().collect();
        assert_eq!(items.len(), 10);
        assert_eq!(items.first().map(|(l, _)| *l), Some(1));
        assert_eq!(items.last().map(|(l, _)| *l), Some(10));

        for window in items.windows(2) {
            // harder items sit further right on the theta scale
            assert!(window[1].1.b > window[0].1.b);
        }
        for (_, item) in &items {
            assert!(item.a > 0.0);
            assert!((0.0..1.0).contains(&item.c));
        }
    }
}
