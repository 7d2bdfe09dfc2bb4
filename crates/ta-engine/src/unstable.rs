//! Process-wide unstable-period registry.
//!
//! The table is the only mutable state of the engine. Writers take the write
//! lock; every call copies the whole table once, under one read lock, and
//! uses that copy for both its lookback and its kernel.

use core::fmt;
use core::str::FromStr;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use ta_core::{FuncUnstId, TaError, UnstablePeriods};
use tracing::info;

static UNSTABLE: Lazy<RwLock<UnstablePeriods>> = Lazy::new(|| RwLock::new(UnstablePeriods::new()));

/// Family (or families) an unstable-period update applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnstableTarget {
    /// Every family.
    All,
    /// A single family.
    Family(FuncUnstId),
}

impl From<FuncUnstId> for UnstableTarget {
    fn from(id: FuncUnstId) -> Self {
        Self::Family(id)
    }
}

impl fmt::Display for UnstableTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Family(id) => f.write_str(id.name()),
        }
    }
}

impl FromStr for UnstableTarget {
    type Err = TaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ALL" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Family)
        }
    }
}

impl UnstableTarget {
    /// Apply `period` to this target in `table`.
    pub fn apply_to(self, table: &mut UnstablePeriods, period: u32) {
        match self {
            Self::All => table.set_all(period),
            Self::Family(id) => table.set(id, period),
        }
    }
}

/// Set the unstable period of `target`. Takes effect on the next call.
pub fn set_unstable_period(target: impl Into<UnstableTarget>, period: u32) {
    let target = target.into();
    target.apply_to(&mut UNSTABLE.write(), period);
    info!(%target, period, "unstable period set");
}

/// Current unstable period of one family.
#[must_use]
pub fn unstable_period(id: FuncUnstId) -> usize {
    UNSTABLE.read().get(id)
}

/// Copy of the whole table.
#[must_use]
pub fn snapshot() -> UnstablePeriods {
    *UNSTABLE.read()
}

/// Replace the whole table in one write.
pub fn replace(table: UnstablePeriods) {
    *UNSTABLE.write() = table;
    info!(
        overridden = table.iter().filter(|&(_, period)| period != 0).count(),
        "unstable period table replaced"
    );
}

/// Set every family back to zero.
pub fn reset_unstable_periods() {
    replace(UnstablePeriods::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests that write the shared table live in tests/unstable_periods.rs so
    // they cannot race with the dispatcher tests of this binary.

    #[test]
    fn test_target_parsing() {
        assert_eq!("ALL".parse::<UnstableTarget>(), Ok(UnstableTarget::All));
        assert_eq!(
            "EMA".parse::<UnstableTarget>(),
            Ok(UnstableTarget::Family(FuncUnstId::Ema))
        );
        assert_eq!(
            "HT_TRENDMODE".parse::<UnstableTarget>(),
            Ok(UnstableTarget::Family(FuncUnstId::HtTrendmode))
        );
        assert_eq!(
            "BOGUS".parse::<UnstableTarget>(),
            Err(TaError::UnknownFamily("BOGUS".to_string()))
        );
    }

    #[test]
    fn test_target_display_round_trips() {
        for target in [
            UnstableTarget::All,
            UnstableTarget::Family(FuncUnstId::MinusDi),
        ] {
            assert_eq!(target.to_string().parse::<UnstableTarget>(), Ok(target));
        }
    }

    #[test]
    fn test_apply_to_table() {
        let mut table = UnstablePeriods::new();
        UnstableTarget::All.apply_to(&mut table, 4);
        UnstableTarget::Family(FuncUnstId::Rsi).apply_to(&mut table, 9);
        assert_eq!(table.get(FuncUnstId::Rsi), 9);
        assert_eq!(table.get(FuncUnstId::T3), 4);
    }
}
