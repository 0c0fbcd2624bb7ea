//! # Sequence Module
//!
//! Daily, per-preparer document counters.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SequenceState lifecycle                              │
//! │                                                                         │
//! │  Startup ──► SequenceRegistry::load(current?, legacy?, today, who)      │
//! │                 │                                                       │
//! │                 ├── current record, same day   → use as-is              │
//! │                 ├── current record, other day  → {today, {}}            │
//! │                 ├── legacy record, same day    → {today, {who: seq}}    │
//! │                 └── otherwise                  → {today, {}}            │
//! │                                                                         │
//! │  current_sequence(P, today)   pure read, 0 when the stored day is stale │
//! │                                                                         │
//! │  increment(P, today)          stale day → reset, then counters[P] += 1  │
//! │                               caller persists before doing anything     │
//! │                               else                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Counters apply only to `state.date`; another day means all zero.
//! - A preparer's count never decreases within a day.
//! - Incrementing one preparer never touches another preparer's entry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{DayKey, DocumentNumber, PreparerId};

// =============================================================================
// Persisted Records
// =============================================================================

/// Per-preparer counters for a single day (current persisted format).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceState {
    /// Day the counters apply to.
    pub date: DayKey,

    /// Preparer id → number of documents committed on `date`.
    #[serde(default)]
    pub counters: BTreeMap<String, u32>,
}

impl SequenceState {
    /// An empty state for `date`.
    pub fn empty(date: DayKey) -> Self {
        SequenceState {
            date,
            counters: BTreeMap::new(),
        }
    }
}

/// The older single global counter. Read once, never written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySequenceState {
    /// Day the global count applies to.
    pub date: DayKey,

    /// Documents committed on `date`, across all preparers.
    pub seq: u32,
}

// =============================================================================
// Registry
// =============================================================================

/// Where the loaded state came from. Logged by the shell at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Current-format record for today.
    Restored,
    /// Current-format record from another day, counters discarded.
    DiscardedStale,
    /// Seeded from today's legacy global counter.
    MigratedLegacy,
    /// Nothing usable, started empty.
    Fresh,
}

/// Owns the daily counters.
///
/// Pure: "today" is always an argument, and persisting the state after
/// [`SequenceRegistry::increment`] is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRegistry {
    state: SequenceState,
}

impl SequenceRegistry {
    /// Wraps an existing state without applying load rules.
    pub fn from_state(state: SequenceState) -> Self {
        SequenceRegistry { state }
    }

    /// Builds the startup state from whatever records could be read.
    ///
    /// `active` is the preparer that inherits a same-day legacy count: the
    /// saved preparer when there is one, otherwise the first in the roster.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use orden_core::sequence::{LegacySequenceState, LoadOutcome, SequenceRegistry};
    /// use orden_core::types::{DayKey, PreparerId};
    ///
    /// let today = DayKey::from_date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    /// let legacy = LegacySequenceState { date: today, seq: 7 };
    /// let nacho = PreparerId::new("Nacho");
    ///
    /// let (registry, outcome) = SequenceRegistry::load(None, Some(legacy), today, &nacho);
    /// assert_eq!(outcome, LoadOutcome::MigratedLegacy);
    /// assert_eq!(registry.current_sequence(&nacho, today), 7);
    /// ```
    pub fn load(
        current: Option<SequenceState>,
        legacy: Option<LegacySequenceState>,
        today: DayKey,
        active: &PreparerId,
    ) -> (Self, LoadOutcome) {
        if let Some(state) = current {
            if state.date == today {
                return (SequenceRegistry { state }, LoadOutcome::Restored);
            }
            return (
                SequenceRegistry {
                    state: SequenceState::empty(today),
                },
                LoadOutcome::DiscardedStale,
            );
        }

        if let Some(old) = legacy {
            if old.date == today {
                let mut state = SequenceState::empty(today);
                state.counters.insert(active.as_str().to_string(), old.seq);
                return (SequenceRegistry { state }, LoadOutcome::MigratedLegacy);
            }
        }

        (
            SequenceRegistry {
                state: SequenceState::empty(today),
            },
            LoadOutcome::Fresh,
        )
    }

    /// Count already committed today by `preparer`.
    ///
    /// Returns 0 when the stored day is not `today`. Never mutates: the
    /// day-rollover reset happens lazily in [`Self::increment`].
    pub fn current_sequence(&self, preparer: &PreparerId, today: DayKey) -> u32 {
        if self.state.date != today {
            return 0;
        }
        self.state
            .counters
            .get(preparer.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Advances `preparer`'s counter and returns the new value.
    ///
    /// A stale day is discarded first, so the first commit of a new day
    /// returns 1.
    pub fn increment(&mut self, preparer: &PreparerId, today: DayKey) -> u32 {
        if self.state.date != today {
            self.state = SequenceState::empty(today);
        }
        let count = self
            .state
            .counters
            .entry(preparer.as_str().to_string())
            .or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// The number the form shows for `preparer` right now.
    pub fn document_number(&self, preparer: &PreparerId, today: DayKey) -> DocumentNumber {
        DocumentNumber::new(today, self.current_sequence(preparer, today))
    }

    /// The state to persist.
    pub fn state(&self) -> &SequenceState {
        &self.state
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> DayKey {
        DayKey::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn today() -> DayKey {
        day(2025, 1, 31)
    }

    fn yesterday() -> DayKey {
        day(2025, 1, 30)
    }

    fn nacho() -> PreparerId {
        PreparerId::new("Nacho")
    }

    fn pepo() -> PreparerId {
        PreparerId::new("Pepo")
    }

    #[test]
    fn test_increment_twice_same_day() {
        let (mut reg, _) = SequenceRegistry::load(None, None, today(), &nacho());

        assert_eq!(reg.increment(&nacho(), today()), 1);
        assert_eq!(reg.increment(&nacho(), today()), 2);
        assert_eq!(reg.current_sequence(&nacho(), today()), 2);
        assert_eq!(reg.current_sequence(&pepo(), today()), 0);
    }

    #[test]
    fn test_increment_preserves_other_preparers() {
        let mut state = SequenceState::empty(today());
        state.counters.insert("Pepo".to_string(), 4);
        let mut reg = SequenceRegistry::from_state(state);

        reg.increment(&nacho(), today());

        assert_eq!(reg.current_sequence(&pepo(), today()), 4);
        assert_eq!(reg.current_sequence(&nacho(), today()), 1);
    }

    #[test]
    fn test_current_sequence_on_stale_day_is_zero_and_pure() {
        let mut state = SequenceState::empty(yesterday());
        state.counters.insert("Nacho".to_string(), 9);
        let reg = SequenceRegistry::from_state(state.clone());

        assert_eq!(reg.current_sequence(&nacho(), today()), 0);
        assert_eq!(reg.state(), &state);
    }

    #[test]
    fn test_increment_on_stale_day_resets_first() {
        let mut state = SequenceState::empty(yesterday());
        state.counters.insert("Nacho".to_string(), 9);
        state.counters.insert("Pepo".to_string(), 3);
        let mut reg = SequenceRegistry::from_state(state);

        assert_eq!(reg.increment(&nacho(), today()), 1);
        assert_eq!(reg.state().date, today());
        assert_eq!(reg.current_sequence(&pepo(), today()), 0);
        assert_eq!(reg.state().counters.len(), 1);
    }

    #[test]
    fn test_load_restores_current_record() {
        let mut state = SequenceState::empty(today());
        state.counters.insert("Pepo".to_string(), 5);

        let legacy = LegacySequenceState {
            date: today(),
            seq: 99,
        };
        let (reg, outcome) =
            SequenceRegistry::load(Some(state), Some(legacy), today(), &nacho());

        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(reg.current_sequence(&pepo(), today()), 5);
        // Legacy is ignored once a current-format record exists
        assert_eq!(reg.current_sequence(&nacho(), today()), 0);
    }

    #[test]
    fn test_load_discards_stale_current_record() {
        let mut state = SequenceState::empty(yesterday());
        state.counters.insert("Nacho".to_string(), 5);
        let legacy = LegacySequenceState {
            date: today(),
            seq: 7,
        };

        let (reg, outcome) = SequenceRegistry::load(Some(state), Some(legacy), today(), &nacho());

        assert_eq!(outcome, LoadOutcome::DiscardedStale);
        assert_eq!(reg.state(), &SequenceState::empty(today()));
    }

    #[test]
    fn test_load_migrates_legacy_for_today() {
        let legacy = LegacySequenceState {
            date: today(),
            seq: 7,
        };

        let (reg, outcome) = SequenceRegistry::load(None, Some(legacy), today(), &pepo());

        assert_eq!(outcome, LoadOutcome::MigratedLegacy);
        assert_eq!(reg.current_sequence(&pepo(), today()), 7);
        assert_eq!(reg.current_sequence(&nacho(), today()), 0);
    }

    #[test]
    fn test_load_ignores_stale_legacy() {
        let legacy = LegacySequenceState {
            date: yesterday(),
            seq: 7,
        };

        let (reg, outcome) = SequenceRegistry::load(None, Some(legacy), today(), &nacho());

        assert_eq!(outcome, LoadOutcome::Fresh);
        assert_eq!(reg.current_sequence(&nacho(), today()), 0);
        assert_eq!(reg.current_sequence(&pepo(), today()), 0);
    }

    #[test]
    fn test_migrated_count_keeps_growing() {
        let legacy = LegacySequenceState {
            date: today(),
            seq: 7,
        };
        let (mut reg, _) = SequenceRegistry::load(None, Some(legacy), today(), &nacho());

        assert_eq!(reg.increment(&nacho(), today()), 8);
        assert_eq!(reg.increment(&pepo(), today()), 1);
    }

    #[test]
    fn test_document_number_tracks_preparer() {
        let (mut reg, _) = SequenceRegistry::load(None, None, today(), &nacho());
        reg.increment(&pepo(), today());
        reg.increment(&pepo(), today());
        reg.increment(&pepo(), today());

        assert_eq!(
            reg.document_number(&pepo(), today()).to_string(),
            "V-20250131-03"
        );
        assert_eq!(
            reg.document_number(&nacho(), today()).to_string(),
            "V-20250131-00"
        );
    }

    #[test]
    fn test_state_json_shape() {
        let mut state = SequenceState::empty(today());
        state.counters.insert("Nacho".to_string(), 2);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "date": "20250131", "counters": { "Nacho": 2 } })
        );

        let legacy: LegacySequenceState =
            serde_json::from_str(r#"{"date":"20250131","seq":7}"#).unwrap();
        assert_eq!(legacy.seq, 7);
    }
}
