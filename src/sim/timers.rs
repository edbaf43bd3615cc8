//! Virtual timer queue
//!
//! The host supplies the current time in milliseconds; entries fire in
//! `(due, sequence)` order so actions scheduled for the same instant run in
//! the order they were scheduled.

use serde::{Deserialize, Serialize};

/// Deferred game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Advance the game clock by one second
    ClockTick,
    /// Turn every face-up unmatched card back down
    HideUnmatched,
    /// Finish the game and show the summary
    CheckWin,
}

/// Opaque handle to a scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    id: TimerId,
    due_ms: u64,
    /// Period for repeating entries
    interval_ms: Option<u64>,
    action: Deferred,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timers {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Run `action` once, `delay_ms` after `now_ms`
    pub fn schedule_once(&mut self, now_ms: u64, delay_ms: u64, action: Deferred) -> TimerId {
        let id = self.allocate();
        self.entries.push(Entry {
            id,
            due_ms: now_ms + delay_ms,
            interval_ms: None,
            action,
        });
        id
    }

    /// Run `action` every `interval_ms`, first at `now_ms + interval_ms`
    pub fn schedule_every(&mut self, now_ms: u64, interval_ms: u64, action: Deferred) -> TimerId {
        let id = self.allocate();
        self.entries.push(Entry {
            id,
            due_ms: now_ms + interval_ms,
            interval_ms: Some(interval_ms.max(1)),
            action,
        });
        id
    }

    /// Remove an entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take the earliest entry due at or before `now_ms`.
    /// Repeating entries are re-armed one interval later; ordering among
    /// re-armed entries keeps their original sequence.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerId, Deferred)> {
        let (pos, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id))?;

        let entry = &mut self.entries[pos];
        let fired = (entry.id, entry.action);
        match entry.interval_ms {
            Some(interval) => entry.due_ms += interval,
            None => {
                self.entries.remove(pos);
            }
        }
        Some(fired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_fires_after_delay() {
        let mut timers = Timers::new();
        timers.schedule_once(0, 1000, Deferred::HideUnmatched);

        assert_eq!(timers.pop_due(999), None);
        assert!(matches!(timers.pop_due(1000), Some((_, Deferred::HideUnmatched))));
        assert_eq!(timers.pop_due(5000), None);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_same_due_fires_in_schedule_order() {
        let mut timers = Timers::new();
        timers.schedule_once(500, 1000, Deferred::HideUnmatched);
        timers.schedule_once(500, 1000, Deferred::CheckWin);

        assert_eq!(timers.pop_due(1500).map(|(_, a)| a), Some(Deferred::HideUnmatched));
        assert_eq!(timers.pop_due(1500).map(|(_, a)| a), Some(Deferred::CheckWin));
    }

    #[test]
    fn test_repeating_catches_up() {
        let mut timers = Timers::new();
        let id = timers.schedule_every(0, 1000, Deferred::ClockTick);

        let mut fired = 0;
        while let Some((fired_id, action)) = timers.pop_due(3500) {
            assert_eq!(fired_id, id);
            assert_eq!(action, Deferred::ClockTick);
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert!(timers.is_scheduled(id));
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        let id = timers.schedule_every(0, 1000, Deferred::ClockTick);
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert_eq!(timers.pop_due(10_000), None);
    }

    #[test]
    fn test_earlier_due_wins_over_sequence() {
        let mut timers = Timers::new();
        timers.schedule_once(0, 2000, Deferred::CheckWin);
        timers.schedule_once(0, 1000, Deferred::HideUnmatched);

        assert_eq!(timers.pop_due(2000).map(|(_, a)| a), Some(Deferred::HideUnmatched));
        assert_eq!(timers.pop_due(2000).map(|(_, a)| a), Some(Deferred::CheckWin));
    }
}
