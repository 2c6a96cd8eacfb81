//! Bounded undo/redo history of selection snapshots.
//!
//! A cursor-based snapshot log: appending while the cursor is not at the
//! tail discards the redo branch first, and exceeding the capacity
//! evicts the oldest entry ring-buffer style, shifting the cursor so it
//! keeps naming the same logical snapshot. The log is never empty; it
//! always holds at least the state captured at the last reset.

use std::collections::VecDeque;

use ndarray::Array2;

/// One immutable copy of the selection mask.
pub type Snapshot = Array2<bool>;

pub struct HistoryStack {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    capacity: usize,
}

impl HistoryStack {
    /// Create a history seeded with `initial`. `capacity` must be at
    /// least 1.
    pub fn new(initial: Snapshot, capacity: usize) -> Self {
        assert!(capacity >= 1, "history capacity must be positive");
        let mut entries = VecDeque::with_capacity(capacity + 1);
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            capacity,
        }
    }

    /// Record a new snapshot after a mutation.
    ///
    /// Any redo branch beyond the cursor is discarded first. If the log
    /// would exceed its capacity, the oldest entry is evicted.
    pub fn append(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one snapshot, or report that nothing is left to undo.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 {
            log::warn!("nothing to undo");
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one snapshot, or report that nothing is left to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.cursor + 1 >= self.entries.len() {
            log::warn!("nothing to redo");
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Drop everything and restart from a single snapshot.
    pub fn clear(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.cursor = 0;
    }

    /// Snapshot currently under the cursor.
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        // The log is never empty by construction.
        false
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 1x1 snapshot tagged by value so entries are distinguishable.
    fn snap(v: bool) -> Snapshot {
        Array2::from_elem((1, 1), v)
    }

    fn snap_n(n: usize) -> Snapshot {
        // Encode n in the mask length to tell snapshots apart.
        Array2::from_elem((1, n + 1), true)
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = HistoryStack::new(snap(false), 10);
        for i in 0..5 {
            history.append(snap_n(i));
        }

        for _ in 0..5 {
            assert!(history.undo().is_some());
        }
        assert_eq!(history.current(), &snap(false));
        assert!(history.undo().is_none(), "at the initial state");

        for i in 0..5 {
            let restored = history.redo().expect("redo available");
            assert_eq!(restored, &snap_n(i));
        }
        assert!(history.redo().is_none(), "at the tail");
    }

    #[test]
    fn test_append_discards_redo_branch() {
        let mut history = HistoryStack::new(snap(false), 10);
        history.append(snap_n(0));
        history.append(snap_n(1));
        history.append(snap_n(2));

        history.undo();
        history.undo();
        assert_eq!(history.current(), &snap_n(0));

        history.append(snap_n(9));
        assert!(history.redo().is_none(), "redo branch was discarded");
        assert_eq!(history.len(), 3); // initial, n0, n9
        assert_eq!(history.current(), &snap_n(9));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let capacity = 4;
        let mut history = HistoryStack::new(snap(false), capacity);

        // capacity + 1 appends on top of the initial entry.
        for i in 0..=capacity {
            history.append(snap_n(i));
        }

        assert_eq!(history.len(), capacity);
        assert!(history.cursor() < history.len());
        assert_eq!(history.current(), &snap_n(capacity));

        // Walk back to the oldest survivor: the second snapshot ever
        // appended (the initial entry and the first append were evicted).
        while history.cursor() > 0 {
            history.undo();
        }
        assert_eq!(history.current(), &snap_n(1));
    }

    #[test]
    fn test_cursor_still_names_same_entry_after_eviction() {
        let mut history = HistoryStack::new(snap(false), 3);
        history.append(snap_n(0));
        history.append(snap_n(1));
        history.undo(); // cursor on n0
        assert_eq!(history.current(), &snap_n(0));

        // Appending discards n1, pushes n2; no eviction needed yet.
        history.append(snap_n(2));
        assert_eq!(history.current(), &snap_n(2));
        history.undo();
        assert_eq!(history.current(), &snap_n(0));
    }

    #[test]
    fn test_clear_resets_to_single_entry() {
        let mut history = HistoryStack::new(snap(false), 5);
        history.append(snap_n(0));
        history.append(snap_n(1));

        history.clear(snap(true));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), &snap(true));
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity_rejected() {
        let _ = HistoryStack::new(snap(false), 0);
    }
}
