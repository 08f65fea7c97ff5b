//! Undo/redo history of bitmap snapshots.

use crate::snapshot::Snapshot;

/// Ordered snapshots plus a cursor pointing at the one currently shown.
///
/// The cursor is `None` only while the history is empty. Recording after an
/// undo discards everything after the cursor.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Snapshot>,
    cursor: Option<usize>,
    limit: Option<usize>,
}

impl History {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` entries (minimum 1).
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.map(|l| l.max(1)),
            ..Self::default()
        }
    }

    /// Append a snapshot after the cursor, dropping any redo branch.
    pub fn record(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(snapshot);

        if let Some(limit) = self.limit {
            if self.entries.len() > limit {
                let excess = self.entries.len() - limit;
                self.entries.drain(..excess);
            }
        }

        self.cursor = Some(self.entries.len() - 1);
        log::debug!("History recorded entry {} of {}", self.entries.len() - 1, self.entries.len());
    }

    /// Step back. Returns the snapshot to show, or `None` at the start.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    /// Step forward. Returns the snapshot to show, or `None` at the end.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor.filter(|&c| c + 1 < self.entries.len())? + 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    /// Cursor index, `None` when empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tag: u8) -> Snapshot {
        Snapshot::from_png(vec![tag])
    }

    fn tag(snapshot: Option<&Snapshot>) -> Option<u8> {
        snapshot.map(|s| s.as_png()[0])
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_record_advances_cursor() {
        let mut history = History::new();
        for i in 0..=4 {
            history.record(snap(i));
        }
        assert_eq!(history.len(), 5);
        assert_eq!(history.cursor(), Some(4));
        assert_eq!(tag(history.current()), Some(4));
    }

    #[test]
    fn test_undo_stops_at_first_entry() {
        let mut history = History::new();
        history.record(snap(0));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));

        history.record(snap(1));
        assert_eq!(tag(history.undo()), Some(0));
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_undo_then_redo() {
        let mut history = History::new();
        history.record(snap(0));
        history.record(snap(1));
        history.record(snap(2));

        assert_eq!(tag(history.undo()), Some(1));
        assert!(history.can_redo());
        assert_eq!(tag(history.redo()), Some(2));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), Some(2));
    }

    #[test]
    fn test_record_after_undo_truncates() {
        let mut history = History::new();
        for i in 0..4 {
            history.record(snap(i));
        }
        history.undo();
        history.undo();
        assert_eq!(history.cursor(), Some(1));

        history.record(snap(9));
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(tag(history.current()), Some(9));
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Some(3));
        for i in 0..5 {
            history.record(snap(i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(tag(history.undo()), Some(3));
        assert_eq!(tag(history.undo()), Some(2));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.record(snap(0));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
    }
}
