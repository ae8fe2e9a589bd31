//! In-memory notification inbox
//!
//! Holds the fixed list shown in the notifications modal. Entries are
//! seeded at construction and only their read flag ever changes; nothing is
//! appended or removed, and nothing persists across runs.

use crate::error::CoreError;
use tracing::warn;

/// One entry in the notifications panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Unique within the inbox, never reused
    pub id: u32,
    pub message: String,
    pub read: bool,
}

impl Notification {
    pub fn new(id: u32, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
            read: false,
        }
    }
}

/// Fixed ordered list of notifications with read-flag toggling
#[derive(Debug, Default)]
pub struct Inbox {
    entries: Vec<Notification>,
}

impl Inbox {
    pub fn new(entries: Vec<Notification>) -> Self {
        Self { entries }
    }

    /// Placeholder content shown until a notification feed exists
    pub fn seed() -> Self {
        Self::new(vec![
            Notification::new(1, "You have a patient appointment"),
            Notification::new(2, "New doctor registration"),
            Notification::new(3, "You have a doctor appointment"),
        ])
    }

    /// Entries in display (insertion) order
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flip an entry's read flag. Unknown ids are a no-op.
    ///
    /// Returns false when no entry matched.
    pub fn toggle_read(&mut self, id: u32) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(entry) => {
                entry.read = !entry.read;
                true
            }
            None => {
                warn!("{}", CoreError::UnknownNotification { id });
                false
            }
        }
    }

    /// Count of unread entries, recomputed on every call
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    /// Entries whose message contains the query, case-insensitive.
    /// An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Notification> {
        if query.is_empty() {
            return self.entries.iter().collect();
        }
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|n| n.message.to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_unread() {
        let inbox = Inbox::seed();
        assert_eq!(inbox.len(), 3);
        assert_eq!(inbox.unread_count(), 3);
    }

    #[test]
    fn test_toggle_read_involution() {
        let mut inbox = Inbox::seed();
        let before = inbox.entries()[1].read;

        assert!(inbox.toggle_read(2));
        assert_eq!(inbox.entries()[1].read, !before);

        assert!(inbox.toggle_read(2));
        assert_eq!(inbox.entries()[1].read, before);
    }

    #[test]
    fn test_unread_count_follows_toggles() {
        let mut inbox = Inbox::seed();
        assert_eq!(inbox.unread_count(), 3);

        inbox.toggle_read(2);
        assert_eq!(inbox.unread_count(), 2);

        inbox.toggle_read(2);
        assert_eq!(inbox.unread_count(), 3);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut inbox = Inbox::seed();
        assert!(!inbox.toggle_read(99));
        assert_eq!(inbox.unread_count(), 3);
    }

    #[test]
    fn test_display_order_is_insertion_order() {
        let inbox = Inbox::seed();
        let ids: Vec<u32> = inbox.entries().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_filter_case_insensitive() {
        let inbox = Inbox::seed();
        assert_eq!(inbox.filter("DOCTOR").len(), 2);
        assert_eq!(inbox.filter("patient").len(), 1);
        assert_eq!(inbox.filter("").len(), 3);
        assert!(inbox.filter("xyz").is_empty());
    }
}
