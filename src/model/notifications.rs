//! Transient user-facing notifications, deduplicated by identity

use std::time::{Duration, Instant};

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    EmptyQuery,
    NoResults { query: String },
    FetchFailed { generation: u64 },
}

impl NotificationKind {
    /// Stable identity used for deduplication
    pub fn id(&self) -> String {
        match self {
            Self::EmptyQuery => "empty-query".to_string(),
            Self::NoResults { query } => format!("no-results:{}", query),
            Self::FetchFailed { generation } => format!("fetch-failed:{}", generation),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "Please enter your search query.",
            Self::NoResults { .. } => "No movies found for your request.",
            Self::FetchFailed { .. } => "There was an error, please try again...",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub kind: NotificationKind,
    pub shown_at: Instant,
}

/// Queue of visible notifications.
///
/// A notification whose identity is already on screen is dropped, so the
/// same event reported twice in a row does not stack duplicates.
#[derive(Clone, Debug, Default)]
pub struct Notifications {
    visible: Vec<Notification>,
}

impl Notifications {
    /// Returns `true` if the notification was queued
    pub fn push(&mut self, kind: NotificationKind) -> bool {
        self.push_at(kind, Instant::now())
    }

    pub(crate) fn push_at(&mut self, kind: NotificationKind, now: Instant) -> bool {
        let id = kind.id();
        if self.visible.iter().any(|n| n.kind.id() == id) {
            return false;
        }
        tracing::debug!(id = %id, "Notification queued");
        self.visible.push(Notification { kind, shown_at: now });
        true
    }

    pub fn expire(&mut self) {
        self.expire_at(Instant::now());
    }

    pub(crate) fn expire_at(&mut self, now: Instant) {
        self.visible
            .retain(|n| now.duration_since(n.shown_at) < NOTIFICATION_TTL);
    }

    pub fn dismiss_all(&mut self) {
        self.visible.clear();
    }

    pub fn visible(&self) -> &[Notification] {
        &self.visible
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_identity_is_dropped() {
        let mut n = Notifications::default();
        assert!(n.push(NotificationKind::FetchFailed { generation: 3 }));
        assert!(!n.push(NotificationKind::FetchFailed { generation: 3 }));
        assert!(n.push(NotificationKind::FetchFailed { generation: 4 }));
        assert_eq!(n.visible().len(), 2);
    }

    #[test]
    fn same_notification_can_repeat_once_expired() {
        let mut n = Notifications::default();
        let start = Instant::now();
        assert!(n.push_at(NotificationKind::EmptyQuery, start));
        assert!(!n.push_at(NotificationKind::EmptyQuery, start));
        n.expire_at(start + NOTIFICATION_TTL + Duration::from_millis(1));
        assert!(n.push_at(NotificationKind::EmptyQuery, start + NOTIFICATION_TTL));
    }

    #[test]
    fn expiry_keeps_fresh_notifications() {
        let mut n = Notifications::default();
        let start = Instant::now();
        n.push_at(NotificationKind::EmptyQuery, start);
        n.push_at(
            NotificationKind::FetchFailed { generation: 1 },
            start + Duration::from_secs(3),
        );
        n.expire_at(start + Duration::from_secs(6));
        assert_eq!(n.visible().len(), 1);
        assert_eq!(n.visible()[0].kind, NotificationKind::FetchFailed { generation: 1 });
    }
}
