//! Toast notifications
//!
//! Keeps the queue of transient notifications shown to the user. Each toast
//! has a kind (which selects its icon), a message and a lifetime; the
//! presentation layer polls [`ToastQueue::expire`] to drop stale ones.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    /// Font Awesome icon class for the kind
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "fa-check-circle",
            ToastKind::Error => "fa-exclamation-circle",
            ToastKind::Warning => "fa-exclamation-triangle",
            ToastKind::Info => "fa-info-circle",
        }
    }
}

impl FromStr for ToastKind {
    type Err = std::convert::Infallible;

    /// Unknown kinds fall back to `Info`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        })
    }
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    /// Instant after which the toast should be removed
    pub fn expires_at(&self) -> DateTime<Utc> {
        let lifetime = chrono::Duration::from_std(self.duration).unwrap_or(chrono::Duration::MAX);
        self.created_at
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() <= now
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}

/// Ordered queue of visible toasts
#[derive(Debug, Clone)]
pub struct ToastQueue {
    default_duration: Duration,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            default_duration,
            toasts: Vec::new(),
        }
    }

    /// Shows a toast for the default duration and returns its id
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> Uuid {
        self.show_for(message, kind, self.default_duration)
    }

    /// Shows a toast for `duration` and returns its id
    pub fn show_for(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
    ) -> Uuid {
        self.push_at(message.into(), kind, duration, Utc::now())
    }

    fn push_at(
        &mut self,
        message: String,
        kind: ToastKind,
        duration: Duration,
        now: DateTime<Utc>,
    ) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message,
            duration,
            created_at: now,
        };
        tracing::debug!(id = %toast.id, ?kind, message = %toast.message, "toast shown");
        let id = toast.id;
        self.toasts.push(toast);
        id
    }

    /// Removes a toast before it expires
    ///
    /// # Returns
    /// `true` if a toast with that id was visible
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drops every toast whose lifetime has elapsed at `now`
    ///
    /// # Returns
    /// The removed toasts, oldest first
    pub fn expire(&mut self, now: DateTime<Utc>) -> Vec<Toast> {
        let (expired, active): (Vec<Toast>, Vec<Toast>) =
            std::mem::take(&mut self.toasts)
                .into_iter()
                .partition(|t| t.is_expired(now));
        self.toasts = active;
        expired
    }

    /// Visible toasts in the order they were shown
    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_TOAST_DURATION_MS))
    }
}
