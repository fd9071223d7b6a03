//! Toast-style notifications
//!
//! The engine communicates outcomes to the presentation layer exclusively
//! through [`Notice`] values pushed into an unbounded channel; raw
//! collaborator errors never cross this boundary.

use tokio::sync::mpsc;

/// Notice severity level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastLevel {
    /// Neutral information ("transaction cancelled").
    #[default]
    Info,
    /// A confirmed outcome.
    Success,
    /// Something degraded but recoverable.
    Warning,
    /// A terminal failure.
    Error,
}

impl ToastLevel {
    /// Indicator symbol for this level.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }
}

/// A user-facing notification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notice {
    /// Message text, ready for display.
    pub message: String,
    /// Severity.
    pub level: ToastLevel,
}

impl Notice {
    /// Create a notice at the given level.
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    /// Informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Info)
    }

    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Success)
    }

    /// Warning notice.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Warning)
    }

    /// Error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastLevel::Error)
    }

    /// Check if this notice is an error level notice.
    pub fn is_error(&self) -> bool {
        matches!(self.level, ToastLevel::Error)
    }
}

/// Receiving half of the notice stream, handed out once at construction.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Sending half owned by the engine.
#[derive(Clone, Debug)]
pub(crate) struct NoticeSender(mpsc::UnboundedSender<Notice>);

impl NoticeSender {
    /// Create a connected sender/receiver pair.
    pub(crate) fn channel() -> (Self, NoticeReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self(tx), rx)
    }

    /// Emit a notice; a dropped receiver is not an error.
    pub(crate) fn emit(&self, notice: Notice) {
        let _ = self.0.send(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_levels() {
        assert_eq!(Notice::info("a").level, ToastLevel::Info);
        assert_eq!(Notice::success("b").level, ToastLevel::Success);
        assert_eq!(Notice::warning("c").level, ToastLevel::Warning);
        assert!(Notice::error("d").is_error());
    }

    #[tokio::test]
    async fn channel_delivers_in_order() {
        let (tx, mut rx) = NoticeSender::channel();
        tx.emit(Notice::info("first"));
        tx.emit(Notice::success("second"));
        assert_eq!(rx.recv().await.map(|n| n.message), Some("first".into()));
        assert_eq!(rx.recv().await.map(|n| n.message), Some("second".into()));
    }

    #[test]
    fn emit_after_receiver_dropped_is_silent() {
        let (tx, rx) = NoticeSender::channel();
        drop(rx);
        tx.emit(Notice::error("nobody listening"));
    }
}
