//! Transient notification banner state.
//!
//! DESIGN
//! ======
//! One slot. Showing a notice replaces the current one and bumps `seq`;
//! auto-dismiss timers carry the `seq` they were started for so a stale
//! timer never clears a newer notice.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use std::time::Duration;

/// How long a notice stays up before auto-dismiss.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notice notice--success",
            Self::Error => "notice notice--error",
            Self::Info => "notice notice--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub seq: u64,
}

/// Current banner, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    pub current: Option<Notice>,
    next_seq: u64,
}

impl NoticeState {
    /// Replace the current notice; returns its `seq` for the dismiss timer.
    pub fn show(&mut self, message: impl Into<String>, kind: NoticeKind) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.current = Some(Notice { message: message.into(), kind, seq });
        seq
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, NoticeKind::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, NoticeKind::Error)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, NoticeKind::Info)
    }

    /// Clear the notice only if it is still the one identified by `seq`.
    pub fn dismiss(&mut self, seq: u64) {
        if self.current.as_ref().is_some_and(|n| n.seq == seq) {
            self.current = None;
        }
    }

    /// Clear whatever is showing.
    pub fn close(&mut self) {
        self.current = None;
    }
}
