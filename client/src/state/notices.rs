//! Application-level notice area for failures components do not recover from.

#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

/// Maximum number of notices retained; the oldest is dropped first.
pub const NOTICE_CAP: usize = 20;

/// Severity of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Info,
}

/// A single message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Notices provided via context as `RwSignal<NoticeState>`.
#[derive(Clone, Debug, Default)]
pub struct NoticeState {
    pub items: Vec<Notice>,
    next_id: u64,
}

impl NoticeState {
    pub fn push_error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Error, message.into())
    }

    pub fn push_info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Info, message.into())
    }

    /// Remove a notice by id. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    fn push(&mut self, level: NoticeLevel, message: String) -> u64 {
        self.next_id = self.next_id.saturating_add(1);
        if self.items.len() >= NOTICE_CAP {
            self.items.remove(0);
        }
        self.items.push(Notice { id: self.next_id, level, message });
        self.next_id
    }
}
