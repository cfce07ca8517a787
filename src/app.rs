use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::constants::{KEY_FLASH_MS, NOTICE_SECS};
use crate::mode::ModeController;
use crate::recording::{ClipBank, RecordingBank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A transient status-line message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub shown_at: Instant,
}

/// Everything the instrument knows. Owned by the dispatcher, read by the UI.
pub struct AppState {
    pub controller: ModeController,
    pub bank: RecordingBank,
    pub clips: ClipBank,
    /// Highlighted keys and when they were pressed
    pub flashes: HashMap<char, Instant>,
    pub notice: Option<Notice>,
    pub export_dir: PathBuf,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(slot_count: usize, export_dir: PathBuf) -> Self {
        Self {
            controller: ModeController::new(),
            bank: RecordingBank::new(slot_count),
            clips: ClipBank::new(),
            flashes: HashMap::new(),
            notice: None,
            export_dir,
            should_quit: false,
        }
    }

    pub fn flash(&mut self, key: char, now: Instant) {
        self.flashes.insert(key.to_ascii_lowercase(), now);
    }

    pub fn is_flashing(&self, key: char) -> bool {
        self.flashes.contains_key(&key)
    }

    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            text: text.into(),
            kind,
            shown_at: now,
        });
    }

    /// Clear key highlights and notices whose time is up.
    pub fn expire(&mut self, now: Instant) {
        let flash = Duration::from_millis(KEY_FLASH_MS);
        self.flashes
            .retain(|_, pressed_at| now.duration_since(*pressed_at) < flash);

        let notice_for = Duration::from_secs(NOTICE_SECS);
        if self
            .notice
            .as_ref()
            .is_some_and(|n| now.duration_since(n.shown_at) >= notice_for)
        {
            self.notice = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flashes_clear_after_the_window() {
        let mut state = AppState::new(10, PathBuf::from("out"));
        let t0 = Instant::now();
        state.flash('A', t0);
        assert!(state.is_flashing('a'));

        state.expire(t0 + Duration::from_millis(KEY_FLASH_MS - 1));
        assert!(state.is_flashing('a'));
        state.expire(t0 + Duration::from_millis(KEY_FLASH_MS));
        assert!(!state.is_flashing('a'));
    }

    #[test]
    fn notices_expire() {
        let mut state = AppState::new(10, PathBuf::from("out"));
        let t0 = Instant::now();
        state.notify(NoticeKind::Error, "nope", t0);
        state.expire(t0 + Duration::from_secs(1));
        assert!(state.notice.is_some());
        state.expire(t0 + Duration::from_secs(NOTICE_SECS));
        assert!(state.notice.is_none());
    }
}
