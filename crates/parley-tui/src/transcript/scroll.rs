//! Transcript scrolling.
//!
//! The widget only records how tall the content turned out. Everything that
//! moves the viewport happens in [`TranscriptScroll::after_commit`], which the
//! event loop calls once per drawn frame, and in [`TranscriptScroll::tick`],
//! which eases the offset toward its target.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lines scrolled per mouse wheel tick.
pub const SCROLL_SPEED: u16 = 3;

/// Scroll position of the transcript.
#[derive(Debug)]
pub struct TranscriptScroll {
    /// First visible line.
    offset: u16,
    /// Where the offset is easing toward.
    target: u16,
    /// Largest useful offset for the last rendered layout.
    max_offset: u16,
    /// Rows visible in the last rendered layout.
    viewport: u16,
    /// Whether to stick to the bottom as content grows.
    follow: bool,
    /// Set by the message store listener, consumed after commit.
    changed: Arc<AtomicBool>,
    /// False until the first frame has been committed.
    primed: bool,
}

impl Default for TranscriptScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptScroll {
    /// Create scroll state that starts at the newest message.
    pub fn new() -> Self {
        Self {
            offset: 0,
            target: 0,
            max_offset: 0,
            viewport: 0,
            follow: true,
            changed: Arc::new(AtomicBool::new(true)),
            primed: false,
        }
    }

    /// Flag to raise whenever the message list changes.
    ///
    /// Hand a clone to a `MessageStore` listener.
    pub fn change_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.changed)
    }

    /// Mark the message list as changed.
    pub fn notify_changed(&self) {
        self.changed.store(true, Ordering::Release);
    }

    /// Current first visible line.
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Check if follow mode is enabled.
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Check if the offset has settled on the last line.
    pub fn is_at_bottom(&self) -> bool {
        self.offset == self.max_offset
    }

    /// Check if an animation is in progress.
    pub fn is_animating(&self) -> bool {
        self.offset != self.target
    }

    /// Record the layout of the frame being rendered.
    pub fn record_layout(&mut self, content_height: usize, viewport: u16) {
        let overflow = content_height.saturating_sub(usize::from(viewport));
        self.max_offset = u16::try_from(overflow).unwrap_or(u16::MAX);
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset);
        self.target = self.target.min(self.max_offset);
    }

    /// Post-commit hook, run once after each frame is drawn.
    ///
    /// A change to the message list re-enables follow mode. While following,
    /// the target is the bottom. The very first frame jumps there directly.
    pub fn after_commit(&mut self) {
        if self.changed.swap(false, Ordering::AcqRel) {
            self.follow = true;
        }
        if self.follow {
            self.target = self.max_offset;
        }
        if !self.primed {
            self.offset = self.target;
            self.primed = true;
        }
    }

    /// Advance the smooth scroll by one step.
    ///
    /// Covers half the remaining distance per step (at least one line).
    /// Returns `true` if the offset moved.
    pub fn tick(&mut self) -> bool {
        if self.offset < self.target {
            let step = (self.target - self.offset).div_ceil(2);
            self.offset += step;
            true
        } else if self.offset > self.target {
            let step = (self.offset - self.target).div_ceil(2);
            self.offset -= step;
            true
        } else {
            false
        }
    }

    /// Scroll toward older messages. Disables follow mode.
    pub fn scroll_up(&mut self, lines: u16) {
        self.follow = false;
        self.target = self.target.saturating_sub(lines);
        self.offset = self.target;
    }

    /// Scroll toward newer messages. Reaching the bottom resumes following.
    pub fn scroll_down(&mut self, lines: u16) {
        self.target = self.target.saturating_add(lines).min(self.max_offset);
        self.offset = self.target;
        if self.target == self.max_offset {
            self.follow = true;
        }
    }

    /// Scroll up by a page.
    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport.saturating_sub(1).max(1));
    }

    /// Scroll down by a page.
    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport.saturating_sub(1).max(1));
    }

    /// Jump to the first line. Disables follow mode.
    pub fn jump_to_start(&mut self) {
        self.follow = false;
        self.target = 0;
        self.offset = 0;
    }

    /// Ease back to the newest message and resume following.
    pub fn jump_to_end(&mut self) {
        self.follow = true;
        self.target = self.max_offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(scroll: &mut TranscriptScroll) -> usize {
        let mut steps = 0;
        while scroll.tick() {
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_first_frame_jumps_to_bottom() {
        let mut scroll = TranscriptScroll::new();
        scroll.record_layout(50, 10);
        scroll.after_commit();
        assert_eq!(scroll.offset(), 40);
        assert!(scroll.is_at_bottom());
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_new_message_scrolls_smoothly() {
        let mut scroll = TranscriptScroll::new();
        scroll.record_layout(20, 10);
        scroll.after_commit();
        assert_eq!(scroll.offset(), 10);

        // A message arrives and the content grows by eight lines.
        scroll.notify_changed();
        scroll.record_layout(28, 10);
        scroll.after_commit();
        assert!(scroll.is_animating());

        assert!(scroll.tick());
        assert_eq!(scroll.offset(), 14);
        let steps = settle(&mut scroll);
        assert!(steps >= 2);
        assert_eq!(scroll.offset(), 18);
        assert!(scroll.is_at_bottom());
    }

    #[test]
    fn test_manual_scroll_suspends_follow_until_change() {
        let mut scroll = TranscriptScroll::new();
        scroll.record_layout(40, 10);
        scroll.after_commit();

        scroll.scroll_up(SCROLL_SPEED);
        assert!(!scroll.is_following());
        assert_eq!(scroll.offset(), 27);

        // Redraw without list changes keeps the manual position.
        scroll.record_layout(40, 10);
        scroll.after_commit();
        assert_eq!(scroll.offset(), 27);

        // A new message brings the newest line back into view.
        scroll.notify_changed();
        scroll.record_layout(44, 10);
        scroll.after_commit();
        assert!(scroll.is_following());
        settle(&mut scroll);
        assert_eq!(scroll.offset(), 34);
    }

    #[test]
    fn test_change_flag_from_listener() {
        let mut scroll = TranscriptScroll::new();
        scroll.record_layout(30, 10);
        scroll.after_commit();
        scroll.jump_to_start();

        let flag = scroll.change_flag();
        flag.store(true, Ordering::Release);

        scroll.after_commit();
        settle(&mut scroll);
        assert_eq!(scroll.offset(), 20);
    }

    #[test]
    fn test_scroll_down_resumes_follow_at_bottom() {
        let mut scroll = TranscriptScroll::new();
        scroll.record_layout(30, 10);
        scroll.after_commit();

        scroll.page_up();
        assert_eq!(scroll.offset(), 11);
        scroll.page_down();
        assert_eq!(scroll.offset(), 20);
        assert!(scroll.is_following());
    }

    #[test]
    fn test_short_content_never_scrolls() {
        let mut scroll = TranscriptScroll::new();
        scroll.record_layout(3, 10);
        scroll.after_commit();
        scroll.scroll_down(5);
        assert_eq!(scroll.offset(), 0);
        assert!(scroll.is_at_bottom());
    }
}
