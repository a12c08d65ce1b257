//! Draft text held by the input bar.

/// Whether the composer has something worth sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    /// Draft is empty or whitespace. Send is disabled.
    Idle,
    /// Draft has visible text. Send is enabled.
    Ready,
}

/// The in-progress draft and its cursor.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    draft: String,
    /// Cursor position (character index, not byte index).
    cursor: usize,
}

impl Composer {
    /// Create an empty composer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the draft unconditionally. The cursor moves to the end.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.cursor = self.char_len();
    }

    /// Check if the draft is literally empty.
    pub fn is_empty(&self) -> bool {
        self.draft.is_empty()
    }

    /// Idle or Ready, derived from the trimmed draft.
    pub fn state(&self) -> ComposerState {
        if self.draft.trim().is_empty() {
            ComposerState::Idle
        } else {
            ComposerState::Ready
        }
    }

    /// Check if the send control should be enabled.
    pub fn can_send(&self) -> bool {
        self.state() == ComposerState::Ready
    }

    /// Take the draft for submission.
    ///
    /// Returns `None` and leaves the draft alone when the trimmed draft is
    /// empty. Otherwise returns the draft as typed and clears it.
    pub fn take_submission(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        self.cursor = 0;
        Some(std::mem::take(&mut self.draft))
    }

    /// Clear the draft.
    pub fn clear(&mut self) {
        self.draft.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.draft.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_offset(self.cursor);
        self.draft.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Insert a line break at the cursor.
    pub fn insert_newline(&mut self) {
        self.insert('\n');
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.draft.remove(at);
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.draft.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.draft.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.draft
            .char_indices()
            .nth(char_idx)
            .map_or(self.draft.len(), |(i, _)| i)
    }
}
