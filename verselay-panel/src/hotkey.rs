//! Hotkey recorder state machine.
//!
//! Idle until focused, then Recording: every keydown produces a live
//! normalized combination string. Blur commits the last captured value;
//! Escape commits the empty binding immediately (Escape itself can never
//! be bound).

/// Recorder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
}

/// Outcome of feeding one keydown into the recorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Combination captured; shown live, committed on blur
    Captured(String),
    /// Escape pressed: the empty binding was committed
    Cleared,
    /// Recorder was not recording; input ignored
    Ignored,
}

/// Captures one normalized key-combination string.
#[derive(Debug)]
pub struct HotkeyRecorder {
    state: RecorderState,
    committed: String,
    live: String,
}

impl HotkeyRecorder {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        let committed = initial.into();
        Self {
            state: RecorderState::Idle,
            live: committed.clone(),
            committed,
        }
    }

    #[must_use]
    pub const fn state(&self) -> RecorderState {
        self.state
    }

    /// The committed binding (empty string = unbound)
    #[must_use]
    pub fn value(&self) -> &str {
        &self.committed
    }

    /// The string currently displayed in the input
    #[must_use]
    pub fn display(&self) -> &str {
        match self.state {
            RecorderState::Idle => &self.committed,
            RecorderState::Recording => &self.live,
        }
    }

    /// Enter Recording state
    pub fn focus(&mut self) {
        self.live.clone_from(&self.committed);
        self.state = RecorderState::Recording;
    }

    /// Feed a keydown while recording.
    ///
    /// `modifiers` are held modifier names (`ctrl`, `shift`, ...); `key`
    /// is the pressed key's normalized name.
    pub fn key_down(&mut self, modifiers: &[&str], key: &str) -> KeyOutcome {
        if self.state != RecorderState::Recording {
            return KeyOutcome::Ignored;
        }

        let sequence = normalize(modifiers, key);
        if sequence == "esc" {
            self.committed.clear();
            self.live.clear();
            self.state = RecorderState::Idle;
            return KeyOutcome::Cleared;
        }

        self.live = sequence.clone();
        KeyOutcome::Captured(sequence)
    }

    /// Leave Recording state, committing the last captured value.
    ///
    /// Returns the committed binding.
    pub fn blur(&mut self) -> String {
        if self.state == RecorderState::Recording {
            self.committed.clone_from(&self.live);
            self.state = RecorderState::Idle;
        }
        self.committed.clone()
    }
}

/// Build a `mod+mod+key` combination string: lowercase, deduplicated,
/// `escape` folded to `esc`.
fn normalize(modifiers: &[&str], key: &str) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(modifiers.len() + 1);
    for part in modifiers.iter().copied().chain(std::iter::once(key)) {
        let part = part.to_lowercase();
        let part = if part == "escape" { "esc".to_string() } else { part };
        if !part.is_empty() && !parts.contains(&part) {
            parts.push(part);
        }
    }
    parts.join("+")
}
