use crate::stats::{self, DerivedStats};
use std::collections::HashSet;
use std::time::Instant;

/// Progress on the word currently being typed.
///
/// `expect_space` is derived from `typed_length == char_len` whenever the
/// record is (re)built, so a zero-length word immediately waits for its
/// terminator without a special case.
#[derive(Clone, Debug, PartialEq)]
pub struct WordProgress {
    pub word_index: usize,
    pub word: String,
    pub typed_length: usize,
    pub is_correct: bool,
    pub wrong_char_indices: HashSet<usize>,
    pub expect_space: bool,
    char_len: usize,
}

impl WordProgress {
    fn new(word_index: usize, word: &str) -> Self {
        let char_len = word.chars().count();
        Self {
            word_index,
            word: word.to_string(),
            typed_length: 0,
            is_correct: true,
            wrong_char_indices: HashSet::new(),
            expect_space: char_len == 0,
            char_len,
        }
    }

    /// Number of characters in the current word.
    pub fn char_len(&self) -> usize {
        self.char_len
    }
}

/// Coarse session lifecycle. Finished carries the stats snapshotted at the
/// moment the last word was terminated; no keystroke is processed past it.
#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Typing,
    Finished(DerivedStats),
}

/// A typing run over an immutable word stream.
#[derive(Debug)]
pub struct Session {
    words: Vec<String>,
    progress: WordProgress,
    wrong_word_indices: HashSet<usize>,
    typed_chars: Vec<char>,
    started_at: Option<Instant>,
    stats: DerivedStats,
    phase: Phase,
}

impl Session {
    /// Callers must reject empty word streams before constructing a session.
    pub fn new(words: Vec<String>) -> Self {
        debug_assert!(!words.is_empty(), "session requires a non-empty word stream");
        let progress = WordProgress::new(0, &words[0]);
        Self {
            words,
            progress,
            wrong_word_indices: HashSet::new(),
            typed_chars: Vec::new(),
            started_at: None,
            stats: DerivedStats::default(),
            phase: Phase::Typing,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn progress(&self) -> &WordProgress {
        &self.progress
    }

    pub fn wrong_word_indices(&self) -> &HashSet<usize> {
        &self.wrong_word_indices
    }

    /// Characters echoed for the current word; cleared on every advance.
    pub fn typed_chars(&self) -> &[char] {
        &self.typed_chars
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn has_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Live stats while typing, or the final snapshot once finished.
    pub fn stats(&self) -> &DerivedStats {
        match &self.phase {
            Phase::Finished(final_stats) => final_stats,
            Phase::Typing => &self.stats,
        }
    }

    /// Feed one keystroke into the state machine. `now` is read from a
    /// monotonic clock once per keystroke by the caller.
    pub fn handle_keystroke(&mut self, c: char, now: Instant) {
        if self.has_finished() {
            return;
        }

        if self.progress.expect_space {
            self.advance_word(c, now);
            return;
        }

        let expected = match self.progress.word.chars().nth(self.progress.typed_length) {
            Some(ch) => ch,
            None => return,
        };

        if !c.to_lowercase().eq(expected.to_lowercase()) {
            // Mismatch: the cursor stays put until the right character comes.
            self.progress
                .wrong_char_indices
                .insert(self.progress.typed_length);
            self.progress.is_correct = false;
            self.wrong_word_indices.insert(self.progress.word_index);
            self.recompute_stats(now);
            return;
        }

        self.progress.typed_length += 1;
        if self.progress.typed_length == self.progress.char_len {
            self.progress.expect_space = true;
        }
        self.typed_chars.push(c);
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.recompute_stats(now);
    }

    /// Restart the current word: cursor and echo reset, mistakes stay
    /// counted in the session history.
    pub fn restart_word(&mut self) {
        if self.has_finished() {
            return;
        }
        self.progress.typed_length = 0;
        self.progress.expect_space = self.progress.char_len == 0;
        self.typed_chars.clear();
    }

    /// The keystroke terminating a completed word. Anything but a single
    /// space retroactively marks the word wrong, but still advances.
    fn advance_word(&mut self, c: char, now: Instant) {
        if c != ' ' {
            self.wrong_word_indices.insert(self.progress.word_index);
        }

        let next = self.progress.word_index + 1;
        if next == self.words.len() {
            self.phase = Phase::Finished(self.stats.clone());
            return;
        }

        self.progress = WordProgress::new(next, &self.words[next]);
        self.typed_chars.clear();
        self.recompute_stats(now);
    }

    fn recompute_stats(&mut self, now: Instant) {
        self.stats = stats::recompute(
            self.progress.word_index,
            self.wrong_word_indices.len(),
            self.started_at,
            now,
        );
    }
}
