use crate::diff::{diff, CharMark};
use crate::metrics::{accuracy_percent, words_per_minute};
use crate::passages::{PASSAGES, PASSAGE_COUNT};
use crate::timer::{Scheduler, TimerGuard, TimerId, SECOND};

/// What a keystroke did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Input updated, passage not finished yet
    Typing,
    /// Passage finished, moved on to the next one
    Advanced,
    /// Last passage finished, session is over
    Completed,
    /// Session already completed; keystroke dropped
    Ignored,
}

/// State of one two-passage sprint.
///
/// The session is "running" exactly while it holds a live [`TimerGuard`]; every
/// transition that stops the clock drops the guard, which cancels the tick task.
#[derive(Debug)]
pub struct Session {
    passages: [String; PASSAGE_COUNT],
    passage_index: usize,
    input: String,
    elapsed_secs: u64,
    timer: Option<TimerGuard>,
    wpm: u32,
    accuracy: u8,
    completed: bool,
    final_elapsed_secs: Option<u64>,
    scheduler: Box<dyn Scheduler>,
}

impl Session {
    pub fn new(scheduler: Box<dyn Scheduler>) -> Self {
        Self::with_passages(PASSAGES, scheduler)
    }

    pub fn with_passages(passages: [&str; PASSAGE_COUNT], scheduler: Box<dyn Scheduler>) -> Self {
        Self {
            passages: passages.map(str::to_owned),
            passage_index: 0,
            input: String::new(),
            elapsed_secs: 0,
            timer: None,
            wpm: 0,
            accuracy: 100,
            completed: false,
            final_elapsed_secs: None,
            scheduler,
        }
    }

    pub fn passage_index(&self) -> usize {
        self.passage_index
    }

    /// 1-based passage number for display
    pub fn passage_number(&self) -> usize {
        self.passage_index + 1
    }

    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    pub fn passage(&self) -> &str {
        &self.passages[self.passage_index]
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn accuracy(&self) -> u8 {
        self.accuracy
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn final_elapsed_secs(&self) -> Option<u64> {
        self.final_elapsed_secs
    }

    /// Whether the manual "next passage" control applies
    pub fn can_skip(&self) -> bool {
        !self.completed && self.passage_index + 1 < self.passages.len()
    }

    /// Id of the live tick task, if the clock is running
    pub fn timer_id(&self) -> Option<TimerId> {
        self.timer.as_ref().map(TimerGuard::id)
    }

    /// Per-character feedback for the current passage
    pub fn marks(&self) -> Vec<CharMark> {
        diff(self.passage(), &self.input)
    }

    /// Replaces the typed input with `value`, the full new content of the input field.
    pub fn on_keystroke(&mut self, value: impl Into<String>) -> Progress {
        if self.completed {
            return Progress::Ignored;
        }

        if !self.is_running() {
            self.start_timer();
        }

        self.input = value.into();
        self.recompute();

        if self.input.trim() == self.passage().trim() {
            self.advance_or_end()
        } else {
            Progress::Typing
        }
    }

    /// One second passed on timer `id`. Returns false for ticks of a cancelled timer.
    pub fn on_tick(&mut self, id: TimerId) -> bool {
        if self.timer_id() != Some(id) {
            tracing::trace!(?id, "stale_tick_ignored");
            return false;
        }
        self.elapsed_secs += 1;
        true
    }

    /// Moves to the next passage, or finishes the session after the last one.
    pub fn advance_or_end(&mut self) -> Progress {
        if self.passage_index + 1 < self.passages.len() {
            self.switch_passage();
            Progress::Advanced
        } else {
            self.finish();
            Progress::Completed
        }
    }

    /// User-requested skip to the next passage; no-op on the last passage.
    pub fn next_passage(&mut self) -> bool {
        if !self.can_skip() {
            return false;
        }
        self.switch_passage();
        true
    }

    /// Stops early wherever the user is.
    pub fn end_task(&mut self) {
        if !self.completed {
            self.finish();
        }
    }

    pub fn restart(&mut self) {
        self.stop_timer();
        self.passage_index = 0;
        self.input.clear();
        self.elapsed_secs = 0;
        self.wpm = 0;
        self.accuracy = 100;
        self.completed = false;
        self.final_elapsed_secs = None;
        tracing::info!("session_restarted");
    }

    fn start_timer(&mut self) {
        self.timer = Some(self.scheduler.every(SECOND));
    }

    fn stop_timer(&mut self) {
        // dropping the guard cancels the tick task
        self.timer = None;
    }

    fn recompute(&mut self) {
        self.wpm = words_per_minute(&self.input, self.elapsed_secs);
        self.accuracy = accuracy_percent(self.passage(), &self.input);
    }

    fn switch_passage(&mut self) {
        self.passage_index += 1;
        self.input.clear();
        tracing::info!(
            passage = self.passage_number(),
            elapsed_secs = self.elapsed_secs,
            "passage_advanced"
        );
    }

    fn finish(&mut self) {
        self.stop_timer();
        self.completed = true;
        self.final_elapsed_secs = Some(self.elapsed_secs);
        tracing::info!(
            elapsed_secs = self.elapsed_secs,
            wpm = self.wpm,
            accuracy = self.accuracy,
            "session_completed"
        );
    }
}
