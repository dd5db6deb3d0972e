//! Timeline model: selection, playback and the advance schedule.
//!
//! The model owns the mark snapshot, the current position and the set of
//! pending advances. Advances are measured against a virtual clock that the
//! host moves forward with [`Player::advance`]; every operation that changes
//! playback state drains the pending set before scheduling anything new.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::PlayerConfig;
use crate::mark::{Mark, MarkSet, MarkValue};

/// Handle transition used for selections and value sync.
pub const SELECT_TRANSITION: Duration = Duration::from_millis(500);

/// Handle transition used for clicks on the track.
pub const CLICK_TRANSITION: Duration = Duration::from_secs(1);

/// How the renderer should move the handle to its new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Jump immediately (dragging).
    Instant,
    /// Ease over the given duration.
    Ease(Duration),
}

impl Transition {
    /// Transition for selections, playback advances and value sync.
    pub const SELECT: Self = Self::Ease(SELECT_TRANSITION);
    /// Transition for clicks on the track.
    pub const CLICK: Self = Self::Ease(CLICK_TRANSITION);

    /// Duration of the transition.
    pub fn duration(self) -> Duration {
        match self {
            Self::Instant => Duration::ZERO,
            Self::Ease(d) => d,
        }
    }
}

/// Declarative handle and fill state for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleVisual {
    /// Target position of the handle and end of the fill, 0 to 100.
    pub percent: f64,
    /// How to get there.
    pub transition: Transition,
}

impl Default for HandleVisual {
    fn default() -> Self {
        Self {
            percent: 0.0,
            transition: Transition::Instant,
        }
    }
}

/// Notifications for the consumer of the player.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Playback started.
    Play,
    /// Playback paused.
    Pause,
    /// A mark was selected by a click, drag or playback advance.
    Trigger(Mark),
}

/// One entry of a playback schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    /// Offset from the start of playback.
    pub at: Duration,
    /// Index of the mark selected at `at`, or `None` when playback finishes.
    pub target: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    due: Duration,
    from: usize,
}

/// A progress player instance.
#[derive(Debug)]
pub struct Player {
    marks: MarkSet,
    finish_to_start: bool,
    current_percent: f64,
    playing: bool,
    pending: VecDeque<PendingAdvance>,
    clock: Duration,
    selected: Option<usize>,
    handle: HandleVisual,
    events: Vec<PlayerEvent>,
}

impl Player {
    /// Create a player from its configuration.
    ///
    /// When the configuration carries a value, the player starts at the mark
    /// with that value; otherwise at 0.
    pub fn new(config: &PlayerConfig) -> Self {
        let mut player = Self {
            marks: MarkSet::new(&config.marks, config.distance_average),
            finish_to_start: config.finish_to_start,
            current_percent: 0.0,
            playing: false,
            pending: VecDeque::new(),
            clock: Duration::ZERO,
            selected: None,
            handle: HandleVisual::default(),
            events: Vec::new(),
        };

        if let Some(index) = config
            .value
            .as_ref()
            .and_then(|v| player.marks.index_of_value(v))
        {
            player.current_percent = player.marks.marks()[index].percent;
            player.selected = Some(index);
            player.handle.percent = player.current_percent;
        }

        debug!(
            marks = player.marks.len(),
            start = player.current_percent,
            "Player initialized"
        );
        player
    }

    /// Re-derive the mark snapshot after a configuration change.
    ///
    /// Playback is paused first. The position is kept when a mark still sits
    /// at it, and the configured value (if any) is synced afterwards.
    pub fn reconfigure(&mut self, config: &PlayerConfig) {
        if self.playing {
            self.pause();
        }
        self.marks = MarkSet::new(&config.marks, config.distance_average);
        self.finish_to_start = config.finish_to_start;

        match self.marks.index_of_percent(self.current_percent) {
            Some(index) if self.selected.is_some() => self.selected = Some(index),
            Some(_) => {}
            None => {
                self.current_percent = 0.0;
                self.selected = None;
                self.handle = HandleVisual::default();
            }
        }

        if let Some(value) = &config.value {
            self.sync_value(value);
        }
    }

    /// The mark snapshot.
    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    /// Percent of the active mark.
    pub fn current_percent(&self) -> f64 {
        self.current_percent
    }

    /// Check if playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Index of the mark styled as selected.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Current handle target.
    pub fn handle(&self) -> HandleVisual {
        self.handle
    }

    /// Whether playback wraps the handle back to the first mark.
    pub fn finish_to_start(&self) -> bool {
        self.finish_to_start
    }

    /// Number of scheduled advances.
    pub fn pending_advances(&self) -> usize {
        self.pending.len()
    }

    /// Elapsed virtual time.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Time until the next scheduled advance fires.
    pub fn time_until_next_advance(&self) -> Option<Duration> {
        self.pending
            .front()
            .map(|p| p.due.saturating_sub(self.clock))
    }

    /// Drain queued notifications.
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Select the mark at `percent` with the standard transition.
    ///
    /// Returns false if nothing changed.
    pub fn select_mark(&mut self, percent: f64) -> bool {
        self.seek(percent, Transition::SELECT)
    }

    /// Seek to `percent`.
    ///
    /// Seeking to the active position is a no-op. Seeking during playback
    /// pauses first. Selection styling moves to the first mark at `percent`
    /// (or is cleared when there is none) and that mark is triggered.
    pub fn seek(&mut self, percent: f64, transition: Transition) -> bool {
        if self.marks.is_empty() || self.current_percent == percent {
            return false;
        }
        if self.playing {
            self.pause();
        }
        debug!(from = self.current_percent, to = percent, "Seek");
        self.current_percent = percent;
        self.activate_percent(percent, transition);
        true
    }

    /// Seek to the next mark (in sequence order) at a different position.
    pub fn step_forward(&mut self) -> bool {
        let from = self.position_index();
        let target = self
            .marks
            .marks()
            .iter()
            .enumerate()
            .skip(from.map_or(0, |i| i + 1))
            .find(|(_, m)| m.percent != self.current_percent)
            .map(|(_, m)| m.percent);
        target.is_some_and(|p| self.select_mark(p))
    }

    /// Seek to the previous mark (in sequence order) at a different position.
    pub fn step_backward(&mut self) -> bool {
        let Some(from) = self.position_index() else {
            return false;
        };
        let target = self.marks.marks()[..from]
            .iter()
            .rev()
            .find(|m| m.percent != self.current_percent)
            .map(|m| m.percent);
        target.is_some_and(|p| self.select_mark(p))
    }

    /// Seek to the first mark.
    pub fn go_to_start(&mut self) -> bool {
        match self.marks.get(0).map(|m| m.percent) {
            Some(p) => self.select_mark(p),
            None => false,
        }
    }

    /// Start playback from the current position.
    ///
    /// Re-entrant: calling while already playing restarts the schedule from
    /// the current position. The current mark is activated immediately and
    /// one advance is scheduled per remaining mark, each at the running total
    /// of dwell times.
    pub fn play(&mut self) {
        if self.marks.is_empty() {
            return;
        }
        self.events.push(PlayerEvent::Play);
        self.playing = true;
        self.pending.clear();
        self.activate_percent(self.current_percent, Transition::SELECT);

        let Some(start) = self.marks.first_at_or_after(self.current_percent) else {
            self.finish();
            return;
        };

        self.schedule_from(start);
        debug!(
            from = self.current_percent,
            scheduled = self.pending.len(),
            "Play"
        );
    }

    /// Pause playback and cancel every pending advance.
    pub fn pause(&mut self) {
        if self.marks.is_empty() {
            return;
        }
        self.events.push(PlayerEvent::Pause);
        self.playing = false;
        let cancelled = self.pending.len();
        self.pending.clear();
        debug!(cancelled, at = self.current_percent, "Pause");
    }

    /// Play when paused, pause when playing.
    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Move the virtual clock forward, firing every advance that falls due.
    pub fn advance(&mut self, elapsed: Duration) {
        self.clock = self.clock.saturating_add(elapsed);
        while self.pending.front().is_some_and(|p| p.due <= self.clock) {
            if let Some(advance) = self.pending.pop_front() {
                self.fire(advance.from);
            }
        }
    }

    /// The advances `play()` would schedule from the current position.
    pub fn schedule_preview(&self) -> Vec<ScheduledAdvance> {
        let Some(start) = self.marks.first_at_or_after(self.current_percent) else {
            return Vec::new();
        };
        let len = self.marks.len();
        let mut at = Duration::ZERO;
        self.marks
            .marks()
            .iter()
            .enumerate()
            .skip(start)
            .map(|(from, mark)| {
                at = at.saturating_add(dwell(mark));
                ScheduledAdvance {
                    at,
                    target: (from + 1 < len).then_some(from + 1),
                }
            })
            .collect()
    }

    /// Move the handle to the mark whose value equals `value`.
    ///
    /// Updates the position and selection styling without triggering. While
    /// playing, the remaining advances are rescheduled from the synced mark.
    pub fn sync_value(&mut self, value: &MarkValue) -> bool {
        let Some(index) = self.marks.index_of_value(value) else {
            debug!(%value, "No mark for synced value");
            return false;
        };
        let percent = self.marks.marks()[index].percent;
        self.current_percent = percent;
        self.selected = Some(index);
        self.handle = HandleVisual {
            percent,
            transition: Transition::SELECT,
        };
        if self.playing {
            self.pending.clear();
            self.schedule_from(index);
        }
        true
    }

    /// Cancel pending advances without notifying the consumer.
    pub fn shutdown(&mut self) {
        if !self.pending.is_empty() {
            trace!(cancelled = self.pending.len(), "Dropping pending advances");
        }
        self.pending.clear();
        self.playing = false;
    }

    /// Pin the handle to a track edge without changing the position.
    pub(crate) fn pin_handle(&mut self, percent: f64) {
        if self.marks.is_empty() {
            return;
        }
        self.handle = HandleVisual {
            percent,
            transition: Transition::Instant,
        };
    }

    /// Put the handle back on the current position.
    pub(crate) fn restore_handle(&mut self, transition: Transition) {
        if self.handle.percent != self.current_percent {
            self.handle = HandleVisual {
                percent: self.current_percent,
                transition,
            };
        }
    }

    fn position_index(&self) -> Option<usize> {
        self.selected
            .filter(|&i| self.marks.get(i).is_some_and(|m| m.percent == self.current_percent))
            .or_else(|| self.marks.index_of_percent(self.current_percent))
    }

    /// Queue one advance per mark from `start`, each due at the running
    /// total of dwell times. Totals saturate at `Duration::MAX`.
    fn schedule_from(&mut self, start: usize) {
        let mut elapsed = Duration::ZERO;
        for (from, mark) in self.marks.marks().iter().enumerate().skip(start) {
            elapsed = elapsed.saturating_add(dwell(mark));
            self.pending.push_back(PendingAdvance {
                due: self.clock.saturating_add(elapsed),
                from,
            });
        }
    }

    fn fire(&mut self, from: usize) {
        let next = from + 1;
        match self.marks.get(next).map(|m| m.percent) {
            Some(percent) => {
                trace!(from, next, "Advance");
                self.current_percent = percent;
                self.activate_index(next, Transition::SELECT);
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) {
        debug!(finish_to_start = self.finish_to_start, "Playback finished");
        self.pause();
        if self.finish_to_start {
            if let Some(first) = self.marks.get(0) {
                self.handle = HandleVisual {
                    percent: first.percent,
                    transition: Transition::SELECT,
                };
            }
        }
        self.current_percent = 0.0;
        self.selected = None;
    }

    fn activate_percent(&mut self, percent: f64, transition: Transition) {
        match self.marks.index_of_percent(percent) {
            Some(index) => self.activate_index(index, transition),
            None => {
                self.selected = None;
                self.handle = HandleVisual {
                    percent,
                    transition,
                };
            }
        }
    }

    fn activate_index(&mut self, index: usize, transition: Transition) {
        let Some(mark) = self.marks.get(index) else {
            return;
        };
        self.handle = HandleVisual {
            percent: mark.percent,
            transition,
        };
        self.events.push(PlayerEvent::Trigger(mark.clone()));
        self.selected = Some(index);
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn dwell(mark: &Mark) -> Duration {
    Duration::try_from_secs_f64(mark.time).unwrap_or(Duration::ZERO)
}
