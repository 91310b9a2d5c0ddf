//! # Typewriter Sequencer
//!
//! Two-phase timed text reveal:
//!
//! ```text
//! Pending ──start──▶ Generating ──delay──▶ Emitting ──last char──▶ Done
//!    ▲                   │                    │                      │
//!    └──────────── start withdrawn / unmount ─┴──────────────────────┘
//! ```
//!
//! While generating, the view shows a pulsing placeholder label. While
//! emitting, one character is appended per interval. Once done, a cursor
//! keeps blinking on its own period; the blink is a pure function of time
//! and never touches the sequencer state.
//!
//! All timers live in the instance's own [`TimerQueue`]. Withdrawing the
//! trigger or unmounting cancels them all.

use serde::{Deserialize, Serialize};

use crate::clock::{Millis, TimerQueue};
use crate::easing::{lerp, Easing};

/// Phase of the typewriter state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypewriterPhase {
    /// Not started; nothing emitted.
    #[default]
    Pending,
    /// Placeholder phase before any character appears.
    Generating,
    /// Characters are being appended.
    Emitting,
    /// Every character has been emitted.
    Done,
}

/// Timing and labels for a typewriter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    /// Length of the generating phase.
    pub generating_delay_ms: Millis,
    /// Interval between emitted characters.
    pub char_interval_ms: Millis,
    /// Full on/off period of the cursor blink.
    pub cursor_period_ms: Millis,
    /// Full period of the generating indicator pulse.
    pub indicator_pulse_ms: Millis,
    /// Placeholder label shown until emission starts.
    pub generating_label: String,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            generating_delay_ms: 3000,
            char_interval_ms: 50,
            cursor_period_ms: 800,
            indicator_pulse_ms: 1500,
            generating_label: "Generating description".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    GeneratingElapsed,
    EmitNext,
}

/// Renderable snapshot of a typewriter at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypewriterFrame {
    /// Current phase.
    pub phase: TypewriterPhase,
    /// Text emitted so far.
    pub prefix: String,
    /// Placeholder label, present while nothing is being typed.
    pub generating_label: Option<String>,
    /// Opacity of the placeholder label.
    pub indicator_opacity: f32,
    /// Whether the cursor is drawn in this frame.
    pub cursor_visible: bool,
}

/// A typewriter over one text.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    config: TypewriterConfig,
    phase: TypewriterPhase,
    emitted_bytes: usize,
    emitted_index: usize,
    generating_since: Option<Millis>,
    emitting_since: Option<Millis>,
    timers: TimerQueue<Tick>,
}

impl Typewriter {
    /// Create a pending typewriter.
    #[must_use]
    pub fn new(text: impl Into<String>, config: TypewriterConfig) -> Self {
        Self {
            text: text.into(),
            config,
            phase: TypewriterPhase::Pending,
            emitted_bytes: 0,
            emitted_index: 0,
            generating_since: None,
            emitting_since: None,
            timers: TimerQueue::new(),
        }
    }

    /// Apply the external trigger.
    ///
    /// `true` while pending starts the generating phase at `now`; `true`
    /// while already running is ignored. `false` resets to pending from any
    /// phase, so the next `true` replays from the beginning.
    pub fn set_start(&mut self, start: bool, now: Millis) {
        match (start, self.phase) {
            (true, TypewriterPhase::Pending) => {
                self.phase = TypewriterPhase::Generating;
                self.generating_since = Some(now);
                self.timers.schedule(
                    now.saturating_add(self.config.generating_delay_ms),
                    Tick::GeneratingElapsed,
                );
                tracing::debug!(now, "typewriter generating");
            }
            (false, phase) if phase != TypewriterPhase::Pending => self.reset(),
            _ => {}
        }
    }

    /// Start at `now`. Same as `set_start(true, now)`.
    pub fn start(&mut self, now: Millis) {
        self.set_start(true, now);
    }

    /// Fire every timer due at or before `now`. Returns how many
    /// characters were emitted by this call.
    ///
    /// Each timer is rescheduled from its own deadline, so a late call
    /// catches up to exactly the state an on-time host would have seen.
    pub fn advance(&mut self, now: Millis) -> usize {
        let before = self.emitted_index;
        while let Some((at, tick)) = self.timers.pop_due(now) {
            match tick {
                Tick::GeneratingElapsed => {
                    self.phase = TypewriterPhase::Emitting;
                    self.emitting_since = Some(at);
                    self.emitted_bytes = 0;
                    self.emitted_index = 0;
                    tracing::debug!(at, "typewriter emitting");
                    if self.text.is_empty() {
                        self.finish(at);
                    } else {
                        self.timers
                            .schedule(at.saturating_add(self.config.char_interval_ms), Tick::EmitNext);
                    }
                }
                Tick::EmitNext => {
                    let Some(ch) = self.text[self.emitted_bytes..].chars().next() else {
                        self.finish(at);
                        continue;
                    };
                    self.emitted_bytes += ch.len_utf8();
                    self.emitted_index += 1;
                    tracing::trace!(at, index = self.emitted_index, "typewriter emitted char");
                    if self.emitted_bytes == self.text.len() {
                        self.finish(at);
                    } else {
                        self.timers
                            .schedule(at.saturating_add(self.config.char_interval_ms), Tick::EmitNext);
                    }
                }
            }
        }
        self.emitted_index - before
    }

    fn finish(&mut self, at: Millis) {
        self.phase = TypewriterPhase::Done;
        tracing::debug!(at, chars = self.emitted_index, "typewriter done");
    }

    /// Cancel all timers and clear emission state.
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.phase = TypewriterPhase::Pending;
        self.emitted_bytes = 0;
        self.emitted_index = 0;
        self.generating_since = None;
        self.emitting_since = None;
    }

    /// Tear down: cancels every pending timer.
    pub fn unmount(&mut self) {
        self.reset();
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    /// Text emitted so far.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.text[..self.emitted_bytes]
    }

    /// Number of characters emitted so far.
    #[must_use]
    pub fn emitted_index(&self) -> usize {
        self.emitted_index
    }

    /// The full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    /// Whether every character has been emitted.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.phase == TypewriterPhase::Done
    }

    /// Next instant at which [`advance`](Self::advance) would change state.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Whether the cursor is drawn at `now`. The cursor only exists once
    /// emission has started; it is visible during the first half of each
    /// blink period.
    #[must_use]
    pub fn cursor_visible(&self, now: Millis) -> bool {
        let Some(since) = self.emitting_since else {
            return false;
        };
        let period = self.config.cursor_period_ms.max(1);
        now.saturating_sub(since) % period < period.div_ceil(2)
    }

    /// Opacity of the generating label at `now`: a 0.5 → 1 → 0.5 pulse
    /// while generating, a steady 0.5 while pending, 0 afterwards.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn indicator_opacity(&self, now: Millis) -> f32 {
        match self.phase {
            TypewriterPhase::Pending => 0.5,
            TypewriterPhase::Generating => {
                let since = self.generating_since.unwrap_or(now);
                let period = self.config.indicator_pulse_ms.max(1);
                let t = (now.saturating_sub(since) % period) as f32 / period as f32;
                let swing = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
                lerp(0.5, 1.0, Easing::EaseInOut.apply(swing))
            }
            TypewriterPhase::Emitting | TypewriterPhase::Done => 0.0,
        }
    }

    /// Snapshot for rendering at `now`. Does not advance timers.
    #[must_use]
    pub fn frame(&self, now: Millis) -> TypewriterFrame {
        let generating = matches!(
            self.phase,
            TypewriterPhase::Pending | TypewriterPhase::Generating
        );
        TypewriterFrame {
            phase: self.phase,
            prefix: self.prefix().to_string(),
            generating_label: generating.then(|| self.config.generating_label.clone()),
            indicator_opacity: self.indicator_opacity(now),
            cursor_visible: self.cursor_visible(now),
        }
    }

    /// The full emission schedule as `(offset_ms, prefix)` pairs relative
    /// to the start instant, for hosts that pre-bake keyframes.
    #[must_use]
    pub fn prefixes(&self) -> Prefixes<'_> {
        Prefixes {
            text: &self.text,
            at: self.config.generating_delay_ms,
            interval: self.config.char_interval_ms,
            next_byte: Some(0),
        }
    }
}

/// Iterator over a typewriter's emission schedule. See
/// [`Typewriter::prefixes`].
#[derive(Debug, Clone)]
pub struct Prefixes<'a> {
    text: &'a str,
    at: Millis,
    interval: Millis,
    next_byte: Option<usize>,
}

impl<'a> Iterator for Prefixes<'a> {
    type Item = (Millis, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.next_byte?;
        let item = (self.at, &self.text[..end]);
        self.next_byte = self.text[end..]
            .chars()
            .next()
            .map(|ch| end + ch.len_utf8());
        self.at = self.at.saturating_add(self.interval);
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typewriter(text: &str) -> Typewriter {
        Typewriter::new(text, TypewriterConfig::default())
    }

    #[test]
    fn test_pending_shows_indicator_only() {
        let tw = typewriter("Hello");
        let frame = tw.frame(0);
        assert_eq!(frame.phase, TypewriterPhase::Pending);
        assert_eq!(frame.prefix, "");
        assert_eq!(frame.generating_label.as_deref(), Some("Generating description"));
        assert!(!frame.cursor_visible);
        assert_eq!(tw.next_deadline(), None);
    }

    #[test]
    fn test_hi_timeline() {
        let mut tw = typewriter("Hi");
        tw.set_start(true, 0);
        assert_eq!(tw.phase(), TypewriterPhase::Generating);

        tw.advance(2999);
        assert_eq!(tw.phase(), TypewriterPhase::Generating);

        tw.advance(3000);
        assert_eq!(tw.phase(), TypewriterPhase::Emitting);
        assert_eq!(tw.prefix(), "");

        tw.advance(3050);
        assert_eq!(tw.prefix(), "H");

        tw.advance(3100);
        assert_eq!(tw.prefix(), "Hi");
        assert_eq!(tw.phase(), TypewriterPhase::Done);
        assert_eq!(tw.next_deadline(), None);
    }

    #[test]
    fn test_empty_text_done_after_generating() {
        let mut tw = typewriter("");
        tw.start(0);
        tw.advance(3000);
        assert!(tw.is_done());
        assert_eq!(tw.prefix(), "");
    }

    #[test]
    fn test_late_advance_catches_up() {
        let mut tw = typewriter("abc");
        tw.start(100);
        assert_eq!(tw.advance(10_000), 3);
        assert!(tw.is_done());
        assert_eq!(tw.prefix(), "abc");
    }

    #[test]
    fn test_withdraw_cancels_timers() {
        let mut tw = typewriter("abc");
        tw.start(0);
        tw.advance(3050);
        assert_eq!(tw.prefix(), "a");

        tw.set_start(false, 3060);
        assert_eq!(tw.phase(), TypewriterPhase::Pending);
        assert_eq!(tw.prefix(), "");
        assert_eq!(tw.next_deadline(), None);
        assert_eq!(tw.advance(100_000), 0);
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let mut tw = typewriter("ab");
        tw.start(0);
        tw.start(1000);
        assert_eq!(tw.next_deadline(), Some(3000));
    }

    #[test]
    fn test_multibyte_text() {
        let mut tw = typewriter("héllo");
        tw.start(0);
        tw.advance(3100);
        assert_eq!(tw.prefix(), "hé");
        assert_eq!(tw.emitted_index(), 2);
    }

    #[test]
    fn test_cursor_blinks_after_emission_starts() {
        let mut tw = typewriter("x");
        tw.start(0);
        assert!(!tw.cursor_visible(1000));
        tw.advance(3050);
        assert!(tw.cursor_visible(3000));
        assert!(tw.cursor_visible(3399));
        assert!(!tw.cursor_visible(3400));
        assert!(tw.cursor_visible(3800));
        // Blinking never changes the sequencer.
        assert!(tw.is_done());
        assert_eq!(tw.next_deadline(), None);
    }

    #[test]
    fn test_indicator_pulse_range() {
        let mut tw = typewriter("x");
        tw.start(0);
        assert!((tw.indicator_opacity(0) - 0.5).abs() < 1e-6);
        assert!((tw.indicator_opacity(750) - 1.0).abs() < 1e-6);
        tw.advance(3000);
        assert!(tw.indicator_opacity(3000).abs() < f32::EPSILON);
    }

    #[test]
    fn test_prefixes_schedule() {
        let tw = typewriter("Hi");
        let schedule: Vec<_> = tw.prefixes().collect();
        assert_eq!(schedule, vec![(3000, ""), (3050, "H"), (3100, "Hi")]);

        let empty = typewriter("");
        assert_eq!(empty.prefixes().collect::<Vec<_>>(), vec![(3000, "")]);
    }
}
