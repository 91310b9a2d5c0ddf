//! Viewport-triggered reveal and stagger choreography.
//!
//! A subject starts hidden (transparent, pushed down, slightly shrunk).
//! When its region first reaches the trigger fraction, it transitions to
//! its resting state and stays there. A [`Stagger`] does the same for a
//! group of children, offsetting child `i` by `i * per_child_delay_ms`
//! from the group's trigger.
//!
//! This module only decides *when* each target state applies. Hosts either
//! hand the declarative [`AnimationTarget`] to their own interpolator or
//! sample [`VisualState`] per frame.

use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::easing::{lerp, Easing};
use crate::host::{IntersectionSource, RegionId};
use crate::visibility::VisibilityObserver;

/// Opacity, vertical offset and scale of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    /// 0 (transparent) to 1 (opaque).
    pub opacity: f32,
    /// Downward offset in pixels.
    pub offset_y: f32,
    /// Uniform scale factor.
    pub scale: f32,
}

impl VisualState {
    /// The initial, hidden state.
    #[must_use]
    pub const fn hidden(travel_distance: f32, scale: f32) -> Self {
        Self {
            opacity: 0.0,
            offset_y: travel_distance,
            scale,
        }
    }

    /// The resting, fully visible state.
    #[must_use]
    pub const fn resting() -> Self {
        Self {
            opacity: 1.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }

    /// Interpolate towards `to` by `t`.
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            opacity: lerp(self.opacity, to.opacity, t),
            offset_y: lerp(self.offset_y, to.offset_y, t),
            scale: lerp(self.scale, to.scale, t),
        }
    }
}

/// How a host should move to an [`AnimationTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Delay before the transition starts.
    pub delay_ms: Millis,
    /// Transition length.
    pub duration_ms: Millis,
    /// Curve.
    pub easing: Easing,
}

/// Declarative target state plus the transition to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationTarget {
    /// State to reach.
    pub state: VisualState,
    /// How to get there. `None` means apply immediately.
    pub transition: Option<Transition>,
}

/// Whether a subject has been revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealPhase {
    /// Not yet triggered.
    #[default]
    Hidden,
    /// Triggered; transitioning or at rest.
    Visible,
}

/// Settings for single-subject reveals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Visible fraction that triggers the reveal.
    pub trigger_fraction: f32,
    /// Initial downward offset.
    pub travel_distance: f32,
    /// Initial scale.
    pub hidden_scale: f32,
    /// Transition length.
    pub duration_ms: Millis,
    /// Transition curve.
    pub easing: Easing,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            trigger_fraction: 0.25,
            travel_distance: 24.0,
            hidden_scale: 0.95,
            duration_ms: 600,
            easing: Easing::EaseOut,
        }
    }
}

/// Settings for staggered groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerConfig {
    /// Visible fraction of the group that triggers every child.
    pub trigger_fraction: f32,
    /// Added delay per child index.
    pub per_child_delay_ms: Millis,
    /// Initial downward offset of each child.
    pub travel_distance: f32,
    /// Initial scale of each child.
    pub hidden_scale: f32,
    /// Per-child transition length.
    pub duration_ms: Millis,
    /// Transition curve.
    pub easing: Easing,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            trigger_fraction: 0.2,
            per_child_delay_ms: 80,
            travel_distance: 20.0,
            hidden_scale: 0.95,
            duration_ms: 550,
            easing: Easing::EaseOut,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn sample(
    hidden: VisualState,
    start: Option<Millis>,
    duration_ms: Millis,
    easing: Easing,
    now: Millis,
) -> VisualState {
    let Some(start) = start else {
        return hidden;
    };
    if now < start {
        return hidden;
    }
    if now >= start.saturating_add(duration_ms) {
        return VisualState::resting();
    }
    let t = (now - start) as f32 / duration_ms as f32;
    hidden.lerp(VisualState::resting(), easing.apply(t))
}

/// One subject revealed once when its region becomes visible.
#[derive(Debug)]
pub struct Reveal {
    observer: VisibilityObserver,
    config: RevealConfig,
    delay_offset_ms: Millis,
    triggered_at: Option<Millis>,
}

impl Reveal {
    /// Create an unmounted reveal for `target`, starting `delay_offset_ms`
    /// after the trigger.
    #[must_use]
    pub fn new(target: impl Into<RegionId>, config: RevealConfig, delay_offset_ms: Millis) -> Self {
        Self {
            observer: VisibilityObserver::new(target, config.trigger_fraction),
            config,
            delay_offset_ms,
            triggered_at: None,
        }
    }

    /// Start observing. A remount starts hidden again.
    pub fn mount(&mut self, host: &impl IntersectionSource) -> bool {
        self.triggered_at = None;
        self.observer.mount(host)
    }

    /// Feed an intersection notification. Returns `true` when this call
    /// triggered the reveal.
    pub fn on_intersection(&mut self, ratio: f32, now: Millis) -> bool {
        if !self.observer.on_intersection(ratio) {
            return false;
        }
        self.triggered_at = Some(now);
        true
    }

    /// Release the observer.
    pub fn unmount(&mut self) {
        self.observer.unmount();
    }

    /// The observed region.
    #[must_use]
    pub fn target(&self) -> &RegionId {
        self.observer.target()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        if self.triggered_at.is_some() {
            RevealPhase::Visible
        } else {
            RevealPhase::Hidden
        }
    }

    /// When the transition begins, once triggered.
    #[must_use]
    pub fn start_time(&self) -> Option<Millis> {
        self.triggered_at
            .map(|at| at.saturating_add(self.delay_offset_ms))
    }

    /// When the transition reaches rest, once triggered.
    #[must_use]
    pub fn settled_at(&self) -> Option<Millis> {
        self.start_time()
            .map(|start| start.saturating_add(self.config.duration_ms))
    }

    /// Sampled visual state at `now`.
    #[must_use]
    pub fn state_at(&self, now: Millis) -> VisualState {
        sample(
            self.hidden_state(),
            self.start_time(),
            self.config.duration_ms,
            self.config.easing,
            now,
        )
    }

    /// Declarative target for hosts with their own interpolator.
    #[must_use]
    pub fn animation_target(&self) -> AnimationTarget {
        match self.phase() {
            RevealPhase::Hidden => AnimationTarget {
                state: self.hidden_state(),
                transition: None,
            },
            RevealPhase::Visible => AnimationTarget {
                state: VisualState::resting(),
                transition: Some(Transition {
                    delay_ms: self.delay_offset_ms,
                    duration_ms: self.config.duration_ms,
                    easing: self.config.easing,
                }),
            },
        }
    }

    fn hidden_state(&self) -> VisualState {
        VisualState::hidden(self.config.travel_distance, self.config.hidden_scale)
    }
}

/// A group of children revealed together with incrementing delays.
#[derive(Debug)]
pub struct Stagger {
    observer: VisibilityObserver,
    config: StaggerConfig,
    delay_offset_ms: Millis,
    child_count: usize,
    triggered_at: Option<Millis>,
}

impl Stagger {
    /// Create an unmounted stagger group of `child_count` children.
    #[must_use]
    pub fn new(target: impl Into<RegionId>, child_count: usize, config: StaggerConfig) -> Self {
        Self {
            observer: VisibilityObserver::new(target, config.trigger_fraction),
            config,
            delay_offset_ms: 0,
            child_count,
            triggered_at: None,
        }
    }

    /// Offset every child by an extra delay after the trigger.
    #[must_use]
    pub fn with_delay_offset(mut self, delay_offset_ms: Millis) -> Self {
        self.delay_offset_ms = delay_offset_ms;
        self
    }

    /// Start observing the group region. An empty group never subscribes.
    pub fn mount(&mut self, host: &impl IntersectionSource) -> bool {
        self.triggered_at = None;
        if self.child_count == 0 {
            self.observer.unmount();
            return false;
        }
        self.observer.mount(host)
    }

    /// Feed an intersection notification for the group region.
    pub fn on_intersection(&mut self, ratio: f32, now: Millis) -> bool {
        if !self.observer.on_intersection(ratio) {
            return false;
        }
        self.triggered_at = Some(now);
        tracing::debug!(region = %self.observer.target(), children = self.child_count, now, "stagger triggered");
        true
    }

    /// Release the observer.
    pub fn unmount(&mut self) {
        self.observer.unmount();
    }

    /// The observed group region.
    #[must_use]
    pub fn target(&self) -> &RegionId {
        self.observer.target()
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.child_count
    }

    /// Whether the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.child_count == 0
    }

    /// Current phase of the group trigger.
    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        if self.triggered_at.is_some() {
            RevealPhase::Visible
        } else {
            RevealPhase::Hidden
        }
    }

    /// Delay of child `index` relative to the group trigger.
    #[must_use]
    pub fn child_delay(&self, index: usize) -> Millis {
        let index = Millis::try_from(index).unwrap_or(Millis::MAX);
        self.delay_offset_ms
            .saturating_add(index.saturating_mul(self.config.per_child_delay_ms))
    }

    /// Absolute start time of child `index`, once triggered.
    #[must_use]
    pub fn child_start(&self, index: usize) -> Option<Millis> {
        if index >= self.child_count {
            return None;
        }
        self.triggered_at
            .map(|at| at.saturating_add(self.child_delay(index)))
    }

    /// Sampled state of child `index` at `now`.
    #[must_use]
    pub fn child_state(&self, index: usize, now: Millis) -> Option<VisualState> {
        if index >= self.child_count {
            return None;
        }
        Some(sample(
            self.hidden_state(),
            self.child_start(index),
            self.config.duration_ms,
            self.config.easing,
            now,
        ))
    }

    /// Sampled states of every child at `now`.
    #[must_use]
    pub fn states(&self, now: Millis) -> Vec<VisualState> {
        (0..self.child_count)
            .filter_map(|i| self.child_state(i, now))
            .collect()
    }

    /// Declarative targets for every child.
    #[must_use]
    pub fn animation_targets(&self) -> Vec<AnimationTarget> {
        (0..self.child_count)
            .map(|i| match self.phase() {
                RevealPhase::Hidden => AnimationTarget {
                    state: self.hidden_state(),
                    transition: None,
                },
                RevealPhase::Visible => AnimationTarget {
                    state: VisualState::resting(),
                    transition: Some(Transition {
                        delay_ms: self.child_delay(i),
                        duration_ms: self.config.duration_ms,
                        easing: self.config.easing,
                    }),
                },
            })
            .collect()
    }

    /// When the last child reaches rest, once triggered.
    #[must_use]
    pub fn settled_at(&self) -> Option<Millis> {
        let last = self.child_count.checked_sub(1)?;
        self.child_start(last)
            .map(|start| start.saturating_add(self.config.duration_ms))
    }

    fn hidden_state(&self) -> VisualState {
        VisualState::hidden(self.config.travel_distance, self.config.hidden_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::host::MemoryHost;

    fn host() -> MemoryHost {
        let mut host = MemoryHost::new(1024.0);
        host.set_rect("projects", Rect::new(0.0, 900.0, 800.0, 300.0));
        host.set_rect("stack", Rect::new(0.0, 1400.0, 800.0, 600.0));
        host
    }

    #[test]
    fn test_reveal_starts_hidden() {
        let reveal = Reveal::new("projects", RevealConfig::default(), 0);
        let state = reveal.state_at(10_000);
        assert!(state.opacity.abs() < f32::EPSILON);
        assert!((state.offset_y - 24.0).abs() < f32::EPSILON);
        assert!(state.scale < 1.0);
        assert!(reveal.animation_target().transition.is_none());
    }

    #[test]
    fn test_reveal_transitions_to_rest() {
        let host = host();
        let mut reveal = Reveal::new("projects", RevealConfig::default(), 100);
        reveal.mount(&host);

        assert!(!reveal.on_intersection(0.1, 500));
        assert!(reveal.on_intersection(0.3, 1000));
        assert_eq!(reveal.start_time(), Some(1100));
        assert_eq!(reveal.settled_at(), Some(1700));

        assert!(reveal.state_at(1099).opacity.abs() < f32::EPSILON);
        let mid = reveal.state_at(1400);
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        assert_eq!(reveal.state_at(1700), VisualState::resting());
    }

    #[test]
    fn test_reveal_never_reverts() {
        let host = host();
        let mut reveal = Reveal::new("projects", RevealConfig::default(), 0);
        reveal.mount(&host);
        reveal.on_intersection(1.0, 0);

        assert!(!reveal.on_intersection(0.0, 2000));
        assert!(!reveal.on_intersection(1.0, 3000));
        assert_eq!(reveal.phase(), RevealPhase::Visible);
        assert_eq!(reveal.start_time(), Some(0));
        assert_eq!(reveal.state_at(5000), VisualState::resting());
    }

    #[test]
    fn test_stagger_offsets_children() {
        let host = host();
        let mut stagger = Stagger::new("stack", 4, StaggerConfig::default());
        stagger.mount(&host);
        assert!(stagger.on_intersection(0.2, 1000));

        let starts: Vec<_> = (0..4).filter_map(|i| stagger.child_start(i)).collect();
        assert_eq!(starts, vec![1000, 1080, 1160, 1240]);
        assert_eq!(stagger.child_start(4), None);
        assert_eq!(stagger.settled_at(), Some(1240 + 550));

        let states = stagger.states(1100);
        assert!(states[0].opacity > states[1].opacity);
        assert!(states[3].opacity.abs() < f32::EPSILON);
    }

    #[test]
    fn test_stagger_children_share_group_trigger() {
        let host = host();
        let mut stagger = Stagger::new("stack", 3, StaggerConfig::default());
        stagger.mount(&host);
        stagger.on_intersection(0.5, 200);

        let targets = stagger.animation_targets();
        let delays: Vec<_> = targets
            .iter()
            .filter_map(|t| t.transition.map(|tr| tr.delay_ms))
            .collect();
        assert_eq!(delays, vec![0, 80, 160]);
    }

    #[test]
    fn test_empty_stagger_is_noop() {
        let host = host();
        let mut stagger = Stagger::new("stack", 0, StaggerConfig::default());
        assert!(!stagger.mount(&host));
        assert_eq!(host.active_subscriptions(), 0);
        assert!(!stagger.on_intersection(1.0, 0));
        assert!(stagger.states(0).is_empty());
        assert_eq!(stagger.settled_at(), None);
    }

    #[test]
    fn test_unmount_releases_observer() {
        let host = host();
        let mut reveal = Reveal::new("projects", RevealConfig::default(), 0);
        let mut stagger = Stagger::new("stack", 2, StaggerConfig::default());
        reveal.mount(&host);
        stagger.mount(&host);
        assert_eq!(host.active_subscriptions(), 2);

        reveal.unmount();
        stagger.unmount();
        assert_eq!(host.active_subscriptions(), 0);
    }
}
