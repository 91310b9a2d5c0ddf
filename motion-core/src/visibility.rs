//! One-shot visibility observation.
//!
//! A [`VisibilityObserver`] subscribes to intersection notifications for one
//! region when mounted, reports the first notification whose visible
//! fraction reaches its threshold, and then drops the subscription for
//! good. Unmounting releases the subscription whether or not it fired.

use serde::{Deserialize, Serialize};

use crate::host::{IntersectionSource, RegionId, Subscription};

/// Observable lifecycle of an observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibilityState {
    /// A subscription is currently live.
    pub observed: bool,
    /// The visible signal has fired for this mount.
    pub has_triggered: bool,
}

/// Watches one region and fires once when it becomes visible.
#[derive(Debug)]
pub struct VisibilityObserver {
    target: RegionId,
    threshold: f32,
    state: VisibilityState,
    subscription: Option<Subscription>,
}

impl VisibilityObserver {
    /// Create an unmounted observer. `threshold` is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(target: impl Into<RegionId>, threshold: f32) -> Self {
        let threshold = if threshold.is_nan() {
            0.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            target: target.into(),
            threshold,
            state: VisibilityState::default(),
            subscription: None,
        }
    }

    /// Subscribe through `host`. Any previous lifecycle is released first,
    /// so a remount starts fresh.
    ///
    /// Returns `false` if the target does not exist; the observer then
    /// stays inert.
    pub fn mount(&mut self, host: &impl IntersectionSource) -> bool {
        self.unmount();
        self.state = VisibilityState::default();
        match host.observe(&self.target, self.threshold) {
            Some(subscription) => {
                self.subscription = Some(subscription);
                self.state.observed = true;
                true
            }
            None => {
                tracing::debug!(region = %self.target, "visibility target missing, not observing");
                false
            }
        }
    }

    /// Feed an intersection notification. Returns `true` exactly once per
    /// mount: on the first notification at or above the threshold.
    pub fn on_intersection(&mut self, ratio: f32) -> bool {
        if !self.state.observed || self.state.has_triggered || ratio.is_nan() {
            return false;
        }
        if ratio < self.threshold {
            return false;
        }
        self.state.has_triggered = true;
        self.state.observed = false;
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
        tracing::debug!(region = %self.target, ratio, "region became visible");
        true
    }

    /// Release the subscription, if any.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
        self.state.observed = false;
    }

    /// The observed region.
    #[must_use]
    pub fn target(&self) -> &RegionId {
        &self.target
    }

    /// The clamped threshold.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Whether the visible signal has fired for this mount.
    #[must_use]
    pub fn has_triggered(&self) -> bool {
        self.state.has_triggered
    }
}
