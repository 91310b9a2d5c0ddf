//! Host capabilities: resize and intersection subscriptions, layout
//! measurement.
//!
//! Components never install global listeners. The host hands out
//! [`Subscription`] guards; dropping a guard (or calling
//! [`Subscription::release`]) unsubscribes. Notifications themselves are
//! delivered by the host calling back into the component
//! (`on_resize`, `on_intersection`).

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Name of a measurable region of the page (e.g. `"description"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Create a region identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The region name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for RegionId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A live listener registration. Unsubscribes exactly once, on
/// [`release`](Self::release) or drop.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap an unsubscribe callback.
    #[must_use]
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release, for hosts that push
    /// notifications without registering listeners.
    #[must_use]
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Unsubscribe now.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Source of viewport width and resize notifications.
pub trait ResizeSource {
    /// Current viewport width in pixels.
    fn viewport_width(&self) -> f32;

    /// Register for resize notifications.
    fn subscribe_resize(&self) -> Subscription;
}

/// Source of intersection notifications for page regions.
pub trait IntersectionSource {
    /// Start observing `target` at `threshold`.
    ///
    /// Returns `None` when the target does not exist, in which case no
    /// notifications will ever arrive.
    fn observe(&self, target: &RegionId, threshold: f32) -> Option<Subscription>;
}

/// Source of region bounding boxes.
pub trait LayoutSource {
    /// Measure a region. `None` if the region is detached or unknown.
    fn measure(&self, region: &RegionId) -> Option<Rect>;
}

/// Everything a page needs from its host.
pub trait Host: ResizeSource + IntersectionSource + LayoutSource {}

impl<T: ResizeSource + IntersectionSource + LayoutSource> Host for T {}

type Registrations = Rc<RefCell<HashMap<String, usize>>>;

const RESIZE_KEY: &str = "@resize";

/// An in-memory host: regions are rectangles set by the caller, and every
/// live subscription is counted so leaks are observable.
///
/// Used by the WASM bridge (JS pushes measurements in) and by the preview
/// CLI's simulated page.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    width: f32,
    rects: HashMap<RegionId, Rect>,
    registrations: Registrations,
}

impl MemoryHost {
    /// Create a host with the given viewport width and no regions.
    #[must_use]
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Set the viewport width.
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Insert or replace a region's rectangle.
    pub fn set_rect(&mut self, region: impl Into<RegionId>, rect: Rect) {
        self.rects.insert(region.into(), rect);
    }

    /// Remove a region, making it unmeasurable.
    pub fn remove_rect(&mut self, region: &RegionId) -> Option<Rect> {
        self.rects.remove(region)
    }

    /// All known regions and their rectangles.
    pub fn regions(&self) -> impl Iterator<Item = (&RegionId, &Rect)> {
        self.rects.iter()
    }

    /// Number of live intersection observers on `region`.
    #[must_use]
    pub fn observer_count(&self, region: &RegionId) -> usize {
        self.registrations
            .borrow()
            .get(region.as_str())
            .copied()
            .unwrap_or(0)
    }

    /// Number of live resize listeners.
    #[must_use]
    pub fn resize_listener_count(&self) -> usize {
        self.registrations
            .borrow()
            .get(RESIZE_KEY)
            .copied()
            .unwrap_or(0)
    }

    /// Total live subscriptions of any kind.
    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        self.registrations.borrow().values().sum()
    }

    fn register(&self, key: &str) -> Subscription {
        *self
            .registrations
            .borrow_mut()
            .entry(key.to_string())
            .or_insert(0) += 1;
        let registrations = Rc::clone(&self.registrations);
        let key = key.to_string();
        Subscription::new(move || {
            if let Some(count) = registrations.borrow_mut().get_mut(&key) {
                *count = count.saturating_sub(1);
            }
        })
    }
}

impl ResizeSource for MemoryHost {
    fn viewport_width(&self) -> f32 {
        self.width
    }

    fn subscribe_resize(&self) -> Subscription {
        self.register(RESIZE_KEY)
    }
}

impl IntersectionSource for MemoryHost {
    fn observe(&self, target: &RegionId, _threshold: f32) -> Option<Subscription> {
        if !self.rects.contains_key(target) {
            return None;
        }
        Some(self.register(target.as_str()))
    }
}

impl LayoutSource for MemoryHost {
    fn measure(&self, region: &RegionId) -> Option<Rect> {
        self.rects.get(region).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscription_releases_once_on_drop() {
        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        let sub = Subscription::new(move || counter.set(counter.get() + 1));
        drop(sub);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_explicit_release_does_not_double_fire() {
        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        let sub = Subscription::new(move || counter.set(counter.get() + 1));
        sub.release();
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_memory_host_counts_registrations() {
        let mut host = MemoryHost::new(1024.0);
        host.set_rect("hero", Rect::new(0.0, 0.0, 100.0, 100.0));

        let a = host.observe(&"hero".into(), 0.5).expect("hero exists");
        let b = host.subscribe_resize();
        assert_eq!(host.observer_count(&"hero".into()), 1);
        assert_eq!(host.resize_listener_count(), 1);
        assert_eq!(host.active_subscriptions(), 2);

        drop(a);
        b.release();
        assert_eq!(host.active_subscriptions(), 0);
    }

    #[test]
    fn test_memory_host_missing_target() {
        let host = MemoryHost::new(800.0);
        assert!(host.observe(&"nowhere".into(), 0.1).is_none());
        assert!(host.measure(&"nowhere".into()).is_none());
    }
}
