//! Narrow/wide layout classification from the viewport width.

use serde::{Deserialize, Serialize};

use crate::host::{ResizeSource, Subscription};

/// Width below which the page switches to its narrow layout.
pub const DEFAULT_BREAKPOINT: f32 = 768.0;

/// Layout branch selected by the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Desktop layout.
    #[default]
    Wide,
    /// Mobile layout.
    Narrow,
}

impl LayoutMode {
    /// Classify a width against a breakpoint.
    #[must_use]
    pub fn classify(width: f32, breakpoint: f32) -> Self {
        if width < breakpoint {
            Self::Narrow
        } else {
            Self::Wide
        }
    }

    /// Whether this is the narrow layout.
    #[must_use]
    pub const fn is_narrow(self) -> bool {
        matches!(self, Self::Narrow)
    }
}

/// Viewport settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Narrow layout applies strictly below this width.
    pub breakpoint: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
        }
    }
}

/// Tracks the current [`LayoutMode`], recomputed on each resize.
#[derive(Debug)]
pub struct ViewportClassifier {
    breakpoint: f32,
    mode: LayoutMode,
    subscription: Option<Subscription>,
}

impl ViewportClassifier {
    /// Create an unmounted classifier.
    #[must_use]
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            breakpoint: config.breakpoint,
            mode: LayoutMode::default(),
            subscription: None,
        }
    }

    /// Read the current width and start listening for resizes.
    pub fn mount(&mut self, host: &impl ResizeSource) -> LayoutMode {
        self.unmount();
        self.mode = LayoutMode::classify(host.viewport_width(), self.breakpoint);
        self.subscription = Some(host.subscribe_resize());
        self.mode
    }

    /// Feed a resize. Returns the new mode only when it changed.
    pub fn on_resize(&mut self, width: f32) -> Option<LayoutMode> {
        let mode = LayoutMode::classify(width, self.breakpoint);
        if mode == self.mode {
            return None;
        }
        tracing::debug!(?mode, width, "layout mode changed");
        self.mode = mode;
        Some(mode)
    }

    /// Stop listening for resizes.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
    }

    /// Current layout mode.
    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Shorthand for `mode().is_narrow()`.
    #[must_use]
    pub fn is_narrow(&self) -> bool {
        self.mode.is_narrow()
    }
}

impl Default for ViewportClassifier {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn test_classify_boundary() {
        assert_eq!(LayoutMode::classify(767.9, 768.0), LayoutMode::Narrow);
        assert_eq!(LayoutMode::classify(768.0, 768.0), LayoutMode::Wide);
    }

    #[test]
    fn test_flip_reported_once() {
        let host = MemoryHost::new(1024.0);
        let mut viewport = ViewportClassifier::default();
        assert_eq!(viewport.mount(&host), LayoutMode::Wide);

        let changes: Vec<_> = [1000.0, 900.0, 800.0, 700.0, 650.0, 600.0]
            .into_iter()
            .filter_map(|w| viewport.on_resize(w))
            .collect();

        assert_eq!(changes, vec![LayoutMode::Narrow]);
        assert!(viewport.is_narrow());
    }

    #[test]
    fn test_unmount_releases_listener() {
        let host = MemoryHost::new(500.0);
        let mut viewport = ViewportClassifier::default();
        assert_eq!(viewport.mount(&host), LayoutMode::Narrow);
        assert_eq!(host.resize_listener_count(), 1);

        viewport.unmount();
        assert_eq!(host.resize_listener_count(), 0);
    }
}
