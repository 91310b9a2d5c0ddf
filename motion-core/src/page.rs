//! # Portfolio Page
//!
//! Composes every choreography component of the landing page:
//!
//! ```text
//! ┌──────────────────────────── PortfolioPage ───────────────────────────┐
//! │ ViewportClassifier ──mode──▶ ConnectorLayer (Connected variant only) │
//! │ "description" observer ──visible──▶ Typewriter                       │
//! │ section headings ──▶ Reveal × 4                                      │
//! │ tech categories  ──▶ Stagger × 6                                     │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host forwards resize and intersection notifications, calls
//! [`PortfolioPage::tick`] at or after [`PortfolioPage::next_deadline`],
//! and pulls a [`PageFrame`] whenever it paints.

use serde::{Deserialize, Serialize};

use crate::catalog::{glyph_for, TechCategory, CATEGORIES};
use crate::clock::Millis;
use crate::config::MotionConfig;
use crate::connector::{connections_for, ConnectorFrame, ConnectorLayer};
use crate::host::{Host, LayoutSource, RegionId};
use crate::reveal::{Reveal, Stagger, VisualState};
use crate::typewriter::{Typewriter, TypewriterFrame};
use crate::viewport::{LayoutMode, ViewportClassifier};
use crate::visibility::VisibilityObserver;

/// Text typed into the description card unless configured otherwise.
pub const DEFAULT_DESCRIPTION: &str = "Passionate software engineer with expertise in modern web technologies. Specializing in full-stack development, I create innovative solutions that combine elegant design with robust functionality.";

/// Region whose visibility starts the typewriter.
pub const DESCRIPTION_REGION: &str = "description";

/// Section heading regions, revealed individually.
pub const SECTION_HEADINGS: &[&str] = &["projects", "tech-stack", "contributions", "certificates"];

/// Which flavour of the landing page is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageVariant {
    /// No connector layer.
    Static,
    /// Animated connector lines from the microchip.
    #[default]
    Connected,
}

/// Sampled state of one revealed heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionFrame {
    /// Heading region.
    pub region: RegionId,
    /// Visual state at the frame instant.
    pub state: VisualState,
}

/// Sampled state of one tech icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconFrame {
    /// Technology name.
    pub name: String,
    /// Glyph identifier.
    pub glyph: String,
    /// Visual state at the frame instant.
    pub state: VisualState,
}

/// Sampled state of one tech category card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackFrame {
    /// Category heading.
    pub category: String,
    /// Card region.
    pub region: RegionId,
    /// Icons in display order.
    pub icons: Vec<IconFrame>,
}

/// Everything a host paints at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFrame {
    /// Frame instant.
    pub now: Millis,
    /// Current layout mode.
    pub mode: LayoutMode,
    /// Description card.
    pub typewriter: TypewriterFrame,
    /// Section headings.
    pub sections: Vec<SectionFrame>,
    /// Tech category cards.
    pub stacks: Vec<StackFrame>,
    /// Connector lines. Empty for the static variant.
    pub connectors: Vec<ConnectorFrame>,
}

/// The landing page's choreography.
#[derive(Debug)]
pub struct PortfolioPage {
    viewport: ViewportClassifier,
    description: VisibilityObserver,
    typewriter: Typewriter,
    sections: Vec<Reveal>,
    stacks: Vec<(&'static TechCategory, Stagger)>,
    connectors: Option<ConnectorLayer>,
    stale_layout: bool,
    mounted: bool,
}

impl PortfolioPage {
    /// Build an unmounted page from `config`.
    #[must_use]
    pub fn new(config: &MotionConfig) -> Self {
        let sections = SECTION_HEADINGS
            .iter()
            .map(|&region| Reveal::new(region, config.reveal, 0))
            .collect();
        let stacks = CATEGORIES
            .iter()
            .map(|category| {
                let stagger = Stagger::new(
                    category.region_name(),
                    category.technologies.len(),
                    config.stagger,
                );
                (category, stagger)
            })
            .collect();
        let connectors = match config.variant {
            PageVariant::Connected => Some(ConnectorLayer::new(config.connector)),
            PageVariant::Static => None,
        };
        Self {
            viewport: ViewportClassifier::new(config.viewport),
            description: VisibilityObserver::new(
                DESCRIPTION_REGION,
                config.typewriter_trigger_fraction,
            ),
            typewriter: Typewriter::new(config.description.clone(), config.typewriter.clone()),
            sections,
            stacks,
            connectors,
            stale_layout: false,
            mounted: false,
        }
    }

    /// Subscribe every component through `host` and start the connector
    /// loops at `now`. Mounting a mounted page remounts it from scratch.
    pub fn mount(&mut self, host: &impl Host, now: Millis) {
        if self.mounted {
            self.unmount();
        }
        let mode = self.viewport.mount(host);
        self.description.mount(host);
        for reveal in &mut self.sections {
            reveal.mount(host);
        }
        for (_, stagger) in &mut self.stacks {
            stagger.mount(host);
        }
        if let Some(layer) = &mut self.connectors {
            layer.mount(now);
            layer.remeasure(&connections_for(mode), host);
        }
        self.stale_layout = false;
        self.mounted = true;
        tracing::info!(?mode, now, connected = self.connectors.is_some(), "page mounted");
    }

    /// Feed a viewport resize. Returns the new mode when it changed; the
    /// connector set is then re-resolved on the next measurement.
    pub fn on_resize(&mut self, width: f32, now: Millis) -> Option<LayoutMode> {
        if !self.mounted {
            return None;
        }
        // Every resize moves the graphic, flipped or not.
        self.stale_layout = true;
        let changed = self.viewport.on_resize(width);
        if let Some(mode) = changed {
            tracing::debug!(?mode, now, "page layout flipped");
        }
        changed
    }

    /// Route an intersection notification to whichever component observes
    /// `region`. Returns `true` if something was triggered.
    pub fn on_intersection(&mut self, region: &RegionId, ratio: f32, now: Millis) -> bool {
        if !self.mounted {
            return false;
        }
        let mut triggered = false;
        if self.description.target() == region && self.description.on_intersection(ratio) {
            self.typewriter.start(now);
            triggered = true;
        }
        for reveal in &mut self.sections {
            if reveal.target() == region {
                triggered |= reveal.on_intersection(ratio, now);
            }
        }
        for (_, stagger) in &mut self.stacks {
            if stagger.target() == region {
                triggered |= stagger.on_intersection(ratio, now);
            }
        }
        triggered
    }

    /// Rebuild connector anchors and paths from the current layout.
    pub fn remeasure(&mut self, layout: &impl LayoutSource) {
        let mode = self.viewport.mode();
        if let Some(layer) = &mut self.connectors {
            layer.remeasure(&connections_for(mode), layout);
        }
        self.stale_layout = false;
    }

    /// Fire due timers. Returns the number of characters typed.
    pub fn tick(&mut self, now: Millis) -> usize {
        if !self.mounted {
            return 0;
        }
        self.typewriter.advance(now)
    }

    /// Earliest instant at which [`tick`](Self::tick) changes state.
    ///
    /// Reveals and connector loops are sampled per frame and have no
    /// deadlines of their own.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        if !self.mounted {
            return None;
        }
        self.typewriter.next_deadline()
    }

    /// Snapshot for painting at `now`. Remeasures first if a resize
    /// arrived since the last measurement.
    pub fn frame(&mut self, layout: &impl LayoutSource, now: Millis) -> PageFrame {
        if self.stale_layout {
            self.remeasure(layout);
        }
        let sections = self
            .sections
            .iter()
            .map(|reveal| SectionFrame {
                region: reveal.target().clone(),
                state: reveal.state_at(now),
            })
            .collect();
        let stacks = self
            .stacks
            .iter()
            .map(|(category, stagger)| StackFrame {
                category: category.name.to_string(),
                region: stagger.target().clone(),
                icons: category
                    .technologies
                    .iter()
                    .zip(stagger.states(now))
                    .map(|(&name, state)| IconFrame {
                        name: name.to_string(),
                        glyph: glyph_for(name).to_string(),
                        state,
                    })
                    .collect(),
            })
            .collect();
        let connectors = self
            .connectors
            .as_ref()
            .map(|layer| layer.frames(now))
            .unwrap_or_default();
        PageFrame {
            now,
            mode: self.viewport.mode(),
            typewriter: self.typewriter.frame(now),
            sections,
            stacks,
            connectors,
        }
    }

    /// Release every subscription and cancel every timer.
    pub fn unmount(&mut self) {
        self.viewport.unmount();
        self.description.unmount();
        self.typewriter.unmount();
        for reveal in &mut self.sections {
            reveal.unmount();
        }
        for (_, stagger) in &mut self.stacks {
            stagger.unmount();
        }
        if let Some(layer) = &mut self.connectors {
            layer.unmount();
        }
        if self.mounted {
            tracing::info!("page unmounted");
        }
        self.mounted = false;
    }

    /// Whether the page is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Current layout mode.
    #[must_use]
    pub fn mode(&self) -> LayoutMode {
        self.viewport.mode()
    }

    /// The description typewriter.
    #[must_use]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// The connector layer, if this is the connected variant.
    #[must_use]
    pub fn connectors(&self) -> Option<&ConnectorLayer> {
        self.connectors.as_ref()
    }

    /// Every region this page observes for visibility.
    pub fn observed_regions(&self) -> impl Iterator<Item = &RegionId> {
        std::iter::once(self.description.target())
            .chain(self.sections.iter().map(Reveal::target))
            .chain(self.stacks.iter().map(|(_, stagger)| stagger.target()))
    }
}

impl Drop for PortfolioPage {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::host::MemoryHost;
    use crate::typewriter::TypewriterPhase;

    fn layout(host: &mut MemoryHost) {
        host.set_rect("chip", Rect::new(400.0, 200.0, 200.0, 120.0));
        host.set_rect("profile-image", Rect::new(100.0, 80.0, 120.0, 120.0));
        host.set_rect("role", Rect::new(100.0, 240.0, 200.0, 30.0));
        host.set_rect("buttons", Rect::new(100.0, 300.0, 260.0, 40.0));
        host.set_rect("contact", Rect::new(700.0, 250.0, 100.0, 40.0));
        host.set_rect("resume", Rect::new(700.0, 160.0, 100.0, 40.0));
        host.set_rect("projects-button", Rect::new(700.0, 100.0, 100.0, 40.0));
        host.set_rect(DESCRIPTION_REGION, Rect::new(100.0, 600.0, 800.0, 200.0));
        for (i, heading) in SECTION_HEADINGS.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let y = 900.0 + 600.0 * i as f32;
            host.set_rect(*heading, Rect::new(0.0, y, 1024.0, 60.0));
        }
        for category in CATEGORIES {
            host.set_rect(category.region_name(), Rect::new(0.0, 1600.0, 500.0, 200.0));
        }
    }

    fn host(width: f32) -> MemoryHost {
        let mut host = MemoryHost::new(width);
        layout(&mut host);
        host
    }

    #[test]
    fn test_mount_subscribes_every_component() {
        let host = host(1024.0);
        let mut page = PortfolioPage::new(&MotionConfig::default());
        page.mount(&host, 0);

        // resize + description + 4 headings + 6 categories
        assert_eq!(host.active_subscriptions(), 12);
        assert_eq!(page.mode(), LayoutMode::Wide);
        assert_eq!(page.connectors().map(|c| c.connections().len()), Some(6));

        page.unmount();
        assert_eq!(host.active_subscriptions(), 0);
    }

    #[test]
    fn test_description_visibility_starts_typewriter() {
        let host = host(1024.0);
        let mut config = MotionConfig::default();
        config.description = "Hi".to_string();
        let mut page = PortfolioPage::new(&config);
        page.mount(&host, 0);

        assert_eq!(page.next_deadline(), None);
        let region = RegionId::new(DESCRIPTION_REGION);
        assert!(page.on_intersection(&region, 0.5, 1000));
        assert_eq!(page.next_deadline(), Some(4000));

        page.tick(4100);
        let frame = page.frame(&host, 4100);
        assert_eq!(frame.typewriter.prefix, "Hi");
        assert_eq!(frame.typewriter.phase, TypewriterPhase::Done);

        // The observer is one-shot.
        assert!(!page.on_intersection(&region, 1.0, 5000));
    }

    #[test]
    fn test_heading_and_stack_reveals() {
        let host = host(1024.0);
        let mut page = PortfolioPage::new(&MotionConfig::default());
        page.mount(&host, 0);

        assert!(page.on_intersection(&RegionId::new("projects"), 0.3, 100));
        assert!(page.on_intersection(&RegionId::new("stack-cloud"), 0.3, 100));

        let frame = page.frame(&host, 10_000);
        assert_eq!(frame.sections[0].state, VisualState::resting());
        assert!(frame.sections[1].state.opacity.abs() < f32::EPSILON);

        let cloud = frame
            .stacks
            .iter()
            .find(|s| s.category == "Cloud")
            .expect("cloud card");
        assert_eq!(cloud.icons.len(), 2);
        assert_eq!(cloud.icons[1].glyph, "si-googlecloud");
        assert!(cloud.icons.iter().all(|i| i.state == VisualState::resting()));
    }

    #[test]
    fn test_resize_flips_connector_set() {
        let mut host = host(1024.0);
        let mut page = PortfolioPage::new(&MotionConfig::default());
        page.mount(&host, 0);

        host.set_width(600.0);
        assert_eq!(page.on_resize(600.0, 10), Some(LayoutMode::Narrow));
        assert_eq!(page.on_resize(590.0, 20), None);

        let frame = page.frame(&host, 20);
        assert_eq!(frame.mode, LayoutMode::Narrow);
        assert_eq!(frame.connectors.len(), 1);
        assert_eq!(frame.connectors[0].pin, "bottom-2");
    }

    #[test]
    fn test_static_variant_has_no_connectors() {
        let host = host(1024.0);
        let mut config = MotionConfig::default();
        config.variant = PageVariant::Static;
        let mut page = PortfolioPage::new(&config);
        page.mount(&host, 0);

        assert!(page.connectors().is_none());
        assert!(page.frame(&host, 5000).connectors.is_empty());
    }

    #[test]
    fn test_unmounted_page_ignores_events() {
        let host = host(1024.0);
        let mut page = PortfolioPage::new(&MotionConfig::default());
        assert!(!page.on_intersection(&RegionId::new(DESCRIPTION_REGION), 1.0, 0));
        assert_eq!(page.on_resize(500.0, 0), None);
        assert_eq!(page.tick(100_000), 0);
        assert_eq!(host.active_subscriptions(), 0);
    }

    #[test]
    fn test_drop_releases_subscriptions() {
        let host = host(1024.0);
        {
            let mut page = PortfolioPage::new(&MotionConfig::default());
            page.mount(&host, 0);
            assert!(host.active_subscriptions() > 0);
        }
        assert_eq!(host.active_subscriptions(), 0);
    }

    #[test]
    fn test_remount_resets_typewriter() {
        let host = host(1024.0);
        let mut page = PortfolioPage::new(&MotionConfig::default());
        page.mount(&host, 0);
        page.on_intersection(&RegionId::new(DESCRIPTION_REGION), 1.0, 0);
        page.tick(3500);
        assert!(!page.typewriter().prefix().is_empty());

        page.mount(&host, 4000);
        assert_eq!(page.typewriter().phase(), TypewriterPhase::Pending);
        assert_eq!(host.active_subscriptions(), 12);
    }
}
