//! Simulated page: a laid-out [`MemoryHost`] scrolled past a fixed
//! viewport.

use std::collections::VecDeque;
use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use motion_core::{
    Column, LayoutMode, LayoutSource, MemoryHost, Millis, MotionConfig, PageFrame, PortfolioPage,
    Rect, RegionId, ResizeSource, CATEGORIES, DESCRIPTION_REGION, GRAPHIC_REGION,
    SECTION_HEADINGS,
};
use serde::Serialize;

use crate::{CliArgs, ResizeEvent};

const MARGIN: f32 = 24.0;
const CARD_HEIGHT: f32 = 180.0;
const SECTION_GAP: f32 = 120.0;

/// Viewport, scroll and resize schedule of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimSettings {
    /// Initial viewport width.
    pub width: f32,
    /// Viewport height.
    pub height: f32,
    /// Pixels scrolled per second.
    pub scroll_speed: f32,
    /// Resizes to apply, in any order.
    pub resizes: Vec<ResizeEvent>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_speed: 400.0,
            resizes: Vec::new(),
        }
    }
}

impl From<&CliArgs> for SimSettings {
    fn from(args: &CliArgs) -> Self {
        Self {
            width: args.width,
            height: args.height,
            scroll_speed: args.scroll_speed,
            resizes: args.resizes.clone(),
        }
    }
}

/// One emitted frame.
#[derive(Debug, Clone, Serialize)]
pub struct SimFrame {
    /// Viewport width at this frame.
    pub width: f32,
    /// Scroll offset of the viewport's top edge.
    pub scroll_y: f32,
    /// Page state.
    #[serde(flatten)]
    pub page: PageFrame,
}

/// Lay the page out for `width` at the given breakpoint, replacing every
/// region in `host`.
///
/// Wide layouts put the hero text left of the microchip with the
/// navigation buttons on the right and the tech stack in two columns.
/// Narrow layouts stack everything in one column. Returns the content
/// height.
pub fn populate_layout(host: &mut MemoryHost, width: f32, breakpoint: f32) -> f32 {
    let narrow = LayoutMode::classify(width, breakpoint).is_narrow();
    let inner = (width - 2.0 * MARGIN).max(1.0);
    let mut y;

    if narrow {
        let center = width / 2.0;
        host.set_rect("profile-image", Rect::new(center - 60.0, 40.0, 120.0, 120.0));
        host.set_rect("role", Rect::new(MARGIN, 180.0, inner, 28.0));
        host.set_rect("buttons", Rect::new(MARGIN, 400.0, inner, 96.0));
        host.set_rect(GRAPHIC_REGION, Rect::new(center - 90.0, 224.0, 180.0, 120.0));
        host.set_rect("contact", Rect::new(MARGIN, 400.0, inner, 44.0));
        host.set_rect("resume", Rect::new(MARGIN, 452.0, inner / 2.0, 44.0));
        host.set_rect("projects-button", Rect::new(center, 452.0, inner / 2.0, 44.0));
        y = 540.0;
    } else {
        let left = width * 0.08;
        host.set_rect("profile-image", Rect::new(left, 80.0, 140.0, 140.0));
        host.set_rect("role", Rect::new(left, 250.0, 280.0, 32.0));
        host.set_rect("buttons", Rect::new(left, 300.0, 320.0, 44.0));
        host.set_rect(GRAPHIC_REGION, Rect::new(width * 0.5, 140.0, 200.0, 140.0));
        let right = width * 0.78;
        host.set_rect("projects-button", Rect::new(right, 60.0, 140.0, 44.0));
        host.set_rect("resume", Rect::new(right, 130.0, 140.0, 44.0));
        host.set_rect("contact", Rect::new(right, 200.0, 140.0, 44.0));
        y = 440.0;
    }

    host.set_rect(DESCRIPTION_REGION, Rect::new(MARGIN, y, inner, 220.0));
    y += 220.0 + SECTION_GAP;

    for heading in SECTION_HEADINGS {
        host.set_rect(*heading, Rect::new(MARGIN, y, inner, 48.0));
        y += 48.0 + MARGIN;
        if *heading == "tech-stack" {
            y = layout_stack(host, y, inner, narrow);
        } else {
            y += 2.0 * CARD_HEIGHT;
        }
        y += SECTION_GAP;
    }
    y
}

fn layout_stack(host: &mut MemoryHost, top: f32, inner: f32, narrow: bool) -> f32 {
    if narrow {
        let mut y = top;
        for category in CATEGORIES {
            host.set_rect(category.region_name(), Rect::new(MARGIN, y, inner, CARD_HEIGHT));
            y += CARD_HEIGHT + MARGIN;
        }
        return y;
    }
    let column_width = (inner - MARGIN) / 2.0;
    let mut left_y = top;
    let mut right_y = top;
    for category in CATEGORIES {
        let (x, y) = match category.column {
            Column::Left => (MARGIN, &mut left_y),
            Column::Right => (MARGIN * 2.0 + column_width, &mut right_y),
        };
        host.set_rect(category.region_name(), Rect::new(x, *y, column_width, CARD_HEIGHT));
        *y += CARD_HEIGHT + MARGIN;
    }
    left_y.max(right_y)
}

/// Drives a [`PortfolioPage`] against a simulated layout.
#[derive(Debug)]
pub struct Simulator {
    host: MemoryHost,
    page: PortfolioPage,
    height: f32,
    scroll_speed: f32,
    content_height: f32,
    breakpoint: f32,
    resizes: VecDeque<ResizeEvent>,
}

impl Simulator {
    /// Lay out the page and mount it at time 0.
    #[must_use]
    pub fn new(config: &MotionConfig, settings: SimSettings) -> Self {
        let mut host = MemoryHost::new(settings.width);
        let breakpoint = config.viewport.breakpoint;
        let content_height = populate_layout(&mut host, settings.width, breakpoint);
        let mut resizes = settings.resizes;
        resizes.sort_by_key(|r| r.at);

        let mut page = PortfolioPage::new(config);
        page.mount(&host, 0);
        tracing::info!(
            width = settings.width,
            height = settings.height,
            content_height,
            resizes = resizes.len(),
            "simulated page mounted"
        );
        Self {
            host,
            page,
            height: settings.height,
            scroll_speed: settings.scroll_speed,
            content_height,
            breakpoint,
            resizes: resizes.into(),
        }
    }

    /// Scroll offset at `now`, clamped to the content.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scroll_y(&self, now: Millis) -> f32 {
        let max = (self.content_height - self.height).max(0.0);
        (self.scroll_speed.max(0.0) * now as f32 / 1000.0).min(max)
    }

    /// The page being driven.
    #[must_use]
    pub fn page(&self) -> &PortfolioPage {
        &self.page
    }

    /// Advance the simulation to `now` and sample a frame.
    ///
    /// Due resizes are applied first, then every observed region is
    /// intersected with the scrolled viewport, then timers fire.
    pub fn step(&mut self, now: Millis) -> SimFrame {
        while let Some(resize) = self.resizes.front().copied() {
            if resize.at > now {
                break;
            }
            self.resizes.pop_front();
            self.host.set_width(resize.width);
            self.content_height = populate_layout(&mut self.host, resize.width, self.breakpoint);
            self.page.on_resize(resize.width, now);
            tracing::debug!(at = resize.at, width = resize.width, "applied resize");
        }

        let scroll_y = self.scroll_y(now);
        let width = self.host.viewport_width();
        let viewport = Rect::new(0.0, scroll_y, width, self.height);
        let regions: Vec<RegionId> = self.page.observed_regions().cloned().collect();
        for region in &regions {
            if let Some(rect) = self.host.measure(region) {
                self.page
                    .on_intersection(region, rect.visible_fraction(&viewport), now);
            }
        }
        self.page.tick(now);

        SimFrame {
            width,
            scroll_y,
            page: self.page.frame(&self.host, now),
        }
    }

    /// When the next frame should be sampled: the next frame interval,
    /// or earlier if a timer or resize falls due first.
    #[must_use]
    pub fn next_wakeup(&self, now: Millis, step: Millis) -> Millis {
        let mut next = now.saturating_add(step.max(1));
        if let Some(deadline) = self.page.next_deadline().filter(|d| *d > now) {
            next = next.min(deadline);
        }
        if let Some(resize) = self.resizes.front().filter(|r| r.at > now) {
            next = next.min(resize.at);
        }
        next
    }

    /// Run from time 0 to `until`, writing one JSON line per frame.
    /// Returns the number of frames written.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serializing a frame fails.
    pub fn run(
        &mut self,
        until: Millis,
        step: Millis,
        out: &mut impl Write,
    ) -> anyhow::Result<usize> {
        let mut now = 0;
        let mut frames = 0;
        loop {
            write_frame(out, &self.step(now))?;
            frames += 1;
            if now >= until {
                break;
            }
            now = self.next_wakeup(now, step).min(until);
        }
        Ok(frames)
    }
}

fn write_frame(out: &mut impl Write, frame: &SimFrame) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, frame).context("failed to serialize frame")?;
    writeln!(out).context("failed to write frame")?;
    Ok(())
}

/// Like [`Simulator::run`], but sleeps until each frame is due on the
/// tokio clock.
///
/// # Errors
///
/// Returns an error if writing or serializing a frame fails.
pub async fn run_realtime(
    sim: &mut Simulator,
    until: Millis,
    step: Millis,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let origin = tokio::time::Instant::now();
    let mut due = 0;
    let mut frames = 0;
    loop {
        tokio::time::sleep_until(origin + Duration::from_millis(due)).await;
        let now = Millis::try_from(origin.elapsed().as_millis())
            .unwrap_or(Millis::MAX)
            .min(until);
        write_frame(out, &sim.step(now))?;
        out.flush().context("failed to flush frames")?;
        frames += 1;
        if now >= until {
            break;
        }
        due = sim.next_wakeup(now, step).min(until);
    }
    tracing::info!(frames, "realtime run finished");
    Ok(frames)
}
