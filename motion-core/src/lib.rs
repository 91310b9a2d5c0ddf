//! # Portfolio Motion Core
//!
//! Animation choreography for the portfolio landing page: one-shot
//! visibility triggers, a timed typewriter, staggered reveals and an
//! animated connector layer. No I/O and no wall clock: every operation
//! takes the current time from its caller, and every listener comes from
//! a host capability. Compiles to WASM.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               PortfolioPage                 │
//! ├─────────────────────────────────────────────┤
//! │  Viewport        │  Visibility              │
//! │  - Breakpoint    │  - One-shot observers    │
//! │  - Layout mode   │  - Reveal / Stagger      │
//! ├─────────────────────────────────────────────┤
//! │  Typewriter      │  Connector               │
//! │  - Timer queue   │  - Anchors and routes    │
//! │  - Cursor blink  │  - Draw loops            │
//! ├─────────────────────────────────────────────┤
//! │  Host traits: Resize / Intersection / Layout│
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod clock;
pub mod config;
pub mod connector;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod host;
pub mod page;
pub mod reveal;
pub mod routes;
pub mod typewriter;
pub mod viewport;
pub mod visibility;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use catalog::{glyph_for, Column, TechCategory, CATEGORIES, DEFAULT_GLYPH};
pub use clock::{Millis, TimerId, TimerQueue};
pub use config::MotionConfig;
pub use connector::{
    compute_anchors, connections_for, resolve_connections, route_path, AnchorMap, AxisRef,
    Connection, ConnectionSpec, ConnectorConfig, ConnectorFrame, ConnectorLayer, DrawLoop,
    DrawPhase, DrawSample, Polyline, Reference, Waypoint, GRAPHIC_REGION,
};
pub use easing::{lerp, Easing};
pub use error::{MotionError, MotionResult};
pub use geometry::{Edge, Point, Rect};
pub use host::{
    Host, IntersectionSource, LayoutSource, MemoryHost, RegionId, ResizeSource, Subscription,
};
pub use page::{
    IconFrame, PageFrame, PageVariant, PortfolioPage, SectionFrame, StackFrame,
    DEFAULT_DESCRIPTION, DESCRIPTION_REGION, SECTION_HEADINGS,
};
pub use reveal::{
    AnimationTarget, Reveal, RevealConfig, RevealPhase, Stagger, StaggerConfig, Transition,
    VisualState,
};
pub use routes::{resolve as resolve_route, View, ROUTES};
pub use typewriter::{Prefixes, Typewriter, TypewriterConfig, TypewriterFrame, TypewriterPhase};
pub use viewport::{LayoutMode, ViewportClassifier, ViewportConfig, DEFAULT_BREAKPOINT};
pub use visibility::{VisibilityObserver, VisibilityState};

/// Motion core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
