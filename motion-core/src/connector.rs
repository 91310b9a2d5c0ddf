//! # Connector Router
//!
//! Decorative lines from the microchip graphic's pins to page elements.
//!
//! ```text
//!        top-0 top-1 top-2 top-3 top-4
//!          │     │     │     │     │
//!   left-0 ┤      ( chip center )   ├ right-0
//!          │     │     │     │     │
//!     bottom-0 ...             bottom-4
//! ```
//!
//! Each measurement pass rebuilds the [`AnchorMap`] from the graphic's
//! bounding box and resolves every [`ConnectionSpec`] against the current
//! layout. Pins missing from the map or targets that cannot be measured
//! drop their connection silently. Resolved lines animate on a perpetual
//! draw-in, hold, draw-out, rest loop, offset per connection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::easing::{lerp, Easing};
use crate::geometry::{Edge, Point, Rect};
use crate::host::{LayoutSource, RegionId};
use crate::viewport::LayoutMode;

/// Region holding the microchip graphic.
pub const GRAPHIC_REGION: &str = "chip";

/// Geometry and timing of the connector layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Pins on each of the top and bottom rows.
    pub pins_per_row: usize,
    /// Horizontal distance between neighbouring row pins.
    pub pin_spacing: f32,
    /// Vertical distance from the center to each pin row.
    pub row_offset: f32,
    /// Horizontal distance from the center to the side pins.
    pub side_offset: f32,
    /// How far above the center the side pins sit.
    pub side_raise: f32,
    /// Length of one draw-in, hold, draw-out cycle.
    pub draw_ms: Millis,
    /// Hidden rest between cycles.
    pub repeat_delay_ms: Millis,
    /// Curve applied to each segment of the cycle.
    pub easing: Easing,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            pins_per_row: 5,
            pin_spacing: 16.0,
            row_offset: 60.0,
            side_offset: 60.0,
            side_raise: 8.0,
            draw_ms: 2500,
            repeat_delay_ms: 4000,
            easing: Easing::EaseInOut,
        }
    }
}

/// Named pin positions for one measurement pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorMap {
    points: BTreeMap<String, Point>,
}

impl AnchorMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a pin.
    #[must_use]
    pub fn get(&self, pin: &str) -> Option<Point> {
        self.points.get(pin).copied()
    }

    /// Whether a pin exists.
    #[must_use]
    pub fn contains(&self, pin: &str) -> bool {
        self.points.contains_key(pin)
    }

    /// Replace the whole map. Keys absent from `next` are gone afterwards.
    pub fn replace(&mut self, next: AnchorMap) {
        *self = next;
    }

    /// Number of pins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pins in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.points.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, Point)> for AnchorMap {
    fn from_iter<T: IntoIterator<Item = (String, Point)>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Derive the pin anchors of a graphic from its bounding box.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_anchors(graphic: &Rect, config: &ConnectorConfig) -> AnchorMap {
    let center = graphic.center();
    let span = config.pins_per_row.saturating_sub(1) as f32 * config.pin_spacing;
    let first_x = center.x - span / 2.0;

    let mut anchors = AnchorMap::new();
    for i in 0..config.pins_per_row {
        let x = first_x + i as f32 * config.pin_spacing;
        anchors
            .points
            .insert(format!("top-{i}"), Point::new(x, center.y - config.row_offset));
        anchors
            .points
            .insert(format!("bottom-{i}"), Point::new(x, center.y + config.row_offset));
    }
    anchors.points.insert(
        "left-0".to_string(),
        Point::new(center.x - config.side_offset, center.y - config.side_raise),
    );
    anchors.points.insert(
        "right-0".to_string(),
        Point::new(center.x + config.side_offset, center.y - config.side_raise),
    );
    anchors
}

/// What a waypoint coordinate is measured from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "lowercase")]
pub enum Reference {
    /// Center of the graphic.
    Graphic,
    /// The connection's resolved end point.
    Target,
    /// A point of another region.
    Region {
        /// Region to measure.
        region: RegionId,
        /// Point of that region.
        edge: Edge,
    },
}

/// One coordinate of a waypoint: a reference point's axis plus an offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisRef {
    /// Point the coordinate is taken from.
    pub reference: Reference,
    /// Added offset in pixels.
    pub offset: f32,
}

impl AxisRef {
    /// Coordinate from the graphic center.
    #[must_use]
    pub fn graphic(offset: f32) -> Self {
        Self {
            reference: Reference::Graphic,
            offset,
        }
    }

    /// Coordinate from the connection's end point.
    #[must_use]
    pub fn target(offset: f32) -> Self {
        Self {
            reference: Reference::Target,
            offset,
        }
    }

    /// Coordinate from another region's point.
    #[must_use]
    pub fn region(region: impl Into<RegionId>, edge: Edge, offset: f32) -> Self {
        Self {
            reference: Reference::Region {
                region: region.into(),
                edge,
            },
            offset,
        }
    }
}

/// An intermediate routing point, built from two axis references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Horizontal coordinate.
    pub x: AxisRef,
    /// Vertical coordinate.
    pub y: AxisRef,
}

impl Waypoint {
    /// Create a waypoint.
    #[must_use]
    pub fn new(x: AxisRef, y: AxisRef) -> Self {
        Self { x, y }
    }
}

/// A requested connection from a pin to a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    /// Source pin.
    pub pin: String,
    /// Target region.
    pub target: RegionId,
    /// Point of the target region to end at.
    pub edge: Edge,
    /// Intermediate points. Empty for a direct segment.
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    /// Offset of this connection's draw loop.
    #[serde(default)]
    pub delay_ms: Millis,
}

impl ConnectionSpec {
    /// A direct connection.
    #[must_use]
    pub fn direct(pin: &str, target: impl Into<RegionId>, edge: Edge, delay_ms: Millis) -> Self {
        Self {
            pin: pin.to_string(),
            target: target.into(),
            edge,
            waypoints: Vec::new(),
            delay_ms,
        }
    }

    /// Route through `waypoints`.
    #[must_use]
    pub fn via(mut self, waypoints: Vec<Waypoint>) -> Self {
        self.waypoints = waypoints;
        self
    }
}

/// The connection set for a layout mode.
///
/// Wide layouts route six lines around the hero content; narrow layouts
/// keep a single straight line down to the stacked buttons.
#[must_use]
pub fn connections_for(mode: LayoutMode) -> Vec<ConnectionSpec> {
    match mode {
        LayoutMode::Narrow => vec![ConnectionSpec::direct(
            "bottom-2",
            "buttons",
            Edge::Center,
            0,
        )],
        LayoutMode::Wide => vec![
            // Up and over the name, then down to the image.
            ConnectionSpec::direct("top-0", "profile-image", Edge::Bottom, 0).via(vec![
                Waypoint::new(AxisRef::graphic(-80.0), AxisRef::graphic(-100.0)),
                Waypoint::new(AxisRef::target(-30.0), AxisRef::graphic(-100.0)),
                Waypoint::new(AxisRef::target(-30.0), AxisRef::target(0.0)),
            ]),
            // Up and around the buttons to the role line.
            ConnectionSpec::direct("top-2", "role", Edge::Bottom, 800).via(vec![
                Waypoint::new(AxisRef::graphic(0.0), AxisRef::graphic(-100.0)),
                Waypoint::new(
                    AxisRef::region("buttons", Edge::Center, 80.0),
                    AxisRef::graphic(-100.0),
                ),
                Waypoint::new(
                    AxisRef::region("buttons", Edge::Center, 80.0),
                    AxisRef::target(0.0),
                ),
            ]),
            ConnectionSpec::direct("right-0", "contact", Edge::Left, 1600),
            ConnectionSpec::direct("top-4", "resume", Edge::Left, 2400),
            ConnectionSpec::direct("top-3", "projects-button", Edge::Left, 3200),
            ConnectionSpec::direct("bottom-2", "description", Edge::Center, 4000),
        ],
    }
}

/// An ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    /// Points from start to end.
    pub points: Vec<Point>,
}

impl Polyline {
    /// Total length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    /// SVG path data: `M x y L x y ...`.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        let mut path = String::new();
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                path.push(' ');
            }
            let cmd = if i == 0 { 'M' } else { 'L' };
            path.push_str(&format!("{cmd} {} {}", p.x, p.y));
        }
        path
    }
}

/// Build a path from `start` through `waypoints` to `end`.
#[must_use]
pub fn route_path(start: Point, end: Point, waypoints: &[Point]) -> Polyline {
    let mut points = Vec::with_capacity(waypoints.len() + 2);
    points.push(start);
    points.extend_from_slice(waypoints);
    points.push(end);
    Polyline { points }
}

/// A connection resolved against the current layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Source pin.
    pub pin: String,
    /// Target region.
    pub target: RegionId,
    /// Routed path.
    pub path: Polyline,
    /// Offset of the draw loop.
    pub delay_ms: Millis,
}

fn resolve_axis(
    axis: &AxisRef,
    graphic: Point,
    target: Point,
    layout: &impl LayoutSource,
    pick: fn(Point) -> f32,
) -> Option<f32> {
    let base = match &axis.reference {
        Reference::Graphic => graphic,
        Reference::Target => target,
        Reference::Region { region, edge } => layout.measure(region)?.edge_point(*edge),
    };
    Some(pick(base) + axis.offset)
}

fn resolve_waypoints(
    waypoints: &[Waypoint],
    graphic: Point,
    target: Point,
    layout: &impl LayoutSource,
) -> Option<Vec<Point>> {
    waypoints
        .iter()
        .map(|wp| {
            Some(Point::new(
                resolve_axis(&wp.x, graphic, target, layout, |p| p.x)?,
                resolve_axis(&wp.y, graphic, target, layout, |p| p.y)?,
            ))
        })
        .collect()
}

/// Resolve specs into drawable connections.
///
/// A connection is dropped when its pin is not in `anchors` or its target cannot
/// be measured. When a waypoint references an unmeasurable region the
/// line falls back to a direct segment.
#[must_use]
pub fn resolve_connections(
    anchors: &AnchorMap,
    graphic_center: Point,
    specs: &[ConnectionSpec],
    layout: &impl LayoutSource,
) -> Vec<Connection> {
    specs
        .iter()
        .filter_map(|spec| {
            let Some(start) = anchors.get(&spec.pin) else {
                tracing::trace!(pin = %spec.pin, "connector pin missing, skipped");
                return None;
            };
            let Some(rect) = layout.measure(&spec.target) else {
                tracing::trace!(region = %spec.target, "connector target unmeasurable, skipped");
                return None;
            };
            let end = rect.edge_point(spec.edge);
            let waypoints =
                resolve_waypoints(&spec.waypoints, graphic_center, end, layout).unwrap_or_default();
            Some(Connection {
                pin: spec.pin.clone(),
                target: spec.target.clone(),
                path: route_path(start, end, &waypoints),
                delay_ms: spec.delay_ms,
            })
        })
        .collect()
}

/// Segment of the draw loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawPhase {
    /// Before this connection's delay has passed.
    Waiting,
    /// Path growing from 0 to full length.
    DrawIn,
    /// Path fully drawn.
    Hold,
    /// Path shrinking back to 0.
    DrawOut,
    /// Hidden between cycles.
    Rest,
}

/// Sampled draw state of a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawSample {
    /// Segment of the loop.
    pub phase: DrawPhase,
    /// Drawn fraction of the path, 0 to 1.
    pub path_length: f32,
    /// Line opacity, 0 to 1.
    pub opacity: f32,
}

/// Timing of one connection's perpetual draw loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawLoop {
    /// Offset before the first cycle.
    pub delay_ms: Millis,
    /// Draw-in, hold, draw-out length.
    pub draw_ms: Millis,
    /// Hidden rest after each cycle.
    pub repeat_delay_ms: Millis,
    /// Curve for each segment.
    pub easing: Easing,
}

impl DrawLoop {
    /// Loop for a connection with the given delay.
    #[must_use]
    pub fn new(delay_ms: Millis, config: &ConnectorConfig) -> Self {
        Self {
            delay_ms,
            draw_ms: config.draw_ms,
            repeat_delay_ms: config.repeat_delay_ms,
            easing: config.easing,
        }
    }

    /// Sample at `elapsed` since the layer was mounted.
    ///
    /// The drawn cycle splits into equal thirds: 0 → 1, hold at 1, 1 → 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&self, elapsed: Millis) -> DrawSample {
        let hidden = |phase| DrawSample {
            phase,
            path_length: 0.0,
            opacity: 0.0,
        };
        if elapsed < self.delay_ms || self.draw_ms == 0 {
            return hidden(DrawPhase::Waiting);
        }
        let cycle = self.draw_ms.saturating_add(self.repeat_delay_ms);
        let local = (elapsed - self.delay_ms) % cycle;
        if local >= self.draw_ms {
            return hidden(DrawPhase::Rest);
        }
        let t = local as f32 / self.draw_ms as f32;
        let third = 1.0 / 3.0;
        let (phase, value) = if t < third {
            (DrawPhase::DrawIn, self.easing.apply(t / third))
        } else if t < 2.0 * third {
            (DrawPhase::Hold, 1.0)
        } else {
            (
                DrawPhase::DrawOut,
                lerp(1.0, 0.0, self.easing.apply((t - 2.0 * third) / third)),
            )
        };
        DrawSample {
            phase,
            path_length: value,
            opacity: value,
        }
    }
}

/// Renderable state of one line at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorFrame {
    /// Source pin.
    pub pin: String,
    /// Target region.
    pub target: RegionId,
    /// SVG path data.
    pub path: String,
    /// Path length in pixels.
    pub length: f32,
    /// Draw state.
    pub draw: DrawSample,
}

/// Anchors, resolved connections and their draw loops.
#[derive(Debug, Clone, Default)]
pub struct ConnectorLayer {
    config: ConnectorConfig,
    anchors: AnchorMap,
    connections: Vec<Connection>,
    mounted_at: Option<Millis>,
}

impl ConnectorLayer {
    /// An unmounted, empty layer.
    #[must_use]
    pub fn new(config: ConnectorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start the draw loops, timed from `now`.
    pub fn mount(&mut self, now: Millis) {
        self.mounted_at = Some(now);
    }

    /// Stop every loop. Frames are empty until remounted.
    pub fn unmount(&mut self) {
        self.mounted_at = None;
    }

    /// Whether loops are running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.mounted_at.is_some()
    }

    /// Rebuild anchors from the graphic region and resolve `specs`.
    ///
    /// If the graphic itself cannot be measured the anchor map becomes
    /// empty and no connection is drawn.
    pub fn remeasure(&mut self, specs: &[ConnectionSpec], layout: &impl LayoutSource) {
        let graphic = layout.measure(&RegionId::new(GRAPHIC_REGION));
        let anchors = graphic
            .map(|rect| compute_anchors(&rect, &self.config))
            .unwrap_or_default();
        self.anchors.replace(anchors);
        self.connections = match graphic {
            Some(rect) => resolve_connections(&self.anchors, rect.center(), specs, layout),
            None => Vec::new(),
        };
        tracing::debug!(
            anchors = self.anchors.len(),
            connections = self.connections.len(),
            "connector layer remeasured"
        );
    }

    /// Current anchors.
    #[must_use]
    pub fn anchors(&self) -> &AnchorMap {
        &self.anchors
    }

    /// Resolved connections.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Frames for every connection at `now`. Empty while unmounted.
    #[must_use]
    pub fn frames(&self, now: Millis) -> Vec<ConnectorFrame> {
        let Some(mounted_at) = self.mounted_at else {
            return Vec::new();
        };
        let elapsed = now.saturating_sub(mounted_at);
        self.connections
            .iter()
            .map(|c| ConnectorFrame {
                pin: c.pin.clone(),
                target: c.target.clone(),
                path: c.path.to_svg_path(),
                length: c.path.length(),
                draw: DrawLoop::new(c.delay_ms, &self.config).sample(elapsed),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn chip() -> Rect {
        // Center at (200, 300).
        Rect::new(110.0, 240.0, 180.0, 120.0)
    }

    #[test]
    fn test_anchor_positions() {
        let anchors = compute_anchors(&chip(), &ConnectorConfig::default());
        assert_eq!(anchors.len(), 12);
        assert_eq!(anchors.get("top-0"), Some(Point::new(168.0, 240.0)));
        assert_eq!(anchors.get("top-4"), Some(Point::new(232.0, 240.0)));
        assert_eq!(anchors.get("bottom-2"), Some(Point::new(200.0, 360.0)));
        assert_eq!(anchors.get("left-0"), Some(Point::new(140.0, 292.0)));
        assert_eq!(anchors.get("right-0"), Some(Point::new(260.0, 292.0)));
    }

    #[test]
    fn test_replace_drops_stale_keys() {
        let mut anchors = compute_anchors(&chip(), &ConnectorConfig::default());
        let smaller = ConnectorConfig {
            pins_per_row: 2,
            ..ConnectorConfig::default()
        };
        anchors.replace(compute_anchors(&chip(), &smaller));
        assert!(anchors.contains("top-1"));
        assert!(!anchors.contains("top-4"));
        assert_eq!(anchors.len(), 6);
    }

    #[test]
    fn test_route_path_and_svg() {
        let path = route_path(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            &[Point::new(0.0, 10.0)],
        );
        assert_eq!(path.to_svg_path(), "M 0 0 L 0 10 L 10 10");
        assert!((path.length() - 20.0).abs() < f32::EPSILON);

        let direct = route_path(Point::new(0.0, 0.0), Point::new(3.0, 4.0), &[]);
        assert_eq!(direct.points.len(), 2);
        assert!((direct.length() - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_target_is_omitted() {
        let mut host = MemoryHost::new(1280.0);
        host.set_rect(GRAPHIC_REGION, chip());
        host.set_rect("contact", Rect::new(400.0, 200.0, 80.0, 40.0));

        let specs = vec![
            ConnectionSpec::direct("right-0", "contact", Edge::Left, 0),
            ConnectionSpec::direct("top-4", "resume", Edge::Left, 800),
            ConnectionSpec::direct("nope-9", "contact", Edge::Left, 0),
        ];
        let mut layer = ConnectorLayer::new(ConnectorConfig::default());
        layer.remeasure(&specs, &host);

        assert_eq!(layer.connections().len(), 1);
        assert_eq!(layer.connections()[0].pin, "right-0");
        assert_eq!(
            layer.connections()[0].path.points.last().copied(),
            Some(Point::new(400.0, 220.0))
        );
    }

    #[test]
    fn test_waypoints_resolve_against_references() {
        let mut host = MemoryHost::new(1280.0);
        host.set_rect(GRAPHIC_REGION, chip());
        host.set_rect("profile-image", Rect::new(100.0, 0.0, 200.0, 200.0));

        let specs = &connections_for(LayoutMode::Wide)[..1];
        let mut layer = ConnectorLayer::new(ConnectorConfig::default());
        layer.remeasure(specs, &host);

        let points = &layer.connections()[0].path.points;
        assert_eq!(
            points,
            &vec![
                Point::new(168.0, 240.0),
                Point::new(120.0, 200.0),
                Point::new(170.0, 200.0),
                Point::new(170.0, 200.0),
                Point::new(200.0, 200.0),
            ]
        );
    }

    #[test]
    fn test_unmeasurable_waypoint_falls_back_to_direct() {
        let mut host = MemoryHost::new(1280.0);
        host.set_rect(GRAPHIC_REGION, chip());
        host.set_rect("role", Rect::new(100.0, 150.0, 200.0, 30.0));

        // The role route references the buttons region, which is absent.
        let specs = &connections_for(LayoutMode::Wide)[1..2];
        let mut layer = ConnectorLayer::new(ConnectorConfig::default());
        layer.remeasure(specs, &host);

        assert_eq!(layer.connections()[0].path.points.len(), 2);
    }

    #[test]
    fn test_missing_graphic_clears_everything() {
        let mut host = MemoryHost::new(1280.0);
        host.set_rect(GRAPHIC_REGION, chip());
        host.set_rect("buttons", Rect::new(0.0, 0.0, 100.0, 100.0));
        let specs = connections_for(LayoutMode::Narrow);

        let mut layer = ConnectorLayer::new(ConnectorConfig::default());
        layer.remeasure(&specs, &host);
        assert_eq!(layer.connections().len(), 1);

        host.remove_rect(&RegionId::new(GRAPHIC_REGION));
        layer.remeasure(&specs, &host);
        assert!(layer.anchors().is_empty());
        assert!(layer.connections().is_empty());
    }

    #[test]
    fn test_draw_loop_cycle() {
        let draw = DrawLoop::new(800, &ConnectorConfig::default());

        assert_eq!(draw.sample(0).phase, DrawPhase::Waiting);
        assert_eq!(draw.sample(800).phase, DrawPhase::DrawIn);
        assert!(draw.sample(800).path_length.abs() < f32::EPSILON);
        assert_eq!(draw.sample(800 + 1250).phase, DrawPhase::Hold);
        assert!((draw.sample(800 + 1250).opacity - 1.0).abs() < f32::EPSILON);
        assert_eq!(draw.sample(800 + 2000).phase, DrawPhase::DrawOut);
        assert_eq!(draw.sample(800 + 3000).phase, DrawPhase::Rest);
        // Repeats after draw + rest.
        assert_eq!(draw.sample(800 + 6500).phase, DrawPhase::DrawIn);
        assert_eq!(draw.sample(800 + 6500 + 1250).phase, DrawPhase::Hold);
    }

    #[test]
    fn test_unmounted_layer_has_no_frames() {
        let mut host = MemoryHost::new(500.0);
        host.set_rect(GRAPHIC_REGION, chip());
        host.set_rect("buttons", Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut layer = ConnectorLayer::new(ConnectorConfig::default());
        layer.remeasure(&connections_for(LayoutMode::Narrow), &host);

        assert!(layer.frames(1000).is_empty());
        layer.mount(0);
        assert_eq!(layer.frames(1000).len(), 1);
        layer.unmount();
        assert!(layer.frames(2000).is_empty());
    }
}
