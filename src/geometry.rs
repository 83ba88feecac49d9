//! Edge path geometry
//!
//! Pure math over world coordinates: port anchor placement on node frames
//! and cubic bezier sampling for the connecting curves. The curve leaves the
//! source port horizontally and enters the target port horizontally, with
//! control points offset by half the horizontal distance.

use crate::types::WorkflowNode;

/// Default node frame size in world units, matching the fixed frame width
/// of the original block design.
pub const NODE_WIDTH: f64 = 240.0;
pub const NODE_HEIGHT: f64 = 96.0;

/// Minimum horizontal control-point offset so short edges still curve.
const MIN_CONTROL_OFFSET: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

fn node_width(node: &WorkflowNode) -> f64 {
    node.data.width.unwrap_or(NODE_WIDTH)
}

fn node_height(node: &WorkflowNode) -> f64 {
    node.data.height.unwrap_or(NODE_HEIGHT)
}

/// Outgoing port: middle of the node's right edge.
pub fn source_anchor(node: &WorkflowNode) -> Point {
    Point::new(
        node.position.x + node_width(node),
        node.position.y + node_height(node) / 2.0,
    )
}

/// Incoming port: middle of the node's left edge.
pub fn target_anchor(node: &WorkflowNode) -> Point {
    Point::new(node.position.x, node.position.y + node_height(node) / 2.0)
}

fn cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Sample the bezier curve between a source port and a target port.
///
/// Returns `samples + 1` points including both endpoints.
pub fn bezier_path(source: Point, target: Point, samples: usize) -> Vec<Point> {
    let offset = ((target.x - source.x).abs() / 2.0).max(MIN_CONTROL_OFFSET);
    let c1 = Point::new(source.x + offset, source.y);
    let c2 = Point::new(target.x - offset, target.y);

    (0..=samples)
        .map(|i| {
            let t = i as f64 / samples as f64;
            Point::new(
                cubic(source.x, c1.x, c2.x, target.x, t),
                cubic(source.y, c1.y, c2.y, target.y, t),
            )
        })
        .collect()
}
