//! Editor state - Domain Layer
//!
//! Holds the workflow store plus the editor-only state around it: which
//! node the cursor is on, the interaction mode, the viewport, and the
//! spinner tick. Everything that touches node/edge data goes through the
//! store's operations; this layer never reaches into the collections
//! directly.

use tracing::info;

use crate::store::{NodePatch, WorkflowStore};
use crate::types::{BlockKind, EdgeData, RunningStatus, WorkflowEdge, WorkflowNode};

// ─────────────────────────────────────────────────────────────────────────────
// Interaction Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Current interaction mode of the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// A connection has been started from `source` and is waiting for a
    /// target to be confirmed.
    Connecting { source: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Viewport
// ─────────────────────────────────────────────────────────────────────────────

const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 2.0;

/// Pan offset and zoom of the canvas, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.25).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.25).max(MIN_ZOOM);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor State
// ─────────────────────────────────────────────────────────────────────────────

/// Main editor state
#[derive(Debug)]
pub struct EditorState {
    pub store: WorkflowStore,
    pub selected: Option<String>,
    pub mode: Mode,
    pub viewport: Viewport,
    pub tick: u64,
    pub status_line: Option<String>,
    pub should_quit: bool,
}

impl EditorState {
    pub fn new(store: WorkflowStore) -> Self {
        let mut state = Self {
            store,
            selected: None,
            mode: Mode::Normal,
            viewport: Viewport::default(),
            tick: 0,
            status_line: None,
            should_quit: false,
        };
        if let Some(first) = state.store.nodes().first().map(|n| n.id.clone()) {
            state.select(&first);
        }
        state
    }

    /// Advance the spinner tick.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn selected_node(&self) -> Option<&WorkflowNode> {
        self.store.node(self.selected.as_deref()?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────

    /// Move the cursor to `id` and mirror the change into the nodes'
    /// `selected` flags.
    pub fn select(&mut self, id: &str) {
        if self.store.node(id).is_none() {
            return;
        }
        if let Some(prev) = self.selected.take() {
            self.store.update_node(&prev, &NodePatch::selected(false));
        }
        self.store.update_node(id, &NodePatch::selected(true));
        self.selected = Some(id.to_string());
    }

    pub fn select_next(&mut self) {
        self.select_offset(1);
    }

    pub fn select_prev(&mut self) {
        self.select_offset(-1);
    }

    fn select_offset(&mut self, delta: isize) {
        let ids: Vec<String> = self.store.nodes().iter().map(|n| n.id.clone()).collect();
        if ids.is_empty() {
            return;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|id| ids.iter().position(|i| i == id))
            .unwrap_or(0);
        let next = (current as isize + delta).rem_euclid(ids.len() as isize) as usize;
        self.select(&ids[next].clone());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Node Dragging
    // ─────────────────────────────────────────────────────────────────────

    /// Move the selected node by a world-space delta. Position lives
    /// outside the node payload, so this goes through replace-all-nodes.
    pub fn move_selected(&mut self, dx: f64, dy: f64) {
        let Some(id) = self.selected.clone() else {
            return;
        };
        let nodes: Vec<WorkflowNode> = self
            .store
            .nodes()
            .iter()
            .cloned()
            .map(|mut node| {
                if node.id == id {
                    node.position.x += dx;
                    node.position.y += dy;
                }
                node
            })
            .collect();
        self.store.set_nodes(nodes);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Connect Gesture
    // ─────────────────────────────────────────────────────────────────────

    /// Start a connection from the selected node's output port.
    pub fn begin_connect(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        if node.data.kind() == BlockKind::End {
            self.status_line = Some("end nodes have no output port".to_string());
            return;
        }
        self.mode = Mode::Connecting {
            source: node.id.clone(),
        };
        self.status_line = Some("connecting: pick a target, Enter to confirm".to_string());
    }

    /// Complete the pending connection onto the selected node's input port.
    pub fn confirm_connect(&mut self) {
        let Mode::Connecting { source } = self.mode.clone() else {
            return;
        };
        let Some(target) = self.selected_node() else {
            return;
        };
        if target.id == source {
            self.status_line = Some("cannot connect a node to itself".to_string());
            return;
        }
        if target.data.kind() == BlockKind::Start {
            self.status_line = Some("start nodes have no input port".to_string());
            return;
        }
        let target_id = target.id.clone();
        self.on_connect(&source, &target_id);
        self.mode = Mode::Normal;
    }

    pub fn cancel_connect(&mut self) {
        if matches!(self.mode, Mode::Connecting { .. }) {
            self.mode = Mode::Normal;
            self.status_line = Some("connect cancelled".to_string());
        }
    }

    /// Connect-completion handler: append the new edge to the store. The
    /// deterministic id means reconnecting an already-connected pair
    /// replaces the old edge instead of duplicating it. Unlike the gesture
    /// methods above, this does not gate on port direction.
    pub fn on_connect(&mut self, source: &str, target: &str) {
        let edge = WorkflowEdge::connect(source, target);
        let mut edges: Vec<WorkflowEdge> = self
            .store
            .edges()
            .iter()
            .filter(|e| e.id != edge.id)
            .cloned()
            .collect();
        info!(source, target, id = %edge.id, "edge connected");
        self.status_line = Some(format!("connected {} -> {}", source, target));
        edges.push(edge);
        self.store.set_edges(edges);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Status and Flags
    // ─────────────────────────────────────────────────────────────────────

    /// Cycle the selected node's running status and mirror it onto the
    /// adjacent edges: outgoing edges carry the source status, incoming
    /// edges carry the waiting flag while the node waits.
    pub fn cycle_status(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        let id = node.id.clone();
        let next = match node.data.running_status {
            Some(status) => status.next(),
            None => RunningStatus::Waiting,
        };
        self.store.update_node(&id, &NodePatch::status(next));

        let edges: Vec<WorkflowEdge> = self
            .store
            .edges()
            .iter()
            .cloned()
            .map(|mut edge| {
                if edge.source == id {
                    edge.data.get_or_insert_with(EdgeData::default).source_running_status =
                        Some(next);
                }
                if edge.target == id {
                    edge.data.get_or_insert_with(EdgeData::default).waiting_run =
                        next == RunningStatus::Waiting;
                }
                edge
            })
            .collect();
        self.store.set_edges(edges);
        self.status_line = Some(format!("{}: {}", id, next));
    }

    pub fn toggle_dimmed(&mut self) {
        let Some(node) = self.selected_node() else {
            return;
        };
        let id = node.id.clone();
        let dimmed = !node.data.dimmed;
        self.store.update_node(
            &id,
            &NodePatch {
                dimmed: Some(dimmed),
                ..NodePatch::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    fn state() -> EditorState {
        EditorState::new(WorkflowStore::new(sample::nodes(), sample::edges()))
    }

    #[test]
    fn test_initial_selection_is_first_node() {
        let state = state();
        assert_eq!(state.selected.as_deref(), Some("1"));
        assert!(state.store.node("1").unwrap().data.selected);
    }

    #[test]
    fn test_selection_cycles_and_syncs_flags() {
        let mut state = state();
        state.select_next();
        assert_eq!(state.selected.as_deref(), Some("2"));
        assert!(!state.store.node("1").unwrap().data.selected);
        assert!(state.store.node("2").unwrap().data.selected);

        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected.as_deref(), Some("3"));
    }

    #[test]
    fn test_move_selected_shifts_position() {
        let mut state = state();
        state.move_selected(20.0, -10.0);
        let node = state.store.node("1").unwrap();
        assert_eq!(node.position.x, 120.0);
        assert_eq!(node.position.y, 140.0);
    }

    #[test]
    fn test_connect_from_end_node_is_refused() {
        let mut state = state();
        state.select("3");
        state.begin_connect();
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_connect_onto_start_node_is_refused() {
        let mut state = state();
        state.select("2");
        state.begin_connect();
        state.select("1");
        state.confirm_connect();
        // Still connecting; nothing was appended.
        assert!(matches!(state.mode, Mode::Connecting { .. }));
        assert_eq!(state.store.edges().len(), 2);
    }

    #[test]
    fn test_reconnect_replaces_same_pair() {
        let mut state = state();
        state.select("1");
        state.begin_connect();
        state.select("2");
        state.confirm_connect();
        state.select("1");
        state.begin_connect();
        state.select("2");
        state.confirm_connect();

        let matching: Vec<_> = state
            .store
            .edges()
            .iter()
            .filter(|e| e.id == "1-2")
            .collect();
        assert_eq!(matching.len(), 1);
    }

    #[test]
    fn test_cycle_status_updates_adjacent_edges() {
        let mut state = state();
        state.select("2");
        // None -> Waiting -> Running
        state.cycle_status();
        state.cycle_status();

        let node = state.store.node("2").unwrap();
        assert_eq!(node.data.running_status, Some(RunningStatus::Running));

        let outgoing = state
            .store
            .edges()
            .iter()
            .find(|e| e.source == "2")
            .unwrap();
        assert_eq!(
            outgoing.data.as_ref().unwrap().source_running_status,
            Some(RunningStatus::Running)
        );

        let incoming = state
            .store
            .edges()
            .iter()
            .find(|e| e.target == "2")
            .unwrap();
        assert!(!incoming.data.as_ref().unwrap().waiting_run);
    }

    #[test]
    fn test_waiting_status_flags_incoming_edges() {
        let mut state = state();
        state.select("2");
        state.cycle_status(); // -> Waiting
        let incoming = state
            .store
            .edges()
            .iter()
            .find(|e| e.target == "2")
            .unwrap();
        assert!(incoming.data.as_ref().unwrap().waiting_run);
    }

    #[test]
    fn test_viewport_zoom_clamps() {
        let mut viewport = Viewport::default();
        for _ in 0..20 {
            viewport.zoom_in();
        }
        assert!(viewport.zoom <= MAX_ZOOM);
        for _ in 0..40 {
            viewport.zoom_out();
        }
        assert!(viewport.zoom >= MIN_ZOOM);
    }
}
