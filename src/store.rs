//! Workflow store - canonical owner of the node/edge collections
//!
//! Rendering reads through immutable views; every mutation goes through one
//! of the three store operations. Mutations are synchronous and bump a
//! revision counter so callers can observe change without callbacks.

use tracing::debug;

use crate::types::{KindPayload, ModelRef, NodeData, RunningStatus, WorkflowEdge, WorkflowNode};

// ─────────────────────────────────────────────────────────────────────────────
// Node Patch
// ─────────────────────────────────────────────────────────────────────────────

/// Partial node payload merged by [`WorkflowStore::update_node`].
///
/// Carries only the mutable fields; the node kind is deliberately absent, so
/// a patch can never change what a node is. Model and prompt apply only when
/// the target node is an LLM node and are ignored otherwise.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub selected: Option<bool>,
    pub dimmed: Option<bool>,
    pub running_status: Option<RunningStatus>,
    pub model: Option<ModelRef>,
    pub prompt: Option<String>,
}

impl NodePatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn selected(value: bool) -> Self {
        Self {
            selected: Some(value),
            ..Self::default()
        }
    }

    pub fn status(value: RunningStatus) -> Self {
        Self {
            running_status: Some(value),
            ..Self::default()
        }
    }

    /// Merge this patch into a node payload, field by field.
    fn apply(&self, data: &mut NodeData) {
        if let Some(title) = &self.title {
            data.title = title.clone();
        }
        if let Some(desc) = &self.desc {
            data.desc = Some(desc.clone());
        }
        if let Some(width) = self.width {
            data.width = Some(width);
        }
        if let Some(height) = self.height {
            data.height = Some(height);
        }
        if let Some(selected) = self.selected {
            data.selected = selected;
        }
        if let Some(dimmed) = self.dimmed {
            data.dimmed = dimmed;
        }
        if let Some(status) = self.running_status {
            data.running_status = Some(status);
        }
        if let KindPayload::Llm { model, prompt } = &mut data.payload {
            if let Some(new_model) = &self.model {
                *model = Some(new_model.clone());
            }
            if let Some(new_prompt) = &self.prompt {
                *prompt = Some(new_prompt.clone());
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory holder of the current node and edge collections.
#[derive(Debug, Default)]
pub struct WorkflowStore {
    nodes: Vec<WorkflowNode>,
    edges: Vec<WorkflowEdge>,
    revision: u64,
}

impl WorkflowStore {
    pub fn new(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> Self {
        Self {
            nodes,
            edges,
            revision: 0,
        }
    }

    pub fn nodes(&self) -> &[WorkflowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[WorkflowEdge] {
        &self.edges
    }

    /// Monotonic counter, bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Replace the whole node collection.
    pub fn set_nodes(&mut self, nodes: Vec<WorkflowNode>) {
        debug!(count = nodes.len(), "set_nodes");
        self.nodes = nodes;
        self.revision += 1;
    }

    /// Replace the whole edge collection.
    pub fn set_edges(&mut self, edges: Vec<WorkflowEdge>) {
        debug!(count = edges.len(), "set_edges");
        self.edges = edges;
        self.revision += 1;
    }

    /// Merge a partial payload into the node with the given id.
    ///
    /// A missing id is a silent no-op, not an error.
    pub fn update_node(&mut self, id: &str, patch: &NodePatch) {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                patch.apply(&mut node.data);
                self.revision += 1;
                debug!(id, "update_node");
            }
            None => debug!(id, "update_node: id not found, ignoring"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::types::BlockKind;

    fn store() -> WorkflowStore {
        WorkflowStore::new(sample::nodes(), sample::edges())
    }

    #[test]
    fn test_update_node_merges_title_only() {
        let mut store = store();
        let before = store.node("2").unwrap().data.clone();

        store.update_node("2", &NodePatch::title("Renamed"));

        let after = &store.node("2").unwrap().data;
        assert_eq!(after.title, "Renamed");
        assert_eq!(after.desc, before.desc);
        assert_eq!(after.payload, before.payload);
        assert_eq!(after.running_status, before.running_status);
    }

    #[test]
    fn test_update_node_unknown_id_is_noop() {
        let mut store = store();
        let before: Vec<_> = store.nodes().to_vec();
        let revision = store.revision();

        store.update_node("does-not-exist", &NodePatch::title("X"));

        assert_eq!(store.nodes(), before.as_slice());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_update_node_cannot_change_kind() {
        let mut store = store();
        let patch = NodePatch {
            model: Some(ModelRef {
                provider: "Anthropic".to_string(),
                name: "Claude".to_string(),
            }),
            ..NodePatch::default()
        };

        // Model patch against a non-LLM node leaves its payload untouched.
        store.update_node("1", &patch);
        assert_eq!(store.node("1").unwrap().data.kind(), BlockKind::Start);
        assert_eq!(store.node("1").unwrap().data.payload, KindPayload::Start);

        // Against the LLM node it lands in the kind-specific fields.
        store.update_node("2", &patch);
        match &store.node("2").unwrap().data.payload {
            KindPayload::Llm { model, .. } => {
                assert_eq!(model.as_ref().unwrap().provider, "Anthropic");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_set_edges_replaces_collection() {
        let mut store = store();
        store.set_edges(vec![WorkflowEdge::connect("3", "1")]);
        assert_eq!(store.edges().len(), 1);
        assert_eq!(store.edges()[0].id, "3-1");
    }

    #[test]
    fn test_mutations_bump_revision() {
        let mut store = store();
        let r0 = store.revision();
        store.set_nodes(store.nodes().to_vec());
        store.update_node("1", &NodePatch::status(RunningStatus::Running));
        assert_eq!(store.revision(), r0 + 2);
    }
}
