//! Built-in sample graph loaded at startup
//!
//! Three nodes (Start → LLM → End) and the two edges between them.

use serde::Serialize;

use crate::error::CanvasError;
use crate::types::{
    KindPayload, ModelRef, NodeData, Position, WorkflowEdge, WorkflowNode,
};

pub fn nodes() -> Vec<WorkflowNode> {
    vec![
        WorkflowNode::new(
            "1",
            Position::new(100.0, 150.0),
            NodeData::new("Start", KindPayload::Start).with_desc("Workflow entry point"),
        ),
        WorkflowNode::new(
            "2",
            Position::new(400.0, 150.0),
            NodeData::new(
                "LLM Model",
                KindPayload::Llm {
                    model: Some(ModelRef {
                        provider: "OpenAI".to_string(),
                        name: "GPT-4".to_string(),
                    }),
                    prompt: Some("Generate an answer to the user's question.".to_string()),
                },
            )
            .with_desc("Text generation with GPT"),
        ),
        WorkflowNode::new(
            "3",
            Position::new(700.0, 150.0),
            NodeData::new("End", KindPayload::End).with_desc("Workflow terminus"),
        ),
    ]
}

pub fn edges() -> Vec<WorkflowEdge> {
    vec![
        WorkflowEdge::new("e1-2", "1", "2"),
        WorkflowEdge::new("e2-3", "2", "3"),
    ]
}

#[derive(Serialize)]
struct SampleGraph {
    nodes: Vec<WorkflowNode>,
    edges: Vec<WorkflowEdge>,
}

/// The sample graph in wire shape, for `--print-sample`.
pub fn to_json() -> Result<String, CanvasError> {
    let graph = SampleGraph {
        nodes: nodes(),
        edges: edges(),
    };
    Ok(serde_json::to_string_pretty(&graph)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockKind;

    #[test]
    fn test_sample_shape() {
        let nodes = nodes();
        let edges = edges();
        assert_eq!(nodes.len(), 3);
        assert_eq!(edges.len(), 2);
        assert_eq!(nodes[0].data.kind(), BlockKind::Start);
        assert_eq!(nodes[1].data.kind(), BlockKind::Llm);
        assert_eq!(nodes[2].data.kind(), BlockKind::End);
        assert_eq!(edges[0].id, "e1-2");
        assert_eq!(edges[1].id, "e2-3");
    }

    #[test]
    fn test_sample_json_is_wire_shaped() {
        let json = to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"][0]["data"]["type"], "start");
        assert_eq!(value["edges"][0]["type"], "custom");
    }
}
