//! Workflow graph data model
//!
//! Node and edge payloads mirror the canonical wire shape:
//! `{ id, type: "custom", position: {x,y}, data: { type: <kind>, title, ... } }`.
//! The kind-specific part of a node payload is a tagged sum type, so kind
//! dispatch is exhaustive and a node's kind cannot change after creation.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Node Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Closed enumeration of workflow block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    Start,
    End,
    Answer,
    Llm,
    KnowledgeRetrieval,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
            Self::Answer => write!(f, "answer"),
            Self::Llm => write!(f, "llm"),
            Self::KnowledgeRetrieval => write!(f, "knowledge-retrieval"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Running Status
// ─────────────────────────────────────────────────────────────────────────────

/// Per-node execution status, used for styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunningStatus {
    NotStart,
    Waiting,
    Running,
    Succeeded,
    Failed,
}

impl RunningStatus {
    /// Next status in the cycling order used by the editor's status key.
    pub fn next(self) -> Self {
        match self {
            Self::NotStart => Self::Waiting,
            Self::Waiting => Self::Running,
            Self::Running => Self::Succeeded,
            Self::Succeeded => Self::Failed,
            Self::Failed => Self::NotStart,
        }
    }
}

impl std::fmt::Display for RunningStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStart => write!(f, "not-start"),
            Self::Waiting => write!(f, "waiting"),
            Self::Running => write!(f, "running"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Node Payload
// ─────────────────────────────────────────────────────────────────────────────

/// Model reference carried by LLM nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    pub provider: String,
    pub name: String,
}

/// Kind-specific payload, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum KindPayload {
    Start,
    End,
    Answer,
    Llm {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<ModelRef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
    },
    KnowledgeRetrieval,
}

impl KindPayload {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Start => BlockKind::Start,
            Self::End => BlockKind::End,
            Self::Answer => BlockKind::Answer,
            Self::Llm { .. } => BlockKind::Llm,
            Self::KnowledgeRetrieval => BlockKind::KnowledgeRetrieval,
        }
    }
}

/// Full node payload: common fields plus the kind-specific variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
    #[serde(rename = "_dimmed", default, skip_serializing_if = "std::ops::Not::not")]
    pub dimmed: bool,
    #[serde(
        rename = "_runningStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub running_status: Option<RunningStatus>,
    #[serde(flatten)]
    pub payload: KindPayload,
}

impl NodeData {
    pub fn new(title: impl Into<String>, payload: KindPayload) -> Self {
        Self {
            title: title.into(),
            desc: None,
            width: None,
            height: None,
            selected: false,
            dimmed: false,
            running_status: None,
            payload,
        }
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn kind(&self) -> BlockKind {
        self.payload.kind()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Nodes and Edges
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A workflow node on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    /// Always `"custom"`; every node shares the same frame renderer.
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    pub data: NodeData,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>, position: Position, data: NodeData) -> Self {
        Self {
            id: id.into(),
            node_type: "custom".to_string(),
            position,
            data,
        }
    }
}

/// Styling flags carried by an edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(
        rename = "_sourceRunningStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_running_status: Option<RunningStatus>,
    #[serde(rename = "_waitingRun", default, skip_serializing_if = "std::ops::Not::not")]
    pub waiting_run: bool,
}

/// A directed connection between two node ids.
///
/// Endpoints are not validated against the node collection; an edge whose
/// endpoint is missing is skipped at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

impl WorkflowEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            edge_type: "custom".to_string(),
            data: None,
        }
    }

    /// Edge created by completing a connect gesture. The id is derived
    /// deterministically from the endpoints.
    pub fn connect(source: &str, target: &str) -> Self {
        Self::new(format!("{}-{}", source, target), source, target)
    }
}
