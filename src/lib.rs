//! Flowcanvas - terminal visual editor for node-and-edge workflows

pub mod error;
pub mod geometry;
pub mod icons;
pub mod sample;
pub mod store;
pub mod tui;
pub mod types;

pub use error::{CanvasError, FixSuggestion};
pub use store::{NodePatch, WorkflowStore};
pub use types::{
    BlockKind, EdgeData, KindPayload, ModelRef, NodeData, Position, RunningStatus, WorkflowEdge,
    WorkflowNode,
};
