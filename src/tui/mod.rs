//! TUI Module - Workflow Canvas
//!
//! Terminal interface for the workflow editor.
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        UI LAYER (widgets/)                          │
//! │  Pure rendering. No business logic. Reads EditorState.              │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ read-only views
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     DOMAIN LAYER (state.rs)                         │
//! │  EditorState over WorkflowStore. All mutations go through here.     │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ Actions
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     INPUT LAYER (events.rs)                         │
//! │  Keyboard events → Actions, applied synchronously.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::EditorApp;
pub use state::{EditorState, Mode};
pub use theme::CanvasTheme;

use crate::store::WorkflowStore;

/// Run the editor over a prepared store.
pub fn run(store: WorkflowStore) -> anyhow::Result<()> {
    EditorApp::new(store).run()
}
