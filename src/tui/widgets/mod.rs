//! Canvas widgets - UI Components
//!
//! Each widget is a stateless renderer over the editor state. Business
//! logic stays in the domain layer; widgets only read.

mod graph;
mod minimap;

pub use graph::GraphCanvas;
pub use minimap::Minimap;
