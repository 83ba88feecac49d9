//! Overview minimap
//!
//! Scales the whole graph into a small panel, one colored block per node,
//! colored by kind the same way the canvas colors its icons' overview map.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Widget};

use crate::geometry;
use crate::tui::state::EditorState;
use crate::tui::theme::CanvasTheme;

pub struct Minimap<'a> {
    state: &'a EditorState,
    theme: &'a CanvasTheme,
}

impl<'a> Minimap<'a> {
    pub fn new(state: &'a EditorState, theme: &'a CanvasTheme) -> Self {
        Self { state, theme }
    }
}

impl Widget for Minimap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.dimmed())
            .title(" MAP ");
        let inner = block.inner(area);
        block.render(area, buf);

        let nodes = self.state.store.nodes();
        if nodes.is_empty() || inner.width == 0 || inner.height == 0 {
            return;
        }

        // World bounding box over all node frames.
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for node in nodes {
            min_x = min_x.min(node.position.x);
            min_y = min_y.min(node.position.y);
            max_x = max_x.max(node.position.x + geometry::NODE_WIDTH);
            max_y = max_y.max(node.position.y + geometry::NODE_HEIGHT);
        }
        let span_x = (max_x - min_x).max(1.0);
        let span_y = (max_y - min_y).max(1.0);

        for node in nodes {
            let center_x = node.position.x + geometry::NODE_WIDTH / 2.0;
            let center_y = node.position.y + geometry::NODE_HEIGHT / 2.0;
            let col = ((center_x - min_x) / span_x * (inner.width - 1) as f64).round() as u16;
            let row = ((center_y - min_y) / span_y * (inner.height - 1) as f64).round() as u16;
            let x = inner.x + col.min(inner.width - 1);
            let y = inner.y + row.min(inner.height - 1);

            let color = self.theme.minimap_color(node.data.kind());
            let symbol = if node.data.selected { "▣" } else { "■" };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol);
                cell.set_style(Style::default().fg(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::store::WorkflowStore;

    #[test]
    fn test_minimap_places_all_nodes() {
        let state = EditorState::new(WorkflowStore::new(sample::nodes(), sample::edges()));
        let theme = CanvasTheme::new();
        let area = Rect::new(0, 0, 24, 8);
        let mut buf = Buffer::empty(area);
        Minimap::new(&state, &theme).render(area, &mut buf);

        let mut blocks = 0;
        for y in 0..area.height {
            for x in 0..area.width {
                let symbol = buf.cell((x, y)).unwrap().symbol();
                if symbol == "■" || symbol == "▣" {
                    blocks += 1;
                }
            }
        }
        assert_eq!(blocks, 3);
    }

    #[test]
    fn test_minimap_empty_graph_renders_nothing() {
        let state = EditorState::new(WorkflowStore::default());
        let theme = CanvasTheme::new();
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        // Must not panic or divide by zero.
        Minimap::new(&state, &theme).render(area, &mut buf);
    }
}
