//! Graph canvas widget
//!
//! Draws the workflow onto the terminal buffer: bezier edges underneath,
//! node frames on top. The node frame is shared by every kind (icon, title,
//! status badge, ports); only the body is dispatched per kind, and kinds
//! without a registered body fall back to a visible notice instead of
//! failing.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Widget};

use crate::geometry::{self, Point};
use crate::icons;
use crate::tui::state::{EditorState, Mode};
use crate::tui::theme::{spinner, CanvasTheme, StatusGlyph};
use crate::types::{BlockKind, KindPayload, NodeData, WorkflowNode};

/// World units per terminal column/row at zoom 1.0. Rows cover twice the
/// world distance because terminal cells are roughly twice as tall as wide.
const WORLD_PER_COL: f64 = 8.0;
const WORLD_PER_ROW: f64 = 16.0;

const EDGE_SAMPLES: usize = 64;

pub struct GraphCanvas<'a> {
    state: &'a EditorState,
    theme: &'a CanvasTheme,
}

impl<'a> GraphCanvas<'a> {
    pub fn new(state: &'a EditorState, theme: &'a CanvasTheme) -> Self {
        Self { state, theme }
    }

    fn to_screen(&self, area: Rect, point: Point) -> (i32, i32) {
        let viewport = &self.state.viewport;
        let col = (point.x - viewport.offset_x) * viewport.zoom / WORLD_PER_COL;
        let row = (point.y - viewport.offset_y) * viewport.zoom / WORLD_PER_ROW;
        (area.x as i32 + col.round() as i32, area.y as i32 + row.round() as i32)
    }

    fn node_rect(&self, area: Rect, node: &WorkflowNode) -> (i32, i32, i32, i32) {
        let viewport = &self.state.viewport;
        let origin = self.to_screen(area, Point::new(node.position.x, node.position.y));
        let width = node.data.width.unwrap_or(geometry::NODE_WIDTH);
        let height = node.data.height.unwrap_or(geometry::NODE_HEIGHT);
        let cols = ((width * viewport.zoom / WORLD_PER_COL).round() as i32).max(14);
        let rows = ((height * viewport.zoom / WORLD_PER_ROW).round() as i32).max(5);
        (origin.0, origin.1, cols, rows)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Edges
    // ─────────────────────────────────────────────────────────────────────

    fn render_edges(&self, area: Rect, buf: &mut Buffer) {
        for edge in self.state.store.edges() {
            // Dangling endpoints are tolerated: the edge is just not drawn.
            let (Some(source), Some(target)) = (
                self.state.store.node(&edge.source),
                self.state.store.node(&edge.target),
            ) else {
                continue;
            };
            let stroke = self.theme.edge_stroke(edge.data.as_ref());
            let style = Style::default().fg(stroke.color);
            self.plot_curve(
                area,
                buf,
                geometry::source_anchor(source),
                geometry::target_anchor(target),
                style,
                stroke.dashed,
            );
        }

        // Preview of the pending connection.
        if let Mode::Connecting { source } = &self.state.mode {
            let preview = self
                .state
                .store
                .node(source)
                .zip(self.state.selected_node());
            if let Some((from, to)) = preview {
                if from.id != to.id {
                    self.plot_curve(
                        area,
                        buf,
                        geometry::source_anchor(from),
                        geometry::target_anchor(to),
                        self.theme.accent(),
                        true,
                    );
                }
            }
        }
    }

    fn plot_curve(
        &self,
        area: Rect,
        buf: &mut Buffer,
        from: Point,
        to: Point,
        style: Style,
        dashed: bool,
    ) {
        for (i, point) in geometry::bezier_path(from, to, EDGE_SAMPLES)
            .into_iter()
            .enumerate()
        {
            if dashed && i % 8 >= 4 {
                continue;
            }
            let (x, y) = self.to_screen(area, point);
            put(buf, area, x, y, "·", style);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Nodes
    // ─────────────────────────────────────────────────────────────────────

    fn render_nodes(&self, area: Rect, buf: &mut Buffer) {
        for node in self.state.store.nodes() {
            self.render_node(area, buf, node);
        }
    }

    fn render_node(&self, area: Rect, buf: &mut Buffer, node: &WorkflowNode) {
        let (left, top, cols, rows) = self.node_rect(area, node);
        let right = left + cols - 1;
        let bottom = top + rows - 1;
        let data = &node.data;

        let border_color = self
            .theme
            .status_border(data.running_status)
            .unwrap_or(if data.selected {
                self.theme.text_white
            } else {
                self.theme.dim_gray
            });
        let mut border_style = Style::default().fg(border_color);
        let mut body_dim = Style::default();
        if data.selected {
            border_style = border_style.add_modifier(Modifier::BOLD);
        }
        if data.dimmed {
            border_style = border_style.add_modifier(Modifier::DIM);
            body_dim = body_dim.add_modifier(Modifier::DIM);
        }

        // Frame
        for x in left + 1..right {
            put(buf, area, x, top, "─", border_style);
            put(buf, area, x, bottom, "─", border_style);
        }
        for y in top + 1..bottom {
            put(buf, area, left, y, "│", border_style);
            put(buf, area, right, y, "│", border_style);
        }
        put(buf, area, left, top, "╭", border_style);
        put(buf, area, right, top, "╮", border_style);
        put(buf, area, left, bottom, "╰", border_style);
        put(buf, area, right, bottom, "╯", border_style);

        // Clear the interior so edges do not show through.
        for y in top + 1..bottom {
            for x in left + 1..right {
                put(buf, area, x, y, " ", body_dim);
            }
        }

        // Kind icon, top-left on the frame.
        if let Some(block_icon) = self.theme.block_icon(data.kind()) {
            let glyph = icons::render(&block_icon.icon.tree);
            let style = Style::default()
                .fg(block_icon.color)
                .add_modifier(Modifier::BOLD);
            put_str(buf, area, left + 1, top, &glyph, style.patch(body_dim));
        }

        // Header: title left, status badge right.
        let inner_width = (cols - 2).max(0) as usize;
        let title = truncate(&data.title, inner_width.saturating_sub(2));
        put_str(
            buf,
            area,
            left + 1,
            top + 1,
            &title,
            self.theme
                .text()
                .add_modifier(Modifier::BOLD)
                .patch(body_dim),
        );
        if let Some(badge) = self.theme.status_badge(data.running_status) {
            let glyph = match badge.glyph {
                StatusGlyph::Spinner => spinner::frame(self.state.tick),
                StatusGlyph::Check => "✔",
                StatusGlyph::Warning => "⚠",
            };
            let mut style = Style::default().fg(badge.color);
            if badge.dimmed {
                style = style.add_modifier(Modifier::DIM);
            }
            put_str(buf, area, right - 1, top + 1, glyph, style.patch(body_dim));
        }

        // Body, per kind.
        for (i, (text, style)) in self.body_lines(data).into_iter().enumerate() {
            let y = top + 2 + i as i32;
            if y >= bottom {
                break;
            }
            let line = truncate(&text, inner_width);
            put_str(buf, area, left + 1, y, &line, style.patch(body_dim));
        }

        // Ports: target on the left border, source on the right border.
        // Start nodes take no input, end nodes produce no output.
        let port_row = top + rows / 2;
        if data.kind() != BlockKind::Start {
            put(buf, area, left, port_row, "○", border_style);
        }
        if data.kind() != BlockKind::End {
            put(buf, area, right, port_row, "●", border_style);
        }
    }

    /// Body content dispatch. The registry covers Start, End and LLM; any
    /// other kind renders the fallback notice naming the kind.
    fn body_lines(&self, data: &NodeData) -> Vec<(String, Style)> {
        match &data.payload {
            KindPayload::Start | KindPayload::End => {
                let default = if data.kind() == BlockKind::Start {
                    "Workflow entry point"
                } else {
                    "Workflow terminus"
                };
                vec![(
                    data.desc.clone().unwrap_or_else(|| default.to_string()),
                    self.theme.dimmed(),
                )]
            }
            KindPayload::Llm { model, prompt } => {
                let mut lines = Vec::new();
                match model {
                    Some(model) => {
                        lines.push(("MODEL".to_string(), self.theme.dimmed()));
                        lines.push((
                            format!("{} · {}", model.provider, model.name),
                            self.theme.text(),
                        ));
                    }
                    None => lines.push(("Select a model".to_string(), self.theme.warning())),
                }
                if let Some(prompt) = prompt {
                    lines.push((format!("Prompt: {}", prompt), self.theme.dimmed()));
                }
                lines
            }
            other => vec![(
                format!("Unknown node type: {}", other.kind()),
                self.theme.error(),
            )],
        }
    }
}

impl Widget for GraphCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.state.mode {
            Mode::Connecting { .. } => self.theme.accent(),
            Mode::Normal => self.theme.dimmed(),
        };
        let title = match self.state.mode {
            Mode::Connecting { .. } => " CANVAS · CONNECT ",
            Mode::Normal => " CANVAS ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        self.render_edges(inner, buf);
        self.render_nodes(inner, buf);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Buffer helpers
// ─────────────────────────────────────────────────────────────────────────────

fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if x < area.x as i32
        || y < area.y as i32
        || x >= (area.x + area.width) as i32
        || y >= (area.y + area.height) as i32
    {
        return;
    }
    if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

fn put_str(buf: &mut Buffer, area: Rect, x: i32, y: i32, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        put(buf, area, x + i as i32, y, &ch.to_string(), style);
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use crate::store::WorkflowStore;
    use crate::types::{NodeData, Position, WorkflowEdge};

    fn render_to_text(state: &EditorState) -> String {
        let theme = CanvasTheme::new();
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        GraphCanvas::new(state, &theme).render(area, &mut buf);

        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            out.push('\n');
        }
        out
    }

    fn sample_state() -> EditorState {
        EditorState::new(WorkflowStore::new(sample::nodes(), sample::edges()))
    }

    #[test]
    fn test_registered_kinds_render_their_bodies() {
        let text = render_to_text(&sample_state());
        assert!(text.contains("Start"));
        assert!(text.contains("LLM Model"));
        assert!(text.contains("OpenAI · GPT-4"));
        assert!(text.contains("Workflow terminus"));
        assert!(!text.contains("Unknown node type"));
    }

    #[test]
    fn test_unregistered_kind_renders_fallback_notice() {
        let mut nodes = sample::nodes();
        let mut data = NodeData::new("Retrieval", KindPayload::KnowledgeRetrieval);
        // Wide enough that the notice is not truncated by the frame.
        data.width = Some(480.0);
        nodes.push(WorkflowNode::new("4", Position::new(100.0, 350.0), data));
        let state = EditorState::new(WorkflowStore::new(nodes, sample::edges()));
        let text = render_to_text(&state);
        assert!(text.contains("Unknown node type: knowledge-retrieval"));
    }

    #[test]
    fn test_llm_without_model_degrades_to_prompt() {
        let nodes = vec![WorkflowNode::new(
            "2",
            Position::new(100.0, 150.0),
            NodeData::new(
                "LLM",
                KindPayload::Llm {
                    model: None,
                    prompt: None,
                },
            ),
        )];
        let state = EditorState::new(WorkflowStore::new(nodes, Vec::new()));
        let text = render_to_text(&state);
        assert!(text.contains("Select a model"));
    }

    #[test]
    fn test_dangling_edge_is_skipped() {
        let edges = vec![WorkflowEdge::new("ghost", "1", "nope")];
        let state = EditorState::new(WorkflowStore::new(sample::nodes(), edges));
        // Must not panic; the edge simply is not drawn.
        let _ = render_to_text(&state);
    }

    #[test]
    fn test_nodes_outside_viewport_are_clipped() {
        let nodes = vec![WorkflowNode::new(
            "far",
            Position::new(100_000.0, 100_000.0),
            NodeData::new("Far", KindPayload::Start),
        )];
        let state = EditorState::new(WorkflowStore::new(nodes, Vec::new()));
        let text = render_to_text(&state);
        assert!(!text.contains("Far"));
    }
}
