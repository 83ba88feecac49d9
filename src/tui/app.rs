//! Editor application - terminal lifecycle and run loop

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};

use super::events::{handle_key_event, poll_event, Action};
use super::state::{EditorState, Mode};
use super::theme::CanvasTheme;
use super::widgets::{GraphCanvas, Minimap};
use crate::store::WorkflowStore;
use crate::types::KindPayload;

/// Editor application
pub struct EditorApp {
    state: EditorState,
    theme: CanvasTheme,
}

impl EditorApp {
    /// Create a new editor over a prepared store.
    pub fn new(store: WorkflowStore) -> Self {
        Self {
            state: EditorState::new(store),
            theme: CanvasTheme::new(),
        }
    }

    /// Run the editor until the user quits.
    pub fn run(mut self) -> anyhow::Result<()> {
        let mut terminal = self.setup_terminal()?;
        let result = self.main_loop(&mut terminal);
        self.restore_terminal(&mut terminal)?;
        result
    }

    fn setup_terminal(&self) -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(33);

        loop {
            self.state.on_tick();

            terminal.draw(|frame| self.render(frame))?;

            if let Some(key) = poll_event(tick_rate)? {
                if handle_key_event(key, &mut self.state) == Action::Quit {
                    self.state.should_quit = true;
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Canvas + side panel
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.render_header(frame, main_chunks[0]);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(30)])
            .split(main_chunks[1]);

        frame.render_widget(GraphCanvas::new(&self.state, &self.theme), content_chunks[0]);

        let side_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(5)])
            .split(content_chunks[1]);

        frame.render_widget(Minimap::new(&self.state, &self.theme), side_chunks[0]);
        self.render_inspector(frame, side_chunks[1]);

        self.render_footer(frame, main_chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let store = &self.state.store;
        let mode_span = match self.state.mode {
            Mode::Connecting { .. } => Span::styled("CONNECT", self.theme.warning()),
            Mode::Normal => Span::styled("NORMAL", self.theme.success()),
        };

        let header = Line::from(vec![
            Span::styled("◈ FLOWCANVAS", self.theme.header()),
            Span::raw("  │  "),
            mode_span,
            Span::raw("  │  "),
            Span::styled(
                format!("{} nodes · {} edges", store.nodes().len(), store.edges().len()),
                self.theme.text(),
            ),
            Span::raw("  │  "),
            Span::styled(
                format!("zoom {:.0}%", self.state.viewport.zoom * 100.0),
                self.theme.dimmed(),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.accent())
            .title(" WORKFLOW EDITOR ");

        frame.render_widget(Paragraph::new(header).block(block), area);
    }

    fn render_inspector(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        if let Some(node) = self.state.selected_node() {
            lines.push(Line::from(vec![
                Span::styled("  id:     ", self.theme.dimmed()),
                Span::styled(node.id.clone(), self.theme.text()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  kind:   ", self.theme.dimmed()),
                Span::styled(node.data.kind().to_string(), self.theme.accent()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("  title:  ", self.theme.dimmed()),
                Span::styled(node.data.title.clone(), self.theme.text()),
            ]));
            if let Some(desc) = &node.data.desc {
                lines.push(Line::from(vec![
                    Span::styled("  desc:   ", self.theme.dimmed()),
                    Span::styled(desc.clone(), self.theme.text()),
                ]));
            }
            let status = node
                .data
                .running_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "—".to_string());
            lines.push(Line::from(vec![
                Span::styled("  status: ", self.theme.dimmed()),
                Span::styled(status, self.theme.text()),
            ]));
            if let KindPayload::Llm { model, .. } = &node.data.payload {
                let model_line = model
                    .as_ref()
                    .map(|m| format!("{} · {}", m.provider, m.name))
                    .unwrap_or_else(|| "not selected".to_string());
                lines.push(Line::from(vec![
                    Span::styled("  model:  ", self.theme.dimmed()),
                    Span::styled(model_line, self.theme.text()),
                ]));
            }
        } else {
            lines.push(Line::from(Span::styled(
                "  no node selected",
                self.theme.dimmed(),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.dimmed())
            .title(" NODE ");

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        if let Some(status) = &self.state.status_line {
            let line = Line::from(vec![
                Span::styled(" » ", self.theme.accent()),
                Span::styled(status.clone(), self.theme.text()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let help = Line::from(vec![
            Span::styled(" [q]", self.theme.accent()),
            Span::styled("uit  ", self.theme.dimmed()),
            Span::styled("[Tab]", self.theme.accent()),
            Span::styled(" select  ", self.theme.dimmed()),
            Span::styled("[↑↓←→]", self.theme.accent()),
            Span::styled(" move  ", self.theme.dimmed()),
            Span::styled("[c]", self.theme.accent()),
            Span::styled("onnect  ", self.theme.dimmed()),
            Span::styled("[s]", self.theme.accent()),
            Span::styled("tatus  ", self.theme.dimmed()),
            Span::styled("[d]", self.theme.accent()),
            Span::styled("im  ", self.theme.dimmed()),
            Span::styled("[+/-]", self.theme.accent()),
            Span::styled(" zoom  ", self.theme.dimmed()),
            Span::styled("[Shift+↑↓←→]", self.theme.accent()),
            Span::styled(" pan", self.theme.dimmed()),
        ]);
        frame.render_widget(Paragraph::new(help), area);
    }
}
