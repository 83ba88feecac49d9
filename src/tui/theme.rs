//! Canvas theme and status-driven style mapping
//!
//! One palette struct plus the pure mapping functions that turn node kinds,
//! running statuses and edge flags into concrete styles. Every mapper is
//! total: unknown or absent inputs degrade to a neutral default.

use ratatui::style::{Color, Modifier, Style};

use crate::icons::{self, Icon};
use crate::types::{BlockKind, EdgeData, RunningStatus};

/// Canvas color palette
pub struct CanvasTheme {
    // Stroke/status colors
    pub accent_blue: Color,
    pub success_green: Color,
    pub warning_amber: Color,
    pub error_red: Color,
    pub neutral_gray: Color,
    pub waiting_yellow: Color,

    // Block icon colors
    pub start_green: Color,
    pub llm_indigo: Color,

    // Text
    pub text_white: Color,
    pub dim_gray: Color,
}

impl Default for CanvasTheme {
    fn default() -> Self {
        Self {
            accent_blue: Color::Rgb(41, 109, 255),    // #296DFF
            success_green: Color::Rgb(23, 178, 106),  // #17B26A
            warning_amber: Color::Rgb(247, 144, 9),   // #F79009
            error_red: Color::Rgb(239, 68, 68),       // #EF4444
            neutral_gray: Color::Rgb(208, 213, 220),  // #D0D5DC
            waiting_yellow: Color::Rgb(234, 179, 8),  // #EAB308
            start_green: Color::Rgb(16, 185, 129),    // #10B981
            llm_indigo: Color::Rgb(99, 102, 241),     // #6366F1
            text_white: Color::Rgb(230, 237, 243),    // #E6EDF3
            dim_gray: Color::Rgb(128, 128, 128),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style Descriptors
// ─────────────────────────────────────────────────────────────────────────────

/// Icon + color chosen for a block kind.
#[derive(Debug, Clone, Copy)]
pub struct BlockIconStyle {
    pub icon: &'static Icon,
    pub color: Color,
}

/// Glyph family for a status badge. The spinner is resolved to a concrete
/// frame at render time so the mapper itself stays pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusGlyph {
    Spinner,
    Check,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBadge {
    pub glyph: StatusGlyph,
    pub color: Color,
    pub dimmed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStroke {
    pub color: Color,
    pub dashed: bool,
}

impl CanvasTheme {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Text Styles
    // ─────────────────────────────────────────────────────────────────────

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_white)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim_gray)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.accent_blue)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent_blue)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success_green)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning_amber)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error_red)
            .add_modifier(Modifier::BOLD)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Kind Mapping
    // ─────────────────────────────────────────────────────────────────────

    /// Icon and color for a block kind. Kinds without a registered icon
    /// get none.
    pub fn block_icon(&self, kind: BlockKind) -> Option<BlockIconStyle> {
        match kind {
            BlockKind::Start => Some(BlockIconStyle {
                icon: &icons::HOME,
                color: self.start_green,
            }),
            BlockKind::Llm => Some(BlockIconStyle {
                icon: &icons::LLM,
                color: self.llm_indigo,
            }),
            BlockKind::End => Some(BlockIconStyle {
                icon: &icons::ANSWER,
                color: self.warning_amber,
            }),
            BlockKind::Answer | BlockKind::KnowledgeRetrieval => None,
        }
    }

    /// Overview map color for a block kind.
    pub fn minimap_color(&self, kind: BlockKind) -> Color {
        match kind {
            BlockKind::Start => Color::Rgb(16, 185, 129), // #10B981
            BlockKind::End => Color::Rgb(239, 68, 68),    // #EF4444
            BlockKind::Llm => Color::Rgb(59, 130, 246),   // #3B82F6
            _ => Color::Rgb(107, 114, 128),               // #6B7280
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Status Mapping
    // ─────────────────────────────────────────────────────────────────────

    /// Header badge for a running status. Absent and not-started statuses
    /// show nothing.
    pub fn status_badge(&self, status: Option<RunningStatus>) -> Option<StatusBadge> {
        match status? {
            RunningStatus::NotStart => None,
            RunningStatus::Running => Some(StatusBadge {
                glyph: StatusGlyph::Spinner,
                color: self.accent_blue,
                dimmed: false,
            }),
            RunningStatus::Succeeded => Some(StatusBadge {
                glyph: StatusGlyph::Check,
                color: self.success_green,
                dimmed: false,
            }),
            RunningStatus::Failed => Some(StatusBadge {
                glyph: StatusGlyph::Warning,
                color: self.error_red,
                dimmed: false,
            }),
            RunningStatus::Waiting => Some(StatusBadge {
                glyph: StatusGlyph::Spinner,
                color: self.waiting_yellow,
                dimmed: true,
            }),
        }
    }

    /// Frame border color for a running status, if the status colors the
    /// border at all.
    pub fn status_border(&self, status: Option<RunningStatus>) -> Option<Color> {
        match status? {
            RunningStatus::Running => Some(self.accent_blue),
            RunningStatus::Succeeded => Some(self.success_green),
            RunningStatus::Failed => Some(self.error_red),
            RunningStatus::NotStart | RunningStatus::Waiting => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Edge Stroke Mapping
    // ─────────────────────────────────────────────────────────────────────

    /// Stroke for an edge, by fixed priority. Exactly one rule applies;
    /// the first match wins.
    pub fn edge_stroke(&self, data: Option<&EdgeData>) -> EdgeStroke {
        if let Some(data) = data {
            if data.waiting_run {
                return EdgeStroke {
                    color: self.warning_amber,
                    dashed: false,
                };
            }
            match data.source_running_status {
                Some(RunningStatus::Running) => {
                    return EdgeStroke {
                        color: self.accent_blue,
                        dashed: true,
                    }
                }
                Some(RunningStatus::Succeeded) => {
                    return EdgeStroke {
                        color: self.success_green,
                        dashed: false,
                    }
                }
                Some(RunningStatus::Failed) => {
                    return EdgeStroke {
                        color: self.error_red,
                        dashed: false,
                    }
                }
                _ => {}
            }
        }
        EdgeStroke {
            color: self.neutral_gray,
            dashed: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Spinner
// ─────────────────────────────────────────────────────────────────────────────

/// Spinner frames, indexed by the editor tick.
pub mod spinner {
    pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

    pub fn frame(tick: u64) -> &'static str {
        FRAMES[(tick as usize) % FRAMES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_icons_are_closed_mapping() {
        let theme = CanvasTheme::new();

        let start = theme.block_icon(BlockKind::Start).unwrap();
        assert_eq!(start.icon.name, "home");
        assert_eq!(start.color, theme.start_green);

        let llm = theme.block_icon(BlockKind::Llm).unwrap();
        assert_eq!(llm.icon.name, "llm");
        assert_eq!(llm.color, theme.llm_indigo);

        let end = theme.block_icon(BlockKind::End).unwrap();
        assert_eq!(end.icon.name, "answer");

        assert!(theme.block_icon(BlockKind::Answer).is_none());
        assert!(theme.block_icon(BlockKind::KnowledgeRetrieval).is_none());
    }

    #[test]
    fn test_status_badge_mapping() {
        let theme = CanvasTheme::new();

        assert!(theme.status_badge(None).is_none());
        assert!(theme.status_badge(Some(RunningStatus::NotStart)).is_none());

        let running = theme.status_badge(Some(RunningStatus::Running)).unwrap();
        assert_eq!(running.glyph, StatusGlyph::Spinner);
        assert_eq!(running.color, theme.accent_blue);

        let waiting = theme.status_badge(Some(RunningStatus::Waiting)).unwrap();
        assert_eq!(waiting.glyph, StatusGlyph::Spinner);
        assert!(waiting.dimmed);

        let succeeded = theme.status_badge(Some(RunningStatus::Succeeded)).unwrap();
        assert_eq!(succeeded.glyph, StatusGlyph::Check);

        let failed = theme.status_badge(Some(RunningStatus::Failed)).unwrap();
        assert_eq!(failed.glyph, StatusGlyph::Warning);
    }

    #[test]
    fn test_status_border_mapping() {
        let theme = CanvasTheme::new();
        assert_eq!(
            theme.status_border(Some(RunningStatus::Running)),
            Some(theme.accent_blue)
        );
        assert_eq!(
            theme.status_border(Some(RunningStatus::Failed)),
            Some(theme.error_red)
        );
        assert_eq!(theme.status_border(Some(RunningStatus::Waiting)), None);
        assert_eq!(theme.status_border(None), None);
    }

    #[test]
    fn test_edge_stroke_priority_order() {
        let theme = CanvasTheme::new();

        // Waiting flag beats every status, including failed.
        let waiting = EdgeData {
            source_running_status: Some(RunningStatus::Failed),
            waiting_run: true,
        };
        let stroke = theme.edge_stroke(Some(&waiting));
        assert_eq!(stroke.color, theme.warning_amber);
        assert!(!stroke.dashed);

        let running = EdgeData {
            source_running_status: Some(RunningStatus::Running),
            waiting_run: false,
        };
        let stroke = theme.edge_stroke(Some(&running));
        assert_eq!(stroke.color, theme.accent_blue);
        assert!(stroke.dashed);

        let succeeded = EdgeData {
            source_running_status: Some(RunningStatus::Succeeded),
            waiting_run: false,
        };
        assert_eq!(
            theme.edge_stroke(Some(&succeeded)).color,
            theme.success_green
        );

        let failed = EdgeData {
            source_running_status: Some(RunningStatus::Failed),
            waiting_run: false,
        };
        assert_eq!(theme.edge_stroke(Some(&failed)).color, theme.error_red);
    }

    #[test]
    fn test_edge_stroke_default_is_neutral() {
        let theme = CanvasTheme::new();
        let stroke = theme.edge_stroke(None);
        assert_eq!(stroke.color, theme.neutral_gray);
        assert!(!stroke.dashed);

        // Statuses outside the stroke rules fall through to neutral too.
        let idle = EdgeData {
            source_running_status: Some(RunningStatus::NotStart),
            waiting_run: false,
        };
        assert_eq!(theme.edge_stroke(Some(&idle)).color, theme.neutral_gray);
    }

    #[test]
    fn test_spinner_frames_wrap() {
        assert_eq!(spinner::frame(0), spinner::frame(10));
        assert_ne!(spinner::frame(0), spinner::frame(1));
    }
}
