//! UI module
//!
//! Contains all UI rendering components using Ratatui.

mod help;
mod preview;
mod widgets;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::color_space::{to_terminal_color, Rgb};
use crate::shortcuts::THEME_CYCLE_COMBO;
use crate::state::AppShell;
use crate::terminal_capabilities::ColorSupport;
use crate::theme::ThemePalette;
use crate::unicode_handler::display_width;

/// Theme palette resolved to terminal colours for one frame
#[derive(Debug, Clone, Copy)]
pub(crate) struct UiColors {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    support: ColorSupport,
}

impl UiColors {
    fn new(palette: &ThemePalette, support: ColorSupport) -> Self {
        let color = |rgb| to_terminal_color(rgb, support).unwrap_or(Color::Reset);
        Self {
            background: color(palette.background),
            foreground: color(palette.foreground),
            accent: color(palette.accent),
            muted: color(palette.muted),
            error: color(palette.error),
            support,
        }
    }

    /// Convert an arbitrary colour with the same colour level
    pub fn convert(&self, rgb: Rgb) -> Option<Color> {
        to_terminal_color(rgb, self.support)
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.muted)
        }
    }
}

/// Main render function - draws the entire UI
pub fn render(frame: &mut Frame, state: &AppShell) {
    let size = frame.area();
    let colors = UiColors::new(
        &state.theme().palette(),
        state.capabilities.color_support,
    );

    // Check minimum size
    if size.width < 40 || size.height < 15 {
        render_size_warning(frame, size);
        return;
    }

    frame.render_widget(Block::default().style(colors.base()), size);

    // Main layout: title bar, content, status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    render_title_bar(frame, main_chunks[0], state, &colors);
    render_main_content(frame, main_chunks[1], state, &colors);
    render_status_bar(frame, main_chunks[2], state, &colors);

    // Overlays, topmost last
    if state.upload_prompt_active {
        help::render_upload_prompt(frame, size, state, &colors);
    }
    if state.show_help {
        help::render_help_overlay(frame, size, &colors);
    }
    if let Some(ref message) = state.acknowledgement {
        help::render_acknowledgement(frame, size, message, &colors);
    }
}

/// Render warning when terminal is too small
fn render_size_warning(frame: &mut Frame, area: Rect) {
    let warning = Paragraph::new("Terminal too small!\nMinimum: 40x15")
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(warning, area);
}

/// Render the title bar with the theme indicator
fn render_title_bar(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    let title = Line::from(vec![
        Span::styled(
            " T-Shirt Customizer ",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ Current theme: "),
        Span::styled(
            state.theme().name(),
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" (Press {} to switch)", THEME_CYCLE_COMBO.label()),
            Style::default().fg(colors.muted),
        ),
    ]);

    let title_widget = Paragraph::new(title).style(colors.base().add_modifier(Modifier::REVERSED));

    frame.render_widget(title_widget, area);
}

/// Render the main content area
fn render_main_content(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    // Responsive layout: side-by-side if wide enough, stacked if narrow
    let chunks = if area.width >= 80 {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(30),    // Preview
                Constraint::Length(46), // Form
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(50), // Preview
                Constraint::Min(12),        // Form
            ])
            .split(area)
    };

    preview::render_preview(frame, chunks[0], state, colors);
    widgets::render_form(frame, chunks[1], state, colors);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    let status_color = if state.status_is_error {
        colors.error
    } else {
        colors.foreground
    };

    let file_info = state
        .uploaded_image()
        .map(|img| format!("{} │ {}", img.file.file_name(), img.reference()))
        .unwrap_or_else(|| "no design".to_string());

    // Calculate spacing
    let spacing = (area.width as usize)
        .saturating_sub(display_width(&state.status_message))
        .saturating_sub(display_width(&file_info))
        .saturating_sub(2);

    let status = Line::from(vec![
        Span::raw(" "),
        Span::styled(&state.status_message, Style::default().fg(status_color)),
        Span::raw(" ".repeat(spacing)),
        Span::styled(file_info, Style::default().fg(colors.muted)),
        Span::raw(" "),
    ]);

    frame.render_widget(Paragraph::new(status).style(colors.base()), area);
}
