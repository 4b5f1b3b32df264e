//! Overlay rendering: help, upload prompt and save acknowledgement

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::state::AppShell;
use crate::ui::UiColors;

/// Render the help overlay
pub fn render_help_overlay(frame: &mut Frame, area: Rect, colors: &UiColors) {
    let overlay_width = (area.width as f32 * 0.7).min(60.0) as u16;
    let overlay_height = (area.height as f32 * 0.8).min(22.0) as u16;
    let overlay_area = centered_rect(overlay_width, overlay_height, area);

    let inner = overlay_frame(frame, overlay_area, " Keyboard Shortcuts ", colors);

    let widget = Paragraph::new(create_help_text(colors)).style(colors.base());
    frame.render_widget(widget, inner);
}

/// Render the file path prompt used to choose an image
pub fn render_upload_prompt(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    let overlay_width = (area.width as f32 * 0.8).min(70.0) as u16;
    let overlay_area = centered_rect(overlay_width, 5, area);

    let inner = overlay_frame(frame, overlay_area, " Upload Design ", colors);

    let lines = vec![
        Line::from(vec![
            Span::styled("Path: ", Style::default().fg(colors.accent)),
            Span::raw(state.upload_prompt_input.clone()),
            Span::styled("▌", Style::default().fg(colors.accent)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] upload  [Esc] cancel",
            Style::default().fg(colors.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(colors.base()), inner);
}

/// Render the modal shown after the form is saved
pub fn render_acknowledgement(frame: &mut Frame, area: Rect, message: &str, colors: &UiColors) {
    let overlay_width = (area.width as f32 * 0.7).min(56.0) as u16;
    let overlay_area = centered_rect(overlay_width, 7, area);

    let inner = overlay_frame(frame, overlay_area, " Saved ", colors);

    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("[Enter] OK", Style::default().fg(colors.muted))),
    ];
    let widget = Paragraph::new(lines)
        .style(colors.base())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, inner);
}

/// Clear an area, draw a titled border and return the inner area
fn overlay_frame(frame: &mut Frame, area: Rect, title: &str, colors: &UiColors) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.accent))
        .style(colors.base())
        .title(Span::styled(
            title.to_string(),
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Create help text content
fn create_help_text(colors: &UiColors) -> Vec<Line<'static>> {
    let section_style = Style::default()
        .fg(colors.accent)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(colors.accent);
    let desc_style = Style::default().fg(colors.foreground);

    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", key), key_style),
            Span::styled(desc, desc_style),
        ])
    };

    vec![
        Line::from(Span::styled("Global", section_style)),
        entry("Alt+Q", "Switch theme"),
        entry("Ctrl+S", "Save customization"),
        entry("Ctrl+C", "Quit"),
        entry("F1", "Toggle help"),
        entry("Tab / ↓", "Next field"),
        entry("Shift+Tab / ↑", "Previous field"),
        Line::from(""),
        Line::from(Span::styled("Measurements", section_style)),
        entry("0-9", "Type a value"),
        entry("Backspace", "Delete last digit"),
        entry("+ - ← →", "Adjust by one"),
        Line::from(""),
        Line::from(Span::styled("Build", section_style)),
        entry("← →", "Choose build"),
        Line::from(""),
        Line::from(Span::styled("Custom Text", section_style)),
        entry("Enter", "New line"),
        Line::from(""),
        Line::from(Span::styled(
            "       [Press F1 or Esc to close]",
            Style::default().fg(colors.muted),
        )),
    ]
}

/// Create a centered rectangle
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal_padding = area.width.saturating_sub(width) / 2;
    let vertical_padding = area.height.saturating_sub(height) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(horizontal_padding),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}
