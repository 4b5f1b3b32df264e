//! Customization form widgets

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::form::{FormField, CUSTOM_TEXT_LINES, MAX_CUSTOM_TEXT_CHARS};
use crate::state::{AppShell, FocusedWidget};
use crate::ui::UiColors;
use crate::unicode_handler::{display_width, hard_wrap};

/// Render the form panel
pub fn render_form(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors.border(false))
        .title(Span::styled(
            " Customize ",
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                            // Measurements
            Constraint::Length(1),                            // Custom text label
            Constraint::Length(CUSTOM_TEXT_LINES as u16 + 2), // Text area
            Constraint::Length(1),                            // Error line
            Constraint::Length(2),                            // Upload + submit
            Constraint::Min(0),                               // Hints
        ])
        .split(inner);

    render_measurements(frame, chunks[0], state, colors);
    render_text_label(frame, chunks[1], state, colors);
    render_text_area(frame, chunks[2], state, colors);
    render_text_error(frame, chunks[3], state, colors);
    render_actions(frame, chunks[4], state, colors);

    if state.config.ui.show_hints {
        render_hint(frame, chunks[5], state.focus, colors);
    }
}

fn render_measurements(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    let data = state.form().data();

    let build_value = format!("◀ {} ▶", data.build.label());
    let lines = vec![
        create_setting_line(
            "Height (cm)",
            &data.height.to_string(),
            state.focus == FocusedWidget::Height,
            colors,
        ),
        create_setting_line(
            "Weight (kg)",
            &data.weight.to_string(),
            state.focus == FocusedWidget::Weight,
            colors,
        ),
        create_setting_line(
            "Build",
            &build_value,
            state.focus == FocusedWidget::Build,
            colors,
        ),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_text_label(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    let count = state.form().data().custom_text.chars().count();
    let counter_style = if count > MAX_CUSTOM_TEXT_CHARS {
        Style::default().fg(colors.error)
    } else {
        Style::default().fg(colors.muted)
    };

    let line = Line::from(vec![
        Span::styled(
            if state.focus == FocusedWidget::CustomText { "▸ " } else { "  " },
            Style::default().fg(colors.accent),
        ),
        Span::styled("Custom Text ", label_style(state.focus == FocusedWidget::CustomText, colors)),
        Span::styled(format!("{}/{}", count, MAX_CUSTOM_TEXT_CHARS), counter_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_text_area(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    let focused = state.focus == FocusedWidget::CustomText;
    let text = &state.form().data().custom_text;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors.border(focused));

    if text.is_empty() && !focused {
        let hint = Paragraph::new(Span::styled(
            "Enter text to print on your t-shirt (max 3 lines)",
            Style::default().fg(colors.muted),
        ))
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(hint, area);
        return;
    }

    // Wrap here rather than in the Paragraph so rows can be counted
    let inner_width = area.width.saturating_sub(2) as usize;
    let mut rows: Vec<String> = text
        .split('\n')
        .flat_map(|line| hard_wrap(line, inner_width))
        .collect();

    // The cursor needs a free column on the last row
    if focused && rows.last().is_some_and(|r| display_width(r) >= inner_width) {
        rows.push(String::new());
    }

    let mut lines: Vec<Line> = rows.into_iter().map(Line::raw).collect();
    if focused {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled("▌", Style::default().fg(colors.accent)));
        }
    }

    // Keep the cursor row visible
    let scroll = lines.len().saturating_sub(CUSTOM_TEXT_LINES) as u16;

    let widget = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(widget, area);
}

fn render_text_error(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    if let Some(error) = state.form().error_for(FormField::CustomText) {
        let line = Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(colors.error).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_actions(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    let upload_value = state
        .uploaded_image()
        .map(|img| img.file.file_name())
        .unwrap_or_else(|| "[none]".to_string());

    let submit_focused = state.focus == FocusedWidget::Submit;
    let submit_style = if submit_focused {
        Style::default()
            .fg(colors.background)
            .bg(colors.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.accent)
    };

    let lines = vec![
        create_setting_line(
            "Upload Design",
            &upload_value,
            state.focus == FocusedWidget::Upload,
            colors,
        ),
        Line::from(vec![
            Span::styled(
                if submit_focused { "▸ " } else { "  " },
                Style::default().fg(colors.accent),
            ),
            Span::styled("[ Save Customization ]", submit_style),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_hint(frame: &mut Frame, area: Rect, focus: FocusedWidget, colors: &UiColors) {
    let hint = match focus {
        FocusedWidget::Height | FocusedWidget::Weight => "Type digits, [+/-] to adjust",
        FocusedWidget::Build => "[←/→] slim · athletic · regular · large",
        FocusedWidget::CustomText => "Type text, [Enter] for a new line",
        FocusedWidget::Upload => "[Enter] to choose a file",
        FocusedWidget::Submit => "[Enter] to save",
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", hint), Style::default().fg(colors.muted))),
        Line::from(Span::styled(
            "  [Tab] next field  [Ctrl+S] save  [F1] help",
            Style::default().fg(colors.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn label_style(is_selected: bool, colors: &UiColors) -> Style {
    if is_selected {
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.foreground)
    }
}

/// Create a field line with label and value
fn create_setting_line(
    label: &str,
    value: &str,
    is_selected: bool,
    colors: &UiColors,
) -> Line<'static> {
    let indicator = if is_selected { "▸" } else { " " };

    let value_style = if is_selected {
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(colors.foreground)
    };

    Line::from(vec![
        Span::styled(format!("{} ", indicator), Style::default().fg(colors.accent)),
        Span::styled(format!("{}: ", label), label_style(is_selected, colors)),
        Span::styled(value.to_string(), value_style),
    ])
}
