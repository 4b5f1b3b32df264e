//! Preview area rendering

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::render_engines::mockup::{Mockup, MockupStyle, MIN_MOCKUP_WIDTH};
use crate::state::AppShell;
use crate::ui::UiColors;

/// Render the preview area
pub fn render_preview(frame: &mut Frame, area: Rect, state: &AppShell, colors: &UiColors) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors.border(false))
        .title(Span::styled(
            " Preview ",
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if (inner.width as usize) < MIN_MOCKUP_WIDTH {
        let widget = Paragraph::new("Preview needs more room")
            .style(Style::default().fg(colors.muted))
            .alignment(Alignment::Center);
        frame.render_widget(widget, inner);
        return;
    }

    let width = state.config.preview.width.min(inner.width as usize);
    let height = inner.height as usize;
    let mockup = state.mockup(width, Some(height));

    let mut lines = mockup_lines(&mockup, colors);
    // The reference line only gets rows the mockup did not need
    if mockup.height() + 2 <= height {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            state.preview_reference().to_string(),
            Style::default().fg(colors.muted),
        )));
    }

    // Vertically centre when there is room
    let top = height.saturating_sub(lines.len()) / 2;
    let mut padded = vec![Line::from(""); top];
    padded.extend(lines);

    let widget = Paragraph::new(padded).alignment(Alignment::Center);
    frame.render_widget(widget, inner);
}

/// Convert mockup spans to styled Ratatui lines
fn mockup_lines(mockup: &Mockup, colors: &UiColors) -> Vec<Line<'static>> {
    mockup
        .lines
        .iter()
        .map(|line| {
            Line::from(
                line.spans
                    .iter()
                    .map(|span| Span::styled(span.text.clone(), span_style(&span.style, colors)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn span_style(style: &MockupStyle, colors: &UiColors) -> Style {
    let mut out = Style::default();
    if let Some(fg) = style.fg.and_then(|c| colors.convert(c)) {
        out = out.fg(fg);
    }
    if let Some(bg) = style.bg.and_then(|c| colors.convert(c)) {
        out = out.bg(bg);
    }
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    out
}
