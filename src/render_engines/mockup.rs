//! T-shirt mockup composition
//!
//! [`render_mockup`] turns (image, overlay text, theme, width) into a grid of
//! styled text. It reads nothing else and keeps no state, so the same input
//! always produces the same mockup.

use std::sync::Arc;

use image::DynamicImage;

use crate::color_space::{bg_sequence, fg_sequence, Rgb, ANSI_RESET};
use crate::form::CUSTOM_TEXT_LINES;
use crate::render_engines::halfblocks::{fit_dimensions, render_half_blocks, HALF_BLOCK};
use crate::terminal_capabilities::ColorSupport;
use crate::theme::{Theme, ThemePalette};
use crate::unicode_handler::{center_to_width, wrap_lines};

pub const MIN_MOCKUP_WIDTH: usize = 20;
pub const MAX_MOCKUP_WIDTH: usize = 80;

const MAX_IMAGE_ROWS: usize = 10;
const MIN_IMAGE_ROWS: usize = 3;
/// Shoulder, collar and sleeve rows plus the hem
const OUTLINE_ROWS: usize = 5;

/// What the print area should show
#[derive(Debug, Clone, Default)]
pub enum PreviewImage {
    /// Nothing uploaded yet
    #[default]
    Placeholder,
    /// A file was uploaded but it is not an image we can decode
    Undecodable,
    Decoded(Arc<DynamicImage>),
}

/// Everything the mockup depends on
#[derive(Debug, Clone)]
pub struct MockupInput<'a> {
    pub image: &'a PreviewImage,
    pub custom_text: &'a str,
    pub theme: Theme,
    /// Total width in columns, clamped to the supported range
    pub width: usize,
    /// Rows available; the print area shrinks to fit. `None` means unbounded.
    pub max_height: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MockupStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockupSpan {
    pub text: String,
    pub style: MockupStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MockupLine {
    pub spans: Vec<MockupSpan>,
}

impl MockupLine {
    /// Append text, merging with the previous span when the style matches
    fn push(&mut self, text: &str, style: MockupStyle) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(MockupSpan {
                text: text.to_string(),
                style,
            }),
        }
    }

    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A rendered t-shirt preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mockup {
    pub width: usize,
    pub lines: Vec<MockupLine>,
}

impl Mockup {
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Text only, one line per row
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text());
            out.push('\n');
        }
        out
    }

    /// Text with ANSI colour sequences for the given colour level
    pub fn to_ansi(&self, support: ColorSupport) -> String {
        if support == ColorSupport::NoColor {
            return self.to_plain();
        }

        let mut out = String::new();
        for line in &self.lines {
            for span in &line.spans {
                let styled = span.style != MockupStyle::default();
                if span.style.bold {
                    out.push_str("\x1b[1m");
                }
                if let Some(fg) = span.style.fg {
                    out.push_str(&fg_sequence(fg, support));
                }
                if let Some(bg) = span.style.bg {
                    out.push_str(&bg_sequence(bg, support));
                }
                out.push_str(&span.text);
                if styled {
                    out.push_str(ANSI_RESET);
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Shirt geometry derived from the total width
#[derive(Debug, Clone, Copy)]
struct Geometry {
    width: usize,
    /// Width of each shoulder block on row 0
    shoulder: usize,
    /// Neck opening width
    neck: usize,
    /// Sleeve overhang on each side of the body
    sleeve: usize,
    /// Columns inside the body outline
    body: usize,
    /// Columns available for print content
    print: usize,
    /// Zero when there is no room for the image block
    image_rows: usize,
    top_margin: bool,
    gap: bool,
    bottom_margin: bool,
}

impl Geometry {
    fn new(width: usize, max_height: Option<usize>) -> Self {
        let width = width.clamp(MIN_MOCKUP_WIDTH, MAX_MOCKUP_WIDTH);
        let mut neck = width / 3;
        if (width - neck) % 2 == 1 {
            neck += 1;
        }
        let shoulder = (width - neck) / 2;
        let sleeve = (width / 6).max(3);
        let body = width - 2 * sleeve;
        let print = body - 2;
        let mut image_rows = (print / 2).clamp(MIN_IMAGE_ROWS, MAX_IMAGE_ROWS);
        let mut margins = 3;

        // Text rows are never given up: shrink the image, then the margins,
        // then drop the image block
        if let Some(max) = max_height {
            let room = max.saturating_sub(OUTLINE_ROWS + CUSTOM_TEXT_LINES);
            if image_rows + margins > room {
                image_rows = room.saturating_sub(margins).max(MIN_IMAGE_ROWS);
            }
            if image_rows + margins > room {
                margins = room.saturating_sub(image_rows);
            }
            if image_rows > room {
                image_rows = 0;
                margins = room.min(3);
            }
        }

        Self {
            width,
            shoulder,
            neck,
            sleeve,
            body,
            print,
            image_rows,
            gap: margins >= 1,
            top_margin: margins >= 2,
            bottom_margin: margins >= 3,
        }
    }

    /// Rows the mockup takes before any final cropping
    fn height(&self) -> usize {
        OUTLINE_ROWS
            + self.image_rows
            + CUSTOM_TEXT_LINES
            + [self.top_margin, self.gap, self.bottom_margin]
                .iter()
                .filter(|m| **m)
                .count()
    }
}

/// Compose the t-shirt preview.
pub fn render_mockup(input: &MockupInput<'_>) -> Mockup {
    let geo = Geometry::new(input.width, input.max_height);
    let palette = input.theme.palette();

    let outside = MockupStyle::default();
    let outline = MockupStyle {
        fg: Some(palette.shirt_outline),
        ..MockupStyle::default()
    };
    let fill = MockupStyle {
        bg: Some(palette.shirt),
        ..MockupStyle::default()
    };
    let fill_outline = MockupStyle {
        fg: Some(palette.shirt_outline),
        bg: Some(palette.shirt),
        bold: false,
    };

    let mut lines = Vec::new();
    let k = geo.shoulder;

    // Shoulders with the neck opening between them
    let mut line = MockupLine::default();
    line.push(" ", outside);
    line.push(&format!("╭{}╮", "─".repeat(k - 3)), outline);
    line.push(&" ".repeat(geo.neck), outside);
    line.push(&format!("╭{}╮", "─".repeat(k - 3)), outline);
    line.push(" ", outside);
    lines.push(line);

    // Collar
    let mut line = MockupLine::default();
    line.push("╭╯", outline);
    line.push(&" ".repeat(k - 3), fill);
    line.push(&format!("╰{}╯", "─".repeat(geo.neck)), fill_outline);
    line.push(&" ".repeat(k - 3), fill);
    line.push("╰╮", outline);
    lines.push(line);

    // Sleeves
    let mut line = MockupLine::default();
    line.push("│", outline);
    line.push(&" ".repeat(geo.width - 2), fill);
    line.push("│", outline);
    lines.push(line);

    let mut line = MockupLine::default();
    line.push(&format!("╰{}╮", "─".repeat(geo.sleeve - 2)), outline);
    line.push(&" ".repeat(geo.body), fill);
    line.push(&format!("╭{}╯", "─".repeat(geo.sleeve - 2)), outline);
    lines.push(line);

    // Body: margin, print image, gap, text, margin
    let mut body_rows: Vec<MockupLine> = Vec::new();
    if geo.top_margin {
        body_rows.push(blank_print_row(&geo, fill));
    }
    body_rows.extend(image_rows(input.image, &geo, &palette, fill));
    if geo.gap {
        body_rows.push(blank_print_row(&geo, fill));
    }
    body_rows.extend(text_rows(input.custom_text, &geo, &palette, fill));
    if geo.bottom_margin {
        body_rows.push(blank_print_row(&geo, fill));
    }

    let side = " ".repeat(geo.sleeve - 1);
    for row in body_rows {
        let mut line = MockupLine::default();
        line.push(&side, outside);
        line.push("│", outline);
        line.push(" ", fill);
        for span in row.spans {
            line.push(&span.text, span.style);
        }
        line.push(" ", fill);
        line.push("│", outline);
        line.push(&side, outside);
        lines.push(line);
    }

    // Hem
    let mut line = MockupLine::default();
    line.push(&side, outside);
    line.push(&format!("╰{}╯", "─".repeat(geo.body)), outline);
    line.push(&side, outside);
    lines.push(line);

    // Still too tall: crop the outline from the top, and the hem too when
    // even that leaves no room for the text
    if let Some(max) = input.max_height {
        if geo.height() > max {
            if max <= CUSTOM_TEXT_LINES {
                lines.pop();
                let first_text = lines.len().saturating_sub(CUSTOM_TEXT_LINES);
                lines.drain(..first_text);
                lines.truncate(max);
            } else {
                let excess = lines.len().saturating_sub(max);
                lines.drain(..excess);
            }
        }
    }

    Mockup {
        width: geo.width,
        lines,
    }
}

fn blank_print_row(geo: &Geometry, fill: MockupStyle) -> MockupLine {
    let mut line = MockupLine::default();
    line.push(&" ".repeat(geo.print), fill);
    line
}

fn image_rows(
    image: &PreviewImage,
    geo: &Geometry,
    palette: &ThemePalette,
    fill: MockupStyle,
) -> Vec<MockupLine> {
    if geo.image_rows == 0 {
        return Vec::new();
    }
    match image {
        PreviewImage::Placeholder => framed_message(geo, palette, fill, "Your design here"),
        PreviewImage::Undecodable => framed_message(geo, palette, fill, "Unable to display"),
        PreviewImage::Decoded(img) => {
            let (cols, rows) = fit_dimensions(img, geo.print, geo.image_rows);
            let grid = render_half_blocks(img, cols, rows, palette.shirt);

            // Centre the picture inside the fixed-size print area
            let top_pad = (geo.image_rows - rows) / 2;
            let left_pad = (geo.print - cols) / 2;
            let right_pad = geo.print - cols - left_pad;

            let symbol = HALF_BLOCK.to_string();
            let mut out = Vec::with_capacity(geo.image_rows);
            for _ in 0..top_pad {
                out.push(blank_print_row(geo, fill));
            }
            for cells in &grid {
                let mut line = MockupLine::default();
                line.push(&" ".repeat(left_pad), fill);
                for cell in cells {
                    line.push(
                        &symbol,
                        MockupStyle {
                            fg: Some(cell.top),
                            bg: Some(cell.bottom),
                            bold: false,
                        },
                    );
                }
                line.push(&" ".repeat(right_pad), fill);
                out.push(line);
            }
            while out.len() < geo.image_rows {
                out.push(blank_print_row(geo, fill));
            }
            out
        }
    }
}

/// Dashed frame filling the print area with a centred message
fn framed_message(
    geo: &Geometry,
    palette: &ThemePalette,
    fill: MockupStyle,
    message: &str,
) -> Vec<MockupLine> {
    let frame = MockupStyle {
        fg: Some(palette.muted),
        bg: Some(palette.shirt),
        bold: false,
    };
    let inner = geo.print - 2;
    let middle = geo.image_rows / 2;

    (0..geo.image_rows)
        .map(|row| {
            let mut line = MockupLine::default();
            if row == 0 {
                line.push(&format!("┌{}┐", "╌".repeat(inner)), frame);
            } else if row == geo.image_rows - 1 {
                line.push(&format!("└{}┘", "╌".repeat(inner)), frame);
            } else {
                line.push("╎", frame);
                if row == middle {
                    line.push(&center_to_width(message, inner), frame);
                } else {
                    line.push(&" ".repeat(inner), fill);
                }
                line.push("╎", frame);
            }
            line
        })
        .collect()
}

fn text_rows(
    text: &str,
    geo: &Geometry,
    palette: &ThemePalette,
    fill: MockupStyle,
) -> Vec<MockupLine> {
    let print = MockupStyle {
        fg: Some(palette.print_text),
        bg: Some(palette.shirt),
        bold: true,
    };
    let wrapped = wrap_lines(text, geo.print, CUSTOM_TEXT_LINES);

    (0..CUSTOM_TEXT_LINES)
        .map(|i| match wrapped.get(i) {
            Some(text) => {
                let mut line = MockupLine::default();
                line.push(&center_to_width(text, geo.print), print);
                line
            }
            None => blank_print_row(geo, fill),
        })
        .collect()
}
