//! Half-block image rendering
//!
//! Scales an image into a grid of character cells where every cell shows two
//! vertically stacked pixels through the upper half block (`▀`).

use image::{imageops::FilterType, DynamicImage, GenericImageView};

use crate::color_space::Rgb;

/// Symbol drawn for every image cell
pub const HALF_BLOCK: char = '▀';

/// Pixels with less opacity than this show the backdrop instead
const ALPHA_THRESHOLD: u8 = 128;

/// One character cell: top pixel as foreground, bottom pixel as background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfBlockCell {
    pub top: Rgb,
    pub bottom: Rgb,
}

/// Largest (columns, rows) grid that fits `max_cols` x `max_rows` and keeps the
/// image's aspect ratio. A character cell is treated as twice as tall as wide.
pub fn fit_dimensions(image: &DynamicImage, max_cols: usize, max_rows: usize) -> (usize, usize) {
    let (img_width, img_height) = image.dimensions();
    if img_width == 0 || img_height == 0 || max_cols == 0 || max_rows == 0 {
        return (max_cols.max(1), max_rows.max(1));
    }
    let aspect_ratio = img_width as f32 / img_height as f32;

    // Each row holds two pixels, so pixel rows == 2 * rows
    let mut cols = max_cols;
    let mut rows = ((cols as f32 / aspect_ratio) / 2.0).round() as usize;

    if rows > max_rows {
        rows = max_rows;
        cols = ((rows as f32 * 2.0) * aspect_ratio).round() as usize;
    }

    (cols.clamp(1, max_cols), rows.clamp(1, max_rows))
}

/// Render an image into exactly `cols` x `rows` half-block cells.
pub fn render_half_blocks(
    image: &DynamicImage,
    cols: usize,
    rows: usize,
    backdrop: Rgb,
) -> Vec<Vec<HalfBlockCell>> {
    let pixel_rows = rows * 2;
    let resized = image
        .resize_exact(cols as u32, pixel_rows as u32, FilterType::Triangle)
        .to_rgba8();

    let pixel = |x: usize, y: usize| -> Rgb {
        let p = resized.get_pixel(x as u32, y as u32);
        if p[3] < ALPHA_THRESHOLD {
            backdrop
        } else {
            Rgb::new(p[0], p[1], p[2])
        }
    };

    (0..pixel_rows)
        .step_by(2)
        .map(|y| {
            (0..cols)
                .map(|x| HalfBlockCell {
                    top: pixel(x, y),
                    bottom: pixel(x, y + 1),
                })
                .collect()
        })
        .collect()
}
