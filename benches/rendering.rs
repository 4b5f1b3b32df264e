//! Rendering benchmarks

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, RgbImage};
use teecraft::color_space::Rgb;
use teecraft::render_engines::halfblocks::render_half_blocks;
use teecraft::render_engines::mockup::{render_mockup, MockupInput, PreviewImage};
use teecraft::terminal_capabilities::ColorSupport;
use teecraft::theme::Theme;

fn create_test_image(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbImage::new(width, height);
    for x in 0..width {
        for y in 0..height {
            let r = ((x as f32 / width as f32) * 255.0) as u8;
            let g = ((y as f32 / height as f32) * 255.0) as u8;
            let b = (((x + y) as f32 / (width + height) as f32) * 255.0) as u8;
            img.put_pixel(x, y, image::Rgb([r, g, b]));
        }
    }
    DynamicImage::ImageRgb8(img)
}

fn benchmark_mockup_widths(c: &mut Criterion) {
    let image = PreviewImage::Decoded(Arc::new(create_test_image(800, 600)));

    let mut group = c.benchmark_group("Mockup Rendering");

    for width in [20, 36, 60, 80].iter() {
        group.bench_function(format!("width_{}", width), |b| {
            b.iter(|| {
                render_mockup(black_box(&MockupInput {
                    image: &image,
                    custom_text: "HELLO\nWORLD",
                    theme: Theme::Classic,
                    width: *width,
                    max_height: None,
                }))
            })
        });
    }

    group.finish();
}

fn benchmark_mockup_placeholder(c: &mut Criterion) {
    let image = PreviewImage::Placeholder;

    c.bench_function("mockup_placeholder", |b| {
        b.iter(|| {
            render_mockup(black_box(&MockupInput {
                image: &image,
                custom_text: "",
                theme: Theme::Vibrant,
                width: 36,
                max_height: None,
            }))
        })
    });
}

fn benchmark_half_blocks(c: &mut Criterion) {
    let image = create_test_image(1920, 1080);

    c.bench_function("half_blocks_1080p", |b| {
        b.iter(|| render_half_blocks(black_box(&image), 40, 10, Rgb::new(255, 255, 255)))
    });
}

fn benchmark_ansi_output(c: &mut Criterion) {
    let image = PreviewImage::Decoded(Arc::new(create_test_image(400, 400)));
    let mockup = render_mockup(&MockupInput {
        image: &image,
        custom_text: "TEAM",
        theme: Theme::Dark,
        width: 60,
        max_height: None,
    });

    let mut group = c.benchmark_group("ANSI Output");

    for support in [ColorSupport::TrueColor, ColorSupport::Color256, ColorSupport::Color16] {
        group.bench_function(support.name(), |b| {
            b.iter(|| black_box(&mockup).to_ansi(support))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_mockup_widths,
    benchmark_mockup_placeholder,
    benchmark_half_blocks,
    benchmark_ansi_output,
);

criterion_main!(benches);
