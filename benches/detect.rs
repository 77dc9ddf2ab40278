use card_scan::{detect_cards_gray, DetectionConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A light card on a mid-gray background, the typical flatbed scan layout
fn card_scene(width: usize, height: usize, card_w: usize, card_h: usize) -> Vec<u8> {
    let mut gray = vec![120u8; width * height];
    let x0 = (width - card_w) / 2;
    let y0 = (height - card_h) / 2;
    for y in y0..y0 + card_h {
        for x in x0..x0 + card_w {
            gray[y * width + x] = 235;
        }
    }
    gray
}

fn bench_detect_small(c: &mut Criterion) {
    let gray = card_scene(450, 320, 300, 190);
    let config = DetectionConfig {
        target_aspect_ratio: 1.58,
        aspect_ratio_tolerance: 0.1,
        min_card_area: 20_000,
        max_card_area: 80_000,
    };
    c.bench_function("detect_cards_gray_450x320", |b| {
        b.iter(|| {
            detect_cards_gray(black_box(&gray), black_box(450), black_box(320), &config).unwrap()
        })
    });
}

fn bench_detect_a4_scan(c: &mut Criterion) {
    // quarter-resolution A4 at 300 DPI
    let gray = card_scene(1240, 876, 505, 318);
    let config = DetectionConfig {
        target_aspect_ratio: 1.58,
        aspect_ratio_tolerance: 0.1,
        min_card_area: 100_000,
        max_card_area: 250_000,
    };
    c.bench_function("detect_cards_gray_1240x876", |b| {
        b.iter(|| {
            detect_cards_gray(black_box(&gray), black_box(1240), black_box(876), &config).unwrap()
        })
    });
}

fn bench_detect_blank(c: &mut Criterion) {
    // no card: every sensitivity tier runs
    let gray = vec![128u8; 800 * 800];
    let config = DetectionConfig::default();
    c.bench_function("detect_cards_gray_blank_800x800", |b| {
        b.iter(|| {
            detect_cards_gray(black_box(&gray), black_box(800), black_box(800), &config).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_detect_small,
    bench_detect_a4_scan,
    bench_detect_blank
);
criterion_main!(benches);
