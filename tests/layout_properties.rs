//! Structural properties of computed layouts, swept across modes, counts,
//! gaps and image mixes.

use zengrid::*;

const EPS: f64 = 1e-9;

const FIT_MODES: [FitMode; 5] = [
    FitMode::Average,
    FitMode::Portrait,
    FitMode::Landscape,
    FitMode::MaxDimensions,
    FitMode::Original,
];

/// Deterministic pseudo-random image sizes.
fn sizes(n: usize, seed: u32) -> Vec<(u32, u32)> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (1 + state % 2000, 1 + (state >> 11) % 2000)
        })
        .collect()
}

fn settings_grid() -> Vec<Settings> {
    let mut out = Vec::new();
    for fit_mode in FIT_MODES {
        for count in [-1, 0, 1, 2, 3, 5] {
            for gap in [0.0, 4.0, 17.5] {
                out.push(Settings::width_col(1000.0, count).gap(gap).fit_mode(fit_mode));
                out.push(Settings::height_row(600.0, count).gap(gap).fit_mode(fit_mode));
            }
        }
    }
    out
}

fn check(images: &[(u32, u32)], s: &Settings) {
    let layout = compute_layout(images, s).unwrap();
    let ctx = format!("{:?} {:?} n={}", s.mode, s.fit_mode, images.len());

    assert_eq!(layout.cells.len(), images.len(), "{ctx}");
    assert!(!layout.has_overlapping_cells(), "{ctx}");

    match s.mode {
        GridMode::WidthCol => assert_eq!(layout.total_width, s.width, "{ctx}"),
        GridMode::HeightRow => assert_eq!(layout.total_height, s.height, "{ctx}"),
    }

    for (i, cell) in layout.cells.iter().enumerate() {
        assert_eq!(cell.index, i, "{ctx}");
        assert!(cell.width >= 0.0 && cell.height >= 0.0, "{ctx} cell {i}");
        assert!(cell.x >= -EPS && cell.y >= -EPS, "{ctx} cell {i}");
        assert!(cell.right() <= layout.total_width + EPS, "{ctx} cell {i}");
        assert!(cell.bottom() <= layout.total_height + EPS, "{ctx} cell {i}");

        let (w, h) = images[i];
        assert_eq!(cell.img_ratio, w as f64 / h as f64, "{ctx} cell {i}");
        if s.fit_mode == FitMode::Original && cell.height > 0.0 {
            let drift = (cell.width / cell.height - cell.img_ratio).abs();
            assert!(drift < 1e-9 * cell.img_ratio.max(1.0), "{ctx} cell {i}");
        }
    }

    // Row-major reading order: each cell starts on the same row to the right
    // of its predecessor, or on a lower row.
    if s.fit_mode != FitMode::Original || s.mode == GridMode::HeightRow {
        for pair in layout.cells.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let same_row = (a.y - b.y).abs() < EPS;
            assert!(
                (same_row && b.x > a.x) || b.y > a.y,
                "{ctx}: {a:?} then {b:?}"
            );
        }
    }

    assert_eq!(compute_layout(images, s).unwrap(), layout, "{ctx}");
}

#[test]
fn invariants_hold_across_settings() {
    for s in settings_grid() {
        for n in [1, 2, 3, 4, 7, 12] {
            check(&sizes(n, n as u32 * 31 + 7), &s);
        }
    }
}

#[test]
fn uniform_modes_give_equal_cells() {
    let images = sizes(9, 3);
    for fit_mode in [
        FitMode::Average,
        FitMode::Portrait,
        FitMode::Landscape,
        FitMode::MaxDimensions,
    ] {
        let layout = compute_layout(&images, &Settings::width_col(900.0, 4).fit_mode(fit_mode)).unwrap();
        let first = layout.cells[0];
        for c in &layout.cells {
            assert_eq!((c.width, c.height), (first.width, first.height), "{fit_mode}");
        }
    }
}

#[test]
fn shape_covers_every_image() {
    for n in 0..40 {
        for count in [-3, 0, 1, 2, 5, 8] {
            for s in [Settings::width_col(100.0, count), Settings::height_row(100.0, count)] {
                let shape = GridShape::new(n, &s);
                assert!(shape.rows * shape.cols >= n, "n={n} count={count}");
            }
        }
    }
}

#[test]
fn invalid_dimensions_are_rejected() {
    let images = [(10u32, 10u32), (5, 0), (0, 5)];
    for s in settings_grid() {
        assert_eq!(
            compute_layout(&images, &s),
            Err(GridError::InvalidImageDimensions {
                index: 1,
                width: 5,
                height: 0
            })
        );
    }
}

#[test]
fn pixel_size_never_exceeds_totals() {
    for s in settings_grid() {
        let layout = compute_layout(&sizes(5, 11), &s).unwrap();
        let (w, h) = layout.pixel_size();
        assert!(w as f64 <= layout.total_width + 1e-6);
        assert!(h as f64 <= layout.total_height + 1e-6);
        assert!(layout.total_width - (w as f64) < 1.0);
        assert!(layout.total_height - (h as f64) < 1.0);
    }
}
