//! Grid layout computation.
//!
//! Turns an ordered list of image dimensions plus [`Settings`] into cell
//! rectangles and a total canvas size. Pure and deterministic: identical
//! inputs produce bit-identical layouts.
//!
//! Two strategies exist. The uniform family ([`FitMode::Average`],
//! [`Portrait`](FitMode::Portrait), [`Landscape`](FitMode::Landscape),
//! [`MaxDimensions`](FitMode::MaxDimensions)) derives one target aspect ratio
//! from the whole set and gives every cell the same size. [`FitMode::Original`]
//! is a shelf packer: each cell keeps its image's own ratio.
//!
//! # Example
//!
//! ```
//! use zengrid::{FitMode, Settings, compute_layout};
//!
//! let images = [(100u32, 100u32), (100, 100), (100, 100)];
//! let settings = Settings::width_col(1200.0, 3).gap(0.0).fit_mode(FitMode::Average);
//! let layout = compute_layout(&images, &settings).unwrap();
//!
//! assert_eq!(layout.total_height, 400.0);
//! assert_eq!(layout.cells[2].x, 800.0);
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::settings::{FitMode, GridMode, Settings};
use crate::source::Dimensions;

/// Overlap tolerance for floating-point cell edges.
const EDGE_EPSILON: f64 = 1e-9;

/// Distance from an integer below which a canvas total counts as that integer.
const PIXEL_SNAP: f64 = 1e-6;

/// One grid slot: its rectangle and the input image assigned to it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Position of the image in the input slice.
    pub index: usize,
    /// `width / height` of the source image.
    pub img_ratio: f64,
    /// `width / height` of this cell (0 for a collapsed cell).
    pub cell_ratio: f64,
}

impl Cell {
    fn new(x: f64, y: f64, width: f64, height: f64, index: usize, img_ratio: f64) -> Self {
        let cell_ratio = if height > 0.0 { width / height } else { 0.0 };
        Self {
            x,
            y,
            width,
            height,
            index,
            img_ratio,
            cell_ratio,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `(x, y)` lies inside (left/top edges inclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    fn overlaps(&self, other: &Cell) -> bool {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        w > EDGE_EPSILON && h > EDGE_EPSILON
    }
}

/// Computed composition: canvas size plus cells in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub total_width: f64,
    pub total_height: f64,
    pub cells: Vec<Cell>,
}

impl Layout {
    /// The zero layout produced for an empty image list.
    pub const fn empty() -> Self {
        Self {
            total_width: 0.0,
            total_height: 0.0,
            cells: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raster size for export. Fractional totals are truncated, matching how
    /// a canvas element sizes itself; totals a rounding error away from an
    /// integer snap to it.
    pub fn pixel_size(&self) -> (u32, u32) {
        (to_pixels(self.total_width), to_pixels(self.total_height))
    }

    /// Cell under the point `(x, y)`, for hit testing a preview surface.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<&Cell> {
        self.cells.iter().find(|c| c.contains(x, y))
    }

    /// Whether any two cells share positive area. Never true for a layout
    /// produced by [`compute_layout`].
    pub fn has_overlapping_cells(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .any(|(i, a)| self.cells[i + 1..].iter().any(|b| a.overlaps(b)))
    }
}

/// Truncate toward zero, snapping values within `PIXEL_SNAP` of an integer
/// first so accumulated float error cannot drop a whole pixel row.
fn to_pixels(v: f64) -> u32 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    let nearest = v.round();
    let v = if (v - nearest).abs() < PIXEL_SNAP { nearest } else { v };
    v.trunc().min(u32::MAX as f64) as u32
}

/// Layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// An image has a zero side, so its aspect ratio is undefined.
    #[error("image {index} has invalid dimensions {width}x{height}")]
    InvalidImageDimensions { index: usize, width: u32, height: u32 },
}

/// Rows × columns of the grid for a given image count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    /// Shape for `count` images. The fixed count comes from the settings
    /// (clamped to 1), the other is `ceil(count / fixed)`.
    pub fn new(count: usize, settings: &Settings) -> Self {
        let fixed = settings.fixed_count();
        let other = count.div_ceil(fixed);
        match settings.mode {
            GridMode::WidthCol => Self {
                rows: other,
                cols: fixed,
            },
            GridMode::HeightRow => Self {
                rows: fixed,
                cols: other,
            },
        }
    }
}

/// How cells are sized.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Strategy {
    /// Every cell shares the size derived from `target_ratio`.
    Uniform { target_ratio: f64 },
    /// Shelf packing: each cell keeps its own image's ratio.
    Shelf,
}

impl Strategy {
    /// Pick the strategy for `fit_mode` over a non-empty set of ratios.
    ///
    /// `sizes` and `ratios` are parallel; both must be non-empty.
    fn select(fit_mode: FitMode, sizes: &[(u32, u32)], ratios: &[f64]) -> Self {
        let target_ratio = match fit_mode {
            FitMode::Original => return Self::Shelf,
            FitMode::Average => ratios.iter().sum::<f64>() / ratios.len() as f64,
            FitMode::Portrait => ratios.iter().copied().fold(f64::INFINITY, f64::min),
            FitMode::Landscape => ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            FitMode::MaxDimensions => {
                let max_w = sizes.iter().map(|s| s.0).max().unwrap_or(1);
                let max_h = sizes.iter().map(|s| s.1).max().unwrap_or(1);
                max_w as f64 / max_h as f64
            }
        };
        Self::Uniform { target_ratio }
    }
}

/// Target aspect ratio the uniform strategies would use for these images,
/// or `None` for [`FitMode::Original`] and for an empty set.
pub fn target_ratio<I: Dimensions>(
    images: &[I],
    fit_mode: FitMode,
) -> Result<Option<f64>, GridError> {
    let (sizes, ratios) = measure(images)?;
    if sizes.is_empty() {
        return Ok(None);
    }
    Ok(match Strategy::select(fit_mode, &sizes, &ratios) {
        Strategy::Uniform { target_ratio } => Some(target_ratio),
        Strategy::Shelf => None,
    })
}

/// Compute the layout of `images` under `settings`.
///
/// Returns [`GridError::InvalidImageDimensions`] for an image with a zero
/// side. An empty slice yields [`Layout::empty`].
pub fn compute_layout<I: Dimensions>(
    images: &[I],
    settings: &Settings,
) -> Result<Layout, GridError> {
    let (sizes, ratios) = measure(images)?;
    if sizes.is_empty() {
        return Ok(Layout::empty());
    }

    let raw_count = match settings.mode {
        GridMode::WidthCol => settings.cols,
        GridMode::HeightRow => settings.rows,
    };
    if raw_count < 1 {
        log::warn!(
            "{} count {raw_count} clamped to 1",
            match settings.mode {
                GridMode::WidthCol => "column",
                GridMode::HeightRow => "row",
            }
        );
    }

    let shape = GridShape::new(sizes.len(), settings);
    let strategy = Strategy::select(settings.fit_mode, &sizes, &ratios);
    let layout = match strategy {
        Strategy::Uniform { target_ratio } => uniform(&ratios, shape, target_ratio, settings),
        Strategy::Shelf => shelf(&ratios, shape, settings),
    };

    log::debug!(
        "grid {}x{} ({:?}, {:?}) for {} images -> {}x{}",
        shape.cols,
        shape.rows,
        settings.mode,
        strategy,
        sizes.len(),
        layout.total_width,
        layout.total_height
    );
    debug_assert!(!layout.has_overlapping_cells());
    Ok(layout)
}

/// Validate dimensions and collect sizes and ratios in input order.
#[allow(clippy::type_complexity)]
fn measure<I: Dimensions>(images: &[I]) -> Result<(Vec<(u32, u32)>, Vec<f64>), GridError> {
    let mut sizes = Vec::with_capacity(images.len());
    let mut ratios = Vec::with_capacity(images.len());
    for (index, img) in images.iter().enumerate() {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(GridError::InvalidImageDimensions {
                index,
                width,
                height,
            });
        }
        sizes.push((width, height));
        ratios.push(width as f64 / height as f64);
    }
    Ok((sizes, ratios))
}

/// Size of one slot along the fixed axis: `(extent - (n-1)*gap) / n`, never negative.
fn slot(extent: f64, n: usize, gap: f64) -> f64 {
    let n = n.max(1) as f64;
    ((extent - (n - 1.0) * gap) / n).max(0.0)
}

/// `n` slots of `size` separated by `gap`.
fn span(n: usize, size: f64, gap: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    n as f64 * size + (n as f64 - 1.0) * gap
}

fn uniform(ratios: &[f64], shape: GridShape, target_ratio: f64, settings: &Settings) -> Layout {
    let gap = settings.gap;
    let (cell_w, cell_h, total_w, total_h) = match settings.mode {
        GridMode::WidthCol => {
            let w = slot(settings.width, shape.cols, gap);
            let h = w / target_ratio;
            (w, h, settings.width, span(shape.rows, h, gap))
        }
        GridMode::HeightRow => {
            let h = slot(settings.height, shape.rows, gap);
            let w = h * target_ratio;
            (w, h, span(shape.cols, w, gap), settings.height)
        }
    };

    let cells = ratios
        .iter()
        .enumerate()
        .map(|(i, &ratio)| {
            let row = i / shape.cols;
            let col = i % shape.cols;
            Cell::new(
                col as f64 * (cell_w + gap),
                row as f64 * (cell_h + gap),
                cell_w,
                cell_h,
                i,
                ratio,
            )
        })
        .collect();

    Layout {
        total_width: total_w,
        total_height: total_h,
        cells,
    }
}

fn shelf(ratios: &[f64], shape: GridShape, settings: &Settings) -> Layout {
    let gap = settings.gap;
    let mut cells = Vec::with_capacity(ratios.len());

    match settings.mode {
        GridMode::WidthCol => {
            // Uniform columns, rows as tall as their tallest image.
            let cell_w = slot(settings.width, shape.cols, gap);
            let mut top = 0.0;
            for (row, chunk) in ratios.chunks(shape.cols).enumerate() {
                if row > 0 {
                    top += gap;
                }
                let row_h = chunk.iter().map(|r| cell_w / r).fold(0.0, f64::max);
                for (col, &ratio) in chunk.iter().enumerate() {
                    let h = cell_w / ratio;
                    cells.push(Cell::new(
                        col as f64 * (cell_w + gap),
                        top + (row_h - h) / 2.0,
                        cell_w,
                        h,
                        row * shape.cols + col,
                        ratio,
                    ));
                }
                top += row_h;
            }
            Layout {
                total_width: settings.width,
                total_height: top,
                cells,
            }
        }
        GridMode::HeightRow => {
            // Uniform row height, images packed left to right.
            let cell_h = slot(settings.height, shape.rows, gap);
            let mut widest: f64 = 0.0;
            for (row, chunk) in ratios.chunks(shape.cols).enumerate() {
                let y = row as f64 * (cell_h + gap);
                let mut x = 0.0;
                for (col, &ratio) in chunk.iter().enumerate() {
                    if col > 0 {
                        x += gap;
                    }
                    let w = cell_h * ratio;
                    cells.push(Cell::new(x, y, w, cell_h, row * shape.cols + col, ratio));
                    x += w;
                }
                widest = widest.max(x);
            }
            Layout {
                total_width: widest,
                total_height: settings.height,
                cells,
            }
        }
    }
}

/// Move the item at `from` to `to`, shifting the items in between.
///
/// Used to reorder the input sequence before relayout; out-of-range indices leave the
/// slice untouched.
pub fn reorder<T>(items: &mut [T], from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
}
