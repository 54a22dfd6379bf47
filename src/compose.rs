//! Rasterization of a computed [`Layout`] into an RGBA8 composite.
//!
//! The compositor replays the exact placement decisions used for preview
//! ([`resolve_placement`]) against full-resolution pixels. Sampling is
//! nearest-neighbour at pixel centres and blending is straight-alpha
//! source-over, so output depends only on the inputs: rendering twice gives
//! byte-identical rasters.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::color::CanvasColor;
use crate::fit::{RectF, resolve_placement};
use crate::layout::Layout;
use crate::settings::Settings;
use crate::source::{Dimensions, Drawable};

/// Side length of the stand-in image a loader substitutes on decode failure.
pub const PLACEHOLDER_SIZE: u32 = 100;

/// Owned RGBA8 pixel buffer, row-major, straight alpha.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, CanvasColor::Transparent)
    }

    /// Raster with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: CanvasColor) -> Self {
        let px = color.to_rgba();
        let len = width as usize * height as usize;
        let mut data = vec![0u8; len * 4];
        for chunk in data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// The [`PLACEHOLDER_SIZE`] square substituted for an undecodable image.
    pub fn placeholder(color: CanvasColor) -> Self {
        Self::filled(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, color)
    }

    /// Wrap existing RGBA8 bytes. Returns `None` when the length does not
    /// match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == width as usize * height as usize * 4).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, ready for an encoder.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({x},{y}) out of bounds {}x{}",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite the pixel at `(x, y)`. Panics when out of bounds.
    pub fn put_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Composite `src` over the pixel at `(x, y)`.
    fn blend_pixel(&mut self, x: u32, y: u32, src: [u8; 4]) {
        match src[3] {
            0 => {}
            255 => self.put_pixel(x, y, src),
            _ => {
                let dst = self.get_pixel(x, y);
                self.put_pixel(x, y, over(src, dst));
            }
        }
    }
}

impl Dimensions for Raster {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drawable for Raster {
    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y)
    }
}

/// Straight-alpha source-over.
fn over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let v = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

/// Half-open pixel index range whose centres fall in `[start, end)`, clamped to `0..limit`.
fn pixel_span(start: f64, end: f64, limit: u32) -> core::ops::Range<u32> {
    let lo = (start - 0.5).ceil().max(0.0);
    let hi = (end - 0.5).ceil().min(limit as f64);
    if hi.is_nan() || lo.is_nan() || hi <= lo {
        return 0..0;
    }
    lo as u32..hi as u32
}

/// Render `layout` with pixels from `images` onto a canvas of
/// [`Layout::pixel_size`].
///
/// The canvas is filled with `settings.background`; each cell's image is then
/// drawn at its [`resolve_placement`] rectangle, clipped to the cell. A pixel
/// belongs to a cell when its centre lies inside the cell rectangle.
///
/// # Panics
///
/// When a cell references an index outside `images`. Every image named by the
/// layout must be decoded and present; a loader substitutes
/// [`Raster::placeholder`] on decode failure.
pub fn render<D: Drawable>(layout: &Layout, images: &[D], settings: &Settings) -> Raster {
    let (width, height) = layout.pixel_size();
    let mut canvas = Raster::filled(width, height, settings.background);
    debug_assert!(!layout.has_overlapping_cells());

    for cell in &layout.cells {
        let img = images.get(cell.index).unwrap_or_else(|| {
            panic!(
                "cell references image {} but only {} were supplied",
                cell.index,
                images.len()
            )
        });
        let placement = resolve_placement(cell, settings.fit_mode, settings.anchor);
        log::trace!("cell {} -> {:?}", cell.index, placement);
        draw_clipped(&mut canvas, img, &placement.image, &placement.clip);
    }

    log::debug!(
        "rendered {} cells onto {}x{} canvas",
        layout.cells.len(),
        width,
        height
    );
    canvas
}

/// Draw `img` scaled to `dest`, touching only pixels whose centres are in `clip ∩ dest`.
fn draw_clipped<D: Drawable>(canvas: &mut Raster, img: &D, dest: &RectF, clip: &RectF) {
    let (sw, sh) = img.dimensions();
    if sw == 0 || sh == 0 || dest.width <= 0.0 || dest.height <= 0.0 {
        return;
    }
    let Some(area) = dest.intersect(clip) else {
        return;
    };
    let xs = pixel_span(area.x, area.right(), canvas.width);
    let ys = pixel_span(area.y, area.bottom(), canvas.height);
    let scale_x = sw as f64 / dest.width;
    let scale_y = sh as f64 / dest.height;

    for py in ys {
        let sy = ((py as f64 + 0.5 - dest.y) * scale_y).floor();
        if sy < 0.0 {
            continue;
        }
        let sy = (sy as u32).min(sh - 1);
        for px in xs.clone() {
            let sx = ((px as f64 + 0.5 - dest.x) * scale_x).floor();
            if sx < 0.0 {
                continue;
            }
            let sx = (sx as u32).min(sw - 1);
            canvas.blend_pixel(px, py, img.pixel(sx, sy));
        }
    }
}
