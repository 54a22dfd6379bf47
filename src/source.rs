//! Source images as seen by the engine: intrinsic size plus an opaque,
//! read-only drawable handle.

/// Anything with an intrinsic pixel size.
///
/// This is all the layout calculator needs; decoding is somebody else's job.
pub trait Dimensions {
    /// `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// `width / height`, or `None` when either side is zero.
    fn aspect_ratio(&self) -> Option<f64> {
        match self.dimensions() {
            (0, _) | (_, 0) => None,
            (w, h) => Some(w as f64 / h as f64),
        }
    }
}

/// A decoded image the compositor can sample.
pub trait Drawable: Dimensions {
    /// Straight-alpha RGBA8 pixel at `(x, y)`. Callers stay within
    /// [`dimensions`](Dimensions::dimensions).
    fn pixel(&self, x: u32, y: u32) -> [u8; 4];
}

impl Dimensions for (u32, u32) {
    fn dimensions(&self) -> (u32, u32) {
        *self
    }
}

impl<T: Dimensions + ?Sized> Dimensions for &T {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }
}

impl<T: Drawable + ?Sized> Drawable for &T {
    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        (**self).pixel(x, y)
    }
}

/// Stable identifier assigned by the caller (survives reordering).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

/// One entry of the ordered input sequence.
///
/// `H` is whatever the caller uses to reach the pixels: a decoded buffer for
/// export, or `()` when only geometry is needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage<H = ()> {
    pub id: ImageId,
    pub width: u32,
    pub height: u32,
    pub handle: H,
}

impl<H> SourceImage<H> {
    /// Entry with explicitly known intrinsic size.
    pub fn new(id: ImageId, width: u32, height: u32, handle: H) -> Self {
        Self {
            id,
            width,
            height,
            handle,
        }
    }
}

impl<H: Dimensions> SourceImage<H> {
    /// Entry whose intrinsic size is read from the handle.
    pub fn from_handle(id: ImageId, handle: H) -> Self {
        let (width, height) = handle.dimensions();
        Self {
            id,
            width,
            height,
            handle,
        }
    }
}

impl<H> Dimensions for SourceImage<H> {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl<H: Drawable> Drawable for SourceImage<H> {
    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let (hw, hh) = self.handle.dimensions();
        if (hw, hh) == (self.width, self.height) {
            return self.handle.pixel(x, y);
        }
        // Declared size differs from the decoded buffer: map proportionally.
        let hx = (x as u64 * hw as u64 / self.width.max(1) as u64) as u32;
        let hy = (y as u64 * hh as u64 / self.height.max(1) as u64) as u32;
        self.handle
            .pixel(hx.min(hw.saturating_sub(1)), hy.min(hh.saturating_sub(1)))
    }
}
