//! Fit and anchor resolution for a single image inside a single cell.
//!
//! Pure geometry in `f64` with no pixel operations and no allocations. The same
//! [`resolve_placement`] result drives both on-screen preview placement and
//! the compositor, so preview and export agree pixel for pixel.
//!
//! # Example
//!
//! ```
//! use zengrid::{Anchor, FitStrategy, resolve_anchor_offset, resolve_render_size};
//!
//! // A 2:1 image covering a square cell overflows horizontally.
//! let (w, h) = resolve_render_size(100.0, 100.0, 2.0, FitStrategy::Cover);
//! assert_eq!((w, h), (200.0, 100.0));
//!
//! // Anchoring right shifts the crop window to the image's right edge.
//! let (dx, dy) = resolve_anchor_offset(100.0, 100.0, w, h, Anchor::CenterRight);
//! assert_eq!((dx, dy), (-100.0, 0.0));
//! ```

use core::fmt;
use core::str::FromStr;

use crate::layout::Cell;
use crate::settings::{FitMode, ParseError};

/// How an image is scaled into a cell whose aspect ratio differs from its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FitStrategy {
    /// Scale to fill the cell; the overflowing axis is clipped.
    Cover,
    /// Scale to fit entirely inside the cell; the short axis is letterboxed.
    Contain,
}

/// 9-point reference used to align an over- or under-sized image in its cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// All anchors in reading order.
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// Normalized `(x, y)` factors. `(0.0, 0.0)` = top-left, `(1.0, 1.0)` = bottom-right.
    pub const fn factors(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::CenterLeft => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::CenterRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// Hyphenated token, e.g. `"top-left"` or `"center"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::CenterLeft => "center-left",
            Self::Center => "center",
            Self::CenterRight => "center-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    fn from_factors(x: Axis, y: Axis) -> Self {
        match (y, x) {
            (Axis::Near, Axis::Near) => Self::TopLeft,
            (Axis::Near, Axis::Middle) => Self::TopCenter,
            (Axis::Near, Axis::Far) => Self::TopRight,
            (Axis::Middle, Axis::Near) => Self::CenterLeft,
            (Axis::Middle, Axis::Middle) => Self::Center,
            (Axis::Middle, Axis::Far) => Self::CenterRight,
            (Axis::Far, Axis::Near) => Self::BottomLeft,
            (Axis::Far, Axis::Middle) => Self::BottomCenter,
            (Axis::Far, Axis::Far) => Self::BottomRight,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Axis {
    Near,
    Middle,
    Far,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = ParseError;

    /// Accepts hyphen-, underscore- or space-separated tokens in any order:
    /// `top-left`, `left_top`, `bottom`, `center-right`, `middle`, `topleft`.
    /// An axis that is not mentioned defaults to the middle.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let compact = match lower.as_str() {
            "topleft" => "top-left",
            "topcenter" => "top-center",
            "topright" => "top-right",
            "centerleft" | "middleleft" => "center-left",
            "centerright" | "middleright" => "center-right",
            "bottomleft" => "bottom-left",
            "bottomcenter" => "bottom-center",
            "bottomright" => "bottom-right",
            "middlecenter" => "center",
            other => other,
        };

        let mut x = None;
        let mut y = None;
        let mut seen_any = false;
        for token in compact.split(['-', '_', ' ']).filter(|t| !t.is_empty()) {
            seen_any = true;
            match token {
                "top" => y = Some(Axis::Near),
                "bottom" => y = Some(Axis::Far),
                "left" => x = Some(Axis::Near),
                "right" => x = Some(Axis::Far),
                "center" | "centre" | "middle" => {}
                _ => return Err(ParseError::new("anchor", s)),
            }
        }
        if !seen_any {
            return Err(ParseError::new("anchor", s));
        }
        Ok(Self::from_factors(
            x.unwrap_or(Axis::Middle),
            y.unwrap_or(Axis::Middle),
        ))
    }
}

/// Size of the image once scaled into a `cell_w × cell_h` box.
///
/// `img_ratio` is `width / height` of the source. The comparison is against
/// the cell's own ratio: under [`FitStrategy::Cover`] a relatively wider image
/// is matched on height (and overflows horizontally), otherwise on width;
/// [`FitStrategy::Contain`] inverts the choice so nothing overflows.
pub fn resolve_render_size(
    cell_w: f64,
    cell_h: f64,
    img_ratio: f64,
    strategy: FitStrategy,
) -> (f64, f64) {
    let cell_ratio = cell_w / cell_h;
    let wider = img_ratio > cell_ratio;
    let (w, h) = match (strategy, wider) {
        (FitStrategy::Cover, true) | (FitStrategy::Contain, false) => {
            (cell_h * img_ratio, cell_h)
        }
        (FitStrategy::Cover, false) | (FitStrategy::Contain, true) => {
            (cell_w, cell_w / img_ratio)
        }
    };
    // Ratios within an ulp of each other can land a hair on the wrong side of the cell.
    match strategy {
        FitStrategy::Cover => (w.max(cell_w), h.max(cell_h)),
        FitStrategy::Contain => (w.min(cell_w), h.min(cell_h)),
    }
}

/// Offset of the rendered image's top-left corner relative to the cell origin.
///
/// Signed: negative when the rendered image is larger than the cell (the crop
/// window slides toward the anchor), non-negative when it is smaller.
pub fn resolve_anchor_offset(
    cell_w: f64,
    cell_h: f64,
    render_w: f64,
    render_h: f64,
    anchor: Anchor,
) -> (f64, f64) {
    let (ax, ay) = anchor.factors();
    ((cell_w - render_w) * ax, (cell_h - render_h) * ay)
}

/// Axis-aligned rectangle in canvas coordinates (fractional pixels).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Intersection, or `None` when the rects do not share positive area.
    pub fn intersect(&self, other: &RectF) -> Option<RectF> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        if r > x && b > y {
            Some(RectF::new(x, y, r - x, b - y))
        } else {
            None
        }
    }
}

/// Where one image lands in the composite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Cell rectangle. Drawing is clipped to it.
    pub clip: RectF,
    /// Full rendered image rectangle; may extend past `clip` under cover fit.
    pub image: RectF,
}

impl Placement {
    /// Visible part of the image: `image ∩ clip`.
    pub fn visible(&self) -> Option<RectF> {
        self.image.intersect(&self.clip)
    }
}

/// Resolve the placement of `cell`'s image for the given fit mode and anchor.
///
/// Under [`FitMode::Original`] the cell already carries the image's own
/// aspect ratio, so the image fills it exactly and the anchor is ignored.
pub fn resolve_placement(cell: &Cell, fit_mode: FitMode, anchor: Anchor) -> Placement {
    let clip = RectF::new(cell.x, cell.y, cell.width, cell.height);
    if fit_mode == FitMode::Original {
        return Placement { clip, image: clip };
    }
    let (rw, rh) = resolve_render_size(
        cell.width,
        cell.height,
        cell.img_ratio,
        fit_mode.fit_strategy(),
    );
    let (dx, dy) = resolve_anchor_offset(cell.width, cell.height, rw, rh, anchor);
    Placement {
        clip,
        image: RectF::new(cell.x + dx, cell.y + dy, rw, rh),
    }
}
