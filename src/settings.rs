//! Grid settings: the immutable value object every layout is computed from.
//!
//! # Example
//!
//! ```
//! use zengrid::{Anchor, CanvasColor, FitMode, GridMode, Settings};
//!
//! let settings = Settings::width_col(1200.0, 3)
//!     .gap(8.0)
//!     .fit_mode(FitMode::Portrait)
//!     .anchor(Anchor::TopCenter)
//!     .background(CanvasColor::black());
//!
//! assert_eq!(settings.mode, GridMode::WidthCol);
//! assert_eq!(settings.fixed_count(), 3);
//! ```

#[cfg(not(feature = "std"))]
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::color::CanvasColor;
use crate::fit::{Anchor, FitStrategy};

/// Which total dimension and which count are held fixed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GridMode {
    /// Fixed total width and column count; height grows with the rows.
    #[default]
    WidthCol,
    /// Fixed total height and row count; width grows with the columns.
    HeightRow,
}

impl GridMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WidthCol => "width_col",
            Self::HeightRow => "height_row",
        }
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "width_col" | "widthcol" | "width" | "cols" => Ok(Self::WidthCol),
            "height_row" | "heightrow" | "height" | "rows" => Ok(Self::HeightRow),
            _ => Err(ParseError::new("grid mode", s)),
        }
    }
}

/// Strategy for choosing the per-cell aspect ratio.
///
/// The first four share one target ratio across the grid. [`Original`](Self::Original)
/// abandons the uniform grid and keeps every image's own ratio.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitMode {
    /// Mean of all image ratios.
    #[default]
    Average,
    /// Smallest ratio (the tallest image decides).
    Portrait,
    /// Largest ratio (the widest image decides).
    Landscape,
    /// `max(width) / max(height)` over the set, letterboxed with contain fit.
    ///
    /// The maxima may come from different images, so the target ratio can
    /// belong to no real image.
    MaxDimensions,
    /// Ragged shelf layout, no cropping.
    Original,
}

impl FitMode {
    /// Whether every cell shares one size.
    pub const fn is_uniform(self) -> bool {
        !matches!(self, Self::Original)
    }

    /// Fit strategy used when drawing into a cell.
    pub const fn fit_strategy(self) -> FitStrategy {
        match self {
            Self::MaxDimensions | Self::Original => FitStrategy::Contain,
            Self::Average | Self::Portrait | Self::Landscape => FitStrategy::Cover,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::MaxDimensions => "max_dimensions",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" | "avg" => Ok(Self::Average),
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            "max_dimensions" | "maxdimensions" | "max" => Ok(Self::MaxDimensions),
            "original" | "ragged" => Ok(Self::Original),
            _ => Err(ParseError::new("fit mode", s)),
        }
    }
}

/// A token that does not name any variant of the target type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind}: {value:?}")]
pub struct ParseError {
    kind: &'static str,
    value: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: String::from(value),
        }
    }

    /// What was being parsed (`"anchor"`, `"fit mode"`, ...).
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Layout settings for one composition.
///
/// Only the fields relevant to [`mode`](Self::mode) are read: `width`/`cols`
/// in [`GridMode::WidthCol`], `height`/`rows` in [`GridMode::HeightRow`].
/// Counts `≤ 0` are clamped to 1 at layout time rather than rejected.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Settings {
    pub mode: GridMode,
    /// Fixed total width in `WidthCol` mode.
    pub width: f64,
    /// Fixed total height in `HeightRow` mode.
    pub height: f64,
    /// Column count in `WidthCol` mode.
    pub cols: i32,
    /// Row count in `HeightRow` mode.
    pub rows: i32,
    /// Spacing between cells on both axes.
    pub gap: f64,
    pub background: CanvasColor,
    pub fit_mode: FitMode,
    /// Crop/letterbox anchor. Ignored under [`FitMode::Original`].
    pub anchor: Anchor,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GridMode::WidthCol,
            width: 1920.0,
            height: 1080.0,
            cols: 3,
            rows: 2,
            gap: 10.0,
            background: CanvasColor::white(),
            fit_mode: FitMode::Average,
            anchor: Anchor::Center,
        }
    }
}

impl Settings {
    /// Fixed total width, fixed column count. Other fields take their defaults.
    pub fn width_col(width: f64, cols: i32) -> Self {
        Self {
            mode: GridMode::WidthCol,
            width,
            cols,
            ..Self::default()
        }
    }

    /// Fixed total height, fixed row count. Other fields take their defaults.
    pub fn height_row(height: f64, rows: i32) -> Self {
        Self {
            mode: GridMode::HeightRow,
            height,
            rows,
            ..Self::default()
        }
    }

    /// Set the gap between cells.
    pub fn gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the background fill.
    pub fn background(mut self, color: CanvasColor) -> Self {
        self.background = color;
        self
    }

    /// Set the aspect ratio strategy.
    pub fn fit_mode(mut self, fit_mode: FitMode) -> Self {
        self.fit_mode = fit_mode;
        self
    }

    /// Set the crop anchor.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// The count held fixed by the active mode, clamped to at least 1.
    pub fn fixed_count(&self) -> usize {
        let raw = match self.mode {
            GridMode::WidthCol => self.cols,
            GridMode::HeightRow => self.rows,
        };
        raw.max(1) as usize
    }

    /// The total dimension held fixed by the active mode.
    pub fn fixed_extent(&self) -> f64 {
        match self.mode {
            GridMode::WidthCol => self.width,
            GridMode::HeightRow => self.height,
        }
    }
}
