//! Grid composition of many images into one raster.
//!
//! Layout and fit resolution are pure geometry. The compositor is the only
//! part that touches pixels, and it replays the same placement decisions a
//! live preview uses, so preview and export agree.
//!
//! # Modules
//!
//! - [`layout`]: grid shape, target aspect ratio, uniform and shelf strategies
//! - [`fit`]: cover/contain sizing and 9-point anchor offsets
//! - [`compose`]: RGBA8 raster and the compositor
//! - [`settings`]: the settings value object and its enums
//! - [`source`]: `Dimensions`/`Drawable` traits and `SourceImage`
//! - `query`: settings from a URL query string (feature `query`)
//! - `svg`: layout preview as an SVG document (feature `svg`)
//!
//! # Example
//!
//! ```
//! use zengrid::{CanvasColor, FitMode, Raster, Settings, compute_layout, render};
//!
//! let images = vec![
//!     Raster::filled(400, 300, CanvasColor::rgb(200, 40, 40)),
//!     Raster::filled(300, 400, CanvasColor::rgb(40, 40, 200)),
//! ];
//! let settings = Settings::width_col(800.0, 2).gap(0.0).fit_mode(FitMode::Landscape);
//!
//! let layout = compute_layout(&images, &settings).unwrap();
//! let raster = render(&layout, &images, &settings);
//! assert_eq!((raster.width(), raster.height()), (800, 300));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod color;
pub mod compose;
pub mod fit;
pub mod layout;
pub mod settings;
pub mod source;

#[cfg(feature = "image")]
mod image_interop;
#[cfg(feature = "query")]
pub mod query;
#[cfg(feature = "svg")]
pub mod svg;

pub use color::CanvasColor;
pub use compose::{PLACEHOLDER_SIZE, Raster, render};
pub use fit::{
    Anchor, FitStrategy, Placement, RectF, resolve_anchor_offset, resolve_placement,
    resolve_render_size,
};
pub use layout::{Cell, GridError, GridShape, Layout, compute_layout, reorder, target_ratio};
pub use settings::{FitMode, GridMode, ParseError, Settings};
pub use source::{Dimensions, Drawable, ImageId, SourceImage};
