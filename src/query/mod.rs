//! Grid settings from a URL query string.
//!
//! Parses strings like `?mode=width_col&w=1200&cols=3&gap=8&fit=portrait`
//! into [`Settings`], starting from [`Settings::default()`] and overriding
//! only the keys present.
//!
//! # Example
//!
//! ```
//! use zengrid::{Anchor, FitMode, compute_layout, query};
//!
//! let result = query::parse("w=1200&cols=3&gap=0&fit=average&anchor=top-left");
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.settings.fit_mode, FitMode::Average);
//! assert_eq!(result.settings.anchor, Anchor::TopLeft);
//!
//! let layout = compute_layout(&[(100u32, 100u32); 3], &result.settings).unwrap();
//! assert_eq!(layout.total_height, 400.0);
//! ```

mod parse;

use alloc::string::String;
use alloc::vec::Vec;

use crate::settings::Settings;

/// Result of parsing a settings query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Parsed settings; unspecified fields keep their defaults.
    pub settings: Settings,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key is not a grid setting.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed. The field
    /// keeps its previous value.
    ValueInvalid {
        key: String,
        value: String,
        reason: &'static str,
    },
}

/// Parse a settings query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    parse_onto(query, Settings::default())
}

/// Like [`parse`], but overrides `base` instead of the defaults.
pub fn parse_onto(query: &str, base: Settings) -> ParseResult {
    let (settings, warnings) = parse::parse_query(query, base);
    log::debug!("parsed settings query with {} warnings", warnings.len());
    ParseResult { settings, warnings }
}
